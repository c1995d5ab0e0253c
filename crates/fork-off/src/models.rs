// SPDX-License-Identifier: GPL-3.0

//! Data rows exchanged between the fetch, collection and merge phases.

use serde::{Deserialize, Serialize};

/// A single storage entry exported from a live chain.
///
/// Both key and value are `0x`-prefixed hex strings, exactly as returned by the
/// `state_getPairs` RPC. The tuple-struct representation serializes as a two-element
/// JSON array (`["0x…", "0x…"]`), which is both the wire format and the on-disk
/// dataset format.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct StoragePair(pub String, pub String);

impl StoragePair {
	/// The hex-encoded storage key.
	pub fn key(&self) -> &str {
		&self.0
	}

	/// The hex-encoded storage value.
	pub fn value(&self) -> &str {
		&self.1
	}
}

impl From<(&str, &str)> for StoragePair {
	fn from((key, value): (&str, &str)) -> Self {
		Self(key.to_string(), value.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn serializes_as_two_element_array() {
		let pair = StoragePair::from(("0xaa01", "0x01"));
		assert_eq!(serde_json::to_string(&pair).unwrap(), r#"["0xaa01","0x01"]"#);
	}

	#[test]
	fn deserializes_from_rpc_wire_format() {
		let pair: StoragePair = serde_json::from_str(r#"["0xbb01","0x02"]"#).unwrap();
		assert_eq!(pair.key(), "0xbb01");
		assert_eq!(pair.value(), "0x02");
	}
}
