// SPDX-License-Identifier: GPL-3.0

//! Chain specification documents.

use crate::error::merge::MergeError;
use serde_json::{Map, Value, json};
use std::{fs, path::Path, str::FromStr};

/// A chain specification.
///
/// A thin wrapper over the raw JSON document: unknown fields pass through
/// untouched, and key order is preserved so rewriting a spec is deterministic.
#[derive(Clone, Debug, PartialEq)]
pub struct ChainSpec(Value);

impl ChainSpec {
	/// Parses a chain specification from a path.
	///
	/// # Arguments
	/// * `path` - The path to a chain specification file.
	pub fn from(path: &Path) -> Result<ChainSpec, MergeError> {
		Ok(ChainSpec(Value::from_str(&fs::read_to_string(path)?)?))
	}

	/// Wraps an already-parsed JSON document.
	pub fn from_value(value: Value) -> ChainSpec {
		ChainSpec(value)
	}

	/// Get the chain name from the chain specification.
	pub fn name(&self) -> Option<&str> {
		self.0.get("name").and_then(|v| v.as_str())
	}

	/// Get the chain id from the chain specification.
	pub fn id(&self) -> Option<&str> {
		self.0.get("id").and_then(|v| v.as_str())
	}

	/// Get the protocol ID from the chain specification.
	pub fn protocol_id(&self) -> Option<&str> {
		self.0.get("protocolId").and_then(|v| v.as_str())
	}

	/// Replaces the chain name.
	pub fn set_name(&mut self, name: &str) {
		self.0["name"] = json!(name);
	}

	/// Replaces the chain id.
	pub fn set_id(&mut self, id: &str) {
		self.0["id"] = json!(id);
	}

	/// Replaces the protocol ID, removing the field when `None`.
	pub fn set_protocol_id(&mut self, protocol_id: Option<&str>) {
		match protocol_id {
			Some(id) => self.0["protocolId"] = json!(id),
			None => {
				if let Some(object) = self.0.as_object_mut() {
					object.remove("protocolId");
				}
			},
		}
	}

	/// The raw top-level storage map (`genesis.raw.top`) of the specification.
	///
	/// # Errors
	/// Returns [`MergeError::MissingField`] when the document does not carry a raw
	/// genesis storage section, e.g. when `build-spec` was run without `--raw`.
	pub fn top_mut(&mut self) -> Result<&mut Map<String, Value>, MergeError> {
		self.0
			.get_mut("genesis")
			.ok_or(MergeError::MissingField("genesis"))?
			.get_mut("raw")
			.ok_or(MergeError::MissingField("genesis.raw"))?
			.get_mut("top")
			.ok_or(MergeError::MissingField("genesis.raw.top"))?
			.as_object_mut()
			.ok_or(MergeError::MissingField("genesis.raw.top"))
	}

	/// Serializes the specification as indented JSON.
	pub fn to_string_pretty(&self) -> Result<String, MergeError> {
		Ok(serde_json::to_string_pretty(&self.0)?)
	}

	/// Writes the specification to a file as indented JSON, overwriting any prior
	/// content.
	///
	/// # Arguments
	/// * `path` - The destination file path.
	pub fn write(&self, path: &Path) -> Result<(), MergeError> {
		fs::write(path, self.to_string_pretty()?)?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn raw_spec() -> ChainSpec {
		ChainSpec::from_value(json!({
			"name": "Local Testnet",
			"id": "local_testnet",
			"protocolId": "lt",
			"genesis": { "raw": { "top": {} } }
		}))
	}

	#[test]
	fn accessors_read_identity_fields() {
		let spec = raw_spec();
		assert_eq!(spec.name(), Some("Local Testnet"));
		assert_eq!(spec.id(), Some("local_testnet"));
		assert_eq!(spec.protocol_id(), Some("lt"));
	}

	#[test]
	fn setters_replace_identity_fields() {
		let mut spec = raw_spec();
		spec.set_name("Local Testnet-fork");
		spec.set_id("local_testnet-fork");
		spec.set_protocol_id(None);
		assert_eq!(spec.name(), Some("Local Testnet-fork"));
		assert_eq!(spec.id(), Some("local_testnet-fork"));
		assert_eq!(spec.protocol_id(), None);
	}

	#[test]
	fn top_mut_fails_without_raw_genesis() {
		let mut spec = ChainSpec::from_value(json!({
			"name": "n", "id": "i", "genesis": { "runtimeGenesis": {} }
		}));
		assert!(matches!(spec.top_mut().unwrap_err(), MergeError::MissingField("genesis.raw")));
	}

	#[test]
	fn file_round_trip_preserves_key_order() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("spec.json");
		let mut spec = raw_spec();
		spec.top_mut().unwrap().insert("0xbb".to_string(), json!("0x02"));
		spec.top_mut().unwrap().insert("0xaa".to_string(), json!("0x01"));
		spec.write(&path).unwrap();

		let reread = ChainSpec::from(&path).unwrap();
		assert_eq!(reread.to_string_pretty().unwrap(), spec.to_string_pretty().unwrap());
	}
}
