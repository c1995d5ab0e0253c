// SPDX-License-Identifier: GPL-3.0

//! Storage key derivation.
//!
//! Storage keys on Polkadot SDK chains are derived as
//! `twox128(module) ++ twox128(item)` for plain values, with map entries appending
//! further hashed components. The registry and merge only need the module and
//! value-level prefixes, computed here with the same `twox_128` the runtime's
//! storage layer uses, so no RPC round trip is required to derive them.

use sp_core::{storage::well_known_keys, twox_128};

/// Sentinel value for `Staking.ForceEra` that disables era rotation (`ForceNone`).
pub const FORCE_NONE: &str = "0x02";

/// The hex-encoded `twox128` prefix of a module's storage section.
///
/// Equivalent to `xxhashAsHex(name, 128)` in polkadot-js.
pub fn module_prefix(module: &str) -> String {
	format!("0x{}", hex::encode(twox_128(module.as_bytes())))
}

/// The full hex-encoded key of a plain storage value:
/// `twox128(module) ++ twox128(item)`.
pub fn storage_value_key(module: &str, item: &str) -> String {
	let mut key = twox_128(module.as_bytes()).to_vec();
	key.extend(twox_128(item.as_bytes()));
	format!("0x{}", hex::encode(key))
}

/// The well-known `:code` key holding the current runtime code.
pub fn code() -> String {
	format!("0x{}", hex::encode(well_known_keys::CODE))
}

/// The `System.LastRuntimeUpgrade` key recording the last runtime upgrade marker.
///
/// Removed from forks so that `on_runtime_upgrade` hooks fire on the first block.
pub fn last_runtime_upgrade() -> String {
	storage_value_key("System", "LastRuntimeUpgrade")
}

/// The `Staking.ForceEra` key controlling validator era rotation.
pub fn force_era() -> String {
	storage_value_key("Staking", "ForceEra")
}

#[cfg(test)]
mod tests {
	use super::*;

	// Expected values below are the well-known hex literals for these keys,
	// verifiable via polkadot-js (e.g. `api.query.system.account.keyPrefix()`).

	#[test]
	fn module_prefix_matches_known_system_hash() {
		assert_eq!(module_prefix("System"), "0x26aa394eea5630e07c48ae0c9558cef7");
	}

	#[test]
	fn system_account_prefix_matches_known_constant() {
		assert_eq!(
			storage_value_key("System", "Account"),
			"0x26aa394eea5630e07c48ae0c9558cef7b99d880ec681799c0cf30e8886371da9"
		);
	}

	#[test]
	fn code_key_is_raw_colon_code() {
		assert_eq!(code(), "0x3a636f6465");
	}

	#[test]
	fn last_runtime_upgrade_matches_known_constant() {
		assert_eq!(
			last_runtime_upgrade(),
			"0x26aa394eea5630e07c48ae0c9558cef7f9cce9c888469bb1a0dceaa129672ef8"
		);
	}

	#[test]
	fn force_era_matches_known_constant() {
		assert_eq!(
			force_era(),
			"0x5f3e4907f716ac89b6347d15ececedcaf7dad0317324aecae8744b87fc95f2f3"
		);
	}
}
