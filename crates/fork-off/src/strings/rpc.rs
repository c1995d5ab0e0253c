// SPDX-License-Identifier: GPL-3.0

//! String constants for the RPC client module.

/// JSON-RPC method names.
///
/// These match the actual RPC method names in the Polkadot SDK JSON-RPC specification.
pub mod methods {
	pub const STATE_GET_PAIRS: &str = "state_getPairs";
	pub const STATE_GET_METADATA: &str = "state_getMetadata";
	pub const SYSTEM_CHAIN: &str = "system_chain";
}
