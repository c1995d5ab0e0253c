// SPDX-License-Identifier: GPL-3.0

//! Retained-prefix computation.
//!
//! Decides which exported storage keys are carried into the fork. Every module that
//! declares a storage section contributes its `twox128` prefix, unless the module is
//! on the skip-list: those modules encode validator, consensus or session identity
//! tied to the original network, which would conflict with the fork's own
//! genesis-generated identity. Manual prefixes cover raw, already-hashed keys that
//! don't map cleanly to a module (or re-admit parts of a skipped module).

use crate::keys;
use std::collections::HashSet;

/// Modules whose storage must not be carried into the fork.
pub const SKIPPED_MODULES: [&str; 7] = [
	"System",
	"Session",
	"Babe",
	"Grandpa",
	"GrandpaFinality",
	"FinalityTracker",
	"Authorship",
];

/// Raw prefixes retained regardless of the module listing.
///
/// `System.Account` is skipped at the module level (the rest of `System` is
/// network-specific bookkeeping) but the accounts ledger itself must survive the
/// fork, so its map prefix is re-admitted here.
pub fn default_manual_prefixes() -> Vec<String> {
	vec![keys::storage_value_key("System", "Account")]
}

/// Compute the set of retained key prefixes.
///
/// Pure function over its inputs: the union of `manual` and the `twox128` hash of
/// every entry in `storage_prefixes` whose name is not in `skipped`. The result is
/// used purely as a starts-with predicate against collected keys.
///
/// # Arguments
/// * `manual` - Raw, already-hashed prefixes to always retain.
/// * `storage_prefixes` - Storage-section names of every module reported by the
///   chain's metadata (see [`crate::ForkMetadata::storage_prefixes`]).
/// * `skipped` - Module names whose state must not be carried over.
pub fn retained_prefixes(
	manual: &[String],
	storage_prefixes: &[String],
	skipped: &[&str],
) -> HashSet<String> {
	let mut prefixes: HashSet<String> = manual.iter().cloned().collect();
	prefixes.extend(
		storage_prefixes
			.iter()
			.filter(|name| !skipped.contains(&name.as_str()))
			.map(|name| keys::module_prefix(name)),
	);
	prefixes
}
