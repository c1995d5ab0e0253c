// SPDX-License-Identifier: GPL-3.0

//! Merging exported state into a forked chain specification.

use crate::{error::merge::MergeError, keys, models::StoragePair, spec::ChainSpec};
use serde_json::Value;
use std::collections::HashSet;

/// Splice exported storage into a freshly generated chain specification.
///
/// Applies, in order:
/// 1. Identity: `name` and `id` become the original's with a `-fork` suffix;
///    `protocolId` is copied unchanged.
/// 2. Filter: every pair whose key starts with a retained prefix is written into
///    `genesis.raw.top` (last write wins on duplicate keys).
/// 3. `System.LastRuntimeUpgrade` is removed so runtime-upgrade hooks fire on the
///    fork's first block.
/// 4. `:code` is overwritten with the supplied runtime code, so the fork runs the
///    intended runtime regardless of what the original chain's storage contained.
/// 5. `Staking.ForceEra` is forced to `ForceNone`, freezing the validator set.
///
/// Purely syntactic assembly: deterministic given identical inputs, with no
/// validation that the injected keys are well-formed for the target runtime.
///
/// # Arguments
/// * `forked` - The freshly generated specification, mutated in place.
/// * `original` - The original chain's specification, read for identity fields.
/// * `pairs` - The collected dataset of exported storage pairs.
/// * `prefixes` - Retained key prefixes (see [`crate::registry::retained_prefixes`]).
/// * `runtime_code_hex` - Hex-encoded runtime code, with or without a `0x` prefix.
pub fn merge(
	forked: &mut ChainSpec,
	original: &ChainSpec,
	pairs: &[StoragePair],
	prefixes: &HashSet<String>,
	runtime_code_hex: &str,
) -> Result<(), MergeError> {
	let name = original.name().ok_or(MergeError::MissingField("name"))?;
	forked.set_name(&format!("{name}-fork"));
	let id = original.id().ok_or(MergeError::MissingField("id"))?;
	forked.set_id(&format!("{id}-fork"));
	forked.set_protocol_id(original.protocol_id());

	let top = forked.top_mut()?;
	for pair in pairs
		.iter()
		.filter(|pair| prefixes.iter().any(|prefix| pair.key().starts_with(prefix.as_str())))
	{
		top.insert(pair.key().to_string(), Value::String(pair.value().to_string()));
	}

	top.remove(&keys::last_runtime_upgrade());

	let code = format!("0x{}", runtime_code_hex.trim().trim_start_matches("0x"));
	top.insert(keys::code(), Value::String(code));

	top.insert(keys::force_era(), Value::String(keys::FORCE_NONE.to_string()));

	Ok(())
}
