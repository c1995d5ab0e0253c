// SPDX-License-Identifier: GPL-3.0

//! Genesis merge error types.

use thiserror::Error;

/// Errors that can occur when merging exported state into a chain specification.
#[derive(Debug, Error)]
pub enum MergeError {
	/// A chain specification is missing a required field.
	#[error("Malformed chain specification: expected `{0}`")]
	MissingField(&'static str),
	/// An I/O error while reading or writing a chain specification file.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// A chain specification file is not valid JSON.
	#[error("Invalid chain specification: {0}")]
	InvalidDocument(#[from] serde_json::Error),
}
