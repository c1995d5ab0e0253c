// SPDX-License-Identifier: GPL-3.0

//! Streaming state collector error types.

use thiserror::Error;

/// Errors that can occur while collecting or reading back exported state.
#[derive(Debug, Error)]
pub enum CollectorError {
	/// An I/O error on the dataset file.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// The collected dataset could not be serialized or parsed.
	#[error("Invalid dataset: {0}")]
	InvalidDataset(#[from] serde_json::Error),
}
