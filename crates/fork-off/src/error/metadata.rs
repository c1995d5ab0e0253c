// SPDX-License-Identifier: GPL-3.0

//! Runtime metadata error types.

use thiserror::Error;

/// Errors that can occur when decoding runtime metadata.
#[derive(Debug, Error)]
pub enum MetadataError {
	/// The metadata bytes could not be SCALE-decoded.
	#[error("Failed to decode runtime metadata")]
	DecodeError,
	/// Fetching the metadata from the chain failed.
	#[error("RPC error: {0}")]
	Rpc(#[from] super::rpc::RpcClientError),
}
