// SPDX-License-Identifier: GPL-3.0

//! State download error types.

use thiserror::Error;

/// Errors that can occur while downloading state chunks.
#[derive(Debug, Error)]
pub enum DownloadError {
	/// A bulk read against the remote store failed. Fatal for the whole traversal.
	#[error("RPC error: {0}")]
	Rpc(#[from] super::rpc::RpcClientError),
	/// Appending a fetched batch to the dataset file failed.
	#[error("Collector error: {0}")]
	Collector(#[from] super::collector::CollectorError),
}
