// SPDX-License-Identifier: GPL-3.0

//! Error types for fork-off operations.
//!
//! This module contains all error types used throughout the `fork-off` crate,
//! organized by context:
//!
//! - [`rpc::RpcClientError`] - Errors from RPC client operations.
//! - [`chunker::DownloadError`] - Errors from the chunked state download.
//! - [`collector::CollectorError`] - Errors from the streaming state collector.
//! - [`metadata::MetadataError`] - Errors from runtime metadata decoding.
//! - [`merge::MergeError`] - Errors from the genesis merge.
//! - [`node::NodeError`] - Errors from node binary invocation.

pub mod chunker;
pub mod collector;
pub mod merge;
pub mod metadata;
pub mod node;
pub mod rpc;

pub use chunker::DownloadError;
pub use collector::CollectorError;
pub use merge::MergeError;
pub use metadata::MetadataError;
pub use node::NodeError;
pub use rpc::RpcClientError;
