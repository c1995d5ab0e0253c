// SPDX-License-Identifier: GPL-3.0

//! Fork functionality for creating independent forks of live Polkadot SDK chains.
//!
//! This crate exports the full key-value storage of a running chain over HTTP
//! JSON-RPC and splices a filtered subset of it into a freshly generated chain
//! specification, preserving selected on-chain state (balances, governance, etc.)
//! while the fork boots with its own validator identity.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          fork-off CLI                           │
//! └─────────────────────────────────────────────────────────────────┘
//!                                 │
//!                                 ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Chunked state export                        │
//! │  ┌─────────────┐  ┌──────────────────┐  ┌───────────────────┐   │
//! │  │  Partition  │─▶│  ForkRpcClient   │─▶│  StateCollector   │   │
//! │  │  traversal  │  │ (state_getPairs) │  │ (streaming array) │   │
//! │  └─────────────┘  └──────────────────┘  └───────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//!                                 │
//!                                 ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         Genesis merge                           │
//! │   retained prefixes (metadata) + dataset + node `build-spec`    │
//! │                      ──▶  fork.json                             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod chunker;
mod collector;
pub mod error;
pub mod keys;
mod merge;
mod metadata;
mod models;
mod node;
pub mod registry;
mod rpc;
mod spec;
mod strings;

pub use chunker::{PairSource, Partition, StateDownloader, leaf_count};
pub use collector::StateCollector;
pub use error::{
	CollectorError, DownloadError, MergeError, MetadataError, NodeError, RpcClientError,
};
pub use merge::merge;
pub use metadata::ForkMetadata;
pub use models::StoragePair;
pub use node::{NodeBinary, runtime_code_hex};
pub use rpc::ForkRpcClient;
pub use spec::ChainSpec;
