// SPDX-License-Identifier: GPL-3.0

//! Prefix-partitioned traversal of a chain's key space.
//!
//! The full key space is split into `256^depth` disjoint hex-prefix partitions, each
//! small enough for a single bulk `state_getPairs` read. Depth is a trade-off:
//! deeper partitioning bounds response sizes at the cost of more round trips. The
//! traversal runs an explicit worklist rather than recursing 256-wide, and can
//! optionally overlap the round trips of the 256 leaves under one parent - never
//! more - so peak concurrency stays bounded at a single parent's fan-out.

use crate::{
	collector::StateCollector,
	error::{chunker::DownloadError, rpc::RpcClientError},
	models::StoragePair,
	rpc::ForkRpcClient,
};
use async_trait::async_trait;
use futures::future::try_join_all;

/// A contiguous slice of the key space: a hex prefix plus the number of partitioning
/// levels still to be expanded below it.
///
/// A partition with zero levels remaining is a *leaf*, eligible for a direct fetch.
/// Any other partition expands into exactly 256 children, one per possible next byte.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Partition {
	prefix: String,
	levels_remaining: u8,
}

impl Partition {
	/// The root partition covering the entire key space.
	///
	/// `depth` of zero yields a single leaf: the whole state in one call. Legal, but
	/// the response for a non-trivial chain may not fit in memory.
	pub fn root(depth: u8) -> Self {
		Self { prefix: "0x".to_string(), levels_remaining: depth }
	}

	/// The hex key prefix scoping this partition.
	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	/// Levels of partitioning remaining below this partition.
	pub fn levels_remaining(&self) -> u8 {
		self.levels_remaining
	}

	/// Whether this partition is directly fetchable.
	pub fn is_leaf(&self) -> bool {
		self.levels_remaining == 0
	}

	/// The 256 child partitions, in ascending byte order (`00` to `ff`).
	pub fn children(&self) -> impl Iterator<Item = Partition> + '_ {
		debug_assert!(!self.is_leaf());
		(0x00u16..=0xff).map(move |byte| Partition {
			prefix: format!("{}{byte:02x}", self.prefix),
			levels_remaining: self.levels_remaining - 1,
		})
	}
}

/// Number of leaf partitions (and thus bulk reads) a traversal of `depth` performs.
pub fn leaf_count(depth: u8) -> u64 {
	256u64.saturating_pow(depth as u32)
}

/// Source of prefix-scoped storage pairs.
///
/// The seam between the traversal and the remote store: implemented by
/// [`ForkRpcClient`] for live chains and by in-memory fakes in tests.
#[async_trait]
pub trait PairSource: Sync {
	/// Every pair whose key starts with `prefix`. Empty is a valid outcome.
	async fn pairs_by_prefix(&self, prefix: &str) -> Result<Vec<StoragePair>, RpcClientError>;
}

#[async_trait]
impl PairSource for ForkRpcClient {
	async fn pairs_by_prefix(&self, prefix: &str) -> Result<Vec<StoragePair>, RpcClientError> {
		self.storage_pairs(prefix).await
	}
}

/// Drives the partitioned traversal, streaming every fetched batch into a
/// [`StateCollector`].
///
/// Fetches are sequential by default. With [`Self::with_parallel_leaves`] enabled,
/// the 256 leaves under each final-level parent are fetched concurrently and joined
/// before the traversal continues; initiation order remains ascending either way,
/// though completion (and thus dataset) order is then unspecified.
pub struct StateDownloader<'a, S: PairSource> {
	source: &'a S,
	collector: &'a StateCollector,
	parallel: bool,
}

impl<'a, S: PairSource> StateDownloader<'a, S> {
	/// Create a sequential downloader.
	pub fn new(source: &'a S, collector: &'a StateCollector) -> Self {
		Self { source, collector, parallel: false }
	}

	/// Enable or disable concurrent fetching of last-level leaves.
	pub fn with_parallel_leaves(mut self, parallel: bool) -> Self {
		self.parallel = parallel;
		self
	}

	/// Download the entire key space at the given partition depth.
	///
	/// `on_chunk` is invoked with the completed chunk count after every leaf fetch,
	/// for progress reporting. The first error aborts the whole traversal; the
	/// dataset file is then truncated mid-array and must be deleted before retrying.
	pub async fn download<F>(&self, depth: u8, on_chunk: F) -> Result<(), DownloadError>
	where
		F: Fn(u64) + Sync,
	{
		let on_chunk = &on_chunk;
		let mut worklist = vec![Partition::root(depth)];
		while let Some(partition) = worklist.pop() {
			if partition.is_leaf() {
				self.fetch_leaf(&partition, on_chunk).await?;
			} else if self.parallel && partition.levels_remaining() == 1 {
				// All children are leaves; overlap their round trips and wait for
				// the whole sibling set before moving to the next parent.
				try_join_all(
					partition
						.children()
						.map(|leaf| async move { self.fetch_leaf(&leaf, on_chunk).await }),
				)
				.await?;
			} else {
				// Reversed so that pop() initiates children in ascending order.
				let mut children: Vec<_> = partition.children().collect();
				children.reverse();
				worklist.append(&mut children);
			}
		}
		Ok(())
	}

	async fn fetch_leaf<F>(&self, leaf: &Partition, on_chunk: &F) -> Result<(), DownloadError>
	where
		F: Fn(u64) + Sync,
	{
		let pairs = self.source.pairs_by_prefix(leaf.prefix()).await?;
		log::debug!("chunk {} returned {} pairs", leaf.prefix(), pairs.len());
		let done = self.collector.append(&pairs).await?;
		on_chunk(done);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::{
		collections::{HashMap, HashSet},
		sync::Mutex,
	};

	/// In-memory pair source recording the initiation order of every fetch.
	#[derive(Default)]
	struct RecordingSource {
		data: HashMap<String, Vec<StoragePair>>,
		fail_on: Option<String>,
		calls: Mutex<Vec<String>>,
	}

	#[async_trait]
	impl PairSource for RecordingSource {
		async fn pairs_by_prefix(&self, prefix: &str) -> Result<Vec<StoragePair>, RpcClientError> {
			self.calls.lock().unwrap().push(prefix.to_string());
			if self.fail_on.as_deref() == Some(prefix) {
				return Err(RpcClientError::RequestFailed {
					method: "state_getPairs",
					message: "boom".to_string(),
				});
			}
			Ok(self.data.get(prefix).cloned().unwrap_or_default())
		}
	}

	fn expand(partition: &Partition) -> Vec<Partition> {
		if partition.is_leaf() {
			return vec![partition.clone()];
		}
		partition.children().flat_map(|child| expand(&child)).collect()
	}

	#[test]
	fn depth_zero_is_a_single_leaf_over_the_root() {
		let root = Partition::root(0);
		assert!(root.is_leaf());
		assert_eq!(root.prefix(), "0x");
		assert_eq!(leaf_count(0), 1);
	}

	#[test]
	fn children_are_256_ascending_disjoint_extensions() {
		let root = Partition::root(1);
		let children: Vec<_> = root.children().collect();
		assert_eq!(children.len(), 256);
		assert_eq!(children[0].prefix(), "0x00");
		assert_eq!(children[255].prefix(), "0xff");
		let mut sorted = children.clone();
		sorted.sort_by(|a, b| a.prefix().cmp(b.prefix()));
		assert_eq!(children, sorted);
		assert!(children.iter().all(Partition::is_leaf));
	}

	#[test]
	fn leaves_cover_the_key_space_exactly_once_at_depth_two() {
		let leaves = expand(&Partition::root(2));
		assert_eq!(leaves.len() as u64, leaf_count(2));
		let unique: HashSet<_> = leaves.iter().map(|l| l.prefix().to_string()).collect();
		assert_eq!(unique.len(), leaves.len(), "leaf prefixes must be disjoint");
		assert!(leaves.iter().all(|l| l.prefix().len() == 2 + 4));
	}

	#[tokio::test]
	async fn sequential_traversal_initiates_in_ascending_order() {
		let dir = tempfile::tempdir().unwrap();
		let collector = StateCollector::create(&dir.path().join("storage.json")).unwrap();
		let source = RecordingSource::default();

		StateDownloader::new(&source, &collector).download(1, |_| {}).await.unwrap();

		let calls = source.calls.lock().unwrap();
		assert_eq!(calls.len(), 256);
		assert_eq!(calls[0], "0x00");
		assert_eq!(calls[255], "0xff");
		let mut sorted = calls.clone();
		sorted.sort();
		assert_eq!(*calls, sorted);
	}

	#[tokio::test]
	async fn traversal_streams_pairs_into_the_collector() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("storage.json");
		let collector = StateCollector::create(&path).unwrap();
		let mut source = RecordingSource::default();
		source
			.data
			.insert("0x2a".to_string(), vec![StoragePair::from(("0x2a01", "0x01"))]);
		source
			.data
			.insert("0xf0".to_string(), vec![StoragePair::from(("0xf001", "0x02"))]);

		StateDownloader::new(&source, &collector).download(1, |_| {}).await.unwrap();
		collector.finish().await.unwrap();

		let pairs = StateCollector::load(&path).unwrap();
		assert_eq!(
			pairs,
			vec![StoragePair::from(("0x2a01", "0x01")), StoragePair::from(("0xf001", "0x02"))]
		);
	}

	#[tokio::test]
	async fn parallel_leaves_fetch_every_partition_and_stay_valid() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("storage.json");
		let collector = StateCollector::create(&path).unwrap();
		let mut source = RecordingSource::default();
		for byte in [0x00u8, 0x7f, 0xff] {
			let prefix = format!("0x{byte:02x}");
			source.data.insert(
				prefix.clone(),
				vec![StoragePair::from((format!("{prefix}aa").as_str(), "0x01"))],
			);
		}

		StateDownloader::new(&source, &collector)
			.with_parallel_leaves(true)
			.download(1, |_| {})
			.await
			.unwrap();
		collector.finish().await.unwrap();

		let calls: HashSet<_> = source.calls.lock().unwrap().iter().cloned().collect();
		assert_eq!(calls.len(), 256);
		// Output order is unspecified under the parallel policy, but the dataset
		// must still parse and contain every fetched pair.
		let pairs = StateCollector::load(&path).unwrap();
		assert_eq!(pairs.len(), 3);
	}

	#[tokio::test]
	async fn progress_callback_reports_completed_chunks() {
		let dir = tempfile::tempdir().unwrap();
		let collector = StateCollector::create(&dir.path().join("storage.json")).unwrap();
		let source = RecordingSource::default();
		let seen = Mutex::new(Vec::new());

		StateDownloader::new(&source, &collector)
			.download(1, |done| seen.lock().unwrap().push(done))
			.await
			.unwrap();

		let seen = seen.into_inner().unwrap();
		assert_eq!(seen.len(), 256);
		assert_eq!(*seen.last().unwrap(), 256);
	}

	#[tokio::test]
	async fn fetch_failure_aborts_the_traversal() {
		let dir = tempfile::tempdir().unwrap();
		let collector = StateCollector::create(&dir.path().join("storage.json")).unwrap();
		let source = RecordingSource {
			fail_on: Some("0x07".to_string()),
			..Default::default()
		};

		let result = StateDownloader::new(&source, &collector).download(1, |_| {}).await;

		assert!(matches!(result.unwrap_err(), DownloadError::Rpc(_)));
		// Nothing past the failing partition was initiated.
		let calls = source.calls.lock().unwrap();
		assert_eq!(calls.last().unwrap(), "0x07");
		assert_eq!(calls.len(), 8);
	}
}
