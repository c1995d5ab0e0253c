// SPDX-License-Identifier: GPL-3.0

//! Streaming collection of exported storage pairs.
//!
//! Fetched pairs are appended to a single growing JSON array on disk as the
//! traversal progresses, so the full dataset is never held in memory and partial
//! progress survives until an interruption. The file doubles as a cache: when it
//! already exists from a prior run, collection is skipped entirely and the dataset
//! is read back instead (see [`StateCollector::is_cached`]). Staleness is the
//! caller's responsibility - delete the file to force re-collection. A run
//! interrupted mid-write leaves a truncated, unparseable file which must likewise
//! be deleted before retrying.

use crate::{error::collector::CollectorError, models::StoragePair};
use std::{
	fs::File,
	io::{BufReader, BufWriter, Write},
	path::Path,
};
use tokio::sync::Mutex;

/// Append state guarded together with the writer.
///
/// The separator flag and the chunk counter are mutable state shared by every
/// in-flight fetch under the parallel-leaf policy; keeping them inside the same
/// mutex as the writer makes a whole batch write one critical section, so the
/// output array stays syntactically valid under any interleaving.
struct Inner {
	writer: BufWriter<File>,
	separator: bool,
	chunks: u64,
}

/// Incrementally writes exported storage pairs to a dataset file as a JSON array.
///
/// [`StateCollector::append`] is safe to call from logically-concurrent fetches;
/// writes are serialized internally.
pub struct StateCollector {
	inner: Mutex<Inner>,
}

impl StateCollector {
	/// Create the dataset file, truncating any previous content, and write the
	/// opening array delimiter.
	pub fn create(path: &Path) -> Result<Self, CollectorError> {
		let mut writer = BufWriter::new(File::create(path)?);
		writer.write_all(b"[")?;
		Ok(Self { inner: Mutex::new(Inner { writer, separator: false, chunks: 0 }) })
	}

	/// Append one fetched batch to the dataset.
	///
	/// Non-empty batches are preceded by a separator, except the very first one.
	/// Empty batches write nothing but still advance the chunk counter, which is
	/// returned for progress reporting.
	pub async fn append(&self, pairs: &[StoragePair]) -> Result<u64, CollectorError> {
		let inner = &mut *self.inner.lock().await;
		for pair in pairs {
			if inner.separator {
				inner.writer.write_all(b",")?;
			} else {
				inner.separator = true;
			}
			serde_json::to_writer(&mut inner.writer, pair)?;
		}
		inner.chunks += 1;
		Ok(inner.chunks)
	}

	/// Write the closing array delimiter and flush the dataset to disk.
	pub async fn finish(self) -> Result<(), CollectorError> {
		let mut inner = self.inner.into_inner();
		inner.writer.write_all(b"]")?;
		inner.writer.flush()?;
		Ok(())
	}

	/// Whether a completed dataset from a prior run exists at `path`.
	///
	/// Existence-based only: no timestamp or checksum validation.
	pub fn is_cached(path: &Path) -> bool {
		path.exists()
	}

	/// Read a completed dataset back in full for the merge phase.
	pub fn load(path: &Path) -> Result<Vec<StoragePair>, CollectorError> {
		let reader = BufReader::new(File::open(path)?);
		Ok(serde_json::from_reader(reader)?)
	}
}
