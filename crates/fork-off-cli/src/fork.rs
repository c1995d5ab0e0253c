// SPDX-License-Identifier: GPL-3.0

use anyhow::Result;
use clap::Args;
use console::style;
use fork_off::{
	ChainSpec, ForkMetadata, ForkRpcClient, NodeBinary, StateCollector, StateDownloader,
	leaf_count, merge, registry, runtime_code_hex,
};
use std::path::{Path, PathBuf};
use url::Url;

/// Endpoint used when neither the flag nor the environment provides one.
const DEFAULT_ENDPOINT: &str = "http://localhost:9933";
/// Partition depth used when neither the flag nor the environment provides one.
const DEFAULT_CHUNKS_LEVEL: u8 = 1;

/// Environment variables honored as fallbacks for the corresponding flags.
mod vars {
	pub const ENDPOINT: &str = "HTTP_RPC_ENDPOINT";
	pub const CHUNKS_LEVEL: &str = "FORK_CHUNKS_LEVEL";
	pub const QUICK_MODE: &str = "QUICK_MODE";
}

/// UI messages for the fork session.
mod messages {
	pub const INTRO: &str = "Forking chain state";
	pub const HTTP_NOTE: &str =
		"Using the HTTP endpoint on purpose; warnings about it from the node can be ignored.";
	pub const REUSING_CACHE: &str =
		"Reusing cached storage. Delete storage.json and rerun to fetch the latest state";
	pub const DOWNLOADED: &str = "State downloaded";

	/// Format the download progress message for `chunks` chunks.
	pub fn downloading(chunks: u64) -> String {
		format!("Fetching current chain state in {chunks} chunks; this can take a while...")
	}

	/// Format the final outro message.
	pub fn generated(path: &std::path::Path) -> String {
		format!("Forked genesis generated successfully. Find it at {}", path.display())
	}
}

/// Arguments for forking a chain.
#[derive(Args, Clone, Debug, Default)]
pub(crate) struct ForkArgs {
	/// HTTP RPC endpoint of the chain to fork. Falls back to the
	/// `HTTP_RPC_ENDPOINT` environment variable, then http://localhost:9933.
	#[arg(short, long)]
	pub endpoint: Option<String>,

	/// Split the state download into 256^LEVEL chunks. Falls back to
	/// `FORK_CHUNKS_LEVEL`, then 1. Level 0 fetches the whole state in a single
	/// call, which may not fit in memory on non-trivial chains.
	#[arg(short = 'l', long, value_name = "LEVEL")]
	pub chunks_level: Option<u8>,

	/// Fetch the last level of chunks concurrently (256 requests in flight).
	/// Also enabled by setting `QUICK_MODE`.
	#[arg(short, long)]
	pub quick: bool,

	/// Directory containing the `binary` and `runtime.wasm` artifacts; receives
	/// `genesis.json`, `fork.json` and the `storage.json` dataset.
	#[arg(short, long, default_value = "./data")]
	pub data_dir: PathBuf,

	/// Chain id passed to `build-spec` for the original chain's specification.
	#[arg(short, long, default_value = "testnet")]
	pub chain: String,
}

impl ForkArgs {
	fn endpoint(&self) -> Result<Url> {
		let raw = self
			.endpoint
			.clone()
			.or_else(|| std::env::var(vars::ENDPOINT).ok().filter(|v| !v.is_empty()))
			.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
		Ok(raw.parse()?)
	}

	fn chunks_level(&self) -> u8 {
		self.chunks_level
			.or_else(|| std::env::var(vars::CHUNKS_LEVEL).ok().and_then(|v| v.parse().ok()))
			.unwrap_or(DEFAULT_CHUNKS_LEVEL)
	}

	fn quick(&self) -> bool {
		self.quick || std::env::var(vars::QUICK_MODE).is_ok_and(|v| !v.is_empty())
	}
}

/// File layout inside the data directory.
struct DataPaths {
	binary: PathBuf,
	runtime_wasm: PathBuf,
	original_spec: PathBuf,
	forked_spec: PathBuf,
	storage: PathBuf,
}

impl DataPaths {
	fn new(data_dir: &Path) -> Self {
		Self {
			binary: data_dir.join("binary"),
			runtime_wasm: data_dir.join("runtime.wasm"),
			original_spec: data_dir.join("genesis.json"),
			forked_spec: data_dir.join("fork.json"),
			storage: data_dir.join("storage.json"),
		}
	}
}

pub(crate) struct Command;

impl Command {
	pub(crate) async fn execute(args: &ForkArgs) -> Result<()> {
		cliclack::intro(format!(
			"{}: {}",
			style(" fork-off ").black().on_magenta(),
			messages::INTRO
		))?;
		let paths = DataPaths::new(&args.data_dir);

		// Preconditions: both artifacts must be present before any network activity.
		let node = NodeBinary::new(&paths.binary)?;
		node.ensure_executable()?;
		let runtime_hex = runtime_code_hex(&paths.runtime_wasm)?;

		let endpoint = args.endpoint()?;
		cliclack::log::info(style(messages::HTTP_NOTE).dim().to_string())?;
		let client = ForkRpcClient::connect(&endpoint).await?;

		if StateCollector::is_cached(&paths.storage) {
			cliclack::log::warning(messages::REUSING_CACHE)?;
		} else {
			Self::download_state(args, &client, &paths.storage).await?;
		}

		let metadata = ForkMetadata::from_rpc_client(&client).await?;
		let prefixes = registry::retained_prefixes(
			&registry::default_manual_prefixes(),
			&metadata.storage_prefixes(),
			&registry::SKIPPED_MODULES,
		);

		// Template specifications: one for the original chain's identity, one
		// freshly generated to receive the exported state.
		node.export_chain_spec(&args.chain, &paths.original_spec)?;
		node.export_dev_chain_spec(&paths.forked_spec)?;

		let pairs = StateCollector::load(&paths.storage)?;
		let original = ChainSpec::from(&paths.original_spec)?;
		let mut forked = ChainSpec::from(&paths.forked_spec)?;
		merge(&mut forked, &original, &pairs, &prefixes, &runtime_hex)?;
		forked.write(&paths.forked_spec)?;

		cliclack::outro(messages::generated(&paths.forked_spec))?;
		Ok(())
	}

	async fn download_state(
		args: &ForkArgs,
		client: &ForkRpcClient,
		storage: &Path,
	) -> Result<()> {
		let depth = args.chunks_level();
		let chunks = leaf_count(depth);
		log::info!("downloading state in {chunks} chunks (level {depth}, quick: {})", args.quick());

		let progress = cliclack::ProgressBar::new(chunks);
		progress.start(messages::downloading(chunks));

		let collector = StateCollector::create(storage)?;
		let downloader =
			StateDownloader::new(client, &collector).with_parallel_leaves(args.quick());
		downloader.download(depth, |_| progress.inc(1)).await?;
		collector.finish().await?;

		progress.stop(messages::DOWNLOADED);
		Ok(())
	}
}
