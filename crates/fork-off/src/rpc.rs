// SPDX-License-Identifier: GPL-3.0

//! RPC client for exporting state from live Polkadot-SDK chains.
//!
//! Provides a focused JSON-RPC API surface for fork operations: bulk prefix-scoped
//! storage reads and runtime metadata retrieval.
//!
//! # Why HTTP?
//!
//! The client deliberately speaks JSON-RPC over HTTP rather than WebSocket.
//! `state_getPairs` responses for a whole partition can be tens of megabytes, and
//! WebSocket transports on Polkadot SDK nodes enforce a maximum message size that
//! such responses routinely exceed. Plain HTTP request/response has no such limit,
//! at the cost of one connection per request - acceptable for a batch export tool.
//!
//! Nodes may log warnings about the legacy `state_*` methods; these are safe to
//! ignore for this use case.

use crate::{error::rpc::RpcClientError, models::StoragePair, strings::rpc::methods};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use url::Url;

/// JSON-RPC 2.0 request envelope.
#[derive(Serialize)]
struct RpcRequest<'a> {
	jsonrpc: &'static str,
	id: u32,
	method: &'a str,
	params: Value,
}

/// JSON-RPC 2.0 response envelope.
#[derive(Deserialize)]
struct RpcResponse<T> {
	result: Option<T>,
	error: Option<RpcErrorObject>,
}

/// JSON-RPC 2.0 error object.
#[derive(Deserialize)]
struct RpcErrorObject {
	code: i64,
	message: String,
}

/// RPC client for fork operations.
///
/// Wraps a [`reqwest::Client`] to provide the handful of JSON-RPC methods the
/// export pipeline needs, with fork-specific error variants per method.
///
/// # Example
///
/// ```ignore
/// use fork_off::ForkRpcClient;
///
/// let client = ForkRpcClient::connect(&"http://localhost:9933".parse()?).await?;
/// let pairs = client.storage_pairs("0x26aa").await?;
/// let metadata = client.metadata().await?;
/// ```
#[derive(Clone, Debug)]
pub struct ForkRpcClient {
	http: reqwest::Client,
	endpoint: Url,
}

impl ForkRpcClient {
	/// Connect to a live Polkadot-SDK chain.
	///
	/// Issues a `system_chain` probe so that an unreachable or non-RPC endpoint is
	/// reported up front rather than mid-traversal.
	///
	/// # Arguments
	/// * `endpoint` - HTTP URL of the chain's RPC endpoint (e.g. `http://localhost:9933`)
	pub async fn connect(endpoint: &Url) -> Result<Self, RpcClientError> {
		let client = Self { http: reqwest::Client::new(), endpoint: endpoint.clone() };
		let chain = client.system_chain().await.map_err(|e| RpcClientError::ConnectionFailed {
			endpoint: endpoint.to_string(),
			message: e.to_string(),
		})?;
		log::info!("Connected to chain `{chain}` at {endpoint}");
		Ok(client)
	}

	/// Get the endpoint URL this client is connected to.
	pub fn endpoint(&self) -> &Url {
		&self.endpoint
	}

	/// Get the chain name.
	pub async fn system_chain(&self) -> Result<String, RpcClientError> {
		self.call(methods::SYSTEM_CHAIN, json!([])).await
	}

	/// Get every storage pair whose key starts with the given hex prefix.
	///
	/// One bulk read per call; the node guarantees prefix-scoped retrieval. An empty
	/// result is a valid outcome for sparse regions of the key space.
	///
	/// # Arguments
	/// * `prefix` - `0x`-prefixed hex key prefix scoping the read.
	pub async fn storage_pairs(&self, prefix: &str) -> Result<Vec<StoragePair>, RpcClientError> {
		self.call(methods::STATE_GET_PAIRS, json!([prefix])).await
	}

	/// Get the raw SCALE-encoded runtime metadata at the latest block.
	pub async fn metadata(&self) -> Result<Vec<u8>, RpcClientError> {
		let encoded: String = self.call(methods::STATE_GET_METADATA, json!([])).await?;
		hex::decode(encoded.trim_start_matches("0x")).map_err(|e| {
			RpcClientError::InvalidResponse(format!("metadata is not valid hex: {e}"))
		})
	}

	/// Perform a single JSON-RPC call, mapping transport and server errors.
	async fn call<T: DeserializeOwned>(
		&self,
		method: &'static str,
		params: Value,
	) -> Result<T, RpcClientError> {
		let request = RpcRequest { jsonrpc: "2.0", id: 1, method, params };
		let response = self
			.http
			.post(self.endpoint.clone())
			.json(&request)
			.send()
			.await
			.map_err(|e| RpcClientError::RequestFailed { method, message: e.to_string() })?;

		let body: RpcResponse<T> = response
			.json()
			.await
			.map_err(|e| RpcClientError::InvalidResponse(e.to_string()))?;

		if let Some(error) = body.error {
			return Err(RpcClientError::ServerError {
				method,
				code: error.code,
				message: error.message,
			});
		}

		body.result
			.ok_or_else(|| RpcClientError::InvalidResponse(format!("`{method}` returned no result")))
	}
}
