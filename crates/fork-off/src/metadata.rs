// SPDX-License-Identifier: GPL-3.0

use crate::{error::metadata::MetadataError, rpc::ForkRpcClient};
use subxt::{Metadata, ext::codec::Decode};

/// Wrapper around [`Metadata`] for forking specific operations.
///
/// The registry only needs the chain's module listing: which pallets declare a
/// storage section and under what prefix name. That listing is SCALE-encoded inside
/// the runtime metadata fetched over RPC.
#[derive(Debug)]
pub struct ForkMetadata(Metadata);

impl ForkMetadata {
	/// Create `ForkMetadata` from an RPC client by fetching metadata at the latest block.
	///
	/// # Arguments
	/// - client - The ForkRpcClient
	pub async fn from_rpc_client(client: &ForkRpcClient) -> Result<Self, MetadataError> {
		let metadata_bytes = client.metadata().await?;
		Self::try_from(metadata_bytes)
	}

	/// The storage-section prefix name of every pallet that declares storage.
	///
	/// These are the inputs to [`crate::registry::retained_prefixes`]; pallets
	/// without storage contribute nothing to the fork.
	pub fn storage_prefixes(&self) -> Vec<String> {
		self.0
			.pallets()
			.filter_map(|pallet| pallet.storage().map(|storage| storage.prefix().to_string()))
			.collect()
	}
}

impl TryFrom<&[u8]> for ForkMetadata {
	type Error = MetadataError;

	fn try_from(mut bytes: &[u8]) -> Result<Self, Self::Error> {
		let metadata = Metadata::decode(&mut bytes).map_err(|_| MetadataError::DecodeError)?;
		Ok(Self(metadata))
	}
}

impl TryFrom<Vec<u8>> for ForkMetadata {
	type Error = MetadataError;

	fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
		let metadata = Metadata::decode(&mut &bytes[..]).map_err(|_| MetadataError::DecodeError)?;
		Ok(Self(metadata))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tryfrom_slice_with_invalid_bytes_fails() {
		let random_bytes: &[u8] = &[0x01, 0x02, 0x03, 0x04];
		let result = ForkMetadata::try_from(random_bytes);
		assert!(result.is_err());
		assert!(matches!(result.unwrap_err(), MetadataError::DecodeError));
	}

	#[test]
	fn tryfrom_vec_with_invalid_bytes_fails() {
		let random_bytes: Vec<u8> = vec![0xff, 0xaa, 0xbb, 0xcc];
		let result = ForkMetadata::try_from(random_bytes);
		assert!(result.is_err());
		assert!(matches!(result.unwrap_err(), MetadataError::DecodeError));
	}
}
