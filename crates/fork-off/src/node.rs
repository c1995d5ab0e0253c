// SPDX-License-Identifier: GPL-3.0

//! External node binary collaborator.
//!
//! Template chain specifications are produced by the chain's own node binary via
//! its `build-spec` subcommand; this module wraps that invocation. The binary and
//! the runtime artifact are preconditions checked before any network activity.

use crate::error::node::NodeError;
use duct::cmd;
use std::{
	fs,
	path::{Path, PathBuf},
};

/// The node binary used to generate template chain specifications.
#[derive(Debug)]
pub struct NodeBinary {
	path: PathBuf,
}

impl NodeBinary {
	/// Wraps the node binary at the given path.
	///
	/// # Arguments
	/// * `path` - The path to the node binary executable.
	///
	/// # Errors
	/// Returns [`NodeError::MissingBinary`] when nothing exists at `path`.
	pub fn new(path: impl Into<PathBuf>) -> Result<Self, NodeError> {
		let path = path.into();
		if !path.exists() {
			return Err(NodeError::MissingBinary(path.display().to_string()));
		}
		Ok(Self { path })
	}

	/// The path to the wrapped binary.
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Sets the executable bit on the binary.
	///
	/// Runtime artifacts are often distributed without execute permission.
	#[cfg(unix)]
	pub fn ensure_executable(&self) -> Result<(), NodeError> {
		use std::os::unix::fs::PermissionsExt;
		fs::set_permissions(&self.path, fs::Permissions::from_mode(0o755))?;
		Ok(())
	}

	/// Generates the raw chain specification for a named chain.
	///
	/// # Arguments
	/// * `chain` - The chain specification id. It can be one of the predefined ones
	///   (e.g. `testnet`) or the path to an existing chain spec.
	/// * `output` - Location of the specification file to be generated.
	pub fn export_chain_spec(&self, chain: &str, output: &Path) -> Result<(), NodeError> {
		self.build_spec(vec!["build-spec", "--chain", chain, "--raw"], output)
	}

	/// Generates a freshly generated raw development chain specification, used as
	/// the template the exported state is merged into.
	///
	/// # Arguments
	/// * `output` - Location of the specification file to be generated.
	pub fn export_dev_chain_spec(&self, output: &Path) -> Result<(), NodeError> {
		self.build_spec(vec!["build-spec", "--dev", "--raw"], output)
	}

	fn build_spec(&self, args: Vec<&str>, output: &Path) -> Result<(), NodeError> {
		self.check_command_exists("build-spec")?;
		// Stage stdout in a temporary file and atomically replace the output, so a
		// failed invocation never leaves a truncated specification behind.
		let temp_file =
			tempfile::NamedTempFile::new_in(output.parent().unwrap_or(Path::new(".")))?;
		cmd(&self.path, args).stdout_path(temp_file.path()).stderr_null().run().map_err(
			|e| NodeError::CommandFailed {
				command: "build-spec".to_string(),
				message: e.to_string(),
			},
		)?;
		temp_file.persist(output).map_err(|e| NodeError::Io(e.error))?;
		Ok(())
	}

	/// Checks if a given command exists and can be executed by running it with the
	/// "--help" argument.
	fn check_command_exists(&self, command: &str) -> Result<(), NodeError> {
		cmd(&self.path, vec![command, "--help"])
			.stdout_null()
			.stderr_null()
			.run()
			.map_err(|_err| NodeError::MissingCommand {
				command: command.to_string(),
				binary: self.path.display().to_string(),
			})?;
		Ok(())
	}
}

/// Reads the runtime code artifact and returns it as a lowercase hex string,
/// without a `0x` prefix.
///
/// # Arguments
/// * `wasm` - The path to the runtime code artifact.
///
/// # Errors
/// Returns [`NodeError::MissingRuntime`] when nothing exists at `wasm`.
pub fn runtime_code_hex(wasm: &Path) -> Result<String, NodeError> {
	if !wasm.exists() {
		return Err(NodeError::MissingRuntime(wasm.display().to_string()));
	}
	Ok(hex::encode(fs::read(wasm)?))
}
