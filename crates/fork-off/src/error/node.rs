// SPDX-License-Identifier: GPL-3.0

//! Node binary invocation error types.

use thiserror::Error;

/// Errors that can occur when invoking the external node binary.
#[derive(Debug, Error)]
pub enum NodeError {
	/// The node binary does not exist at the expected path.
	#[error("Missing binary: {0}")]
	MissingBinary(String),
	/// The runtime artifact does not exist at the expected path.
	#[error("Missing runtime artifact: {0}")]
	MissingRuntime(String),
	/// The binary does not support a required subcommand.
	#[error("Command {command} doesn't exist in binary {binary}")]
	MissingCommand {
		/// The subcommand that was probed.
		command: String,
		/// The binary that was probed.
		binary: String,
	},
	/// The binary ran but exited unsuccessfully.
	#[error("Failed to execute `{command}`: {message}")]
	CommandFailed {
		/// The subcommand that failed.
		command: String,
		/// The error message describing the failure.
		message: String,
	},
	/// An I/O error while staging output files.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}
