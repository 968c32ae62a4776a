//! signlib-core: Core trait, types, and error definitions for signlib.
//!
//! This crate defines the abstractions shared by the Alpha protocol driver
//! and the physical transport backends. Applications normally depend on
//! the `signlib` facade crate rather than on this one directly.
//!
//! # Key types
//!
//! - [`Transport`] -- write-only byte channel to a sign
//! - [`DisplayFile`] / [`RunSequence`] -- the sign's memory model
//! - [`SignType`] / [`SignAddress`] -- packet addressing
//! - [`Error`] / [`Result`] -- error handling

pub mod error;
pub mod files;
pub mod transport;
pub mod types;

// Re-export key types at crate root for ergonomic `use signlib_core::*`.
pub use error::{Error, Result};
pub use files::{DisplayFile, FileKind, FileLabel, LockState, RunSequence};
pub use transport::Transport;
pub use types::*;
