//! signlib-test-harness: Test utilities and mock transports for signlib.
//!
//! This crate provides [`MockTransport`] for deterministic unit testing of
//! the sign protocol driver without requiring real sign hardware.

pub mod mock_transport;

pub use mock_transport::MockTransport;
