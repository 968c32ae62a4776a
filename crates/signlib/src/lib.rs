//! # signlib -- Alpha Sign Communications Protocol for LED Message Signs
//!
//! `signlib` is an asynchronous Rust library for programming Alpha and
//! BetaBrite commercial LED message signs: the scrolling displays found in
//! shop windows, factory floors, and transit stations. It implements the
//! Alpha Sign Communications Protocol, a write-only framed byte protocol
//! spoken over the sign's serial port or, on newer models, USB.
//!
//! ## Quick Start
//!
//! Add `signlib` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! signlib = "0.1"
//! tokio = { version = "1", features = ["full"] }
//! ```
//!
//! Wipe a sign, allocate two files, and set the display order:
//!
//! ```no_run
//! use signlib::DisplayFile;
//! use signlib::alpha::AlphaSignBuilder;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut sign = AlphaSignBuilder::new()
//!         .serial_port("/dev/ttyS0")
//!         .build()?;
//!
//!     let files = [
//!         DisplayFile::text(b'A', 256),
//!         DisplayFile::string(b's', 64),
//!     ];
//!
//!     sign.clear_memory().await?;
//!     sign.allocate(&files).await?;
//!     sign.set_run_sequence(&files, true).await?;
//!     sign.beep(100, 0.5, 0).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is organized as a workspace of focused crates:
//!
//! | Crate                  | Purpose                                         |
//! |------------------------|-------------------------------------------------|
//! | `signlib-core`         | [`Transport`] trait, errors, display-file types |
//! | `signlib-alpha`        | Packet framing, command builders, [`AlphaSign`](alpha::AlphaSign) |
//! | `signlib-transport`    | Serial, USB, and debug transport implementations |
//! | `signlib-test-harness` | Mock transport for protocol testing             |
//! | **`signlib`**          | This facade crate -- re-exports everything      |
//!
//! The driver works against the [`Transport`] trait, so application code
//! chooses serial, USB, or a packet-recording debug transport at
//! construction time and nothing else changes.
//!
//! ## Protocol notes
//!
//! The protocol is strictly one-directional: the sign never acknowledges a
//! command. Consequences worth knowing up front:
//!
//! - A successful write means the bytes left this machine, not that the
//!   sign accepted them.
//! - Out-of-range command parameters (beep frequency, durations) are
//!   clamped to the sign's ranges rather than rejected, matching what the
//!   hardware tolerates.
//! - [`clear_memory`](alpha::AlphaSign::clear_memory) holds its caller for
//!   a settle delay, because the sign ignores input while wiping.
//!
//! ## Addressing
//!
//! Every packet carries a sign type code and a two-hex-digit address. The
//! defaults ([`SignType::All`](types::SignType::All), address `00`) reach
//! every sign on the line; point-to-point setups never need to change
//! them.

pub use signlib_core::*;

/// Alpha Sign Communications Protocol driver.
///
/// Provides [`AlphaSign`](alpha::AlphaSign) and
/// [`AlphaSignBuilder`](alpha::AlphaSignBuilder), plus the packet encoder
/// and command payload builders underneath them.
pub mod alpha {
    pub use signlib_alpha::*;
}

/// Physical transport implementations.
///
/// Provides [`SerialTransport`](transport::SerialTransport),
/// [`UsbTransport`](transport::UsbTransport), and
/// [`DebugTransport`](transport::DebugTransport), along with the serial
/// line-setting types and [`UsbId`](transport::UsbId).
pub mod transport {
    pub use signlib_transport::*;
}
