//! Alpha Sign Communications Protocol driver for signlib.
//!
//! This crate implements the write-only framed protocol used to program
//! Alpha and BetaBrite LED message signs. It provides:
//!
//! - **Packet encoder** ([`packet`]) -- frame command payloads with the
//!   sync/addressing header and terminator the signs expect.
//! - **Command builders** ([`commands`]) -- construct the byte payloads for
//!   memory clear, beep, soft reset, file allocation, and run-sequence
//!   selection, with the parameter clamping the hardware tolerates.
//! - **Sign driver** ([`sign`]) -- [`AlphaSign`], which frames commands and
//!   performs one transport write per operation over any
//!   [`Transport`](signlib_core::Transport).
//! - **Builder** ([`builder`]) -- fluent builder API for constructing
//!   [`AlphaSign`] handles over serial or USB.
//!
//! # Protocol shape
//!
//! Every transmission is a single framed packet:
//!
//! ```text
//! <NUL*5> <SOH> <sign type> <addr hi> <addr lo> <STX> <payload> <EOT>
//! ```
//!
//! The five leading NULs give the sign time to lock onto the baud rate; the
//! sign never sends anything back, so there is no decode path anywhere.
//!
//! # Example
//!
//! ```
//! use signlib_alpha::commands::cmd_beep;
//! use signlib_alpha::packet::Packet;
//!
//! // Build a beep payload and frame it for transmission.
//! let payload = cmd_beep(100, 0.5, 2);
//! assert_eq!(payload, b"E(26452");
//!
//! let packet = Packet::new(&payload);
//! assert_eq!(packet.payload(), b"E(26452");
//! assert_eq!(packet.as_bytes().last(), Some(&0x04));
//! ```

pub mod builder;
pub mod commands;
pub mod packet;
pub mod sign;

// Re-export the primary types for ergonomic `use signlib_alpha::*`.
pub use builder::AlphaSignBuilder;
pub use packet::Packet;
pub use sign::{AlphaSign, CLEAR_MEMORY_SETTLE};
