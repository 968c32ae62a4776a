//! Transport implementations for signlib.
//!
//! This crate provides concrete implementations of the
//! [`Transport`](signlib_core::Transport) trait from `signlib-core` for the
//! physical connections sign hardware uses:
//!
//! - [`SerialTransport`]: the sign's RS-232 port and USB virtual COM ports
//!   (4800 baud 7E2 by default, which is what the hardware speaks)
//! - [`UsbTransport`]: directly USB-attached signs such as the BetaBrite
//!   Prism, written to as bulk transfers
//! - [`DebugTransport`]: records packets instead of sending them
//!
//! All transports construct cheaply and open their device on
//! [`connect`](signlib_core::Transport::connect); the sign driver connects
//! lazily before its first write.
//!
//! # Example
//!
//! ```no_run
//! use signlib_transport::SerialTransport;
//! use signlib_core::transport::Transport;
//!
//! # async fn example() -> signlib_core::Result<()> {
//! let mut transport = SerialTransport::new("/dev/ttyS0");
//! transport.connect().await?;
//!
//! // Soft-reset packet, framed for all signs on the line.
//! transport.write(&[
//!     0x00, 0x00, 0x00, 0x00, 0x00, 0x01, b'Z', b'0', b'0', 0x02, b'E', b',', 0x04,
//! ]).await?;
//! # Ok(())
//! # }
//! ```

pub mod debug;
pub mod serial;
pub mod usb;

pub use debug::{DebugTransport, PacketLog};
pub use serial::{DataBits, FlowControl, Parity, SerialConfig, SerialTransport, StopBits};
pub use usb::{attached_devices, UsbId, UsbTransport};
