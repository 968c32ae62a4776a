//! Transport trait for sign communication.
//!
//! The [`Transport`] trait abstracts over the physical link to an LED
//! message sign. Implementations exist for serial ports (RS-232/RS-485
//! adapters), USB bulk endpoints, a recording debug sink, and mock
//! transports for testing.
//!
//! The Alpha protocol driver in `signlib-alpha` operates on a `Transport`
//! rather than directly on a serial port, enabling both real hardware
//! control and deterministic unit testing with `MockTransport` from the
//! `signlib-test-harness` crate.
//!
//! The protocol is strictly one-directional: the sign never acknowledges
//! or answers a command, so the trait has no receive method.

use async_trait::async_trait;

use crate::error::Result;

/// Asynchronous write-only byte transport to a sign.
///
/// Implementations handle connection lifecycle and delivery at the
/// physical layer. Packet framing and command structure are handled by
/// the protocol driver that consumes this trait.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Establish the connection to the sign.
    ///
    /// Calling `connect()` on an already-connected transport is a no-op.
    /// The protocol driver calls this lazily before the first write, so
    /// most applications never call it directly.
    async fn connect(&mut self) -> Result<()>;

    /// Tear down the connection.
    ///
    /// After `disconnect()`, a subsequent [`write()`](Self::write) either
    /// reconnects (when invoked through the protocol driver, which
    /// connects lazily) or returns
    /// [`Error::NotConnected`](crate::error::Error::NotConnected).
    async fn disconnect(&mut self) -> Result<()>;

    /// Deliver one framed packet to the sign.
    ///
    /// Implementations must write all bytes before returning; the sign
    /// offers no acknowledgement, so returning is the only completion
    /// signal the caller gets.
    async fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Check whether the transport is currently connected.
    fn is_connected(&self) -> bool;
}
