//! Debug transport that records packets instead of sending them.
//!
//! [`DebugTransport`] implements the [`Transport`] trait without touching
//! any hardware: writes always succeed, and every packet lands in a
//! [`PacketLog`] in call order. Clone the log handle out with
//! [`DebugTransport::log`] before boxing the transport into the driver, and
//! inspect it afterwards.
//!
//! Useful for protocol dumps, dry runs of sign setup scripts, and examples
//! that have to run without a sign attached.
//!
//! # Example
//!
//! ```
//! use signlib_transport::DebugTransport;
//! use signlib_core::transport::Transport;
//!
//! # async fn example() -> signlib_core::Result<()> {
//! let mut transport = DebugTransport::new();
//! let log = transport.log();
//!
//! transport.write(&[0x01, 0x02]).await?;
//! assert_eq!(log.packets(), vec![vec![0x01, 0x02]]);
//! # Ok(())
//! # }
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use signlib_core::error::Result;
use signlib_core::transport::Transport;

/// Shared, cloneable view of the packets a [`DebugTransport`] has recorded.
#[derive(Debug, Clone, Default)]
pub struct PacketLog {
    inner: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl PacketLog {
    fn record(&self, packet: &[u8]) {
        self.lock().push(packet.to_vec());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Vec<u8>>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of every recorded packet, in write order.
    pub fn packets(&self) -> Vec<Vec<u8>> {
        self.lock().clone()
    }

    /// Number of packets recorded so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Discard all recorded packets.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

/// A transport that records packets instead of sending them. Never fails.
pub struct DebugTransport {
    log: PacketLog,
    connected: bool,
}

impl DebugTransport {
    /// Create a new debug transport with an empty packet log.
    pub fn new() -> Self {
        DebugTransport {
            log: PacketLog::default(),
            connected: false,
        }
    }

    /// A shared handle to the packet log.
    ///
    /// The handle stays valid after the transport is boxed and moved into
    /// the driver.
    pub fn log(&self) -> PacketLog {
        self.log.clone()
    }
}

impl Default for DebugTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for DebugTransport {
    async fn connect(&mut self) -> Result<()> {
        self.connected = true;
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<()> {
        self.connected = false;
        Ok(())
    }

    /// Record the packet. Succeeds whether or not `connect` was called.
    async fn write(&mut self, data: &[u8]) -> Result<()> {
        tracing::debug!(bytes = data.len(), data = ?data, "debug transport write");
        self.log.record(data);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_never_fails() {
        let mut transport = DebugTransport::new();
        // Not connected, write still succeeds.
        assert!(!transport.is_connected());
        transport.write(&[0x01]).await.unwrap();

        transport.connect().await.unwrap();
        transport.write(&[0x02]).await.unwrap();

        transport.disconnect().await.unwrap();
        transport.write(&[0x03]).await.unwrap();
    }

    #[tokio::test]
    async fn records_packets_in_call_order() {
        let mut transport = DebugTransport::new();
        let log = transport.log();

        transport.write(&[0x01]).await.unwrap();
        transport.write(&[0x02, 0x03]).await.unwrap();
        transport.write(&[]).await.unwrap();

        assert_eq!(log.packets(), vec![vec![0x01], vec![0x02, 0x03], vec![]]);
        assert_eq!(log.len(), 3);
    }

    #[tokio::test]
    async fn log_handle_survives_boxing() {
        let transport = DebugTransport::new();
        let log = transport.log();
        let mut boxed: Box<dyn Transport> = Box::new(transport);

        boxed.write(&[0xAA]).await.unwrap();

        assert_eq!(log.packets(), vec![vec![0xAA]]);
    }

    #[tokio::test]
    async fn clear_discards_recorded_packets() {
        let mut transport = DebugTransport::new();
        let log = transport.log();

        transport.write(&[0x01]).await.unwrap();
        assert!(!log.is_empty());

        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
    }

    #[tokio::test]
    async fn connect_lifecycle() {
        let mut transport = DebugTransport::new();
        assert!(!transport.is_connected());

        transport.connect().await.unwrap();
        assert!(transport.is_connected());

        transport.disconnect().await.unwrap();
        assert!(!transport.is_connected());
    }
}
