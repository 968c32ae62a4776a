//! Serial port transport for sign communication.
//!
//! This module provides [`SerialTransport`], which implements the
//! [`Transport`] trait for the RS-232/RS-485 port found on most Alpha and
//! BetaBrite signs, as well as USB virtual COM ports.
//!
//! The signs speak an unusual serial dialect: **4800 baud, 7 data bits,
//! even parity, 2 stop bits**, no flow control. [`SerialConfig::default`]
//! matches it, so most callers never touch the config.
//!
//! Construction is cheap and does not open the port; the port opens on
//! [`connect`](Transport::connect), which the sign driver calls lazily
//! before its first write.
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
//! transport.write(&[0x00, 0x01, b'Z', b'0', b'0', 0x02, b'E', b',', 0x04]).await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio_serial::{SerialPortBuilderExt, SerialStream};

use signlib_core::error::{Error, Result};
use signlib_core::transport::Transport;

pub use tokio_serial::{DataBits, FlowControl, Parity, StopBits};

/// Serial port configuration.
///
/// The default is what the sign hardware expects; override fields only for
/// signs rewired to non-standard line settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialConfig {
    /// Baud rate (sign default: 4800)
    pub baud_rate: u32,
    /// Number of data bits (sign default: 7)
    pub data_bits: DataBits,
    /// Parity checking (sign default: even)
    pub parity: Parity,
    /// Number of stop bits (sign default: 2)
    pub stop_bits: StopBits,
    /// Flow control (sign default: none)
    pub flow_control: FlowControl,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: 4800,
            data_bits: DataBits::Seven,
            parity: Parity::Even,
            stop_bits: StopBits::Two,
            flow_control: FlowControl::None,
        }
    }
}

/// Serial port transport for sign communication.
///
/// Holds the port path and line settings; the port itself is opened by
/// [`connect`](Transport::connect) and closed by
/// [`disconnect`](Transport::disconnect).
pub struct SerialTransport {
    port_name: String,
    config: SerialConfig,
    /// The open serial stream, present while connected.
    port: Option<SerialStream>,
}

impl SerialTransport {
    /// Create a transport for the given port with the sign's default line
    /// settings (4800 baud, 7 data bits, even parity, 2 stop bits).
    ///
    /// Does not touch the hardware.
    ///
    /// # Arguments
    ///
    /// * `port` - Serial port path (e.g. "/dev/ttyS0" on Linux, "COM3" on
    ///   Windows)
    pub fn new(port: &str) -> Self {
        Self::with_config(port, SerialConfig::default())
    }

    /// Create a transport with full line-setting control.
    pub fn with_config(port: &str, config: SerialConfig) -> Self {
        Self {
            port_name: port.to_string(),
            config,
            port: None,
        }
    }

    /// Get the name of the serial port.
    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    /// Get the configured line settings.
    pub fn config(&self) -> SerialConfig {
        self.config
    }
}

#[async_trait]
impl Transport for SerialTransport {
    async fn connect(&mut self) -> Result<()> {
        if self.port.is_some() {
            return Ok(());
        }

        tracing::debug!(
            port = %self.port_name,
            baud_rate = self.config.baud_rate,
            data_bits = ?self.config.data_bits,
            parity = ?self.config.parity,
            stop_bits = ?self.config.stop_bits,
            flow_control = ?self.config.flow_control,
            "opening serial port"
        );

        let stream = tokio_serial::new(&self.port_name, self.config.baud_rate)
            .data_bits(self.config.data_bits)
            .parity(self.config.parity)
            .stop_bits(self.config.stop_bits)
            .flow_control(self.config.flow_control)
            .open_native_async()
            .map_err(|e| {
                tracing::error!(port = %self.port_name, error = %e, "failed to open serial port");
                Error::Transport(format!(
                    "failed to open serial port {}: {}",
                    self.port_name, e
                ))
            })?;

        tracing::debug!(port = %self.port_name, "serial port opened");
        self.port = Some(stream);
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<()> {
        if let Some(mut port) = self.port.take() {
            tracing::debug!(port = %self.port_name, "closing serial port");

            // Flush pending bytes so a packet written just before close
            // still reaches the sign.
            if let Err(e) = port.flush().await {
                tracing::warn!(
                    port = %self.port_name,
                    error = %e,
                    "failed to flush before closing (continuing anyway)"
                );
            }
        }
        Ok(())
    }

    async fn write(&mut self, data: &[u8]) -> Result<()> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;

        tracing::trace!(
            port = %self.port_name,
            bytes = data.len(),
            data = ?data,
            "writing packet"
        );

        port.write_all(data).await.map_err(|e| {
            tracing::error!(port = %self.port_name, error = %e, "failed to write packet");
            if e.kind() == std::io::ErrorKind::BrokenPipe
                || e.kind() == std::io::ErrorKind::NotConnected
            {
                Error::ConnectionLost
            } else {
                Error::Io(e)
            }
        })?;

        // The sign has no handshake; flushing is the only completion signal.
        port.flush().await.map_err(|e| {
            tracing::error!(port = %self.port_name, error = %e, "failed to flush serial port");
            Error::Io(e)
        })?;

        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.port.is_some()
    }
}
