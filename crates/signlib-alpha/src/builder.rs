//! AlphaSignBuilder -- fluent builder for constructing [`AlphaSign`] handles.
//!
//! Separates configuration from construction so that callers can set up
//! addressing, the settle delay, and the physical target before the driver
//! takes ownership of a transport. Building never performs I/O: transports
//! construct lazily, and the first command connects them.
//!
//! # Example
//!
//! ```no_run
//! use signlib_alpha::builder::AlphaSignBuilder;
//!
//! # async fn example() -> signlib_core::Result<()> {
//! let mut sign = AlphaSignBuilder::new()
//!     .serial_port("/dev/ttyS0")
//!     .build()?;
//! sign.beep(100, 0.5, 2).await?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use signlib_core::error::{Error, Result};
use signlib_core::transport::Transport;
use signlib_core::types::{SignAddress, SignType};
use signlib_transport::{SerialConfig, SerialTransport, UsbId, UsbTransport};

use crate::sign::{AlphaSign, CLEAR_MEMORY_SETTLE};

/// Fluent builder for [`AlphaSign`].
///
/// Defaults address every sign on the line (sign type `Z`, address `00`)
/// with the standard clear-memory settle delay, so the simplest usage is:
///
/// ```ignore
/// let mut sign = AlphaSignBuilder::new()
///     .serial_port("/dev/ttyS0")
///     .build()?;
/// ```
pub struct AlphaSignBuilder {
    sign_type: SignType,
    address: SignAddress,
    settle_delay: Duration,
    serial_port: Option<String>,
    serial_config: SerialConfig,
    usb_id: Option<UsbId>,
}

impl AlphaSignBuilder {
    /// Create a new builder with broadcast addressing and default timing.
    pub fn new() -> Self {
        AlphaSignBuilder {
            sign_type: SignType::All,
            address: SignAddress::BROADCAST,
            settle_delay: CLEAR_MEMORY_SETTLE,
            serial_port: None,
            serial_config: SerialConfig::default(),
            usb_id: None,
        }
    }

    /// Address only signs of the given type (default: [`SignType::All`]).
    pub fn sign_type(mut self, sign_type: SignType) -> Self {
        self.sign_type = sign_type;
        self
    }

    /// Address only the sign with the given address (default: broadcast).
    pub fn address(mut self, address: SignAddress) -> Self {
        self.address = address;
        self
    }

    /// Override how long [`clear_memory`](AlphaSign::clear_memory) waits
    /// after writing (default: [`CLEAR_MEMORY_SETTLE`]).
    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Target a sign on the given serial port (e.g. `/dev/ttyS0` or
    /// `COM3`).
    pub fn serial_port(mut self, port: &str) -> Self {
        self.serial_port = Some(port.to_string());
        self
    }

    /// Override the serial baud rate (default: 4800, which is what sign
    /// hardware ships at).
    pub fn baud_rate(mut self, baud: u32) -> Self {
        self.serial_config.baud_rate = baud;
        self
    }

    /// Replace the full serial line configuration.
    pub fn serial_config(mut self, config: SerialConfig) -> Self {
        self.serial_config = config;
        self
    }

    /// Target a USB-attached sign by vendor and product id.
    pub fn usb_device(self, vendor_id: u16, product_id: u16) -> Self {
        self.usb_id(UsbId::new(vendor_id, product_id))
    }

    /// Target a USB-attached sign by [`UsbId`], e.g.
    /// [`UsbId::BETABRITE_PRISM`].
    pub fn usb_id(mut self, id: UsbId) -> Self {
        self.usb_id = Some(id);
        self
    }

    /// Build an [`AlphaSign`] with a caller-provided transport.
    ///
    /// This is the primary entry point for testing (pass a
    /// `MockTransport` from `signlib-test-harness`) and for transports the
    /// builder has no shorthand for, such as a
    /// [`DebugTransport`](signlib_transport::DebugTransport) or a
    /// [`UsbTransport`](signlib_transport::UsbTransport) with the reset
    /// disabled.
    pub fn build_with_transport(self, transport: Box<dyn Transport>) -> AlphaSign {
        AlphaSign::new(transport, self.sign_type, self.address, self.settle_delay)
    }

    /// Build an [`AlphaSign`] over the configured physical target.
    ///
    /// Requires exactly one of [`serial_port`](Self::serial_port) or
    /// [`usb_device`](Self::usb_device)/[`usb_id`](Self::usb_id); anything
    /// else is an [`Error::InvalidParameter`]. No I/O happens here -- the
    /// transport connects on the first command.
    pub fn build(self) -> Result<AlphaSign> {
        let transport: Box<dyn Transport> = match (&self.serial_port, self.usb_id) {
            (Some(port), None) => Box::new(SerialTransport::with_config(port, self.serial_config)),
            (None, Some(id)) => Box::new(UsbTransport::new(id)),
            (None, None) => {
                return Err(Error::InvalidParameter(
                    "no transport configured: call serial_port() or usb_device()".into(),
                ));
            }
            (Some(_), Some(_)) => {
                return Err(Error::InvalidParameter(
                    "both serial and USB configured: pick one".into(),
                ));
            }
        };
        Ok(self.build_with_transport(transport))
    }
}

impl Default for AlphaSignBuilder {
    fn default() -> Self {
        Self::new()
    }
}
