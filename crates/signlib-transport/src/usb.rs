//! USB transport for directly-attached signs.
//!
//! This module provides [`UsbTransport`], which implements the
//! [`Transport`] trait for signs that attach as native USB devices rather
//! than through a serial adapter. The BetaBrite Prism is the common case;
//! [`UsbId::BETABRITE_PRISM`] carries its vendor/product id.
//!
//! Connecting enumerates the bus, opens the matching device, optionally
//! issues a USB reset, and claims the sign's single interface. Each packet
//! goes out as one bulk transfer followed by a zero-length transfer; the
//! sign treats a short packet as end-of-transmission, and a packet that is
//! an exact multiple of the endpoint size would otherwise leave it waiting
//! for more data.
//!
//! # Example
//!
//! ```no_run
//! use signlib_transport::{UsbId, UsbTransport};
//! use signlib_core::transport::Transport;
//!
//! # async fn example() -> signlib_core::Result<()> {
//! let mut transport = UsbTransport::new(UsbId::BETABRITE_PRISM);
//! transport.connect().await?;
//! transport.write(&[0x00, 0x01, b'Z', b'0', b'0', 0x02, b'E', b',', 0x04]).await?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use nusb::transfer::{Direction, EndpointType, TransferError};
use nusb::Interface;

use signlib_core::error::{Error, Result};
use signlib_core::transport::Transport;

/// The interface number the sign exposes. Alpha USB signs present a single
/// interface with one IN and one OUT endpoint.
const SIGN_INTERFACE: u8 = 0;

/// USB vendor/product id pair identifying a sign model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UsbId {
    pub vendor_id: u16,
    pub product_id: u16,
}

impl UsbId {
    /// The BetaBrite Prism, the common USB-attached sign.
    pub const BETABRITE_PRISM: UsbId = UsbId::new(0x8765, 0x1234);

    pub const fn new(vendor_id: u16, product_id: u16) -> Self {
        UsbId {
            vendor_id,
            product_id,
        }
    }
}

impl fmt::Display for UsbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}:{:04x}", self.vendor_id, self.product_id)
    }
}

/// Error returned when parsing a [`UsbId`] from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseUsbIdError(String);

impl fmt::Display for ParseUsbIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid USB id (expected vendor:product hex): {}", self.0)
    }
}

impl std::error::Error for ParseUsbIdError {}

impl FromStr for UsbId {
    type Err = ParseUsbIdError;

    /// Parse `vvvv:pppp` hex notation, e.g. `8765:1234`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (vendor, product) = s.split_once(':').ok_or_else(|| ParseUsbIdError(s.into()))?;
        let vendor_id =
            u16::from_str_radix(vendor, 16).map_err(|_| ParseUsbIdError(s.into()))?;
        let product_id =
            u16::from_str_radix(product, 16).map_err(|_| ParseUsbIdError(s.into()))?;
        Ok(UsbId::new(vendor_id, product_id))
    }
}

/// List the vendor/product ids of every USB device currently attached.
///
/// Discovery helper; entries are not filtered to known sign models.
pub fn attached_devices() -> Result<Vec<UsbId>> {
    let devices = nusb::list_devices()
        .map_err(|e| Error::Transport(format!("USB enumeration failed: {e}")))?;
    Ok(devices
        .map(|d| UsbId::new(d.vendor_id(), d.product_id()))
        .collect())
}

/// Claimed interface plus the bulk OUT endpoint packets are written to.
struct UsbConnection {
    interface: Interface,
    endpoint_out: u8,
}

/// USB transport for sign communication.
///
/// Holds the target id; the device is located and claimed by
/// [`connect`](Transport::connect), which the sign driver calls lazily
/// before its first write.
pub struct UsbTransport {
    id: UsbId,
    reset_on_connect: bool,
    conn: Option<UsbConnection>,
}

impl UsbTransport {
    /// Create a transport for the sign with the given USB id.
    ///
    /// Does not touch the bus.
    pub fn new(id: UsbId) -> Self {
        UsbTransport {
            id,
            reset_on_connect: true,
            conn: None,
        }
    }

    /// Control whether [`connect`](Transport::connect) issues a USB reset
    /// before claiming the interface (default: true).
    ///
    /// The reset knocks the sign out of whatever half-finished transfer a
    /// previous process left behind, but is known to misbehave under some
    /// virtualized USB stacks; turn it off there.
    pub fn reset_on_connect(mut self, enabled: bool) -> Self {
        self.reset_on_connect = enabled;
        self
    }

    /// The USB id this transport connects to.
    pub fn id(&self) -> UsbId {
        self.id
    }
}

/// Locate the bulk OUT endpoint on the sign interface from the active
/// configuration descriptors.
fn find_bulk_out_endpoint(device: &nusb::Device) -> Result<u8> {
    let config = device
        .active_configuration()
        .map_err(|e| Error::Transport(format!("no active USB configuration: {e}")))?;

    for alt in config.interface_alt_settings() {
        if alt.interface_number() != SIGN_INTERFACE || alt.alternate_setting() != 0 {
            continue;
        }
        for endpoint in alt.endpoints() {
            if endpoint.direction() == Direction::Out
                && endpoint.transfer_type() == EndpointType::Bulk
            {
                return Ok(endpoint.address());
            }
        }
    }

    Err(Error::Transport(format!(
        "no bulk OUT endpoint on USB interface {SIGN_INTERFACE}"
    )))
}

fn map_transfer_error(e: TransferError) -> Error {
    match e {
        TransferError::Disconnected => Error::ConnectionLost,
        other => Error::Transport(format!("USB transfer failed: {other}")),
    }
}

#[async_trait]
impl Transport for UsbTransport {
    async fn connect(&mut self) -> Result<()> {
        if self.conn.is_some() {
            return Ok(());
        }

        let info = nusb::list_devices()
            .map_err(|e| Error::Transport(format!("USB enumeration failed: {e}")))?
            .find(|d| d.vendor_id() == self.id.vendor_id && d.product_id() == self.id.product_id)
            .ok_or(Error::DeviceNotFound {
                vendor_id: self.id.vendor_id,
                product_id: self.id.product_id,
            })?;

        tracing::debug!(
            id = %self.id,
            bus = info.bus_number(),
            address = info.device_address(),
            "found sign device"
        );

        let device = info
            .open()
            .map_err(|e| Error::Transport(format!("failed to open USB device {}: {e}", self.id)))?;

        if self.reset_on_connect {
            device
                .reset()
                .map_err(|e| Error::Transport(format!("USB reset failed: {e}")))?;
        }

        let endpoint_out = find_bulk_out_endpoint(&device)?;
        let interface = device.claim_interface(SIGN_INTERFACE).map_err(|e| {
            Error::Transport(format!(
                "failed to claim USB interface {SIGN_INTERFACE}: {e}"
            ))
        })?;

        tracing::debug!(id = %self.id, endpoint = endpoint_out, "claimed sign interface");
        self.conn = Some(UsbConnection {
            interface,
            endpoint_out,
        });
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<()> {
        if self.conn.take().is_some() {
            tracing::debug!(id = %self.id, "released sign interface");
        }
        Ok(())
    }

    async fn write(&mut self, data: &[u8]) -> Result<()> {
        let conn = self.conn.as_ref().ok_or(Error::NotConnected)?;

        tracing::trace!(id = %self.id, bytes = data.len(), data = ?data, "writing packet");

        conn.interface
            .bulk_out(conn.endpoint_out, data.to_vec())
            .await
            .into_result()
            .map_err(map_transfer_error)?;

        // Zero-length transfer terminates the write for the sign.
        conn.interface
            .bulk_out(conn.endpoint_out, Vec::new())
            .await
            .into_result()
            .map_err(map_transfer_error)?;

        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.conn.is_some()
    }
}
