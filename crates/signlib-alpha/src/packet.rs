//! Packet framing.
//!
//! Every transmission to a sign is one framed packet. The framing is
//! identical for all commands; only the payload between STX and EOT
//! varies.
//!
//! # Frame format
//!
//! ```text
//! 0x00 x5 <SOH> <sign type> <addr hi> <addr lo> <STX> <payload...> <EOT>
//! ```
//!
//! - Five NUL bytes: the sign samples these to auto-detect the baud rate
//! - SOH (`0x01`), then one sign type code byte (see
//!   [`SignType`](signlib_core::SignType))
//! - Two ASCII hex digits of sign address (`00` = broadcast)
//! - STX (`0x02`), payload bytes passed through verbatim, EOT (`0x04`)
//!
//! There is no checksum and no acknowledgement; the frame above is the
//! entire exchange.

use bytes::{BufMut, BytesMut};
use signlib_core::{SignAddress, SignType};
use std::fmt;

/// NUL byte, repeated at the start of every packet for baud detection.
pub const NUL: u8 = 0x00;

/// Start-of-header byte.
pub const SOH: u8 = 0x01;

/// Start-of-text byte: everything after it up to EOT is the payload.
pub const STX: u8 = 0x02;

/// End-of-text byte. Separates payload sections in nested transmissions;
/// single-command packets like the ones this library builds do not use it.
pub const ETX: u8 = 0x03;

/// End-of-transmission byte terminating every packet.
pub const EOT: u8 = 0x04;

/// Escape byte introducing display-control sequences inside TEXT file
/// contents. Part of the protocol alphabet; unused at the framing layer.
pub const ESC: u8 = 0x1B;

/// Number of leading NUL bytes in a packet.
///
/// The sign measures the bit timing of these to lock onto the sender's
/// baud rate, so they must precede every packet, not just the first.
pub const AUTOBAUD_NUL_COUNT: usize = 5;

/// One framed packet, ready for transmission.
///
/// A `Packet` is immutable once constructed: the accessors expose the
/// serialized bytes but nothing can alter them. Construction is total
/// and deterministic -- the same payload and addressing always produce
/// identical bytes, and no payload is rejected or altered.
///
/// # Example
///
/// ```
/// use signlib_alpha::packet::Packet;
///
/// // Clear-memory payload framed for all signs, broadcast address.
/// let pkt = Packet::new(b"E$");
/// assert_eq!(
///     pkt.as_bytes(),
///     &[0x00, 0x00, 0x00, 0x00, 0x00, 0x01, b'Z', b'0', b'0', 0x02, b'E', b'$', 0x04]
/// );
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Packet {
    bytes: Vec<u8>,
}

impl Packet {
    /// Frame a payload with the default addressing: all sign types
    /// ([`SignType::All`]) at the broadcast address.
    pub fn new(payload: impl AsRef<[u8]>) -> Self {
        Packet::addressed(SignType::All, SignAddress::BROADCAST, payload)
    }

    /// Frame a payload for an explicit sign type and address.
    ///
    /// # Example
    ///
    /// ```
    /// use signlib_alpha::packet::Packet;
    /// use signlib_core::{SignAddress, SignType};
    ///
    /// let pkt = Packet::addressed(SignType::BetaBrite, SignAddress::new(0x05), b"E,");
    /// assert_eq!(&pkt.as_bytes()[5..9], &[0x01, b'^', b'0', b'5']);
    /// ```
    pub fn addressed(
        sign_type: SignType,
        address: SignAddress,
        payload: impl AsRef<[u8]>,
    ) -> Self {
        let payload = payload.as_ref();
        let mut buf = BytesMut::with_capacity(AUTOBAUD_NUL_COUNT + 6 + payload.len());
        buf.put_bytes(NUL, AUTOBAUD_NUL_COUNT);
        buf.put_u8(SOH);
        buf.put_u8(sign_type.code());
        buf.put_slice(&address.code());
        buf.put_u8(STX);
        buf.put_slice(payload);
        buf.put_u8(EOT);
        Packet { bytes: buf.to_vec() }
    }

    /// The full serialized frame.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the packet and return its serialized frame.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// The payload bytes between STX and EOT.
    pub fn payload(&self) -> &[u8] {
        let start = AUTOBAUD_NUL_COUNT + 5;
        &self.bytes[start..self.bytes.len() - 1]
    }

    /// Total frame length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always `false`: even an empty payload frames to 11 bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for Packet {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Packet({:02X?})", self.bytes)
    }
}
