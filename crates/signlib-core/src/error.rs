//! Error types for signlib.
//!
//! All fallible operations across the library return [`Result<T>`], which
//! uses [`Error`] as the error type. Transport-layer and builder-layer
//! failures are all captured here.
//!
//! Note that out-of-range command parameters (beep frequency, duration,
//! repeat count) are *not* errors anywhere in this library: the sign
//! firmware tolerates clamped values, so the command builders clamp
//! silently instead of rejecting.

/// The error type for all signlib operations.
///
/// Variants cover the failure modes encountered when delivering packets
/// to a sign: the physical link could not be opened, the device is not
/// attached, or a write failed partway through.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A transport-level error (serial port open, USB claim, bulk transfer).
    #[error("transport error: {0}")]
    Transport(String),

    /// No USB device with the given vendor/product id is attached.
    ///
    /// Distinct from write failures so callers can tell "sign unplugged"
    /// apart from "sign stopped responding mid-session".
    #[error("USB device {vendor_id:04x}:{product_id:04x} not found")]
    DeviceNotFound {
        /// USB vendor id that was searched for.
        vendor_id: u16,
        /// USB product id that was searched for.
        product_id: u16,
    },

    /// No connection to the sign has been established.
    #[error("not connected")]
    NotConnected,

    /// The connection to the sign was lost unexpectedly.
    #[error("connection lost")]
    ConnectionLost,

    /// An invalid parameter was passed to a builder.
    ///
    /// Only construction-time misuse raises this (e.g. `build()` with no
    /// transport target configured). Protocol parameters never do.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// An underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience `Result` alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_transport() {
        let e = Error::Transport("port busy".into());
        assert_eq!(e.to_string(), "transport error: port busy");
    }

    #[test]
    fn error_display_device_not_found() {
        let e = Error::DeviceNotFound {
            vendor_id: 0x8765,
            product_id: 0x1234,
        };
        assert_eq!(e.to_string(), "USB device 8765:1234 not found");
    }

    #[test]
    fn error_display_device_not_found_zero_padded() {
        let e = Error::DeviceNotFound {
            vendor_id: 0x04D8,
            product_id: 0x000A,
        };
        assert_eq!(e.to_string(), "USB device 04d8:000a not found");
    }

    #[test]
    fn error_display_not_connected() {
        let e = Error::NotConnected;
        assert_eq!(e.to_string(), "not connected");
    }

    #[test]
    fn error_display_connection_lost() {
        let e = Error::ConnectionLost;
        assert_eq!(e.to_string(), "connection lost");
    }

    #[test]
    fn error_display_invalid_parameter() {
        let e = Error::InvalidParameter("no transport target configured".into());
        assert_eq!(
            e.to_string(),
            "invalid parameter: no transport target configured"
        );
    }

    #[test]
    fn error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe broken");
        let e: Error = io_err.into();
        assert!(matches!(e, Error::Io(_)));
        assert!(e.to_string().contains("pipe broken"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        // io::Error is Send + Sync, so our Error should be too.
        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<Error>();
    }

    #[test]
    fn result_alias_works() {
        let ok: Result<u32> = Ok(42);
        match ok {
            Ok(val) => assert_eq!(val, 42),
            Err(_) => panic!("expected Ok"),
        }

        let err: Result<u32> = Err(Error::NotConnected);
        assert!(err.is_err());
    }
}
