//! Sign addressing types.
//!
//! Every packet on the wire begins with a sign type code and a two-digit
//! sign address, so one RS-485 drop line (or one broadcast) can carry
//! traffic for a mix of models. These types pin down the legal values and
//! their wire encodings.

use std::fmt;
use std::str::FromStr;

/// Which sign models should act on a packet.
///
/// The type code is the first byte after SOH in every packet. Most
/// installations use [`SignType::All`], which every model answers to;
/// the narrower codes matter on shared drop lines carrying mixed
/// hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignType {
    /// All sign types (`Z`). The default, and what single-sign setups use.
    All,
    /// All sign types, with transmission verification (`!`).
    AllVerify,
    /// BetaBrite and BetaBrite Prism (`^`).
    BetaBrite,
    /// One-line signs (`1`).
    OneLine,
    /// Two-line signs (`2`).
    TwoLine,
    /// Serial clock (`4`).
    SerialClock,
    /// AlphaVision (`#`).
    AlphaVision,
    /// Full-matrix AlphaVision (`$`).
    FullMatrixAlphaVision,
    /// Character-matrix AlphaVision (`%`).
    CharacterMatrixAlphaVision,
    /// Alpha 430i (`C`).
    Model430i,
    /// Alpha 440i (`D`).
    Model440i,
    /// Alpha 460i (`E`).
    Model460i,
    /// Alpha 790i (`U`).
    Model790i,
}

impl SignType {
    /// The wire type code byte for this sign type.
    pub fn code(&self) -> u8 {
        match self {
            SignType::All => b'Z',
            SignType::AllVerify => b'!',
            SignType::BetaBrite => b'^',
            SignType::OneLine => b'1',
            SignType::TwoLine => b'2',
            SignType::SerialClock => b'4',
            SignType::AlphaVision => b'#',
            SignType::FullMatrixAlphaVision => b'$',
            SignType::CharacterMatrixAlphaVision => b'%',
            SignType::Model430i => b'C',
            SignType::Model440i => b'D',
            SignType::Model460i => b'E',
            SignType::Model790i => b'U',
        }
    }
}

impl Default for SignType {
    fn default() -> Self {
        SignType::All
    }
}

impl fmt::Display for SignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SignType::All => "all",
            SignType::AllVerify => "all-verify",
            SignType::BetaBrite => "betabrite",
            SignType::OneLine => "one-line",
            SignType::TwoLine => "two-line",
            SignType::SerialClock => "serial-clock",
            SignType::AlphaVision => "alphavision",
            SignType::FullMatrixAlphaVision => "full-matrix-alphavision",
            SignType::CharacterMatrixAlphaVision => "character-matrix-alphavision",
            SignType::Model430i => "430i",
            SignType::Model440i => "440i",
            SignType::Model460i => "460i",
            SignType::Model790i => "790i",
        };
        write!(f, "{s}")
    }
}

/// Error returned when a string cannot be parsed into a [`SignType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSignTypeError(String);

impl fmt::Display for ParseSignTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sign type: {}", self.0)
    }
}

impl std::error::Error for ParseSignTypeError {}

impl FromStr for SignType {
    type Err = ParseSignTypeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(SignType::All),
            "all-verify" | "allverify" => Ok(SignType::AllVerify),
            "betabrite" => Ok(SignType::BetaBrite),
            "one-line" | "oneline" => Ok(SignType::OneLine),
            "two-line" | "twoline" => Ok(SignType::TwoLine),
            "serial-clock" | "serialclock" => Ok(SignType::SerialClock),
            "alphavision" => Ok(SignType::AlphaVision),
            "full-matrix-alphavision" => Ok(SignType::FullMatrixAlphaVision),
            "character-matrix-alphavision" => Ok(SignType::CharacterMatrixAlphaVision),
            "430i" => Ok(SignType::Model430i),
            "440i" => Ok(SignType::Model440i),
            "460i" => Ok(SignType::Model460i),
            "790i" => Ok(SignType::Model790i),
            _ => Err(ParseSignTypeError(s.to_string())),
        }
    }
}

/// One-byte sign address, rendered on the wire as two uppercase hex digits.
///
/// Signs are configured with an address of `01`-`FF`; address `00` is the
/// broadcast address that every sign accepts regardless of its own setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignAddress(u8);

impl SignAddress {
    /// The broadcast address (`00`): every sign on the line responds.
    pub const BROADCAST: SignAddress = SignAddress(0x00);

    /// Create a `SignAddress` from its numeric value.
    pub fn new(addr: u8) -> Self {
        SignAddress(addr)
    }

    /// Return the raw numeric address.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// The two ASCII hex digit bytes this address occupies in a packet.
    pub fn code(&self) -> [u8; 2] {
        const HEX: &[u8; 16] = b"0123456789ABCDEF";
        [
            HEX[(self.0 >> 4) as usize],
            HEX[(self.0 & 0x0F) as usize],
        ]
    }
}

impl Default for SignAddress {
    fn default() -> Self {
        SignAddress::BROADCAST
    }
}

impl fmt::Display for SignAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}", self.0)
    }
}

/// Error returned when a string cannot be parsed into a [`SignAddress`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSignAddressError(String);

impl fmt::Display for ParseSignAddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid sign address (expected 2 hex digits): {}", self.0)
    }
}

impl std::error::Error for ParseSignAddressError {}

impl FromStr for SignAddress {
    type Err = ParseSignAddressError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.len() != 2 {
            return Err(ParseSignAddressError(s.to_string()));
        }
        u8::from_str_radix(s, 16)
            .map(SignAddress)
            .map_err(|_| ParseSignAddressError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---------------------------------------------------------------
    // Sign type codes
    // ---------------------------------------------------------------

    #[test]
    fn sign_type_all_code() {
        assert_eq!(SignType::All.code(), b'Z');
    }

    #[test]
    fn sign_type_betabrite_code() {
        assert_eq!(SignType::BetaBrite.code(), b'^');
    }

    #[test]
    fn sign_type_line_codes() {
        assert_eq!(SignType::OneLine.code(), b'1');
        assert_eq!(SignType::TwoLine.code(), b'2');
    }

    #[test]
    fn sign_type_model_codes() {
        assert_eq!(SignType::Model430i.code(), b'C');
        assert_eq!(SignType::Model440i.code(), b'D');
        assert_eq!(SignType::Model460i.code(), b'E');
        assert_eq!(SignType::Model790i.code(), b'U');
    }

    #[test]
    fn sign_type_default_is_all() {
        assert_eq!(SignType::default(), SignType::All);
    }

    #[test]
    fn sign_type_display_round_trips_via_from_str() {
        let types = [
            SignType::All,
            SignType::AllVerify,
            SignType::BetaBrite,
            SignType::OneLine,
            SignType::TwoLine,
            SignType::SerialClock,
            SignType::AlphaVision,
            SignType::FullMatrixAlphaVision,
            SignType::CharacterMatrixAlphaVision,
            SignType::Model430i,
            SignType::Model440i,
            SignType::Model460i,
            SignType::Model790i,
        ];
        for t in types {
            let parsed: SignType = t.to_string().parse().unwrap();
            assert_eq!(parsed, t);
        }
    }

    #[test]
    fn sign_type_from_str_case_insensitive() {
        assert_eq!("BetaBrite".parse::<SignType>().unwrap(), SignType::BetaBrite);
        assert_eq!("ALL".parse::<SignType>().unwrap(), SignType::All);
    }

    #[test]
    fn sign_type_from_str_unknown() {
        assert!("ticker-tape".parse::<SignType>().is_err());
    }

    // ---------------------------------------------------------------
    // Sign addresses
    // ---------------------------------------------------------------

    #[test]
    fn address_broadcast_code() {
        assert_eq!(SignAddress::BROADCAST.code(), *b"00");
    }

    #[test]
    fn address_code_is_uppercase_hex() {
        assert_eq!(SignAddress::new(0xAB).code(), *b"AB");
        assert_eq!(SignAddress::new(0x0F).code(), *b"0F");
        assert_eq!(SignAddress::new(0xF0).code(), *b"F0");
    }

    #[test]
    fn address_display_matches_code() {
        let addr = SignAddress::new(0x3C);
        assert_eq!(addr.to_string(), "3C");
        assert_eq!(addr.to_string().as_bytes(), addr.code());
    }

    #[test]
    fn address_default_is_broadcast() {
        assert_eq!(SignAddress::default(), SignAddress::BROADCAST);
    }

    #[test]
    fn address_from_str() {
        assert_eq!("00".parse::<SignAddress>().unwrap(), SignAddress::BROADCAST);
        assert_eq!("ab".parse::<SignAddress>().unwrap(), SignAddress::new(0xAB));
        assert_eq!("7f".parse::<SignAddress>().unwrap(), SignAddress::new(0x7F));
    }

    #[test]
    fn address_from_str_rejects_bad_input() {
        assert!("0".parse::<SignAddress>().is_err());
        assert!("000".parse::<SignAddress>().is_err());
        assert!("GG".parse::<SignAddress>().is_err());
        assert!("".parse::<SignAddress>().is_err());
    }
}
