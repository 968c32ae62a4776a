//! AlphaSign -- the sign handle that frames commands and writes them out.
//!
//! This module ties the command payload builders ([`commands`]) and the
//! packet encoder ([`packet`](crate::packet)) to a [`Transport`] to produce
//! a working sign driver. Each operation builds one payload, frames it with
//! the handle's addressing, and performs exactly one transport write.
//!
//! The protocol is strictly one-directional: the sign never acknowledges
//! anything, so there is no response parsing, no retry logic, and failure
//! reporting ends at the transport write. Two consequences shape the API:
//!
//! - Operations take `&mut self`; no two commands are ever in flight on one
//!   transport.
//! - The handle connects lazily. The first operation on an unconnected
//!   transport connects it, so callers never have to call
//!   [`connect`](AlphaSign::connect) themselves.

use std::time::Duration;

use tracing::{debug, trace};

use signlib_core::error::Result;
use signlib_core::files::{DisplayFile, RunSequence};
use signlib_core::transport::Transport;
use signlib_core::types::{SignAddress, SignType};

use crate::commands;
use crate::packet::Packet;

/// Recovery time the sign needs after a memory clear.
///
/// While wiping memory the sign ignores its input, so
/// [`AlphaSign::clear_memory`] holds its caller for this long before
/// returning. Overridable per handle via
/// [`AlphaSignBuilder::settle_delay`](crate::builder::AlphaSignBuilder::settle_delay).
pub const CLEAR_MEMORY_SETTLE: Duration = Duration::from_secs(1);

/// A sign (or group of signs) programmed over one transport.
///
/// Constructed via [`AlphaSignBuilder`](crate::builder::AlphaSignBuilder).
/// The default addressing reaches every sign on the line: sign type
/// [`SignType::All`] and address [`SignAddress::BROADCAST`].
pub struct AlphaSign {
    transport: Box<dyn Transport>,
    sign_type: SignType,
    address: SignAddress,
    settle_delay: Duration,
}

impl AlphaSign {
    /// Create a new `AlphaSign` from its constituent parts.
    ///
    /// This is called by [`AlphaSignBuilder`](crate::builder::AlphaSignBuilder);
    /// callers should use the builder API instead.
    pub(crate) fn new(
        transport: Box<dyn Transport>,
        sign_type: SignType,
        address: SignAddress,
        settle_delay: Duration,
    ) -> Self {
        AlphaSign {
            transport,
            sign_type,
            address,
            settle_delay,
        }
    }

    /// The sign type code this handle addresses.
    pub fn sign_type(&self) -> SignType {
        self.sign_type
    }

    /// The sign address this handle addresses.
    pub fn address(&self) -> SignAddress {
        self.address
    }

    /// The delay [`clear_memory`](Self::clear_memory) waits after writing.
    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// Connect the underlying transport.
    ///
    /// Optional: every operation connects lazily if needed.
    pub async fn connect(&mut self) -> Result<()> {
        self.transport.connect().await
    }

    /// Disconnect the underlying transport.
    pub async fn disconnect(&mut self) -> Result<()> {
        self.transport.disconnect().await
    }

    /// Whether the underlying transport is currently connected.
    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    /// Frame `payload` with this handle's addressing and write it.
    ///
    /// One packet, one write, no retry.
    async fn send(&mut self, payload: &[u8]) -> Result<()> {
        if !self.transport.is_connected() {
            debug!("transport not connected, connecting before write");
            self.transport.connect().await?;
        }
        let packet = Packet::addressed(self.sign_type, self.address, payload);
        trace!(?packet, "writing packet");
        self.transport.write(packet.as_bytes()).await
    }

    /// Erase every file on the sign.
    ///
    /// The returned future does not complete until the settle delay has
    /// elapsed after the write; commands sent during the wipe would be
    /// lost. Allocation ([`allocate`](Self::allocate)) is the usual next
    /// step, since a cleared sign has no memory table.
    pub async fn clear_memory(&mut self) -> Result<()> {
        debug!("clearing sign memory");
        self.send(&commands::cmd_clear_memory()).await?;
        tokio::time::sleep(self.settle_delay).await;
        Ok(())
    }

    /// Sound the sign's speaker.
    ///
    /// `frequency` is a tone register `0`-`254` (not hertz),
    /// `duration_secs` runs `0.1`-`1.5` in tenths of a second, and
    /// `repeat` adds `0`-`15` extra repetitions. Out-of-range values are
    /// clamped, not rejected.
    pub async fn beep(&mut self, frequency: i32, duration_secs: f32, repeat: i32) -> Result<()> {
        debug!(frequency, duration_secs, repeat, "sounding beep");
        self.send(&commands::cmd_beep(frequency, duration_secs, repeat))
            .await
    }

    /// Restart the sign without clearing its memory.
    pub async fn soft_reset(&mut self) -> Result<()> {
        debug!("soft resetting sign");
        self.send(&commands::cmd_soft_reset()).await
    }

    /// Replace the sign's memory table with the given files.
    ///
    /// Existing allocations are discarded, so every file the sign should
    /// hold must appear in one call. Five target TEXT slots `1`-`5` are
    /// reserved after the caller's files; see
    /// [`cmd_allocate`](commands::cmd_allocate).
    pub async fn allocate(&mut self, files: &[DisplayFile]) -> Result<()> {
        debug!(count = files.len(), "allocating display files");
        self.send(&commands::cmd_allocate(files)).await
    }

    /// Set the order in which the sign displays its TEXT files.
    ///
    /// Files display in slice order. `locked` controls whether the IR
    /// keyboard may edit the sequence afterwards.
    pub async fn set_run_sequence(&mut self, files: &[DisplayFile], locked: bool) -> Result<()> {
        self.send_run_sequence(&RunSequence::from_files(files, locked))
            .await
    }

    /// Send a prebuilt [`RunSequence`].
    ///
    /// [`set_run_sequence`](Self::set_run_sequence) is the usual entry
    /// point; this one serves callers that track labels without holding
    /// full [`DisplayFile`] values.
    pub async fn send_run_sequence(&mut self, sequence: &RunSequence) -> Result<()> {
        debug!(
            count = sequence.len(),
            locked = sequence.locked(),
            "setting run sequence"
        );
        self.send(&commands::cmd_set_run_sequence(sequence)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signlib_core::error::Error;
    use signlib_test_harness::MockTransport;

    /// Frame a payload with default addressing, the way the handle does.
    fn framed(payload: &[u8]) -> Vec<u8> {
        Packet::new(payload).into_bytes()
    }

    /// Helper to build an AlphaSign over a MockTransport, with a zero
    /// settle delay so clear-memory tests return immediately.
    fn make_test_sign(mock: MockTransport) -> AlphaSign {
        AlphaSign::new(
            Box::new(mock),
            SignType::All,
            SignAddress::BROADCAST,
            Duration::ZERO,
        )
    }

    // -----------------------------------------------------------------
    // Packet content per operation
    // -----------------------------------------------------------------

    #[tokio::test]
    async fn clear_memory_writes_one_packet() {
        let mut mock = MockTransport::new();
        mock.expect(&framed(b"E$"));
        let probe = mock.clone();

        let mut sign = make_test_sign(mock);
        sign.clear_memory().await.unwrap();

        assert_eq!(probe.sent_data(), vec![framed(b"E$")]);
        assert_eq!(probe.remaining_expectations(), 0);
    }

    #[tokio::test]
    async fn beep_writes_clamped_packet() {
        let mut mock = MockTransport::new();
        mock.expect(&framed(b"E(2FEFF"));

        let mut sign = make_test_sign(mock);
        sign.beep(300, 2.0, 20).await.unwrap();
    }

    #[tokio::test]
    async fn soft_reset_writes_one_packet() {
        let mut mock = MockTransport::new();
        mock.expect(&framed(b"E,"));
        let probe = mock.clone();

        let mut sign = make_test_sign(mock);
        sign.soft_reset().await.unwrap();

        assert_eq!(probe.sent_data().len(), 1);
    }

    #[tokio::test]
    async fn allocate_writes_framed_records() {
        let files = [
            DisplayFile::text(b'A', 256),
            DisplayFile::string(b's', 64),
        ];
        let mut mock = MockTransport::new();
        mock.expect(&framed(&commands::cmd_allocate(&files)));

        let mut sign = make_test_sign(mock);
        sign.allocate(&files).await.unwrap();
    }

    #[tokio::test]
    async fn set_run_sequence_preserves_file_order() {
        let files = [
            DisplayFile::text(b'C', 100),
            DisplayFile::text(b'A', 100),
            DisplayFile::text(b'B', 100),
        ];
        let mut mock = MockTransport::new();
        mock.expect(&framed(b"E.TUCAB"));

        let mut sign = make_test_sign(mock);
        sign.set_run_sequence(&files, false).await.unwrap();
    }

    #[tokio::test]
    async fn set_run_sequence_locked() {
        let mut mock = MockTransport::new();
        mock.expect(&framed(b"E.TL12"));

        let files = [DisplayFile::text(b'1', 100), DisplayFile::text(b'2', 100)];
        let mut sign = make_test_sign(mock);
        sign.set_run_sequence(&files, true).await.unwrap();
    }

    #[tokio::test]
    async fn send_run_sequence_from_bare_labels() {
        let mut mock = MockTransport::new();
        mock.expect(&framed(b"E.TLAB"));

        let mut seq = RunSequence::new(true);
        seq.push(b'A');
        seq.push(b'B');

        let mut sign = make_test_sign(mock);
        sign.send_run_sequence(&seq).await.unwrap();
    }

    #[tokio::test]
    async fn operations_write_in_invocation_order() {
        let mut mock = MockTransport::new();
        mock.expect(&framed(b"E(20051"));
        mock.expect(&framed(b"E,"));
        let probe = mock.clone();

        let mut sign = make_test_sign(mock);
        sign.beep(0, 0.5, 1).await.unwrap();
        sign.soft_reset().await.unwrap();

        assert_eq!(
            probe.sent_data(),
            vec![framed(b"E(20051"), framed(b"E,")]
        );
    }

    // -----------------------------------------------------------------
    // Addressing
    // -----------------------------------------------------------------

    #[tokio::test]
    async fn configured_addressing_lands_in_header() {
        let mut mock = MockTransport::new();
        let expected =
            Packet::addressed(SignType::BetaBrite, SignAddress::new(0x05), b"E,").into_bytes();
        mock.expect(&expected);
        let probe = mock.clone();

        let mut sign = AlphaSign::new(
            Box::new(mock),
            SignType::BetaBrite,
            SignAddress::new(0x05),
            Duration::ZERO,
        );
        sign.soft_reset().await.unwrap();

        let sent = probe.sent_data();
        assert_eq!(&sent[0][6..9], &[b'^', b'0', b'5']);
    }

    // -----------------------------------------------------------------
    // Settle delay
    // -----------------------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn clear_memory_waits_out_settle_delay() {
        let mut mock = MockTransport::new();
        mock.expect(&framed(b"E$"));
        let probe = mock.clone();

        let mut sign = AlphaSign::new(
            Box::new(mock),
            SignType::All,
            SignAddress::BROADCAST,
            CLEAR_MEMORY_SETTLE,
        );

        let start = tokio::time::Instant::now();
        sign.clear_memory().await.unwrap();

        assert_eq!(start.elapsed(), CLEAR_MEMORY_SETTLE);
        assert_eq!(probe.sent_data().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn soft_reset_does_not_wait() {
        let mut mock = MockTransport::new();
        mock.expect(&framed(b"E,"));

        let mut sign = AlphaSign::new(
            Box::new(mock),
            SignType::All,
            SignAddress::BROADCAST,
            CLEAR_MEMORY_SETTLE,
        );

        let start = tokio::time::Instant::now();
        sign.soft_reset().await.unwrap();

        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    // -----------------------------------------------------------------
    // Connection lifecycle
    // -----------------------------------------------------------------

    #[tokio::test]
    async fn writes_connect_lazily() {
        let mut mock = MockTransport::new();
        mock.set_connected(false);
        mock.expect(&framed(b"E,"));
        let probe = mock.clone();

        let mut sign = make_test_sign(mock);
        assert!(!sign.is_connected());

        sign.soft_reset().await.unwrap();

        assert!(sign.is_connected());
        assert_eq!(probe.sent_data().len(), 1);
    }

    #[tokio::test]
    async fn connect_failure_propagates_without_write() {
        let mut mock = MockTransport::new();
        mock.set_connected(false);
        mock.refuse_connections();
        let probe = mock.clone();

        let mut sign = make_test_sign(mock);
        let result = sign.soft_reset().await;

        assert!(matches!(result.unwrap_err(), Error::Transport(_)));
        assert!(probe.sent_data().is_empty());
    }

    #[tokio::test]
    async fn write_failure_reported_once_without_retry() {
        let mut mock = MockTransport::new();
        mock.expect(&framed(b"E,"));
        mock.fail_next_write();
        let probe = mock.clone();

        let mut sign = make_test_sign(mock);
        let result = sign.soft_reset().await;

        assert!(matches!(result.unwrap_err(), Error::ConnectionLost));
        // Exactly one attempt, expectation untouched.
        assert_eq!(probe.sent_data().len(), 1);
        assert_eq!(probe.remaining_expectations(), 1);
    }

    #[tokio::test]
    async fn explicit_connect_and_disconnect() {
        let mut mock = MockTransport::new();
        mock.set_connected(false);

        let mut sign = make_test_sign(mock);
        sign.connect().await.unwrap();
        assert!(sign.is_connected());

        sign.disconnect().await.unwrap();
        assert!(!sign.is_connected());
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    #[tokio::test]
    async fn accessors_reflect_construction() {
        let sign = make_test_sign(MockTransport::new());
        assert_eq!(sign.sign_type(), SignType::All);
        assert_eq!(sign.address(), SignAddress::BROADCAST);
        assert_eq!(sign.settle_delay(), Duration::ZERO);
    }
}
