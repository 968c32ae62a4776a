//! Mock transport for deterministic testing of the sign protocol driver.
//!
//! [`MockTransport`] implements the [`Transport`] trait with a pre-loaded
//! queue of expected packets. The sign protocol is write-only (signs never
//! answer), so there are no canned responses: a test loads the exact framed
//! packets it expects the driver to emit, and any deviation -- wrong bytes,
//! an extra write, a write while disconnected -- surfaces as an error from
//! the driver call under test.
//!
//! # Example
//!
//! ```
//! use signlib_test_harness::MockTransport;
//!
//! let mut mock = MockTransport::new();
//! // Pre-load: the driver must emit exactly this packet next.
//! mock.expect(&[0x00, 0x00, 0x00, 0x00, 0x00, 0x01, b'Z', b'0', b'0', 0x02, b'E', b',', 0x04]);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use signlib_core::error::{Error, Result};
use signlib_core::transport::Transport;

#[derive(Debug)]
struct MockState {
    /// Ordered queue of packets the driver is expected to write.
    expectations: VecDeque<Vec<u8>>,
    connected: bool,
    /// When set, `connect()` fails instead of flipping to connected.
    refuse_connections: bool,
    /// One-shot: the next `write()` is recorded, then fails.
    fail_next_write: bool,
    /// Log of every write, in call order, including failed ones.
    sent_log: Vec<Vec<u8>>,
}

/// A mock [`Transport`] for testing the protocol driver without hardware.
///
/// Expectations are consumed in order. When `write()` is called, the data is
/// recorded and matched against the next expectation; a mismatch or an
/// exhausted queue returns an error, which the driver call under test then
/// reports.
///
/// Cloning shares the underlying state: keep a clone outside the driver to
/// inspect [`sent_data`](MockTransport::sent_data) and
/// [`remaining_expectations`](MockTransport::remaining_expectations) after
/// the driver has taken ownership of the original.
#[derive(Debug, Clone)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// Create a new mock transport in the connected state.
    pub fn new() -> Self {
        MockTransport {
            state: Arc::new(Mutex::new(MockState {
                expectations: VecDeque::new(),
                connected: true,
                refuse_connections: false,
                fail_next_write: false,
                sent_log: Vec::new(),
            })),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add an expected packet to the queue.
    ///
    /// `write()` calls must match the queued packets byte for byte, in
    /// order.
    pub fn expect(&mut self, packet: &[u8]) {
        self.state().expectations.push_back(packet.to_vec());
    }

    /// Return a snapshot of all data written through this transport.
    ///
    /// Each element is the byte slice from one `write()` call, including
    /// writes that subsequently failed.
    pub fn sent_data(&self) -> Vec<Vec<u8>> {
        self.state().sent_log.clone()
    }

    /// Return the number of expectations that have not yet been consumed.
    pub fn remaining_expectations(&self) -> usize {
        self.state().expectations.len()
    }

    /// Set the connected state directly.
    ///
    /// Starting a test with `set_connected(false)` exercises the driver's
    /// lazy connect-on-write path.
    pub fn set_connected(&mut self, connected: bool) {
        self.state().connected = connected;
    }

    /// Make every subsequent `connect()` call fail.
    pub fn refuse_connections(&mut self) {
        self.state().refuse_connections = true;
    }

    /// Make the next `write()` call fail with [`Error::ConnectionLost`]
    /// after recording the attempt.
    ///
    /// The matching expectation is left in the queue, so a test can verify
    /// that the driver reports the failure without retrying.
    pub fn fail_next_write(&mut self) {
        self.state().fail_next_write = true;
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn connect(&mut self) -> Result<()> {
        let mut state = self.state();
        if state.refuse_connections {
            return Err(Error::Transport(
                "mock transport refusing connections".into(),
            ));
        }
        state.connected = true;
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<()> {
        self.state().connected = false;
        Ok(())
    }

    async fn write(&mut self, data: &[u8]) -> Result<()> {
        let mut state = self.state();
        if !state.connected {
            return Err(Error::NotConnected);
        }

        // Record the attempt before any failure injection, so tests can
        // count attempts.
        state.sent_log.push(data.to_vec());

        if state.fail_next_write {
            state.fail_next_write = false;
            return Err(Error::ConnectionLost);
        }

        // Match against the next expectation.
        if let Some(expected) = state.expectations.pop_front() {
            if data != expected.as_slice() {
                return Err(Error::Transport(format!(
                    "unexpected write: expected {:02X?}, got {:02X?}",
                    expected, data
                )));
            }
            Ok(())
        } else {
            Err(Error::Transport(
                "no more expectations in mock transport".into(),
            ))
        }
    }

    fn is_connected(&self) -> bool {
        self.state().connected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signlib_core::transport::Transport;

    #[tokio::test]
    async fn mock_transport_basic_write() {
        let mut mock = MockTransport::new();
        let packet = &[0x00, 0x01, b'Z', b'0', b'0', 0x02, b'E', b'$', 0x04];

        mock.expect(packet);
        mock.write(packet).await.unwrap();
        assert_eq!(mock.remaining_expectations(), 0);
    }

    #[tokio::test]
    async fn mock_transport_tracks_sent_data() {
        let mut mock = MockTransport::new();
        let pkt1 = &[0x01, 0x02];
        let pkt2 = &[0x03, 0x04];

        mock.expect(pkt1);
        mock.expect(pkt2);

        mock.write(pkt1).await.unwrap();
        mock.write(pkt2).await.unwrap();

        let sent = mock.sent_data();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], pkt1);
        assert_eq!(sent[1], pkt2);
    }

    #[tokio::test]
    async fn mock_transport_wrong_data_errors() {
        let mut mock = MockTransport::new();
        mock.expect(&[0x01]);

        let result = mock.write(&[0x99]).await;
        assert!(matches!(result.unwrap_err(), Error::Transport(_)));
    }

    #[tokio::test]
    async fn mock_transport_no_expectations_errors() {
        let mut mock = MockTransport::new();

        let result = mock.write(&[0x01]).await;
        assert!(matches!(result.unwrap_err(), Error::Transport(_)));
        // The attempt is still logged.
        assert_eq!(mock.sent_data().len(), 1);
    }

    #[tokio::test]
    async fn mock_transport_disconnect() {
        let mut mock = MockTransport::new();
        assert!(mock.is_connected());

        mock.disconnect().await.unwrap();
        assert!(!mock.is_connected());

        let result = mock.write(&[0x01]).await;
        assert!(matches!(result.unwrap_err(), Error::NotConnected));
    }

    #[tokio::test]
    async fn mock_transport_reconnects() {
        let mut mock = MockTransport::new();
        mock.set_connected(false);
        assert!(!mock.is_connected());

        mock.connect().await.unwrap();
        assert!(mock.is_connected());
    }

    #[tokio::test]
    async fn mock_transport_refuses_connections() {
        let mut mock = MockTransport::new();
        mock.set_connected(false);
        mock.refuse_connections();

        let result = mock.connect().await;
        assert!(matches!(result.unwrap_err(), Error::Transport(_)));
        assert!(!mock.is_connected());
    }

    #[tokio::test]
    async fn mock_transport_fail_next_write_is_one_shot() {
        let mut mock = MockTransport::new();
        mock.expect(&[0x01]);
        mock.fail_next_write();

        let result = mock.write(&[0x01]).await;
        assert!(matches!(result.unwrap_err(), Error::ConnectionLost));
        // Attempt recorded, expectation not consumed.
        assert_eq!(mock.sent_data().len(), 1);
        assert_eq!(mock.remaining_expectations(), 1);

        // The next write proceeds normally.
        mock.write(&[0x01]).await.unwrap();
        assert_eq!(mock.remaining_expectations(), 0);
    }

    #[tokio::test]
    async fn mock_transport_remaining_expectations() {
        let mut mock = MockTransport::new();
        mock.expect(&[0x01]);
        mock.expect(&[0x02]);
        assert_eq!(mock.remaining_expectations(), 2);

        mock.write(&[0x01]).await.unwrap();
        assert_eq!(mock.remaining_expectations(), 1);

        mock.write(&[0x02]).await.unwrap();
        assert_eq!(mock.remaining_expectations(), 0);
    }

    #[tokio::test]
    async fn mock_transport_clone_shares_state() {
        let mut mock = MockTransport::new();
        let probe = mock.clone();

        mock.expect(&[0x01]);
        assert_eq!(probe.remaining_expectations(), 1);

        mock.write(&[0x01]).await.unwrap();
        assert_eq!(probe.remaining_expectations(), 0);
        assert_eq!(probe.sent_data(), vec![vec![0x01]]);
    }
}
