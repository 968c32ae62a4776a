//! Packet dump example -- inspect protocol bytes without a sign attached.
//!
//! Runs every command against a [`DebugTransport`] and hex-dumps the framed
//! packets it records. Useful for learning the wire format or for checking
//! library output against a line analyzer capture.
//!
//! # Usage
//!
//! ```sh
//! cargo run -p signlib --example packet_dump
//! ```

use std::time::Duration;

use signlib::DisplayFile;
use signlib::alpha::AlphaSignBuilder;
use signlib::transport::DebugTransport;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let transport = DebugTransport::new();
    let log = transport.log();

    // Zero settle delay: nothing to wait for when no sign is attached.
    let mut sign = AlphaSignBuilder::new()
        .settle_delay(Duration::ZERO)
        .build_with_transport(Box::new(transport));

    let files = [DisplayFile::text(b'A', 256), DisplayFile::string(b's', 64)];

    sign.clear_memory().await?;
    sign.allocate(&files).await?;
    sign.set_run_sequence(&files, true).await?;
    sign.beep(100, 0.5, 2).await?;
    sign.soft_reset().await?;

    let labels = [
        "clear memory",
        "allocate",
        "set run sequence",
        "beep",
        "soft reset",
    ];
    for (label, packet) in labels.iter().zip(log.packets()) {
        println!("{label:>16}: {}", hex_dump(&packet));
    }

    Ok(())
}

fn hex_dump(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}
