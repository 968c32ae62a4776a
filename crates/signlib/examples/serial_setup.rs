//! Basic sign setup example over a serial port.
//!
//! Demonstrates the usual programming sequence for an Alpha or BetaBrite
//! sign: clear memory, allocate display files, set the run sequence, and
//! beep to confirm the sign is listening.
//!
//! # Requirements
//!
//! - A sign wired to a serial port (4800 baud 7E2 is the factory setting
//!   and the default here)
//! - The port path adjusted for your system (e.g., `/dev/ttyS0` on Linux,
//!   `COM3` on Windows)
//!
//! # Usage
//!
//! ```sh
//! cargo run -p signlib --example serial_setup
//! ```

use signlib::DisplayFile;
use signlib::alpha::AlphaSignBuilder;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Adjust this to match your system's serial port.
    let serial_port = "/dev/ttyS0";

    println!("Programming sign on {}...", serial_port);

    let mut sign = AlphaSignBuilder::new().serial_port(serial_port).build()?;

    // Wipe whatever layout the sign currently holds. The call returns
    // after the sign's settle delay, so it is safe to continue directly.
    println!("Clearing memory (takes about a second)...");
    sign.clear_memory().await?;

    // One TEXT file for the message, one STRING file for a value the
    // message could embed.
    let files = [DisplayFile::text(b'A', 256), DisplayFile::string(b's', 64)];
    for file in &files {
        println!("Allocating {}", file);
    }
    sign.allocate(&files).await?;

    // Display the TEXT file only; lock the sequence against edits from the
    // IR keyboard.
    sign.set_run_sequence(&files[..1], true).await?;

    // Audible confirmation.
    sign.beep(100, 0.5, 1).await?;

    println!("Done.");
    Ok(())
}
