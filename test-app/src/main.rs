// signlib test application -- CLI tool for exercising every sign command
// against real hardware (serial or USB) or a packet-dumping debug transport.
//
// Usage:
//   signlib-test-app --port /dev/ttyS0 clear-memory
//   signlib-test-app --port /dev/ttyS0 --baud 9600 beep --frequency 100 --duration 0.5
//   signlib-test-app --usb soft-reset
//   signlib-test-app --usb=8765:1234 allocate A:text:256 s:string:64
//   signlib-test-app --port /dev/ttyS0 sequence --locked As
//   signlib-test-app --debug allocate A:text:256
//   signlib-test-app discover
//
// With --debug no hardware is touched: every packet the command would have
// sent is recorded and hex-dumped, which is the quickest way to inspect the
// exact bytes a command puts on the wire. Set RUST_LOG=signlib=trace for
// per-write tracing on the real transports.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use signlib::alpha::builder::AlphaSignBuilder;
use signlib::alpha::commands;
use signlib::alpha::sign::AlphaSign;
use signlib::transport::{DebugTransport, PacketLog, UsbId, attached_devices};
use signlib::{DisplayFile, LockState, RunSequence, SignAddress, SignType};

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// signlib test application -- programs LED message signs from the command line.
#[derive(Parser)]
#[command(name = "signlib-test-app", version, about)]
struct Cli {
    /// Serial port path (e.g. /dev/ttyS0, COM3).
    /// Signs ship at 4800 baud 7E2, which is the default line setting.
    #[arg(long)]
    port: Option<String>,

    /// Override the default 4800 baud rate. Serial only.
    #[arg(long)]
    baud: Option<u32>,

    /// Target a USB-attached sign, given as --usb=vendor:product hex.
    /// With no value, the BetaBrite Prism (8765:1234).
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "8765:1234",
        value_name = "VID:PID"
    )]
    usb: Option<UsbId>,

    /// Use a packet-recording debug transport instead of real hardware,
    /// and hex-dump the recorded packets afterwards.
    #[arg(long)]
    debug: bool,

    /// Sign type to address (e.g. all, betabrite, one-line, 430i).
    #[arg(long, default_value = "all")]
    sign_type: SignType,

    /// Sign address as two hex digits (00 = broadcast, every sign responds).
    #[arg(long, default_value = "00")]
    address: SignAddress,

    /// Override the settle delay after clear-memory, in milliseconds.
    /// The default 1000 ms matches what the hardware needs.
    #[arg(long)]
    settle_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Erase every file on the sign (blocks for the settle delay).
    ClearMemory,

    /// Sound the sign's speaker. Out-of-range values clamp, never fail.
    Beep {
        /// Tone register 0-254 (not hertz).
        #[arg(long, default_value_t = 100)]
        frequency: i32,

        /// Duration in seconds, 0.1-1.5 in tenths.
        #[arg(long, default_value_t = 0.5)]
        duration: f32,

        /// Extra repetitions, 0-15.
        #[arg(long, default_value_t = 0)]
        repeat: i32,
    },

    /// Restart the sign without clearing its memory.
    SoftReset,

    /// Replace the sign's memory table with the given files.
    /// The five reserved target TEXT slots 1-5 are always appended.
    Allocate {
        /// Files as label:kind:size[:locked|:unlocked],
        /// e.g. A:text:256 or s:string:64:unlocked.
        files: Vec<String>,
    },

    /// Set the order in which the sign displays its TEXT files.
    Sequence {
        /// File labels in display order, one character each (e.g. "A1B").
        labels: String,

        /// Lock the sequence against IR keyboard edits.
        #[arg(long)]
        locked: bool,
    },

    /// List attached USB devices, marking known sign models.
    /// Does not require a transport option.
    Discover,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a file spec of the form `label:kind:size[:locked|:unlocked]`,
/// e.g. `A:text:256` or `s:string:64:unlocked`.
fn parse_file_spec(spec: &str) -> Result<DisplayFile> {
    let parts: Vec<&str> = spec.split(':').collect();
    if parts.len() < 3 || parts.len() > 4 {
        bail!("invalid file spec '{spec}' (expected label:kind:size[:locked|:unlocked])");
    }

    if parts[0].len() != 1 || !parts[0].is_ascii() {
        bail!(
            "invalid label '{}' in '{spec}' (expected a single ASCII character)",
            parts[0]
        );
    }
    let label = parts[0].as_bytes()[0];

    let size: u16 = parts[2]
        .parse()
        .with_context(|| format!("invalid size '{}' in '{spec}' (expected 0-65535)", parts[2]))?;

    let mut file = match parts[1].to_lowercase().as_str() {
        "text" => DisplayFile::text(label, size),
        "string" => DisplayFile::string(label, size),
        other => bail!("unknown file kind '{other}' in '{spec}' (expected text or string)"),
    };

    if let Some(lock) = parts.get(3) {
        file = match lock.to_lowercase().as_str() {
            "locked" => file.with_lock_state(LockState::Locked),
            "unlocked" => file.with_lock_state(LockState::Unlocked),
            other => bail!("unknown lock state '{other}' in '{spec}' (expected locked or unlocked)"),
        };
    }

    Ok(file)
}

/// Validate transport option combinations before building a sign handle.
fn validate_options(cli: &Cli) -> Result<()> {
    let targets = usize::from(cli.port.is_some()) + usize::from(cli.usb.is_some()) + usize::from(cli.debug);

    if matches!(cli.command, Command::Discover) {
        if targets != 0 {
            bail!("discover takes no transport options");
        }
        return Ok(());
    }

    match targets {
        0 => bail!("no transport selected: use --port, --usb, or --debug"),
        1 => {}
        _ => bail!("--port, --usb, and --debug are mutually exclusive"),
    }

    if cli.baud.is_some() && cli.port.is_none() {
        bail!("--baud is only valid with --port");
    }

    Ok(())
}

/// Build the sign handle from CLI arguments. For --debug, also returns the
/// packet log so the recorded frames can be dumped after the command runs.
fn build_sign(cli: &Cli) -> Result<(AlphaSign, Option<PacketLog>)> {
    let mut builder = AlphaSignBuilder::new()
        .sign_type(cli.sign_type)
        .address(cli.address);

    if let Some(ms) = cli.settle_ms {
        builder = builder.settle_delay(Duration::from_millis(ms));
    }

    if cli.debug {
        let transport = DebugTransport::new();
        let log = transport.log();
        return Ok((builder.build_with_transport(Box::new(transport)), Some(log)));
    }

    if let Some(port) = &cli.port {
        builder = builder.serial_port(port);
        if let Some(baud) = cli.baud {
            builder = builder.baud_rate(baud);
        }
    }
    if let Some(id) = cli.usb {
        builder = builder.usb_id(id);
    }

    Ok((builder.build().context("failed to build sign handle")?, None))
}

/// Hex-dump every packet a debug run recorded, 16 bytes per row.
fn dump_packets(log: &PacketLog) {
    let packets = log.packets();
    println!();
    println!("{} packet(s) recorded:", packets.len());
    for (i, packet) in packets.iter().enumerate() {
        println!("packet {} ({} bytes):", i + 1, packet.len());
        for chunk in packet.chunks(16) {
            let hex: Vec<String> = chunk.iter().map(|b| format!("{b:02X}")).collect();
            let ascii: String = chunk
                .iter()
                .map(|b| if b.is_ascii_graphic() { *b as char } else { '.' })
                .collect();
            println!("  {:<47}  |{ascii}|", hex.join(" "));
        }
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

async fn cmd_clear_memory(sign: &mut AlphaSign) -> Result<()> {
    println!(
        "Clearing sign memory (settle delay {} ms)...",
        sign.settle_delay().as_millis()
    );
    sign.clear_memory().await.context("clear-memory failed")?;
    println!("Memory cleared.");
    Ok(())
}

async fn cmd_beep(sign: &mut AlphaSign, frequency: i32, duration: f32, repeat: i32) -> Result<()> {
    // Echo the values the sign will actually receive after clamping.
    println!(
        "Beep: frequency {}, duration {:.1} s, repeat {}",
        commands::clamp_frequency(frequency),
        f32::from(commands::clamp_duration(duration)) * 0.1,
        commands::clamp_repeat(repeat),
    );
    sign.beep(frequency, duration, repeat)
        .await
        .context("beep failed")
}

async fn cmd_soft_reset(sign: &mut AlphaSign) -> Result<()> {
    sign.soft_reset().await.context("soft-reset failed")?;
    println!("Soft reset sent.");
    Ok(())
}

async fn cmd_allocate(sign: &mut AlphaSign, specs: &[String]) -> Result<()> {
    let files = specs
        .iter()
        .map(|s| parse_file_spec(s))
        .collect::<Result<Vec<_>>>()?;

    for file in &files {
        println!("  {file}");
    }
    sign.allocate(&files).await.context("allocate failed")?;
    println!(
        "Allocated {} file(s) plus the 5 reserved target slots.",
        files.len()
    );
    Ok(())
}

async fn cmd_sequence(sign: &mut AlphaSign, labels: &str, locked: bool) -> Result<()> {
    if labels.is_empty() || !labels.is_ascii() {
        bail!("labels must be a non-empty ASCII string, got '{labels}'");
    }

    let mut sequence = RunSequence::new(locked);
    for label in labels.bytes() {
        sequence.push(label);
    }

    sign.send_run_sequence(&sequence)
        .await
        .context("sequence failed")?;
    println!(
        "Run sequence set to \"{labels}\" ({}).",
        if locked { "locked" } else { "unlocked" }
    );
    Ok(())
}

fn cmd_discover() -> Result<()> {
    let devices = attached_devices().context("USB enumeration failed")?;
    if devices.is_empty() {
        println!("No USB devices attached.");
        return Ok(());
    }

    println!("Attached USB devices:");
    for id in &devices {
        if *id == UsbId::BETABRITE_PRISM {
            println!("  {id}  <-- BetaBrite Prism");
        } else {
            println!("  {id}");
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    validate_options(&cli)?;

    // Discovery never opens a sign connection.
    if matches!(cli.command, Command::Discover) {
        return cmd_discover();
    }

    let (mut sign, debug_log) = build_sign(&cli)?;

    let result = match &cli.command {
        Command::ClearMemory => cmd_clear_memory(&mut sign).await,
        Command::Beep {
            frequency,
            duration,
            repeat,
        } => cmd_beep(&mut sign, *frequency, *duration, *repeat).await,
        Command::SoftReset => cmd_soft_reset(&mut sign).await,
        Command::Allocate { files } => cmd_allocate(&mut sign, files).await,
        Command::Sequence { labels, locked } => cmd_sequence(&mut sign, labels, *locked).await,
        Command::Discover => unreachable!("discover handled above"),
    };

    if let Some(log) = &debug_log {
        dump_packets(log);
    }

    result
}
