//! Sign command payload builders.
//!
//! This module provides functions to construct the command payloads that
//! get framed into packets: memory clear, speaker beep, soft reset, file
//! allocation, and run-sequence selection.
//!
//! All functions are pure -- they produce byte vectors without performing
//! any I/O. [`AlphaSign`](crate::sign::AlphaSign) frames these payloads
//! and hands them to a transport.
//!
//! # Command reference
//!
//! Every payload starts with the write-special-function command code `E`
//! followed by a function label:
//!
//! | Payload                 | Effect                                     |
//! |-------------------------|--------------------------------------------|
//! | `E$`                    | clear memory                               |
//! | `E$` + records          | allocate memory files                      |
//! | `E(2` + `FF` `D` `R`    | beep (frequency, duration, repeat, in hex) |
//! | `E,`                    | soft reset (non-destructive)               |
//! | `E.T` + `L`/`U` + labels| set run sequence                           |
//!
//! Out-of-range numeric parameters are clamped, never rejected: signs
//! accept the clamped commands, and sending nothing at all would be the
//! surprising behavior.

use bytes::{BufMut, BytesMut};
use signlib_core::{DisplayFile, FileKind, FileLabel, LockState, RunSequence};
use tracing::warn;

/// Command code for "write special function", the command class every
/// payload in this module belongs to.
pub const WRITE_SPECIAL: u8 = b'E';

/// Special function label for memory configuration. With no records it
/// clears memory; with records it allocates files.
const SPECIAL_MEMORY_CONFIG: u8 = b'$';

/// Special function label for the speaker, plus the sub-code selecting
/// the programmable tone.
const SPECIAL_SPEAKER_TONE: &[u8] = b"(2";

/// Special function label for a soft reset.
const SPECIAL_SOFT_RESET: u8 = b',';

/// Special function label for the run sequence, plus the sub-code
/// selecting ordered display.
const SPECIAL_RUN_SEQUENCE: &[u8] = b".T";

/// Labels of the target TEXT slots every allocation reserves.
const TARGET_SLOT_LABELS: [u8; 5] = [b'1', b'2', b'3', b'4', b'5'];

/// Size of each reserved target TEXT slot, in bytes.
const TARGET_SLOT_SIZE: u16 = 100;

/// Reserved field of the target TEXT slots (not displayed by default).
const TARGET_SLOT_RESERVED: &[u8; 4] = b"FEFE";

/// Bytes one allocation record occupies:
/// label + type code + lock code + 4 size digits + 4 reserved digits.
const ALLOCATION_RECORD_LEN: usize = 11;

// ---------------------------------------------------------------
// Parameter clamping
// ---------------------------------------------------------------

/// Clamp a beep frequency to the sign's `0`-`254` register range.
///
/// The value is a tone register index, not hertz.
pub fn clamp_frequency(frequency: i32) -> u8 {
    frequency.clamp(0, 254) as u8
}

/// Quantize a beep duration in seconds to 0.1 s units and clamp to the
/// sign's `1`-`15` range (0.1 s to 1.5 s).
///
/// Quantization truncates, so `1.5` lands on `14`, not `15`: `1.5 / 0.1`
/// computes to just under 15 in binary floating point, and deployed signs
/// have been receiving the truncated value for decades. Changing the
/// rounding here would change what hardware plays.
pub fn clamp_duration(duration_secs: f32) -> u8 {
    let units = (f64::from(duration_secs) / 0.1) as i32;
    units.clamp(1, 15) as u8
}

/// Clamp a beep repeat count to the sign's `0`-`15` range.
pub fn clamp_repeat(repeat: i32) -> u8 {
    repeat.clamp(0, 15) as u8
}

// ---------------------------------------------------------------
// Command builders
// ---------------------------------------------------------------

/// Build a "clear memory" payload (`E$`).
///
/// Erases every file on the sign. The sign needs about a second after
/// this before it reliably accepts further commands;
/// [`AlphaSign::clear_memory`](crate::sign::AlphaSign::clear_memory)
/// waits that out.
pub fn cmd_clear_memory() -> Vec<u8> {
    vec![WRITE_SPECIAL, SPECIAL_MEMORY_CONFIG]
}

/// Build a "beep" payload (`E(2` + frequency + duration + repeat).
///
/// - `frequency`: tone register `0`-`254` (not hertz), two hex digits
/// - `duration_secs`: `0.1`-`1.5` seconds in 0.1 s steps, one hex digit
/// - `repeat`: `0`-`15` extra repetitions, one hex digit
///
/// All three are clamped to their ranges; see [`clamp_frequency`],
/// [`clamp_duration`], and [`clamp_repeat`].
///
/// # Example
///
/// ```
/// use signlib_alpha::commands::cmd_beep;
///
/// // Everything out of range: clamps to 254 (0xFE), 15 (0xF), 15 (0xF).
/// assert_eq!(cmd_beep(300, 2.0, 20), b"E(2FEFF");
/// ```
pub fn cmd_beep(frequency: i32, duration_secs: f32, repeat: i32) -> Vec<u8> {
    let frequency = clamp_frequency(frequency);
    let duration = clamp_duration(duration_secs);
    let repeat = clamp_repeat(repeat);

    let mut buf = BytesMut::with_capacity(1 + SPECIAL_SPEAKER_TONE.len() + 4);
    buf.put_u8(WRITE_SPECIAL);
    buf.put_slice(SPECIAL_SPEAKER_TONE);
    buf.put_slice(format!("{frequency:02X}{duration:X}{repeat:X}").as_bytes());
    buf.to_vec()
}

/// Build a "soft reset" payload (`E,`).
///
/// Restarts the sign without clearing its memory.
pub fn cmd_soft_reset() -> Vec<u8> {
    vec![WRITE_SPECIAL, SPECIAL_SOFT_RESET]
}

/// Build an "allocate files" payload (`E$` + one record per file).
///
/// Each record is 11 bytes: label, type code, lock code, four hex digits
/// of size, four reserved digits (TEXT `FFFF` start/stop time, STRING
/// `0000`). After the caller's files, the payload always reserves the
/// five target TEXT slots `1`-`5` (unlocked, 100 bytes, `FEFE`), so even
/// `cmd_allocate(&[])` produces a usable memory layout.
///
/// Allocation replaces the sign's entire memory table, which is why the
/// slots must be re-reserved on every call.
///
/// Duplicate labels are logged and encoded anyway; the sign keeps the
/// first record it can honor.
pub fn cmd_allocate(files: &[DisplayFile]) -> Vec<u8> {
    let record_count = files.len() + TARGET_SLOT_LABELS.len();
    let mut buf = BytesMut::with_capacity(2 + record_count * ALLOCATION_RECORD_LEN);
    buf.put_u8(WRITE_SPECIAL);
    buf.put_u8(SPECIAL_MEMORY_CONFIG);

    let mut seen: Vec<FileLabel> = Vec::with_capacity(files.len());
    for file in files {
        if seen.contains(&file.label()) {
            warn!(label = %file.label(), "duplicate file label in allocation");
        } else {
            seen.push(file.label());
        }
        put_allocation_record(&mut buf, file);
    }

    for label in TARGET_SLOT_LABELS {
        buf.put_u8(label);
        buf.put_u8(FileKind::Text.type_code());
        buf.put_u8(LockState::Unlocked.code());
        buf.put_slice(format!("{TARGET_SLOT_SIZE:04X}").as_bytes());
        buf.put_slice(TARGET_SLOT_RESERVED);
    }

    buf.to_vec()
}

fn put_allocation_record(buf: &mut BytesMut, file: &DisplayFile) {
    buf.put_u8(file.label().as_byte());
    buf.put_u8(file.kind().type_code());
    buf.put_u8(file.lock_state().code());
    buf.put_slice(format!("{:04X}", file.size()).as_bytes());
    buf.put_slice(file.kind().reserved_field());
}

/// Build a "set run sequence" payload (`E.T` + lock code + labels).
///
/// The labels appear in sequence order; the lock code (`L`/`U`) controls
/// whether the IR keyboard may edit the sequence afterwards.
///
/// # Example
///
/// ```
/// use signlib_alpha::commands::cmd_set_run_sequence;
/// use signlib_core::RunSequence;
///
/// let mut seq = RunSequence::new(true);
/// seq.push(b'1');
/// seq.push(b'2');
/// assert_eq!(cmd_set_run_sequence(&seq), b"E.TL12");
/// ```
pub fn cmd_set_run_sequence(sequence: &RunSequence) -> Vec<u8> {
    let lock = if sequence.locked() {
        LockState::Locked
    } else {
        LockState::Unlocked
    };

    let mut buf = BytesMut::with_capacity(1 + SPECIAL_RUN_SEQUENCE.len() + 1 + sequence.len());
    buf.put_u8(WRITE_SPECIAL);
    buf.put_slice(SPECIAL_RUN_SEQUENCE);
    buf.put_u8(lock.code());
    for label in sequence.labels() {
        buf.put_u8(label.as_byte());
    }
    buf.to_vec()
}
