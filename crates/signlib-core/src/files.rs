//! Display file types.
//!
//! A sign's memory is divided into named files. TEXT files hold messages
//! the sign cycles through; STRING files hold data that TEXT files can
//! embed by reference (clock readouts, counters, etc.). This library does
//! not model file *contents* — only the label, size, kind, and lock state
//! that the memory-allocation and run-sequence commands need.

use std::fmt;

/// Single-byte file label addressing one slot of sign memory.
///
/// Labels are printable ASCII on the wire. There is no validation here:
/// the sign ignores allocation records it cannot use, and this layer never
/// rejects parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileLabel(u8);

impl FileLabel {
    /// Create a label from its raw byte.
    pub const fn new(byte: u8) -> Self {
        FileLabel(byte)
    }

    /// Return the raw label byte as written on the wire.
    pub fn as_byte(&self) -> u8 {
        self.0
    }
}

impl From<u8> for FileLabel {
    fn from(byte: u8) -> Self {
        FileLabel(byte)
    }
}

impl fmt::Display for FileLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.escape_ascii())
    }
}

/// Whether a file may be altered from the sign's IR keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockState {
    /// Keyboard editing disallowed (`L`).
    Locked,
    /// Keyboard editing allowed (`U`).
    Unlocked,
}

impl LockState {
    /// The wire code byte for this lock state.
    pub fn code(&self) -> u8 {
        match self {
            LockState::Locked => b'L',
            LockState::Unlocked => b'U',
        }
    }
}

impl fmt::Display for LockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LockState::Locked => "locked",
            LockState::Unlocked => "unlocked",
        };
        write!(f, "{s}")
    }
}

/// The kind of a display file.
///
/// The kind determines three wire-level facts about an allocation record,
/// all carried here as data so they are decided once when the file value
/// is constructed:
///
/// | Kind     | Type code | Default lock | Reserved field |
/// |----------|-----------|--------------|----------------|
/// | `Text`   | `A`       | unlocked     | `FFFF`         |
/// | `String` | `B`       | locked       | `0000`         |
///
/// For TEXT files the reserved field is the start/stop display time,
/// which this library leaves at `FFFF` (run at all times). STRING files
/// do not use the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// A message file shown on the display.
    Text,
    /// A data file referenced from within TEXT messages.
    String,
}

impl FileKind {
    /// The wire type code byte for this kind.
    pub fn type_code(&self) -> u8 {
        match self {
            FileKind::Text => b'A',
            FileKind::String => b'B',
        }
    }

    /// The lock state a file of this kind gets unless overridden.
    ///
    /// STRING files default locked because the keyboard cannot usefully
    /// edit referenced data; TEXT files default unlocked.
    pub fn default_lock_state(&self) -> LockState {
        match self {
            FileKind::Text => LockState::Unlocked,
            FileKind::String => LockState::Locked,
        }
    }

    /// The four reserved field bytes in this kind's allocation record.
    pub fn reserved_field(&self) -> &'static [u8; 4] {
        match self {
            FileKind::Text => b"FFFF",
            FileKind::String => b"0000",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FileKind::Text => "TEXT",
            FileKind::String => "STRING",
        };
        write!(f, "{s}")
    }
}

/// A named, sized slot of sign memory.
///
/// Construct with [`DisplayFile::text`] or [`DisplayFile::string`]; the
/// kind fixes the wire type code, the reserved allocation field, and the
/// default lock state. The size is the byte length of the file's content
/// and becomes a four-hex-digit field in the allocation record, so the
/// `u16` type covers exactly the representable range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFile {
    label: FileLabel,
    kind: FileKind,
    size: u16,
    lock_state: LockState,
}

impl DisplayFile {
    /// Create a TEXT file (unlocked by default).
    pub fn text(label: impl Into<FileLabel>, size: u16) -> Self {
        let kind = FileKind::Text;
        DisplayFile {
            label: label.into(),
            kind,
            size,
            lock_state: kind.default_lock_state(),
        }
    }

    /// Create a STRING file (locked by default).
    pub fn string(label: impl Into<FileLabel>, size: u16) -> Self {
        let kind = FileKind::String;
        DisplayFile {
            label: label.into(),
            kind,
            size,
            lock_state: kind.default_lock_state(),
        }
    }

    /// Override the kind-derived lock state.
    pub fn with_lock_state(mut self, lock_state: LockState) -> Self {
        self.lock_state = lock_state;
        self
    }

    /// The file's label.
    pub fn label(&self) -> FileLabel {
        self.label
    }

    /// The file's kind.
    pub fn kind(&self) -> FileKind {
        self.kind
    }

    /// Content size in bytes.
    pub fn size(&self) -> u16 {
        self.size
    }

    /// The file's lock state.
    pub fn lock_state(&self) -> LockState {
        self.lock_state
    }
}

impl fmt::Display for DisplayFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' ({} bytes, {})",
            self.kind, self.label, self.size, self.lock_state
        )
    }
}

/// An ordered run sequence: which files the sign displays, and in what
/// order.
///
/// The lock flag controls whether the sequence itself can later be changed
/// from the IR keyboard. Order is significant and is preserved verbatim on
/// the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSequence {
    labels: Vec<FileLabel>,
    locked: bool,
}

impl RunSequence {
    /// Create an empty sequence.
    pub fn new(locked: bool) -> Self {
        RunSequence {
            labels: Vec::new(),
            locked,
        }
    }

    /// Build a sequence from files, preserving slice order.
    pub fn from_files(files: &[DisplayFile], locked: bool) -> Self {
        RunSequence {
            labels: files.iter().map(|f| f.label()).collect(),
            locked,
        }
    }

    /// Append a label to the end of the sequence.
    pub fn push(&mut self, label: impl Into<FileLabel>) {
        self.labels.push(label.into());
    }

    /// The labels in display order.
    pub fn labels(&self) -> &[FileLabel] {
        &self.labels
    }

    /// Whether the sequence is locked against keyboard changes.
    pub fn locked(&self) -> bool {
        self.locked
    }

    /// Number of labels in the sequence.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` if the sequence contains no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---------------------------------------------------------------
    // Labels and lock states
    // ---------------------------------------------------------------

    #[test]
    fn label_round_trip() {
        let label = FileLabel::new(b'A');
        assert_eq!(label.as_byte(), b'A');
        assert_eq!(label.to_string(), "A");
    }

    #[test]
    fn label_from_u8() {
        let label: FileLabel = b'q'.into();
        assert_eq!(label.as_byte(), b'q');
    }

    #[test]
    fn label_display_escapes_non_printable() {
        let label = FileLabel::new(0x07);
        assert_eq!(label.to_string(), "\\x07");
    }

    #[test]
    fn lock_state_codes() {
        assert_eq!(LockState::Locked.code(), b'L');
        assert_eq!(LockState::Unlocked.code(), b'U');
    }

    // ---------------------------------------------------------------
    // File kinds
    // ---------------------------------------------------------------

    #[test]
    fn text_kind_wire_facts() {
        assert_eq!(FileKind::Text.type_code(), b'A');
        assert_eq!(FileKind::Text.default_lock_state(), LockState::Unlocked);
        assert_eq!(FileKind::Text.reserved_field(), b"FFFF");
    }

    #[test]
    fn string_kind_wire_facts() {
        assert_eq!(FileKind::String.type_code(), b'B');
        assert_eq!(FileKind::String.default_lock_state(), LockState::Locked);
        assert_eq!(FileKind::String.reserved_field(), b"0000");
    }

    // ---------------------------------------------------------------
    // Display files
    // ---------------------------------------------------------------

    #[test]
    fn text_file_defaults() {
        let file = DisplayFile::text(b'A', 256);
        assert_eq!(file.label().as_byte(), b'A');
        assert_eq!(file.kind(), FileKind::Text);
        assert_eq!(file.size(), 256);
        assert_eq!(file.lock_state(), LockState::Unlocked);
    }

    #[test]
    fn string_file_defaults() {
        let file = DisplayFile::string(b's', 64);
        assert_eq!(file.kind(), FileKind::String);
        assert_eq!(file.lock_state(), LockState::Locked);
    }

    #[test]
    fn lock_state_override() {
        let file = DisplayFile::text(b'A', 100).with_lock_state(LockState::Locked);
        assert_eq!(file.lock_state(), LockState::Locked);
        // The kind keeps reporting its own default; only this file changed.
        assert_eq!(file.kind().default_lock_state(), LockState::Unlocked);
    }

    #[test]
    fn display_file_format() {
        let file = DisplayFile::text(b'A', 256);
        assert_eq!(file.to_string(), "TEXT 'A' (256 bytes, unlocked)");
    }

    // ---------------------------------------------------------------
    // Run sequences
    // ---------------------------------------------------------------

    #[test]
    fn run_sequence_preserves_order() {
        let files = [
            DisplayFile::text(b'2', 100),
            DisplayFile::text(b'1', 100),
            DisplayFile::string(b'9', 32),
        ];
        let seq = RunSequence::from_files(&files, false);
        let labels: Vec<u8> = seq.labels().iter().map(|l| l.as_byte()).collect();
        assert_eq!(labels, b"219");
        assert!(!seq.locked());
    }

    #[test]
    fn run_sequence_push() {
        let mut seq = RunSequence::new(true);
        assert!(seq.is_empty());
        seq.push(b'A');
        seq.push(b'B');
        assert_eq!(seq.len(), 2);
        assert!(seq.locked());
    }
}
