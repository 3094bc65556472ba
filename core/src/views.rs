//! Render-ready projections of a [`Snapshot`].
//!
//! Every function here is pure; the frontend only lays the strings out.

use crate::snapshot::{ConditionFlags, Instruction, Snapshot};

/// Bytes per memory row.
pub const ROW_WIDTH: usize = 16;

/// The executing instruction sits two words behind the fetched PC.
pub const PIPELINE_OFFSET: u32 = 8;

const WORD: u32 = 4;

/// `0x` followed by exactly eight hex digits.
pub fn hex_word(value: u32) -> String {
    format!("0x{value:08x}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRow {
    pub label: String,
    pub value: String,
}

pub fn registers(values: &[u32]) -> Vec<RegisterRow> {
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| RegisterRow {
            label: format!("r{i}"),
            value: hex_word(value),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagCell {
    pub name: char,
    pub set: bool,
}

pub fn flags(flags: ConditionFlags) -> Vec<FlagCell> {
    ConditionFlags::ORDER
        .iter()
        .map(|&(name, flag)| FlagCell {
            name,
            set: flags.contains(flag),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisassemblyLine {
    pub address: String,
    pub encoded: String,
    pub mnemonic: String,
    pub arguments: String,
    pub current: bool,
}

/// Lays the window out from `pc - 8`, one word per shown entry.
///
/// Blank slots and entries without decoded text are dropped without taking
/// an address.
pub fn disassembly(entries: &[Option<Instruction>], pc: u32) -> Vec<DisassemblyLine> {
    let mut address = pc.wrapping_sub(PIPELINE_OFFSET);
    let mut lines = Vec::with_capacity(entries.len());
    for insn in entries.iter().flatten() {
        if insn.mnemonic.is_empty() {
            continue;
        }
        lines.push(DisassemblyLine {
            address: hex_word(address),
            encoded: hex_word(insn.encoded),
            mnemonic: insn.mnemonic.clone(),
            arguments: insn.arguments.clone(),
            current: address == pc,
        });
        address = address.wrapping_add(WORD);
    }
    lines
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryRow {
    pub address: String,
    pub bytes: Vec<String>,
    pub ascii: String,
}

impl MemoryRow {
    /// Byte column as shown: two-digit values separated by spaces.
    pub fn hex(&self) -> String {
        self.bytes.join(" ")
    }
}

fn printable(byte: u8) -> char {
    match byte {
        0x00..=0x1f | 0x80..=0xff => '.',
        _ => byte as char,
    }
}

pub fn memory(bytes: &[u8]) -> Vec<MemoryRow> {
    bytes
        .chunks(ROW_WIDTH)
        .enumerate()
        .map(|(i, chunk)| MemoryRow {
            address: hex_word((i * ROW_WIDTH) as u32),
            bytes: chunk.iter().map(|b| format!("{b:02x}")).collect(),
            ascii: chunk.iter().copied().map(printable).collect(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackRow {
    pub address: String,
    pub value: String,
}

pub fn stack(words: &[u32], sp: u32) -> Vec<StackRow> {
    words
        .iter()
        .enumerate()
        .map(|(i, &word)| StackRow {
            address: hex_word(sp.wrapping_add(WORD.wrapping_mul(i as u32))),
            value: hex_word(word),
        })
        .collect()
}

/// All projections of one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotView {
    pub flags: Vec<FlagCell>,
    pub registers: Vec<RegisterRow>,
    pub disassembly: Vec<DisassemblyLine>,
    pub memory: Vec<MemoryRow>,
    pub stack: Vec<StackRow>,
    pub checksum: String,
    pub mode: String,
}

impl From<&Snapshot> for SnapshotView {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            flags: flags(snapshot.flags),
            registers: registers(&snapshot.registers),
            disassembly: disassembly(&snapshot.disassembly, snapshot.pc()),
            memory: memory(&snapshot.memory),
            stack: stack(&snapshot.stack, snapshot.sp()),
            checksum: format!("Checksum: {}", snapshot.checksum),
            mode: format!("Mode: {}", snapshot.mode),
        }
    }
}
