use crate::error::{ClientError, Result};
use serde::Deserialize;

pub const REGISTER_COUNT: usize = 16;
pub const SP: usize = 13;
pub const PC: usize = 15;

/// Separates the encoded word from the decoded text in a disassembly entry.
const FIELD_SEPARATOR: &str = "||";

bitflags::bitflags! {
    /// CPSR condition flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ConditionFlags: u8 {
        const N = 0b1000;
        const Z = 0b0100;
        const C = 0b0010;
        const V = 0b0001;
    }
}

impl ConditionFlags {
    /// Flags in the order the simulator lists them.
    pub const ORDER: [(char, ConditionFlags); 4] = [
        ('N', ConditionFlags::N),
        ('Z', ConditionFlags::Z),
        ('C', ConditionFlags::C),
        ('V', ConditionFlags::V),
    ];

    fn from_bools(bits: [bool; 4]) -> Self {
        Self::ORDER
            .iter()
            .zip(bits)
            .filter(|(_, set)| *set)
            .fold(ConditionFlags::empty(), |acc, ((_, flag), _)| acc | *flag)
    }
}

/// One line of the disassembly window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub encoded: u32,
    pub mnemonic: String,
    pub arguments: String,
}

impl Instruction {
    /// Parses `"<hex>||<mnemonic> <args>"`. An empty entry is a blank slot.
    pub fn parse(entry: &str) -> Result<Option<Self>> {
        if entry.is_empty() {
            return Ok(None);
        }
        let (hex, decoded) = entry.split_once(FIELD_SEPARATOR).ok_or_else(|| {
            ClientError::malformed(format!("disassembly entry '{entry}' has no '||'"))
        })?;
        let hex = hex.trim();
        let encoded = u32::from_str_radix(hex.strip_prefix("0x").unwrap_or(hex), 16).map_err(|_| {
            ClientError::malformed(format!("disassembly word '{hex}' is not hexadecimal"))
        })?;
        let (mnemonic, arguments) = decoded.split_once(' ').unwrap_or((decoded, ""));
        Ok(Some(Self {
            encoded,
            mnemonic: mnemonic.to_string(),
            arguments: arguments.to_string(),
        }))
    }
}

/// Simulator state as sent in one `update` message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub flags: ConditionFlags,
    pub registers: [u32; REGISTER_COUNT],
    pub memory: Vec<u8>,
    pub disassembly: Vec<Option<Instruction>>,
    pub stack: Vec<u32>,
    pub checksum: i32,
    pub mode: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawSnapshot {
    flags: Vec<bool>,
    registers: Vec<u32>,
    memory: Vec<u8>,
    disassembly: Vec<String>,
    stack: Vec<u32>,
    checksum: i32,
    mode: String,
}

impl Snapshot {
    /// Decodes the JSON text carried by an `update` envelope.
    ///
    /// Any missing field or layout violation fails the whole snapshot; nothing
    /// partially decoded is returned.
    pub fn decode(text: &str) -> Result<Self> {
        let raw: RawSnapshot =
            serde_json::from_str(text).map_err(|e| ClientError::decode("snapshot", e))?;

        let flag_count = raw.flags.len();
        let flags: [bool; 4] = raw.flags.try_into().map_err(|_| {
            ClientError::malformed(format!("expected 4 condition flags, got {flag_count}"))
        })?;
        let register_count = raw.registers.len();
        let registers: [u32; REGISTER_COUNT] = raw.registers.try_into().map_err(|_| {
            ClientError::malformed(format!(
                "expected {REGISTER_COUNT} registers, got {register_count}"
            ))
        })?;
        let disassembly = raw
            .disassembly
            .iter()
            .map(|entry| Instruction::parse(entry))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            flags: ConditionFlags::from_bools(flags),
            registers,
            memory: raw.memory,
            disassembly,
            stack: raw.stack,
            checksum: raw.checksum,
            mode: raw.mode,
        })
    }

    pub fn pc(&self) -> u32 {
        self.registers[PC]
    }

    pub fn sp(&self) -> u32 {
        self.registers[SP]
    }
}
