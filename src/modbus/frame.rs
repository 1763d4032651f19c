use log::debug;
use serde::Serialize;

use super::crc::{crc16_modbus, crc_bytes};
use crate::utils::error::ProbeError;

/// The command used on the bench: address 0x01, function 0xFA, three argument bytes.
pub const REFERENCE_COMMAND: [u8; 5] = [0x01, 0xFA, 0x0E, 0x01, 0x00];

/// A command awaiting transmission. The checksum always covers the whole
/// command, address byte included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    command: Vec<u8>,
}

/// Serializable summary of a framed command, used by the formatters.
#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    pub command: String,
    pub crc: String,
    pub crc_low: String,
    pub crc_high: String,
    pub framed: String,
    pub length: usize,
}

impl Frame {
    pub fn new(command: Vec<u8>) -> Self {
        Self { command }
    }

    pub fn reference() -> Self {
        Self::new(REFERENCE_COMMAND.to_vec())
    }

    /// Parses `"01 FA 0E 01 00"`, `"0x01,0xFA,..."`, `"01:FA"` or `"01FA0E0100"`.
    pub fn from_hex(input: &str) -> Result<Self, ProbeError> {
        let command = parse_hex(input)?;
        debug!("Parsed {} command bytes from {:?}", command.len(), input);
        Ok(Self::new(command))
    }

    pub fn command(&self) -> &[u8] {
        &self.command
    }

    pub fn crc(&self) -> u16 {
        crc16_modbus(&self.command)
    }

    /// Command followed by the checksum, low byte first.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = self.command.clone();
        bytes.extend_from_slice(&crc_bytes(self.crc()));
        bytes
    }

    /// Length on the wire.
    pub fn len(&self) -> usize {
        self.command.len() + 2
    }

    /// No command bytes. The checksum bytes are still sent.
    pub fn is_empty(&self) -> bool {
        self.command.is_empty()
    }

    pub fn to_hex(&self) -> String {
        format_hex(&self.to_bytes())
    }

    pub fn report(&self) -> FrameReport {
        let crc = self.crc();
        let [low, high] = crc_bytes(crc);
        FrameReport {
            command: format_hex(&self.command),
            crc: format!("0x{:04X}", crc),
            crc_low: format!("0x{:02X}", low),
            crc_high: format!("0x{:02X}", high),
            framed: self.to_hex(),
            length: self.len(),
        }
    }
}

/// Accepts whitespace, commas and colons as separators. Each token is decoded on
/// its own: `0x`-prefixed tokens may carry a single digit (`0xE`), every other
/// token needs an even number of digits.
pub fn parse_hex(input: &str) -> Result<Vec<u8>, ProbeError> {
    let mut bytes = Vec::with_capacity(input.len() / 2);

    for token in input.split(|c: char| c.is_whitespace() || matches!(c, ',' | ':')) {
        if token.is_empty() {
            continue;
        }

        let (digits, prefixed) = match token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
        {
            Some(rest) => (rest, true),
            None => (token, false),
        };

        if prefixed && digits.len() == 1 {
            bytes.extend(hex::decode(format!("0{}", digits))?);
            continue;
        }

        if digits.is_empty() || digits.len() % 2 != 0 {
            return Err(ProbeError::InvalidHex(format!(
                "token {:?} in {:?} is not a whole number of bytes",
                token, input
            )));
        }
        bytes.extend(hex::decode(digits)?);
    }

    Ok(bytes)
}

/// Upper-case, space separated.
pub fn format_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
