use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Invalid input: no byte sequence supplied")]
    InvalidInput,

    #[error("Invalid hex frame: {0}")]
    InvalidHex(String),

    #[error("Frame too short: {0} bytes (need at least 3)")]
    FrameTooShort(usize),

    #[error("CRC checksum mismatch: expected 0x{expected:04X}, received 0x{received:04X}")]
    CrcMismatch { expected: u16, received: u16 },

    #[error("Port enumeration failed: {0}")]
    PortEnumeration(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl From<serialport::Error> for ProbeError {
    fn from(err: serialport::Error) -> Self {
        ProbeError::PortEnumeration(err.to_string())
    }
}

impl From<serde_json::Error> for ProbeError {
    fn from(err: serde_json::Error) -> Self {
        ProbeError::SerializationError(format!("JSON error: {}", err))
    }
}

impl From<toml::de::Error> for ProbeError {
    fn from(err: toml::de::Error) -> Self {
        ProbeError::ConfigError(format!("TOML parse error: {}", err))
    }
}

impl From<toml::ser::Error> for ProbeError {
    fn from(err: toml::ser::Error) -> Self {
        ProbeError::SerializationError(format!("TOML error: {}", err))
    }
}

impl From<hex::FromHexError> for ProbeError {
    fn from(err: hex::FromHexError) -> Self {
        ProbeError::InvalidHex(err.to_string())
    }
}

impl From<std::io::Error> for ProbeError {
    fn from(err: std::io::Error) -> Self {
        ProbeError::IoError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc_mismatch_message() {
        let err = ProbeError::CrcMismatch { expected: 0x4B49, received: 0x0000 };
        assert_eq!(
            err.to_string(),
            "CRC checksum mismatch: expected 0x4B49, received 0x0000"
        );
    }

    #[test]
    fn test_hex_error_conversion() {
        let err: ProbeError = hex::decode("0G").unwrap_err().into();
        assert!(matches!(err, ProbeError::InvalidHex(_)));
    }
}
