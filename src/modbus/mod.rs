pub mod crc;
pub mod frame;

pub use crc::{append_crc, checksum, crc16_modbus, crc_bytes, verify_crc, with_crc};
pub use frame::{Frame, FrameReport, REFERENCE_COMMAND};
