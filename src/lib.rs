//! Modbus RTU bench library
//!
//! CRC-16/MODBUS checksums for raw RTU frames, plus a thin wrapper around the
//! host's serial port enumeration. The checksum engine is pure and holds no
//! state; everything else is plumbing for the `rtu-probe` binary.

pub mod cli;
pub mod config;
pub mod modbus;
pub mod output;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use modbus::{append_crc, checksum, crc16_modbus, verify_crc, with_crc, Frame};
pub use output::{ConsoleFormatter, JsonFormatter, ReportFormatter, ReportSender};
pub use ports::{PortDescriptor, PortLister, SystemPortLister};
pub use utils::error::ProbeError;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
