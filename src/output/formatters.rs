use chrono::Utc;

use crate::modbus::FrameReport;
use crate::ports::PortDescriptor;

pub trait ReportFormatter: Send + Sync {
    fn format_ports(&self, ports: &[PortDescriptor]) -> String;
    fn format_frame(&self, report: &FrameReport) -> String;
    fn format_checksum(&self, command: &str, crc: u16) -> String;
    fn format_verification(&self, framed: &str, crc: u16) -> String;
    fn format_header(&self) -> String;
}

/// Picks a formatter by name, falling back to the console layout.
pub fn formatter_for(name: &str) -> Box<dyn ReportFormatter> {
    match name {
        "json" => Box::new(JsonFormatter),
        _ => Box::new(ConsoleFormatter),
    }
}

fn hex_or_none(value: Option<u16>) -> String {
    match value {
        Some(v) => format!("0x{:x}", v),
        None => "None".to_string(),
    }
}

pub struct ConsoleFormatter;

impl ReportFormatter for ConsoleFormatter {
    fn format_ports(&self, ports: &[PortDescriptor]) -> String {
        if ports.is_empty() {
            return "⚠️  No serial ports found\n".to_string();
        }

        let mut output = String::new();
        for port in ports {
            output.push_str(&format!("Device: {}\n", port.device));
            output.push_str(&format!("  VID: {}\n", hex_or_none(port.vid)));
            output.push_str(&format!("  PID: {}\n", hex_or_none(port.pid)));
            output.push_str(&format!(
                "  Serial: {}\n",
                port.serial_number.as_deref().unwrap_or("None")
            ));
            if let Some(manufacturer) = &port.manufacturer {
                output.push_str(&format!("  Manufacturer: {}\n", manufacturer));
            }
            if let Some(product) = &port.product {
                output.push_str(&format!("  Product: {}\n", product));
            }
        }
        output
    }

    fn format_frame(&self, report: &FrameReport) -> String {
        format!(
            "📊 Command: [{}]\n\
            🔢 CRC: {} (Low: {}, High: {})\n\
            📤 Frame: [{}] ({} bytes)\n",
            report.command,
            report.crc,
            report.crc_low,
            report.crc_high,
            report.framed,
            report.length
        )
    }

    fn format_checksum(&self, _command: &str, crc: u16) -> String {
        format!("0x{:04X}\n", crc)
    }

    fn format_verification(&self, framed: &str, crc: u16) -> String {
        format!("✅ CRC OK: [{}] carries 0x{:04X}\n", framed, crc)
    }

    fn format_header(&self) -> String {
        format!("🚀 RTU Probe - {}\n", Utc::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

pub struct JsonFormatter;

impl ReportFormatter for JsonFormatter {
    fn format_ports(&self, ports: &[PortDescriptor]) -> String {
        let result = serde_json::json!({
            "timestamp": Utc::now().timestamp(),
            "ports": ports,
        });

        serde_json::to_string_pretty(&result).unwrap_or_default()
    }

    fn format_frame(&self, report: &FrameReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_default()
    }

    fn format_checksum(&self, command: &str, crc: u16) -> String {
        let result = serde_json::json!({
            "command": command,
            "crc": crc,
            "crc_hex": format!("0x{:04X}", crc),
        });

        serde_json::to_string_pretty(&result).unwrap_or_default()
    }

    fn format_verification(&self, framed: &str, crc: u16) -> String {
        let result = serde_json::json!({
            "frame": framed,
            "valid": true,
            "crc": crc,
        });

        serde_json::to_string_pretty(&result).unwrap_or_default()
    }

    fn format_header(&self) -> String {
        String::new() // JSON doesn't need headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modbus::Frame;
    use crate::ports::{PortDescriptor, PortKind};

    fn ftdi() -> PortDescriptor {
        PortDescriptor {
            device: "/dev/ttyUSB0".to_string(),
            kind: PortKind::Usb,
            vid: Some(0x0403),
            pid: Some(0x6001),
            serial_number: Some("A10K3XYZ".to_string()),
            manufacturer: None,
            product: None,
        }
    }

    #[test]
    fn test_console_ports_layout() {
        let ports = vec![ftdi(), PortDescriptor::new("/dev/ttyS0", PortKind::Unknown)];
        let output = ConsoleFormatter.format_ports(&ports);
        assert_eq!(
            output,
            "Device: /dev/ttyUSB0\n  VID: 0x403\n  PID: 0x6001\n  Serial: A10K3XYZ\n\
             Device: /dev/ttyS0\n  VID: None\n  PID: None\n  Serial: None\n"
        );
    }

    #[test]
    fn test_console_no_ports() {
        assert!(ConsoleFormatter.format_ports(&[]).contains("No serial ports found"));
    }

    #[test]
    fn test_json_ports() {
        let output = JsonFormatter.format_ports(&[ftdi()]);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["ports"][0]["device"], "/dev/ttyUSB0");
        assert_eq!(value["ports"][0]["vid"], 0x0403);
        assert_eq!(value["ports"][0]["kind"], "usb");
        assert!(value["ports"][0]["manufacturer"].is_null());
    }

    #[test]
    fn test_console_frame() {
        let output = ConsoleFormatter.format_frame(&Frame::reference().report());
        assert!(output.contains("CRC: 0x4B49 (Low: 0x49, High: 0x4B)"));
        assert!(output.contains("[01 FA 0E 01 00 49 4B] (7 bytes)"));
    }

    #[test]
    fn test_json_checksum() {
        let output = JsonFormatter.format_checksum("01 FA 0E 01 00", 0x4B49);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["crc"], 0x4B49);
        assert_eq!(value["crc_hex"], "0x4B49");
    }

    #[test]
    fn test_formatter_for_falls_back_to_console() {
        assert_eq!(formatter_for("anything").format_checksum("", 0xFFFF), "0xFFFF\n");
        assert!(formatter_for("json").format_header().is_empty());
    }
}
