use log::{debug, info};
use serde::Serialize;
use serialport::SerialPortType;

use crate::utils::error::ProbeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortKind {
    Usb,
    Pci,
    Bluetooth,
    Unknown,
}

/// One serial port as reported by the host. USB fields are `None` for other kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortDescriptor {
    pub device: String,
    pub kind: PortKind,
    pub vid: Option<u16>,
    pub pid: Option<u16>,
    pub serial_number: Option<String>,
    pub manufacturer: Option<String>,
    pub product: Option<String>,
}

impl PortDescriptor {
    pub fn new(device: &str, kind: PortKind) -> Self {
        Self {
            device: device.to_string(),
            kind,
            vid: None,
            pid: None,
            serial_number: None,
            manufacturer: None,
            product: None,
        }
    }

    pub fn is_usb(&self) -> bool {
        self.kind == PortKind::Usb
    }
}

impl From<serialport::SerialPortInfo> for PortDescriptor {
    fn from(info: serialport::SerialPortInfo) -> Self {
        match info.port_type {
            SerialPortType::UsbPort(usb) => Self {
                device: info.port_name,
                kind: PortKind::Usb,
                vid: Some(usb.vid),
                pid: Some(usb.pid),
                serial_number: usb.serial_number,
                manufacturer: usb.manufacturer,
                product: usb.product,
            },
            SerialPortType::PciPort => Self::new(&info.port_name, PortKind::Pci),
            SerialPortType::BluetoothPort => Self::new(&info.port_name, PortKind::Bluetooth),
            _ => Self::new(&info.port_name, PortKind::Unknown),
        }
    }
}

pub trait PortLister {
    fn list_ports(&self) -> Result<Vec<PortDescriptor>, ProbeError>;
}

/// Enumerates the host's serial ports through the `serialport` crate.
#[derive(Debug, Default)]
pub struct SystemPortLister;

impl PortLister for SystemPortLister {
    fn list_ports(&self) -> Result<Vec<PortDescriptor>, ProbeError> {
        let mut ports: Vec<PortDescriptor> = serialport::available_ports()?
            .into_iter()
            .map(PortDescriptor::from)
            .collect();
        ports.sort_by(|a, b| a.device.cmp(&b.device));

        info!("📡 Found {} serial port(s)", ports.len());
        for port in &ports {
            debug!("   {} ({:?})", port.device, port.kind);
        }
        Ok(ports)
    }
}

pub fn filter_ports(ports: Vec<PortDescriptor>, usb_only: bool) -> Vec<PortDescriptor> {
    if !usb_only {
        return ports;
    }
    ports.into_iter().filter(PortDescriptor::is_usb).collect()
}
