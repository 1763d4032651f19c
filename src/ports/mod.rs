pub mod lister;

pub use lister::{filter_ports, PortDescriptor, PortKind, PortLister, SystemPortLister};
