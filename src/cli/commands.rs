use clap::ArgMatches;
use log::{debug, info, warn};
use std::path::Path;

use crate::config::{Config, DEFAULT_CONFIG_PATH};
use crate::modbus::frame::{format_hex, parse_hex};
use crate::modbus::{checksum, verify_crc, Frame};
use crate::output::{formatter_for, ReportSender};
use crate::ports::{filter_ports, PortLister};
use crate::utils::error::ProbeError;

fn send_all(senders: &[Box<dyn ReportSender>], report: &str) -> Result<(), ProbeError> {
    for sender in senders {
        debug!("Sending report to {} ({})", sender.destination(), sender.sender_type());
        sender.send(report)?;
    }
    Ok(())
}

/// Frame bytes from the command line, else the configured default. `None` when neither is set.
fn resolve_command(matches: &ArgMatches, config: &Config) -> Result<Option<Vec<u8>>, ProbeError> {
    let source = matches
        .get_one::<String>("frame")
        .map(String::as_str)
        .or_else(|| config.default_command());

    if source.is_none() {
        warn!("No frame given and frame.default_command is not set");
    }
    source.map(parse_hex).transpose()
}

pub fn handle_subcommands(
    matches: &ArgMatches,
    config: &Config,
    lister: &dyn PortLister,
    senders: &[Box<dyn ReportSender>],
) -> Result<(), ProbeError> {
    let formatter = formatter_for(&config.output.default_format);

    match matches.subcommand() {
        Some(("crc", sub)) => {
            let command = resolve_command(sub, config)?;
            let crc = checksum(command.as_deref())?;
            let shown = command.as_deref().map(format_hex).unwrap_or_default();
            info!("🔢 CRC of [{}] is 0x{:04X}", shown, crc);
            send_all(senders, &formatter.format_checksum(&shown, crc))
        }
        Some(("frame", sub)) => {
            let command = resolve_command(sub, config)?.ok_or(ProbeError::InvalidInput)?;
            let frame = Frame::new(command);
            info!("📤 Framed {} command bytes", frame.command().len());
            send_all(senders, &formatter.format_frame(&frame.report()))
        }
        Some(("verify", sub)) => {
            let framed = sub
                .get_one::<String>("frame")
                .map(|s| parse_hex(s))
                .transpose()?
                .ok_or(ProbeError::InvalidInput)?;
            let crc = verify_crc(&framed)?;
            send_all(senders, &formatter.format_verification(&format_hex(&framed), crc))
        }
        Some(("ports", sub)) => {
            let usb_only = sub.get_flag("usb-only") || config.ports.usb_only;
            let ports = filter_ports(lister.list_ports()?, usb_only);

            // Header and listing must be a single send
            let mut report = formatter.format_header();
            report.push_str(&formatter.format_ports(&ports));
            send_all(senders, &report)
        }
        Some(("config", sub)) => handle_config(sub, config, senders),
        _ => Err(ProbeError::InvalidInput),
    }
}

fn handle_config(
    matches: &ArgMatches,
    config: &Config,
    senders: &[Box<dyn ReportSender>],
) -> Result<(), ProbeError> {
    match matches.subcommand() {
        Some(("init", sub)) => {
            let path = sub
                .get_one::<String>("path")
                .map(String::as_str)
                .unwrap_or(DEFAULT_CONFIG_PATH);

            if Path::new(path).exists() && !sub.get_flag("force") {
                return Err(ProbeError::ConfigError(format!(
                    "{} already exists, use --force to overwrite",
                    path
                )));
            }

            Config::default().save_to_file(path)?;
            info!("✅ Wrote default configuration to {}", path);
            send_all(senders, &format!("✅ Wrote {}\n", path))
        }
        Some(("show", _)) => {
            let content = toml::to_string_pretty(config)?;
            send_all(senders, &content)
        }
        _ => Err(ProbeError::InvalidInput),
    }
}
