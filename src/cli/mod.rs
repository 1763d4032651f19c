pub mod commands;

use clap::{Arg, ArgAction, Command};

pub use commands::handle_subcommands;

fn frame_arg(required: bool) -> Arg {
    Arg::new("frame")
        .help("Frame bytes in hex, e.g. \"01 FA 0E 01 00\" or 0x01,0xFA,0x0E,0x01,0x00")
        .required(required)
}

pub fn build_cli() -> Command {
    Command::new("rtu-probe")
        .version(crate::VERSION)
        .about("Modbus RTU frame checksums and serial port listing")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("TOML configuration file")
                .global(true),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_parser(["console", "json"])
                .help("Output format")
                .global(true),
        )
        .arg(
            Arg::new("output-file")
                .short('o')
                .long("output-file")
                .value_name("PATH")
                .help("Also append results to this file")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Enable debug logging")
                .global(true),
        )
        .subcommand(
            Command::new("crc")
                .about("Print the CRC-16/MODBUS checksum of a frame")
                .arg(frame_arg(false)),
        )
        .subcommand(
            Command::new("frame")
                .about("Append the checksum to a frame and print the result")
                .arg(frame_arg(false)),
        )
        .subcommand(
            Command::new("verify")
                .about("Check the trailing checksum of a captured frame")
                .arg(frame_arg(true)),
        )
        .subcommand(
            Command::new("ports")
                .about("List available serial ports")
                .arg(
                    Arg::new("usb-only")
                        .long("usb-only")
                        .action(ArgAction::SetTrue)
                        .help("Only show USB serial adapters"),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Manage the configuration file")
                .subcommand_required(true)
                .subcommand(
                    Command::new("init")
                        .about("Write the default configuration")
                        .arg(Arg::new("path").value_name("PATH"))
                        .arg(
                            Arg::new("force")
                                .long("force")
                                .action(ArgAction::SetTrue)
                                .help("Overwrite an existing file"),
                        ),
                )
                .subcommand(Command::new("show").about("Print the effective configuration")),
        )
}
