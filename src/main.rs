use anyhow::{Context, Result};
use log::{debug, error, info};

use rtu_probe::cli::{build_cli, handle_subcommands};
use rtu_probe::output::{ConsoleSender, FileSender, ReportSender};
use rtu_probe::{Config, SystemPortLister};

fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    env_logger::Builder::from_env(env)
        .format_target(false)
        .init();
}

fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    let config_path = matches.get_one::<String>("config").map(String::as_str);
    let mut config = Config::load(config_path).context("Failed to load configuration")?;
    config
        .apply_matches(&matches)
        .context("Invalid command line options")?;

    init_logging(&config.logging.level);
    match Config::source(config_path) {
        Some(path) => info!("⚙️  Loaded configuration from {}", path.display()),
        None => debug!("No config file, using defaults"),
    }
    debug!("Effective configuration: {:?}", config);

    let mut senders: Vec<Box<dyn ReportSender>> = vec![Box::new(ConsoleSender)];
    if let Some(file) = config.file_output() {
        senders.push(Box::new(FileSender::new(&file.path, file.append)));
    }

    if let Err(e) = handle_subcommands(&matches, &config, &SystemPortLister, &senders) {
        error!("❌ {}", e);
        return Err(e.into());
    }

    Ok(())
}
