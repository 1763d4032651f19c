pub mod settings;

pub use settings::{
    Config,
    FileOutputConfig,
    FrameConfig,
    LoggingConfig,
    OutputConfig,
    PortsConfig,
    DEFAULT_CONFIG_PATH,
};
