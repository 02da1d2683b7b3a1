use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::Path;

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}";

/// Initializes the logging system from `log4rs.yaml` in the working directory.
///
/// # Errors
/// Returns an error if the file is missing or invalid, or a logger is already set.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    init_path(Path::new("log4rs.yaml"))
}

/// Initializes the logging system from a specific config file path.
///
/// # Errors
/// Returns an error if the file is missing or invalid, or a logger is already set.
pub fn init_path(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    log4rs::init_file(path, log4rs::config::Deserializers::default())?;
    Ok(())
}

/// Parse `error|warn|info|debug|trace|off`; anything else is `info`.
pub fn parse_level(level: Option<&str>) -> LevelFilter {
    match level.unwrap_or("info").to_ascii_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Build a log4rs config: stderr always, plus `{dir}/bsonquery.log` when a
/// directory is given.
///
/// # Errors
/// Returns an error if the log file cannot be opened or the config is invalid.
pub fn build_config(
    dir: Option<&Path>,
    level: LevelFilter,
) -> Result<Config, Box<dyn std::error::Error>> {
    let console = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();
    let mut builder =
        Config::builder().appender(Appender::builder().build("stderr", Box::new(console)));
    let mut root = Root::builder().appender("stderr");
    if let Some(dir) = dir {
        std::fs::create_dir_all(dir)?;
        let file = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(PATTERN)))
            .build(dir.join("bsonquery.log"))?;
        builder = builder.appender(Appender::builder().build("file", Box::new(file)));
        root = root.appender("file");
    }
    let config = builder
        .logger(Logger::builder().build("bsonquery", level))
        .build(root.build(LevelFilter::Warn))?;
    Ok(config)
}

/// Configure logging globally for the process.
/// - dir: directory for `bsonquery.log`; if None, stderr only.
/// - level: error|warn|info|debug|trace for this crate's targets
///
/// # Errors
/// Returns an error if the config cannot be built or a logger is already set.
pub fn configure_logging(
    dir: Option<&Path>,
    level: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_config(dir, parse_level(level))?;
    log4rs::init_config(config)?;
    Ok(())
}
