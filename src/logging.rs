//! log4rs initialisation.

use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::Path;

/// Optional log4rs file config, used when present.
pub const LOG_CONFIG_FILE: &str = "log4rs.yml";
/// Level override for the built-in console config.
pub const ENV_LOG_LEVEL: &str = "STARLINK_POP_LOG";

const CONSOLE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {h({l:5})} {t} - {m}{n}";

/// Parse a level name, defaulting to `Info`.
pub fn level_from(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Initialise logging from `log4rs.yml` if it exists, else log to stderr.
pub fn init_logging() -> Result<(), Box<dyn Error>> {
    if Path::new(LOG_CONFIG_FILE).exists() {
        log4rs::init_file(LOG_CONFIG_FILE, Default::default())
            .map_err(|e| format!("Error initializing log4rs from {LOG_CONFIG_FILE}: {e}"))?;
        return Ok(());
    }

    let level = level_from(std::env::var(ENV_LOG_LEVEL).ok().as_deref());
    let stderr = ConsoleAppender::builder()
        .target(log4rs::append::console::Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(CONSOLE_PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    log4rs::init_config(config)?;
    Ok(())
}
