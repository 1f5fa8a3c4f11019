use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::rolling_file::policy::compound::roll::fixed_window::FixedWindowRoller;
use log4rs::append::rolling_file::policy::compound::trigger::size::SizeTrigger;
use log4rs::append::rolling_file::policy::compound::CompoundPolicy;
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Config;
use crate::errors::ConfigError;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} - {l} - {m}{n}";
const LOG_FILE_MAX_BYTES: u64 = 10_000;

/// Sets up the global logger with a size rolled log file and optionally stdout
///
/// # Arguments
///
/// * 'log_path' - path of the log file, one rolled backup is kept next to it
/// * 'level' - log level filter
/// * 'log_to_stdout' - whether to also log to stdout
pub fn setup_logger(log_path: &str, level: LevelFilter, log_to_stdout: bool) -> Result<(), ConfigError> {
    let roller = FixedWindowRoller::builder()
        .base(1)
        .build(&format!("{}.{{}}", log_path), 1)
        .map_err(|e| ConfigError(e.to_string()))?;
    let policy = CompoundPolicy::new(
        Box::new(SizeTrigger::new(LOG_FILE_MAX_BYTES)),
        Box::new(roller),
    );

    let file = RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(log_path, Box::new(policy))?;

    let mut builder = Config::builder()
        .appender(Appender::builder().build("file", Box::new(file)));
    let mut root = Root::builder().appender("file");

    if log_to_stdout {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build();
        builder = builder.appender(Appender::builder().build("stdout", Box::new(stdout)));
        root = root.appender("stdout");
    }

    let config = builder.build(root.build(level))?;
    log4rs::init_config(config)?;

    Ok(())
}
