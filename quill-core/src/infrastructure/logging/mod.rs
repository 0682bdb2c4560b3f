//! Logging setup using `log` + `log4rs`.

use log::LevelFilter;
use log4rs::{
    append::{
        console::{ConsoleAppender, Target},
        rolling_file::{
            policy::compound::{roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger, CompoundPolicy},
            RollingFileAppender,
        },
    },
    config::{Appender, Logger, Root},
    encode::pattern::PatternEncoder,
    Config,
};
use std::io::IsTerminal;
use std::path::PathBuf;

const CONSOLE_APPENDER: &str = "stderr";
const FILE_APPENDER: &str = "log_file";

const LOG_FILE_NAME: &str = "quill.log";
const LOG_FILE_MAX_SIZE: u64 = 50_000_000;
const LOG_FILE_MAX_ROLLS: u32 = 5;

const LINE_PATTERN_COLORED: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{h({l:5})}] {m} [{M}]{n}";
const LINE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l:5}] {m} [{M}]{n}";

/// Crates logged at the requested app level by default. Everything else is
/// off unless opted in via `<crate>=<level>` or `root=<level>`.
const WHITELISTED_CRATES: &[&str] = &["quill_core", "quill_service"];

/// Initializes the global logger. Console output goes to stderr; when
/// `log_dir` is set, a size-rotated file appender is added as well.
///
/// `filters` is a comma-separated expression: a bare level sets the app
/// level for the quill crates ("debug"), `module=level` pairs opt in other
/// crates, and `root=level` opens the floodgates for everything.
/// Repeated calls are ignored.
pub fn init_logger(log_dir: Option<&str>, filters: &str) {
    let app_level = parse_app_level(filters);
    let root_level = parse_root_override(filters).unwrap_or(LevelFilter::Off);
    let module_levels = parse_module_levels(filters);

    let console_pattern = if std::io::stderr().is_terminal() { LINE_PATTERN_COLORED } else { LINE_PATTERN };
    let console = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(console_pattern)))
        .build();

    let mut config_builder = Config::builder().appender(Appender::builder().build(CONSOLE_APPENDER, Box::new(console)));
    let mut appenders: Vec<&str> = vec![CONSOLE_APPENDER];

    if let Some(dir) = log_dir.map(str::trim).filter(|dir| !dir.is_empty()) {
        let log_path = PathBuf::from(dir).join(LOG_FILE_NAME);
        let archive = PathBuf::from(dir).join(format!("{LOG_FILE_NAME}.{{}}.gz"));

        let roller = FixedWindowRoller::builder()
            .base(1)
            .build(archive.to_str().unwrap_or("quill.log.{}.gz"), LOG_FILE_MAX_ROLLS)
            .unwrap();
        let policy = CompoundPolicy::new(Box::new(SizeTrigger::new(LOG_FILE_MAX_SIZE)), Box::new(roller));
        let file_appender = RollingFileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LINE_PATTERN)))
            .build(log_path, Box::new(policy))
            .unwrap();

        config_builder = config_builder.appender(Appender::builder().build(FILE_APPENDER, Box::new(file_appender)));
        appenders.push(FILE_APPENDER);
    }

    let appender_names: Vec<String> = appenders.iter().map(|name| (*name).to_string()).collect();

    for crate_name in WHITELISTED_CRATES {
        if !module_levels.iter().any(|(module, _)| module == crate_name) {
            config_builder = config_builder
                .logger(Logger::builder().appenders(appender_names.clone()).additive(false).build(*crate_name, app_level));
        }
    }

    for (module, level) in &module_levels {
        config_builder =
            config_builder.logger(Logger::builder().appenders(appender_names.clone()).additive(false).build(module, *level));
    }

    let config = config_builder.build(Root::builder().appenders(appenders).build(root_level)).unwrap();
    let _ = log4rs::init_config(config);
}

fn parse_app_level(filters: &str) -> LevelFilter {
    filters
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty() && !part.contains('='))
        .find_map(|part| part.parse().ok())
        .unwrap_or(LevelFilter::Info)
}

fn parse_root_override(filters: &str) -> Option<LevelFilter> {
    parse_pairs(filters).find_map(|(module, level)| (module == "root").then_some(level))
}

fn parse_module_levels(filters: &str) -> Vec<(String, LevelFilter)> {
    parse_pairs(filters).filter(|(module, _)| module != "root").collect()
}

fn parse_pairs(filters: &str) -> impl Iterator<Item = (String, LevelFilter)> + '_ {
    filters.split(',').filter_map(|part| {
        let (module, level) = part.split_once('=')?;
        let module = module.trim();
        if module.is_empty() {
            return None;
        }
        Some((module.to_string(), level.trim().parse().ok()?))
    })
}
