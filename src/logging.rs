use std::{
    io::{self, Write as _},
    sync::{OnceLock, RwLock},
    time::Instant,
};

use log::{Level, LevelFilter, Log, Metadata, Record};

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

pub fn get_logger() -> &'static StderrLogger {
    LOGGER.get_or_init(|| StderrLogger::new(Level::Warn))
}

/// Installs the stderr logger. Calling it again only changes the level.
pub fn init(level: Level) {
    let logger = get_logger();
    logger.set_min_level(level);

    if log::set_logger(logger).is_ok() {
        log::set_max_level(LevelFilter::Trace);
    }
}

/// Maps repeated `-v` flags to a level, starting from warnings.
pub fn level_from_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::Warn,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    }
}

pub struct StderrLogger {
    min_level: RwLock<Level>,
    started: Instant,
}

impl StderrLogger {
    fn new(min_level: Level) -> Self {
        Self {
            min_level: RwLock::new(min_level),
            started: Instant::now(),
        }
    }

    pub fn min_level(&self) -> Level {
        // a poisoned lock still holds a valid level
        *self.min_level.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_min_level(&self, level: Level) {
        *self.min_level.write().unwrap_or_else(|e| e.into_inner()) = level;
    }

    fn format(&self, record: &Record) -> String {
        format!(
            "[{:>8.3}s {:<5} {}] {}",
            self.started.elapsed().as_secs_f32(),
            record.level(),
            record.module_path().unwrap_or("unknown"),
            record.args()
        )
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.min_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _ = writeln!(io::stderr().lock(), "{}", self.format(record));
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}
