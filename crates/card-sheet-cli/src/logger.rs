use chrono::Local;
use log::{LevelFilter, Metadata, Record};
use std::io::Write;

/// Writes timestamped records to stderr so stdout stays clean for reports
pub struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    /// 0 = warnings, 1 = info, 2 = debug, 3+ = trace
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        Self { level }
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let mut stderr = std::io::stderr().lock();
            // nowhere left to report a failed write to stderr
            let _ = writeln!(
                stderr,
                "{} {:<5} [{}] {}",
                Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
