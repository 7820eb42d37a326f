use std::io::{IsTerminal, Write};

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Writes `[LEVEL]: message` lines for the sheetjson crates to stderr.
struct ConsoleLogger {
    color: bool,
}

static PLAIN: ConsoleLogger = ConsoleLogger { color: false };
static COLORED: ConsoleLogger = ConsoleLogger { color: true };

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.target().starts_with("sheetjson") && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record.level(), &record.args().to_string(), self.color);
        // Ignore a closed stderr.
        let _ = writeln!(std::io::stderr().lock(), "{line}");
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn format_line(level: Level, message: &str, color: bool) -> String {
    if !color {
        return format!("[{level}]: {message}");
    }
    let code = match level {
        Level::Error => "31",
        Level::Warn => "33",
        Level::Info => "0",
        Level::Debug => "36",
        Level::Trace => "90",
    };
    format!("\x1b[{code}m[{level}]: {message}\x1b[0m")
}

/// Install the console logger. Later calls only adjust the level.
pub fn init(level: LevelFilter) {
    let logger = if std::io::stderr().is_terminal() {
        &COLORED
    } else {
        &PLAIN
    };
    let _ = log::set_logger(logger);
    log::set_max_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_carry_the_level() {
        assert_eq!(
            format_line(Level::Warn, "duplicate key", false),
            "[WARN]: duplicate key"
        );
    }

    #[test]
    fn colored_lines_reset_at_the_end() {
        let line = format_line(Level::Error, "boom", true);
        assert!(line.starts_with("\x1b[31m[ERROR]: boom"));
        assert!(line.ends_with("\x1b[0m"));
    }
}
