use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

fn term_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Log to stderr, and additionally append everything at debug level to
/// `log_file` when one is given.
pub fn init_logging(verbose: bool, log_file: Option<&Path>) {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_allow_str("docver")
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        term_level(verbose),
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    if let Some(path) = log_file {
        match open_log_file(path) {
            Ok(file) => loggers.push(WriteLogger::new(LevelFilter::Debug, config, file)),
            Err(error) => eprintln!("Could not open log file {}: {error}", path.display()),
        }
    }

    let _ = CombinedLogger::init(loggers);

    if let Some(path) = log_file {
        log::debug!("Logging to {}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use simplelog::LevelFilter;

    use super::{open_log_file, term_level};

    #[test]
    fn verbose_raises_terminal_level() {
        assert_eq!(term_level(false), LevelFilter::Warn);
        assert_eq!(term_level(true), LevelFilter::Debug);
    }

    #[test]
    fn open_log_file_creates_parent_and_appends() {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        let log_path = temp_dir.path().join("logs").join("docver.log");

        open_log_file(&log_path)
            .expect("log file should open")
            .write_all(b"first\n")
            .expect("first write should succeed");
        open_log_file(&log_path)
            .expect("log file should reopen")
            .write_all(b"second\n")
            .expect("second write should succeed");

        let contents = std::fs::read_to_string(&log_path).expect("log file should be readable");
        assert_eq!(contents, "first\nsecond\n");
    }
}
