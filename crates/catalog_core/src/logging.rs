//! Process-wide logging for the catalog.
//!
//! # Responsibility
//! - Start the flexi_logger backend once: rolling `product_catalog*.log`
//!   files plus `warn`+ records mirrored to stderr for foreground servers.
//! - Capture panics as sanitized log events.
//!
//! # Invariants
//! - Repeated init with the same level and directory is a no-op; any other
//!   combination is rejected instead of silently reconfiguring.
//! - Log lines carry ids, counts, paths and durations, never API keys or
//!   product payloads.

use flexi_logger::{
    Cleanup, Criterion, Duplicate, FileSpec, LogSpecification, Logger, LoggerHandle, Naming,
    WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const LOG_FILE_BASENAME: &str = "product_catalog";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_ROTATED_FILES: usize = 5;
const STDERR_MIRROR: Duplicate = Duplicate::Warn;
const PANIC_PAYLOAD_MAX_CHARS: usize = 160;

static ACTIVE_LOGGER: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

struct ActiveLogger {
    level: LevelFilter,
    log_dir: PathBuf,
    handle: LoggerHandle,
}

/// Starts catalog logging at `level` under the absolute directory `log_dir`.
///
/// `level` is one of `trace|debug|info|warn|error` in any case; `warning`
/// is accepted as an alias.
///
/// # Errors
/// - Unknown level, or an empty/relative `log_dir`.
/// - The directory cannot be created or the backend fails to start.
/// - Logging is already running with a different level or directory.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let level = parse_level(level)?;
    let log_dir = parse_log_dir(log_dir)?;

    let active = ACTIVE_LOGGER.get_or_try_init(|| start(level, &log_dir))?;
    if active.level != level || active.log_dir != log_dir {
        return Err(format!(
            "logging already running as {} in `{}`; refusing to switch to {} in `{}`",
            active.level,
            active.log_dir.display(),
            level,
            log_dir.display()
        ));
    }
    Ok(())
}

/// Writes buffered records to disk. A no-op before `init_logging`.
pub fn flush_logs() {
    if let Some(active) = ACTIVE_LOGGER.get() {
        active.handle.flush();
    }
}

/// Level used when none is configured: `debug` for debug builds, else `info`.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start(level: LevelFilter, log_dir: &Path) -> Result<ActiveLogger, String> {
    std::fs::create_dir_all(log_dir)
        .map_err(|err| format!("cannot create log directory `{}`: {err}", log_dir.display()))?;

    let handle = Logger::with(LogSpecification::from(level))
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_ROTATED_FILES),
        )
        .duplicate_to_stderr(STDERR_MIRROR)
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        // [YYYY-MM-DD HH:MM:SS.ffffff TZ] LEVEL [module] file:line: message
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("cannot start logger: {err}"))?;

    install_panic_hook();
    info!(
        "event=logging_init module=core status=ok level={level} log_dir={} version={} os={}",
        log_dir.display(),
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    );

    Ok(ActiveLogger {
        level,
        log_dir: log_dir.to_path_buf(),
        handle,
    })
}

fn parse_level(level: &str) -> Result<LevelFilter, String> {
    let trimmed = level.trim();
    let candidate = if trimmed.eq_ignore_ascii_case("warning") {
        "warn"
    } else {
        trimmed
    };
    match LevelFilter::from_str(candidate) {
        Ok(LevelFilter::Off) | Err(_) => Err(format!(
            "unsupported log level `{trimmed}`; expected trace|debug|info|warn|error"
        )),
        Ok(filter) => Ok(filter),
    }
}

fn parse_log_dir(log_dir: &str) -> Result<PathBuf, String> {
    let path = Path::new(log_dir.trim());
    if path.as_os_str().is_empty() {
        return Err("log directory must not be empty".to_string());
    }
    if !path.is_absolute() {
        return Err(format!(
            "log directory must be absolute, got `{}`",
            path.display()
        ));
    }
    Ok(path.to_path_buf())
}

fn install_panic_hook() {
    PANIC_HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let location = panic_info
                .location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line()))
                .unwrap_or_else(|| "unknown".to_string());
            let payload = panic_info
                .payload()
                .downcast_ref::<&str>()
                .map(|message| (*message).to_string())
                .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".to_string());
            error!(
                "event=panic_captured module=core status=error location={location} payload={}",
                single_line(&payload, PANIC_PAYLOAD_MAX_CHARS)
            );
            flush_logs();
            previous(panic_info);
        }));
    });
}

/// Panic payloads may echo request data: keep them on one capped line.
fn single_line(value: &str, max_chars: usize) -> String {
    let mut line: String = value
        .chars()
        .map(|ch| if matches!(ch, '\n' | '\r') { ' ' } else { ch })
        .take(max_chars)
        .collect();
    if value.chars().count() > max_chars {
        line.push_str("...");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::{flush_logs, init_logging, parse_level, parse_log_dir, single_line};
    use log::LevelFilter;
    use std::fs;

    #[test]
    fn parse_level_accepts_catalog_log_level_values() {
        assert_eq!(parse_level("INFO"), Ok(LevelFilter::Info));
        assert_eq!(parse_level(" Warning "), Ok(LevelFilter::Warn));
        assert!(parse_level(super::default_log_level()).is_ok());
    }

    #[test]
    fn parse_level_rejects_off_and_unknown_values() {
        assert!(parse_level("off").unwrap_err().contains("unsupported"));
        assert!(parse_level("verbose").unwrap_err().contains("unsupported"));
    }

    #[test]
    fn parse_log_dir_requires_absolute_path() {
        assert!(parse_log_dir("  ").unwrap_err().contains("empty"));
        assert!(parse_log_dir("logs/dev").unwrap_err().contains("absolute"));
    }

    #[test]
    fn single_line_strips_newlines_and_caps_length() {
        assert_eq!(single_line("a\nb\rc", 10), "a b c");
        assert_eq!(single_line("abcdef", 3), "abc...");
    }

    #[test]
    fn init_writes_catalog_log_file_and_rejects_reconfiguration() {
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_str().unwrap().to_string();
        let other = tempfile::tempdir().unwrap();

        init_logging("info", &dir_str).unwrap();
        init_logging("INFO", &dir_str).unwrap();
        assert!(init_logging("debug", &dir_str)
            .unwrap_err()
            .contains("refusing to switch"));
        assert!(init_logging("info", other.path().to_str().unwrap())
            .unwrap_err()
            .contains("refusing to switch"));

        log::info!("event=logging_smoke module=test status=ok marker=catalog-7f3a");
        flush_logs();

        let written = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| {
                entry
                    .file_name()
                    .to_string_lossy()
                    .starts_with("product_catalog")
            })
            .any(|entry| {
                fs::read_to_string(entry.path())
                    .map(|text| text.contains("marker=catalog-7f3a"))
                    .unwrap_or(false)
            });
        assert!(written, "expected a product_catalog log file with the marker");
    }
}
