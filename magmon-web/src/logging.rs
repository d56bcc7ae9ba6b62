//! Console logger backing the `log` facade.
//!
//! The level comes from `MAGMON_LOG` at build time (`error`, `warn`, `info`,
//! `debug`, `trace`, `off`) and defaults to `info`.

use anyhow::{Context, anyhow};
use log::{Level, LevelFilter, Log, Metadata, Record};

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Level compiled into this build.
#[must_use]
pub fn build_level() -> LevelFilter {
    parse_level(option_env!("MAGMON_LOG"))
}

fn parse_level(raw: Option<&str>) -> LevelFilter {
    raw.and_then(|value| value.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info)
}

fn format_record(level: Level, target: &str, message: &str) -> String {
    format!("[{level}] {target}: {message}")
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(record.level(), record.target(), &record.args().to_string());
        #[cfg(target_arch = "wasm32")]
        {
            let value = wasm_bindgen::JsValue::from(line);
            match record.level() {
                Level::Error => web_sys::console::error_1(&value),
                Level::Warn => web_sys::console::warn_1(&value),
                Level::Info => web_sys::console::info_1(&value),
                Level::Debug | Level::Trace => web_sys::console::debug_1(&value),
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        eprintln!("{line}");
    }

    fn flush(&self) {}
}

/// Install the console logger.
///
/// # Errors
/// Fails when another logger was installed first.
pub fn init() -> anyhow::Result<()> {
    log::set_logger(&LOGGER)
        .map_err(|err| anyhow!("{err}"))
        .context("installing console logger")?;
    log::set_max_level(build_level());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_defaults_to_info() {
        assert_eq!(parse_level(None), LevelFilter::Info);
        assert_eq!(parse_level(Some("nonsense")), LevelFilter::Info);
    }

    #[test]
    fn level_is_parsed_case_insensitively() {
        assert_eq!(parse_level(Some("DEBUG")), LevelFilter::Debug);
        assert_eq!(parse_level(Some(" off ")), LevelFilter::Off);
    }

    #[test]
    fn records_carry_level_and_target() {
        assert_eq!(
            format_record(Level::Warn, "magmon_core::client", "GET /games failed"),
            "[WARN] magmon_core::client: GET /games failed"
        );
    }
}
