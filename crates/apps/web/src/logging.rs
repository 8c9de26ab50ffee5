//! `tracing` output routed to the browser console.

use std::io;
use std::sync::OnceLock;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, reload};

pub const DEFAULT_FILTER: &str = "info";

static FILTER_HANDLE: OnceLock<reload::Handle<EnvFilter, Registry>> = OnceLock::new();

/// Console method a record of `level` is written with.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConsoleLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl From<Level> for ConsoleLevel {
    fn from(level: Level) -> Self {
        if level == Level::ERROR {
            ConsoleLevel::Error
        } else if level == Level::WARN {
            ConsoleLevel::Warn
        } else if level == Level::INFO {
            ConsoleLevel::Info
        } else {
            ConsoleLevel::Debug
        }
    }
}

/// Parses `directives`, falling back to [`DEFAULT_FILTER`] when they are
/// empty or malformed.
pub fn parse_filter(directives: &str) -> EnvFilter {
    let trimmed = directives.trim();
    if trimmed.is_empty() {
        return EnvFilter::new(DEFAULT_FILTER);
    }
    EnvFilter::try_new(trimmed).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

#[derive(Debug, Copy, Clone)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(ConsoleLevel::Info)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(ConsoleLevel::from(*meta.level()))
    }
}

/// Buffers one formatted record and hands it to the console on drop.
#[derive(Debug)]
pub struct ConsoleWriter {
    level: ConsoleLevel,
    buf: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: ConsoleLevel) -> Self {
        Self {
            level,
            buf: Vec::new(),
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buf);
        let line = line.trim_end();
        if !line.is_empty() {
            emit(self.level, line);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(level: ConsoleLevel, line: &str) {
    use wasm_bindgen::JsValue;
    let value = JsValue::from_str(line);
    match level {
        ConsoleLevel::Error => web_sys::console::error_1(&value),
        ConsoleLevel::Warn => web_sys::console::warn_1(&value),
        ConsoleLevel::Info => web_sys::console::info_1(&value),
        ConsoleLevel::Debug => web_sys::console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(level: ConsoleLevel, line: &str) {
    match level {
        ConsoleLevel::Error | ConsoleLevel::Warn => eprintln!("{line}"),
        ConsoleLevel::Info | ConsoleLevel::Debug => println!("{line}"),
    }
}

/// Installs the console subscriber once; later calls only swap the filter.
pub fn init_logging(directives: &str) {
    let filter = parse_filter(directives);
    if let Some(handle) = FILTER_HANDLE.get() {
        if let Err(err) = handle.reload(filter) {
            tracing::warn!(%err, "failed to reload log filter");
        }
        return;
    }

    let (filter_layer, handle) = reload::Layer::new(filter);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_ansi(false)
        .with_target(true)
        .with_writer(ConsoleMakeWriter);

    // Another subscriber may already be global (tests, embedding pages).
    if Registry::default()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()
        .is_ok()
    {
        let _ = FILTER_HANDLE.set(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::{ConsoleLevel, DEFAULT_FILTER, parse_filter};
    use tracing::Level;

    #[test]
    fn levels_map_to_console_methods() {
        assert_eq!(ConsoleLevel::from(Level::ERROR), ConsoleLevel::Error);
        assert_eq!(ConsoleLevel::from(Level::WARN), ConsoleLevel::Warn);
        assert_eq!(ConsoleLevel::from(Level::INFO), ConsoleLevel::Info);
        assert_eq!(ConsoleLevel::from(Level::DEBUG), ConsoleLevel::Debug);
        assert_eq!(ConsoleLevel::from(Level::TRACE), ConsoleLevel::Debug);
    }

    #[test]
    fn blank_or_bad_filters_fall_back_to_default() {
        assert_eq!(parse_filter("  ").to_string(), DEFAULT_FILTER);
        assert_eq!(parse_filter("scene=loud").to_string(), DEFAULT_FILTER);
        assert_eq!(parse_filter("scene=debug").to_string(), "scene=debug");
    }
}
