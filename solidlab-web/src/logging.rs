use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wasm_bindgen::JsValue;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Routes formatted events to the browser console, one call per event
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Buffers one formatted event; the console call happens on drop
pub struct ConsoleWriter {
    level: Level,
    buf: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self {
            level,
            buf: Vec::new(),
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Buffered text without the trailing newline, `None` when empty
    fn message(&self) -> Option<String> {
        let text = String::from_utf8_lossy(&self.buf);
        let text = text.trim_end();
        (!text.is_empty()).then(|| text.to_string())
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let Some(message) = self.message() else {
            return;
        };
        let message = JsValue::from_str(&message);
        match self.level {
            Level::ERROR => web_sys::console::error_1(&message),
            Level::WARN => web_sys::console::warn_1(&message),
            Level::INFO => web_sys::console::info_1(&message),
            _ => web_sys::console::debug_1(&message),
        }
    }
}

/// Send tracing events to the browser console and panics to `console.error`.
///
/// Safe to call more than once; only the first call installs anything.
pub fn init_console_tracing(log_level: &str) {
    console_error_panic_hook::set_once();

    let env_filter =
        EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    // No clock on wasm32-unknown-unknown; the console stamps entries itself.
    let console_layer = fmt::layer()
        .with_writer(ConsoleMakeWriter)
        .with_ansi(false)
        .without_time()
        .with_target(true);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_writer_keeps_event_level() {
        let writer = ConsoleWriter::new(Level::WARN);
        assert_eq!(writer.level(), Level::WARN);
        assert_eq!(ConsoleMakeWriter.make_writer().level(), Level::INFO);
    }

    #[test]
    fn test_message_trims_newline() {
        let mut writer = ConsoleWriter::new(Level::INFO);
        assert_eq!(writer.message(), None);

        writeln!(writer, " WARN solidlab_web: localStorage unavailable").unwrap();
        assert_eq!(
            writer.message().as_deref(),
            Some(" WARN solidlab_web: localStorage unavailable")
        );
        // Drop would reach the browser console.
        writer.buf.clear();
    }
}
