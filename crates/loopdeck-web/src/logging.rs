#![forbid(unsafe_code)]

//! `tracing` output to the browser console.

use std::io;
use std::sync::Once;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

pub(crate) const DEFAULT_DIRECTIVE: &str = "info";

/// Buffers one formatted event and hands it to `console.log` on drop.
pub(crate) struct ConsoleWriter {
    buf: Vec<u8>,
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
        let line = String::from_utf8_lossy(&self.buf);
        let line = line.trim_end();
        if !line.is_empty() {
            web_sys::console::log_1(&line.into());
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter { buf: Vec::new() }
    }
}

/// Install the console subscriber once per page.
///
/// `directive` uses `EnvFilter` syntax (`"loopdeck_core=debug,info"`); an
/// invalid or missing directive falls back to `info`.
pub(crate) fn install(directive: Option<&str>) {
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        let filter = directive
            .and_then(|d| EnvFilter::try_new(d).ok())
            .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE));
        // Another subscriber may already be set by the embedding page.
        let _ = tracing_subscriber::fmt()
            .with_writer(ConsoleMakeWriter)
            .with_env_filter(filter)
            .with_ansi(false)
            .without_time()
            .try_init();
    });
}
