//! In-memory log sink for asserting on fault logs

use std::io;
use std::sync::{Arc, Mutex};

use faultgate_telemetry::Logger;
use tracing::Dispatch;
use tracing_subscriber::Layer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;

/// In-memory log sink; kept in step with `faultgate-server/src/test_support.rs`
#[derive(Clone, Default)]
pub struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    pub fn error_lines(&self) -> Vec<String> {
        self.lines().into_iter().filter(|line| line.contains("ERROR")).collect()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Logger writing plain-text lines into a [`Captured`] buffer
pub fn capture_logger(level: LevelFilter) -> (Logger, Captured) {
    let captured = Captured::default();
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(captured.clone())
        .with_ansi(false)
        .with_filter(level);

    let logger = Logger::new(Dispatch::new(tracing_subscriber::registry().with(layer)));
    (logger, captured)
}
