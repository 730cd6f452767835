use std::fmt;
use std::io;
use std::sync::{Arc, Mutex};

use axum::response::{IntoResponse, Response};
use faultgate_core::{BoxError, Fault, FaultKind, FaultType};
use faultgate_telemetry::Logger;
use tracing::Dispatch;
use tracing_subscriber::Layer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;

use crate::Raise;

macro_rules! test_fault {
    ($name:ident, $kind:literal) => {
        #[derive(Debug)]
        pub(crate) struct $name(pub(crate) &'static str);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.0)
            }
        }

        impl std::error::Error for $name {}

        impl Fault for $name {
            fn kind(&self) -> FaultKind {
                Self::KIND
            }
        }

        impl FaultType for $name {
            const KIND: FaultKind = FaultKind::new($kind);
        }
    };
}

test_fault!(KindA, "kind_a");
test_fault!(KindB, "kind_b");

/// In-memory log sink; kept in step with `integration-tests/tests/harness/capture.rs`
#[derive(Clone, Default)]
pub(crate) struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    pub(crate) fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    pub(crate) fn error_lines(&self) -> Vec<String> {
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
pub(crate) fn capture_logger(level: LevelFilter) -> (Logger, Captured) {
    let captured = Captured::default();
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(captured.clone())
        .with_ansi(false)
        .with_filter(level);

    let logger = Logger::new(Dispatch::new(tracing_subscriber::registry().with(layer)));
    (logger, captured)
}

pub(crate) fn raised(fault: impl Fault) -> Result<Response, BoxError> {
    Ok(Raise::new(fault).into_response())
}

pub(crate) fn failed(error: impl Into<BoxError>) -> Result<Response, BoxError> {
    Err(error.into())
}

pub(crate) fn explode(message: &'static str) -> Result<Response, BoxError> {
    std::panic::panic_any(message)
}

pub(crate) async fn read_body(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
