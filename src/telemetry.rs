//! Logging setup for hosts embedding the detector, and an in-memory capture
//! layer for asserting on what a run logged.
//!
//! # Filter priority (highest to lowest)
//!
//! 1. `WAVEGATE_LOG` env var (per-target directives, e.g. `wavegate=debug,warn`)
//! 2. `RUST_LOG` env var
//! 3. The default level passed to [`init_subscriber`]
use std::{
    fmt::Debug,
    sync::{Arc, Mutex},
};

use tracing::{field::Field, Event, Level, Subscriber};
use tracing_subscriber::{
    fmt, layer::Context, prelude::*, registry::LookupSpan, EnvFilter, Layer,
};

pub const LOG_ENV: &str = "WAVEGATE_LOG";

/// Install a stderr `fmt` subscriber. Returns `false` if a global
/// subscriber was already set, in which case nothing changes.
pub fn init_subscriber(default_level: Level) -> bool {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(true)
        .with_timer(fmt::time::uptime());

    tracing_subscriber::registry()
        .with(build_env_filter(default_level, |var| std::env::var(var).ok()))
        .with(fmt_layer)
        .try_init()
        .is_ok()
}

/// First env var, in priority order, whose directives parse; unparsable
/// values fall through to the next source.
fn build_env_filter<F>(default_level: Level, lookup: F) -> EnvFilter
where
    F: Fn(&str) -> Option<String>,
{
    [LOG_ENV, "RUST_LOG"]
        .into_iter()
        .filter_map(|var| lookup(var))
        .find_map(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default_level.as_str().to_ascii_lowercase()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
    pub message: String,
}

/// Layer keeping every event in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|event| event.level == Level::ERROR)
            .map(|event| event.message)
            .collect()
    }

    /// Panics listing every `ERROR` event captured so far.
    pub fn assert_no_errors(&self) {
        let errors = self.error_messages();
        assert!(errors.is_empty(), "{}", errors.join("\n"));
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_owned();
        } else {
            self.fields.push(format!("{}={value}", field.name()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields.push(format!("{}={value:?}", field.name()));
        }
    }
}

impl<S> Layer<S> for LogCapture
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let message = if visitor.fields.is_empty() {
            visitor.message
        } else {
            format!("{} {}", visitor.message, visitor.fields.join(" "))
        };
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(CapturedEvent {
                level: *event.metadata().level(),
                target: event.metadata().target().to_owned(),
                message,
            });
    }
}
