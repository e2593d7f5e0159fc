//! Observation hooks for proxied calls.
//!
//! A [`Proxy`](crate::Proxy) always keeps its own call log and counts. A
//! [`CallTracer`] is an extra observer chosen at construction time as a type
//! parameter, so the default [`NoopTracer`] compiles away entirely.
//!
//! | Tracer | Purpose |
//! |--------|---------|
//! | [`NoopTracer`] | Zero-cost no-op (default) |
//! | [`StderrTracer`] | Human-readable call log on stderr |
//! | [`RecordingTracer`] | Full event recording, including results and errors |
//! | [`LogTracer`] | Structured events through `tracing` |
//!
//! ```
//! use missive::{Dispatch, Message, Object, Proxy, RecordingTracer};
//!
//! let mut proxy = Proxy::with_tracer(Object::from("abc"), RecordingTracer::new());
//! proxy.send(Message::new("upcase")).unwrap();
//! assert_eq!(proxy.tracer().event_count(), 2);
//! ```

use std::fmt;

use crate::{
    exception::{ExcType, Exception},
    object::Object,
    selector::Selector,
};

/// Hooks called by a proxy around every forwarded message.
///
/// All methods have default no-op implementations; implementations only override
/// the hooks they care about.
pub trait CallTracer: fmt::Debug {
    /// Called after the message has been recorded and before it is forwarded.
    ///
    /// # Arguments
    /// * `selector` - The intercepted selector
    /// * `args` - Positional arguments, as forwarded
    /// * `call_number` - 1-based position of this call in the proxy's log
    #[inline(always)]
    fn on_intercept(&mut self, _selector: &Selector, _args: &[Object], _call_number: usize) {}

    /// Called when the target returned a value.
    #[inline(always)]
    fn on_return(&mut self, _selector: &Selector, _result: &Object) {}

    /// Called when the target raised. The error still propagates to the caller.
    #[inline(always)]
    fn on_raise(&mut self, _selector: &Selector, _error: &Exception) {}
}

// ============================================================================
// NoopTracer
// ============================================================================

/// A tracer that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracer;

impl CallTracer for NoopTracer {}

// ============================================================================
// StderrTracer
// ============================================================================

/// Tracer that prints one line per event to stderr.
///
/// Output format:
/// ```text
/// [    1] -> power()
///         <- :on
/// [    2] -> channel=(10)
///         <- 10
/// [    3] -> no_such_method()
///         !! NoMethodError: undefined method 'no_such_method' for an instance of Television
/// ```
#[derive(Debug, Default)]
pub struct StderrTracer {
    /// Maximum number of calls to print. None = unlimited.
    limit: Option<usize>,
    /// Calls printed so far.
    count: usize,
    stopped: bool,
}

impl StderrTracer {
    /// Creates a new stderr tracer with no limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new stderr tracer that goes quiet after `limit` calls.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Number of calls printed so far.
    #[must_use]
    pub fn calls_printed(&self) -> usize {
        self.count
    }
}

impl CallTracer for StderrTracer {
    fn on_intercept(&mut self, selector: &Selector, args: &[Object], call_number: usize) {
        if self.stopped {
            return;
        }
        if let Some(limit) = self.limit
            && self.count >= limit
        {
            eprintln!("--- trace limit reached ({limit} calls) ---");
            self.stopped = true;
            return;
        }
        eprintln!("[{call_number:>5}] -> {selector}({})", join_inspect(args));
        self.count += 1;
    }

    fn on_return(&mut self, _selector: &Selector, result: &Object) {
        if !self.stopped {
            eprintln!("        <- {result}");
        }
    }

    fn on_raise(&mut self, _selector: &Selector, error: &Exception) {
        if !self.stopped {
            eprintln!("        !! {}: {}", error.exc_type(), error.message());
        }
    }
}

fn join_inspect(args: &[Object]) -> String {
    args.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

// ============================================================================
// RecordingTracer
// ============================================================================

/// Event captured by [`RecordingTracer`].
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    /// A message was intercepted.
    Intercept {
        call_number: usize,
        selector: Selector,
        args: Vec<Object>,
    },
    /// The target returned.
    Return { selector: Selector, result: Object },
    /// The target raised.
    Raise {
        selector: Selector,
        exc_type: ExcType,
        message: String,
    },
}

/// Tracer that records every event, including arguments, results and errors.
///
/// This is the most expensive tracer (it clones arguments and results), so use
/// it for tests and debugging.
#[derive(Debug, Default)]
pub struct RecordingTracer {
    /// All recorded events in chronological order.
    events: Vec<TraceEvent>,
    /// Optional limit on number of events recorded.
    limit: Option<usize>,
}

impl RecordingTracer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a recording tracer that stops recording after `limit` events.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            events: Vec::with_capacity(limit.min(1024)),
            limit: Some(limit),
        }
    }

    #[must_use]
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    #[must_use]
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    fn push(&mut self, event: TraceEvent) {
        if self.limit.is_some_and(|limit| self.events.len() >= limit) {
            return;
        }
        self.events.push(event);
    }
}

impl CallTracer for RecordingTracer {
    fn on_intercept(&mut self, selector: &Selector, args: &[Object], call_number: usize) {
        self.push(TraceEvent::Intercept {
            call_number,
            selector: selector.clone(),
            args: args.to_vec(),
        });
    }

    fn on_return(&mut self, selector: &Selector, result: &Object) {
        self.push(TraceEvent::Return {
            selector: selector.clone(),
            result: result.clone(),
        });
    }

    fn on_raise(&mut self, selector: &Selector, error: &Exception) {
        self.push(TraceEvent::Raise {
            selector: selector.clone(),
            exc_type: error.exc_type(),
            message: error.message().to_owned(),
        });
    }
}

// ============================================================================
// LogTracer
// ============================================================================

/// Tracer that emits structured `tracing` events.
///
/// Intercepts and returns are logged at `debug`, raised errors at `warn`. Every
/// event carries a `proxy` field with the tracer's label so several proxies can
/// share one subscriber.
#[derive(Debug, Clone)]
pub struct LogTracer {
    label: String,
}

impl LogTracer {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Default for LogTracer {
    fn default() -> Self {
        Self::new("proxy")
    }
}

impl CallTracer for LogTracer {
    fn on_intercept(&mut self, selector: &Selector, args: &[Object], call_number: usize) {
        tracing::debug!(
            proxy = %self.label,
            selector = %selector,
            argc = args.len(),
            call_number,
            "intercepted message"
        );
    }

    fn on_return(&mut self, selector: &Selector, result: &Object) {
        tracing::debug!(proxy = %self.label, selector = %selector, result = %result, "forwarded message returned");
    }

    fn on_raise(&mut self, selector: &Selector, error: &Exception) {
        tracing::warn!(
            proxy = %self.label,
            selector = %selector,
            exc_type = %error.exc_type(),
            error = %error.message(),
            "forwarded message raised"
        );
    }
}
