//! A recording, forwarding proxy.
//!
//! [`Proxy`] wraps any [`Receiver`]. Messages the proxy does not define itself
//! reach its `method_missing`, which records the selector and forwards the whole
//! message (arguments and block) to the target through [`send`]. Whatever the
//! target returns or raises comes back unchanged.
//!
//! ```
//! use missive::{Dispatch, Message, Object, Proxy, Selector};
//!
//! let mut proxy = Proxy::new(Object::from("Code Mash 2009"));
//! proxy.send(Message::new("upcase!")).unwrap();
//! let words = proxy.send(Message::new("split")).unwrap();
//!
//! assert_eq!(words, Object::Array(vec!["CODE".into(), "MASH".into(), "2009".into()]));
//! assert_eq!(proxy.messages(), [Selector::from("upcase!"), Selector::from("split")]);
//! ```

use std::{cmp::Reverse, fmt, str::FromStr};

use ahash::AHashMap;
use indexmap::IndexMap;
use strum::{Display, EnumString, IntoStaticStr};

use crate::{
    exception::RunResult,
    message::Message,
    object::Object,
    receiver::{Receiver, respond_to, send},
    selector::Selector,
    tracer::{CallTracer, NoopTracer},
    types::count_to_object,
};

/// Operations the proxy answers itself instead of forwarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
pub enum ProxyMethod {
    #[strum(serialize = "messages")]
    Messages,
    #[strum(serialize = "called?")]
    Called,
    #[strum(serialize = "number_of_times_called")]
    NumberOfTimesCalled,
}

/// Wraps a target receiver, recording and forwarding every message sent to it.
///
/// The proxy keeps an append-only log of intercepted selectors and a count per
/// selector; `number_of_times_called(x)` always equals the occurrences of `x`
/// in `messages()`. Selectors are matched exactly, so `channel` and `channel=`
/// are counted separately.
///
/// A call is recorded before it is forwarded, so a message the target rejects
/// with `NoMethodError` still appears in the log.
#[derive(Debug)]
pub struct Proxy<T, Tr = NoopTracer> {
    target: T,
    messages: Vec<Selector>,
    call_counts: AHashMap<Selector, usize>,
    tracer: Tr,
}

impl<T: Receiver> Proxy<T> {
    /// Wraps `target` with no extra tracer.
    #[must_use]
    pub fn new(target: T) -> Self {
        Self::with_tracer(target, NoopTracer)
    }
}

impl<T: Receiver, Tr: CallTracer> Proxy<T, Tr> {
    /// Wraps `target`, reporting every forwarded call to `tracer`.
    #[must_use]
    pub fn with_tracer(target: T, tracer: Tr) -> Self {
        Self {
            target,
            messages: Vec::new(),
            call_counts: AHashMap::new(),
            tracer,
        }
    }

    /// Records `message` and forwards it to the target.
    ///
    /// This is the interception path: it always forwards, even for selectors the
    /// proxy defines itself. Use [`send`] on the proxy to get normal dispatch.
    pub fn invoke(&mut self, message: Message) -> RunResult<Object> {
        let selector = message.selector().clone();
        self.record(&selector);
        self.tracer.on_intercept(&selector, message.args(), self.messages.len());

        let result = send(&mut self.target, message);
        match &result {
            Ok(value) => self.tracer.on_return(&selector, value),
            Err(error) => self.tracer.on_raise(&selector, error),
        }
        result
    }

    fn record(&mut self, selector: &Selector) {
        self.messages.push(selector.clone());
        *self.call_counts.entry(selector.clone()).or_insert(0) += 1;
    }

    /// Intercepted selectors in invocation order.
    #[must_use]
    pub fn messages(&self) -> &[Selector] {
        &self.messages
    }

    /// Returns true if `selector` has been intercepted at least once.
    #[must_use]
    pub fn called(&self, selector: &str) -> bool {
        self.call_counts.contains_key(selector)
    }

    /// Number of times `selector` has been intercepted; 0 if never.
    #[must_use]
    pub fn number_of_times_called(&self, selector: &str) -> usize {
        self.call_counts.get(selector).copied().unwrap_or(0)
    }

    /// Per-selector counts, in no particular order.
    pub fn call_counts(&self) -> impl Iterator<Item = (&Selector, usize)> {
        self.call_counts.iter().map(|(selector, count)| (selector, *count))
    }

    /// Summarizes the call log.
    #[must_use]
    pub fn report(&self) -> CallReport {
        CallReport::from_log(&self.messages)
    }

    #[must_use]
    pub fn target(&self) -> &T {
        &self.target
    }

    #[must_use]
    pub fn tracer(&self) -> &Tr {
        &self.tracer
    }

    /// Drops the proxy and its log, returning the target.
    #[must_use]
    pub fn into_target(self) -> T {
        self.target
    }
}

impl<T: Receiver, Tr: CallTracer> Receiver for Proxy<T, Tr> {
    fn class_name(&self) -> &str {
        "Proxy"
    }

    fn defines(&self, selector: &str) -> bool {
        ProxyMethod::from_str(selector).is_ok()
    }

    fn call_defined(&mut self, message: Message) -> RunResult<Object> {
        let Ok(method) = ProxyMethod::from_str(message.selector()) else {
            return self.invoke(message);
        };
        match method {
            ProxyMethod::Messages => {
                message.check_zero_args()?;
                Ok(Object::symbols(&self.messages))
            }
            ProxyMethod::Called => {
                let name = message.get_one_arg()?.to_selector()?;
                Ok(Object::Bool(self.called(&name)))
            }
            ProxyMethod::NumberOfTimesCalled => {
                let name = message.get_one_arg()?.to_selector()?;
                Ok(count_to_object(self.number_of_times_called(&name)))
            }
        }
    }

    fn method_missing(&mut self, message: Message) -> RunResult<Object> {
        self.invoke(message)
    }

    fn respond_to_missing(&self, selector: &str) -> bool {
        respond_to(&self.target, selector)
    }

    fn inspect(&self) -> String {
        format!("#<Proxy {}>", self.target.inspect())
    }
}

/// Summary of a proxy's call log.
///
/// Counts are sorted by frequency, ties broken by first appearance in the log.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CallReport {
    pub total_calls: usize,
    pub counts: Vec<(Selector, usize)>,
}

impl CallReport {
    fn from_log(log: &[Selector]) -> Self {
        let mut seen: IndexMap<&Selector, usize> = IndexMap::new();
        for selector in log {
            *seen.entry(selector).or_insert(0) += 1;
        }
        let mut counts: Vec<(Selector, usize)> =
            seen.into_iter().map(|(selector, count)| (selector.clone(), count)).collect();
        counts.sort_by_key(|(_, count)| Reverse(*count));
        Self {
            total_calls: log.len(),
            counts,
        }
    }

    #[must_use]
    pub fn distinct_selectors(&self) -> usize {
        self.counts.len()
    }
}

impl fmt::Display for CallReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Proxy Call Report ===")?;
        writeln!(f, "Total calls:        {}", self.total_calls)?;
        writeln!(f, "Distinct selectors: {}", self.distinct_selectors())?;
        writeln!(f)?;
        writeln!(f, "--- Selector Frequency ---")?;
        for (selector, count) in &self.counts {
            let pct = (*count as f64 / self.total_calls as f64) * 100.0;
            writeln!(f, "  {:<24} {count:>8}  ({pct:>5.1}%)", selector.as_str())?;
        }
        Ok(())
    }
}
