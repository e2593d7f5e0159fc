use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::selector::Selector;

/// Result type alias for any operation that can raise.
pub type RunResult<T> = Result<T, Exception>;

/// Error kinds a receiver can raise.
///
/// Uses strum derives for automatic `Display`, `FromStr`, and `Into<&'static str>` implementations.
/// The string representation matches the variant name exactly (e.g., `NoMethodError` -> "NoMethodError").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, Serialize, Deserialize)]
pub enum ExcType {
    /// Root of every error kind below.
    StandardError,

    // --- NameError hierarchy ---
    NameError,
    /// A message was sent that nothing defines and no fallback handles.
    NoMethodError,

    /// Wrong number of arguments, or a missing method name for `send`.
    ArgumentError,
    TypeError,
    ZeroDivisionError,
    /// Integer arithmetic left the `i64` range.
    RangeError,
    RuntimeError,
}

impl ExcType {
    /// Checks if this error kind is a subclass of another.
    ///
    /// `NoMethodError` is a `NameError`; every kind is a `StandardError`.
    #[must_use]
    pub fn is_subclass_of(self, handler_type: Self) -> bool {
        if self == handler_type {
            return true;
        }
        match handler_type {
            Self::StandardError => true,
            Self::NameError => self == Self::NoMethodError,
            _ => false,
        }
    }

    /// Creates the error raised when no method, kernel operation or fallback handles `selector`.
    #[must_use]
    pub fn no_method_error(selector: &Selector, class_name: &str) -> Exception {
        let message = match class_name {
            "NilClass" => format!("undefined method '{selector}' for nil"),
            "TrueClass" => format!("undefined method '{selector}' for true"),
            "FalseClass" => format!("undefined method '{selector}' for false"),
            _ => format!("undefined method '{selector}' for an instance of {class_name}"),
        };
        Exception::new(Self::NoMethodError, message).with_name(selector.clone())
    }

    /// Creates an ArgumentError for a fixed-arity mismatch.
    ///
    /// `expected` is rendered as given: `"0"`, `"1"`, `"0..1"`, `"1+"`.
    #[must_use]
    pub fn argument_count(given: usize, expected: &str) -> Exception {
        Exception::new(
            Self::ArgumentError,
            format!("wrong number of arguments (given {given}, expected {expected})"),
        )
    }

    /// Creates the ArgumentError raised by `send` with no method name.
    #[must_use]
    pub fn no_method_name() -> Exception {
        Exception::new(Self::ArgumentError, "no method name given")
    }

    /// Creates the TypeError raised when a method-name argument is neither a symbol nor a string.
    #[must_use]
    pub fn type_error_name_arg(inspected: impl fmt::Display) -> Exception {
        Exception::new(Self::TypeError, format!("{inspected} is not a symbol nor a string"))
    }

    /// Creates a TypeError for an operand of the wrong type.
    ///
    /// Matches the form `String can't be coerced into Integer`.
    #[must_use]
    pub fn coercion_error(from: &str, into: &str) -> Exception {
        Exception::new(Self::TypeError, format!("{from} can't be coerced into {into}"))
    }

    /// Creates a TypeError for an implicit conversion that is not allowed.
    #[must_use]
    pub fn conversion_error(from: &str, into: &str) -> Exception {
        Exception::new(Self::TypeError, format!("no implicit conversion of {from} into {into}"))
    }

    #[must_use]
    pub fn divided_by_zero() -> Exception {
        Exception::new(Self::ZeroDivisionError, "divided by 0")
    }

    #[must_use]
    pub fn integer_overflow(operation: &str) -> Exception {
        Exception::new(Self::RangeError, format!("integer overflow in '{operation}'"))
    }

    /// Creates the error raised when an iterator method is called without a block.
    #[must_use]
    pub fn no_block_given(selector: &Selector) -> Exception {
        Exception::new(Self::ArgumentError, format!("no block given to '{selector}'"))
    }
}

/// An error raised while dispatching or running a message.
///
/// Carries the error kind, a human-readable message and, for `NoMethodError`,
/// the selector that could not be dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Exception {
    exc_type: ExcType,
    message: String,
    #[serde(default)]
    name: Option<Selector>,
}

impl Exception {
    /// Creates an error with the given kind and message.
    #[must_use]
    pub fn new(exc_type: ExcType, message: impl Into<String>) -> Self {
        Self {
            exc_type,
            message: message.into(),
            name: None,
        }
    }

    /// Shorthand for a `RuntimeError`, the kind raised by user code that does not pick one.
    #[must_use]
    pub fn runtime(message: impl Into<String>) -> Self {
        Self::new(ExcType::RuntimeError, message)
    }

    /// Attaches the selector this error is about.
    #[must_use]
    pub fn with_name(mut self, name: Selector) -> Self {
        self.name = Some(name);
        self
    }

    #[must_use]
    pub fn exc_type(&self) -> ExcType {
        self.exc_type
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The selector a `NoMethodError` was raised for.
    #[must_use]
    pub fn name(&self) -> Option<&Selector> {
        self.name.as_ref()
    }

    /// Returns true if this error would be rescued by a handler for `handler_type`.
    #[must_use]
    pub fn is_a(&self, handler_type: ExcType) -> bool {
        self.exc_type.is_subclass_of(handler_type)
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.exc_type)
    }
}

impl std::error::Error for Exception {}
