use std::fmt::{self, Write};

use crate::{
    exception::{ExcType, RunResult},
    selector::Selector,
};

/// A dynamic value passed to and returned from receivers.
///
/// `Object` owns all its data and can be freely cloned, compared or serialized.
/// Built-in values are receivers themselves (see the `types` module), so a plain
/// `Object::String` can be the target of a [`Proxy`](crate::Proxy).
///
/// # Display
///
/// `Display` renders the inspect form: `nil`, `true`, `10`, `1.5`, `"text"`,
/// `:symbol`, `[1, "a", :b]`. Use [`Object::to_s`] for the plain conversion.
///
/// # Truthiness
///
/// Only `nil` and `false` are falsy; `0`, `""` and `[]` are truthy.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Object {
    /// The absent value.
    #[serde(alias = "nil")]
    Nil,
    #[serde(alias = "bool")]
    Bool(bool),
    /// 64-bit signed integer; arithmetic is checked and raises `RangeError` on overflow.
    #[serde(alias = "int")]
    Int(i64),
    #[serde(alias = "float")]
    Float(f64),
    /// Mutable UTF-8 string.
    #[serde(alias = "string", alias = "str")]
    String(String),
    /// Interned-style name, the value form of a [`Selector`].
    #[serde(alias = "symbol")]
    Symbol(Selector),
    /// Ordered, mutable sequence.
    #[serde(alias = "array")]
    Array(Vec<Self>),
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inspect_fmt(f)
    }
}

impl Object {
    /// Creates a symbol value.
    #[must_use]
    pub fn symbol(name: impl Into<Selector>) -> Self {
        Self::Symbol(name.into())
    }

    /// Creates an array of symbols, the shape `messages` is reported in.
    #[must_use]
    pub fn symbols<'a>(names: impl IntoIterator<Item = &'a Selector>) -> Self {
        Self::Array(names.into_iter().cloned().map(Self::Symbol).collect())
    }

    /// Returns the class name of this value (`NilClass`, `Integer`, `String`, ...).
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "NilClass",
            Self::Bool(true) => "TrueClass",
            Self::Bool(false) => "FalseClass",
            Self::Int(_) => "Integer",
            Self::Float(_) => "Float",
            Self::String(_) => "String",
            Self::Symbol(_) => "Symbol",
            Self::Array(_) => "Array",
        }
    }

    /// Returns the truth value: everything except `nil` and `false` is truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Self::Nil | Self::Bool(false))
    }

    /// Interprets this value as an operation name.
    ///
    /// Symbols and strings are accepted, anything else raises a `TypeError`
    /// (`10 is not a symbol nor a string`).
    pub fn to_selector(&self) -> RunResult<Selector> {
        match self {
            Self::Symbol(selector) => Ok(selector.clone()),
            Self::String(s) => Ok(Selector::from(s.as_str())),
            other => Err(ExcType::type_error_name_arg(other)),
        }
    }

    /// Returns the plain string conversion: `nil` is empty, strings and symbols
    /// are unquoted, everything else uses the inspect form.
    #[must_use]
    pub fn to_s(&self) -> String {
        match self {
            Self::Nil => String::new(),
            Self::String(s) => s.clone(),
            Self::Symbol(selector) => selector.to_string(),
            other => other.to_string(),
        }
    }

    /// Returns the inspect form, same as `Display`.
    #[must_use]
    pub fn inspect(&self) -> String {
        self.to_string()
    }

    fn inspect_fmt(&self, f: &mut impl Write) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => float_fmt(*v, f),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Symbol(selector) => write!(f, ":{selector}"),
            Self::Array(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.inspect_fmt(f)?;
                }
                f.write_char(']')
            }
        }
    }
}

fn float_fmt(value: f64, f: &mut impl Write) -> fmt::Result {
    if value.is_nan() {
        f.write_str("NaN")
    } else if value.is_infinite() {
        f.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        write!(f, "{value:?}")
    }
}

impl From<bool> for Object {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Object {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Object {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Object {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Object {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Object {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Selector> for Object {
    fn from(value: Selector) -> Self {
        Self::Symbol(value)
    }
}

impl From<Vec<Self>> for Object {
    fn from(value: Vec<Self>) -> Self {
        Self::Array(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Object {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Nil, Into::into)
    }
}

impl FromIterator<Self> for Object {
    fn from_iter<I: IntoIterator<Item = Self>>(iter: I) -> Self {
        Self::Array(iter.into_iter().collect())
    }
}
