//! Built-in receivers for [`Object`] values.
//!
//! Each submodule owns the method table of one value type as a strum enum and a
//! `call_*_method` function dispatching on it. Operations shared by every value
//! (`==`, `!=`, `!`, `to_s`, `dup`) live here and are looked up first.

pub(crate) mod array;
pub(crate) mod int;
pub(crate) mod scalar;
pub(crate) mod string;

use std::str::FromStr;

use strum::{EnumString, IntoStaticStr};

use crate::{
    exception::{ExcType, RunResult},
    message::Message,
    object::Object,
    receiver::Receiver,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
enum CommonMethod {
    #[strum(serialize = "==")]
    Eq,
    #[strum(serialize = "!=")]
    Ne,
    #[strum(serialize = "!")]
    Not,
    #[strum(serialize = "to_s")]
    ToS,
    #[strum(serialize = "dup")]
    Dup,
}

impl Receiver for Object {
    fn class_name(&self) -> &str {
        self.type_name()
    }

    fn defines(&self, selector: &str) -> bool {
        if CommonMethod::from_str(selector).is_ok() {
            return true;
        }
        match self {
            Self::Nil => scalar::NilMethod::from_str(selector).is_ok(),
            Self::Bool(_) => scalar::BoolMethod::from_str(selector).is_ok(),
            Self::Int(_) => int::IntMethod::from_str(selector).is_ok(),
            Self::Float(_) => scalar::FloatMethod::from_str(selector).is_ok(),
            Self::String(_) => string::StrMethod::from_str(selector).is_ok(),
            Self::Symbol(_) => scalar::SymbolMethod::from_str(selector).is_ok(),
            Self::Array(_) => array::ArrayMethod::from_str(selector).is_ok(),
        }
    }

    fn call_defined(&mut self, message: Message) -> RunResult<Object> {
        if let Ok(method) = CommonMethod::from_str(message.selector()) {
            return call_common_method(self, method, message);
        }
        match self {
            Self::Nil => scalar::call_nil_method(&message),
            Self::Bool(b) => scalar::call_bool_method(*b, message),
            Self::Int(i) => int::call_int_method(*i, message),
            Self::Float(f) => scalar::call_float_method(*f, message),
            Self::String(s) => string::call_str_method(s, message),
            Self::Symbol(selector) => scalar::call_symbol_method(selector, &message),
            Self::Array(items) => array::call_array_method(items, message),
        }
    }

    fn inspect(&self) -> String {
        self.to_string()
    }
}

fn call_common_method(value: &Object, method: CommonMethod, message: Message) -> RunResult<Object> {
    match method {
        CommonMethod::Eq => {
            let other = message.get_one_arg()?;
            Ok(Object::Bool(values_equal(value, &other)))
        }
        CommonMethod::Ne => {
            let other = message.get_one_arg()?;
            Ok(Object::Bool(!values_equal(value, &other)))
        }
        CommonMethod::Not => {
            message.check_zero_args()?;
            Ok(Object::Bool(!value.is_truthy()))
        }
        CommonMethod::ToS => {
            message.check_zero_args()?;
            Ok(Object::String(value.to_s()))
        }
        CommonMethod::Dup => {
            message.check_zero_args()?;
            Ok(value.clone())
        }
    }
}

/// Value equality with numeric coercion: `1 == 1.0` and `[1] == [1.0]` hold.
#[expect(clippy::float_cmp, reason = "Integer == Float compares the exact coerced value")]
pub(crate) fn values_equal(a: &Object, b: &Object) -> bool {
    match (a, b) {
        (Object::Int(i), Object::Float(f)) | (Object::Float(f), Object::Int(i)) => *i as f64 == *f,
        (Object::Array(xs), Object::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        _ => a == b,
    }
}

/// Converts a length or count into an `Integer` value.
pub(crate) fn count_to_object(count: usize) -> Object {
    Object::Int(i64::try_from(count).unwrap_or(i64::MAX))
}

/// Extracts a `String` argument, raising `TypeError` for anything else.
pub(crate) fn expect_string_arg(arg: Object) -> RunResult<String> {
    match arg {
        Object::String(s) => Ok(s),
        other => Err(ExcType::conversion_error(other.type_name(), "String")),
    }
}
