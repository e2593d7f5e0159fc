//! Methods of the small immutable values: `nil`, booleans, floats and symbols.

use std::str::FromStr;

use strum::{EnumString, IntoStaticStr};

use crate::{
    exception::{ExcType, RunResult},
    message::Message,
    object::Object,
    selector::Selector,
    types::count_to_object,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
pub(crate) enum NilMethod {
    #[strum(serialize = "nil?")]
    IsNil,
    #[strum(serialize = "to_a")]
    ToA,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
pub(crate) enum BoolMethod {
    #[strum(serialize = "&")]
    And,
    #[strum(serialize = "|")]
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
pub(crate) enum FloatMethod {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "zero?")]
    IsZero,
    #[strum(serialize = "to_i")]
    ToI,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
pub(crate) enum SymbolMethod {
    #[strum(serialize = "to_sym")]
    ToSym,
    #[strum(serialize = "length")]
    Length,
    #[strum(serialize = "size")]
    Size,
}

pub(crate) fn call_nil_method(message: &Message) -> RunResult<Object> {
    let Ok(method) = NilMethod::from_str(message.selector()) else {
        return Err(ExcType::no_method_error(message.selector(), "NilClass"));
    };
    message.check_zero_args()?;
    match method {
        NilMethod::IsNil => Ok(Object::Bool(true)),
        NilMethod::ToA => Ok(Object::Array(Vec::new())),
    }
}

pub(crate) fn call_bool_method(value: bool, message: Message) -> RunResult<Object> {
    let Ok(method) = BoolMethod::from_str(message.selector()) else {
        return Err(ExcType::no_method_error(message.selector(), Object::Bool(value).type_name()));
    };
    let other = message.get_one_arg()?.is_truthy();
    match method {
        BoolMethod::And => Ok(Object::Bool(value && other)),
        BoolMethod::Or => Ok(Object::Bool(value || other)),
    }
}

pub(crate) fn call_float_method(value: f64, message: Message) -> RunResult<Object> {
    let Ok(method) = FloatMethod::from_str(message.selector()) else {
        return Err(ExcType::no_method_error(message.selector(), "Float"));
    };
    match method {
        FloatMethod::Add => match message.get_one_arg()? {
            Object::Float(rhs) => Ok(Object::Float(value + rhs)),
            Object::Int(rhs) => Ok(Object::Float(value + rhs as f64)),
            other => Err(ExcType::coercion_error(other.type_name(), "Float")),
        },
        FloatMethod::IsZero => {
            message.check_zero_args()?;
            Ok(Object::Bool(value == 0.0))
        }
        FloatMethod::ToI => {
            message.check_zero_args()?;
            float_to_int(value).map(Object::Int)
        }
    }
}

/// 2^63 as a float.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

#[expect(clippy::cast_possible_truncation, reason = "range is checked before the cast")]
fn float_to_int(value: f64) -> RunResult<i64> {
    let truncated = value.trunc();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    if (-I64_BOUND..I64_BOUND).contains(&truncated) {
        Ok(truncated as i64)
    } else {
        Err(ExcType::integer_overflow("to_i"))
    }
}

pub(crate) fn call_symbol_method(selector: &Selector, message: &Message) -> RunResult<Object> {
    let Ok(method) = SymbolMethod::from_str(message.selector()) else {
        return Err(ExcType::no_method_error(message.selector(), "Symbol"));
    };
    message.check_zero_args()?;
    match method {
        SymbolMethod::ToSym => Ok(Object::Symbol(selector.clone())),
        SymbolMethod::Length | SymbolMethod::Size => Ok(count_to_object(selector.chars().count())),
    }
}
