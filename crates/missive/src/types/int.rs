use std::str::FromStr;

use strum::{EnumString, IntoStaticStr};

use crate::{
    exception::{ExcType, Exception, RunResult},
    message::Message,
    object::Object,
};

/// Integer methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub(crate) enum IntMethod {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mul,
    #[strum(serialize = "/")]
    Div,
    #[strum(serialize = "<")]
    Lt,
    #[strum(serialize = ">")]
    Gt,
    #[strum(serialize = "zero?")]
    IsZero,
    Succ,
    ToI,
    Times,
}

/// Dispatches a method call on an integer value.
///
/// Integer arithmetic is checked; a result outside `i64` raises `RangeError`.
/// A `Float` operand switches the operation to floating point.
pub(crate) fn call_int_method(value: i64, message: Message) -> RunResult<Object> {
    let Ok(method) = IntMethod::from_str(message.selector()) else {
        return Err(ExcType::no_method_error(message.selector(), "Integer"));
    };
    let name: &'static str = method.into();
    match method {
        IntMethod::Add | IntMethod::Sub | IntMethod::Mul | IntMethod::Div => {
            match message.get_one_arg()? {
                Object::Int(rhs) => int_arith(method, value, rhs).map(Object::Int),
                Object::Float(rhs) => Ok(Object::Float(float_arith(method, value as f64, rhs))),
                other => Err(ExcType::coercion_error(other.type_name(), "Integer")),
            }
        }
        IntMethod::Lt | IntMethod::Gt => {
            let rhs = message.get_one_arg()?;
            let ordering = match &rhs {
                Object::Int(r) => value.partial_cmp(r),
                Object::Float(r) => (value as f64).partial_cmp(r),
                other => return Err(comparison_failed("Integer", other.type_name())),
            };
            let expected = if method == IntMethod::Lt {
                std::cmp::Ordering::Less
            } else {
                std::cmp::Ordering::Greater
            };
            Ok(Object::Bool(ordering == Some(expected)))
        }
        IntMethod::IsZero => {
            message.check_zero_args()?;
            Ok(Object::Bool(value == 0))
        }
        IntMethod::Succ => {
            message.check_zero_args()?;
            value.checked_add(1).map(Object::Int).ok_or_else(|| ExcType::integer_overflow(name))
        }
        IntMethod::ToI => {
            message.check_zero_args()?;
            Ok(Object::Int(value))
        }
        IntMethod::Times => {
            message.check_zero_args()?;
            let block = message.require_block()?;
            for i in 0..value.max(0) {
                block.call(&[Object::Int(i)])?;
            }
            Ok(Object::Int(value))
        }
    }
}

fn int_arith(method: IntMethod, lhs: i64, rhs: i64) -> RunResult<i64> {
    let name: &'static str = method.into();
    let result = match method {
        IntMethod::Add => lhs.checked_add(rhs),
        IntMethod::Sub => lhs.checked_sub(rhs),
        IntMethod::Mul => lhs.checked_mul(rhs),
        IntMethod::Div => {
            if rhs == 0 {
                return Err(ExcType::divided_by_zero());
            }
            floor_div(lhs, rhs)
        }
        _ => None,
    };
    result.ok_or_else(|| ExcType::integer_overflow(name))
}

/// Integer division rounding toward negative infinity (`-7 / 2 == -4`).
fn floor_div(lhs: i64, rhs: i64) -> Option<i64> {
    let quotient = lhs.checked_div(rhs)?;
    if lhs % rhs != 0 && ((lhs < 0) != (rhs < 0)) {
        quotient.checked_sub(1)
    } else {
        Some(quotient)
    }
}

fn float_arith(method: IntMethod, lhs: f64, rhs: f64) -> f64 {
    match method {
        IntMethod::Sub => lhs - rhs,
        IntMethod::Mul => lhs * rhs,
        IntMethod::Div => lhs / rhs,
        _ => lhs + rhs,
    }
}

fn comparison_failed(lhs: &str, rhs: &str) -> Exception {
    Exception::new(ExcType::ArgumentError, format!("comparison of {lhs} with {rhs} failed"))
}
