use std::str::FromStr;

use strum::{EnumString, IntoStaticStr};

use crate::{
    exception::{ExcType, RunResult},
    message::Message,
    object::Object,
    types::{count_to_object, expect_string_arg, values_equal},
};

/// Array methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub(crate) enum ArrayMethod {
    Length,
    Size,
    #[strum(serialize = "empty?")]
    IsEmpty,
    First,
    Last,
    Push,
    #[strum(serialize = "<<")]
    Append,
    Pop,
    #[strum(serialize = "include?")]
    Include,
    Join,
    Reverse,
    Map,
    Each,
    ToA,
}

/// Dispatches a method call on an array value.
///
/// Mutating methods (`push`, `<<`, `pop`) change the array in place.
pub(crate) fn call_array_method(items: &mut Vec<Object>, message: Message) -> RunResult<Object> {
    let Ok(method) = ArrayMethod::from_str(message.selector()) else {
        return Err(ExcType::no_method_error(message.selector(), "Array"));
    };
    match method {
        ArrayMethod::Length | ArrayMethod::Size => {
            message.check_zero_args()?;
            Ok(count_to_object(items.len()))
        }
        ArrayMethod::IsEmpty => {
            message.check_zero_args()?;
            Ok(Object::Bool(items.is_empty()))
        }
        ArrayMethod::First => {
            message.check_zero_args()?;
            Ok(items.first().cloned().unwrap_or(Object::Nil))
        }
        ArrayMethod::Last => {
            message.check_zero_args()?;
            Ok(items.last().cloned().unwrap_or(Object::Nil))
        }
        ArrayMethod::Push => {
            let (_, args, _) = message.into_parts();
            items.extend(args);
            Ok(Object::Array(items.clone()))
        }
        ArrayMethod::Append => {
            items.push(message.get_one_arg()?);
            Ok(Object::Array(items.clone()))
        }
        ArrayMethod::Pop => {
            message.check_zero_args()?;
            Ok(items.pop().unwrap_or(Object::Nil))
        }
        ArrayMethod::Include => {
            let needle = message.get_one_arg()?;
            Ok(Object::Bool(items.iter().any(|item| values_equal(item, &needle))))
        }
        ArrayMethod::Join => {
            let separator = message.get_zero_one_arg()?.map(expect_string_arg).transpose()?;
            let mut out = String::new();
            join_into(items, separator.as_deref().unwrap_or(""), &mut out);
            Ok(Object::String(out))
        }
        ArrayMethod::Reverse => {
            message.check_zero_args()?;
            Ok(items.iter().rev().cloned().collect())
        }
        ArrayMethod::Map => {
            message.check_zero_args()?;
            let block = message.require_block()?;
            items
                .iter()
                .map(|item| block.call(std::slice::from_ref(item)))
                .collect::<RunResult<Vec<_>>>()
                .map(Object::Array)
        }
        ArrayMethod::Each => {
            message.check_zero_args()?;
            let block = message.require_block()?;
            for item in items.iter() {
                block.call(std::slice::from_ref(item))?;
            }
            Ok(Object::Array(items.clone()))
        }
        ArrayMethod::ToA => {
            message.check_zero_args()?;
            Ok(Object::Array(items.clone()))
        }
    }
}

/// Joins elements with their `to_s` form, flattening nested arrays.
fn join_into(items: &[Object], separator: &str, out: &mut String) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        match item {
            Object::Array(nested) => join_into(nested, separator, out),
            other => out.push_str(&other.to_s()),
        }
    }
}
