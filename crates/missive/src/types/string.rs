use std::str::FromStr;

use strum::{EnumString, IntoStaticStr};

use crate::{
    exception::{ExcType, RunResult},
    message::Message,
    object::Object,
    selector::Selector,
    types::{count_to_object, expect_string_arg},
};

/// String methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub(crate) enum StrMethod {
    Upcase,
    #[strum(serialize = "upcase!")]
    UpcaseBang,
    Downcase,
    #[strum(serialize = "downcase!")]
    DowncaseBang,
    Capitalize,
    Reverse,
    Strip,
    Split,
    Length,
    Size,
    #[strum(serialize = "empty?")]
    IsEmpty,
    #[strum(serialize = "include?")]
    Include,
    #[strum(serialize = "start_with?")]
    StartWith,
    #[strum(serialize = "end_with?")]
    EndWith,
    #[strum(serialize = "+")]
    Plus,
    #[strum(serialize = "<<")]
    Append,
    ToSym,
    ToI,
    Chars,
    EachChar,
}

/// Dispatches a method call on a string value.
///
/// Bang methods modify the string in place and return the new contents, or `nil`
/// when nothing changed.
pub(crate) fn call_str_method(s: &mut String, message: Message) -> RunResult<Object> {
    let Ok(method) = StrMethod::from_str(message.selector()) else {
        return Err(ExcType::no_method_error(message.selector(), "String"));
    };
    match method {
        StrMethod::Upcase => {
            message.check_zero_args()?;
            Ok(Object::String(s.to_uppercase()))
        }
        StrMethod::UpcaseBang => {
            message.check_zero_args()?;
            let upper = s.to_uppercase();
            Ok(replace_if_changed(s, upper))
        }
        StrMethod::Downcase => {
            message.check_zero_args()?;
            Ok(Object::String(s.to_lowercase()))
        }
        StrMethod::DowncaseBang => {
            message.check_zero_args()?;
            let lower = s.to_lowercase();
            Ok(replace_if_changed(s, lower))
        }
        StrMethod::Capitalize => {
            message.check_zero_args()?;
            Ok(Object::String(capitalize(s)))
        }
        StrMethod::Reverse => {
            message.check_zero_args()?;
            Ok(Object::String(s.chars().rev().collect()))
        }
        StrMethod::Strip => {
            message.check_zero_args()?;
            Ok(Object::String(s.trim().to_owned()))
        }
        StrMethod::Split => {
            let separator = message.get_zero_one_arg()?.map(expect_string_arg).transpose()?;
            Ok(split(s, separator.as_deref()))
        }
        StrMethod::Length | StrMethod::Size => {
            message.check_zero_args()?;
            Ok(count_to_object(s.chars().count()))
        }
        StrMethod::IsEmpty => {
            message.check_zero_args()?;
            Ok(Object::Bool(s.is_empty()))
        }
        StrMethod::Include => {
            let needle = expect_string_arg(message.get_one_arg()?)?;
            Ok(Object::Bool(s.contains(&needle)))
        }
        StrMethod::StartWith => {
            let prefix = expect_string_arg(message.get_one_arg()?)?;
            Ok(Object::Bool(s.starts_with(&prefix)))
        }
        StrMethod::EndWith => {
            let suffix = expect_string_arg(message.get_one_arg()?)?;
            Ok(Object::Bool(s.ends_with(&suffix)))
        }
        StrMethod::Plus => {
            let other = expect_string_arg(message.get_one_arg()?)?;
            Ok(Object::String(format!("{s}{other}")))
        }
        StrMethod::Append => {
            let other = expect_string_arg(message.get_one_arg()?)?;
            s.push_str(&other);
            Ok(Object::String(s.clone()))
        }
        StrMethod::ToSym => {
            message.check_zero_args()?;
            Ok(Object::Symbol(Selector::from(s.as_str())))
        }
        StrMethod::ToI => {
            message.check_zero_args()?;
            parse_leading_int(s).map(Object::Int)
        }
        StrMethod::Chars => {
            message.check_zero_args()?;
            Ok(s.chars().map(|c| Object::String(c.to_string())).collect())
        }
        StrMethod::EachChar => {
            message.check_zero_args()?;
            let block = message.require_block()?;
            for c in s.chars() {
                block.call(&[Object::String(c.to_string())])?;
            }
            Ok(Object::String(s.clone()))
        }
    }
}

fn replace_if_changed(s: &mut String, replacement: String) -> Object {
    if *s == replacement {
        Object::Nil
    } else {
        *s = replacement;
        Object::String(s.clone())
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

/// Splits on a separator, or on runs of whitespace when the separator is absent
/// or a single space. Trailing empty fields are dropped.
fn split(s: &str, separator: Option<&str>) -> Object {
    let mut parts: Vec<&str> = match separator {
        None | Some(" ") => s.split_whitespace().collect(),
        Some("") => return s.chars().map(|c| Object::String(c.to_string())).collect(),
        Some(separator) => s.split(separator).collect(),
    };
    while parts.last().is_some_and(|part| part.is_empty()) {
        parts.pop();
    }
    parts.into_iter().map(Object::from).collect()
}

/// Parses the leading integer of a string, ignoring leading whitespace and any
/// trailing garbage. A string with no leading digits converts to 0.
fn parse_leading_int(s: &str) -> RunResult<i64> {
    let trimmed = s.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return Ok(0);
    }
    let digits = &rest[..digits_len];
    let parsed = if negative {
        format!("-{digits}").parse::<i64>()
    } else {
        digits.parse::<i64>()
    };
    parsed.map_err(|_| ExcType::integer_overflow("to_i"))
}
