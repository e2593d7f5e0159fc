//! Message dispatch with method-missing fallback.
//!
//! Every object that can receive messages implements [`Receiver`]. Callers never
//! invoke receiver methods directly; they go through [`send`], which resolves a
//! selector in a fixed order:
//!
//! 1. operations the receiver defines itself ([`Receiver::defines`]),
//! 2. kernel operations every receiver answers ([`KernelMethod`]),
//! 3. the receiver's [`Receiver::method_missing`] fallback.
//!
//! [`respond_to`] answers the matching capability query. It only knows about
//! the fallback through [`Receiver::respond_to_missing`], so a receiver whose
//! `method_missing` catches everything but leaves `respond_to_missing` at its
//! default will handle messages it claims not to respond to.

use std::{fmt, str::FromStr};

use strum::{Display, EnumString, IntoStaticStr};

use crate::{
    exception::{ExcType, RunResult},
    message::Message,
    object::Object,
};

/// An object that messages can be sent to.
///
/// Implementations describe their own operations through [`defines`](Self::defines)
/// and [`call_defined`](Self::call_defined); everything else is handled by
/// [`send`].
pub trait Receiver: fmt::Debug {
    /// Class name shown by `class`, `inspect` and in `NoMethodError` messages.
    fn class_name(&self) -> &str;

    /// Returns true if this receiver defines `selector` itself.
    ///
    /// Kernel operations and anything handled by `method_missing` are not included.
    fn defines(&self, selector: &str) -> bool;

    /// Runs an operation this receiver defines.
    ///
    /// Only called by [`send`] after `defines` returned true for the selector.
    fn call_defined(&mut self, message: Message) -> RunResult<Object>;

    /// Fallback for messages nothing else handles.
    ///
    /// The default raises `NoMethodError` naming the selector.
    fn method_missing(&mut self, message: Message) -> RunResult<Object> {
        Err(ExcType::no_method_error(message.selector(), self.class_name()))
    }

    /// Capability query companion to `method_missing`.
    ///
    /// Override together with `method_missing` so `respond_to` stays truthful.
    fn respond_to_missing(&self, _selector: &str) -> bool {
        false
    }

    /// Inspect form used by the kernel `inspect` and `to_s` operations.
    fn inspect(&self) -> String {
        format!("#<{}>", self.class_name())
    }
}

/// Operations every receiver answers unless it defines the selector itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
pub enum KernelMethod {
    #[strum(serialize = "respond_to?")]
    RespondTo,
    #[strum(serialize = "send")]
    Send,
    #[strum(serialize = "__send__")]
    UnderscoreSend,
    /// Like `send`, but refuses non-public kernel operations.
    #[strum(serialize = "public_send")]
    PublicSend,
    /// Explicit call of the fallback: `method_missing(:name, *args)`.
    #[strum(serialize = "method_missing")]
    MethodMissing,
    #[strum(serialize = "class")]
    Class,
    #[strum(serialize = "instance_of?")]
    InstanceOf,
    #[strum(serialize = "nil?")]
    IsNil,
    /// Identity comparison. An argument value is never the receiver itself.
    #[strum(serialize = "==")]
    Eq,
    #[strum(serialize = "!=")]
    Ne,
    #[strum(serialize = "!")]
    Not,
    #[strum(serialize = "inspect")]
    Inspect,
    #[strum(serialize = "to_s")]
    ToS,
}

impl KernelMethod {
    /// Returns false for operations that are dispatchable but not advertised by
    /// `respond_to` and refused by `public_send`.
    #[must_use]
    pub fn is_public(self) -> bool {
        self != Self::MethodMissing
    }
}

/// Sends `message` to `receiver`.
///
/// Lookup order is the receiver's own operations, then kernel operations, then
/// `method_missing`. Errors raised along the way propagate unchanged.
pub fn send<R: Receiver + ?Sized>(receiver: &mut R, message: Message) -> RunResult<Object> {
    if receiver.defines(message.selector()) {
        return receiver.call_defined(message);
    }
    if let Ok(kernel) = KernelMethod::from_str(message.selector()) {
        return call_kernel(receiver, kernel, message);
    }
    receiver.method_missing(message)
}

/// Returns true if `receiver` can handle `selector`.
///
/// The union of the receiver's own operations, the public kernel operations and
/// whatever `respond_to_missing` reports.
pub fn respond_to<R: Receiver + ?Sized>(receiver: &R, selector: &str) -> bool {
    receiver.defines(selector)
        || KernelMethod::from_str(selector).is_ok_and(KernelMethod::is_public)
        || receiver.respond_to_missing(selector)
}

fn call_kernel<R: Receiver + ?Sized>(receiver: &mut R, method: KernelMethod, message: Message) -> RunResult<Object> {
    match method {
        KernelMethod::RespondTo => {
            let name = message.get_one_arg()?.to_selector()?;
            Ok(Object::Bool(respond_to(receiver, &name)))
        }
        KernelMethod::Send | KernelMethod::UnderscoreSend => send(receiver, message.shift_selector()?),
        KernelMethod::PublicSend => {
            let inner = message.shift_selector()?;
            let private = !receiver.defines(inner.selector())
                && KernelMethod::from_str(inner.selector()).is_ok_and(|kernel| !kernel.is_public());
            if private {
                return Err(ExcType::no_method_error(inner.selector(), receiver.class_name()));
            }
            send(receiver, inner)
        }
        KernelMethod::MethodMissing => receiver.method_missing(message.shift_selector()?),
        KernelMethod::Class => {
            message.check_zero_args()?;
            Ok(Object::String(receiver.class_name().to_owned()))
        }
        KernelMethod::InstanceOf => {
            let name = message.get_one_arg()?.to_selector()?;
            Ok(Object::Bool(receiver.class_name() == name.as_str()))
        }
        KernelMethod::IsNil | KernelMethod::Not => {
            message.check_zero_args()?;
            Ok(Object::Bool(false))
        }
        KernelMethod::Eq => {
            message.get_one_arg()?;
            Ok(Object::Bool(false))
        }
        KernelMethod::Ne => {
            message.get_one_arg()?;
            Ok(Object::Bool(true))
        }
        KernelMethod::Inspect | KernelMethod::ToS => {
            message.check_zero_args()?;
            Ok(Object::String(receiver.inspect()))
        }
    }
}

/// Method-call syntax for [`send`] and [`respond_to`] on any receiver.
///
/// ```
/// use missive::{Dispatch, Message, Object};
///
/// let mut text = Object::from("Code Mash 2009");
/// assert_eq!(text.send(Message::new("upcase")).unwrap(), Object::from("CODE MASH 2009"));
/// assert!(text.respond_to("split"));
/// assert!(!text.respond_to("no_such_method"));
/// ```
pub trait Dispatch: Receiver {
    /// See [`send`].
    fn send(&mut self, message: Message) -> RunResult<Object> {
        send(self, message)
    }

    /// See [`respond_to`].
    fn respond_to(&self, selector: &str) -> bool {
        respond_to(self, selector)
    }
}

impl<R: Receiver + ?Sized> Dispatch for R {}
