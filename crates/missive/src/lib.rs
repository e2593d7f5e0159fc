#![doc = include_str!("../../../README.md")]

mod class;
mod exception;
mod message;
mod object;
mod proxy;
pub mod receiver;
mod selector;
pub mod tracer;
mod types;

pub use crate::{
    class::{Class, Instance, Method},
    exception::{ExcType, Exception, RunResult},
    message::{Block, Message},
    object::Object,
    proxy::{CallReport, Proxy, ProxyMethod},
    receiver::{Dispatch, KernelMethod, Receiver, respond_to, send},
    selector::Selector,
    tracer::{CallTracer, LogTracer, NoopTracer, RecordingTracer, StderrTracer, TraceEvent},
};
