//! Classes defined at runtime.
//!
//! A [`Class`] is a named method table built with closures, optionally with a
//! `method_missing` handler and a matching `respond_to_missing` hook. Instances
//! carry their own instance variables and dispatch through the class.
//!
//! ```
//! use missive::{Class, Dispatch, Instance, Message, Object};
//!
//! let catcher = Class::new("MessageCatcher")
//!     .define("caught?", |_this, message| {
//!         message.check_zero_args()?;
//!         Ok(Object::Bool(true))
//!     })
//!     .build();
//!
//! let mut mc = Instance::new(&catcher);
//! assert_eq!(mc.send(Message::new("caught?")).unwrap(), Object::Bool(true));
//! assert!(mc.respond_to("caught?"));
//! assert!(!mc.respond_to("does_not_exist"));
//! ```

use std::{fmt, rc::Rc};

use indexmap::IndexMap;

use crate::{
    exception::{ExcType, RunResult},
    message::Message,
    object::Object,
    receiver::Receiver,
    selector::Selector,
};

/// A method body: receives the instance and the message it was sent.
pub type Method = Rc<dyn Fn(&mut Instance, Message) -> RunResult<Object>>;

type RespondHook = Rc<dyn Fn(&str) -> bool>;

/// A named method table with optional fallback handlers.
///
/// Built with the consuming builder methods and frozen into an `Rc` by
/// [`build`](Self::build). [`reopen`](Self::reopen) copies a built class back
/// into a builder; instances created before reopening keep the old table.
#[derive(Clone)]
pub struct Class {
    name: String,
    methods: IndexMap<Selector, Method>,
    method_missing: Option<Method>,
    respond_to_missing: Option<RespondHook>,
}

impl Class {
    /// Starts an empty class with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: IndexMap::new(),
            method_missing: None,
            respond_to_missing: None,
        }
    }

    /// Defines (or redefines) a method.
    #[must_use]
    pub fn define(
        mut self,
        selector: impl Into<Selector>,
        method: impl Fn(&mut Instance, Message) -> RunResult<Object> + 'static,
    ) -> Self {
        self.methods.insert(selector.into(), Rc::new(method));
        self
    }

    /// Defines a reader `name` returning instance variable `@name` (`nil` when unset).
    #[must_use]
    pub fn attr_reader(self, name: &str) -> Self {
        let ivar = format!("@{name}");
        self.define(name, move |this, message| {
            message.check_zero_args()?;
            Ok(this.ivar(&ivar))
        })
    }

    /// Defines a writer `name=` storing its argument in `@name` and returning it.
    #[must_use]
    pub fn attr_writer(self, name: &str) -> Self {
        let ivar = format!("@{name}");
        self.define(format!("{name}="), move |this, message| {
            let value = message.get_one_arg()?;
            this.set_ivar(ivar.clone(), value.clone());
            Ok(value)
        })
    }

    /// Defines both [`attr_reader`](Self::attr_reader) and [`attr_writer`](Self::attr_writer).
    #[must_use]
    pub fn attr_accessor(self, name: &str) -> Self {
        self.attr_reader(name).attr_writer(name)
    }

    /// Installs the fallback run for messages this class does not define.
    ///
    /// Handlers that only catch some selectors should end with
    /// [`Instance::super_method_missing`] for the rest.
    #[must_use]
    pub fn on_method_missing(
        mut self,
        handler: impl Fn(&mut Instance, Message) -> RunResult<Object> + 'static,
    ) -> Self {
        self.method_missing = Some(Rc::new(handler));
        self
    }

    /// Installs the capability hook consulted by `respond_to` for undefined selectors.
    #[must_use]
    pub fn on_respond_to_missing(mut self, hook: impl Fn(&str) -> bool + 'static) -> Self {
        self.respond_to_missing = Some(Rc::new(hook));
        self
    }

    /// Freezes the class so instances can share it.
    #[must_use]
    pub fn build(self) -> Rc<Self> {
        Rc::new(self)
    }

    /// Copies a built class back into a builder to add or replace methods.
    #[must_use]
    pub fn reopen(class: &Rc<Self>) -> Self {
        Self::clone(class)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Defined method names in definition order.
    pub fn method_names(&self) -> impl Iterator<Item = &Selector> {
        self.methods.keys()
    }

    #[must_use]
    pub fn has_method(&self, selector: &str) -> bool {
        self.methods.contains_key(selector)
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.name)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .field("method_missing", &self.method_missing.is_some())
            .field("respond_to_missing", &self.respond_to_missing.is_some())
            .finish()
    }
}

/// An object of a runtime-defined [`Class`].
#[derive(Debug, Clone)]
pub struct Instance {
    class: Rc<Class>,
    ivars: IndexMap<String, Object>,
}

impl Instance {
    #[must_use]
    pub fn new(class: &Rc<Class>) -> Self {
        Self {
            class: Rc::clone(class),
            ivars: IndexMap::new(),
        }
    }

    /// Reads an instance variable; unset variables read as `nil`.
    #[must_use]
    pub fn ivar(&self, name: &str) -> Object {
        self.ivars.get(name).cloned().unwrap_or(Object::Nil)
    }

    pub fn set_ivar(&mut self, name: impl Into<String>, value: Object) {
        self.ivars.insert(name.into(), value);
    }

    /// The default fallback: raises `NoMethodError` for the message's selector.
    pub fn super_method_missing(&self, message: &Message) -> RunResult<Object> {
        Err(ExcType::no_method_error(message.selector(), self.class.name()))
    }
}

impl Receiver for Instance {
    fn class_name(&self) -> &str {
        self.class.name()
    }

    fn defines(&self, selector: &str) -> bool {
        self.class.has_method(selector)
    }

    fn call_defined(&mut self, message: Message) -> RunResult<Object> {
        let Some(method) = self.class.methods.get(message.selector().as_str()).cloned() else {
            return self.super_method_missing(&message);
        };
        method(self, message)
    }

    fn method_missing(&mut self, message: Message) -> RunResult<Object> {
        match self.class.method_missing.clone() {
            Some(handler) => handler(self, message),
            None => self.super_method_missing(&message),
        }
    }

    fn respond_to_missing(&self, selector: &str) -> bool {
        self.class.respond_to_missing.as_ref().is_some_and(|hook| hook(selector))
    }

    fn inspect(&self) -> String {
        if self.ivars.is_empty() {
            return format!("#<{}>", self.class.name());
        }
        let ivars: Vec<String> = self.ivars.iter().map(|(name, value)| format!("{name}={value}")).collect();
        format!("#<{} {}>", self.class.name(), ivars.join(", "))
    }
}
