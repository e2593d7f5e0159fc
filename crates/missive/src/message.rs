use std::{fmt, rc::Rc};

use crate::{
    exception::{ExcType, RunResult},
    object::Object,
    selector::Selector,
};

/// A closure passed along with a message (`each_char { |c| ... }`).
///
/// Blocks are reference counted so a message can be forwarded, logged and
/// retried without cloning the closure itself.
#[derive(Clone)]
pub struct Block(Rc<BlockFn>);

type BlockFn = dyn Fn(&[Object]) -> RunResult<Object>;

impl Block {
    pub fn new(f: impl Fn(&[Object]) -> RunResult<Object> + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Runs the block with the given arguments.
    pub fn call(&self, args: &[Object]) -> RunResult<Object> {
        (self.0)(args)
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Block(..)")
    }
}

/// A message: the selector to dispatch, its positional arguments and an optional block.
///
/// The argument helpers (`check_zero_args`, `get_one_arg`, ...) validate arity the
/// same way for every built-in method and raise `ArgumentError` on mismatch.
#[derive(Debug, Clone)]
pub struct Message {
    selector: Selector,
    args: Vec<Object>,
    block: Option<Block>,
}

impl Message {
    /// Creates a message with no arguments and no block.
    #[must_use]
    pub fn new(selector: impl Into<Selector>) -> Self {
        Self {
            selector: selector.into(),
            args: Vec::new(),
            block: None,
        }
    }

    /// Creates a message with the given arguments.
    #[must_use]
    pub fn with_args(selector: impl Into<Selector>, args: Vec<Object>) -> Self {
        Self {
            selector: selector.into(),
            args,
            block: None,
        }
    }

    /// Appends one positional argument.
    #[must_use]
    pub fn arg(mut self, value: impl Into<Object>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Attaches a block.
    #[must_use]
    pub fn with_block(mut self, block: Block) -> Self {
        self.block = Some(block);
        self
    }

    #[must_use]
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    #[must_use]
    pub fn args(&self) -> &[Object] {
        &self.args
    }

    #[must_use]
    pub fn block(&self) -> Option<&Block> {
        self.block.as_ref()
    }

    #[must_use]
    pub fn into_parts(self) -> (Selector, Vec<Object>, Option<Block>) {
        (self.selector, self.args, self.block)
    }

    /// Checks that no positional arguments were passed.
    pub fn check_zero_args(&self) -> RunResult<()> {
        if self.args.is_empty() {
            Ok(())
        } else {
            Err(ExcType::argument_count(self.args.len(), "0"))
        }
    }

    /// Checks that exactly one positional argument was passed, returning it.
    pub fn get_one_arg(self) -> RunResult<Object> {
        let given = self.args.len();
        let mut args = self.args.into_iter();
        match (args.next(), args.next()) {
            (Some(a), None) => Ok(a),
            _ => Err(ExcType::argument_count(given, "1")),
        }
    }

    /// Checks that zero or one positional argument was passed.
    pub fn get_zero_one_arg(self) -> RunResult<Option<Object>> {
        let given = self.args.len();
        let mut args = self.args.into_iter();
        match (args.next(), args.next()) {
            (a, None) => Ok(a),
            _ => Err(ExcType::argument_count(given, "0..1")),
        }
    }

    /// Returns the block, raising `ArgumentError` if none was given.
    pub fn require_block(&self) -> RunResult<&Block> {
        self.block
            .as_ref()
            .ok_or_else(|| ExcType::no_block_given(&self.selector))
    }

    /// Unwraps a `send`-style message into the message it names.
    ///
    /// `send(:channel=, 10)` becomes `channel=(10)`; the block, if any, moves to
    /// the inner message. Raises `ArgumentError` when no name was given and
    /// `TypeError` when the name is neither a symbol nor a string.
    pub fn shift_selector(self) -> RunResult<Self> {
        let Self { args, block, .. } = self;
        let mut args = args.into_iter();
        let Some(name) = args.next() else {
            return Err(ExcType::no_method_name());
        };
        Ok(Self {
            selector: name.to_selector()?,
            args: args.collect(),
            block,
        })
    }
}
