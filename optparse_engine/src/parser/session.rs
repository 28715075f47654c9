use std::collections::HashMap;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::coerce::Coercer;
use crate::constant::*;
use crate::model::{RawArgument, Value};
use crate::parser::{MergePolicy, OptionParser, ParseError};
use crate::registry::derive_key;

/// The parsed option values, by key.
pub type Opts = HashMap<String, Value>;

/// The transient state of a single parse.
///
/// Handlers and coercers record values through the session.
#[derive(Debug)]
pub struct Session<'p> {
    parser: &'p OptionParser,
    unrecognised: Vec<String>,
    opts: Opts,
}

impl<'p> Session<'p> {
    pub(crate) fn new(parser: &'p OptionParser) -> Self {
        Self {
            parser,
            unrecognised: Vec::default(),
            opts: Opts::default(),
        }
    }

    /// The option parser running this session.
    pub fn parser(&self) -> &'p OptionParser {
        self.parser
    }

    /// The values recorded so far.
    pub fn opts(&self) -> &Opts {
        &self.opts
    }

    /// The unrecognised tokens so far.
    pub fn unrecognised(&self) -> &[String] {
        &self.unrecognised
    }

    /// The key for an option spelling.
    /// An unregistered spelling is keyed as if it were registered alone.
    pub fn key_of(&self, option: &str) -> String {
        match self.parser.registry().key_of(option) {
            Some(key) => key.to_string(),
            None => derive_key(option),
        }
    }

    /// Record a value for the option, accumulating repeats.
    ///
    /// The first value is stored as is.
    /// The second turns the stored value into a list of both.
    /// Later values are appended to that list.
    pub fn set(&mut self, option: &str, value: Value) {
        let key = self.key_of(option);

        match self.opts.remove(&key) {
            Some(Value::List(mut items)) => {
                items.push(value);
                self.opts.insert(key, Value::List(items));
            }
            Some(existing) => {
                self.opts.insert(key, Value::List(vec![existing, value]));
            }
            None => {
                self.opts.insert(key, value);
            }
        }
    }

    /// Record a value for the option, replacing any existing value.
    pub fn assign(&mut self, option: &str, value: Value) {
        let key = self.key_of(option);
        self.opts.insert(key, value);
    }

    /// Add an unrecognised token.
    pub fn push_unrecognised(&mut self, token: impl Into<String>) {
        self.unrecognised.push(token.into());
    }

    /// Run a coercer, reporting its rejection through [`Session::opterr`].
    pub fn coerce(
        &self,
        coercer: &Coercer,
        option: &str,
        raw: RawArgument<'_>,
    ) -> Result<Value, i32> {
        coercer(self, option, raw).map_err(|error| self.opterr(error))
    }

    /// Report an option error, followed by a hint to try `--help`.
    /// Returns the exit code with which parsing should end.
    pub fn opterr(&self, message: impl std::fmt::Display) -> i32 {
        let program = self.parser.program();
        let user_interface = self.parser.user_interface();
        user_interface.print_error(ParseError::new(program, message));
        user_interface.print_hint(format!(
            "{program}: Try '{program} {HELP_SPELLING}' for help."
        ));
        EXIT_OPTION_ERROR
    }

    /// Print a message.
    pub fn print(&self, message: impl Into<String>) {
        self.parser.user_interface().print(message.into());
    }

    pub(crate) fn merge_defaults(&mut self, defaults: &[(&str, Value)], merge_policy: MergePolicy) {
        for (key, value) in defaults {
            let replace = match self.opts.get(*key) {
                None => true,
                Some(existing) => merge_policy == MergePolicy::Falsy && existing.is_falsy(),
            };

            if replace {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Defaulting '{key}' to {value:?}.");
                }

                self.opts.insert(key.to_string(), value.clone());
            }
        }
    }

    pub(crate) fn finish(self) -> Parsed<'p> {
        let Session {
            parser,
            unrecognised,
            opts,
        } = self;

        Parsed {
            parser,
            unrecognised,
            opts,
        }
    }
}

/// A value found by [`Parsed::lookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// A parsed option value.
    Opt(&'a Value),
    /// A parser attribute (ex: `program`).
    Attribute(&'a str),
}

/// The result of a parse: the unrecognised tokens, and the option values.
#[derive(Debug)]
pub struct Parsed<'p> {
    parser: &'p OptionParser,
    unrecognised: Vec<String>,
    opts: Opts,
}

impl<'p> Parsed<'p> {
    /// The tokens not matched to any option, in order (typically the positional arguments).
    pub fn unrecognised(&self) -> &[String] {
        &self.unrecognised
    }

    /// The option values, by key.
    pub fn opts(&self) -> &Opts {
        &self.opts
    }

    /// The option parser that produced this result.
    pub fn parser(&self) -> &'p OptionParser {
        self.parser
    }

    /// Get an option value by its key, or by the name of any of its aliases.
    ///
    /// For example, the group `-n, --dryrun, --dry-run` records under `dry_run`, which may also be read as `dryrun` or `n`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.opts.get(name).or_else(|| {
            self.parser
                .registry()
                .resolve(name)
                .and_then(|key| self.opts.get(key))
        })
    }

    /// Get an option value, falling back to the parser attributes (ex: `program`).
    pub fn lookup(&self, name: &str) -> Option<Lookup<'_>> {
        match self.get(name) {
            Some(value) => Some(Lookup::Opt(value)),
            None => self.parser.attribute(name).map(Lookup::Attribute),
        }
    }

    /// The program name.
    pub fn program(&self) -> &'p str {
        self.parser.program()
    }

    /// Take the unrecognised tokens and option values.
    pub fn into_parts(self) -> (Vec<String>, Opts) {
        (self.unrecognised, self.opts)
    }
}
