use std::rc::Rc;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::coerce::Payload;
use crate::constant::*;
use crate::model::{RawArgument, Value};
use crate::parser::{OptionError, Session};

/// A caller supplied option handler.
///
/// Invoked with the parse [`Session`], the expanded tokens, the index of the option token, and the option's payload.
/// Returns the index of the next token to scan, or the exit code with which parsing ends.
pub type HandlerFn =
    Rc<dyn Fn(&mut Session<'_>, &[String], usize, Option<&Payload>) -> Result<usize, i32>>;

/// The strategy governing how many tokens an option consumes, and what it stores.
#[derive(Clone)]
pub enum Handler {
    /// Consumes only the option; stores `true`.
    Flag,
    /// Consumes the following token as an argument, unless it looks like an option.
    Optional,
    /// Always consumes the following token as an argument.
    Required,
    /// Ends option scanning; every remaining token is unrecognised.
    Finished,
    /// Prints the help text and ends parsing successfully.
    Help,
    /// Prints the version text and ends parsing successfully.
    Version,
    /// A caller supplied handler.
    Custom(HandlerFn),
}

impl Handler {
    /// Create a custom handler.
    ///
    /// ### Example
    /// ```
    /// # use optparse_engine as optparse;
    /// use optparse::Handler;
    ///
    /// // Ignore the option entirely.
    /// let ignore = Handler::custom(|_session, _tokens, index, _payload| Ok(index + 1));
    /// ```
    pub fn custom<F>(handler: F) -> Self
    where
        F: Fn(&mut Session<'_>, &[String], usize, Option<&Payload>) -> Result<usize, i32> + 'static,
    {
        Handler::Custom(Rc::new(handler))
    }

    /// Whether this handler accepts an argument.
    /// The expander uses this to split `-oVALUE` into `-o VALUE`.
    pub fn takes_argument(&self) -> bool {
        matches!(self, Handler::Optional | Handler::Required)
    }

    /// Run this handler against the option token at `tokens[index]`.
    pub fn invoke(
        &self,
        session: &mut Session<'_>,
        tokens: &[String],
        index: usize,
        payload: Option<&Payload>,
    ) -> Result<usize, i32> {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Handling '{}' at {index} with {self:?}.", tokens[index]);
        }

        match self {
            Handler::Flag => flag(session, tokens, index, payload),
            Handler::Optional => optional(session, tokens, index, payload),
            Handler::Required => required(session, tokens, index, payload),
            Handler::Finished => finished(session, tokens, index),
            Handler::Help => {
                session.print(session.parser().help_text());
                Err(EXIT_SUCCESS)
            }
            Handler::Version => {
                session.print(session.parser().version_text());
                Err(EXIT_SUCCESS)
            }
            Handler::Custom(handler) => handler(session, tokens, index, payload),
        }
    }
}

impl std::fmt::Debug for Handler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Handler::Flag => write!(f, "Flag"),
            Handler::Optional => write!(f, "Optional"),
            Handler::Required => write!(f, "Required"),
            Handler::Finished => write!(f, "Finished"),
            Handler::Help => write!(f, "Help"),
            Handler::Version => write!(f, "Version"),
            Handler::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

fn flag(
    session: &mut Session<'_>,
    tokens: &[String],
    index: usize,
    payload: Option<&Payload>,
) -> Result<usize, i32> {
    let option = &tokens[index];

    match payload {
        None => session.assign(option, Value::Bool(true)),
        Some(Payload::Fixed(value)) => session.assign(option, value.clone()),
        Some(Payload::Transform(coercer)) => {
            let value = session.coerce(coercer, option, RawArgument::Switch)?;
            session.set(option, value);
        }
    }

    Ok(index + 1)
}

fn optional(
    session: &mut Session<'_>,
    tokens: &[String],
    index: usize,
    payload: Option<&Payload>,
) -> Result<usize, i32> {
    if let Some(next) = tokens.get(index + 1) {
        if !next.starts_with('-') {
            return required(session, tokens, index, payload);
        }
    }

    let option = &tokens[index];
    let value = match payload {
        None => Value::Bool(true),
        Some(Payload::Fixed(value)) => value.clone(),
        Some(Payload::Transform(coercer)) => session.coerce(coercer, option, RawArgument::Missing)?,
    };
    session.set(option, value);
    Ok(index + 1)
}

fn required(
    session: &mut Session<'_>,
    tokens: &[String],
    index: usize,
    payload: Option<&Payload>,
) -> Result<usize, i32> {
    let option = &tokens[index];
    let argument = match tokens.get(index + 1) {
        Some(argument) => argument,
        None => {
            return Err(session.opterr(OptionError::MissingArgument {
                option: option.clone(),
            }));
        }
    };

    let value = match payload {
        None => Value::Str(argument.clone()),
        Some(Payload::Fixed(value)) => value.clone(),
        Some(Payload::Transform(coercer)) => {
            session.coerce(coercer, option, RawArgument::Given(argument))?
        }
    };
    session.set(option, value);
    Ok(index + 2)
}

fn finished(session: &mut Session<'_>, tokens: &[String], index: usize) -> Result<usize, i32> {
    for token in &tokens[index + 1..] {
        session.push_unrecognised(token.clone());
    }

    Ok(tokens.len())
}
