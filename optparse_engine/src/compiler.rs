use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

mod classify;

pub use classify::HandlerKind;

use crate::parser::ConfigError;
use crate::registry::Registry;

/// The spec text cannot be compiled into an option parser.
#[derive(Debug, Error)]
pub enum SpecError {
    /// The text does not have the `<version>\n...Usage: <program>...` shape.
    #[error("Spec error: the spec must match '<version>\\n...Usage: <program>...'.")]
    Shape,

    /// A single option line declares two different handlers.
    #[error("Spec error: option line '{line}' declares both {first} and {second}.")]
    Ambiguous {
        /// The offending option line.
        line: String,
        /// The handler declared first.
        first: HandlerKind,
        /// The conflicting handler.
        second: HandlerKind,
    },

    /// An option line cannot be registered.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Everything derived from the spec text.
#[derive(Debug)]
pub(crate) struct Compiled {
    pub(crate) program: String,
    pub(crate) version: String,
    pub(crate) version_text: String,
    pub(crate) help_text: String,
    pub(crate) registry: Registry,
}

// 1: version text, 2: version, 3: help text, 4: program.
static SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A([^\n]*?(\S+)[ \t]*\n.*?)\s*(Usage:[ \t]+(\S+).*?)\s*\z")
        .expect("static regex must compile")
});

/// Compile the spec text.
///
/// Compilation happens in two stages:
/// 1. Classification reduces each option line of the help text to its aliases and declared handler.
/// 2. Registration installs each option line as one alias group.
pub(crate) fn compile(spec: &str) -> Result<Compiled, SpecError> {
    let captures = SHAPE.captures(spec).ok_or(SpecError::Shape)?;
    let version_text = captures[1].trim_end().to_string();
    let version = captures[2].to_string();
    let help_text = captures[3].to_string();
    let program = captures[4].to_string();

    #[cfg(feature = "tracing_debug")]
    {
        debug!("Compiling option parser for '{program}' version '{version}'.");
    }

    let mut registry = Registry::default();

    for option_line in classify::classify(&help_text)? {
        registry.register(&option_line.aliases, option_line.kind.handler(), None)?;
    }

    Ok(Compiled {
        program,
        version,
        version_text,
        help_text,
        registry,
    })
}
