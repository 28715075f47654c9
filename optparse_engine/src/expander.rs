use std::env;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::registry::Registry;

/// The arguments of a process invocation.
///
/// `program` is the leading boundary token (`argv[0]`), kept apart from the tokens to parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentList {
    program: Option<String>,
    tokens: Vec<String>,
}

impl ArgumentList {
    /// Create an argument list without a leading program token.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: None,
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Create an argument list with a leading program token.
    pub fn with_program<I, S>(program: impl Into<String>, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: Some(program.into()),
            ..Self::new(tokens)
        }
    }

    /// Read the argument list of the current process ([`env::args`]).
    pub fn from_env() -> Self {
        let mut args = env::args();
        let program = args.next();
        Self {
            program,
            tokens: args.collect(),
        }
    }

    /// The leading program token.
    pub fn program(&self) -> Option<&str> {
        self.program.as_deref()
    }

    /// The tokens following the program token.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

/// Rewrite the arguments so that every option occupies its own token, and inline option arguments are separated.
///
/// * `--name=value` becomes `--name value`, when `--name` is registered.
/// * `-abc` is split left to right: `-a` is peeled off, and
///   if `-a` takes an argument then `bc` is that argument (even when empty, so `-ao` becomes `-a -o ""`),
///   otherwise splitting carries on with `-bc`.
///   When a peeled option is not registered, the original token is kept whole.
pub(crate) fn expand(registry: &Registry, arguments: &ArgumentList) -> ArgumentList {
    let mut tokens = Vec::with_capacity(arguments.tokens.len());

    for token in &arguments.tokens {
        if token.starts_with("--") {
            tokens.extend(split_long(registry, token));
        } else if token.starts_with('-') && token.chars().count() > 2 {
            tokens.extend(split_short(registry, token));
        } else {
            tokens.push(token.clone());
        }
    }

    #[cfg(feature = "tracing_debug")]
    {
        debug!("Expanded {:?} into {tokens:?}.", arguments.tokens);
    }

    ArgumentList {
        program: arguments.program.clone(),
        tokens,
    }
}

fn split_long(registry: &Registry, token: &str) -> Vec<String> {
    match token[2..].split_once('=') {
        Some((name, value)) if !name.is_empty() && registry.contains(&format!("--{name}")) => {
            vec![format!("--{name}"), value.to_string()]
        }
        _ => vec![token.to_string()],
    }
}

fn split_short(registry: &Registry, token: &str) -> Vec<String> {
    let mut split = Vec::default();
    let mut rest = &token[1..];

    while let Some(single) = rest.chars().next() {
        let option = format!("-{single}");
        let remainder = &rest[single.len_utf8()..];

        match registry.get(&option) {
            None => {
                // A typo, or not meant to be an option at all.
                return vec![token.to_string()];
            }
            Some(def) if def.handler().takes_argument() => {
                // The rest of the cluster is the argument, even when empty.
                split.push(option);
                split.push(remainder.to_string());
                return split;
            }
            Some(_) => {
                split.push(option);
                rest = remainder;
            }
        }
    }

    split
}
