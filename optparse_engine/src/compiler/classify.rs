use regex::Regex;
use std::sync::LazyLock;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::compiler::SpecError;
use crate::constant::*;
use crate::handler::Handler;

/// The handler an option line declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    /// `-x, --long`
    Flag,
    /// `--`
    Finished,
    /// `-o, --opt=[ARG]`
    Optional,
    /// `-o, --opt=ARG`
    Required,
    /// `--help`
    Help,
    /// `--version`
    Version,
}

impl HandlerKind {
    pub(crate) fn handler(self) -> Handler {
        match self {
            HandlerKind::Flag => Handler::Flag,
            HandlerKind::Finished => Handler::Finished,
            HandlerKind::Optional => Handler::Optional,
            HandlerKind::Required => Handler::Required,
            HandlerKind::Help => Handler::Help,
            HandlerKind::Version => Handler::Version,
        }
    }
}

impl std::fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            HandlerKind::Flag => "flag",
            HandlerKind::Finished => "end-of-options",
            HandlerKind::Optional => "optional-argument",
            HandlerKind::Required => "required-argument",
            HandlerKind::Help => "help",
            HandlerKind::Version => "version",
        };
        write!(f, "{name}")
    }
}

/// An option line of the help text, reduced to its aliases and declared handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OptionLine {
    pub(crate) aliases: Vec<String>,
    pub(crate) kind: HandlerKind,
}

struct Rule {
    kind: HandlerKind,
    pattern: Regex,
}

impl Rule {
    fn new(kind: HandlerKind, pattern: &str) -> Self {
        Self {
            kind,
            pattern: Regex::new(pattern).expect("static regex must compile"),
        }
    }
}

// Tried in order at every alias position; the first match wins.
static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(
            HandlerKind::Finished,
            &format!(r"^{},?\s", regex::escape(END_OF_OPTIONS)),
        ),
        Rule::new(HandlerKind::Optional, r"^-[-_0-9A-Za-z]+=\[.+\],?\s"),
        Rule::new(HandlerKind::Required, r"^-[-_0-9A-Za-z]+=\S+,?\s"),
        Rule::new(
            HandlerKind::Help,
            &format!(r"^{},?\s", regex::escape(HELP_SPELLING)),
        ),
        Rule::new(
            HandlerKind::Version,
            &format!(r"^{},?\s", regex::escape(VERSION_SPELLING)),
        ),
    ]
});

static OPTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^ {2}[ \t]*(-.*)$").expect("static regex must compile"));
static ARGUMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-[-_0-9A-Za-z]+)=\S+\s").expect("static regex must compile")
});
static SHORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-[-?0-9A-Za-z]),?\s+(.*)$").expect("static regex must compile")
});
static LONG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(--[-_0-9A-Za-z]+),?\s+(.*)$").expect("static regex must compile")
});

/// Find the declared kind at the head of `rest`, if any.
pub(crate) fn match_kind(rest: &str) -> Option<HandlerKind> {
    RULES
        .iter()
        .find(|rule| rule.pattern.is_match(rest))
        .map(|rule| rule.kind)
}

/// Reduce every option line of the help text.
pub(crate) fn classify(help_text: &str) -> Result<Vec<OptionLine>, SpecError> {
    let mut option_lines = Vec::default();

    for captures in OPTION_LINE.captures_iter(help_text) {
        let line = captures[1].trim_end();

        if let Some(option_line) = classify_line(line)? {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Classified '{line}' as {option_line:?}.");
            }

            option_lines.push(option_line);
        }
    }

    Ok(option_lines)
}

/// Reduce a single option line.
/// Returns `None` when the line yields no aliases (ex: a `- bullet` in prose).
pub(crate) fn classify_line(line: &str) -> Result<Option<OptionLine>, SpecError> {
    // The trailing space lets the last alias on a description-less line terminate like the others.
    let mut rest = format!("{line} ");
    let mut aliases = Vec::default();
    let mut kind: Option<HandlerKind> = None;

    while rest.starts_with('-') {
        if let Some(found) = match_kind(&rest) {
            match kind {
                Some(previous) if previous != found => {
                    return Err(SpecError::Ambiguous {
                        line: line.to_string(),
                        first: previous,
                        second: found,
                    });
                }
                _ => kind = Some(found),
            }
        }

        rest = ARGUMENT.replace(&rest, "$1 ").into_owned();
        let consumed = SHORT
            .captures(&rest)
            .or_else(|| LONG.captures(&rest))
            .map(|captures| (captures[1].to_string(), captures[2].to_string()));

        match consumed {
            Some((alias, remainder)) => {
                aliases.push(alias);
                rest = remainder;
            }
            None => break,
        }
    }

    if aliases.is_empty() {
        return Ok(None);
    }

    Ok(Some(OptionLine {
        aliases,
        kind: kind.unwrap_or(HandlerKind::Flag),
    }))
}
