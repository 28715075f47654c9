use thiserror::Error;

use crate::coerce::Payload;
use crate::compiler::{compile, SpecError};
use crate::constant::*;
use crate::handler::Handler;
use crate::parser::{ConsoleInterface, MergePolicy, UserInterface};
use crate::registry::Registry;

/// Misuse of the option registry.
#[derive(Debug, Error)]
#[error("Config error: {0}")]
pub struct ConfigError(pub(crate) String);

/// A problem with the options on the command line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionError {
    /// An option that requires an argument was the last token.
    #[error("option '{option}' requires an argument")]
    MissingArgument {
        /// The option spelling.
        option: String,
    },

    /// A coercer rejected the option argument.
    #[error("invalid argument '{argument}' for option '{option}': {reason}")]
    InvalidArgument {
        /// The option spelling.
        option: String,
        /// The rejected argument.
        argument: String,
        /// Why the argument was rejected.
        reason: String,
    },

    /// Any other problem, described in full.
    #[error("{0}")]
    Custom(String),
}

/// The diagnostic line reported for an option error: `<program>: error: <message>.`
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{program}: error: {message}")]
pub struct ParseError {
    program: String,
    message: String,
}

impl ParseError {
    pub(crate) fn new(program: impl Into<String>, message: impl std::fmt::Display) -> Self {
        let mut message = message.to_string();

        if !message.ends_with('.') {
            message.push('.');
        }

        Self {
            program: program.into(),
            message,
        }
    }
}

/// An option parser, compiled from its own help text.
///
/// ### Example
/// ```
/// # use optparse_engine as optparse;
/// use optparse::{OptionParser, Value};
///
/// let parser = OptionParser::new(
///     "greet 1.0
/// Usage: greet [OPTIONS] NAME...
///
///   -l, --loud           shout the greeting
///   -g, --greeting=WORD  use WORD instead of 'hello'
/// ",
/// )
/// .unwrap();
///
/// let parsed = parser.parse_tokens(&["-lghi", "world"], &[]).unwrap();
///
/// assert_eq!(parsed.get("loud"), Some(&Value::Bool(true)));
/// assert_eq!(parsed.get("greeting"), Some(&Value::from("hi")));
/// assert_eq!(parsed.unrecognised(), &["world"]);
/// ```
pub struct OptionParser {
    program: String,
    version: String,
    version_text: String,
    help_text: String,
    registry: Registry,
    merge_policy: MergePolicy,
    user_interface: Box<dyn UserInterface>,
}

impl std::fmt::Debug for OptionParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionParser")
            .field("program", &self.program)
            .field("version", &self.version)
            .field("registry", &self.registry)
            .field("merge_policy", &self.merge_policy)
            .finish()
    }
}

impl OptionParser {
    /// Compile an option parser from the spec text.
    ///
    /// The spec text is shaped as follows:
    /// ```text
    /// <version block>      the first line ends with the version
    /// Usage: <program> ..  the help text starts here
    /// <help text>
    /// ```
    ///
    /// Every help text line that starts with two or more spaces then a `-` declares an option group.
    /// The group's handler is declared by its aliases:
    /// * `--` ends option processing,
    /// * `--opt=[ARG]` takes an optional argument,
    /// * `--opt=ARG` takes a required argument,
    /// * `--help` prints the help text,
    /// * `--version` prints the version text,
    /// * otherwise, the group is a flag.
    pub fn new(spec: &str) -> Result<Self, SpecError> {
        let compiled = compile(spec)?;

        Ok(Self {
            program: compiled.program,
            version: compiled.version,
            version_text: compiled.version_text,
            help_text: compiled.help_text,
            registry: compiled.registry,
            merge_policy: MergePolicy::default(),
            user_interface: Box::new(ConsoleInterface::default()),
        })
    }

    /// Compile an option parser from the spec text.
    /// If the spec text cannot be compiled, exits with error code `1` (via [`std::process::exit`]).
    pub fn build(spec: &str) -> Self {
        match Self::new(spec) {
            Ok(parser) => parser,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(EXIT_SPEC_ERROR);
            }
        }
    }

    /// Present output through the given interface, rather than the console.
    pub fn with_interface(mut self, user_interface: impl UserInterface + 'static) -> Self {
        self.user_interface = Box::new(user_interface);
        self
    }

    /// Set how defaults are merged into the parsed options.
    pub fn with_merge_policy(mut self, merge_policy: MergePolicy) -> Self {
        self.merge_policy = merge_policy;
        self
    }

    /// Register a handler for an alias group, replacing any existing definitions of the same spellings.
    /// See [`Registry::register`] for the alias normalization rules.
    /// Returns the key under which the group's values are recorded.
    ///
    /// ### Example
    /// ```
    /// # use optparse_engine as optparse;
    /// use optparse::{boolean, Handler, OptionParser, Payload, Value};
    ///
    /// let mut parser = OptionParser::new("prog 1.0\nUsage: prog\n").unwrap();
    /// parser.on(["c", "colour"], Handler::Optional, Some(Payload::transform(boolean))).unwrap();
    ///
    /// let parsed = parser.parse_tokens(&["--colour=no"], &[]).unwrap();
    /// assert_eq!(parsed.get("colour"), Some(&Value::Bool(false)));
    /// ```
    pub fn on<I, S>(
        &mut self,
        aliases: I,
        handler: Handler,
        payload: Option<Payload>,
    ) -> Result<String, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.registry.register(aliases, handler, payload)
    }

    /// The program name, from the `Usage:` line.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The version, from the end of the first line.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The text printed by `--version`.
    pub fn version_text(&self) -> &str {
        &self.version_text
    }

    /// The text printed by `--help`.
    pub fn help_text(&self) -> &str {
        &self.help_text
    }

    /// The registered options.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Get a parser attribute by name: `program`, `version`, `version_text`, or `help_text`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match name {
            "program" => Some(self.program()),
            "version" => Some(self.version()),
            "version_text" => Some(self.version_text()),
            "help_text" => Some(self.help_text()),
            _ => None,
        }
    }

    pub(crate) fn merge_policy(&self) -> MergePolicy {
        self.merge_policy
    }

    pub(crate) fn user_interface(&self) -> &dyn UserInterface {
        &*self.user_interface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Value;
    use rstest::rstest;

    const SPEC: &str = "prog 2.1
Usage: prog [-v] FILE

  -v, --verbose  be verbose
  -h, --help     display help
";

    #[rstest]
    #[case("message", "prog: error: message.")]
    #[case("message.", "prog: error: message.")]
    #[case("", "prog: error: .")]
    fn parse_error(#[case] message: &str, #[case] expected: &str) {
        assert_eq!(ParseError::new("prog", message).to_string(), expected);
    }

    #[rstest]
    #[case(OptionError::MissingArgument { option: "-o".to_string() }, "option '-o' requires an argument")]
    #[case(
        OptionError::InvalidArgument { option: "-o".to_string(), argument: "x".to_string(), reason: "bad".to_string() },
        "invalid argument 'x' for option '-o': bad"
    )]
    #[case(OptionError::Custom("anything".to_string()), "anything")]
    fn option_error(#[case] error: OptionError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case("program", Some("prog"))]
    #[case("version", Some("2.1"))]
    #[case("version_text", Some("prog 2.1"))]
    #[case("help_text", Some("Usage: prog [-v] FILE\n\n  -v, --verbose  be verbose\n  -h, --help     display help"))]
    #[case("verbose", None)]
    fn attribute(#[case] name: &str, #[case] expected: Option<&str>) {
        let parser = OptionParser::new(SPEC).unwrap();
        assert_eq!(parser.attribute(name), expected);
    }

    #[test]
    fn on_replaces() {
        let mut parser = OptionParser::new(SPEC).unwrap();
        let key = parser
            .on(["h", "host"], Handler::Required, None)
            .unwrap();

        assert_eq!(key, "host");
        let parsed = parser.parse_tokens(&["-h", "localhost"], &[]).unwrap();
        assert_eq!(parsed.get("host"), Some(&Value::from("localhost")));
        assert_matches!(parser.registry().get("--help").unwrap().handler(), Handler::Help);
    }

    #[test]
    fn on_empty() {
        let mut parser = OptionParser::new(SPEC).unwrap();
        assert_matches!(
            parser.on(Vec::<String>::default(), Handler::Flag, None),
            Err(ConfigError(_))
        );
    }

    #[test]
    fn new_spec_error() {
        assert_matches!(OptionParser::new("no shape"), Err(SpecError::Shape));
    }

    #[test]
    fn debug() {
        let parser = OptionParser::new(SPEC).unwrap();
        let debug = format!("{parser:?}");
        assert!(debug.starts_with("OptionParser { program: \"prog\", version: \"2.1\""));
    }
}
