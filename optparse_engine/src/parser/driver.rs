#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::expander::{expand, ArgumentList};
use crate::model::Value;
use crate::parser::{OptionParser, Parsed, Session};

/// How caller defaults are merged into the parsed options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergePolicy {
    /// A default applies only to keys that were not parsed.
    #[default]
    Absent,
    /// A default also replaces a parsed `false`.
    Falsy,
}

impl OptionParser {
    /// Expand the arguments so that every option occupies its own token.
    ///
    /// ### Example
    /// ```
    /// # use optparse_engine as optparse;
    /// use optparse::{ArgumentList, OptionParser};
    ///
    /// let parser = OptionParser::new("prog 1.0
    /// Usage: prog
    ///
    ///   -a, --all          everything
    ///   -o, --output=FILE  write to FILE
    /// ").unwrap();
    ///
    /// let expanded = parser.expand(&ArgumentList::new(["-aofile", "--output=x", "--other=y"]));
    /// assert_eq!(expanded.tokens(), &["-a", "-o", "file", "--output", "x", "--other=y"]);
    /// ```
    pub fn expand(&self, arguments: &ArgumentList) -> ArgumentList {
        expand(self.registry(), arguments)
    }

    /// Run the option parser against the input tokens.
    ///
    /// The tokens are first expanded (see [`OptionParser::expand`]), then scanned in order:
    /// * A registered option runs its handler, which consumes the option and any argument.
    /// * Any other token is unrecognised.
    ///
    /// Finally, `defaults` are merged into the option values (see [`MergePolicy`]).
    ///
    /// If the help or version option is encountered, its text is displayed and parsing returns with `Err(0)`.
    /// If an option error is encountered, it is displayed and parsing returns with `Err(2)`.
    pub fn parse_tokens(
        &self,
        tokens: &[&str],
        defaults: &[(&str, Value)],
    ) -> Result<Parsed<'_>, i32> {
        self.parse_arguments(&ArgumentList::new(tokens.iter().copied()), defaults)
    }

    /// Run the option parser against an argument list.
    /// See [`OptionParser::parse_tokens`].
    pub fn parse_arguments(
        &self,
        arguments: &ArgumentList,
        defaults: &[(&str, Value)],
    ) -> Result<Parsed<'_>, i32> {
        let expanded = self.expand(arguments);
        let tokens = expanded.tokens();
        let mut session = Session::new(self);
        let mut index = 0;

        while index < tokens.len() {
            let token = &tokens[index];

            match self.registry().get(token).filter(|_| token.starts_with('-')) {
                Some(def) => {
                    let next = def
                        .handler()
                        .invoke(&mut session, tokens, index, def.payload())?;
                    assert!(
                        next > index,
                        "handler for '{token}' must advance past index {index}"
                    );
                    index = next;
                }
                None => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Unrecognised '{token}' at {index}.");
                    }

                    session.push_unrecognised(token.clone());
                    index += 1;

                    // A following non-option token goes along with it.
                    if let Some(next) = tokens.get(index).filter(|t| !t.starts_with('-')) {
                        session.push_unrecognised(next.clone());
                        index += 1;
                    }
                }
            }
        }

        session.merge_defaults(defaults, self.merge_policy());
        Ok(session.finish())
    }

    /// Run the option parser against the Cli [`std::env::args`].
    ///
    /// If the help or version option is encountered, its text is displayed and the process exits with code `0`.
    /// If an option error is encountered, it is displayed and the process exits with code `2` (via [`std::process::exit`]).
    pub fn parse(&self, defaults: &[(&str, Value)]) -> Parsed<'_> {
        match self.parse_arguments(&ArgumentList::from_env(), defaults) {
            Ok(parsed) => parsed,
            Err(exit_code) => {
                std::process::exit(exit_code);
            }
        }
    }
}
