use std::fs::File;
use std::rc::Rc;

use crate::model::{RawArgument, Value};
use crate::parser::{OptionError, Session};

/// Behaviour to convert a raw option argument into a [`Value`].
///
/// Receives the in-progress parse [`Session`], the option spelling as it appeared on the command line, and the raw argument.
pub type Coercer = Rc<dyn Fn(&Session<'_>, &str, RawArgument<'_>) -> Result<Value, OptionError>>;

/// What an option handler stores: either a fixed value, or a transform of the raw argument.
#[derive(Clone)]
pub enum Payload {
    /// Store this value instead of the raw argument.
    Fixed(Value),
    /// Store the result of this coercer.
    Transform(Coercer),
}

impl Payload {
    /// Create a fixed payload.
    pub fn fixed(value: impl Into<Value>) -> Self {
        Payload::Fixed(value.into())
    }

    /// Create a transform payload.
    ///
    /// ### Example
    /// ```
    /// # use optparse_engine as optparse;
    /// use optparse::{Payload, Value};
    ///
    /// let upper = Payload::transform(|_, _, raw| {
    ///     Ok(Value::from(raw.text().unwrap_or_default().to_uppercase()))
    /// });
    /// ```
    pub fn transform<F>(coercer: F) -> Self
    where
        F: Fn(&Session<'_>, &str, RawArgument<'_>) -> Result<Value, OptionError> + 'static,
    {
        Payload::Transform(Rc::new(coercer))
    }
}

impl std::fmt::Debug for Payload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Payload::Fixed(value) => f.debug_tuple("Fixed").field(value).finish(),
            Payload::Transform(_) => f.debug_tuple("Transform").field(&"..").finish(),
        }
    }
}

const FALSE_WORDS: [&str; 4] = ["false", "0", "no", "n"];
const TRUE_WORDS: [&str; 4] = ["true", "1", "yes", "y"];

/// Coerce a boolean option argument.
///
/// Accepts (case-insensitively) `false`, `0`, `no`, `n`, `true`, `1`, `yes`, `y`.
/// A switch or missing argument counts as `1`.
pub fn boolean(
    _session: &Session<'_>,
    option: &str,
    raw: RawArgument<'_>,
) -> Result<Value, OptionError> {
    let text = raw.text().unwrap_or("1");
    let normal = text.to_lowercase();

    if FALSE_WORDS.contains(&normal.as_str()) {
        Ok(Value::Bool(false))
    } else if TRUE_WORDS.contains(&normal.as_str()) {
        Ok(Value::Bool(true))
    } else {
        Err(OptionError::InvalidArgument {
            option: option.to_string(),
            argument: text.to_string(),
            reason: "not a valid boolean".to_string(),
        })
    }
}

/// Coerce a file path option argument.
///
/// Succeeds when the path can be opened for reading.
/// This proves read access only; a file that exists without read permission is rejected.
pub fn file(
    _session: &Session<'_>,
    option: &str,
    raw: RawArgument<'_>,
) -> Result<Value, OptionError> {
    let path = raw.text().ok_or_else(|| OptionError::MissingArgument {
        option: option.to_string(),
    })?;

    match File::open(path) {
        Ok(_) => Ok(Value::from(path)),
        Err(error) => Err(OptionError::InvalidArgument {
            option: option.to_string(),
            argument: path.to_string(),
            reason: error.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::OptionParser;
    use rstest::rstest;

    const SPEC: &str = "program 1.0\nUsage: program [OPTIONS]\n";

    #[rstest]
    #[case(RawArgument::Given("false"), false)]
    #[case(RawArgument::Given("0"), false)]
    #[case(RawArgument::Given("No"), false)]
    #[case(RawArgument::Given("N"), false)]
    #[case(RawArgument::Given("TRUE"), true)]
    #[case(RawArgument::Given("1"), true)]
    #[case(RawArgument::Given("yes"), true)]
    #[case(RawArgument::Given("y"), true)]
    #[case(RawArgument::Switch, true)]
    #[case(RawArgument::Missing, true)]
    fn boolean_accepts(#[case] raw: RawArgument, #[case] expected: bool) {
        let parser = OptionParser::new(SPEC).unwrap();
        let session = Session::new(&parser);
        assert_eq!(
            boolean(&session, "--colour", raw).unwrap(),
            Value::Bool(expected)
        );
    }

    #[rstest]
    #[case("maybe")]
    #[case("")]
    #[case("2")]
    #[case("yess")]
    fn boolean_rejects(#[case] text: &str) {
        let parser = OptionParser::new(SPEC).unwrap();
        let session = Session::new(&parser);
        assert_matches!(
            boolean(&session, "--colour", RawArgument::Given(text)),
            Err(OptionError::InvalidArgument { option, argument, .. }) if option == "--colour" && argument == text
        );
    }

    #[test]
    fn file_readable() {
        let parser = OptionParser::new(SPEC).unwrap();
        let session = Session::new(&parser);
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml");
        assert_eq!(
            file(&session, "--input", RawArgument::Given(path)).unwrap(),
            Value::from(path)
        );
    }

    #[test]
    fn file_unreadable() {
        let parser = OptionParser::new(SPEC).unwrap();
        let session = Session::new(&parser);
        assert_matches!(
            file(&session, "--input", RawArgument::Given("/does/not/exist")),
            Err(OptionError::InvalidArgument { argument, .. }) if argument == "/does/not/exist"
        );
    }

    #[rstest]
    #[case(RawArgument::Missing)]
    #[case(RawArgument::Switch)]
    fn file_missing(#[case] raw: RawArgument) {
        let parser = OptionParser::new(SPEC).unwrap();
        let session = Session::new(&parser);
        assert_matches!(
            file(&session, "--input", raw),
            Err(OptionError::MissingArgument { option }) if option == "--input"
        );
    }

    #[test]
    fn payload_debug() {
        assert_eq!(format!("{:?}", Payload::fixed(true)), "Fixed(Bool(true))");
        assert_eq!(
            format!("{:?}", Payload::transform(|_, _, _| Ok(Value::Bool(true)))),
            "Transform(\"..\")"
        );
    }
}
