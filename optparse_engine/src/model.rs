/// A value recorded against an option key.
///
/// Flags record [`Value::Bool`], options with arguments record [`Value::Str`].
/// A key that is recorded more than once is promoted to a [`Value::List`], in encounter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A switch state (ex: `--verbose`).
    Bool(bool),
    /// A single option argument (ex: `--output=FILE`).
    Str(String),
    /// Repeated occurrences of the same key.
    List(Vec<Value>),
}

impl Value {
    /// Get the boolean, if this is a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the text, if this is a [`Value::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get the items, if this is a [`Value::List`].
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Whether this value stands in for "unset" when merging defaults leniently.
    pub(crate) fn is_falsy(&self) -> bool {
        matches!(self, Value::Bool(false))
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::List(items) => {
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

/// The raw argument a coercer is asked to convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawArgument<'a> {
    /// The option was used as a switch (ex: `-v`).
    Switch,
    /// The option accepts an argument, but none was provided.
    Missing,
    /// The argument text.
    Given(&'a str),
}

impl<'a> RawArgument<'a> {
    /// The argument text, if one was given.
    pub fn text(&self) -> Option<&'a str> {
        match self {
            RawArgument::Given(text) => Some(text),
            RawArgument::Switch | RawArgument::Missing => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Bool(true), "true")]
    #[case(Value::from("abc"), "abc")]
    #[case(Value::from(vec!["a", "b"]), "[a, b]")]
    #[case(Value::List(vec![Value::Bool(true), Value::from("x")]), "[true, x]")]
    fn display(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[test]
    fn accessors() {
        assert_eq!(Value::Bool(false).as_bool(), Some(false));
        assert_eq!(Value::from("x").as_bool(), None);
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert_eq!(
            Value::from(vec!["x"]).as_list(),
            Some(&[Value::from("x")][..])
        );
        assert!(Value::Bool(false).is_falsy());
        assert!(!Value::Bool(true).is_falsy());
        assert!(!Value::from("").is_falsy());
    }

    #[test]
    fn raw_argument_text() {
        assert_eq!(RawArgument::Given("abc").text(), Some("abc"));
        assert_eq!(RawArgument::Missing.text(), None);
        assert_eq!(RawArgument::Switch.text(), None);
    }
}
