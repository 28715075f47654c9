use crate::parser::ParseError;

/// Behaviour for presenting the parser's output.
///
/// The default [`ConsoleInterface`] writes to stdout/stderr.
/// Embedding contexts may supply their own via [`OptionParser::with_interface`](crate::OptionParser::with_interface).
pub trait UserInterface {
    /// Present a message (ex: the help text).
    fn print(&self, message: String);

    /// Present an option error.
    fn print_error(&self, error: ParseError);

    /// Present the hint that follows an option error.
    fn print_hint(&self, hint: String);
}

/// Writes messages to stdout, and errors/hints to stderr.
#[derive(Debug, Default)]
pub struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, error: ParseError) {
        eprintln!("{error}");
    }

    fn print_hint(&self, hint: String) {
        eprintln!("{hint}");
    }
}

/// Interfaces for testing option parsers.
#[cfg(any(test, feature = "unit_test"))]
pub mod util {
    use crate::parser::{ParseError, UserInterface};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct Captured {
        messages: Vec<String>,
        errors: Vec<String>,
    }

    /// Captures all output in memory.
    ///
    /// Clones share the captured output, so keep a clone to inspect what the parser printed.
    #[derive(Debug, Clone, Default)]
    pub struct InMemoryInterface {
        captured: Rc<RefCell<Captured>>,
    }

    impl UserInterface for InMemoryInterface {
        fn print(&self, message: String) {
            self.captured.borrow_mut().messages.push(message);
        }

        fn print_error(&self, error: ParseError) {
            self.captured.borrow_mut().errors.push(error.to_string());
        }

        fn print_hint(&self, hint: String) {
            self.captured.borrow_mut().errors.push(hint);
        }
    }

    impl InMemoryInterface {
        /// Take the captured output: the messages (joined by line), and the error lines.
        pub fn consume(&self) -> (Option<String>, Vec<String>) {
            let captured = self.captured.take();
            let message = if captured.messages.is_empty() {
                None
            } else {
                Some(captured.messages.join("\n"))
            };

            (message, captured.errors)
        }

        /// Take the captured messages, asserting that there were no errors.
        pub fn consume_message(&self) -> String {
            let (message, errors) = self.consume();
            assert_eq!(errors, Vec::<String>::default());
            message.unwrap()
        }
    }
}
