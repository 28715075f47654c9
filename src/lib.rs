//! `optparse` is a command line option parser generated from its own help text.
//!
//! Most programs already carry a help message describing every option they accept.
//! `optparse` treats that help message as the parser configuration, so the two never drift apart.
//! Specifically, `optparse` prioritizes the following design concerns:
//! * *One source of truth*:
//! The options are declared once, in the text shown by `--help`.
//! * *Familiar syntax*:
//! Short clusters (`-abc`), attached arguments (`-oFILE`, `--output=FILE`), and `--` all behave as expected.
//! * *Loose values*:
//! Option values are stored as [`Value`]s (booleans, strings, or lists of repeats), rather than typed fields.
//! Use a [`Payload`] to coerce or fix a value.
//! * *Embeddable*:
//! Parsing never exits the process by itself, except via the convenience [`OptionParser::parse`] and [`OptionParser::build`].
//!
//! # Usage
//! This page includes a few demos on using `optparse`.
//! More examples are outlined in [the source](https://github.com/sawatzkylindsey/optparse/tree/main/demos).
//!
//! ```no_run
#![doc = include_str!("../demos/demo_greet.rs")]
//! ```
//!
//! This generates the following Cli program:
//! ```console
//! $ greet -?
//! Usage: greet [OPTIONS] NAME...
//!
//! Say hello to each NAME.
//!
//! Options:
//!   -l, --loud             shout the greeting
//!   -g, --greeting=WORD    use WORD instead of 'hello'
//!   -?, --help             display this help and exit
//!   -V, --version          display version information and exit
//!
//! $ greet -lghi Ada Grace
//! HI, ADA!
//! HI, GRACE!
//!
//! $ greet --greeting
//! greet: error: option '--greeting' requires an argument.
//! greet: Try 'greet --help' for help.
//! ```
//!
//! # Spec Text
//! An [`OptionParser`] is compiled from spec text with the following shape:
//! ```text
//! <version block>          the first line ends with the version
//! Usage: <program> ...     the help text starts here
//! <help text>
//! ```
//!
//! Each help text line that starts with at least two spaces, then a `-`, declares an *alias group*.
//! The aliases in the group share a single *key*, derived from the last alias (ex: `-n, --dry-run` records under `dry_run`).
//! The group's handler is decided by the form of its aliases:
//!
//! ```console
//! Form                 | Handler          | Stores
//! ---------------------------------------------------------------------------
//! -x, --long           | Handler::Flag     | true
//! -o, --opt=ARG        | Handler::Required | the argument
//! -o, --opt=[ARG]      | Handler::Optional | the argument, or true when absent
//! --                   | Handler::Finished | (the remaining tokens are unrecognised)
//! --help               | Handler::Help     | (prints the help text, exit 0)
//! --version            | Handler::Version  | (prints the version text, exit 0)
//! ```
//!
//! A group that mixes two of these forms is rejected with [`SpecError::Ambiguous`].
//!
//! # Custom Handlers
//! Use [`OptionParser::on`] to replace (or add) the handler of an alias group.
//! Payloads supply a fixed value, or a coercer such as [`boolean`] or [`file`].
//! A [`Handler::custom`] closure may do anything with the parse [`Session`].
//!
//! ```no_run
#![doc = include_str!("../demos/demo_counter.rs")]
//! ```
//!
//! # Cli Semantics
//! `optparse` scans the Cli tokens according to the following rules.
//!
//! * The tokens are first *expanded*, so that each option occupies its own token.
//! `--name=value` becomes `--name value` when `--name` is registered.
//! `-abc` becomes `-a -b -c`, unless one of the options takes an argument, in which case the rest of the cluster is its argument (ex: `-aoFILE` becomes `-a -o FILE`, and `-ao` becomes `-a -o ""`).
//! A cluster containing an unregistered letter is left whole.
//! * Registered options run their handler.
//! * Every other token is *unrecognised*, and kept in order.
//! A token following an unrecognised token is also unrecognised, unless it starts with `-`.
//! * Repeating a flag stores `true` again.
//! Repeating an option with an argument accumulates its values into a list.
//! * Once scanning completes, caller defaults fill in the missing keys (see [`MergePolicy`]).
//!
//! # Features
//! * `unit_test`: For features that help with unit testing.
//! * `tracing_debug`: Emit `tracing` debug events while compiling and parsing.
pub use optparse_engine::*;
