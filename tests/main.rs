use optparse::util::InMemoryInterface;
use optparse::{
    boolean, file, ArgumentList, Handler, Lookup, MergePolicy, OptionError, OptionParser, Payload,
    SpecError, Value,
};
use rstest::rstest;

const SPEC: &str = "tidy 4.2.0
Copyright (c) the tidy authors.

Usage: tidy [OPTIONS] [FILE]...

Tidy up each FILE.

Options:
  -n, --dryrun, --dry-run
                         report what would change, without changing it
  -q, --quiet            suppress progress messages
  -r, --recursive        descend into directories
  -c, --colour=[WHEN]    colourize the report
  -e, --exclude=GLOB     skip files matching GLOB
  -C, --config=FILE      read settings from FILE
      --                 end of options
  -?, --help             display this help and exit
  -V, --version          display version information and exit

- Every option above may be given in any order.
";

fn tidy() -> (OptionParser, InMemoryInterface) {
    let interface = InMemoryInterface::default();
    let parser = OptionParser::new(SPEC)
        .unwrap()
        .with_interface(interface.clone());
    (parser, interface)
}

#[test]
fn builder_compiles() {
    OptionParser::build(SPEC);
}

#[test]
fn attributes() {
    let (parser, _) = tidy();

    assert_eq!(parser.program(), "tidy");
    assert_eq!(parser.version(), "4.2.0");
    assert_eq!(
        parser.version_text(),
        "tidy 4.2.0\nCopyright (c) the tidy authors."
    );
    assert!(parser.help_text().starts_with("Usage: tidy [OPTIONS] [FILE]..."));
    assert!(parser.help_text().ends_with("given in any order."));
}

#[rstest]
#[case("-n")]
#[case("--dryrun")]
#[case("--dry-run")]
fn alias_group_shares_key(#[case] spelling: &str) {
    let (parser, _) = tidy();

    assert_eq!(parser.registry().key_of(spelling), Some("dry_run"));

    let parsed = parser.parse_tokens(&[spelling], &[]).unwrap();
    assert_eq!(parsed.get("dryrun"), Some(&Value::Bool(true)));
    assert_eq!(parsed.get("dry_run"), Some(&Value::Bool(true)));
    assert_eq!(parsed.opts().len(), 1);
}

#[test]
fn cluster_equivalence() {
    let (parser, _) = tidy();

    let clustered = parser.parse_tokens(&["-nqr", "a"], &[]).unwrap();
    let spread = parser.parse_tokens(&["-n", "-q", "-r", "a"], &[]).unwrap();

    assert_eq!(clustered.opts(), spread.opts());
    assert_eq!(clustered.unrecognised(), spread.unrecognised());
    assert_eq!(clustered.opts().len(), 3);
}

#[rstest]
#[case(vec!["-e*.bak"], vec!["-e", "*.bak"])]
#[case(vec!["-qe*.bak"], vec!["-q", "-e", "*.bak"])]
#[case(vec!["--exclude=*.bak"], vec!["--exclude", "*.bak"])]
#[case(vec!["--exclude=a=b"], vec!["--exclude", "a=b"])]
fn attached_arguments(#[case] compact: Vec<&str>, #[case] spread: Vec<&str>) {
    let (parser, _) = tidy();

    let compact = parser.parse_tokens(&compact, &[]).unwrap();
    let spread = parser.parse_tokens(&spread, &[]).unwrap();

    assert_eq!(compact.opts(), spread.opts());
    assert!(compact.get("exclude").is_some());
}

#[test]
fn unregistered_long_kept_whole() {
    let (parser, _) = tidy();
    let parsed = parser.parse_tokens(&["--include=*.rs"], &[]).unwrap();

    assert!(parsed.opts().is_empty());
    assert_eq!(parsed.unrecognised(), &["--include=*.rs"]);
}

#[test]
fn repeats_accumulate() {
    let (parser, _) = tidy();

    let parsed = parser
        .parse_tokens(&["-e", "a", "--exclude", "b"], &[])
        .unwrap();
    assert_eq!(parsed.get("exclude"), Some(&Value::from(vec!["a", "b"])));

    let parsed = parser
        .parse_tokens(&["-e", "a", "--exclude", "b", "-ec"], &[])
        .unwrap();
    assert_eq!(parsed.get("exclude"), Some(&Value::from(vec!["a", "b", "c"])));
}

#[test]
fn end_of_options() {
    let (parser, _) = tidy();
    let parsed = parser.parse_tokens(&["-q", "--", "-r"], &[]).unwrap();

    assert_eq!(parsed.get("q"), Some(&Value::Bool(true)));
    assert_eq!(parsed.get("recursive"), None);
    assert_eq!(parsed.unrecognised(), &["-r"]);
}

#[test]
fn positionals_interleaved() {
    let (parser, _) = tidy();
    let parsed = parser
        .parse_tokens(&["one", "two", "-r", "three", "--bogus", "four"], &[])
        .unwrap();

    assert_eq!(parsed.get("recursive"), Some(&Value::Bool(true)));
    assert_eq!(
        parsed.unrecognised(),
        &["one", "two", "three", "--bogus", "four"]
    );
}

#[rstest]
#[case(vec!["-?"])]
#[case(vec!["--help"])]
#[case(vec!["-q", "--help", "--bogus"])]
fn help(#[case] tokens: Vec<&str>) {
    let (parser, interface) = tidy();

    let exit_code = parser.parse_tokens(&tokens, &[]).unwrap_err();

    assert_eq!(exit_code, 0);
    let message = interface.consume_message();
    assert!(message.starts_with("Usage: tidy"));
    assert!(message.contains("  -e, --exclude=GLOB     skip files matching GLOB"));
}

#[test]
fn version() {
    let (parser, interface) = tidy();

    let exit_code = parser.parse_tokens(&["-V"], &[]).unwrap_err();

    assert_eq!(exit_code, 0);
    assert_eq!(
        interface.consume_message(),
        "tidy 4.2.0\nCopyright (c) the tidy authors."
    );
}

#[test]
fn missing_argument() {
    let (parser, interface) = tidy();

    let exit_code = parser.parse_tokens(&["-q", "--exclude"], &[]).unwrap_err();

    assert_eq!(exit_code, 2);
    let (message, errors) = interface.consume();
    assert_eq!(message, None);
    assert_eq!(
        errors,
        vec![
            "tidy: error: option '--exclude' requires an argument.".to_string(),
            "tidy: Try 'tidy --help' for help.".to_string(),
        ]
    );
}

#[rstest]
#[case(MergePolicy::Absent, vec![], Value::Bool(false))]
#[case(MergePolicy::Absent, vec!["--colour=no"], Value::Bool(false))]
#[case(MergePolicy::Falsy, vec!["--colour=no"], Value::Bool(true))]
#[case(MergePolicy::Absent, vec!["-c"], Value::Bool(true))]
fn coerced_defaults(
    #[case] merge_policy: MergePolicy,
    #[case] tokens: Vec<&str>,
    #[case] expected: Value,
) {
    let (mut parser, _) = tidy();
    parser
        .on(
            ["c", "colour"],
            Handler::Optional,
            Some(Payload::transform(boolean)),
        )
        .unwrap();
    let parser = parser.with_merge_policy(merge_policy);

    let defaults = match merge_policy {
        MergePolicy::Absent => vec![("colour", Value::Bool(false))],
        MergePolicy::Falsy => vec![("colour", Value::Bool(true))],
    };
    let parsed = parser.parse_tokens(&tokens, &defaults).unwrap();

    assert_eq!(parsed.get("colour"), Some(&expected));
}

#[test]
fn coercer_rejects() {
    let (mut parser, interface) = tidy();
    parser
        .on(
            ["c", "colour"],
            Handler::Optional,
            Some(Payload::transform(boolean)),
        )
        .unwrap();

    let exit_code = parser.parse_tokens(&["--colour", "sometimes"], &[]).unwrap_err();

    assert_eq!(exit_code, 2);
    let (_, errors) = interface.consume();
    assert_eq!(
        errors[0],
        "tidy: error: invalid argument 'sometimes' for option '--colour': not a valid boolean."
    );
}

#[test]
fn file_coercer() {
    let (mut parser, interface) = tidy();
    parser
        .on(["C", "config"], Handler::Required, Some(Payload::transform(file)))
        .unwrap();
    let manifest = concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml");

    let parsed = parser.parse_tokens(&["-C", manifest], &[]).unwrap();
    assert_eq!(parsed.get("config"), Some(&Value::from(manifest)));

    let exit_code = parser
        .parse_tokens(&["--config=/no/such/tidy.toml"], &[])
        .unwrap_err();
    assert_eq!(exit_code, 2);
    let (_, errors) = interface.consume();
    assert!(errors[0].starts_with(
        "tidy: error: invalid argument '/no/such/tidy.toml' for option '--config'"
    ));
}

#[test]
fn custom_handler_errors() {
    let (mut parser, interface) = tidy();
    parser
        .on(
            ["e", "exclude"],
            Handler::custom(|session, tokens, index, _| match tokens.get(index + 1) {
                Some(glob) if glob.contains('*') => {
                    session.set(&tokens[index], Value::from(glob.as_str()));
                    Ok(index + 2)
                }
                _ => Err(session.opterr(OptionError::Custom(format!(
                    "option '{}' requires a glob",
                    tokens[index]
                )))),
            }),
            None,
        )
        .unwrap();

    let parsed = parser.parse_tokens(&["-e", "*.o"], &[]).unwrap();
    assert_eq!(parsed.get("exclude"), Some(&Value::from("*.o")));

    let exit_code = parser.parse_tokens(&["-e", "main.o"], &[]).unwrap_err();
    assert_eq!(exit_code, 2);
    let (_, errors) = interface.consume();
    assert_eq!(errors[0], "tidy: error: option '-e' requires a glob.");
}

#[test]
fn fixed_payload() {
    let (mut parser, _) = tidy();
    parser
        .on(["q", "quiet"], Handler::Flag, Some(Payload::fixed("silent")))
        .unwrap();

    let parsed = parser.parse_tokens(&["-q", "-q"], &[]).unwrap();

    assert_eq!(parsed.get("quiet"), Some(&Value::from("silent")));
}

#[test]
fn lookup_falls_back_to_attributes() {
    let (parser, _) = tidy();
    let parsed = parser.parse_tokens(&["-r"], &[]).unwrap();

    assert_eq!(parsed.lookup("recursive"), Some(Lookup::Opt(&Value::Bool(true))));
    assert_eq!(parsed.lookup("program"), Some(Lookup::Attribute("tidy")));
    assert_eq!(parsed.lookup("version"), Some(Lookup::Attribute("4.2.0")));
    assert_eq!(parsed.lookup("bogus"), None);
}

#[test]
fn parser_reuse() {
    let (parser, _) = tidy();
    let arguments = ArgumentList::with_program("tidy", ["-r", "src"]);

    let first = parser.parse_arguments(&arguments, &[]).unwrap();
    let second = parser.parse_tokens(&["-q"], &[]).unwrap();

    assert_eq!(first.get("recursive"), Some(&Value::Bool(true)));
    assert_eq!(first.get("quiet"), None);
    assert_eq!(first.unrecognised(), &["src"]);
    assert_eq!(second.get("recursive"), None);
    assert_eq!(second.get("quiet"), Some(&Value::Bool(true)));
    assert!(second.unrecognised().is_empty());
}

#[test]
fn expand() {
    let (parser, _) = tidy();
    let arguments =
        ArgumentList::with_program("tidy", ["-nrCx.toml", "--colour=always", "-z"]);

    let expanded = parser.expand(&arguments);

    assert_eq!(expanded.program(), Some("tidy"));
    assert_eq!(
        expanded.tokens(),
        &["-n", "-r", "-C", "x.toml", "--colour", "always", "-z"]
    );
}

#[rstest]
#[case("no usage line\n")]
#[case("")]
fn spec_shape_error(#[case] spec: &str) {
    assert!(matches!(OptionParser::new(spec), Err(SpecError::Shape)));
}

#[test]
fn spec_ambiguous_error() {
    let spec = "bad 1.0
Usage: bad

  -o, --opt=ARG, --other=[ARG]  confused
";

    assert!(matches!(
        OptionParser::new(spec),
        Err(SpecError::Ambiguous { .. })
    ));
}
