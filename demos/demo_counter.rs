use optparse::{boolean, ConfigError, Handler, OptionParser, Parsed, Payload, Value};

const SPEC: &str = "counter 0.3.1
Usage: counter [OPTIONS] [WORD]...

Count the WORDs.

  -v, --verbose          report progress (repeat for more)
  -c, --colour=[WHEN]    colourize the count; WHEN is yes or no
  -s, --skip=WORD        do not count WORD
      --                 end of options
  -?, --help             display this help and exit
";

fn main() {
    let parser = counter();
    let parsed = parser.parse(&[("colour", Value::Bool(false))]);
    println!("{}", report(&parsed));
}

// Configure the parser; `-v` counts its repeats rather than storing a flag.
fn counter() -> OptionParser {
    let mut parser = OptionParser::build(SPEC);

    if let Err(error) = configure(&mut parser) {
        eprintln!("{error}");
        std::process::exit(1);
    }

    parser
}

fn configure(parser: &mut OptionParser) -> Result<(), ConfigError> {
    parser.on(
        ["v", "verbose"],
        Handler::custom(|session, tokens, index, _| {
            let level = match session.opts().get("verbose").and_then(Value::as_str) {
                Some(level) => level.parse::<u32>().unwrap_or_default() + 1,
                None => 1,
            };
            session.assign(&tokens[index], Value::from(level.to_string()));
            Ok(index + 1)
        }),
        None,
    )?;
    parser.on(
        ["c", "colour"],
        Handler::Optional,
        Some(Payload::transform(boolean)),
    )?;
    Ok(())
}

fn report(parsed: &Parsed<'_>) -> String {
    let skipped: Vec<&str> = match parsed.get("skip") {
        Some(Value::Str(word)) => vec![word.as_str()],
        Some(Value::List(words)) => words.iter().filter_map(Value::as_str).collect(),
        _ => Vec::default(),
    };
    let count = parsed
        .unrecognised()
        .iter()
        .filter(|word| !skipped.contains(&word.as_str()))
        .count();
    let colour = parsed.get("colour").and_then(Value::as_bool).unwrap_or(false);
    let verbose = parsed.get("verbose").and_then(Value::as_str).unwrap_or("0");

    if colour {
        format!("\x1b[1m{count}\x1b[0m (verbosity {verbose})")
    } else {
        format!("{count} (verbosity {verbose})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_words() {
        let parser = counter();
        let parsed = parser
            .parse_tokens(
                &["-vv", "a", "b", "-sb", "c", "--", "-v"],
                &[("colour", Value::Bool(false))],
            )
            .unwrap();

        assert_eq!(report(&parsed), "3 (verbosity 2)");
    }

    #[test]
    fn colour() {
        let parser = counter();
        let parsed = parser.parse_tokens(&["--colour=yes", "a"], &[]).unwrap();

        assert_eq!(report(&parsed), "\x1b[1m1\x1b[0m (verbosity 0)");
    }
}
