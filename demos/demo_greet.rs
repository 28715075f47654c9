use optparse::{OptionParser, Value};

const SPEC: &str = "greet 1.0.0
Written for the optparse demos.

Usage: greet [OPTIONS] NAME...

Say hello to each NAME.

Options:
  -l, --loud             shout the greeting
  -g, --greeting=WORD    use WORD instead of 'hello'
  -?, --help             display this help and exit
  -V, --version          display version information and exit
";

fn main() {
    let parser = OptionParser::build(SPEC);
    let parsed = parser.parse(&[("greeting", Value::from("hello"))]);

    let greeting = parsed
        .get("greeting")
        .and_then(Value::as_str)
        .unwrap_or("hello");
    let loud = parsed.get("loud").and_then(Value::as_bool).unwrap_or(false);

    for name in parsed.unrecognised() {
        let line = format!("{greeting}, {name}!");

        if loud {
            println!("{}", line.to_uppercase());
        } else {
            println!("{line}");
        }
    }
}
