use std::path::PathBuf;

/// Default number of examples produced by `synthetic`.
const DEFAULT_SYNTHETIC_COUNT: usize = 20;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum Command {
    Interactive,
    Classify(String),
    Evaluate,
    Features { top: Option<usize> },
    Session { collect: Option<u64>, train: Option<u64> },
    Ingest(PathBuf),
    Synthetic { count: usize, seed: Option<u64> },
    Stats,
    Reset,
    Help,
}

pub(super) fn parse_args(args: Vec<String>) -> Result<Command, String> {
    let Some((name, rest)) = args.split_first() else {
        return Ok(Command::Interactive);
    };
    match name.as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "interactive" => {
            expect_no_args(rest)?;
            Ok(Command::Interactive)
        }
        "classify" => {
            let text = rest.join(" ");
            if text.trim().is_empty() {
                return Err(format!("classify requires text\n\n{}", help_text()));
            }
            Ok(Command::Classify(text))
        }
        "evaluate" => {
            expect_no_args(rest)?;
            Ok(Command::Evaluate)
        }
        "features" => {
            let mut top = None;
            walk_flags(rest, |flag, args, idx| match flag {
                "--top" => {
                    top = Some(parse_usize(args, idx, flag)?);
                    Ok(true)
                }
                _ => Ok(false),
            })?;
            Ok(Command::Features { top })
        }
        "session" => {
            let (mut collect, mut train) = (None, None);
            walk_flags(rest, |flag, args, idx| match flag {
                "--collect" => {
                    collect = Some(parse_u64(args, idx, flag)?);
                    Ok(true)
                }
                "--train" => {
                    train = Some(parse_u64(args, idx, flag)?);
                    Ok(true)
                }
                _ => Ok(false),
            })?;
            Ok(Command::Session { collect, train })
        }
        "ingest" => match rest {
            [path] => Ok(Command::Ingest(PathBuf::from(path))),
            _ => Err(format!("ingest requires exactly one file\n\n{}", help_text())),
        },
        "synthetic" => {
            let (mut count, mut seed) = (DEFAULT_SYNTHETIC_COUNT, None);
            walk_flags(rest, |flag, args, idx| match flag {
                "--count" => {
                    count = parse_usize(args, idx, flag)?;
                    Ok(true)
                }
                "--seed" => {
                    seed = Some(parse_u64(args, idx, flag)?);
                    Ok(true)
                }
                _ => Ok(false),
            })?;
            Ok(Command::Synthetic { count, seed })
        }
        "stats" => {
            expect_no_args(rest)?;
            Ok(Command::Stats)
        }
        "reset" => {
            expect_no_args(rest)?;
            Ok(Command::Reset)
        }
        other => Err(format!("Unknown command: {other}\n\n{}", help_text())),
    }
}

pub(super) fn help_text() -> String {
    [
        "sentimento: Naive Bayes sentiment classifier for English text",
        "",
        "Usage: sentimento [COMMAND] [OPTIONS]",
        "",
        "Commands:",
        "  interactive               Classify sentences typed on stdin (default)",
        "  classify <text>           Classify one sentence",
        "  evaluate                  Accuracy on the held-out phrases",
        "  features [--top N]        Most informative features",
        "  session [--collect N] [--train N]",
        "                            Timed collection of `text | label` lines, then retrain",
        "  ingest <file>             Add examples from a JSON or JSONL file",
        "  synthetic [--count N] [--seed N]",
        "                            Add generated balanced examples",
        "  stats                     Corpus sizes",
        "  reset                     Drop all collected examples",
        "",
        "Labels: positivo/pos/p/1 or negativo/neg/n/0",
        "Config: <config dir>/.sentimento/config.toml (SENTIMENTO_CONFIG_HOME overrides)",
    ]
    .join("\n")
}

fn expect_no_args(args: &[String]) -> Result<(), String> {
    match args.first() {
        Some(arg) => Err(format!("Unknown argument: {arg}\n\n{}", help_text())),
        None => Ok(()),
    }
}

/// Feed each flag to `apply`, which returns `Ok(false)` for flags it does not
/// know.
fn walk_flags(
    args: &[String],
    mut apply: impl FnMut(&str, &[String], &mut usize) -> Result<bool, String>,
) -> Result<(), String> {
    let mut idx = 0usize;
    while idx < args.len() {
        let flag = args[idx].as_str();
        if !apply(flag, args, &mut idx)? {
            return Err(format!("Unknown argument: {flag}\n\n{}", help_text()));
        }
        idx += 1;
    }
    Ok(())
}

fn parse_u64(args: &[String], idx: &mut usize, flag: &str) -> Result<u64, String> {
    let value = value_after(args, idx, flag)?;
    value
        .parse::<u64>()
        .map_err(|_| format!("Invalid {flag} value: {value}"))
}

fn parse_usize(args: &[String], idx: &mut usize, flag: &str) -> Result<usize, String> {
    let value = value_after(args, idx, flag)?;
    value
        .parse::<usize>()
        .map_err(|_| format!("Invalid {flag} value: {value}"))
}

fn value_after<'a>(args: &'a [String], idx: &mut usize, flag: &str) -> Result<&'a str, String> {
    *idx += 1;
    let value = args.get(*idx).ok_or_else(|| format!("{flag} requires a value"))?;
    Ok(value)
}
