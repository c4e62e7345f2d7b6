use std::io::{self, BufRead, Write};

use sentimento::evaluation;

use super::{Shell, print_prediction};

const EXIT_WORDS: [&str; 3] = ["sair", "exit", "quit"];

pub(super) fn run(shell: &Shell) -> Result<(), String> {
    let summary = shell.train()?;
    println!(
        "Model trained on {} examples ({} features)",
        summary.examples, summary.features
    );
    let threshold = shell.config.classifier.low_confidence_threshold;
    for phrase in evaluation::demo_phrases() {
        let prediction = shell.classifier.classify(phrase).map_err(|err| err.to_string())?;
        print_prediction(phrase, prediction, threshold);
    }
    println!("\nType a sentence to classify, or `sair` to quit.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout()
            .flush()
            .map_err(|err| format!("Write prompt failed: {err}"))?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.map_err(|err| format!("Read stdin failed: {err}"))?;
        let text = line.trim();
        if is_exit_word(text) {
            break;
        }
        if text.is_empty() {
            println!("Please enter a non-empty sentence.");
            continue;
        }
        let prediction = shell.classifier.classify(text).map_err(|err| err.to_string())?;
        print_prediction(text, prediction, threshold);
    }
    println!("Bye!");
    Ok(())
}

fn is_exit_word(text: &str) -> bool {
    EXIT_WORDS
        .iter()
        .any(|word| text.eq_ignore_ascii_case(word))
}
