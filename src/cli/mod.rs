//! Command dispatch for the `sentimento` binary.

mod interactive;
mod options;
mod session;

use std::path::PathBuf;

use sentimento::config::{self, AppConfig};
use sentimento::corpus::{CorpusStore, snapshot};
use sentimento::dataset::{self, SyntheticGenerator};
use sentimento::evaluation;
use sentimento::ml::{Prediction, SentimentClassifier, TrainSummary};

use options::Command;

pub(super) fn run(args: Vec<String>) -> Result<(), String> {
    let command = options::parse_args(args)?;
    if command == Command::Help {
        println!("{}", options::help_text());
        return Ok(());
    }
    let mut shell = Shell::open()?;
    match command {
        Command::Help => Ok(()),
        Command::Interactive => interactive::run(&shell),
        Command::Classify(text) => shell.classify(&text),
        Command::Evaluate => shell.evaluate(),
        Command::Features { top } => shell.features(top),
        Command::Session { collect, train } => session::run(&mut shell, collect, train),
        Command::Ingest(path) => shell.ingest(&path),
        Command::Synthetic { count, seed } => shell.synthetic(count, seed),
        Command::Stats => {
            shell.stats();
            Ok(())
        }
        Command::Reset => shell.reset(),
    }
}

/// Loaded config, restored corpus and the classifier they feed.
pub(super) struct Shell {
    config: AppConfig,
    snapshot_path: PathBuf,
    corpus: CorpusStore,
    classifier: SentimentClassifier,
}

impl Shell {
    fn open() -> Result<Self, String> {
        let config = config::load_or_default().map_err(|err| err.to_string())?;
        let snapshot_path = config.snapshot_path().map_err(|err| err.to_string())?;
        let mut corpus = CorpusStore::with_default_seed();
        snapshot::restore_into(&mut corpus, &snapshot_path);
        let classifier = SentimentClassifier::new(config.train_options());
        Ok(Self {
            config,
            snapshot_path,
            corpus,
            classifier,
        })
    }

    fn train(&self) -> Result<TrainSummary, String> {
        self.classifier
            .train(&self.corpus.all(true))
            .map_err(|err| format!("Training failed: {err}"))
    }

    fn save_snapshot(&self) -> Result<(), String> {
        snapshot::save(&self.corpus, &self.snapshot_path).map_err(|err| err.to_string())
    }

    fn classify(&self, text: &str) -> Result<(), String> {
        self.train()?;
        let prediction = self.classifier.classify(text).map_err(|err| err.to_string())?;
        print_prediction(text, prediction, self.config.classifier.low_confidence_threshold);
        Ok(())
    }

    fn evaluate(&self) -> Result<(), String> {
        self.train()?;
        let report = evaluation::evaluate(&self.classifier, &evaluation::held_out_examples())
            .map_err(|err| err.to_string())?;
        for row in &report.rows {
            let mark = if row.is_correct() { "✓" } else { "✗" };
            println!(
                "{mark} '{}' -> {} ({:.2}) [expected: {}]",
                row.text, row.prediction.label, row.prediction.confidence, row.expected
            );
        }
        println!(
            "\nAccuracy: {}/{} = {:.2}%",
            report.correct(),
            report.rows.len(),
            report.accuracy * 100.0
        );
        println!("\n{:>18} {:>10} {:>10}", "truth \\ predicted", "positive", "negative");
        for truth in sentimento::corpus::Sentiment::ALL {
            println!(
                "{:>18} {:>10} {:>10}",
                truth.as_str(),
                report.confusion.get(truth.index(), 0),
                report.confusion.get(truth.index(), 1)
            );
        }
        println!();
        for label in sentimento::corpus::Sentiment::ALL {
            let stats = report.class_stats(label);
            println!(
                "{:>8}: precision {:.2} recall {:.2} f1 {:.2} (support {})",
                label.as_str(),
                stats.precision,
                stats.recall,
                stats.f1(),
                stats.support
            );
        }
        Ok(())
    }

    fn features(&self, top: Option<usize>) -> Result<(), String> {
        self.train()?;
        let k = top.unwrap_or(self.config.classifier.informative_features);
        let features = self
            .classifier
            .most_informative_features(k)
            .map_err(|err| err.to_string())?;
        println!("Most Informative Features");
        for feature in features {
            println!("{feature}");
        }
        Ok(())
    }

    fn ingest(&mut self, path: &std::path::Path) -> Result<(), String> {
        let report = dataset::load_static(path).map_err(|err| err.to_string())?;
        for rejection in &report.rejected {
            eprintln!("Record {} skipped: {}", rejection.record, rejection.reason);
        }
        let added = dataset::ingest(&mut self.corpus, &report);
        self.save_snapshot()?;
        let summary = self.train()?;
        println!(
            "Added {added} examples ({} rejected); model trained on {} examples",
            report.rejected.len(),
            summary.examples
        );
        Ok(())
    }

    fn synthetic(&mut self, count: usize, seed: Option<u64>) -> Result<(), String> {
        let seed = seed.or(self.config.classifier.shuffle_seed).unwrap_or(42);
        let examples = SyntheticGenerator::new(seed).generate(count);
        for example in examples {
            self.corpus.add_example(example);
        }
        self.save_snapshot()?;
        println!("Added {count} synthetic examples (seed {seed})");
        Ok(())
    }

    fn stats(&self) {
        let counts = self.corpus.counts();
        println!("Seed examples:       {}", counts.seed_count);
        println!(
            "Collected examples:  {} ({} positive, {} negative)",
            counts.additional_count, counts.positive_in_additional, counts.negative_in_additional
        );
        println!("Snapshot:            {}", self.snapshot_path.display());
    }

    fn reset(&mut self) -> Result<(), String> {
        let removed = self.corpus.counts().additional_count;
        self.corpus.clear_additional();
        self.save_snapshot()?;
        println!("Removed {removed} collected examples");
        Ok(())
    }
}

fn print_prediction(text: &str, prediction: Prediction, threshold: f64) {
    let face = match prediction.label {
        sentimento::corpus::Sentiment::Positive => "😊",
        sentimento::corpus::Sentiment::Negative => "😞",
    };
    println!(
        "{face} '{text}' -> {} (confidence: {:.2}%)",
        prediction.label.as_str().to_uppercase(),
        prediction.confidence * 100.0
    );
    if prediction.confidence < threshold {
        println!("⚠️  Low confidence in this classification");
    }
}
