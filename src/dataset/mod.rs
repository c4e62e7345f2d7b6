//! Bulk sources of labeled examples: static JSON files and a seeded synthetic
//! generator. Both feed the corpus `additional` set.

mod loader;
mod synthetic;

pub use loader::{DatasetError, IngestReport, Rejection, ingest, load_static};
pub use synthetic::SyntheticGenerator;
