mod engine;
mod tsv;

pub use engine::{TesseractBuilder, TesseractRecognizer};
