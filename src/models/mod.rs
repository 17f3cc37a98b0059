pub mod glossary;
pub mod stats;

pub use glossary::{Glossary, GlossaryBuilder, GlossaryEntry, LetterGroup, Section, MAIN_KEY};
pub use stats::ExtractionStats;
