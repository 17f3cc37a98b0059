pub mod filename;
pub mod logging;

pub use filename::{sanitize_filename, sanitize_filename_within, MAX_FILENAME_BYTES};
