#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::time::Duration;

/// Output produced when no keyword rule applies to a language
pub const PLACEHOLDER_OUTPUT: &str = "output";

/// Lower bound (inclusive) of the simulated execution time, in milliseconds
pub const EXEC_TIME_MIN_MS: u64 = 50;

/// Upper bound (inclusive) of the simulated execution time, in milliseconds
pub const EXEC_TIME_MAX_MS: u64 = 550;

/// Pause inserted before a run or submit to mimic a network round trip
pub const SIMULATED_LATENCY: Duration = Duration::from_millis(1000);

/// Prefix of every key the notebook writes
pub const NOTE_KEY_PREFIX: &str = "note_";

/// Extension used by the file-backed note store
pub const NOTE_FILE_EXTENSION: &str = "json";

/// Default directory for the file-backed note store, relative to the working
/// directory
pub const DEFAULT_NOTES_DIR: &str = ".labgrade/notes";

/// Text shown in place of hidden test case data
pub const HIDDEN_MASK: &str = "(hidden)";
