//! Configuration for reading and writing database files.

/// Longest name text accepted by default, in bytes.
pub const DEFAULT_MAX_NAME_LEN: usize = 1023;

/// Configuration for database serialization.
#[derive(Clone, Debug)]
pub struct Config {
    /// Upper bound on a single name's text length. Applied on both paths so
    /// the writer never produces a file the reader rejects.
    pub(crate) max_name_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_name_len: DEFAULT_MAX_NAME_LEN,
        }
    }
}

impl Config {
    /// Create a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the longest name text accepted, in bytes.
    pub fn max_name_len(mut self, value: usize) -> Self {
        self.max_name_len = value;
        self
    }
}
