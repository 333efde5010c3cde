/// Flintstone Disk format definitions

/// Format constants and offsets
pub mod constants;

use constants::MAX_INPUT_CHARS;

/// Options controlling how dump text is decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpOptions {
    /// Characters read before the rest of the input is ignored (`None` for no limit)
    pub max_input_chars: Option<usize>,
    /// Require each data line's label to match its row index
    pub check_labels: bool,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            max_input_chars: Some(MAX_INPUT_CHARS),
            check_labels: false,
        }
    }
}

impl DumpOptions {
    /// Options with no input budget
    pub fn unbounded() -> Self {
        Self {
            max_input_chars: None,
            ..Self::default()
        }
    }

    /// Set the input budget
    pub fn max_input_chars(mut self, limit: Option<usize>) -> Self {
        self.max_input_chars = limit;
        self
    }

    /// Enable or disable label checking
    pub fn check_labels(mut self, check: bool) -> Self {
        self.check_labels = check;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = DumpOptions::default();
        assert_eq!(opts.max_input_chars, Some(4096));
        assert!(!opts.check_labels);
    }

    #[test]
    fn test_option_chaining() {
        let opts = DumpOptions::unbounded().check_labels(true);
        assert_eq!(opts.max_input_chars, None);
        assert!(opts.check_labels);

        let opts = opts.max_input_chars(Some(100));
        assert_eq!(opts.max_input_chars, Some(100));
    }
}
