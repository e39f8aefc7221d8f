//! Ordered answer options with letter labels.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Maximum number of options that can be labelled `A`..=`Z`.
pub const MAX_OPTIONS: usize = 26;

/// Ordered sequence of answer options (Value Object)
///
/// The position of an option determines its label: the first option is
/// `A`, the second `B`, and so on. An empty set is valid and means the
/// question is answered in free-response mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct OptionSet {
    options: Vec<String>,
}

impl OptionSet {
    /// Create an option set, rejecting more options than there are letters.
    pub fn new(options: Vec<String>) -> Result<Self, DomainError> {
        if options.len() > MAX_OPTIONS {
            return Err(DomainError::TooManyOptions {
                count: options.len(),
                max: MAX_OPTIONS,
            });
        }
        Ok(Self { options })
    }

    /// Callers guarantee `options.len() <= MAX_OPTIONS`.
    pub(crate) fn from_vec_unchecked(options: Vec<String>) -> Self {
        debug_assert!(options.len() <= MAX_OPTIONS);
        Self { options }
    }

    /// Free-response mode: no options at all.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Iterate `(label, option_text)` pairs in input order.
    pub fn labelled(&self) -> impl Iterator<Item = (char, &str)> {
        self.options
            .iter()
            .enumerate()
            .map(|(i, opt)| (label_for(i), opt.as_str()))
    }

    /// Label of the first option whose text equals `text`, ignoring case and
    /// surrounding whitespace.
    pub fn find_label(&self, text: &str) -> Option<char> {
        let wanted = text.trim().to_lowercase();
        self.labelled()
            .find(|(_, opt)| opt.trim().to_lowercase() == wanted)
            .map(|(label, _)| label)
    }
}

/// Letter label for the option at `index` (`0` -> `A`).
///
/// Callers guarantee `index < MAX_OPTIONS`.
fn label_for(index: usize) -> char {
    debug_assert!(index < MAX_OPTIONS);
    (b'A' + index as u8) as char
}

impl TryFrom<Vec<String>> for OptionSet {
    type Error = DomainError;

    fn try_from(options: Vec<String>) -> Result<Self, Self::Error> {
        OptionSet::new(options)
    }
}

impl From<OptionSet> for Vec<String> {
    fn from(set: OptionSet) -> Self {
        set.options
    }
}
