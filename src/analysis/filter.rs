use regex::Regex;

/// Maps a tokenizer-produced token to an indexable term.
///
/// Returning the empty string drops the token; empty terms are never
/// stored in the index.
pub trait TermFilter {
    fn apply(&self, token: &str) -> String;
}

/// Default filter: lowercases the token, then strips leading and trailing
/// runs of non-word characters (word characters are letters, digits, and
/// underscore).
#[derive(Clone, Debug)]
pub struct LowercaseFilter {
    trim: Regex,
}

impl Default for LowercaseFilter {
    fn default() -> Self {
        Self {
            trim: Regex::new(r"^\W+|\W+$").expect("hard-coded trim pattern"),
        }
    }
}

impl TermFilter for LowercaseFilter {
    fn apply(&self, token: &str) -> String {
        let lowered = token.to_lowercase();
        self.trim.replace_all(&lowered, "").into_owned()
    }
}
