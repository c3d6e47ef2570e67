// File: src/text.rs
//! Default text cleaning and tokenization applied before hashing.

/// Turns raw document text into tokens. Implementations must produce the
/// same tokens for reference and suspect text, or hashes will not line up.
pub trait Normalizer {
    fn clean(&self, raw: &str) -> String;

    fn tokenize(&self, cleaned: &str) -> Vec<String> {
        tokenize(cleaned)
    }
}

/// Lowercases, strips punctuation and collapses whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNormalizer {
    pub keep_punctuation: bool,
}

impl Normalizer for DefaultNormalizer {
    fn clean(&self, raw: &str) -> String {
        clean_text(raw, self.keep_punctuation)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lowercases `raw`, drops characters that are neither word characters nor
/// whitespace (unless `keep_punctuation`), and collapses runs of whitespace
/// into single spaces.
pub fn clean_text(raw: &str, keep_punctuation: bool) -> String {
    let lowered = raw.to_lowercase();
    let kept = lowered
        .chars()
        .filter(|&c| keep_punctuation || is_word_char(c) || c.is_whitespace());

    let mut out = String::with_capacity(lowered.len());
    let mut pending_space = false;
    for c in kept {
        if c.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(c);
    }
    out
}

pub fn tokenize(cleaned: &str) -> Vec<String> {
    cleaned.split_whitespace().map(str::to_string).collect()
}

/// Returns at most `max_chars` characters of `text`, on a char boundary.
pub fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
