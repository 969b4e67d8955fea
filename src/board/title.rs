//! Display titles for clip file names

/// Words left exactly as written
pub const SMALL_WORDS: &[&str] = &["a", "an", "on", "the", "to"];

/// Turn a file stem into a display title.
///
/// Words are split on whitespace and rejoined with single spaces. Each word
/// is title-cased unless it is one of [`SMALL_WORDS`], which pass through
/// untouched (a capitalized `The` mid-title stays capitalized).
pub fn format_title(stem: &str) -> String {
    stem.split_whitespace()
        .map(|word| {
            if SMALL_WORDS.contains(&word) {
                word.to_string()
            } else {
                title_word(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase every letter that follows a separator, leave the rest alone
fn title_word(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut prev = ' ';
    for c in word.chars() {
        if is_separator(prev) {
            out.push(to_title(c));
        } else {
            out.push(c);
        }
        prev = c;
    }
    out
}

/// Single-character title case: digraphs take their titlecase form, and
/// letters whose uppercase is longer than one character (`ß`) stay as they are
fn to_title(c: char) -> char {
    match c {
        '\u{01C4}'..='\u{01C6}' => '\u{01C5}',
        '\u{01C7}'..='\u{01C9}' => '\u{01C8}',
        '\u{01CA}'..='\u{01CC}' => '\u{01CB}',
        '\u{01F1}'..='\u{01F3}' => '\u{01F2}',
        _ => {
            let mut upper = c.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(u), None) => u,
                _ => c,
            }
        }
    }
}

/// Word boundaries: whitespace and ASCII punctuation, but not `_`
fn is_separator(c: char) -> bool {
    if c.is_ascii() {
        return !(c.is_ascii_alphanumeric() || c == '_');
    }
    if c.is_alphanumeric() {
        return false;
    }
    c.is_whitespace()
}
