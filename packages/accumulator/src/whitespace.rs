//! Whitespace Module
//!
//! Unicode-aware whitespace handling shared by the builder, the text length
//! accessor and the minimizer.

/// Format characters that render as nothing and count as whitespace here,
/// on top of everything `char::is_whitespace` accepts.
const INVISIBLE_SPACES: [char; 6] = [
    '\u{180E}', // MONGOLIAN VOWEL SEPARATOR
    '\u{200B}', // ZERO WIDTH SPACE
    '\u{200C}', // ZERO WIDTH NON-JOINER
    '\u{200D}', // ZERO WIDTH JOINER
    '\u{2060}', // WORD JOINER
    '\u{FEFF}', // ZERO WIDTH NO-BREAK SPACE
];

pub fn is_message_whitespace(ch: char) -> bool {
    ch.is_whitespace() || INVISIBLE_SPACES.contains(&ch)
}

/// True for the empty string as well
pub fn is_blank_text(text: &str) -> bool {
    text.chars().all(is_message_whitespace)
}

pub fn non_whitespace_len(text: &str) -> usize {
    text.chars().filter(|&ch| !is_message_whitespace(ch)).count()
}

/// Splits `text` into its leading whitespace run and the rest
pub fn split_leading(text: &str) -> (&str, &str) {
    let at = text
        .char_indices()
        .find(|&(_, ch)| !is_message_whitespace(ch))
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    text.split_at(at)
}

/// Splits `text` into the rest and its trailing whitespace run
pub fn split_trailing(text: &str) -> (&str, &str) {
    let at = text
        .char_indices()
        .rev()
        .find(|&(_, ch)| !is_message_whitespace(ch))
        .map(|(i, ch)| i + ch.len_utf8())
        .unwrap_or(0);
    text.split_at(at)
}

/// Collapses every whitespace run into a single ASCII space
pub fn collapse(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for ch in text.chars() {
        if is_message_whitespace(ch) {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(ch);
            in_run = false;
        }
    }
    out
}
