//! Browser-authored regex patterns
//!
//! Field patterns are written for the browser's regex engine (no `u` flag).
//! They are rewritten into the `fancy-regex` dialect before compiling, which
//! keeps look-around and backreferences working:
//!
//! - `\d`, `\w` and `\b` (and their negations) are ASCII-only
//! - `.` stops at every line terminator, not only `\n`
//! - a `-` next to a class escape (`[\w-.]`) is a literal hyphen
//! - `[`, `&` and `~` inside a class are literals, not set operators
//! - `[]` matches nothing and `[^]` matches any character
//! - a `{` that does not start a quantifier is a literal
//! - `\cX`, `\0`, `\uXXXX` and identity escapes like `\e` become plain escapes

use fancy_regex::Regex;

use crate::error::PatternError;

/// A compiled field pattern that keeps the source it was written as
#[derive(Clone, Debug)]
pub struct FieldPattern {
    source: String,
    regex: Regex,
}

impl FieldPattern {
    pub fn compile(source: &str) -> Result<Self, PatternError> {
        let translated = translate(source);
        let regex = Regex::new(&translated).map_err(|e| PatternError {
            pattern: source.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Unanchored search, like `RegExp.prototype.test`
    pub fn test(&self, value: &str) -> bool {
        self.regex.is_match(value).unwrap_or_else(|e| {
            tracing::warn!(pattern = %self.source, error = %e, "Pattern match aborted");
            false
        })
    }
}

impl PartialEq for FieldPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

const WORD: &str = "0-9A-Za-z_";
const NOT_WORD: &str = r"\x00-\x2F\x3A-\x40\x5B-\x5E\x60\x7B-\x{10FFFF}";
const NOT_DIGIT: &str = r"\x00-\x2F\x3A-\x{10FFFF}";
const ANY_BUT_LINE_TERMINATOR: &str = r"[^\n\r\x{2028}\x{2029}]";
const WORD_BOUNDARY: &str =
    r"(?:(?<=[0-9A-Za-z_])(?![0-9A-Za-z_])|(?<![0-9A-Za-z_])(?=[0-9A-Za-z_]))";
const NOT_WORD_BOUNDARY: &str =
    r"(?:(?<=[0-9A-Za-z_])(?=[0-9A-Za-z_])|(?<![0-9A-Za-z_])(?![0-9A-Za-z_]))";

fn is_class_escape(ch: char) -> bool {
    matches!(ch, 'w' | 'W' | 'd' | 'D' | 's' | 'S')
}

/// Class body for an ASCII class escape, usable inside `[...]`
fn class_body(escape: char) -> Option<&'static str> {
    match escape {
        'd' => Some("0-9"),
        'D' => Some(NOT_DIGIT),
        'w' => Some(WORD),
        'W' => Some(NOT_WORD),
        _ => None,
    }
}

fn literal(ch: char) -> String {
    regex::escape(ch.encode_utf8(&mut [0; 4]))
}

fn take_hex(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, len: usize) -> Option<u32> {
    let ahead: String = chars.clone().take(len).collect();
    if ahead.len() != len || !ahead.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    for _ in 0..len {
        chars.next();
    }
    u32::from_str_radix(&ahead, 16).ok()
}

/// Whether the text after a `{` is a `n}`, `n,}` or `n,m}` quantifier
fn is_quantifier(chars: &std::iter::Peekable<std::str::Chars<'_>>) -> bool {
    let mut ahead = chars.clone().peekable();
    let mut digits = 0;
    while ahead.next_if(char::is_ascii_digit).is_some() {
        digits += 1;
    }
    if digits == 0 {
        return false;
    }
    if ahead.next_if_eq(&',').is_some() {
        while ahead.next_if(char::is_ascii_digit).is_some() {}
    }
    ahead.next() == Some('}')
}

/// Rewrite one escape sequence; `next` is the character after the backslash
fn translate_escape(
    next: char,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    in_class: bool,
) -> String {
    if let Some(body) = class_body(next) {
        return if in_class {
            body.to_string()
        } else {
            format!("[{}]", body)
        };
    }

    match next {
        'b' if in_class => r"\x08".to_string(),
        'b' => WORD_BOUNDARY.to_string(),
        'B' if !in_class => NOT_WORD_BOUNDARY.to_string(),
        's' | 'S' | 'f' | 'n' | 'r' | 't' | 'v' => format!("\\{}", next),
        'c' => match chars.next_if(char::is_ascii_alphabetic) {
            Some(letter) => format!("\\x{{{:X}}}", letter as u32 % 32),
            None => r"\\c".to_string(),
        },
        '0' if !chars.peek().map_or(false, char::is_ascii_digit) => r"\x00".to_string(),
        'x' => match take_hex(chars, 2) {
            Some(code) => format!("\\x{{{:X}}}", code),
            None => "x".to_string(),
        },
        'u' => match take_hex(chars, 4) {
            Some(code) => format!("\\x{{{:X}}}", code),
            None => "u".to_string(),
        },
        // Backreferences; inside a class a digit is only itself
        '1'..='9' if !in_class => format!("\\{}", next),
        'k' if !in_class && chars.peek() == Some(&'<') => r"\k".to_string(),
        _ => literal(next),
    }
}

/// Rewrite a browser regex source into the `fancy-regex` dialect
pub(crate) fn translate(source: &str) -> String {
    let mut out = String::with_capacity(source.len() + 8);
    let mut chars = source.chars().peekable();
    let mut in_class = false;
    // Set when the previous class item was a class escape like `\w`
    let mut after_class_escape = false;

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some(next) => {
                    out.push_str(&translate_escape(next, &mut chars, in_class));
                    after_class_escape = in_class && is_class_escape(next);
                }
                // A trailing backslash is left for the compiler to reject
                None => out.push('\\'),
            }
            continue;
        }

        if in_class {
            match ch {
                ']' => {
                    in_class = false;
                    out.push(']');
                }
                '[' | '&' | '~' => {
                    out.push('\\');
                    out.push(ch);
                }
                '-' => {
                    let mut ahead = chars.clone();
                    let before_class_escape = ahead.next() == Some('\\')
                        && ahead.next().map_or(false, is_class_escape);
                    if after_class_escape || before_class_escape {
                        out.push_str("\\-");
                    } else {
                        out.push('-');
                    }
                }
                _ => out.push(ch),
            }
        } else {
            match ch {
                '[' => {
                    let negated = chars.next_if_eq(&'^').is_some();
                    if chars.next_if_eq(&']').is_some() {
                        out.push_str(if negated { r"[\s\S]" } else { r"[^\s\S]" });
                    } else {
                        out.push('[');
                        if negated {
                            out.push('^');
                        }
                        in_class = true;
                    }
                }
                '.' => out.push_str(ANY_BUT_LINE_TERMINATOR),
                '{' if is_quantifier(&chars) => {
                    out.push('{');
                    while let Some(c) = chars.next() {
                        out.push(c);
                        if c == '}' {
                            break;
                        }
                    }
                }
                '{' | '}' | ']' => {
                    out.push('\\');
                    out.push(ch);
                }
                _ => out.push(ch),
            }
        }
        after_class_escape = false;
    }

    out
}
