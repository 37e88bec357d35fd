//! Pretty-printing and syntax highlighting of JSON payloads.
//!
//! [`syntax_highlight`] turns already-serialized JSON into HTML markup in
//! which every token is wrapped in a `<span>` carrying one of the classes
//! [`TokenClass`] names. Object keys keep their trailing colon inside the span.

use crate::{Error, Result};
use serde_json::Value;

/// Highlighting class assigned to a JSON token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    /// Object key, including the following `:`.
    Key,
    /// String value.
    String,
    /// Numeric value.
    Number,
    /// `true` or `false`.
    Boolean,
    /// `null`.
    Null,
}

impl TokenClass {
    /// CSS class name emitted for the token.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Key => "key",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
        }
    }
}

/// Serialize `value` with 2-space indentation.
///
/// # Errors
///
/// Returns [`Error::ParseError`] if the value cannot be serialized.
pub fn pretty_print(value: &Value) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| Error::ParseError(format!("Failed to pretty-print JSON: {err}")))
}

/// Pretty-print `value` and highlight the result.
///
/// # Errors
///
/// Returns [`Error::ParseError`] if the value cannot be serialized.
pub fn highlight_value(value: &Value) -> Result<String> {
    pretty_print(value).map(|json| syntax_highlight(&json))
}

/// Wrap each token of serialized JSON in a classed `<span>`.
///
/// `&`, `<` and `>` are escaped everywhere; whitespace and punctuation pass
/// through unchanged. Input that is not valid JSON is still processed token
/// by token.
#[must_use]
pub fn syntax_highlight(json: &str) -> String {
    let bytes = json.as_bytes();
    let mut out = String::with_capacity(json.len() * 2);
    let mut pos = 0;

    while pos < bytes.len() {
        let (class, end) = match bytes[pos] {
            b'"' => scan_string(bytes, pos),
            b'-' | b'0'..=b'9' => match scan_number(bytes, pos) {
                Some(end) => (TokenClass::Number, end),
                None => {
                    out.push('-');
                    pos += 1;
                    continue;
                }
            },
            b if b.is_ascii_alphabetic() => {
                let end = scan_word(bytes, pos);
                match &json[pos..end] {
                    "true" | "false" => (TokenClass::Boolean, end),
                    "null" => (TokenClass::Null, end),
                    other => {
                        push_escaped(&mut out, other);
                        pos = end;
                        continue;
                    }
                }
            }
            _ => {
                // Copy one whole character so multi-byte input stays intact.
                let ch_len = json[pos..].chars().next().map_or(1, char::len_utf8);
                push_escaped(&mut out, &json[pos..pos + ch_len]);
                pos += ch_len;
                continue;
            }
        };

        out.push_str("<span class=\"");
        out.push_str(class.css_class());
        out.push_str("\">");
        push_escaped(&mut out, &json[pos..end]);
        out.push_str("</span>");
        pos = end;
    }

    out
}

/// Scan a string literal starting at the opening quote. A string followed by
/// optional whitespace and `:` is a key and the token extends over the colon.
fn scan_string(bytes: &[u8], start: usize) -> (TokenClass, usize) {
    let mut pos = start + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b'"' => {
                pos += 1;
                break;
            }
            _ => pos += 1,
        }
    }
    let end = pos.min(bytes.len());

    let mut look = end;
    while look < bytes.len() && bytes[look].is_ascii_whitespace() {
        look += 1;
    }
    if look < bytes.len() && bytes[look] == b':' {
        (TokenClass::Key, look + 1)
    } else {
        (TokenClass::String, end)
    }
}

/// Scan `-?\d+(\.\d*)?([eE][+-]?\d+)?`. Returns `None` if no digit follows
/// a leading minus sign.
fn scan_number(bytes: &[u8], start: usize) -> Option<usize> {
    let mut pos = start;
    if bytes[pos] == b'-' {
        pos += 1;
    }
    let digits_start = pos;
    pos = skip_digits(bytes, pos);
    if pos == digits_start {
        return None;
    }

    if pos < bytes.len() && bytes[pos] == b'.' {
        pos = skip_digits(bytes, pos + 1);
    }

    if pos < bytes.len() && matches!(bytes[pos], b'e' | b'E') {
        let mut exp = pos + 1;
        if exp < bytes.len() && matches!(bytes[exp], b'+' | b'-') {
            exp += 1;
        }
        let exp_end = skip_digits(bytes, exp);
        if exp_end > exp {
            pos = exp_end;
        }
    }

    Some(pos)
}

fn skip_digits(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    pos
}

fn scan_word(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_') {
        pos += 1;
    }
    pos
}

fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
}
