//! `{{field}}` token scanning and substitution.
//!
//! Element content may embed placeholder tokens like `Name: {{name}}`.
//! [`scan`] finds them; [`substitute`] rewrites a string through a caller
//! supplied resolver. Tokens whose field the resolver does not know are
//! left verbatim, so a half-filled template stays readable.

use smallvec::SmallVec;

/// A `{{field}}` occurrence inside a content string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldToken {
    /// Field name with surrounding whitespace trimmed.
    pub name: String,
    /// Byte offset of the opening `{{`.
    pub start: usize,
    /// Byte offset just past the closing `}}`.
    pub end: usize,
}

/// Scan `content` for `{{field}}` tokens, in order of appearance.
///
/// An opening `{{` with no closing `}}` ends the scan; everything from it
/// on is plain text. Tokens with an empty (or whitespace-only) name are
/// skipped.
pub fn scan(content: &str) -> SmallVec<[FieldToken; 2]> {
    let mut tokens = SmallVec::new();
    let mut rest = content;
    let mut base = 0;

    while let Some(open) = rest.find("{{") {
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("}}") else {
            break;
        };
        let name = after_open[..close].trim();
        let end = open + 2 + close + 2;
        if !name.is_empty() {
            tokens.push(FieldToken {
                name: name.to_string(),
                start: base + open,
                end: base + end,
            });
        }
        base += end;
        rest = &rest[end..];
    }

    tokens
}

/// Rewrite `content`, replacing each token the resolver recognizes with
/// its value. Unresolved tokens are left exactly as written.
pub fn substitute<F>(content: &str, mut resolve: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    let tokens = scan(content);
    if tokens.is_empty() {
        return content.to_string();
    }

    let mut out = String::with_capacity(content.len());
    let mut cursor = 0;
    for token in &tokens {
        out.push_str(&content[cursor..token.start]);
        match resolve(&token.name) {
            Some(value) => out.push_str(&value),
            None => out.push_str(&content[token.start..token.end]),
        }
        cursor = token.end;
    }
    out.push_str(&content[cursor..]);
    out
}
