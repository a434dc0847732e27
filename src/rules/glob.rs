//! Shell-style glob patterns with substring semantics
//!
//! Patterns use shell `case` branch syntax:
//! `*` matches any run of characters, `?` exactly one, `[...]` a character
//! class (`[!...]` negated, `[:alpha:]` style names allowed inside) and
//! `\x` a literal `x`. A pattern matches when the candidate contains it
//! anywhere; nothing is anchored to word or line boundaries.

use regex::Regex;
use std::iter::Peekable;
use std::str::Chars;

use crate::error::ConfigError;

/// A compiled glob pattern
#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    regex: Regex,
}

impl GlobPattern {
    /// Compile a glob pattern
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        if pattern.is_empty() {
            return Err(malformed(pattern, "pattern is empty"));
        }

        let translated = translate(pattern).map_err(|reason| malformed(pattern, reason))?;
        let regex = Regex::new(&translated).map_err(|e| malformed(pattern, &e.to_string()))?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Check whether the candidate contains this pattern
    pub fn is_match(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }

    /// The pattern as written
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

fn malformed(pattern: &str, reason: &str) -> ConfigError {
    ConfigError::MalformedPattern {
        pattern: pattern.to_string(),
        reason: reason.to_string(),
    }
}

/// Translate glob syntax into an unanchored regex
fn translate(pattern: &str) -> Result<String, &'static str> {
    // `.` must cross newlines so `*` behaves the same on multi-line candidates
    let mut out = String::from("(?s)");
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '\\' => match chars.next() {
                Some(escaped) => push_literal(&mut out, escaped),
                None => return Err("trailing backslash"),
            },
            '[' => {
                out.push('[');
                if chars.peek() == Some(&'!') {
                    chars.next();
                    out.push('^');
                }
                // A leading `]` is part of the class, as in the shell
                if chars.peek() == Some(&']') {
                    chars.next();
                    out.push_str("\\]");
                }

                let mut closed = false;
                while let Some(member) = chars.next() {
                    match member {
                        ']' => {
                            closed = true;
                            break;
                        }
                        '[' if chars.peek() == Some(&':') => {
                            chars.next();
                            let name = posix_class(&mut chars)?;
                            out.push_str("[:");
                            out.push_str(name);
                            out.push_str(":]");
                        }
                        '\\' | '[' | '^' | '&' | '~' => {
                            out.push('\\');
                            out.push(member);
                        }
                        _ => out.push(member),
                    }
                }
                if !closed {
                    return Err("unterminated character class");
                }
                out.push(']');
            }
            _ => push_literal(&mut out, c),
        }
    }

    Ok(out)
}

const POSIX_CLASSES: &[&str] = &[
    "alnum", "alpha", "blank", "cntrl", "digit", "graph", "lower", "print", "punct", "space",
    "upper", "xdigit",
];

/// Read a `[:name:]` class body after its opening `[:`
fn posix_class(chars: &mut Peekable<Chars<'_>>) -> Result<&'static str, &'static str> {
    let mut name = String::new();
    loop {
        match chars.next() {
            Some(':') if chars.peek() == Some(&']') => {
                chars.next();
                break;
            }
            Some(c) if c.is_ascii_lowercase() => name.push(c),
            _ => return Err("malformed POSIX character class"),
        }
    }
    POSIX_CLASSES
        .iter()
        .copied()
        .find(|known| *known == name)
        .ok_or("unknown POSIX character class")
}

fn push_literal(out: &mut String, c: char) {
    let mut buf = [0u8; 4];
    out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}
