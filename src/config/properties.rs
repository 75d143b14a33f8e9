//! Ordered property set and the `.properties` text format.
//!
//! Reading follows the classic line-oriented format: `#`/`!` comments,
//! `=`, `:` or whitespace separators, backslash line continuations and the
//! `\t \n \r \f \uXXXX` escapes. Writing emits one `key=value` line per
//! entry in sorted key order, escaping separators, comment markers and every
//! character outside printable ASCII so the output is stable across runs.

use crate::error::BootstrapError;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

/// Key/value configuration set with deterministic (sorted) iteration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: BTreeMap<String, String>,
}

/// Syntax error in a `.properties` document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in sorted key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Apply `layer` on top of this set; keys in `layer` win.
    pub fn overlay(&mut self, layer: &Properties) {
        for (key, value) in &layer.entries {
            self.entries.insert(key.clone(), value.clone());
        }
    }

    /// Parse a `.properties` document.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut props = Properties::new();
        for (line_no, logical) in logical_lines(text) {
            let (raw_key, raw_value) = split_key_value(&logical);
            let key = unescape(raw_key).map_err(|message| ParseError {
                line: line_no,
                message,
            })?;
            let value = unescape(raw_value).map_err(|message| ParseError {
                line: line_no,
                message,
            })?;
            props.entries.insert(key, value);
        }
        Ok(props)
    }

    /// Read and parse a properties file from disk, decoded with [`decode_text`].
    pub fn load_file(path: &Path) -> Result<Self, BootstrapError> {
        let bytes = std::fs::read(path).map_err(|e| BootstrapError::io(path, e))?;
        Self::parse(&decode_text(bytes)).map_err(|e| BootstrapError::Decode {
            path: path.to_path_buf(),
            line: e.line,
            message: e.message,
        })
    }

    /// Render as sorted `key=value` lines.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.entries {
            escape_into(&mut out, key, true);
            out.push('=');
            escape_into(&mut out, value, false);
            out.push('\n');
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Properties {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Decode raw file bytes. UTF-8 is expected; anything that is not valid
/// UTF-8 is decoded as ISO-8859-1, the historical encoding of the format.
pub(crate) fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => e.into_bytes().iter().map(|&b| b as char).collect(),
    }
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\x0c'
}

/// Join continuation lines and drop comments/blank lines. Yields the
/// 1-based number of the first physical line of each logical line.
fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut current: Option<(usize, String)> = None;

    // `\r\n`, `\r` and `\n` all end a line
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    for (idx, physical) in text.split('\n').enumerate() {
        let trimmed = physical.trim_start_matches(is_blank);

        let (start, mut buf) = match current.take() {
            Some(pending) => pending,
            None => {
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                (idx + 1, String::new())
            }
        };

        let trailing = trimmed.chars().rev().take_while(|&c| c == '\\').count();
        if trailing % 2 == 1 {
            buf.push_str(&trimmed[..trimmed.len() - 1]);
            current = Some((start, buf));
        } else {
            buf.push_str(trimmed);
            lines.push((start, buf));
        }
    }

    if let Some(pending) = current {
        lines.push(pending);
    }
    lines
}

/// Split a logical line at the first unescaped separator.
fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || is_blank(c) {
            key_end = i;
            break;
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start_matches(is_blank);
    if let Some(stripped) = rest.strip_prefix(&['=', ':'][..]) {
        rest = stripped.trim_start_matches(is_blank);
    }
    (key, rest)
}

fn unescape(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut units: Vec<u16> = Vec::new();
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            flush_units(&mut units, &mut out)?;
            out.push(c);
            continue;
        }
        let Some(next) = chars.next() else {
            break;
        };
        if next == 'u' {
            let hex: String = chars.by_ref().take(4).collect();
            if hex.len() != 4 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err("Malformed \\uxxxx encoding".to_string());
            }
            let unit = u16::from_str_radix(&hex, 16)
                .map_err(|_| format!("Malformed \\uxxxx encoding: \\u{}", hex))?;
            units.push(unit);
            continue;
        }
        flush_units(&mut units, &mut out)?;
        out.push(match next {
            't' => '\t',
            'n' => '\n',
            'r' => '\r',
            'f' => '\x0c',
            other => other,
        });
    }
    flush_units(&mut units, &mut out)?;
    Ok(out)
}

fn flush_units(units: &mut Vec<u16>, out: &mut String) -> Result<(), String> {
    if units.is_empty() {
        return Ok(());
    }
    for decoded in char::decode_utf16(units.drain(..)) {
        let c = decoded
            .map_err(|e| format!("Unpaired surrogate \\u{:04X}", e.unpaired_surrogate()))?;
        out.push(c);
    }
    Ok(())
}

fn escape_into(out: &mut String, s: &str, is_key: bool) {
    for (i, c) in s.chars().enumerate() {
        match c {
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            _ => {
                let mut buf = [0u16; 2];
                for unit in c.encode_utf16(&mut buf) {
                    let _ = write!(out, "\\u{:04X}", unit);
                }
            }
        }
    }
}
