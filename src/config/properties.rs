//! # Properties File Parsing
//!
//! Parses Java-style `.properties` content into a flat key/value map.
//!
//! Supported syntax:
//! - `#` and `!` comment lines, blank lines
//! - `key=value`, `key: value` and `key value` separators
//! - line continuations with a trailing backslash
//! - `\t`, `\n`, `\r`, `\f`, `\uXXXX` and escaped literal characters

use std::collections::HashMap;

/// Escape error location (1-based line of the entry that failed to decode)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidEscape {
    pub line: usize,
}

/// Parse `.properties` content. Later duplicates override earlier ones.
pub fn parse_properties(content: &str) -> Result<HashMap<String, String>, InvalidEscape> {
    let mut entries = HashMap::new();
    let mut logical = String::new();
    let mut continuing = false;
    let mut entry_line = 0;

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim_start();

        if !continuing {
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            entry_line = idx + 1;
        }

        if ends_with_continuation(line) {
            logical.push_str(&line[..line.len() - 1]);
            continuing = true;
            continue;
        }

        logical.push_str(line);
        continuing = false;
        let (key, value) = split_entry(&logical, entry_line)?;
        entries.insert(key, value);
        logical.clear();
    }

    // File ended mid-continuation
    if continuing && !logical.is_empty() {
        let (key, value) = split_entry(&logical, entry_line)?;
        entries.insert(key, value);
    }

    Ok(entries)
}

/// A line continues when it ends in an odd number of backslashes
fn ends_with_continuation(line: &str) -> bool {
    line.bytes().rev().take_while(|b| *b == b'\\').count() % 2 == 1
}

fn split_entry(logical: &str, line: usize) -> Result<(String, String), InvalidEscape> {
    let mut escaped = false;
    let mut key_end = logical.len();

    for (i, c) in logical.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                break;
            }
            c if c.is_whitespace() => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let mut rest = logical[key_end..].trim_start();
    if let Some(stripped) = rest.strip_prefix(['=', ':']) {
        rest = stripped.trim_start();
    }

    let key = unescape(&logical[..key_end]).ok_or(InvalidEscape { line })?;
    let value = unescape(rest).ok_or(InvalidEscape { line })?;
    Ok((key, value))
}

fn unescape(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => {
                let code = read_hex4(&mut chars)?;
                if (0xD800..=0xDBFF).contains(&code) {
                    // High surrogate must be followed by `\u` and a low surrogate
                    if chars.next() != Some('\\') || chars.next() != Some('u') {
                        return None;
                    }
                    let low = read_hex4(&mut chars)?;
                    if !(0xDC00..=0xDFFF).contains(&low) {
                        return None;
                    }
                    let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                    out.push(char::from_u32(combined)?);
                } else {
                    // Lone low surrogates are rejected by from_u32
                    out.push(char::from_u32(code)?);
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Some(out)
}

fn read_hex4(chars: &mut std::str::Chars<'_>) -> Option<u32> {
    let hex: String = chars.by_ref().take(4).collect();
    if hex.chars().count() != 4 {
        return None;
    }
    u32::from_str_radix(&hex, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_separators() {
        let props = parse_properties("a=1\nb: 2\nc 3\nd = 4\n").unwrap();
        assert_eq!(props["a"], "1");
        assert_eq!(props["b"], "2");
        assert_eq!(props["c"], "3");
        assert_eq!(props["d"], "4");
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let content = "# comment\n! also a comment\n\n   \nmy.secret=hello\n";
        let props = parse_properties(content).unwrap();
        assert_eq!(props.len(), 1);
        assert_eq!(props["my.secret"], "hello");
    }

    #[test]
    fn test_parse_continuation_lines() {
        let content = "my.secret=first,\\\n    second,\\\n    third\nother=x\n";
        let props = parse_properties(content).unwrap();
        assert_eq!(props["my.secret"], "first,second,third");
        assert_eq!(props["other"], "x");
    }

    #[test]
    fn test_escaped_backslash_is_not_continuation() {
        let props = parse_properties("path=C:\\\\temp\\\\\nnext=1\n").unwrap();
        assert_eq!(props["path"], "C:\\temp\\");
        assert_eq!(props["next"], "1");
    }

    #[test]
    fn test_parse_escapes() {
        let props = parse_properties("key\\=with\\:sep=tab\\there\\u0041\n").unwrap();
        assert_eq!(props["key=with:sep"], "tab\thereA");
    }

    #[test]
    fn test_parse_surrogate_pair_escape() {
        let props = parse_properties("my.secret=\\uD83D\\uDE00\n").unwrap();
        assert_eq!(props["my.secret"], "\u{1F600}");
    }

    #[test]
    fn test_lone_surrogates_rejected() {
        assert_eq!(
            parse_properties("a=\\uD83D\n").unwrap_err(),
            InvalidEscape { line: 1 }
        );
        assert_eq!(
            parse_properties("a=\\uD83Dx\n").unwrap_err(),
            InvalidEscape { line: 1 }
        );
        assert_eq!(
            parse_properties("a=\\uDE00\n").unwrap_err(),
            InvalidEscape { line: 1 }
        );
        assert_eq!(
            parse_properties("a=\\uD83D\\u0041\n").unwrap_err(),
            InvalidEscape { line: 1 }
        );
    }

    #[test]
    fn test_value_keeps_second_separator() {
        let props = parse_properties("k = = v\n").unwrap();
        assert_eq!(props["k"], "= v");
    }

    #[test]
    fn test_empty_value() {
        let props = parse_properties("my.secret=\nflag\n").unwrap();
        assert_eq!(props["my.secret"], "");
        assert_eq!(props["flag"], "");
    }

    #[test]
    fn test_later_duplicate_wins() {
        let props = parse_properties("my.secret=one\nmy.secret=two\n").unwrap();
        assert_eq!(props["my.secret"], "two");
    }

    #[test]
    fn test_bad_unicode_escape_reports_line() {
        let err = parse_properties("ok=1\n\nbad=\\u00zz\n").unwrap_err();
        assert_eq!(err, InvalidEscape { line: 3 });
    }

    #[test]
    fn test_trailing_continuation_at_eof() {
        let props = parse_properties("my.secret=dangling\\").unwrap();
        assert_eq!(props["my.secret"], "dangling");
    }
}
