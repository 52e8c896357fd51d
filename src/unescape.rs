//! Backslash-escape decoding for variable values
//!
//! Values arrive with string-literal escapes still in place (`a\nb` as four
//! characters). Decoding follows the usual literal rules:
//!
//! | Escape            | Result                          |
//! |-------------------|---------------------------------|
//! | `\\` `\'` `\"`    | the character itself            |
//! | `\a` `\b` `\f`    | U+0007, U+0008, U+000C          |
//! | `\n` `\r` `\t` `\v` | newline, CR, tab, U+000B      |
//! | `\<newline>`      | removed                         |
//! | `\o` .. `\ooo`    | octal code point                |
//! | `\xhh`            | hex code point, 2 digits        |
//! | `\uXXXX`          | hex code point, 4 digits        |
//! | `\UXXXXXXXX`      | hex code point, 8 digits        |
//! | `\N{NAME}`        | Unicode character by name       |
//!
//! Any other escaped character is kept as-is, backslash included.

use std::iter::Peekable;
use std::str::CharIndices;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnescapeError {
    #[error("truncated \\{kind} escape at offset {offset}: expected {expected} hex digits")]
    TruncatedHex {
        kind: char,
        offset: usize,
        expected: usize,
    },

    #[error("escape at offset {offset} encodes {code:#x}, which is not a valid character")]
    InvalidCodePoint { offset: usize, code: u32 },

    #[error("lone backslash at end of string (offset {offset})")]
    TrailingBackslash { offset: usize },

    #[error("malformed \\N{{...}} escape at offset {offset}")]
    MalformedName { offset: usize },

    #[error("unknown character name {name:?} at offset {offset}")]
    UnknownName { offset: usize, name: String },
}

/// Decode backslash escapes in `input`
pub fn unescape(input: &str) -> Result<String, UnescapeError> {
    // Fast path: nothing to decode
    if !input.contains('\\') {
        return Ok(input.to_string());
    }

    let mut out = String::with_capacity(input.len());
    let mut chars = input.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let Some((_, escaped)) = chars.next() else {
            return Err(UnescapeError::TrailingBackslash { offset });
        };

        match escaped {
            '\n' => {}
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{0B}'),
            '0'..='7' => {
                let mut code = escaped.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|&(_, d)| d.to_digit(8)) {
                        Some(digit) => {
                            code = code * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.push(to_char(code, offset)?);
            }
            'x' => out.push(read_hex(&mut chars, 'x', 2, offset)?),
            'u' => out.push(read_hex(&mut chars, 'u', 4, offset)?),
            'U' => out.push(read_hex(&mut chars, 'U', 8, offset)?),
            'N' => out.push(read_name(&mut chars, offset)?),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    Ok(out)
}

/// Read exactly `digits` hex digits and turn them into a char
fn read_hex(
    chars: &mut Peekable<CharIndices<'_>>,
    kind: char,
    digits: usize,
    offset: usize,
) -> Result<char, UnescapeError> {
    let mut code: u32 = 0;
    for _ in 0..digits {
        let digit = chars
            .next_if(|&(_, d)| d.is_ascii_hexdigit())
            .and_then(|(_, d)| d.to_digit(16))
            .ok_or(UnescapeError::TruncatedHex {
                kind,
                offset,
                expected: digits,
            })?;
        code = (code << 4) | digit;
    }
    to_char(code, offset)
}

/// Read `{NAME}` and look the name up in the Unicode name table
fn read_name(chars: &mut Peekable<CharIndices<'_>>, offset: usize) -> Result<char, UnescapeError> {
    if chars.next_if(|&(_, c)| c == '{').is_none() {
        return Err(UnescapeError::MalformedName { offset });
    }

    let mut name = String::new();
    loop {
        match chars.next() {
            Some((_, '}')) => break,
            Some((_, c)) => name.push(c),
            None => return Err(UnescapeError::MalformedName { offset }),
        }
    }

    if name.is_empty() {
        return Err(UnescapeError::MalformedName { offset });
    }

    unicode_names2::character(&name).ok_or(UnescapeError::UnknownName { offset, name })
}

fn to_char(code: u32, offset: usize) -> Result<char, UnescapeError> {
    char::from_u32(code).ok_or(UnescapeError::InvalidCodePoint { offset, code })
}
