//! S-expression reader
//!
//! Consumes a port one character at a time, producing one value per
//! call and the eof sentinel when input is exhausted. Syntax follows
//! the conservative line: a sign is numeric only when a digit follows,
//! no exponent syntax, `.`/`..`/`...` are symbols, and `'` `` ` `` `,`
//! `,@` expand to their quotation forms.

use sable_core::Value;

use tracing::warn;

use crate::error::{Error, Result};
use crate::types::boolean::mk_bool;
use crate::types::character::{char_get, mk_char};
use crate::types::eof::{is_eof_object, mk_eof_object};
use crate::types::pair::{cons, list_from_slice, nil};
use crate::types::port::{is_input_port_open, peek_char, read_char, read_line};
use crate::types::string::mk_string;
use crate::types::symbol::symbol;
use crate::types::vector::mk_vector;

fn is_symbol_initial(c: u32) -> bool {
    char::from_u32(c)
        .map(|ch| ch.is_ascii_alphabetic() || "!$%&*/:<=>?^_~".contains(ch))
        .unwrap_or(false)
}

fn is_symbol_subsequent(c: u32) -> bool {
    is_symbol_initial(c)
        || char::from_u32(c)
            .map(|ch| ch.is_ascii_digit() || "+-.@".contains(ch))
            .unwrap_or(false)
}

fn is_delimiter(c: u32) -> bool {
    char::from_u32(c)
        .map(|ch| ch.is_ascii_whitespace() || "()\";".contains(ch))
        .unwrap_or(false)
}

fn is_digit(c: u32) -> bool {
    char::from_u32(c).map(|ch| ch.is_ascii_digit()).unwrap_or(false)
}

/// Peek the next character's code point, or None at eof.
fn peek(port: Value) -> Result<Option<u32>> {
    let v = peek_char(port)?;
    if is_eof_object(v) {
        return Ok(None);
    }
    Ok(Some(char_get(v)?))
}

fn quote_form(port: Value, name: &str) -> Result<Value> {
    let datum = read(port)?;
    if is_eof_object(datum) {
        return Err(Error::parse_error(format!("unexpected eof after {name}")));
    }
    Ok(list_from_slice(&[symbol(name), datum]))
}

/// Read one datum from `port`; the eof sentinel when input is
/// exhausted.
pub fn read(port: Value) -> Result<Value> {
    if !is_input_port_open(port)? {
        return Ok(mk_eof_object());
    }

    loop {
        let val = read_char(port)?;
        if is_eof_object(val) {
            return Ok(val);
        }

        let ch = char_get(val)?;

        if char::from_u32(ch).map(|c| c.is_ascii_whitespace()) == Some(true) {
            continue;
        }

        if ch == u32::from(b'.') {
            if peek(port)? != Some(u32::from(b'.')) {
                return Ok(symbol("."));
            }
            read_char(port)?;
            if peek(port)? != Some(u32::from(b'.')) {
                return Ok(symbol(".."));
            }
            read_char(port)?;
            return Ok(symbol("..."));
        }

        if is_symbol_initial(ch) {
            return read_symbol(port, ch);
        }

        if ch == u32::from(b'+') || ch == u32::from(b'-') {
            // A sign is numeric only when a digit follows.
            if peek(port)?.map(is_digit) == Some(true) {
                return read_number(port, ch);
            }
            return Ok(symbol(if ch == u32::from(b'+') { "+" } else { "-" }));
        }

        if is_digit(ch) {
            return read_number(port, ch);
        }

        match u8::try_from(ch).map(char::from) {
            Ok(';') => {
                read_line(port)?;
                continue;
            }
            Ok('\'') => return quote_form(port, "quote"),
            Ok('`') => return quote_form(port, "quasiquote"),
            Ok(',') => {
                if peek(port)? == Some(u32::from(b'@')) {
                    read_char(port)?;
                    return quote_form(port, "unquote-splicing");
                }
                return quote_form(port, "unquote");
            }
            Ok('"') => return read_string(port),
            Ok('(') => {
                let (elements, tail) = read_list(port)?;
                let mut out = tail.unwrap_or_else(nil);
                for &e in elements.iter().rev() {
                    out = cons(e, out);
                }
                return Ok(out);
            }
            Ok(')') => return Err(Error::parse_error("unexpected closing paren")),
            Ok('#') => return read_hash(port),
            _ => {
                return Err(Error::parse_error(format!(
                    "unexpected character 0x{ch:x} in input"
                )));
            }
        }
    }
}

fn read_symbol(port: Value, first: u32) -> Result<Value> {
    let mut name = String::new();
    name.push(char::from_u32(first).unwrap_or('\u{fffd}'));
    while let Some(c) = peek(port)? {
        if !is_symbol_subsequent(c) {
            break;
        }
        read_char(port)?;
        name.push(char::from_u32(c).unwrap_or('\u{fffd}'));
    }
    Ok(symbol(&name))
}

fn read_number(port: Value, first: u32) -> Result<Value> {
    let mut text = String::new();
    text.push(char::from_u32(first).unwrap_or('0'));

    while let Some(c) = peek(port)? {
        if !is_digit(c) {
            break;
        }
        read_char(port)?;
        text.push(char::from_u32(c).unwrap_or('0'));
    }

    if peek(port)? != Some(u32::from(b'.')) {
        if let Ok(i) = text.parse::<i32>() {
            return Ok(Value::from_int(i));
        }
        // Out of int32 range: fall back to a double.
        return text
            .parse::<f64>()
            .map(Value::from_double)
            .map_err(|_| Error::parse_error(format!("bad number {text}")));
    }

    read_char(port)?;
    text.push('.');
    while let Some(c) = peek(port)? {
        if !is_digit(c) {
            break;
        }
        read_char(port)?;
        text.push(char::from_u32(c).unwrap_or('0'));
    }

    text.parse::<f64>()
        .map(Value::from_double)
        .map_err(|_| Error::parse_error(format!("bad number {text}")))
}

fn read_string(port: Value) -> Result<Value> {
    let mut out = String::new();

    loop {
        let val = read_char(port)?;
        if is_eof_object(val) {
            return Err(Error::parse_error(format!(
                "unexpected eof while parsing string: {out}"
            )));
        }

        let c = char_get(val)?;
        match u8::try_from(c).map(char::from) {
            Ok('"') => return Ok(mk_string(out)),
            Ok('\\') => read_string_escape(port, &mut out)?,
            _ => out.push(char::from_u32(c).unwrap_or('\u{fffd}')),
        }
    }
}

fn read_string_escape(port: Value, out: &mut String) -> Result<()> {
    let val = read_char(port)?;
    if is_eof_object(val) {
        return Err(Error::parse_error("unexpected eof in string escape"));
    }

    match u8::try_from(char_get(val)?).map(char::from) {
        Ok('"') => out.push('"'),
        Ok('\\') => out.push('\\'),
        Ok('|') => out.push('|'),
        Ok('t') => out.push('\t'),
        Ok('n') => out.push('\n'),
        Ok('r') => out.push('\r'),
        Ok('x') => {
            // \x<HEX>; inserts the code point.
            let mut hex = String::new();
            loop {
                let v = read_char(port)?;
                if is_eof_object(v) {
                    return Err(Error::parse_error("unexpected eof in hex escape"));
                }
                let c = char_get(v)?;
                if c == u32::from(b';') {
                    break;
                }
                hex.push(char::from_u32(c).unwrap_or('\u{fffd}'));
            }
            match u32::from_str_radix(&hex, 16) {
                Ok(code) => out.push(char::from_u32(code).unwrap_or('\u{fffd}')),
                Err(_) => warn!(escape = %hex, "bad hex escape, ignored"),
            }
        }
        // Backslash-whitespace continuation: swallow intraline
        // whitespace through at most one newline.
        Ok(' ') | Ok('\t') | Ok('\n') => {
            let mut saw_newline = char_get(val)? == u32::from(b'\n');
            while let Some(c) = peek(port)? {
                let is_newline = c == u32::from(b'\n');
                let is_blank = c == u32::from(b' ') || c == u32::from(b'\t');
                if is_newline && saw_newline {
                    break;
                }
                if !is_newline && !is_blank {
                    break;
                }
                saw_newline = saw_newline || is_newline;
                read_char(port)?;
            }
        }
        // Unknown escape: keep both characters.
        Ok(other) => {
            out.push('\\');
            out.push(other);
        }
        Err(_) => out.push('\u{fffd}'),
    }
    Ok(())
}

/// Elements of a parenthesized form, plus the datum after `.` for a
/// dotted tail.
fn read_list(port: Value) -> Result<(Vec<Value>, Option<Value>)> {
    let mut elements = Vec::new();
    let mut tail = None;

    loop {
        let chval = peek_char(port)?;
        if is_eof_object(chval) {
            return Err(Error::parse_error("unexpected eof while reading list or vector"));
        }

        let c = char_get(chval)?;
        if char::from_u32(c).map(|ch| ch.is_ascii_whitespace()) == Some(true) {
            read_char(port)?;
            continue;
        }
        if c == u32::from(b')') {
            read_char(port)?;
            return Ok((elements, tail));
        }

        let element = read(port)?;
        if is_eof_object(element) {
            return Err(Error::parse_error("unexpected eof while reading list or vector"));
        }

        if element == symbol(".") {
            if elements.is_empty() || tail.is_some() {
                return Err(Error::parse_error("unexpected dot in list"));
            }
            let datum = read(port)?;
            if is_eof_object(datum) {
                return Err(Error::parse_error("unexpected eof after dot"));
            }
            tail = Some(datum);
            continue;
        }

        if tail.is_some() {
            return Err(Error::parse_error("more than one datum after dot"));
        }
        elements.push(element);
    }
}

fn read_hash(port: Value) -> Result<Value> {
    let val = read_char(port)?;
    if is_eof_object(val) {
        return Err(Error::parse_error("unexpected eof after #"));
    }

    let c = u8::try_from(char_get(val)?)
        .map(char::from)
        .map_err(|_| Error::parse_error("cannot parse # sequence"))?;

    match c {
        '(' => {
            let (elements, tail) = read_list(port)?;
            if tail.is_some() {
                return Err(Error::parse_error("dotted tail in vector"));
            }
            Ok(mk_vector(elements))
        }

        't' | 'f' | '\\' => {
            let mut word = String::from("#");
            word.push(c);
            while let Some(next) = peek(port)? {
                if is_delimiter(next) {
                    break;
                }
                read_char(port)?;
                word.push(char::from_u32(next).unwrap_or('\u{fffd}'));
            }

            match word.as_str() {
                "#t" | "#true" => return Ok(mk_bool(true)),
                "#f" | "#false" => return Ok(mk_bool(false)),
                _ => {}
            }

            if c == '\\' {
                return read_character(port, &word);
            }
            Err(Error::parse_error(format!("cannot parse # sequence {word}")))
        }

        _ => Err(Error::parse_error(format!("cannot parse # sequence #{c}"))),
    }
}

fn read_character(port: Value, word: &str) -> Result<Value> {
    // `#\` directly before a delimiter: the delimiter is the character.
    if word.len() == 2 {
        let v = read_char(port)?;
        if is_eof_object(v) {
            return Err(Error::parse_error("unexpected eof after #\\"));
        }
        return Ok(mk_char(char_get(v)?));
    }

    if word.len() == 3 {
        return Ok(mk_char(u32::from(word.as_bytes()[2])));
    }

    match word {
        "#\\alarm" => Ok(mk_char(0x07)),
        "#\\backspace" => Ok(mk_char(0x08)),
        "#\\delete" => Ok(mk_char(0x7f)),
        "#\\escape" => Ok(mk_char(0x1b)),
        "#\\newline" => Ok(mk_char(0x0a)),
        "#\\null" => Ok(mk_char(0x00)),
        "#\\return" => Ok(mk_char(0x0d)),
        "#\\space" => Ok(mk_char(0x20)),
        "#\\tab" => Ok(mk_char(0x09)),
        _ => Err(Error::parse_error(format!("unknown named character {word}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::printable;
    use crate::types::port::open_input_string;

    fn read_str(src: &str) -> Result<Value> {
        read(open_input_string(src.to_string()))
    }

    fn reads_as(src: &str, expected: &str) {
        assert_eq!(printable(read_str(src).unwrap()), expected, "input: {src}");
    }

    #[test]
    fn test_atoms() {
        reads_as("42", "42");
        reads_as("-7", "-7");
        reads_as("+7", "7");
        reads_as("2.5", "2.5");
        reads_as("-1.25", "-1.25");
        reads_as("foo", "foo");
        reads_as("+", "+");
        reads_as("-", "-");
        reads_as(".", ".");
        reads_as("...", "...");
        reads_as("#t", "#t");
        reads_as("#true", "#t");
        reads_as("#f", "#f");
        reads_as("#false", "#f");
    }

    #[test]
    fn test_lists_and_dotted_pairs() {
        reads_as("(1 2 3)", "(1 2 3)");
        reads_as("(1 . 2)", "(1 . 2)");
        reads_as("(1 2 . 3)", "(1 2 . 3)");
        reads_as("()", "()");
        reads_as("(a (b c) d)", "(a (b c) d)");
        assert!(read_str("(1 . 2 3)").is_err());
        assert!(read_str("(1 2").is_err());
        assert!(read_str(")").is_err());
    }

    #[test]
    fn test_quotation_shortcuts() {
        reads_as("'x", "(quote x)");
        reads_as("`(a ,b ,@c)", "(quasiquote (a (unquote b) (unquote-splicing c)))");
    }

    #[test]
    fn test_strings_and_escapes() {
        reads_as(r#""hello""#, r#""hello""#);
        assert_eq!(
            crate::types::string::string_get(read_str(r#""a\tb\nc""#).unwrap()).unwrap(),
            "a\tb\nc"
        );
        assert_eq!(
            crate::types::string::string_get(read_str(r#""q\"q""#).unwrap()).unwrap(),
            "q\"q"
        );
        assert_eq!(
            crate::types::string::string_get(read_str(r#""\x41;b""#).unwrap()).unwrap(),
            "Ab"
        );
        assert!(read_str(r#""unterminated"#).is_err());
    }

    #[test]
    fn test_characters() {
        reads_as(r"#\a", r"#\a");
        reads_as(r"#\space", r"#\space");
        reads_as(r"#\newline", r"#\newline");
        reads_as(r"#\(", r"#\(");
        assert!(read_str(r"#\nosuchchar").is_err());
    }

    #[test]
    fn test_vectors() {
        reads_as("#(1 2 3)", "#(1 2 3)");
        reads_as("#()", "#()");
        assert!(read_str("#(1 . 2)").is_err());
    }

    #[test]
    fn test_comments_and_whitespace() {
        reads_as("; comment\n 5", "5");
        reads_as("   \n\t 7", "7");
    }

    #[test]
    fn test_multiple_data_per_port() {
        let port = open_input_string("1 two \"three\"".to_string());
        assert_eq!(printable(read(port).unwrap()), "1");
        assert_eq!(printable(read(port).unwrap()), "two");
        assert_eq!(printable(read(port).unwrap()), "\"three\"");
        assert!(is_eof_object(read(port).unwrap()));
    }

    #[test]
    fn test_symbols_with_digits() {
        reads_as("list->vector", "list->vector");
        reads_as("x2", "x2");
        reads_as("set!", "set!");
    }
}
