//! Symbol, string, and character primitives

use sable_core::Value;

use crate::arglist::{args_all, args_at_least, args_exact};
use crate::error::{Error, Result};
use crate::types::boolean::mk_bool;
use crate::types::character::{char_get, is_char, mk_char};
use crate::types::number::{mk_int, to_int};
use crate::types::pair::{list_from_slice, list_to_vec};
use crate::types::string::{is_string, mk_string, string_get};
use crate::types::symbol::{is_symbol, symbol, symbol_name};

// =============================================================================
// Symbols
// =============================================================================

pub fn prim_is_symbol(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("symbol?", argl)?;
    Ok(mk_bool(is_symbol(v)))
}

pub fn prim_symbol_to_string(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("symbol->string", argl)?;
    Ok(mk_string(symbol_name(v)?))
}

pub fn prim_string_to_symbol(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("string->symbol", argl)?;
    Ok(symbol(&string_get(v)?))
}

// =============================================================================
// Strings
// =============================================================================

pub fn prim_is_string(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("string?", argl)?;
    Ok(mk_bool(is_string(v)))
}

pub fn prim_string_length(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("string-length", argl)?;
    Ok(mk_int(string_get(v)?.len() as i32))
}

pub fn prim_string_append(argl: Value) -> Result<Value> {
    let args = args_all("string-append", argl)?;
    let mut out = String::new();
    for &arg in &args {
        out.push_str(&string_get(arg)?);
    }
    Ok(mk_string(out))
}

pub fn prim_substring(argl: Value) -> Result<Value> {
    let [s, start, end] = args_exact::<3>("substring", argl)?;
    let text = string_get(s)?;
    let (start, end) = (to_int(start)?, to_int(end)?);

    if start < 0 || end < start {
        return Err(Error::call_error("substring: index out of range", argl));
    }
    // get() also rejects slicing through a multi-byte character.
    text.get(start as usize..end as usize)
        .map(mk_string)
        .ok_or_else(|| Error::call_error("substring: index out of range", argl))
}

pub fn prim_string_eq(argl: Value) -> Result<Value> {
    let args = args_at_least("string=?", argl, 2)?;
    let first = string_get(args[0])?;
    for &arg in &args[1..] {
        if string_get(arg)? != first {
            return Ok(mk_bool(false));
        }
    }
    Ok(mk_bool(true))
}

pub fn prim_string_to_list(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("string->list", argl)?;
    let chars: Vec<Value> = string_get(v)?
        .chars()
        .map(|c| mk_char(u32::from(c)))
        .collect();
    Ok(list_from_slice(&chars))
}

pub fn prim_list_to_string(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("list->string", argl)?;
    let mut out = String::new();
    for c in list_to_vec(v)? {
        out.push(char::from_u32(char_get(c)?).unwrap_or('\u{fffd}'));
    }
    Ok(mk_string(out))
}

// =============================================================================
// Characters
// =============================================================================

pub fn prim_is_char(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("char?", argl)?;
    Ok(mk_bool(is_char(v)))
}

pub fn prim_char_to_integer(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("char->integer", argl)?;
    Ok(mk_int(char_get(v)? as i32))
}

pub fn prim_integer_to_char(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("integer->char", argl)?;
    Ok(mk_char(to_int(v)? as u32))
}

pub fn prim_char_eq(argl: Value) -> Result<Value> {
    let args = args_at_least("char=?", argl, 2)?;
    let first = char_get(args[0])?;
    for &arg in &args[1..] {
        if char_get(arg)? != first {
            return Ok(mk_bool(false));
        }
    }
    Ok(mk_bool(true))
}

fn char_class(argl: Value, who: &str, test: fn(char) -> bool) -> Result<Value> {
    let [v] = args_exact::<1>(who, argl)?;
    let c = char::from_u32(char_get(v)?).unwrap_or('\u{fffd}');
    Ok(mk_bool(test(c)))
}

pub fn prim_char_alphabetic(argl: Value) -> Result<Value> {
    char_class(argl, "char-alphabetic?", |c| c.is_ascii_alphabetic())
}

pub fn prim_char_numeric(argl: Value) -> Result<Value> {
    char_class(argl, "char-numeric?", |c| c.is_ascii_digit())
}

pub fn prim_char_whitespace(argl: Value) -> Result<Value> {
    char_class(argl, "char-whitespace?", |c| c.is_ascii_whitespace())
}
