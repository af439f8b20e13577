//! Characters
//!
//! A 32-bit code point, self-evaluating. Printing uses the named form
//! for the characters the reader also accepts by name.

use sable_core::{FLAG_SELF_EVAL, Metatype, Value, is_instance, object_allocate, object_data_as};

use crate::error::{Result, check_type};

pub struct CharObj {
    pub codepoint: u32,
}

fn char_repr(v: Value) -> String {
    let c = unsafe { (*object_data_as::<CharObj>(v)).codepoint };
    let mut out = String::from("#\\");
    match c {
        0x07 => out.push_str("alarm"),
        0x08 => out.push_str("backspace"),
        0x7f => out.push_str("delete"),
        0x1b => out.push_str("escape"),
        0x0a => out.push_str("newline"),
        0x00 => out.push_str("null"),
        0x0d => out.push_str("return"),
        0x20 => out.push_str("space"),
        0x09 => out.push_str("tab"),
        _ => match char::from_u32(c) {
            Some(ch) if c < 0x80 => out.push(ch),
            _ => out.push_str(&format!("x{c:x}")),
        },
    }
    out
}

pub static CHAR_METATYPE: Metatype = Metatype {
    name: "char",
    flags: FLAG_SELF_EVAL,
    destruct: None,
    gc_visit: None,
    repr: Some(char_repr),
};

pub fn mk_char(c: u32) -> Value {
    object_allocate(&CHAR_METATYPE, CharObj { codepoint: c })
}

pub fn is_char(v: Value) -> bool {
    is_instance(v, &CHAR_METATYPE)
}

pub fn char_get(v: Value) -> Result<u32> {
    check_type(is_char, v, "expected character")?;
    Ok(unsafe { (*object_data_as::<CharObj>(v)).codepoint })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::printable;

    #[test]
    fn test_round_trip() {
        let v = mk_char(u32::from('a'));
        assert!(is_char(v));
        assert_eq!(char_get(v).unwrap(), u32::from('a'));
    }

    #[test]
    fn test_named_repr() {
        assert_eq!(printable(mk_char(u32::from(' '))), "#\\space");
        assert_eq!(printable(mk_char(u32::from('\n'))), "#\\newline");
        assert_eq!(printable(mk_char(u32::from('Q'))), "#\\Q");
    }
}
