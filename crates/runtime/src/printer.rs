//! External representations
//!
//! `printable` is the `write`-style form: where practical, re-reading
//! it yields an `equal?` value. `display_text` is the human form:
//! strings and characters render as their raw text.

use sable_core::{Value, object_metatype};

/// Format a double so integral values read back as written: promoted
/// integer results print without a decimal point.
fn double_repr(d: f64) -> String {
    if d.is_nan() {
        return "+nan.0".to_string();
    }
    if d.is_infinite() {
        return if d > 0.0 { "+inf.0" } else { "-inf.0" }.to_string();
    }
    if d.fract() == 0.0 && d.abs() < 1e15 {
        return format!("{d:.0}");
    }
    format!("{d}")
}

/// The external textual representation of any value.
pub fn printable(v: Value) -> String {
    if v.is_int() {
        return v.as_int().to_string();
    }
    if v.is_double() {
        return double_repr(v.as_double());
    }

    let metatype = object_metatype(v);
    if metatype.is_null() {
        return format!("<#unknown object 0x{:x}>", v.to_bits());
    }

    match unsafe { (*metatype).repr } {
        Some(repr) => repr(v),
        None => format!("<#unprintable object 0x{:x}>", v.to_bits()),
    }
}

/// Like `printable`, but strings drop their quotes and characters
/// render as the bare character.
pub fn display_text(v: Value) -> String {
    if crate::types::string::is_string(v) {
        return crate::types::string::string_get(v).unwrap_or_default();
    }
    if crate::types::character::is_char(v) {
        let c = crate::types::character::char_get(v).unwrap_or(0);
        return char::from_u32(c).map(String::from).unwrap_or_default();
    }
    printable(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::number::{mk_double, mk_int};
    use crate::types::string::mk_string;

    #[test]
    fn test_numbers() {
        assert_eq!(printable(mk_int(6)), "6");
        assert_eq!(printable(mk_int(-3)), "-3");
        assert_eq!(printable(mk_double(2.5)), "2.5");
        // Promoted integral results print as plain integers.
        assert_eq!(printable(mk_double(5000050000.0)), "5000050000");
        assert_eq!(printable(mk_double(f64::INFINITY)), "+inf.0");
    }

    #[test]
    fn test_display_strips_quotes() {
        assert_eq!(printable(mk_string("hi")), "\"hi\"");
        assert_eq!(display_text(mk_string("hi")), "hi");
        assert_eq!(
            display_text(crate::types::character::mk_char(u32::from('c'))),
            "c"
        );
    }
}
