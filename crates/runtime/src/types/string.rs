//! Strings
//!
//! Heap-allocated byte strings, self-evaluating. The external
//! representation quotes and escapes so written output reads back
//! `equal?`.

use sable_core::{FLAG_SELF_EVAL, Metatype, Value, is_instance, object_allocate, object_data_as};

use crate::error::{Result, check_type};

pub struct StringObj {
    pub contents: String,
}

unsafe fn string_destruct(v: Value) {
    unsafe { std::ptr::drop_in_place(object_data_as::<StringObj>(v)) }
}

fn string_repr(v: Value) -> String {
    let contents = unsafe { &(*object_data_as::<StringObj>(v)).contents };
    let mut out = String::with_capacity(contents.len() + 2);
    out.push('"');
    for c in contents.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

pub static STRING_METATYPE: Metatype = Metatype {
    name: "string",
    flags: FLAG_SELF_EVAL,
    destruct: Some(string_destruct),
    gc_visit: None,
    repr: Some(string_repr),
};

pub fn mk_string(s: impl Into<String>) -> Value {
    object_allocate(&STRING_METATYPE, StringObj { contents: s.into() })
}

pub fn is_string(v: Value) -> bool {
    is_instance(v, &STRING_METATYPE)
}

pub fn string_get(v: Value) -> Result<String> {
    check_type(is_string, v, "expected string")?;
    Ok(unsafe { (*object_data_as::<StringObj>(v)).contents.clone() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::printable;

    #[test]
    fn test_round_trip() {
        let v = mk_string("hello");
        assert!(is_string(v));
        assert_eq!(string_get(v).unwrap(), "hello");
    }

    #[test]
    fn test_repr_escapes() {
        assert_eq!(printable(mk_string("a\"b\\c")), r#""a\"b\\c""#);
    }

    #[test]
    fn test_distinct_allocations_are_not_eq() {
        assert_ne!(mk_string("x"), mk_string("x"));
    }
}
