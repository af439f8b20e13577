//! Interned symbols
//!
//! A symbol is the result of interning a name: equal names yield the
//! same value, so `eq?` is symbol equality. Interned symbols carry the
//! static flag and live for the rest of the thread.

use sable_core::{FLAG_STATIC, Metatype, Value, is_instance, object_allocate, object_data_as};

use crate::error::{Result, check_type};
use crate::globals::globals;

pub struct SymbolObj {
    pub name: String,
}

unsafe fn symbol_destruct(v: Value) {
    unsafe { std::ptr::drop_in_place(object_data_as::<SymbolObj>(v)) }
}

fn symbol_repr(v: Value) -> String {
    unsafe { (*object_data_as::<SymbolObj>(v)).name.clone() }
}

pub static SYMBOL_METATYPE: Metatype = Metatype {
    name: "symbol",
    flags: FLAG_STATIC,
    destruct: Some(symbol_destruct),
    gc_visit: None,
    repr: Some(symbol_repr),
};

/// Intern `name`, returning the unique symbol for it.
pub fn symbol(name: &str) -> Value {
    globals().intern_symbol(name, || {
        object_allocate(
            &SYMBOL_METATYPE,
            SymbolObj {
                name: name.to_string(),
            },
        )
    })
}

pub fn is_symbol(v: Value) -> bool {
    is_instance(v, &SYMBOL_METATYPE)
}

pub fn symbol_name(v: Value) -> Result<String> {
    check_type(is_symbol, v, "symbol->string: expected symbol")?;
    Ok(unsafe { (*object_data_as::<SymbolObj>(v)).name.clone() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_names_intern_to_the_same_value() {
        assert_eq!(symbol("x"), symbol("x"));
        assert_ne!(symbol("x"), symbol("y"));
    }

    #[test]
    fn test_symbol_name_round_trip() {
        assert_eq!(symbol_name(symbol("lambda")).unwrap(), "lambda");
        assert!(symbol_name(Value::from_int(3)).is_err());
    }
}
