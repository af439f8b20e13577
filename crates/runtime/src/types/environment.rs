//! Environments
//!
//! A frame is a mapping from interned symbol to value plus an outer
//! link: null for the empty case, another environment otherwise.
//! Definition writes the innermost frame; lookup and mutation walk
//! outward and fail with a variable error when the symbol is unbound.
//!
//! Bindings are keyed by the symbol's bit pattern: symbols are interned
//! and static, so the key is stable for the life of the thread and
//! never needs marking. The bound values do, and `gc_visit` walks them
//! along with the outer link.

use std::collections::HashMap;

use sable_core::{Metatype, Value, is_instance, object_allocate, object_data_as};

use crate::error::{Error, Result, check_type};
use crate::globals::globals;
use crate::types::boolean::{is_false, mk_bool};
use crate::types::pair::is_null;
use crate::types::symbol::is_symbol;

pub struct EnvironmentObj {
    pub outer: Value,
    pub bindings: HashMap<u64, Value>,
}

unsafe fn environment_destruct(v: Value) {
    unsafe { std::ptr::drop_in_place(object_data_as::<EnvironmentObj>(v)) }
}

unsafe fn environment_gc_visit(v: Value, visitor: &mut dyn FnMut(*mut Value)) {
    unsafe {
        let env = object_data_as::<EnvironmentObj>(v);
        for value in (*env).bindings.values_mut() {
            visitor(value as *mut Value);
        }
        visitor(&mut (*env).outer);
    }
}

fn environment_repr(v: Value) -> String {
    let env = unsafe { &*object_data_as::<EnvironmentObj>(v) };
    let outer = if is_null(env.outer) { "" } else { " +outer" };
    format!("<#environment {} bindings{}>", env.bindings.len(), outer)
}

pub static ENVIRONMENT_METATYPE: Metatype = Metatype {
    name: "environment",
    flags: 0,
    destruct: Some(environment_destruct),
    gc_visit: Some(environment_gc_visit),
    repr: Some(environment_repr),
};

/// A frame with no outer link; the shape of the global environment.
pub fn mk_empty_environment() -> Value {
    object_allocate(
        &ENVIRONMENT_METATYPE,
        EnvironmentObj {
            outer: globals().nil(),
            bindings: HashMap::new(),
        },
    )
}

/// A frame extending `outer`; passing null extends the global
/// environment.
pub fn mk_environment(outer: Value) -> Result<Value> {
    if !is_environment(outer) && !is_null(outer) {
        return Err(Error::type_error(
            "environment: outer must be an environment or null",
            outer,
        ));
    }

    let outer = if is_null(outer) {
        globals().global_environment()
    } else {
        outer
    };

    let env = mk_empty_environment();
    unsafe { (*object_data_as::<EnvironmentObj>(env)).outer = outer };
    Ok(env)
}

pub fn is_environment(v: Value) -> bool {
    is_instance(v, &ENVIRONMENT_METATYPE)
}

/// Innermost frame binding `sym`, walking outward; #f when unbound.
pub fn environment_find(env: Value, sym: Value) -> Result<Value> {
    check_type(is_environment, env, "environment-find: expected environment")?;
    check_type(is_symbol, sym, "environment-find: expected symbol")?;

    let mut frame = env;
    while !is_null(frame) {
        let data = unsafe { &*object_data_as::<EnvironmentObj>(frame) };
        if data.bindings.contains_key(&sym.to_bits()) {
            return Ok(frame);
        }
        frame = data.outer;
    }

    Ok(mk_bool(false))
}

pub fn environment_get(env: Value, sym: Value) -> Result<Value> {
    let frame = environment_find(env, sym)?;
    if is_false(frame) {
        return Err(Error::variable_error("unbound variable", sym));
    }
    let data = unsafe { &*object_data_as::<EnvironmentObj>(frame) };
    Ok(data.bindings[&sym.to_bits()])
}

/// Overwrite an existing binding; assignment requires prior definition.
pub fn environment_set(env: Value, sym: Value, val: Value) -> Result<Value> {
    let frame = environment_find(env, sym)?;
    if is_false(frame) {
        return Err(Error::variable_error("set!: unbound variable", sym));
    }
    unsafe {
        (*object_data_as::<EnvironmentObj>(frame))
            .bindings
            .insert(sym.to_bits(), val);
    }
    Ok(val)
}

/// Create or overwrite a binding in the innermost frame.
pub fn environment_define(env: Value, sym: Value, val: Value) -> Result<Value> {
    check_type(is_environment, env, "define: expected environment")?;
    check_type(is_symbol, sym, "define: expected symbol")?;

    unsafe {
        (*object_data_as::<EnvironmentObj>(env))
            .bindings
            .insert(sym.to_bits(), val);
    }
    Ok(val)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::number::mk_int;
    use crate::types::symbol::symbol;

    #[test]
    fn test_define_and_get() {
        let env = mk_empty_environment();
        environment_define(env, symbol("x"), mk_int(1)).unwrap();
        assert_eq!(environment_get(env, symbol("x")).unwrap(), mk_int(1));
        assert!(environment_get(env, symbol("missing")).is_err());
    }

    #[test]
    fn test_lookup_walks_outward() {
        let outer = mk_empty_environment();
        environment_define(outer, symbol("x"), mk_int(1)).unwrap();
        let inner = mk_environment(outer).unwrap();
        assert_eq!(environment_get(inner, symbol("x")).unwrap(), mk_int(1));
    }

    #[test]
    fn test_inner_define_shadows_without_touching_outer() {
        let outer = mk_empty_environment();
        environment_define(outer, symbol("x"), mk_int(1)).unwrap();
        let inner = mk_environment(outer).unwrap();
        environment_define(inner, symbol("x"), mk_int(2)).unwrap();

        assert_eq!(environment_get(inner, symbol("x")).unwrap(), mk_int(2));
        assert_eq!(environment_get(outer, symbol("x")).unwrap(), mk_int(1));
    }

    #[test]
    fn test_set_mutates_the_defining_frame() {
        let outer = mk_empty_environment();
        environment_define(outer, symbol("x"), mk_int(1)).unwrap();
        let inner = mk_environment(outer).unwrap();

        environment_set(inner, symbol("x"), mk_int(42)).unwrap();
        assert_eq!(environment_get(outer, symbol("x")).unwrap(), mk_int(42));

        assert!(environment_set(inner, symbol("undefined"), mk_int(0)).is_err());
    }
}
