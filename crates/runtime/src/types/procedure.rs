//! Procedures
//!
//! Primitive procedures wrap a host function taking the evaluated
//! argument list; compound procedures are closures over parameters,
//! body, and the environment of their lambda.

use sable_core::{Metatype, Value, is_instance, object_allocate, object_data_as};

use crate::error::{Result, check_type};
use crate::printer::printable;
use crate::types::pair::cons;
use crate::types::symbol::symbol;

/// Host callable behind a primitive: evaluated argument list in,
/// result out. Must validate its own arguments.
pub type PrimitiveFn = fn(Value) -> Result<Value>;

pub struct PrimitiveObj {
    pub name: String,
    pub func: PrimitiveFn,
}

unsafe fn primitive_destruct(v: Value) {
    unsafe { std::ptr::drop_in_place(object_data_as::<PrimitiveObj>(v)) }
}

fn primitive_repr(v: Value) -> String {
    let data = unsafe { &*object_data_as::<PrimitiveObj>(v) };
    if data.name.is_empty() {
        format!("<#primitive-procedure {:p}>", data.func as *const ())
    } else {
        format!("<#primitive-procedure {}>", data.name)
    }
}

pub static PRIMITIVE_METATYPE: Metatype = Metatype {
    name: "primitive-procedure",
    flags: 0,
    destruct: Some(primitive_destruct),
    gc_visit: None,
    repr: Some(primitive_repr),
};

#[repr(C)]
pub struct CompoundObj {
    pub environment: Value,
    pub parameters: Value,
    pub body: Value,
}

unsafe fn compound_gc_visit(v: Value, visitor: &mut dyn FnMut(*mut Value)) {
    unsafe {
        let proc = object_data_as::<CompoundObj>(v);
        visitor(&mut (*proc).environment);
        visitor(&mut (*proc).parameters);
        visitor(&mut (*proc).body);
    }
}

fn compound_repr(v: Value) -> String {
    let proc = unsafe { &*object_data_as::<CompoundObj>(v) };
    printable(cons(symbol("lambda"), cons(proc.parameters, proc.body)))
}

pub static COMPOUND_METATYPE: Metatype = Metatype {
    name: "compound-procedure",
    flags: 0,
    destruct: None,
    gc_visit: Some(compound_gc_visit),
    repr: Some(compound_repr),
};

pub fn mk_primitive_procedure(name: &str, func: PrimitiveFn) -> Value {
    object_allocate(
        &PRIMITIVE_METATYPE,
        PrimitiveObj {
            name: name.to_string(),
            func,
        },
    )
}

pub fn is_primitive_procedure(v: Value) -> bool {
    is_instance(v, &PRIMITIVE_METATYPE)
}

pub fn apply_primitive_procedure(proc: Value, argl: Value) -> Result<Value> {
    check_type(
        is_primitive_procedure,
        proc,
        "apply: expected primitive procedure",
    )?;
    let func = unsafe { (*object_data_as::<PrimitiveObj>(proc)).func };
    func(argl)
}

pub fn mk_procedure(parameters: Value, body: Value, environment: Value) -> Value {
    object_allocate(
        &COMPOUND_METATYPE,
        CompoundObj {
            environment,
            parameters,
            body,
        },
    )
}

pub fn is_compound_procedure(v: Value) -> bool {
    is_instance(v, &COMPOUND_METATYPE)
}

pub fn is_procedure(v: Value) -> bool {
    is_primitive_procedure(v) || is_compound_procedure(v)
}

pub fn procedure_parameters(proc: Value) -> Result<Value> {
    check_type(is_compound_procedure, proc, "expected compound procedure")?;
    Ok(unsafe { (*object_data_as::<CompoundObj>(proc)).parameters })
}

pub fn procedure_body(proc: Value) -> Result<Value> {
    check_type(is_compound_procedure, proc, "expected compound procedure")?;
    Ok(unsafe { (*object_data_as::<CompoundObj>(proc)).body })
}

pub fn procedure_environment(proc: Value) -> Result<Value> {
    check_type(is_compound_procedure, proc, "expected compound procedure")?;
    Ok(unsafe { (*object_data_as::<CompoundObj>(proc)).environment })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::number::mk_int;
    use crate::types::pair::{list_from_slice, nil};

    fn always_seven(_argl: Value) -> Result<Value> {
        Ok(mk_int(7))
    }

    #[test]
    fn test_primitive_application() {
        let p = mk_primitive_procedure("always-seven", always_seven);
        assert!(is_primitive_procedure(p));
        assert!(is_procedure(p));
        assert_eq!(apply_primitive_procedure(p, nil()).unwrap(), mk_int(7));
    }

    #[test]
    fn test_compound_accessors() {
        let params = list_from_slice(&[crate::types::symbol::symbol("x")]);
        let body = list_from_slice(&[mk_int(1)]);
        let env = crate::types::environment::mk_empty_environment();
        let p = mk_procedure(params, body, env);

        assert!(is_compound_procedure(p));
        assert_eq!(procedure_parameters(p).unwrap(), params);
        assert_eq!(procedure_body(p).unwrap(), body);
        assert_eq!(procedure_environment(p).unwrap(), env);
        assert!(procedure_body(mk_int(1)).is_err());
    }
}
