//! Vectors
//!
//! Contiguous mutable value storage, self-evaluating.

use sable_core::{FLAG_SELF_EVAL, Metatype, Value, is_instance, object_allocate, object_data_as};

use crate::error::{Error, Result, check_type};
use crate::printer::printable;

pub struct VectorObj {
    pub elements: Vec<Value>,
}

unsafe fn vector_destruct(v: Value) {
    unsafe { std::ptr::drop_in_place(object_data_as::<VectorObj>(v)) }
}

unsafe fn vector_gc_visit(v: Value, visitor: &mut dyn FnMut(*mut Value)) {
    unsafe {
        let vec = object_data_as::<VectorObj>(v);
        for element in (*vec).elements.iter_mut() {
            visitor(element as *mut Value);
        }
    }
}

fn vector_repr(v: Value) -> String {
    let elements = unsafe { &(*object_data_as::<VectorObj>(v)).elements };
    let mut out = String::from("#(");
    for (i, e) in elements.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&printable(*e));
    }
    out.push(')');
    out
}

pub static VECTOR_METATYPE: Metatype = Metatype {
    name: "vector",
    flags: FLAG_SELF_EVAL,
    destruct: Some(vector_destruct),
    gc_visit: Some(vector_gc_visit),
    repr: Some(vector_repr),
};

pub fn mk_vector(elements: Vec<Value>) -> Value {
    object_allocate(&VECTOR_METATYPE, VectorObj { elements })
}

pub fn is_vector(v: Value) -> bool {
    is_instance(v, &VECTOR_METATYPE)
}

pub fn vector_get(v: Value) -> Result<Vec<Value>> {
    check_type(is_vector, v, "expected vector")?;
    Ok(unsafe { (*object_data_as::<VectorObj>(v)).elements.clone() })
}

pub fn vector_length(v: Value) -> Result<i32> {
    check_type(is_vector, v, "vector-length: expected vector")?;
    Ok(unsafe { (*object_data_as::<VectorObj>(v)).elements.len() } as i32)
}

pub fn vector_ref(v: Value, index: i32) -> Result<Value> {
    check_type(is_vector, v, "vector-ref: expected vector")?;
    let elements = unsafe { &(*object_data_as::<VectorObj>(v)).elements };
    usize::try_from(index)
        .ok()
        .and_then(|i| elements.get(i).copied())
        .ok_or_else(|| Error::call_error("vector-ref: index out of range", Value::from_int(index)))
}

pub fn vector_set(v: Value, index: i32, val: Value) -> Result<Value> {
    check_type(is_vector, v, "vector-set!: expected vector")?;
    let elements = unsafe { &mut (*object_data_as::<VectorObj>(v)).elements };
    let slot = usize::try_from(index)
        .ok()
        .and_then(|i| elements.get_mut(i))
        .ok_or_else(|| Error::call_error("vector-set!: index out of range", Value::from_int(index)))?;
    *slot = val;
    Ok(val)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::printable;
    use crate::types::number::mk_int;

    #[test]
    fn test_ref_and_set() {
        let v = mk_vector(vec![mk_int(1), mk_int(2)]);
        assert_eq!(vector_length(v).unwrap(), 2);
        assert_eq!(vector_ref(v, 1).unwrap(), mk_int(2));
        vector_set(v, 0, mk_int(9)).unwrap();
        assert_eq!(vector_ref(v, 0).unwrap(), mk_int(9));
        assert!(vector_ref(v, 2).is_err());
        assert!(vector_ref(v, -1).is_err());
    }

    #[test]
    fn test_repr() {
        let v = mk_vector(vec![mk_int(1), mk_int(2)]);
        assert_eq!(printable(v), "#(1 2)");
        assert_eq!(printable(mk_vector(Vec::new())), "#()");
    }
}
