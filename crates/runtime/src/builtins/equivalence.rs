//! Equivalence and boolean primitives

use sable_core::Value;

use crate::arglist::args_exact;
use crate::equivalence::{eq, equal, eqv};
use crate::error::Result;
use crate::types::boolean::{is_bool, is_false, mk_bool};

pub fn prim_eq(argl: Value) -> Result<Value> {
    let [a, b] = args_exact::<2>("eq?", argl)?;
    Ok(mk_bool(eq(a, b)))
}

pub fn prim_eqv(argl: Value) -> Result<Value> {
    let [a, b] = args_exact::<2>("eqv?", argl)?;
    Ok(mk_bool(eqv(a, b)))
}

pub fn prim_equal(argl: Value) -> Result<Value> {
    let [a, b] = args_exact::<2>("equal?", argl)?;
    Ok(mk_bool(equal(a, b)))
}

pub fn prim_not(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("not", argl)?;
    Ok(mk_bool(is_false(v)))
}

pub fn prim_is_boolean(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("boolean?", argl)?;
    Ok(mk_bool(is_bool(v)))
}
