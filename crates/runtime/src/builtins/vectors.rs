//! Vector primitives

use sable_core::Value;

use crate::arglist::{args_all, args_exact, args_range};
use crate::error::Result;
use crate::types::boolean::{mk_bool};
use crate::types::number::{mk_int, to_int};
use crate::types::pair::{list_from_slice, list_to_vec};
use crate::types::vector::{
    is_vector, mk_vector, vector_get, vector_length, vector_ref, vector_set,
};

pub fn prim_is_vector(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("vector?", argl)?;
    Ok(mk_bool(is_vector(v)))
}

pub fn prim_vector(argl: Value) -> Result<Value> {
    Ok(mk_vector(args_all("vector", argl)?))
}

pub fn prim_make_vector(argl: Value) -> Result<Value> {
    let args = args_range("make-vector", argl, 1, 2)?;
    let len = to_int(args[0])?.max(0) as usize;
    let fill = args.get(1).copied().unwrap_or_else(|| mk_int(0));
    Ok(mk_vector(vec![fill; len]))
}

pub fn prim_vector_length(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("vector-length", argl)?;
    Ok(mk_int(vector_length(v)?))
}

pub fn prim_vector_ref(argl: Value) -> Result<Value> {
    let [v, i] = args_exact::<2>("vector-ref", argl)?;
    vector_ref(v, to_int(i)?)
}

pub fn prim_vector_set(argl: Value) -> Result<Value> {
    let [v, i, val] = args_exact::<3>("vector-set!", argl)?;
    vector_set(v, to_int(i)?, val)
}

pub fn prim_vector_to_list(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("vector->list", argl)?;
    Ok(list_from_slice(&vector_get(v)?))
}

pub fn prim_list_to_vector(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("list->vector", argl)?;
    Ok(mk_vector(list_to_vec(v)?))
}
