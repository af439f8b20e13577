//! Procedure, evaluation, and environment primitives

use sable_core::Value;

use crate::arglist::{args_at_least, args_exact, args_range};
use crate::error::{Result, check_type};
use crate::eval::{apply_procedure, eval};
use crate::globals::interaction_environment;
use crate::printer::printable;
use crate::types::boolean::mk_bool;
use crate::types::environment::{is_environment, mk_empty_environment, mk_environment};
use crate::types::pair::{append, is_list, list_from_slice};
use crate::types::procedure::{
    is_compound_procedure, is_primitive_procedure, is_procedure,
};
use crate::types::string::mk_string;

pub fn prim_is_procedure(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("procedure?", argl)?;
    Ok(mk_bool(is_procedure(v)))
}

pub fn prim_is_primitive_procedure(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("primitive-procedure?", argl)?;
    Ok(mk_bool(is_primitive_procedure(v)))
}

pub fn prim_is_compound_procedure(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("compound-procedure?", argl)?;
    Ok(mk_bool(is_compound_procedure(v)))
}

/// `(apply proc a b ... rest)`: the final argument is a list of the
/// remaining arguments.
pub fn prim_apply(argl: Value) -> Result<Value> {
    let args = args_at_least("apply", argl, 1)?;
    let proc = args[0];

    let call_args = match args[1..].split_last() {
        None => crate::types::pair::nil(),
        Some((&rest, direct)) => {
            check_type(is_list, rest, "apply: last argument must be a list")?;
            append(list_from_slice(direct), rest)?
        }
    };

    apply_procedure(proc, call_args)
}

pub fn prim_eval(argl: Value) -> Result<Value> {
    let args = args_range("eval", argl, 1, 2)?;
    let env = args
        .get(1)
        .copied()
        .unwrap_or_else(interaction_environment);
    eval(args[0], env)
}

pub fn prim_is_environment(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("environment?", argl)?;
    Ok(mk_bool(is_environment(v)))
}

/// A fresh frame extending the given environment (or the global one).
pub fn prim_environment(argl: Value) -> Result<Value> {
    let args = args_range("environment", argl, 0, 1)?;
    let outer = args
        .first()
        .copied()
        .unwrap_or_else(crate::types::pair::nil);
    mk_environment(outer)
}

/// A frame with nothing in it and no outer link.
pub fn prim_null_environment(argl: Value) -> Result<Value> {
    args_range("null-environment", argl, 0, 1)?;
    Ok(mk_empty_environment())
}

pub fn prim_interaction_environment(argl: Value) -> Result<Value> {
    args_exact::<0>("interaction-environment", argl)?;
    Ok(interaction_environment())
}

pub fn prim_external_representation(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("external-representation", argl)?;
    Ok(mk_string(printable(v)))
}
