//! Syntactic recognizers
//!
//! Predicates and accessors that classify an S-expression node by its
//! head symbol and pull out its parts, plus the desugarings (`cond` to
//! nested `if`, `let` to an immediate application, procedure-shorthand
//! `define` to `lambda`). Consumed only by the evaluator.

use sable_core::{FLAG_SELF_EVAL, Value, object_metatype};

use tracing::warn;

use crate::error::{Error, Result, check_type};
use crate::printer::printable;
use crate::types::boolean::mk_bool;
use crate::types::number::is_number;
use crate::types::pair::{
    append, caadr, caddr, cadddr, cadr, car, cdadr, cdddr, cddr, cdr, cons, is_null, is_pair,
    is_tagged_list, list_from_slice, list_to_vec, nil,
};
use crate::types::symbol::{is_symbol, symbol};

fn tagged(exp: Value, name: &str) -> bool {
    is_tagged_list(exp, symbol(name))
}

// =============================================================================
// Classification
// =============================================================================

pub fn is_self_evaluating(exp: Value) -> bool {
    if is_number(exp) {
        return true;
    }
    let metatype = object_metatype(exp);
    !metatype.is_null() && unsafe { (*metatype).flags } & FLAG_SELF_EVAL != 0
}

pub fn is_variable(exp: Value) -> bool {
    is_symbol(exp)
}

pub fn is_quoted(exp: Value) -> bool {
    tagged(exp, "quote")
}

pub fn is_quasiquoted(exp: Value) -> bool {
    tagged(exp, "quasiquote")
}

pub fn is_unquoted(exp: Value) -> bool {
    tagged(exp, "unquote")
}

pub fn is_unquoted_splicing(exp: Value) -> bool {
    tagged(exp, "unquote-splicing")
}

pub fn is_assignment(exp: Value) -> bool {
    tagged(exp, "set!")
}

pub fn is_definition(exp: Value) -> bool {
    tagged(exp, "define")
}

pub fn is_if(exp: Value) -> bool {
    tagged(exp, "if")
}

pub fn is_lambda(exp: Value) -> bool {
    tagged(exp, "lambda")
}

pub fn is_begin(exp: Value) -> bool {
    tagged(exp, "begin")
}

pub fn is_cond(exp: Value) -> bool {
    tagged(exp, "cond")
}

pub fn is_let(exp: Value) -> bool {
    tagged(exp, "let")
}

/// Any other pair is an application.
pub fn is_application(exp: Value) -> bool {
    is_pair(exp)
}

// =============================================================================
// Accessors
// =============================================================================

pub fn text_of_quotation(exp: Value) -> Result<Value> {
    cadr(exp)
}

pub fn assignment_variable(exp: Value) -> Result<Value> {
    cadr(exp)
}

pub fn assignment_value(exp: Value) -> Result<Value> {
    caddr(exp)
}

pub fn lambda_parameters(exp: Value) -> Result<Value> {
    cadr(exp)
}

pub fn lambda_body(exp: Value) -> Result<Value> {
    cddr(exp)
}

pub fn make_lambda(parameters: Value, body: Value) -> Value {
    cons(symbol("lambda"), cons(parameters, body))
}

/// `(define v e)` names `v`; `(define (v . ps) body ...)` names `v`.
pub fn definition_variable(exp: Value) -> Result<Value> {
    if is_symbol(cadr(exp)?) {
        cadr(exp)
    } else {
        caadr(exp)
    }
}

/// The procedure shorthand desugars to a `lambda` over the same body.
pub fn definition_value(exp: Value) -> Result<Value> {
    if is_symbol(cadr(exp)?) {
        caddr(exp)
    } else {
        Ok(make_lambda(cdadr(exp)?, cddr(exp)?))
    }
}

pub fn if_predicate(exp: Value) -> Result<Value> {
    cadr(exp)
}

pub fn if_consequent(exp: Value) -> Result<Value> {
    caddr(exp)
}

/// A missing alternative defaults to #f.
pub fn if_alternative(exp: Value) -> Result<Value> {
    if !is_null(cdddr(exp)?) {
        cadddr(exp)
    } else {
        Ok(mk_bool(false))
    }
}

pub fn begin_actions(exp: Value) -> Result<Value> {
    cdr(exp)
}

pub fn is_last_exp(seq: Value) -> Result<bool> {
    Ok(is_null(cdr(seq)?))
}

pub fn first_exp(seq: Value) -> Result<Value> {
    car(seq)
}

pub fn rest_exps(seq: Value) -> Result<Value> {
    cdr(seq)
}

pub fn operator(exp: Value) -> Result<Value> {
    car(exp)
}

pub fn operands(exp: Value) -> Result<Value> {
    cdr(exp)
}

pub fn has_no_operands(ops: Value) -> bool {
    is_null(ops)
}

pub fn is_last_operand(ops: Value) -> Result<bool> {
    Ok(is_null(cdr(ops)?))
}

pub fn first_operand(ops: Value) -> Result<Value> {
    car(ops)
}

pub fn rest_operands(ops: Value) -> Result<Value> {
    cdr(ops)
}

// =============================================================================
// Constructors and argument-list assembly
// =============================================================================

pub fn make_if(predicate: Value, consequent: Value, alternative: Value) -> Value {
    list_from_slice(&[symbol("if"), predicate, consequent, alternative])
}

pub fn make_begin(seq: Value) -> Value {
    cons(symbol("begin"), seq)
}

/// A body of one form is that form; longer bodies wrap in `begin`.
pub fn sequence_to_exp(seq: Value) -> Result<Value> {
    if is_null(seq) {
        Ok(seq)
    } else if is_last_exp(seq)? {
        first_exp(seq)
    } else {
        Ok(make_begin(seq))
    }
}

pub fn empty_arglist() -> Value {
    nil()
}

pub fn adjoin_arg(arg: Value, arglist: Value) -> Result<Value> {
    append(arglist, list_from_slice(&[arg]))
}

/// Splice an evaluated `unquote-splicing` result into the accumulated
/// list; the result must itself be a list.
pub fn splice_arg(arg: Value, arglist: Value) -> Result<Value> {
    if is_null(arg) {
        return Ok(arglist);
    }
    check_type(is_pair, arg, "unquote-splicing: expected list")?;
    append(arglist, arg)
}

// =============================================================================
// cond
// =============================================================================

fn cond_clauses(exp: Value) -> Result<Value> {
    cdr(exp)
}

fn cond_predicate(clause: Value) -> Result<Value> {
    car(clause)
}

fn cond_actions(clause: Value) -> Result<Value> {
    cdr(clause)
}

fn is_cond_else_clause(clause: Value) -> Result<bool> {
    Ok(cond_predicate(clause)? == symbol("else"))
}

fn expand_clauses(clauses: Value) -> Result<Value> {
    if is_null(clauses) {
        // No clause matched; the whole form is #f.
        return Ok(mk_bool(false));
    }

    let first = car(clauses)?;
    let rest = cdr(clauses)?;

    if is_cond_else_clause(first)? {
        if !is_null(rest) {
            warn!(
                clauses = %printable(clauses),
                "cond else clause isn't last, ignoring tail"
            );
        }
        return sequence_to_exp(cond_actions(first)?);
    }

    Ok(make_if(
        cond_predicate(first)?,
        sequence_to_exp(cond_actions(first)?)?,
        expand_clauses(rest)?,
    ))
}

pub fn cond_to_if(exp: Value) -> Result<Value> {
    expand_clauses(cond_clauses(exp)?)
}

// =============================================================================
// let
// =============================================================================

fn let_binding_parts(bindings: Value) -> Result<(Vec<Value>, Vec<Value>)> {
    let mut vars = Vec::new();
    let mut inits = Vec::new();
    for binding in list_to_vec(bindings)? {
        if !is_pair(binding) {
            return Err(Error::type_error("let: malformed binding", binding));
        }
        vars.push(car(binding)?);
        inits.push(cadr(binding)?);
    }
    Ok((vars, inits))
}

/// Plain `let` becomes an immediate lambda application. Named `let`
/// becomes a thunk whose body defines the loop procedure and calls it
/// with the initial values, so the recursive call sits in tail
/// position.
pub fn let_to_combination(exp: Value) -> Result<Value> {
    if is_symbol(cadr(exp)?) {
        let name = cadr(exp)?;
        let (vars, inits) = let_binding_parts(caddr(exp)?)?;
        let body = cdddr(exp)?;

        let define_form = cons(
            symbol("define"),
            cons(cons(name, list_from_slice(&vars)), body),
        );
        let call_form = cons(name, list_from_slice(&inits));
        let thunk = make_lambda(nil(), list_from_slice(&[define_form, call_form]));
        Ok(list_from_slice(&[thunk]))
    } else {
        let (vars, inits) = let_binding_parts(cadr(exp)?)?;
        let body = cddr(exp)?;
        Ok(cons(
            make_lambda(list_from_slice(&vars), body),
            list_from_slice(&inits),
        ))
    }
}
