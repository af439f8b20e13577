//! Explicit-Control Evaluator
//!
//! A labelled state machine over the eight-register thread. Scheme
//! recursion never touches the host call stack: deeper nesting grows
//! the thread's value stack, which is part of the GC rootset, so a
//! collection is safe at every step boundary and tail calls run in
//! constant stack.
//!
//! Control transfers are a label returned from each step. The `continu`
//! register holds the label to jump to when the current sub-evaluation
//! finishes, encoded as an int32 value so the collector skips it.
//!
//! The save/restore discipline is load-bearing: before any
//! sub-evaluation that may clobber a register this machine still needs,
//! that register is saved, and it is restored on the matching return
//! path. A tail call saves nothing, which is the whole tail-call
//! guarantee.

use sable_core::{Register, ScopeGuard, Thread, Value};

use crate::error::{Error, Result, check_type};
use crate::globals::globals;
use crate::syntax;
use crate::types::boolean::is_false;
use crate::types::environment::{
    environment_define, environment_get, environment_set, mk_environment,
};
use crate::types::pair::{car, cdr, cons, is_null, is_pair};
use crate::types::procedure::{
    apply_primitive_procedure, is_compound_procedure, is_primitive_procedure, mk_procedure,
    procedure_body, procedure_environment, procedure_parameters,
};
use crate::types::symbol::{is_symbol, symbol};

// =============================================================================
// Labels
// =============================================================================

/// The fixed, closed set of machine states. Discriminants are stable so
/// a label can round-trip through an int32 register value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
enum Label {
    EvalFinished = 0,
    EvalDispatch,
    EvCond,
    EvLet,
    EvSelfEval,
    EvVariable,
    EvQuoted,
    EvQuasiquoted,
    EvQqOperandLoop,
    EvQqDone,
    EvQqArgSplice,
    EvQqArgAppend,
    EvQqArgUnquoteSplicing,
    EvQqArgUnquote,
    EvQqArgDispatch,
    EvLambda,
    EvApplication,
    EvApplDidOperator,
    EvApplOperandLoop,
    EvApplAccumulateArg,
    EvApplLastArg,
    EvApplAccumLastArg,
    ApplyDispatch,
    PrimitiveApply,
    CompoundApply,
    EvBegin,
    EvSequence,
    EvSequenceContinue,
    EvSequenceLastExp,
    EvIf,
    EvIfDecide,
    EvIfAlternative,
    EvIfConsequent,
    EvAssignment,
    EvAssignment1,
    EvDefinition,
    EvDefinition1,
}

impl Label {
    fn encode(self) -> Value {
        Value::from_int(self as i32)
    }

    fn decode(v: Value) -> Label {
        use Label::*;
        const LABELS: [Label; 37] = [
            EvalFinished,
            EvalDispatch,
            EvCond,
            EvLet,
            EvSelfEval,
            EvVariable,
            EvQuoted,
            EvQuasiquoted,
            EvQqOperandLoop,
            EvQqDone,
            EvQqArgSplice,
            EvQqArgAppend,
            EvQqArgUnquoteSplicing,
            EvQqArgUnquote,
            EvQqArgDispatch,
            EvLambda,
            EvApplication,
            EvApplDidOperator,
            EvApplOperandLoop,
            EvApplAccumulateArg,
            EvApplLastArg,
            EvApplAccumLastArg,
            ApplyDispatch,
            PrimitiveApply,
            CompoundApply,
            EvBegin,
            EvSequence,
            EvSequenceContinue,
            EvSequenceLastExp,
            EvIf,
            EvIfDecide,
            EvIfAlternative,
            EvIfConsequent,
            EvAssignment,
            EvAssignment1,
            EvDefinition,
            EvDefinition1,
        ];
        debug_assert!(v.is_int(), "continuation register holds a non-label");
        LABELS[v.as_int() as usize]
    }
}

// =============================================================================
// Parameter binding
// =============================================================================

/// Bind parameters to the evaluated arguments in a frame extending
/// `base_env`. Parameters may be a proper list (fixed arity), a single
/// symbol (variadic), or a dotted list (fixed prefix plus rest). A
/// count mismatch on the fixed part is a call error.
pub fn extend_environment(params: Value, args: Value, base_env: Value) -> Result<Value> {
    let env = mk_environment(base_env)?;

    let mut vars = params;
    let mut vals = args;

    loop {
        if is_symbol(vars) {
            environment_define(env, vars, vals)?;
            return Ok(env);
        }
        if is_null(vars) {
            if !is_null(vals) {
                return Err(Error::call_error("too many arguments", args));
            }
            return Ok(env);
        }
        if !is_pair(vars) {
            return Err(Error::type_error("malformed parameter list", params));
        }
        if is_null(vals) {
            return Err(Error::call_error("too few arguments", args));
        }

        let var = car(vars)?;
        check_type(is_symbol, var, "parameter names must be symbols")?;
        environment_define(env, var, car(vals)?)?;

        vars = cdr(vars)?;
        vals = cdr(vals)?;
    }
}

/// Apply a procedure to an already-evaluated argument list, outside the
/// machine. This is the host-level entry the `apply` primitive uses;
/// compound application spins up a fresh machine over the body.
pub fn apply_procedure(proc: Value, argl: Value) -> Result<Value> {
    if is_primitive_procedure(proc) {
        return apply_primitive_procedure(proc, argl);
    }
    if is_compound_procedure(proc) {
        let env = extend_environment(procedure_parameters(proc)?, argl, procedure_environment(proc)?)?;
        return interpret(syntax::make_begin(procedure_body(proc)?), env);
    }
    Err(Error::call_error("unknown procedure type", proc))
}

// =============================================================================
// The machine
// =============================================================================

/// Evaluate `exp` in `env`, driving the register machine until it
/// reaches the finish label. The thread is registered as a root scope
/// for the whole run, so an explicit collection triggered by a
/// primitive sees everything in flight.
pub fn interpret(exp: Value, env: Value) -> Result<Value> {
    use Label::*;
    use Register::*;

    let mut t = ScopeGuard::new(Thread::new());
    t.assign(Exp, exp);
    t.assign(Env, env);
    t.assign(Continu, EvalFinished.encode());

    let mut label = EvalDispatch;

    loop {
        label = match label {
            EvalFinished => return Ok(t.get(Val)),

            EvalDispatch => {
                let exp = t.get(Exp);
                if syntax::is_self_evaluating(exp) {
                    EvSelfEval
                } else if syntax::is_variable(exp) {
                    EvVariable
                } else if syntax::is_quoted(exp) {
                    EvQuoted
                } else if syntax::is_quasiquoted(exp) {
                    EvQuasiquoted
                } else if syntax::is_assignment(exp) {
                    EvAssignment
                } else if syntax::is_definition(exp) {
                    EvDefinition
                } else if syntax::is_if(exp) {
                    EvIf
                } else if syntax::is_lambda(exp) {
                    EvLambda
                } else if syntax::is_begin(exp) {
                    EvBegin
                } else if syntax::is_cond(exp) {
                    EvCond
                } else if syntax::is_let(exp) {
                    EvLet
                } else if syntax::is_application(exp) {
                    EvApplication
                } else {
                    return Err(Error::runtime_error(format!(
                        "unknown expression type, irritants: {}",
                        crate::printer::printable(exp)
                    )));
                }
            }

            EvCond => {
                let new_exp = syntax::cond_to_if(t.get(Exp))?;
                t.assign(Exp, new_exp);
                EvalDispatch
            }

            EvLet => {
                let new_exp = syntax::let_to_combination(t.get(Exp))?;
                t.assign(Exp, new_exp);
                EvalDispatch
            }

            EvSelfEval => {
                let exp = t.get(Exp);
                t.assign(Val, exp);
                Label::decode(t.get(Continu))
            }

            EvVariable => {
                let val = environment_get(t.get(Env), t.get(Exp))?;
                t.assign(Val, val);
                Label::decode(t.get(Continu))
            }

            EvQuoted => {
                let val = syntax::text_of_quotation(t.get(Exp))?;
                t.assign(Val, val);
                Label::decode(t.get(Continu))
            }

            // Quasiquote walks the template, accumulating into argl.
            // Unquoted elements take a detour through eval_dispatch
            // with the rootset saved around them.
            EvQuasiquoted => {
                let text = syntax::text_of_quotation(t.get(Exp))?;
                if !is_pair(text) {
                    // A non-list template behaves as quote.
                    t.assign(Val, text);
                    Label::decode(t.get(Continu))
                } else {
                    t.assign(Unev, text);
                    t.assign(Argl, syntax::empty_arglist());
                    EvQqOperandLoop
                }
            }

            EvQqOperandLoop => {
                let unev = t.get(Unev);
                if syntax::has_no_operands(unev) {
                    EvQqDone
                } else if !is_pair(unev) {
                    return Err(Error::type_error("quasiquote: dotted template", unev));
                } else {
                    let exp = syntax::first_operand(unev)?;
                    t.assign(Exp, exp);
                    if syntax::is_unquoted(exp) {
                        EvQqArgUnquote
                    } else if syntax::is_unquoted_splicing(exp) {
                        EvQqArgUnquoteSplicing
                    } else {
                        let argl = syntax::adjoin_arg(exp, t.get(Argl))?;
                        t.assign(Argl, argl);
                        let unev = syntax::rest_operands(unev)?;
                        t.assign(Unev, unev);
                        EvQqOperandLoop
                    }
                }
            }

            EvQqDone => {
                let argl = t.get(Argl);
                t.assign(Val, argl);
                Label::decode(t.get(Continu))
            }

            EvQqArgUnquote => {
                t.save(Continu);
                t.assign(Continu, EvQqArgAppend.encode());
                EvQqArgDispatch
            }

            EvQqArgUnquoteSplicing => {
                t.save(Continu);
                t.assign(Continu, EvQqArgSplice.encode());
                EvQqArgDispatch
            }

            EvQqArgDispatch => {
                t.save(Unev);
                t.save(Env);
                t.save(Argl);
                let exp = crate::types::pair::cadr(t.get(Exp))?;
                t.assign(Exp, exp);
                EvalDispatch
            }

            EvQqArgAppend => {
                t.restore(Argl);
                t.restore(Env);
                t.restore(Unev);
                t.restore(Continu);
                let argl = syntax::adjoin_arg(t.get(Val), t.get(Argl))?;
                t.assign(Argl, argl);
                let unev = syntax::rest_operands(t.get(Unev))?;
                t.assign(Unev, unev);
                EvQqOperandLoop
            }

            EvQqArgSplice => {
                t.restore(Argl);
                t.restore(Env);
                t.restore(Unev);
                t.restore(Continu);
                let argl = syntax::splice_arg(t.get(Val), t.get(Argl))?;
                t.assign(Argl, argl);
                let unev = syntax::rest_operands(t.get(Unev))?;
                t.assign(Unev, unev);
                EvQqOperandLoop
            }

            EvLambda => {
                let unev = syntax::lambda_parameters(t.get(Exp))?;
                t.assign(Unev, unev);
                let exp = syntax::lambda_body(t.get(Exp))?;
                t.assign(Exp, exp);
                let val = mk_procedure(t.get(Unev), t.get(Exp), t.get(Env));
                t.assign(Val, val);
                Label::decode(t.get(Continu))
            }

            EvApplication => {
                t.save(Continu);
                t.save(Env);
                let unev = syntax::operands(t.get(Exp))?;
                t.assign(Unev, unev);
                t.save(Unev);
                let exp = syntax::operator(t.get(Exp))?;
                t.assign(Exp, exp);
                t.assign(Continu, EvApplDidOperator.encode());
                EvalDispatch
            }

            EvApplDidOperator => {
                t.restore(Unev);
                t.restore(Env);
                let val = t.get(Val);
                t.assign(Proc, val);
                t.assign(Argl, syntax::empty_arglist());
                if syntax::has_no_operands(t.get(Unev)) {
                    ApplyDispatch
                } else {
                    t.save(Proc);
                    EvApplOperandLoop
                }
            }

            EvApplOperandLoop => {
                t.save(Argl);
                let exp = syntax::first_operand(t.get(Unev))?;
                t.assign(Exp, exp);
                if syntax::is_last_operand(t.get(Unev))? {
                    EvApplLastArg
                } else {
                    t.save(Env);
                    t.save(Unev);
                    t.assign(Continu, EvApplAccumulateArg.encode());
                    EvalDispatch
                }
            }

            EvApplAccumulateArg => {
                t.restore(Unev);
                t.restore(Env);
                t.restore(Argl);
                let argl = syntax::adjoin_arg(t.get(Val), t.get(Argl))?;
                t.assign(Argl, argl);
                let unev = syntax::rest_operands(t.get(Unev))?;
                t.assign(Unev, unev);
                EvApplOperandLoop
            }

            EvApplLastArg => {
                t.assign(Continu, EvApplAccumLastArg.encode());
                EvalDispatch
            }

            EvApplAccumLastArg => {
                t.restore(Argl);
                let argl = syntax::adjoin_arg(t.get(Val), t.get(Argl))?;
                t.assign(Argl, argl);
                t.restore(Proc);
                ApplyDispatch
            }

            ApplyDispatch => {
                let proc = t.get(Proc);
                if is_primitive_procedure(proc) {
                    PrimitiveApply
                } else if is_compound_procedure(proc) {
                    CompoundApply
                } else {
                    t.restore(Continu);
                    return Err(Error::call_error("unknown procedure type", proc));
                }
            }

            PrimitiveApply => {
                let val = apply_primitive_procedure(t.get(Proc), t.get(Argl))?;
                t.assign(Val, val);
                t.restore(Continu);
                Label::decode(t.get(Continu))
            }

            // Tail position: compound application inherits the caller's
            // continu without saving it, so tail recursion stays flat.
            CompoundApply => {
                let proc = t.get(Proc);
                t.assign(Unev, procedure_parameters(proc)?);
                t.assign(Env, procedure_environment(proc)?);
                let env = extend_environment(t.get(Unev), t.get(Argl), t.get(Env))?;
                t.assign(Env, env);
                t.assign(Unev, procedure_body(proc)?);
                EvSequence
            }

            EvBegin => {
                let unev = syntax::begin_actions(t.get(Exp))?;
                t.assign(Unev, unev);
                t.save(Continu);
                EvSequence
            }

            EvSequence => {
                let exp = syntax::first_exp(t.get(Unev))?;
                t.assign(Exp, exp);
                if syntax::is_last_exp(t.get(Unev))? {
                    EvSequenceLastExp
                } else {
                    t.save(Unev);
                    t.save(Env);
                    t.assign(Continu, EvSequenceContinue.encode());
                    EvalDispatch
                }
            }

            EvSequenceContinue => {
                t.restore(Env);
                t.restore(Unev);
                let unev = syntax::rest_exps(t.get(Unev))?;
                t.assign(Unev, unev);
                EvSequence
            }

            EvSequenceLastExp => {
                t.restore(Continu);
                EvalDispatch
            }

            EvIf => {
                t.save(Exp);
                t.save(Env);
                t.save(Continu);
                t.assign(Continu, EvIfDecide.encode());
                let exp = syntax::if_predicate(t.get(Exp))?;
                t.assign(Exp, exp);
                EvalDispatch
            }

            EvIfDecide => {
                t.restore(Continu);
                t.restore(Env);
                t.restore(Exp);
                if is_false(t.get(Val)) {
                    EvIfAlternative
                } else {
                    EvIfConsequent
                }
            }

            EvIfAlternative => {
                let exp = syntax::if_alternative(t.get(Exp))?;
                t.assign(Exp, exp);
                EvalDispatch
            }

            EvIfConsequent => {
                let exp = syntax::if_consequent(t.get(Exp))?;
                t.assign(Exp, exp);
                EvalDispatch
            }

            EvAssignment => {
                let unev = syntax::assignment_variable(t.get(Exp))?;
                t.assign(Unev, unev);
                t.save(Unev);
                let exp = syntax::assignment_value(t.get(Exp))?;
                t.assign(Exp, exp);
                t.save(Env);
                t.save(Continu);
                t.assign(Continu, EvAssignment1.encode());
                EvalDispatch
            }

            EvAssignment1 => {
                t.restore(Continu);
                t.restore(Env);
                t.restore(Unev);
                environment_set(t.get(Env), t.get(Unev), t.get(Val))?;
                t.assign(Val, symbol("ok"));
                Label::decode(t.get(Continu))
            }

            EvDefinition => {
                let unev = syntax::definition_variable(t.get(Exp))?;
                t.assign(Unev, unev);
                t.save(Unev);
                let exp = syntax::definition_value(t.get(Exp))?;
                t.assign(Exp, exp);
                t.save(Env);
                t.save(Continu);
                t.assign(Continu, EvDefinition1.encode());
                EvalDispatch
            }

            EvDefinition1 => {
                t.restore(Continu);
                t.restore(Env);
                t.restore(Unev);
                environment_define(t.get(Env), t.get(Unev), t.get(Val))?;
                t.assign(Val, symbol("ok"));
                Label::decode(t.get(Continu))
            }
        };
    }
}

/// Evaluate `exp` in `env`; null means the global environment.
pub fn eval(exp: Value, env: Value) -> Result<Value> {
    let env = if is_null(env) {
        globals().global_environment()
    } else {
        env
    };
    interpret(exp, env)
}

/// Quote a datum: `(quote v)`.
pub fn quoted(v: Value) -> Value {
    cons(symbol("quote"), cons(v, crate::types::pair::nil()))
}
