//! Numeric primitives
//!
//! Variadic arithmetic folds pairwise with int/double contagion;
//! comparison chains hold across every adjacent pair.

use sable_core::Value;

use crate::arglist::{args_at_least, args_exact, args_range};
use crate::error::{Error, Result};
use crate::printer::printable;
use crate::types::boolean::mk_bool;
use crate::types::number::{
    is_double, is_int, is_number, mk_double, mk_int, mk_int_or_promote, num_add2, num_div2,
    num_eq2, num_gt2, num_gte2, num_lt2, num_lte2, num_mul2, num_sub2, to_int,
};
use crate::types::string::{mk_string, string_get};

/// Integral view of a number, truncating doubles.
fn int_of(v: Value) -> Result<i64> {
    if v.is_int() {
        return Ok(i64::from(v.as_int()));
    }
    if v.is_double() {
        return Ok(v.as_double() as i64);
    }
    Err(Error::type_error("expected number", v))
}

pub fn prim_is_number(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("number?", argl)?;
    Ok(mk_bool(is_number(v)))
}

pub fn prim_is_integer(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("integer?", argl)?;
    Ok(mk_bool(is_int(v)))
}

pub fn prim_is_real(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("real?", argl)?;
    Ok(mk_bool(is_double(v)))
}

macro_rules! define_fold {
    ($name:ident, $who:literal, $init:expr, $op:path) => {
        pub fn $name(argl: Value) -> Result<Value> {
            let args = crate::arglist::args_all($who, argl)?;
            let mut acc = $init;
            for &arg in &args {
                acc = $op(acc, arg)?;
            }
            Ok(acc)
        }
    };
}

define_fold!(prim_add, "+", mk_int(0), num_add2);
define_fold!(prim_mul, "*", mk_int(1), num_mul2);

pub fn prim_sub(argl: Value) -> Result<Value> {
    let args = args_at_least("-", argl, 1)?;
    if args.len() == 1 {
        return num_sub2(mk_int(0), args[0]);
    }
    let mut acc = args[0];
    for &arg in &args[1..] {
        acc = num_sub2(acc, arg)?;
    }
    Ok(acc)
}

pub fn prim_div(argl: Value) -> Result<Value> {
    let args = args_at_least("/", argl, 1)?;
    if args.len() == 1 {
        return num_div2(mk_int(1), args[0]);
    }
    let mut acc = args[0];
    for &arg in &args[1..] {
        acc = num_div2(acc, arg)?;
    }
    Ok(acc)
}

macro_rules! define_chain {
    ($name:ident, $who:literal, $op:path) => {
        pub fn $name(argl: Value) -> Result<Value> {
            let args = args_at_least($who, argl, 2)?;
            for pair in args.windows(2) {
                if !$op(pair[0], pair[1])? {
                    return Ok(mk_bool(false));
                }
            }
            Ok(mk_bool(true))
        }
    };
}

define_chain!(prim_num_eq, "=", num_eq2);
define_chain!(prim_num_lt, "<", num_lt2);
define_chain!(prim_num_gt, ">", num_gt2);
define_chain!(prim_num_lte, "<=", num_lte2);
define_chain!(prim_num_gte, ">=", num_gte2);

pub fn prim_is_zero(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("zero?", argl)?;
    Ok(mk_bool(num_eq2(v, mk_int(0))?))
}

pub fn prim_is_positive(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("positive?", argl)?;
    Ok(mk_bool(num_gt2(v, mk_int(0))?))
}

pub fn prim_is_negative(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("negative?", argl)?;
    Ok(mk_bool(num_lt2(v, mk_int(0))?))
}

pub fn prim_is_odd(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("odd?", argl)?;
    Ok(mk_bool(int_of(v)? % 2 != 0))
}

pub fn prim_is_even(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("even?", argl)?;
    Ok(mk_bool(int_of(v)? % 2 == 0))
}

pub fn prim_max(argl: Value) -> Result<Value> {
    let args = args_at_least("max", argl, 1)?;
    let mut best = args[0];
    for &arg in &args[1..] {
        if num_gt2(arg, best)? {
            best = arg;
        }
    }
    Ok(best)
}

pub fn prim_min(argl: Value) -> Result<Value> {
    let args = args_at_least("min", argl, 1)?;
    let mut best = args[0];
    for &arg in &args[1..] {
        if num_lt2(arg, best)? {
            best = arg;
        }
    }
    Ok(best)
}

pub fn prim_abs(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("abs", argl)?;
    if v.is_int() {
        return Ok(mk_int_or_promote(i64::from(v.as_int()).abs()));
    }
    if v.is_double() {
        return Ok(mk_double(v.as_double().abs()));
    }
    Err(Error::type_error("abs: expected number", v))
}

fn int_pair(who: &str, argl: Value) -> Result<(i32, i32)> {
    let [a, b] = args_exact::<2>(who, argl)?;
    let (a, b) = (to_int(a)?, to_int(b)?);
    if b == 0 {
        return Err(Error::runtime_error(format!("{who}: division by zero")));
    }
    Ok((a, b))
}

pub fn prim_quotient(argl: Value) -> Result<Value> {
    let (a, b) = int_pair("quotient", argl)?;
    Ok(mk_int_or_promote(i64::from(a) / i64::from(b)))
}

pub fn prim_remainder(argl: Value) -> Result<Value> {
    let (a, b) = int_pair("remainder", argl)?;
    Ok(mk_int(a % b))
}

pub fn prim_modulo(argl: Value) -> Result<Value> {
    let (a, b) = int_pair("modulo", argl)?;
    // Result takes the divisor's sign.
    let m = a % b;
    if m != 0 && (m < 0) != (b < 0) {
        Ok(mk_int(m + b))
    } else {
        Ok(mk_int(m))
    }
}

pub fn prim_number_to_string(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("number->string", argl)?;
    if !is_number(v) {
        return Err(Error::type_error("number->string: expected number", v));
    }
    Ok(mk_string(printable(v)))
}

pub fn prim_string_to_number(argl: Value) -> Result<Value> {
    let args = args_range("string->number", argl, 1, 2)?;
    let text = string_get(args[0])?;
    if let Ok(i) = text.parse::<i32>() {
        return Ok(mk_int(i));
    }
    if let Ok(d) = text.parse::<f64>() {
        return Ok(mk_double(d));
    }
    Ok(mk_bool(false))
}
