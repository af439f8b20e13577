//! Numbers
//!
//! Two representations: int32 and double, both immediates. Binary
//! operations are contagious: int op int stays integral unless it
//! overflows 32 bits, in which case the result is promoted to a double;
//! any double operand makes the result a double.

use sable_core::Value;

use crate::error::{Error, Result};
use crate::printer::printable;

pub fn mk_int(i: i32) -> Value {
    Value::from_int(i)
}

pub fn mk_double(d: f64) -> Value {
    Value::from_double(d)
}

pub fn is_int(v: Value) -> bool {
    v.is_int()
}

pub fn is_double(v: Value) -> bool {
    v.is_double()
}

pub fn is_number(v: Value) -> bool {
    v.is_int() || v.is_double()
}

pub fn to_int(v: Value) -> Result<i32> {
    if v.is_int() {
        Ok(v.as_int())
    } else {
        Err(Error::type_error("expected integer", v))
    }
}

pub fn to_double(v: Value) -> Result<f64> {
    if v.is_double() {
        Ok(v.as_double())
    } else {
        Err(Error::type_error("expected real", v))
    }
}

/// Widen either number to f64; type error otherwise.
pub fn number_as_f64(v: Value) -> Result<f64> {
    if v.is_int() {
        Ok(f64::from(v.as_int()))
    } else if v.is_double() {
        Ok(v.as_double())
    } else {
        Err(Error::type_error("expected number", v))
    }
}

/// An i64 result as a value: int32 when it fits, double when it spills.
pub fn mk_int_or_promote(i: i64) -> Value {
    match i32::try_from(i) {
        Ok(small) => Value::from_int(small),
        Err(_) => Value::from_double(i as f64),
    }
}

fn cannot_compute(op: &str, a: Value, b: Value) -> Error {
    Error::type_error(
        format!("cannot compute ({} {} {})", op, printable(a), printable(b)),
        crate::types::pair::list_from_slice(&[a, b]),
    )
}

macro_rules! define_binary_arith {
    ($($name:ident, $op:tt, $sym:literal);+ $(;)?) => {
        $(
            pub fn $name(a: Value, b: Value) -> Result<Value> {
                if a.is_int() && b.is_int() {
                    Ok(mk_int_or_promote(i64::from(a.as_int()) $op i64::from(b.as_int())))
                } else if is_number(a) && is_number(b) {
                    Ok(mk_double(number_as_f64(a)? $op number_as_f64(b)?))
                } else {
                    Err(cannot_compute($sym, a, b))
                }
            }
        )+
    };
}

define_binary_arith! {
    num_add2, +, "+";
    num_sub2, -, "-";
    num_mul2, *, "*";
}

/// Division: integral when both operands are integral and divide
/// evenly, double otherwise.
pub fn num_div2(a: Value, b: Value) -> Result<Value> {
    if !is_number(a) || !is_number(b) {
        return Err(cannot_compute("/", a, b));
    }
    if a.is_int() && b.is_int() {
        let (x, y) = (a.as_int(), b.as_int());
        if y == 0 {
            return Err(Error::runtime_error("/: division by zero"));
        }
        if x % y == 0 {
            return Ok(mk_int(x / y));
        }
        return Ok(mk_double(f64::from(x) / f64::from(y)));
    }
    Ok(mk_double(number_as_f64(a)? / number_as_f64(b)?))
}

macro_rules! define_binary_compare {
    ($($name:ident, $op:tt, $sym:literal);+ $(;)?) => {
        $(
            pub fn $name(a: Value, b: Value) -> Result<bool> {
                if a.is_int() && b.is_int() {
                    Ok(a.as_int() $op b.as_int())
                } else if is_number(a) && is_number(b) {
                    Ok(number_as_f64(a)? $op number_as_f64(b)?)
                } else {
                    Err(cannot_compute($sym, a, b))
                }
            }
        )+
    };
}

define_binary_compare! {
    num_eq2, ==, "=";
    num_lt2, <, "<";
    num_gt2, >, ">";
    num_lte2, <=, "<=";
    num_gte2, >=, ">=";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_arithmetic_stays_integral() {
        assert_eq!(num_add2(mk_int(1), mk_int(2)).unwrap(), mk_int(3));
        assert_eq!(num_mul2(mk_int(6), mk_int(7)).unwrap(), mk_int(42));
    }

    #[test]
    fn test_overflow_promotes_to_double() {
        let v = num_add2(mk_int(i32::MAX), mk_int(1)).unwrap();
        assert!(v.is_double());
        assert_eq!(v.as_double(), f64::from(i32::MAX) + 1.0);
    }

    #[test]
    fn test_mixed_arithmetic_is_contagious() {
        let v = num_add2(mk_int(1), mk_double(0.5)).unwrap();
        assert!(v.is_double());
        assert_eq!(v.as_double(), 1.5);
    }

    #[test]
    fn test_division() {
        assert_eq!(num_div2(mk_int(6), mk_int(3)).unwrap(), mk_int(2));
        let v = num_div2(mk_int(1), mk_int(2)).unwrap();
        assert_eq!(v.as_double(), 0.5);
        assert!(num_div2(mk_int(1), mk_int(0)).is_err());
    }

    #[test]
    fn test_comparisons_coerce() {
        assert!(num_eq2(mk_int(2), mk_double(2.0)).unwrap());
        assert!(num_lt2(mk_int(1), mk_double(1.5)).unwrap());
        assert!(num_add2(mk_int(1), crate::types::pair::nil()).is_err());
    }
}
