//! Equivalence predicates
//!
//! `eq?` is bit identity on the word. `eqv?` adds same-type character
//! code equality. `equal?` is the structural comparison over pairs,
//! strings, and vectors.

use sable_core::{Value, object_metatype};

use crate::types::character::{char_get, is_char};
use crate::types::pair::{car, cdr, is_pair};
use crate::types::string::{is_string, string_get};
use crate::types::vector::{is_vector, vector_get};

pub fn eq(a: Value, b: Value) -> bool {
    a == b
}

pub fn eqv(a: Value, b: Value) -> bool {
    if eq(a, b) {
        return true;
    }
    if !std::ptr::eq(object_metatype(a), object_metatype(b)) {
        return false;
    }
    if is_char(a) {
        return char_get(a).ok() == char_get(b).ok();
    }
    false
}

pub fn equal(a: Value, b: Value) -> bool {
    if eqv(a, b) {
        return true;
    }
    if !std::ptr::eq(object_metatype(a), object_metatype(b)) {
        return false;
    }

    if is_pair(a) && is_pair(b) {
        let (Ok(car_a), Ok(car_b)) = (car(a), car(b)) else {
            return false;
        };
        if !equal(car_a, car_b) {
            return false;
        }
        let (Ok(cdr_a), Ok(cdr_b)) = (cdr(a), cdr(b)) else {
            return false;
        };
        return equal(cdr_a, cdr_b);
    }

    if is_string(a) && is_string(b) {
        return string_get(a).ok() == string_get(b).ok();
    }

    if is_vector(a) && is_vector(b) {
        let (Ok(va), Ok(vb)) = (vector_get(a), vector_get(b)) else {
            return false;
        };
        return va.len() == vb.len() && va.iter().zip(vb.iter()).all(|(&x, &y)| equal(x, y));
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::character::mk_char;
    use crate::types::number::mk_int;
    use crate::types::pair::list_from_slice;
    use crate::types::string::mk_string;
    use crate::types::symbol::symbol;
    use crate::types::vector::mk_vector;

    #[test]
    fn test_eq_on_immediates_and_symbols() {
        assert!(eq(mk_int(3), mk_int(3)));
        assert!(eq(symbol("a"), symbol("a")));
        assert!(!eq(symbol("a"), symbol("b")));
    }

    #[test]
    fn test_eqv_compares_char_codes() {
        assert!(eqv(mk_char(97), mk_char(97)));
        assert!(!eqv(mk_char(97), mk_char(98)));
        assert!(!eqv(mk_char(97), mk_int(97)));
    }

    #[test]
    fn test_equal_is_structural() {
        let a = list_from_slice(&[mk_int(1), mk_int(2)]);
        let b = list_from_slice(&[mk_int(1), mk_int(2)]);
        assert!(!eq(a, b));
        assert!(equal(a, b));

        assert!(equal(mk_string("abc"), mk_string("abc")));
        assert!(!equal(mk_string("abc"), mk_string("abd")));

        let va = mk_vector(vec![mk_string("x"), a]);
        let vb = mk_vector(vec![mk_string("x"), b]);
        assert!(equal(va, vb));
        assert!(!equal(va, mk_vector(vec![mk_string("x")])));
    }
}
