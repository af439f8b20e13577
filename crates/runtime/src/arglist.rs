//! Argument-list plumbing for primitives
//!
//! A primitive receives the whole evaluated argument list as one value.
//! These helpers destructure it with uniform call-error messages, so
//! every primitive validates the same way.

use sable_core::Value;

use crate::error::{Error, Result, check_type};
use crate::globals::globals;
use crate::types::pair::{car, cdr, is_null, is_pair, list_to_vec};

/// Exactly `N` arguments.
pub fn args_exact<const N: usize>(who: &str, argl: Value) -> Result<[Value; N]> {
    let mut out = [globals().nil(); N];
    let mut cur = argl;

    for slot in out.iter_mut() {
        if !is_pair(cur) {
            return Err(Error::call_error(
                format!("{who}: expected {N} argument(s)"),
                argl,
            ));
        }
        *slot = car(cur)?;
        cur = cdr(cur)?;
    }

    if !is_null(cur) {
        return Err(Error::call_error(
            format!("{who}: unexpected extra arguments"),
            argl,
        ));
    }

    Ok(out)
}

/// Between `min` and `max` arguments, as a vector.
pub fn args_range(who: &str, argl: Value, min: usize, max: usize) -> Result<Vec<Value>> {
    let args = list_to_vec(argl)?;
    if args.len() < min || args.len() > max {
        return Err(Error::call_error(
            format!("{who}: expected between {min} and {max} arguments"),
            argl,
        ));
    }
    Ok(args)
}

/// Any number of arguments, as a vector.
pub fn args_all(who: &str, argl: Value) -> Result<Vec<Value>> {
    check_type(
        |v| is_null(v) || is_pair(v),
        argl,
        &format!("{who}: malformed argument list"),
    )?;
    list_to_vec(argl)
}

/// At least `min` arguments, as a vector.
pub fn args_at_least(who: &str, argl: Value, min: usize) -> Result<Vec<Value>> {
    let args = list_to_vec(argl)?;
    if args.len() < min {
        return Err(Error::call_error(
            format!("{who}: expected at least {min} argument(s)"),
            argl,
        ));
    }
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::number::mk_int;
    use crate::types::pair::{list_from_slice, nil};

    #[test]
    fn test_args_exact() {
        let argl = list_from_slice(&[mk_int(1), mk_int(2)]);
        let [a, b] = args_exact::<2>("test", argl).unwrap();
        assert_eq!(a, mk_int(1));
        assert_eq!(b, mk_int(2));

        assert!(args_exact::<1>("test", argl).is_err());
        assert!(args_exact::<3>("test", argl).is_err());
        let [] = args_exact::<0>("test", nil()).unwrap();
    }

    #[test]
    fn test_args_range() {
        let argl = list_from_slice(&[mk_int(1)]);
        assert_eq!(args_range("test", argl, 0, 2).unwrap().len(), 1);
        assert!(args_range("test", argl, 2, 3).is_err());
    }
}
