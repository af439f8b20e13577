//! Pair and list primitives

use sable_core::Value;

use crate::arglist::{args_exact, args_all};
use crate::error::Result;
use crate::types::boolean::mk_bool;
use crate::types::number::{mk_int, to_int};
use crate::types::pair;
use crate::types::pair::{cons, is_list, is_null, is_pair, is_tagged_list};

pub fn prim_is_pair(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("pair?", argl)?;
    Ok(mk_bool(is_pair(v)))
}

pub fn prim_cons(argl: Value) -> Result<Value> {
    let [a, b] = args_exact::<2>("cons", argl)?;
    Ok(cons(a, b))
}

pub fn prim_car(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("car", argl)?;
    pair::car(v)
}

pub fn prim_cdr(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("cdr", argl)?;
    pair::cdr(v)
}

pub fn prim_set_car(argl: Value) -> Result<Value> {
    let [p, v] = args_exact::<2>("set-car!", argl)?;
    pair::set_car(p, v)
}

pub fn prim_set_cdr(argl: Value) -> Result<Value> {
    let [p, v] = args_exact::<2>("set-cdr!", argl)?;
    pair::set_cdr(p, v)
}

macro_rules! define_cxr_prims {
    ($($prim:ident, $name:literal, $fn:path);+ $(;)?) => {
        $(
            pub fn $prim(argl: Value) -> Result<Value> {
                let [v] = args_exact::<1>($name, argl)?;
                $fn(v)
            }
        )+
    };
}

define_cxr_prims! {
    prim_caar, "caar", pair::caar;
    prim_cadr, "cadr", pair::cadr;
    prim_cdar, "cdar", pair::cdar;
    prim_cddr, "cddr", pair::cddr;
    prim_caaar, "caaar", pair::caaar;
    prim_caadr, "caadr", pair::caadr;
    prim_cadar, "cadar", pair::cadar;
    prim_caddr, "caddr", pair::caddr;
    prim_cdaar, "cdaar", pair::cdaar;
    prim_cdadr, "cdadr", pair::cdadr;
    prim_cddar, "cddar", pair::cddar;
    prim_cdddr, "cdddr", pair::cdddr;
    prim_caaaar, "caaaar", pair::caaaar;
    prim_caaadr, "caaadr", pair::caaadr;
    prim_caadar, "caadar", pair::caadar;
    prim_caaddr, "caaddr", pair::caaddr;
    prim_cadaar, "cadaar", pair::cadaar;
    prim_cadadr, "cadadr", pair::cadadr;
    prim_caddar, "caddar", pair::caddar;
    prim_cadddr, "cadddr", pair::cadddr;
    prim_cdaaar, "cdaaar", pair::cdaaar;
    prim_cdaadr, "cdaadr", pair::cdaadr;
    prim_cdadar, "cdadar", pair::cdadar;
    prim_cdaddr, "cdaddr", pair::cdaddr;
    prim_cddaar, "cddaar", pair::cddaar;
    prim_cddadr, "cddadr", pair::cddadr;
    prim_cdddar, "cdddar", pair::cdddar;
    prim_cddddr, "cddddr", pair::cddddr;
}

pub fn prim_is_null(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("null?", argl)?;
    Ok(mk_bool(is_null(v)))
}

pub fn prim_is_list(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("list?", argl)?;
    Ok(mk_bool(is_list(v)))
}

/// `list` returns its evaluated arguments as they arrived.
pub fn prim_list(argl: Value) -> Result<Value> {
    Ok(argl)
}

pub fn prim_length(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("length", argl)?;
    Ok(mk_int(pair::length(v)?))
}

/// Variadic append; the last argument becomes the shared tail.
pub fn prim_append(argl: Value) -> Result<Value> {
    let args = args_all("append", argl)?;
    let Some((&last, init)) = args.split_last() else {
        return Ok(crate::types::pair::nil());
    };
    let mut out = last;
    for &arg in init.iter().rev() {
        out = pair::append(arg, out)?;
    }
    Ok(out)
}

pub fn prim_reverse(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("reverse", argl)?;
    pair::reverse(v)
}

pub fn prim_list_tail(argl: Value) -> Result<Value> {
    let [v, k] = args_exact::<2>("list-tail", argl)?;
    pair::list_tail(v, to_int(k)?)
}

pub fn prim_assq(argl: Value) -> Result<Value> {
    let [obj, alist] = args_exact::<2>("assq", argl)?;
    pair::assq(obj, alist)
}

pub fn prim_is_tagged_list(argl: Value) -> Result<Value> {
    let [list, tag] = args_exact::<2>("tagged-list?", argl)?;
    Ok(mk_bool(is_tagged_list(list, tag)))
}
