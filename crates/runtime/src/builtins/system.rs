//! System-surface primitives: loading, files, process, time, GC

use std::time::{SystemTime, UNIX_EPOCH};

use sable_core::Value;

use crate::arglist::{args_exact, args_range};
use crate::error::{Result, check_type};
use crate::globals::{globals, interaction_environment};
use crate::script;
use crate::types::boolean::{is_bool, is_false, mk_bool};
use crate::types::environment::is_environment;
use crate::types::number::{mk_int, mk_int_or_promote, mk_double};
use crate::types::pair::{cons, nil};
use crate::types::string::{mk_string, string_get};

pub fn prim_load(argl: Value) -> Result<Value> {
    let args = args_range("load", argl, 1, 2)?;
    let filename = string_get(args[0])?;
    let env = args.get(1).copied().unwrap_or_else(interaction_environment);
    check_type(is_environment, env, "load: expected environment as second argument")?;
    script::load(&filename, env)?;
    Ok(crate::types::symbol::symbol("ok"))
}

pub fn prim_file_exists(argl: Value) -> Result<Value> {
    let [name] = args_exact::<1>("file-exists?", argl)?;
    Ok(mk_bool(std::fs::metadata(string_get(name)?).is_ok()))
}

pub fn prim_delete_file(argl: Value) -> Result<Value> {
    let [name] = args_exact::<1>("delete-file", argl)?;
    Ok(mk_bool(std::fs::remove_file(string_get(name)?).is_ok()))
}

pub fn prim_command_line(argl: Value) -> Result<Value> {
    args_exact::<0>("command-line", argl)?;
    Ok(globals().command_line())
}

fn exit_code(args: &[Value]) -> i32 {
    match args.first() {
        None => 0,
        Some(&v) if v.is_int() => v.as_int(),
        Some(&v) if is_bool(v) => {
            if is_false(v) {
                1
            } else {
                0
            }
        }
        Some(_) => 0,
    }
}

pub fn prim_exit(argl: Value) -> Result<Value> {
    let args = args_range("exit", argl, 0, 1)?;
    std::process::exit(exit_code(&args));
}

/// Exit without running any teardown.
pub fn prim_emergency_exit(argl: Value) -> Result<Value> {
    let args = args_range("emergency-exit", argl, 0, 1)?;
    unsafe { libc::_exit(exit_code(&args)) }
}

pub fn prim_get_environment_variable(argl: Value) -> Result<Value> {
    let [name] = args_exact::<1>("get-environment-variable", argl)?;
    match std::env::var(string_get(name)?) {
        Ok(val) => Ok(mk_string(val)),
        Err(_) => Ok(mk_bool(false)),
    }
}

/// An association list of (name . value) pairs.
pub fn prim_get_environment_variables(argl: Value) -> Result<Value> {
    args_exact::<0>("get-environment-variables", argl)?;
    let mut out = nil();
    for (name, val) in std::env::vars() {
        out = cons(cons(mk_string(name), mk_string(val)), out);
    }
    Ok(out)
}

fn millis_since_epoch() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

pub fn prim_current_second(argl: Value) -> Result<Value> {
    args_exact::<0>("current-second", argl)?;
    Ok(mk_double(millis_since_epoch() as f64 / 1000.0))
}

/// Milliseconds, wrapped into the int32 range.
pub fn prim_current_jiffy(argl: Value) -> Result<Value> {
    args_exact::<0>("current-jiffy", argl)?;
    Ok(mk_int((millis_since_epoch() & 0x7fff_ffff) as i32))
}

pub fn prim_jiffies_per_second(argl: Value) -> Result<Value> {
    args_exact::<0>("jiffies-per-second", argl)?;
    Ok(mk_int(1000))
}

/// One mark-and-sweep pass; evaluates to the bytes freed.
pub fn prim_garbage_collect(argl: Value) -> Result<Value> {
    args_exact::<0>("garbage-collect", argl)?;
    Ok(mk_int_or_promote(sable_core::run_gc() as i64))
}

/// Live-heap statistics as `(objects . bytes)`.
pub fn prim_gc_stats(argl: Value) -> Result<Value> {
    args_exact::<0>("gc-stats", argl)?;
    let stats = sable_core::gc_stats();
    Ok(cons(
        mk_int_or_promote(stats.objects_allocated as i64),
        mk_int_or_promote(stats.bytes_allocated as i64),
    ))
}
