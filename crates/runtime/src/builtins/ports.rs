//! Port and textual I/O primitives
//!
//! Port arguments are optional everywhere and default to the current
//! standard ports.

use sable_core::Value;

use crate::arglist::{args_exact, args_range};
use crate::error::Result;
use crate::globals::globals;
use crate::printer::{display_text, printable};
use crate::reader;
use crate::types::boolean::mk_bool;
use crate::types::eof::{is_eof_object, mk_eof_object};
use crate::types::port;
use crate::types::string::{mk_string, string_get};

fn optional_input_port(args: &[Value]) -> Value {
    args.first().copied().unwrap_or_else(|| globals().stdin_port())
}

fn optional_output_port(args: &[Value]) -> Value {
    args.first()
        .copied()
        .unwrap_or_else(|| globals().stdout_port())
}

// =============================================================================
// Predicates
// =============================================================================

macro_rules! define_port_predicate {
    ($($prim:ident, $name:literal, $fn:path);+ $(;)?) => {
        $(
            pub fn $prim(argl: Value) -> Result<Value> {
                let [v] = args_exact::<1>($name, argl)?;
                Ok(mk_bool($fn(v)))
            }
        )+
    };
}

define_port_predicate! {
    prim_is_port, "port?", port::is_port;
    prim_is_input_port, "input-port?", port::is_input_port;
    prim_is_output_port, "output-port?", port::is_output_port;
    prim_is_textual_port, "textual-port?", port::is_textual_port;
    prim_is_binary_port, "binary-port?", port::is_binary_port;
    prim_is_string_port, "string-port?", port::is_string_port;
    prim_is_file_port, "file-port?", port::is_file_port;
}

pub fn prim_is_input_port_open(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("input-port-open?", argl)?;
    Ok(mk_bool(port::is_input_port_open(v)?))
}

pub fn prim_is_output_port_open(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("output-port-open?", argl)?;
    Ok(mk_bool(port::is_output_port_open(v)?))
}

pub fn prim_is_eof_object(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("eof-object?", argl)?;
    Ok(mk_bool(is_eof_object(v)))
}

pub fn prim_eof_object(argl: Value) -> Result<Value> {
    args_exact::<0>("eof-object", argl)?;
    Ok(mk_eof_object())
}

// =============================================================================
// Constructors and closers
// =============================================================================

pub fn prim_current_input_port(argl: Value) -> Result<Value> {
    args_exact::<0>("current-input-port", argl)?;
    Ok(globals().stdin_port())
}

pub fn prim_current_output_port(argl: Value) -> Result<Value> {
    args_exact::<0>("current-output-port", argl)?;
    Ok(globals().stdout_port())
}

pub fn prim_current_error_port(argl: Value) -> Result<Value> {
    args_exact::<0>("current-error-port", argl)?;
    Ok(globals().stderr_port())
}

pub fn prim_open_input_file(argl: Value) -> Result<Value> {
    let [name] = args_exact::<1>("open-input-file", argl)?;
    port::open_input_file(&string_get(name)?)
}

pub fn prim_open_output_file(argl: Value) -> Result<Value> {
    let [name] = args_exact::<1>("open-output-file", argl)?;
    port::open_output_file(&string_get(name)?)
}

pub fn prim_close_port(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("close-port", argl)?;
    Ok(mk_bool(port::close_port(v)?))
}

pub fn prim_close_input_port(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("close-input-port", argl)?;
    crate::error::check_type(port::is_input_port, v, "close-input-port: expected input port")?;
    Ok(mk_bool(port::close_port(v)?))
}

pub fn prim_close_output_port(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("close-output-port", argl)?;
    crate::error::check_type(
        port::is_output_port,
        v,
        "close-output-port: expected output port",
    )?;
    Ok(mk_bool(port::close_port(v)?))
}

pub fn prim_open_input_string(argl: Value) -> Result<Value> {
    let [s] = args_exact::<1>("open-input-string", argl)?;
    Ok(port::open_input_string(string_get(s)?))
}

pub fn prim_open_output_string(argl: Value) -> Result<Value> {
    args_exact::<0>("open-output-string", argl)?;
    Ok(port::open_output_string())
}

pub fn prim_get_output_string(argl: Value) -> Result<Value> {
    let [v] = args_exact::<1>("get-output-string", argl)?;
    Ok(mk_string(port::get_output_string(v)?))
}

// =============================================================================
// Reading and writing
// =============================================================================

pub fn prim_read(argl: Value) -> Result<Value> {
    let args = args_range("read", argl, 0, 1)?;
    reader::read(optional_input_port(&args))
}

pub fn prim_read_char(argl: Value) -> Result<Value> {
    let args = args_range("read-char", argl, 0, 1)?;
    port::read_char(optional_input_port(&args))
}

pub fn prim_peek_char(argl: Value) -> Result<Value> {
    let args = args_range("peek-char", argl, 0, 1)?;
    port::peek_char(optional_input_port(&args))
}

pub fn prim_read_line(argl: Value) -> Result<Value> {
    let args = args_range("read-line", argl, 0, 1)?;
    port::read_line(optional_input_port(&args))
}

pub fn prim_is_char_ready(argl: Value) -> Result<Value> {
    let args = args_range("char-ready?", argl, 0, 1)?;
    Ok(mk_bool(port::is_char_ready(optional_input_port(&args))?))
}

pub fn prim_write(argl: Value) -> Result<Value> {
    let args = args_range("write", argl, 1, 2)?;
    port::write_string(optional_output_port(&args[1..]), &printable(args[0]))?;
    Ok(args[0])
}

pub fn prim_display(argl: Value) -> Result<Value> {
    let args = args_range("display", argl, 1, 2)?;
    port::write_string(optional_output_port(&args[1..]), &display_text(args[0]))?;
    Ok(args[0])
}

pub fn prim_newline(argl: Value) -> Result<Value> {
    let args = args_range("newline", argl, 0, 1)?;
    port::write_string(optional_output_port(&args), "\n")?;
    Ok(mk_bool(true))
}
