//! The primitive catalogue
//!
//! Every primitive is a plain function over the evaluated argument
//! list, registered by name into the global environment at bootstrap.

pub mod equivalence;
pub mod numeric;
pub mod pairs;
pub mod ports;
pub mod procedures;
pub mod strings;
pub mod system;
pub mod vectors;

use crate::globals::register_function;
use crate::types::procedure::PrimitiveFn;

/// Define the whole catalogue in the global environment. Called once
/// from bootstrap.
pub(crate) fn register_all() {
    let table: &[(&str, PrimitiveFn)] = &[
        // Equivalence and booleans
        ("eq?", equivalence::prim_eq),
        ("eqv?", equivalence::prim_eqv),
        ("equal?", equivalence::prim_equal),
        ("not", equivalence::prim_not),
        ("boolean?", equivalence::prim_is_boolean),
        // Numbers
        ("number?", numeric::prim_is_number),
        ("integer?", numeric::prim_is_integer),
        ("real?", numeric::prim_is_real),
        ("=", numeric::prim_num_eq),
        ("<", numeric::prim_num_lt),
        (">", numeric::prim_num_gt),
        ("<=", numeric::prim_num_lte),
        (">=", numeric::prim_num_gte),
        ("zero?", numeric::prim_is_zero),
        ("positive?", numeric::prim_is_positive),
        ("negative?", numeric::prim_is_negative),
        ("odd?", numeric::prim_is_odd),
        ("even?", numeric::prim_is_even),
        ("max", numeric::prim_max),
        ("min", numeric::prim_min),
        ("+", numeric::prim_add),
        ("-", numeric::prim_sub),
        ("*", numeric::prim_mul),
        ("/", numeric::prim_div),
        ("abs", numeric::prim_abs),
        ("quotient", numeric::prim_quotient),
        ("remainder", numeric::prim_remainder),
        ("modulo", numeric::prim_modulo),
        ("number->string", numeric::prim_number_to_string),
        ("string->number", numeric::prim_string_to_number),
        // Pairs and lists
        ("pair?", pairs::prim_is_pair),
        ("cons", pairs::prim_cons),
        ("car", pairs::prim_car),
        ("cdr", pairs::prim_cdr),
        ("set-car!", pairs::prim_set_car),
        ("set-cdr!", pairs::prim_set_cdr),
        ("caar", pairs::prim_caar),
        ("cadr", pairs::prim_cadr),
        ("cdar", pairs::prim_cdar),
        ("cddr", pairs::prim_cddr),
        ("caaar", pairs::prim_caaar),
        ("caadr", pairs::prim_caadr),
        ("cadar", pairs::prim_cadar),
        ("caddr", pairs::prim_caddr),
        ("cdaar", pairs::prim_cdaar),
        ("cdadr", pairs::prim_cdadr),
        ("cddar", pairs::prim_cddar),
        ("cdddr", pairs::prim_cdddr),
        ("caaaar", pairs::prim_caaaar),
        ("caaadr", pairs::prim_caaadr),
        ("caadar", pairs::prim_caadar),
        ("caaddr", pairs::prim_caaddr),
        ("cadaar", pairs::prim_cadaar),
        ("cadadr", pairs::prim_cadadr),
        ("caddar", pairs::prim_caddar),
        ("cadddr", pairs::prim_cadddr),
        ("cdaaar", pairs::prim_cdaaar),
        ("cdaadr", pairs::prim_cdaadr),
        ("cdadar", pairs::prim_cdadar),
        ("cdaddr", pairs::prim_cdaddr),
        ("cddaar", pairs::prim_cddaar),
        ("cddadr", pairs::prim_cddadr),
        ("cdddar", pairs::prim_cdddar),
        ("cddddr", pairs::prim_cddddr),
        ("null?", pairs::prim_is_null),
        ("list?", pairs::prim_is_list),
        ("list", pairs::prim_list),
        ("length", pairs::prim_length),
        ("append", pairs::prim_append),
        ("reverse", pairs::prim_reverse),
        ("list-tail", pairs::prim_list_tail),
        ("assq", pairs::prim_assq),
        ("tagged-list?", pairs::prim_is_tagged_list),
        // Symbols, strings, characters
        ("symbol?", strings::prim_is_symbol),
        ("symbol->string", strings::prim_symbol_to_string),
        ("string->symbol", strings::prim_string_to_symbol),
        ("string?", strings::prim_is_string),
        ("string-length", strings::prim_string_length),
        ("string-append", strings::prim_string_append),
        ("substring", strings::prim_substring),
        ("string=?", strings::prim_string_eq),
        ("string->list", strings::prim_string_to_list),
        ("list->string", strings::prim_list_to_string),
        ("char?", strings::prim_is_char),
        ("char->integer", strings::prim_char_to_integer),
        ("integer->char", strings::prim_integer_to_char),
        ("char=?", strings::prim_char_eq),
        ("char-alphabetic?", strings::prim_char_alphabetic),
        ("char-numeric?", strings::prim_char_numeric),
        ("char-whitespace?", strings::prim_char_whitespace),
        // Vectors
        ("vector?", vectors::prim_is_vector),
        ("vector", vectors::prim_vector),
        ("make-vector", vectors::prim_make_vector),
        ("vector-length", vectors::prim_vector_length),
        ("vector-ref", vectors::prim_vector_ref),
        ("vector-set!", vectors::prim_vector_set),
        ("vector->list", vectors::prim_vector_to_list),
        ("list->vector", vectors::prim_list_to_vector),
        // Procedures, evaluation, environments
        ("procedure?", procedures::prim_is_procedure),
        ("primitive-procedure?", procedures::prim_is_primitive_procedure),
        ("compound-procedure?", procedures::prim_is_compound_procedure),
        ("apply", procedures::prim_apply),
        ("eval", procedures::prim_eval),
        ("environment?", procedures::prim_is_environment),
        ("environment", procedures::prim_environment),
        ("null-environment", procedures::prim_null_environment),
        ("interaction-environment", procedures::prim_interaction_environment),
        ("external-representation", procedures::prim_external_representation),
        // Ports and I/O
        ("port?", ports::prim_is_port),
        ("input-port?", ports::prim_is_input_port),
        ("output-port?", ports::prim_is_output_port),
        ("textual-port?", ports::prim_is_textual_port),
        ("binary-port?", ports::prim_is_binary_port),
        ("string-port?", ports::prim_is_string_port),
        ("file-port?", ports::prim_is_file_port),
        ("input-port-open?", ports::prim_is_input_port_open),
        ("output-port-open?", ports::prim_is_output_port_open),
        ("current-input-port", ports::prim_current_input_port),
        ("current-output-port", ports::prim_current_output_port),
        ("current-error-port", ports::prim_current_error_port),
        ("open-input-file", ports::prim_open_input_file),
        ("open-binary-input-file", ports::prim_open_input_file),
        ("open-output-file", ports::prim_open_output_file),
        ("open-binary-output-file", ports::prim_open_output_file),
        ("close-port", ports::prim_close_port),
        ("close-input-port", ports::prim_close_input_port),
        ("close-output-port", ports::prim_close_output_port),
        ("open-input-string", ports::prim_open_input_string),
        ("open-output-string", ports::prim_open_output_string),
        ("get-output-string", ports::prim_get_output_string),
        ("read", ports::prim_read),
        ("read-char", ports::prim_read_char),
        ("peek-char", ports::prim_peek_char),
        ("read-line", ports::prim_read_line),
        ("char-ready?", ports::prim_is_char_ready),
        ("eof-object", ports::prim_eof_object),
        ("eof-object?", ports::prim_is_eof_object),
        ("write", ports::prim_write),
        ("display", ports::prim_display),
        ("newline", ports::prim_newline),
        // System
        ("load", system::prim_load),
        ("file-exists?", system::prim_file_exists),
        ("delete-file", system::prim_delete_file),
        ("command-line", system::prim_command_line),
        ("exit", system::prim_exit),
        ("emergency-exit", system::prim_emergency_exit),
        ("get-environment-variable", system::prim_get_environment_variable),
        ("get-environment-variables", system::prim_get_environment_variables),
        ("current-second", system::prim_current_second),
        ("current-jiffy", system::prim_current_jiffy),
        ("jiffies-per-second", system::prim_jiffies_per_second),
        ("garbage-collect", system::prim_garbage_collect),
        ("run-gc", system::prim_garbage_collect),
        ("gc-stats", system::prim_gc_stats),
    ];

    for &(name, func) in table {
        register_function(name, func).expect("primitive registration cannot fail");
    }
}
