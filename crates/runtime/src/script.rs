//! Reading-and-evaluating drivers
//!
//! A script run is: open a port, read one form at a time, evaluate each
//! in order, and keep the port, the environment, and the most recent
//! result rooted across the whole run so an explicit collection inside
//! user code cannot reap them.

use sable_core::{RootScope, Value, root_scope};

use tracing::debug;

use crate::error::Result;
use crate::eval::interpret;
use crate::reader::read;
use crate::types::boolean::mk_bool;
use crate::types::eof::is_eof_object;
use crate::types::port::{open_input_file, open_input_string};

const SLOT_PORT: usize = 0;
const SLOT_ENV: usize = 1;
const SLOT_RESULT: usize = 2;

fn run_port(port: Value, env: Value) -> Result<Value> {
    let mut roots: RootScope = root_scope(vec![port, env, mk_bool(true)]);

    loop {
        let exp = read(roots.get(SLOT_PORT))?;
        if is_eof_object(exp) {
            return Ok(roots.get(SLOT_RESULT));
        }
        let result = interpret(exp, roots.get(SLOT_ENV))?;
        roots.set(SLOT_RESULT, result);
    }
}

/// Evaluate every form in `source`, returning the last result (#t for
/// empty input).
pub fn eval_source(source: &str, env: Value) -> Result<Value> {
    run_port(open_input_string(source.to_string()), env)
}

/// Read and evaluate every form in `filename` within `env`.
pub fn load(filename: &str, env: Value) -> Result<Value> {
    debug!(filename, "loading script");
    let port = open_input_file(filename)?;
    run_port(port, env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::globals::interaction_environment;
    use crate::printer::printable;
    use std::io::Write;

    #[test]
    fn test_eval_source_returns_last_form() {
        let env = interaction_environment();
        let v = eval_source("(define x 2) (+ x 3)", env).unwrap();
        assert_eq!(printable(v), "5");
    }

    #[test]
    fn test_eval_source_empty_input() {
        let env = interaction_environment();
        assert_eq!(printable(eval_source("  ; nothing\n", env).unwrap()), "#t");
    }

    #[test]
    fn test_load_runs_file_in_environment() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "(define loaded-value 41)").unwrap();
        writeln!(file, "(define (loaded-fn) (+ loaded-value 1))").unwrap();
        file.flush().unwrap();

        let env = interaction_environment();
        load(file.path().to_str().unwrap(), env).unwrap();

        let v = eval_source("(loaded-fn)", env).unwrap();
        assert_eq!(printable(v), "42");
    }

    #[test]
    fn test_load_missing_file_is_file_error() {
        let env = interaction_environment();
        let err = load("/no/such/sable/file.scm", env).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::File);
    }
}
