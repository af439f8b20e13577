//! Process-wide interpreter state
//!
//! The singletons, the symbol intern table, the global environment, the
//! standard ports, and the command-line holder. Everything lives in one
//! thread-local record that is itself a registered root scope, so the
//! global environment and the values hanging off it survive every
//! collection.
//!
//! Initialization is on first use: the record is published before
//! bootstrap fills it in, so constructors called during bootstrap
//! (symbols, the global environment, primitive registration) can
//! already reach it.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use sable_core::{Scope, ScopeGuard, Value};

use crate::error::Result;
use crate::types::environment::environment_define;
use crate::types::pair::list_from_slice;
use crate::types::procedure::{PrimitiveFn, mk_primitive_procedure};
use crate::types::string::mk_string;
use crate::types::symbol::symbol;
use crate::types::{boolean, environment, eof, pair, port};

pub struct Globals {
    nil: Cell<Value>,
    bool_true: Cell<Value>,
    bool_false: Cell<Value>,
    eof: Cell<Value>,
    global_env: Cell<Value>,
    command_line: Cell<Value>,
    stdin_port: Cell<Value>,
    stdout_port: Cell<Value>,
    stderr_port: Cell<Value>,
    symbols: RefCell<HashMap<String, Value>>,
}

impl Globals {
    fn empty() -> Self {
        // Placeholder immediates; replaced in dependency order by
        // bootstrap before anything can observe them.
        let zero = Cell::new(Value::from_int(0));
        Globals {
            nil: zero.clone(),
            bool_true: zero.clone(),
            bool_false: zero.clone(),
            eof: zero.clone(),
            global_env: zero.clone(),
            command_line: zero.clone(),
            stdin_port: zero.clone(),
            stdout_port: zero.clone(),
            stderr_port: zero,
            symbols: RefCell::new(HashMap::new()),
        }
    }

    fn bootstrap(&self) {
        self.nil.set(pair::make_nil());
        self.bool_true.set(boolean::make_true());
        self.bool_false.set(boolean::make_false());
        self.eof.set(eof::make_eof());
        self.global_env.set(environment::mk_empty_environment());
        self.command_line.set(self.nil.get());
        self.stdin_port.set(port::mk_port_from_fd(0, libc::O_RDONLY));
        self.stdout_port.set(port::mk_port_from_fd(1, libc::O_WRONLY));
        self.stderr_port.set(port::mk_port_from_fd(2, libc::O_WRONLY));
        crate::builtins::register_all();
    }

    pub fn nil(&self) -> Value {
        self.nil.get()
    }

    pub fn bool_true(&self) -> Value {
        self.bool_true.get()
    }

    pub fn bool_false(&self) -> Value {
        self.bool_false.get()
    }

    pub fn eof(&self) -> Value {
        self.eof.get()
    }

    pub fn global_environment(&self) -> Value {
        self.global_env.get()
    }

    pub fn command_line(&self) -> Value {
        self.command_line.get()
    }

    pub fn set_command_line(&self, args: &[String]) {
        let strings: Vec<Value> = args.iter().map(|a| mk_string(a.as_str())).collect();
        self.command_line.set(list_from_slice(&strings));
    }

    pub fn stdin_port(&self) -> Value {
        self.stdin_port.get()
    }

    pub fn stdout_port(&self) -> Value {
        self.stdout_port.get()
    }

    pub fn stderr_port(&self) -> Value {
        self.stderr_port.get()
    }

    /// Look up `name`, calling `create` to allocate the symbol on a
    /// miss. Interned symbols are static and never collected, so the
    /// table holds bare values.
    pub fn intern_symbol(&self, name: &str, create: impl FnOnce() -> Value) -> Value {
        if let Some(&sym) = self.symbols.borrow().get(name) {
            return sym;
        }
        let sym = create();
        self.symbols.borrow_mut().insert(name.to_string(), sym);
        sym
    }
}

impl Scope for Globals {
    fn visit(&mut self, visitor: &mut dyn FnMut(*mut Value)) {
        // The symbol table is all static objects; everything else is a
        // root.
        visitor(self.nil.as_ptr());
        visitor(self.bool_true.as_ptr());
        visitor(self.bool_false.as_ptr());
        visitor(self.eof.as_ptr());
        visitor(self.global_env.as_ptr());
        visitor(self.command_line.as_ptr());
        visitor(self.stdin_port.as_ptr());
        visitor(self.stdout_port.as_ptr());
        visitor(self.stderr_port.as_ptr());
    }
}

thread_local! {
    static GLOBALS: Cell<Option<&'static Globals>> = const { Cell::new(None) };
}

/// The calling thread's interpreter state, bootstrapping it on first
/// use. The record and its scope registration live for the rest of the
/// thread.
pub fn globals() -> &'static Globals {
    GLOBALS.with(|slot| match slot.get() {
        Some(g) => g,
        None => {
            let guard: &'static ScopeGuard<Globals> =
                Box::leak(Box::new(ScopeGuard::new(Globals::empty())));
            let g: &'static Globals = guard;
            // Publish before bootstrap so re-entrant lookups resolve.
            slot.set(Some(g));
            g.bootstrap();
            g
        }
    })
}

/// The environment the REPL and script loader evaluate in.
pub fn interaction_environment() -> Value {
    globals().global_environment()
}

/// Define a named primitive in the global environment.
pub fn register_function(name: &str, func: PrimitiveFn) -> Result<()> {
    let g = globals();
    environment_define(
        g.global_environment(),
        symbol(name),
        mk_primitive_procedure(name, func),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_populates_singletons() {
        let g = globals();
        assert!(g.nil().is_pointer());
        assert!(g.bool_true().is_pointer());
        assert_ne!(g.bool_true(), g.bool_false());
        assert!(crate::types::environment::is_environment(g.global_environment()));
    }

    #[test]
    fn test_primitives_are_defined() {
        let g = globals();
        let car = crate::types::environment::environment_get(g.global_environment(), symbol("car"));
        assert!(crate::types::procedure::is_primitive_procedure(car.unwrap()));
    }

    #[test]
    fn test_command_line_round_trip() {
        let g = globals();
        g.set_command_line(&["sable".to_string(), "x.scm".to_string()]);
        let args = crate::types::pair::list_to_vec(g.command_line()).unwrap();
        assert_eq!(args.len(), 2);
        assert_eq!(
            crate::types::string::string_get(args[0]).unwrap(),
            "sable"
        );
    }
}
