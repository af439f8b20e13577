//! Sable Runtime: the Scheme semantics over the memory substrate
//!
//! Key design principles:
//! - Object kinds are metatype-described heap payloads (`types/`)
//! - The evaluator is an explicit-control register machine (`eval`),
//!   dispatching through the syntactic recognizers (`syntax`)
//! - The reader and printer meet at the external representation
//! - Primitives are plain host functions over the evaluated argument
//!   list, registered by name at bootstrap (`builtins`)

pub mod arglist;
pub mod builtins;
pub mod equivalence;
pub mod error;
pub mod eval;
pub mod globals;
pub mod printer;
pub mod reader;
pub mod script;
pub mod syntax;
pub mod types;

// Re-export key types and functions
pub use error::{Error, ErrorKind, Result};
pub use eval::{apply_procedure, eval, interpret};
pub use globals::{globals, interaction_environment, register_function};
pub use printer::{display_text, printable};
pub use reader::read;
pub use sable_core::{RootScope, Value, gc_stats, root_scope, run_gc};
pub use script::{eval_source, load};

/// Force interpreter bootstrap for the calling thread: singletons, the
/// global environment, and the primitive catalogue.
pub fn init() {
    globals::globals();
}
