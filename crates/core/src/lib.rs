//! Sable Core: the memory substrate under the interpreter
//!
//! Key design principles:
//! - Value: one machine word, NaN-boxed (double, int32, or tagged pointer)
//! - GcHeader + Metatype: every heap object carries its own lifecycle
//!   and visitor hooks
//! - Scopes: the only GC roots; register on creation, deregister on drop
//! - Thread: the eight-register save/restore machine that drives one
//!   evaluation and roots everything in flight
//!
//! # Modules
//!
//! - `nanbox`: tagged value encoding
//! - `heap`: object headers, allocation list, mark-and-sweep collector
//! - `roots`: the scope trait and scoped registration guards
//! - `thread`: evaluator registers and the save/restore stack

pub mod heap;
pub mod nanbox;
pub mod roots;
pub mod thread;

// Re-export key types and functions
pub use heap::{
    FLAG_SELF_EVAL, FLAG_STATIC, GcHeader, GcStats, Metatype, allocate, gc_stats, is_instance,
    object_allocate, object_data, object_data_as, object_metatype, run_gc,
};
pub use nanbox::Value;
pub use roots::{BasicScope, RootScope, Scope, ScopeGuard, root_scope};
pub use thread::{N_REGISTERS, REGISTER_NAMES, Register, Thread};
