//! Root Scopes
//!
//! A scope is anything that can enumerate the value slots it holds.
//! Registered scopes are the only roots the collector walks, so every
//! value that must survive a collection lives behind one: the register
//! machine, the command-line holder, any embedder binding.
//!
//! Registration is scoped acquisition: `ScopeGuard` registers on
//! construction and deregisters on drop, on every exit path including
//! unwinding.

use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

use crate::heap::{deregister_scope, register_scope};
use crate::nanbox::Value;

/// An enumerable set of value locations; the unit of GC rooting.
pub trait Scope {
    /// Call `visitor` once per value slot held by this scope.
    fn visit(&mut self, visitor: &mut dyn FnMut(*mut Value));
}

/// Owns a scope, keeps it at a stable address, and keeps it registered
/// for exactly as long as the guard lives.
pub struct ScopeGuard<S: Scope + 'static> {
    // Boxed so the registry's pointer stays valid however the guard moves.
    inner: Box<S>,
    registered: NonNull<dyn Scope>,
}

impl<S: Scope + 'static> ScopeGuard<S> {
    pub fn new(scope: S) -> Self {
        let mut inner = Box::new(scope);
        let registered =
            NonNull::new(&mut *inner as &mut dyn Scope as *mut dyn Scope).expect("boxed scope");
        register_scope(registered);
        ScopeGuard { inner, registered }
    }
}

impl<S: Scope + 'static> Drop for ScopeGuard<S> {
    fn drop(&mut self) {
        deregister_scope(self.registered);
    }
}

impl<S: Scope + 'static> Deref for ScopeGuard<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.inner
    }
}

impl<S: Scope + 'static> DerefMut for ScopeGuard<S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.inner
    }
}

/// A flat list of rooted value slots, for callers that just need to
/// keep a handful of values alive across collections.
pub struct BasicScope {
    slots: Vec<Value>,
}

impl BasicScope {
    pub fn new(slots: Vec<Value>) -> Self {
        BasicScope { slots }
    }

    pub fn get(&self, index: usize) -> Value {
        self.slots[index]
    }

    pub fn set(&mut self, index: usize, v: Value) {
        self.slots[index] = v;
    }

    pub fn push(&mut self, v: Value) {
        self.slots.push(v);
    }
}

impl Scope for BasicScope {
    fn visit(&mut self, visitor: &mut dyn FnMut(*mut Value)) {
        for slot in &mut self.slots {
            visitor(slot as *mut Value);
        }
    }
}

/// Registered `BasicScope`: the common embedder root.
pub type RootScope = ScopeGuard<BasicScope>;

/// Register a `BasicScope` holding the given values.
pub fn root_scope(slots: Vec<Value>) -> RootScope {
    ScopeGuard::new(BasicScope::new(slots))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_registers_and_deregisters() {
        // Constructing and dropping must be balanced; a stale
        // registration would make the next gc pass read freed memory.
        let guard = root_scope(vec![Value::from_int(1)]);
        assert_eq!(guard.get(0), Value::from_int(1));
        drop(guard);
        crate::heap::run_gc();
    }

    #[test]
    fn test_slots_are_mutable_roots() {
        let mut guard = root_scope(vec![Value::from_int(0)]);
        guard.set(0, Value::from_int(9));
        assert_eq!(guard.get(0), Value::from_int(9));
    }
}
