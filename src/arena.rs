// ABOUTME: Bulk-lifetime Value storage standing in for the two-tier GC scheme (§4.2)

use crate::value::Value;
use std::rc::Rc;

/// Owns a registry of Values. `register` hands back a handle (an `Rc<Value>` clone) and keeps
/// the Arena's own strong reference alive until `delete_one`, `clear`, or drop.
///
/// Per §9's design note, handles here are `Rc<Value>` rather than raw indices or owning
/// references: a `Value::Cons`'s fields are themselves `Rc<Value>`, so the value graph can never
/// contain a dangling or aliased owning pointer. The Arena's bookkeeping (the `Vec` below) is
/// what makes `clear()`/`delete_one()` meaningful: dropping the Arena's reference lets a value
/// die once nothing else (e.g. a Scope binding in the other Arena) still holds it.
#[derive(Default)]
pub struct Arena {
    registry: Vec<Rc<Value>>,
}

impl Arena {
    pub fn new() -> Self {
        Arena {
            registry: Vec::new(),
        }
    }

    /// Registers a value, returning a stable handle to it.
    pub fn register(&mut self, value: Value) -> Rc<Value> {
        let handle = Rc::new(value);
        self.registry.push(handle.clone());
        handle
    }

    /// Keeps an already-constructed handle alive in this Arena (used when a handle is built
    /// directly, e.g. by the reader, rather than via `register`).
    pub fn adopt(&mut self, handle: Rc<Value>) -> Rc<Value> {
        self.registry.push(handle.clone());
        handle
    }

    /// Destroys every currently-registered value. Any handle not additionally rooted elsewhere
    /// (e.g. in a Scope binding) becomes the sole survivor of nothing and is dropped for real.
    pub fn clear(&mut self) {
        self.registry.clear();
    }

    /// Destroys exactly one registered value, matching it by pointer identity. Used by
    /// `ns-unmap` to release a single long-term binding's backing storage.
    pub fn delete_one(&mut self, value: &Rc<Value>) -> bool {
        if let Some(pos) = self.registry.iter().position(|v| Rc::ptr_eq(v, value)) {
            self.registry.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Recursively reconstructs `v` with freshly registered nodes in this Arena. Mandatory
    /// before publishing a value into a Scope binding (§4.2) so that clearing the short-term
    /// Arena never invalidates a symbol table.
    ///
    /// Values are immutable once built, so this only needs to guard against structural
    /// sharing across Arenas, not against future in-place mutation; there is none in this
    /// dialect (no `set!`).
    pub fn deep_copy(&mut self, v: &Rc<Value>) -> Rc<Value> {
        let copied = match v.as_ref() {
            Value::Nil => Value::Nil,
            Value::Boolean(b) => Value::Boolean(*b),
            Value::Number(n) => Value::Number(*n),
            Value::Str(s) => Value::Str(s.clone()),
            Value::Symbol(s) => Value::Symbol(s.clone()),
            Value::Cons(l, r) => {
                let l2 = self.deep_copy(l);
                let r2 = self.deep_copy(r);
                Value::Cons(l2, r2)
            }
            Value::Vector(items) => {
                let copied: Vec<Rc<Value>> = items.iter().map(|e| self.deep_copy(e)).collect();
                Value::Vector(Rc::new(copied))
            }
            Value::Builtin(b) => Value::Builtin(b),
            Value::Closure(c) => Value::Closure(c.clone()),
        };
        self.register(copied)
    }
}
