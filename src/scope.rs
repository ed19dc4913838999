// ABOUTME: Linked-parent symbol tables with lookup, bind, and unbind (§4.3)

use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug)]
pub struct Scope {
    bindings: RefCell<HashMap<Rc<str>, Rc<Value>>>,
    parent: Option<Rc<Scope>>,
}

impl Scope {
    /// Creates a new root scope with no parent. Every registered built-in is bound here.
    pub fn root() -> Rc<Self> {
        Rc::new(Scope {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    /// Creates a new child scope of `parent`.
    pub fn child(parent: &Rc<Scope>) -> Rc<Self> {
        Rc::new(Scope {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(parent.clone()),
        })
    }

    /// Walks self then parent chain; first hit wins.
    pub fn lookup(&self, name: &str) -> Option<Rc<Value>> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Some(value.clone());
        }
        if let Some(parent) = &self.parent {
            return parent.lookup(name);
        }
        None
    }

    /// Sets in self only (shadows any parent binding).
    pub fn bind(&self, name: Rc<str>, value: Rc<Value>) {
        self.bindings.borrow_mut().insert(name, value);
    }

    /// Removes from the chain starting at self; returns the prior handle if one was removed.
    pub fn unbind(&self, name: &str) -> Option<Rc<Value>> {
        if let Some(v) = self.bindings.borrow_mut().remove(name) {
            return Some(v);
        }
        if let Some(parent) = &self.parent {
            return parent.unbind(name);
        }
        None
    }
}
