// ABOUTME: ns-unmap — removes a binding from scope and releases its long-term storage (§4.9)

use crate::error::LispError;
use crate::eval::Interpreter;
use crate::scope::Scope;
use crate::value::{BuiltinSpec, Value};
use std::rc::Rc;

fn ns_unmap(args: &[Rc<Value>], scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    let name = match args[0].as_ref() {
        Value::Symbol(s) => s.clone(),
        other => return Err(LispError::type_error("ns-unmap", "symbol", other, 0)),
    };
    if let Some(removed) = scope.unbind(&name) {
        interp.long_term.delete_one(&removed);
    }
    Ok(interp.short_term.register(Value::Nil))
}

pub static NS_UNMAP: BuiltinSpec = BuiltinSpec {
    name: "ns-unmap",
    min_arity: 1,
    max_arity: Some(1),
    signature: &[],
    pre_evaluate_args: false,
    func: ns_unmap,
};

pub const ALL: &[&BuiltinSpec] = &[&NS_UNMAP];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::BufferIoProxy;

    #[test]
    fn ns_unmap_removes_a_binding() {
        let mut interp = Interpreter::new(Box::new(BufferIoProxy::new()));
        interp.eval_source("(def x 5)").unwrap();
        assert!(interp.root_scope.lookup("x").is_some());
        interp.eval_source("(ns-unmap x)").unwrap();
        assert!(interp.root_scope.lookup("x").is_none());
    }

    #[test]
    fn ns_unmap_is_idempotent() {
        let mut interp = Interpreter::new(Box::new(BufferIoProxy::new()));
        interp.eval_source("(def x 5)").unwrap();
        interp.eval_source("(ns-unmap x)").unwrap();
        assert!(interp.eval_source("(ns-unmap x)").is_ok());
    }

    #[test]
    fn unmapping_an_unbound_symbol_does_not_error() {
        let mut interp = Interpreter::new(Box::new(BufferIoProxy::new()));
        assert!(interp.eval_source("(ns-unmap never-bound)").is_ok());
    }
}
