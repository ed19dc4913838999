// ABOUTME: Registers every builtin into a root scope as Value::Builtin handles (§4.9)

pub mod arithmetic;
pub mod comparison;
pub mod control;
pub mod file;
pub mod io;
pub mod list;
pub mod meta;
pub mod namespace;
pub mod numeric;

use crate::scope::Scope;
use crate::value::{BuiltinSpec, Value};
use std::rc::Rc;

/// Binds every registered `BuiltinSpec` into `scope` by name, each wrapped as `Value::Builtin`.
pub fn install(scope: &Rc<Scope>) {
    let groups: &[&[&'static BuiltinSpec]] = &[
        arithmetic::ALL,
        comparison::ALL,
        control::ALL,
        file::ALL,
        io::ALL,
        list::ALL,
        meta::ALL,
        namespace::ALL,
        numeric::ALL,
    ];
    for group in groups {
        for spec in *group {
            scope.bind(spec.name.into(), Rc::new(Value::Builtin(spec)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_binds_a_representative_sample_of_builtins() {
        let scope = Scope::root();
        install(&scope);
        for name in ["+", "if", "cons", "println", "ns-unmap", "slurp", "eval", "quot"] {
            assert!(scope.lookup(name).is_some(), "{} was not bound", name);
        }
    }
}
