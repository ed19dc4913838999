// ABOUTME: cons, list, first, rest, nth, vector — the only sequence operations in this core (§4.9)

use crate::error::LispError;
use crate::eval::Interpreter;
use crate::number::Number;
use crate::scope::Scope;
use crate::value::{BuiltinSpec, Value};
use std::rc::Rc;

fn cons(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    Ok(interp
        .short_term
        .register(Value::Cons(args[0].clone(), args[1].clone())))
}

fn list(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    let built = Value::list_from(args);
    Ok(interp.short_term.adopt(built))
}

fn first(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    let coll = &args[0];
    let head = match coll.as_ref() {
        Value::Nil => Value::Nil,
        Value::Cons(l, _) if !Value::is_empty_list_sentinel(coll) => return Ok(l.clone()),
        _ => return Err(LispError::type_error("first", "list", coll, 0)),
    };
    Ok(interp.short_term.register(head))
}

fn rest(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    let coll = &args[0];
    match coll.as_ref() {
        Value::Nil => Ok(interp.short_term.register(Value::Nil)),
        Value::Cons(_, r) if !Value::is_empty_list_sentinel(coll) => Ok(r.clone()),
        _ => Err(LispError::type_error("rest", "list", coll, 0)),
    }
}

fn nth(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    let coll = &args[0];
    let elements = match coll.as_ref() {
        Value::Vector(items) => items.as_ref().clone(),
        _ if Value::is_list(coll) => Value::list_elements(coll),
        _ => return Err(LispError::type_error("nth", "list or vector", coll, 0)),
    };
    let index = match args[1].as_ref() {
        Value::Number(Number::Int(i)) if *i >= 0 => *i as usize,
        _ => return Err(LispError::type_error("nth", "non-negative integer", &args[1], 1)),
    };
    match elements.get(index) {
        Some(v) => Ok(v.clone()),
        None => match args.get(2) {
            Some(default) => Ok(default.clone()),
            None => Err(LispError::arg_shape(
                "nth",
                format!("index {} out of bounds for a collection of length {}", index, elements.len()),
            )),
        },
    }
}

fn vector(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    Ok(interp
        .short_term
        .register(Value::Vector(Rc::new(args.to_vec()))))
}

pub static CONS: BuiltinSpec = BuiltinSpec {
    name: "cons",
    min_arity: 2,
    max_arity: Some(2),
    signature: &[],
    pre_evaluate_args: true,
    func: cons,
};

pub static LIST: BuiltinSpec = BuiltinSpec {
    name: "list",
    min_arity: 0,
    max_arity: None,
    signature: &[],
    pre_evaluate_args: true,
    func: list,
};

pub static FIRST: BuiltinSpec = BuiltinSpec {
    name: "first",
    min_arity: 1,
    max_arity: Some(1),
    signature: &[],
    pre_evaluate_args: true,
    func: first,
};

pub static REST: BuiltinSpec = BuiltinSpec {
    name: "rest",
    min_arity: 1,
    max_arity: Some(1),
    signature: &[],
    pre_evaluate_args: true,
    func: rest,
};

pub static NTH: BuiltinSpec = BuiltinSpec {
    name: "nth",
    min_arity: 2,
    max_arity: Some(3),
    signature: &[],
    pre_evaluate_args: true,
    func: nth,
};

pub static VECTOR: BuiltinSpec = BuiltinSpec {
    name: "vector",
    min_arity: 0,
    max_arity: None,
    signature: &[],
    pre_evaluate_args: true,
    func: vector,
};

pub const ALL: &[&BuiltinSpec] = &[&CONS, &LIST, &FIRST, &REST, &NTH, &VECTOR];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::BufferIoProxy;

    fn run(src: &str) -> Rc<Value> {
        Interpreter::new(Box::new(BufferIoProxy::new()))
            .eval_source(src)
            .unwrap()
    }

    #[test]
    fn nth_indexes_a_built_list() {
        assert_eq!(*run("(nth (list 10 20 30) 1)"), Value::Number(Number::Int(20)));
    }

    #[test]
    fn nth_indexes_a_vector() {
        assert_eq!(*run("(nth [10 20 30] 1)"), Value::Number(Number::Int(20)));
    }

    #[test]
    fn nth_returns_default_when_out_of_bounds() {
        assert_eq!(*run(r#"(nth (list) 5 "x")"#), Value::Str("x".into()));
    }

    #[test]
    fn nth_without_default_errors_out_of_bounds() {
        let mut i = Interpreter::new(Box::new(BufferIoProxy::new()));
        assert!(i.eval_source("(nth (list) 5)").is_err());
    }

    #[test]
    fn first_and_rest_of_empty_list_are_nil() {
        assert_eq!(*run("(first (list))"), Value::Nil);
        assert_eq!(*run("(rest (list))"), Value::Nil);
    }

    #[test]
    fn cons_builds_a_pair() {
        let result = run("(cons 1 (list 2 3))");
        assert!(Value::is_list(&result));
        assert_eq!(Value::list_elements(&result).len(), 3);
    }

    #[test]
    fn vector_builtin_builds_a_vector_value() {
        let result = run("[1 2 3]");
        assert!(matches!(result.as_ref(), Value::Vector(items) if items.len() == 3));
    }
}
