// ABOUTME: Equality and chained numeric ordering: = not= < <= > >= (§4.9)

use crate::error::LispError;
use crate::eval::Interpreter;
use crate::number::Number;
use crate::scope::Scope;
use crate::value::{BuiltinSpec, Value};
use std::cmp::Ordering;
use std::rc::Rc;

fn bool_value(interp: &mut Interpreter, b: bool) -> Rc<Value> {
    interp.short_term.register(Value::Boolean(b))
}

fn eq(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    let all_equal = args.windows(2).all(|pair| pair[0] == pair[1]);
    Ok(bool_value(interp, all_equal))
}

fn not_eq(args: &[Rc<Value>], scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    let equal = eq(args, scope, interp)?;
    Ok(bool_value(interp, !equal.truthy()))
}

fn as_number(name: &str, position: usize, v: &Rc<Value>) -> Result<Number, LispError> {
    match v.as_ref() {
        Value::Number(n) => Ok(*n),
        _ => Err(LispError::type_error(name, "number", v, position)),
    }
}

fn chained(
    name: &'static str,
    args: &[Rc<Value>],
    interp: &mut Interpreter,
    holds: impl Fn(Ordering) -> bool,
) -> Result<Rc<Value>, LispError> {
    let mut nums = Vec::with_capacity(args.len());
    for (i, v) in args.iter().enumerate() {
        nums.push(as_number(name, i, v)?);
    }
    let ok = nums.windows(2).all(|pair| holds(pair[0].compare(pair[1])));
    Ok(bool_value(interp, ok))
}

fn lt(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    chained("<", args, interp, |o| o == Ordering::Less)
}

fn lte(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    chained("<=", args, interp, |o| o != Ordering::Greater)
}

fn gt(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    chained(">", args, interp, |o| o == Ordering::Greater)
}

fn gte(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    chained(">=", args, interp, |o| o != Ordering::Less)
}

pub static EQ: BuiltinSpec = BuiltinSpec {
    name: "=",
    min_arity: 1,
    max_arity: None,
    signature: &[],
    pre_evaluate_args: true,
    func: eq,
};

pub static NOT_EQ: BuiltinSpec = BuiltinSpec {
    name: "not=",
    min_arity: 1,
    max_arity: None,
    signature: &[],
    pre_evaluate_args: true,
    func: not_eq,
};

pub static LT: BuiltinSpec = BuiltinSpec {
    name: "<",
    min_arity: 1,
    max_arity: None,
    signature: &[],
    pre_evaluate_args: true,
    func: lt,
};

pub static LTE: BuiltinSpec = BuiltinSpec {
    name: "<=",
    min_arity: 1,
    max_arity: None,
    signature: &[],
    pre_evaluate_args: true,
    func: lte,
};

pub static GT: BuiltinSpec = BuiltinSpec {
    name: ">",
    min_arity: 1,
    max_arity: None,
    signature: &[],
    pre_evaluate_args: true,
    func: gt,
};

pub static GTE: BuiltinSpec = BuiltinSpec {
    name: ">=",
    min_arity: 1,
    max_arity: None,
    signature: &[],
    pre_evaluate_args: true,
    func: gte,
};

pub const ALL: &[&BuiltinSpec] = &[&EQ, &NOT_EQ, &LT, &LTE, &GT, &GTE];
