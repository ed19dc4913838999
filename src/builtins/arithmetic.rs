// ABOUTME: Variadic +, -, *, / over the mixed integer/float numeric tower (§4.9)

use crate::error::LispError;
use crate::eval::Interpreter;
use crate::number::Number;
use crate::scope::Scope;
use crate::value::{BuiltinSpec, Value};
use std::rc::Rc;

fn as_number(name: &str, position: usize, v: &Rc<Value>) -> Result<Number, LispError> {
    match v.as_ref() {
        Value::Number(n) => Ok(*n),
        _ => Err(LispError::type_error(name, "number", v, position)),
    }
}

fn numbers(name: &str, args: &[Rc<Value>]) -> Result<Vec<Number>, LispError> {
    args.iter()
        .enumerate()
        .map(|(i, v)| as_number(name, i, v))
        .collect()
}

fn add(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    let nums = numbers("+", args)?;
    let sum = nums.into_iter().fold(Number::Int(0), |acc, n| acc.add(n));
    Ok(interp.short_term.register(Value::Number(sum)))
}

fn sub(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    let nums = numbers("-", args)?;
    let result = if nums.len() == 1 {
        nums[0].neg()
    } else {
        let mut iter = nums.into_iter();
        let first = iter.next().unwrap();
        iter.fold(first, |acc, n| acc.sub(n))
    };
    Ok(interp.short_term.register(Value::Number(result)))
}

fn mul(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    let nums = numbers("*", args)?;
    let product = nums.into_iter().fold(Number::Int(1), |acc, n| acc.mul(n));
    Ok(interp.short_term.register(Value::Number(product)))
}

fn div(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    let nums = numbers("/", args)?;
    let result = if nums.len() == 1 {
        Number::Int(1).div(nums[0])
    } else {
        let mut iter = nums.into_iter();
        let first = iter.next().unwrap();
        iter.fold(first, |acc, n| acc.div(n))
    };
    Ok(interp.short_term.register(Value::Number(result)))
}

pub static ADD: BuiltinSpec = BuiltinSpec {
    name: "+",
    min_arity: 1,
    max_arity: None,
    signature: &[],
    pre_evaluate_args: true,
    func: add,
};

pub static SUB: BuiltinSpec = BuiltinSpec {
    name: "-",
    min_arity: 1,
    max_arity: None,
    signature: &[],
    pre_evaluate_args: true,
    func: sub,
};

pub static MUL: BuiltinSpec = BuiltinSpec {
    name: "*",
    min_arity: 1,
    max_arity: None,
    signature: &[],
    pre_evaluate_args: true,
    func: mul,
};

pub static DIV: BuiltinSpec = BuiltinSpec {
    name: "/",
    min_arity: 1,
    max_arity: None,
    signature: &[],
    pre_evaluate_args: true,
    func: div,
};

pub const ALL: &[&BuiltinSpec] = &[&ADD, &SUB, &MUL, &DIV];
