// ABOUTME: quot, rem, mod, inc, dec, max, min over the numeric tower (§4.8)

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

fn binary(
    name: &'static str,
    args: &[Rc<Value>],
    interp: &mut Interpreter,
    op: impl Fn(Number, Number) -> Number,
) -> Result<Rc<Value>, LispError> {
    let a = as_number(name, 0, &args[0])?;
    let b = as_number(name, 1, &args[1])?;
    Ok(interp.short_term.register(Value::Number(op(a, b))))
}

fn unary(
    name: &'static str,
    args: &[Rc<Value>],
    interp: &mut Interpreter,
    op: impl Fn(Number) -> Number,
) -> Result<Rc<Value>, LispError> {
    let a = as_number(name, 0, &args[0])?;
    Ok(interp.short_term.register(Value::Number(op(a))))
}

fn quot(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    binary("quot", args, interp, Number::quot)
}

fn rem(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    binary("rem", args, interp, Number::rem)
}

/// `mod` behaves identically to `rem` in this core (§9 Open Questions: the source does not
/// distinguish them; real Clojure's `mod` differs on negative operands, which this core does
/// not reproduce).
fn modulo(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    binary("mod", args, interp, Number::rem)
}

fn inc(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    unary("inc", args, interp, Number::inc)
}

fn dec(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    unary("dec", args, interp, Number::dec)
}

fn max(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    let mut nums = Vec::with_capacity(args.len());
    for (i, v) in args.iter().enumerate() {
        nums.push(as_number("max", i, v)?);
    }
    let result = nums.into_iter().reduce(|a, b| a.max(b)).unwrap();
    Ok(interp.short_term.register(Value::Number(result)))
}

fn min(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    let mut nums = Vec::with_capacity(args.len());
    for (i, v) in args.iter().enumerate() {
        nums.push(as_number("min", i, v)?);
    }
    let result = nums.into_iter().reduce(|a, b| a.min(b)).unwrap();
    Ok(interp.short_term.register(Value::Number(result)))
}

pub static QUOT: BuiltinSpec = BuiltinSpec {
    name: "quot",
    min_arity: 2,
    max_arity: Some(2),
    signature: &[],
    pre_evaluate_args: true,
    func: quot,
};

pub static REM: BuiltinSpec = BuiltinSpec {
    name: "rem",
    min_arity: 2,
    max_arity: Some(2),
    signature: &[],
    pre_evaluate_args: true,
    func: rem,
};

pub static MOD: BuiltinSpec = BuiltinSpec {
    name: "mod",
    min_arity: 2,
    max_arity: Some(2),
    signature: &[],
    pre_evaluate_args: true,
    func: modulo,
};

pub static INC: BuiltinSpec = BuiltinSpec {
    name: "inc",
    min_arity: 1,
    max_arity: Some(1),
    signature: &[],
    pre_evaluate_args: true,
    func: inc,
};

pub static DEC: BuiltinSpec = BuiltinSpec {
    name: "dec",
    min_arity: 1,
    max_arity: Some(1),
    signature: &[],
    pre_evaluate_args: true,
    func: dec,
};

pub static MAX: BuiltinSpec = BuiltinSpec {
    name: "max",
    min_arity: 1,
    max_arity: None,
    signature: &[],
    pre_evaluate_args: true,
    func: max,
};

pub static MIN: BuiltinSpec = BuiltinSpec {
    name: "min",
    min_arity: 1,
    max_arity: None,
    signature: &[],
    pre_evaluate_args: true,
    func: min,
};

pub const ALL: &[&BuiltinSpec] = &[&QUOT, &REM, &MOD, &INC, &DEC, &MAX, &MIN];

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
    fn quot_truncates_toward_zero() {
        assert_eq!(*run("(quot -7 2)"), Value::Number(Number::Int(-3)));
    }

    #[test]
    fn rem_and_mod_agree_in_this_core() {
        assert_eq!(*run("(rem -7 2)"), *run("(mod -7 2)"));
    }

    #[test]
    fn inc_and_dec() {
        assert_eq!(*run("(inc 5)"), Value::Number(Number::Int(6)));
        assert_eq!(*run("(dec 5)"), Value::Number(Number::Int(4)));
    }

    #[test]
    fn max_and_min_pick_the_right_extreme() {
        assert_eq!(*run("(max 1 5 3)"), Value::Number(Number::Int(5)));
        assert_eq!(*run("(min 1 5 3)"), Value::Number(Number::Int(1)));
    }
}
