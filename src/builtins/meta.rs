// ABOUTME: eval, str, count, compare, subs — operations that inspect or re-enter evaluation (§4.9)

use crate::error::LispError;
use crate::eval::Interpreter;
use crate::number::Number;
use crate::scope::Scope;
use crate::value::{BuiltinSpec, Value};
use std::cmp::Ordering;
use std::rc::Rc;

fn eval_builtin(args: &[Rc<Value>], scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    interp.eval(scope, args[0].clone())
}

fn str_builtin(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    let joined: String = args.iter().map(|v| v.render()).collect();
    Ok(interp.short_term.register(Value::Str(joined.into())))
}

fn count(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    let coll = &args[0];
    let n = match coll.as_ref() {
        Value::Str(s) => s.chars().count(),
        Value::Vector(items) => items.len(),
        Value::Nil => 0,
        Value::Cons(..) if Value::is_list(coll) => Value::list_elements(coll).len(),
        _ => return Err(LispError::type_error("count", "string, list, or vector", coll, 0)),
    };
    Ok(interp.short_term.register(Value::Number(Number::Int(n as i64))))
}

fn compare(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    let ordering = match (args[0].as_ref(), args[1].as_ref()) {
        (Value::Number(a), Value::Number(b)) => a.compare(*b),
        (Value::Str(a), Value::Str(b)) => a.cmp(b),
        _ => return Err(LispError::arg_shape("compare", "both arguments must be numbers or both strings")),
    };
    let n = match ordering {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    };
    Ok(interp.short_term.register(Value::Number(Number::Int(n))))
}

fn subs(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    let s = match args[0].as_ref() {
        Value::Str(s) => s,
        other => return Err(LispError::type_error("subs", "string", other, 0)),
    };
    let chars: Vec<char> = s.chars().collect();
    let start = as_index("subs", &args[1], 1)?;
    let end = match args.get(2) {
        Some(v) => as_index("subs", v, 2)?,
        None => chars.len(),
    };
    if start > end || end > chars.len() {
        return Err(LispError::arg_shape(
            "subs",
            format!("range {}..{} is out of bounds for a string of length {}", start, end, chars.len()),
        ));
    }
    let sliced: String = chars[start..end].iter().collect();
    Ok(interp.short_term.register(Value::Str(sliced.into())))
}

fn as_index(name: &str, v: &Rc<Value>, position: usize) -> Result<usize, LispError> {
    match v.as_ref() {
        Value::Number(Number::Int(i)) if *i >= 0 => Ok(*i as usize),
        _ => Err(LispError::type_error(name, "non-negative integer", v, position)),
    }
}

pub static EVAL: BuiltinSpec = BuiltinSpec {
    name: "eval",
    min_arity: 1,
    max_arity: Some(1),
    signature: &[],
    pre_evaluate_args: true,
    func: eval_builtin,
};

pub static STR: BuiltinSpec = BuiltinSpec {
    name: "str",
    min_arity: 0,
    max_arity: None,
    signature: &[],
    pre_evaluate_args: true,
    func: str_builtin,
};

pub static COUNT: BuiltinSpec = BuiltinSpec {
    name: "count",
    min_arity: 1,
    max_arity: Some(1),
    signature: &[],
    pre_evaluate_args: true,
    func: count,
};

pub static COMPARE: BuiltinSpec = BuiltinSpec {
    name: "compare",
    min_arity: 2,
    max_arity: Some(2),
    signature: &[],
    pre_evaluate_args: true,
    func: compare,
};

pub static SUBS: BuiltinSpec = BuiltinSpec {
    name: "subs",
    min_arity: 2,
    max_arity: Some(3),
    signature: &[],
    pre_evaluate_args: true,
    func: subs,
};

pub const ALL: &[&BuiltinSpec] = &[&EVAL, &STR, &COUNT, &COMPARE, &SUBS];

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
    fn str_concatenates_human_renderings() {
        assert_eq!(*run(r#"(str "a" 1 true)"#), Value::Str("a1true".into()));
    }

    #[test]
    fn count_of_a_list_and_a_string() {
        assert_eq!(*run("(count (list 1 2 3))"), Value::Number(Number::Int(3)));
        assert_eq!(*run(r#"(count "abc")"#), Value::Number(Number::Int(3)));
    }

    #[test]
    fn compare_numbers() {
        assert_eq!(*run("(compare 1 2)"), Value::Number(Number::Int(-1)));
        assert_eq!(*run("(compare 2 2)"), Value::Number(Number::Int(0)));
    }

    #[test]
    fn subs_slices_a_string() {
        assert_eq!(*run(r#"(subs "hello" 1 3)"#), Value::Str("el".into()));
    }

    #[test]
    fn eval_evaluates_a_quoted_form() {
        assert_eq!(*run("(eval (quote (+ 1 2)))"), Value::Number(Number::Int(3)));
    }
}
