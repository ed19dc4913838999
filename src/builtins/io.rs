// ABOUTME: print, println, print-str, println-str, read-line, read-string (§4.9, §6)

use crate::error::LispError;
use crate::eval::Interpreter;
use crate::scope::Scope;
use crate::value::{BuiltinSpec, Value};
use std::rc::Rc;

fn joined(args: &[Rc<Value>]) -> String {
    args.iter()
        .map(|v| v.render())
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_fn(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    interp.io.write_out(&joined(args));
    Ok(interp.short_term.register(Value::Nil))
}

fn println_fn(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    interp.io.write_out(&joined(args));
    interp.io.write_out("\n");
    Ok(interp.short_term.register(Value::Nil))
}

fn print_str_fn(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    Ok(interp.short_term.register(Value::Str(joined(args).into())))
}

fn println_str_fn(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    let mut s = joined(args);
    s.push('\n');
    Ok(interp.short_term.register(Value::Str(s.into())))
}

fn read_line_fn(_args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    match interp.io.read_line() {
        Some(line) => Ok(interp.short_term.register(Value::Str(line.into()))),
        None => Ok(interp.short_term.register(Value::Nil)),
    }
}

fn read_string_fn(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    let text = match args[0].as_ref() {
        Value::Str(s) => s.clone(),
        other => return Err(LispError::type_error("read-string", "string", other, 0)),
    };
    let parsed = crate::reader::read_one(&text)?;
    Ok(interp.short_term.adopt(parsed))
}

pub static PRINT: BuiltinSpec = BuiltinSpec {
    name: "print",
    min_arity: 0,
    max_arity: None,
    signature: &[],
    pre_evaluate_args: true,
    func: print_fn,
};

pub static PRINTLN: BuiltinSpec = BuiltinSpec {
    name: "println",
    min_arity: 0,
    max_arity: None,
    signature: &[],
    pre_evaluate_args: true,
    func: println_fn,
};

pub static PRINT_STR: BuiltinSpec = BuiltinSpec {
    name: "print-str",
    min_arity: 0,
    max_arity: None,
    signature: &[],
    pre_evaluate_args: true,
    func: print_str_fn,
};

pub static PRINTLN_STR: BuiltinSpec = BuiltinSpec {
    name: "println-str",
    min_arity: 0,
    max_arity: None,
    signature: &[],
    pre_evaluate_args: true,
    func: println_str_fn,
};

pub static READ_LINE: BuiltinSpec = BuiltinSpec {
    name: "read-line",
    min_arity: 0,
    max_arity: Some(0),
    signature: &[],
    pre_evaluate_args: true,
    func: read_line_fn,
};

pub static READ_STRING: BuiltinSpec = BuiltinSpec {
    name: "read-string",
    min_arity: 1,
    max_arity: Some(1),
    signature: &[],
    pre_evaluate_args: true,
    func: read_string_fn,
};

pub const ALL: &[&BuiltinSpec] = &[
    &PRINT,
    &PRINTLN,
    &PRINT_STR,
    &PRINTLN_STR,
    &READ_LINE,
    &READ_STRING,
];
