// ABOUTME: load-file, load-string, slurp, spit — unsandboxed filesystem access (§4.9)

use crate::error::LispError;
use crate::eval::Interpreter;
use crate::scope::Scope;
use crate::value::{BuiltinSpec, Value};
use std::fs;
use std::rc::Rc;

fn as_string<'a>(name: &str, position: usize, v: &'a Rc<Value>) -> Result<&'a Rc<str>, LispError> {
    match v.as_ref() {
        Value::Str(s) => Ok(s),
        other => Err(LispError::type_error(name, "string", other, position)),
    }
}

fn load_file(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    let path = as_string("load-file", 0, &args[0])?;
    let source = fs::read_to_string(path.as_ref())
        .map_err(|e| LispError::arg_shape("load-file", format!("could not read {}: {}", path, e)))?;
    interp.eval_source(&source)
}

fn load_string(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    let source = as_string("load-string", 0, &args[0])?.clone();
    interp.eval_source(&source)
}

fn slurp(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    let path = as_string("slurp", 0, &args[0])?;
    let contents = fs::read_to_string(path.as_ref())
        .map_err(|e| LispError::arg_shape("slurp", format!("could not read {}: {}", path, e)))?;
    Ok(interp.short_term.register(Value::Str(contents.into())))
}

fn spit(args: &[Rc<Value>], _scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    let path = as_string("spit", 0, &args[0])?;
    let contents = as_string("spit", 1, &args[1])?;
    fs::write(path.as_ref(), contents.as_ref())
        .map_err(|e| LispError::arg_shape("spit", format!("could not write {}: {}", path, e)))?;
    Ok(interp.short_term.register(Value::Nil))
}

pub static LOAD_FILE: BuiltinSpec = BuiltinSpec {
    name: "load-file",
    min_arity: 1,
    max_arity: Some(1),
    signature: &[],
    pre_evaluate_args: true,
    func: load_file,
};

pub static LOAD_STRING: BuiltinSpec = BuiltinSpec {
    name: "load-string",
    min_arity: 1,
    max_arity: Some(1),
    signature: &[],
    pre_evaluate_args: true,
    func: load_string,
};

pub static SLURP: BuiltinSpec = BuiltinSpec {
    name: "slurp",
    min_arity: 1,
    max_arity: Some(1),
    signature: &[],
    pre_evaluate_args: true,
    func: slurp,
};

pub static SPIT: BuiltinSpec = BuiltinSpec {
    name: "spit",
    min_arity: 2,
    max_arity: Some(2),
    signature: &[],
    pre_evaluate_args: true,
    func: spit,
};

pub const ALL: &[&BuiltinSpec] = &[&LOAD_FILE, &LOAD_STRING, &SLURP, &SPIT];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::BufferIoProxy;
    use crate::number::Number;
    use std::env;
    use std::fs;

    fn scratch_path(name: &str) -> std::path::PathBuf {
        let mut path = env::temp_dir();
        path.push(format!("lisp-core-test-{}-{}", std::process::id(), name));
        path
    }

    #[test]
    fn spit_then_slurp_round_trips_through_the_filesystem() {
        let path = scratch_path("spit-slurp");
        let path_str = path.to_str().unwrap();
        let mut interp = Interpreter::new(Box::new(BufferIoProxy::new()));
        interp
            .eval_source(&format!(r#"(spit "{}" "hello")"#, path_str))
            .unwrap();
        let result = interp
            .eval_source(&format!(r#"(slurp "{}")"#, path_str))
            .unwrap();
        assert_eq!(*result, Value::Str("hello".into()));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn load_string_evaluates_its_contents() {
        let mut interp = Interpreter::new(Box::new(BufferIoProxy::new()));
        let result = interp
            .eval_source(r#"(load-string "(+ 1 2)")"#)
            .unwrap();
        assert_eq!(*result, Value::Number(Number::Int(3)));
    }

    #[test]
    fn load_file_reads_and_evaluates_every_form() {
        let path = scratch_path("load-file");
        fs::write(&path, "(def a 1) (def b 2) (+ a b)").unwrap();
        let mut interp = Interpreter::new(Box::new(BufferIoProxy::new()));
        let result = interp
            .eval_source(&format!(r#"(load-file "{}")"#, path.to_str().unwrap()))
            .unwrap();
        assert_eq!(*result, Value::Number(Number::Int(3)));
        let _ = fs::remove_file(path);
    }
}
