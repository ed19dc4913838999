// ABOUTME: Special forms, implemented as builtins with pre_evaluate_args=false (§4.6)

use crate::error::LispError;
use crate::eval::Interpreter;
use crate::scope::Scope;
use crate::value::{BuiltinSpec, Value};
use std::rc::Rc;

fn truthy_eval(interp: &mut Interpreter, scope: &Rc<Scope>, form: &Rc<Value>) -> Result<bool, LispError> {
    Ok(interp.eval(scope, form.clone())?.truthy())
}

fn if_form(args: &[Rc<Value>], scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    if truthy_eval(interp, scope, &args[0])? {
        interp.eval(scope, args[1].clone())
    } else if let Some(else_branch) = args.get(2) {
        interp.eval(scope, else_branch.clone())
    } else {
        Ok(interp.short_term.register(Value::Nil))
    }
}

fn cond_form(args: &[Rc<Value>], scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    if args.len() % 2 != 0 {
        return Err(LispError::arg_shape("cond", "expected an even number of test/expr forms"));
    }
    for pair in args.chunks(2) {
        if truthy_eval(interp, scope, &pair[0])? {
            return interp.eval(scope, pair[1].clone());
        }
    }
    Ok(interp.short_term.register(Value::Nil))
}

fn do_form(args: &[Rc<Value>], scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    let child = Scope::child(scope);
    let mut result = interp.short_term.register(Value::Nil);
    for form in args {
        result = interp.eval(&child, form.clone())?;
    }
    Ok(result)
}

fn let_form(args: &[Rc<Value>], scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    let bindings_form = &args[0];
    if !Value::is_list(bindings_form) {
        return Err(LispError::arg_shape("let", "bindings must be a vector"));
    }
    let mut elements = Value::list_elements(bindings_form);
    if matches!(elements.first().map(|e| e.as_ref()), Some(Value::Symbol(s)) if s.as_ref() == "vector")
    {
        elements.remove(0);
    }
    if elements.len() % 2 != 0 {
        return Err(LispError::arg_shape("let", "bindings must contain an even number of forms"));
    }

    let let_scope = Scope::child(scope);
    for pair in elements.chunks(2) {
        let name = match pair[0].as_ref() {
            Value::Symbol(s) => s.clone(),
            _ => return Err(LispError::arg_shape("let", "binding name must be a symbol")),
        };
        let value = interp.eval(&let_scope, pair[1].clone())?;
        let rooted = interp.long_term.deep_copy(&value);
        let_scope.bind(name, rooted);
    }

    let mut result = interp.short_term.register(Value::Nil);
    for form in &args[1..] {
        result = interp.eval(&let_scope, form.clone())?;
    }
    Ok(result)
}

fn def_form(args: &[Rc<Value>], scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    let name = match args[0].as_ref() {
        Value::Symbol(s) => s.clone(),
        other => return Err(LispError::type_error("def", "symbol", other, 0)),
    };
    let value = interp.eval(scope, args[1].clone())?;
    let rooted = interp.long_term.deep_copy(&value);
    scope.bind(name, rooted);
    Ok(interp.short_term.register(Value::Nil))
}

fn fn_form(args: &[Rc<Value>], scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    interp.build_closure(&args[0], &args[1..], scope, false)
}

fn defn_form(args: &[Rc<Value>], scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    let name = match args[0].as_ref() {
        Value::Symbol(s) => s.clone(),
        other => return Err(LispError::type_error("defn", "symbol", other, 0)),
    };
    let closure = interp.build_closure(&args[1], &args[2..], scope, false)?;
    scope.bind(name, closure);
    Ok(interp.short_term.register(Value::Nil))
}

fn defmacro_form(args: &[Rc<Value>], scope: &Rc<Scope>, interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    let name = match args[0].as_ref() {
        Value::Symbol(s) => s.clone(),
        other => return Err(LispError::type_error("defmacro", "symbol", other, 0)),
    };
    let closure = interp.build_closure(&args[1], &args[2..], scope, true)?;
    scope.bind(name, closure);
    Ok(interp.short_term.register(Value::Nil))
}

fn quote_form(args: &[Rc<Value>], _scope: &Rc<Scope>, _interp: &mut Interpreter) -> Result<Rc<Value>, LispError> {
    Ok(args[0].clone())
}

pub static IF: BuiltinSpec = BuiltinSpec {
    name: "if",
    min_arity: 2,
    max_arity: Some(3),
    signature: &[],
    pre_evaluate_args: false,
    func: if_form,
};

pub static COND: BuiltinSpec = BuiltinSpec {
    name: "cond",
    min_arity: 0,
    max_arity: None,
    signature: &[],
    pre_evaluate_args: false,
    func: cond_form,
};

pub static DO: BuiltinSpec = BuiltinSpec {
    name: "do",
    min_arity: 0,
    max_arity: None,
    signature: &[],
    pre_evaluate_args: false,
    func: do_form,
};

pub static LET: BuiltinSpec = BuiltinSpec {
    name: "let",
    min_arity: 1,
    max_arity: None,
    signature: &[],
    pre_evaluate_args: false,
    func: let_form,
};

pub static DEF: BuiltinSpec = BuiltinSpec {
    name: "def",
    min_arity: 2,
    max_arity: Some(2),
    signature: &[],
    pre_evaluate_args: false,
    func: def_form,
};

pub static FN: BuiltinSpec = BuiltinSpec {
    name: "fn",
    min_arity: 2,
    max_arity: None,
    signature: &[],
    pre_evaluate_args: false,
    func: fn_form,
};

pub static DEFN: BuiltinSpec = BuiltinSpec {
    name: "defn",
    min_arity: 3,
    max_arity: None,
    signature: &[],
    pre_evaluate_args: false,
    func: defn_form,
};

pub static DEFMACRO: BuiltinSpec = BuiltinSpec {
    name: "defmacro",
    min_arity: 3,
    max_arity: None,
    signature: &[],
    pre_evaluate_args: false,
    func: defmacro_form,
};

pub static QUOTE: BuiltinSpec = BuiltinSpec {
    name: "quote",
    min_arity: 1,
    max_arity: Some(1),
    signature: &[],
    pre_evaluate_args: false,
    func: quote_form,
};

pub const ALL: &[&BuiltinSpec] = &[
    &IF, &COND, &DO, &LET, &DEF, &FN, &DEFN, &DEFMACRO, &QUOTE,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::BufferIoProxy;
    use crate::number::Number;

    fn run(src: &str) -> Rc<Value> {
        Interpreter::new(Box::new(BufferIoProxy::new()))
            .eval_source(src)
            .unwrap()
    }

    #[test]
    fn if_without_else_is_nil_on_false() {
        assert_eq!(*run("(if false 1)"), Value::Nil);
    }

    #[test]
    fn cond_returns_first_matching_branch() {
        assert_eq!(
            *run("(cond false 1 true 2 true 3)"),
            Value::Number(Number::Int(2))
        );
    }

    #[test]
    fn cond_with_no_match_is_nil() {
        assert_eq!(*run("(cond false 1)"), Value::Nil);
    }

    #[test]
    fn def_returns_nil_and_binds() {
        assert_eq!(*run("(do (def x 5) x)"), Value::Number(Number::Int(5)));
    }
}
