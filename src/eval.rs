// ABOUTME: Tree-walking evaluator: symbol lookup, builtin/closure dispatch, macroEval (§4.4-4.7)

use crate::arena::Arena;
use crate::error::LispError;
use crate::io::IoProxy;
use crate::scope::Scope;
use crate::value::{BuiltinSpec, ClosureData, Value};
use std::rc::Rc;

/// Owns the two Arenas, the root Scope, and the I/O proxy for one running program (§4.2, §6).
///
/// `short_term` holds everything the reader and evaluator build as scratch (parsed forms,
/// intermediate results); `long_term` holds whatever gets bound into a Scope, so that clearing
/// `short_term` between top-level forms never invalidates a live binding.
pub struct Interpreter {
    pub short_term: Arena,
    pub long_term: Arena,
    pub root_scope: Rc<Scope>,
    pub io: Box<dyn IoProxy>,
}

impl Interpreter {
    pub fn new(io: Box<dyn IoProxy>) -> Self {
        let root_scope = Scope::root();
        crate::builtins::install(&root_scope);
        Interpreter {
            short_term: Arena::new(),
            long_term: Arena::new(),
            root_scope,
            io,
        }
    }

    /// Reads and evaluates every top-level form in `source` in the root scope, returning the
    /// last result (`nil` if `source` held no forms). Clears the short-term arena between forms.
    pub fn eval_source(&mut self, source: &str) -> Result<Rc<Value>, LispError> {
        let mut reader = crate::reader::Reader::new(source);
        let root = self.root_scope.clone();
        let mut result = Rc::new(Value::Nil);
        while !reader.at_end_of_forms() {
            let form = reader.read_one()?;
            result = self.eval(&root, form)?;
            self.short_term.clear();
        }
        Ok(result)
    }

    /// Evaluates one already-parsed form in `scope` (§4.4).
    pub fn eval(&mut self, scope: &Rc<Scope>, v: Rc<Value>) -> Result<Rc<Value>, LispError> {
        match v.as_ref() {
            Value::Nil
            | Value::Boolean(_)
            | Value::Number(_)
            | Value::Str(_)
            | Value::Builtin(_)
            | Value::Closure(_) => Ok(v),

            Value::Symbol(name) => self.eval_symbol(scope, name),

            Value::Vector(items) => {
                let mut evaluated = Vec::with_capacity(items.len());
                for item in items.iter() {
                    evaluated.push(self.eval(scope, item.clone())?);
                }
                Ok(self.short_term.register(Value::Vector(Rc::new(evaluated))))
            }

            Value::Cons(..) => self.eval_cons(scope, &v),
        }
    }

    fn eval_symbol(&mut self, scope: &Rc<Scope>, name: &Rc<str>) -> Result<Rc<Value>, LispError> {
        let looked_up = scope
            .lookup(name)
            .ok_or_else(|| LispError::UnknownSymbol(name.to_string()))?;

        // A binding may be a deferred macro-argument form (`(macroEval . <unevaluated-arg>)`)
        // rather than a plain value; §9's re-expand-on-lookup semantics apply here.
        if let Value::Cons(l, r) = looked_up.as_ref() {
            if matches!(l.as_ref(), Value::Symbol(s) if s.as_ref() == "macroEval") {
                return if matches!(r.as_ref(), Value::Cons(..)) {
                    let once = self.eval(scope, r.clone())?;
                    self.eval(scope, once)
                } else {
                    Ok(r.clone())
                };
            }
        }

        Ok(looked_up)
    }

    fn eval_cons(&mut self, scope: &Rc<Scope>, v: &Rc<Value>) -> Result<Rc<Value>, LispError> {
        if Value::is_empty_list_sentinel(v) {
            return Ok(v.clone());
        }
        if !Value::is_list(v) {
            return Err(LispError::arg_shape(
                "eval",
                "an executable form must be a proper list",
            ));
        }

        let elements = Value::list_elements(v);
        let head = self.eval(scope, elements[0].clone())?;
        let raw_args = &elements[1..];

        match head.as_ref() {
            Value::Builtin(spec) => self.apply_builtin(spec, raw_args, scope),
            Value::Closure(closure) => self.apply_closure(closure, raw_args, scope),
            _ => Err(LispError::NotCallable(head.render())),
        }
    }

    fn apply_builtin(
        &mut self,
        spec: &'static BuiltinSpec,
        raw_args: &[Rc<Value>],
        scope: &Rc<Scope>,
    ) -> Result<Rc<Value>, LispError> {
        let over_max = spec.max_arity.is_some_and(|m| raw_args.len() > m);
        if raw_args.len() < spec.min_arity || over_max {
            return Err(LispError::arity_error(
                spec.name,
                arity_description(spec),
                raw_args.len(),
            ));
        }

        let args: Vec<Rc<Value>> = if spec.pre_evaluate_args {
            let mut evaluated = Vec::with_capacity(raw_args.len());
            for arg in raw_args {
                evaluated.push(self.eval(scope, arg.clone())?);
            }
            evaluated
        } else {
            raw_args.to_vec()
        };

        if !spec.signature.is_empty() {
            for (position, (arg, expected)) in args.iter().zip(spec.signature.iter()).enumerate()
            {
                if arg.type_tag() != *expected {
                    return Err(LispError::type_error(
                        spec.name,
                        type_tag_name(*expected),
                        arg,
                        position,
                    ));
                }
            }
        }

        (spec.func)(&args, scope, self)
    }

    fn apply_closure(
        &mut self,
        closure: &Rc<ClosureData>,
        raw_args: &[Rc<Value>],
        caller_scope: &Rc<Scope>,
    ) -> Result<Rc<Value>, LispError> {
        if closure.params.len() != raw_args.len() {
            return Err(LispError::arity_error(
                "closure",
                closure.params.len().to_string(),
                raw_args.len(),
            ));
        }

        // Deliberately a child of the *caller's* scope, not the closure's defining scope: free
        // variables were already baked into the body by value at construction time (see
        // `capture_state`), so all the body still needs from a scope is its own parameters.
        let call_scope = Scope::child(caller_scope);

        if closure.is_macro {
            for (param, arg) in closure.params.iter().zip(raw_args.iter()) {
                let sentinel = Rc::new(Value::Cons(
                    Rc::new(Value::Symbol("macroEval".into())),
                    arg.clone(),
                ));
                let sentinel = self.long_term.adopt(sentinel);
                call_scope.bind(param.clone(), sentinel);
            }
        } else {
            for (param, arg) in closure.params.iter().zip(raw_args.iter()) {
                let evaluated = self.eval(caller_scope, arg.clone())?;
                let rooted = self.long_term.deep_copy(&evaluated);
                call_scope.bind(param.clone(), rooted);
            }
        }

        self.eval(&call_scope, closure.body.clone())
    }

    /// Structurally substitutes every free symbol in `form` with its current value in
    /// `defining_scope`, leaving unresolved symbols (future parameters) untouched. This is how
    /// `fn`/`defn`/`defmacro` capture their closure: by value, at construction time (§4.7).
    pub fn capture_state(&self, form: &Rc<Value>, defining_scope: &Rc<Scope>) -> Rc<Value> {
        match form.as_ref() {
            Value::Cons(l, r) => {
                if Value::is_empty_list_sentinel(form) {
                    return form.clone();
                }
                let left = self.capture_state(l, defining_scope);
                let right = self.capture_state(r, defining_scope);
                Rc::new(Value::Cons(left, right))
            }
            Value::Vector(items) => {
                let captured: Vec<Rc<Value>> = items
                    .iter()
                    .map(|item| self.capture_state(item, defining_scope))
                    .collect();
                Rc::new(Value::Vector(Rc::new(captured)))
            }
            Value::Symbol(name) => defining_scope.lookup(name).unwrap_or_else(|| form.clone()),
            _ => form.clone(),
        }
    }

    /// Builds a closure (or macro, when `is_macro`) from a parameter form and one or more body
    /// forms, rooting the result in the long-term arena. Shared by `fn`, `defn`, `defmacro`.
    pub fn build_closure(
        &mut self,
        params_form: &Rc<Value>,
        body_forms: &[Rc<Value>],
        defining_scope: &Rc<Scope>,
        is_macro: bool,
    ) -> Result<Rc<Value>, LispError> {
        let params = parse_param_list(params_form)?;

        let body = if body_forms.len() == 1 {
            body_forms[0].clone()
        } else {
            let mut do_form = vec![Rc::new(Value::Symbol("do".into()))];
            do_form.extend_from_slice(body_forms);
            Value::list_from(&do_form)
        };

        let captured_body = self.capture_state(&body, defining_scope);
        let closure_data = Rc::new(ClosureData {
            body: captured_body,
            params,
            is_macro,
        });
        Ok(self.long_term.adopt(Rc::new(Value::Closure(closure_data))))
    }
}

/// Parses a `fn`/`defn`/`defmacro` parameter form: either a bare list of symbols `(a b)` or a
/// reader-produced vector `[a b]` (which arrives as `(vector a b)`).
pub fn parse_param_list(v: &Rc<Value>) -> Result<Vec<Rc<str>>, LispError> {
    if !Value::is_list(v) {
        return Err(LispError::arg_shape(
            "fn",
            "parameter list must be a list or vector of symbols",
        ));
    }
    let mut elements = Value::list_elements(v);
    if matches!(elements.first().map(|e| e.as_ref()), Some(Value::Symbol(s)) if s.as_ref() == "vector")
    {
        elements.remove(0);
    }
    elements
        .into_iter()
        .map(|e| match e.as_ref() {
            Value::Symbol(s) => Ok(s.clone()),
            other => Err(LispError::arg_shape(
                "fn",
                format!("parameter must be a symbol, got {}", other.type_name()),
            )),
        })
        .collect()
}

fn arity_description(spec: &BuiltinSpec) -> String {
    match spec.max_arity {
        Some(max) if max == spec.min_arity => spec.min_arity.to_string(),
        Some(max) => format!("{}-{}", spec.min_arity, max),
        None => format!("at least {}", spec.min_arity),
    }
}

fn type_tag_name(tag: crate::value::TypeTag) -> &'static str {
    use crate::value::TypeTag::*;
    match tag {
        Nil => "nil",
        Boolean => "boolean",
        Number => "number",
        String => "string",
        Symbol => "symbol",
        Cons => "cons",
        Vector => "vector",
        Builtin => "builtin",
        Closure => "closure",
    }
}
