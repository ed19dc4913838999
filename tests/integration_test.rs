// ABOUTME: Black-box tests driving Interpreter::eval_source over complete program strings

use tiny_clj::eval::Interpreter;
use tiny_clj::io::BufferIoProxy;
use tiny_clj::number::Number;
use tiny_clj::value::Value;

fn run(source: &str) -> Value {
    let mut interp = Interpreter::new(Box::new(BufferIoProxy::new()));
    (*interp.eval_source(source).unwrap()).clone()
}

fn run_err(source: &str) -> String {
    let mut interp = Interpreter::new(Box::new(BufferIoProxy::new()));
    interp.eval_source(source).unwrap_err().render_line()
}

#[test]
fn recursive_factorial_over_several_inputs() {
    let code = r#"
        (defn factorial [n]
          (if (<= n 1) 1 (* n (factorial (- n 1)))))
    "#;
    let mut interp = Interpreter::new(Box::new(BufferIoProxy::new()));
    interp.eval_source(code).unwrap();
    let scope = interp.root_scope.clone();
    for (n, expected) in [(0, 1), (1, 1), (5, 120), (10, 3628800)] {
        let form = tiny_clj::reader::read_one(&format!("(factorial {})", n)).unwrap();
        let result = interp.eval(&scope, form).unwrap();
        assert_eq!(*result, Value::Number(Number::Int(expected)));
    }
}

#[test]
fn mutual_recursion_through_two_defns_sharing_a_scope() {
    let code = r#"
        (do
          (defn my-even [n] (if (= n 0) true (my-odd (- n 1))))
          (defn my-odd [n] (if (= n 0) false (my-even (- n 1))))
          (my-even 10))
    "#;
    assert_eq!(run(code), Value::Boolean(true));
}

#[test]
fn let_bindings_are_sequential_and_shadow_the_enclosing_scope() {
    assert_eq!(
        run("(do (def x 1) (let [x (+ x 10) y (* x 2)] (+ x y)))"),
        Value::Number(Number::Int(33))
    );
}

#[test]
fn arithmetic_widens_to_float_only_when_needed() {
    assert_eq!(run("(+ 1 2 3)"), Value::Number(Number::Int(6)));
    assert_eq!(run("(+ 1 2.0)"), Value::Number(Number::Float(3.0)));
    assert_eq!(run("(/ 10 4)"), Value::Number(Number::Float(2.5)));
}

#[test]
fn truthiness_treats_only_nil_false_and_zero_as_false() {
    assert_eq!(run("(if 0 1 2)"), Value::Number(Number::Int(2)));
    assert_eq!(run(r#"(if "" 1 2)"#), Value::Number(Number::Int(1)));
    assert_eq!(run("(if (list) 1 2)"), Value::Number(Number::Int(1)));
}

#[test]
fn a_macro_is_not_callable_as_a_plain_function_argument_would_be() {
    let code = r#"
        (do
          (defmacro my-if [test then else] (cond test then true else))
          (my-if false 1 2))
    "#;
    assert_eq!(run(code), Value::Number(Number::Int(2)));
}

#[test]
fn macro_never_evaluates_an_argument_the_expansion_does_not_reach() {
    let code = r#"
        (do
          (defmacro unless [test body] (if test nil body))
          (unless true (/ 1 0)))
    "#;
    assert_eq!(run(code), Value::Nil);
}

#[test]
fn not_eq_is_the_exact_negation_of_eq() {
    assert_eq!(run("(not= 1 1)"), Value::Boolean(false));
    assert_eq!(run("(not= 1 2)"), Value::Boolean(true));
    assert_eq!(run("(= 1 1 1)"), Value::Boolean(true));
    assert_eq!(run("(= 1 1 2)"), Value::Boolean(false));
}

#[test]
fn nth_out_of_bounds_without_a_default_is_an_error() {
    let message = run_err("(nth (list 1 2) 5)");
    assert!(message.contains("out of bounds"), "{}", message);
}

#[test]
fn ns_unmap_removes_a_binding_and_is_idempotent() {
    let code = r#"
        (do
          (def x 5)
          (ns-unmap x)
          (ns-unmap x))
    "#;
    assert_eq!(run(code), Value::Nil);
    let message = run_err("(do (def x 5) (ns-unmap x) x)");
    assert!(message.contains("unknown symbol"), "{}", message);
}

#[test]
fn higher_order_functions_close_over_their_defining_scope_by_value() {
    let code = r#"
        (do
          (defn make-multiplier [factor] (fn [x] (* x factor)))
          (def times3 (make-multiplier 3))
          (def times10 (make-multiplier 10))
          (+ (times3 4) (times10 4)))
    "#;
    assert_eq!(run(code), Value::Number(Number::Int(52)));
}

#[test]
fn string_helpers_compose() {
    assert_eq!(
        run(r#"(str "count: " (count (list 1 2 3)))"#),
        Value::Str("count: 3".into())
    );
    assert_eq!(run(r#"(subs "hello world" 6)"#), Value::Str("world".into()));
}

#[test]
fn unknown_symbol_reports_its_name() {
    let message = run_err("(+ 1 not-a-thing)");
    assert!(message.contains("not-a-thing"), "{}", message);
}

#[test]
fn quoted_data_round_trips_through_eval() {
    assert_eq!(
        run("(eval (quote (+ 1 2 3)))"),
        Value::Number(Number::Int(6))
    );
}
