// ABOUTME: CLI driver — runs a script, then optionally drops into a REPL (§6)

use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use tiny_clj::eval::Interpreter;
use tiny_clj::io::StdIoProxy;
use tiny_clj::value::Value;

/// A small Clojure-flavored Lisp interpreter
#[derive(Parser, Debug)]
#[command(name = "tiny-clj")]
#[command(version)]
#[command(about = "A tree-walking interpreter for a small Clojure-flavored Lisp dialect")]
struct CliArgs {
    /// Script file to execute (omit to start the REPL)
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,

    /// Drop into the REPL after running the script
    #[arg(short = 'r', long = "repl")]
    repl: bool,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    let mut interp = Interpreter::new(Box::new(StdIoProxy::new()));

    if let Some(path) = &args.script {
        if let Err(code) = run_script(path, &mut interp) {
            return code;
        }
        if !args.repl {
            return ExitCode::SUCCESS;
        }
    }

    run_repl(&mut interp)
}

fn run_script(path: &PathBuf, interp: &mut Interpreter) -> Result<(), ExitCode> {
    let source = std::fs::read_to_string(path).map_err(|e| {
        eprintln!("cannot read script file {}: {}", path.display(), e);
        ExitCode::FAILURE
    })?;

    interp.eval_source(&source).map_err(|e| {
        eprintln!("{}", e.render_line());
        ExitCode::FAILURE
    })?;

    Ok(())
}

fn run_repl(interp: &mut Interpreter) -> ExitCode {
    let config = Config::builder().auto_add_history(true).build();
    let mut rl = match Editor::<(), DefaultHistory>::with_config(config) {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("failed to initialize the REPL: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let history_file = ".tiny_clj_history";
    let _ = rl.load_history(history_file);
    let root_scope = interp.root_scope.clone();

    loop {
        match rl.readline("> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                match read_and_eval(interp, &root_scope, &line) {
                    Ok(result) => {
                        if *result != Value::Nil {
                            println!("{}", result.render_roundtrip());
                        }
                    }
                    Err(message) => eprintln!("{}", message),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}", err);
                break;
            }
        }
    }

    let _ = rl.save_history(history_file);
    ExitCode::SUCCESS
}

fn read_and_eval(
    interp: &mut Interpreter,
    scope: &Rc<tiny_clj::scope::Scope>,
    line: &str,
) -> Result<Rc<Value>, String> {
    let form = tiny_clj::reader::read_one(line).map_err(|e| e.render_line())?;
    interp
        .eval(scope, form)
        .map_err(|e| e.render_line())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_args_accept_a_script_path_and_repl_flag() {
        let args = CliArgs::parse_from(["tiny-clj", "script.lisp", "-r"]);
        assert_eq!(args.script, Some(PathBuf::from("script.lisp")));
        assert!(args.repl);
    }

    #[test]
    fn cli_args_default_to_repl_mode() {
        let args = CliArgs::parse_from(["tiny-clj"]);
        assert!(args.script.is_none());
        assert!(!args.repl);
    }
}
