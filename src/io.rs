// ABOUTME: Pluggable I/O surface so the interpreter can run headless, in a REPL, or embedded (§6)

use std::cell::RefCell;
use std::io::{self, BufRead, Write};

/// The only channel through which the evaluator touches the outside world. A CLI driver wires
/// up `StdIoProxy`; an embedder can swap in `BufferIoProxy` or its own implementation.
pub trait IoProxy {
    fn write_out(&mut self, text: &str);
    fn write_err(&mut self, text: &str);
    /// Reads one line (without its trailing newline). `None` at end of input.
    fn read_line(&mut self) -> Option<String>;
}

#[derive(Default)]
pub struct StdIoProxy {
    stdin: io::Stdin,
}

impl StdIoProxy {
    pub fn new() -> Self {
        StdIoProxy { stdin: io::stdin() }
    }
}

impl IoProxy for StdIoProxy {
    fn write_out(&mut self, text: &str) {
        print!("{}", text);
        let _ = io::stdout().flush();
    }

    fn write_err(&mut self, text: &str) {
        eprint!("{}", text);
        let _ = io::stderr().flush();
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.stdin.lock().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                if line.ends_with('\n') {
                    line.pop();
                    if line.ends_with('\r') {
                        line.pop();
                    }
                }
                Some(line)
            }
            Err(_) => None,
        }
    }
}

/// In-memory proxy for embedding and tests: captured output, scripted input.
#[derive(Default)]
pub struct BufferIoProxy {
    pub out: RefCell<String>,
    pub err: RefCell<String>,
    pub input: RefCell<Vec<String>>,
}

impl BufferIoProxy {
    pub fn new() -> Self {
        BufferIoProxy::default()
    }

    /// Queues lines to be handed out in order by subsequent `read_line` calls.
    pub fn feed(&self, lines: impl IntoIterator<Item = String>) {
        let mut input = self.input.borrow_mut();
        input.extend(lines);
    }
}

impl IoProxy for BufferIoProxy {
    fn write_out(&mut self, text: &str) {
        self.out.borrow_mut().push_str(text);
    }

    fn write_err(&mut self, text: &str) {
        self.err.borrow_mut().push_str(text);
    }

    fn read_line(&mut self) -> Option<String> {
        let mut input = self.input.borrow_mut();
        if input.is_empty() {
            None
        } else {
            Some(input.remove(0))
        }
    }
}
