// ABOUTME: Cursor-based lexer/parser turning source text into a Value graph (§4.1)
//
// Grounded on the original TinyClojure `ParserState` (examples/original_source): a cursor over
// the input with `peekChar`/`peekPeekChar` one- and two-byte lookahead, rather than the
// teacher's `nom` combinators — tracking byte position for `ReaderRanOut`/`ReaderBadForm`
// context falls out naturally from an explicit cursor and is awkward to recover from combinator
// backtracking.

use crate::error::LispError;
use crate::value::Value;
use std::rc::Rc;

const CONTEXT_WINDOW: usize = 24;

/// Holds the text buffer and cursor; `read_one`/`read_all` are the public entry points.
pub struct Reader {
    chars: Vec<char>,
    pos: usize,
}

impl Reader {
    pub fn new(input: &str) -> Self {
        Reader {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.current();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn context_at(&self, from: usize) -> String {
        let end = (from + CONTEXT_WINDOW).min(self.chars.len());
        self.chars[from..end].iter().collect()
    }

    fn ran_out(&self, from: usize) -> LispError {
        LispError::ReaderRanOut {
            position: from,
            context: self.context_at(from),
        }
    }

    fn bad_form(&self, from: usize) -> LispError {
        LispError::ReaderBadForm {
            position: from,
            context: self.context_at(from),
        }
    }

    fn is_separator(c: char) -> bool {
        matches!(c, ' ' | '\t' | ',' | '\r' | '\n')
    }

    fn is_excluded(c: char) -> bool {
        c.is_control()
            || Self::is_separator(c)
            || matches!(c, '(' | ')' | '[' | ']' | '{' | '}' | '\'' | ';' | '`' | '"')
    }

    fn skip_separators(&mut self) {
        while let Some(c) = self.current() {
            if Self::is_separator(c) {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Reads exactly one form, skipping leading separators, line comments, and `#;` form
    /// comments along the way.
    pub fn read_one(&mut self) -> Result<Rc<Value>, LispError> {
        loop {
            self.skip_separators();
            if self.at_end() {
                return Err(self.ran_out(self.pos));
            }

            let c = self.current().unwrap();

            if c == ';' {
                // Line comment: discard to end of line, then read the following form.
                while let Some(c) = self.current() {
                    if c == '\n' {
                        break;
                    }
                    self.advance();
                }
                continue;
            }

            if c == '#' && self.peek() == Some(';') {
                self.advance();
                self.advance();
                self.read_one()?; // discard the commented-out form
                continue;
            }

            return self.read_form();
        }
    }

    /// Reads forms until the cursor is exhausted.
    pub fn read_all(&mut self) -> Result<Vec<Rc<Value>>, LispError> {
        let mut forms = Vec::new();
        while !self.at_end_of_forms() {
            forms.push(self.read_one()?);
        }
        Ok(forms)
    }

    /// True iff nothing but trivia (whitespace, line comments) remains — distinguishes a clean
    /// end of input between forms from running out of input partway through one, which
    /// `read_one` reports as `ReaderRanOut` instead.
    pub fn at_end_of_forms(&mut self) -> bool {
        self.skip_comments_only();
        self.at_end()
    }

    fn skip_comments_only(&mut self) {
        loop {
            self.skip_separators();
            if self.current() == Some(';') {
                while let Some(c) = self.current() {
                    if c == '\n' {
                        break;
                    }
                    self.advance();
                }
                continue;
            }
            break;
        }
    }

    fn read_form(&mut self) -> Result<Rc<Value>, LispError> {
        let start = self.pos;
        let c = self.current().ok_or_else(|| self.ran_out(start))?;

        match c {
            '"' => {
                self.advance();
                self.read_string_body(start)
            }
            '#' if self.peek() == Some('"') => {
                self.advance();
                self.advance();
                self.read_string_body(start)
            }
            '#' if self.peek() == Some('{') => {
                self.advance();
                self.advance();
                self.read_delimited('}', Some("hash-set"), start)
            }
            '#' if self.peek() == Some('(') => Err(self.bad_form(start)),
            '(' => {
                self.advance();
                self.read_list(start)
            }
            '[' => {
                self.advance();
                self.read_delimited(']', Some("vector"), start)
            }
            '{' => {
                self.advance();
                self.read_delimited('}', None, start)
            }
            ')' | ']' | '}' => Err(self.bad_form(start)),
            '\'' | '`' => {
                self.advance();
                let quoted = self.read_one()?;
                Ok(Value::list_from(&[
                    Rc::new(Value::Symbol("quote".into())),
                    quoted,
                ]))
            }
            _ => self.read_atom(start),
        }
    }

    fn read_string_body(&mut self, start: usize) -> Result<Rc<Value>, LispError> {
        let mut out = String::new();
        loop {
            match self.advance() {
                None => return Err(self.ran_out(start)),
                Some('"') => break,
                Some('\\') => match self.advance() {
                    None => return Err(self.ran_out(start)),
                    Some('n') => out.push('\n'),
                    Some('r') => out.push('\r'),
                    Some('t') => out.push('\t'),
                    Some(other) => out.push(other),
                },
                Some(c) => out.push(c),
            }
        }
        Ok(Rc::new(Value::Str(out.into())))
    }

    fn read_list(&mut self, start: usize) -> Result<Rc<Value>, LispError> {
        let mut elements = Vec::new();
        loop {
            self.skip_separators();
            match self.current() {
                None => return Err(self.ran_out(start)),
                Some(')') => {
                    self.advance();
                    break;
                }
                Some(';') => {
                    while let Some(c) = self.current() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => elements.push(self.read_one()?),
            }
        }
        if elements.is_empty() {
            Ok(Value::empty_list())
        } else {
            Ok(Value::list_from(&elements))
        }
    }

    fn read_delimited(
        &mut self,
        close: char,
        leading_symbol: Option<&str>,
        start: usize,
    ) -> Result<Rc<Value>, LispError> {
        let mut elements = Vec::new();
        loop {
            self.skip_separators();
            match self.current() {
                None => return Err(self.ran_out(start)),
                Some(c) if c == close => {
                    self.advance();
                    break;
                }
                Some(';') => {
                    while let Some(c) = self.current() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => elements.push(self.read_one()?),
            }
        }
        if let Some(tag) = leading_symbol {
            let mut all = Vec::with_capacity(elements.len() + 1);
            all.push(Rc::new(Value::Symbol(tag.into())));
            all.extend(elements);
            Ok(Value::list_from(&all))
        } else {
            Ok(Value::list_from(&elements))
        }
    }

    fn read_atom(&mut self, start: usize) -> Result<Rc<Value>, LispError> {
        let mut text = String::new();
        loop {
            match self.current() {
                Some(c) if !Self::is_excluded(c) && !(c == '#' && self.peek() == Some('"')) => {
                    text.push(c);
                    self.advance();
                }
                _ => break,
            }
        }
        if text.is_empty() {
            // Nothing recognized at this position (e.g. a bare excluded byte).
            return Err(self.bad_form(start));
        }

        Ok(match text.as_str() {
            "true" => Rc::new(Value::Boolean(true)),
            "false" => Rc::new(Value::Boolean(false)),
            "nil" => Rc::new(Value::Nil),
            _ => match classify_number(&text) {
                Some(v) => Rc::new(v),
                None => Rc::new(Value::Symbol(text.into())),
            },
        })
    }
}

/// Optional leading `-` then digit+ -> Integer; same with exactly one embedded `.` -> Float;
/// a lone `-` is not a number.
fn classify_number(text: &str) -> Option<Value> {
    let body = text.strip_prefix('-').unwrap_or(text);
    if body.is_empty() {
        return None;
    }
    if body.chars().all(|c| c.is_ascii_digit()) {
        return text.parse::<i64>().ok().map(|i| Value::Number(crate::number::Number::Int(i)));
    }
    let dot_count = body.chars().filter(|c| *c == '.').count();
    if dot_count == 1 {
        let digits_only: String = body.chars().filter(|c| *c != '.').collect();
        if !digits_only.is_empty() && digits_only.chars().all(|c| c.is_ascii_digit()) {
            return text.parse::<f64>().ok().map(|f| Value::Number(crate::number::Number::Float(f)));
        }
    }
    None
}

/// Convenience wrapper matching §4.1's `read-one`: parse exactly one form from `input`.
pub fn read_one(input: &str) -> Result<Rc<Value>, LispError> {
    Reader::new(input).read_one()
}

/// Convenience wrapper matching §4.1's `read-all`: parse every form in `input`.
pub fn read_all(input: &str) -> Result<Vec<Rc<Value>>, LispError> {
    Reader::new(input).read_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number::Number;

    #[test]
    fn reads_integers_and_floats() {
        assert_eq!(*read_one("42").unwrap(), Value::Number(Number::Int(42)));
        assert_eq!(*read_one("-3").unwrap(), Value::Number(Number::Int(-3)));
        assert_eq!(*read_one("2.5").unwrap(), Value::Number(Number::Float(2.5)));
    }

    #[test]
    fn lone_minus_is_a_symbol() {
        assert_eq!(*read_one("-").unwrap(), Value::Symbol("-".into()));
    }

    #[test]
    fn reads_literals() {
        assert_eq!(*read_one("true").unwrap(), Value::Boolean(true));
        assert_eq!(*read_one("false").unwrap(), Value::Boolean(false));
        assert_eq!(*read_one("nil").unwrap(), Value::Nil);
    }

    #[test]
    fn reads_strings_with_escapes() {
        let v = read_one(r#""a\nb""#).unwrap();
        assert_eq!(*v, Value::Str("a\nb".into()));
    }

    #[test]
    fn unterminated_string_runs_out() {
        assert!(matches!(
            read_one("\"abc"),
            Err(LispError::ReaderRanOut { .. })
        ));
    }

    #[test]
    fn empty_list_is_the_distinguished_pair() {
        let v = read_one("()").unwrap();
        assert!(!Value::is_list(&v));
        assert_eq!(v.render(), "`()");
    }

    #[test]
    fn list_reads_proper_list() {
        let v = read_one("(1 2 3)").unwrap();
        assert!(Value::is_list(&v));
        assert_eq!(Value::list_elements(&v).len(), 3);
    }

    #[test]
    fn vector_reads_as_list_with_leading_vector_symbol() {
        let v = read_one("[1 2]").unwrap();
        let elems = Value::list_elements(&v);
        assert_eq!(elems.len(), 3);
        assert_eq!(*elems[0], Value::Symbol("vector".into()));
    }

    #[test]
    fn set_reads_as_list_with_leading_hash_set_symbol() {
        let v = read_one("#{1 2}").unwrap();
        let elems = Value::list_elements(&v);
        assert_eq!(*elems[0], Value::Symbol("hash-set".into()));
    }

    #[test]
    fn empty_map_is_plain_nil() {
        let v = read_one("{}").unwrap();
        assert_eq!(*v, Value::Nil);
    }

    #[test]
    fn quote_elaborates_to_quote_form() {
        let v = read_one("'x").unwrap();
        let elems = Value::list_elements(&v);
        assert_eq!(elems.len(), 2);
        assert_eq!(*elems[0], Value::Symbol("quote".into()));
        assert_eq!(*elems[1], Value::Symbol("x".into()));
    }

    #[test]
    fn line_comment_is_skipped() {
        let v = read_one("; a comment\n42").unwrap();
        assert_eq!(*v, Value::Number(Number::Int(42)));
    }

    #[test]
    fn form_comment_discards_the_next_form() {
        let v = read_one("#;(discarded) 42").unwrap();
        assert_eq!(*v, Value::Number(Number::Int(42)));
    }

    #[test]
    fn regex_literal_reads_as_plain_string() {
        let v = read_one(r#"#"abc""#).unwrap();
        assert_eq!(*v, Value::Str("abc".into()));
    }

    #[test]
    fn read_all_reads_every_top_level_form() {
        let forms = read_all("1 2 3").unwrap();
        assert_eq!(forms.len(), 3);
    }

    #[test]
    fn unterminated_list_runs_out() {
        assert!(matches!(read_one("(1 2"), Err(LispError::ReaderRanOut { .. })));
    }

    #[test]
    fn unexpected_close_paren_is_bad_form() {
        assert!(matches!(read_one(")"), Err(LispError::ReaderBadForm { .. })));
    }
}
