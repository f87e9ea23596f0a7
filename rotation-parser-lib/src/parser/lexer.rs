use crate::parser::token::{self, Token, TokenKind, OPERATOR_CHARS};

static DIGITS: &str = "0123456789";

/// The lexeme the cursor is currently inside.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum State {
    Any,
    Number,
    Operator,
    Done,
}

/// A single-pass lexical scanner over one input string.
///
/// The scanner is also the token sequence: iterating it yields the tokens in
/// source order, tolerating per-token lexical errors (reported as
/// [TokenKind::Error] tokens) without aborting the scan, and terminating with
/// exactly one [TokenKind::EndOfInput]. It is not restartable; start a fresh
/// scan to read the same input again.
///
/// All cursor arithmetic is on `char` boundaries, so multi-byte input is
/// never split mid-encoding.
pub struct Lexer {
    name: String,  // for error reports
    input: String, // the full string being scanned
    start: usize,  // byte offset where the current lexeme begins
    cursor: usize, // byte offset of the scan cursor
    state: State,
}

impl Lexer {
    pub fn new(name: &str, input: &str) -> Lexer {
        Lexer {
            name: name.to_string(),
            input: input.to_string(),
            start: 0,
            cursor: 0,
            state: State::Any,
        }
    }

    /// The name given to this scan, used to label diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    // Advances the cursor one character.
    fn next_char(&mut self) -> Option<char> {
        let char = self.input[self.cursor..].chars().next()?;
        self.cursor += char.len_utf8();
        Some(char)
    }

    // Steps the cursor back over the last consumed character, never past the
    // start of the current lexeme.
    fn backup(&mut self) {
        if self.cursor <= self.start {
            return;
        }
        if let Some(char) = self.input[self.start..self.cursor].chars().next_back() {
            self.cursor -= char.len_utf8();
        }
    }

    // Skips all input consumed since the last emit or ignore.
    fn ignore(&mut self) {
        self.start = self.cursor;
    }

    // Consumes the next character if it is in the valid set.
    fn accept(&mut self, valid: &str) -> bool {
        match self.next_char() {
            Some(char) if valid.contains(char) => true,
            Some(_) => {
                self.backup();
                false
            }
            None => false,
        }
    }

    // Consumes zero or more characters from the valid set.
    fn accept_run(&mut self, valid: &str) {
        while self.accept(valid) {}
    }

    // Packages the pending lexeme text into a token.
    fn emit(&mut self, kind: TokenKind) -> Token {
        let token = Token::new(kind, &self.input[self.start..self.cursor]);
        self.start = self.cursor;
        token
    }

    // Reports a malformed lexeme and resynchronizes, discarding the pending
    // text so the tokens that follow scan cleanly.
    fn errorf(&mut self, message: &str) -> Token {
        self.start = self.cursor;
        self.state = State::Any;
        Token::error(message)
    }

    // The initial state: dispatch on the next character.
    fn lex_any(&mut self) -> Option<Token> {
        match self.next_char() {
            Some(char) if token::match_charset(char, token::NON_ZERO_DIGIT | token::ZERO) => {
                self.backup();
                self.state = State::Number;
                None
            }
            Some('-') => {
                // a sign iff at the start of the input or hard up against a
                // left paren (no spaces in between)
                let prev = self.input[..self.start].chars().next_back();
                self.backup();
                self.state = if self.cursor == 0 || prev == Some('(') {
                    State::Number
                } else {
                    State::Operator
                };
                None
            }
            Some(char) if token::match_charset(char, token::SYMBOL) => {
                self.backup();
                self.state = State::Operator;
                None
            }
            Some(char) if token::match_charset(char, token::WHITESPACE | token::NEWLINE) => {
                self.ignore();
                None
            }
            Some('(') => Some(self.emit(TokenKind::LeftParen)),
            Some(')') => Some(self.emit(TokenKind::RightParen)),
            None => {
                self.state = State::Done;
                Some(self.emit(TokenKind::EndOfInput))
            }
            Some(_) => Some(self.errorf("Unexpected character encountered")),
        }
    }

    // Scans a decimal number with optional negation, e.g. -12.345.
    fn lex_number(&mut self) -> Option<Token> {
        self.accept("-");
        if !self.accept(DIGITS) {
            return Some(self.errorf("invalid number"));
        }
        self.accept_run(DIGITS);
        if self.accept(".") {
            if !self.accept(DIGITS) {
                return Some(self.errorf("invalid number"));
            }
            self.accept_run(DIGITS);
        }
        self.state = State::Any;
        Some(self.emit(TokenKind::Number))
    }

    // Scans exactly one operator symbol. lex_any vets the lookahead before
    // entering this state, so a failed accept is a scanner defect.
    fn lex_operator(&mut self) -> Option<Token> {
        if !self.accept(OPERATOR_CHARS) {
            return Some(self.errorf("internal scanner defect: expected an operator character"));
        }
        self.state = State::Any;
        Some(self.emit(TokenKind::Operator))
    }
}

impl Iterator for Lexer {
    type Item = Token;

    // Drives the state machine until the next token is produced. Every pass
    // either emits a token or makes positive cursor progress, so the scan
    // always completes.
    fn next(&mut self) -> Option<Token> {
        loop {
            let emitted = match self.state {
                State::Any => self.lex_any(),
                State::Number => self.lex_number(),
                State::Operator => self.lex_operator(),
                State::Done => return None,
            };
            if let Some(token) = emitted {
                return Some(token);
            }
        }
    }
}
