use std::fmt;
use std::fmt::Formatter;

/// The classification of a scanned lexeme.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Number,
    Operator,
    LeftParen,
    RightParen,
    EndOfInput,
    Error,
}

/// A discrete part of an expression: a kind paired with the exact source text
/// that produced it.
///
/// For [TokenKind::Error] the text holds a diagnostic message instead of
/// source text. Tokens are immutable value objects with structural equality.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

/// The single-character operator set.
pub static OPERATOR_CHARS: &str = "+-*/^&|";

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Token {
        Token {
            kind,
            text: text.into(),
        }
    }

    pub fn number(text: impl Into<String>) -> Token {
        Token::new(TokenKind::Number, text)
    }

    pub fn operator(text: impl Into<String>) -> Token {
        Token::new(TokenKind::Operator, text)
    }

    pub fn left_paren() -> Token {
        Token::new(TokenKind::LeftParen, "(")
    }

    pub fn right_paren() -> Token {
        Token::new(TokenKind::RightParen, ")")
    }

    pub fn end_of_input() -> Token {
        Token::new(TokenKind::EndOfInput, "")
    }

    pub fn error(message: impl Into<String>) -> Token {
        Token::new(TokenKind::Error, message)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Error => write!(f, "{}", self.text),
            TokenKind::EndOfInput => write!(f, "EOF"),
            _ => {
                if self.text.chars().count() > 10 {
                    let prefix: String = self.text.chars().take(10).collect();
                    write!(f, "{:?}...", prefix)
                } else {
                    write!(f, "{:?}", self.text)
                }
            }
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

pub(crate) type CharSet = u16;

pub(crate) const ALPHA_LOWER: CharSet = 1 << 0;
pub(crate) const ALPHA_UPPER: CharSet = 1 << 1;
pub(crate) const UNDERSCORE: CharSet = 1 << 2;
pub(crate) const NON_ZERO_DIGIT: CharSet = 1 << 3;
pub(crate) const ZERO: CharSet = 1 << 4;
pub(crate) const SYMBOL: CharSet = 1 << 5;
pub(crate) const WHITESPACE: CharSet = 1 << 6;
pub(crate) const NEWLINE: CharSet = 1 << 7;

/// Tests a character against a mask of the character classes above.
pub(crate) fn match_charset(char: char, mask: CharSet) -> bool {
    let class = match char {
        '1'..='9' => NON_ZERO_DIGIT,
        '0' => ZERO,
        'a'..='z' => ALPHA_LOWER,
        'A'..='Z' => ALPHA_UPPER,
        '_' => UNDERSCORE,
        '+' | '-' | '*' | '/' | '&' | '|' | '^' => SYMBOL,
        ' ' | '\t' => WHITESPACE,
        '\n' | '\r' => NEWLINE,
        _ => return false,
    };
    class & mask != 0
}
