pub mod error;
pub mod expression_tree;
pub mod lexer;
pub mod operator;
pub mod token;

use crate::parser::error::{LexicalError, ParseError};
use crate::parser::expression_tree::ExpressionTree;
use crate::parser::lexer::Lexer;
use crate::parser::token::{Token, TokenKind};
use anyhow::{Context, Result};
use itertools::{Either, Itertools};
use string_builder::Builder;

/// Starts a lexical scan of the given input.
///
/// # Arguments
///
/// * `name`: Label for this scan, used in error reports.
/// * `input`: The expression text to scan.
///
/// returns: The scanner, which yields the tokens lazily in source order.
///
/// # Examples
///
/// ```
/// use rotation_parser::parser::scan;
///
/// let tokens: Vec<_> = scan("example", "1 + 2").collect();
/// assert_eq!(tokens.len(), 4); // two numbers, one operator, end of input
/// ```
pub fn scan(name: &str, input: &str) -> Lexer {
    Lexer::new(name, input)
}

/// Builds the precedence-resolved expression tree for an ordered sequence of
/// number and operator tokens.
pub fn parse(tokens: Vec<Token>) -> Result<ExpressionTree, ParseError> {
    ExpressionTree::new(tokens)
}

/// Runs the whole pipeline on an input string: scan, drop the end-of-input
/// marker, surface the first lexical error if the scanner reported any, and
/// build the tree.
///
/// # Arguments
///
/// * `name`: Label for the scan, used in error reports.
/// * `expression`: The expression text to convert.
///
/// returns: The equivalent expression tree.
///
/// # Examples
///
/// ```
/// use rotation_parser::parser::convert;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let tree = convert("example", "12 * 5 + 7")?;
/// print!("{}", tree);
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn convert(name: &str, expression: &str) -> Result<ExpressionTree, ParseError> {
    let (tokens, errors): (Vec<Token>, Vec<LexicalError>) = scan(name, expression)
        .take_while(|token| token.kind != TokenKind::EndOfInput)
        .partition_map(|token| match token.kind {
            TokenKind::Error => Either::Right(LexicalError {
                name: name.to_string(),
                message: token.text,
            }),
            _ => Either::Left(token),
        });
    if let Some(error) = errors.into_iter().next() {
        return Err(error.into());
    }
    parse(tokens)
}

/// Pretty-prints the given tokens with canonical spacing: one space around
/// each operator, everything else run together. End-of-input and error
/// tokens print nothing.
pub fn tokens_to_string(tokens: Vec<Token>) -> Result<String> {
    let mut builder = Builder::new(tokens.len());

    for token in tokens {
        match token.kind {
            TokenKind::Operator => {
                builder.append(" ");
                builder.append(token.text);
                builder.append(" ");
            }
            TokenKind::EndOfInput | TokenKind::Error => {}
            _ => builder.append(token.text),
        }
    }

    builder.string().context("Failed to build token string")
}
