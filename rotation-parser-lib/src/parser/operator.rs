use crate::parser::token::{Token, TokenKind};

/// Evaluation-order tie-breaker for operators of equal precedence.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

/// Binding strength of the given token; a higher number binds tighter.
///
/// Any token that is not a known operator acts as if it bound maximally
/// tight, so a bare number always dominates when compared directly against
/// an operator.
pub fn precedence(token: &Token) -> u64 {
    if token.kind != TokenKind::Operator {
        return u64::MAX;
    }
    match token.text.as_str() {
        "&" | "|" | "^" => 10,
        "+" | "-" => 100,
        "*" | "/" => 1000,
        _ => u64::MAX,
    }
}

/// There are no right-associative operators just yet; the hook is here for
/// when one arrives.
pub fn associativity(_token: &Token) -> Associativity {
    Associativity::Left
}

pub(crate) fn is_right_associative(token: &Token) -> bool {
    associativity(token) == Associativity::Right
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplicative_operators_bind_tighter_than_additive() {
        assert!(precedence(&Token::operator("*")) > precedence(&Token::operator("+")));
        assert!(precedence(&Token::operator("/")) > precedence(&Token::operator("-")));
    }

    #[test]
    fn additive_operators_bind_tighter_than_bitwise() {
        assert!(precedence(&Token::operator("+")) > precedence(&Token::operator("&")));
        assert!(precedence(&Token::operator("-")) > precedence(&Token::operator("|")));
        assert!(precedence(&Token::operator("+")) > precedence(&Token::operator("^")));
    }

    #[test]
    fn operators_in_the_same_tier_bind_equally() {
        assert_eq!(
            precedence(&Token::operator("+")),
            precedence(&Token::operator("-"))
        );
        assert_eq!(
            precedence(&Token::operator("*")),
            precedence(&Token::operator("/"))
        );
        assert_eq!(
            precedence(&Token::operator("&")),
            precedence(&Token::operator("|"))
        );
    }

    #[test]
    fn numbers_dominate_every_operator() {
        let number = Token::number("42");
        assert!(precedence(&number) > precedence(&Token::operator("*")));
    }

    #[test]
    fn no_operator_is_right_associative() {
        for symbol in ["+", "-", "*", "/", "&", "|", "^"] {
            assert_eq!(associativity(&Token::operator(symbol)), Associativity::Left);
        }
    }
}
