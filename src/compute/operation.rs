//! The per-vertex operation vocabulary.

use crate::store::Vertex;
use std::collections::HashMap;
use std::fmt;

pub type OperationMap = HashMap<Vertex, Operation>;

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// A numeric literal. Must not have arguments.
    Constant(f64),
    /// Sum of the arguments.
    Add,
    /// Product of the arguments.
    Multiply,
    /// `e` raised to the first argument; `1` without arguments.
    Exp,
    /// A token outside the vocabulary, kept so evaluation can report it.
    Unknown(String),
}

impl Operation {
    /// Classifies a token. Literals are unsigned decimals with at most one
    /// dot (`5`, `2.5`, `5.`, `.5`).
    pub fn parse(token: &str) -> Self {
        match token {
            "+" => Self::Add,
            "*" => Self::Multiply,
            "exp" => Self::Exp,
            _ => match parse_literal(token) {
                Some(value) => Self::Constant(value),
                None => Self::Unknown(token.to_string()),
            },
        }
    }

    /// Applies an operator to argument values already in ordinal order.
    /// Returns `None` for constants and unknown tokens.
    pub fn apply(&self, args: &[f64]) -> Option<f64> {
        match self {
            Self::Add => Some(args.iter().sum()),
            Self::Multiply => Some(args.iter().product()),
            Self::Exp => Some(args.first().map_or(1.0, |x| x.exp())),
            Self::Constant(_) | Self::Unknown(_) => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(v) => write!(f, "{}", v),
            Self::Add => f.write_str("+"),
            Self::Multiply => f.write_str("*"),
            Self::Exp => f.write_str("exp"),
            Self::Unknown(token) => f.write_str(token),
        }
    }
}

fn parse_literal(token: &str) -> Option<f64> {
    let digits = token.chars().filter(|c| c.is_ascii_digit()).count();
    let dots = token.chars().filter(|&c| c == '.').count();
    if digits == 0 || dots > 1 || digits + dots != token.len() {
        return None;
    }
    token.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0", 0.0)]
    #[case("5", 5.0)]
    #[case("2.5", 2.5)]
    #[case("5.", 5.0)]
    #[case(".5", 0.5)]
    #[case("007", 7.0)]
    fn test_literals(#[case] token: &str, #[case] expected: f64) {
        assert_eq!(Operation::parse(token), Operation::Constant(expected));
    }

    #[rstest]
    #[case("-1")]
    #[case("1.2.3")]
    #[case(".")]
    #[case("1e3")]
    #[case("inf")]
    #[case("-")]
    #[case("sin")]
    fn test_non_literals_are_unknown(#[case] token: &str) {
        assert_eq!(Operation::parse(token), Operation::Unknown(token.to_string()));
    }

    #[test]
    fn test_operator_tokens() {
        assert_eq!(Operation::parse("+"), Operation::Add);
        assert_eq!(Operation::parse("*"), Operation::Multiply);
        assert_eq!(Operation::parse("exp"), Operation::Exp);
    }

    #[test]
    fn test_apply() {
        assert_eq!(Operation::Add.apply(&[2.0, 3.0]), Some(5.0));
        assert_eq!(Operation::Multiply.apply(&[2.0, 3.0, 4.0]), Some(24.0));
        assert_eq!(Operation::Exp.apply(&[0.0, 99.0]), Some(1.0));
        assert_eq!(Operation::Exp.apply(&[]), Some(1.0));
        assert_eq!(Operation::Add.apply(&[]), Some(0.0));
        assert_eq!(Operation::Multiply.apply(&[]), Some(1.0));
        assert_eq!(Operation::Constant(3.0).apply(&[]), None);
    }
}
