//! Infix tokenizer with unary-minus disambiguation.

use super::error::FormulaSyntaxError;
use super::token::{Op, Token};

/// Tokenize an infix expression into numbers, identifiers, operators and
/// parentheses.
///
/// A `-` is rewritten into the distinct unary-minus operator when it
/// occurs at expression start, after another operator, or after `(`;
/// everywhere else it stays binary subtraction. Identifier validity
/// against the allowed-variable set is checked by the compiler, not here.
pub fn tokenize(expression: &str) -> Result<Vec<Token>, FormulaSyntaxError> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut chars = expression.chars().peekable();

    while let Some(&ch) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }
            c if c.is_ascii_digit() || c == '.' => {
                let mut literal = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_digit() || c == '.' {
                        literal.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value: f64 = literal
                    .parse()
                    .map_err(|_| FormulaSyntaxError::InvalidToken { token: literal.clone() })?;
                tokens.push(Token::Number(value));
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut name = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_alphanumeric() || c == '_' {
                        name.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Variable(name));
            }
            '-' => {
                chars.next();
                if minus_is_unary(tokens.last()) {
                    tokens.push(Token::Operator(Op::Neg));
                } else {
                    tokens.push(Token::Operator(Op::Sub));
                }
            }
            '+' => {
                chars.next();
                tokens.push(Token::Operator(Op::Add));
            }
            '*' => {
                chars.next();
                tokens.push(Token::Operator(Op::Mul));
            }
            '/' => {
                chars.next();
                tokens.push(Token::Operator(Op::Div));
            }
            '^' => {
                chars.next();
                tokens.push(Token::Operator(Op::Pow));
            }
            '(' => {
                chars.next();
                tokens.push(Token::OpenParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::CloseParen);
            }
            other => {
                return Err(FormulaSyntaxError::InvalidToken { token: other.to_string() });
            }
        }
    }

    Ok(tokens)
}

// A minus is unary at expression start, after an operator, or after an
// opening parenthesis.
fn minus_is_unary(previous: Option<&Token>) -> bool {
    matches!(previous, None | Some(Token::Operator(_)) | Some(Token::OpenParen))
}
