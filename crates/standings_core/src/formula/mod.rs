//! Arithmetic formula compiler and evaluator.
//!
//! Lets the league score teams by a custom "points formula" instead of
//! plain win percentage. An expression over a fixed set of variables is
//! compiled once (tokenize, unary-minus disambiguation, shunting-yard to
//! postfix) and then replayed against an operand stack per evaluation.
//!
//! - `token.rs`   : token and operator table (precedence, associativity,
//!                  arity)
//! - `lexer.rs`   : tokenization and unary-minus rewrite
//! - `compiler.rs`: shunting-yard, compile-time validation, evaluation
//! - `cache.rs`   : shared compilation cache keyed by formula text

pub mod cache;
pub mod compiler;
pub mod error;
pub mod lexer;
pub mod token;

pub use cache::compile_cached;
pub use compiler::{compile, CompiledFormula};
pub use error::{FormulaEvalError, FormulaSyntaxError};
