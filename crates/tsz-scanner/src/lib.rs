//! Lexer for the front-end compilation core.
//!
//! Turns source bytes into a token stream, with submodes for JSX element
//! attributes, JSX text children, template-literal continuation, and
//! regular-expression rescanning. See [`Lexer`] for the public operations.

pub mod keywords;
pub mod lexer;
pub mod token;

pub use lexer::{Lexer, LexerPanic, LexerSnapshot, LexResult};
pub use token::{SyntaxKind, Token, TokenValue};
