//! Recursive-descent parser and parse tree for the front-end compilation
//! core.
//!
//! Parsing is pass 1 of the two-pass architecture (`spec.md` §4): it builds
//! the [`ast::Ast`], opens and closes scopes in source order into a
//! [`scope::ScopeArena`], and leaves every identifier as an unresolved
//! [`refs::Ref`]. Pass 2 lives in `tsz-binder`, which replays the recorded
//! scope order and resolves references against real symbols.

pub mod ast;
pub mod parser;
pub mod refs;
pub mod scope;

pub use ast::{
    Ast, BinOp, Class, EnumDecl, EnumMember, Expr, Function, NamespaceDecl, Param, Property,
    PropertyKind, Stmt, UnOp, VarKind,
};
pub use parser::{ParseResult, Parser};
pub use refs::{load_name_from_ref, NamePool, Ref};
pub use scope::{Scope, ScopeArena, ScopeId, ScopeKind};
