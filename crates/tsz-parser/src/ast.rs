//! The parse tree: expression and statement node shapes (`spec.md` §3).
//!
//! Every node carries a [`Span`] (byte offsets only — line/column is a
//! rendering concern resolved lazily by `tsz_common::position`).

use crate::refs::Ref;
use tsz_common::Span;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Exponent,
    Eq,
    NotEq,
    StrictEq,
    StrictNotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Shl,
    Shr,
    UShr,
    BitAnd,
    BitOr,
    BitXor,
    LogicalAnd,
    LogicalOr,
    NullishCoalescing,
    In,
    Instanceof,
    Comma,
    /// Any compound assignment (`+=`, `??=`, ...), keyed by the operator it
    /// desugars to; plain `=` is `None`.
    Assign(Option<Box<BinOp>>),
}

impl BinOp {
    /// Precedence ladder from `spec.md` §4.2 (low to high), used by the
    /// parser's precedence-climbing loop. Exponentiation is handled
    /// separately as right-associative.
    #[must_use]
    pub fn precedence(self) -> u8 {
        match self {
            BinOp::Comma => 1,
            BinOp::Assign(_) => 3,
            BinOp::NullishCoalescing => 5,
            BinOp::LogicalOr => 6,
            BinOp::LogicalAnd => 7,
            BinOp::BitOr => 8,
            BinOp::BitXor => 9,
            BinOp::BitAnd => 10,
            BinOp::Eq | BinOp::NotEq | BinOp::StrictEq | BinOp::StrictNotEq => 11,
            BinOp::Lt | BinOp::Gt | BinOp::LtEq | BinOp::GtEq | BinOp::In | BinOp::Instanceof => 12,
            BinOp::Shl | BinOp::Shr | BinOp::UShr => 13,
            BinOp::Add | BinOp::Sub => 14,
            BinOp::Mul | BinOp::Div | BinOp::Mod => 15,
            BinOp::Exponent => 16,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnOp {
    Not,
    BitNot,
    Plus,
    Minus,
    Typeof,
    Void,
    Delete,
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyKind {
    Normal,
    Get,
    Set,
    Spread,
}

#[derive(Clone, Debug)]
pub struct Property {
    pub kind: PropertyKind,
    pub key: Expr,
    pub value: Option<Expr>,
    pub is_method: bool,
    pub is_static: bool,
    pub is_computed: bool,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub struct Param {
    pub pattern: Expr,
    pub default: Option<Expr>,
    pub is_rest: bool,
    /// `true` for a TypeScript constructor parameter property
    /// (`constructor(public x: number)`): the parser records the modifier,
    /// lowering synthesizes the field assignment (`spec.md` §4.4).
    pub is_param_property: bool,
}

#[derive(Clone, Debug)]
pub struct Function {
    pub name: Option<Ref>,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
    pub is_async: bool,
    pub is_generator: bool,
    pub is_arrow: bool,
    /// `true` when an arrow's body is a single expression rather than a
    /// block (`x => x + 1`).
    pub expression_body: Option<Box<Expr>>,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub struct Class {
    pub name: Option<Ref>,
    pub super_class: Option<Box<Expr>>,
    pub properties: Vec<Property>,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub struct JsxAttribute {
    pub name: String,
    pub value: Option<Expr>,
}

#[derive(Clone, Debug)]
pub struct JsxElement {
    pub tag: Option<String>,
    pub attributes: Vec<JsxAttribute>,
    pub children: Vec<Expr>,
    pub self_closing: bool,
    pub span: Span,
}

/// A member-access chain node's optional-chain bookkeeping (`spec.md` §3):
/// `is_optional_chain` records `?.`; `is_parenthesized` marks a barrier that
/// terminates the chain for lowering purposes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChainFlags {
    pub is_optional_chain: bool,
    pub is_parenthesized: bool,
}

#[derive(Clone, Debug)]
pub enum Expr {
    Null(Span),
    Undefined(Span),
    Bool(bool, Span),
    Number(f64, Span),
    BigInt(String, Span),
    String(Vec<u16>, Span),
    Regex { pattern: String, flags: String, span: Span },
    Template { quasis: Vec<Vec<u16>>, exprs: Vec<Expr>, span: Span },
    Identifier(Ref, Span),
    This(Span),
    Super(Span),
    Binary { op: BinOp, left: Box<Expr>, right: Box<Expr>, span: Span },
    Unary { op: UnOp, arg: Box<Expr>, span: Span },
    Conditional { test: Box<Expr>, consequent: Box<Expr>, alternate: Box<Expr>, span: Span },
    Call { callee: Box<Expr>, args: Vec<Expr>, chain: ChainFlags, span: Span },
    New { callee: Box<Expr>, args: Vec<Expr>, span: Span },
    Dot { object: Box<Expr>, property: String, chain: ChainFlags, span: Span },
    Index { object: Box<Expr>, index: Box<Expr>, chain: ChainFlags, span: Span },
    Array { elements: Vec<Option<Expr>>, span: Span },
    Object { properties: Vec<Property>, span: Span },
    Spread(Box<Expr>, Span),
    Yield { argument: Option<Box<Expr>>, delegate: bool, span: Span },
    Await(Box<Expr>, Span),
    Function(Box<Function>),
    Class(Box<Class>),
    Jsx(Box<JsxElement>),
    /// A parsed `import(...)` expression, before lowering decides its fate.
    DynamicImport { argument: Box<Expr>, span: Span },
    /// A parsed `require(...)` call, rewritten from a plain `Call` by the
    /// resolver once `is_bundling` is known (`spec.md` §4.5).
    Require { argument: Box<Expr>, span: Span },
    /// Synthetic node created during resolution for `ns.x` where `ns` is a
    /// namespace import (`spec.md` §4.5).
    NamespaceImport { namespace: Ref, item: Ref, alias: String, span: Span },
}

impl Expr {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Expr::Null(s)
            | Expr::Undefined(s)
            | Expr::Bool(_, s)
            | Expr::Number(_, s)
            | Expr::BigInt(_, s)
            | Expr::String(_, s)
            | Expr::Regex { span: s, .. }
            | Expr::Template { span: s, .. }
            | Expr::Identifier(_, s)
            | Expr::This(s)
            | Expr::Super(s)
            | Expr::Binary { span: s, .. }
            | Expr::Unary { span: s, .. }
            | Expr::Conditional { span: s, .. }
            | Expr::Call { span: s, .. }
            | Expr::New { span: s, .. }
            | Expr::Dot { span: s, .. }
            | Expr::Index { span: s, .. }
            | Expr::Array { span: s, .. }
            | Expr::Object { span: s, .. }
            | Expr::Spread(_, s)
            | Expr::Yield { span: s, .. }
            | Expr::Await(_, s)
            | Expr::DynamicImport { span: s, .. }
            | Expr::Require { span: s, .. }
            | Expr::NamespaceImport { span: s, .. } => *s,
            Expr::Function(f) => f.span,
            Expr::Class(c) => c.span,
            Expr::Jsx(j) => j.span,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VarKind {
    Var,
    Let,
    Const,
}

#[derive(Clone, Debug)]
pub struct VarDeclarator {
    pub name: Expr,
    pub init: Option<Expr>,
}

#[derive(Clone, Debug)]
pub struct SwitchCase {
    pub test: Option<Expr>,
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug)]
pub struct CatchClause {
    pub param: Option<Expr>,
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug)]
pub struct ImportSpecifier {
    pub imported: String,
    pub local: Ref,
}

#[derive(Clone, Debug)]
pub struct ImportStmt {
    pub default: Option<Ref>,
    pub namespace: Option<Ref>,
    pub named: Vec<ImportSpecifier>,
    pub source: String,
    pub span: Span,
}

/// One `enum` member: a bare name, an optional initializer, and whether it
/// was given one at all (`spec.md` §4.4: numeric members without one
/// continue the previous value + 1; string-valued members leave the ones
/// after them `undefined`).
#[derive(Clone, Debug)]
pub struct EnumMember {
    pub name: String,
    pub initializer: Option<Expr>,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub struct EnumDecl {
    pub name: Ref,
    pub members: Vec<EnumMember>,
    pub is_const: bool,
    pub span: Span,
}

/// A `namespace`/`module` declaration. `path` holds every segment of a
/// dotted head (`namespace A.B.C` -> `["A", "B", "C"]`); only the first
/// segment is declared as a real binding in the enclosing scope; the rest
/// are desugared into nested IIFEs by lowering (`spec.md` §4.4).
#[derive(Clone, Debug)]
pub struct NamespaceDecl {
    pub name: Ref,
    pub path: Vec<String>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub enum Stmt {
    Block(Vec<Stmt>, Span),
    Empty(Span),
    Directive(String, Span),
    Expr(Expr, Span),
    If { test: Expr, consequent: Box<Stmt>, alternate: Option<Box<Stmt>>, span: Span },
    For { init: Option<Box<Stmt>>, test: Option<Expr>, update: Option<Expr>, body: Box<Stmt>, span: Span },
    ForIn { left: Box<Stmt>, right: Expr, body: Box<Stmt>, span: Span },
    ForOf { left: Box<Stmt>, right: Expr, body: Box<Stmt>, is_await: bool, span: Span },
    While { test: Expr, body: Box<Stmt>, span: Span },
    DoWhile { body: Box<Stmt>, test: Expr, span: Span },
    With { object: Expr, body: Box<Stmt>, span: Span },
    Switch { discriminant: Expr, cases: Vec<SwitchCase>, span: Span },
    Try { block: Vec<Stmt>, handler: Option<CatchClause>, finalizer: Option<Vec<Stmt>>, span: Span },
    Break(Option<String>, Span),
    Continue(Option<String>, Span),
    Return(Option<Expr>, Span),
    Throw(Expr, Span),
    Labeled { label: String, body: Box<Stmt>, span: Span },
    VarDecl { kind: VarKind, declarations: Vec<VarDeclarator>, span: Span },
    FunctionDecl(Box<Function>),
    ClassDecl(Box<Class>),
    EnumDecl(Box<EnumDecl>),
    NamespaceDecl(Box<NamespaceDecl>),
    Debugger(Span),
    Import(Box<ImportStmt>),
    ExportDefault(Box<Expr>, Span),
    ExportNamed { specifiers: Vec<(String, String)>, source: Option<String>, span: Span },
    ExportStar { alias: Option<String>, source: String, span: Span },
    /// A pure-type TypeScript construct (type alias, interface, `declare`
    /// statement with no runtime body) dropped entirely by the resolver.
    TypeScript(Span),
}

impl Stmt {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Stmt::Block(_, s)
            | Stmt::Empty(s)
            | Stmt::Directive(_, s)
            | Stmt::Expr(_, s)
            | Stmt::If { span: s, .. }
            | Stmt::For { span: s, .. }
            | Stmt::ForIn { span: s, .. }
            | Stmt::ForOf { span: s, .. }
            | Stmt::While { span: s, .. }
            | Stmt::DoWhile { span: s, .. }
            | Stmt::With { span: s, .. }
            | Stmt::Switch { span: s, .. }
            | Stmt::Try { span: s, .. }
            | Stmt::Break(_, s)
            | Stmt::Continue(_, s)
            | Stmt::Return(_, s)
            | Stmt::Throw(_, s)
            | Stmt::Labeled { span: s, .. }
            | Stmt::VarDecl { span: s, .. }
            | Stmt::Debugger(s)
            | Stmt::ExportDefault(_, s)
            | Stmt::ExportNamed { span: s, .. }
            | Stmt::ExportStar { span: s, .. }
            | Stmt::TypeScript(s) => *s,
            Stmt::FunctionDecl(f) => f.span,
            Stmt::ClassDecl(c) => c.span,
            Stmt::EnumDecl(e) => e.span,
            Stmt::NamespaceDecl(n) => n.span,
            Stmt::Import(i) => i.span,
        }
    }
}

/// The parse result for one file (`spec.md` §6 "Outputs").
#[derive(Clone, Debug, Default)]
pub struct Ast {
    pub body: Vec<Stmt>,
    pub hashbang: Option<String>,
}

#[cfg(test)]
#[path = "../tests/ast.rs"]
mod tests;
