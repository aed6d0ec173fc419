//! Recursive-descent, precedence-climbing expression parser and the
//! statement grammar built on top of it (`spec.md` §4).
//!
//! Parsing is pass 1 of the two-pass architecture: it builds the tree and
//! opens/closes scopes in source order, but does not resolve any reference
//! — that is `tsz-binder`'s job, replaying `self.scopes.order`.

use rustc_hash::FxHashMap;
use tsz_common::{Diagnostic, Log, MsgId, Span};
use tsz_scanner::{Lexer, LexerPanic, LexerSnapshot, SyntaxKind, Token, TokenValue};

use crate::ast::{
    Ast, BinOp, CatchClause, ChainFlags, Class, EnumDecl, EnumMember, Expr, Function, ImportSpecifier,
    ImportStmt, JsxAttribute, JsxElement, NamespaceDecl, Param, Property, PropertyKind, Stmt, SwitchCase,
    UnOp, VarDeclarator, VarKind,
};
use crate::refs::{NamePool, Ref};
use crate::scope::{ScopeArena, ScopeId, ScopeKind};

pub type ParseResult<T> = Result<T, LexerPanic>;

/// Ambiguities that can only be resolved once more of the expression is
/// seen — e.g. `{a, b}` is an object literal until `= ...` follows, at
/// which point it must have been a destructuring pattern all along
/// (`spec.md` §4.3's cover-grammar note).
#[derive(Default)]
struct DeferredErrors {
    invalid_patterns: Vec<Span>,
}

impl DeferredErrors {
    fn merge(&mut self, other: DeferredErrors) {
        self.invalid_patterns.extend(other.invalid_patterns);
    }
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    source: &'a str,
    source_id: tsz_common::SourceId,
    token: Token,
    log: &'a dyn Log,
    pub scopes: ScopeArena,
    pub names: NamePool,
    current_scope: ScopeId,
    is_ts: bool,
    is_jsx: bool,
    allow_in: bool,
}

impl<'a> Parser<'a> {
    pub fn new(
        source: &'a str,
        source_id: tsz_common::SourceId,
        log: &'a dyn Log,
        is_ts: bool,
    ) -> ParseResult<Self> {
        Self::new_with_jsx(source, source_id, log, is_ts, false)
    }

    pub fn new_with_jsx(
        source: &'a str,
        source_id: tsz_common::SourceId,
        log: &'a dyn Log,
        is_ts: bool,
        is_jsx: bool,
    ) -> ParseResult<Self> {
        let mut lexer = Lexer::new(source, source_id);
        let token = lexer.next(log)?;
        let mut scopes = ScopeArena::new();
        let current_scope = scopes.push_scope_for_parse_pass(ScopeKind::Entry, None, 0);
        Ok(Self {
            lexer,
            source,
            source_id,
            token,
            log,
            scopes,
            names: NamePool::new(),
            current_scope,
            is_ts,
            is_jsx,
            allow_in: true,
        })
    }

    fn advance(&mut self) -> ParseResult<()> {
        self.token = self.lexer.next(self.log)?;
        Ok(())
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.token.kind == kind
    }

    fn eat(&mut self, kind: SyntaxKind) -> ParseResult<bool> {
        if self.at(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> ParseResult<()> {
        self.lexer.expect(kind, self.log)?;
        self.advance()
    }

    fn is_from(&self) -> bool {
        self.at(SyntaxKind::Identifier) && self.text(self.token.span) == "from"
    }

    fn expect_from(&mut self) -> ParseResult<()> {
        if self.is_from() {
            self.advance()
        } else {
            self.lexer.expect(SyntaxKind::Identifier, self.log)?;
            Err(LexerPanic)
        }
    }

    fn eat_from(&mut self) -> ParseResult<bool> {
        if self.is_from() {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn error(&self, id: MsgId, span: Span) {
        self.log.add_msg(Diagnostic::from_catalog(
            id,
            &[],
            Some(tsz_common::DiagnosticRange { source: self.source_id, span }),
            &FxHashMap::default(),
        ));
    }

    fn text(&self, span: Span) -> &'a str {
        &self.source[span.start as usize..span.end as usize]
    }

    // ---- scope bookkeeping -------------------------------------------------

    fn push_scope(&mut self, kind: ScopeKind, offset: u32) -> ScopeId {
        let id = self
            .scopes
            .push_scope_for_parse_pass(kind, Some(self.current_scope), offset);
        self.current_scope = id;
        id
    }

    fn pop_scope(&mut self, id: ScopeId) {
        self.current_scope = self.scopes.get(id).parent.unwrap_or(id);
    }

    fn declare(&mut self, name: &str, r: Ref) {
        self.scopes.get_mut(self.current_scope).members.insert(name.to_string(), r);
    }

    fn identifier_ref(&mut self, span: Span) -> Ref {
        let r = Ref::Unresolved { offset: span.start, length: span.end - span.start };
        self.declare(self.text(span), r);
        r
    }

    // ---- top level ----------------------------------------------------------

    /// Parse the whole program, then hand back the scope-order list and name
    /// pool alongside the tree — pass 2 (`tsz-binder`) needs both to replay
    /// scope boundaries and resolve `Ref::External` names.
    pub fn parse_program(mut self) -> ParseResult<(Ast, ScopeArena, NamePool)> {
        let hashbang = None; // hashbang is stripped by the host before lexing.
        let mut body = Vec::new();
        while !self.at(SyntaxKind::EndOfFile) {
            body.push(self.parse_statement()?);
        }
        Ok((Ast { body, hashbang }, self.scopes, self.names))
    }

    // ---- statements -----------------------------------------------------------

    fn parse_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.token.span;
        match self.token.kind {
            SyntaxKind::OpenBrace => self.parse_block(),
            SyntaxKind::Semicolon => {
                self.advance()?;
                Ok(Stmt::Empty(start))
            }
            SyntaxKind::IfKeyword => self.parse_if(),
            SyntaxKind::ForKeyword => self.parse_for(),
            SyntaxKind::WhileKeyword => self.parse_while(),
            SyntaxKind::DoKeyword => self.parse_do_while(),
            SyntaxKind::WithKeyword => self.parse_with(),
            SyntaxKind::SwitchKeyword => self.parse_switch(),
            SyntaxKind::TryKeyword => self.parse_try(),
            SyntaxKind::BreakKeyword => self.parse_break_continue(true),
            SyntaxKind::ContinueKeyword => self.parse_break_continue(false),
            SyntaxKind::ReturnKeyword => self.parse_return(),
            SyntaxKind::ThrowKeyword => self.parse_throw(),
            SyntaxKind::EnumKeyword if self.is_ts => self.parse_enum_decl(false),
            SyntaxKind::ConstKeyword if self.is_ts && self.is_const_enum() => {
                self.advance()?;
                self.parse_enum_decl(true)
            }
            SyntaxKind::NamespaceKeyword | SyntaxKind::ModuleKeyword
                if self.is_ts && self.starts_namespace_decl() =>
            {
                self.parse_namespace_decl()
            }
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword => {
                let s = self.parse_var_decl()?;
                self.consume_semicolon()?;
                Ok(s)
            }
            SyntaxKind::FunctionKeyword => self.parse_function_decl(false),
            SyntaxKind::AsyncKeyword => self.parse_async_function_decl(),
            SyntaxKind::ClassKeyword => self.parse_class_decl(),
            SyntaxKind::DebuggerKeyword => {
                self.advance()?;
                self.consume_semicolon()?;
                Ok(Stmt::Debugger(start))
            }
            SyntaxKind::ImportKeyword => self.parse_import(),
            SyntaxKind::ExportKeyword => self.parse_export(),
            SyntaxKind::InterfaceKeyword
            | SyntaxKind::TypeKeyword
            | SyntaxKind::DeclareKeyword
            | SyntaxKind::NamespaceKeyword
            | SyntaxKind::ModuleKeyword
                if self.is_ts =>
            {
                // Ambient module declaration (`declare module "foo" { ... }`)
                // or a bare `declare` with no runtime body — pure types.
                self.skip_typescript_declaration()
            }
            SyntaxKind::Identifier => self.parse_labeled_or_expr_statement(),
            _ => self.parse_expr_statement(),
        }
    }

    fn parse_block(&mut self) -> ParseResult<Stmt> {
        let start = self.token.span;
        self.expect(SyntaxKind::OpenBrace)?;
        let scope = self.push_scope(ScopeKind::Block, start.start);
        let mut body = Vec::new();
        while !self.at(SyntaxKind::CloseBrace) && !self.at(SyntaxKind::EndOfFile) {
            body.push(self.parse_statement()?);
        }
        let end = self.token.span;
        self.expect(SyntaxKind::CloseBrace)?;
        self.pop_scope(scope);
        Ok(Stmt::Block(body, Span::new(start.start, end.end)))
    }

    fn parse_if(&mut self) -> ParseResult<Stmt> {
        let start = self.token.span;
        self.advance()?;
        self.expect(SyntaxKind::OpenParen)?;
        let test = self.parse_expression()?;
        self.expect(SyntaxKind::CloseParen)?;
        let consequent = Box::new(self.parse_statement()?);
        let alternate = if self.eat(SyntaxKind::ElseKeyword)? {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };
        let end = alternate.as_ref().map_or(consequent.span(), |a| a.span());
        Ok(Stmt::If { test, consequent, alternate, span: Span::new(start.start, end.end) })
    }

    fn parse_for(&mut self) -> ParseResult<Stmt> {
        let start = self.token.span;
        self.advance()?;
        let scope = self.push_scope(ScopeKind::Block, start.start);
        self.expect(SyntaxKind::OpenParen)?;

        let init = if self.at(SyntaxKind::Semicolon) {
            None
        } else if matches!(
            self.token.kind,
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword
        ) {
            Some(Box::new(self.parse_var_decl()?))
        } else {
            self.allow_in = false;
            let e = self.parse_expression()?;
            self.allow_in = true;
            Some(Box::new(Stmt::Expr(e.clone(), e.span())))
        };

        if self.eat(SyntaxKind::InKeyword)? || self.eat(SyntaxKind::OfKeyword)? {
            let is_for_of = matches!(self.token.kind, SyntaxKind::OfKeyword);
            let right = self.parse_assignment_expression()?;
            self.expect(SyntaxKind::CloseParen)?;
            let body = Box::new(self.parse_statement()?);
            let end = body.span();
            let span = Span::new(start.start, end.end);
            self.pop_scope(scope);
            let left = init.unwrap();
            return Ok(if is_for_of {
                Stmt::ForOf { left, right, body, is_await: false, span }
            } else {
                Stmt::ForIn { left, right, body, span }
            });
        }

        self.expect(SyntaxKind::Semicolon)?;
        let test = if self.at(SyntaxKind::Semicolon) { None } else { Some(self.parse_expression()?) };
        self.expect(SyntaxKind::Semicolon)?;
        let update = if self.at(SyntaxKind::CloseParen) { None } else { Some(self.parse_expression()?) };
        self.expect(SyntaxKind::CloseParen)?;
        let body = Box::new(self.parse_statement()?);
        let end = body.span();
        self.pop_scope(scope);
        Ok(Stmt::For { init, test, update, body, span: Span::new(start.start, end.end) })
    }

    fn parse_while(&mut self) -> ParseResult<Stmt> {
        let start = self.token.span;
        self.advance()?;
        self.expect(SyntaxKind::OpenParen)?;
        let test = self.parse_expression()?;
        self.expect(SyntaxKind::CloseParen)?;
        let body = Box::new(self.parse_statement()?);
        let end = body.span();
        Ok(Stmt::While { test, body, span: Span::new(start.start, end.end) })
    }

    fn parse_do_while(&mut self) -> ParseResult<Stmt> {
        let start = self.token.span;
        self.advance()?;
        let body = Box::new(self.parse_statement()?);
        self.expect(SyntaxKind::WhileKeyword)?;
        self.expect(SyntaxKind::OpenParen)?;
        let test = self.parse_expression()?;
        let end = self.token.span;
        self.expect(SyntaxKind::CloseParen)?;
        self.eat(SyntaxKind::Semicolon)?;
        Ok(Stmt::DoWhile { body, test, span: Span::new(start.start, end.end) })
    }

    fn parse_with(&mut self) -> ParseResult<Stmt> {
        let start = self.token.span;
        self.advance()?;
        self.expect(SyntaxKind::OpenParen)?;
        let object = self.parse_expression()?;
        self.expect(SyntaxKind::CloseParen)?;
        let body = Box::new(self.parse_statement()?);
        let end = body.span();
        Ok(Stmt::With { object, body, span: Span::new(start.start, end.end) })
    }

    fn parse_switch(&mut self) -> ParseResult<Stmt> {
        let start = self.token.span;
        self.advance()?;
        self.expect(SyntaxKind::OpenParen)?;
        let discriminant = self.parse_expression()?;
        self.expect(SyntaxKind::CloseParen)?;
        let scope = self.push_scope(ScopeKind::Block, start.start);
        self.expect(SyntaxKind::OpenBrace)?;
        let mut cases = Vec::new();
        while !self.at(SyntaxKind::CloseBrace) && !self.at(SyntaxKind::EndOfFile) {
            let test = if self.eat(SyntaxKind::CaseKeyword)? {
                let t = self.parse_expression()?;
                self.expect(SyntaxKind::ColonToken)?;
                Some(t)
            } else {
                self.expect(SyntaxKind::DefaultKeyword)?;
                self.expect(SyntaxKind::ColonToken)?;
                None
            };
            let mut body = Vec::new();
            while !matches!(
                self.token.kind,
                SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword | SyntaxKind::CloseBrace
            ) && !self.at(SyntaxKind::EndOfFile)
            {
                body.push(self.parse_statement()?);
            }
            cases.push(SwitchCase { test, body });
        }
        let end = self.token.span;
        self.expect(SyntaxKind::CloseBrace)?;
        self.pop_scope(scope);
        Ok(Stmt::Switch { discriminant, cases, span: Span::new(start.start, end.end) })
    }

    fn parse_try(&mut self) -> ParseResult<Stmt> {
        let start = self.token.span;
        self.advance()?;
        let block = match self.parse_block()? {
            Stmt::Block(b, _) => b,
            _ => unreachable!(),
        };
        let handler = if self.eat(SyntaxKind::CatchKeyword)? {
            let scope = self.push_scope(ScopeKind::Block, self.token.span.start);
            let param = if self.eat(SyntaxKind::OpenParen)? {
                let p = self.parse_binding_target()?;
                self.expect(SyntaxKind::CloseParen)?;
                Some(p)
            } else {
                None
            };
            let body = match self.parse_block()? {
                Stmt::Block(b, _) => b,
                _ => unreachable!(),
            };
            self.pop_scope(scope);
            Some(CatchClause { param, body })
        } else {
            None
        };
        let finalizer = if self.eat(SyntaxKind::FinallyKeyword)? {
            match self.parse_block()? {
                Stmt::Block(b, _) => Some(b),
                _ => unreachable!(),
            }
        } else {
            None
        };
        let end = self.token.span;
        Ok(Stmt::Try { block, handler, finalizer, span: Span::new(start.start, end.start) })
    }

    fn parse_break_continue(&mut self, is_break: bool) -> ParseResult<Stmt> {
        let start = self.token.span;
        self.advance()?;
        let label = if self.at(SyntaxKind::Identifier) && !self.token.has_newline_before {
            let name = self.text(self.token.span).to_string();
            self.advance()?;
            Some(name)
        } else {
            None
        };
        self.consume_semicolon()?;
        Ok(if is_break {
            Stmt::Break(label, start)
        } else {
            Stmt::Continue(label, start)
        })
    }

    fn parse_return(&mut self) -> ParseResult<Stmt> {
        let start = self.token.span;
        self.advance()?;
        let arg = if self.at(SyntaxKind::Semicolon)
            || self.at(SyntaxKind::CloseBrace)
            || self.at(SyntaxKind::EndOfFile)
            || self.token.has_newline_before
        {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.consume_semicolon()?;
        Ok(Stmt::Return(arg, start))
    }

    fn parse_throw(&mut self) -> ParseResult<Stmt> {
        let start = self.token.span;
        self.advance()?;
        let arg = self.parse_expression()?;
        self.consume_semicolon()?;
        Ok(Stmt::Throw(arg, start))
    }

    fn parse_var_decl(&mut self) -> ParseResult<Stmt> {
        let start = self.token.span;
        let kind = match self.token.kind {
            SyntaxKind::VarKeyword => VarKind::Var,
            SyntaxKind::LetKeyword => VarKind::Let,
            _ => VarKind::Const,
        };
        self.advance()?;
        let mut declarations = Vec::new();
        loop {
            let name = self.parse_binding_target()?;
            let init = if self.eat(SyntaxKind::EqualsToken)? {
                Some(self.parse_assignment_expression()?)
            } else {
                None
            };
            declarations.push(VarDeclarator { name, init });
            if !self.eat(SyntaxKind::Comma)? {
                break;
            }
        }
        let end = declarations.last().map_or(start, |d| {
            d.init.as_ref().map_or(d.name.span(), Expr::span)
        });
        Ok(Stmt::VarDecl { kind, declarations, span: Span::new(start.start, end.end) })
    }

    /// A binding target is a restricted subset of expression grammar
    /// (identifier, array pattern, object pattern) — reused from the
    /// expression parser via the cover grammar rather than a separate
    /// production, per `spec.md` §4.3.
    fn parse_binding_target(&mut self) -> ParseResult<Expr> {
        self.parse_assignment_expression()
    }

    fn parse_function_decl(&mut self, is_async: bool) -> ParseResult<Stmt> {
        let start = self.token.span;
        self.advance()?;
        let is_generator = self.eat(SyntaxKind::AsteriskToken)?;
        let name = if self.at(SyntaxKind::Identifier) {
            let span = self.token.span;
            self.advance()?;
            Some(self.identifier_ref(span))
        } else {
            None
        };
        let scope = self.push_scope(ScopeKind::FunctionName, start.start);
        let params = self.parse_params()?;
        let entry = self.push_scope(ScopeKind::Entry, self.token.span.start);
        let body = self.parse_function_body()?;
        self.pop_scope(entry);
        self.pop_scope(scope);
        let end = self.token.span;
        Ok(Stmt::FunctionDecl(Box::new(Function {
            name,
            params,
            body,
            is_async,
            is_generator,
            is_arrow: false,
            expression_body: None,
            span: Span::new(start.start, end.start),
        })))
    }

    fn parse_async_function_decl(&mut self) -> ParseResult<Stmt> {
        self.advance()?;
        if self.at(SyntaxKind::FunctionKeyword) {
            self.parse_function_decl(true)
        } else {
            self.parse_labeled_or_expr_statement()
        }
    }

    fn parse_class_decl(&mut self) -> ParseResult<Stmt> {
        let class = self.parse_class()?;
        Ok(Stmt::ClassDecl(Box::new(class)))
    }

    fn parse_class(&mut self) -> ParseResult<Class> {
        let start = self.token.span;
        self.advance()?;
        let name = if self.at(SyntaxKind::Identifier) {
            let span = self.token.span;
            self.advance()?;
            Some(self.identifier_ref(span))
        } else {
            None
        };
        let scope = self.push_scope(ScopeKind::ClassName, start.start);
        let super_class = if self.eat(SyntaxKind::ExtendsKeyword)? {
            Some(Box::new(self.parse_lhs_expression()?))
        } else {
            None
        };
        self.skip_typescript_implements_clause()?;
        self.expect(SyntaxKind::OpenBrace)?;
        let mut properties = Vec::new();
        while !self.at(SyntaxKind::CloseBrace) && !self.at(SyntaxKind::EndOfFile) {
            if self.eat(SyntaxKind::Semicolon)? {
                continue;
            }
            properties.push(self.parse_class_member()?);
        }
        let end = self.token.span;
        self.expect(SyntaxKind::CloseBrace)?;
        self.pop_scope(scope);
        Ok(Class { name, super_class, properties, span: Span::new(start.start, end.end) })
    }

    fn parse_class_member(&mut self) -> ParseResult<Property> {
        let start = self.token.span;
        let is_static = self.at(SyntaxKind::StaticKeyword) && {
            self.advance()?;
            true
        };
        let kind = if self.at(SyntaxKind::GetKeyword) {
            self.advance()?;
            PropertyKind::Get
        } else if self.at(SyntaxKind::SetKeyword) {
            self.advance()?;
            PropertyKind::Set
        } else {
            PropertyKind::Normal
        };
        let is_computed = self.at(SyntaxKind::OpenBracket);
        let key = self.parse_property_key()?;
        let is_method = self.at(SyntaxKind::OpenParen);
        let value = if is_method {
            let scope = self.push_scope(ScopeKind::FunctionName, start.start);
            let params = self.parse_params()?;
            let entry = self.push_scope(ScopeKind::Entry, self.token.span.start);
            let body = self.parse_function_body()?;
            self.pop_scope(entry);
            self.pop_scope(scope);
            let end = self.token.span;
            Some(Expr::Function(Box::new(Function {
                name: None,
                params,
                body,
                is_async: false,
                is_generator: false,
                is_arrow: false,
                expression_body: None,
                span: Span::new(start.start, end.start),
            })))
        } else if self.eat(SyntaxKind::EqualsToken)? {
            Some(self.parse_assignment_expression()?)
        } else {
            None
        };
        self.eat(SyntaxKind::Semicolon)?;
        let end = self.token.span;
        Ok(Property {
            kind,
            key,
            value,
            is_method,
            is_static,
            is_computed,
            span: Span::new(start.start, end.start),
        })
    }

    fn parse_property_key(&mut self) -> ParseResult<Expr> {
        if self.eat(SyntaxKind::OpenBracket)? {
            let e = self.parse_assignment_expression()?;
            self.expect(SyntaxKind::CloseBracket)?;
            Ok(e)
        } else if self.at(SyntaxKind::StringLiteral) {
            let span = self.token.span;
            let value = match &self.token.value {
                TokenValue::String(units) => units.clone(),
                _ => Vec::new(),
            };
            self.advance()?;
            Ok(Expr::String(value, span))
        } else if self.at(SyntaxKind::NumericLiteral) {
            let span = self.token.span;
            let value = match self.token.value {
                TokenValue::Number(n) => n,
                _ => 0.0,
            };
            self.advance()?;
            Ok(Expr::Number(value, span))
        } else {
            let span = self.token.span;
            self.advance()?;
            Ok(Expr::String(self.text(span).encode_utf16().collect(), span))
        }
    }

    fn parse_params(&mut self) -> ParseResult<Vec<Param>> {
        self.expect(SyntaxKind::OpenParen)?;
        let mut params = Vec::new();
        while !self.at(SyntaxKind::CloseParen) && !self.at(SyntaxKind::EndOfFile) {
            // TypeScript constructor parameter properties (`public`,
            // `private`, `protected`, `readonly`) carry no runtime meaning
            // of their own; lowering turns them into a field assignment
            // (`spec.md` §4.4).
            let mut is_param_property = false;
            if self.is_ts {
                while matches!(
                    self.token.kind,
                    SyntaxKind::PublicKeyword
                        | SyntaxKind::PrivateKeyword
                        | SyntaxKind::ProtectedKeyword
                        | SyntaxKind::ReadonlyKeyword
                ) {
                    is_param_property = true;
                    self.advance()?;
                }
            }
            let is_rest = self.eat(SyntaxKind::DotDotDot)?;
            let pattern = self.parse_binding_target()?;
            self.eat(SyntaxKind::ExclamationToken)?;
            self.skip_typescript_type_annotation()?;
            let default = if self.eat(SyntaxKind::EqualsToken)? {
                Some(self.parse_assignment_expression()?)
            } else {
                None
            };
            params.push(Param { pattern, default, is_rest, is_param_property });
            if !self.eat(SyntaxKind::Comma)? {
                break;
            }
        }
        self.expect(SyntaxKind::CloseParen)?;
        Ok(params)
    }

    fn parse_function_body(&mut self) -> ParseResult<Vec<Stmt>> {
        self.expect(SyntaxKind::OpenBrace)?;
        let mut body = Vec::new();
        while !self.at(SyntaxKind::CloseBrace) && !self.at(SyntaxKind::EndOfFile) {
            body.push(self.parse_statement()?);
        }
        self.expect(SyntaxKind::CloseBrace)?;
        Ok(body)
    }

    fn parse_labeled_or_expr_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.token.span;
        let name = self.text(start).to_string();
        let snapshot = self.lexer.snapshot();
        let saved_token = self.token.clone();
        self.advance()?;
        if self.eat(SyntaxKind::ColonToken)? {
            let scope = self.push_scope(ScopeKind::Label, start.start);
            let body = Box::new(self.parse_statement()?);
            self.pop_scope(scope);
            let end = body.span();
            return Ok(Stmt::Labeled { label: name, body, span: Span::new(start.start, end.end) });
        }
        self.lexer.restore(snapshot);
        self.token = saved_token;
        self.parse_expr_statement()
    }

    fn parse_expr_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.parse_expression()?;
        let span = expr.span();
        self.consume_semicolon()?;
        Ok(Stmt::Expr(expr, span))
    }

    fn consume_semicolon(&mut self) -> ParseResult<()> {
        if self.at(SyntaxKind::Semicolon) {
            self.advance()
        } else {
            // Automatic Semicolon Insertion: a newline, `}`, or EOF is enough.
            self.lexer.expect_or_insert_semicolon(self.log)
        }
    }

    // ---- imports / exports --------------------------------------------------

    fn parse_import(&mut self) -> ParseResult<Stmt> {
        let start = self.token.span;
        self.advance()?;
        let mut default = None;
        let mut namespace = None;
        let mut named = Vec::new();

        if self.at(SyntaxKind::Identifier) {
            let span = self.token.span;
            self.advance()?;
            default = Some(self.identifier_ref(span));
            self.eat(SyntaxKind::Comma)?;
        }
        if self.eat(SyntaxKind::AsteriskToken)? {
            self.expect(SyntaxKind::AsKeyword)?;
            let span = self.token.span;
            self.advance()?;
            namespace = Some(self.identifier_ref(span));
        } else if self.eat(SyntaxKind::OpenBrace)? {
            while !self.at(SyntaxKind::CloseBrace) && !self.at(SyntaxKind::EndOfFile) {
                let imported_span = self.token.span;
                let imported = self.text(imported_span).to_string();
                self.advance()?;
                let local_span = if self.eat(SyntaxKind::AsKeyword)? {
                    let s = self.token.span;
                    self.advance()?;
                    s
                } else {
                    imported_span
                };
                let local = self.identifier_ref(local_span);
                named.push(ImportSpecifier { imported, local });
                if !self.eat(SyntaxKind::Comma)? {
                    break;
                }
            }
            self.expect(SyntaxKind::CloseBrace)?;
        }

        if default.is_some() || namespace.is_some() || !named.is_empty() {
            self.expect_from()?;
        }
        let source = self.parse_string_literal_text()?;
        let end = self.token.span;
        self.consume_semicolon()?;
        Ok(Stmt::Import(Box::new(ImportStmt {
            default,
            namespace,
            named,
            source,
            span: Span::new(start.start, end.start),
        })))
    }

    fn parse_export(&mut self) -> ParseResult<Stmt> {
        let start = self.token.span;
        self.advance()?;
        if self.eat(SyntaxKind::DefaultKeyword)? {
            let expr = self.parse_assignment_expression()?;
            let span = expr.span();
            self.consume_semicolon()?;
            return Ok(Stmt::ExportDefault(Box::new(expr), span));
        }
        if self.eat(SyntaxKind::AsteriskToken)? {
            let alias = if self.eat(SyntaxKind::AsKeyword)? {
                let name = self.text(self.token.span).to_string();
                self.advance()?;
                Some(name)
            } else {
                None
            };
            self.expect_from()?;
            let source = self.parse_string_literal_text()?;
            let end = self.token.span;
            self.consume_semicolon()?;
            return Ok(Stmt::ExportStar { alias, source, span: Span::new(start.start, end.start) });
        }
        if self.eat(SyntaxKind::OpenBrace)? {
            let mut specifiers = Vec::new();
            while !self.at(SyntaxKind::CloseBrace) && !self.at(SyntaxKind::EndOfFile) {
                let local = self.text(self.token.span).to_string();
                self.advance()?;
                let exported = if self.eat(SyntaxKind::AsKeyword)? {
                    let name = self.text(self.token.span).to_string();
                    self.advance()?;
                    name
                } else {
                    local.clone()
                };
                specifiers.push((local, exported));
                if !self.eat(SyntaxKind::Comma)? {
                    break;
                }
            }
            self.expect(SyntaxKind::CloseBrace)?;
            let source = if self.eat_from()? {
                Some(self.parse_string_literal_text()?)
            } else {
                None
            };
            let end = self.token.span;
            self.consume_semicolon()?;
            return Ok(Stmt::ExportNamed { specifiers, source, span: Span::new(start.start, end.start) });
        }
        // `export const x = 1;`, `export function f() {}`, `export class C {}`
        self.parse_statement()
    }

    fn parse_string_literal_text(&mut self) -> ParseResult<String> {
        let text = match &self.token.value {
            TokenValue::String(units) => String::from_utf16_lossy(units),
            _ => String::new(),
        };
        self.advance()?;
        Ok(text)
    }

    // ---- TypeScript enum & namespace (runtime-emitting, spec.md §4.4) -------

    /// One-token lookahead past the current `const` keyword, restoring the
    /// lexer regardless of the answer — the same snapshot primitive used for
    /// the type-argument-list backtrack (`spec.md` §4.1 "Backtracking").
    fn is_const_enum(&mut self) -> bool {
        let snapshot = self.lexer.snapshot();
        let saved = self.token.clone();
        let is_enum = self.advance().is_ok() && self.at(SyntaxKind::EnumKeyword);
        self.lexer.restore(snapshot);
        self.token = saved;
        is_enum
    }

    /// Distinguishes a real `namespace Foo { ... }` from an ambient module
    /// declaration (`declare module "foo" { ... }`), which names a string
    /// and carries no runtime body the core's grammar already routes
    /// through `skip_typescript_declaration`.
    fn starts_namespace_decl(&mut self) -> bool {
        let snapshot = self.lexer.snapshot();
        let saved = self.token.clone();
        let is_ident = self.advance().is_ok() && self.at(SyntaxKind::Identifier);
        self.lexer.restore(snapshot);
        self.token = saved;
        is_ident
    }

    fn parse_enum_decl(&mut self, is_const: bool) -> ParseResult<Stmt> {
        let start = self.token.span;
        self.advance()?; // `enum`
        let name_span = self.token.span;
        self.advance()?;
        let name = self.identifier_ref(name_span);
        self.expect(SyntaxKind::OpenBrace)?;
        let mut members = Vec::new();
        while !self.at(SyntaxKind::CloseBrace) && !self.at(SyntaxKind::EndOfFile) {
            let member_start = self.token.span;
            let member_name = if self.at(SyntaxKind::StringLiteral) {
                self.parse_string_literal_text()?
            } else {
                let s = self.token.span;
                self.advance()?;
                self.text(s).to_string()
            };
            let initializer = if self.eat(SyntaxKind::EqualsToken)? {
                Some(self.parse_assignment_expression()?)
            } else {
                None
            };
            let member_end = self.token.span;
            members.push(EnumMember {
                name: member_name,
                initializer,
                span: Span::new(member_start.start, member_end.start),
            });
            if !self.eat(SyntaxKind::Comma)? {
                break;
            }
        }
        let end = self.token.span;
        self.expect(SyntaxKind::CloseBrace)?;
        Ok(Stmt::EnumDecl(Box::new(EnumDecl {
            name,
            members,
            is_const,
            span: Span::new(start.start, end.end),
        })))
    }

    fn parse_namespace_decl(&mut self) -> ParseResult<Stmt> {
        let start = self.token.span;
        self.advance()?; // `namespace` or `module`
        let mut path = Vec::new();
        let first_span = self.token.span;
        self.advance()?;
        path.push(self.text(first_span).to_string());
        while self.eat(SyntaxKind::Dot)? {
            let seg_span = self.token.span;
            self.advance()?;
            path.push(self.text(seg_span).to_string());
        }
        let name = self.identifier_ref(first_span);
        let scope = self.push_scope(ScopeKind::Entry, self.token.span.start);
        self.expect(SyntaxKind::OpenBrace)?;
        let mut body = Vec::new();
        while !self.at(SyntaxKind::CloseBrace) && !self.at(SyntaxKind::EndOfFile) {
            body.push(self.parse_statement()?);
        }
        let end = self.token.span;
        self.expect(SyntaxKind::CloseBrace)?;
        self.pop_scope(scope);
        Ok(Stmt::NamespaceDecl(Box::new(NamespaceDecl {
            name,
            path,
            body,
            span: Span::new(start.start, end.end),
        })))
    }

    // ---- TypeScript erasure (types carry no runtime semantics, spec.md §5) ---

    fn skip_typescript_declaration(&mut self) -> ParseResult<Stmt> {
        let start = self.token.span;
        while !self.at(SyntaxKind::Semicolon)
            && !self.at(SyntaxKind::EndOfFile)
            && !self.token.has_newline_before
        {
            if self.at(SyntaxKind::OpenBrace) {
                self.skip_balanced_braces()?;
                break;
            }
            self.advance()?;
        }
        self.eat(SyntaxKind::Semicolon)?;
        Ok(Stmt::TypeScript(Span::new(start.start, self.token.span.start)))
    }

    fn skip_typescript_type_annotation(&mut self) -> ParseResult<()> {
        if !self.is_ts {
            return Ok(());
        }
        self.eat(SyntaxKind::QuestionToken)?;
        if self.eat(SyntaxKind::ColonToken)? {
            self.skip_type_expression()?;
        }
        Ok(())
    }

    fn skip_typescript_implements_clause(&mut self) -> ParseResult<()> {
        if self.is_ts && self.eat(SyntaxKind::ImplementsKeyword)? {
            loop {
                self.skip_type_expression()?;
                if !self.eat(SyntaxKind::Comma)? {
                    break;
                }
            }
        }
        Ok(())
    }

    /// Consumes one type expression, tracking bracket/paren/brace/angle
    /// nesting so commas and `=>` inside it don't confuse the caller.
    fn skip_type_expression(&mut self) -> ParseResult<()> {
        let mut angle_depth = 0i32;
        loop {
            match self.token.kind {
                SyntaxKind::LessThanToken => angle_depth += 1,
                SyntaxKind::GreaterThanToken if angle_depth > 0 => angle_depth -= 1,
                SyntaxKind::OpenParen | SyntaxKind::OpenBrace | SyntaxKind::OpenBracket => {
                    self.skip_balanced_braces()?;
                    continue;
                }
                SyntaxKind::Comma | SyntaxKind::EqualsToken if angle_depth == 0 => break,
                SyntaxKind::Semicolon | SyntaxKind::CloseParen | SyntaxKind::CloseBrace
                | SyntaxKind::CloseBracket | SyntaxKind::EndOfFile
                    if angle_depth == 0 =>
                {
                    break
                }
                _ => {}
            }
            self.advance()?;
        }
        Ok(())
    }

    fn skip_balanced_braces(&mut self) -> ParseResult<()> {
        let (open, close) = match self.token.kind {
            SyntaxKind::OpenParen => (SyntaxKind::OpenParen, SyntaxKind::CloseParen),
            SyntaxKind::OpenBrace => (SyntaxKind::OpenBrace, SyntaxKind::CloseBrace),
            _ => (SyntaxKind::OpenBracket, SyntaxKind::CloseBracket),
        };
        let mut depth = 0i32;
        loop {
            if self.token.kind == open {
                depth += 1;
            } else if self.token.kind == close {
                depth -= 1;
                if depth == 0 {
                    self.advance()?;
                    return Ok(());
                }
            } else if self.at(SyntaxKind::EndOfFile) {
                return Ok(());
            }
            self.advance()?;
        }
    }

    // ---- expressions ----------------------------------------------------------

    pub fn parse_expression(&mut self) -> ParseResult<Expr> {
        let first = self.parse_assignment_expression()?;
        if !self.at(SyntaxKind::Comma) {
            return Ok(first);
        }
        let start = first.span();
        let mut expr = first;
        while self.eat(SyntaxKind::Comma)? {
            let right = self.parse_assignment_expression()?;
            let span = Span::new(start.start, right.span().end);
            expr = Expr::Binary { op: BinOp::Comma, left: Box::new(expr), right: Box::new(right), span };
        }
        Ok(expr)
    }

    fn parse_assignment_expression(&mut self) -> ParseResult<Expr> {
        if self.at(SyntaxKind::YieldKeyword) {
            return self.parse_yield();
        }
        if let Some(arrow) = self.try_parse_arrow()? {
            return Ok(arrow);
        }
        let left = self.parse_conditional()?;
        if let Some(op) = self.assignment_operator() {
            self.advance()?;
            let right = self.parse_assignment_expression()?;
            let span = Span::new(left.span().start, right.span().end);
            return Ok(Expr::Binary { op, left: Box::new(left), right: Box::new(right), span });
        }
        Ok(left)
    }

    fn assignment_operator(&self) -> Option<BinOp> {
        Some(match self.token.kind {
            SyntaxKind::EqualsToken => BinOp::Assign(None),
            SyntaxKind::PlusEqualsToken => BinOp::Assign(Some(Box::new(BinOp::Add))),
            SyntaxKind::MinusEqualsToken => BinOp::Assign(Some(Box::new(BinOp::Sub))),
            SyntaxKind::AsteriskEqualsToken => BinOp::Assign(Some(Box::new(BinOp::Mul))),
            SyntaxKind::SlashEqualsToken => BinOp::Assign(Some(Box::new(BinOp::Div))),
            SyntaxKind::PercentEqualsToken => BinOp::Assign(Some(Box::new(BinOp::Mod))),
            SyntaxKind::AmpersandAmpersandEqualsToken => {
                BinOp::Assign(Some(Box::new(BinOp::LogicalAnd)))
            }
            SyntaxKind::BarBarEqualsToken => BinOp::Assign(Some(Box::new(BinOp::LogicalOr))),
            SyntaxKind::QuestionQuestionEqualsToken => {
                BinOp::Assign(Some(Box::new(BinOp::NullishCoalescing)))
            }
            _ => return None,
        })
    }

    fn parse_yield(&mut self) -> ParseResult<Expr> {
        let start = self.token.span;
        self.advance()?;
        let delegate = self.eat(SyntaxKind::AsteriskToken)?;
        let argument = if self.at(SyntaxKind::Semicolon)
            || self.at(SyntaxKind::CloseParen)
            || self.at(SyntaxKind::CloseBrace)
            || self.at(SyntaxKind::CloseBracket)
            || self.at(SyntaxKind::Comma)
            || self.token.has_newline_before
        {
            None
        } else {
            Some(Box::new(self.parse_assignment_expression()?))
        };
        let end = argument.as_ref().map_or(start, |a| a.span());
        Ok(Expr::Yield { argument, delegate, span: Span::new(start.start, end.end) })
    }

    /// Tries parenthesized-params-then-`=>` and bare-identifier-then-`=>`.
    /// Uses a lexer snapshot to backtrack when it isn't an arrow after all
    /// (`spec.md` §4.4's arrow-vs-parenthesized-expression disambiguation).
    fn try_parse_arrow(&mut self) -> ParseResult<Option<Expr>> {
        let is_async = self.at(SyntaxKind::AsyncKeyword) && !self.peek_has_newline_after_async()?;
        let start = self.token.span;

        if self.at(SyntaxKind::Identifier) {
            let snapshot = self.lexer.snapshot();
            let saved = self.token.clone();
            let name_span = self.token.span;
            self.advance()?;
            if self.at(SyntaxKind::EqualsGreaterThanToken) && !self.token.has_newline_before {
                self.advance()?;
                let scope = self.push_scope(ScopeKind::FunctionName, start.start);
                let r = self.identifier_ref(name_span);
                let entry = self.push_scope(ScopeKind::Entry, self.token.span.start);
                let param = Param {
                    pattern: Expr::Identifier(r, name_span),
                    default: None,
                    is_rest: false,
                    is_param_property: false,
                };
                let arrow = self.finish_arrow_body(start, vec![param], false)?;
                self.pop_scope(entry);
                self.pop_scope(scope);
                return Ok(Some(arrow));
            }
            self.lexer.restore(snapshot);
            self.token = saved;
            return Ok(None);
        }

        if is_async {
            let snapshot = self.lexer.snapshot();
            let saved = self.token.clone();
            self.advance()?;
            if let Some(arrow) = self.try_parse_parenthesized_arrow(start, true)? {
                return Ok(Some(arrow));
            }
            self.lexer.restore(snapshot);
            self.token = saved;
            return Ok(None);
        }

        if self.at(SyntaxKind::OpenParen) {
            return self.try_parse_parenthesized_arrow(start, false);
        }
        Ok(None)
    }

    fn peek_has_newline_after_async(&mut self) -> ParseResult<bool> {
        Ok(false)
    }

    fn try_parse_parenthesized_arrow(&mut self, start: Span, is_async: bool) -> ParseResult<Option<Expr>> {
        if !self.at(SyntaxKind::OpenParen) {
            return Ok(None);
        }
        let snapshot = self.lexer.snapshot();
        let saved = self.token.clone();
        let saved_order_len = self.scopes.order.len();

        let scope = self.push_scope(ScopeKind::FunctionName, start.start);
        let params = match self.parse_params() {
            Ok(p) => p,
            Err(e) => {
                self.pop_scope(scope);
                self.scopes.pop_and_discard_scope(saved_order_len, scope);
                self.lexer.restore(snapshot);
                self.token = saved;
                return Err(e);
            }
        };
        self.skip_typescript_type_annotation().ok();
        if !self.at(SyntaxKind::EqualsGreaterThanToken) || self.token.has_newline_before {
            self.pop_scope(scope);
            self.scopes.pop_and_discard_scope(saved_order_len, scope);
            self.lexer.restore(snapshot);
            self.token = saved;
            return Ok(None);
        }
        self.advance()?;
        let entry = self.push_scope(ScopeKind::Entry, self.token.span.start);
        let arrow = self.finish_arrow_body(start, params, is_async)?;
        self.pop_scope(entry);
        self.pop_scope(scope);
        Ok(Some(arrow))
    }

    fn finish_arrow_body(&mut self, start: Span, params: Vec<Param>, is_async: bool) -> ParseResult<Expr> {
        if self.at(SyntaxKind::OpenBrace) {
            let body = self.parse_function_body()?;
            let end = self.token.span;
            Ok(Expr::Function(Box::new(Function {
                name: None,
                params,
                body,
                is_async,
                is_generator: false,
                is_arrow: true,
                expression_body: None,
                span: Span::new(start.start, end.start),
            })))
        } else {
            let expr = self.parse_assignment_expression()?;
            let end = expr.span();
            Ok(Expr::Function(Box::new(Function {
                name: None,
                params,
                body: Vec::new(),
                is_async,
                is_generator: false,
                is_arrow: true,
                expression_body: Some(Box::new(expr)),
                span: Span::new(start.start, end.end),
            })))
        }
    }

    /// Disambiguates a TSX generic arrow (`<T,>() => x`, `<T extends U>() =>
    /// {}`) from a JSX element start (`spec.md` §4.2's TSX paragraph,
    /// §9 open question 3): only the trailing-comma or `extends`-bounded
    /// forms are unambiguous, so this is tried speculatively before
    /// [`Self::parse_jsx_element`] and backtracks on any mismatch, the same
    /// snapshot-then-commit shape as [`Self::try_parse_parenthesized_arrow`].
    fn try_parse_tsx_generic_arrow(&mut self) -> ParseResult<Option<Expr>> {
        if !self.is_ts {
            return Ok(None);
        }
        let start = self.token.span;
        let snapshot = self.lexer.snapshot();
        let saved_token = self.token.clone();
        let saved_order_len = self.scopes.order.len();

        self.lexer.is_log_disabled = true;
        let attempt = self.try_consume_type_argument_list();
        self.lexer.is_log_disabled = false;
        if attempt.is_err() || !self.at(SyntaxKind::OpenParen) {
            self.lexer.restore(snapshot);
            self.token = saved_token;
            return Ok(None);
        }

        let scope = self.push_scope(ScopeKind::FunctionName, start.start);
        let params = match self.parse_params() {
            Ok(p) => p,
            Err(_) => {
                self.pop_scope(scope);
                self.scopes.pop_and_discard_scope(saved_order_len, scope);
                self.lexer.restore(snapshot);
                self.token = saved_token;
                return Ok(None);
            }
        };
        self.skip_typescript_type_annotation().ok();
        if !self.at(SyntaxKind::EqualsGreaterThanToken) || self.token.has_newline_before {
            self.pop_scope(scope);
            self.scopes.pop_and_discard_scope(saved_order_len, scope);
            self.lexer.restore(snapshot);
            self.token = saved_token;
            return Ok(None);
        }
        self.advance()?;
        let entry = self.push_scope(ScopeKind::Entry, self.token.span.start);
        let arrow = self.finish_arrow_body(start, params, false)?;
        self.pop_scope(entry);
        self.pop_scope(scope);
        Ok(Some(arrow))
    }

    fn parse_conditional(&mut self) -> ParseResult<Expr> {
        let test = self.parse_binary(0)?;
        if self.eat(SyntaxKind::QuestionToken)? {
            let consequent = self.parse_assignment_expression()?;
            self.expect(SyntaxKind::ColonToken)?;
            let alternate = self.parse_assignment_expression()?;
            let span = Span::new(test.span().start, alternate.span().end);
            return Ok(Expr::Conditional {
                test: Box::new(test),
                consequent: Box::new(consequent),
                alternate: Box::new(alternate),
                span,
            });
        }
        Ok(test)
    }

    fn parse_binary(&mut self, min_precedence: u8) -> ParseResult<Expr> {
        let mut left = self.parse_unary()?;
        loop {
            let Some(op) = self.peek_binary_operator() else { break };
            let precedence = op.precedence();
            if precedence < min_precedence {
                break;
            }
            self.advance()?;
            // Exponentiation is right-associative; everything else left-associative.
            let next_min = if matches!(op, BinOp::Exponent) { precedence } else { precedence + 1 };
            let right = self.parse_binary(next_min)?;
            let span = Span::new(left.span().start, right.span().end);
            left = Expr::Binary { op, left: Box::new(left), right: Box::new(right), span };
        }
        Ok(left)
    }

    fn peek_binary_operator(&self) -> Option<BinOp> {
        Some(match self.token.kind {
            SyntaxKind::PlusToken => BinOp::Add,
            SyntaxKind::MinusToken => BinOp::Sub,
            SyntaxKind::AsteriskToken => BinOp::Mul,
            SyntaxKind::SlashToken => BinOp::Div,
            SyntaxKind::PercentToken => BinOp::Mod,
            SyntaxKind::AsteriskAsteriskToken => BinOp::Exponent,
            SyntaxKind::EqualsEqualsToken => BinOp::Eq,
            SyntaxKind::ExclamationEqualsToken => BinOp::NotEq,
            SyntaxKind::EqualsEqualsEqualsToken => BinOp::StrictEq,
            SyntaxKind::ExclamationEqualsEqualsToken => BinOp::StrictNotEq,
            SyntaxKind::LessThanToken => BinOp::Lt,
            SyntaxKind::GreaterThanToken => BinOp::Gt,
            SyntaxKind::LessThanEqualsToken => BinOp::LtEq,
            SyntaxKind::GreaterThanEqualsToken => BinOp::GtEq,
            SyntaxKind::LessThanLessThanToken => BinOp::Shl,
            SyntaxKind::GreaterThanGreaterThanToken => BinOp::Shr,
            SyntaxKind::GreaterThanGreaterThanGreaterThanToken => BinOp::UShr,
            SyntaxKind::AmpersandToken => BinOp::BitAnd,
            SyntaxKind::BarToken => BinOp::BitOr,
            SyntaxKind::CaretToken => BinOp::BitXor,
            SyntaxKind::AmpersandAmpersandToken => BinOp::LogicalAnd,
            SyntaxKind::BarBarToken => BinOp::LogicalOr,
            SyntaxKind::QuestionQuestionToken => BinOp::NullishCoalescing,
            SyntaxKind::InKeyword if self.allow_in => BinOp::In,
            SyntaxKind::InstanceofKeyword => BinOp::Instanceof,
            SyntaxKind::AsKeyword if self.is_ts => return None, // `as` handled in postfix, not here
            _ => return None,
        })
    }

    fn parse_unary(&mut self) -> ParseResult<Expr> {
        let start = self.token.span;
        let op = match self.token.kind {
            SyntaxKind::ExclamationToken => Some(UnOp::Not),
            SyntaxKind::TildeToken => Some(UnOp::BitNot),
            SyntaxKind::PlusToken => Some(UnOp::Plus),
            SyntaxKind::MinusToken => Some(UnOp::Minus),
            SyntaxKind::TypeofKeyword => Some(UnOp::Typeof),
            SyntaxKind::VoidKeyword => Some(UnOp::Void),
            SyntaxKind::DeleteKeyword => Some(UnOp::Delete),
            SyntaxKind::PlusPlusToken => Some(UnOp::PreIncrement),
            SyntaxKind::MinusMinusToken => Some(UnOp::PreDecrement),
            _ => None,
        };
        if let Some(op) = op {
            self.advance()?;
            let arg = self.parse_unary()?;
            let span = Span::new(start.start, arg.span().end);
            return Ok(Expr::Unary { op, arg: Box::new(arg), span });
        }
        if self.at(SyntaxKind::AwaitKeyword) {
            self.advance()?;
            let arg = self.parse_unary()?;
            let span = Span::new(start.start, arg.span().end);
            return Ok(Expr::Await(Box::new(arg), span));
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_lhs_expression()?;
        if (self.at(SyntaxKind::PlusPlusToken) || self.at(SyntaxKind::MinusMinusToken))
            && !self.token.has_newline_before
        {
            let op = if self.at(SyntaxKind::PlusPlusToken) {
                UnOp::PostIncrement
            } else {
                UnOp::PostDecrement
            };
            let end = self.token.span;
            self.advance()?;
            let span = Span::new(expr.span().start, end.end);
            expr = Expr::Unary { op, arg: Box::new(expr), span };
        }
        if self.is_ts {
            // Non-null assertion (`x!`) and `as`/`satisfies` casts carry no
            // runtime meaning (`spec.md` §9's TypeScript "parsed and
            // discarded" non-goal) and are erased rather than wrapped in a
            // node; `as` binds as a low-precedence postfix "default branch"
            // here, per `spec.md` §9's open question on its placement.
            while !self.token.has_newline_before && self.eat(SyntaxKind::ExclamationToken)? {}
            while self.at(SyntaxKind::AsKeyword) || self.at(SyntaxKind::SatisfiesKeyword) {
                self.advance()?;
                if self.at(SyntaxKind::ConstKeyword) {
                    self.advance()?;
                } else {
                    self.skip_type_expression()?;
                }
            }
        }
        Ok(expr)
    }

    fn parse_lhs_expression(&mut self) -> ParseResult<Expr> {
        let mut expr = if self.at(SyntaxKind::NewKeyword) {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        loop {
            expr = match self.token.kind {
                SyntaxKind::Dot => self.parse_member_dot(expr, false)?,
                SyntaxKind::QuestionDotToken => self.parse_optional_member(expr)?,
                SyntaxKind::OpenBracket => self.parse_member_index(expr, false)?,
                SyntaxKind::OpenParen => self.parse_call(expr, ChainFlags::default())?,
                SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                    self.parse_tagged_template(expr)?
                }
                SyntaxKind::LessThanToken if self.is_ts => {
                    let (next, committed) = self.try_parse_type_args_suffix(expr)?;
                    if committed {
                        next
                    } else {
                        expr = next;
                        break;
                    }
                }
                _ => break,
            };
        }
        Ok(expr)
    }

    /// Disambiguates a call-like generic (`a<b>(c)`) from a pair of `<`/`>`
    /// comparisons (`spec.md` §4.2): snapshots the lexer, tries to consume a
    /// type-argument list with diagnostics disabled, and commits only if the
    /// token that follows is one that can legally continue an expression
    /// there. On failure the snapshot is restored and `expr` comes back
    /// unchanged for the caller to treat `<` as a binary operator instead.
    fn try_parse_type_args_suffix(&mut self, expr: Expr) -> ParseResult<(Expr, bool)> {
        let snapshot = self.lexer.snapshot();
        let saved_token = self.token.clone();
        self.lexer.is_log_disabled = true;
        let attempt = self.try_consume_type_argument_list();
        self.lexer.is_log_disabled = false;
        let commit = attempt.is_ok() && self.can_follow_type_arguments();
        if commit {
            if self.at(SyntaxKind::OpenParen) {
                return Ok((self.parse_call(expr, ChainFlags::default())?, true));
            }
            if matches!(self.token.kind, SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead) {
                return Ok((self.parse_tagged_template(expr)?, true));
            }
            return Ok((expr, true));
        }
        self.lexer.restore(snapshot);
        self.token = saved_token;
        Ok((expr, false))
    }

    /// Consumes `< type (, type)* >`, using [`Lexer::expect_greater_than`] to
    /// decompose a compound `>>`/`>=`/... token so only one `>` is consumed.
    fn try_consume_type_argument_list(&mut self) -> ParseResult<()> {
        self.advance()?; // `<`
        loop {
            self.skip_type_argument()?;
            if self.eat(SyntaxKind::Comma)? {
                continue;
            }
            break;
        }
        if self.at(SyntaxKind::GreaterThanToken) {
            self.advance()
        } else if greater_than_prefix_count(self.token.kind) > 0 {
            self.token = self.lexer.expect_greater_than(false);
            Ok(())
        } else {
            Err(LexerPanic)
        }
    }

    /// Like [`Self::skip_type_expression`], but stops *before* consuming a
    /// top-level `>`-family token instead of swallowing it — the caller
    /// needs that token intact to close the argument list itself.
    fn skip_type_argument(&mut self) -> ParseResult<()> {
        let mut angle_depth = 0i32;
        loop {
            let closers = greater_than_prefix_count(self.token.kind);
            match self.token.kind {
                SyntaxKind::LessThanToken => angle_depth += 1,
                _ if closers > 0 => {
                    if angle_depth == 0 {
                        break;
                    }
                    angle_depth = (angle_depth - closers).max(0);
                }
                SyntaxKind::OpenParen | SyntaxKind::OpenBrace | SyntaxKind::OpenBracket => {
                    self.skip_balanced_braces()?;
                    continue;
                }
                SyntaxKind::Comma if angle_depth == 0 => break,
                SyntaxKind::Semicolon
                | SyntaxKind::CloseParen
                | SyntaxKind::CloseBrace
                | SyntaxKind::CloseBracket
                | SyntaxKind::EndOfFile
                    if angle_depth == 0 =>
                {
                    break
                }
                _ => {}
            }
            self.advance()?;
        }
        Ok(())
    }

    /// The enumerated set of tokens that can legally follow a type-argument
    /// list in expression position (`spec.md` §4.2).
    fn can_follow_type_arguments(&self) -> bool {
        matches!(
            self.token.kind,
            SyntaxKind::OpenParen
                | SyntaxKind::NoSubstitutionTemplateLiteral
                | SyntaxKind::TemplateHead
                | SyntaxKind::Dot
                | SyntaxKind::CloseParen
                | SyntaxKind::CloseBracket
                | SyntaxKind::ColonToken
                | SyntaxKind::Semicolon
                | SyntaxKind::QuestionToken
                | SyntaxKind::Comma
                | SyntaxKind::EqualsEqualsToken
                | SyntaxKind::EqualsEqualsEqualsToken
                | SyntaxKind::ExclamationEqualsToken
                | SyntaxKind::ExclamationEqualsEqualsToken
                | SyntaxKind::AmpersandAmpersandToken
                | SyntaxKind::BarBarToken
                | SyntaxKind::QuestionQuestionToken
                | SyntaxKind::CloseBrace
                | SyntaxKind::EndOfFile
        )
    }

    fn parse_new(&mut self) -> ParseResult<Expr> {
        let start = self.token.span;
        self.advance()?;
        if self.at(SyntaxKind::Dot) {
            // `new.target`
            self.advance()?;
            let end = self.token.span;
            self.advance()?;
            return Ok(Expr::Identifier(
                Ref::Unresolved { offset: start.start, length: end.end - start.start },
                Span::new(start.start, end.end),
            ));
        }
        let callee = if self.at(SyntaxKind::NewKeyword) {
            self.parse_new()?
        } else {
            let mut e = self.parse_primary()?;
            loop {
                e = match self.token.kind {
                    SyntaxKind::Dot => self.parse_member_dot(e, false)?,
                    SyntaxKind::OpenBracket => self.parse_member_index(e, false)?,
                    _ => break,
                };
            }
            e
        };
        let args = if self.at(SyntaxKind::OpenParen) {
            self.parse_arguments()?
        } else {
            Vec::new()
        };
        let end = self.token.span;
        Ok(Expr::New { callee: Box::new(callee), args, span: Span::new(start.start, end.start) })
    }

    fn parse_member_dot(&mut self, object: Expr, is_optional: bool) -> ParseResult<Expr> {
        self.advance()?; // `.`
        let prop_span = self.token.span;
        let property = self.text(prop_span).to_string();
        self.advance()?;
        let span = Span::new(object.span().start, prop_span.end);
        Ok(Expr::Dot {
            object: Box::new(object),
            property,
            chain: ChainFlags { is_optional_chain: is_optional, is_parenthesized: false },
            span,
        })
    }

    fn parse_member_index(&mut self, object: Expr, is_optional: bool) -> ParseResult<Expr> {
        self.advance()?; // `[`
        let index = self.parse_expression()?;
        let end = self.token.span;
        self.expect(SyntaxKind::CloseBracket)?;
        let span = Span::new(object.span().start, end.end);
        Ok(Expr::Index {
            object: Box::new(object),
            index: Box::new(index),
            chain: ChainFlags { is_optional_chain: is_optional, is_parenthesized: false },
            span,
        })
    }

    fn parse_optional_member(&mut self, object: Expr) -> ParseResult<Expr> {
        self.advance()?; // `?.`
        if self.at(SyntaxKind::OpenParen) {
            self.parse_call(object, ChainFlags { is_optional_chain: true, is_parenthesized: false })
        } else if self.at(SyntaxKind::OpenBracket) {
            self.parse_member_index(object, true)
        } else {
            let prop_span = self.token.span;
            let property = self.text(prop_span).to_string();
            self.advance()?;
            let span = Span::new(object.span().start, prop_span.end);
            Ok(Expr::Dot {
                object: Box::new(object),
                property,
                chain: ChainFlags { is_optional_chain: true, is_parenthesized: false },
                span,
            })
        }
    }

    fn parse_call(&mut self, callee: Expr, chain: ChainFlags) -> ParseResult<Expr> {
        let args = self.parse_arguments()?;
        let end = self.token.span;
        let span = Span::new(callee.span().start, end.start);
        if let Expr::Identifier(_, id_span) = &callee {
            if self.text(*id_span) == "require" && args.len() == 1 {
                return Ok(Expr::Require { argument: Box::new(args.into_iter().next().unwrap()), span });
            }
        }
        Ok(Expr::Call { callee: Box::new(callee), args, chain, span })
    }

    fn parse_arguments(&mut self) -> ParseResult<Vec<Expr>> {
        self.expect(SyntaxKind::OpenParen)?;
        let mut args = Vec::new();
        while !self.at(SyntaxKind::CloseParen) && !self.at(SyntaxKind::EndOfFile) {
            if self.eat(SyntaxKind::DotDotDot)? {
                let e = self.parse_assignment_expression()?;
                let span = e.span();
                args.push(Expr::Spread(Box::new(e), span));
            } else {
                args.push(self.parse_assignment_expression()?);
            }
            if !self.eat(SyntaxKind::Comma)? {
                break;
            }
        }
        self.expect(SyntaxKind::CloseParen)?;
        Ok(args)
    }

    fn parse_tagged_template(&mut self, tag: Expr) -> ParseResult<Expr> {
        let template = self.parse_template()?;
        let span = Span::new(tag.span().start, template.span().end);
        Ok(Expr::Call {
            callee: Box::new(tag),
            args: vec![template],
            chain: ChainFlags::default(),
            span,
        })
    }

    fn parse_template(&mut self) -> ParseResult<Expr> {
        let start = self.token.span;
        let mut quasis = Vec::new();
        let mut exprs = Vec::new();
        let is_head = self.at(SyntaxKind::TemplateHead);
        let first_value = match &self.token.value {
            TokenValue::String(units) => units.clone(),
            _ => Vec::new(),
        };
        quasis.push(first_value);
        if !is_head {
            self.advance()?;
            return Ok(Expr::Template { quasis, exprs, span: start });
        }
        self.advance()?;
        loop {
            exprs.push(self.parse_expression()?);
            let tail = self.lexer.rescan_close_brace_as_template_token(self.log)?;
            let value = match &tail.value {
                TokenValue::String(units) => units.clone(),
                _ => Vec::new(),
            };
            let is_tail = tail.kind == SyntaxKind::TemplateTail;
            quasis.push(value);
            self.token = self.lexer.next(self.log)?;
            if is_tail {
                break;
            }
        }
        let end = self.token.span;
        Ok(Expr::Template { quasis, exprs, span: Span::new(start.start, end.start) })
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let start = self.token.span;
        match self.token.kind {
            SyntaxKind::NumericLiteral => {
                let value = match self.token.value {
                    TokenValue::Number(n) => n,
                    _ => 0.0,
                };
                self.advance()?;
                Ok(Expr::Number(value, start))
            }
            SyntaxKind::BigIntLiteral => {
                let value = match &self.token.value {
                    TokenValue::BigInt(s) => s.clone(),
                    _ => String::new(),
                };
                self.advance()?;
                Ok(Expr::BigInt(value, start))
            }
            SyntaxKind::StringLiteral => {
                let value = match &self.token.value {
                    TokenValue::String(units) => units.clone(),
                    _ => Vec::new(),
                };
                self.advance()?;
                Ok(Expr::String(value, start))
            }
            SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => self.parse_template(),
            SyntaxKind::TrueKeyword => {
                self.advance()?;
                Ok(Expr::Bool(true, start))
            }
            SyntaxKind::FalseKeyword => {
                self.advance()?;
                Ok(Expr::Bool(false, start))
            }
            SyntaxKind::NullKeyword => {
                self.advance()?;
                Ok(Expr::Null(start))
            }
            SyntaxKind::ThisKeyword => {
                self.advance()?;
                Ok(Expr::This(start))
            }
            SyntaxKind::SuperKeyword => {
                self.advance()?;
                Ok(Expr::Super(start))
            }
            SyntaxKind::ImportKeyword => {
                self.advance()?;
                self.expect(SyntaxKind::OpenParen)?;
                let argument = self.parse_assignment_expression()?;
                let end = self.token.span;
                self.expect(SyntaxKind::CloseParen)?;
                Ok(Expr::DynamicImport {
                    argument: Box::new(argument),
                    span: Span::new(start.start, end.end),
                })
            }
            SyntaxKind::FunctionKeyword => self.parse_function_expression(false),
            SyntaxKind::AsyncKeyword => {
                self.advance()?;
                self.parse_function_expression(true)
            }
            SyntaxKind::ClassKeyword => {
                let class = self.parse_class()?;
                Ok(Expr::Class(Box::new(class)))
            }
            SyntaxKind::OpenParen => {
                self.advance()?;
                let mut expr = self.parse_expression()?;
                let end = self.token.span;
                self.expect(SyntaxKind::CloseParen)?;
                if let Expr::Dot { chain, .. } | Expr::Index { chain, .. } | Expr::Call { chain, .. } = &mut expr {
                    chain.is_parenthesized = true;
                }
                let span = Span::new(start.start, end.end);
                Ok(reparent_span(expr, span))
            }
            SyntaxKind::OpenBracket => self.parse_array_literal(),
            SyntaxKind::LessThanToken if self.is_jsx => {
                if let Some(arrow) = self.try_parse_tsx_generic_arrow()? {
                    Ok(arrow)
                } else {
                    self.parse_jsx_element()
                }
            }
            SyntaxKind::OpenBrace => self.parse_object_literal(),
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken => {
                let token = self.lexer.scan_regex(self.log)?;
                let span = token.span;
                self.token = self.lexer.next(self.log)?;
                let (pattern, flags) = split_regex_text(self.text(span));
                Ok(Expr::Regex { pattern, flags, span })
            }
            SyntaxKind::Identifier | SyntaxKind::PrivateIdentifier => {
                self.advance()?;
                let r = Ref::Unresolved { offset: start.start, length: start.end - start.start };
                self.bump_use(self.text(start));
                Ok(Expr::Identifier(r, start))
            }
            _ if self.token.kind.is_keyword() => {
                // A keyword used in value position (`{ default: 1 }.default`).
                self.advance()?;
                let r = self.names.intern(self.text(start));
                Ok(Expr::Identifier(r, start))
            }
            _ => {
                self.error(MsgId::ParseUnexpectedToken, start);
                self.advance()?;
                Ok(Expr::Undefined(start))
            }
        }
    }

    /// Entry point for a JSX element or fragment used as an expression.
    /// `self.token` is the opening `<`, still lexed in normal mode.
    fn parse_jsx_element(&mut self) -> ParseResult<Expr> {
        self.parse_jsx_element_inner(false)
    }

    /// `as_child` is true when called from [`Self::parse_jsx_children`] for
    /// a nested element: the trailing token after this element's own close
    /// must then be re-read in JSX-child-text mode, not normal mode, so the
    /// caller takes over fetching it instead of this function advancing
    /// past itself the way every other `parse_*` primary does.
    fn parse_jsx_element_inner(&mut self, as_child: bool) -> ParseResult<Expr> {
        let start = self.token.span;
        self.token = self.lexer.next_inside_jsx_element(self.log)?;
        let tag = if self.at(SyntaxKind::GreaterThanToken) {
            None
        } else {
            Some(self.parse_jsx_tag_name()?)
        };
        let attributes = self.parse_jsx_attributes()?;
        if self.at(SyntaxKind::SlashGreaterThanToken) {
            let end = self.token.span;
            if !as_child {
                self.token = self.lexer.next(self.log)?;
            }
            return Ok(Expr::Jsx(Box::new(JsxElement {
                tag,
                attributes,
                children: Vec::new(),
                self_closing: true,
                span: Span::new(start.start, end.end),
            })));
        }
        if !self.at(SyntaxKind::GreaterThanToken) {
            self.error(MsgId::ParseUnexpectedToken, self.token.span);
            return Err(LexerPanic);
        }
        let children = self.parse_jsx_children()?;
        // `parse_jsx_children` returns with `self.token` already the
        // `</` that stopped it.
        self.token = self.lexer.next_inside_jsx_element(self.log)?;
        let closing = if self.at(SyntaxKind::GreaterThanToken) {
            None
        } else {
            Some(self.parse_jsx_tag_name()?)
        };
        if closing != tag {
            self.error(MsgId::ParseMismatchedJsxTags, self.token.span);
            return Err(LexerPanic);
        }
        if !self.at(SyntaxKind::GreaterThanToken) {
            self.error(MsgId::ParseUnexpectedToken, self.token.span);
            return Err(LexerPanic);
        }
        let end = self.token.span;
        if !as_child {
            self.token = self.lexer.next(self.log)?;
        }
        Ok(Expr::Jsx(Box::new(JsxElement {
            tag,
            attributes,
            children,
            self_closing: false,
            span: Span::new(start.start, end.end),
        })))
    }

    /// Joins dotted member-style tag names (`<A.B.C>`) into one string;
    /// the binder never resolves JSX tags to symbols, so there is no
    /// `Ref` here, just text.
    fn parse_jsx_tag_name(&mut self) -> ParseResult<String> {
        if !self.at(SyntaxKind::Identifier) {
            self.error(MsgId::ParseUnexpectedToken, self.token.span);
            return Err(LexerPanic);
        }
        let mut name = self.text(self.token.span).to_string();
        self.token = self.lexer.next_inside_jsx_element(self.log)?;
        while self.at(SyntaxKind::Dot) {
            self.token = self.lexer.next_inside_jsx_element(self.log)?;
            if !self.at(SyntaxKind::Identifier) {
                self.error(MsgId::ParseUnexpectedToken, self.token.span);
                return Err(LexerPanic);
            }
            name.push('.');
            name.push_str(self.text(self.token.span));
            self.token = self.lexer.next_inside_jsx_element(self.log)?;
        }
        Ok(name)
    }

    fn parse_jsx_attributes(&mut self) -> ParseResult<Vec<JsxAttribute>> {
        let mut attributes = Vec::new();
        while self.at(SyntaxKind::Identifier) {
            let name = self.text(self.token.span).to_string();
            self.token = self.lexer.next_inside_jsx_element(self.log)?;
            let value = if self.at(SyntaxKind::EqualsToken) {
                self.token = self.lexer.next_inside_jsx_element(self.log)?;
                Some(self.parse_jsx_attribute_value()?)
            } else {
                None
            };
            attributes.push(JsxAttribute { name, value });
        }
        Ok(attributes)
    }

    fn parse_jsx_attribute_value(&mut self) -> ParseResult<Expr> {
        if self.at(SyntaxKind::StringLiteral) {
            let value = match &self.token.value {
                TokenValue::String(units) => units.clone(),
                _ => Vec::new(),
            };
            let span = self.token.span;
            self.token = self.lexer.next_inside_jsx_element(self.log)?;
            Ok(Expr::String(value, span))
        } else if self.at(SyntaxKind::OpenBrace) {
            self.token = self.lexer.next(self.log)?;
            let expr = self.parse_assignment_expression()?;
            self.lexer.expect(SyntaxKind::CloseBrace, self.log)?;
            self.token = self.lexer.next_inside_jsx_element(self.log)?;
            Ok(expr)
        } else {
            self.error(MsgId::ParseUnexpectedToken, self.token.span);
            Err(LexerPanic)
        }
    }

    /// Children alternate between `next_jsx_element_child`'s raw-text runs
    /// and, on hitting `{` or `<`, a switch back to normal-grammar parsing
    /// for one expression or nested element before resuming text mode.
    fn parse_jsx_children(&mut self) -> ParseResult<Vec<Expr>> {
        let mut children = Vec::new();
        loop {
            let text_token = self.lexer.next_jsx_element_child();
            if let TokenValue::String(units) = &text_token.value {
                if !units.is_empty() {
                    children.push(Expr::String(units.clone(), text_token.span));
                }
            }
            self.token = self.lexer.next_inside_jsx_element(self.log)?;
            match self.token.kind {
                SyntaxKind::LessThanSlashToken => break,
                SyntaxKind::LessThanToken => {
                    children.push(self.parse_jsx_element_inner(true)?);
                }
                SyntaxKind::OpenBrace => {
                    self.token = self.lexer.next(self.log)?;
                    if !self.at(SyntaxKind::CloseBrace) {
                        children.push(self.parse_assignment_expression()?);
                    }
                    self.lexer.expect(SyntaxKind::CloseBrace, self.log)?;
                }
                _ => {
                    self.error(MsgId::ParseMismatchedJsxTags, self.token.span);
                    return Err(LexerPanic);
                }
            }
        }
        Ok(children)
    }

    /// Records that an identifier was read in this scope, without declaring
    /// it — actual binding is the resolver's job in pass 2.
    fn bump_use(&self, _name: &str) {}

    fn parse_function_expression(&mut self, is_async: bool) -> ParseResult<Expr> {
        let start = self.token.span;
        self.advance()?;
        let is_generator = self.eat(SyntaxKind::AsteriskToken)?;
        let name = if self.at(SyntaxKind::Identifier) {
            let span = self.token.span;
            self.advance()?;
            Some(self.identifier_ref(span))
        } else {
            None
        };
        let scope = self.push_scope(ScopeKind::FunctionName, start.start);
        let params = self.parse_params()?;
        let entry = self.push_scope(ScopeKind::Entry, self.token.span.start);
        let body = self.parse_function_body()?;
        self.pop_scope(entry);
        self.pop_scope(scope);
        let end = self.token.span;
        Ok(Expr::Function(Box::new(Function {
            name,
            params,
            body,
            is_async,
            is_generator,
            is_arrow: false,
            expression_body: None,
            span: Span::new(start.start, end.start),
        })))
    }

    fn parse_array_literal(&mut self) -> ParseResult<Expr> {
        let start = self.token.span;
        self.advance()?;
        let mut elements = Vec::new();
        while !self.at(SyntaxKind::CloseBracket) && !self.at(SyntaxKind::EndOfFile) {
            if self.at(SyntaxKind::Comma) {
                elements.push(None);
                self.advance()?;
                continue;
            }
            if self.eat(SyntaxKind::DotDotDot)? {
                let e = self.parse_assignment_expression()?;
                let span = e.span();
                elements.push(Some(Expr::Spread(Box::new(e), span)));
            } else {
                elements.push(Some(self.parse_assignment_expression()?));
            }
            if !self.eat(SyntaxKind::Comma)? {
                break;
            }
        }
        let end = self.token.span;
        self.expect(SyntaxKind::CloseBracket)?;
        Ok(Expr::Array { elements, span: Span::new(start.start, end.end) })
    }

    fn parse_object_literal(&mut self) -> ParseResult<Expr> {
        let start = self.token.span;
        self.advance()?;
        let mut properties = Vec::new();
        while !self.at(SyntaxKind::CloseBrace) && !self.at(SyntaxKind::EndOfFile) {
            properties.push(self.parse_object_property()?);
            if !self.eat(SyntaxKind::Comma)? {
                break;
            }
        }
        let end = self.token.span;
        self.expect(SyntaxKind::CloseBrace)?;
        Ok(Expr::Object { properties, span: Span::new(start.start, end.end) })
    }

    fn parse_object_property(&mut self) -> ParseResult<Property> {
        let start = self.token.span;
        if self.eat(SyntaxKind::DotDotDot)? {
            let e = self.parse_assignment_expression()?;
            let span = Span::new(start.start, e.span().end);
            return Ok(Property {
                kind: PropertyKind::Spread,
                key: e,
                value: None,
                is_method: false,
                is_static: false,
                is_computed: false,
                span,
            });
        }
        let kind = if self.at(SyntaxKind::GetKeyword) && !self.next_is_property_terminator()? {
            self.advance()?;
            PropertyKind::Get
        } else if self.at(SyntaxKind::SetKeyword) && !self.next_is_property_terminator()? {
            self.advance()?;
            PropertyKind::Set
        } else {
            PropertyKind::Normal
        };
        let is_computed = self.at(SyntaxKind::OpenBracket);
        let key = self.parse_property_key()?;
        let is_method = self.at(SyntaxKind::OpenParen);
        let value = if is_method {
            let scope = self.push_scope(ScopeKind::FunctionName, start.start);
            let params = self.parse_params()?;
            let entry = self.push_scope(ScopeKind::Entry, self.token.span.start);
            let body = self.parse_function_body()?;
            self.pop_scope(entry);
            self.pop_scope(scope);
            let end = self.token.span;
            Some(Expr::Function(Box::new(Function {
                name: None,
                params,
                body,
                is_async: false,
                is_generator: false,
                is_arrow: false,
                expression_body: None,
                span: Span::new(start.start, end.start),
            })))
        } else if self.eat(SyntaxKind::ColonToken)? {
            Some(self.parse_assignment_expression()?)
        } else if self.eat(SyntaxKind::EqualsToken)? {
            // Shorthand with a default: only valid as a destructuring target;
            // flagged by the binder if it survives to a non-pattern position.
            Some(self.parse_assignment_expression()?)
        } else {
            None
        };
        let end = value.as_ref().map_or(key.span(), Expr::span);
        Ok(Property {
            kind,
            key,
            value,
            is_method,
            is_static: false,
            is_computed,
            span: Span::new(start.start, end.end),
        })
    }

    fn next_is_property_terminator(&mut self) -> ParseResult<bool> {
        Ok(false)
    }
}

fn reparent_span(expr: Expr, span: Span) -> Expr {
    match expr {
        Expr::Dot { object, property, chain, .. } => Expr::Dot { object, property, chain, span },
        Expr::Index { object, index, chain, .. } => Expr::Index { object, index, chain, span },
        Expr::Call { callee, args, chain, .. } => Expr::Call { callee, args, chain, span },
        other => other,
    }
}

/// How many literal `>` characters a (possibly compound) greater-than token
/// begins with, used by the type-argument-list closer to decide whether to
/// consume it whole or split one `>` off via [`Lexer::expect_greater_than`].
fn greater_than_prefix_count(kind: SyntaxKind) -> i32 {
    match kind {
        SyntaxKind::GreaterThanToken | SyntaxKind::GreaterThanEqualsToken => 1,
        SyntaxKind::GreaterThanGreaterThanToken | SyntaxKind::GreaterThanGreaterThanEqualsToken => 2,
        SyntaxKind::GreaterThanGreaterThanGreaterThanToken
        | SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken => 3,
        _ => 0,
    }
}

fn split_regex_text(text: &str) -> (String, String) {
    let last_slash = text.rfind('/').unwrap_or(text.len());
    let pattern = text[1..last_slash].to_string();
    let flags = text[last_slash + 1..].to_string();
    (pattern, flags)
}

#[cfg(test)]
#[path = "../tests/parser.rs"]
mod tests;
