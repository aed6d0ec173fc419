//! Pass 3: constant folding, defines substitution, import/require path
//! tracking, and target-conditional syntactic lowering (`spec.md` §4.3–4.5).
//!
//! Walks the same tree the binder just resolved, a third time, replaying
//! the same recorded scope order purely to track which `Entry` scope owns
//! a freshly generated temporary (`generate_temp_ref`). Unlike the
//! binder's in-place `&mut Expr` visitor, every rule here consumes and
//! returns the node it rewrites — the idiom the crate's other lowering
//! modules (`chain`, `classes`, `enum_lower`, `namespace`, `mangle`)
//! already use.
//!
//! The mutable bookkeeping (`names`, `scopes`, the temp counter, the
//! import-path list) lives behind a `RefCell` rather than plain `&mut
//! self` fields: `chain::lower_chain` takes two closures (`visit`,
//! `fresh_temp`) that both need to reach back into this state, and a
//! single `&mut self` can't be captured by two closures alive at once. A
//! shared `&Lowering` can.

use std::cell::RefCell;

use tsz_binder::{SymbolId, SymbolKind, SymbolTable};
use tsz_common::{ImportKind, ImportPath, ScriptTarget, Source, SourceId, Span};
use tsz_parser::ast::{
    Ast, BinOp, CatchClause, Class, EnumDecl, Expr, Function, NamespaceDecl, Property, Stmt,
    SwitchCase, UnOp, VarDeclarator, VarKind,
};
use tsz_parser::refs::{NamePool, Ref};
use tsz_parser::scope::{ScopeArena, ScopeId, ScopeKind};

use crate::chain;
use crate::classes::{self, StaticField};
use crate::defines::Defines;
use crate::enum_lower;
use crate::fold;
use crate::imports::{self, NamespaceImports};
use crate::mangle;
use crate::namespace;

const MODULE_SCOPE: ScopeId = ScopeId(0);

/// Per-file configuration a host passes in through `tsz-core` (`spec.md`
/// §6 `ParseOptions`).
pub struct LoweringOptions<'a> {
    pub target: ScriptTarget,
    pub defines: &'a Defines,
    pub mangle_syntax: bool,
    pub is_bundling: bool,
}

/// What pass 3 hands back to the caller alongside the rewritten `Ast`.
pub struct LowerOutput {
    /// Every module dependency discovered, static imports/re-exports first
    /// in declaration order, then `require`/`import()` calls in visit
    /// order (`spec.md` §4.5, scenario 6).
    pub import_paths: Vec<ImportPath>,
}

struct State<'a> {
    names: &'a mut NamePool,
    scopes: &'a mut ScopeArena,
    scope_cursor: usize,
    current_scope: ScopeId,
    temp_counter: u32,
    stem: String,
    import_paths: Vec<ImportPath>,
    namespaces: NamespaceImports,
    /// Depth of constant-folded `if` branches known never to run; a
    /// `require`/`import()` reached while this is non-zero is still
    /// lowered for correctness but not recorded as a dependency.
    dead_depth: u32,
    try_depth: u32,
}

pub struct Lowering<'a> {
    source_id: SourceId,
    source_text: &'a str,
    symbols: &'a SymbolTable,
    target: ScriptTarget,
    defines: &'a Defines,
    mangle_syntax: bool,
    is_bundling: bool,
    /// The module-scope `require` symbol the binder pre-declared when
    /// `is_bundling`, resolved once up front rather than by name on every
    /// identifier visited.
    require_symbol: Option<SymbolId>,
    state: RefCell<State<'a>>,
}

impl<'a> Lowering<'a> {
    #[must_use]
    pub fn new(
        source: &'a Source,
        names: &'a mut NamePool,
        scopes: &'a mut ScopeArena,
        symbols: &'a SymbolTable,
        options: LoweringOptions<'a>,
    ) -> Self {
        let require_symbol = scopes.get(MODULE_SCOPE).members.get("require").and_then(|r| match r {
            Ref::Symbol { slot, .. } => Some(SymbolId(*slot)),
            _ => None,
        });
        let stem = source.identifier_name.clone();
        Self {
            source_id: source.index,
            source_text: &source.contents,
            symbols,
            target: options.target,
            defines: options.defines,
            mangle_syntax: options.mangle_syntax,
            is_bundling: options.is_bundling,
            require_symbol,
            state: RefCell::new(State {
                names,
                scopes,
                scope_cursor: 0,
                current_scope: MODULE_SCOPE,
                temp_counter: 0,
                stem,
                import_paths: Vec::new(),
                namespaces: NamespaceImports::new(),
                dead_depth: 0,
                try_depth: 0,
            }),
        }
    }

    /// Runs pass 3 end to end: pre-scans static imports, registers import
    /// namespaces, then walks and rewrites the body in place.
    pub fn lower(self, ast: &mut Ast) -> LowerOutput {
        for r in imports::collect_namespace_refs(ast) {
            self.state.borrow_mut().namespaces.register(r);
        }
        let static_paths = imports::collect_static_import_paths(ast);

        self.push_scope(ScopeKind::Entry);
        let body = std::mem::take(&mut ast.body);
        let mut body = self.lower_stmt_list(body);
        if self.mangle_syntax {
            body = mangle::mangle_statements(body);
        }
        ast.body = body;
        self.pop_scope(MODULE_SCOPE);

        let mut state = self.state.into_inner();
        let mut import_paths = static_paths;
        import_paths.append(&mut state.import_paths);
        LowerOutput { import_paths }
    }

    // ---- scope replay, mirroring tsz-binder's own -------------------------

    fn push_scope(&self, expected: ScopeKind) -> ScopeId {
        let mut st = self.state.borrow_mut();
        let (_, id) = st.scopes.order[st.scope_cursor];
        debug_assert_eq!(
            st.scopes.get(id).kind,
            expected,
            "lowering's scope replay drifted out of sync with the parse pass",
        );
        st.scope_cursor += 1;
        st.current_scope = id;
        id
    }

    fn pop_scope(&self, parent: ScopeId) {
        self.state.borrow_mut().current_scope = parent;
    }

    fn nearest_entry_scope(&self) -> ScopeId {
        let st = self.state.borrow();
        let mut id = st.current_scope;
        loop {
            if st.scopes.get(id).kind == ScopeKind::Entry {
                return id;
            }
            id = st.scopes.get(id).parent.expect("every scope chain terminates at the module Entry scope");
        }
    }

    fn generate_temp_ref(&self) -> Ref {
        let entry = self.nearest_entry_scope();
        let mut st = self.state.borrow_mut();
        st.temp_counter += 1;
        let name = format!("_{}{}", st.stem, st.temp_counter);
        let r = st.names.intern(name);
        st.scopes.get_mut(entry).generated.push(r);
        r
    }

    fn record_import(&self, path: ImportPath) {
        let mut st = self.state.borrow_mut();
        if st.dead_depth == 0 {
            st.import_paths.push(path);
        }
    }

    fn enter_dead(&self) {
        self.state.borrow_mut().dead_depth += 1;
    }

    fn exit_dead(&self) {
        self.state.borrow_mut().dead_depth -= 1;
    }

    fn enter_try(&self) {
        self.state.borrow_mut().try_depth += 1;
    }

    fn exit_try(&self) {
        self.state.borrow_mut().try_depth -= 1;
    }

    fn is_in_try(&self) -> bool {
        self.state.borrow().try_depth > 0
    }

    fn is_require_symbol(&self, r: Ref) -> bool {
        let Ref::Symbol { slot, .. } = r else {
            return false;
        };
        match self.require_symbol {
            Some(id) => self.symbols.resolve(SymbolId(slot)) == self.symbols.resolve(id),
            None => false,
        }
    }

    fn unbound_name(&self, r: Ref) -> Option<String> {
        let Ref::Symbol { slot, .. } = r else {
            return None;
        };
        let root = self.symbols.resolve(SymbolId(slot));
        let symbol = self.symbols.get(root);
        (symbol.kind == SymbolKind::Unbound).then(|| symbol.name.clone())
    }

    fn defines_path(&self, e: &Expr) -> Option<Vec<String>> {
        match e {
            Expr::Identifier(r, _) => Some(vec![self.unbound_name(*r)?]),
            Expr::Dot { object, property, chain, .. } if !chain.is_optional_chain => {
                let mut base = self.defines_path(object)?;
                base.push(property.clone());
                Some(base)
            }
            _ => None,
        }
    }

    // ---- statements ---------------------------------------------------------

    fn lower_stmt_list(&self, stmts: Vec<Stmt>) -> Vec<Stmt> {
        stmts.into_iter().flat_map(|s| self.lower_stmt(s)).collect()
    }

    fn lower_stmt(&self, stmt: Stmt) -> Vec<Stmt> {
        match stmt {
            Stmt::Block(body, span) => {
                let parent = self.push_scope(ScopeKind::Block);
                let body = self.lower_stmt_list(body);
                self.pop_scope(parent);
                vec![Stmt::Block(body, span)]
            }
            Stmt::Expr(e, span) => vec![Stmt::Expr(self.lower_expr(e), span)],
            Stmt::If { test, consequent, alternate, span } => {
                let test = self.lower_expr(test);
                let known = fold::truthiness(&test);
                let consequent = self.lower_branch(*consequent, known == Some(false));
                let alternate = match alternate {
                    Some(a) => Some(Box::new(self.lower_branch(*a, known == Some(true))[0].clone())),
                    None => None,
                };
                // `lower_branch` returns a single statement (blocks stay
                // blocks), so indexing `[0]` above never panics; re-derive
                // it directly to avoid the clone.
                let consequent = Box::new(consequent.into_iter().next().expect("lower_branch always yields one statement"));
                vec![Stmt::If { test, consequent, alternate, span }]
            }
            Stmt::For { init, test, update, body, span } => {
                let parent = self.push_scope(ScopeKind::Block);
                let init = init.map(|b| Box::new(self.lower_stmt(*b).into_iter().next().expect("one statement")));
                let test = test.map(|t| self.lower_expr(t));
                let update = update.map(|u| self.lower_expr(u));
                let body = Box::new(self.lower_stmt(*body).into_iter().next().expect("one statement"));
                self.pop_scope(parent);
                vec![Stmt::For { init, test, update, body, span }]
            }
            Stmt::ForIn { left, right, body, span } => {
                let parent = self.push_scope(ScopeKind::Block);
                let left = Box::new(self.lower_stmt(*left).into_iter().next().expect("one statement"));
                let right = self.lower_expr(right);
                let body = Box::new(self.lower_stmt(*body).into_iter().next().expect("one statement"));
                self.pop_scope(parent);
                vec![Stmt::ForIn { left, right, body, span }]
            }
            Stmt::ForOf { left, right, body, is_await, span } => {
                let parent = self.push_scope(ScopeKind::Block);
                let left = Box::new(self.lower_stmt(*left).into_iter().next().expect("one statement"));
                let right = self.lower_expr(right);
                let body = Box::new(self.lower_stmt(*body).into_iter().next().expect("one statement"));
                self.pop_scope(parent);
                vec![Stmt::ForOf { left, right, body, is_await, span }]
            }
            Stmt::While { test, body, span } => {
                let test = self.lower_expr(test);
                let body = Box::new(self.lower_stmt(*body).into_iter().next().expect("one statement"));
                vec![Stmt::While { test, body, span }]
            }
            Stmt::DoWhile { body, test, span } => {
                let body = Box::new(self.lower_stmt(*body).into_iter().next().expect("one statement"));
                let test = self.lower_expr(test);
                vec![Stmt::DoWhile { body, test, span }]
            }
            Stmt::With { object, body, span } => {
                let object = self.lower_expr(object);
                let body = Box::new(self.lower_stmt(*body).into_iter().next().expect("one statement"));
                vec![Stmt::With { object, body, span }]
            }
            Stmt::Switch { discriminant, cases, span } => {
                let discriminant = self.lower_expr(discriminant);
                let parent = self.push_scope(ScopeKind::Block);
                let cases = cases.into_iter().map(|c| self.lower_switch_case(c)).collect();
                self.pop_scope(parent);
                vec![Stmt::Switch { discriminant, cases, span }]
            }
            Stmt::Try { block, handler, finalizer, span } => {
                let block_scope = self.push_scope(ScopeKind::Block);
                self.enter_try();
                let block = self.lower_stmt_list(block);
                self.exit_try();
                self.pop_scope(block_scope);
                let handler = handler.map(|h| self.lower_catch(h));
                let finalizer = finalizer.map(|f| {
                    let parent = self.push_scope(ScopeKind::Block);
                    let f = self.lower_stmt_list(f);
                    self.pop_scope(parent);
                    f
                });
                vec![Stmt::Try { block, handler, finalizer, span }]
            }
            Stmt::Labeled { label, body, span } => {
                let parent = self.push_scope(ScopeKind::Label);
                let body = Box::new(self.lower_stmt(*body).into_iter().next().expect("one statement"));
                self.pop_scope(parent);
                vec![Stmt::Labeled { label, body, span }]
            }
            Stmt::VarDecl { kind, declarations, span } => {
                let declarations = declarations.into_iter().map(|d| self.lower_var_declarator(d)).collect();
                vec![Stmt::VarDecl { kind, declarations, span }]
            }
            Stmt::FunctionDecl(f) => vec![Stmt::FunctionDecl(Box::new(self.lower_function(*f)))],
            Stmt::ClassDecl(c) => self.lower_class_decl(*c),
            Stmt::EnumDecl(e) => self.lower_enum_decl(*e),
            Stmt::NamespaceDecl(n) => self.lower_namespace_decl(*n),
            Stmt::TypeScript(_) => Vec::new(),
            other => vec![other],
        }
    }

    /// Lowers a single-statement `if`/loop body, tracking dead-branch
    /// depth around it without changing its shape (`spec.md` §4.3 item 5 —
    /// `mangle_statements` is the pass that actually deletes dead code;
    /// this only suppresses import-path recording inside it).
    fn lower_branch(&self, stmt: Stmt, is_dead: bool) -> Vec<Stmt> {
        if is_dead {
            self.enter_dead();
        }
        let out = self.lower_stmt(stmt);
        if is_dead {
            self.exit_dead();
        }
        out
    }

    fn lower_switch_case(&self, case: SwitchCase) -> SwitchCase {
        SwitchCase { test: case.test.map(|t| self.lower_expr(t)), body: self.lower_stmt_list(case.body) }
    }

    fn lower_catch(&self, handler: CatchClause) -> CatchClause {
        let param_scope = self.push_scope(ScopeKind::Block);
        let body_scope = self.push_scope(ScopeKind::Block);
        let body = self.lower_stmt_list(handler.body);
        self.pop_scope(param_scope);
        self.pop_scope(body_scope);
        CatchClause { param: handler.param, body }
    }

    fn lower_var_declarator(&self, decl: VarDeclarator) -> VarDeclarator {
        VarDeclarator { name: decl.name, init: decl.init.map(|e| self.lower_expr(e)) }
    }

    fn lower_function(&self, mut f: Function) -> Function {
        let fn_name_scope = self.push_scope(ScopeKind::FunctionName);
        for param in &mut f.params {
            if let Some(default) = param.default.take() {
                param.default = Some(self.lower_expr(default));
            }
        }
        let entry_scope = self.push_scope(ScopeKind::Entry);
        let mut body = self.lower_stmt_list(f.body);
        let expression_body = f.expression_body.map(|e| Box::new(self.lower_expr(*e)));
        if self.mangle_syntax {
            body = mangle::mangle_statements(body);
        }
        self.pop_scope(entry_scope);
        self.pop_scope(fn_name_scope);
        Function { body, expression_body, ..f }
    }

    fn lower_class_decl(&self, c: Class) -> Vec<Stmt> {
        let class_ref = c.name;
        let mut c = self.lower_class(c);
        let statics = if self.target.supports_es2020() {
            Vec::new()
        } else {
            classes::extract_fields(&mut c, self.symbols, &mut || self.generate_temp_ref())
        };
        let mut out = vec![Stmt::ClassDecl(Box::new(c))];
        if let Some(name) = class_ref {
            let span = out[0].span();
            for field in statics {
                out.push(Stmt::Expr(
                    classes::static_field_assignment(Expr::Identifier(name, span), field),
                    span,
                ));
            }
        }
        out
    }

    fn lower_class(&self, mut c: Class) -> Class {
        let class_scope = self.push_scope(ScopeKind::ClassName);
        if let Some(super_class) = c.super_class.take() {
            c.super_class = Some(Box::new(self.lower_expr(*super_class)));
        }
        c.properties = c.properties.into_iter().map(|p| self.lower_property(p)).collect();
        self.pop_scope(class_scope);
        c
    }

    fn lower_property(&self, mut p: Property) -> Property {
        if p.is_computed {
            p.key = self.lower_expr(p.key);
        }
        p.value = p.value.map(|v| self.lower_expr(v));
        p
    }

    fn lower_enum_decl(&self, e: EnumDecl) -> Vec<Stmt> {
        let st = self.state.borrow();
        enum_lower::lower_enum(Box::new(e), self.source_text, st.names).to_vec()
    }

    fn lower_namespace_decl(&self, n: NamespaceDecl) -> Vec<Stmt> {
        let parent = self.push_scope(ScopeKind::Entry);
        let body = self.lower_stmt_list(n.body);
        self.pop_scope(parent);
        namespace::lower_namespace(n.name, &n.path, body, n.span, self.symbols, &mut || self.generate_temp_ref())
    }

    // ---- expressions ----------------------------------------------------

    fn lower_expr(&self, e: Expr) -> Expr {
        self.lower_expr_with(e, false)
    }

    fn lower_expr_with(&self, e: Expr, is_delete_target: bool) -> Expr {
        if !self.defines.is_empty() {
            if let Some(path) = self.defines_path(&e) {
                if let Some(value) = self.defines.lookup(&path) {
                    return value.clone();
                }
            }
        }
        match e {
            Expr::Identifier(r, span) => {
                if self.is_bundling && self.is_in_try() && self.is_require_symbol(r) {
                    return Expr::Null(span);
                }
                Expr::Identifier(r, span)
            }
            Expr::Template { quasis, exprs, span } => {
                Expr::Template { quasis, exprs: exprs.into_iter().map(|e| self.lower_expr(e)).collect(), span }
            }
            Expr::Binary { op, left, right, span } => self.lower_binary(op, *left, *right, span),
            Expr::Unary { op, arg, span } => self.lower_unary(op, *arg, span, is_delete_target),
            Expr::Conditional { test, consequent, alternate, span } => {
                let test = self.lower_expr(*test);
                let consequent = self.lower_expr(*consequent);
                let alternate = self.lower_expr(*alternate);
                match fold::truthiness(&test) {
                    Some(true) => consequent,
                    Some(false) => alternate,
                    None => Expr::Conditional {
                        test: Box::new(test),
                        consequent: Box::new(consequent),
                        alternate: Box::new(alternate),
                        span,
                    },
                }
            }
            e @ (Expr::Dot { .. } | Expr::Index { .. } | Expr::Call { .. }) => {
                self.lower_chain_root(e, is_delete_target)
            }
            Expr::New { callee, args, span } => Expr::New {
                callee: Box::new(self.lower_expr(*callee)),
                args: args.into_iter().map(|a| self.lower_expr(a)).collect(),
                span,
            },
            Expr::Array { elements, span } => Expr::Array {
                elements: elements.into_iter().map(|el| el.map(|e| self.lower_expr(e))).collect(),
                span,
            },
            Expr::Object { properties, span } => {
                Expr::Object { properties: properties.into_iter().map(|p| self.lower_property(p)).collect(), span }
            }
            Expr::Spread(inner, span) => Expr::Spread(Box::new(self.lower_expr(*inner)), span),
            Expr::Yield { argument, delegate, span } => {
                Expr::Yield { argument: argument.map(|a| Box::new(self.lower_expr(*a))), delegate, span }
            }
            Expr::Await(inner, span) => Expr::Await(Box::new(self.lower_expr(*inner)), span),
            Expr::Function(f) => Expr::Function(Box::new(self.lower_function(*f))),
            Expr::Class(c) => self.lower_class_expr(*c),
            Expr::Jsx(mut j) => {
                for attr in &mut j.attributes {
                    if let Some(v) = attr.value.take() {
                        attr.value = Some(self.lower_expr(v));
                    }
                }
                j.children = j.children.into_iter().map(|c| self.lower_expr(c)).collect();
                Expr::Jsx(j)
            }
            Expr::DynamicImport { argument, span } => {
                let argument = self.lower_expr(*argument);
                if let Some(path) = imports::static_string_argument(&argument) {
                    self.record_import(ImportPath { path, kind: ImportKind::Dynamic });
                }
                Expr::DynamicImport { argument: Box::new(argument), span }
            }
            Expr::Require { argument, span } => {
                let argument = self.lower_expr(*argument);
                if let Some(path) = imports::static_string_argument(&argument) {
                    self.record_import(ImportPath { path, kind: ImportKind::Require });
                }
                Expr::Require { argument: Box::new(argument), span }
            }
            other => other,
        }
    }

    fn lower_class_expr(&self, c: Class) -> Expr {
        let span = c.span;
        let mut c = self.lower_class(c);
        let statics = if self.target.supports_es2020() {
            Vec::new()
        } else {
            classes::extract_fields(&mut c, self.symbols, &mut || self.generate_temp_ref())
        };
        let class_expr = Expr::Class(Box::new(c));
        if statics.is_empty() {
            return class_expr;
        }
        // Even a named class expression's name is only visible inside its
        // own body, so static field assignments always need a temporary.
        let temp = self.generate_temp_ref();
        let assign = Expr::Binary {
            op: BinOp::Assign(None),
            left: Box::new(Expr::Identifier(temp, span)),
            right: Box::new(class_expr),
            span,
        };
        let mut chain_expr = Expr::Identifier(temp, span);
        let mut prelude = vec![assign];
        for field in statics {
            prelude.push(classes::static_field_assignment(Expr::Identifier(temp, span), field));
        }
        for part in prelude.into_iter().rev() {
            chain_expr = Expr::Binary { op: BinOp::Comma, left: Box::new(part), right: Box::new(chain_expr), span };
        }
        chain_expr
    }

    fn lower_binary(&self, op: BinOp, left: Expr, right: Expr, span: Span) -> Expr {
        let left = self.lower_expr(left);
        let right = self.lower_expr(right);
        // `??` never goes through constant folding: at a target that still
        // needs it lowered, the ternary form must appear (even for literal
        // operands); at a target that supports it natively, the node must
        // survive verbatim (`spec.md` §8 scenario 1). Folding first would
        // short-circuit both requirements by collapsing literal operands to
        // a bare value before either check ran.
        if op == BinOp::NullishCoalescing {
            if !self.target.supports_es2020() {
                return chain::lower_nullish_coalescing(left, right, span, &mut || self.generate_temp_ref());
            }
            return Expr::Binary { op, left: Box::new(left), right: Box::new(right), span };
        }
        if let Some(folded) = fold::fold_binary(op, &left, &right, span) {
            return folded;
        }
        Expr::Binary { op, left: Box::new(left), right: Box::new(right), span }
    }

    fn lower_unary(&self, op: UnOp, arg: Expr, span: Span, _is_delete_target: bool) -> Expr {
        let is_delete = op == UnOp::Delete;
        let arg = self.lower_expr_with(arg, is_delete);
        if let Some(folded) = fold::fold_unary(op, &arg, span) {
            return folded;
        }
        Expr::Unary { op, arg: Box::new(arg), span }
    }

    fn lower_chain_root(&self, e: Expr, is_delete_target: bool) -> Expr {
        if let Expr::Dot { object, property, chain, span } = &e {
            if !chain.is_optional_chain {
                if let Expr::Identifier(obj_ref, _) = object.as_ref() {
                    if self.state.borrow().namespaces.is_namespace(*obj_ref) {
                        return self.lower_namespace_access(*obj_ref, property.clone(), *span);
                    }
                }
            }
        }
        if self.target.supports_es2020() {
            return chain::visit_children_only_pub(e, &mut |sub| self.lower_expr(sub));
        }
        chain::lower_chain(e, is_delete_target, &mut |sub| self.lower_expr(sub), &mut || self.generate_temp_ref())
    }

    fn lower_namespace_access(&self, namespace: Ref, alias: String, span: Span) -> Expr {
        let existing = self.state.borrow().namespaces.get(namespace, &alias);
        let item = match existing {
            Some(item) => item,
            None => {
                let item = self.generate_temp_ref();
                self.state.borrow_mut().namespaces.insert(namespace, &alias, item);
                item
            }
        };
        Expr::NamespaceImport { namespace, item, alias, span }
    }
}

#[cfg(test)]
#[path = "../tests/lowering.rs"]
mod tests;
