//! Pass 2: replays the scope order `tsz-parser` recorded, resolving every
//! [`Ref::Unresolved`] into a [`Ref::Symbol`] (`spec.md` §4.3).
//!
//! The parser already opened and closed every scope in source order; this
//! module doesn't re-derive that structure, it walks the same tree a second
//! time and trusts that walk lines up with `ScopeArena::order` one boundary
//! at a time. `push_scope` asserts the *kind* of the next recorded boundary
//! matches what the walk expects — it does not re-derive pass 1's byte
//! offsets (that would mean threading brace/keyword positions through AST
//! nodes just to recompute a number pass 1 already has), so a parser/binder
//! traversal that drifts out of structural sync is still caught, just not
//! by an exact offset match.

use tsz_common::{Diagnostic, DiagnosticRange, Log, MsgId, Source, SourceId, Span};
use tsz_parser::ast::{
    Ast, BinOp, CatchClause, Class, EnumDecl, Expr, Function, ImportStmt, NamespaceDecl, Property,
    PropertyKind, Stmt, SwitchCase, VarDeclarator, VarKind,
};
use tsz_parser::refs::{load_name_from_ref, NamePool, Ref};
use tsz_parser::scope::{ScopeArena, ScopeId, ScopeKind};

use crate::merge::{merge_action, MergeAction};
use crate::symbol::{SymbolId, SymbolKind, SymbolTable};

/// The scope the parser opens first, before any source text — always the
/// module's own `Entry` scope (`Parser::new` pushes it at offset 0).
const MODULE_SCOPE: ScopeId = ScopeId(0);

pub struct BindOutput {
    pub symbols: SymbolTable,
    /// Symbols installed lazily for names that never resolved to a
    /// declaration anywhere in the file (`spec.md` §4.3's "unbound" list).
    pub unbound: Vec<SymbolId>,
    /// The module-scope `exports`/`require`/`module` symbols pre-declared
    /// when bundling is enabled (`spec.md` §4.5); `None` otherwise.
    pub exports_ref: Option<Ref>,
    pub require_ref: Option<Ref>,
    pub module_ref: Option<Ref>,
    /// Set iff `exports` or `module` was read anywhere in the file.
    pub has_common_js_exports: bool,
}

pub struct Binder<'a> {
    source_id: SourceId,
    source_text: &'a str,
    names: &'a NamePool,
    scopes: &'a mut ScopeArena,
    symbols: SymbolTable,
    log: &'a dyn Log,
    scope_cursor: usize,
    current_scope: ScopeId,
    unbound: Vec<SymbolId>,
    label_stack: Vec<(String, ScopeId)>,
    /// One entry per enclosing function (module level counts as a
    /// non-generator, non-async "function"); `yield`/`await` validity is
    /// checked against the top of this stack only — arrows are never
    /// generators and are async independently of their enclosing function.
    fn_context_stack: Vec<(bool, bool)>,
    /// Per statement-list nesting level: has this list already seen a
    /// `return`/`throw`/`break`/`continue`? Reads after that point don't
    /// bump `use_count_estimate` (but still bump `ts_use_count_estimate`).
    dead_frames: Vec<bool>,
    try_depth: u32,
    is_bundling: bool,
    /// Guards against a stack overflow on pathologically nested input,
    /// mirroring the parser's own `MAX_EXPR_PARSE_DEPTH` guard.
    visit_depth: u32,
}

impl<'a> Binder<'a> {
    #[must_use]
    pub fn new(
        source: &'a Source,
        names: &'a NamePool,
        scopes: &'a mut ScopeArena,
        log: &'a dyn Log,
        is_bundling: bool,
    ) -> Self {
        Self {
            source_id: source.index,
            source_text: &source.contents,
            names,
            scopes,
            symbols: SymbolTable::new(),
            log,
            scope_cursor: 0,
            current_scope: MODULE_SCOPE,
            unbound: Vec::new(),
            label_stack: Vec::new(),
            fn_context_stack: vec![(false, false)],
            dead_frames: vec![false],
            try_depth: 0,
            is_bundling,
            visit_depth: 0,
        }
    }

    pub fn bind(mut self, ast: &mut Ast) -> BindOutput {
        // The module's own Entry scope is the first entry in `order`;
        // consume it up front so `scope_cursor` lines up with the body walk.
        self.push_scope(ScopeKind::Entry);
        let mut require_ref = None;
        let mut module_ref = None;
        let mut exports_ref = None;
        if self.is_bundling {
            let dummy = Span::new(0, 0);
            require_ref = Some(self.declare_symbol(MODULE_SCOPE, SymbolKind::Hoisted, "require", dummy));
            module_ref = Some(self.declare_symbol(MODULE_SCOPE, SymbolKind::Hoisted, "module", dummy));
            exports_ref = Some(self.declare_symbol(MODULE_SCOPE, SymbolKind::Hoisted, "exports", dummy));
        }
        self.visit_stmt_list(&mut ast.body);
        self.pop_scope(MODULE_SCOPE);
        let has_common_js_exports = [&module_ref, &exports_ref].into_iter().filter_map(|r| r.as_ref()).any(|r| {
            let Ref::Symbol { slot, .. } = r else { return false };
            self.symbols.get(self.symbols.resolve(SymbolId(*slot))).use_count_estimate > 0
        });
        BindOutput {
            symbols: self.symbols,
            unbound: self.unbound,
            exports_ref,
            require_ref,
            module_ref,
            has_common_js_exports,
        }
    }

    // ---- scope replay --------------------------------------------------

    fn push_scope(&mut self, expected: ScopeKind) -> ScopeId {
        let (_, id) = self.scopes.order[self.scope_cursor];
        debug_assert_eq!(
            self.scopes.get(id).kind,
            expected,
            "scope replay drifted out of sync with the parse pass",
        );
        self.scope_cursor += 1;
        self.current_scope = id;
        id
    }

    fn pop_scope(&mut self, parent: ScopeId) {
        self.current_scope = parent;
    }

    // ---- dead-code tracking ---------------------------------------------

    fn push_stmt_list_frame(&mut self) {
        let inherited = *self.dead_frames.last().unwrap_or(&false);
        self.dead_frames.push(inherited);
    }

    fn pop_stmt_list_frame(&mut self) {
        self.dead_frames.pop();
    }

    fn mark_dead(&mut self) {
        if let Some(top) = self.dead_frames.last_mut() {
            *top = true;
        }
    }

    fn is_dead(&self) -> bool {
        *self.dead_frames.last().unwrap_or(&false)
    }

    // ---- names & diagnostics --------------------------------------------

    fn name_for(&self, r: Ref) -> String {
        load_name_from_ref(r, self.source_text, self.names).to_string()
    }

    fn error(&self, id: MsgId, span: Span, args: &[&str]) {
        self.log.add_msg(Diagnostic::from_catalog(
            id,
            args,
            Some(DiagnosticRange { source: self.source_id, span }),
            &rustc_hash::FxHashMap::default(),
        ));
    }

    // ---- declaration ------------------------------------------------------

    fn nearest_entry_scope(&self, mut id: ScopeId) -> ScopeId {
        loop {
            if self.scopes.get(id).kind == ScopeKind::Entry {
                return id;
            }
            id = self
                .scopes
                .get(id)
                .parent
                .expect("every scope chain terminates at the module Entry scope");
        }
    }

    /// Declare `name` of kind `kind`, starting the lookup from
    /// `scope_hint` (the scope the declaration lexically appears in).
    /// `Hoisted`/`HoistedFunction` symbols install in the nearest enclosing
    /// `Entry` scope and propagate into every intermediate scope between
    /// `scope_hint` and that `Entry` scope, per `spec.md` §4.3's hoisting
    /// invariant.
    fn declare_symbol(&mut self, scope_hint: ScopeId, kind: SymbolKind, name: &str, span: Span) -> Ref {
        let target_scope = match kind {
            SymbolKind::Hoisted | SymbolKind::HoistedFunction => self.nearest_entry_scope(scope_hint),
            _ => scope_hint,
        };

        let existing = self
            .scopes
            .get(target_scope)
            .members
            .get(name)
            .and_then(|r| match r {
                Ref::Symbol { slot, .. } => Some(SymbolId(*slot)),
                _ => None,
            });

        let result_id = match existing {
            Some(existing_id) => {
                let root = self.symbols.resolve_compress(existing_id);
                match merge_action(self.symbols.get(root).kind, kind) {
                    MergeAction::Keep => root,
                    MergeAction::Replace => {
                        let fresh = self.symbols.alloc(kind, name.to_string());
                        self.symbols.link(root, fresh);
                        fresh
                    }
                    MergeAction::Forbid => {
                        self.error(MsgId::ParseRedeclaration, span, &[name]);
                        root
                    }
                }
            }
            None => self.symbols.alloc(kind, name.to_string()),
        };

        let r = Ref::Symbol { source: self.source_id, slot: result_id.0 };
        self.scopes.get_mut(target_scope).members.insert(name.to_string(), r);

        if matches!(kind, SymbolKind::Hoisted | SymbolKind::HoistedFunction) {
            let mut s = scope_hint;
            while s != target_scope {
                self.scopes.get_mut(s).members.insert(name.to_string(), r);
                s = self
                    .scopes
                    .get(s)
                    .parent
                    .expect("hoisted declaration's scope chain must reach its Entry scope");
            }
        }
        r
    }

    /// Resolve a read of `name` from `scope`: walk the scope chain, and if
    /// nothing declares it, install a fresh `Unbound` symbol in the module
    /// scope so every free reference still gets a stable slot.
    fn find_symbol(&mut self, scope: ScopeId, name: &str) -> SymbolId {
        let mut cursor = Some(scope);
        let mut iterations = 0usize;
        while let Some(id) = cursor {
            iterations += 1;
            if iterations > tsz_common::limits::MAX_SCOPE_WALK_ITERATIONS {
                break;
            }
            if let Some(r) = self.scopes.get(id).members.get(name) {
                if let Ref::Symbol { slot, .. } = r {
                    return self.symbols.resolve_compress(SymbolId(*slot));
                }
            }
            cursor = self.scopes.get(id).parent;
        }
        let id = self.symbols.alloc(SymbolKind::Unbound, name.to_string());
        self.unbound.push(id);
        let r = Ref::Symbol { source: self.source_id, slot: id.0 };
        self.scopes.get_mut(MODULE_SCOPE).members.insert(name.to_string(), r);
        id
    }

    fn resolve_identifier(&mut self, r: &mut Ref, span: Span) {
        if r.is_resolved() {
            return;
        }
        let name = self.name_for(*r);
        if self.is_bundling && name == "require" && self.try_depth == 0 {
            self.error(MsgId::SemRequireCapturedOutsideTry, span, &[]);
        }
        let id = self.find_symbol(self.current_scope, &name);
        self.symbols.bump_use(id, self.is_dead());
        *r = Ref::Symbol { source: self.source_id, slot: id.0 };
    }

    // ---- binding-pattern declaration ---------------------------------------

    fn is_pattern_shaped(e: &Expr) -> bool {
        matches!(
            e,
            Expr::Identifier(..) | Expr::Array { .. } | Expr::Object { .. } | Expr::Binary { op: BinOp::Assign(None), .. }
        )
    }

    fn declare_pattern(&mut self, pattern: &mut Expr, kind: SymbolKind) {
        match pattern {
            Expr::Identifier(r, span) => {
                let name = self.name_for(*r);
                *r = self.declare_symbol(self.current_scope, kind, &name, *span);
            }
            Expr::Array { elements, .. } => {
                for el in elements.iter_mut().flatten() {
                    self.declare_pattern_target(el, kind);
                }
            }
            Expr::Object { properties, .. } => {
                for p in properties.iter_mut() {
                    match p.kind {
                        PropertyKind::Spread => {
                            if let Some(v) = &mut p.value {
                                self.declare_pattern_target(v, kind);
                            } else {
                                self.declare_pattern(&mut p.key, kind);
                            }
                        }
                        _ => match &mut p.value {
                            Some(v) if Self::is_pattern_shaped(v) => {
                                self.declare_pattern_target(v, kind);
                            }
                            Some(_) => {
                                // Shorthand-with-default (`{a = 1}`): the
                                // property's own key is the binding, the
                                // value is its default (a read).
                                if let Some(v) = &mut p.value {
                                    self.visit_expr(v);
                                }
                                self.declare_pattern(&mut p.key, kind);
                            }
                            None => self.declare_pattern(&mut p.key, kind),
                        },
                    }
                }
            }
            Expr::Spread(inner, _) => self.declare_pattern(inner, kind),
            _ => {
                // Not a valid pattern shape; the parser couldn't disambiguate
                // it at the time (`spec.md` §4.3's deferred-error note) and
                // already owns reporting that. Leave it untouched here.
            }
        }
    }

    fn declare_pattern_target(&mut self, target: &mut Expr, kind: SymbolKind) {
        if let Expr::Binary { op: BinOp::Assign(None), left, right, .. } = target {
            self.visit_expr(right);
            self.declare_pattern(left, kind);
        } else {
            self.declare_pattern(target, kind);
        }
    }

    // ---- statements ---------------------------------------------------------

    fn visit_stmt_list(&mut self, stmts: &mut [Stmt]) {
        self.push_stmt_list_frame();
        for stmt in stmts.iter_mut() {
            self.visit_stmt(stmt);
        }
        self.pop_stmt_list_frame();
    }

    fn visit_stmt(&mut self, stmt: &mut Stmt) {
        self.visit_depth += 1;
        if self.visit_depth > tsz_common::limits::MAX_VISIT_DEPTH {
            self.visit_depth -= 1;
            return;
        }
        self.visit_stmt_inner(stmt);
        self.visit_depth -= 1;
    }

    fn visit_stmt_inner(&mut self, stmt: &mut Stmt) {
        match stmt {
            Stmt::Block(body, _) => {
                let parent = self.push_scope(ScopeKind::Block);
                self.visit_stmt_list(body);
                self.pop_scope(parent);
            }
            Stmt::Empty(_) | Stmt::Directive(..) | Stmt::Debugger(_) | Stmt::TypeScript(_) => {}
            Stmt::Expr(e, _) => self.visit_expr(e),
            Stmt::If { test, consequent, alternate, .. } => {
                self.visit_expr(test);
                self.visit_stmt(consequent);
                if let Some(alt) = alternate {
                    self.visit_stmt(alt);
                }
            }
            Stmt::For { init, test, update, body, .. } => {
                let parent = self.push_scope(ScopeKind::Block);
                if let Some(init) = init {
                    self.visit_stmt(init);
                }
                if let Some(test) = test {
                    self.visit_expr(test);
                }
                if let Some(update) = update {
                    self.visit_expr(update);
                }
                self.visit_stmt(body);
                self.pop_scope(parent);
            }
            Stmt::ForIn { left, right, body, .. } | Stmt::ForOf { left, right, body, .. } => {
                let parent = self.push_scope(ScopeKind::Block);
                self.visit_stmt(left);
                self.visit_expr(right);
                self.visit_stmt(body);
                self.pop_scope(parent);
            }
            Stmt::While { test, body, .. } => {
                self.visit_expr(test);
                self.visit_stmt(body);
            }
            Stmt::DoWhile { body, test, .. } => {
                self.visit_stmt(body);
                self.visit_expr(test);
            }
            Stmt::With { object, body, .. } => {
                self.visit_expr(object);
                self.visit_stmt(body);
            }
            Stmt::Switch { discriminant, cases, .. } => {
                self.visit_expr(discriminant);
                let parent = self.push_scope(ScopeKind::Block);
                for case in cases.iter_mut() {
                    self.visit_switch_case(case);
                }
                self.pop_scope(parent);
            }
            Stmt::Try { block, handler, finalizer, .. } => {
                let block_scope = self.push_scope(ScopeKind::Block);
                self.try_depth += 1;
                self.visit_stmt_list(block);
                self.try_depth -= 1;
                self.pop_scope(block_scope);
                if let Some(handler) = handler {
                    self.visit_catch(handler);
                }
                if let Some(finalizer) = finalizer {
                    let parent = self.push_scope(ScopeKind::Block);
                    self.visit_stmt_list(finalizer);
                    self.pop_scope(parent);
                }
            }
            Stmt::Break(..) | Stmt::Continue(..) => self.mark_dead(),
            Stmt::Return(value, _) => {
                if let Some(v) = value {
                    self.visit_expr(v);
                }
                self.mark_dead();
            }
            Stmt::Throw(e, _) => {
                self.visit_expr(e);
                self.mark_dead();
            }
            Stmt::Labeled { label, body, .. } => {
                let parent = self.push_scope(ScopeKind::Label);
                self.label_stack.push((label.clone(), self.current_scope));
                self.visit_stmt(body);
                self.label_stack.pop();
                self.pop_scope(parent);
            }
            Stmt::VarDecl { kind, declarations, .. } => {
                let symbol_kind = match kind {
                    VarKind::Var => SymbolKind::Hoisted,
                    VarKind::Let | VarKind::Const => SymbolKind::Other,
                };
                for decl in declarations.iter_mut() {
                    self.visit_var_declarator(decl, symbol_kind);
                }
            }
            Stmt::FunctionDecl(f) => self.visit_function(f, true),
            Stmt::ClassDecl(c) => self.visit_class(c, true),
            Stmt::EnumDecl(e) => self.visit_enum(e),
            Stmt::NamespaceDecl(n) => self.visit_namespace(n),
            Stmt::Import(stmt) => self.visit_import(stmt),
            Stmt::ExportDefault(e, _) => self.visit_expr(e),
            Stmt::ExportNamed { .. } | Stmt::ExportStar { .. } => {
                // Re-exported names resolve against the source module, which
                // this pass has no access to; nothing to bind locally.
            }
        }
    }

    fn visit_switch_case(&mut self, case: &mut SwitchCase) {
        if let Some(test) = &mut case.test {
            self.visit_expr(test);
        }
        self.visit_stmt_list(&mut case.body);
    }

    fn visit_catch(&mut self, handler: &mut CatchClause) {
        let param_scope = self.push_scope(ScopeKind::Block);
        if let Some(param) = &mut handler.param {
            self.declare_pattern(param, SymbolKind::CatchIdentifier);
        }
        let body_scope = self.push_scope(ScopeKind::Block);
        self.visit_stmt_list(&mut handler.body);
        self.pop_scope(param_scope);
        self.pop_scope(body_scope);
    }

    fn visit_var_declarator(&mut self, decl: &mut VarDeclarator, kind: SymbolKind) {
        if let Some(init) = &mut decl.init {
            self.visit_expr(init);
        }
        self.declare_pattern(&mut decl.name, kind);
    }

    fn visit_import(&mut self, stmt: &mut ImportStmt) {
        if let Some(default) = &mut stmt.default {
            let name = self.name_for(*default);
            *default = self.declare_symbol(MODULE_SCOPE, SymbolKind::Other, &name, stmt.span);
        }
        if let Some(namespace) = &mut stmt.namespace {
            let name = self.name_for(*namespace);
            *namespace = self.declare_symbol(MODULE_SCOPE, SymbolKind::Other, &name, stmt.span);
        }
        for spec in stmt.named.iter_mut() {
            let name = self.name_for(spec.local);
            spec.local = self.declare_symbol(MODULE_SCOPE, SymbolKind::Other, &name, stmt.span);
        }
    }

    fn visit_function(&mut self, f: &mut Function, is_decl: bool) {
        if is_decl {
            if let Some(name_ref) = &mut f.name {
                let name = self.name_for(*name_ref);
                let span = f.span;
                *name_ref = self.declare_symbol(self.current_scope, SymbolKind::HoistedFunction, &name, span);
            }
        }

        let fn_name_scope = self.push_scope(ScopeKind::FunctionName);

        if !is_decl {
            if let Some(name_ref) = &mut f.name {
                let name = self.name_for(*name_ref);
                let span = f.span;
                *name_ref = self.declare_symbol(self.current_scope, SymbolKind::Other, &name, span);
            }
        }

        for param in f.params.iter_mut() {
            if let Some(default) = &mut param.default {
                self.visit_expr(default);
            }
            self.declare_pattern(&mut param.pattern, SymbolKind::Other);
        }

        self.fn_context_stack.push((f.is_generator, f.is_async));
        let entry_scope = self.push_scope(ScopeKind::Entry);
        self.visit_stmt_list(&mut f.body);
        if let Some(body) = &mut f.expression_body {
            self.visit_expr(body);
        }
        self.pop_scope(entry_scope);
        self.fn_context_stack.pop();
        self.pop_scope(fn_name_scope);
    }

    fn visit_class(&mut self, c: &mut Class, is_decl: bool) {
        if is_decl {
            if let Some(name_ref) = &mut c.name {
                let name = self.name_for(*name_ref);
                let span = c.span;
                *name_ref = self.declare_symbol(self.current_scope, SymbolKind::Class, &name, span);
            }
        }

        let class_scope = self.push_scope(ScopeKind::ClassName);

        if !is_decl {
            if let Some(name_ref) = &mut c.name {
                let name = self.name_for(*name_ref);
                let span = c.span;
                *name_ref = self.declare_symbol(self.current_scope, SymbolKind::Other, &name, span);
            }
        }

        if let Some(super_class) = &mut c.super_class {
            self.visit_expr(super_class);
        }
        for prop in c.properties.iter_mut() {
            self.visit_property(prop);
        }
        self.pop_scope(class_scope);
    }

    /// Declares the enum's own name but deliberately does not visit member
    /// initializers: a bare identifier in `B = A` refers to a sibling enum
    /// member, a lookup scoped to the enum body rather than the lexical
    /// scope chain. Leaving those `Ref`s unresolved lets `tsz-lowering`
    /// read the original source text straight off the untouched refs
    /// (`spec.md` §4.4's enum lowering; see `DESIGN.md`'s open-question
    /// note on enum-member name resolution).
    fn visit_enum(&mut self, e: &mut EnumDecl) {
        let name = self.name_for(e.name);
        e.name = self.declare_symbol(self.current_scope, SymbolKind::TSEnum, &name, e.span);
    }

    /// A non-empty namespace opens a real `Entry` scope (its members
    /// hoist/declare exactly like a module body); an empty one still opens
    /// and immediately closes one so the scope-order list the parser
    /// recorded stays in sync (`spec.md` §4.4 erases empty namespaces only
    /// at the lowering stage, once use counts are known — not here).
    fn visit_namespace(&mut self, n: &mut NamespaceDecl) {
        let name = self.name_for(n.name);
        n.name = self.declare_symbol(self.current_scope, SymbolKind::TSNamespace, &name, n.span);
        let parent = self.push_scope(ScopeKind::Entry);
        self.visit_stmt_list(&mut n.body);
        self.pop_scope(parent);
    }

    fn visit_property(&mut self, prop: &mut Property) {
        if prop.is_computed {
            self.visit_expr(&mut prop.key);
        }
        if let Some(value) = &mut prop.value {
            self.visit_expr(value);
        }
    }

    // ---- expressions ----------------------------------------------------

    fn visit_expr(&mut self, expr: &mut Expr) {
        self.visit_depth += 1;
        if self.visit_depth > tsz_common::limits::MAX_VISIT_DEPTH {
            self.visit_depth -= 1;
            return;
        }
        self.visit_expr_inner(expr);
        self.visit_depth -= 1;
    }

    fn visit_expr_inner(&mut self, expr: &mut Expr) {
        match expr {
            Expr::Null(_)
            | Expr::Undefined(_)
            | Expr::Bool(..)
            | Expr::Number(..)
            | Expr::BigInt(..)
            | Expr::String(..)
            | Expr::Regex { .. }
            | Expr::This(_)
            | Expr::Super(_) => {}
            Expr::Template { exprs, .. } => {
                for e in exprs.iter_mut() {
                    self.visit_expr(e);
                }
            }
            Expr::Identifier(r, span) => self.resolve_identifier(r, *span),
            Expr::Binary { left, right, .. } => {
                self.visit_expr(left);
                self.visit_expr(right);
            }
            Expr::Unary { arg, .. } => self.visit_expr(arg),
            Expr::Conditional { test, consequent, alternate, .. } => {
                self.visit_expr(test);
                self.visit_expr(consequent);
                self.visit_expr(alternate);
            }
            Expr::Call { callee, args, .. } => {
                self.visit_expr(callee);
                for a in args.iter_mut() {
                    self.visit_expr(a);
                }
            }
            Expr::New { callee, args, .. } => {
                self.visit_expr(callee);
                for a in args.iter_mut() {
                    self.visit_expr(a);
                }
            }
            Expr::Dot { object, .. } => self.visit_expr(object),
            Expr::Index { object, index, .. } => {
                self.visit_expr(object);
                self.visit_expr(index);
            }
            Expr::Array { elements, .. } => {
                for el in elements.iter_mut().flatten() {
                    self.visit_expr(el);
                }
            }
            Expr::Object { properties, .. } => {
                for p in properties.iter_mut() {
                    self.visit_property(p);
                }
            }
            Expr::Spread(inner, _) => self.visit_expr(inner),
            Expr::Yield { argument, span, .. } => {
                if !self.fn_context_stack.last().is_some_and(|(gen, _)| *gen) {
                    self.error(MsgId::SemYieldOutsideGenerator, *span, &[]);
                }
                if let Some(a) = argument {
                    self.visit_expr(a);
                }
            }
            Expr::Await(inner, span) => {
                if !self.fn_context_stack.last().is_some_and(|(_, asy)| *asy) {
                    self.error(MsgId::SemAwaitOutsideAsync, *span, &[]);
                }
                self.visit_expr(inner);
            }
            Expr::Function(f) => self.visit_function(f, false),
            Expr::Class(c) => self.visit_class(c, false),
            Expr::Jsx(j) => {
                for attr in j.attributes.iter_mut() {
                    if let Some(v) = &mut attr.value {
                        self.visit_expr(v);
                    }
                }
                for child in j.children.iter_mut() {
                    self.visit_expr(child);
                }
            }
            Expr::DynamicImport { argument, span } => {
                let is_no_substitution_template = matches!(
                    &**argument,
                    Expr::Template { quasis, exprs, .. } if exprs.is_empty() && quasis.len() == 1
                );
                if !matches!(**argument, Expr::String(..)) && !is_no_substitution_template {
                    self.error(MsgId::SemDynamicImportArgumentNotString, *span, &[]);
                }
                self.visit_expr(argument);
            }
            Expr::Require { argument, .. } => self.visit_expr(argument),
            Expr::NamespaceImport { .. } => {
                // Synthesized after this pass runs (`spec.md` §4.5); never
                // present in a tree the binder sees.
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/binder.rs"]
mod tests;
