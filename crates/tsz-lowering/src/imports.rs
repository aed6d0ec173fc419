//! Import/require tracking (`spec.md` §4.5): the core never resolves a
//! module path, it only records it, in the order scenario 6 calls for —
//! every static import/re-export first, in declaration order, then every
//! `require`/dynamic `import()` call in the order the visitor reaches them.

use rustc_hash::FxHashMap;
use tsz_common::{ImportKind, ImportPath};
use tsz_parser::ast::{Ast, Expr, Stmt};
use tsz_parser::refs::Ref;

/// Every static `import`/`export ... from "..."` path, in declaration
/// order. Collected up front, before the main visitor runs, so static
/// imports always precede `require`/`import()` calls in the recorded list
/// regardless of where in the file they appear.
#[must_use]
pub fn collect_static_import_paths(ast: &Ast) -> Vec<ImportPath> {
    let mut out = Vec::new();
    for stmt in &ast.body {
        match stmt {
            Stmt::Import(i) => out.push(ImportPath { path: i.source.clone(), kind: ImportKind::Static }),
            Stmt::ExportNamed { source: Some(source), .. } => {
                out.push(ImportPath { path: source.clone(), kind: ImportKind::Static });
            }
            Stmt::ExportStar { source, .. } => out.push(ImportPath { path: source.clone(), kind: ImportKind::Static }),
            _ => {}
        }
    }
    out
}

/// Every `namespace` binding introduced by `import * as ns from "..."`, in
/// declaration order, collected the same way as [`collect_static_import_paths`]
/// so the main visitor can tell a plain `Dot` on an import namespace apart
/// from one on an ordinary object (`spec.md` §4.5).
#[must_use]
pub fn collect_namespace_refs(ast: &Ast) -> Vec<Ref> {
    ast.body
        .iter()
        .filter_map(|stmt| match stmt {
            Stmt::Import(i) => i.namespace,
            _ => None,
        })
        .collect()
}

/// A string literal or no-substitution template literal's text, coerced the
/// way `spec.md` §4.5 calls for when recording a `require`/`import()` path.
/// Anything else (a concatenation, a variable) isn't a static path and
/// yields `None`.
#[must_use]
pub fn static_string_argument(e: &Expr) -> Option<String> {
    match e {
        Expr::String(units, _) => Some(String::from_utf16_lossy(units)),
        Expr::Template { quasis, exprs, .. } if exprs.is_empty() && quasis.len() == 1 => {
            Some(String::from_utf16_lossy(&quasis[0]))
        }
        _ => None,
    }
}

/// Named-import bookkeeping (`spec.md` §4.5): for each import-namespace
/// symbol, the generated item `Ref` already handed out for a given property
/// name, so repeated `ns.x` accesses share one synthetic binding instead of
/// minting a fresh one each time.
#[derive(Debug, Default)]
pub struct NamespaceImports {
    namespaces: FxHashMap<Ref, FxHashMap<String, Ref>>,
}

impl NamespaceImports {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `namespace` as an import namespace, even if no property of
    /// it is ever accessed.
    pub fn register(&mut self, namespace: Ref) {
        self.namespaces.entry(namespace).or_default();
    }

    #[must_use]
    pub fn is_namespace(&self, namespace: Ref) -> bool {
        self.namespaces.contains_key(&namespace)
    }

    /// The item `Ref` already generated for `namespace.alias`, if any.
    #[must_use]
    pub fn get(&self, namespace: Ref, alias: &str) -> Option<Ref> {
        self.namespaces.get(&namespace)?.get(alias).copied()
    }

    /// Records `item` as the generated binding for `namespace.alias`, so a
    /// later access of the same alias reuses it instead of minting another.
    pub fn insert(&mut self, namespace: Ref, alias: &str, item: Ref) {
        self.namespaces.entry(namespace).or_default().insert(alias.to_string(), item);
    }
}

#[cfg(test)]
#[path = "../tests/imports.rs"]
mod tests;
