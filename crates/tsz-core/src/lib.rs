//! Facade crate wiring the four front-end passes behind a single entry
//! point (`spec.md` §6 "External Interfaces"): scan, parse, bind, and lower
//! one source file, producing an [`AST`](tsz_parser::ast::Ast) plus the
//! side channels a host needs — discovered import paths and a diagnostic
//! stream.
//!
//! `tsz-core` owns no logic of its own beyond sequencing
//! [`tsz_parser::Parser`], [`tsz_binder::Binder`], and
//! [`tsz_lowering::Lowering`] and assembling their outputs (`SPEC_FULL.md`
//! glossary, "Facade"). It also strips a leading `#!` hashbang line before
//! handing the rest of `contents` to the lexer — the lexer and parser never
//! see one (`tsz-parser::parser`'s `parse_program` comment), so the facade
//! is where `AST.hashbang` (`spec.md` §6 "Outputs") gets set.

pub mod error;
pub mod options;

pub use error::CoreError;
pub use options::ParseOptions;

use tsz_binder::{BindOutput, Binder, SymbolTable};
use tsz_common::{ImportPath, Log, Source, Span};
use tsz_lowering::{Defines, LowerOutput, Lowering, LoweringOptions};
use tsz_parser::ast::Ast;
use tsz_parser::refs::{NamePool, Ref};
use tsz_parser::{Parser, ScopeArena};

/// Everything a host gets back from [`parse`] for one file (`spec.md` §6
/// "Outputs").
pub struct ParseOutput {
    pub ast: Ast,
    pub scopes: ScopeArena,
    pub names: NamePool,
    pub symbols: SymbolTable,
    /// Free references nobody in the file declares (`spec.md` §4.3).
    pub unbound: Vec<tsz_binder::SymbolId>,
    pub import_paths: Vec<ImportPath>,
    pub exports_ref: Option<Ref>,
    pub require_ref: Option<Ref>,
    pub module_ref: Option<Ref>,
    pub has_common_js_exports: bool,
    /// `true` unless a `LexerPanic` aborted parsing (`spec.md` §7).
    pub ok: bool,
}

/// Runs a source file through scan → parse → bind → lower and returns the
/// assembled result. Diagnostics are streamed into `log` as they're found;
/// the caller decides whether `log.has_errors()` should fail a build.
///
/// On a parse-aborting `LexerPanic` (`spec.md` §7), returns a result with an
/// empty `ast.body` and `ok = false` rather than an `Err` — the diagnostic
/// explaining why is already in `log`, matching `parse(log, source,
/// options) → (ast, ok)`'s "(partial_ast_or_empty, ok=false)" contract.
pub fn parse(log: &dyn Log, source: &Source, options: &ParseOptions) -> Result<ParseOutput, CoreError> {
    source.check_len()?;

    let (body_text, hashbang) = split_hashbang(&source.contents);

    if options.keep_single_expression {
        return parse_single_expression(log, source, body_text, options);
    }

    let parser = match Parser::new_with_jsx(body_text, source.index, log, options.ts_parse, options.jsx_parse) {
        Ok(p) => p,
        Err(_) => return Ok(empty_output(hashbang)),
    };

    let (mut ast, mut scopes, mut names) = match parser.parse_program() {
        Ok(parsed) => parsed,
        Err(_) => return Ok(empty_output(hashbang)),
    };
    ast.hashbang = hashbang;

    let bind_output = run_bind(log, source, &names, &mut scopes, options, &mut ast);
    let lower_output = run_lower(source, &mut names, &mut scopes, &bind_output.symbols, options, &mut ast);

    Ok(assemble(ast, scopes, names, bind_output, lower_output, true))
}

fn run_bind(
    log: &dyn Log,
    source: &Source,
    names: &NamePool,
    scopes: &mut ScopeArena,
    options: &ParseOptions,
    ast: &mut Ast,
) -> BindOutput {
    Binder::new(source, names, scopes, log, options.is_bundling).bind(ast)
}

fn run_lower(
    source: &Source,
    names: &mut NamePool,
    scopes: &mut ScopeArena,
    symbols: &SymbolTable,
    options: &ParseOptions,
    ast: &mut Ast,
) -> LowerOutput {
    let dummy_span = Span::dummy();
    let defines = Defines::new(
        options
            .defines
            .iter()
            .map(|(k, v)| (k.clone(), v.to_expr(dummy_span))),
    );
    let lowering_options = LoweringOptions {
        target: options.target,
        defines: &defines,
        mangle_syntax: options.mangle_syntax && !options.keep_single_expression,
        is_bundling: options.is_bundling,
    };
    Lowering::new(source, names, scopes, symbols, lowering_options).lower(ast)
}

/// `keep_single_expression` (`spec.md` §6) parses `contents` as a single
/// expression statement without the dead-code-trimming `mangle_syntax`
/// pass, for runtime-injected snippets. Binding and non-mangle lowering
/// still run, so the expression's identifiers resolve and fold normally.
fn parse_single_expression(
    log: &dyn Log,
    source: &Source,
    body_text: &str,
    options: &ParseOptions,
) -> Result<ParseOutput, CoreError> {
    let mut parser = match Parser::new_with_jsx(body_text, source.index, log, options.ts_parse, options.jsx_parse) {
        Ok(p) => p,
        Err(_) => return Ok(empty_output(None)),
    };
    let expr = match parser.parse_expression() {
        Ok(e) => e,
        Err(_) => return Ok(empty_output(None)),
    };
    let span = expr.span();
    let mut ast = Ast { body: vec![tsz_parser::ast::Stmt::Expr(expr, span)], hashbang: None };
    let mut scopes = parser.scopes;
    let mut names = parser.names;

    let bind_output = run_bind(log, source, &names, &mut scopes, options, &mut ast);
    let lower_output = run_lower(source, &mut names, &mut scopes, &bind_output.symbols, options, &mut ast);

    Ok(assemble(ast, scopes, names, bind_output, lower_output, true))
}

fn assemble(
    ast: Ast,
    scopes: ScopeArena,
    names: NamePool,
    bind_output: BindOutput,
    lower_output: LowerOutput,
    ok: bool,
) -> ParseOutput {
    ParseOutput {
        ast,
        scopes,
        names,
        symbols: bind_output.symbols,
        unbound: bind_output.unbound,
        import_paths: lower_output.import_paths,
        exports_ref: bind_output.exports_ref,
        require_ref: bind_output.require_ref,
        module_ref: bind_output.module_ref,
        has_common_js_exports: bind_output.has_common_js_exports,
        ok,
    }
}

fn empty_output(hashbang: Option<String>) -> ParseOutput {
    ParseOutput {
        ast: Ast { body: Vec::new(), hashbang },
        scopes: ScopeArena::new(),
        names: NamePool::new(),
        symbols: SymbolTable::new(),
        unbound: Vec::new(),
        import_paths: Vec::new(),
        exports_ref: None,
        require_ref: None,
        module_ref: None,
        has_common_js_exports: false,
        ok: false,
    }
}

/// Strips a line-1 `#!...` hashbang, returning the remaining text (lexer
/// and parser never see the `#!` line) and the hashbang's own text sans the
/// leading `#!` and trailing newline (`spec.md` §8 "Source with only a
/// hashbang line").
fn split_hashbang(contents: &str) -> (&str, Option<String>) {
    if let Some(rest) = contents.strip_prefix("#!") {
        let line_end = rest.find('\n').map_or(rest.len(), |i| i + 1);
        let hashbang = rest[..line_end].trim_end_matches(['\n', '\r']).to_string();
        (&rest[line_end..], Some(hashbang))
    } else {
        (contents, None)
    }
}

#[cfg(test)]
#[path = "../tests/lib.rs"]
mod tests;
