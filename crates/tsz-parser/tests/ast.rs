use super::*;
use tsz_common::Span;

fn span(start: u32, end: u32) -> Span {
    Span::new(start, end)
}

#[test]
fn binary_op_precedence_is_ordered_low_to_high() {
    assert!(BinOp::Comma.precedence() < BinOp::Assign(None).precedence());
    assert!(BinOp::Assign(None).precedence() < BinOp::NullishCoalescing.precedence());
    assert!(BinOp::LogicalOr.precedence() < BinOp::LogicalAnd.precedence());
    assert!(BinOp::BitOr.precedence() < BinOp::BitXor.precedence());
    assert!(BinOp::BitXor.precedence() < BinOp::BitAnd.precedence());
    assert!(BinOp::Eq.precedence() < BinOp::Lt.precedence());
    assert!(BinOp::Lt.precedence() < BinOp::Shl.precedence());
    assert!(BinOp::Shl.precedence() < BinOp::Add.precedence());
    assert!(BinOp::Add.precedence() < BinOp::Mul.precedence());
    assert!(BinOp::Mul.precedence() < BinOp::Exponent.precedence());
}

#[test]
fn expr_span_reads_back_literal_spans() {
    let e = Expr::Number(42.0, span(4, 6));
    assert_eq!(e.span(), span(4, 6));
}

#[test]
fn expr_span_reads_boxed_function_span() {
    let f = Function {
        name: None,
        params: Vec::new(),
        body: Vec::new(),
        is_async: false,
        is_generator: false,
        is_arrow: true,
        expression_body: None,
        span: span(0, 10),
    };
    let e = Expr::Function(Box::new(f));
    assert_eq!(e.span(), span(0, 10));
}

#[test]
fn stmt_span_reads_back_block_span() {
    let s = Stmt::Block(Vec::new(), span(0, 2));
    assert_eq!(s.span(), span(0, 2));
}

#[test]
fn ast_default_is_empty_with_no_hashbang() {
    let ast = Ast::default();
    assert!(ast.body.is_empty());
    assert!(ast.hashbang.is_none());
}
