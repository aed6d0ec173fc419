//! Centralized limits and thresholds used across the front-end passes.
//!
//! Centralizing these values prevents duplicate definitions with
//! inconsistent numbers and documents the rationale for each one.

/// Maximum depth for the parser's expression recursion (`parse_expr`/
/// `parse_suffix`).
///
/// Prevents a stack overflow on adversarial input like
/// `(((((((((((...)))))))))))`. Exceeding this raises a parse error rather
/// than crashing the process.
pub const MAX_EXPR_PARSE_DEPTH: u32 = 500;

/// Maximum depth for the resolver's AST walk (`visit_expr`/`visit_stmt`).
///
/// Mirrors [`MAX_EXPR_PARSE_DEPTH`] for the second pass; see `spec.md` §9
/// on converting the hottest recursion into an explicit work-list for
/// pathological inputs. Recursion is used here (matching the rest of this
/// codebase's AST walks); this constant exists so a future worklist
/// conversion has a single number to preserve.
pub const MAX_VISIT_DEPTH: u32 = 500;

/// Maximum number of scope-walk iterations when resolving an identifier,
/// guarding against a corrupted scope parent chain forming a cycle.
pub const MAX_SCOPE_WALK_ITERATIONS: usize = 10_000;

/// Default diagnostic message limit for the stderr log (`0` means
/// unlimited). Matches the CLI default described in `spec.md` §6.
pub const DEFAULT_LOG_MESSAGE_LIMIT: usize = 0;

/// Width, in columns, reserved for the line-number gutter and separators
/// when rendering a source excerpt (`spec.md` §4.6 rule 2).
pub const RENDER_MARGIN_WIDTH: usize = 9;

/// Notes are wrapped at `terminal_width - 2`, capped at this width unless
/// the note opts out via `disable_maximum_width`.
pub const MAX_NOTE_WIDTH: usize = 100;

/// Tab stop width used when expanding tabs in a rendered source excerpt.
pub const TAB_STOP_WIDTH: usize = 2;
