//! The message catalog: one entry per [`MsgId`], with its default severity
//! and template text.
//!
//! Unlike a type checker's catalog (which runs into the thousands), the
//! front-end core only needs messages for the conditions enumerated in
//! `spec.md` §7: lex errors, parse errors, TypeScript-structural errors,
//! semantic errors, and advisory warnings. New entries are appended, never
//! renumbered — `overrides` maps (`spec.md` §6) key off these ids and a
//! host may have persisted them.

use super::LogLevel;

/// Stable identifier for a diagnostic message, independent of its text.
///
/// `overrides: map<MsgId, LogLevel>` (`spec.md` §6) promotes or silences a
/// message by this id rather than by matching rendered text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[repr(u32)]
pub enum MsgId {
    // --- Lex errors (1000s) ---
    LexUnterminatedString = 1000,
    LexUnterminatedTemplate = 1001,
    LexUnterminatedRegex = 1002,
    LexInvalidEscape = 1003,
    LexUnexpectedCharacter = 1004,
    LexLegacyOctalEscapeInStrictMode = 1005,
    LexLegacyOctalLiteral = 1006,

    // --- Parse errors (2000s) ---
    ParseUnexpectedToken = 2000,
    ParseExpectedToken = 2001,
    ParseExpectedSemicolon = 2002,
    ParseInvalidBindingPattern = 2003,
    ParseInvalidAssignmentTarget = 2004,
    ParseDuplicateLabel = 2005,
    ParseRedeclaration = 2006,
    ParseMismatchedJsxTags = 2007,
    ParseInvalidExprDefaultValue = 2008,
    ParseInvalidBindingCommaAfterSpread = 2009,
    ParseInvalidExprAfterQuestion = 2010,
    ParseTrailingCommaAfterRest = 2011,

    // --- TypeScript-structural errors (3000s) ---
    TsAnnotationInWrongPosition = 3000,
    TsDeclareInWrongContext = 3001,
    TsUnexpectedTypeSyntax = 3002,

    // --- Semantic errors (4000s) ---
    SemLabelNotInScope = 4000,
    SemYieldOutsideGenerator = 4001,
    SemAwaitOutsideAsync = 4002,
    SemRequireCapturedOutsideTry = 4003,
    SemDynamicImportArgumentNotString = 4004,

    // --- Advisory warnings (5000s) ---
    WarnSuspiciousNotIn = 5000,
    WarnSuspiciousNotInstanceof = 5001,
    WarnComparisonWithNegativeZero = 5002,
    WarnEqualityWithObjectLiteral = 5003,
    WarnAsiSwallowedReturnExpression = 5004,
    WarnDeprecatedSyntaxAtTarget = 5005,
    WarnDuplicateExport = 5006,
    WarnLegacyOctalLiteral = 5007,
}

impl MsgId {
    /// The catalog entry's default severity and template text.
    #[must_use]
    pub const fn entry(self) -> (LogLevel, &'static str) {
        match self {
            Self::LexUnterminatedString => (LogLevel::Error, "Unterminated string literal."),
            Self::LexUnterminatedTemplate => (LogLevel::Error, "Unterminated template literal."),
            Self::LexUnterminatedRegex => {
                (LogLevel::Error, "Unterminated regular expression literal.")
            }
            Self::LexInvalidEscape => (LogLevel::Error, "Invalid escape sequence."),
            Self::LexUnexpectedCharacter => (LogLevel::Error, "Unexpected character '{0}'."),
            Self::LexLegacyOctalEscapeInStrictMode => (
                LogLevel::Error,
                "Octal escape sequences are not allowed in strict mode.",
            ),
            Self::LexLegacyOctalLiteral => (
                LogLevel::Warning,
                "Octal literals are not allowed; use the '0o' prefix instead.",
            ),

            Self::ParseUnexpectedToken => (LogLevel::Error, "Unexpected token '{0}'."),
            Self::ParseExpectedToken => (LogLevel::Error, "Expected '{0}' but found '{1}'."),
            Self::ParseExpectedSemicolon => (LogLevel::Error, "Expected ';'."),
            Self::ParseInvalidBindingPattern => (LogLevel::Error, "Invalid binding pattern."),
            Self::ParseInvalidAssignmentTarget => (
                LogLevel::Error,
                "Invalid left-hand side in assignment.",
            ),
            Self::ParseDuplicateLabel => (LogLevel::Error, "Label '{0}' is already declared."),
            Self::ParseRedeclaration => (
                LogLevel::Error,
                "Cannot redeclare block-scoped variable '{0}'.",
            ),
            Self::ParseMismatchedJsxTags => (
                LogLevel::Error,
                "Expected closing tag to match opening tag '{0}'.",
            ),
            Self::ParseInvalidExprDefaultValue => (
                LogLevel::Error,
                "A default value is only valid in a destructuring pattern.",
            ),
            Self::ParseInvalidBindingCommaAfterSpread => (
                LogLevel::Error,
                "A rest element must be last in a destructuring pattern.",
            ),
            Self::ParseInvalidExprAfterQuestion => (
                LogLevel::Error,
                "An optional parameter marker is only valid in a binding pattern.",
            ),
            Self::ParseTrailingCommaAfterRest => (
                LogLevel::Error,
                "A rest element cannot have a trailing comma.",
            ),

            Self::TsAnnotationInWrongPosition => {
                (LogLevel::Error, "A type annotation is not valid here.")
            }
            Self::TsDeclareInWrongContext => {
                (LogLevel::Error, "A 'declare' modifier is not valid here.")
            }
            Self::TsUnexpectedTypeSyntax => (LogLevel::Error, "Unexpected type syntax."),

            Self::SemLabelNotInScope => (LogLevel::Error, "Label '{0}' is not in scope here."),
            Self::SemYieldOutsideGenerator => (
                LogLevel::Error,
                "'yield' expressions are only allowed in generator functions.",
            ),
            Self::SemAwaitOutsideAsync => (
                LogLevel::Error,
                "'await' expressions are only allowed in async functions.",
            ),
            Self::SemRequireCapturedOutsideTry => (
                LogLevel::Error,
                "Indirect use of 'require' is not allowed here; wrap it in a try block.",
            ),
            Self::SemDynamicImportArgumentNotString => (
                LogLevel::Error,
                "The argument to 'import()' must be a string literal to record a dependency.",
            ),

            Self::WarnSuspiciousNotIn => (
                LogLevel::Warning,
                "The '!' operator binds tighter than 'in' here; did you mean '!(...in...)'",
            ),
            Self::WarnSuspiciousNotInstanceof => (
                LogLevel::Warning,
                "The '!' operator binds tighter than 'instanceof' here; did you mean '!(...instanceof...)'",
            ),
            Self::WarnComparisonWithNegativeZero => (
                LogLevel::Warning,
                "Comparison with -0 does not distinguish it from 0; use Object.is instead.",
            ),
            Self::WarnEqualityWithObjectLiteral => (
                LogLevel::Warning,
                "This comparison is always false because an object literal is never equal to anything with '=='.",
            ),
            Self::WarnAsiSwallowedReturnExpression => (
                LogLevel::Warning,
                "The line break after 'return' causes automatic semicolon insertion; this expression is unreachable.",
            ),
            Self::WarnDeprecatedSyntaxAtTarget => (
                LogLevel::Warning,
                "'{0}' is deprecated at the configured target.",
            ),
            Self::WarnDuplicateExport => (LogLevel::Warning, "Duplicate export '{0}'."),
            Self::WarnLegacyOctalLiteral => (
                LogLevel::Warning,
                "Octal literals are not allowed in strict mode.",
            ),
        }
    }

    #[must_use]
    pub const fn default_level(self) -> LogLevel {
        self.entry().0
    }

    #[must_use]
    pub const fn template(self) -> &'static str {
        self.entry().1
    }
}

/// Substitute `{0}`, `{1}`, ... placeholders in a template with `args`.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}
