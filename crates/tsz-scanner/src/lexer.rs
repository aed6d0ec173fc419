//! Byte stream to token stream.
//!
//! Implements the public operations from `spec.md` §4.1: `next`,
//! `next_inside_jsx_element`, `next_jsx_element_child`, `expect`,
//! `expect_or_insert_semicolon`, `rescan_close_brace_as_template_token`,
//! `scan_regex`, and `expect_greater_than`. Structural errors are logged and
//! reported as [`LexerPanic`], a sentinel the parser's entry points catch to
//! unwind to `(partial_ast, ok=false)` without modeling control flow as a
//! Rust panic.

use crate::keywords;
use crate::token::{SyntaxKind, Token, TokenValue};
use tsz_common::diagnostics::{Diagnostic, DiagnosticRange, Log, LogLevel, MsgId};
use tsz_common::{SourceId, Span};

/// Raised when the lexer hits an unrecoverable syntax error. The parser's
/// entry points catch this and return `ok=false` with whatever diagnostics
/// were already logged; a speculative (backtracking) parse catches it to
/// restore a snapshot instead.
#[derive(Debug, Clone, Copy)]
pub struct LexerPanic;

pub type LexResult<T> = Result<T, LexerPanic>;

/// A value-type snapshot of lexer state, used by the parser's single
/// backtracking primitive (TypeScript type-argument disambiguation).
#[derive(Clone, Copy, Debug)]
pub struct LexerSnapshot {
    pos: u32,
    token_start: u32,
    token_end: u32,
    kind: SyntaxKind,
    has_newline_before: bool,
}

pub struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    source_id: SourceId,
    pos: u32,
    token_start: u32,
    token_end: u32,
    kind: SyntaxKind,
    has_newline_before: bool,
    value: TokenValue,
    /// Disabled during a speculative (backtracking) parse so diagnostics
    /// raised by a doomed attempt never reach the log.
    pub is_log_disabled: bool,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(source: &'a str, source_id: SourceId) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            source_id,
            pos: 0,
            token_start: 0,
            token_end: 0,
            kind: SyntaxKind::Unknown,
            has_newline_before: false,
            value: TokenValue::None,
            is_log_disabled: false,
        }
    }

    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    #[must_use]
    pub fn span(&self) -> Span {
        Span::new(self.token_start, self.token_end)
    }

    #[must_use]
    pub fn has_newline_before(&self) -> bool {
        self.has_newline_before
    }

    #[must_use]
    pub fn value(&self) -> &TokenValue {
        &self.value
    }

    #[must_use]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    #[must_use]
    pub fn current_token(&self) -> Token {
        Token {
            kind: self.kind,
            span: self.span(),
            has_newline_before: self.has_newline_before,
            value: self.value.clone(),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> LexerSnapshot {
        LexerSnapshot {
            pos: self.pos,
            token_start: self.token_start,
            token_end: self.token_end,
            kind: self.kind,
            has_newline_before: self.has_newline_before,
        }
    }

    pub fn restore(&mut self, snapshot: LexerSnapshot) {
        self.pos = snapshot.pos;
        self.token_start = snapshot.token_start;
        self.token_end = snapshot.token_end;
        self.kind = snapshot.kind;
        self.has_newline_before = snapshot.has_newline_before;
        self.value = TokenValue::None;
    }

    fn error(&self, log: &dyn Log, id: MsgId, args: &[&str]) {
        if self.is_log_disabled {
            return;
        }
        let overrides = Default::default();
        let diagnostic = Diagnostic::from_catalog(
            id,
            args,
            Some(DiagnosticRange {
                source: self.source_id,
                span: self.span(),
            }),
            &overrides,
        );
        log.add_msg(diagnostic);
    }

    fn byte_at(&self, i: u32) -> Option<u8> {
        self.bytes.get(i as usize).copied()
    }

    fn char_at(&self, i: u32) -> Option<char> {
        self.source[i as usize..].chars().next()
    }

    fn is_id_start(c: char) -> bool {
        c == '$' || c == '_' || c.is_alphabetic()
    }

    fn is_id_continue(c: char) -> bool {
        c == '$' || c == '_' || c.is_alphanumeric()
    }

    /// Advance to the next token in the default (non-JSX) mode.
    pub fn next(&mut self, log: &dyn Log) -> LexResult<Token> {
        self.has_newline_before = false;
        loop {
            self.skip_trivia();
            self.token_start = self.pos;
            self.value = TokenValue::None;
            let Some(c) = self.char_at(self.pos) else {
                self.token_end = self.pos;
                self.kind = SyntaxKind::EndOfFile;
                return Ok(self.current_token());
            };

            if c == '/' && self.byte_at(self.pos + 1) == Some(b'/') {
                self.skip_line_comment();
                continue;
            }
            if c == '/' && self.byte_at(self.pos + 1) == Some(b'*') {
                self.skip_block_comment();
                continue;
            }

            self.kind = self.scan_one(c, log)?;
            self.token_end = self.pos;
            return Ok(self.current_token());
        }
    }

    fn skip_trivia(&mut self) {
        while let Some(c) = self.char_at(self.pos) {
            if c == '\n' {
                self.has_newline_before = true;
                self.pos += 1;
            } else if c.is_whitespace() {
                self.pos += c.len_utf8() as u32;
            } else {
                break;
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.char_at(self.pos) {
            if c == '\n' {
                break;
            }
            self.pos += c.len_utf8() as u32;
        }
    }

    fn skip_block_comment(&mut self) {
        self.pos += 2;
        while let Some(c) = self.char_at(self.pos) {
            if c == '\n' {
                self.has_newline_before = true;
            }
            if c == '*' && self.byte_at(self.pos + 1) == Some(b'/') {
                self.pos += 2;
                return;
            }
            self.pos += c.len_utf8() as u32;
        }
    }

    fn scan_one(&mut self, c: char, log: &dyn Log) -> LexResult<SyntaxKind> {
        use SyntaxKind::*;
        match c {
            '"' | '\'' => self.scan_string(c, log),
            '`' => self.scan_template_head_or_no_sub(log),
            '0'..='9' => Ok(self.scan_number(log)),
            '.' if self.byte_at(self.pos + 1).is_some_and(|b| b.is_ascii_digit()) => {
                Ok(self.scan_number(log))
            }
            '#' => Ok(self.scan_private_identifier()),
            c if Self::is_id_start(c) => Ok(self.scan_identifier_or_keyword()),
            _ => self.scan_punctuation(log),
        }
    }

    fn advance_char(&mut self) -> char {
        let c = self.char_at(self.pos).unwrap();
        self.pos += c.len_utf8() as u32;
        c
    }

    fn scan_identifier_or_keyword(&mut self) -> SyntaxKind {
        while let Some(c) = self.char_at(self.pos) {
            if Self::is_id_continue(c) {
                self.pos += c.len_utf8() as u32;
            } else {
                break;
            }
        }
        let text = &self.source[self.token_start as usize..self.pos as usize];
        keywords::lookup(text).unwrap_or(SyntaxKind::Identifier)
    }

    fn scan_private_identifier(&mut self) -> SyntaxKind {
        self.pos += 1; // '#'
        while let Some(c) = self.char_at(self.pos) {
            if Self::is_id_continue(c) {
                self.pos += c.len_utf8() as u32;
            } else {
                break;
            }
        }
        SyntaxKind::PrivateIdentifier
    }

    fn scan_number(&mut self, log: &dyn Log) -> SyntaxKind {
        let start = self.pos;
        if self.char_at(self.pos) == Some('0')
            && matches!(self.char_at(self.pos + 1), Some('x' | 'X' | 'b' | 'B' | 'o' | 'O'))
        {
            self.pos += 2;
            while self
                .char_at(self.pos)
                .is_some_and(|c| c.is_ascii_hexdigit() || c == '_')
            {
                self.pos += 1;
            }
        } else {
            // legacy octal: 0 followed by more digits, no dot/exponent
            let is_leading_zero = self.char_at(self.pos) == Some('0')
                && matches!(self.char_at(self.pos + 1), Some('0'..='9'));
            while self.char_at(self.pos).is_some_and(|c| c.is_ascii_digit() || c == '_') {
                self.pos += 1;
            }
            let mut is_float = false;
            if self.char_at(self.pos) == Some('.') {
                is_float = true;
                self.pos += 1;
                while self.char_at(self.pos).is_some_and(|c| c.is_ascii_digit() || c == '_') {
                    self.pos += 1;
                }
            }
            if matches!(self.char_at(self.pos), Some('e' | 'E')) {
                is_float = true;
                self.pos += 1;
                if matches!(self.char_at(self.pos), Some('+' | '-')) {
                    self.pos += 1;
                }
                while self.char_at(self.pos).is_some_and(|c| c.is_ascii_digit()) {
                    self.pos += 1;
                }
            }
            if is_leading_zero && !is_float {
                self.error(log, MsgId::LexLegacyOctalLiteral, &[]);
            }
        }
        if self.char_at(self.pos) == Some('n') {
            self.pos += 1;
            let text = &self.source[start as usize..self.pos as usize - 1];
            self.value = TokenValue::BigInt(text.replace('_', ""));
            return SyntaxKind::BigIntLiteral;
        }
        let text = &self.source[start as usize..self.pos as usize];
        let value = tsz_common::numeric::parse_numeric_literal_value(text).unwrap_or(f64::NAN);
        self.value = TokenValue::Number(value);
        SyntaxKind::NumericLiteral
    }

    fn scan_string(&mut self, quote: char, log: &dyn Log) -> LexResult<SyntaxKind> {
        self.pos += 1;
        let mut units = Vec::new();
        loop {
            match self.char_at(self.pos) {
                None => {
                    self.error(log, MsgId::LexUnterminatedString, &[]);
                    return Err(LexerPanic);
                }
                Some('\n') => {
                    self.error(log, MsgId::LexUnterminatedString, &[]);
                    return Err(LexerPanic);
                }
                Some(c) if c == quote => {
                    self.pos += 1;
                    break;
                }
                Some('\\') => {
                    self.pos += 1;
                    self.scan_escape_into(&mut units, log)?;
                }
                Some(c) => {
                    push_utf16(&mut units, c);
                    self.pos += c.len_utf8() as u32;
                }
            }
        }
        self.value = TokenValue::String(units);
        Ok(SyntaxKind::StringLiteral)
    }

    fn scan_escape_into(&mut self, units: &mut Vec<u16>, log: &dyn Log) -> LexResult<()> {
        let Some(c) = self.char_at(self.pos) else {
            self.error(log, MsgId::LexUnterminatedString, &[]);
            return Err(LexerPanic);
        };
        match c {
            'n' => {
                units.push(b'\n' as u16);
                self.pos += 1;
            }
            't' => {
                units.push(b'\t' as u16);
                self.pos += 1;
            }
            'r' => {
                units.push(b'\r' as u16);
                self.pos += 1;
            }
            'b' => {
                units.push(0x08);
                self.pos += 1;
            }
            'f' => {
                units.push(0x0C);
                self.pos += 1;
            }
            'v' => {
                units.push(0x0B);
                self.pos += 1;
            }
            '0' if !self.byte_at(self.pos + 1).is_some_and(|b| b.is_ascii_digit()) => {
                units.push(0);
                self.pos += 1;
            }
            '1'..='7' => {
                // Legacy octal escape: error in strict-mode callers decide;
                // the lexer always logs it so the parser can downgrade.
                let start = self.pos;
                let mut n = 0u32;
                let mut count = 0;
                while count < 3 && self.char_at(self.pos).is_some_and(|d| ('0'..='7').contains(&d)) {
                    n = n * 8 + self.char_at(self.pos).unwrap().to_digit(8).unwrap();
                    self.pos += 1;
                    count += 1;
                }
                let _ = start;
                self.error(log, MsgId::LexLegacyOctalEscapeInStrictMode, &[]);
                units.push(n as u16);
            }
            'x' => {
                self.pos += 1;
                let mut n = 0u32;
                for _ in 0..2 {
                    let Some(d) = self.char_at(self.pos).and_then(|d| d.to_digit(16)) else {
                        self.error(log, MsgId::LexInvalidEscape, &[]);
                        return Err(LexerPanic);
                    };
                    n = n * 16 + d;
                    self.pos += 1;
                }
                units.push(n as u16);
            }
            'u' => {
                self.pos += 1;
                if self.char_at(self.pos) == Some('{') {
                    self.pos += 1;
                    let mut n = 0u32;
                    while self.char_at(self.pos) != Some('}') {
                        let Some(d) = self.char_at(self.pos).and_then(|d| d.to_digit(16)) else {
                            self.error(log, MsgId::LexInvalidEscape, &[]);
                            return Err(LexerPanic);
                        };
                        n = n * 16 + d;
                        self.pos += 1;
                    }
                    self.pos += 1; // '}'
                    if let Some(ch) = char::from_u32(n) {
                        push_utf16(units, ch);
                    } else {
                        self.error(log, MsgId::LexInvalidEscape, &[]);
                    }
                } else {
                    let mut n = 0u32;
                    for _ in 0..4 {
                        let Some(d) = self.char_at(self.pos).and_then(|d| d.to_digit(16)) else {
                            self.error(log, MsgId::LexInvalidEscape, &[]);
                            return Err(LexerPanic);
                        };
                        n = n * 16 + d;
                        self.pos += 1;
                    }
                    units.push(n as u16);
                }
            }
            '\n' => {
                self.pos += 1; // line continuation, no code unit
            }
            other => {
                push_utf16(units, other);
                self.pos += other.len_utf8() as u32;
            }
        }
        Ok(())
    }

    fn scan_template_head_or_no_sub(&mut self, log: &dyn Log) -> LexResult<SyntaxKind> {
        self.pos += 1; // '`'
        self.scan_template_span(true, log)
    }

    /// Called by the parser after the expression inside `${…}` closes, to
    /// reinterpret the following bytes (starting at `}`) as the template's
    /// continuation.
    pub fn rescan_close_brace_as_template_token(&mut self, log: &dyn Log) -> LexResult<Token> {
        self.token_start = self.pos;
        self.pos += 1; // '}'
        self.kind = self.scan_template_span(false, log)?;
        self.token_end = self.pos;
        Ok(self.current_token())
    }

    fn scan_template_span(&mut self, is_head: bool, log: &dyn Log) -> LexResult<SyntaxKind> {
        let mut units = Vec::new();
        loop {
            match self.char_at(self.pos) {
                None => {
                    self.error(log, MsgId::LexUnterminatedTemplate, &[]);
                    self.value = TokenValue::String(units);
                    return Ok(if is_head {
                        SyntaxKind::NoSubstitutionTemplateLiteral
                    } else {
                        SyntaxKind::TemplateTail
                    });
                }
                Some('`') => {
                    self.pos += 1;
                    self.value = TokenValue::String(units);
                    return Ok(if is_head {
                        SyntaxKind::NoSubstitutionTemplateLiteral
                    } else {
                        SyntaxKind::TemplateTail
                    });
                }
                Some('$') if self.byte_at(self.pos + 1) == Some(b'{') => {
                    self.pos += 2;
                    self.value = TokenValue::String(units);
                    return Ok(if is_head {
                        SyntaxKind::TemplateHead
                    } else {
                        SyntaxKind::TemplateMiddle
                    });
                }
                Some('\\') => {
                    self.pos += 1;
                    self.scan_escape_into(&mut units, log)?;
                }
                Some(c) => {
                    push_utf16(&mut units, c);
                    self.pos += c.len_utf8() as u32;
                }
            }
        }
    }

    /// Called once the parser has decided that `/` begins a regular
    /// expression literal rather than division.
    pub fn scan_regex(&mut self, log: &dyn Log) -> LexResult<Token> {
        self.token_start = self.pos;
        self.pos += 1; // '/'
        let mut in_class = false;
        loop {
            match self.char_at(self.pos) {
                None => {
                    self.error(log, MsgId::LexUnterminatedRegex, &[]);
                    return Err(LexerPanic);
                }
                Some('\n') => {
                    self.error(log, MsgId::LexUnterminatedRegex, &[]);
                    return Err(LexerPanic);
                }
                Some('\\') => {
                    self.pos += 1;
                    if let Some(c) = self.char_at(self.pos) {
                        self.pos += c.len_utf8() as u32;
                    }
                }
                Some('[') => {
                    in_class = true;
                    self.pos += 1;
                }
                Some(']') => {
                    in_class = false;
                    self.pos += 1;
                }
                Some('/') if !in_class => {
                    self.pos += 1;
                    break;
                }
                Some(c) => {
                    self.pos += c.len_utf8() as u32;
                }
            }
        }
        while let Some(c) = self.char_at(self.pos) {
            if Self::is_id_continue(c) {
                self.pos += c.len_utf8() as u32;
            } else {
                break;
            }
        }
        self.token_end = self.pos;
        self.kind = SyntaxKind::RegularExpressionLiteral;
        Ok(self.current_token())
    }

    fn scan_punctuation(&mut self, log: &dyn Log) -> LexResult<SyntaxKind> {
        use SyntaxKind::*;
        let rest = &self.source[self.pos as usize..];

        // Longest match first: 4, 3, 2, then 1 character operators.
        const FOUR: &[(&str, SyntaxKind)] = &[
            (">>>=", GreaterThanGreaterThanGreaterThanEqualsToken),
        ];
        const THREE: &[(&str, SyntaxKind)] = &[
            ("...", DotDotDot),
            ("===", EqualsEqualsEqualsToken),
            ("!==", ExclamationEqualsEqualsToken),
            ("**=", AsteriskAsteriskEqualsToken),
            ("<<=", LessThanLessThanEqualsToken),
            (">>=", GreaterThanGreaterThanEqualsToken),
            (">>>", GreaterThanGreaterThanGreaterThanToken),
            ("&&=", AmpersandAmpersandEqualsToken),
            ("||=", BarBarEqualsToken),
            ("??=", QuestionQuestionEqualsToken),
        ];
        const TWO: &[(&str, SyntaxKind)] = &[
            ("=>", EqualsGreaterThanToken),
            ("==", EqualsEqualsToken),
            ("!=", ExclamationEqualsToken),
            ("<=", LessThanEqualsToken),
            (">=", GreaterThanEqualsToken),
            ("**", AsteriskAsteriskToken),
            ("++", PlusPlusToken),
            ("--", MinusMinusToken),
            ("<<", LessThanLessThanToken),
            (">>", GreaterThanGreaterThanToken),
            ("&&", AmpersandAmpersandToken),
            ("||", BarBarToken),
            ("??", QuestionQuestionToken),
            ("?.", QuestionDotToken),
            ("+=", PlusEqualsToken),
            ("-=", MinusEqualsToken),
            ("*=", AsteriskEqualsToken),
            ("/=", SlashEqualsToken),
            ("%=", PercentEqualsToken),
            ("&=", AmpersandEqualsToken),
            ("|=", BarEqualsToken),
            ("^=", CaretEqualsToken),
            ("</", LessThanSlashToken),
            ("/>", SlashGreaterThanToken),
        ];

        for (text, kind) in FOUR {
            if rest.starts_with(text) {
                self.pos += text.len() as u32;
                return Ok(*kind);
            }
        }
        for (text, kind) in THREE {
            if rest.starts_with(text) {
                self.pos += text.len() as u32;
                return Ok(*kind);
            }
        }
        for (text, kind) in TWO {
            if rest.starts_with(text) {
                self.pos += text.len() as u32;
                return Ok(*kind);
            }
        }

        let c = rest.chars().next().unwrap();
        let kind = match c {
            '{' => OpenBrace,
            '}' => CloseBrace,
            '(' => OpenParen,
            ')' => CloseParen,
            '[' => OpenBracket,
            ']' => CloseBracket,
            '.' => Dot,
            ';' => Semicolon,
            ',' => Comma,
            '@' => At,
            '#' => Hash,
            '`' => Backtick,
            '<' => LessThanToken,
            '>' => GreaterThanToken,
            '+' => PlusToken,
            '-' => MinusToken,
            '*' => AsteriskToken,
            '/' => SlashToken,
            '%' => PercentToken,
            '&' => AmpersandToken,
            '|' => BarToken,
            '^' => CaretToken,
            '!' => ExclamationToken,
            '~' => TildeToken,
            '?' => QuestionToken,
            ':' => ColonToken,
            '=' => EqualsToken,
            _ => {
                self.pos += c.len_utf8() as u32;
                self.error(log, MsgId::LexUnexpectedCharacter, &[&c.to_string()]);
                return Err(LexerPanic);
            }
        };
        self.pos += c.len_utf8() as u32;
        Ok(kind)
    }

    /// Advance treating `<`, `>`, `/`, identifiers, and strings per JSX
    /// attribute grammar; `>>` and `>=` are *not* returned as compound
    /// tokens in this mode.
    pub fn next_inside_jsx_element(&mut self, log: &dyn Log) -> LexResult<Token> {
        self.has_newline_before = false;
        self.skip_trivia();
        self.token_start = self.pos;
        self.value = TokenValue::None;
        let Some(c) = self.char_at(self.pos) else {
            self.kind = SyntaxKind::EndOfFile;
            self.token_end = self.pos;
            return Ok(self.current_token());
        };
        self.kind = match c {
            '"' | '\'' => self.scan_string(c, log)?,
            '{' => {
                self.pos += 1;
                SyntaxKind::OpenBrace
            }
            '}' => {
                self.pos += 1;
                SyntaxKind::CloseBrace
            }
            '<' => {
                self.pos += 1;
                if self.char_at(self.pos) == Some('/') {
                    self.pos += 1;
                    SyntaxKind::LessThanSlashToken
                } else {
                    SyntaxKind::LessThanToken
                }
            }
            '>' => {
                self.pos += 1;
                SyntaxKind::GreaterThanToken
            }
            '/' => {
                self.pos += 1;
                if self.char_at(self.pos) == Some('>') {
                    self.pos += 1;
                    SyntaxKind::SlashGreaterThanToken
                } else {
                    SyntaxKind::SlashToken
                }
            }
            '=' => {
                self.pos += 1;
                SyntaxKind::EqualsToken
            }
            c if Self::is_id_start(c) => self.scan_jsx_name(),
            _ => self.scan_punctuation(log)?,
        };
        self.token_end = self.pos;
        Ok(self.current_token())
    }

    /// JSX attribute/element names allow embedded `-` (e.g. `data-foo`).
    fn scan_jsx_name(&mut self) -> SyntaxKind {
        while let Some(c) = self.char_at(self.pos) {
            if Self::is_id_continue(c) || c == '-' {
                self.pos += c.len_utf8() as u32;
            } else {
                break;
            }
        }
        SyntaxKind::Identifier
    }

    /// Advance treating text between tags as a JSX string literal until `{`
    /// or `<`.
    pub fn next_jsx_element_child(&mut self) -> Token {
        self.has_newline_before = false;
        self.token_start = self.pos;
        let mut units = Vec::new();
        while let Some(c) = self.char_at(self.pos) {
            if c == '{' || c == '<' {
                break;
            }
            if c == '\n' {
                self.has_newline_before = true;
            }
            push_utf16(&mut units, c);
            self.pos += c.len_utf8() as u32;
        }
        self.token_end = self.pos;
        self.kind = SyntaxKind::JsxText;
        self.value = TokenValue::String(units);
        self.current_token()
    }

    /// Closes TypeScript generic-argument lists by decomposing `>>`,
    /// `>>>`, `>=`, `>>=`, `>>>=` into their prefix `>`, consuming only one
    /// `>` from the current token and leaving the rest for the next scan.
    pub fn expect_greater_than(&mut self, is_inside_jsx_element: bool) -> Token {
        let remainder_kind = match self.kind {
            SyntaxKind::GreaterThanGreaterThanToken => Some(SyntaxKind::GreaterThanToken),
            SyntaxKind::GreaterThanGreaterThanGreaterThanToken => {
                Some(SyntaxKind::GreaterThanGreaterThanToken)
            }
            SyntaxKind::GreaterThanEqualsToken => Some(SyntaxKind::EqualsToken),
            SyntaxKind::GreaterThanGreaterThanEqualsToken => {
                Some(SyntaxKind::GreaterThanEqualsToken)
            }
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken => {
                Some(SyntaxKind::GreaterThanGreaterThanEqualsToken)
            }
            _ => None,
        };
        let _ = is_inside_jsx_element;
        let consumed_end = self.token_start + 1;
        if let Some(rest_kind) = remainder_kind {
            self.kind = rest_kind;
            self.token_start = consumed_end;
            // token_end stays where it was: the remainder token spans
            // [consumed_end, token_end).
        } else {
            self.token_end = self.pos;
        }
        Token {
            kind: SyntaxKind::GreaterThanToken,
            span: Span::new(consumed_end - 1, consumed_end),
            has_newline_before: self.has_newline_before,
            value: TokenValue::None,
        }
    }

    /// Assert the current token is `kind`; a mismatch is a parse error that
    /// raises [`LexerPanic`] after logging.
    pub fn expect(&mut self, kind: SyntaxKind, log: &dyn Log) -> LexResult<()> {
        if self.kind == kind {
            Ok(())
        } else {
            self.error(
                log,
                MsgId::ParseExpectedToken,
                &[&format!("{kind:?}"), &format!("{:?}", self.kind)],
            );
            Err(LexerPanic)
        }
    }

    /// Accept a semicolon, or insert one if ASI permits: the current token
    /// is `}`, end-of-file, or has a newline before it.
    pub fn expect_or_insert_semicolon(&mut self, log: &dyn Log) -> LexResult<()> {
        if self.kind == SyntaxKind::Semicolon {
            return Ok(());
        }
        if self.kind == SyntaxKind::CloseBrace
            || self.kind == SyntaxKind::EndOfFile
            || self.has_newline_before
        {
            return Ok(());
        }
        self.error(log, MsgId::ParseExpectedSemicolon, &[]);
        Err(LexerPanic)
    }
}

fn push_utf16(units: &mut Vec<u16>, c: char) {
    let mut buf = [0u16; 2];
    units.extend_from_slice(c.encode_utf16(&mut buf));
}
