// SPDX-FileCopyrightText: 2026 The Calyx Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Splits one logical line into tokens.
//!
//! ```txt
//! contentline = name *(";" param) ":" value
//! param       = param-name "=" param-value *("," param-value)
//! param-value = paramtext / quoted-string
//! ```

use std::collections::VecDeque;

use logos::Logos;

use crate::keyword::{
    KW_BEGIN_VALARM, KW_BEGIN_VCALENDAR, KW_BEGIN_VEVENT, KW_END_VALARM, KW_END_VCALENDAR,
    KW_END_VEVENT,
};
use crate::lexer::unfold::LogicalLine;
use crate::lexer::{LexError, Token, TokenKind};

const MARKERS: [(&str, TokenKind); 6] = [
    (KW_BEGIN_VCALENDAR, TokenKind::CalendarBegin),
    (KW_END_VCALENDAR, TokenKind::CalendarEnd),
    (KW_BEGIN_VEVENT, TokenKind::EventBegin),
    (KW_END_VEVENT, TokenKind::EventEnd),
    (KW_BEGIN_VALARM, TokenKind::AlarmBegin),
    (KW_END_VALARM, TokenKind::AlarmEnd),
];

#[derive(Debug, PartialEq, Eq, Clone, Copy, Logos)]
enum Piece<'a> {
    /// Run of SAFE-CHAR: anything but controls, DQUOTE and the delimiters
    #[regex(r#"[^";:,=\x00-\x1F\x7F\x{80}-\x{9F}]+"#)]
    Text(&'a str),

    /// Quoted string, quotes included
    #[regex(r#""[^"\x00-\x1F\x7F\x{80}-\x{9F}]*""#)]
    Quoted(&'a str),

    #[token(";")]
    Semi,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    #[token("=")]
    Eq,
}

/// Tokenize `line`, appending to `out`. Tokens produced before an error are
/// kept.
pub(crate) fn scan_line(line: &LogicalLine, out: &mut VecDeque<Token>) -> Result<(), LexError> {
    let text = line.text.as_str();
    if let Some((marker, kind)) = MARKERS.iter().find(|(marker, _)| text.starts_with(marker)) {
        if let Some(c) = text.get(marker.len()..).and_then(|rest| rest.chars().next()) {
            return Err(LexError::Unexpected {
                offset: line.raw_offset(marker.len()),
                expected: "end of line",
                found: describe(c),
            });
        }
        out.push_back(Token::new(*kind, text, line.start));
        return Ok(());
    }

    Scanner {
        line,
        lex: Piece::lexer(text),
        out,
    }
    .run()
}

fn describe(c: char) -> String {
    format!("{c:?}")
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-'
}

struct Scanner<'a, 'q> {
    line: &'a LogicalLine,
    lex: logos::Lexer<'a, Piece<'a>>,
    out: &'q mut VecDeque<Token>,
}

impl<'a> Scanner<'a, '_> {
    fn run(mut self) -> Result<(), LexError> {
        const AFTER_NAME: &str = "':' or ';'";

        self.name(TokenKind::Name, "property name", AFTER_NAME)?;
        let mut delimiter = self.next_piece(AFTER_NAME)?;
        loop {
            match delimiter {
                Piece::Colon => return self.value(),
                Piece::Semi => {
                    self.name(TokenKind::ParamName, "parameter name", "'='")?;
                    if self.next_piece("'='")? != Piece::Eq {
                        return Err(self.unexpected("'='"));
                    }
                    delimiter = self.param_values()?;
                }
                _ => return Err(self.unexpected(AFTER_NAME)),
            }
        }
    }

    fn name(
        &mut self,
        kind: TokenKind,
        expected: &'static str,
        follow: &'static str,
    ) -> Result<(), LexError> {
        let Piece::Text(text) = self.next_piece(expected)? else {
            return Err(self.unexpected(expected));
        };

        let start = self.lex.span().start;
        if let Some((i, c)) = text.char_indices().find(|(_, c)| !is_name_char(*c)) {
            return Err(LexError::Unexpected {
                offset: self.line.raw_offset(start + i),
                expected: if i == 0 { expected } else { follow },
                found: describe(c),
            });
        }

        self.emit(kind, text, start);
        Ok(())
    }

    /// Scan comma-separated values, returning the `;` or `:` that ended them.
    fn param_values(&mut self) -> Result<Piece<'a>, LexError> {
        const FOLLOW: &str = "',', ';' or ':'";

        loop {
            let start = self.lex.span().end;
            let mut end = start;
            let mut quoted = false;
            let delimiter = loop {
                match self.next_piece(FOLLOW)? {
                    Piece::Text(_) | Piece::Eq if !quoted => end = self.lex.span().end,
                    Piece::Quoted(_) if end == start => {
                        quoted = true;
                        end = self.lex.span().end;
                    }
                    delimiter @ (Piece::Comma | Piece::Semi | Piece::Colon) => break delimiter,
                    _ => return Err(self.unexpected(FOLLOW)),
                }
            };

            let value = self.line.text.get(start..end).unwrap_or_default();
            self.emit(TokenKind::ParamValue, value, start);
            if delimiter != Piece::Comma {
                return Ok(delimiter);
            }
        }
    }

    fn value(&mut self) -> Result<(), LexError> {
        let start = self.lex.span().end;
        let value = self.lex.remainder();
        if let Some((i, c)) = value
            .char_indices()
            .find(|(_, c)| *c != '\t' && c.is_control())
        {
            return Err(LexError::Unexpected {
                offset: self.line.raw_offset(start + i),
                expected: "value character",
                found: describe(c),
            });
        }

        // an empty value is represented by the absence of a value token
        if !value.is_empty() {
            self.emit(TokenKind::Value, value, start);
        }
        Ok(())
    }

    fn next_piece(&mut self, expected: &'static str) -> Result<Piece<'a>, LexError> {
        match self.lex.next() {
            Some(Ok(piece)) => Ok(piece),
            Some(Err(())) => Err(self.unexpected(expected)),
            None => Err(LexError::UnexpectedEnd {
                offset: self.line.raw_offset(self.line.text.len()),
            }),
        }
    }

    /// Error pointing at the piece most recently read.
    fn unexpected(&self, expected: &'static str) -> LexError {
        let start = self.lex.span().start;
        let found = self
            .line
            .text
            .get(start..)
            .and_then(|rest| rest.chars().next())
            .map_or_else(|| "end of line".to_owned(), describe);
        LexError::Unexpected {
            offset: self.line.raw_offset(start),
            expected,
            found,
        }
    }

    fn emit(&mut self, kind: TokenKind, text: &str, start: usize) {
        self.out
            .push_back(Token::new(kind, text, self.line.raw_offset(start)));
    }
}
