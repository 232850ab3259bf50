// SPDX-FileCopyrightText: 2026 The Calyx Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Recursive descent over the token stream.
//!
//! ```txt
//! calendar := CalendarBegin (property | event | alarm)* CalendarEnd
//! event    := EventBegin (property | alarm)* EventEnd
//! alarm    := AlarmBegin property* AlarmEnd
//! property := Name (ParamName ParamValue+)* (Value | ε)
//! ```

mod lookahead;

use crate::config::ParseOptions;
use crate::error::{Context, ErrorCause, ParseError};
use crate::lexer::{Token, TokenKind};
use crate::semantic::{Alarm, Calendar, Event, Parameters, Property};
use crate::syntax::lookahead::Lookahead;
use crate::value::TimeResolver;

/// Builds a [`Calendar`] from a token stream.
///
/// Properties, events and alarms are attached to the calendar as soon as
/// they are read, so a failed parse still exposes them. A component cut
/// short by an error keeps its raw properties but no derived fields.
pub(crate) struct Parser<'a, I> {
    tokens: Lookahead<I>,
    options: &'a ParseOptions,
    resolver: TimeResolver<'a>,
    calendar: Calendar,
}

impl<'a, I: Iterator<Item = Token>> Parser<'a, I> {
    pub fn new(tokens: I, options: &'a ParseOptions) -> Self {
        Self {
            tokens: Lookahead::new(tokens),
            options,
            resolver: TimeResolver::new(options.default_zone.as_ref(), options.today()),
            calendar: Calendar::default(),
        }
    }

    pub fn parse(mut self) -> Result<Calendar, ParseError> {
        match self.parse_calendar() {
            Ok(()) => {
                self.calendar.derive_fields();
                Ok(self.calendar)
            }
            Err(cause) => {
                self.calendar.derive_fields();
                Err(ParseError::new(cause, self.calendar))
            }
        }
    }

    fn parse_calendar(&mut self) -> Result<(), ErrorCause> {
        self.expect(Context::Calendar, TokenKind::CalendarBegin)?;

        loop {
            let token = self.next(Context::Calendar)?;
            match token.kind {
                TokenKind::CalendarEnd => return Ok(()),
                TokenKind::EventBegin => {
                    self.tokens.pushback();
                    let mut event = Event::default();
                    let result = self.parse_event(&mut event);
                    self.calendar.events.push(event);
                    result?;
                }
                TokenKind::AlarmBegin => {
                    self.tokens.pushback();
                    let mut alarm = Alarm::default();
                    let result = self.parse_alarm(&mut alarm);
                    self.calendar.alarms.push(alarm);
                    result?;
                }
                TokenKind::Name => {
                    self.tokens.pushback();
                    let prop = self.parse_property()?;
                    self.calendar.properties.push(prop);
                }
                _ => return Err(unexpected(Context::Calendar, TokenKind::Name, &token)),
            }
        }
    }

    /// Read one event into `event`, which keeps whatever was read when an
    /// error stops it.
    fn parse_event(&mut self, event: &mut Event) -> Result<(), ErrorCause> {
        self.expect(Context::Event, TokenKind::EventBegin)?;

        loop {
            let token = self.next(Context::Event)?;
            match token.kind {
                TokenKind::EventEnd => break,
                TokenKind::AlarmBegin => {
                    self.tokens.pushback();
                    let mut alarm = Alarm::default();
                    let result = self.parse_alarm(&mut alarm);
                    event.alarms.push(alarm);
                    result?;
                }
                TokenKind::Name => {
                    self.tokens.pushback();
                    event.properties.push(self.parse_property()?);
                }
                _ => return Err(unexpected(Context::Event, TokenKind::Name, &token)),
            }
        }

        event.derive_fields(&self.resolver, self.options.inclusive_dtend)?;
        tracing::trace!(uid = event.uid.as_deref(), "parsed event");
        Ok(())
    }

    /// Read one alarm into `alarm`, which keeps whatever was read when an
    /// error stops it.
    fn parse_alarm(&mut self, alarm: &mut Alarm) -> Result<(), ErrorCause> {
        self.expect(Context::Alarm, TokenKind::AlarmBegin)?;

        loop {
            let token = self.next(Context::Alarm)?;
            match token.kind {
                TokenKind::AlarmEnd => break,
                TokenKind::Name => {
                    self.tokens.pushback();
                    alarm.properties.push(self.parse_property()?);
                }
                _ => return Err(unexpected(Context::Alarm, TokenKind::Name, &token)),
            }
        }

        alarm.derive_fields(&self.resolver)
    }

    fn parse_property(&mut self) -> Result<Property, ErrorCause> {
        let name = self.expect(Context::Property, TokenKind::Name)?.text;

        let mut params = Parameters::new();
        loop {
            // the value token is omitted for empty values, so anything else
            // ends the property
            if !self.peek_is(&[TokenKind::ParamName, TokenKind::Value, TokenKind::Error]) {
                return Ok(Property {
                    name,
                    params,
                    value: String::new(),
                });
            }

            let token = self.next(Context::Property)?;
            if token.kind == TokenKind::Value {
                return Ok(Property {
                    name,
                    params,
                    value: token.text,
                });
            }
            let values = self.parse_param_values()?;
            params.append(token.text, values);
        }
    }

    fn parse_param_values(&mut self) -> Result<Vec<String>, ErrorCause> {
        let mut values = vec![self.expect(Context::Parameter, TokenKind::ParamValue)?.text];
        while self.peek_is(&[TokenKind::ParamValue]) {
            values.push(self.next(Context::Parameter)?.text);
        }
        Ok(values)
    }

    /// Whether the next token is one of `kinds`, without consuming it.
    fn peek_is(&mut self, kinds: &[TokenKind]) -> bool {
        self.tokens
            .peek()
            .is_some_and(|token| kinds.contains(&token.kind))
    }

    /// Pull the next token, honoring cancellation and turning tokenizer
    /// errors and end of input into error causes.
    fn next(&mut self, context: Context) -> Result<Token, ErrorCause> {
        if self.options.is_cancelled() {
            return Err(ErrorCause::Cancelled);
        }

        match self.tokens.next() {
            Some(token) if token.kind == TokenKind::Error => {
                // the tokenizer may have stopped for the same cancellation
                if self.options.is_cancelled() {
                    return Err(ErrorCause::Cancelled);
                }
                Err(ErrorCause::Syntax {
                    offset: token.offset,
                    message: token.text,
                })
            }
            Some(token) if token.kind == TokenKind::EndOfStream => {
                Err(ErrorCause::UnexpectedEnd { context })
            }
            Some(token) => Ok(token),
            None => Err(ErrorCause::UnexpectedEnd { context }),
        }
    }

    fn expect(&mut self, context: Context, kind: TokenKind) -> Result<Token, ErrorCause> {
        let token = self.next(context)?;
        if token.kind == kind {
            Ok(token)
        } else {
            Err(unexpected(context, kind, &token))
        }
    }
}

fn unexpected(context: Context, expected: TokenKind, found: &Token) -> ErrorCause {
    ErrorCause::Unexpected {
        context,
        expected,
        found: found.kind,
        offset: found.offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse(src: &str) -> Result<Calendar, ParseError> {
        let options = ParseOptions::default().default_zone(Some(jiff::tz::TimeZone::UTC));
        Parser::new(tokenize(src), &options).parse()
    }

    #[test]
    fn parses_nested_components() {
        let calendar = parse(
            "BEGIN:VCALENDAR\r\n\
             VERSION:2.0\r\n\
             BEGIN:VEVENT\r\n\
             UID:1\r\n\
             BEGIN:VALARM\r\n\
             ACTION:DISPLAY\r\n\
             END:VALARM\r\n\
             END:VEVENT\r\n\
             BEGIN:VALARM\r\n\
             ACTION:AUDIO\r\n\
             END:VALARM\r\n\
             END:VCALENDAR\r\n",
        )
        .unwrap();

        assert_eq!(calendar.version.as_deref(), Some("2.0"));
        assert_eq!(calendar.events.len(), 1);
        assert_eq!(calendar.events[0].alarms.len(), 1);
        assert_eq!(calendar.alarms.len(), 1);
        assert_eq!(calendar.alarms[0].action.as_deref(), Some("AUDIO"));
    }

    #[test]
    fn empty_value_before_next_property() {
        let calendar = parse(
            "BEGIN:VCALENDAR\r\nX-EMPTY;A=1:\r\nX-NEXT:v\r\nEND:VCALENDAR\r\n",
        )
        .unwrap();

        assert_eq!(
            calendar.properties,
            [
                Property::new("X-EMPTY", "").with_param("A", ["1"]),
                Property::new("X-NEXT", "v"),
            ]
        );
    }

    #[test]
    fn reports_unexpected_token() {
        let err = parse("BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nEND:VALARM\r\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "parse: parsing event: expected property name, got alarm-end"
        );
        assert_eq!(err.offset(), Some(31));
    }

    #[test]
    fn reports_premature_end() {
        let err = parse("BEGIN:VCALENDAR\r\nUID:1\r\n").unwrap_err();
        assert!(matches!(
            err.cause(),
            ErrorCause::UnexpectedEnd {
                context: Context::Calendar
            }
        ));
        assert_eq!(err.partial().properties, [Property::new("UID", "1")]);
    }
}
