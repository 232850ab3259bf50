// SPDX-FileCopyrightText: 2026 The Calyx Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Token source with a two-token pushback buffer.

use crate::lexer::Token;

/// Wraps a token iterator so that the last two tokens read can be pushed
/// back and read again.
///
/// `slots[0]` holds the most recent token pulled from the source and
/// `slots[1]` the one before it; `pending` counts how many of them have
/// been pushed back.
#[derive(Debug)]
pub(crate) struct Lookahead<I> {
    tokens: I,
    slots: [Option<Token>; 2],
    pending: usize,
}

impl<I: Iterator<Item = Token>> Lookahead<I> {
    pub fn new(tokens: I) -> Self {
        Self {
            tokens,
            slots: [None, None],
            pending: 0,
        }
    }

    /// Read the next token, replaying pushed-back tokens first.
    pub fn next(&mut self) -> Option<Token> {
        if self.pending > 0 {
            self.pending -= 1;
            return self.slots.get(self.pending).cloned().flatten();
        }

        let token = self.tokens.next()?;
        let [latest, previous] = &mut self.slots;
        *previous = latest.replace(token.clone());
        Some(token)
    }

    /// Make the most recently read token available again.
    ///
    /// At most two tokens can be pending at once; further calls are ignored.
    pub fn pushback(&mut self) {
        let available = self.slots.iter().filter(|slot| slot.is_some()).count();
        if self.pending < available {
            self.pending += 1;
        }
    }

    /// Read the next token without consuming it.
    pub fn peek(&mut self) -> Option<Token> {
        let token = self.next()?;
        self.pushback();
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenKind;

    fn stream(names: &[&str]) -> Lookahead<std::vec::IntoIter<Token>> {
        let tokens: Vec<_> = names
            .iter()
            .enumerate()
            .map(|(i, name)| Token::new(TokenKind::Name, *name, i))
            .collect();
        Lookahead::new(tokens.into_iter())
    }

    fn text(token: Option<Token>) -> Option<String> {
        token.map(|t| t.text)
    }

    #[test]
    fn replays_single_pushback() {
        let mut tokens = stream(&["a", "b", "c"]);
        assert_eq!(text(tokens.next()).as_deref(), Some("a"));
        tokens.pushback();
        assert_eq!(text(tokens.next()).as_deref(), Some("a"));
        assert_eq!(text(tokens.next()).as_deref(), Some("b"));
        assert_eq!(text(tokens.peek()).as_deref(), Some("c"));
        assert_eq!(text(tokens.next()).as_deref(), Some("c"));
        assert_eq!(tokens.next(), None);
    }

    #[test]
    fn replays_two_tokens_in_order() {
        let mut tokens = stream(&["a", "b", "c"]);
        tokens.next();
        tokens.next();
        tokens.pushback();
        tokens.pushback();
        tokens.pushback(); // ignored
        assert_eq!(text(tokens.next()).as_deref(), Some("a"));
        assert_eq!(text(tokens.next()).as_deref(), Some("b"));
        assert_eq!(text(tokens.next()).as_deref(), Some("c"));
    }

    #[test]
    fn pushback_before_read_is_ignored() {
        let mut tokens = stream(&["a"]);
        tokens.pushback();
        assert_eq!(text(tokens.next()).as_deref(), Some("a"));
    }
}
