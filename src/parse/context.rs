use std::borrow::Cow;

use crate::token::{Token, TokenKind};

use super::error::ParseError;

/// Deepest run of nested groups, unary operators or assignments a single
/// expression may have.
pub const MAX_NESTING: usize = 128;

pub struct Context<'a> {
    // always ends with an `Eof` token
    items: Cow<'a, [Token]>,
    curr_pos: usize,
    depth: usize,
    // soft errors that do not unwind the current declaration
    pub errors: Vec<ParseError>,
}

impl<'a> Context<'a> {
    pub fn new(items: &'a [Token]) -> Self {
        let items = match items.last() {
            Some(last) if last.is(TokenKind::Eof) => Cow::Borrowed(items),
            last => {
                let line = last.map(|t| t.line).unwrap_or(1);
                let mut owned = items.to_vec();
                owned.push(Token::eof(line));
                Cow::Owned(owned)
            }
        };
        Self {
            items,
            curr_pos: 0,
            depth: 0,
            errors: vec![],
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.get_curr().is(TokenKind::Eof)
    }

    pub fn get_curr(&self) -> &Token {
        &self.items[self.curr_pos]
    }

    pub fn position(&self) -> usize {
        self.curr_pos
    }

    pub fn previous(&self) -> Option<&Token> {
        self.curr_pos.checked_sub(1).map(|i| &self.items[i])
    }

    /// Returns the current token and moves past it. Never moves past `Eof`.
    pub fn advance(&mut self) -> Token {
        let token = self.get_curr().clone();
        if !self.is_at_end() {
            self.curr_pos += 1;
        }
        token
    }

    pub fn peek(&self, match_tokens: &[TokenKind]) -> bool {
        match_tokens.contains(&self.get_curr().kind)
    }

    /// Advances past the current token if it is one of `match_tokens`.
    pub fn match_token(&mut self, match_tokens: &[TokenKind]) -> Option<Token> {
        if self.peek(match_tokens) {
            Some(self.advance())
        } else {
            None
        }
    }

    pub fn consume_token(&mut self, kind: TokenKind, message: &str) -> Result<Token, ParseError> {
        if self.peek(&[kind]) {
            return Ok(self.advance());
        }
        Err(ParseError::unexpected(self.get_curr(), message))
    }

    pub fn nest(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::unexpected(self.get_curr(), "Too much nesting."));
        }
        self.depth += 1;
        Ok(())
    }

    pub fn unnest(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Skips tokens until a likely statement boundary: just past a `;`, or
    /// right before a keyword that opens a statement.
    ///
    /// `start` is where the failed declaration began. A statement keyword at
    /// the failure point is kept for the next declaration, unless the
    /// declaration failed on its very first token.
    pub fn synchronize(&mut self, start: usize) {
        self.depth = 0;
        if self.curr_pos > start && self.get_curr().kind.starts_statement() {
            return;
        }

        self.advance();
        while !self.is_at_end() {
            if self.previous().is_some_and(|t| t.is(TokenKind::Semicolon)) {
                return;
            }
            if self.get_curr().kind.starts_statement() {
                return;
            }
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::lex;

    #[test]
    fn synchronize_stops_at_keyword_after_consumed_tokens() {
        let tokens = lex("print 1\nprint 2;").tokens;
        let mut state = Context::new(&tokens);
        state.advance();
        state.advance();
        state.synchronize(0);
        assert!(state.get_curr().is(TokenKind::Print));
        assert_eq!(state.get_curr().line, 2);
    }

    #[test]
    fn synchronize_always_moves_when_nothing_was_consumed() {
        let tokens = lex("if 1;\nprint 2;").tokens;
        let mut state = Context::new(&tokens);
        state.synchronize(0);
        assert_eq!(state.position(), 3);
        assert!(state.get_curr().is(TokenKind::Print));
    }

    #[test]
    fn nesting_is_bounded() {
        let tokens = lex("(").tokens;
        let mut state = Context::new(&tokens);
        for _ in 0..MAX_NESTING {
            assert!(state.nest().is_ok());
        }
        let err = state.nest().unwrap_err();
        assert_eq!(err.to_string(), "Error at '(': Too much nesting.");

        state.unnest();
        assert!(state.nest().is_ok());
        state.synchronize(0);
        assert!(state.nest().is_ok());
    }
}
