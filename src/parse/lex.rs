use log::trace;

use super::error::LexError;
use crate::token::{keyword, Literal, Token, TokenKind};

/// Output of a scan. Tokens are always terminated by `Eof`, even when
/// `errors` is not empty.
#[derive(Debug, Default)]
pub struct Lexed {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl Lexed {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

fn is_identifier_char(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

pub fn lex(input: &str) -> Lexed {
    let mut scanner = Scanner::new(input);
    while !scanner.is_at_end() {
        scanner.start = scanner.current;
        scanner.scan_token();
    }
    scanner.result.tokens.push(Token::eof(scanner.line));
    scanner.result
}

struct Scanner {
    chars: Vec<char>,
    start: usize,
    current: usize,
    line: usize,
    result: Lexed,
}

impl Scanner {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            start: 0,
            current: 0,
            line: 1,
            result: Lexed::default(),
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }

    fn scan_token(&mut self) {
        let c = self.advance();
        match c {
            '(' => self.push(TokenKind::LeftParen),
            ')' => self.push(TokenKind::RightParen),
            '{' => self.push(TokenKind::LeftBrace),
            '}' => self.push(TokenKind::RightBrace),
            ',' => self.push(TokenKind::Comma),
            '.' => self.push(TokenKind::Dot),
            '-' => self.push(TokenKind::Minus),
            '+' => self.push(TokenKind::Plus),
            ';' => self.push(TokenKind::Semicolon),
            '*' => self.push(TokenKind::Star),
            '!' => self.push_either('=', TokenKind::BangEqual, TokenKind::Bang),
            '=' => self.push_either('=', TokenKind::EqualEqual, TokenKind::Equal),
            '>' => self.push_either('=', TokenKind::GreaterEqual, TokenKind::Greater),
            '<' => self.push_either('=', TokenKind::LessEqual, TokenKind::Less),
            '/' => {
                if self.match_next('/') {
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.current += 1;
                    }
                } else {
                    self.push(TokenKind::Slash);
                }
            }
            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,
            '"' => self.lex_string(),
            c if c.is_ascii_digit() => self.lex_number(),
            c if is_identifier_start(c) => self.lex_keyword_or_identifier(),
            ch => self.result.errors.push(LexError::UnexpectedCharacter {
                ch,
                line: self.line,
            }),
        }
    }

    fn lex_string(&mut self) {
        loop {
            match self.peek() {
                None => {
                    self.result
                        .errors
                        .push(LexError::UnterminatedString { line: self.line });
                    return;
                }
                Some('"') => break,
                Some(c) => {
                    if c == '\n' {
                        self.line += 1;
                    }
                    self.current += 1;
                }
            }
        }

        // closing quote
        self.current += 1;
        let content = self.text(self.start + 1, self.current - 1);
        self.push_literal(TokenKind::String, Some(Literal::Str(content)));
    }

    fn lex_number(&mut self) {
        self.skip_digits();

        // a fractional part needs at least one digit after the dot
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.current += 1;
            self.skip_digits();
        }

        let text = self.text(self.start, self.current);
        // only ascii digits and a single dot reach here
        let value = text.parse::<f64>().unwrap_or_default();
        self.push_literal(TokenKind::Number, Some(Literal::Number(value)));
    }

    fn lex_keyword_or_identifier(&mut self) {
        while self.peek().is_some_and(is_identifier_char) {
            self.current += 1;
        }

        let text = self.text(self.start, self.current);
        match keyword(&text) {
            Some(kind) => self.push(kind),
            None => self.push_literal(TokenKind::Identifier, Some(Literal::Str(text))),
        }
    }

    fn skip_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.current += 1;
        }
    }

    fn advance(&mut self) -> char {
        let c = self.chars[self.current];
        self.current += 1;
        c
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.current).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.current + 1).copied()
    }

    fn match_next(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    fn text(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    fn push_either(&mut self, next: char, matched: TokenKind, single: TokenKind) {
        let kind = if self.match_next(next) { matched } else { single };
        self.push(kind);
    }

    fn push(&mut self, kind: TokenKind) {
        self.push_literal(kind, None);
    }

    fn push_literal(&mut self, kind: TokenKind, literal: Option<Literal>) {
        let token = Token::new(kind, self.text(self.start, self.current), literal, self.line);
        trace!("{} - {:?}: {:?}", token.line, token.kind, token.lexeme);
        self.result.tokens.push(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        lex(input).tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_punctuation_and_operators() {
        use TokenKind::*;
        assert_eq!(
            kinds("(){},.-+;*/ ! != = == > >= < <="),
            vec![
                LeftParen, RightParen, LeftBrace, RightBrace, Comma, Dot, Minus, Plus, Semicolon,
                Star, Slash, Bang, BangEqual, Equal, EqualEqual, Greater, GreaterEqual, Less,
                LessEqual, Eof,
            ]
        );
    }

    #[test]
    fn test_two_char_operator_falls_back() {
        use TokenKind::*;
        assert_eq!(kinds("!a"), vec![Bang, Identifier, Eof]);
        assert_eq!(kinds("<-"), vec![Less, Minus, Eof]);
    }

    #[test]
    fn test_comment_is_skipped() {
        let lexed = lex("1 // ignored ( ) \"\n2");
        let kinds: Vec<_> = lexed.tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::Number, TokenKind::Number, TokenKind::Eof]
        );
        assert_eq!(lexed.tokens[1].line, 2);
        assert!(!lexed.has_errors());
    }

    #[test]
    fn test_numbers() {
        let lexed = lex("12 3.25 7.");
        let tokens = &lexed.tokens;
        assert_eq!(tokens[0].literal, Some(Literal::Number(12.0)));
        assert_eq!(tokens[1].literal, Some(Literal::Number(3.25)));
        assert_eq!(tokens[1].lexeme, "3.25");
        assert_eq!(tokens[2].literal, Some(Literal::Number(7.0)));
        assert_eq!(tokens[3].kind, TokenKind::Dot);
        assert_eq!(tokens[4].kind, TokenKind::Eof);
    }

    #[test]
    fn test_multiline_string() {
        let lexed = lex("\"a\nb\" x");
        assert_eq!(lexed.tokens[0].kind, TokenKind::String);
        assert_eq!(lexed.tokens[0].lexeme, "\"a\nb\"");
        assert_eq!(lexed.tokens[0].literal, Some(Literal::Str("a\nb".to_string())));
        assert_eq!(lexed.tokens[0].line, 2);
        assert_eq!(lexed.tokens[1].line, 2);
    }

    #[test]
    fn test_unterminated_string() {
        let lexed = lex("print 1;\n\"unterminated\nstill open");
        assert_eq!(lexed.errors, vec![LexError::UnterminatedString { line: 3 }]);
        let kinds: Vec<_> = lexed.tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Print,
                TokenKind::Number,
                TokenKind::Semicolon,
                TokenKind::Eof
            ]
        );
        assert_eq!(lexed.tokens[3].line, 3);
    }

    #[test]
    fn test_unexpected_character_continues() {
        let lexed = lex("1 @ 2\n# 3");
        assert_eq!(
            lexed.errors,
            vec![
                LexError::UnexpectedCharacter { ch: '@', line: 1 },
                LexError::UnexpectedCharacter { ch: '#', line: 2 },
            ]
        );
        let numbers = lexed
            .tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Number)
            .count();
        assert_eq!(numbers, 3);
    }

    #[test]
    fn test_keywords_and_identifiers() {
        let lexed = lex("var _foo1 = nil; function print");
        let tokens = &lexed.tokens;
        assert_eq!(tokens[0].kind, TokenKind::Var);
        assert_eq!(tokens[0].literal, None);
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].literal, Some(Literal::Str("_foo1".to_string())));
        assert_eq!(tokens[3].kind, TokenKind::Nil);
        assert_eq!(tokens[5].kind, TokenKind::Fun);
        assert_eq!(tokens[6].kind, TokenKind::Print);
    }

    #[test]
    fn test_each_scan_is_fresh() {
        let first = lex("1 2 3");
        let second = lex("4");
        assert_eq!(first.tokens.len(), 4);
        assert_eq!(second.tokens.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        let lexed = lex("");
        assert_eq!(lexed.tokens, vec![Token::eof(1)]);
    }
}
