//! Tokenises tag expressions into keywords, parentheses, and tag words.
//!
//! Words are delimited by whitespace and parentheses. The lowercase words
//! `and`, `or` and `not` are operators; every other word is a tag. Inside a
//! tag, `\(`, `\)`, `\\` and a backslash before whitespace stand for the
//! literal character, so tags such as `@issue\(42\)` survive tokenisation.
//! A single leading `@` is informational and is dropped from the tag text.

use crate::errors::{TagExpressionError, TagExpressionErrorKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) start: usize,
}

impl Token {
    pub(crate) fn describe(&self) -> String {
        match &self.kind {
            TokenKind::Tag(tag) => format!("tag '{tag}'"),
            TokenKind::And => "'and'".to_string(),
            TokenKind::Or => "'or'".to_string(),
            TokenKind::Not => "'not'".to_string(),
            TokenKind::LParen => "'('".to_string(),
            TokenKind::RParen => "')'".to_string(),
            TokenKind::End => "end of input".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Tag(String),
    And,
    Or,
    Not,
    LParen,
    RParen,
    End,
}

pub(crate) struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    pub(crate) fn next_token(&mut self) -> Result<Token, TagExpressionError> {
        self.skip_whitespace();
        let start = self.pos;
        let Some(ch) = self.peek_char() else {
            return Ok(Token {
                kind: TokenKind::End,
                start: self.input.len(),
            });
        };
        let kind = match ch {
            '(' => {
                self.bump_char();
                TokenKind::LParen
            }
            ')' => {
                self.bump_char();
                TokenKind::RParen
            }
            _ => self.lex_word(start)?,
        };
        Ok(Token { kind, start })
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                self.pos += ch.len_utf8();
            } else {
                break;
            }
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.pos..).and_then(|s| s.chars().next())
    }

    fn bump_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn lex_word(&mut self, start: usize) -> Result<TokenKind, TagExpressionError> {
        let mut text = String::new();
        let mut escaped = false;
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() || matches!(ch, '(' | ')') {
                break;
            }
            let offset = self.pos;
            self.bump_char();
            if ch == '\\' {
                text.push(self.lex_escape(offset)?);
                escaped = true;
            } else {
                text.push(ch);
            }
        }

        if !escaped {
            match text.as_str() {
                "and" => return Ok(TokenKind::And),
                "or" => return Ok(TokenKind::Or),
                "not" => return Ok(TokenKind::Not),
                _ => {}
            }
        }

        let tag = text.strip_prefix('@').map(str::to_string).unwrap_or(text);
        if tag.is_empty() {
            return Err(self.error(start, TagExpressionErrorKind::EmptyTag));
        }
        Ok(TokenKind::Tag(tag))
    }

    fn lex_escape(&mut self, offset: usize) -> Result<char, TagExpressionError> {
        match self.bump_char() {
            Some(ch) if is_escapable(ch) => Ok(ch),
            Some(ch) => Err(self.error(offset, TagExpressionErrorKind::IllegalEscape(ch))),
            None => Err(self.error(offset, TagExpressionErrorKind::UnterminatedEscape)),
        }
    }

    fn error(&self, offset: usize, kind: TagExpressionErrorKind) -> TagExpressionError {
        TagExpressionError::new(self.input, offset, kind)
    }
}

pub(crate) fn is_escapable(ch: char) -> bool {
    matches!(ch, '(' | ')' | '\\') || ch.is_whitespace()
}
