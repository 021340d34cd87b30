//! Lexer for native type strings.
//!
//! The [`Lexer`] turns a type string into [`Token`]s, dispatching on the
//! first character of each token.

use std::collections::VecDeque;

use typebind_core::ParseError;

use super::cursor::{Cursor, is_ident_continue, is_ident_start};
use super::token::{Token, TokenKind, lookup_keyword};

/// Lexer over a single type string.
///
/// Provides one token of lookahead via [`peek`](Self::peek).
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    lookahead: VecDeque<Token<'src>>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
            lookahead: VecDeque::with_capacity(1),
        }
    }

    /// Consume and return the next token.
    pub fn next_token(&mut self) -> Result<Token<'src>, ParseError> {
        if let Some(token) = self.lookahead.pop_front() {
            return Ok(token);
        }
        self.scan_token()
    }

    /// Look at the next token without consuming it.
    pub fn peek(&mut self) -> Result<Token<'src>, ParseError> {
        if let Some(token) = self.lookahead.front() {
            return Ok(*token);
        }
        let token = self.scan_token()?;
        self.lookahead.push_back(token);
        Ok(token)
    }

    /// Lex the whole input.
    pub fn tokenize(mut self) -> Result<Vec<Token<'src>>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn scan_token(&mut self) -> Result<Token<'src>, ParseError> {
        self.cursor.skip_whitespace();

        let column = self.cursor.column();
        let Some(ch) = self.cursor.peek() else {
            return Ok(Token::new(TokenKind::Eof, "", column));
        };

        if is_ident_start(ch) {
            let ident = self.cursor.eat_while(is_ident_continue);
            let kind = lookup_keyword(ident).unwrap_or(TokenKind::Identifier);
            return Ok(Token::new(kind, ident, column));
        }

        let kind = match ch {
            '<' => TokenKind::Less,
            '>' => TokenKind::Greater,
            ',' => TokenKind::Comma,
            '*' => TokenKind::Star,
            '&' => TokenKind::Amp,
            other => return Err(ParseError::unexpected_char(column, other)),
        };
        self.cursor.advance();
        Ok(Token::new(kind, kind_lexeme(kind), column))
    }
}

fn kind_lexeme(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Less => "<",
        TokenKind::Greater => ">",
        TokenKind::Comma => ",",
        TokenKind::Star => "*",
        TokenKind::Amp => "&",
        _ => "",
    }
}
