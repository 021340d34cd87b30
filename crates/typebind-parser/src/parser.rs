//! Recursive descent parser for type strings.

use typebind_core::{Indirection, ParseError, ParseErrorKind, TypeDescriptor};

use super::lexer::Lexer;
use super::token::{Token, TokenKind};

/// Parser for a single type string.
pub struct TypeParser<'src> {
    lexer: Lexer<'src>,
}

impl<'src> TypeParser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            lexer: Lexer::new(source),
        }
    }

    /// Parse a complete type, requiring the whole input to be consumed.
    ///
    /// Grammar: `'const'? IDENT ('<' IDENT '>')? ('*' | '&')*`
    ///
    /// Examples:
    /// - `int`
    /// - `const char *`
    /// - `MySmartPointer<Foo>`
    /// - `std::string const` is rejected (trailing qualifier)
    pub fn parse(mut self) -> Result<TypeDescriptor, ParseError> {
        let is_const = self.eat(TokenKind::Const)?.is_some();
        let base = self.expect_identifier()?;

        let mut descriptor = TypeDescriptor::new(base.lexeme).with_const(is_const);

        if let Some(open) = self.eat(TokenKind::Less)? {
            let arg = self.parse_template_arg(open)?;
            descriptor = descriptor.with_template_arg(arg);
        }

        descriptor.indirections = self.parse_suffixes()?;

        self.expect_eof()?;
        Ok(descriptor)
    }

    /// Parse the inside of `<...>` after the opening bracket.
    fn parse_template_arg(&mut self, open: Token<'src>) -> Result<&'src str, ParseError> {
        let token = self.lexer.next_token()?;
        let arg = match token.kind {
            TokenKind::Identifier => token.lexeme,
            TokenKind::Eof => return Err(unbalanced(open.column)),
            _ => {
                return Err(ParseError::expected_identifier(
                    token.column,
                    &token.describe(),
                ));
            }
        };

        let close = self.lexer.next_token()?;
        match close.kind {
            TokenKind::Greater => Ok(arg),
            TokenKind::Less => Err(ParseError::new(
                ParseErrorKind::NestedTemplate,
                close.column,
                format!("template argument '{arg}' cannot itself be a template"),
            )),
            TokenKind::Comma => Err(ParseError::new(
                ParseErrorKind::MultipleTemplateArgs,
                close.column,
                "only a single template argument is supported",
            )),
            TokenKind::Eof => Err(unbalanced(open.column)),
            _ => Err(ParseError::unexpected_token(
                close.column,
                &close.describe(),
            )),
        }
    }

    /// Parse trailing `*` and `&` markers in any order (`T *&`, `T &&`, `T &*`).
    fn parse_suffixes(&mut self) -> Result<Vec<Indirection>, ParseError> {
        let mut indirections = Vec::new();
        loop {
            let indirection = match self.lexer.peek()?.kind {
                TokenKind::Star => Indirection::Pointer,
                TokenKind::Amp => Indirection::Reference,
                _ => return Ok(indirections),
            };
            self.lexer.next_token()?;
            indirections.push(indirection);
        }
    }

    fn expect_identifier(&mut self) -> Result<Token<'src>, ParseError> {
        let token = self.lexer.next_token()?;
        match token.kind {
            TokenKind::Identifier => Ok(token),
            TokenKind::Eof => Err(ParseError::unexpected_eof(token.column)),
            _ => Err(ParseError::expected_identifier(
                token.column,
                &token.describe(),
            )),
        }
    }

    fn expect_eof(&mut self) -> Result<(), ParseError> {
        let token = self.lexer.next_token()?;
        match token.kind {
            TokenKind::Eof => Ok(()),
            TokenKind::Const | TokenKind::Identifier => Err(ParseError::invalid_qualifier(
                token.column,
                format!("unrecognized qualifier {}", token.describe()),
            )),
            TokenKind::Greater => Err(unbalanced(token.column)),
            TokenKind::Less => Err(ParseError::new(
                ParseErrorKind::NestedTemplate,
                token.column,
                "template arguments must directly follow the base name",
            )),
            _ => Err(ParseError::unexpected_token(
                token.column,
                &token.describe(),
            )),
        }
    }

    fn eat(&mut self, kind: TokenKind) -> Result<Option<Token<'src>>, ParseError> {
        if self.lexer.peek()?.kind == kind {
            self.lexer.next_token().map(Some)
        } else {
            Ok(None)
        }
    }
}

fn unbalanced(column: u32) -> ParseError {
    ParseError::new(
        ParseErrorKind::UnbalancedTemplate,
        column,
        "'<' and '>' do not match",
    )
}
