//! Token definitions for type strings.

use std::fmt;

/// Token categories of the type grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Identifier, possibly scoped (`std::string`).
    Identifier,
    /// `const`
    Const,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `,`
    Comma,
    /// `*`
    Star,
    /// `&`
    Amp,
    /// End of input.
    Eof,
}

impl TokenKind {
    pub fn description(&self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Const => "'const'",
            TokenKind::Less => "'<'",
            TokenKind::Greater => "'>'",
            TokenKind::Comma => "','",
            TokenKind::Star => "'*'",
            TokenKind::Amp => "'&'",
            TokenKind::Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A lexed token borrowing its text from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub lexeme: &'src str,
    /// Column where the token starts (1-indexed).
    pub column: u32,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, lexeme: &'src str, column: u32) -> Self {
        Self {
            kind,
            lexeme,
            column,
        }
    }

    /// Text used when reporting this token in an error.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Identifier => format!("'{}'", self.lexeme),
            kind => kind.description().to_string(),
        }
    }
}

/// Map reserved words to their token kind.
pub fn lookup_keyword(ident: &str) -> Option<TokenKind> {
    match ident {
        "const" => Some(TokenKind::Const),
        _ => None,
    }
}
