#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Let,
    Func,
    Ident(String),
    Number(f64),
    Kwd(char),
    Eof,
}

/// A classified piece of source text and the line it started on.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Token {
        Token {
            kind,
            lexeme: lexeme.into(),
            line,
        }
    }

    pub fn eof(line: usize) -> Token {
        Token::new(TokenKind::Eof, "", line)
    }

    pub(crate) fn is_kwd(&self, c: char) -> bool {
        self.kind == TokenKind::Kwd(c)
    }

    /// How the token reads in a diagnostic.
    pub(crate) fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_owned(),
            _ => format!("'{}'", self.lexeme),
        }
    }
}
