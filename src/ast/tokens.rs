use std::fmt;

/// Kind of a lexical token in the S-expression grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Structural
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// End of input, always the last token
    Eof,
    /// A character or run of characters no rule accepts
    ///
    /// # Examples
    /// ```text
    /// @
    /// 12.
    /// ```
    Invalid,

    // Literals
    /// Double-quoted string, quotes included in the lexeme
    ///
    /// # Examples
    /// ```text
    /// "hi"
    /// "say \"hi\""
    /// ```
    String,

    /// Bare word made of letters and underscores
    ///
    /// # Examples
    /// ```text
    /// nil
    /// some_name
    /// ```
    Name,

    /// Colon-prefixed symbol, the colon included in the lexeme
    ///
    /// # Examples
    /// ```text
    /// :send
    /// :lvasgn
    /// :x
    /// ```
    Keyword,

    /// Digits with an optional fractional part
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 3.14
    /// ```
    Number,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Bang,
    Equal,
    Greater,
    Less,
    BangEqual,
    EqualEqual,
    GreaterEqual,
    LessEqual,
}

impl TokenKind {
    /// Upper-case name used in dumps and diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::LeftParen => "LEFT_PAREN",
            TokenKind::RightParen => "RIGHT_PAREN",
            TokenKind::Eof => "EOF",
            TokenKind::Invalid => "INVALID",
            TokenKind::String => "STRING",
            TokenKind::Name => "NAME",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Number => "NUMBER",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "STAR",
            TokenKind::Slash => "SLASH",
            TokenKind::Bang => "BANG",
            TokenKind::Equal => "EQUAL",
            TokenKind::Greater => "GREATER",
            TokenKind::Less => "LESS",
            TokenKind::BangEqual => "BANG_EQUAL",
            TokenKind::EqualEqual => "EQUAL_EQUAL",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::LessEqual => "LESS_EQUAL",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scanned token: its kind, the exact source text, and the line it ends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            line,
        }
    }

    pub fn eof(line: usize) -> Self {
        Token::new(TokenKind::Eof, "", line)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}
