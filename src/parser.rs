use tracing::debug;

use crate::ast::{Node, Token, TokenKind};

/// Deepest group nesting the parser accepts.
pub const MAX_DEPTH: usize = 256;

/// Errors raised while building the node tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A `)` where an expression should start
    #[error("unexpected closing bracket ')' on line {line}")]
    UnexpectedClosingBracket { line: usize },

    /// Nothing left to parse
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// Input ended before the group opened on `line` was closed
    #[error("unclosed '(' opened on line {line}")]
    UnclosedGroup { line: usize },

    /// `()` has no tag
    #[error("empty group '()' on line {line}")]
    EmptyGroup { line: usize },

    /// A group tag must be an atom
    #[error("invalid group tag '{lexeme}' on line {line}")]
    InvalidTag { lexeme: String, line: usize },

    /// Groups nest deeper than [`MAX_DEPTH`]
    #[error("groups nested deeper than {} levels on line {line}", MAX_DEPTH)]
    TooDeep { line: usize },
}

/// Recursive-descent parser over a scanned token sequence.
///
/// Grammar:
/// ```text
/// expr := '(' tag expr* ')' | atom
/// ```
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    depth: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(|t| t.is(TokenKind::Eof)) {
            let line = tokens.last().map_or(1, |t| t.line);
            tokens.push(Token::eof(line));
        }
        Parser {
            tokens,
            current: 0,
            depth: 0,
        }
    }

    /// Parses one expression. Tokens after a complete expression are left
    /// unconsumed.
    pub fn parse(&mut self) -> Result<Node, ParseError> {
        let node = self.parse_expr()?;
        debug!(
            nodes = node.node_count(),
            depth = node.depth(),
            "parsed tree"
        );
        Ok(node)
    }

    /// True once every token but `Eof` has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.peek().is(TokenKind::Eof)
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().is(kind)
    }

    fn parse_expr(&mut self) -> Result<Node, ParseError> {
        match self.peek().kind {
            TokenKind::Eof => Err(ParseError::UnexpectedEof),
            TokenKind::RightParen => Err(ParseError::UnexpectedClosingBracket {
                line: self.peek().line,
            }),
            TokenKind::LeftParen => {
                let open_line = self.advance().line;
                if self.depth == MAX_DEPTH {
                    return Err(ParseError::TooDeep { line: open_line });
                }
                self.depth += 1;
                let group = self.parse_group(open_line);
                self.depth -= 1;
                group
            }
            _ => {
                let token = self.advance();
                Ok(Node::leaf(token.lexeme.clone(), token.line))
            }
        }
    }

    fn parse_group(&mut self, open_line: usize) -> Result<Node, ParseError> {
        // The tag is consumed here and never becomes a child.
        let tag = match self.peek().kind {
            TokenKind::Eof => return Err(ParseError::UnclosedGroup { line: open_line }),
            TokenKind::RightParen => return Err(ParseError::EmptyGroup { line: open_line }),
            TokenKind::LeftParen => {
                let token = self.peek();
                return Err(ParseError::InvalidTag {
                    lexeme: token.lexeme.clone(),
                    line: token.line,
                });
            }
            _ => self.advance().clone(),
        };

        let mut children = Vec::new();
        while !self.check(TokenKind::RightParen) {
            if self.is_at_end() {
                return Err(ParseError::UnclosedGroup { line: open_line });
            }
            children.push(self.parse_expr()?);
        }

        // closing ')'
        self.advance();

        Ok(Node::group(tag.lexeme, children, tag.line))
    }
}

/// Parses a full token sequence into one tree.
pub fn parse(tokens: Vec<Token>) -> Result<Node, ParseError> {
    Parser::new(tokens).parse()
}
