use tracing::{debug, trace};

use crate::ast::{Token, TokenKind};

/// Scanner for the parenthesized S-expression encoding of a Ruby syntax tree.
///
/// The lexer never fails: characters no rule accepts become
/// [`TokenKind::Invalid`] tokens and are left for later stages to reject.
pub struct Lexer {
    input: Vec<char>,
    /// Start of the lexeme being scanned
    start: usize,
    position: usize,
    line: usize,
    tokens: Vec<Token>,
}

fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

fn is_alpha(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn ends_keyword(ch: char) -> bool {
    matches!(ch, ',' | ')' | '(') || ch.is_whitespace()
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            start: 0,
            position: 0,
            line: 1,
            tokens: Vec::new(),
        }
    }

    /// Scans the whole input. The returned sequence always ends with exactly
    /// one `Eof` token.
    pub fn scan_tokens(mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.position;
            self.scan_token();
        }

        self.tokens.push(Token::eof(self.line));
        debug!(count = self.tokens.len(), lines = self.line, "scanned tokens");
        self.tokens
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.current_char();
        if ch.is_some() {
            self.position += 1;
        }
        ch
    }

    /// Consumes the next character only if it is `expected`.
    fn match_char(&mut self, expected: char) -> bool {
        if self.current_char() == Some(expected) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn add_token(&mut self, kind: TokenKind) {
        let lexeme: String = self.input[self.start..self.position].iter().collect();
        trace!(%kind, %lexeme, line = self.line, "token");
        self.tokens.push(Token::new(kind, lexeme, self.line));
    }

    fn add_conditional_token(&mut self, doubled: TokenKind, single: TokenKind) {
        if self.match_char('=') {
            self.add_token(doubled);
        } else {
            self.add_token(single);
        }
    }

    fn scan_token(&mut self) {
        let Some(ch) = self.advance() else {
            return;
        };

        match ch {
            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            ':' => self.scan_keyword(),
            ',' => {}
            '+' => self.add_token(TokenKind::Plus),
            '-' => self.add_token(TokenKind::Minus),
            '*' => self.add_token(TokenKind::Star),
            '/' => self.add_token(TokenKind::Slash),
            '!' => self.add_conditional_token(TokenKind::BangEqual, TokenKind::Bang),
            '=' => self.add_conditional_token(TokenKind::EqualEqual, TokenKind::Equal),
            '>' => self.add_conditional_token(TokenKind::GreaterEqual, TokenKind::Greater),
            '<' => self.add_conditional_token(TokenKind::LessEqual, TokenKind::Less),
            ' ' | '\t' | '\r' => {}
            '\n' => self.line += 1,
            '"' => self.scan_string(),
            ch if is_alpha(ch) => self.scan_name(),
            ch if is_digit(ch) => self.scan_number(),
            _ => self.add_token(TokenKind::Invalid),
        }
    }

    fn scan_keyword(&mut self) {
        while let Some(ch) = self.current_char() {
            if ends_keyword(ch) {
                break;
            }
            self.advance();
        }
        self.add_token(TokenKind::Keyword);
    }

    /// Scans up to the closing quote. An unterminated literal is dropped
    /// without a token.
    fn scan_string(&mut self) {
        while let Some(ch) = self.current_char() {
            match ch {
                '"' => {
                    self.advance();
                    self.add_token(TokenKind::String);
                    return;
                }
                '\\' => {
                    self.advance();
                    if self.advance() == Some('\n') {
                        self.line += 1;
                    }
                }
                '\n' => {
                    self.line += 1;
                    self.advance();
                }
                _ => {
                    self.advance();
                }
            }
        }

        debug!(line = self.line, "unterminated string literal dropped");
    }

    fn scan_name(&mut self) {
        while self.current_char().is_some_and(is_alpha) {
            self.advance();
        }
        self.add_token(TokenKind::Name);
    }

    fn scan_digits(&mut self) {
        while self.current_char().is_some_and(is_digit) {
            self.advance();
        }
    }

    fn scan_number(&mut self) {
        self.scan_digits();

        if self.match_char('.') {
            if self.current_char().is_some_and(is_digit) {
                self.scan_digits();
            } else {
                // "12." has no fractional digits
                self.add_token(TokenKind::Invalid);
                return;
            }
        }

        self.add_token(TokenKind::Number);
    }
}

/// Tokenizes `input` in one call.
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).scan_tokens()
}

#[test]
fn test_keyword_stops_at_delimiters() {
    let tokens = tokenize("(:send, nil, :puts)");
    let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
    assert_eq!(lexemes, vec!["(", ":send", "nil", ":puts", ")", ""]);
}

#[test]
fn test_doubled_operators() {
    let kinds: Vec<TokenKind> = tokenize("!= ! == = >= > <= <")
        .into_iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::BangEqual,
            TokenKind::Bang,
            TokenKind::EqualEqual,
            TokenKind::Equal,
            TokenKind::GreaterEqual,
            TokenKind::Greater,
            TokenKind::LessEqual,
            TokenKind::Less,
            TokenKind::Eof,
        ]
    );
}
