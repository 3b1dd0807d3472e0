use crate::lexer::tokens::{make_identifier_kind, Token, TokenKind};

// Submodules
pub mod tokens;

/// Struct that represents the lexer. Tokens are produced one at a
/// time as the compiler requests them.
pub struct Lexer {
    /// A flat list of characters from the source.
    source: Vec<char>,
    /// The index of the current character.
    current: usize,
    /// The position of the first character of the current token.
    token_start: usize,
    /// The current line number.
    line_num: usize,
}

impl Lexer {
    /// An initialized instance of the lexer.
    ///
    /// ## Arguments
    /// * `src` – The source text to be scanned.
    pub fn new(src: &str) -> Lexer {
        Self {
            source: src.chars().collect(),
            current: 0,
            token_start: 0,
            line_num: 1,
        }
    }

    /// Scans the next token out of the source.
    ///
    /// ## Returns
    /// `Token` – The next token, or an `ERROR` token whose lexeme is
    /// the diagnostic message when the source could not be scanned.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        self.token_start = self.current;

        if self.is_at_end() {
            return self.make_token(TokenKind::EOF);
        }

        let c = self.advance();

        if Lexer::is_alpha(c) {
            return self.make_identifier_token();
        }

        if c.is_ascii_digit() {
            return self.make_number_token();
        }

        match c {
            '(' => self.make_token(TokenKind::L_PAREN),
            ')' => self.make_token(TokenKind::R_PAREN),
            '{' => self.make_token(TokenKind::L_CURLY),
            '}' => self.make_token(TokenKind::R_CURLY),
            ',' => self.make_token(TokenKind::COMMA),
            '.' => self.make_token(TokenKind::DOT),
            '-' => self.make_token(TokenKind::DASH),
            '+' => self.make_token(TokenKind::PLUS),
            ';' => self.make_token(TokenKind::SEMICOLON),
            '/' => self.make_token(TokenKind::SLASH),
            '*' => self.make_token(TokenKind::STAR),
            '!' => {
                let kind = if self.matches('=') {
                    TokenKind::LOGIC_NOT_EQ
                } else {
                    TokenKind::BANG
                };
                self.make_token(kind)
            }
            '=' => {
                let kind = if self.matches('=') {
                    TokenKind::LOGIC_EQ
                } else {
                    TokenKind::EQUALS
                };
                self.make_token(kind)
            }
            '>' => {
                let kind = if self.matches('=') {
                    TokenKind::GREATER_THAN_EQ
                } else {
                    TokenKind::GREATER_THAN
                };
                self.make_token(kind)
            }
            '<' => {
                let kind = if self.matches('=') {
                    TokenKind::LESS_THAN_EQ
                } else {
                    TokenKind::LESS_THAN
                };
                self.make_token(kind)
            }
            '\'' | '"' => self.make_string_token(c),
            _ => self.make_error_token("Unexpected character."),
        }
    }

    /// Checks if the lexer is at the end of the source.
    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    /// Gets the current character without consuming it.
    fn get_current(&self) -> char {
        if self.is_at_end() {
            return '\0';
        }

        self.source[self.current]
    }

    /// Returns the character after the current one without consuming it.
    fn get_next(&self) -> char {
        if self.current + 1 >= self.source.len() {
            return '\0';
        }

        self.source[self.current + 1]
    }

    /// Advances to the next character and returns the consumed one.
    fn advance(&mut self) -> char {
        let current = self.get_current();
        self.current += 1;
        current
    }

    /// Consumes the current character only if it matches the expected one.
    fn matches(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.get_current() != expected {
            return false;
        }

        self.current += 1;
        true
    }

    /// Skips whitespace-like characters and line comments.
    fn skip_whitespace(&mut self) {
        loop {
            if self.is_at_end() {
                break;
            }

            let c = self.get_current();

            if c == ' ' || c == '\r' || c == '\t' {
                self.advance();
            } else if c == '\n' {
                self.line_num += 1;
                self.advance();
            } else if c == '/' && self.get_next() == '/' {
                // A comment goes until the end of the line.
                while !self.is_at_end() && self.get_current() != '\n' {
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    /// Checks that a character can start an identifier.
    fn is_alpha(c: char) -> bool {
        c.is_ascii_alphabetic() || c == '_'
    }

    /// Generates an identifier or keyword token.
    fn make_identifier_token(&mut self) -> Token {
        while Lexer::is_alpha(self.get_current()) || self.get_current().is_ascii_digit() {
            self.advance();
        }

        let id: String = self.source[self.token_start..self.current].iter().collect();
        self.make_token(make_identifier_kind(&id))
    }

    /// Generates a numeric literal token. The fractional dot is only
    /// consumed when a digit follows it, so `1.` scans as the number
    /// `1` followed by a `DOT` token.
    fn make_number_token(&mut self) -> Token {
        while self.get_current().is_ascii_digit() {
            self.advance();
        }

        if self.get_current() == '.' && self.get_next().is_ascii_digit() {
            self.advance();

            while self.get_current().is_ascii_digit() {
                self.advance();
            }
        }

        self.make_token(TokenKind::NUM_LIT)
    }

    /// Generates a string literal token. The string must be closed by
    /// the same quote character that opened it; a backslash escapes the
    /// closing delimiter. The surrounding quotes are kept in the lexeme.
    fn make_string_token(&mut self, quote: char) -> Token {
        while !self.is_at_end() && self.get_current() != quote {
            if self.get_current() == '\n' {
                self.line_num += 1;
            }

            if self.get_current() == '\\' && self.get_next() == quote {
                self.advance();
            }

            self.advance();
        }

        if self.is_at_end() {
            return self.make_error_token("Unterminated string.");
        }

        // The closing quote.
        self.advance();
        self.make_token(TokenKind::STR_LIT)
    }

    /// Generates a token with the current state of the lexer.
    fn make_token(&self, kind: TokenKind) -> Token {
        let lexeme = match kind {
            TokenKind::EOF => String::new(),
            _ => self.source[self.token_start..self.current].iter().collect(),
        };

        Token {
            line_num: self.line_num,
            kind,
            lexeme,
        }
    }

    /// Generates an error token with the provided message as its lexeme.
    fn make_error_token(&self, message: &str) -> Token {
        Token {
            line_num: self.line_num,
            kind: TokenKind::ERROR,
            lexeme: String::from(message),
        }
    }
}
