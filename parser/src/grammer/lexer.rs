use super::token::{Pos, Token, TokenKind};
use crate::error::{LexError, LexErrorKind};
use mips_ast::{NumberKind, NumberValue};
use std::iter::{Enumerate, Peekable};
use std::str::Chars;

pub struct Lexer<'a> {
    code: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(code: &'a str) -> Self {
        Self { code }
    }

    /// Every source line ends with a `Newline` token.
    pub fn parse(self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        for (idx, line) in self.code.lines().enumerate() {
            let lexer = LineLexer::new(line, idx + 1);
            tokens.extend(lexer.parse()?);
        }
        Ok(tokens)
    }
}

pub struct LineLexer<'a> {
    line: &'a str,
    // Yields (character index, char), so columns need no recounting
    iter: Peekable<Enumerate<Chars<'a>>>,
    row: usize,
}

impl<'a> LineLexer<'a> {
    pub fn new(line: &'a str, row: usize) -> Self {
        Self {
            line,
            iter: line.chars().enumerate().peekable(),
            row,
        }
    }
}

// ----------------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------------

impl<'a> LineLexer<'a> {
    fn peek_nth(&self, n: usize) -> Option<(usize, char)> {
        self.iter.clone().nth(n)
    }

    fn consume(&mut self) -> Option<(usize, char)> {
        self.iter.next()
    }

    fn pos(&self, idx: usize) -> Pos {
        Pos {
            line: self.row,
            column: idx + 1,
        }
    }

    fn error(&self, kind: LexErrorKind, idx: usize) -> LexError {
        LexError {
            kind,
            pos: self.pos(idx),
        }
    }

    /// Consume a run of word characters, used for names and literal tails.
    fn take_word(&mut self, lexeme: &mut String) {
        while let Some((_, ch)) = self.iter.next_if(|&(_, ch)| is_word(ch)) {
            lexeme.push(ch);
        }
    }
}

fn is_word(ch: char) -> bool {
    matches!(ch, '_' | '.' | '0'..='9' | 'a'..='z' | 'A'..='Z')
}

// ----------------------------------------------------------------------------
// Lexer
// ----------------------------------------------------------------------------

impl<'a> LineLexer<'a> {
    pub fn parse(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while let Some((idx, ch0)) = self.peek_nth(0) {
            // 0. Skip whitespaces
            if ch0.is_whitespace() {
                self.consume();
                continue;
            }

            // 1. Comment runs to the end of the line
            if ch0 == '#' {
                break;
            }

            let pos = self.pos(idx);

            // 2. Single character token
            if let Some(kind) = single_char_token(ch0) {
                self.consume();
                tokens.push(Token::new(kind, pos));
                continue;
            }

            // 3. Number literal
            if ch0.is_ascii_digit() {
                tokens.push(Token::new(self.parse_number(idx)?, pos));
                continue;
            }

            // 4. String literal
            if ch0 == '"' {
                tokens.push(Token::new(self.parse_text(idx)?, pos));
                continue;
            }

            // 5. Register: $t0, $8
            if ch0 == '$' {
                self.consume();
                let mut name = String::from("$");
                while let Some((_, ch)) = self.iter.next_if(|&(_, ch)| ch.is_ascii_alphanumeric())
                {
                    name.push(ch);
                }
                if name.len() == 1 {
                    return Err(self.error(LexErrorKind::EmptyRegister, idx));
                }
                tokens.push(Token::new(TokenKind::Register(name), pos));
                continue;
            }

            // 6. Directive: .text, .word
            if ch0 == '.' {
                self.consume();
                let mut name = String::from(".");
                self.take_word(&mut name);
                if name.len() == 1 {
                    return Err(self.error(LexErrorKind::EmptyDirective, idx));
                }
                tokens.push(Token::new(TokenKind::Directive(name), pos));
                continue;
            }

            // 7. Identifier: opcode or label
            if ch0.is_ascii_alphabetic() || ch0 == '_' {
                let mut name = String::new();
                self.take_word(&mut name);
                tokens.push(Token::new(TokenKind::Ident(name), pos));
                continue;
            }

            return Err(self.error(LexErrorKind::UnexpectedChar(ch0), idx));
        }

        let end = self.line.chars().count();
        tokens.push(Token::new(TokenKind::Newline, self.pos(end)));
        Ok(tokens)
    }

    // Text: "Hello\n"
    fn parse_text(&mut self, start: usize) -> Result<TokenKind, LexError> {
        self.consume();

        let mut lexeme = String::new();
        loop {
            match self.consume() {
                None => return Err(self.error(LexErrorKind::UnterminatedString, start)),
                Some((_, '"')) => break,
                Some((idx, '\\')) => match self.consume() {
                    Some((_, 'n')) => lexeme.push('\n'),
                    Some((_, 't')) => lexeme.push('\t'),
                    Some((_, 'r')) => lexeme.push('\r'),
                    Some((_, '0')) => lexeme.push('\0'),
                    Some((_, '\\')) => lexeme.push('\\'),
                    Some((_, '"')) => lexeme.push('"'),
                    Some((_, '\'')) => lexeme.push('\''),
                    Some((_, ch)) => return Err(self.error(LexErrorKind::InvalidEscape(ch), idx)),
                    None => return Err(self.error(LexErrorKind::UnterminatedString, start)),
                },
                Some((_, ch)) => lexeme.push(ch),
            }
        }
        Ok(TokenKind::Text(lexeme))
    }

    fn parse_number(&mut self, start: usize) -> Result<TokenKind, LexError> {
        if let (Some((_, '0')), Some((_, 'x' | 'X'))) = (self.peek_nth(0), self.peek_nth(1)) {
            self.consume();
            self.consume();
            return self.parse_number_hex(start);
        }
        self.parse_number_dec(start)
    }

    fn parse_number_hex(&mut self, start: usize) -> Result<TokenKind, LexError> {
        let mut digits = String::new();
        while let Some((_, ch)) = self.iter.next_if(|&(_, ch)| ch.is_ascii_hexdigit()) {
            digits.push(ch);
        }
        let mut tail = String::new();
        self.take_word(&mut tail);
        if digits.is_empty() || !tail.is_empty() {
            let lexeme = format!("0x{}{}", digits, tail);
            return Err(self.error(LexErrorKind::MalformedNumber(lexeme), start));
        }
        match i64::from_str_radix(&digits, 16) {
            Ok(num) => Ok(TokenKind::Number(NumberKind::Hex, NumberValue::Int(num))),
            Err(_) => Err(self.error(LexErrorKind::MalformedNumber(format!("0x{digits}")), start)),
        }
    }

    // Decimal: 42, 230.5, 1e3, 2.5e-1
    fn parse_number_dec(&mut self, start: usize) -> Result<TokenKind, LexError> {
        let mut lexeme = String::new();
        let mut float = false;
        self.take_digits(&mut lexeme);

        // Fraction needs a digit after the dot
        if let (Some((_, '.')), Some((_, ch))) = (self.peek_nth(0), self.peek_nth(1)) {
            if ch.is_ascii_digit() {
                self.consume();
                lexeme.push('.');
                self.take_digits(&mut lexeme);
                float = true;
            }
        }

        if let Some((_, 'e' | 'E')) = self.peek_nth(0) {
            let sign = matches!(self.peek_nth(1), Some((_, '+' | '-')));
            let digit = if sign { 2 } else { 1 };
            if let Some((_, ch)) = self.peek_nth(digit) {
                if ch.is_ascii_digit() {
                    for _ in 0..digit {
                        if let Some((_, ch)) = self.consume() {
                            lexeme.push(ch);
                        }
                    }
                    self.take_digits(&mut lexeme);
                    float = true;
                }
            }
        }

        let mut tail = String::new();
        self.take_word(&mut tail);
        if !tail.is_empty() {
            lexeme.push_str(&tail);
            return Err(self.error(LexErrorKind::MalformedNumber(lexeme), start));
        }

        let value = if float {
            // Out of range literals parse to infinity
            lexeme
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(NumberValue::Float)
        } else {
            lexeme.parse::<i64>().ok().map(NumberValue::Int)
        };
        match value {
            Some(value) => Ok(TokenKind::Number(NumberKind::Decimal, value)),
            None => Err(self.error(LexErrorKind::MalformedNumber(lexeme), start)),
        }
    }

    fn take_digits(&mut self, lexeme: &mut String) {
        while let Some((_, ch)) = self.iter.next_if(|&(_, ch)| ch.is_ascii_digit()) {
            lexeme.push(ch);
        }
    }
}

fn single_char_token(ch: char) -> Option<TokenKind> {
    match ch {
        ':' => Some(TokenKind::Colon),
        ',' => Some(TokenKind::Comma),
        '+' => Some(TokenKind::Plus),
        '-' => Some(TokenKind::Minus),
        '*' => Some(TokenKind::Star),
        '/' => Some(TokenKind::Slash),
        '%' => Some(TokenKind::Percent),
        '(' => Some(TokenKind::LParen),
        ')' => Some(TokenKind::RParen),
        _ => None,
    }
}
