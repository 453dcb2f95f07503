//! Query lexer (tokenizer).
//!
//! Converts a query string into a stream of tokens for the parser. Keywords are the exact
//! uppercase words `AND`, `OR`, and `NOT`; any other bare word is a term, so lowercase
//! `or` is an ordinary search term.

use std::{iter::Peekable, str::CharIndices};

use crate::error::LexError;

/// A token in the query language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A bare word (search term).
    Term(String),

    /// A quoted term (the quotes are stripped and escapes resolved).
    Quoted(String),

    /// The AND keyword.
    And,

    /// The OR keyword.
    Or,

    /// The NOT keyword.
    Not,

    /// Left parenthesis.
    LParen,

    /// Right parenthesis.
    RParen,
}

/// A token together with the byte position where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    /// The token.
    pub token: Token,
    /// Byte offset of the token's first character.
    pub position: usize,
}

/// Tokenizes a query string.
struct Lexer<'a> {
    /// The original input string.
    input: &'a str,
    /// Character iterator with one-character lookahead.
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    /// Creates an error at a specific position.
    fn error_at(&self, message: impl Into<String>, position: usize) -> LexError {
        LexError::new(message, position, self.input)
    }

    /// Tokenizes the entire input, returning all tokens or an error.
    fn tokenize(mut self) -> Result<Vec<Spanned>, LexError> {
        let mut tokens = Vec::new();

        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }

        Ok(tokens)
    }

    /// Returns the next token, or None if at end of input.
    fn next_token(&mut self) -> Result<Option<Spanned>, LexError> {
        self.skip_whitespace();

        let Some(&(position, ch)) = self.chars.peek() else {
            return Ok(None);
        };

        let token = match ch {
            '"' => self.read_quoted(position)?,
            '(' => {
                self.chars.next();
                Token::LParen
            }
            ')' => {
                self.chars.next();
                Token::RParen
            }
            _ => self.read_word(),
        };

        Ok(Some(Spanned { token, position }))
    }

    /// Reads a quoted term. `\"` and `\\` escape a quote and a backslash.
    fn read_quoted(&mut self, start_pos: usize) -> Result<Token, LexError> {
        self.chars.next(); // consume opening quote

        let mut content = String::new();

        loop {
            match self.chars.next() {
                Some((_, '"')) => return Ok(Token::Quoted(content)),
                Some((_, '\\')) => match self.chars.next() {
                    Some((_, escaped)) => content.push(escaped),
                    None => return Err(self.error_at("unclosed quote", start_pos)),
                },
                Some((_, ch)) => content.push(ch),
                None => return Err(self.error_at("unclosed quote", start_pos)),
            }
        }
    }

    /// Reads a bare word: a term or one of the keywords.
    fn read_word(&mut self) -> Token {
        let mut word = String::new();

        while let Some((_, ch)) = self
            .chars
            .next_if(|&(_, ch)| !ch.is_whitespace() && !matches!(ch, '(' | ')' | '"'))
        {
            word.push(ch);
        }

        match word.as_str() {
            "AND" => Token::And,
            "OR" => Token::Or,
            "NOT" => Token::Not,
            _ => Token::Term(word),
        }
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|(_, ch)| ch.is_whitespace()).is_some() {}
    }
}

/// Tokenizes a query string, keeping each token's byte position.
pub fn tokenize_spanned(input: &str) -> Result<Vec<Spanned>, LexError> {
    Lexer::new(input).tokenize()
}

/// Convenience function to tokenize a query string.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Ok(tokenize_spanned(input)?
        .into_iter()
        .map(|spanned| spanned.token)
        .collect())
}
