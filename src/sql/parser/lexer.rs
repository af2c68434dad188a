//! Command lexer - splits a command line into shell-style tokens

use std::{iter::Peekable, str::Chars};

use crate::error::{Error, Result};

/// Characters that always form a token of their own when unquoted
const PUNCTUATION: [char; 4] = ['(', ')', ',', '='];

/// Characters a backslash escapes inside double quotes
const DOUBLE_QUOTE_ESCAPES: [char; 4] = ['"', '\\', '$', '`'];

/// Shell-style lexer over a single command line
pub struct Lexer<'a> {
    iter: Peekable<Chars<'a>>,
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.scan().transpose()
    }
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given line
    pub fn new(line: &'a str) -> Self {
        Self {
            iter: line.chars().peekable(),
        }
    }

    /// Consumes the next character if it satisfies the predicate
    fn next_if<F: Fn(char) -> bool>(&mut self, predicate: F) -> Option<char> {
        self.iter.peek().filter(|&c| predicate(*c))?;
        self.iter.next()
    }

    /// Consumes consecutive characters while they satisfy the predicate
    fn next_while<F: Fn(char) -> bool>(&mut self, predicate: F) -> Option<String> {
        let mut value = String::new();
        while let Some(c) = self.next_if(&predicate) {
            value.push(c);
        }
        Some(value).filter(|v| !v.is_empty())
    }

    /// Removes whitespace from the input stream
    fn erase_whitespace(&mut self) {
        self.next_while(|c| c.is_whitespace());
    }

    /// Scans and returns the next token
    fn scan(&mut self) -> Result<Option<String>> {
        self.erase_whitespace();
        match self.iter.peek() {
            Some(c) if PUNCTUATION.contains(c) => Ok(self.iter.next().map(String::from)),
            Some(_) => self.scan_word().map(Some),
            None => Ok(None),
        }
    }

    /// Scans a word, joining adjacent quoted and unquoted pieces
    fn scan_word(&mut self) -> Result<String> {
        let mut word = String::new();
        while let Some(&c) = self.iter.peek() {
            if c.is_whitespace() || PUNCTUATION.contains(&c) {
                break;
            }
            self.iter.next();
            match c {
                '\'' => self.scan_single_quoted(&mut word)?,
                '"' => self.scan_double_quoted(&mut word)?,
                '\\' => match self.iter.next() {
                    Some('\n') => {}
                    Some(escaped) => word.push(escaped),
                    None => return Err(Error::Syntax("no escaped character".into())),
                },
                c => word.push(c),
            }
        }
        Ok(word)
    }

    /// Single quotes preserve everything up to the closing quote
    fn scan_single_quoted(&mut self, word: &mut String) -> Result<()> {
        loop {
            match self.iter.next() {
                Some('\'') => return Ok(()),
                Some(c) => word.push(c),
                None => return Err(Error::Syntax("no closing quotation".into())),
            }
        }
    }

    fn scan_double_quoted(&mut self, word: &mut String) -> Result<()> {
        loop {
            match self.iter.next() {
                Some('"') => return Ok(()),
                Some('\\') => {
                    if let Some(escaped) = self.next_if(|c| DOUBLE_QUOTE_ESCAPES.contains(&c)) {
                        word.push(escaped);
                    } else if self.next_if(|c| c == '\n').is_none() {
                        word.push('\\');
                    }
                }
                Some(c) => word.push(c),
                None => return Err(Error::Syntax("no closing quotation".into())),
            }
        }
    }
}

/// Splits a command line into tokens
pub fn tokenize(line: &str) -> Result<Vec<String>> {
    Lexer::new(line).collect()
}
