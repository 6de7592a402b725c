//! Step sentence parsing.
//!
//! A sentence is split into tokens. Backtick-quoted tokens are captured as
//! values and replaced by `*`; the remaining tokens joined by single spaces
//! form the comparable string. Two steps match when their comparable strings
//! are equal, so `the page contains `Flashcards`` matches the pattern
//! `the page contains `text``.

/// One lexical token of a step sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Letter or `_`, then letters, digits or `_`.
    Ident(String),
    /// Digits with an optional fraction.
    Number(String),
    /// Double-quoted string, quotes included.
    Quoted(String),
    /// Backtick string, delimiters stripped.
    Raw(String),
    /// Any other non-whitespace character.
    Punct(char),
}

impl Token {
    fn comparable(&self) -> String {
        match self {
            Token::Ident(s) | Token::Number(s) | Token::Quoted(s) => s.clone(),
            Token::Raw(_) => "*".to_string(),
            Token::Punct(c) => c.to_string(),
        }
    }
}

pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c.is_alphabetic() || c == '_' {
            let mut ident = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_alphanumeric() || c == '_' {
                    ident.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token::Ident(ident));
        } else if c.is_ascii_digit() {
            let mut number = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_ascii_digit() {
                    number.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            // A fraction needs at least one digit after the point.
            let mut lookahead = chars.clone();
            if lookahead.next() == Some('.')
                && lookahead.peek().is_some_and(|c| c.is_ascii_digit())
            {
                chars.next();
                number.push('.');
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_digit() {
                        number.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
            }
            tokens.push(Token::Number(number));
        } else if c == '"' {
            chars.next();
            let mut quoted = String::from('"');
            let mut escaped = false;
            for c in chars.by_ref() {
                quoted.push(c);
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == '"' {
                    break;
                }
            }
            tokens.push(Token::Quoted(quoted));
        } else if c == '`' {
            chars.next();
            // Unterminated raw strings run to the end of the line.
            let raw: String = chars.by_ref().take_while(|&c| c != '`').collect();
            tokens.push(Token::Raw(raw));
        } else {
            chars.next();
            tokens.push(Token::Punct(c));
        }
    }

    tokens
}

/// A step sentence reduced to its matchable shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedStep {
    pub raw: String,
    pub comparable: String,
    pub values: Vec<String>,
}

impl ParsedStep {
    pub fn matches(&self, other: &ParsedStep) -> bool {
        self.comparable == other.comparable
    }
}

pub fn parse_step(text: &str) -> ParsedStep {
    let tokens = tokenize(text);

    let values = tokens
        .iter()
        .filter_map(|token| match token {
            Token::Raw(value) => Some(value.clone()),
            _ => None,
        })
        .collect();

    let comparable = tokens
        .iter()
        .map(Token::comparable)
        .collect::<Vec<_>>()
        .join(" ");

    ParsedStep {
        raw: text.to_string(),
        comparable,
        values,
    }
}
