//! Lexical analysis for declaration source.
//!
//! Tokenization uses logos. Plain `//` and `/* */` comments are stripped
//! during lexing; `///` doc comments survive as [`Token::DocComment`] so the
//! parser can attach them to the declaration that follows.

use std::fmt;

use logos::Logos;

/// Declaration token.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")] // Skip whitespace
#[logos(skip r"//[^\n]*")] // Skip // comments (non-doc)
#[logos(skip r"/\*([^*]|\*[^/])*\*/")] // Skip /* */ comments
pub enum Token {
    /// Keyword `class`
    #[token("class")]
    Class,

    /// Identifier: class, field or type name
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    /// Delimiter `:`
    #[token(":")]
    Colon,

    /// Delimiter `{`
    #[token("{")]
    LBrace,

    /// Delimiter `}`
    #[token("}")]
    RBrace,

    /// Doc comment `/// ...`
    ///
    /// The captured string excludes the `///` marker and surrounding
    /// whitespace. High priority ensures it's matched before the `//`
    /// skip rule.
    #[regex(r"///[^\n]*", |lex| {
        let s = lex.slice();
        s.strip_prefix("///").unwrap_or(s).trim().to_string()
    }, priority = 10)]
    DocComment(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Class => write!(f, "class"),
            Token::Ident(name) => write!(f, "{}", name),
            Token::Colon => write!(f, ":"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::DocComment(text) => write!(f, "/// {}", text),
        }
    }
}
