//! Hand-written recursive descent parser for declaration source.
//!
//! The grammar is small enough for single-token lookahead:
//!
//! ```text
//! file   := class*
//! class  := doc* "class" Ident "{" member* "}"
//! member := class | field
//! field  := doc* Ident ":" Ident
//! ```
//!
//! Doc comments are tokens, not trivia: the parser buffers consecutive
//! `///` lines and attaches them to the declaration that follows. Parsing
//! stops at the first error; there is no recovery, since a failed parse
//! aborts description collection as a whole.

use std::fmt;

use logos::Logos;

use crate::decl::ast::{ClassDecl, FieldDecl, Span};
use crate::decl::lexer::Token;

/// Parse error with source location and context.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// Kind of parse error
    pub kind: ParseErrorKind,
    /// Byte range where the error occurred
    pub span: Span,
    /// Human-readable error message
    pub message: String,
}

/// Category of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A specific token was expected but something else was found.
    UnexpectedToken,
    /// Input ended while a construct was incomplete.
    UnexpectedEof,
    /// Source contains characters the lexer does not recognize.
    InvalidSyntax,
}

impl ParseError {
    /// Create an "expected token" error.
    fn expected_token(expected: &Token, found: Option<&Token>, span: Span) -> Self {
        let message = match found {
            Some(token) => format!("expected `{}`, found `{}`", expected, token),
            None => format!("expected `{}`, found end of input", expected),
        };
        Self {
            kind: if found.is_none() {
                ParseErrorKind::UnexpectedEof
            } else {
                ParseErrorKind::UnexpectedToken
            },
            span,
            message,
        }
    }

    /// Create an "unexpected token" error.
    fn unexpected_token(found: Option<&Token>, context: &str, span: Span) -> Self {
        let message = match found {
            Some(token) => format!("unexpected `{}` {}", token, context),
            None => format!("unexpected end of input {}", context),
        };
        Self {
            kind: if found.is_none() {
                ParseErrorKind::UnexpectedEof
            } else {
                ParseErrorKind::UnexpectedToken
            },
            span,
            message,
        }
    }

    /// Create an "invalid syntax" error.
    fn invalid_syntax(message: impl Into<String>, span: Span) -> Self {
        Self {
            kind: ParseErrorKind::InvalidSyntax,
            span,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {:?}", self.message, self.span)
    }
}

impl std::error::Error for ParseError {}

/// Token stream with lookahead and span tracking.
struct TokenStream<'src> {
    tokens: &'src [(Token, Span)],
    pos: usize,
}

impl<'src> TokenStream<'src> {
    fn new(tokens: &'src [(Token, Span)]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Peek at the current token without consuming it.
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(tok, _)| tok)
    }

    /// Advance past the current token.
    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Check if we've reached the end of the token stream.
    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Get the current position in the token stream.
    fn current_pos(&self) -> usize {
        self.pos
    }

    /// Byte span of the current token, or an empty span at end of input.
    fn current_span(&self) -> Span {
        match self.tokens.get(self.pos) {
            Some((_, span)) => span.clone(),
            None => match self.tokens.last() {
                Some((_, span)) => span.end..span.end,
                None => 0..0,
            },
        }
    }

    /// Byte span from the token at `start` through the last consumed token.
    fn span_from(&self, start: usize) -> Span {
        let start_byte = self.tokens.get(start).map(|(_, s)| s.start).unwrap_or(0);
        let end_byte = if self.pos > 0 {
            self.tokens
                .get(self.pos - 1)
                .map(|(_, s)| s.end)
                .unwrap_or(start_byte)
        } else {
            start_byte
        };
        start_byte..end_byte
    }

    /// Expect a specific token and advance past it.
    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        let matches = matches!(
            self.peek(),
            Some(t) if std::mem::discriminant(t) == std::mem::discriminant(&expected)
        );
        if matches {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::expected_token(
                &expected,
                self.peek(),
                self.current_span(),
            ))
        }
    }

    /// Expect an identifier and return its text.
    fn expect_ident(&mut self, context: &str) -> Result<String, ParseError> {
        let name = match self.peek() {
            Some(Token::Ident(name)) => name.clone(),
            other => {
                return Err(ParseError::unexpected_token(
                    other,
                    context,
                    self.current_span(),
                ))
            }
        };
        self.advance();
        Ok(name)
    }

    /// Consume consecutive doc comments, joined into one line.
    fn take_docs(&mut self) -> Option<String> {
        let mut lines: Vec<String> = Vec::new();
        while let Some(Token::DocComment(text)) = self.peek() {
            lines.push(text.clone());
            self.advance();
        }
        if lines.is_empty() {
            None
        } else {
            Some(lines.join(" ").trim().to_string())
        }
    }
}

/// Parse declaration source into its top-level classes.
///
/// Returns the first error encountered; a trailing doc comment with no
/// declaration after it is tolerated and dropped.
pub fn parse_declarations(source: &str) -> Result<Vec<ClassDecl>, ParseError> {
    let tokens = lex_source(source)?;
    let mut stream = TokenStream::new(&tokens);
    let mut classes = Vec::new();
    loop {
        let doc = stream.take_docs();
        if stream.at_end() {
            break;
        }
        classes.push(parse_class(&mut stream, doc)?);
    }
    Ok(classes)
}

fn lex_source(source: &str) -> Result<Vec<(Token, Span)>, ParseError> {
    let mut tokens = Vec::new();
    for (result, span) in Token::lexer(source).spanned() {
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(()) => {
                return Err(ParseError::invalid_syntax(
                    format!("unrecognized character `{}`", &source[span.clone()]),
                    span,
                ))
            }
        }
    }
    Ok(tokens)
}

fn parse_class(stream: &mut TokenStream, doc: Option<String>) -> Result<ClassDecl, ParseError> {
    let start = stream.current_pos();
    stream.expect(Token::Class)?;
    let name = stream.expect_ident("after `class`")?;
    stream.expect(Token::LBrace)?;

    let mut fields = Vec::new();
    let mut classes = Vec::new();
    loop {
        let member_doc = stream.take_docs();
        match stream.peek() {
            Some(Token::RBrace) | None => break,
            Some(Token::Class) => classes.push(parse_class(stream, member_doc)?),
            Some(Token::Ident(_)) => fields.push(parse_field(stream, member_doc)?),
            other => {
                return Err(ParseError::unexpected_token(
                    other,
                    "in class body",
                    stream.current_span(),
                ))
            }
        }
    }
    stream.expect(Token::RBrace)?;

    Ok(ClassDecl {
        name,
        doc,
        fields,
        classes,
        span: stream.span_from(start),
    })
}

fn parse_field(stream: &mut TokenStream, doc: Option<String>) -> Result<FieldDecl, ParseError> {
    let start = stream.current_pos();
    let name = stream.expect_ident("as field name")?;
    stream.expect(Token::Colon)?;
    let type_name = stream.expect_ident("as field type")?;

    Ok(FieldDecl {
        name,
        type_name,
        doc,
        span: stream.span_from(start),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one(source: &str) -> ClassDecl {
        let mut classes = parse_declarations(source).unwrap();
        assert_eq!(classes.len(), 1);
        classes.remove(0)
    }

    #[test]
    fn test_parse_class_with_fields() {
        let class = parse_one("class Car { make: Text top_speed: Int }");
        assert_eq!(class.name, "Car");
        assert_eq!(class.fields.len(), 2);
        assert_eq!(class.fields[0].name, "make");
        assert_eq!(class.fields[0].type_name, "Text");
        assert_eq!(class.fields[1].name, "top_speed");
    }

    #[test]
    fn test_parse_nested_classes() {
        let class = parse_one(
            "class Car {
                make: Text
                class Interior { seats: Int }
                class Exterior { doors: Int }
            }",
        );
        assert_eq!(class.classes.len(), 2);
        assert_eq!(class.classes[0].name, "Interior");
        assert_eq!(class.classes[0].fields[0].name, "seats");
        assert_eq!(class.classes[1].name, "Exterior");
    }

    #[test]
    fn test_docs_attach_to_fields() {
        let class = parse_one(
            "class Car {
                /// Manufacturer name.
                make: Text
                top_speed: Int
            }",
        );
        assert_eq!(class.fields[0].doc.as_deref(), Some("Manufacturer name."));
        assert_eq!(class.fields[1].doc, None);
    }

    #[test]
    fn test_multiline_doc_joins_to_one_line() {
        let class = parse_one(
            "class Car {
                /// Manufacturer name,
                /// as printed on the badge.
                make: Text
            }",
        );
        assert_eq!(
            class.fields[0].doc.as_deref(),
            Some("Manufacturer name, as printed on the badge.")
        );
    }

    #[test]
    fn test_doc_attaches_to_class() {
        let class = parse_one("/// A road vehicle.\nclass Car { }");
        assert_eq!(class.doc.as_deref(), Some("A road vehicle."));
    }

    #[test]
    fn test_doc_attaches_to_nested_class() {
        let class = parse_one(
            "class Car {
                /// Cabin fittings.
                class Interior { seats: Int }
            }",
        );
        assert_eq!(class.classes[0].doc.as_deref(), Some("Cabin fittings."));
    }

    #[test]
    fn test_unclosed_class_is_eof() {
        let err = parse_declarations("class Car { make: Text").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_stray_token_in_body() {
        let err = parse_declarations("class Car { : }").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    }

    #[test]
    fn test_field_missing_type() {
        let err = parse_declarations("class Car { make }").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    }

    #[test]
    fn test_unrecognized_character() {
        let err = parse_declarations("class Car; {}").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidSyntax);
    }

    #[test]
    fn test_plain_comments_ignored() {
        let class = parse_one(
            "// builder notes
            class Car {
                /* legacy */ make: Text
            }",
        );
        assert_eq!(class.fields[0].name, "make");
        assert_eq!(class.fields[0].doc, None);
    }
}
