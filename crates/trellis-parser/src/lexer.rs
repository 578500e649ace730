//! Lexical analyzer for layout scripts.
//!
//! Converts source text into [`PositionedToken`]s. Whitespace and `//`
//! comments are consumed here and never reach the parser. Unknown characters
//! (E001) and malformed numbers (E002) are reported and skipped so that every
//! lexical error in a script is reported in one pass.

use winnow::{
    Parser as _,
    ascii::{float, multispace1},
    combinator::{alt, not, peek, preceded, terminated},
    error::{ContextError, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{one_of, take_while},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
    tokens::{PositionedToken, Token},
};

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError>;

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Parse line comment starting with '//'
fn line_comment(input: &mut Input<'_>) -> IResult<()> {
    preceded("//", take_while(0.., |c| c != '\n'))
        .void()
        .parse_next(input)
}

fn whitespace(input: &mut Input<'_>) -> IResult<()> {
    multispace1.void().parse_next(input)
}

/// Parse an unsigned number literal: `12`, `0.5`, `1e3`.
///
/// Signs are separate tokens so that `a.right -8` reads as a subtraction.
fn number<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    terminated(
        preceded(peek(one_of(|c: char| c.is_ascii_digit())), float),
        peek(not(one_of(is_word_char))),
    )
    .map(Token::Number)
    .parse_next(input)
}

/// Consume a digit-led run that did not lex as a number, such as `1e`.
fn malformed_number<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    preceded(
        peek(one_of(|c: char| c.is_ascii_digit())),
        take_while(1.., |c: char| is_word_char(c) || c == '.'),
    )
    .parse_next(input)
}

/// Parse an identifier or keyword.
fn word<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    (
        one_of(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., is_word_char),
    )
        .take()
        .map(|word: &str| match word {
            "view" => Token::View,
            "in" => Token::In,
            "frame" => Token::Frame,
            "scale" => Token::Scale,
            "fixed" => Token::Fixed,
            "scalable" => Token::Scalable,
            _ => Token::Identifier(word),
        })
        .parse_next(input)
}

/// Parse single character tokens
fn punctuation<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    alt((
        '='.value(Token::Equals),
        '+'.value(Token::Plus),
        '-'.value(Token::Minus),
        '.'.value(Token::Dot),
        '('.value(Token::LeftParen),
        ')'.value(Token::RightParen),
        ';'.value(Token::Semicolon),
        ','.value(Token::Comma),
    ))
    .parse_next(input)
}

/// Parse a single token with position tracking; trivia yields `None`.
fn positioned_token<'a>(input: &mut Input<'a>) -> IResult<Option<PositionedToken<'a>>> {
    let start_pos = input.current_token_start();

    let token = alt((
        line_comment.value(None), // Must come before punctuation
        whitespace.value(None),
        number.map(Some), // Must come before word
        word.map(Some),
        punctuation.map(Some),
    ))
    .parse_next(input)?;

    let end_pos = input.current_token_start();
    Ok(token.map(|token| PositionedToken::new(token, Span::new(start_pos..end_pos))))
}

/// Lexer that accumulates tokens and diagnostics during tokenization.
struct Lexer<'a> {
    tokens: Vec<PositionedToken<'a>>,
    diagnostics: DiagnosticCollector,
}

impl<'a> Lexer<'a> {
    fn new() -> Self {
        Self {
            tokens: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    fn tokenize(&mut self, mut input: Input<'a>) {
        while !input.is_empty() {
            let checkpoint = input.checkpoint();
            match positioned_token(&mut input) {
                Ok(Some(token)) => self.tokens.push(token),
                Ok(None) => {}
                Err(_) => {
                    input.reset(&checkpoint);
                    let error_pos = input.current_token_start();
                    if let Ok(text) = malformed_number(&mut input) {
                        let span = Span::new(error_pos..error_pos + text.len());
                        self.diagnostics.emit(
                            Diagnostic::error(format!("invalid number `{text}`"))
                                .with_code(ErrorCode::E002)
                                .with_label(span, ErrorCode::E002.description())
                                .with_help("numbers look like `12`, `0.5` or `1e3`"),
                        );
                        continue;
                    }
                    input.reset(&checkpoint);
                    let Some(c) = input.next_token() else {
                        break;
                    };
                    let span = Span::new(error_pos..error_pos + c.len_utf8());
                    self.diagnostics.emit(
                        Diagnostic::error(format!("unexpected character `{c}`"))
                            .with_code(ErrorCode::E001)
                            .with_label(span, ErrorCode::E001.description()),
                    );
                }
            }
        }
    }

    fn finish(self) -> Result<Vec<PositionedToken<'a>>, ParseError> {
        self.diagnostics.finish().map(|_| self.tokens)
    }
}

/// Tokenize a layout script, collecting every lexical error.
///
/// # Returns
///
/// - `Ok(tokens)` - the non-trivia tokens in source order
/// - `Err(ParseError)` - one diagnostic per unexpected character or
///   malformed number
pub fn tokenize(input: &str) -> Result<Vec<PositionedToken<'_>>, ParseError> {
    let mut lexer = Lexer::new();
    lexer.tokenize(LocatingSlice::new(input));
    lexer.finish()
}
