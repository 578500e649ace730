//! Parser for layout-script tokens.
//!
//! Transforms the token stream from the [`lexer`](super::lexer) into the
//! statements defined in [`parser_types`](super::parser_types). The public
//! entry point is [`build_statements`].
//!
//! Every statement commits after its first token (`view` or the target view
//! name), so a syntax error is reported at the token that broke the
//! statement rather than at the statement start.

use winnow::{
    Parser as _,
    combinator::{alt, cut_err, opt, preceded},
    error::{ContextError, ErrMode},
    stream::{Stream, TokenSlice},
    token::any,
};

use trellis_core::value::ScaledValue;

use crate::{
    error::{Diagnostic, ErrorCode},
    parser_types as types,
    span::{Span, Spanned},
    tokens::{PositionedToken, Token},
};

/// Context type for parser errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Context {
    /// Description of what is currently being parsed
    Label(&'static str),
}

type Input<'src> = TokenSlice<'src, PositionedToken<'src>>;
type IResult<O> = std::result::Result<O, ErrMode<ContextError<Context>>>;

/// Match one specific token, returning its span.
fn token<'src>(expected: Token<'static>) -> impl FnMut(&mut Input<'src>) -> IResult<Span> {
    move |input: &mut Input<'src>| {
        any.verify_map(|t: &PositionedToken<'_>| (t.token == expected).then_some(t.span))
            .parse_next(input)
    }
}

fn semicolon<'src>(input: &mut Input<'src>) -> IResult<Span> {
    token(Token::Semicolon)
        .context(Context::Label("`;`"))
        .parse_next(input)
}

fn identifier<'src>(input: &mut Input<'src>) -> IResult<Spanned<&'src str>> {
    any.verify_map(|t: &PositionedToken<'src>| match t.token {
        Token::Identifier(name) => Some(Spanned::new(name, t.span)),
        _ => None,
    })
    .context(Context::Label("identifier"))
    .parse_next(input)
}

/// Parse a number with an optional leading sign: `12`, `-0.5`, `+3`.
fn signed_number<'src>(input: &mut Input<'src>) -> IResult<Spanned<f32>> {
    let sign = opt(alt((
        token(Token::Minus).map(|span| (-1.0_f32, span)),
        token(Token::Plus).map(|span| (1.0_f32, span)),
    )))
    .parse_next(input)?;

    let number = any
        .verify_map(|t: &PositionedToken<'_>| match t.token {
            Token::Number(n) => Some(Spanned::new(n, t.span)),
            _ => None,
        })
        .context(Context::Label("number"))
        .parse_next(input)?;

    Ok(match sign {
        Some((factor, span)) => Spanned::new(factor * *number.inner(), span.union(number.span())),
        None => number,
    })
}

/// Parse `KEYWORD ( NUMBER )`, e.g. `scalable(16)`.
fn wrapped_length<'src>(
    keyword: Token<'static>,
    make: fn(f32) -> ScaledValue,
) -> impl FnMut(&mut Input<'src>) -> IResult<Spanned<ScaledValue>> {
    move |input: &mut Input<'src>| {
        let start = token(keyword).parse_next(input)?;
        let (_, length, end) = cut_err((
            token(Token::LeftParen).context(Context::Label("`(`")),
            signed_number,
            token(Token::RightParen).context(Context::Label("`)`")),
        ))
        .parse_next(input)?;
        Ok(Spanned::new(make(*length.inner()), start.union(end)))
    }
}

/// Parse a length: `fixed(N)`, `scalable(N)` or a bare (fixed) number.
fn length<'src>(input: &mut Input<'src>) -> IResult<Spanned<ScaledValue>> {
    alt((
        wrapped_length(Token::Fixed, ScaledValue::Fixed),
        wrapped_length(Token::Scalable, ScaledValue::Scalable),
        signed_number.map(|n| n.map(ScaledValue::Fixed)),
    ))
    .context(Context::Label("length"))
    .parse_next(input)
}

/// Parse `( LENGTH , LENGTH )`
fn pair<'src>(input: &mut Input<'src>) -> IResult<Spanned<(ScaledValue, ScaledValue)>> {
    let start = token(Token::LeftParen).parse_next(input)?;
    let (width, _, height, end) = cut_err((
        length,
        token(Token::Comma).context(Context::Label("`,`")),
        length,
        token(Token::RightParen).context(Context::Label("`)`")),
    ))
    .parse_next(input)?;
    Ok(Spanned::new(
        (width.into_inner(), height.into_inner()),
        start.union(end),
    ))
}

/// Parse `NAME . ATTR`
fn reference<'src>(input: &mut Input<'src>) -> IResult<types::Reference<'src>> {
    let view = identifier.parse_next(input)?;
    let (_, attribute) = cut_err((
        token(Token::Dot).context(Context::Label("`.`")),
        identifier.context(Context::Label("attribute name")),
    ))
    .parse_next(input)?;
    Ok(types::Reference { view, attribute })
}

/// Parse `NAME.ATTR [(+|-) LENGTH]`
fn reference_expression<'src>(input: &mut Input<'src>) -> IResult<types::Expression<'src>> {
    let reference = reference.parse_next(input)?;

    let operator = opt(alt((
        token(Token::Plus).map(|span| (false, span)),
        token(Token::Minus).map(|span| (true, span)),
    )))
    .parse_next(input)?;

    let offset = match operator {
        Some((negate, span)) => {
            let offset = cut_err(length).parse_next(input)?;
            let value = if negate {
                -*offset.inner()
            } else {
                *offset.inner()
            };
            Some(Spanned::new(value, span.union(offset.span())))
        }
        None => None,
    };

    Ok(types::Expression::Reference { reference, offset })
}

fn expression<'src>(input: &mut Input<'src>) -> IResult<types::Expression<'src>> {
    alt((
        pair.map(types::Expression::Pair),
        reference_expression,
        length.map(types::Expression::Length),
    ))
    .context(Context::Label("expression"))
    .parse_next(input)
}

/// Parse `frame ( x , y , w , h )`
fn frame<'src>(input: &mut Input<'src>) -> IResult<Spanned<[f32; 4]>> {
    let start = token(Token::Frame).parse_next(input)?;
    let comma = || token(Token::Comma).context(Context::Label("`,`"));
    let (_, x, _, y, _, w, _, h, end) = cut_err((
        token(Token::LeftParen).context(Context::Label("`(`")),
        signed_number,
        comma(),
        signed_number,
        comma(),
        signed_number,
        comma(),
        signed_number,
        token(Token::RightParen).context(Context::Label("`)`")),
    ))
    .parse_next(input)?;
    Ok(Spanned::new(
        [*x.inner(), *y.inner(), *w.inner(), *h.inner()],
        start.union(end),
    ))
}

/// Parse `view NAME [in PARENT] [frame(x, y, w, h)] [scale N];`
fn view_statement<'src>(input: &mut Input<'src>) -> IResult<types::Statement<'src>> {
    let start = token(Token::View).parse_next(input)?;

    let (name, parent, frame, scale, end) = cut_err((
        identifier.context(Context::Label("view name")),
        opt(preceded(
            token(Token::In),
            cut_err(identifier.context(Context::Label("parent view"))),
        )),
        opt(frame),
        opt(preceded(
            token(Token::Scale),
            cut_err(signed_number.context(Context::Label("scale multiplier"))),
        )),
        semicolon,
    ))
    .parse_next(input)?;

    Ok(types::Statement::View(types::ViewStatement {
        name,
        parent,
        frame,
        scale,
        span: start.union(end),
    }))
}

/// Parse `NAME.ATTR = EXPR;`
fn assign_statement<'src>(input: &mut Input<'src>) -> IResult<types::Statement<'src>> {
    let target = reference.parse_next(input)?;

    let (_, value, end) = cut_err((
        token(Token::Equals).context(Context::Label("`=`")),
        expression,
        semicolon,
    ))
    .parse_next(input)?;

    Ok(types::Statement::Assign(types::AssignStatement {
        span: target.span().union(end),
        target,
        value,
    }))
}

fn statement<'src>(input: &mut Input<'src>) -> IResult<types::Statement<'src>> {
    alt((view_statement, assign_statement))
        .context(Context::Label("statement"))
        .parse_next(input)
}

fn statements<'src>(input: &mut Input<'src>) -> IResult<Vec<types::Statement<'src>>> {
    let mut statements = Vec::new();
    while input.eof_offset() > 0 {
        statements.push(statement.parse_next(input)?);
    }
    Ok(statements)
}

/// Convert a winnow error into a diagnostic.
///
/// The error is reported at the token the parser stopped on. Running out of
/// tokens mid-statement is reported as incomplete input (E101) at the end of
/// the last token.
fn convert_error(
    error: ErrMode<ContextError<Context>>,
    tokens: &[PositionedToken<'_>],
    remaining: usize,
) -> Diagnostic {
    let expected = match &error {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => e.context().find_map(|ctx| match ctx {
            Context::Label(label) => Some(format!("expected {label}")),
        }),
        ErrMode::Incomplete(_) => None,
    };

    let position = tokens.len() - remaining;
    match tokens.get(position) {
        Some(unexpected) => Diagnostic::error(format!("unexpected `{}`", unexpected.token))
            .with_code(ErrorCode::E100)
            .with_label(
                unexpected.span,
                expected.unwrap_or_else(|| "unexpected token".to_string()),
            )
            .with_help("statements are `view NAME ...;` or `NAME.ATTR = EXPR;`"),
        None => {
            let end = tokens.last().map_or(0, |t| t.span.end());
            Diagnostic::error("incomplete input, more tokens expected")
                .with_code(ErrorCode::E101)
                .with_label(
                    Span::new(end..end),
                    expected.unwrap_or_else(|| "input ends here".to_string()),
                )
                .with_help("terminate every statement with `;`")
        }
    }
}

/// Parse a token stream into statements, stopping at the first syntax error.
pub fn build_statements<'src>(
    tokens: &'src [PositionedToken<'src>],
) -> Result<Vec<types::Statement<'src>>, Diagnostic> {
    let mut token_slice = TokenSlice::new(tokens);

    statements
        .parse_next(&mut token_slice)
        .map_err(|e| convert_error(e, tokens, token_slice.eof_offset()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse_ok<'a>(input: &'a str) -> Vec<types::Statement<'a>> {
        let tokens = tokenize(input).expect("input should tokenize");
        // Leaked so the statements can outlive this helper.
        let tokens: &'a [PositionedToken<'a>] = Box::leak(tokens.into_boxed_slice());
        build_statements(tokens).expect("input should parse")
    }

    fn parse_err(input: &str) -> Diagnostic {
        let tokens = tokenize(input).expect("input should tokenize");
        build_statements(&tokens).expect_err("input should not parse")
    }

    fn single_assignment(input: &str) -> types::AssignStatement<'_> {
        match parse_ok(input).into_iter().next() {
            Some(types::Statement::Assign(assign)) => assign,
            other => panic!("expected an assignment, got {other:?}"),
        }
    }

    #[test]
    fn test_bare_view() {
        let statements = parse_ok("view root;");
        let [types::Statement::View(view)] = statements.as_slice() else {
            panic!("expected one view statement");
        };
        assert_eq!(*view.name.inner(), "root");
        assert_eq!(view.name.span(), Span::new(5..9));
        assert!(view.parent.is_none());
        assert!(view.frame.is_none());
        assert!(view.scale.is_none());
        assert_eq!(view.span, Span::new(0..10));
    }

    #[test]
    fn test_view_with_all_clauses() {
        let statements = parse_ok("view avatar in header frame(1, -2, 30.5, 40) scale 0.66;");
        let [types::Statement::View(view)] = statements.as_slice() else {
            panic!("expected one view statement");
        };
        assert_eq!(view.parent.map(|p| *p.inner()), Some("header"));
        assert_eq!(
            view.frame.map(|f| f.into_inner()),
            Some([1.0, -2.0, 30.5, 40.0])
        );
        assert_eq!(view.scale.map(|s| s.into_inner()), Some(0.66));
    }

    #[test]
    fn test_literal_lengths() {
        let fixed = single_assignment("a.width = fixed(300);");
        assert_eq!(
            fixed.value,
            types::Expression::Length(Spanned::new(ScaledValue::Fixed(300.0), Span::new(10..20)))
        );

        let scalable = single_assignment("a.width = scalable(-12.5);");
        assert!(matches!(
            scalable.value,
            types::Expression::Length(len) if *len.inner() == ScaledValue::Scalable(-12.5)
        ));

        let bare = single_assignment("a.left = -8;");
        assert!(matches!(
            bare.value,
            types::Expression::Length(len) if *len.inner() == ScaledValue::Fixed(-8.0)
        ));
    }

    #[test]
    fn test_reference_with_offsets() {
        let plain = single_assignment("a.top = b.bottom;");
        let types::Expression::Reference { reference, offset } = plain.value else {
            panic!("expected a reference");
        };
        assert_eq!(*reference.view.inner(), "b");
        assert_eq!(*reference.attribute.inner(), "bottom");
        assert!(offset.is_none());

        let plus = single_assignment("a.left = b.left + scalable(16);");
        let types::Expression::Reference { offset, .. } = plus.value else {
            panic!("expected a reference");
        };
        assert_eq!(offset.map(|o| o.into_inner()), Some(ScaledValue::Scalable(16.0)));

        let minus = single_assignment("a.right = b.right - 8;");
        let types::Expression::Reference { offset, .. } = minus.value else {
            panic!("expected a reference");
        };
        assert_eq!(offset.map(|o| o.into_inner()), Some(ScaledValue::Fixed(-8.0)));
    }

    #[test]
    fn test_minus_negates_scalable_offset() {
        let assign = single_assignment("a.top = b.top - scalable(50);");
        let types::Expression::Reference { offset, .. } = assign.value else {
            panic!("expected a reference");
        };
        assert_eq!(
            offset.map(|o| o.into_inner()),
            Some(ScaledValue::Scalable(-50.0))
        );
    }

    #[test]
    fn test_pair() {
        let assign = single_assignment("a.size = (fixed(375), scalable(64));");
        assert_eq!(*assign.target.attribute.inner(), "size");
        assert!(matches!(
            assign.value,
            types::Expression::Pair(pair)
                if *pair.inner() == (ScaledValue::Fixed(375.0), ScaledValue::Scalable(64.0))
        ));
    }

    #[test]
    fn test_statements_in_order() {
        let statements = parse_ok(
            "view a;\n\
             view b in a;\n\
             b.top = a.top;\n\
             b.size = a.size;\n",
        );
        assert_eq!(statements.len(), 4);
        assert!(matches!(statements[0], types::Statement::View(_)));
        assert!(matches!(statements[1], types::Statement::View(_)));
        assert!(matches!(statements[2], types::Statement::Assign(_)));
        assert!(matches!(statements[3], types::Statement::Assign(_)));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_ok("").is_empty());
        assert!(parse_ok("// only a comment\n").is_empty());
    }

    #[test]
    fn test_missing_semicolon_is_reported_at_next_token() {
        let diag = parse_err("view a\nview b;");
        assert_eq!(diag.code(), Some(ErrorCode::E100));
        assert_eq!(diag.message(), "unexpected `view`");
        assert_eq!(diag.labels()[0].span(), Span::new(7..11));
    }

    #[test]
    fn test_missing_equals() {
        let diag = parse_err("a.top b.top;");
        assert_eq!(diag.code(), Some(ErrorCode::E100));
        assert_eq!(diag.labels()[0].message(), "expected `=`");
    }

    #[test]
    fn test_truncated_input_is_incomplete() {
        let diag = parse_err("view a; a.top = b.top +");
        assert_eq!(diag.code(), Some(ErrorCode::E101));
        assert_eq!(diag.labels()[0].span(), Span::new(23..23));
    }

    #[test]
    fn test_stray_token_at_statement_start() {
        let diag = parse_err("; view a;");
        assert_eq!(diag.code(), Some(ErrorCode::E100));
        assert_eq!(diag.labels()[0].span(), Span::new(0..1));
    }
}
