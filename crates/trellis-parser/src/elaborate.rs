//! Elaboration phase: from parsed statements to a checked [`Script`].
//!
//! Resolves view names to keys, attribute names to [`Attribute`]s and checks
//! that every value fits the attribute it is assigned to. All problems in a
//! script are collected before failing.

use std::{collections::HashMap, str::FromStr};

use log::{debug, trace};

use trellis_core::{
    attribute::Attribute,
    geometry::Frame,
    identifier::Key,
    value::{ScaledSize, ScaledValue},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    parser_types as types,
    script::{Assignment, Expr, Property, Script, ViewDecl},
    span::{Span, Spanned},
};

const ATTRIBUTE_HELP: &str =
    "attributes are `top`, `left`, `bottom`, `right`, `center_x`, `center_y`, `width`, `height` and `size`";

/// Where a view was first declared.
#[derive(Debug, Clone, Copy)]
struct Declaration {
    /// Position among the unique declarations.
    index: usize,
    span: Span,
}

pub(crate) struct Builder<'src> {
    declarations: HashMap<&'src str, Declaration>,
    diagnostics: DiagnosticCollector,
}

impl<'src> Builder<'src> {
    pub fn new() -> Self {
        Self {
            declarations: HashMap::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    pub fn build(mut self, statements: &[types::Statement<'src>]) -> Result<Script, ParseError> {
        let view_statements: Vec<&types::ViewStatement<'src>> = statements
            .iter()
            .filter_map(|statement| match statement {
                types::Statement::View(view) => Some(view),
                types::Statement::Assign(_) => None,
            })
            .collect();

        let mut unique = Vec::with_capacity(view_statements.len());
        for view in view_statements {
            if self.declare(unique.len(), view) {
                unique.push(view);
            }
        }

        let views: Vec<ViewDecl> = unique
            .into_iter()
            .enumerate()
            .filter_map(|(index, view)| self.build_view(index, view))
            .collect();

        let assignments: Vec<Assignment> = statements
            .iter()
            .filter_map(|statement| match statement {
                types::Statement::Assign(assign) => self.build_assignment(assign),
                types::Statement::View(_) => None,
            })
            .collect();

        self.warn_unplaced_views(&views, &assignments);

        let warnings = self.diagnostics.finish()?;
        debug!(
            views = views.len(),
            assignments = assignments.len(),
            warnings = warnings.len();
            "Script elaborated"
        );
        Ok(Script::new(views, assignments, warnings))
    }

    /// Records a declaration; returns `false` for a duplicate.
    fn declare(&mut self, index: usize, view: &types::ViewStatement<'src>) -> bool {
        let name = *view.name.inner();
        if let Some(first) = self.declarations.get(name) {
            self.diagnostics.emit(
                Diagnostic::error(format!("view `{name}` is declared multiple times"))
                    .with_code(ErrorCode::E201)
                    .with_label(view.name.span(), "duplicate declaration")
                    .with_secondary_label(first.span, "first declared here")
                    .with_help("rename one of the views"),
            );
            return false;
        }
        self.declarations.insert(
            name,
            Declaration {
                index,
                span: view.name.span(),
            },
        );
        true
    }

    fn build_view(&mut self, index: usize, view: &types::ViewStatement<'src>) -> Option<ViewDecl> {
        let name = *view.name.inner();
        let parent = match &view.parent {
            Some(parent) => Some(self.resolve_parent(name, index, parent)?),
            None => None,
        };

        let frame = view
            .frame
            .map(|frame| {
                let [x, y, width, height] = frame.into_inner();
                Frame::new(x, y, width, height)
            })
            .unwrap_or(Frame::ZERO);
        let multiplier = view.scale.map(Spanned::into_inner);

        trace!(view = name, parent:?, multiplier:?; "View declared");
        Some(ViewDecl::new(
            Key::new(name),
            parent,
            frame,
            multiplier,
            view.span,
        ))
    }

    /// A parent must be declared, and declared before the view that uses it.
    fn resolve_parent(
        &mut self,
        name: &str,
        index: usize,
        parent: &Spanned<&'src str>,
    ) -> Option<Key> {
        let parent_name = *parent.inner();
        let Some(declaration) = self.declarations.get(parent_name).copied() else {
            self.emit_undefined_view(parent);
            return None;
        };

        if declaration.index >= index {
            let message = if parent_name == name {
                format!("view `{name}` cannot contain itself")
            } else {
                format!("view `{name}` is placed in `{parent_name}` before `{parent_name}` is declared")
            };
            self.diagnostics.emit(
                Diagnostic::error(message)
                    .with_code(ErrorCode::E204)
                    .with_label(parent.span(), "parent used here")
                    .with_secondary_label(declaration.span, "declared here")
                    .with_help("declare containers before the views they contain"),
            );
            return None;
        }

        Some(Key::new(parent_name))
    }

    fn build_assignment(&mut self, assign: &types::AssignStatement<'src>) -> Option<Assignment> {
        let target = self.resolve_view(&assign.target.view);
        let property = self.resolve_property(&assign.target.attribute);
        let value = self.resolve_expression(&assign.value, property);
        Some(Assignment::new(target?, property?, value?, assign.span))
    }

    fn resolve_view(&mut self, view: &Spanned<&'src str>) -> Option<Key> {
        if self.declarations.contains_key(view.inner()) {
            Some(Key::new(view.inner()))
        } else {
            self.emit_undefined_view(view);
            None
        }
    }

    fn resolve_property(&mut self, attribute: &Spanned<&'src str>) -> Option<Property> {
        let name = *attribute.inner();
        if name == "size" {
            return Some(Property::Size);
        }
        match Attribute::from_str(name) {
            Ok(attribute) => Some(Property::Scalar(attribute)),
            Err(err) => {
                self.diagnostics.emit(
                    Diagnostic::error(err.to_string())
                        .with_code(ErrorCode::E202)
                        .with_label(attribute.span(), "not an attribute")
                        .with_help(ATTRIBUTE_HELP),
                );
                None
            }
        }
    }

    /// Resolves the right-hand side. With an unknown target `property` the
    /// value is still checked on its own so its diagnostics are not lost.
    fn resolve_expression(
        &mut self,
        expression: &types::Expression<'src>,
        property: Option<Property>,
    ) -> Option<Expr> {
        match expression {
            types::Expression::Reference { reference, offset } => {
                let source = self.resolve_view(&reference.view);
                let source_property = self.resolve_property(&reference.attribute)?;
                self.resolve_reference(
                    expression.span(),
                    source,
                    source_property,
                    *offset,
                    property?,
                )
            }
            types::Expression::Length(length) => match property? {
                Property::Scalar(_) => Some(Expr::Length(*length.inner())),
                Property::Size => {
                    self.emit_mismatch(
                        length.span(),
                        "cannot assign a single length to `size`",
                        "write a pair: `(width, height)`",
                    );
                    None
                }
            },
            types::Expression::Pair(pair) => match property? {
                Property::Size => {
                    let (width, height) = *pair.inner();
                    Some(Expr::Size(ScaledSize::new(width, height)))
                }
                Property::Scalar(attribute) => {
                    self.emit_mismatch(
                        pair.span(),
                        format!("cannot assign a pair to scalar attribute `{attribute}`"),
                        "pairs can only be assigned to `size`",
                    );
                    None
                }
            },
        }
    }

    fn resolve_reference(
        &mut self,
        span: Span,
        source: Option<Key>,
        source_property: Property,
        offset: Option<Spanned<ScaledValue>>,
        property: Property,
    ) -> Option<Expr> {
        match (source_property, property) {
            (Property::Scalar(attribute), Property::Scalar(_)) => Some(Expr::Read {
                source: source?,
                attribute,
                offset: offset.map_or(ScaledValue::ZERO, Spanned::into_inner),
            }),
            (Property::Size, Property::Size) => {
                if let Some(offset) = offset {
                    self.emit_mismatch(
                        offset.span(),
                        "`size` cannot take an offset",
                        "offset a single dimension instead, e.g. `a.width = b.width + 8`",
                    );
                    return None;
                }
                Some(Expr::ReadSize { source: source? })
            }
            (Property::Size, Property::Scalar(attribute)) => {
                self.emit_mismatch(
                    span,
                    format!("cannot assign a size to scalar attribute `{attribute}`"),
                    "read `width` or `height` instead of `size`",
                );
                None
            }
            (Property::Scalar(attribute), Property::Size) => {
                self.emit_mismatch(
                    span,
                    format!("cannot assign scalar attribute `{attribute}` to `size`"),
                    "assign `size` from another view's `size` or a `(width, height)` pair",
                );
                None
            }
        }
    }

    /// Warns about views that have neither an explicit frame nor any
    /// assignment; they stay a zero rectangle at their parent's origin.
    fn warn_unplaced_views(&mut self, views: &[ViewDecl], assignments: &[Assignment]) {
        if self.diagnostics.has_errors() {
            return;
        }
        for view in views {
            let assigned = assignments.iter().any(|a| a.target() == view.key());
            if view.frame() == Frame::ZERO && !assigned {
                self.diagnostics.emit(
                    Diagnostic::warning(format!(
                        "view `{}` has no frame and is never assigned",
                        view.key()
                    ))
                    .with_label(view.span(), "declared here"),
                );
            }
        }
    }

    fn emit_undefined_view(&mut self, view: &Spanned<&'src str>) {
        self.diagnostics.emit(
            Diagnostic::error(format!("undefined view `{}`", view.inner()))
                .with_code(ErrorCode::E200)
                .with_label(view.span(), "not declared")
                .with_help("declare it with `view NAME;`"),
        );
    }

    fn emit_mismatch(&mut self, span: Span, message: impl Into<String>, help: &str) {
        self.diagnostics.emit(
            Diagnostic::error(message)
                .with_code(ErrorCode::E203)
                .with_label(span, ErrorCode::E203.description())
                .with_help(help),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lexer::tokenize, parser::build_statements};

    fn elaborate(source: &str) -> Result<Script, ParseError> {
        let tokens = tokenize(source)?;
        let statements = build_statements(&tokens)?;
        Builder::new().build(&statements)
    }

    fn codes(source: &str) -> Vec<Option<ErrorCode>> {
        elaborate(source)
            .expect_err("script should be rejected")
            .diagnostics()
            .iter()
            .map(Diagnostic::code)
            .collect()
    }

    #[test]
    fn test_views_and_assignments() {
        let script = elaborate(
            "view root frame(0, 0, 375, 667);\n\
             view header in root scale 2;\n\
             header.size = (fixed(375), scalable(32));\n\
             header.top = root.top + 20;\n",
        )
        .unwrap();

        let [root, header] = script.views() else {
            panic!("expected two views");
        };
        assert_eq!(root.key(), "root");
        assert_eq!(root.parent(), None);
        assert_eq!(root.frame(), Frame::new(0.0, 0.0, 375.0, 667.0));
        assert_eq!(header.parent(), Some(Key::new("root")));
        assert_eq!(header.frame(), Frame::ZERO);
        assert_eq!(header.multiplier(), Some(2.0));

        let [size, top] = script.assignments() else {
            panic!("expected two assignments");
        };
        assert_eq!(size.attribute(), Property::Size);
        assert_eq!(
            *size.value(),
            Expr::Size(ScaledSize::new(
                ScaledValue::fixed(375.0),
                ScaledValue::scalable(32.0)
            ))
        );
        assert_eq!(top.attribute(), Property::Scalar(Attribute::Top));
        assert_eq!(
            *top.value(),
            Expr::Read {
                source: Key::new("root"),
                attribute: Attribute::Top,
                offset: ScaledValue::fixed(20.0),
            }
        );
        assert!(script.warnings().is_empty());
    }

    #[test]
    fn test_size_reference() {
        let script = elaborate("view a frame(0, 0, 1, 1); view b; b.size = a.size;").unwrap();
        assert_eq!(
            *script.assignments()[0].value(),
            Expr::ReadSize {
                source: Key::new("a")
            }
        );
    }

    #[test]
    fn test_assignment_before_declaration_is_allowed() {
        let script = elaborate("b.left = a.right; view a frame(0, 0, 5, 5); view b;").unwrap();
        assert_eq!(script.assignments().len(), 1);
    }

    #[test]
    fn test_duplicate_view() {
        let err = elaborate("view a;\nview a;").unwrap_err();
        let diag = &err.diagnostics()[0];
        assert_eq!(diag.code(), Some(ErrorCode::E201));
        assert_eq!(diag.labels()[0].span(), Span::new(13..14));
        assert_eq!(diag.labels()[1].span(), Span::new(5..6));
    }

    #[test]
    fn test_undefined_views() {
        assert_eq!(
            codes("view a in nowhere; ghost.top = a.top; a.top = phantom.top;"),
            vec![
                Some(ErrorCode::E200),
                Some(ErrorCode::E200),
                Some(ErrorCode::E200)
            ]
        );
    }

    #[test]
    fn test_parent_declared_after_use() {
        assert_eq!(
            codes("view child in parent; view parent;"),
            vec![Some(ErrorCode::E204)]
        );
        assert_eq!(codes("view loop in loop;"), vec![Some(ErrorCode::E204)]);
    }

    #[test]
    fn test_unknown_attribute() {
        let err = elaborate("view a; a.centre = 4;").unwrap_err();
        let diag = &err.diagnostics()[0];
        assert_eq!(diag.code(), Some(ErrorCode::E202));
        assert_eq!(diag.message(), "unknown attribute `centre`");
    }

    #[test]
    fn test_size_scalar_mismatches() {
        let source = "view a; view b;\n\
                      a.size = 4;\n\
                      a.width = (1, 2);\n\
                      a.width = b.size;\n\
                      a.size = b.width;\n\
                      a.size = b.size + 2;\n";
        assert_eq!(codes(source), vec![Some(ErrorCode::E203); 5]);
    }

    #[test]
    fn test_value_checked_when_target_attribute_is_unknown() {
        assert_eq!(
            codes("view a; a.zzz = ghost.top;"),
            vec![Some(ErrorCode::E202), Some(ErrorCode::E200)]
        );
        assert_eq!(
            codes("view a; a.zzz = a.nope + 2;"),
            vec![Some(ErrorCode::E202), Some(ErrorCode::E202)]
        );
    }

    #[test]
    fn test_all_errors_are_collected() {
        let err = elaborate("view a; view a; x.top = 1; a.middle = 2;").unwrap_err();
        assert_eq!(err.diagnostics().len(), 3);
    }

    #[test]
    fn test_unplaced_view_warning() {
        let script = elaborate("view root frame(0, 0, 10, 10); view lost in root;").unwrap();
        let [warning] = script.warnings() else {
            panic!("expected one warning");
        };
        assert!(warning.severity().is_warning());
        assert_eq!(warning.message(), "view `lost` has no frame and is never assigned");
    }
}
