//! Plain-text export: one line per view with its local and absolute frame.

use std::fmt::Write;

use crate::{
    export::{self, Exporter},
    pass::LayoutResult,
};

/// Lists every view in declaration order, indented by depth.
///
/// ```text
/// screen  x=0 y=0 w=375 h=667  abs=(0, 0)
///   header  x=0 y=0 w=375 h=64  abs=(0, 0)
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Text;

impl Exporter for Text {
    fn render(&self, layout: &LayoutResult) -> Result<String, export::Error> {
        let mut out = String::new();
        for node in layout.views() {
            let key = node.key();
            let frame = node.frame();
            let depth = layout.hierarchy().ancestors(key).len();
            let origin = layout
                .absolute_frame(key)
                .map(|frame| frame.origin())
                .unwrap_or_default();

            writeln!(
                out,
                "{:indent$}{key}  x={} y={} w={} h={}  abs=({}, {})",
                "",
                frame.x(),
                frame.y(),
                frame.width(),
                frame.height(),
                origin.x(),
                origin.y(),
                indent = depth * 2,
            )
            .map_err(|err| export::Error::Render(err.to_string()))?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::LayoutConfig, pass::LayoutPass};

    #[test]
    fn test_lists_views_by_depth() {
        let script = trellis_parser::parse(
            "view screen frame(5, 5, 100, 100); view header in screen frame(0, 10, 100, 20);",
        )
        .unwrap();
        let result = LayoutPass::new(&script, &LayoutConfig::default())
            .unwrap()
            .run()
            .unwrap();

        let text = Text.render(&result).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "screen  x=5 y=5 w=100 h=100  abs=(5, 5)",
                "  header  x=0 y=10 w=100 h=20  abs=(5, 15)",
            ]
        );
    }
}
