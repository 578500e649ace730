//! SVG export: one rectangle per view at its absolute frame.

use log::debug;
use svg::{
    Document, Node,
    node::{
        self,
        element::{Element, Group, Rectangle},
    },
};

use trellis_core::{geometry::Frame, identifier::Key};

use crate::{
    color::Color,
    config::StyleConfig,
    export::{self, Exporter},
    pass::LayoutResult,
};

/// SVG exporter with resolved style settings.
#[derive(Debug, Clone)]
pub struct Svg {
    background: Option<Color>,
    stroke: Color,
    fill: Option<Color>,
    padding: f32,
}

impl Svg {
    /// Creates an exporter from `style`.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] if a configured colour is invalid.
    pub fn new(style: &StyleConfig) -> Result<Self, export::Error> {
        Ok(Self {
            background: style.background_color().map_err(export::Error::Render)?,
            stroke: style.stroke_color().map_err(export::Error::Render)?,
            fill: style.fill_color().map_err(export::Error::Render)?,
            padding: style.padding().max(0.0),
        })
    }

    /// Builds the SVG document for `layout`.
    pub fn render_document(&self, layout: &LayoutResult) -> Document {
        let bounds = layout.canvas_bounds().expand(self.padding);
        debug!(width = bounds.width(), height = bounds.height(); "SVG canvas sized");

        let mut doc = Document::new()
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    bounds.min_x(),
                    bounds.min_y(),
                    bounds.width(),
                    bounds.height()
                ),
            )
            .set("width", bounds.width())
            .set("height", bounds.height());

        if let Some(background) = &self.background {
            doc = doc.add(
                Rectangle::new()
                    .set("x", bounds.min_x())
                    .set("y", bounds.min_y())
                    .set("width", bounds.width())
                    .set("height", bounds.height())
                    .set("fill", background)
                    .set("fill-opacity", background.alpha()),
            );
        }

        let mut views = Group::new().set("id", "views");
        for root in layout.hierarchy().roots() {
            views = self.add_subtree(views, layout, root);
        }
        doc.add(views)
    }

    // Parents are drawn before their children so nested views stay visible.
    fn add_subtree(&self, mut group: Group, layout: &LayoutResult, key: Key) -> Group {
        if let Some(frame) = layout.absolute_frame(key) {
            group = group.add(self.render_view(key, frame));
        }
        for child in layout.hierarchy().children(key) {
            group = self.add_subtree(group, layout, child);
        }
        group
    }

    fn render_view(&self, key: Key, frame: Frame) -> Rectangle {
        let mut rect = Rectangle::new()
            .set("x", frame.x().min(frame.max_x()))
            .set("y", frame.y().min(frame.max_y()))
            .set("width", frame.width().abs())
            .set("height", frame.height().abs())
            .set("stroke", &self.stroke)
            .set("stroke-opacity", self.stroke.alpha())
            .set("fill", "none")
            .set("data-view", key.name());

        if let Some(fill) = &self.fill {
            rect = rect.set("fill", fill).set("fill-opacity", fill.alpha());
        }
        let mut title = Element::new("title");
        title.append(node::Text::new(key.name()));
        rect.add(title)
    }
}

impl Exporter for Svg {
    fn render(&self, layout: &LayoutResult) -> Result<String, export::Error> {
        let doc = self.render_document(layout);
        debug!(views = layout.len(); "SVG document rendered");
        Ok(doc.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::LayoutConfig, pass::LayoutPass};

    fn layout(source: &str) -> LayoutResult {
        let script = trellis_parser::parse(source).unwrap();
        LayoutPass::new(&script, &LayoutConfig::default())
            .unwrap()
            .run()
            .unwrap()
    }

    #[test]
    fn test_canvas_includes_padding() {
        let result = layout("view a frame(10, 10, 100, 50);");
        let style = StyleConfig::new(None, None, None, 5.0);

        let svg = Svg::new(&style).unwrap().render(&result).unwrap();
        assert!(svg.contains(r#"viewBox="5 5 110 60""#));
        assert!(svg.contains(r#"width="110""#));
        assert!(svg.contains("<title>"));
    }

    #[test]
    fn test_children_drawn_after_parents() {
        let result = layout(
            "view outer frame(0, 0, 100, 100); view inner in outer frame(10, 10, 20, 20);",
        );
        let svg = Svg::new(&StyleConfig::default())
            .unwrap()
            .render(&result)
            .unwrap();

        let outer = svg.find(r#"data-view="outer""#).unwrap();
        let inner = svg.find(r#"data-view="inner""#).unwrap();
        assert!(outer < inner);
        // inner is placed at its absolute position.
        assert!(svg.contains(r#"x="10""#));
    }

    #[test]
    fn test_background_is_optional() {
        let result = layout("view a frame(0, 0, 10, 10);");

        let plain = Svg::new(&StyleConfig::default())
            .unwrap()
            .render(&result)
            .unwrap();
        assert_eq!(plain.matches("<rect").count(), 1);

        let style = StyleConfig::new(Some("white".to_string()), None, None, 0.0);
        let with_background = Svg::new(&style).unwrap().render(&result).unwrap();
        assert_eq!(with_background.matches("<rect").count(), 2);
    }

    #[test]
    fn test_invalid_color_is_a_render_error() {
        let style = StyleConfig::new(None, Some("chartreuse-ish".to_string()), None, 0.0);
        assert!(matches!(Svg::new(&style), Err(export::Error::Render(_))));
    }
}
