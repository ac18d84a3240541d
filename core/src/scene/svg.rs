use std::fmt::{self, Write};

use crate::scene::element::{ElementId, Scene};

pub fn render(scene: &Scene) -> String {
    render_from(scene, scene.root())
}

/// Serializes the subtree rooted at `id`, two-space indented.
pub fn render_from(scene: &Scene, id: ElementId) -> String {
    SvgDocument { scene, root: id }.to_string()
}

/// Display adapter over a scene subtree.
pub struct SvgDocument<'a> {
    pub scene: &'a Scene,
    pub root: ElementId,
}

impl fmt::Display for SvgDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_element(f, self.scene, self.root, 0)
    }
}

fn write_element<W: Write>(out: &mut W, scene: &Scene, id: ElementId, depth: usize) -> fmt::Result {
    let Some(node) = scene.get(id) else {
        return Ok(());
    };
    let indent = "  ".repeat(depth);
    write!(out, "{}<{}", indent, node.tag.name())?;
    if !node.classes.is_empty() {
        write!(out, " class=\"{}\"", escape_attr(&node.classes.join(" ")))?;
    }
    for (name, value) in &node.attrs {
        write!(out, " {}=\"{}\"", name, escape_attr(&value.render()))?;
    }

    let children = node.children();
    match (&node.text, children.is_empty()) {
        (None, true) => out.write_str("/>\n"),
        (Some(text), true) => writeln!(out, ">{}</{}>", escape_text(text), node.tag.name()),
        (text, false) => {
            out.write_str(">\n")?;
            if let Some(text) = text {
                writeln!(out, "{}  {}", indent, escape_text(text))?;
            }
            for &child in children {
                write_element(out, scene, child, depth + 1)?;
            }
            writeln!(out, "{}</{}>", indent, node.tag.name())
        }
    }
}

pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn escape_attr(text: &str) -> String {
    escape_text(text).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::element::Tag;

    #[test]
    fn nested_elements_serialize_with_classes_and_text() {
        let mut scene = Scene::new(600.0, 520.0);
        let root = scene.root();
        let group = scene.append(root, Tag::Group).attr("opacity", 0.5).id();
        scene
            .append(group, Tag::Text)
            .class("roc text")
            .attr("x", 220.0)
            .text("AUC: <1 & \"2\">");
        scene.append(group, Tag::Circle).attr("r", 2.0);

        let svg = scene.to_svg();
        assert!(svg.starts_with("<svg height=\"520\" width=\"600\" xmlns=\"http://www.w3.org/2000/svg\">"));
        assert!(svg.contains("  <g opacity=\"0.5\">\n"));
        assert!(svg.contains("<text class=\"roc text\" x=\"220\">AUC: &lt;1 &amp; \"2\"&gt;</text>"));
        assert!(svg.contains("    <circle r=\"2\"/>"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn subtree_renders_through_display() {
        let mut scene = Scene::new(10.0, 10.0);
        let root = scene.root();
        let group = scene.append(root, Tag::Group).class("cm").id();
        scene.append(group, Tag::Rect).attr("width", 4.0);
        let document = SvgDocument { scene: &scene, root: group };
        assert_eq!(format!("{}", document), "<g class=\"cm\">\n  <rect width=\"4\"/>\n</g>\n");
        assert_eq!(render_from(&scene, 99), "");
    }

    #[test]
    fn attribute_quotes_are_escaped() {
        assert_eq!(escape_attr("a\"b"), "a&quot;b");
    }
}
