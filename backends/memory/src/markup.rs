//! HTML-like serialization used to compare display trees in tests.

use crate::node::{MemoryNode, NodeKind};

impl MemoryNode {
    /// Serializes the subtree.
    ///
    /// Attributes keep the order they were first set in. Inline style properties are merged
    /// into a trailing `style` attribute, and live properties follow as `.name="value"`.
    #[must_use]
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        let data = self.0.borrow();
        let tag = match &data.kind {
            NodeKind::Text(text) => {
                escape_into(out, text);
                return;
            }
            NodeKind::Element(tag) => tag,
        };

        out.push('<');
        out.push_str(tag);
        for (key, value) in data.attributes.iter().filter(|(key, _)| *key != "style") {
            write_attribute(out, key, value);
        }

        let declarations = data
            .attributes
            .get("style")
            .into_iter()
            .cloned()
            .chain(
                data.style
                    .iter()
                    .map(|(property, value)| format!("{property}: {value};")),
            )
            .collect::<Vec<_>>();
        if !declarations.is_empty() {
            write_attribute(out, "style", &declarations.join(" "));
        }

        for (key, value) in &data.properties {
            write_attribute(out, &format!(".{key}"), &value.to_attribute_string());
        }
        out.push('>');

        for child in &data.children {
            child.write_markup(out);
        }
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
}

fn write_attribute(out: &mut String, key: &str, value: &str) {
    out.push(' ');
    out.push_str(key);
    out.push_str("=\"");
    escape_into(out, value);
    out.push('"');
}

fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use sprout_core::{AttrValue, DisplayTree};

    use crate::{MemoryDocument, MemoryNode};

    #[test]
    fn markup_includes_styles_and_properties() {
        let document = MemoryDocument::new();
        let input = MemoryNode::element("input");
        document.set_attribute(&input, "type", "text").expect("attr");
        document.set_style(&input, "color", "red").expect("style");
        document
            .set_property(&input, "value", &AttrValue::from("a<b"))
            .expect("prop");
        assert_eq!(
            input.to_markup(),
            r#"<input type="text" style="color: red;" .value="a&lt;b"></input>"#
        );
    }

    #[test]
    fn text_is_escaped() {
        let document = MemoryDocument::new();
        let p = MemoryNode::element("p");
        document
            .append_child(&p, &MemoryNode::text("1 < 2 & 3"))
            .expect("append");
        assert_eq!(p.to_markup(), "<p>1 &lt; 2 &amp; 3</p>");
    }
}
