use crate::memory::MemoryNode;

/// Options for HTML serialization
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// One node per line, indented by depth
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

impl HtmlOptions {
    pub fn compact() -> Self {
        Self {
            pretty: false,
            ..Default::default()
        }
    }
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

struct Context<'a> {
    options: &'a HtmlOptions,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    fn new(options: &'a HtmlOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            for _ in 0..self.depth {
                self.buffer.push_str(&self.options.indent);
            }
        }
        self.buffer.push_str(text);
        if self.options.pretty {
            self.buffer.push('\n');
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Serialize `node` and its subtree.
///
/// Attributes keep insertion order; `class` and `style` are synthesized from the
/// class list and style declarations and come last.
pub fn to_html(node: &MemoryNode, options: &HtmlOptions) -> String {
    let mut ctx = Context::new(options);
    write_node(node, &mut ctx);
    ctx.get_output()
}

/// Serialize only the children of `container`, e.g. everything mounted in a body.
pub fn inner_html(container: &MemoryNode, options: &HtmlOptions) -> String {
    let mut ctx = Context::new(options);
    for child in container.children() {
        write_node(&child, &mut ctx);
    }
    ctx.get_output()
}

fn write_node(node: &MemoryNode, ctx: &mut Context) {
    let Some(tag) = node.tag() else {
        ctx.add_line(&escape_text(&node.text_value().unwrap_or_default()));
        return;
    };

    let open = open_tag(&tag, node);
    if VOID_ELEMENTS.contains(&tag.as_str()) {
        ctx.add_line(&open);
        return;
    }

    let children = node.children();
    match children.as_slice() {
        [] => ctx.add_line(&format!("{}</{}>", open, tag)),
        [only] if !only.is_element() => {
            let text = escape_text(&only.text_value().unwrap_or_default());
            ctx.add_line(&format!("{}{}</{}>", open, text, tag));
        }
        _ => {
            ctx.add_line(&open);
            ctx.indent();
            for child in &children {
                write_node(child, ctx);
            }
            ctx.dedent();
            ctx.add_line(&format!("</{}>", tag));
        }
    }
}

fn open_tag(tag: &str, node: &MemoryNode) -> String {
    let mut open = format!("<{}", tag);

    for (name, value) in node.attributes() {
        open.push_str(&format!(" {}=\"{}\"", name, escape_attribute(&value)));
    }

    let classes = node.classes();
    if !classes.is_empty() {
        open.push_str(&format!(" class=\"{}\"", escape_attribute(&classes.join(" "))));
    }

    let styles = node.styles();
    if !styles.is_empty() {
        let declarations: Vec<String> = styles
            .iter()
            .map(|(key, value)| format!("{}: {}", key, value))
            .collect();
        open.push_str(&format!(
            " style=\"{}\"",
            escape_attribute(&declarations.join("; "))
        ));
    }

    open.push('>');
    open
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}
