use crate::error::RenderResult;
use crate::node::{Node, Renderable};
use tracing::{info, instrument};
use twig_host::{HostRange, HostTree};

/// Mount `root` as the only content of `container`.
///
/// The initial range spans every existing child of the container, so
/// pre-existing content is cleared. Returns the range the root now occupies.
#[instrument(skip_all, fields(kind = root.kind()))]
pub fn render<H: HostTree>(root: &Node<H>, container: &H::Node) -> RenderResult<HostRange<H::Node>> {
    let host = root.host();
    let existing = host.child_count(container)?;
    let mut range = host.range(container, 0, existing)?;
    root.render_to_host(&mut range)?;
    info!(cleared = existing, start = range.start(), end = range.end(), "Rendered root");
    Ok(range)
}
