//! Nodes created while mapping markup onto the document.
use crate::common::error::{Error, Result};
use crate::common::id::{
    CellId, HyperlinkId, ListId, NodeId, ParagraphId, RowId, RunHost, RunId, TableId,
};

use super::backend::DocumentBackend;
use super::capability::{Capabilities, NodeKind};
use super::style::RunFormat;

/// Text put in front of the first run of a bullet item.
pub const BULLET_PREFIX: &str = "\u{2022}   ";

/// Colour of hyperlink text.
pub const HYPERLINK_COLOR: &str = "0000ff";

/// Backend handle a node drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Paragraph(ParagraphId),
    Table(TableId),
    Row(RowId),
    Cell(CellId),
    /// Runs go into `link`, or straight into `paragraph` when the anchor
    /// had no target.
    Hyperlink {
        paragraph: ParagraphId,
        link: Option<HyperlinkId>,
    },
    /// The run holding the picture
    Image(RunId),
}

impl Handle {
    pub fn kind(self) -> NodeKind {
        match self {
            Handle::Paragraph(_) => NodeKind::Paragraph,
            Handle::Table(_) => NodeKind::Table,
            Handle::Row(_) => NodeKind::Row,
            Handle::Cell(_) => NodeKind::Cell,
            Handle::Hyperlink { .. } => NodeKind::Hyperlink,
            Handle::Image(_) => NodeKind::Image,
        }
    }
}

/// One element of the output: its capabilities, formatting state and
/// backend handle.
#[derive(Debug, Clone)]
pub struct Node {
    handle: Handle,
    capabilities: Capabilities,
    /// Holds the document's top-level pointer
    pub top_level: bool,
    /// Paragraph a hyperlink or picture lives in
    pub parent: Option<NodeId>,
    pub format: RunFormat,
    pub bullet: bool,
    pub list: Option<ListId>,
    /// Level of a `h1`..`h6` paragraph
    pub heading: Option<u8>,
    /// Paragraph opened by a `span` with no block around it, until the span
    /// closes or a block opens inside it
    pub standalone: bool,
    /// Paragraph opened implicitly for dangling inline content
    pub synthetic: bool,
    runs: usize,
}

impl Node {
    pub fn new(handle: Handle, top_level: bool) -> Self {
        Self {
            handle,
            capabilities: handle.kind().capabilities(),
            top_level,
            parent: None,
            format: RunFormat::default(),
            bullet: false,
            list: None,
            heading: None,
            standalone: false,
            synthetic: false,
            runs: 0,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.handle.kind()
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn can(&self, capability: Capabilities) -> bool {
        self.capabilities.contains(capability)
    }

    pub fn paragraph(&self) -> Option<ParagraphId> {
        match self.handle {
            Handle::Paragraph(p) | Handle::Hyperlink { paragraph: p, .. } => Some(p),
            _ => None,
        }
    }

    /// Where runs of this node are appended.
    pub fn run_host(&self) -> Option<RunHost> {
        match self.handle {
            Handle::Paragraph(p) => Some(RunHost::Paragraph(p)),
            Handle::Hyperlink { link: Some(l), .. } => Some(RunHost::Hyperlink(l)),
            Handle::Hyperlink { paragraph, link: None } => Some(RunHost::Paragraph(paragraph)),
            _ => None,
        }
    }

    /// Number of runs created for this node so far.
    pub fn run_count(&self) -> usize {
        self.runs
    }

    /// Count a run created on this node's behalf by someone else.
    pub fn note_run(&mut self) {
        self.runs += 1;
    }

    /// Give a bullet item that has no runs yet a run holding just the prefix.
    pub fn emit_bullet(&mut self, backend: &mut dyn DocumentBackend) -> Result<()> {
        if self.bullet && self.runs == 0 {
            let format = self.format.clone();
            self.finalize(backend, "", &format)?;
        }
        Ok(())
    }

    /// Open an empty run for a break or a picture.
    pub fn open_run(&mut self, backend: &mut dyn DocumentBackend, format: &RunFormat) -> Result<RunId> {
        self.emit_bullet(backend)?;
        let host = self.run_host().ok_or_else(|| {
            Error::InvalidState(format!("{:?} node cannot hold runs", self.kind()))
        })?;
        let run = backend.create_run(host)?;
        if !format.is_plain() {
            backend.set_run_format(run, format)?;
        }
        self.runs += 1;
        Ok(run)
    }

    /// Push one segment of buffered text to the backend as a new run.
    pub fn finalize(
        &mut self,
        backend: &mut dyn DocumentBackend,
        text: &str,
        format: &RunFormat,
    ) -> Result<RunId> {
        let host = self.run_host().ok_or_else(|| {
            Error::InvalidState(format!("{:?} node cannot hold text", self.kind()))
        })?;
        let run = backend.create_run(host)?;
        if !format.is_plain() {
            backend.set_run_format(run, format)?;
        }
        if self.bullet && self.runs == 0 {
            backend.set_run_text(run, &format!("{}{}", BULLET_PREFIX, text))?;
        } else {
            backend.set_run_text(run, text)?;
        }
        self.runs += 1;
        Ok(run)
    }
}

/// Append-only record of every node created during one conversion.
#[derive(Debug, Default)]
pub struct ProductionLog {
    nodes: Vec<Node>,
}

impl ProductionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId::new(self.nodes.len() - 1)
    }

    pub fn get(&self, id: NodeId) -> Result<&Node> {
        self.nodes
            .get(id.index())
            .ok_or_else(|| Error::InvalidState(format!("unknown node {}", id.index())))
    }

    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(id.index())
            .ok_or_else(|| Error::InvalidState(format!("unknown node {}", id.index())))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId::new(index), node))
    }

    /// Newest node carrying every flag in `capability`.
    pub fn find_last_capable(&self, capability: Capabilities) -> Option<NodeId> {
        self.iter()
            .rev()
            .find(|(_, node)| node.can(capability))
            .map(|(id, _)| id)
    }

    /// Newest node of the given kind.
    pub fn find_last_kind(&self, kind: NodeKind) -> Option<NodeId> {
        self.iter()
            .rev()
            .find(|(_, node)| node.kind() == kind)
            .map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backward_capability_search() {
        let mut log = ProductionLog::new();
        let para = log.push(Node::new(Handle::Paragraph(ParagraphId::new(0)), true));
        let cell = log.push(Node::new(Handle::Cell(CellId::new(0)), false));
        log.push(Node::new(Handle::Image(RunId::new(0)), false));

        assert_eq!(log.find_last_capable(Capabilities::TEXT), Some(para));
        assert_eq!(log.find_last_capable(Capabilities::PARAGRAPHS), Some(cell));
        assert_eq!(log.find_last_capable(Capabilities::NUMBERING), Some(para));
        assert_eq!(log.find_last_kind(NodeKind::Table), None);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_run_hosts() {
        let link = Node::new(
            Handle::Hyperlink {
                paragraph: ParagraphId::new(2),
                link: None,
            },
            false,
        );
        assert_eq!(link.run_host(), Some(RunHost::Paragraph(ParagraphId::new(2))));
        assert_eq!(Node::new(Handle::Row(RowId::new(0)), false).run_host(), None);
    }
}
