//! Streaming tag-to-document mapper.
//!
//! The dispatcher sees each start tag, text chunk and end tag exactly once
//! and never builds a tree of the input. Text is buffered and only handed
//! to a node when the next tag arrives, so the node it belongs to is
//! decided with everything up to that tag known.
//!
//! Two resolution strategies are supported, see [`Resolution`]. Both keep a
//! stack of open frames so end tags can tear down what their start tag
//! built; they differ in how inline content finds its target node.
use crate::common::error::{Error, Result};
use crate::common::id::{CellId, Container, ListId, NodeId, RowId, TableId};
use crate::common::unit::px_to_twips;
use crate::ooxml::docx::format::TableBorderStyle;
use crate::ooxml::docx::writer::{
    CellMargins, ListType, SectionProperties, TableBorder, TableWidth, VerticalMerge,
};
use std::io::Write;

use super::backend::DocumentBackend;
use super::capability::{Capabilities, NodeKind};
use super::config::{ConversionOptions, Resolution};
use super::event::{Event, attribute};
use super::grid::{CellLayout, GridPlan, finalize_grid};
use super::image::{PictureSize, load_picture};
use super::merge::{MergeTracker, SpanOrigin};
use super::node::{HYPERLINK_COLOR, Handle, Node, ProductionLog};
use super::style::{
    AttributeError, Length, MARKER_HIGHLIGHT, RunFormat, has_marker_class, parse_count, parse_style,
};
use super::tags::{self, Tag};

/// Colour of visible table borders.
pub const BORDER_COLOR: &str = "CCCCCC";

/// Style applied to bullet and numbered items.
const LIST_PARAGRAPH_STYLE: &str = "ListParagraph";

/// Deepest numbering level Word defines.
const MAX_LIST_LEVEL: u32 = 8;

/// Largest `colspan` honoured, as in HTML.
pub const MAX_COLUMN_SPAN: u32 = 1000;

/// Largest `rowspan` honoured, as in HTML.
pub const MAX_ROW_SPAN: u32 = 65534;

/// An element opened by a start tag (or implicitly) and not yet closed.
#[derive(Debug)]
struct Frame {
    /// Normalized tag name; empty for implicit paragraphs
    name: String,
    tag: Option<Tag>,
    node: Option<NodeId>,
    /// Formatting scoped to this element
    style: Option<RunFormat>,
    synthetic: bool,
}

impl Frame {
    fn new(name: String, tag: Option<Tag>) -> Self {
        Self {
            name,
            tag,
            node: None,
            style: None,
            synthetic: false,
        }
    }

    fn implicit(node: NodeId) -> Self {
        Self {
            name: String::new(),
            tag: None,
            node: Some(node),
            style: None,
            synthetic: true,
        }
    }
}

/// An open `ul` (`list == None`) or `ol`.
#[derive(Debug, Clone, Copy)]
struct ListContext {
    list: Option<ListId>,
}

/// The row currently being filled.
#[derive(Debug, Clone, Copy)]
struct RowState {
    id: RowId,
    index: usize,
    /// Grid column the next cell starts at
    position: usize,
}

/// Bookkeeping of one open table.
#[derive(Debug)]
struct TableContext {
    node: NodeId,
    id: TableId,
    /// Declared width in twips, else the page content width
    width: u32,
    merges: MergeTracker,
    rows: Vec<Vec<CellLayout>>,
    row: Option<RowState>,
}

impl TableContext {
    fn start_row(&mut self, backend: &mut dyn DocumentBackend) -> Result<RowId> {
        if self.row.is_some() {
            self.finish_row(backend)?;
        }
        let id = backend.insert_row(self.id)?;
        self.row = Some(RowState {
            id,
            index: self.rows.len(),
            position: 0,
        });
        self.rows.push(Vec::new());
        Ok(id)
    }

    fn push_layout(&mut self, layout: CellLayout) {
        if let Some(row) = self.row.as_mut() {
            if let Some(cells) = self.rows.get_mut(row.index) {
                cells.push(layout);
            }
            row.position += layout.column_span as usize;
        }
    }

    /// Create the continuation cell owed to `origin` in the current row.
    fn continuation(&mut self, backend: &mut dyn DocumentBackend, origin: SpanOrigin) -> Result<()> {
        let Some(row) = self.row else {
            return Ok(());
        };
        let cell = backend.create_cell(row.id)?;
        backend.set_cell_vertical_merge(cell, VerticalMerge::Continue)?;
        if origin.column_span > 1 {
            backend.set_cell_column_span(cell, origin.column_span)?;
        }
        if let Some(width) = origin.width {
            backend.set_cell_width(cell, width)?;
        }
        log::debug!(
            "continuing merged cell {} at row {}, column {}",
            origin.cell.index(),
            row.index,
            row.position
        );
        self.push_layout(CellLayout {
            cell,
            column_span: origin.column_span,
            width: origin.width,
        });
        Ok(())
    }

    /// Pay every continuation owed at the current position.
    fn pay_owed(&mut self, backend: &mut dyn DocumentBackend) -> Result<()> {
        while let Some(row) = self.row {
            match self.merges.take(row.index, row.position) {
                Some(origin) => self.continuation(backend, origin)?,
                None => break,
            }
        }
        Ok(())
    }

    fn open_cell(
        &mut self,
        backend: &mut dyn DocumentBackend,
        attrs: &[(String, String)],
        page: &SectionProperties,
    ) -> Result<Option<CellId>> {
        self.pay_owed(backend)?;
        let Some(row) = self.row else {
            return Ok(None);
        };
        let cell = backend.create_cell(row.id)?;

        let mut column_span = 1;
        let mut row_span = 1;
        let mut width = None;
        let mut height = None;
        for (key, value) in attrs {
            match key.to_ascii_lowercase().as_str() {
                "colspan" => match parse_count(value) {
                    Ok(span) => column_span = clamp_span(key, span, MAX_COLUMN_SPAN),
                    Err(err) => warn_attribute("td", key, &err),
                },
                "rowspan" => match parse_count(value) {
                    Ok(span) => row_span = clamp_span(key, span, MAX_ROW_SPAN),
                    Err(err) => warn_attribute("td", key, &err),
                },
                "style" => {
                    let decl = parse_style(value);
                    width = decl.width.or(width);
                    height = decl.height.or(height);
                },
                "width" => match Length::parse(value) {
                    Ok(len) => width = width.or(Some(len)),
                    Err(err) => warn_attribute("td", key, &err),
                },
                "height" => match Length::parse(value) {
                    Ok(len) => height = height.or(Some(len)),
                    Err(err) => warn_attribute("td", key, &err),
                },
                _ => {},
            }
        }

        let width = width.map(|len| len.to_twips(self.width));
        if column_span > 1 {
            backend.set_cell_column_span(cell, column_span)?;
        }
        if let Some(width) = width {
            backend.set_cell_width(cell, width)?;
        }
        if let Some(height) = height {
            backend.set_row_height(row.id, height.to_twips(page.page_height))?;
        }
        if row_span > 1 {
            backend.set_cell_vertical_merge(cell, VerticalMerge::Restart)?;
            self.merges.register_span(
                row.index,
                row.position,
                SpanOrigin {
                    cell,
                    column_span,
                    width,
                },
                row_span,
            );
        }

        self.push_layout(CellLayout {
            cell,
            column_span,
            width,
        });
        Ok(Some(cell))
    }

    /// Close the current row, paying continuations owed past its last cell.
    fn finish_row(&mut self, backend: &mut dyn DocumentBackend) -> Result<()> {
        let Some(row) = self.row else {
            return Ok(());
        };
        for (_, origin) in self.merges.take_rest_of_row(row.index, row.position) {
            self.continuation(backend, origin)?;
        }
        self.row = None;
        Ok(())
    }

    /// Declare the grid and size every cell that has no explicit width.
    fn finalize(&self, backend: &mut dyn DocumentBackend) -> Result<GridPlan> {
        if !self.merges.is_empty() {
            log::debug!(
                "{} rowspans run past the last row of the table",
                self.merges.len()
            );
        }
        let plan = finalize_grid(&self.rows, self.width);
        log::debug!(
            "table grid of {} columns over {} rows",
            plan.column_count(),
            self.rows.len()
        );
        backend.set_table_grid(self.id, &plan.columns)?;
        for (cell, width) in &plan.cell_widths {
            backend.set_cell_width(*cell, *width)?;
        }
        Ok(plan)
    }
}

fn warn_attribute(tag: &str, key: &str, err: &AttributeError) {
    log::warn!("dropping attribute {} of <{}>: {}", key, tag, err);
}

fn clamp_span(key: &str, span: u32, max: u32) -> u32 {
    if span > max {
        log::warn!("clamping {}={} of a table cell to {}", key, span, max);
    }
    span.clamp(1, max)
}

/// Paragraph flavours created by the different block tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParagraphRole {
    Plain,
    Heading(u8),
    Item,
    Rule,
}

/// Consumes markup events and drives a [`DocumentBackend`].
pub struct Dispatcher<'a, B: DocumentBackend> {
    backend: &'a mut B,
    options: &'a ConversionOptions,
    page: SectionProperties,
    log: ProductionLog,
    frames: Vec<Frame>,
    tables: Vec<TableContext>,
    lists: Vec<ListContext>,
    /// The open block-level node at document depth 0
    top_level: Option<NodeId>,
    text: String,
    /// Depth inside `head`, `script` and friends
    suppressed: usize,
}

impl<'a, B: DocumentBackend> Dispatcher<'a, B> {
    /// Start a conversion: the backend gets a fresh document right away.
    pub fn new(backend: &'a mut B, options: &'a ConversionOptions) -> Result<Self> {
        backend.create_document(&options.page_setup())?;
        let page = backend.page_setup();
        Ok(Self {
            backend,
            options,
            page,
            log: ProductionLog::new(),
            frames: Vec::new(),
            tables: Vec::new(),
            lists: Vec::new(),
            top_level: None,
            text: String::new(),
            suppressed: 0,
        })
    }

    /// Every node created so far, in document order.
    pub fn production_log(&self) -> &ProductionLog {
        &self.log
    }

    pub fn dispatch(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Start { name, attrs } => self.on_start_tag(&name, &attrs),
            Event::Text(text) => {
                self.on_text(&text);
                Ok(())
            },
            Event::End { name } => self.on_end_tag(&name),
        }
    }

    /// Buffer character data until the next tag.
    pub fn on_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub fn on_start_tag(&mut self, name: &str, attrs: &[(String, String)]) -> Result<()> {
        self.flush_text()?;
        let name = tags::normalize(name);
        let tag = tags::lookup(&name);

        if self.suppressed > 0 {
            let tag = tag.filter(|tag| *tag == Tag::Suppressed);
            if tag.is_some() {
                self.suppressed += 1;
            }
            self.frames.push(Frame::new(name, tag));
            return Ok(());
        }

        if tag.is_some_and(Tag::is_block) {
            self.close_implicit_blocks()?;
        }

        let mut frame = Frame::new(name, tag);
        match tag {
            None => log::debug!("passing through unknown tag <{}>", frame.name),
            Some(Tag::Container) => {},
            Some(Tag::Suppressed) => self.suppressed += 1,
            Some(Tag::BulletList) => self.lists.push(ListContext { list: None }),
            Some(Tag::OrderedList) => {
                let list = self.backend.create_list(ListType::Decimal)?;
                self.lists.push(ListContext { list: Some(list) });
            },
            Some(Tag::Table) => frame.node = Some(self.open_table(attrs)?),
            Some(Tag::Row) => frame.node = self.open_row()?,
            Some(Tag::Cell { header }) => {
                frame.node = self.open_cell(attrs)?;
                if header {
                    frame.style = Some(RunFormat::bold());
                }
            },
            Some(Tag::Paragraph) => {
                frame.node = Some(self.open_paragraph(attrs, ParagraphRole::Plain)?)
            },
            Some(Tag::ListItem) => frame.node = Some(self.open_paragraph(attrs, ParagraphRole::Item)?),
            Some(Tag::Heading(level)) => {
                frame.node = Some(self.open_paragraph(attrs, ParagraphRole::Heading(level))?)
            },
            Some(Tag::Rule) => frame.node = Some(self.open_paragraph(attrs, ParagraphRole::Rule)?),
            Some(Tag::Hyperlink) => frame.node = Some(self.open_hyperlink(attrs)?),
            Some(Tag::Image) => frame.node = Some(self.insert_image(attrs)?),
            Some(Tag::Break) => self.insert_break()?,
            Some(Tag::Span) => self.open_span(&mut frame, attrs)?,
            Some(Tag::Bold) => self.open_format(&mut frame, RunFormat::bold(), Capabilities::BOLD)?,
            Some(Tag::Italic) => {
                self.open_format(&mut frame, RunFormat::italic(), Capabilities::ITALIC)?
            },
            Some(Tag::Underline) => {
                self.open_format(&mut frame, RunFormat::underline(), Capabilities::UNDERLINE)?
            },
            Some(Tag::Strike) => {
                self.open_format(&mut frame, RunFormat::strike(), Capabilities::STRIKE)?
            },
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn on_end_tag(&mut self, name: &str) -> Result<()> {
        self.flush_text()?;
        let name = tags::normalize(name);
        let Some(position) = self
            .frames
            .iter()
            .rposition(|frame| !frame.synthetic && frame.name == name)
        else {
            log::debug!("ignoring unmatched </{}>", name);
            return Ok(());
        };
        while self.frames.len() > position {
            if let Some(frame) = self.frames.pop() {
                self.close_frame(frame)?;
            }
        }
        Ok(())
    }

    /// Close whatever is still open and let the backend write the document.
    pub fn on_document_end(mut self, sink: &mut dyn Write) -> Result<()> {
        self.flush_text()?;
        while let Some(frame) = self.frames.pop() {
            self.close_frame(frame)?;
        }
        self.backend.end_document(sink)
    }

    fn close_frame(&mut self, frame: Frame) -> Result<()> {
        match frame.tag {
            Some(Tag::Suppressed) => self.suppressed = self.suppressed.saturating_sub(1),
            Some(Tag::BulletList | Tag::OrderedList) => {
                self.lists.pop();
            },
            _ => {},
        }
        let Some(id) = frame.node else {
            return Ok(());
        };
        match self.log.get(id)?.kind() {
            NodeKind::Paragraph => self.close_paragraph(id),
            NodeKind::Row => {
                if let Some(table) = self.tables.last_mut() {
                    table.finish_row(&mut *self.backend)?;
                }
                Ok(())
            },
            NodeKind::Table => self.close_table(id),
            NodeKind::Cell | NodeKind::Hyperlink | NodeKind::Image => Ok(()),
        }
    }

    /// Nodes of the open frames, innermost first.
    fn open_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.frames.iter().rev().filter_map(|frame| frame.node)
    }

    /// Is the innermost open node a table or a row (no cell)?
    fn in_table_structure(&self) -> Result<bool> {
        match self.open_nodes().next() {
            Some(id) => Ok(matches!(self.log.get(id)?.kind(), NodeKind::Table | NodeKind::Row)),
            None => Ok(false),
        }
    }

    /// Nearest open node with `capability`, not looking past a barrier.
    fn nearest_open(&self, capability: Capabilities) -> Result<Option<NodeId>> {
        for id in self.open_nodes() {
            let node = self.log.get(id)?;
            if node.can(capability) {
                return Ok(Some(id));
            }
            if node.kind().is_barrier() {
                break;
            }
        }
        Ok(None)
    }

    fn resolve(&self, capability: Capabilities) -> Result<Option<NodeId>> {
        match self.options.resolution {
            Resolution::Scoped => self.nearest_open(capability),
            Resolution::LogScan => Ok(self.log.find_last_capable(capability)),
        }
    }

    /// Paragraph that inline objects (links, pictures) attach to.
    fn resolve_paragraph(&self) -> Result<Option<NodeId>> {
        match self.options.resolution {
            Resolution::Scoped => match self.nearest_open(Capabilities::TEXT)? {
                Some(id) => {
                    let node = self.log.get(id)?;
                    Ok(if node.kind() == NodeKind::Paragraph {
                        Some(id)
                    } else {
                        node.parent
                    })
                },
                None => Ok(None),
            },
            Resolution::LogScan => Ok(self.log.find_last_kind(NodeKind::Paragraph)),
        }
    }

    /// Formatting for a run hosted by `host`.
    ///
    /// In scoped mode this layers, from the innermost barrier outwards in,
    /// every frame's scoped style and the host's own formatting at the host's
    /// depth. In log-scan mode formatting lives on the node alone.
    fn effective_format(&self, host: NodeId) -> Result<RunFormat> {
        let node = self.log.get(host)?;
        if self.options.resolution == Resolution::LogScan {
            return Ok(node.format.clone());
        }

        let mut start = 0;
        for (index, frame) in self.frames.iter().enumerate().rev() {
            if let Some(id) = frame.node {
                if self.log.get(id)?.kind().is_barrier() {
                    start = index;
                    break;
                }
            }
        }

        let mut format = RunFormat::default();
        for frame in &self.frames[start..] {
            if frame.node == Some(host) {
                format.apply(&node.format);
            }
            if let Some(ref style) = frame.style {
                format.apply(style);
            }
        }
        Ok(format)
    }

    /// Container for a new paragraph or table.
    fn block_container(&self) -> Result<Container> {
        let cell = match self.options.resolution {
            Resolution::Scoped => {
                let mut found = None;
                for id in self.open_nodes() {
                    let node = self.log.get(id)?;
                    if node.kind().is_barrier() {
                        found = Some(node.handle());
                        break;
                    }
                }
                found
            },
            Resolution::LogScan if self.top_level.is_some() => self
                .log
                .find_last_capable(Capabilities::PARAGRAPHS)
                .map(|id| self.log.get(id).map(Node::handle))
                .transpose()?,
            Resolution::LogScan => None,
        };
        match cell {
            Some(Handle::Cell(cell)) => Ok(Container::Cell(cell)),
            Some(_) => {
                log::debug!("block outside any table cell goes to the document body");
                Ok(Container::Body)
            },
            None => Ok(Container::Body),
        }
    }

    fn flush_text(&mut self) -> Result<()> {
        if self.text.is_empty() {
            return Ok(());
        }
        let text = std::mem::take(&mut self.text);
        if self.suppressed > 0 {
            return Ok(());
        }
        if self.in_table_structure()? {
            if !text.trim().is_empty() {
                log::debug!("dropping text outside any table cell: {:?}", text);
            }
            return Ok(());
        }

        let host = match self.resolve(Capabilities::TEXT)? {
            Some(host) => host,
            None if text.trim().is_empty() => return Ok(()),
            None => self.ensure_open_block()?,
        };
        let format = self.effective_format(host)?;
        let node = self.log.get_mut(host)?;
        let parent = node.parent;
        node.finalize(&mut *self.backend, &text, &format)?;
        if let Some(parent) = parent {
            self.log.get_mut(parent)?.note_run();
        }
        Ok(())
    }

    fn create_paragraph(&mut self) -> Result<NodeId> {
        let top_level = self.top_level.is_none();
        let container = self.block_container()?;
        let paragraph = self.backend.create_paragraph(container)?;
        let id = self.log.push(Node::new(Handle::Paragraph(paragraph), top_level));
        if top_level {
            self.top_level = Some(id);
        }
        Ok(id)
    }

    /// Open an implicit paragraph for inline content with no host.
    ///
    /// The paragraph's frame goes below the formatting elements that are
    /// open on top of the stack, so closing them does not close it.
    fn ensure_open_block(&mut self) -> Result<NodeId> {
        let id = self.create_paragraph()?;
        self.log.get_mut(id)?.synthetic = true;
        log::debug!("opened an implicit paragraph for dangling inline content");
        let mut index = self.frames.len();
        while index > 0 {
            let frame = &self.frames[index - 1];
            let wraps_runs = frame.node.is_none() && frame.tag.is_none_or(Tag::is_inline);
            if frame.synthetic || !wraps_runs {
                break;
            }
            index -= 1;
        }
        self.frames.insert(index, Frame::implicit(id));
        Ok(id)
    }

    /// Host paragraph for a link or picture, opening one if needed.
    fn host_paragraph(&mut self) -> Result<NodeId> {
        match self.resolve_paragraph()? {
            Some(id) => Ok(id),
            None => self.ensure_open_block(),
        }
    }

    /// Close implicit paragraphs above the innermost real element.
    ///
    /// A standalone span paragraph is closed as well; the span keeps its
    /// formatting as a scoped style for whatever follows the new block.
    fn close_implicit_blocks(&mut self) -> Result<()> {
        let mut index = self.frames.len();
        while index > 0 {
            index -= 1;
            let (synthetic, node) = match self.frames.get(index) {
                Some(frame) => (frame.synthetic, frame.node),
                None => break,
            };
            if synthetic {
                let frame = self.frames.remove(index);
                self.close_frame(frame)?;
                continue;
            }
            let Some(id) = node else {
                continue;
            };
            if self.log.get(id)?.standalone {
                self.close_paragraph(id)?;
                let format = self.log.get(id)?.format.clone();
                if let Some(frame) = self.frames.get_mut(index) {
                    frame.node = None;
                    frame.style = Some(format);
                }
                log::debug!("block inside a standalone span closes the span's paragraph");
            }
            break;
        }
        Ok(())
    }

    fn open_paragraph(&mut self, attrs: &[(String, String)], role: ParagraphRole) -> Result<NodeId> {
        let id = self.create_paragraph()?;
        let Handle::Paragraph(paragraph) = self.log.get(id)?.handle() else {
            return Err(Error::InvalidState("paragraph node without paragraph".to_string()));
        };

        let mut bullet = false;
        let mut list = None;
        let mut heading = None;
        match role {
            ParagraphRole::Plain => {},
            ParagraphRole::Heading(level) => {
                self.backend
                    .set_paragraph_style(paragraph, &format!("Heading{}", level))?;
                heading = Some(level);
            },
            ParagraphRole::Item => match self.lists.last().copied() {
                Some(ListContext { list: None }) => {
                    self.backend.set_paragraph_style(paragraph, LIST_PARAGRAPH_STYLE)?;
                    bullet = true;
                },
                Some(ListContext { list: Some(ordered) }) => {
                    let depth = self.lists.iter().filter(|ctx| ctx.list.is_some()).count() as u32;
                    self.backend.set_paragraph_style(paragraph, LIST_PARAGRAPH_STYLE)?;
                    self.backend.set_paragraph_list(
                        paragraph,
                        ordered,
                        depth.saturating_sub(1).min(MAX_LIST_LEVEL),
                    )?;
                    list = Some(ordered);
                },
                None => log::debug!("<li> outside a list becomes a plain paragraph"),
            },
            ParagraphRole::Rule => self.backend.set_paragraph_rule(paragraph)?,
        }

        let node = self.log.get_mut(id)?;
        node.bullet = bullet;
        node.list = list;
        node.heading = heading;
        if let Some(style) = attribute(attrs, "style") {
            node.format.apply(&parse_style(style).format);
        }
        Ok(id)
    }

    /// Teardown of any paragraph: one empty run if nothing was ever added.
    fn close_paragraph(&mut self, id: NodeId) -> Result<()> {
        let node = self.log.get_mut(id)?;
        if node.run_count() == 0 {
            let host = node.run_host().ok_or_else(|| {
                Error::InvalidState("paragraph node cannot hold runs".to_string())
            })?;
            self.backend.create_run(host)?;
            node.note_run();
        }
        if let Some(level) = node.heading {
            log::debug!("closed a level {} heading of {} runs", level, node.run_count());
        }
        node.standalone = false;
        if self.top_level == Some(id) {
            self.top_level = None;
        }
        Ok(())
    }

    fn open_format(&mut self, frame: &mut Frame, format: RunFormat, capability: Capabilities) -> Result<()> {
        match self.options.resolution {
            Resolution::Scoped => frame.style = Some(format),
            Resolution::LogScan => match self.log.find_last_capable(capability) {
                Some(id) => self.log.get_mut(id)?.format.apply(&format),
                None => log::debug!("nothing can take <{}> yet", frame.name),
            },
        }
        Ok(())
    }

    fn open_span(&mut self, frame: &mut Frame, attrs: &[(String, String)]) -> Result<()> {
        let mut format = RunFormat::default();
        if attribute(attrs, "class").is_some_and(has_marker_class) {
            format.highlight = Some(MARKER_HIGHLIGHT.to_string());
        }
        if let Some(style) = attribute(attrs, "style") {
            format.color = parse_style(style).format.color;
        }

        if self.top_level.is_none() {
            let id = self.create_paragraph()?;
            let node = self.log.get_mut(id)?;
            node.standalone = true;
            node.format.apply(&format);
            frame.node = Some(id);
            return Ok(());
        }

        match self.options.resolution {
            Resolution::Scoped => frame.style = Some(format),
            Resolution::LogScan => {
                if let Some(id) = self.log.find_last_kind(NodeKind::Paragraph) {
                    self.log.get_mut(id)?.format.apply(&format);
                }
            },
        }
        Ok(())
    }

    fn open_hyperlink(&mut self, attrs: &[(String, String)]) -> Result<NodeId> {
        let host = self.host_paragraph()?;
        let node = self.log.get_mut(host)?;
        node.emit_bullet(&mut *self.backend)?;
        let paragraph = node.paragraph().ok_or_else(|| {
            Error::InvalidState("hyperlink host is not a paragraph".to_string())
        })?;

        let href = attribute(attrs, "href").map(str::trim).filter(|href| !href.is_empty());
        let link = match href {
            Some(url) => Some(self.backend.create_hyperlink(paragraph, url)?),
            None => None,
        };

        let mut link_node = Node::new(Handle::Hyperlink { paragraph, link }, false);
        link_node.parent = Some(host);
        link_node.format.color = Some(HYPERLINK_COLOR.to_string());
        link_node.format.underline = link.is_some();
        Ok(self.log.push(link_node))
    }

    fn insert_image(&mut self, attrs: &[(String, String)]) -> Result<NodeId> {
        let mut size = PictureSize::default();
        if let Some(style) = attribute(attrs, "style") {
            let decl = parse_style(style);
            size.width = decl.width;
            size.height = decl.height;
        }
        for (key, slot) in [("width", &mut size.width), ("height", &mut size.height)] {
            if slot.is_none()
                && let Some(value) = attribute(attrs, key)
            {
                match Length::parse(value) {
                    Ok(len) => *slot = Some(len),
                    Err(err) => warn_attribute("img", key, &err),
                }
            }
        }
        let src = attribute(attrs, "src").unwrap_or_default();
        let picture = load_picture(src, size, self.page.content_width(), self.options)?;

        let host = self.host_paragraph()?;
        let run = self
            .log
            .get_mut(host)?
            .open_run(&mut *self.backend, &RunFormat::default())?;
        self.backend.insert_picture(run, picture)?;

        let mut image = Node::new(Handle::Image(run), false);
        image.parent = Some(host);
        Ok(self.log.push(image))
    }

    fn insert_break(&mut self) -> Result<()> {
        if self.in_table_structure()? {
            log::debug!("dropping <br> outside any table cell");
            return Ok(());
        }
        let host = match self.options.resolution {
            Resolution::Scoped => self.nearest_open(Capabilities::TEXT)?,
            Resolution::LogScan => self.log.find_last_kind(NodeKind::Paragraph),
        };
        let host = match host {
            Some(host) => host,
            None => self.ensure_open_block()?,
        };
        let node = self.log.get_mut(host)?;
        let parent = node.parent;
        let run = node.open_run(&mut *self.backend, &RunFormat::default())?;
        self.backend.add_run_break(run)?;
        if let Some(parent) = parent {
            self.log.get_mut(parent)?.note_run();
        }
        Ok(())
    }

    fn open_table(&mut self, attrs: &[(String, String)]) -> Result<NodeId> {
        let top_level = self.top_level.is_none();
        let container = self.block_container()?;
        let table = self.backend.create_table(container)?;
        let id = self.log.push(Node::new(Handle::Table(table), top_level));
        if top_level {
            self.top_level = Some(id);
        }

        let content_width = self.page.content_width();
        let mut width = None;
        for (key, value) in attrs {
            match key.to_ascii_lowercase().as_str() {
                "border" => match parse_count(value) {
                    Ok(0) => self.backend.set_table_borders(table, TableBorder::none())?,
                    Ok(size) => self.backend.set_table_borders(
                        table,
                        TableBorder {
                            style: TableBorderStyle::Single,
                            size: size.saturating_mul(4).clamp(2, 96),
                            color: BORDER_COLOR.to_string(),
                        },
                    )?,
                    Err(err) => warn_attribute("table", key, &err),
                },
                "cellpadding" => match parse_count(value) {
                    Ok(px) => self.backend.set_table_cell_margins(
                        table,
                        CellMargins::uniform(px_to_twips(f64::from(px))),
                    )?,
                    Err(err) => warn_attribute("table", key, &err),
                },
                "style" => {
                    if let Some(len) = parse_style(value).width {
                        width = Some(len.to_twips(content_width));
                    }
                },
                "width" if width.is_none() => match Length::parse(value) {
                    Ok(len) => width = Some(len.to_twips(content_width)),
                    Err(err) => warn_attribute("table", key, &err),
                },
                _ => {},
            }
        }
        if let Some(width) = width {
            self.backend.set_table_width(table, TableWidth::Dxa(width))?;
        }

        self.tables.push(TableContext {
            node: id,
            id: table,
            width: width.unwrap_or(content_width),
            merges: MergeTracker::new(),
            rows: Vec::new(),
            row: None,
        });
        Ok(id)
    }

    fn open_row(&mut self) -> Result<Option<NodeId>> {
        let Some(table) = self.tables.last_mut() else {
            log::debug!("ignoring <tr> outside a table");
            return Ok(None);
        };
        let row = table.start_row(&mut *self.backend)?;
        Ok(Some(self.log.push(Node::new(Handle::Row(row), false))))
    }

    fn open_cell(&mut self, attrs: &[(String, String)]) -> Result<Option<NodeId>> {
        let Some(table) = self.tables.last_mut() else {
            log::debug!("ignoring table cell outside a table");
            return Ok(None);
        };
        match table.open_cell(&mut *self.backend, attrs, &self.page)? {
            Some(cell) => Ok(Some(self.log.push(Node::new(Handle::Cell(cell), false)))),
            None => {
                log::debug!("ignoring table cell outside a row");
                Ok(None)
            },
        }
    }

    fn close_table(&mut self, id: NodeId) -> Result<()> {
        if let Some(index) = self.tables.iter().rposition(|table| table.node == id) {
            let mut table = self.tables.remove(index);
            table.finish_row(&mut *self.backend)?;
            table.finalize(&mut *self.backend)?;
        }
        if self.top_level == Some(id) {
            self.top_level = None;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::id::{ParagraphId, RunId};
    use crate::ooxml::docx::writer::{BlockElement, MutableDocument};
    use crate::xhtml::docx_backend::DocxBackend;

    pub(super) fn convert_events(events: Vec<Event>, options: &ConversionOptions) -> MutableDocument {
        let mut backend = DocxBackend::new();
        let mut dispatcher = Dispatcher::new(&mut backend, options).unwrap();
        for event in events {
            dispatcher.dispatch(event).unwrap();
        }
        dispatcher.on_document_end(&mut std::io::sink()).unwrap();
        backend.into_document()
    }

    pub(super) fn body_paragraphs(doc: &MutableDocument) -> Vec<ParagraphId> {
        doc.body()
            .iter()
            .filter_map(|block| match block {
                BlockElement::Paragraph(p) => Some(*p),
                BlockElement::Table(_) => None,
            })
            .collect()
    }

    pub(super) fn runs(doc: &MutableDocument, paragraph: ParagraphId) -> Vec<RunId> {
        doc.paragraph(paragraph).unwrap().runs().collect()
    }

    pub(super) fn run_text(doc: &MutableDocument, run: RunId) -> String {
        doc.run(run).unwrap().text()
    }

    #[test]
    fn test_strong_inside_paragraph() {
        let events = vec![
            Event::start("p"),
            Event::text("Hello "),
            Event::start("strong"),
            Event::text("World"),
            Event::end("strong"),
            Event::end("p"),
        ];
        for resolution in [Resolution::Scoped, Resolution::LogScan] {
            let doc = convert_events(events.clone(), &ConversionOptions::new().with_resolution(resolution));
            let paragraphs = body_paragraphs(&doc);
            assert_eq!(paragraphs.len(), 1);
            let runs = runs(&doc, paragraphs[0]);
            assert_eq!(runs.len(), 2);
            assert_eq!(run_text(&doc, runs[0]), "Hello ");
            assert_eq!(doc.run(runs[0]).unwrap().properties().bold, None);
            assert_eq!(run_text(&doc, runs[1]), "World");
            assert_eq!(doc.run(runs[1]).unwrap().properties().bold, Some(true));
        }
    }

    #[test]
    fn test_uppercase_tags_are_normalized() {
        let doc = convert_events(
            vec![Event::start("P"), Event::text("x"), Event::end("P")],
            &ConversionOptions::default(),
        );
        assert_eq!(body_paragraphs(&doc).len(), 1);
    }

    #[test]
    fn test_table_without_cells_is_finalized() {
        let doc = convert_events(
            vec![Event::start("table"), Event::text("\n"), Event::end("table")],
            &ConversionOptions::default(),
        );
        assert_eq!(doc.table_count(), 1);
        assert!(body_paragraphs(&doc).is_empty());
    }
}

#[cfg(all(test, feature = "xhtml"))]
mod markup_tests {
    use super::tests::{body_paragraphs, convert_events, run_text, runs};
    use super::*;
    use crate::common::id::{CellId, TableId};
    use crate::ooxml::docx::writer::{BlockElement, MutableDocument};
    use crate::xhtml::docx_backend::DocxBackend;
    use crate::xhtml::reader::XhtmlReader;

    fn convert(xhtml: &str, options: &ConversionOptions) -> MutableDocument {
        let events = XhtmlReader::from_str(xhtml)
            .collect::<Result<Vec<_>>>()
            .unwrap();
        convert_events(events, options)
    }

    fn scoped(xhtml: &str) -> MutableDocument {
        convert(xhtml, &ConversionOptions::default())
    }

    fn log_scan(xhtml: &str) -> MutableDocument {
        convert(xhtml, &ConversionOptions::new().with_resolution(Resolution::LogScan))
    }

    fn first_table(doc: &MutableDocument) -> TableId {
        doc.body()
            .iter()
            .find_map(|block| match block {
                BlockElement::Table(t) => Some(*t),
                BlockElement::Paragraph(_) => None,
            })
            .unwrap()
    }

    fn row_cells(doc: &MutableDocument, table: TableId, row: usize) -> Vec<CellId> {
        let row = doc.table(table).unwrap().rows()[row];
        doc.row(row).unwrap().cells().to_vec()
    }

    fn cell_text(doc: &MutableDocument, cell: CellId) -> String {
        let mut text = String::new();
        for block in &doc.cell(cell).unwrap().content {
            if let BlockElement::Paragraph(p) = block {
                for run in runs(doc, *p) {
                    text.push_str(&run_text(doc, run));
                }
            }
        }
        text
    }

    #[test]
    fn test_heading_with_color() {
        let doc = scoped(r#"<h2 style="color:#abc">Title</h2>"#);
        let paragraphs = body_paragraphs(&doc);
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(doc.paragraph(paragraphs[0]).unwrap().style(), Some("Heading2"));
        let runs = runs(&doc, paragraphs[0]);
        assert_eq!(doc.run(runs[0]).unwrap().properties().color.as_deref(), Some("aabbcc"));
    }

    #[test]
    fn test_rowspan_synthesizes_continuation() {
        let doc = scoped(
            r#"<table><tr><td rowspan="2" style="width:100px">a</td><td>b</td></tr><tr><td>c</td></tr></table>"#,
        );
        let table = first_table(&doc);
        let second = row_cells(&doc, table, 1);
        assert_eq!(second.len(), 2);

        let origin = doc.cell(row_cells(&doc, table, 0)[0]).unwrap().properties();
        let continuation = doc.cell(second[0]).unwrap().properties();
        assert_eq!(origin.v_merge, Some(VerticalMerge::Restart));
        assert_eq!(continuation.v_merge, Some(VerticalMerge::Continue));
        assert_eq!(continuation.width_dxa, origin.width_dxa);
        assert_eq!(continuation.width_dxa, Some(1557));
        assert_eq!(cell_text(&doc, second[1]), "c");
    }

    #[test]
    fn test_rowspan_continuations_in_each_covered_row() {
        let doc = scoped(
            "<table>\
             <tr><td>a</td><td rowspan=\"3\" colspan=\"2\">b</td></tr>\
             <tr><td>c</td></tr>\
             <tr><td>d</td></tr>\
             </table>",
        );
        let table = first_table(&doc);
        for row in 1..3 {
            let cells = row_cells(&doc, table, row);
            assert_eq!(cells.len(), 2, "row {}", row);
            let props = doc.cell(cells[1]).unwrap().properties();
            assert_eq!(props.v_merge, Some(VerticalMerge::Continue));
            assert_eq!(props.grid_span, Some(2));
        }
        assert_eq!(doc.table(table).unwrap().grid().len(), 3);
    }

    #[test]
    fn test_adjacent_rowspans() {
        let doc = scoped(
            "<table>\
             <tr><td rowspan=\"2\">a</td><td rowspan=\"2\">b</td><td>c</td></tr>\
             <tr><td>d</td></tr>\
             </table>",
        );
        let table = first_table(&doc);
        let cells = row_cells(&doc, table, 1);
        assert_eq!(cells.len(), 3);
        assert_eq!(cell_text(&doc, cells[2]), "d");
    }

    #[test]
    fn test_grid_widths_sum_to_table_width() {
        let doc = scoped(
            r#"<table style="width:600px"><tr><td>1</td><td>2</td><td>3</td></tr></table>"#,
        );
        let table = doc.table(first_table(&doc)).unwrap();
        assert_eq!(table.width(), TableWidth::Dxa(600 * 1557 / 100));
        let grid = table.grid();
        assert_eq!(grid.len(), 3);
        assert!(grid.iter().all(|w| *w > 0));
        assert_eq!(grid.iter().sum::<u32>(), 9342);
    }

    #[test]
    fn test_finalize_twice_is_stable() {
        let mut backend = DocxBackend::new();
        let options = ConversionOptions::default();
        let mut dispatcher = Dispatcher::new(&mut backend, &options).unwrap();
        let events = XhtmlReader::from_str(
            r#"<table><tr><td colspan="2">a</td></tr><tr><td>b</td><td>c</td></tr></table>"#,
        );
        for event in events {
            dispatcher.dispatch(event.unwrap()).unwrap();
        }
        let table = TableContext {
            node: NodeId::new(0),
            id: TableId::new(0),
            width: 9000,
            merges: MergeTracker::new(),
            rows: vec![vec![CellLayout {
                cell: CellId::new(0),
                column_span: 2,
                width: None,
            }]],
            row: None,
        };
        let first = table.finalize(&mut *dispatcher.backend).unwrap();
        let second = table.finalize(&mut *dispatcher.backend).unwrap();
        assert_eq!(first, second);
        dispatcher.on_document_end(&mut std::io::sink()).unwrap();
        let doc = backend.document();
        assert_eq!(doc.cell(CellId::new(0)).unwrap().properties().width_dxa, Some(9000));
    }

    #[test]
    fn test_header_cells_are_bold() {
        let doc = scoped("<table><tr><th>Name</th></tr></table>");
        let table = first_table(&doc);
        let cell = row_cells(&doc, table, 0)[0];
        let Some(BlockElement::Paragraph(p)) = doc.cell(cell).unwrap().content.first().copied() else {
            panic!("cell has no paragraph");
        };
        let run = runs(&doc, p)[0];
        assert_eq!(doc.run(run).unwrap().properties().bold, Some(true));
    }

    #[test]
    fn test_stray_table_text_is_dropped() {
        let doc = scoped("<table>oops<tr>nope<td>ok</td></tr></table>");
        let table = first_table(&doc);
        assert_eq!(cell_text(&doc, row_cells(&doc, table, 0)[0]), "ok");
        assert!(body_paragraphs(&doc).is_empty());
    }

    #[test]
    fn test_table_attributes() {
        let doc = scoped(r#"<table border="1" cellpadding="2"><tr><td>x</td></tr></table>"#);
        let table = doc.table(first_table(&doc)).unwrap();
        let top = table.borders().top.clone().unwrap();
        assert_eq!(top.color, BORDER_COLOR);
        assert_eq!(top.size, 4);
        assert_eq!(table.cell_margins(), Some(CellMargins::uniform(31)));

        let doc = scoped(r#"<table border="0"><tr><td>x</td></tr></table>"#);
        let table = doc.table(first_table(&doc)).unwrap();
        assert_eq!(table.borders().left, Some(TableBorder::none()));
    }

    #[test]
    fn test_bad_colspan_is_dropped() {
        let doc = scoped(r#"<table><tr><td colspan="many">x</td></tr></table>"#);
        let table = first_table(&doc);
        let cell = row_cells(&doc, table, 0)[0];
        assert_eq!(doc.cell(cell).unwrap().properties().grid_span, None);
    }

    #[test]
    fn test_huge_rowspan_is_bounded() {
        let doc = scoped(r#"<table><tr><td rowspan="4294967295">a</td><td>b</td></tr><tr><td>c</td></tr></table>"#);
        let table = first_table(&doc);
        assert_eq!(doc.table(table).unwrap().rows().len(), 2);
        let cells = row_cells(&doc, table, 1);
        assert_eq!(cells.len(), 2);
        assert_eq!(
            doc.cell(cells[0]).unwrap().properties().v_merge,
            Some(VerticalMerge::Continue)
        );
        assert_eq!(cell_text(&doc, cells[1]), "c");
    }

    #[test]
    fn test_huge_colspan_is_clamped() {
        let doc = scoped(r#"<table><tr><td colspan="20000000">a</td></tr></table>"#);
        let table = first_table(&doc);
        let cell = row_cells(&doc, table, 0)[0];
        assert_eq!(
            doc.cell(cell).unwrap().properties().grid_span,
            Some(MAX_COLUMN_SPAN)
        );
        assert_eq!(doc.table(table).unwrap().grid().len(), MAX_COLUMN_SPAN as usize);
    }

    #[test]
    fn test_nested_table_lives_in_cell() {
        let doc = scoped("<table><tr><td><table><tr><td>inner</td></tr></table></td></tr></table>");
        assert_eq!(doc.table_count(), 2);
        let outer = first_table(&doc);
        let cell = row_cells(&doc, outer, 0)[0];
        assert!(matches!(
            doc.cell(cell).unwrap().content.first(),
            Some(BlockElement::Table(_))
        ));
        assert_eq!(doc.body().len(), 1);
    }

    #[test]
    fn test_scoped_formatting_ends_at_close_tag() {
        let doc = scoped("<p>a <b>b</b> c</p>");
        let p = body_paragraphs(&doc)[0];
        let bold: Vec<Option<bool>> = runs(&doc, p)
            .into_iter()
            .map(|run| doc.run(run).unwrap().properties().bold)
            .collect();
        assert_eq!(bold, vec![None, Some(true), None]);
    }

    #[test]
    fn test_log_scan_formatting_collapses() {
        let doc = log_scan("<p>a <b>b</b> c</p>");
        let p = body_paragraphs(&doc)[0];
        let bold: Vec<Option<bool>> = runs(&doc, p)
            .into_iter()
            .map(|run| doc.run(run).unwrap().properties().bold)
            .collect();
        assert_eq!(bold, vec![None, Some(true), Some(true)]);
    }

    #[test]
    fn test_nested_formatting_composes() {
        let doc = scoped("<p><em>a<u>b<s>c</s></u></em></p>");
        let p = body_paragraphs(&doc)[0];
        let runs = runs(&doc, p);
        let last = doc.run(runs[2]).unwrap().properties();
        assert_eq!(last.italic, Some(true));
        assert!(last.underline.is_some());
        assert_eq!(last.strike, Some(true));
        assert!(doc.run(runs[0]).unwrap().properties().underline.is_none());
    }

    #[test]
    fn test_standalone_span() {
        let doc = scoped(r#"<span class="marker">note</span><p>next</p>"#);
        let paragraphs = body_paragraphs(&doc);
        assert_eq!(paragraphs.len(), 2);
        let run = runs(&doc, paragraphs[0])[0];
        assert_eq!(run_text(&doc, run), "note");
        assert_eq!(doc.run(run).unwrap().properties().highlight.as_deref(), Some("yellow"));
    }

    #[test]
    fn test_block_inside_standalone_span() {
        let doc = scoped(r#"<span style="color:#f00">a<p>b</p>c</span>"#);
        let paragraphs = body_paragraphs(&doc);
        assert_eq!(paragraphs.len(), 3);
        let texts: Vec<String> = paragraphs
            .iter()
            .map(|p| run_text(&doc, runs(&doc, *p)[0]))
            .collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
        let last = runs(&doc, paragraphs[2])[0];
        assert_eq!(doc.run(last).unwrap().properties().color.as_deref(), Some("ff0000"));
    }

    #[test]
    fn test_span_in_block_only_colours() {
        let doc = scoped(r#"<p>a<span style="color:#f00;font-weight:bold">b</span></p>"#);
        let paragraphs = body_paragraphs(&doc);
        assert_eq!(paragraphs.len(), 1);
        let runs = runs(&doc, paragraphs[0]);
        let props = doc.run(runs[1]).unwrap().properties();
        assert_eq!(props.color.as_deref(), Some("ff0000"));
        assert_eq!(props.bold, None);
    }

    #[test]
    fn test_nested_spans_overwrite() {
        let doc = scoped(r#"<p><span style="color:#f00">a<span style="color:#00f">b</span></span></p>"#);
        let p = body_paragraphs(&doc)[0];
        let runs = runs(&doc, p);
        assert_eq!(doc.run(runs[1]).unwrap().properties().color.as_deref(), Some("0000ff"));
    }

    #[test]
    fn test_paragraph_count_matches_block_tags() {
        let doc = scoped("<h1>T</h1><p>a</p><ul><li>x</li><li>y</li></ul><hr/><span>s</span>");
        assert_eq!(body_paragraphs(&doc).len(), 6);
        assert_eq!(doc.paragraph_count(), 6);
    }

    #[test]
    fn test_empty_paragraph_gets_one_run() {
        let doc = scoped("<p></p>");
        let p = body_paragraphs(&doc)[0];
        assert_eq!(runs(&doc, p).len(), 1);
    }

    #[test]
    fn test_bullet_list() {
        let doc = scoped("<ul><li>one <b>bold</b></li></ul>");
        let p = body_paragraphs(&doc)[0];
        assert_eq!(doc.paragraph(p).unwrap().style(), Some("ListParagraph"));
        assert!(doc.paragraph(p).unwrap().numbering().is_none());
        let runs = runs(&doc, p);
        assert_eq!(run_text(&doc, runs[0]), "\u{2022}   one ");
        assert_eq!(run_text(&doc, runs[1]), "bold");
    }

    #[test]
    fn test_each_ordered_list_restarts() {
        let doc = scoped("<ol><li>a</li></ol><ol><li>b</li><li>c</li></ol>");
        let paragraphs = body_paragraphs(&doc);
        let ids: Vec<u32> = paragraphs
            .iter()
            .map(|p| doc.paragraph(*p).unwrap().numbering().unwrap().num_id)
            .collect();
        assert_eq!(ids, vec![1, 2, 2]);
        assert_eq!(doc.paragraph(paragraphs[0]).unwrap().style(), Some("ListParagraph"));
    }

    #[test]
    fn test_nested_ordered_list_levels() {
        let doc = scoped("<ol><li>a<ol><li>b</li></ol></li></ol>");
        let levels: Vec<u32> = body_paragraphs(&doc)
            .iter()
            .map(|p| doc.paragraph(*p).unwrap().numbering().unwrap().ilvl)
            .collect();
        assert_eq!(levels, vec![0, 1]);
    }

    #[test]
    fn test_hyperlink() {
        let doc = scoped(r#"<p>see <a href="https://example.com">site</a></p>"#);
        let p = body_paragraphs(&doc)[0];
        let paragraph = doc.paragraph(p).unwrap();
        let link = paragraph.hyperlinks().next().unwrap();
        let link = doc.hyperlink(link).unwrap();
        assert_eq!(link.url(), "https://example.com");
        let props = doc.run(link.runs()[0]).unwrap().properties();
        assert_eq!(props.color.as_deref(), Some("0000ff"));
        assert!(props.underline.is_some());
    }

    #[test]
    fn test_anchor_without_href_is_blue_text() {
        let doc = scoped("<p><a>plain</a></p>");
        let p = body_paragraphs(&doc)[0];
        assert_eq!(doc.paragraph(p).unwrap().hyperlinks().count(), 0);
        let run = runs(&doc, p)[0];
        let props = doc.run(run).unwrap().properties();
        assert_eq!(props.color.as_deref(), Some("0000ff"));
        assert!(props.underline.is_none());
    }

    #[test]
    fn test_break_and_implicit_paragraph() {
        let doc = scoped("loose<br/>text<p>real</p>");
        let paragraphs = body_paragraphs(&doc);
        assert_eq!(paragraphs.len(), 2);
        let texts: Vec<String> = runs(&doc, paragraphs[0])
            .into_iter()
            .map(|run| run_text(&doc, run))
            .collect();
        assert_eq!(texts, vec!["loose", "", "text"]);
        assert_eq!(run_text(&doc, runs(&doc, paragraphs[1])[0]), "real");
    }

    #[test]
    fn test_inline_close_keeps_implicit_paragraph() {
        let doc = scoped("<b>Hello</b> world<p>next</p>");
        let paragraphs = body_paragraphs(&doc);
        assert_eq!(paragraphs.len(), 2);
        let first = runs(&doc, paragraphs[0]);
        let texts: Vec<String> = first.iter().map(|run| run_text(&doc, *run)).collect();
        assert_eq!(texts, vec!["Hello", " world"]);
        assert_eq!(doc.run(first[0]).unwrap().properties().bold, Some(true));
        assert_eq!(doc.run(first[1]).unwrap().properties().bold, None);
    }

    #[test]
    fn test_implicit_paragraph_spans_nested_inline_tags() {
        let doc = log_scan("<em>a<u>b</u></em>c");
        let paragraphs = body_paragraphs(&doc);
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(runs(&doc, paragraphs[0]).len(), 3);

        let doc = scoped("<em>a<u>b</u></em>c");
        let paragraphs = body_paragraphs(&doc);
        assert_eq!(paragraphs.len(), 1);
        let texts: Vec<String> = runs(&doc, paragraphs[0])
            .into_iter()
            .map(|run| run_text(&doc, run))
            .collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_whitespace_between_blocks_is_dropped() {
        let doc = scoped("<body>\n  <p>a</p>\n  <p>b</p>\n</body>");
        let paragraphs = body_paragraphs(&doc);
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(runs(&doc, paragraphs[0]).len(), 1);
    }

    #[test]
    fn test_horizontal_rule() {
        let doc = scoped("<p>a</p><hr/>");
        let paragraphs = body_paragraphs(&doc);
        assert!(doc.paragraph(paragraphs[1]).unwrap().has_bottom_border());
    }

    #[test]
    fn test_suppressed_subtrees() {
        let doc = scoped("<html><head><title>T</title><style>p {}</style></head><body><p>x</p></body></html>");
        let paragraphs = body_paragraphs(&doc);
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(run_text(&doc, runs(&doc, paragraphs[0])[0]), "x");
    }

    #[test]
    fn test_unknown_tags_are_transparent() {
        let doc = scoped("<p>a<font>b</font></p>");
        let p = body_paragraphs(&doc)[0];
        assert_eq!(runs(&doc, p).len(), 2);
    }

    #[test]
    fn test_image_in_paragraph() {
        let options = ConversionOptions::new().with_web_based_processing(true);
        let doc = convert(r#"<p><img src="file:///pics/a.png" style="width:96px;height:48px"/></p>"#, &options);
        let image = doc.image(crate::common::id::ImageId::new(0)).unwrap();
        assert!(image.data().is_empty());
        assert_eq!(image.description(), "a.png");
        assert_eq!(body_paragraphs(&doc).len(), 1);
    }

    #[test]
    fn test_unsupported_image_is_fatal() {
        let mut backend = DocxBackend::new();
        let options = ConversionOptions::default();
        let mut dispatcher = Dispatcher::new(&mut backend, &options).unwrap();
        let result = dispatcher.on_start_tag("img", &[("src".to_string(), "a.svg".to_string())]);
        assert!(matches!(result, Err(Error::UnsupportedConstruct(_))));
    }

    #[test]
    fn test_log_scan_cell_text_finds_paragraph() {
        let doc = log_scan("<table><tr><td><p>in</p></td></tr></table>");
        let table = first_table(&doc);
        assert_eq!(cell_text(&doc, row_cells(&doc, table, 0)[0]), "in");
    }

    #[test]
    fn test_production_log_order() {
        let mut backend = DocxBackend::new();
        let options = ConversionOptions::default();
        let mut dispatcher = Dispatcher::new(&mut backend, &options).unwrap();
        for event in XhtmlReader::from_str("<table><tr><td><p>x</p></td></tr></table>") {
            dispatcher.dispatch(event.unwrap()).unwrap();
        }
        let kinds: Vec<NodeKind> = dispatcher
            .production_log()
            .iter()
            .map(|(_, node)| node.kind())
            .collect();
        assert_eq!(
            kinds,
            vec![NodeKind::Table, NodeKind::Row, NodeKind::Cell, NodeKind::Paragraph]
        );
        let (_, table) = dispatcher.production_log().iter().next().unwrap();
        assert!(table.top_level);
    }
}
