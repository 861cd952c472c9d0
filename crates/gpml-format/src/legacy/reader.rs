//! Reader for GPML 2013a and 2017.
//!
//! Every `GraphId` in the document is reserved before any element is created,
//! so generated ids never collide with declared ones. Elements are created in
//! document order per kind, groups first. Group
//! membership, BiopaxRef citations and point links are collected while
//! reading and resolved once every element exists, point links last so that
//! a point may refer to an anchor of any line.

use std::{collections::HashMap, mem};

use log::{debug, trace, warn};
use roxmltree::{Document, Node};

use gpml_core::{
    ElementId, PathwayModel,
    geometry::{Coordinate, RectProperty},
    model::{
        Anchor, Annotation, Author, Citation, CitationRef, Comment, DataNode, ElementInfo,
        GraphicalLine, Group, Interaction, Label, LinePoint, Lined, RefHolder, Shape, Shaped,
        ShapedData, State,
    },
    style::{FontProperty, LineStyleProperty, ShapeStyleProperty},
    vocabulary::{AnnotationType, LineStyleType},
    xref::{DataSourceCatalog, Xref, create_xref},
};

use super::{PATHWAY_PROPERTY_ATTRIBUTES, tokens};
use crate::{
    PathwayReader,
    attributes::AttributeTable,
    error::{ConversionError, ErrorCode, Result},
    version::FormatVersion,
    xml::{child, children, element_path, error_at, model_error_at, required_child, text},
};

/// Reads GPML 2013a or 2017 documents.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LegacyReader {
    version: FormatVersion,
}

impl LegacyReader {
    pub(crate) fn new(version: FormatVersion) -> Self {
        Self { version }
    }
}

impl PathwayReader for LegacyReader {
    fn version(&self) -> FormatVersion {
        self.version
    }

    fn read(&self, xml: &str, catalog: &mut dyn DataSourceCatalog) -> Result<PathwayModel> {
        let document = Document::parse(xml)?;
        let root = document.root_element();
        let found = FormatVersion::of_root(root)?;
        if found != self.version {
            return Err(ConversionError::UnsupportedFormat(format!(
                "expected a {} document, found {found}",
                self.version
            )));
        }

        let mut context = ReadContext::new(catalog);
        context.read_pathway(root)?;
        Ok(context.model)
    }
}

#[derive(Debug, Clone, Copy)]
enum LineKind {
    Interaction,
    GraphicalLine,
}

impl LineKind {
    fn graphics_key(self) -> &'static str {
        match self {
            Self::Interaction => "Interaction.Graphics",
            Self::GraphicalLine => "GraphicalLine.Graphics",
        }
    }
}

struct PendingGroupRef<'a, 'input: 'a> {
    member: ElementId,
    group_id: &'a str,
    node: Node<'a, 'input>,
}

struct PendingCitationRef<'a, 'input: 'a> {
    holder: RefHolder,
    biopax_id: String,
    node: Node<'a, 'input>,
}

struct PendingLink<'a> {
    point: ElementId,
    target: &'a str,
    rel_x: f64,
    rel_y: f64,
}

struct ReadContext<'a, 'input: 'a, 'c> {
    table: &'static AttributeTable,
    catalog: &'c mut dyn DataSourceCatalog,
    model: PathwayModel,
    /// `GroupId` of each group, the key members refer to.
    group_ids: HashMap<&'a str, ElementId>,
    /// `rdf:id` of each publication.
    citations: HashMap<String, ElementId>,
    group_refs: Vec<PendingGroupRef<'a, 'input>>,
    citation_refs: Vec<PendingCitationRef<'a, 'input>>,
    links: Vec<PendingLink<'a>>,
}

impl<'a, 'input: 'a, 'c> ReadContext<'a, 'input, 'c> {
    fn new(catalog: &'c mut dyn DataSourceCatalog) -> Self {
        Self {
            table: AttributeTable::for_version(FormatVersion::Gpml2013a),
            catalog,
            model: PathwayModel::new(),
            group_ids: HashMap::new(),
            citations: HashMap::new(),
            group_refs: Vec::new(),
            citation_refs: Vec::new(),
            links: Vec::new(),
        }
    }

    fn read_pathway(&mut self, root: Node<'a, 'input>) -> Result<()> {
        let key = "Pathway";
        let pathway = self.model.pathway_mut();
        pathway.set_title(self.table.require(key, "Name", root)?);
        pathway.set_organism(root.attribute("Organism").map(str::to_string));
        pathway.set_source(root.attribute("Data-Source").map(str::to_string));
        pathway.set_version(root.attribute("Version").map(str::to_string));
        pathway.set_license(root.attribute("License").map(str::to_string));

        let graphics = required_child(root, "Graphics")?;
        let width = self.table.parse("Pathway.Graphics", "BoardWidth", graphics)?;
        let height = self.table.parse("Pathway.Graphics", "BoardHeight", graphics)?;
        pathway
            .set_board_size(width, height)
            .map_err(|err| model_error_at(graphics, err))?;
        if let Some(info_box) = child(root, "InfoBox") {
            let center = Coordinate::new(
                self.table.parse("InfoBox", "CenterX", info_box)?,
                self.table.parse("InfoBox", "CenterY", info_box)?,
            );
            pathway.set_info_box(center);
        }

        if let Some(authors) = root.attribute("Author") {
            for name in authors.split(',').map(str::trim).filter(|name| !name.is_empty()) {
                self.model.add_author(Author::new(name));
            }
        }
        self.read_info(RefHolder::Pathway, root)?;
        for name in PATHWAY_PROPERTY_ATTRIBUTES {
            if let Some(value) = root.attribute(name) {
                self.model.pathway_mut().info_mut().set_property(name, value);
            }
        }

        // Elements without a GraphId must not be given one declared later.
        self.model
            .reserve_element_ids(root.descendants().filter_map(graph_id));

        for node in children(root, "Group") {
            self.read_group(node)?;
        }
        for node in children(root, "DataNode") {
            self.read_data_node(node)?;
        }
        for node in children(root, "State") {
            self.read_state(node)?;
        }
        for node in children(root, "Interaction") {
            self.read_line(node, LineKind::Interaction)?;
        }
        for node in children(root, "GraphicalLine") {
            self.read_line(node, LineKind::GraphicalLine)?;
        }
        for node in children(root, "Label") {
            self.read_label(node)?;
        }
        for node in children(root, "Shape") {
            self.read_shape(node)?;
        }
        if let Some(biopax) = child(root, "Biopax") {
            self.read_biopax(biopax)?;
        }

        self.resolve_group_refs()?;
        self.resolve_citation_refs()?;
        self.resolve_links();
        self.model.release_reserved_ids();
        debug!(elements = self.model.len(); "Read legacy pathway");
        Ok(())
    }

    /// Comments, dynamic properties and BiopaxRefs of `node`.
    fn read_info(&mut self, holder: RefHolder, node: Node<'a, 'input>) -> Result<()> {
        for comment in children(node, "Comment") {
            let body = text(comment);
            let source = comment.attribute("Source");
            if holder == RefHolder::Pathway
                && source == Some(tokens::DESCRIPTION_SOURCE)
                && self.model.pathway().description().is_none()
            {
                self.model.pathway_mut().set_description(Some(body));
                continue;
            }

            let mut comment = Comment::new(body);
            if let Some(source) = source {
                comment = comment.with_source(source);
            }
            self.info_mut(holder, node)?.add_comment(comment);
        }

        for attribute in children(node, "Attribute") {
            let key = self.table.require("Attribute", "Key", attribute)?;
            let value = self.table.require("Attribute", "Value", attribute)?;
            if key == tokens::DOUBLE_LINE_PROPERTY {
                continue;
            }
            self.info_mut(holder, node)?.set_property(key, value);
        }

        for biopax_ref in children(node, "BiopaxRef") {
            self.citation_refs.push(PendingCitationRef {
                holder,
                biopax_id: text(biopax_ref).trim().to_string(),
                node: biopax_ref,
            });
        }
        Ok(())
    }

    fn info_mut(
        &mut self,
        holder: RefHolder,
        node: Node<'a, 'input>,
    ) -> Result<&mut ElementInfo> {
        self.model
            .info_of_mut(holder)
            .map_err(|err| model_error_at(node, err))
    }

    fn defer_group_ref(&mut self, member: ElementId, node: Node<'a, 'input>) {
        if let Some(group_id) = node.attribute("GroupRef") {
            self.group_refs.push(PendingGroupRef {
                member,
                group_id,
                node,
            });
        }
    }

    fn read_group(&mut self, node: Node<'a, 'input>) -> Result<()> {
        let key = "Group";
        let group_id = self.table.require(key, "GroupId", node)?;
        let style = self.table.require(key, "Style", node)?;
        let group_type =
            tokens::group_type_from_legacy(style, &mut self.model.vocabulary_mut().group_types);

        let mut group = Group::new(group_type);
        if let Some(id) = graph_id(node) {
            group = group.with_element_id(id);
        }
        if let Some(text_label) = node.attribute("TextLabel") {
            group = group.with_text_label(text_label);
        }
        let id = self
            .model
            .add_group(group)
            .map_err(|err| model_error_at(node, err))?;
        if self.group_ids.insert(group_id, id).is_some() {
            return Err(error_at(
                node,
                ErrorCode::E202,
                format!("GroupId `{group_id}` is already in use"),
            ));
        }
        trace!(group_id, id:% = id; "Read group");

        self.read_info(id.into(), node)?;
        self.defer_group_ref(id, node);
        Ok(())
    }

    fn read_data_node(&mut self, node: Node<'a, 'input>) -> Result<()> {
        let key = "DataNode";
        let graphics_key = "DataNode.Graphics";
        let text_label = self.table.require(key, "TextLabel", node)?;
        let data_node_type = tokens::data_node_type_from_legacy(
            self.table.require(key, "Type", node)?,
            &mut self.model.vocabulary_mut().data_node_types,
        );

        let graphics = required_child(node, "Graphics")?;
        let mut data_node =
            DataNode::new(text_label, data_node_type).with_rect(self.read_rect(graphics_key, graphics)?);
        if let Some(id) = graph_id(node) {
            data_node = data_node.with_element_id(id);
        }
        if let Some(xref) = self.read_xref(node)? {
            data_node = data_node.with_xref(xref);
        }
        self.read_shaped_style(graphics_key, node, graphics, data_node.shaped_mut())?;

        let id = self
            .model
            .add_data_node(data_node)
            .map_err(|err| model_error_at(node, err))?;
        trace!(id:% = id, text_label; "Read data node");
        self.read_info(id.into(), node)?;
        self.defer_group_ref(id, node);
        Ok(())
    }

    fn read_state(&mut self, node: Node<'a, 'input>) -> Result<()> {
        let key = "State";
        let graphics_key = "State.Graphics";
        let owner = ElementId::new(self.table.require(key, "GraphRef", node)?);
        let state_type = self
            .model
            .vocabulary_mut()
            .state_types
            .register(self.table.require(key, "StateType", node)?);

        let graphics = required_child(node, "Graphics")?;
        let rel_x = self.table.parse(graphics_key, "RelX", graphics)?;
        let rel_y = self.table.parse(graphics_key, "RelY", graphics)?;
        let width = self.table.parse(graphics_key, "Width", graphics)?;
        let height = self.table.parse(graphics_key, "Height", graphics)?;
        let mut state = State::new(self.table.require(key, "TextLabel", node)?, state_type)
            .with_relative_position(rel_x, rel_y)
            .and_then(|state| state.with_size(width, height))
            .map_err(|err| model_error_at(graphics, err))?;
        if let Some(id) = graph_id(node) {
            state = state.with_element_id(id);
        }
        if let Some(xref) = self.read_xref(node)? {
            state = state.with_xref(xref);
        }
        read_font(self.table, graphics_key, graphics, state.font_mut())?;
        self.read_shape_style(
            graphics_key,
            graphics,
            state.shape_style_mut(),
            has_double_line(node),
        )?;

        // The owner must be a data node read earlier.
        let id = self
            .model
            .add_state(owner, state)
            .map_err(|err| model_error_at(node, err))?;
        self.read_info(id.into(), node)
    }

    fn read_line(&mut self, node: Node<'a, 'input>, kind: LineKind) -> Result<()> {
        let graphics_key = kind.graphics_key();
        let graphics = required_child(node, "Graphics")?;
        let mut line_style = LineStyleProperty::new();
        self.read_line_style(graphics_key, node, graphics, &mut line_style)?;

        let mut points = Vec::new();
        let mut links = Vec::new();
        for (index, point_node) in children(graphics, "Point").enumerate() {
            let position = Coordinate::new(
                self.table.parse("Point", "X", point_node)?,
                self.table.parse("Point", "Y", point_node)?,
            );
            let arrow_head = tokens::arrow_head_from_legacy(
                self.table.require("Point", "ArrowHead", point_node)?,
                &mut self.model.vocabulary_mut().arrow_heads,
            );
            let mut point = LinePoint::new(position).with_arrow_head(arrow_head);
            if let Some(id) = graph_id(point_node) {
                point = point.with_element_id(id);
            }
            if let Some(target) = point_node.attribute("GraphRef") {
                let rel_x = self.table.parse_optional("Point", "RelX", point_node)?;
                let rel_y = self.table.parse_optional("Point", "RelY", point_node)?;
                links.push((index, target, rel_x.unwrap_or(0.0), rel_y.unwrap_or(0.0)));
            }
            points.push(point);
        }

        let added = match kind {
            LineKind::Interaction => {
                let mut interaction = Interaction::new();
                if let Some(id) = graph_id(node) {
                    interaction = interaction.with_element_id(id);
                }
                if let Some(xref) = self.read_xref(node)? {
                    interaction = interaction.with_xref(xref);
                }
                *interaction.line_mut().line_style_mut() = line_style;
                self.model.add_interaction(interaction, points)
            }
            LineKind::GraphicalLine => {
                let mut line = GraphicalLine::new();
                if let Some(id) = graph_id(node) {
                    line = line.with_element_id(id);
                }
                *line.line_mut().line_style_mut() = line_style;
                self.model.add_graphical_line(line, points)
            }
        };
        let id = added.map_err(|err| model_error_at(node, err))?;

        let point_ids = self
            .model
            .line_data(id)
            .map_err(|err| model_error_at(node, err))?
            .points()
            .to_vec();
        for (index, target, rel_x, rel_y) in links {
            if let Some(&point) = point_ids.get(index) {
                self.links.push(PendingLink {
                    point,
                    target,
                    rel_x,
                    rel_y,
                });
            }
        }

        for anchor_node in children(graphics, "Anchor") {
            let position = self.table.parse("Anchor", "Position", anchor_node)?;
            let shape_type = self
                .model
                .vocabulary_mut()
                .anchor_shapes
                .register(self.table.require("Anchor", "Shape", anchor_node)?);
            let mut anchor = Anchor::new(position)
                .map_err(|err| model_error_at(anchor_node, err))?
                .with_shape_type(shape_type);
            if let Some(anchor_id) = graph_id(anchor_node) {
                anchor = anchor.with_element_id(anchor_id);
            }
            self.model
                .add_anchor(id, anchor)
                .map_err(|err| model_error_at(anchor_node, err))?;
        }

        trace!(id:% = id, kind:? = kind; "Read line");
        self.read_info(id.into(), node)?;
        self.defer_group_ref(id, node);
        Ok(())
    }

    fn read_label(&mut self, node: Node<'a, 'input>) -> Result<()> {
        let graphics_key = "Label.Graphics";
        let graphics = required_child(node, "Graphics")?;
        let mut label = Label::new(self.table.require("Label", "TextLabel", node)?)
            .with_rect(self.read_rect(graphics_key, graphics)?);
        if let Some(id) = graph_id(node) {
            label = label.with_element_id(id);
        }
        if let Some(href) = node.attribute("Href") {
            label = label.with_href(href);
        }
        self.read_shaped_style(graphics_key, node, graphics, label.shaped_mut())?;

        let id = self
            .model
            .add_label(label)
            .map_err(|err| model_error_at(node, err))?;
        self.read_info(id.into(), node)?;
        self.defer_group_ref(id, node);
        Ok(())
    }

    fn read_shape(&mut self, node: Node<'a, 'input>) -> Result<()> {
        let graphics_key = "Shape.Graphics";
        let graphics = required_child(node, "Graphics")?;
        let rotation = self.table.require(graphics_key, "Rotation", graphics)?;
        let rotation = tokens::parse_rotation(rotation)
            .map_err(|message| error_at(graphics, ErrorCode::E101, message))?;

        let mut shape = Shape::new()
            .with_rect(self.read_rect(graphics_key, graphics)?)
            .with_rotation(rotation);
        if let Some(id) = graph_id(node) {
            shape = shape.with_element_id(id);
        }
        if let Some(text_label) = node.attribute("TextLabel") {
            shape = shape.with_text_label(text_label);
        }
        self.read_shaped_style(graphics_key, node, graphics, shape.shaped_mut())?;

        let id = self
            .model
            .add_shape(shape)
            .map_err(|err| model_error_at(node, err))?;
        self.read_info(id.into(), node)?;
        self.defer_group_ref(id, node);
        Ok(())
    }

    fn read_rect(&self, key: &str, graphics: Node<'a, 'input>) -> Result<RectProperty> {
        let center = Coordinate::new(
            self.table.parse(key, "CenterX", graphics)?,
            self.table.parse(key, "CenterY", graphics)?,
        );
        let width = self.table.parse(key, "Width", graphics)?;
        let height = self.table.parse(key, "Height", graphics)?;
        RectProperty::new(center, width, height).map_err(|err| model_error_at(graphics, err))
    }

    fn read_shaped_style(
        &mut self,
        key: &str,
        node: Node<'a, 'input>,
        graphics: Node<'a, 'input>,
        shaped: &mut ShapedData,
    ) -> Result<()> {
        read_font(self.table, key, graphics, shaped.font_mut())?;
        self.read_shape_style(key, graphics, shaped.shape_style_mut(), has_double_line(node))
    }

    /// Border, fill and outline. The single `Color` attribute is both the
    /// text and the border color.
    fn read_shape_style(
        &mut self,
        key: &str,
        graphics: Node<'a, 'input>,
        style: &mut ShapeStyleProperty,
        double: bool,
    ) -> Result<()> {
        style.set_border_color(self.table.parse(key, "Color", graphics)?);
        let border_style = if double {
            LineStyleType::Double
        } else {
            tokens::line_style_from_legacy(self.table.require(key, "LineStyle", graphics)?)
        };
        style.set_border_style(border_style);
        style
            .set_border_width(self.table.parse(key, "LineThickness", graphics)?)
            .map_err(|err| model_error_at(graphics, err))?;
        style.set_fill_color(self.table.parse(key, "FillColor", graphics)?);
        style.set_z_order(self.table.parse_optional(key, "ZOrder", graphics)?);

        // Last, since deprecated compartment shapes restyle the border.
        let shape_type = self.table.require(key, "ShapeType", graphics)?;
        tokens::apply_legacy_shape(
            shape_type,
            style,
            &mut self.model.vocabulary_mut().shape_types,
        );
        Ok(())
    }

    fn read_line_style(
        &self,
        key: &str,
        node: Node<'a, 'input>,
        graphics: Node<'a, 'input>,
        style: &mut LineStyleProperty,
    ) -> Result<()> {
        style.set_line_color(self.table.parse(key, "Color", graphics)?);
        style
            .set_line_width(self.table.parse(key, "LineThickness", graphics)?)
            .map_err(|err| model_error_at(graphics, err))?;
        let line_style = if has_double_line(node) {
            LineStyleType::Double
        } else {
            tokens::line_style_from_legacy(self.table.require(key, "LineStyle", graphics)?)
        };
        style.set_line_style(line_style);
        style.set_connector_type(self.table.parse(key, "ConnectorType", graphics)?);
        style.set_z_order(self.table.parse_optional(key, "ZOrder", graphics)?);
        Ok(())
    }

    fn read_xref(&mut self, node: Node<'a, 'input>) -> Result<Option<Xref>> {
        let Some(xref) = child(node, "Xref") else {
            return Ok(None);
        };
        let identifier = self.table.require("Xref", "ID", xref)?;
        let database = self.table.require("Xref", "Database", xref)?;
        Ok(self.xref(identifier, database))
    }

    /// An xref, or `None` when either part is blank.
    fn xref(&mut self, identifier: &str, database: &str) -> Option<Xref> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return None;
        }
        create_xref(identifier, database, &mut *self.catalog)
    }

    fn read_biopax(&mut self, biopax: Node<'a, 'input>) -> Result<()> {
        for entry in biopax.children().filter(Node::is_element) {
            match entry.tag_name().name() {
                "PublicationXref" => self.read_publication(entry)?,
                "openControlledVocabulary" => self.read_ontology_term(entry)?,
                other => debug!(element = other; "Skipping Biopax entry"),
            }
        }
        Ok(())
    }

    fn read_publication(&mut self, entry: Node<'a, 'input>) -> Result<()> {
        let rdf_id = entry
            .attributes()
            .find(|attribute| attribute.name().eq_ignore_ascii_case("id"))
            .map(|attribute| attribute.value());
        let Some(rdf_id) = rdf_id else {
            warn!(path:% = element_path(entry); "Skipping publication without rdf:id");
            return Ok(());
        };

        let identifier = child(entry, "ID").map(text).unwrap_or_default();
        let database = child(entry, "DB").map(text).unwrap_or_default();
        let mut citation = Citation::new();
        if let Some(xref) = self.xref(&identifier, &database) {
            citation = citation.with_xref(xref);
        }
        let id = self
            .model
            .add_citation(citation)
            .map_err(|err| model_error_at(entry, err))?;
        trace!(rdf_id, id:% = id; "Read publication");
        self.citations.insert(rdf_id.to_string(), id);
        Ok(())
    }

    fn read_ontology_term(&mut self, entry: Node<'a, 'input>) -> Result<()> {
        let term = child(entry, "TERM").map(text).unwrap_or_default();
        let identifier = child(entry, "ID").map(text).unwrap_or_default();
        let ontology = child(entry, "Ontology").map(text).unwrap_or_default();

        let mut annotation = Annotation::new(term.trim(), AnnotationType::Ontology);
        if let Some(xref) = self.xref(&identifier, &ontology) {
            annotation = annotation.with_xref(xref);
        }
        self.model
            .annotate(RefHolder::Pathway, annotation)
            .map_err(|err| model_error_at(entry, err))?;
        Ok(())
    }

    fn resolve_group_refs(&mut self) -> Result<()> {
        for pending in mem::take(&mut self.group_refs) {
            let Some(&group) = self.group_ids.get(pending.group_id) else {
                warn!(
                    member:% = pending.member,
                    group_ref = pending.group_id;
                    "Unresolved GroupRef, leaving element ungrouped"
                );
                continue;
            };
            self.model
                .set_group_ref(pending.member, group)
                .map_err(|err| model_error_at(pending.node, err))?;
        }
        Ok(())
    }

    fn resolve_citation_refs(&mut self) -> Result<()> {
        for pending in mem::take(&mut self.citation_refs) {
            let Some(&citation) = self.citations.get(&pending.biopax_id) else {
                warn!(biopax_ref = pending.biopax_id.as_str(); "Unresolved BiopaxRef, skipping");
                continue;
            };
            let info = self
                .model
                .info_of(pending.holder)
                .map_err(|err| model_error_at(pending.node, err))?;
            if info
                .citation_refs()
                .iter()
                .any(|citation_ref| citation_ref.citation() == citation)
            {
                continue;
            }
            self.model
                .add_citation_ref(pending.holder, CitationRef::new(citation))
                .map_err(|err| model_error_at(pending.node, err))?;
        }
        Ok(())
    }

    /// Links points in place, keeping the coordinates stored in the file.
    fn resolve_links(&mut self) {
        for link in mem::take(&mut self.links) {
            let target = ElementId::new(link.target);
            if !self.model.has_pathway_object(target) {
                warn!(
                    point:% = link.point,
                    target = link.target;
                    "Unresolved GraphRef, leaving point unlinked"
                );
                continue;
            }
            if let Err(err) = self
                .model
                .link_in_place(link.point, target, link.rel_x, link.rel_y)
            {
                warn!(point:% = link.point, err:% = err; "Cannot link point");
            }
        }
    }
}

fn graph_id(node: Node<'_, '_>) -> Option<ElementId> {
    node.attribute("GraphId").map(ElementId::new)
}

fn has_double_line(node: Node<'_, '_>) -> bool {
    children(node, "Attribute").any(|attribute| {
        attribute.attribute("Key") == Some(tokens::DOUBLE_LINE_PROPERTY)
            && attribute.attribute("Value") == Some(tokens::DOUBLE_LINE_VALUE)
    })
}

fn read_font(
    table: &AttributeTable,
    key: &str,
    graphics: Node<'_, '_>,
    font: &mut FontProperty,
) -> Result<()> {
    font.set_text_color(table.parse(key, "Color", graphics)?);
    font.set_font_name(table.require(key, "FontName", graphics)?);
    font.set_bold(table.require(key, "FontWeight", graphics)? == "Bold");
    font.set_italic(table.require(key, "FontStyle", graphics)? == "Italic");
    font.set_underline(table.require(key, "FontDecoration", graphics)? == "Underline");
    font.set_strikethru(table.require(key, "FontStrikethru", graphics)? == "Strikethru");
    font.set_size(table.parse(key, "FontSize", graphics)?);
    font.set_h_align(table.parse(key, "Align", graphics)?);
    font.set_v_align(table.parse(key, "Valign", graphics)?);
    Ok(())
}
