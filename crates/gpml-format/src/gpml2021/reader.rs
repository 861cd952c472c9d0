//! Reader for GPML 2021.
//!
//! Annotations, citations and evidences are read before any element so that
//! references to them resolve on the spot. Group membership, aliases and
//! point links are resolved once every element exists.

use std::{collections::HashMap, mem};

use log::{debug, trace, warn};
use roxmltree::{Document, Node};

use gpml_core::{
    ElementId, PathwayModel,
    geometry::{Coordinate, RectProperty},
    model::{
        Anchor, Annotation, AnnotationRef, Author, Citation, CitationRef, Comment, DataNode,
        ElementInfo, Evidence, EvidenceRef, GraphicalLine, Group, Interaction, Label, LinePoint,
        Lined, RefHolder, Shape, Shaped, ShapedData, State,
    },
    style::{FontProperty, LineStyleProperty, ShapeStyleProperty},
    xref::{DataSourceCatalog, Xref, create_xref},
};

use crate::{
    PathwayReader,
    attributes::AttributeTable,
    error::{ConversionError, ErrorCode, Result},
    version::FormatVersion,
    xml::{child, children, error_at, model_error_at, required_child, text},
};

/// Reads GPML 2021 documents.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Gpml2021Reader;

impl PathwayReader for Gpml2021Reader {
    fn version(&self) -> FormatVersion {
        FormatVersion::Gpml2021
    }

    fn read(&self, xml: &str, catalog: &mut dyn DataSourceCatalog) -> Result<PathwayModel> {
        let document = Document::parse(xml)?;
        let root = document.root_element();
        let found = FormatVersion::of_root(root)?;
        if found != FormatVersion::Gpml2021 {
            return Err(ConversionError::UnsupportedFormat(format!(
                "expected a {} document, found {found}",
                FormatVersion::Gpml2021
            )));
        }

        let mut context = ReadContext::new(catalog);
        context.read_pathway(root)?;
        Ok(context.model)
    }
}

/// A reference by `elementId` waiting for its target to be read.
struct PendingRef<'a, 'input: 'a> {
    from: ElementId,
    target: &'a str,
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
    /// Model id of each annotation, citation and evidence, keyed by the
    /// `elementId` in the file. Entities with identical content share one id.
    entities: HashMap<&'a str, ElementId>,
    group_refs: Vec<PendingRef<'a, 'input>>,
    alias_refs: Vec<PendingRef<'a, 'input>>,
    links: Vec<PendingLink<'a>>,
}

impl<'a, 'input: 'a, 'c> ReadContext<'a, 'input, 'c> {
    fn new(catalog: &'c mut dyn DataSourceCatalog) -> Self {
        Self {
            table: AttributeTable::for_version(FormatVersion::Gpml2021),
            catalog,
            model: PathwayModel::new(),
            entities: HashMap::new(),
            group_refs: Vec::new(),
            alias_refs: Vec::new(),
            links: Vec::new(),
        }
    }

    fn read_pathway(&mut self, root: Node<'a, 'input>) -> Result<()> {
        let key = "Pathway";
        let xref = self.read_xref(root)?;
        let pathway = self.model.pathway_mut();
        pathway.set_title(self.table.require(key, "title", root)?);
        pathway.set_organism(root.attribute("organism").map(str::to_string));
        pathway.set_source(root.attribute("source").map(str::to_string));
        pathway.set_version(root.attribute("version").map(str::to_string));
        pathway.set_license(root.attribute("license").map(str::to_string));
        pathway.set_xref(xref);
        pathway.set_description(child(root, "Description").map(text));

        let graphics = required_child(root, "Graphics")?;
        let graphics_key = "Pathway.Graphics";
        let width = self.table.parse(graphics_key, "boardWidth", graphics)?;
        let height = self.table.parse(graphics_key, "boardHeight", graphics)?;
        pathway
            .set_board_size(width, height)
            .map_err(|err| model_error_at(graphics, err))?;
        pathway.set_background_color(self.table.parse(graphics_key, "backgroundColor", graphics)?);

        if let Some(authors) = child(root, "Authors") {
            for node in children(authors, "Author") {
                let mut author = Author::new(self.table.require("Author", "name", node)?);
                if let Some(full_name) = node.attribute("fullName") {
                    author = author.with_full_name(full_name);
                }
                if let Some(email) = node.attribute("email") {
                    author = author.with_email(email);
                }
                self.model.add_author(author);
            }
        }

        self.read_entities(root)?;
        self.read_info(RefHolder::Pathway, root)?;

        for node in container(root, "Groups", "Group") {
            self.read_group(node)?;
        }
        for node in container(root, "DataNodes", "DataNode") {
            self.read_data_node(node)?;
        }
        for node in container(root, "Interactions", "Interaction") {
            self.read_line(node)?;
        }
        for node in container(root, "GraphicalLines", "GraphicalLine") {
            self.read_line(node)?;
        }
        for node in container(root, "Labels", "Label") {
            self.read_label(node)?;
        }
        for node in container(root, "Shapes", "Shape") {
            self.read_shape(node)?;
        }

        self.resolve_group_refs()?;
        self.resolve_alias_refs()?;
        self.resolve_links();
        debug!(elements = self.model.len(); "Read pathway");
        Ok(())
    }

    fn read_entities(&mut self, root: Node<'a, 'input>) -> Result<()> {
        for node in container(root, "Annotations", "Annotation") {
            let key = "Annotation";
            let annotation_type = self
                .model
                .vocabulary_mut()
                .annotation_types
                .register(self.table.require(key, "type", node)?);
            let mut annotation = Annotation::new(self.table.require(key, "value", node)?, annotation_type)
                .with_element_id(self.element_id(key, node)?);
            if let Some(xref) = self.read_xref(node)? {
                annotation = annotation.with_xref(xref);
            }
            if let Some(url) = read_url(node)? {
                annotation = annotation.with_url(url);
            }
            let id = self
                .model
                .add_annotation(annotation)
                .map_err(|err| model_error_at(node, err))?;
            self.register_entity(node, id)?;
        }

        for node in container(root, "Citations", "Citation") {
            let mut citation = Citation::new().with_element_id(self.element_id("Citation", node)?);
            if let Some(xref) = self.read_xref(node)? {
                citation = citation.with_xref(xref);
            }
            if let Some(url) = read_url(node)? {
                citation = citation.with_url(url);
            }
            let id = self
                .model
                .add_citation(citation)
                .map_err(|err| model_error_at(node, err))?;
            self.register_entity(node, id)?;
        }

        for node in container(root, "Evidences", "Evidence") {
            let mut evidence = Evidence::new().with_element_id(self.element_id("Evidence", node)?);
            if let Some(value) = node.attribute("value") {
                evidence = evidence.with_value(value);
            }
            if let Some(xref) = self.read_xref(node)? {
                evidence = evidence.with_xref(xref);
            }
            if let Some(url) = read_url(node)? {
                evidence = evidence.with_url(url);
            }
            let id = self
                .model
                .add_evidence(evidence)
                .map_err(|err| model_error_at(node, err))?;
            self.register_entity(node, id)?;
        }

        debug!(entities = self.entities.len(); "Read annotations, citations and evidences");
        Ok(())
    }

    fn register_entity(&mut self, node: Node<'a, 'input>, id: ElementId) -> Result<()> {
        let file_id = self.table.require(node.tag_name().name(), "elementId", node)?;
        if self.entities.insert(file_id, id).is_some() {
            return Err(error_at(
                node,
                ErrorCode::E202,
                format!("elementId `{file_id}` is already in use"),
            ));
        }
        trace!(file_id, id:% = id; "Read entity");
        Ok(())
    }

    /// Comments, properties and references of `node`.
    fn read_info(&mut self, holder: RefHolder, node: Node<'a, 'input>) -> Result<()> {
        for comment in children(node, "Comment") {
            let mut entry = Comment::new(text(comment));
            if let Some(source) = comment.attribute("source") {
                entry = entry.with_source(source);
            }
            self.info_mut(holder, node)?.add_comment(entry);
        }

        for property in children(node, "Property") {
            let key = self.table.require("Property", "key", property)?;
            let value = self.table.require("Property", "value", property)?;
            self.info_mut(holder, node)?.set_property(key, value);
        }

        for ref_node in children(node, "AnnotationRef") {
            let annotation_ref = self.read_annotation_ref(ref_node)?;
            self.model
                .add_annotation_ref(holder, annotation_ref)
                .map_err(|err| model_error_at(ref_node, err))?;
        }
        for ref_node in children(node, "CitationRef") {
            let citation_ref = self.read_citation_ref(ref_node)?;
            self.model
                .add_citation_ref(holder, citation_ref)
                .map_err(|err| model_error_at(ref_node, err))?;
        }
        for ref_node in children(node, "EvidenceRef") {
            let evidence_ref = EvidenceRef::new(self.entity(ref_node)?);
            self.model
                .add_evidence_ref(holder, evidence_ref)
                .map_err(|err| model_error_at(ref_node, err))?;
        }
        Ok(())
    }

    fn info_mut(&mut self, holder: RefHolder, node: Node<'a, 'input>) -> Result<&mut ElementInfo> {
        self.model
            .info_of_mut(holder)
            .map_err(|err| model_error_at(node, err))
    }

    fn read_annotation_ref(&self, node: Node<'a, 'input>) -> Result<AnnotationRef> {
        let mut annotation_ref = AnnotationRef::new(self.entity(node)?);
        for citation in children(node, "CitationRef") {
            annotation_ref = annotation_ref.with_citation_ref(self.read_citation_ref(citation)?);
        }
        for evidence in children(node, "EvidenceRef") {
            annotation_ref = annotation_ref.with_evidence_ref(EvidenceRef::new(self.entity(evidence)?));
        }
        Ok(annotation_ref)
    }

    fn read_citation_ref(&self, node: Node<'a, 'input>) -> Result<CitationRef> {
        let mut citation_ref = CitationRef::new(self.entity(node)?);
        for annotation in children(node, "AnnotationRef") {
            citation_ref = citation_ref.with_annotation_ref(self.read_annotation_ref(annotation)?);
        }
        Ok(citation_ref)
    }

    /// Model id of the entity named by the `elementRef` of `node`.
    fn entity(&self, node: Node<'a, 'input>) -> Result<ElementId> {
        let target = self.table.require(node.tag_name().name(), "elementRef", node)?;
        self.entities.get(target).copied().ok_or_else(|| {
            error_at(node, ErrorCode::E200, format!("unknown reference `{target}`"))
        })
    }

    fn element_id(&self, key: &str, node: Node<'a, 'input>) -> Result<ElementId> {
        Ok(ElementId::new(self.table.require(key, "elementId", node)?))
    }

    fn defer_group_ref(&mut self, from: ElementId, node: Node<'a, 'input>) {
        if let Some(target) = node.attribute("groupRef") {
            self.group_refs.push(PendingRef { from, target, node });
        }
    }

    fn read_group(&mut self, node: Node<'a, 'input>) -> Result<()> {
        let key = "Group";
        let graphics_key = "Group.Graphics";
        let group_type = self
            .model
            .vocabulary_mut()
            .group_types
            .register(self.table.require(key, "type", node)?);

        let graphics = required_child(node, "Graphics")?;
        let mut group = Group::new(group_type)
            .with_element_id(self.element_id(key, node)?)
            .with_rect(self.read_rect(graphics_key, graphics)?);
        if let Some(text_label) = node.attribute("textLabel") {
            group = group.with_text_label(text_label);
        }
        if let Some(xref) = self.read_xref(node)? {
            group = group.with_xref(xref);
        }
        self.read_shaped_style(graphics_key, graphics, group.shaped_mut())?;

        let id = self
            .model
            .add_group(group)
            .map_err(|err| model_error_at(node, err))?;
        trace!(id:% = id; "Read group");
        self.read_info(id.into(), node)?;
        self.defer_group_ref(id, node);
        Ok(())
    }

    fn read_data_node(&mut self, node: Node<'a, 'input>) -> Result<()> {
        let key = "DataNode";
        let graphics_key = "DataNode.Graphics";
        let text_label = self.table.require(key, "textLabel", node)?;
        let data_node_type = self
            .model
            .vocabulary_mut()
            .data_node_types
            .register(self.table.require(key, "type", node)?);

        let graphics = required_child(node, "Graphics")?;
        let mut data_node = DataNode::new(text_label, data_node_type)
            .with_element_id(self.element_id(key, node)?)
            .with_rect(self.read_rect(graphics_key, graphics)?);
        if let Some(xref) = self.read_xref(node)? {
            data_node = data_node.with_xref(xref);
        }
        self.read_shaped_style(graphics_key, graphics, data_node.shaped_mut())?;

        let id = self
            .model
            .add_data_node(data_node)
            .map_err(|err| model_error_at(node, err))?;
        trace!(id:% = id, text_label; "Read data node");

        for state in container(node, "States", "State") {
            self.read_state(id, state)?;
        }
        self.read_info(id.into(), node)?;
        self.defer_group_ref(id, node);
        if let Some(target) = node.attribute("aliasRef") {
            self.alias_refs.push(PendingRef { from: id, target, node });
        }
        Ok(())
    }

    fn read_state(&mut self, owner: ElementId, node: Node<'a, 'input>) -> Result<()> {
        let key = "State";
        let graphics_key = "State.Graphics";
        let state_type = self
            .model
            .vocabulary_mut()
            .state_types
            .register(self.table.require(key, "type", node)?);

        let graphics = required_child(node, "Graphics")?;
        let rel_x = self.table.parse(graphics_key, "relX", graphics)?;
        let rel_y = self.table.parse(graphics_key, "relY", graphics)?;
        let width = self.table.parse(graphics_key, "width", graphics)?;
        let height = self.table.parse(graphics_key, "height", graphics)?;
        let mut state = State::new(self.table.require(key, "textLabel", node)?, state_type)
            .with_element_id(self.element_id(key, node)?)
            .with_relative_position(rel_x, rel_y)
            .and_then(|state| state.with_size(width, height))
            .map_err(|err| model_error_at(graphics, err))?;
        if let Some(xref) = self.read_xref(node)? {
            state = state.with_xref(xref);
        }
        read_font(self.table, graphics_key, graphics, state.font_mut())?;
        self.read_shape_style(graphics_key, graphics, state.shape_style_mut())?;

        let id = self
            .model
            .add_state(owner, state)
            .map_err(|err| model_error_at(node, err))?;
        self.read_info(id.into(), node)
    }

    fn read_line(&mut self, node: Node<'a, 'input>) -> Result<()> {
        let key = node.tag_name().name();
        let graphics_key = format!("{key}.Graphics");
        let graphics = required_child(node, "Graphics")?;
        let mut line_style = LineStyleProperty::new();
        self.read_line_style(&graphics_key, graphics, &mut line_style)?;

        let waypoints = required_child(node, "Waypoints")?;
        let mut points = Vec::new();
        let mut links = Vec::new();
        for point_node in children(waypoints, "Point") {
            let position = Coordinate::new(
                self.table.parse("Point", "x", point_node)?,
                self.table.parse("Point", "y", point_node)?,
            );
            let arrow_head = self
                .model
                .vocabulary_mut()
                .arrow_heads
                .register(self.table.require("Point", "arrowHead", point_node)?);
            let point_id = self.element_id("Point", point_node)?;
            if let Some(target) = point_node.attribute("elementRef") {
                let rel_x = self.table.parse_optional("Point", "relX", point_node)?;
                let rel_y = self.table.parse_optional("Point", "relY", point_node)?;
                links.push(PendingLink {
                    point: point_id,
                    target,
                    rel_x: rel_x.unwrap_or(0.0),
                    rel_y: rel_y.unwrap_or(0.0),
                });
            }
            points.push(
                LinePoint::new(position)
                    .with_element_id(point_id)
                    .with_arrow_head(arrow_head),
            );
        }

        let line_id = self.element_id(key, node)?;
        let added = if key == "Interaction" {
            let mut interaction = Interaction::new().with_element_id(line_id);
            if let Some(xref) = self.read_xref(node)? {
                interaction = interaction.with_xref(xref);
            }
            *interaction.line_mut().line_style_mut() = line_style;
            self.model.add_interaction(interaction, points)
        } else {
            let mut line = GraphicalLine::new().with_element_id(line_id);
            *line.line_mut().line_style_mut() = line_style;
            self.model.add_graphical_line(line, points)
        };
        let id = added.map_err(|err| model_error_at(node, err))?;
        self.links.extend(links);

        for anchor_node in children(waypoints, "Anchor") {
            let position = self.table.parse("Anchor", "position", anchor_node)?;
            let shape_type = self
                .model
                .vocabulary_mut()
                .anchor_shapes
                .register(self.table.require("Anchor", "shapeType", anchor_node)?);
            let anchor = Anchor::new(position)
                .map_err(|err| model_error_at(anchor_node, err))?
                .with_shape_type(shape_type)
                .with_element_id(self.element_id("Anchor", anchor_node)?);
            self.model
                .add_anchor(id, anchor)
                .map_err(|err| model_error_at(anchor_node, err))?;
        }

        trace!(id:% = id, kind = key; "Read line");
        self.read_info(id.into(), node)?;
        self.defer_group_ref(id, node);
        Ok(())
    }

    fn read_label(&mut self, node: Node<'a, 'input>) -> Result<()> {
        let key = "Label";
        let graphics_key = "Label.Graphics";
        let graphics = required_child(node, "Graphics")?;
        let mut label = Label::new(self.table.require(key, "textLabel", node)?)
            .with_element_id(self.element_id(key, node)?)
            .with_rect(self.read_rect(graphics_key, graphics)?);
        if let Some(href) = node.attribute("href") {
            label = label.with_href(href);
        }
        self.read_shaped_style(graphics_key, graphics, label.shaped_mut())?;

        let id = self
            .model
            .add_label(label)
            .map_err(|err| model_error_at(node, err))?;
        self.read_info(id.into(), node)?;
        self.defer_group_ref(id, node);
        Ok(())
    }

    fn read_shape(&mut self, node: Node<'a, 'input>) -> Result<()> {
        let key = "Shape";
        let graphics_key = "Shape.Graphics";
        let graphics = required_child(node, "Graphics")?;
        let mut shape = Shape::new()
            .with_element_id(self.element_id(key, node)?)
            .with_rect(self.read_rect(graphics_key, graphics)?)
            .with_rotation(self.table.parse(graphics_key, "rotation", graphics)?);
        if let Some(text_label) = node.attribute("textLabel") {
            shape = shape.with_text_label(text_label);
        }
        self.read_shaped_style(graphics_key, graphics, shape.shaped_mut())?;

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
            self.table.parse(key, "centerX", graphics)?,
            self.table.parse(key, "centerY", graphics)?,
        );
        let width = self.table.parse(key, "width", graphics)?;
        let height = self.table.parse(key, "height", graphics)?;
        RectProperty::new(center, width, height).map_err(|err| model_error_at(graphics, err))
    }

    fn read_shaped_style(
        &mut self,
        key: &str,
        graphics: Node<'a, 'input>,
        shaped: &mut ShapedData,
    ) -> Result<()> {
        read_font(self.table, key, graphics, shaped.font_mut())?;
        self.read_shape_style(key, graphics, shaped.shape_style_mut())
    }

    fn read_shape_style(
        &mut self,
        key: &str,
        graphics: Node<'a, 'input>,
        style: &mut ShapeStyleProperty,
    ) -> Result<()> {
        let vocabulary = self.model.vocabulary_mut();
        style.set_border_color(self.table.parse(key, "borderColor", graphics)?);
        style.set_border_style(
            vocabulary
                .line_styles
                .register(self.table.require(key, "borderStyle", graphics)?),
        );
        style
            .set_border_width(self.table.parse(key, "borderWidth", graphics)?)
            .map_err(|err| model_error_at(graphics, err))?;
        style.set_fill_color(self.table.parse(key, "fillColor", graphics)?);
        style.set_shape_type(
            vocabulary
                .shape_types
                .register(self.table.require(key, "shapeType", graphics)?),
        );
        style.set_z_order(self.table.parse_optional(key, "zOrder", graphics)?);
        Ok(())
    }

    fn read_line_style(
        &mut self,
        key: &str,
        graphics: Node<'a, 'input>,
        style: &mut LineStyleProperty,
    ) -> Result<()> {
        style.set_line_color(self.table.parse(key, "lineColor", graphics)?);
        style.set_line_style(
            self.model
                .vocabulary_mut()
                .line_styles
                .register(self.table.require(key, "lineStyle", graphics)?),
        );
        style
            .set_line_width(self.table.parse(key, "lineWidth", graphics)?)
            .map_err(|err| model_error_at(graphics, err))?;
        style.set_connector_type(self.table.parse(key, "connectorType", graphics)?);
        style.set_z_order(self.table.parse_optional(key, "zOrder", graphics)?);
        Ok(())
    }

    /// The `Xref` child of `node`, or `None` when absent or its identifier
    /// is blank.
    fn read_xref(&mut self, node: Node<'a, 'input>) -> Result<Option<Xref>> {
        let Some(xref) = child(node, "Xref") else {
            return Ok(None);
        };
        let identifier = self.table.require("Xref", "identifier", xref)?.trim();
        let data_source = self.table.require("Xref", "dataSource", xref)?;
        if identifier.is_empty() {
            return Ok(None);
        }
        Ok(create_xref(identifier, data_source, &mut *self.catalog))
    }

    fn resolve_group_refs(&mut self) -> Result<()> {
        for pending in mem::take(&mut self.group_refs) {
            let group = ElementId::new(pending.target);
            if self.model.group(group).is_none() {
                warn!(
                    member:% = pending.from,
                    group_ref = pending.target;
                    "Unresolved groupRef, leaving element ungrouped"
                );
                continue;
            }
            self.model
                .set_group_ref(pending.from, group)
                .map_err(|err| model_error_at(pending.node, err))?;
        }
        Ok(())
    }

    fn resolve_alias_refs(&mut self) -> Result<()> {
        for pending in mem::take(&mut self.alias_refs) {
            let target = ElementId::new(pending.target);
            if !self.model.has_pathway_object(target) {
                warn!(alias:% = pending.from, alias_ref = pending.target; "Unresolved aliasRef, skipping");
                continue;
            }
            self.model
                .set_alias_ref(pending.from, Some(target))
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
                    "Unresolved elementRef, leaving point unlinked"
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

/// Children named `item` of the `name` container under `node`.
fn container<'a, 'input>(
    node: Node<'a, 'input>,
    name: &str,
    item: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    child(node, name)
        .into_iter()
        .flat_map(move |container| children(container, item))
}

fn read_url(node: Node<'_, '_>) -> Result<Option<String>> {
    let Some(url) = child(node, "Url") else {
        return Ok(None);
    };
    let link = url.attribute("link").ok_or_else(|| {
        error_at(url, ErrorCode::E100, "missing required attribute `link`")
    })?;
    Ok(Some(link.to_string()))
}

fn read_font(
    table: &AttributeTable,
    key: &str,
    graphics: Node<'_, '_>,
    font: &mut FontProperty,
) -> Result<()> {
    font.set_text_color(table.parse(key, "textColor", graphics)?);
    font.set_font_name(table.require(key, "fontName", graphics)?);
    font.set_bold(table.require(key, "fontWeight", graphics)? == "Bold");
    font.set_italic(table.require(key, "fontStyle", graphics)? == "Italic");
    font.set_underline(table.require(key, "fontDecoration", graphics)? == "Underline");
    font.set_strikethru(table.require(key, "fontStrikethru", graphics)? == "Strikethru");
    font.set_size(table.parse(key, "fontSize", graphics)?);
    font.set_h_align(table.parse(key, "hAlign", graphics)?);
    font.set_v_align(table.parse(key, "vAlign", graphics)?);
    Ok(())
}
