//! Writer for GPML 2021.

use quick_xml::{Writer, events::BytesStart};

use gpml_core::{
    ElementId, PathwayModel,
    geometry::RectProperty,
    model::{
        AnnotationRef, CitationRef, DataNode, ElementInfo, EvidenceRef, GraphicalLine, Group,
        Groupable, HasElementInfo, Interaction, Label, LineData, Lined, Shape, Shaped, ShapedData,
        State,
    },
    style::{FontProperty, ShapeStyleProperty},
    xref::{Xref, xref_data_source_str},
};

use crate::{
    PathwayWriter,
    attributes::AttributeTable,
    error::{ConversionError, ErrorCode, Result},
    version::FormatVersion,
    xml::{
        XmlWriter, into_string, new_writer, write_declaration, write_empty, write_open,
        write_start, write_tag, write_tag_end, write_tag_with_attrs,
    },
};

/// Writes GPML 2021 documents.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Gpml2021Writer;

impl PathwayWriter for Gpml2021Writer {
    fn version(&self) -> FormatVersion {
        FormatVersion::Gpml2021
    }

    fn write(&self, model: &PathwayModel, indent: usize) -> Result<String> {
        let mut context = WriteContext {
            table: AttributeTable::for_version(FormatVersion::Gpml2021),
            model,
            writer: new_writer(indent),
        };
        context.write_pathway()?;
        into_string(context.writer)
    }
}

struct WriteContext<'m> {
    table: &'static AttributeTable,
    model: &'m PathwayModel,
    writer: Writer<XmlWriter>,
}

impl<'m> WriteContext<'m> {
    fn write_pathway(&mut self) -> Result<()> {
        let model = self.model;
        let pathway = model.pathway();
        let key = "Pathway";

        write_declaration(&mut self.writer)?;
        let mut root = BytesStart::new("Pathway");
        root.push_attribute(("xmlns", FormatVersion::Gpml2021.namespace()));
        self.table.set(key, "title", &mut root, pathway.title());
        self.table
            .set_optional(key, "organism", &mut root, pathway.organism());
        self.table
            .set_optional(key, "source", &mut root, pathway.source());
        self.table
            .set_optional(key, "version", &mut root, pathway.version());
        self.table
            .set_optional(key, "license", &mut root, pathway.license());
        write_start(&mut self.writer, root)?;

        self.write_xref("/Pathway", pathway.xref())?;
        if let Some(description) = pathway.description() {
            write_tag(&mut self.writer, "Description", description)?;
        }
        if !model.authors().is_empty() {
            write_start(&mut self.writer, BytesStart::new("Authors"))?;
            for author in model.authors() {
                let mut elem = BytesStart::new("Author");
                self.table.set("Author", "name", &mut elem, author.name());
                self.table
                    .set_optional("Author", "fullName", &mut elem, author.full_name());
                self.table
                    .set_optional("Author", "email", &mut elem, author.email());
                write_empty(&mut self.writer, elem)?;
            }
            write_tag_end(&mut self.writer, "Authors")?;
        }
        self.write_info(pathway.info())?;

        let graphics_key = "Pathway.Graphics";
        let mut graphics = BytesStart::new("Graphics");
        self.table
            .set_float(graphics_key, "boardWidth", &mut graphics, pathway.board_width());
        self.table
            .set_float(graphics_key, "boardHeight", &mut graphics, pathway.board_height());
        self.table.set(
            graphics_key,
            "backgroundColor",
            &mut graphics,
            &pathway.background_color().to_hex(),
        );
        write_empty(&mut self.writer, graphics)?;

        self.write_container("DataNodes", model.data_nodes(), Self::write_data_node)?;
        self.write_container("Interactions", model.interactions(), Self::write_interaction)?;
        self.write_container(
            "GraphicalLines",
            model.graphical_lines(),
            Self::write_graphical_line,
        )?;
        self.write_container("Labels", model.labels(), Self::write_label)?;
        self.write_container("Shapes", model.shapes(), Self::write_shape)?;
        self.write_container("Groups", model.groups(), Self::write_group)?;
        self.write_entities()?;

        write_tag_end(&mut self.writer, "Pathway")
    }

    /// Writes `items` inside a `tag` container, or nothing when empty.
    fn write_container<'x, T: 'x>(
        &mut self,
        tag: &str,
        items: impl Iterator<Item = &'x T>,
        write_item: fn(&mut Self, &T) -> Result<()>,
    ) -> Result<()> {
        let mut items = items.peekable();
        if items.peek().is_none() {
            return Ok(());
        }
        write_start(&mut self.writer, BytesStart::new(tag))?;
        for item in items {
            write_item(self, item)?;
        }
        write_tag_end(&mut self.writer, tag)
    }

    fn write_info(&mut self, info: &ElementInfo) -> Result<()> {
        for comment in info.comments() {
            match comment.source() {
                Some(source) => write_tag_with_attrs(
                    &mut self.writer,
                    "Comment",
                    comment.text(),
                    &[("source", source)],
                )?,
                None => write_tag(&mut self.writer, "Comment", comment.text())?,
            }
        }
        for (key, value) in info.properties() {
            let mut elem = BytesStart::new("Property");
            self.table.set("Property", "key", &mut elem, key);
            self.table.set("Property", "value", &mut elem, value);
            write_empty(&mut self.writer, elem)?;
        }
        for annotation_ref in info.annotation_refs() {
            self.write_annotation_ref(annotation_ref)?;
        }
        for citation_ref in info.citation_refs() {
            self.write_citation_ref(citation_ref)?;
        }
        for evidence_ref in info.evidence_refs() {
            self.write_evidence_ref(evidence_ref)?;
        }
        Ok(())
    }

    fn write_annotation_ref(&mut self, annotation_ref: &AnnotationRef) -> Result<()> {
        let tag = "AnnotationRef";
        let mut elem = BytesStart::new(tag);
        self.table
            .set(tag, "elementRef", &mut elem, &annotation_ref.annotation().as_string());
        let has_content =
            !annotation_ref.citation_refs().is_empty() || !annotation_ref.evidence_refs().is_empty();
        write_open(&mut self.writer, elem, has_content)?;
        if !has_content {
            return Ok(());
        }
        for citation_ref in annotation_ref.citation_refs() {
            self.write_citation_ref(citation_ref)?;
        }
        for evidence_ref in annotation_ref.evidence_refs() {
            self.write_evidence_ref(evidence_ref)?;
        }
        write_tag_end(&mut self.writer, tag)
    }

    fn write_citation_ref(&mut self, citation_ref: &CitationRef) -> Result<()> {
        let tag = "CitationRef";
        let mut elem = BytesStart::new(tag);
        self.table
            .set(tag, "elementRef", &mut elem, &citation_ref.citation().as_string());
        let has_content = !citation_ref.annotation_refs().is_empty();
        write_open(&mut self.writer, elem, has_content)?;
        if !has_content {
            return Ok(());
        }
        for annotation_ref in citation_ref.annotation_refs() {
            self.write_annotation_ref(annotation_ref)?;
        }
        write_tag_end(&mut self.writer, tag)
    }

    fn write_evidence_ref(&mut self, evidence_ref: &EvidenceRef) -> Result<()> {
        let mut elem = BytesStart::new("EvidenceRef");
        self.table.set(
            "EvidenceRef",
            "elementRef",
            &mut elem,
            &evidence_ref.evidence().as_string(),
        );
        write_empty(&mut self.writer, elem)
    }

    fn write_xref(&mut self, owner: &str, xref: Option<&Xref>) -> Result<()> {
        let Some(xref) = xref else {
            return Ok(());
        };
        let data_source = xref_data_source_str(xref)
            .map_err(|err| ConversionError::document(ErrorCode::E400, owner, err.to_string()))?;
        let mut elem = BytesStart::new("Xref");
        self.table
            .set("Xref", "identifier", &mut elem, xref.identifier());
        self.table.set("Xref", "dataSource", &mut elem, data_source);
        write_empty(&mut self.writer, elem)
    }

    fn write_url(&mut self, url: Option<&str>) -> Result<()> {
        let Some(url) = url else {
            return Ok(());
        };
        let mut elem = BytesStart::new("Url");
        self.table.set("Url", "link", &mut elem, url);
        write_empty(&mut self.writer, elem)
    }

    /// Start tag with `elementId` and, for groupable elements, `groupRef`.
    fn element_start(&self, key: &'static str, id: ElementId) -> BytesStart<'static> {
        let mut elem = BytesStart::new(key);
        self.table.set(key, "elementId", &mut elem, &id.as_string());
        elem
    }

    fn set_group_ref(&self, key: &str, elem: &mut BytesStart<'_>, group: Option<ElementId>) {
        if let Some(group) = group {
            self.table.set(key, "groupRef", elem, &group.as_string());
        }
    }

    fn write_data_node(&mut self, data_node: &DataNode) -> Result<()> {
        let model = self.model;
        let key = "DataNode";
        let id = element_id(key, data_node.element_id())?;
        let mut elem = self.element_start(key, id);
        self.table
            .set(key, "textLabel", &mut elem, data_node.text_label());
        self.table
            .set(key, "type", &mut elem, data_node.data_node_type().name());
        self.set_group_ref(key, &mut elem, data_node.group_ref());
        if let Some(alias) = data_node.alias_ref() {
            self.table.set(key, "aliasRef", &mut elem, &alias.as_string());
        }
        write_start(&mut self.writer, elem)?;

        self.write_xref(&path(key, id), data_node.xref())?;
        if !data_node.states().is_empty() {
            write_start(&mut self.writer, BytesStart::new("States"))?;
            for &state_id in data_node.states() {
                let state = model.state(state_id).ok_or_else(|| {
                    ConversionError::document(
                        ErrorCode::E401,
                        path("State", state_id),
                        format!("state of data node `{id}` is missing"),
                    )
                })?;
                self.write_state(state)?;
            }
            write_tag_end(&mut self.writer, "States")?;
        }
        self.write_shaped_graphics(
            "DataNode.Graphics",
            data_node.shaped().rect(),
            data_node.shaped(),
        )?;
        self.write_info(data_node.info())?;
        write_tag_end(&mut self.writer, key)
    }

    fn write_state(&mut self, state: &State) -> Result<()> {
        let key = "State";
        let graphics_key = "State.Graphics";
        let id = element_id(key, state.element_id())?;
        let mut elem = self.element_start(key, id);
        self.table.set(key, "textLabel", &mut elem, state.text_label());
        self.table
            .set(key, "type", &mut elem, state.state_type().name());
        write_start(&mut self.writer, elem)?;

        self.write_xref(&path(key, id), state.xref())?;
        let mut graphics = BytesStart::new("Graphics");
        self.table
            .set_float(graphics_key, "relX", &mut graphics, state.rel_x());
        self.table
            .set_float(graphics_key, "relY", &mut graphics, state.rel_y());
        self.table
            .set_float(graphics_key, "width", &mut graphics, state.width());
        self.table
            .set_float(graphics_key, "height", &mut graphics, state.height());
        self.set_font(graphics_key, state.font(), &mut graphics);
        self.set_shape_style(graphics_key, state.shape_style(), &mut graphics);
        write_empty(&mut self.writer, graphics)?;
        self.write_info(state.info())?;
        write_tag_end(&mut self.writer, key)
    }

    fn write_interaction(&mut self, interaction: &Interaction) -> Result<()> {
        let id = element_id("Interaction", interaction.element_id())?;
        self.write_line("Interaction", id, interaction, interaction.xref())
    }

    fn write_graphical_line(&mut self, line: &GraphicalLine) -> Result<()> {
        let id = element_id("GraphicalLine", line.element_id())?;
        self.write_line("GraphicalLine", id, line, None)
    }

    fn write_line<L>(
        &mut self,
        key: &'static str,
        id: ElementId,
        element: &L,
        xref: Option<&Xref>,
    ) -> Result<()>
    where
        L: Lined + HasElementInfo + Groupable,
    {
        let line = element.line();
        let mut elem = self.element_start(key, id);
        self.set_group_ref(key, &mut elem, element.group_ref());
        write_start(&mut self.writer, elem)?;

        self.write_xref(&path(key, id), xref)?;
        self.write_waypoints(id, line)?;

        let graphics_key = format!("{key}.Graphics");
        let style = line.line_style();
        let mut graphics = BytesStart::new("Graphics");
        self.table
            .set(&graphics_key, "lineColor", &mut graphics, &style.line_color().to_hex());
        self.table
            .set(&graphics_key, "lineStyle", &mut graphics, style.line_style().name());
        self.table
            .set_float(&graphics_key, "lineWidth", &mut graphics, style.line_width());
        self.table.set(
            &graphics_key,
            "connectorType",
            &mut graphics,
            style.connector_type().as_str(),
        );
        self.table.set_optional(
            &graphics_key,
            "zOrder",
            &mut graphics,
            style.z_order().map(|z| z.to_string()).as_deref(),
        );
        write_empty(&mut self.writer, graphics)?;

        self.write_info(element.info())?;
        write_tag_end(&mut self.writer, key)
    }

    fn write_waypoints(&mut self, id: ElementId, line: &LineData) -> Result<()> {
        let model = self.model;
        write_start(&mut self.writer, BytesStart::new("Waypoints"))?;
        for &point_id in line.points() {
            let point = model.point(point_id).ok_or_else(|| {
                ConversionError::document(
                    ErrorCode::E401,
                    path("Point", point_id),
                    format!("point of line `{id}` is missing"),
                )
            })?;
            let mut elem = self.element_start("Point", point_id);
            self.table
                .set_float("Point", "x", &mut elem, point.position().x());
            self.table
                .set_float("Point", "y", &mut elem, point.position().y());
            if let Some(target) = point.element_ref() {
                self.table
                    .set("Point", "elementRef", &mut elem, &target.as_string());
                self.table
                    .set_float("Point", "relX", &mut elem, point.rel_x());
                self.table
                    .set_float("Point", "relY", &mut elem, point.rel_y());
            }
            self.table
                .set("Point", "arrowHead", &mut elem, point.arrow_head().name());
            write_empty(&mut self.writer, elem)?;
        }

        for &anchor_id in line.anchors() {
            let anchor = model.anchor(anchor_id).ok_or_else(|| {
                ConversionError::document(
                    ErrorCode::E401,
                    path("Anchor", anchor_id),
                    format!("anchor of line `{id}` is missing"),
                )
            })?;
            let mut elem = self.element_start("Anchor", anchor_id);
            self.table
                .set_float("Anchor", "position", &mut elem, anchor.position());
            self.table
                .set("Anchor", "shapeType", &mut elem, anchor.shape_type().name());
            write_empty(&mut self.writer, elem)?;
        }
        write_tag_end(&mut self.writer, "Waypoints")
    }

    fn write_label(&mut self, label: &Label) -> Result<()> {
        let key = "Label";
        let id = element_id(key, label.element_id())?;
        let mut elem = self.element_start(key, id);
        self.table.set(key, "textLabel", &mut elem, label.text_label());
        self.table.set_optional(key, "href", &mut elem, label.href());
        self.set_group_ref(key, &mut elem, label.group_ref());
        write_start(&mut self.writer, elem)?;

        self.write_shaped_graphics("Label.Graphics", label.shaped().rect(), label.shaped())?;
        self.write_info(label.info())?;
        write_tag_end(&mut self.writer, key)
    }

    fn write_shape(&mut self, shape: &Shape) -> Result<()> {
        let key = "Shape";
        let graphics_key = "Shape.Graphics";
        let id = element_id(key, shape.element_id())?;
        let mut elem = self.element_start(key, id);
        self.table
            .set_optional(key, "textLabel", &mut elem, shape.text_label());
        self.set_group_ref(key, &mut elem, shape.group_ref());
        write_start(&mut self.writer, elem)?;

        let mut graphics = self.shaped_graphics(graphics_key, shape.shaped().rect(), shape.shaped());
        self.table
            .set_float(graphics_key, "rotation", &mut graphics, shape.rotation());
        write_empty(&mut self.writer, graphics)?;
        self.write_info(shape.info())?;
        write_tag_end(&mut self.writer, key)
    }

    /// Groups are written with the bounds of their members.
    fn write_group(&mut self, group: &Group) -> Result<()> {
        let key = "Group";
        let id = element_id(key, group.element_id())?;
        let mut elem = self.element_start(key, id);
        self.table
            .set_optional(key, "textLabel", &mut elem, group.text_label());
        self.table
            .set(key, "type", &mut elem, group.group_type().name());
        self.set_group_ref(key, &mut elem, group.group_ref());
        write_start(&mut self.writer, elem)?;

        self.write_xref(&path(key, id), group.xref())?;
        let bounds = self.model.group_bounds(id)?;
        let rect = RectProperty::new(bounds.center(), bounds.width(), bounds.height())?;
        self.write_shaped_graphics("Group.Graphics", &rect, group.shaped())?;
        self.write_info(group.info())?;
        write_tag_end(&mut self.writer, key)
    }

    fn write_entities(&mut self) -> Result<()> {
        let model = self.model;
        if model.annotations().next().is_some() {
            write_start(&mut self.writer, BytesStart::new("Annotations"))?;
            for annotation in model.annotations() {
                let key = "Annotation";
                let id = element_id(key, annotation.element_id())?;
                let mut elem = self.element_start(key, id);
                self.table.set(key, "value", &mut elem, annotation.value());
                self.table
                    .set(key, "type", &mut elem, annotation.annotation_type().name());
                self.write_source_entity(key, id, elem, annotation.xref(), annotation.url())?;
            }
            write_tag_end(&mut self.writer, "Annotations")?;
        }

        if model.citations().next().is_some() {
            write_start(&mut self.writer, BytesStart::new("Citations"))?;
            for citation in model.citations() {
                let id = element_id("Citation", citation.element_id())?;
                let elem = self.element_start("Citation", id);
                self.write_source_entity("Citation", id, elem, citation.xref(), citation.url())?;
            }
            write_tag_end(&mut self.writer, "Citations")?;
        }

        if model.evidences().next().is_some() {
            write_start(&mut self.writer, BytesStart::new("Evidences"))?;
            for evidence in model.evidences() {
                let key = "Evidence";
                let id = element_id(key, evidence.element_id())?;
                let mut elem = self.element_start(key, id);
                self.table
                    .set_optional(key, "value", &mut elem, evidence.value());
                self.write_source_entity(key, id, elem, evidence.xref(), evidence.url())?;
            }
            write_tag_end(&mut self.writer, "Evidences")?;
        }
        Ok(())
    }

    /// An annotation, citation or evidence with its optional `Xref` and `Url`.
    fn write_source_entity(
        &mut self,
        key: &str,
        id: ElementId,
        elem: BytesStart<'_>,
        xref: Option<&Xref>,
        url: Option<&str>,
    ) -> Result<()> {
        let has_content = xref.is_some() || url.is_some();
        write_open(&mut self.writer, elem, has_content)?;
        if !has_content {
            return Ok(());
        }
        self.write_xref(&path(key, id), xref)?;
        self.write_url(url)?;
        write_tag_end(&mut self.writer, key)
    }

    fn write_shaped_graphics(&mut self, key: &str, rect: &RectProperty, shaped: &ShapedData) -> Result<()> {
        let graphics = self.shaped_graphics(key, rect, shaped);
        write_empty(&mut self.writer, graphics)
    }

    fn shaped_graphics(&self, key: &str, rect: &RectProperty, shaped: &ShapedData) -> BytesStart<'static> {
        let mut graphics = BytesStart::new("Graphics");
        self.table
            .set_float(key, "centerX", &mut graphics, rect.center().x());
        self.table
            .set_float(key, "centerY", &mut graphics, rect.center().y());
        self.table.set_float(key, "width", &mut graphics, rect.width());
        self.table
            .set_float(key, "height", &mut graphics, rect.height());
        self.set_font(key, shaped.font(), &mut graphics);
        self.set_shape_style(key, shaped.shape_style(), &mut graphics);
        graphics
    }

    fn set_font(&self, key: &str, font: &FontProperty, elem: &mut BytesStart<'_>) {
        let table = self.table;
        table.set(key, "textColor", elem, &font.text_color().to_hex());
        table.set(key, "fontName", elem, font.font_name());
        table.set(key, "fontWeight", elem, flag(font.bold(), "Bold"));
        table.set(key, "fontStyle", elem, flag(font.italic(), "Italic"));
        table.set(key, "fontDecoration", elem, flag(font.underline(), "Underline"));
        table.set(key, "fontStrikethru", elem, flag(font.strikethru(), "Strikethru"));
        table.set(key, "fontSize", elem, &font.size().to_string());
        table.set(key, "hAlign", elem, font.h_align().as_str());
        table.set(key, "vAlign", elem, font.v_align().as_str());
    }

    fn set_shape_style(&self, key: &str, style: &ShapeStyleProperty, elem: &mut BytesStart<'_>) {
        let table = self.table;
        table.set(key, "borderColor", elem, &style.border_color().to_hex());
        table.set(key, "borderStyle", elem, style.border_style().name());
        table.set_float(key, "borderWidth", elem, style.border_width());
        table.set(key, "fillColor", elem, &style.fill_color().to_hex());
        table.set(key, "shapeType", elem, style.shape_type().name());
        table.set_optional(
            key,
            "zOrder",
            elem,
            style.z_order().map(|z| z.to_string()).as_deref(),
        );
    }
}

fn flag(on: bool, token: &'static str) -> &'static str {
    if on { token } else { "Normal" }
}

fn path(kind: &str, id: ElementId) -> String {
    format!("/Pathway//{kind}[@elementId='{id}']")
}

fn element_id(kind: &str, id: Option<ElementId>) -> Result<ElementId> {
    id.ok_or_else(|| {
        ConversionError::document(
            ErrorCode::E401,
            format!("/Pathway//{kind}"),
            "element has no id",
        )
    })
}
