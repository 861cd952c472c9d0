//! Writer for GPML 2013a and 2017.

use log::{debug, warn};
use quick_xml::{Writer, events::BytesStart};

use gpml_core::{
    ElementId, PathwayModel,
    color::Color,
    model::{
        Author, DataNode, ElementInfo, Group, Groupable, HasElementInfo, Label, LineData, Lined,
        RefHolder, Shape, Shaped, ShapedData, State,
    },
    style::{FontProperty, ShapeStyleProperty},
    vocabulary::{AnnotationType, LineStyleType},
    xref::{Xref, xref_legacy_data_source_str},
};

use super::{BIOPAX_NAMESPACE, PATHWAY_PROPERTY_ATTRIBUTES, RDF_NAMESPACE, tokens};
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

/// Writes GPML 2013a or 2017 documents.
///
/// Features the flat layout cannot carry (alias refs, evidences, annotations
/// of elements other than the pathway, group styles, the pathway xref) are
/// dropped with a warning.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LegacyWriter {
    version: FormatVersion,
}

impl LegacyWriter {
    pub(crate) fn new(version: FormatVersion) -> Self {
        Self { version }
    }
}

impl PathwayWriter for LegacyWriter {
    fn version(&self) -> FormatVersion {
        self.version
    }

    fn write(&self, model: &PathwayModel, indent: usize) -> Result<String> {
        let mut context = WriteContext {
            version: self.version,
            table: AttributeTable::for_version(self.version),
            model,
            writer: new_writer(indent),
        };
        context.write_pathway()?;
        into_string(context.writer)
    }
}

struct WriteContext<'m> {
    version: FormatVersion,
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
        root.push_attribute(("xmlns", self.version.namespace()));
        self.table.set(key, "Name", &mut root, pathway.title());
        self.table
            .set_optional(key, "Organism", &mut root, pathway.organism());
        self.table
            .set_optional(key, "Data-Source", &mut root, pathway.source());
        self.table
            .set_optional(key, "Version", &mut root, pathway.version());
        if !model.authors().is_empty() {
            let names: Vec<&str> = model.authors().iter().map(Author::name).collect();
            self.table.set(key, "Author", &mut root, &names.join(", "));
            if model
                .authors()
                .iter()
                .any(|author| author.full_name().is_some() || author.email().is_some())
            {
                debug!("Author full names and emails are not written to legacy documents");
            }
        }
        for name in PATHWAY_PROPERTY_ATTRIBUTES {
            self.table
                .set_optional(key, name, &mut root, pathway.info().property(name));
        }
        self.table
            .set_optional(key, "License", &mut root, pathway.license());
        if pathway.xref().is_some() {
            warn!(version:% = self.version; "Pathway xref is not supported, dropping it");
        }
        if model.evidences().next().is_some() {
            warn!(version:% = self.version; "Evidences are not supported, dropping them");
        }
        write_start(&mut self.writer, root)?;

        if let Some(description) = pathway.description() {
            write_tag_with_attrs(
                &mut self.writer,
                "Comment",
                description,
                &[("Source", tokens::DESCRIPTION_SOURCE)],
            )?;
        }
        self.write_info(RefHolder::Pathway, pathway.info(), false)?;

        let mut graphics = BytesStart::new("Graphics");
        self.table
            .set_float("Pathway.Graphics", "BoardWidth", &mut graphics, pathway.board_width());
        self.table
            .set_float("Pathway.Graphics", "BoardHeight", &mut graphics, pathway.board_height());
        write_empty(&mut self.writer, graphics)?;

        for data_node in model.data_nodes() {
            self.write_data_node(data_node)?;
        }
        for state in model.states() {
            self.write_state(state)?;
        }
        for interaction in model.interactions() {
            let id = element_id("Interaction", interaction.element_id())?;
            self.write_line("Interaction", id, interaction, Some(interaction.xref()))?;
        }
        for line in model.graphical_lines() {
            let id = element_id("GraphicalLine", line.element_id())?;
            self.write_line("GraphicalLine", id, line, None)?;
        }
        for label in model.labels() {
            self.write_label(label)?;
        }
        for shape in model.shapes() {
            self.write_shape(shape)?;
        }
        for group in model.groups() {
            self.write_group(group)?;
        }

        let mut info_box = BytesStart::new("InfoBox");
        self.table
            .set_float("InfoBox", "CenterX", &mut info_box, pathway.info_box().x());
        self.table
            .set_float("InfoBox", "CenterY", &mut info_box, pathway.info_box().y());
        write_empty(&mut self.writer, info_box)?;

        self.write_biopax()?;
        write_tag_end(&mut self.writer, "Pathway")
    }

    /// Comments, BiopaxRefs and dynamic properties.
    fn write_info(&mut self, holder: RefHolder, info: &ElementInfo, double: bool) -> Result<()> {
        for comment in info.comments() {
            match comment.source() {
                Some(source) => write_tag_with_attrs(
                    &mut self.writer,
                    "Comment",
                    comment.text(),
                    &[("Source", source)],
                )?,
                None => write_tag(&mut self.writer, "Comment", comment.text())?,
            }
        }

        for citation_ref in info.citation_refs() {
            write_tag(
                &mut self.writer,
                "BiopaxRef",
                &citation_ref.citation().as_string(),
            )?;
            if !citation_ref.annotation_refs().is_empty() {
                debug!(citation:% = citation_ref.citation(); "Dropping annotations nested in a citation ref");
            }
        }

        for (key, value) in info.properties() {
            let is_pathway_attribute =
                holder == RefHolder::Pathway && PATHWAY_PROPERTY_ATTRIBUTES.contains(&key.as_str());
            if is_pathway_attribute || key == tokens::DOUBLE_LINE_PROPERTY {
                continue;
            }
            self.write_attribute(key, value)?;
        }
        if double {
            self.write_attribute(tokens::DOUBLE_LINE_PROPERTY, tokens::DOUBLE_LINE_VALUE)?;
        }

        if let RefHolder::Element(id) = holder {
            if !info.annotation_refs().is_empty() {
                warn!(id:% = id; "Element annotations are not supported, dropping them");
            }
        }
        if !info.evidence_refs().is_empty() {
            debug!(holder:? = holder; "Dropping evidence refs");
        }
        Ok(())
    }

    fn write_attribute(&mut self, key: &str, value: &str) -> Result<()> {
        let mut elem = BytesStart::new("Attribute");
        self.table.set("Attribute", "Key", &mut elem, key);
        self.table.set("Attribute", "Value", &mut elem, value);
        write_empty(&mut self.writer, elem)
    }

    fn write_xref(&mut self, owner: &str, xref: Option<&Xref>, required: bool) -> Result<()> {
        let mut elem = BytesStart::new("Xref");
        match xref {
            Some(xref) => {
                let database = xref_legacy_data_source_str(xref).map_err(|err| {
                    ConversionError::document(ErrorCode::E400, owner, err.to_string())
                })?;
                self.table.set("Xref", "Database", &mut elem, database);
                self.table.set("Xref", "ID", &mut elem, xref.identifier());
            }
            None if required => {
                self.table.set("Xref", "Database", &mut elem, "");
                self.table.set("Xref", "ID", &mut elem, "");
            }
            None => return Ok(()),
        }
        write_empty(&mut self.writer, elem)
    }

    fn write_data_node(&mut self, data_node: &DataNode) -> Result<()> {
        let key = "DataNode";
        let id = element_id(key, data_node.element_id())?;
        let mut elem = BytesStart::new(key);
        self.table
            .set(key, "TextLabel", &mut elem, data_node.text_label());
        self.table.set(key, "GraphId", &mut elem, &id.as_string());
        self.set_group_ref(key, &mut elem, data_node.group_ref());
        self.table.set(
            key,
            "Type",
            &mut elem,
            tokens::data_node_type_to_legacy(data_node.data_node_type()),
        );
        if data_node.alias_ref().is_some() {
            warn!(id:% = id; "Alias refs are not supported, dropping it");
        }

        write_start(&mut self.writer, elem)?;
        let shaped = data_node.shaped();
        self.write_info(id.into(), data_node.info(), is_double(shaped.shape_style()))?;
        self.write_shaped_graphics("DataNode.Graphics", shaped, shaped.shape_style().border_color())?;
        self.write_xref(&path(key, id), data_node.xref(), true)?;
        write_tag_end(&mut self.writer, key)
    }

    fn write_state(&mut self, state: &State) -> Result<()> {
        let key = "State";
        let graphics_key = "State.Graphics";
        let id = element_id(key, state.element_id())?;
        let owner = state.data_node().ok_or_else(|| {
            ConversionError::document(ErrorCode::E401, path(key, id), "state has no data node")
        })?;

        let mut elem = BytesStart::new(key);
        self.table.set(key, "GraphRef", &mut elem, &owner.as_string());
        self.table.set(key, "TextLabel", &mut elem, state.text_label());
        self.table.set(key, "GraphId", &mut elem, &id.as_string());
        self.table
            .set(key, "StateType", &mut elem, state.state_type().name());
        write_start(&mut self.writer, elem)?;
        self.write_info(id.into(), state.info(), is_double(state.shape_style()))?;

        let mut graphics = BytesStart::new("Graphics");
        self.table
            .set_float(graphics_key, "RelX", &mut graphics, state.rel_x());
        self.table
            .set_float(graphics_key, "RelY", &mut graphics, state.rel_y());
        self.table
            .set_float(graphics_key, "Width", &mut graphics, state.width());
        self.table
            .set_float(graphics_key, "Height", &mut graphics, state.height());
        self.set_font(graphics_key, state.font(), &mut graphics);
        self.set_shape_style(
            graphics_key,
            state.shape_style(),
            state.shape_style().border_color(),
            &mut graphics,
        );
        write_empty(&mut self.writer, graphics)?;

        self.write_xref(&path(key, id), state.xref(), false)?;
        write_tag_end(&mut self.writer, key)
    }

    /// Writes an interaction (`xref` is `Some`) or a graphical line.
    fn write_line<L>(
        &mut self,
        tag: &str,
        id: ElementId,
        element: &L,
        xref: Option<Option<&Xref>>,
    ) -> Result<()>
    where
        L: Lined + HasElementInfo,
    {
        let key = tag;
        let graphics_key = format!("{tag}.Graphics");
        let line = element.line();

        let mut elem = BytesStart::new(tag);
        self.table.set(key, "GraphId", &mut elem, &id.as_string());
        self.set_group_ref(key, &mut elem, line.group_ref());
        write_start(&mut self.writer, elem)?;
        let double = line.line_style().line_style() == &LineStyleType::Double;
        self.write_info(id.into(), element.info(), double)?;
        self.write_line_graphics(&graphics_key, id, line)?;
        if let Some(xref) = xref {
            self.write_xref(&path(tag, id), xref, false)?;
        }
        write_tag_end(&mut self.writer, tag)
    }

    fn write_line_graphics(&mut self, key: &str, id: ElementId, line: &LineData) -> Result<()> {
        let style = line.line_style();
        let mut graphics = BytesStart::new("Graphics");
        self.table
            .set(key, "Color", &mut graphics, &style.line_color().to_legacy_string());
        self.table
            .set_float(key, "LineThickness", &mut graphics, style.line_width());
        self.table.set(
            key,
            "LineStyle",
            &mut graphics,
            tokens::line_style_to_legacy(style.line_style()),
        );
        self.table
            .set(key, "ConnectorType", &mut graphics, style.connector_type().as_str());
        self.table.set_optional(
            key,
            "ZOrder",
            &mut graphics,
            style.z_order().map(|z| z.to_string()).as_deref(),
        );
        write_start(&mut self.writer, graphics)?;

        for &point_id in line.points() {
            let point = self.model.point(point_id).ok_or_else(|| {
                ConversionError::document(
                    ErrorCode::E401,
                    path("Point", point_id),
                    format!("point of line `{id}` is missing"),
                )
            })?;
            let mut elem = BytesStart::new("Point");
            self.table
                .set_float("Point", "X", &mut elem, point.position().x());
            self.table
                .set_float("Point", "Y", &mut elem, point.position().y());
            if let Some(target) = point.element_ref() {
                self.table
                    .set_float("Point", "RelX", &mut elem, point.rel_x());
                self.table
                    .set_float("Point", "RelY", &mut elem, point.rel_y());
                self.table
                    .set("Point", "GraphRef", &mut elem, &target.as_string());
            }
            self.table
                .set("Point", "GraphId", &mut elem, &point_id.as_string());
            self.table.set(
                "Point",
                "ArrowHead",
                &mut elem,
                tokens::arrow_head_to_legacy(point.arrow_head()),
            );
            write_empty(&mut self.writer, elem)?;
        }

        for &anchor_id in line.anchors() {
            let anchor = self.model.anchor(anchor_id).ok_or_else(|| {
                ConversionError::document(
                    ErrorCode::E401,
                    path("Anchor", anchor_id),
                    format!("anchor of line `{id}` is missing"),
                )
            })?;
            let mut elem = BytesStart::new("Anchor");
            self.table
                .set_float("Anchor", "Position", &mut elem, anchor.position());
            self.table
                .set("Anchor", "Shape", &mut elem, anchor.shape_type().name());
            self.table
                .set("Anchor", "GraphId", &mut elem, &anchor_id.as_string());
            write_empty(&mut self.writer, elem)?;
        }
        write_tag_end(&mut self.writer, "Graphics")
    }

    fn write_label(&mut self, label: &Label) -> Result<()> {
        let key = "Label";
        let id = element_id(key, label.element_id())?;
        let mut elem = BytesStart::new(key);
        self.table.set(key, "TextLabel", &mut elem, label.text_label());
        self.table.set(key, "GraphId", &mut elem, &id.as_string());
        self.set_group_ref(key, &mut elem, label.group_ref());
        self.table.set_optional(key, "Href", &mut elem, label.href());
        write_start(&mut self.writer, elem)?;

        let shaped = label.shaped();
        self.write_info(id.into(), label.info(), is_double(shaped.shape_style()))?;
        // Labels have no border of interest; their color is the text color.
        self.write_shaped_graphics("Label.Graphics", shaped, shaped.font().text_color())?;
        write_tag_end(&mut self.writer, key)
    }

    fn write_shape(&mut self, shape: &Shape) -> Result<()> {
        let key = "Shape";
        let graphics_key = "Shape.Graphics";
        let id = element_id(key, shape.element_id())?;
        let mut elem = BytesStart::new(key);
        self.table
            .set_optional(key, "TextLabel", &mut elem, shape.text_label());
        self.table.set(key, "GraphId", &mut elem, &id.as_string());
        self.set_group_ref(key, &mut elem, shape.group_ref());
        write_start(&mut self.writer, elem)?;

        let shaped = shape.shaped();
        self.write_info(id.into(), shape.info(), is_double(shaped.shape_style()))?;
        let mut graphics = self.shaped_graphics(
            graphics_key,
            shaped,
            shaped.shape_style().border_color(),
        );
        self.table
            .set_float(graphics_key, "Rotation", &mut graphics, shape.rotation());
        write_empty(&mut self.writer, graphics)?;
        write_tag_end(&mut self.writer, key)
    }

    fn write_group(&mut self, group: &Group) -> Result<()> {
        let key = "Group";
        let id = element_id(key, group.element_id())?;
        let mut elem = BytesStart::new(key);
        self.table.set(key, "GroupId", &mut elem, &id.as_string());
        self.table.set(key, "GraphId", &mut elem, &id.as_string());
        self.set_group_ref(key, &mut elem, group.group_ref());
        self.table.set(
            key,
            "Style",
            &mut elem,
            tokens::group_type_to_legacy(group.group_type(), self.version),
        );
        self.table
            .set_optional(key, "TextLabel", &mut elem, group.text_label());
        if group.xref().is_some() {
            warn!(id:% = id; "Group xrefs are not supported, dropping it");
        }

        let info = group.info();
        let has_content = !info.comments().is_empty()
            || !info.citation_refs().is_empty()
            || !info.properties().is_empty();
        write_open(&mut self.writer, elem, has_content)?;
        if has_content {
            self.write_info(id.into(), info, false)?;
            write_tag_end(&mut self.writer, key)?;
        } else if !info.annotation_refs().is_empty() {
            warn!(id:% = id; "Element annotations are not supported, dropping them");
        }
        Ok(())
    }

    /// Publications and the ontology terms annotating the pathway.
    fn write_biopax(&mut self) -> Result<()> {
        let model = self.model;
        let terms: Vec<_> = model
            .pathway()
            .info()
            .annotation_refs()
            .iter()
            .filter_map(|annotation_ref| model.annotation(annotation_ref.annotation()))
            .collect();
        if model.citations().next().is_none() && terms.is_empty() {
            return Ok(());
        }

        write_start(&mut self.writer, BytesStart::new("Biopax"))?;
        for citation in model.citations() {
            let id = element_id("Citation", citation.element_id())?;
            let mut elem = BytesStart::new("bp:PublicationXref");
            elem.push_attribute(("xmlns:bp", BIOPAX_NAMESPACE));
            elem.push_attribute(("xmlns:rdf", RDF_NAMESPACE));
            elem.push_attribute(("rdf:id", id.as_string().as_str()));
            if citation.url().is_some() {
                debug!(id:% = id; "Dropping citation url");
            }
            let Some(xref) = citation.xref() else {
                write_empty(&mut self.writer, elem)?;
                continue;
            };
            let database = xref_legacy_data_source_str(xref).map_err(|err| {
                ConversionError::document(ErrorCode::E400, path("Citation", id), err.to_string())
            })?;
            write_start(&mut self.writer, elem)?;
            write_tag(&mut self.writer, "bp:ID", xref.identifier())?;
            write_tag(&mut self.writer, "bp:DB", database)?;
            write_tag_end(&mut self.writer, "bp:PublicationXref")?;
        }

        for term in terms {
            if term.annotation_type() != &AnnotationType::Ontology {
                debug!(value = term.value(); "Writing annotation as an ontology term");
            }
            let mut elem = BytesStart::new("bp:openControlledVocabulary");
            elem.push_attribute(("xmlns:bp", BIOPAX_NAMESPACE));
            write_start(&mut self.writer, elem)?;
            write_tag(&mut self.writer, "bp:TERM", term.value())?;
            if let Some(xref) = term.xref() {
                let ontology = xref_legacy_data_source_str(xref).map_err(|err| {
                    ConversionError::document(ErrorCode::E400, "/Pathway/Biopax", err.to_string())
                })?;
                write_tag(&mut self.writer, "bp:ID", xref.identifier())?;
                write_tag(&mut self.writer, "bp:Ontology", ontology)?;
            }
            write_tag_end(&mut self.writer, "bp:openControlledVocabulary")?;
        }
        write_tag_end(&mut self.writer, "Biopax")
    }

    fn write_shaped_graphics(&mut self, key: &str, shaped: &ShapedData, color: Color) -> Result<()> {
        let graphics = self.shaped_graphics(key, shaped, color);
        write_empty(&mut self.writer, graphics)
    }

    /// `Graphics` of a shaped element. Legacy documents have one `Color`
    /// for text and border; `color` is the one written.
    fn shaped_graphics(&self, key: &str, shaped: &ShapedData, color: Color) -> BytesStart<'static> {
        let rect = shaped.rect();
        let mut graphics = BytesStart::new("Graphics");
        self.table
            .set_float(key, "CenterX", &mut graphics, rect.center().x());
        self.table
            .set_float(key, "CenterY", &mut graphics, rect.center().y());
        self.table.set_float(key, "Width", &mut graphics, rect.width());
        self.table
            .set_float(key, "Height", &mut graphics, rect.height());
        self.set_font(key, shaped.font(), &mut graphics);
        self.set_shape_style(key, shaped.shape_style(), color, &mut graphics);
        graphics
    }

    fn set_font(&self, key: &str, font: &FontProperty, elem: &mut BytesStart<'_>) {
        let table = self.table;
        table.set(key, "FontName", elem, font.font_name());
        table.set(key, "FontWeight", elem, flag(font.bold(), "Bold"));
        table.set(key, "FontStyle", elem, flag(font.italic(), "Italic"));
        table.set(key, "FontDecoration", elem, flag(font.underline(), "Underline"));
        table.set(key, "FontStrikethru", elem, flag(font.strikethru(), "Strikethru"));
        table.set(key, "FontSize", elem, &font.size().to_string());
        table.set(key, "Align", elem, font.h_align().as_str());
        table.set(key, "Valign", elem, font.v_align().as_str());
    }

    fn set_shape_style(
        &self,
        key: &str,
        style: &ShapeStyleProperty,
        color: Color,
        elem: &mut BytesStart<'_>,
    ) {
        let table = self.table;
        table.set(key, "Color", elem, &color.to_legacy_string());
        table.set(
            key,
            "LineStyle",
            elem,
            tokens::line_style_to_legacy(style.border_style()),
        );
        table.set_float(key, "LineThickness", elem, style.border_width());
        table.set(key, "FillColor", elem, &style.fill_color().to_legacy_string());
        table.set(
            key,
            "ShapeType",
            elem,
            tokens::shape_to_legacy(style.shape_type()),
        );
        table.set_optional(
            key,
            "ZOrder",
            elem,
            style.z_order().map(|z| z.to_string()).as_deref(),
        );
    }

    fn set_group_ref(&self, key: &str, elem: &mut BytesStart<'_>, group: Option<ElementId>) {
        if let Some(group) = group {
            self.table.set(key, "GroupRef", elem, &group.as_string());
        }
    }
}

fn flag(on: bool, token: &'static str) -> &'static str {
    if on { token } else { "Normal" }
}

fn is_double(style: &ShapeStyleProperty) -> bool {
    style.border_style() == &LineStyleType::Double
}

fn path(kind: &str, id: ElementId) -> String {
    format!("/Pathway/{kind}[@GraphId='{id}']")
}

fn element_id(kind: &str, id: Option<ElementId>) -> Result<ElementId> {
    id.ok_or_else(|| {
        ConversionError::document(
            ErrorCode::E401,
            format!("/Pathway/{kind}"),
            "element has no id",
        )
    })
}
