//! XML plumbing shared by the readers and writers.
//!
//! Documents are read with `roxmltree` and written with `quick-xml`. Element
//! lookups match local names only; the namespace of a document is checked
//! once, at its root.

use std::io::Cursor;

use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use roxmltree::Node;

use gpml_core::ModelError;

use crate::error::{ConversionError, ErrorCode, Result};

pub(crate) type XmlWriter = Cursor<Vec<u8>>;

/// Slash-separated path of `node` from the document root, e.g.
/// `/Pathway/DataNode[2]/Graphics`.
///
/// Positions are 1-based and only given when the parent has more than one
/// child element of that name.
pub(crate) fn element_path(node: Node<'_, '_>) -> String {
    let mut segments: Vec<String> = node
        .ancestors()
        .filter(Node::is_element)
        .map(|element| {
            let name = element.tag_name().name();
            let Some(parent) = element.parent_element() else {
                return name.to_string();
            };
            let same_name: Vec<_> = parent
                .children()
                .filter(|sibling| sibling.is_element() && sibling.tag_name().name() == name)
                .collect();
            if same_name.len() < 2 {
                return name.to_string();
            }
            let position = same_name
                .iter()
                .position(|sibling| *sibling == element)
                .unwrap_or_default();
            format!("{name}[{}]", position + 1)
        })
        .collect();
    segments.reverse();
    format!("/{}", segments.join("/"))
}

/// A document error located at `node`.
pub(crate) fn error_at(node: Node<'_, '_>, code: ErrorCode, message: impl Into<String>) -> ConversionError {
    ConversionError::document(code, element_path(node), message).with_span(node.range())
}

/// A model error raised while building the element read from `node`.
pub(crate) fn model_error_at(node: Node<'_, '_>, err: ModelError) -> ConversionError {
    let code = match &err {
        ModelError::NegativeDimension { .. } | ModelError::OutOfRange { .. } => ErrorCode::E101,
        ModelError::TooFewPoints { .. } => ErrorCode::E103,
        ModelError::UnknownElement(_) => ErrorCode::E200,
        ModelError::DuplicateElementId(_) => ErrorCode::E202,
        ModelError::MissingDataSource(_) => ErrorCode::E400,
        ModelError::WrongKind { .. }
        | ModelError::AlreadyInGroup { .. }
        | ModelError::InvalidGroupMembership { .. }
        | ModelError::NotLinkable(_) => ErrorCode::E201,
    };
    error_at(node, code, err.to_string())
}

/// Child elements of `node` with local name `name`.
pub(crate) fn children<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && child.tag_name().name() == name)
}

/// First child element of `node` with local name `name`.
pub(crate) fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == name)
}

pub(crate) fn required_child<'a, 'input>(
    node: Node<'a, 'input>,
    name: &str,
) -> Result<Node<'a, 'input>> {
    child(node, name).ok_or_else(|| {
        error_at(
            node,
            ErrorCode::E102,
            format!("missing required element `{name}`"),
        )
    })
}

/// Text content of `node`, its direct text children concatenated.
pub(crate) fn text(node: Node<'_, '_>) -> String {
    node.children().filter_map(|child| child.text()).collect()
}

/// Formats a float the way GPML documents spell them: integral values keep
/// one decimal (`100.0`), everything else uses the shortest round-trip form.
pub(crate) fn format_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

pub(crate) fn new_writer(indent: usize) -> Writer<XmlWriter> {
    let buffer = Cursor::new(Vec::new());
    if indent == 0 {
        Writer::new(buffer)
    } else {
        Writer::new_with_indent(buffer, b' ', indent)
    }
}

pub(crate) fn write_declaration(writer: &mut Writer<XmlWriter>) -> Result<()> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    Ok(())
}

pub(crate) fn write_start(writer: &mut Writer<XmlWriter>, elem: BytesStart<'_>) -> Result<()> {
    writer.write_event(Event::Start(elem))?;
    Ok(())
}

pub(crate) fn write_empty(writer: &mut Writer<XmlWriter>, elem: BytesStart<'_>) -> Result<()> {
    writer.write_event(Event::Empty(elem))?;
    Ok(())
}

/// Writes `elem` as an empty element when `has_content` is false, otherwise
/// as a start tag.
pub(crate) fn write_open(
    writer: &mut Writer<XmlWriter>,
    elem: BytesStart<'_>,
    has_content: bool,
) -> Result<()> {
    if has_content {
        write_start(writer, elem)
    } else {
        write_empty(writer, elem)
    }
}

pub(crate) fn write_tag_end(writer: &mut Writer<XmlWriter>, tag_name: &str) -> Result<()> {
    writer.write_event(Event::End(BytesEnd::new(tag_name)))?;
    Ok(())
}

pub(crate) fn write_tag_text(writer: &mut Writer<XmlWriter>, content: &str) -> Result<()> {
    writer.write_event(Event::Text(BytesText::new(content)))?;
    Ok(())
}

/// Writes `<tag attrs...>content</tag>`.
pub(crate) fn write_tag_with_attrs(
    writer: &mut Writer<XmlWriter>,
    tag_name: &str,
    content: &str,
    attrs: &[(&str, &str)],
) -> Result<()> {
    let mut elem = BytesStart::new(tag_name);
    for attr in attrs {
        elem.push_attribute(*attr);
    }
    write_start(writer, elem)?;
    write_tag_text(writer, content)?;
    write_tag_end(writer, tag_name)
}

pub(crate) fn write_tag(writer: &mut Writer<XmlWriter>, tag_name: &str, content: &str) -> Result<()> {
    write_tag_with_attrs(writer, tag_name, content, &[])
}

/// Finishes a document and returns it as a string.
pub(crate) fn into_string(writer: Writer<XmlWriter>) -> Result<String> {
    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(|err| {
        ConversionError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_path_indexes_repeated_names() {
        let xml = r#"<Pathway><DataNode/><DataNode><Graphics/></DataNode><Label/></Pathway>"#;
        let document = roxmltree::Document::parse(xml).unwrap();
        let root = document.root_element();
        let graphics = root.descendants().find(|n| n.has_tag_name("Graphics")).unwrap();
        let label = root.descendants().find(|n| n.has_tag_name("Label")).unwrap();

        assert_eq!(element_path(root), "/Pathway");
        assert_eq!(element_path(graphics), "/Pathway/DataNode[2]/Graphics");
        assert_eq!(element_path(label), "/Pathway/Label");
    }

    #[test]
    fn test_required_child_reports_path() {
        let document = roxmltree::Document::parse("<Pathway><DataNode/></Pathway>").unwrap();
        let node = document.root_element().first_element_child().unwrap();
        let err = required_child(node, "Graphics").unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E102));
        assert_eq!(
            err.to_string(),
            "E102: missing required element `Graphics` at /Pathway/DataNode"
        );
        assert_eq!(err.span(), Some(node.range()));
    }

    #[test]
    fn test_model_error_codes() {
        let document = roxmltree::Document::parse("<Pathway/>").unwrap();
        let root = document.root_element();
        let id = gpml_core::ElementId::new("n1");

        let duplicate = model_error_at(root, ModelError::DuplicateElementId(id));
        assert_eq!(duplicate.code(), Some(ErrorCode::E202));
        let unknown = model_error_at(root, ModelError::UnknownElement(id));
        assert_eq!(unknown.code(), Some(ErrorCode::E200));
        let short = model_error_at(root, ModelError::TooFewPoints { line: id, count: 1 });
        assert_eq!(short.code(), Some(ErrorCode::E103));
        assert!(short.to_string().ends_with("at /Pathway"));
    }

    #[test]
    fn test_text_concatenates_children() {
        let document = roxmltree::Document::parse("<Comment>a &amp; b</Comment>").unwrap();
        assert_eq!(text(document.root_element()), "a & b");
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(100.0), "100.0");
        assert_eq!(format_float(-2.0), "-2.0");
        assert_eq!(format_float(0.25), "0.25");
        assert_eq!(format_float(1.5707963267948966), "1.5707963267948966");
    }

    #[test]
    fn test_writer_helpers() {
        let mut writer = new_writer(0);
        let mut elem = BytesStart::new("Pathway");
        elem.push_attribute(("title", "a < b"));
        write_start(&mut writer, elem).unwrap();
        write_tag(&mut writer, "Description", "x & y").unwrap();
        write_open(&mut writer, BytesStart::new("Graphics"), false).unwrap();
        write_tag_end(&mut writer, "Pathway").unwrap();
        assert_eq!(
            into_string(writer).unwrap(),
            r#"<Pathway title="a &lt; b"><Description>x &amp; y</Description><Graphics/></Pathway>"#
        );
    }
}
