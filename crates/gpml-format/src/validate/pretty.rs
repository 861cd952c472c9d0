//! Re-indentation of XML documents for diagnostics.

use std::io::Cursor;

use quick_xml::{Reader, Writer, events::Event};

use crate::error::{ConversionError, Result};

/// Re-indents `xml` with two spaces per level.
///
/// Whitespace-only text between elements is dropped; all other content,
/// including text inside mixed content, is kept as is.
pub fn pretty_print(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Text(text) if text.iter().all(u8::is_ascii_whitespace) => {}
            event => writer.write_event(event)?,
        }
    }

    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(|err| {
        ConversionError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_print_indents_nested_elements() {
        let xml = r#"<Pathway Name="x"><Graphics BoardWidth="1"/><DataNode TextLabel="a &amp; b"><Comment>hi</Comment></DataNode></Pathway>"#;
        let pretty = pretty_print(xml).unwrap();
        let expected = [
            r#"<Pathway Name="x">"#,
            r#"  <Graphics BoardWidth="1"/>"#,
            r#"  <DataNode TextLabel="a &amp; b">"#,
            r#"    <Comment>hi</Comment>"#,
            r#"  </DataNode>"#,
            r#"</Pathway>"#,
        ]
        .join("\n");
        assert_eq!(pretty, expected);
    }

    #[test]
    fn test_pretty_print_rejects_malformed_input() {
        assert!(pretty_print("<a><b></a>").is_err());
    }
}
