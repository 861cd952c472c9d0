//! Instance validation against a compiled [`Schema`].

use std::{
    cell::Cell,
    collections::{BTreeSet, HashMap},
    ops::Range,
};

use log::trace;
use roxmltree::{Document, Node};

use crate::{
    error::ErrorCode,
    validate::schema::{Builtin, Content, ElementDecl, Particle, ParticleKind, ResolvedType, Schema, TypeRef},
    xml::element_path,
};

/// First violation found in a document.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Violation {
    pub(crate) code: ErrorCode,
    pub(crate) message: String,
    pub(crate) path: String,
    pub(crate) span: Option<Range<usize>>,
}

impl Violation {
    fn at(node: Node<'_, '_>, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: element_path(node),
            span: Some(node.range()),
        }
    }
}

type Checked = std::result::Result<(), Violation>;

/// Checks `document` against `schema`, stopping at the first violation.
pub(crate) fn check_document(schema: &Schema, document: &Document<'_>) -> Checked {
    let root = document.root_element();
    let name = root.tag_name();
    let decl = schema
        .global_element(name.name())
        .filter(|_| name.namespace() == schema.target_namespace())
        .ok_or_else(|| {
            Violation::at(
                root,
                ErrorCode::E300,
                format!(
                    "root element `{}` in namespace `{}` is not declared",
                    name.name(),
                    name.namespace().unwrap_or_default()
                ),
            )
        })?;

    let mut checker = Checker {
        schema,
        ids: HashMap::new(),
        id_refs: Vec::new(),
    };
    checker.check_element(root, decl)?;

    for (value, node) in &checker.id_refs {
        if !checker.ids.contains_key(value.as_str()) {
            return Err(Violation::at(
                *node,
                ErrorCode::E307,
                format!("IDREF `{value}` does not name any ID"),
            ));
        }
    }
    Ok(())
}

struct Checker<'s, 'a, 'input> {
    schema: &'s Schema,
    ids: HashMap<String, Node<'a, 'input>>,
    id_refs: Vec<(String, Node<'a, 'input>)>,
}

impl<'s, 'a, 'input> Checker<'s, 'a, 'input> {
    fn check_element(&mut self, node: Node<'a, 'input>, decl: &'s ElementDecl) -> Checked {
        trace!(element = decl.name.as_str(); "Validating element");
        if matches!(decl.type_ref, TypeRef::Builtin(Builtin::AnyType)) {
            return Ok(());
        }
        let resolved = self.schema.resolve(&decl.type_ref).ok_or_else(|| {
            Violation::at(node, ErrorCode::E300, format!("type of `{}` is undefined", decl.name))
        })?;

        match resolved {
            ResolvedType::Simple(type_ref) => {
                if let Some(attribute) = node.attributes().find(|a| a.namespace().is_none()) {
                    return Err(Violation::at(
                        node,
                        ErrorCode::E303,
                        format!("attribute `{}` is not allowed here", attribute.name()),
                    ));
                }
                self.check_text_only(node, type_ref)
            }
            ResolvedType::Complex(complex) => {
                self.check_attributes(node, &complex.attributes)?;
                match &complex.content {
                    Content::Empty => self.check_children(node, None),
                    Content::Simple(type_ref) => self.check_text_only(node, type_ref),
                    Content::Elements(particle) => self.check_children(node, Some(particle)),
                }
            }
        }
    }

    fn check_attributes(
        &mut self,
        node: Node<'a, 'input>,
        declared: &'s [crate::validate::AttributeDecl],
    ) -> Checked {
        for attribute in node.attributes() {
            // Attributes from other namespaces (xml:, xsi:) are not checked.
            if attribute.namespace().is_some() {
                continue;
            }
            let decl = declared
                .iter()
                .find(|decl| decl.name() == attribute.name())
                .ok_or_else(|| {
                    Violation::at(
                        node,
                        ErrorCode::E303,
                        format!("attribute `{}` is not declared", attribute.name()),
                    )
                })?;
            self.check_value(node, decl.type_ref(), attribute.value())
                .map_err(|(code, message)| {
                    Violation::at(node, code, format!("attribute `{}`: {message}", attribute.name()))
                })?;
        }

        if let Some(missing) = declared
            .iter()
            .find(|decl| decl.required() && node.attribute(decl.name()).is_none())
        {
            return Err(Violation::at(
                node,
                ErrorCode::E304,
                format!("required attribute `{}` is missing", missing.name()),
            ));
        }
        Ok(())
    }

    /// Checks a value and records it when it is an ID or IDREF.
    fn check_value(
        &mut self,
        node: Node<'a, 'input>,
        type_ref: &TypeRef,
        value: &str,
    ) -> std::result::Result<(), (ErrorCode, String)> {
        self.schema
            .check_value(type_ref, value)
            .map_err(|message| (ErrorCode::E305, message))?;
        match self.schema.id_kind(type_ref) {
            Some(Builtin::Id) => {
                if let Some(first) = self.ids.insert(value.trim().to_string(), node) {
                    return Err((
                        ErrorCode::E306,
                        format!("ID `{value}` is already used at {}", element_path(first)),
                    ));
                }
            }
            Some(_) => self.id_refs.push((value.trim().to_string(), node)),
            None => {}
        }
        Ok(())
    }

    fn check_text_only(&mut self, node: Node<'a, 'input>, type_ref: &TypeRef) -> Checked {
        if let Some(child) = node.children().find(Node::is_element) {
            return Err(Violation::at(
                child,
                ErrorCode::E301,
                format!(
                    "element `{}` is not allowed in text-only content",
                    child.tag_name().name()
                ),
            ));
        }
        let text: String = node.children().filter_map(|n| n.text()).collect();
        self.check_value(node, type_ref, &text)
            .map_err(|(code, message)| Violation::at(node, code, message))
    }

    fn check_children(&mut self, node: Node<'a, 'input>, particle: Option<&'s Particle>) -> Checked {
        if let Some(text) = node
            .children()
            .filter(Node::is_text)
            .filter_map(|n| n.text())
            .find(|text| !text.trim().is_empty())
        {
            return Err(Violation::at(
                node,
                ErrorCode::E308,
                format!("unexpected text `{}`", text.trim()),
            ));
        }

        let children: Vec<Node<'a, 'input>> = node.children().filter(Node::is_element).collect();
        let Some(particle) = particle else {
            return match children.first() {
                Some(child) => Err(Violation::at(
                    *child,
                    ErrorCode::E301,
                    format!("element `{}` is not allowed here", child.tag_name().name()),
                )),
                None => Ok(()),
            };
        };

        let names: Vec<Option<&str>> = children
            .iter()
            .map(|child| {
                let name = child.tag_name();
                (name.namespace() == self.schema.target_namespace()).then_some(name.name())
            })
            .collect();
        let matcher = ContentMatcher {
            schema: self.schema,
            names: &names,
            furthest: Cell::new(0),
        };
        if !matcher.occurrences(particle, 0).contains(&names.len()) {
            let furthest = matcher.furthest.get();
            return Err(match children.get(furthest) {
                Some(child) => Violation::at(
                    *child,
                    ErrorCode::E301,
                    format!("element `{}` is not allowed here", child.tag_name().name()),
                ),
                None => Violation::at(
                    node,
                    ErrorCode::E302,
                    format!("content of `{}` is incomplete", node.tag_name().name()),
                ),
            });
        }

        for (child, name) in children.into_iter().zip(names) {
            // Children matched by a wildcard are not checked.
            if let Some(decl) = name.and_then(|name| self.schema.find_child(particle, name)) {
                self.check_element(child, decl)?;
            }
        }
        Ok(())
    }
}

/// Matches a list of child names against a content model.
///
/// Each step maps a start position to the set of positions the particle can
/// end at, so repetition and choice never backtrack exponentially.
struct ContentMatcher<'s, 'n> {
    schema: &'s Schema,
    /// Local names of the children; `None` for elements outside the target
    /// namespace, which only wildcards accept.
    names: &'n [Option<&'n str>],
    furthest: Cell<usize>,
}

impl ContentMatcher<'_, '_> {
    fn occurrences(&self, particle: &Particle, start: usize) -> BTreeSet<usize> {
        let mut ends = BTreeSet::new();
        if particle.min == 0 {
            ends.insert(start);
        }

        let mut seen = BTreeSet::from([start]);
        let mut frontier = BTreeSet::from([start]);
        let mut count = 0;
        while particle.max.is_none_or(|max| count < max) {
            let mut next: BTreeSet<usize> = frontier
                .iter()
                .flat_map(|&position| self.single(&particle.kind, position))
                .collect();
            count += 1;
            if count >= particle.min {
                ends.extend(next.iter().copied());
                next.retain(|position| !seen.contains(position));
                seen.extend(next.iter().copied());
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
        }
        ends
    }

    fn single(&self, kind: &ParticleKind, start: usize) -> BTreeSet<usize> {
        match kind {
            ParticleKind::Element(decl) => self.consume(start, |name| name == Some(decl.name.as_str())),
            ParticleKind::ElementRef(reference) => {
                let known = self.schema.global_element(reference).is_some();
                self.consume(start, |name| known && name == Some(reference.as_str()))
            }
            ParticleKind::Any => self.consume(start, |_| true),
            ParticleKind::Sequence(items) => {
                items.iter().fold(BTreeSet::from([start]), |positions, item| {
                    positions
                        .iter()
                        .flat_map(|&position| self.occurrences(item, position))
                        .collect()
                })
            }
            ParticleKind::Choice(items) => items
                .iter()
                .flat_map(|item| self.occurrences(item, start))
                .collect(),
        }
    }

    fn consume(&self, start: usize, accepts: impl Fn(Option<&str>) -> bool) -> BTreeSet<usize> {
        match self.names.get(start) {
            Some(name) if accepts(*name) => {
                self.furthest.set(self.furthest.get().max(start + 1));
                BTreeSet::from([start + 1])
            }
            _ => BTreeSet::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"<xsd:schema xmlns:xsd="http://www.w3.org/2001/XMLSchema"
        targetNamespace="urn:test" elementFormDefault="qualified">
      <xsd:element name="Root">
        <xsd:complexType>
          <xsd:sequence>
            <xsd:element name="Head" minOccurs="0"/>
            <xsd:choice maxOccurs="unbounded">
              <xsd:element name="A" type="Item"/>
              <xsd:element name="B" type="Item"/>
            </xsd:choice>
            <xsd:element name="Tail" type="Item"/>
            <xsd:element name="Extra" minOccurs="0">
              <xsd:complexType>
                <xsd:sequence>
                  <xsd:any processContents="skip" minOccurs="0" maxOccurs="unbounded"/>
                </xsd:sequence>
              </xsd:complexType>
            </xsd:element>
          </xsd:sequence>
        </xsd:complexType>
      </xsd:element>
      <xsd:complexType name="Item">
        <xsd:attribute name="id" type="xsd:ID" use="required"/>
        <xsd:attribute name="ref" type="xsd:IDREF"/>
        <xsd:attribute name="size" type="xsd:float"/>
      </xsd:complexType>
    </xsd:schema>"#;

    fn check(xml: &str) -> Checked {
        let schema = Schema::parse(SCHEMA).unwrap();
        let document = Document::parse(xml).unwrap();
        check_document(&schema, &document)
    }

    #[test]
    fn test_valid_document() {
        let xml = r#"<Root xmlns="urn:test">
            <A id="a"/><B id="b" ref="a" size="1.5"/><A id="c"/>
            <Tail id="t"/>
            <Extra><other xmlns="urn:other"><deep/></other></Extra>
        </Root>"#;
        assert_eq!(check(xml), Ok(()));
    }

    #[test]
    fn test_unexpected_element() {
        let xml = r#"<Root xmlns="urn:test"><A id="a"/><Head/><Tail id="t"/></Root>"#;
        let violation = check(xml).unwrap_err();
        assert_eq!(violation.code, ErrorCode::E301);
        assert_eq!(violation.path, "/Root/Head");
    }

    #[test]
    fn test_missing_element() {
        let xml = r#"<Root xmlns="urn:test"><A id="a"/></Root>"#;
        assert_eq!(check(xml).unwrap_err().code, ErrorCode::E302);
    }

    #[test]
    fn test_attribute_violations() {
        let missing = r#"<Root xmlns="urn:test"><A/><Tail id="t"/></Root>"#;
        assert_eq!(check(missing).unwrap_err().code, ErrorCode::E304);

        let unknown = r#"<Root xmlns="urn:test"><A id="a" color="red"/><Tail id="t"/></Root>"#;
        assert_eq!(check(unknown).unwrap_err().code, ErrorCode::E303);

        let invalid = r#"<Root xmlns="urn:test"><A id="a" size="big"/><Tail id="t"/></Root>"#;
        let violation = check(invalid).unwrap_err();
        assert_eq!(violation.code, ErrorCode::E305);
        assert_eq!(violation.path, "/Root/A");
    }

    #[test]
    fn test_id_constraints() {
        let duplicate = r#"<Root xmlns="urn:test"><A id="a"/><Tail id="a"/></Root>"#;
        assert_eq!(check(duplicate).unwrap_err().code, ErrorCode::E306);

        let dangling = r#"<Root xmlns="urn:test"><A id="a" ref="zz"/><Tail id="t"/></Root>"#;
        assert_eq!(check(dangling).unwrap_err().code, ErrorCode::E307);
    }

    #[test]
    fn test_wrong_root() {
        let xml = r#"<Root xmlns="urn:other"/>"#;
        assert_eq!(check(xml).unwrap_err().code, ErrorCode::E300);
    }

    #[test]
    fn test_unexpected_text() {
        let xml = r#"<Root xmlns="urn:test">stray<A id="a"/><Tail id="t"/></Root>"#;
        assert_eq!(check(xml).unwrap_err().code, ErrorCode::E308);
    }
}
