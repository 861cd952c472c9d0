//! Compiled XML Schema definitions.
//!
//! Only the part of XML Schema 1.0 the GPML schemas use is understood:
//! global and local element declarations, named and anonymous complex types
//! with `sequence`/`choice`/`any` content, `simpleContent` extensions,
//! attribute groups, and simple types built from restrictions (enumeration,
//! pattern, inclusive bounds) or unions. Anything else is rejected when the
//! schema is parsed, so a schema never validates less than it says.

use std::collections::HashMap;

use regex::Regex;
use roxmltree::Node;

use crate::error::{ConversionError, Result};

const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// Built-in XML Schema datatypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Builtin {
    AnyType,
    String,
    NormalizedString,
    Token,
    Id,
    IdRef,
    NmToken,
    AnyUri,
    Float,
    Double,
    Decimal,
    Integer,
    Int,
    NonNegativeInteger,
    PositiveInteger,
    Boolean,
}

impl Builtin {
    fn from_local_name(name: &str) -> Option<Self> {
        Some(match name {
            "anyType" | "anySimpleType" => Self::AnyType,
            "string" => Self::String,
            "normalizedString" => Self::NormalizedString,
            "token" => Self::Token,
            "ID" => Self::Id,
            "IDREF" => Self::IdRef,
            "NMTOKEN" => Self::NmToken,
            "anyURI" => Self::AnyUri,
            "float" => Self::Float,
            "double" => Self::Double,
            "decimal" => Self::Decimal,
            "integer" => Self::Integer,
            "int" => Self::Int,
            "nonNegativeInteger" => Self::NonNegativeInteger,
            "positiveInteger" => Self::PositiveInteger,
            "boolean" => Self::Boolean,
            _ => return None,
        })
    }

    fn check(self, value: &str) -> std::result::Result<(), String> {
        let collapsed = value.trim();
        let ok = match self {
            Self::AnyType | Self::String | Self::NormalizedString | Self::Token | Self::AnyUri => {
                true
            }
            Self::Id | Self::IdRef | Self::NmToken => {
                !collapsed.is_empty() && !collapsed.contains(char::is_whitespace)
            }
            Self::Float | Self::Double | Self::Decimal => collapsed.parse::<f64>().is_ok(),
            Self::Integer => collapsed.parse::<i64>().is_ok(),
            Self::Int => collapsed.parse::<i32>().is_ok(),
            Self::NonNegativeInteger => collapsed.parse::<u64>().is_ok(),
            Self::PositiveInteger => collapsed.parse::<u64>().is_ok_and(|n| n > 0),
            Self::Boolean => matches!(collapsed, "true" | "false" | "1" | "0"),
        };
        if ok {
            Ok(())
        } else {
            Err(format!("`{value}` is not a valid xsd:{}", self.local_name()))
        }
    }

    fn local_name(self) -> &'static str {
        match self {
            Self::AnyType => "anyType",
            Self::String => "string",
            Self::NormalizedString => "normalizedString",
            Self::Token => "token",
            Self::Id => "ID",
            Self::IdRef => "IDREF",
            Self::NmToken => "NMTOKEN",
            Self::AnyUri => "anyURI",
            Self::Float => "float",
            Self::Double => "double",
            Self::Decimal => "decimal",
            Self::Integer => "integer",
            Self::Int => "int",
            Self::NonNegativeInteger => "nonNegativeInteger",
            Self::PositiveInteger => "positiveInteger",
            Self::Boolean => "boolean",
        }
    }
}

/// Reference from a declaration to its type.
#[derive(Debug, Clone)]
pub(crate) enum TypeRef {
    Builtin(Builtin),
    Named(String),
    Complex(Box<ComplexType>),
    Simple(Box<SimpleType>),
}

impl TypeRef {
    /// Type name as written in the schema, with the `xsd:` prefix for
    /// built-in types.
    fn display_name(&self) -> String {
        match self {
            Self::Builtin(builtin) => format!("xsd:{}", builtin.local_name()),
            Self::Named(name) => name.clone(),
            Self::Complex(_) | Self::Simple(_) => "anonymous".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum SimpleType {
    Restriction {
        base: TypeRef,
        enumeration: Vec<String>,
        pattern: Option<Regex>,
        min_inclusive: Option<f64>,
        max_inclusive: Option<f64>,
    },
    Union(Vec<TypeRef>),
}

#[derive(Debug, Clone)]
pub(crate) enum Content {
    Empty,
    Elements(Particle),
    Simple(TypeRef),
}

#[derive(Debug, Clone)]
pub(crate) struct ComplexType {
    pub(crate) attributes: Vec<AttributeDecl>,
    pub(crate) content: Content,
}

#[derive(Debug, Clone)]
pub(crate) struct ElementDecl {
    pub(crate) name: String,
    pub(crate) type_ref: TypeRef,
}

#[derive(Debug, Clone)]
pub(crate) enum ParticleKind {
    Element(ElementDecl),
    ElementRef(String),
    Sequence(Vec<Particle>),
    Choice(Vec<Particle>),
    Any,
}

#[derive(Debug, Clone)]
pub(crate) struct Particle {
    pub(crate) kind: ParticleKind,
    pub(crate) min: usize,
    /// `None` when unbounded.
    pub(crate) max: Option<usize>,
}

/// A declared attribute of a complex type.
#[derive(Debug, Clone)]
pub struct AttributeDecl {
    name: String,
    type_ref: TypeRef,
    required: bool,
    default: Option<String>,
}

impl AttributeDecl {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type name as written in the schema, e.g. `xsd:float` or `HexColor`.
    pub fn type_name(&self) -> String {
        self.type_ref.display_name()
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn default(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub(crate) fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }
}

/// A compiled schema.
#[derive(Debug, Clone)]
pub struct Schema {
    target_namespace: Option<String>,
    elements: HashMap<String, ElementDecl>,
    complex_types: HashMap<String, ComplexType>,
    simple_types: HashMap<String, SimpleType>,
}

/// Outcome of resolving a [`TypeRef`].
pub(crate) enum ResolvedType<'a> {
    Complex(&'a ComplexType),
    Simple(&'a TypeRef),
}

impl Schema {
    /// Parses an XSD document.
    pub fn parse(xsd: &str) -> Result<Self> {
        let document = roxmltree::Document::parse(xsd)?;
        let root = document.root_element();
        if !is_xsd(root, "schema") {
            return Err(invalid("root element is not xsd:schema"));
        }

        let mut parser = SchemaParser {
            attribute_groups: HashMap::new(),
        };
        for group in xsd_children(root).filter(|n| is_xsd(*n, "attributeGroup")) {
            let name = required_attr(group, "name")?;
            let attributes = parser.parse_attributes(group)?;
            parser.attribute_groups.insert(name.to_string(), attributes);
        }

        let mut schema = Schema {
            target_namespace: root.attribute("targetNamespace").map(str::to_string),
            elements: HashMap::new(),
            complex_types: HashMap::new(),
            simple_types: HashMap::new(),
        };
        for child in xsd_children(root) {
            match child.tag_name().name() {
                "element" => {
                    let decl = parser.parse_element_decl(child)?;
                    schema.elements.insert(decl.name.clone(), decl);
                }
                "complexType" => {
                    let name = required_attr(child, "name")?;
                    let complex = parser.parse_complex_type(child)?;
                    schema.complex_types.insert(name.to_string(), complex);
                }
                "simpleType" => {
                    let name = required_attr(child, "name")?;
                    let simple = parser.parse_simple_type(child)?;
                    schema.simple_types.insert(name.to_string(), simple);
                }
                "attributeGroup" | "annotation" | "import" => {}
                other => return Err(invalid(format!("unsupported top-level xsd:{other}"))),
            }
        }
        schema.check_references()?;
        Ok(schema)
    }

    pub fn target_namespace(&self) -> Option<&str> {
        self.target_namespace.as_deref()
    }

    pub(crate) fn global_element(&self, name: &str) -> Option<&ElementDecl> {
        self.elements.get(name)
    }

    pub(crate) fn resolve<'a>(&'a self, type_ref: &'a TypeRef) -> Option<ResolvedType<'a>> {
        match type_ref {
            TypeRef::Complex(complex) => Some(ResolvedType::Complex(complex)),
            TypeRef::Named(name) => {
                if let Some(complex) = self.complex_types.get(name) {
                    Some(ResolvedType::Complex(complex))
                } else if self.simple_types.contains_key(name) {
                    Some(ResolvedType::Simple(type_ref))
                } else {
                    None
                }
            }
            TypeRef::Builtin(_) | TypeRef::Simple(_) => Some(ResolvedType::Simple(type_ref)),
        }
    }

    /// Attributes declared for the element at `path`, a list of element names
    /// starting with a global element.
    ///
    /// Returns `None` when no element is declared at that path or when the
    /// element has a simple type.
    pub fn attributes_at(&self, path: &[&str]) -> Option<&[AttributeDecl]> {
        let (first, rest) = path.split_first()?;
        let mut decl = self.elements.get(*first)?;
        for name in rest {
            let ResolvedType::Complex(complex) = self.resolve(&decl.type_ref)? else {
                return None;
            };
            let Content::Elements(particle) = &complex.content else {
                return None;
            };
            decl = self.find_child(particle, name)?;
        }
        match self.resolve(&decl.type_ref)? {
            ResolvedType::Complex(complex) => Some(&complex.attributes),
            ResolvedType::Simple(_) => None,
        }
    }

    /// Every element reachable from the global elements, as its path of
    /// element names and its declared attributes.
    ///
    /// Recursive content models are cut where an element name repeats on
    /// its own path.
    pub fn element_paths(&self) -> Vec<(Vec<String>, &[AttributeDecl])> {
        let mut paths = Vec::new();
        let mut roots: Vec<&ElementDecl> = self.elements.values().collect();
        roots.sort_by(|a, b| a.name.cmp(&b.name));
        for decl in roots {
            self.walk(decl, &mut Vec::new(), &mut paths);
        }
        paths
    }

    fn walk<'a>(
        &'a self,
        decl: &'a ElementDecl,
        path: &mut Vec<String>,
        paths: &mut Vec<(Vec<String>, &'a [AttributeDecl])>,
    ) {
        if path.contains(&decl.name) {
            return;
        }
        path.push(decl.name.clone());
        match self.resolve(&decl.type_ref) {
            Some(ResolvedType::Complex(complex)) => {
                paths.push((path.clone(), &complex.attributes));
                if let Content::Elements(particle) = &complex.content {
                    let mut children = Vec::new();
                    self.child_decls(particle, &mut children);
                    for child in children {
                        self.walk(child, path, paths);
                    }
                }
            }
            Some(ResolvedType::Simple(_)) | None => paths.push((path.clone(), &[] as &[AttributeDecl])),
        }
        path.pop();
    }

    fn child_decls<'a>(&'a self, particle: &'a Particle, out: &mut Vec<&'a ElementDecl>) {
        match &particle.kind {
            ParticleKind::Element(decl) => out.push(decl),
            ParticleKind::ElementRef(reference) => out.extend(self.elements.get(reference)),
            ParticleKind::Sequence(items) | ParticleKind::Choice(items) => {
                for item in items {
                    self.child_decls(item, out);
                }
            }
            ParticleKind::Any => {}
        }
    }

    /// Finds the declaration of child element `name` within a content model.
    pub(crate) fn find_child<'a>(&'a self, particle: &'a Particle, name: &str) -> Option<&'a ElementDecl> {
        match &particle.kind {
            ParticleKind::Element(decl) => (decl.name == name).then_some(decl),
            ParticleKind::ElementRef(reference) => {
                (reference == name).then(|| self.elements.get(reference)).flatten()
            }
            ParticleKind::Sequence(items) | ParticleKind::Choice(items) => {
                items.iter().find_map(|item| self.find_child(item, name))
            }
            ParticleKind::Any => None,
        }
    }

    /// Checks `value` against a simple type.
    pub(crate) fn check_value(&self, type_ref: &TypeRef, value: &str) -> std::result::Result<(), String> {
        match type_ref {
            TypeRef::Builtin(builtin) => builtin.check(value),
            TypeRef::Named(name) => match self.simple_types.get(name) {
                Some(simple) => self.check_simple(simple, value),
                None => Err(format!("`{name}` is not a simple type")),
            },
            TypeRef::Simple(simple) => self.check_simple(simple, value),
            TypeRef::Complex(_) => Err("complex type used for a value".to_string()),
        }
    }

    fn check_simple(&self, simple: &SimpleType, value: &str) -> std::result::Result<(), String> {
        match simple {
            SimpleType::Restriction {
                base,
                enumeration,
                pattern,
                min_inclusive,
                max_inclusive,
            } => {
                self.check_value(base, value)?;
                if !enumeration.is_empty() && !enumeration.iter().any(|allowed| allowed == value) {
                    return Err(format!(
                        "`{value}` is not one of {}",
                        enumeration.join(", ")
                    ));
                }
                if let Some(pattern) = pattern.as_ref().filter(|pattern| !pattern.is_match(value)) {
                    return Err(format!("`{value}` does not match pattern `{pattern}`"));
                }
                if min_inclusive.is_some() || max_inclusive.is_some() {
                    let number: f64 = value
                        .trim()
                        .parse()
                        .map_err(|_| format!("`{value}` is not a number"))?;
                    if min_inclusive.is_some_and(|min| number < min)
                        || max_inclusive.is_some_and(|max| number > max)
                    {
                        return Err(format!("`{value}` is out of range"));
                    }
                }
                Ok(())
            }
            SimpleType::Union(members) => {
                if members.iter().any(|member| self.check_value(member, value).is_ok()) {
                    Ok(())
                } else {
                    Err(format!("`{value}` matches no member of the union"))
                }
            }
        }
    }

    /// The ID-ness of a simple type: `xsd:ID`, `xsd:IDREF` or neither.
    pub(crate) fn id_kind(&self, type_ref: &TypeRef) -> Option<Builtin> {
        match type_ref {
            TypeRef::Builtin(builtin @ (Builtin::Id | Builtin::IdRef)) => Some(*builtin),
            TypeRef::Builtin(_) | TypeRef::Complex(_) => None,
            TypeRef::Named(name) => match self.simple_types.get(name)? {
                SimpleType::Restriction { base, .. } => self.id_kind(base),
                SimpleType::Union(_) => None,
            },
            TypeRef::Simple(simple) => match simple.as_ref() {
                SimpleType::Restriction { base, .. } => self.id_kind(base),
                SimpleType::Union(_) => None,
            },
        }
    }

    fn check_references(&self) -> Result<()> {
        let check = |type_ref: &TypeRef| -> Result<()> {
            match type_ref {
                TypeRef::Named(name)
                    if !self.complex_types.contains_key(name)
                        && !self.simple_types.contains_key(name) =>
                {
                    Err(invalid(format!("undefined type `{name}`")))
                }
                _ => Ok(()),
            }
        };
        let mut pending: Vec<&TypeRef> = self.elements.values().map(|decl| &decl.type_ref).collect();
        pending.extend(self.complex_types.values().flat_map(complex_type_refs));
        pending.extend(self.simple_types.values().flat_map(simple_type_refs));
        while let Some(type_ref) = pending.pop() {
            check(type_ref)?;
            match type_ref {
                TypeRef::Complex(complex) => pending.extend(complex_type_refs(complex)),
                TypeRef::Simple(simple) => pending.extend(simple_type_refs(simple)),
                TypeRef::Builtin(_) | TypeRef::Named(_) => {}
            }
        }
        Ok(())
    }
}

fn complex_type_refs(complex: &ComplexType) -> Vec<&TypeRef> {
    let mut refs: Vec<&TypeRef> = complex.attributes.iter().map(|attr| &attr.type_ref).collect();
    match &complex.content {
        Content::Empty => {}
        Content::Simple(type_ref) => refs.push(type_ref),
        Content::Elements(particle) => collect_particle_refs(particle, &mut refs),
    }
    refs
}

fn collect_particle_refs<'a>(particle: &'a Particle, refs: &mut Vec<&'a TypeRef>) {
    match &particle.kind {
        ParticleKind::Element(decl) => refs.push(&decl.type_ref),
        ParticleKind::Sequence(items) | ParticleKind::Choice(items) => {
            for item in items {
                collect_particle_refs(item, refs);
            }
        }
        ParticleKind::ElementRef(_) | ParticleKind::Any => {}
    }
}

fn simple_type_refs(simple: &SimpleType) -> Vec<&TypeRef> {
    match simple {
        SimpleType::Restriction { base, .. } => vec![base],
        SimpleType::Union(members) => members.iter().collect(),
    }
}

struct SchemaParser {
    attribute_groups: HashMap<String, Vec<AttributeDecl>>,
}

impl SchemaParser {
    fn parse_element_decl(&self, node: Node<'_, '_>) -> Result<ElementDecl> {
        let name = required_attr(node, "name")?.to_string();
        let type_ref = if let Some(type_name) = node.attribute("type") {
            qname_type(node, type_name)
        } else if let Some(complex) = xsd_children(node).find(|n| is_xsd(*n, "complexType")) {
            TypeRef::Complex(Box::new(self.parse_complex_type(complex)?))
        } else if let Some(simple) = xsd_children(node).find(|n| is_xsd(*n, "simpleType")) {
            TypeRef::Simple(Box::new(self.parse_simple_type(simple)?))
        } else {
            TypeRef::Builtin(Builtin::AnyType)
        };
        Ok(ElementDecl { name, type_ref })
    }

    fn parse_complex_type(&self, node: Node<'_, '_>) -> Result<ComplexType> {
        let mut content = Content::Empty;
        let mut attributes = self.parse_attributes(node)?;

        for child in xsd_children(node) {
            match child.tag_name().name() {
                "sequence" | "choice" => content = Content::Elements(self.parse_particle(child)?),
                "simpleContent" => {
                    let extension = xsd_children(child)
                        .find(|n| is_xsd(*n, "extension"))
                        .ok_or_else(|| invalid("simpleContent without xsd:extension"))?;
                    let base = required_attr(extension, "base")?;
                    content = Content::Simple(qname_type(extension, base));
                    attributes.extend(self.parse_attributes(extension)?);
                }
                "attribute" | "attributeGroup" | "anyAttribute" | "annotation" => {}
                other => return Err(invalid(format!("unsupported xsd:{other} in complexType"))),
            }
        }
        Ok(ComplexType {
            attributes,
            content,
        })
    }

    /// Attributes of a complex type, extension or attribute group, with
    /// attribute group references expanded in place.
    fn parse_attributes(&self, node: Node<'_, '_>) -> Result<Vec<AttributeDecl>> {
        let mut attributes = Vec::new();
        for child in xsd_children(node) {
            match child.tag_name().name() {
                "attribute" => {
                    let name = required_attr(child, "name")?.to_string();
                    let type_ref = match child.attribute("type") {
                        Some(type_name) => qname_type(child, type_name),
                        None => TypeRef::Builtin(Builtin::String),
                    };
                    attributes.push(AttributeDecl {
                        name,
                        type_ref,
                        required: child.attribute("use") == Some("required"),
                        default: child.attribute("default").map(str::to_string),
                    });
                }
                "attributeGroup" => {
                    let Some(reference) = child.attribute("ref") else {
                        continue;
                    };
                    let group = self
                        .attribute_groups
                        .get(local_name(reference))
                        .ok_or_else(|| invalid(format!("undefined attribute group `{reference}`")))?;
                    attributes.extend(group.iter().cloned());
                }
                _ => {}
            }
        }
        Ok(attributes)
    }

    fn parse_particle(&self, node: Node<'_, '_>) -> Result<Particle> {
        let min = match node.attribute("minOccurs") {
            Some(value) => value
                .parse()
                .map_err(|_| invalid(format!("invalid minOccurs `{value}`")))?,
            None => 1,
        };
        let max = match node.attribute("maxOccurs") {
            Some("unbounded") => None,
            Some(value) => Some(
                value
                    .parse()
                    .map_err(|_| invalid(format!("invalid maxOccurs `{value}`")))?,
            ),
            None => Some(1),
        };

        let kind = match node.tag_name().name() {
            "element" => match node.attribute("ref") {
                Some(reference) => ParticleKind::ElementRef(local_name(reference).to_string()),
                None => ParticleKind::Element(self.parse_element_decl(node)?),
            },
            "sequence" => ParticleKind::Sequence(self.parse_particles(node)?),
            "choice" => ParticleKind::Choice(self.parse_particles(node)?),
            "any" => ParticleKind::Any,
            other => return Err(invalid(format!("unsupported particle xsd:{other}"))),
        };
        Ok(Particle { kind, min, max })
    }

    fn parse_particles(&self, node: Node<'_, '_>) -> Result<Vec<Particle>> {
        xsd_children(node)
            .filter(|child| child.tag_name().name() != "annotation")
            .map(|child| self.parse_particle(child))
            .collect()
    }

    fn parse_simple_type(&self, node: Node<'_, '_>) -> Result<SimpleType> {
        if let Some(union) = xsd_children(node).find(|n| is_xsd(*n, "union")) {
            let members = required_attr(union, "memberTypes")?
                .split_whitespace()
                .map(|member| qname_type(union, member))
                .collect();
            return Ok(SimpleType::Union(members));
        }

        let restriction = xsd_children(node)
            .find(|n| is_xsd(*n, "restriction"))
            .ok_or_else(|| invalid("simpleType without xsd:restriction or xsd:union"))?;
        let base = qname_type(restriction, required_attr(restriction, "base")?);

        let mut enumeration = Vec::new();
        let mut pattern = None;
        let mut min_inclusive = None;
        let mut max_inclusive = None;
        for facet in xsd_children(restriction) {
            let value = required_attr(facet, "value")?;
            match facet.tag_name().name() {
                "enumeration" => enumeration.push(value.to_string()),
                "pattern" => {
                    let anchored = format!("^(?:{value})$");
                    pattern = Some(
                        Regex::new(&anchored)
                            .map_err(|err| invalid(format!("invalid pattern `{value}`: {err}")))?,
                    );
                }
                "minInclusive" => min_inclusive = Some(parse_bound(value)?),
                "maxInclusive" => max_inclusive = Some(parse_bound(value)?),
                other => return Err(invalid(format!("unsupported facet xsd:{other}"))),
            }
        }
        Ok(SimpleType::Restriction {
            base,
            enumeration,
            pattern,
            min_inclusive,
            max_inclusive,
        })
    }
}

fn parse_bound(value: &str) -> Result<f64> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid(format!("invalid bound `{value}`")))
}

fn is_xsd(node: Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.tag_name().namespace() == Some(XSD_NAMESPACE) && node.tag_name().name() == name
}

fn xsd_children<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(|child| child.is_element() && child.tag_name().namespace() == Some(XSD_NAMESPACE))
}

fn required_attr<'a>(node: Node<'a, '_>, name: &str) -> Result<&'a str> {
    node.attribute(name).ok_or_else(|| {
        invalid(format!(
            "xsd:{} is missing attribute `{name}`",
            node.tag_name().name()
        ))
    })
}

fn local_name(qname: &str) -> &str {
    qname.rsplit_once(':').map_or(qname, |(_, local)| local)
}

/// Resolves a type QName in the scope of `node`.
fn qname_type(node: Node<'_, '_>, qname: &str) -> TypeRef {
    let (prefix, local) = match qname.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, qname),
    };
    let in_xsd = node.lookup_namespace_uri(prefix) == Some(XSD_NAMESPACE);
    match Builtin::from_local_name(local) {
        Some(builtin) if in_xsd => TypeRef::Builtin(builtin),
        _ => TypeRef::Named(local.to_string()),
    }
}

fn invalid(message: impl Into<String>) -> ConversionError {
    ConversionError::InvalidSchema(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"<xsd:schema xmlns:xsd="http://www.w3.org/2001/XMLSchema"
        targetNamespace="urn:test" elementFormDefault="qualified">
      <xsd:simpleType name="Color">
        <xsd:restriction base="xsd:string">
          <xsd:pattern value="[0-9a-f]{6}"/>
        </xsd:restriction>
      </xsd:simpleType>
      <xsd:simpleType name="Side">
        <xsd:union memberTypes="Token xsd:float"/>
      </xsd:simpleType>
      <xsd:simpleType name="Token">
        <xsd:restriction base="xsd:string">
          <xsd:enumeration value="Top"/>
        </xsd:restriction>
      </xsd:simpleType>
      <xsd:attributeGroup name="Common">
        <xsd:attribute name="id" type="xsd:ID" use="required"/>
      </xsd:attributeGroup>
      <xsd:element name="Root">
        <xsd:complexType>
          <xsd:sequence>
            <xsd:element name="Item" maxOccurs="unbounded">
              <xsd:complexType>
                <xsd:attributeGroup ref="Common"/>
                <xsd:attribute name="color" type="Color" default="000000"/>
                <xsd:attribute name="side" type="Side"/>
              </xsd:complexType>
            </xsd:element>
          </xsd:sequence>
        </xsd:complexType>
      </xsd:element>
    </xsd:schema>"#;

    #[test]
    fn test_attributes_at() {
        let schema = Schema::parse(SCHEMA).unwrap();
        assert_eq!(schema.target_namespace(), Some("urn:test"));

        let attributes = schema.attributes_at(&["Root", "Item"]).unwrap();
        let names: Vec<_> = attributes.iter().map(AttributeDecl::name).collect();
        assert_eq!(names, ["id", "color", "side"]);
        assert_eq!(attributes[0].type_name(), "xsd:ID");
        assert!(attributes[0].required());
        assert_eq!(attributes[1].type_name(), "Color");
        assert_eq!(attributes[1].default(), Some("000000"));

        assert!(schema.attributes_at(&["Root", "Missing"]).is_none());
        assert!(schema.attributes_at(&[]).is_none());
    }

    #[test]
    fn test_element_paths() {
        let schema = Schema::parse(SCHEMA).unwrap();
        let paths: Vec<_> = schema
            .element_paths()
            .into_iter()
            .map(|(path, attributes)| (path.join("/"), attributes.len()))
            .collect();
        assert_eq!(
            paths,
            [("Root".to_string(), 0), ("Root/Item".to_string(), 3)]
        );
    }

    #[test]
    fn test_check_value() {
        let schema = Schema::parse(SCHEMA).unwrap();
        let color = TypeRef::Named("Color".to_string());
        assert!(schema.check_value(&color, "00ff00").is_ok());
        assert!(schema.check_value(&color, "00ff00ff").is_err());

        let side = TypeRef::Named("Side".to_string());
        assert!(schema.check_value(&side, "Top").is_ok());
        assert!(schema.check_value(&side, "1.5").is_ok());
        assert!(schema.check_value(&side, "Left").is_err());

        let id = TypeRef::Builtin(Builtin::Id);
        assert!(schema.check_value(&id, "a b").is_err());
        assert_eq!(schema.id_kind(&id), Some(Builtin::Id));
    }

    #[test]
    fn test_undefined_type_rejected() {
        let xsd = r#"<xsd:schema xmlns:xsd="http://www.w3.org/2001/XMLSchema">
          <xsd:element name="Root" type="Missing"/>
        </xsd:schema>"#;
        assert!(matches!(
            Schema::parse(xsd),
            Err(ConversionError::InvalidSchema(_))
        ));
    }

    #[test]
    fn test_unsupported_construct_rejected() {
        let xsd = r#"<xsd:schema xmlns:xsd="http://www.w3.org/2001/XMLSchema">
          <xsd:group name="G"><xsd:sequence/></xsd:group>
        </xsd:schema>"#;
        assert!(matches!(
            Schema::parse(xsd),
            Err(ConversionError::InvalidSchema(_))
        ));
    }
}
