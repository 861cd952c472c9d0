//! Reading, writing and converting whole documents
//!
//! Models are written in every supported version, validated against the
//! embedded schema of that version and read back. Legacy documents are also
//! converted to 2021 and back.

use float_cmp::approx_eq;

use gpml_core::{
    ElementId, PathwayModel,
    color::Color,
    geometry::{Coordinate, RectProperty},
    model::{
        Anchor, Author, Comment, DataNode, Group, Groupable, HasElementInfo, Interaction, Label,
        LinePoint, Lined, Shape, Shaped, State,
    },
    style::ShapeStyleProperty,
    vocabulary::{ArrowHeadType, DataNodeType, GroupType, LineStyleType, ShapeType, StateType},
    xref::{DataSource, DataSourceRegistry, create_xref},
};
use gpml_format::{
    ConversionError, FormatVersion, read_document, reader_for, validate::validate_document,
    write_document,
};

fn catalog() -> DataSourceRegistry {
    let mut catalog = DataSourceRegistry::new();
    catalog.register(DataSource::new("Entrez Gene", "L", "ncbigene"));
    catalog
}

fn rect(x: f64, y: f64) -> RectProperty {
    RectProperty::new(Coordinate::new(x, y), 60.0, 20.0).unwrap()
}

fn sample_model() -> PathwayModel {
    let mut catalog = catalog();
    let mut model = PathwayModel::new();
    let pathway = model.pathway_mut();
    pathway.set_title("Round Trip");
    pathway.set_organism(Some("Homo sapiens".to_string()));
    pathway.set_board_size(400.0, 300.0).unwrap();
    pathway.info_mut().add_comment(Comment::new("Curated"));
    model.add_author(Author::new("Ann"));

    let xref = create_xref("7157", "ncbigene", &mut catalog).unwrap();
    let n1 = model
        .add_data_node(
            DataNode::new("TP53", DataNodeType::GeneProduct)
                .with_element_id(ElementId::new("n1"))
                .with_rect(rect(100.0, 100.0))
                .with_xref(xref),
        )
        .unwrap();
    let n2 = model
        .add_data_node(
            DataNode::new("MDM2", DataNodeType::Protein)
                .with_element_id(ElementId::new("n2"))
                .with_rect(rect(250.0, 100.0)),
        )
        .unwrap();
    model
        .add_state(
            n1,
            State::new("P", StateType::ProteinModification)
                .with_element_id(ElementId::new("s1"))
                .with_relative_position(1.0, -1.0)
                .unwrap(),
        )
        .unwrap();

    let line = model
        .add_interaction(
            Interaction::new().with_element_id(ElementId::new("i1")),
            vec![
                LinePoint::new(Coordinate::new(130.0, 100.0)).with_element_id(ElementId::new("p1")),
                LinePoint::new(Coordinate::new(220.0, 100.0))
                    .with_element_id(ElementId::new("p2"))
                    .with_arrow_head(ArrowHeadType::Directed),
            ],
        )
        .unwrap();
    model.link_to(ElementId::new("p1"), n1, 1.0, 0.0).unwrap();
    model.link_to(ElementId::new("p2"), n2, -1.0, 0.0).unwrap();
    model
        .add_anchor(line, Anchor::new(0.5).unwrap().with_element_id(ElementId::new("an1")))
        .unwrap();

    model
        .add_label(
            Label::new("Note")
                .with_element_id(ElementId::new("l1"))
                .with_rect(rect(100.0, 200.0)),
        )
        .unwrap();
    model
        .add_shape(
            Shape::new()
                .with_element_id(ElementId::new("sh1"))
                .with_rect(rect(250.0, 200.0))
                .with_rotation(0.5),
        )
        .unwrap();

    let group = model
        .add_group(Group::new(GroupType::Complex).with_element_id(ElementId::new("g1")))
        .unwrap();
    model.set_group_ref(n1, group).unwrap();
    model.set_group_ref(n2, group).unwrap();
    model
}

fn assert_sample(model: &PathwayModel) {
    let pathway = model.pathway();
    assert_eq!(pathway.title(), "Round Trip");
    assert_eq!(pathway.organism(), Some("Homo sapiens"));
    assert!(approx_eq!(f64, pathway.board_width(), 400.0));
    assert_eq!(pathway.info().comments()[0].text(), "Curated");
    assert_eq!(model.authors()[0].name(), "Ann");

    let n1 = model.data_node(ElementId::new("n1")).unwrap();
    assert_eq!(n1.text_label(), "TP53");
    assert_eq!(n1.data_node_type(), &DataNodeType::GeneProduct);
    let xref = n1.xref().unwrap();
    assert_eq!(xref.identifier(), "7157");
    assert_eq!(xref.data_source().unwrap().full_name(), "Entrez Gene");
    assert!(approx_eq!(f64, n1.shaped().rect().center().x(), 100.0));
    assert_eq!(n1.group_ref(), Some(ElementId::new("g1")));

    assert_eq!(n1.states().len(), 1);
    let state = model.state(n1.states()[0]).unwrap();
    assert_eq!(state.text_label(), "P");
    assert_eq!(state.data_node(), Some(ElementId::new("n1")));
    assert!(approx_eq!(f64, state.rel_x(), 1.0));

    let interaction = model.interaction(ElementId::new("i1")).unwrap();
    let points = interaction.line().points();
    assert_eq!(points.len(), 2);
    let start = model.point(points[0]).unwrap();
    let end = model.point(points[1]).unwrap();
    assert_eq!(start.element_ref(), Some(ElementId::new("n1")));
    assert_eq!(end.element_ref(), Some(ElementId::new("n2")));
    assert_eq!(end.arrow_head(), &ArrowHeadType::Directed);
    assert!(approx_eq!(f64, end.rel_x(), -1.0));
    assert!(approx_eq!(f64, end.position().x(), 220.0));

    let anchors = interaction.line().anchors();
    assert_eq!(anchors, [ElementId::new("an1")]);
    assert!(approx_eq!(f64, model.anchor(anchors[0]).unwrap().position(), 0.5));

    assert_eq!(model.label(ElementId::new("l1")).unwrap().text_label(), "Note");
    let shape = model.shape(ElementId::new("sh1")).unwrap();
    assert!(approx_eq!(f64, shape.rotation(), 0.5));

    let group = model.group(ElementId::new("g1")).unwrap();
    assert_eq!(group.group_type(), &GroupType::Complex);
    assert_eq!(group.members().len(), 2);
}

#[test]
fn test_round_trip_every_version() {
    let model = sample_model();
    for version in FormatVersion::ALL {
        let xml = write_document(&model, version, 2).unwrap();
        validate_document(&xml, version)
            .unwrap_or_else(|err| panic!("{version} output is invalid: {err}\n{xml}"));

        let (detected, read) = read_document(&xml, &mut catalog()).unwrap();
        assert_eq!(detected, version);
        assert_sample(&read);
    }
}

#[test]
fn test_rewrite_is_stable() {
    let model = sample_model();
    for version in FormatVersion::ALL {
        let first = write_document(&model, version, 2).unwrap();
        let (_, read) = read_document(&first, &mut catalog()).unwrap();
        let second = write_document(&read, version, 2).unwrap();
        assert_eq!(first, second, "{version} output changed after a round trip");
    }
}

#[test]
fn test_group_geometry_follows_members() {
    let mut model = sample_model();
    let empty_rect = RectProperty::new(Coordinate::new(300.0, 250.0), 40.0, 30.0).unwrap();
    model
        .add_group(
            Group::new(GroupType::Group)
                .with_element_id(ElementId::new("g2"))
                .with_rect(empty_rect),
        )
        .unwrap();
    let grouped = model.group_bounds(ElementId::new("g1")).unwrap();

    let xml = write_document(&model, FormatVersion::Gpml2021, 2).unwrap();
    let (_, read) = read_document(&xml, &mut catalog()).unwrap();

    // A group with members is stored with the bounds it was written with.
    let group = read.group(ElementId::new("g1")).unwrap();
    let stored = group.shaped().rect();
    assert!(approx_eq!(f64, stored.center().x(), grouped.center().x()));
    assert!(approx_eq!(f64, stored.width(), grouped.width()));
    assert!(approx_eq!(f64, stored.height(), grouped.height()));
    let reread = read.group_bounds(ElementId::new("g1")).unwrap();
    assert!(approx_eq!(f64, reread.width(), grouped.width()));

    // An empty group keeps its own rectangle.
    let empty = read.group(ElementId::new("g2")).unwrap();
    assert_eq!(empty.shaped().rect(), &empty_rect);
}

#[test]
fn test_basic_2021_document() {
    let mut model = PathwayModel::new();
    model.pathway_mut().set_title("Title");
    model.pathway_mut().set_board_size(100.0, 100.0).unwrap();
    model.pathway_mut().set_background_color(Color::WHITE);
    model
        .add_data_node(
            DataNode::new("TextLabel", DataNodeType::Alias)
                .with_element_id(ElementId::new("n1"))
                .with_rect(rect(50.0, 50.0)),
        )
        .unwrap();

    let xml = write_document(&model, FormatVersion::Gpml2021, 2).unwrap();
    validate_document(&xml, FormatVersion::Gpml2021).unwrap();
    let (_, read) = read_document(&xml, &mut DataSourceRegistry::new()).unwrap();

    let pathway = read.pathway();
    assert_eq!(pathway.title(), "Title");
    assert!(approx_eq!(f64, pathway.board_width(), 100.0));
    assert!(approx_eq!(f64, pathway.board_height(), 100.0));
    assert_eq!(pathway.background_color(), Color::WHITE);

    let nodes: Vec<_> = read.data_nodes().collect();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].text_label(), "TextLabel");
    assert_eq!(nodes[0].data_node_type(), &DataNodeType::Alias);
    assert!(nodes[0].xref().is_none());
    assert!(nodes[0].alias_ref().is_none());
}

const LEGACY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Pathway xmlns="http://pathvisio.org/GPML/2013a" Name="Legacy" Organism="Mus musculus">
  <Comment Source="WikiPathways-description">A small pathway</Comment>
  <Graphics BoardWidth="500" BoardHeight="400"/>
  <DataNode TextLabel="Trp53" GraphId="a" Type="GeneProduct" GroupRef="grp">
    <Graphics CenterX="100" CenterY="100" Width="80" Height="20" FillColor="Transparent"/>
    <Xref Database="Entrez Gene" ID="22059"/>
  </DataNode>
  <DataNode TextLabel="Mdm2" GraphId="b" GroupRef="grp">
    <Graphics CenterX="300" CenterY="100" Width="80" Height="20"/>
    <Xref Database="" ID=""/>
  </DataNode>
  <Interaction GraphId="i">
    <Graphics LineStyle="Broken">
      <Point X="140" Y="100" GraphRef="a" RelX="1" RelY="0"/>
      <Point X="260" Y="100" GraphRef="b" RelX="-1" RelY="0" ArrowHead="mim-inhibition"/>
    </Graphics>
    <Xref Database="" ID=""/>
  </Interaction>
  <Shape GraphId="c">
    <Graphics CenterX="200" CenterY="250" Width="300" Height="100" ShapeType="Cell" Rotation="Bottom"/>
  </Shape>
  <Group GroupId="grp" GraphId="grp" Style="None"/>
  <InfoBox CenterX="0" CenterY="0"/>
</Pathway>"#;

#[test]
fn test_legacy_to_2021_and_back() {
    let (version, model) = read_document(LEGACY, &mut catalog()).unwrap();
    assert_eq!(version, FormatVersion::Gpml2013a);

    let modern = write_document(&model, FormatVersion::Gpml2021, 2).unwrap();
    validate_document(&modern, FormatVersion::Gpml2021).unwrap();
    assert!(modern.contains("<Description>A small pathway</Description>"));
    assert!(modern.contains(r#"type="Transparent""#));
    assert!(modern.contains(r#"arrowHead="Inhibition""#));
    assert!(modern.contains(r#"lineStyle="Dashed""#));
    assert!(modern.contains(r#"fillColor="00000000""#));
    assert!(modern.contains(r#"dataSource="ncbigene""#));

    let (_, converted) = read_document(&modern, &mut catalog()).unwrap();
    let a = converted.data_node(ElementId::new("a")).unwrap();
    assert_eq!(a.group_ref(), Some(ElementId::new("grp")));
    assert_eq!(a.xref().unwrap().identifier(), "22059");
    let b = converted.data_node(ElementId::new("b")).unwrap();
    assert_eq!(b.data_node_type(), &DataNodeType::Undefined);
    assert!(b.xref().is_none());

    let legacy = write_document(&converted, FormatVersion::Gpml2013a, 2).unwrap();
    validate_document(&legacy, FormatVersion::Gpml2013a).unwrap();
    // `Style` defaults to `None` and is omitted.
    assert!(!legacy.contains(r#" Style="#));
    assert!(legacy.contains(r#"ArrowHead="mim-inhibition""#));
    assert!(legacy.contains(r#"LineStyle="Broken""#));
    assert!(legacy.contains(r#"Database="Entrez Gene" ID="22059""#));
    assert!(!legacy.contains("Undefined"));

    let (_, reread) = read_document(&legacy, &mut catalog()).unwrap();
    let group = reread.group(ElementId::new("grp")).unwrap();
    assert_eq!(group.group_type(), &GroupType::Transparent);
}

#[test]
fn test_deprecated_compartment_shape() {
    let (_, model) = read_document(LEGACY, &mut catalog()).unwrap();
    let shape = model.shape(ElementId::new("c")).unwrap();
    let style = shape.shaped().shape_style();
    assert_eq!(style.shape_type(), &ShapeType::RoundedRectangle);
    assert_eq!(style.border_style(), &LineStyleType::Double);
    assert!(approx_eq!(f64, style.border_width(), 3.0));
    assert_eq!(style.border_color(), Color::LIGHT_GRAY);

    let modern = write_document(&model, FormatVersion::Gpml2021, 2).unwrap();
    assert!(modern.contains(r#"borderColor="c0c0c0" borderStyle="Double" borderWidth="3.0""#));
    assert!(modern.contains(r#"shapeType="RoundedRectangle""#));
    assert!(!modern.contains("Cell"));
}

#[test]
fn test_rotation_side_tokens() {
    use std::f64::consts::{FRAC_PI_2, PI};

    for (token, radians) in [
        ("Top", 0.0),
        ("Right", FRAC_PI_2),
        ("Bottom", PI),
        ("Left", 3.0 * FRAC_PI_2),
        ("0.25", 0.25),
    ] {
        let xml = LEGACY.replace(r#"Rotation="Bottom""#, &format!(r#"Rotation="{token}""#));
        let (_, model) = read_document(&xml, &mut catalog()).unwrap();
        let rotation = model.shape(ElementId::new("c")).unwrap().rotation();
        assert!(approx_eq!(f64, rotation, radians), "{token} read as {rotation}");
    }
}

#[test]
fn test_2017_only_group_types() {
    let mut model = PathwayModel::new();
    model.pathway_mut().set_title("Groups");
    let node = model
        .add_data_node(
            DataNode::new("A", DataNodeType::GeneProduct)
                .with_element_id(ElementId::new("a"))
                .with_rect(rect(50.0, 50.0)),
        )
        .unwrap();
    let group = model
        .add_group(Group::new(GroupType::Paralog).with_element_id(ElementId::new("g")))
        .unwrap();
    model.set_group_ref(node, group).unwrap();

    let gpml2017 = write_document(&model, FormatVersion::Gpml2017, 2).unwrap();
    validate_document(&gpml2017, FormatVersion::Gpml2017).unwrap();
    let (_, read) = read_document(&gpml2017, &mut catalog()).unwrap();
    assert_eq!(read.group(group).unwrap().group_type(), &GroupType::Paralog);

    let gpml2013a = write_document(&model, FormatVersion::Gpml2013a, 2).unwrap();
    validate_document(&gpml2013a, FormatVersion::Gpml2013a).unwrap();
    let (_, read) = read_document(&gpml2013a, &mut catalog()).unwrap();
    assert_eq!(read.group(group).unwrap().group_type(), &GroupType::Group);
}

#[test]
fn test_reader_rejects_mismatched_version() {
    let err = reader_for(FormatVersion::Gpml2021)
        .read(LEGACY, &mut catalog())
        .unwrap_err();
    assert!(matches!(err, ConversionError::UnsupportedFormat(_)));
}

#[test]
fn test_unknown_namespace() {
    let xml = r#"<Pathway xmlns="http://example.org/other" Name="x"/>"#;
    let err = read_document(xml, &mut catalog()).unwrap_err();
    assert!(matches!(err, ConversionError::UnsupportedFormat(_)));
    assert!(err.to_string().contains("http://example.org/other"));
}

#[test]
fn test_label_keeps_borderless_style() {
    let model = sample_model();
    let xml = write_document(&model, FormatVersion::Gpml2021, 0).unwrap();
    let (_, read) = read_document(&xml, &mut catalog()).unwrap();
    let label = read.label(ElementId::new("l1")).unwrap();
    assert_eq!(label.shaped().shape_style(), &ShapeStyleProperty::borderless());
}
