//! Translation between legacy GPML tokens and model vocabulary.

use std::f64::consts::{FRAC_PI_2, PI};

use log::warn;

use gpml_core::{
    color::Color,
    style::ShapeStyleProperty,
    vocabulary::{
        ArrowHeadType, DataNodeType, GroupType, LineStyleType, ShapeType, TypeRegistry,
    },
};

use crate::version::FormatVersion;

/// Dynamic property that marks a double border or line in legacy documents.
pub(crate) const DOUBLE_LINE_PROPERTY: &str = "org.pathvisio.DoubleLineProperty";
pub(crate) const DOUBLE_LINE_VALUE: &str = "Double";

/// Comment source holding the pathway description.
pub(crate) const DESCRIPTION_SOURCE: &str = "WikiPathways-description";

/// Data node type written for [`DataNodeType::Undefined`].
pub(crate) const UNKNOWN_DATA_NODE_TYPE: &str = "Unknown";

/// Legacy arrowhead tokens and their modern counterparts.
const ARROW_HEADS: &[(&str, ArrowHeadType)] = &[
    ("Line", ArrowHeadType::Undirected),
    ("Arrow", ArrowHeadType::Directed),
    ("mim-conversion", ArrowHeadType::Conversion),
    ("mim-inhibition", ArrowHeadType::Inhibition),
    ("mim-catalysis", ArrowHeadType::Catalysis),
    ("mim-stimulation", ArrowHeadType::Stimulation),
    ("mim-binding", ArrowHeadType::Binding),
    ("mim-translocation", ArrowHeadType::Translocation),
    ("mim-transcription-translation", ArrowHeadType::TranscriptionTranslation),
    ("mim-necessary-stimulation", ArrowHeadType::NecessaryStimulation),
    ("mim-cleavage", ArrowHeadType::Cleavage),
    ("mim-covalent-bond", ArrowHeadType::CovalentBond),
    ("mim-branching-left", ArrowHeadType::BranchingLeft),
    ("mim-branching-right", ArrowHeadType::BranchingRight),
    ("TBar", ArrowHeadType::Inhibition),
];

/// Spaced legacy shape names of shapes that still exist.
const RENAMED_SHAPES: &[(&str, ShapeType)] = &[
    ("Endoplasmic Reticulum", ShapeType::EndoplasmicReticulum),
    ("Golgi Apparatus", ShapeType::GolgiApparatus),
    ("Sarcoplasmic Reticulum", ShapeType::SarcoplasmicReticulum),
    ("Extracellular region", ShapeType::ExtracellularRegion),
];

/// Border forced onto shapes read from a deprecated compartment token.
pub(crate) const COMPARTMENT_BORDER_WIDTH: f64 = 3.0;

pub(crate) fn arrow_head_from_legacy(
    token: &str,
    registry: &mut TypeRegistry<ArrowHeadType>,
) -> ArrowHeadType {
    ARROW_HEADS
        .iter()
        .find(|(legacy, _)| *legacy == token)
        .map(|(_, arrow_head)| arrow_head.clone())
        .unwrap_or_else(|| registry.register(token))
}

pub(crate) fn arrow_head_to_legacy(arrow_head: &ArrowHeadType) -> &str {
    if arrow_head.is_custom() {
        return arrow_head.name();
    }
    ARROW_HEADS
        .iter()
        .find(|(_, modern)| modern == arrow_head)
        .map_or(arrow_head.name(), |(legacy, _)| legacy)
}

/// Resolves a legacy shape token.
///
/// Deprecated compartment tokens (`Cell`, `Organelle`, `Nucleus`, `Vesicle`)
/// become a plain outline and also restyle the border of `style`: double,
/// three units wide, light gray.
pub(crate) fn apply_legacy_shape(
    token: &str,
    style: &mut ShapeStyleProperty,
    registry: &mut TypeRegistry<ShapeType>,
) {
    let compartment = match token {
        "Cell" | "Organelle" => Some(ShapeType::RoundedRectangle),
        "Nucleus" | "Vesicle" => Some(ShapeType::Oval),
        _ => None,
    };
    let Some(shape_type) = compartment else {
        let shape_type = RENAMED_SHAPES
            .iter()
            .find(|(legacy, _)| *legacy == token)
            .map(|(_, modern)| modern.clone())
            .unwrap_or_else(|| registry.register(token));
        style.set_shape_type(shape_type);
        return;
    };

    style.set_shape_type(shape_type);
    style.set_border_style(LineStyleType::Double);
    style.set_border_color(Color::LIGHT_GRAY);
    // The width is a positive constant.
    let _ = style.set_border_width(COMPARTMENT_BORDER_WIDTH);
}

pub(crate) fn shape_to_legacy(shape_type: &ShapeType) -> &str {
    RENAMED_SHAPES
        .iter()
        .find(|(_, modern)| modern == shape_type)
        .map_or(shape_type.name(), |(legacy, _)| legacy)
}

/// Parses a legacy rotation: one of the side tokens, or radians.
///
/// Side tokens take priority over the numeric parse.
pub(crate) fn parse_rotation(value: &str) -> Result<f64, String> {
    match value.trim() {
        "Top" => Ok(0.0),
        "Right" => Ok(FRAC_PI_2),
        "Bottom" => Ok(PI),
        "Left" => Ok(3.0 * FRAC_PI_2),
        other => other
            .parse()
            .map_err(|_| format!("`{value}` is neither a side nor an angle")),
    }
}

/// Legacy `LineStyle` of a model line style; double is carried separately.
pub(crate) fn line_style_to_legacy(style: &LineStyleType) -> &'static str {
    match style {
        LineStyleType::Dashed => "Broken",
        LineStyleType::Solid | LineStyleType::Double => "Solid",
        LineStyleType::Custom(name) => {
            warn!(style = name.as_str(); "Custom line style written as Solid");
            "Solid"
        }
    }
}

pub(crate) fn line_style_from_legacy(token: &str) -> LineStyleType {
    match token {
        "Broken" => LineStyleType::Dashed,
        _ => LineStyleType::Solid,
    }
}

pub(crate) fn data_node_type_from_legacy(
    token: &str,
    registry: &mut TypeRegistry<DataNodeType>,
) -> DataNodeType {
    if token == UNKNOWN_DATA_NODE_TYPE {
        DataNodeType::Undefined
    } else {
        registry.register(token)
    }
}

pub(crate) fn data_node_type_to_legacy(data_node_type: &DataNodeType) -> &str {
    match data_node_type {
        DataNodeType::Undefined => UNKNOWN_DATA_NODE_TYPE,
        other => other.name(),
    }
}

pub(crate) fn group_type_from_legacy(
    token: &str,
    registry: &mut TypeRegistry<GroupType>,
) -> GroupType {
    match token {
        "None" => GroupType::Transparent,
        other => registry.register(other),
    }
}

/// Legacy group style of `group_type`; types the version cannot express
/// are written as `Group`.
pub(crate) fn group_type_to_legacy(group_type: &GroupType, version: FormatVersion) -> &'static str {
    match group_type {
        GroupType::Transparent => "None",
        GroupType::Group => "Group",
        GroupType::Complex => "Complex",
        GroupType::Pathway => "Pathway",
        GroupType::Analog if version == FormatVersion::Gpml2017 => "Analog",
        GroupType::Paralog if version == FormatVersion::Gpml2017 => "Paralog",
        other => {
            warn!(group_type = other.name(), version:% = version; "Group type not supported, written as Group");
            "Group"
        }
    }
}
