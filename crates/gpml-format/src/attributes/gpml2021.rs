//! Attribute metadata of GPML 2021.

use super::{AttributeSpec as A, ElementAttributes};

const RECT: &[A] = &[
    A::required("centerX", "xsd:float"),
    A::required("centerY", "xsd:float"),
    A::required("width", "xsd:float"),
    A::required("height", "xsd:float"),
];

const FONT: &[A] = &[
    A::defaulted("textColor", "HexColor", "000000"),
    A::defaulted("fontName", "xsd:string", "Arial"),
    A::defaulted("fontWeight", "FontWeightType", "Normal"),
    A::defaulted("fontStyle", "FontStyleType", "Normal"),
    A::defaulted("fontDecoration", "FontDecorationType", "Normal"),
    A::defaulted("fontStrikethru", "FontStrikethruType", "Normal"),
    A::defaulted("fontSize", "xsd:nonNegativeInteger", "12"),
    A::defaulted("hAlign", "HAlignType", "Center"),
    A::defaulted("vAlign", "VAlignType", "Middle"),
];

const SHAPE_STYLE: &[A] = &[
    A::defaulted("borderColor", "HexColor", "000000"),
    A::defaulted("borderStyle", "xsd:string", "Solid"),
    A::defaulted("borderWidth", "xsd:float", "1.0"),
    A::defaulted("fillColor", "HexColor", "ffffff"),
    A::defaulted("shapeType", "xsd:string", "Rectangle"),
    A::optional("zOrder", "xsd:integer"),
];

const LINE_GRAPHICS: &[A] = &[
    A::defaulted("lineColor", "HexColor", "000000"),
    A::defaulted("lineStyle", "xsd:string", "Solid"),
    A::defaulted("lineWidth", "xsd:float", "1.0"),
    A::defaulted("connectorType", "ConnectorType", "Straight"),
    A::optional("zOrder", "xsd:integer"),
];

const ELEMENT_REF: &[A] = &[A::required("elementRef", "xsd:IDREF")];

const ELEMENT_ID: A = A::required("elementId", "xsd:ID");
const GROUP_REF: A = A::optional("groupRef", "xsd:IDREF");

pub(super) const ELEMENTS: &[ElementAttributes] = &[
    (
        "Pathway",
        &[&[
            A::required("title", "xsd:string"),
            A::optional("organism", "xsd:string"),
            A::optional("source", "xsd:string"),
            A::optional("version", "xsd:string"),
            A::optional("license", "xsd:string"),
        ]],
    ),
    (
        "Xref",
        &[&[
            A::required("identifier", "xsd:string"),
            A::required("dataSource", "xsd:string"),
        ]],
    ),
    ("Url", &[&[A::required("link", "xsd:anyURI")]]),
    (
        "Author",
        &[&[
            A::required("name", "xsd:string"),
            A::optional("fullName", "xsd:string"),
            A::optional("email", "xsd:string"),
        ]],
    ),
    ("Comment", &[&[A::optional("source", "xsd:string")]]),
    (
        "Property",
        &[&[
            A::required("key", "xsd:string"),
            A::required("value", "xsd:string"),
        ]],
    ),
    ("AnnotationRef", &[ELEMENT_REF]),
    ("CitationRef", &[ELEMENT_REF]),
    ("EvidenceRef", &[ELEMENT_REF]),
    (
        "Pathway.Graphics",
        &[&[
            A::required("boardWidth", "xsd:float"),
            A::required("boardHeight", "xsd:float"),
            A::defaulted("backgroundColor", "HexColor", "ffffff"),
        ]],
    ),
    (
        "DataNode",
        &[&[
            ELEMENT_ID,
            A::required("textLabel", "xsd:string"),
            A::defaulted("type", "xsd:string", "Undefined"),
            GROUP_REF,
            A::optional("aliasRef", "xsd:IDREF"),
        ]],
    ),
    ("DataNode.Graphics", &[RECT, FONT, SHAPE_STYLE]),
    (
        "State",
        &[&[
            ELEMENT_ID,
            A::required("textLabel", "xsd:string"),
            A::defaulted("type", "xsd:string", "Undefined"),
        ]],
    ),
    (
        "State.Graphics",
        &[
            &[
                A::required("relX", "RelativeType"),
                A::required("relY", "RelativeType"),
                A::required("width", "xsd:float"),
                A::required("height", "xsd:float"),
            ],
            FONT,
            SHAPE_STYLE,
        ],
    ),
    ("Interaction", &[&[ELEMENT_ID, GROUP_REF]]),
    ("Interaction.Graphics", &[LINE_GRAPHICS]),
    ("GraphicalLine", &[&[ELEMENT_ID, GROUP_REF]]),
    ("GraphicalLine.Graphics", &[LINE_GRAPHICS]),
    (
        "Point",
        &[&[
            ELEMENT_ID,
            A::required("x", "xsd:float"),
            A::required("y", "xsd:float"),
            A::optional("elementRef", "xsd:IDREF"),
            A::optional("relX", "RelativeType"),
            A::optional("relY", "RelativeType"),
            A::defaulted("arrowHead", "xsd:string", "Undirected"),
        ]],
    ),
    (
        "Anchor",
        &[&[
            ELEMENT_ID,
            A::required("position", "AnchorPositionType"),
            A::defaulted("shapeType", "xsd:string", "Square"),
        ]],
    ),
    (
        "Label",
        &[&[
            ELEMENT_ID,
            A::required("textLabel", "xsd:string"),
            A::optional("href", "xsd:string"),
            GROUP_REF,
        ]],
    ),
    ("Label.Graphics", &[RECT, FONT, SHAPE_STYLE]),
    (
        "Shape",
        &[&[
            ELEMENT_ID,
            A::optional("textLabel", "xsd:string"),
            GROUP_REF,
        ]],
    ),
    (
        "Shape.Graphics",
        &[
            RECT,
            FONT,
            SHAPE_STYLE,
            &[A::defaulted("rotation", "xsd:float", "0.0")],
        ],
    ),
    (
        "Group",
        &[&[
            ELEMENT_ID,
            A::optional("textLabel", "xsd:string"),
            A::defaulted("type", "xsd:string", "Group"),
            GROUP_REF,
        ]],
    ),
    ("Group.Graphics", &[RECT, FONT, SHAPE_STYLE]),
    (
        "Annotation",
        &[&[
            ELEMENT_ID,
            A::required("value", "xsd:string"),
            A::defaulted("type", "xsd:string", "Undefined"),
        ]],
    ),
    ("Citation", &[&[ELEMENT_ID]]),
    (
        "Evidence",
        &[&[ELEMENT_ID, A::optional("value", "xsd:string")]],
    ),
];
