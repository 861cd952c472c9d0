//! Attribute metadata of GPML 2013a and 2017.

use super::{AttributeSpec as A, ElementAttributes};

const FONT: &[A] = &[
    A::defaulted("FontName", "xsd:string", "Arial"),
    A::defaulted("FontWeight", "FontWeightType", "Normal"),
    A::defaulted("FontStyle", "FontStyleType", "Normal"),
    A::defaulted("FontDecoration", "FontDecorationType", "Normal"),
    A::defaulted("FontStrikethru", "FontStrikethruType", "Normal"),
    A::defaulted("FontSize", "xsd:nonNegativeInteger", "12"),
    A::defaulted("Align", "AlignType", "Center"),
    A::defaulted("Valign", "ValignType", "Middle"),
];

const SHAPE_STYLE: &[A] = &[
    A::defaulted("Color", "ColorType", "Black"),
    A::defaulted("LineStyle", "StyleType", "Solid"),
    A::defaulted("LineThickness", "xsd:float", "1.0"),
    A::defaulted("FillColor", "ColorType", "White"),
    A::defaulted("ShapeType", "xsd:string", "Rectangle"),
    A::optional("ZOrder", "xsd:integer"),
];

const RECT: &[A] = &[
    A::required("CenterX", "xsd:float"),
    A::required("CenterY", "xsd:float"),
    A::required("Width", "xsd:float"),
    A::required("Height", "xsd:float"),
];

const LINE_GRAPHICS: &[A] = &[
    A::defaulted("Color", "ColorType", "Black"),
    A::defaulted("LineThickness", "xsd:float", "1.0"),
    A::defaulted("LineStyle", "StyleType", "Solid"),
    A::defaulted("ConnectorType", "ConnectorType", "Straight"),
    A::optional("ZOrder", "xsd:integer"),
];

const POSITION: &[A] = &[
    A::required("CenterX", "xsd:float"),
    A::required("CenterY", "xsd:float"),
];

pub(super) const ELEMENTS: &[ElementAttributes] = &[
    (
        "Pathway",
        &[&[
            A::required("Name", "xsd:string"),
            A::optional("Organism", "xsd:string"),
            A::optional("Data-Source", "xsd:string"),
            A::optional("Version", "xsd:string"),
            A::optional("Author", "xsd:string"),
            A::optional("Maintainer", "xsd:string"),
            A::optional("Email", "xsd:string"),
            A::optional("License", "xsd:string"),
            A::optional("Last-Modified", "xsd:string"),
        ]],
    ),
    ("Comment", &[&[A::optional("Source", "xsd:string")]]),
    (
        "Attribute",
        &[&[
            A::required("Key", "xsd:string"),
            A::required("Value", "xsd:string"),
        ]],
    ),
    (
        "Xref",
        &[&[
            A::required("Database", "xsd:string"),
            A::required("ID", "xsd:string"),
        ]],
    ),
    (
        "Pathway.Graphics",
        &[&[
            A::required("BoardWidth", "xsd:float"),
            A::required("BoardHeight", "xsd:float"),
        ]],
    ),
    (
        "DataNode",
        &[&[
            A::required("TextLabel", "xsd:string"),
            A::optional("GraphId", "xsd:ID"),
            A::optional("GroupRef", "xsd:string"),
            A::defaulted("Type", "xsd:string", "Unknown"),
        ]],
    ),
    ("DataNode.Graphics", &[RECT, FONT, SHAPE_STYLE]),
    (
        "State",
        &[&[
            A::required("GraphRef", "xsd:IDREF"),
            A::required("TextLabel", "xsd:string"),
            A::optional("GraphId", "xsd:ID"),
            A::defaulted("StateType", "xsd:string", "Undefined"),
        ]],
    ),
    (
        "State.Graphics",
        &[
            &[
                A::required("RelX", "RelativeType"),
                A::required("RelY", "RelativeType"),
                A::required("Width", "xsd:float"),
                A::required("Height", "xsd:float"),
            ],
            FONT,
            SHAPE_STYLE,
        ],
    ),
    (
        "Interaction",
        &[&[
            A::optional("GraphId", "xsd:ID"),
            A::optional("GroupRef", "xsd:string"),
        ]],
    ),
    ("Interaction.Graphics", &[LINE_GRAPHICS]),
    (
        "GraphicalLine",
        &[&[
            A::optional("GraphId", "xsd:ID"),
            A::optional("GroupRef", "xsd:string"),
        ]],
    ),
    ("GraphicalLine.Graphics", &[LINE_GRAPHICS]),
    (
        "Point",
        &[&[
            A::required("X", "xsd:float"),
            A::required("Y", "xsd:float"),
            A::optional("RelX", "RelativeType"),
            A::optional("RelY", "RelativeType"),
            A::optional("GraphRef", "xsd:IDREF"),
            A::optional("GraphId", "xsd:ID"),
            A::defaulted("ArrowHead", "xsd:string", "Line"),
        ]],
    ),
    (
        "Anchor",
        &[&[
            A::required("Position", "AnchorPositionType"),
            A::defaulted("Shape", "xsd:string", "None"),
            A::optional("GraphId", "xsd:ID"),
        ]],
    ),
    (
        "Label",
        &[&[
            A::required("TextLabel", "xsd:string"),
            A::optional("GraphId", "xsd:ID"),
            A::optional("GroupRef", "xsd:string"),
            A::optional("Href", "xsd:string"),
        ]],
    ),
    ("Label.Graphics", &[RECT, FONT, SHAPE_STYLE]),
    (
        "Shape",
        &[&[
            A::optional("TextLabel", "xsd:string"),
            A::optional("GraphId", "xsd:ID"),
            A::optional("GroupRef", "xsd:string"),
        ]],
    ),
    (
        "Shape.Graphics",
        &[
            RECT,
            FONT,
            SHAPE_STYLE,
            &[A::defaulted("Rotation", "RotationType", "0.0")],
        ],
    ),
    (
        "Group",
        &[&[
            A::required("GroupId", "xsd:string"),
            A::optional("GraphId", "xsd:ID"),
            A::optional("GroupRef", "xsd:string"),
            A::defaulted("Style", "GroupStyleType", "None"),
            A::optional("TextLabel", "xsd:string"),
        ]],
    ),
    ("InfoBox", &[POSITION]),
    ("Legend", &[POSITION]),
];
