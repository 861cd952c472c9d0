//! Pathway element kinds.
//!
//! Every element lives in the [`PathwayModel`](super::PathwayModel) arena as
//! one variant of [`Element`]. Relationship fields (group membership, owning
//! line, linked target, ...) hold [`ElementId`]s and can only be changed
//! through the model, which keeps both directions of each relationship in
//! sync. Everything else (labels, styles, comments) is freely editable
//! through the typed `*_mut` accessors of the model.
//!
//! Shared behaviour is exposed through small capability traits rather than a
//! type hierarchy:
//!
//! - [`HasElementInfo`]: comments, dynamic properties and reference lists
//! - [`Shaped`]: rectangle, font and shape style of boxes on the board
//! - [`Lined`]: points, anchors and line style of lines
//! - [`Groupable`]: membership in a [`Group`]

use std::fmt;

use indexmap::IndexSet;

use crate::{
    error::{ModelError, check_range},
    geometry::{Coordinate, RectProperty},
    identifier::ElementId,
    model::{
        info::ElementInfo,
        refs::{Annotation, Citation, Evidence},
    },
    style::{FontProperty, LineStyleProperty, ShapeStyleProperty},
    vocabulary::{AnchorShapeType, ArrowHeadType, DataNodeType, GroupType, StateType},
    xref::Xref,
};

/// Discriminant of an [`Element`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    DataNode,
    State,
    Interaction,
    GraphicalLine,
    Label,
    Shape,
    Group,
    Anchor,
    Point,
    Annotation,
    Citation,
    Evidence,
}

impl ElementKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::DataNode => "DataNode",
            Self::State => "State",
            Self::Interaction => "Interaction",
            Self::GraphicalLine => "GraphicalLine",
            Self::Label => "Label",
            Self::Shape => "Shape",
            Self::Group => "Group",
            Self::Anchor => "Anchor",
            Self::Point => "Point",
            Self::Annotation => "Annotation",
            Self::Citation => "Citation",
            Self::Evidence => "Evidence",
        }
    }

    /// Kinds a line point may be linked to.
    pub fn is_linkable(self) -> bool {
        matches!(
            self,
            Self::DataNode | Self::Shape | Self::Label | Self::Group | Self::Anchor
        )
    }

    /// Kinds that may be members of a group.
    pub fn is_groupable(self) -> bool {
        matches!(
            self,
            Self::DataNode
                | Self::Label
                | Self::Shape
                | Self::Group
                | Self::Interaction
                | Self::GraphicalLine
        )
    }

    pub fn is_line(self) -> bool {
        matches!(self, Self::Interaction | Self::GraphicalLine)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub trait HasElementInfo {
    fn info(&self) -> &ElementInfo;
    fn info_mut(&mut self) -> &mut ElementInfo;
}

pub trait Shaped {
    fn shaped(&self) -> &ShapedData;
    fn shaped_mut(&mut self) -> &mut ShapedData;
}

pub trait Lined {
    fn line(&self) -> &LineData;
    fn line_mut(&mut self) -> &mut LineData;
}

pub trait Groupable {
    fn group_ref(&self) -> Option<ElementId>;
}

/// Geometry and style of a shaped element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapedData {
    rect: RectProperty,
    font: FontProperty,
    shape_style: ShapeStyleProperty,
    group_ref: Option<ElementId>,
}

impl ShapedData {
    fn with_style(shape_style: ShapeStyleProperty) -> Self {
        Self {
            shape_style,
            ..Self::default()
        }
    }

    pub fn rect(&self) -> &RectProperty {
        &self.rect
    }

    pub(crate) fn set_rect(&mut self, rect: RectProperty) {
        self.rect = rect;
    }

    pub fn font(&self) -> &FontProperty {
        &self.font
    }

    pub fn font_mut(&mut self) -> &mut FontProperty {
        &mut self.font
    }

    pub fn shape_style(&self) -> &ShapeStyleProperty {
        &self.shape_style
    }

    pub fn shape_style_mut(&mut self) -> &mut ShapeStyleProperty {
        &mut self.shape_style
    }

    pub fn group_ref(&self) -> Option<ElementId> {
        self.group_ref
    }

    pub(crate) fn set_group_ref(&mut self, group: Option<ElementId>) {
        self.group_ref = group;
    }
}

/// Vertices, anchors and stroke of a line element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineData {
    points: Vec<ElementId>,
    anchors: Vec<ElementId>,
    line_style: LineStyleProperty,
    group_ref: Option<ElementId>,
}

impl LineData {
    /// Point ids in path order. The first and last are the endpoints.
    pub fn points(&self) -> &[ElementId] {
        &self.points
    }

    pub(crate) fn set_points(&mut self, points: Vec<ElementId>) {
        self.points = points;
    }

    pub fn start_point(&self) -> Option<ElementId> {
        self.points.first().copied()
    }

    pub fn end_point(&self) -> Option<ElementId> {
        self.points.last().copied()
    }

    pub fn anchors(&self) -> &[ElementId] {
        &self.anchors
    }

    pub(crate) fn anchors_mut(&mut self) -> &mut Vec<ElementId> {
        &mut self.anchors
    }

    pub fn line_style(&self) -> &LineStyleProperty {
        &self.line_style
    }

    pub fn line_style_mut(&mut self) -> &mut LineStyleProperty {
        &mut self.line_style
    }

    pub fn group_ref(&self) -> Option<ElementId> {
        self.group_ref
    }

    pub(crate) fn set_group_ref(&mut self, group: Option<ElementId>) {
        self.group_ref = group;
    }
}

macro_rules! impl_info {
    ($($ty:ty),+) => {
        $(impl HasElementInfo for $ty {
            fn info(&self) -> &ElementInfo {
                &self.info
            }

            fn info_mut(&mut self) -> &mut ElementInfo {
                &mut self.info
            }
        })+
    };
}

macro_rules! impl_shaped {
    ($($ty:ty),+) => {
        $(impl Shaped for $ty {
            fn shaped(&self) -> &ShapedData {
                &self.shaped
            }

            fn shaped_mut(&mut self) -> &mut ShapedData {
                &mut self.shaped
            }
        }

        impl Groupable for $ty {
            fn group_ref(&self) -> Option<ElementId> {
                self.shaped.group_ref
            }
        }

        impl $ty {
            pub fn with_rect(mut self, rect: RectProperty) -> Self {
                self.shaped.rect = rect;
                self
            }
        })+
    };
}

macro_rules! impl_lined {
    ($($ty:ty),+) => {
        $(impl Lined for $ty {
            fn line(&self) -> &LineData {
                &self.line
            }

            fn line_mut(&mut self) -> &mut LineData {
                &mut self.line
            }
        }

        impl Groupable for $ty {
            fn group_ref(&self) -> Option<ElementId> {
                self.line.group_ref
            }
        })+
    };
}

/// A biological entity: gene product, metabolite, pathway, ...
#[derive(Debug, Clone, PartialEq)]
pub struct DataNode {
    pub(crate) element_id: Option<ElementId>,
    info: ElementInfo,
    shaped: ShapedData,
    text_label: String,
    data_node_type: DataNodeType,
    xref: Option<Xref>,
    states: Vec<ElementId>,
    alias_ref: Option<ElementId>,
}

impl DataNode {
    pub fn new(text_label: impl Into<String>, data_node_type: DataNodeType) -> Self {
        Self {
            element_id: None,
            info: ElementInfo::default(),
            shaped: ShapedData::default(),
            text_label: text_label.into(),
            data_node_type,
            xref: None,
            states: Vec::new(),
            alias_ref: None,
        }
    }

    pub fn with_element_id(mut self, id: ElementId) -> Self {
        self.element_id = Some(id);
        self
    }

    pub fn with_xref(mut self, xref: Xref) -> Self {
        self.xref = Some(xref);
        self
    }

    pub fn element_id(&self) -> Option<ElementId> {
        self.element_id
    }

    pub fn text_label(&self) -> &str {
        &self.text_label
    }

    pub fn set_text_label(&mut self, text_label: impl Into<String>) {
        self.text_label = text_label.into();
    }

    pub fn data_node_type(&self) -> &DataNodeType {
        &self.data_node_type
    }

    pub fn set_data_node_type(&mut self, data_node_type: DataNodeType) {
        self.data_node_type = data_node_type;
    }

    pub fn xref(&self) -> Option<&Xref> {
        self.xref.as_ref()
    }

    pub fn set_xref(&mut self, xref: Option<Xref>) {
        self.xref = xref;
    }

    /// States owned by this node, in insertion order.
    pub fn states(&self) -> &[ElementId] {
        &self.states
    }

    pub(crate) fn states_mut(&mut self) -> &mut Vec<ElementId> {
        &mut self.states
    }

    /// The element this node stands in for, if it is an alias.
    pub fn alias_ref(&self) -> Option<ElementId> {
        self.alias_ref
    }

    pub(crate) fn set_alias_ref(&mut self, target: Option<ElementId>) {
        self.alias_ref = target;
    }
}

/// A modification or other state drawn on the border of a data node.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub(crate) element_id: Option<ElementId>,
    info: ElementInfo,
    data_node: Option<ElementId>,
    text_label: String,
    state_type: StateType,
    rel_x: f64,
    rel_y: f64,
    width: f64,
    height: f64,
    font: FontProperty,
    shape_style: ShapeStyleProperty,
    xref: Option<Xref>,
}

impl State {
    pub const DEFAULT_SIZE: f64 = 15.0;

    pub fn new(text_label: impl Into<String>, state_type: StateType) -> Self {
        Self {
            element_id: None,
            info: ElementInfo::default(),
            data_node: None,
            text_label: text_label.into(),
            state_type,
            rel_x: 0.0,
            rel_y: 0.0,
            width: Self::DEFAULT_SIZE,
            height: Self::DEFAULT_SIZE,
            font: FontProperty::default(),
            shape_style: ShapeStyleProperty::default(),
            xref: None,
        }
    }

    pub fn with_element_id(mut self, id: ElementId) -> Self {
        self.element_id = Some(id);
        self
    }

    /// Sets the offset from the parent node's center; both components must
    /// lie in `[-1, 1]`.
    pub fn with_relative_position(mut self, rel_x: f64, rel_y: f64) -> Result<Self, ModelError> {
        self.set_relative_position(rel_x, rel_y)?;
        Ok(self)
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Result<Self, ModelError> {
        self.set_size(width, height)?;
        Ok(self)
    }

    pub fn with_xref(mut self, xref: Xref) -> Self {
        self.xref = Some(xref);
        self
    }

    pub fn element_id(&self) -> Option<ElementId> {
        self.element_id
    }

    /// The owning data node.
    pub fn data_node(&self) -> Option<ElementId> {
        self.data_node
    }

    pub(crate) fn set_data_node(&mut self, data_node: Option<ElementId>) {
        self.data_node = data_node;
    }

    pub fn text_label(&self) -> &str {
        &self.text_label
    }

    pub fn set_text_label(&mut self, text_label: impl Into<String>) {
        self.text_label = text_label.into();
    }

    pub fn state_type(&self) -> &StateType {
        &self.state_type
    }

    pub fn set_state_type(&mut self, state_type: StateType) {
        self.state_type = state_type;
    }

    pub fn rel_x(&self) -> f64 {
        self.rel_x
    }

    pub fn rel_y(&self) -> f64 {
        self.rel_y
    }

    pub fn set_relative_position(&mut self, rel_x: f64, rel_y: f64) -> Result<(), ModelError> {
        check_range("relX", rel_x, -1.0, 1.0)?;
        check_range("relY", rel_y, -1.0, 1.0)?;
        self.rel_x = rel_x;
        self.rel_y = rel_y;
        Ok(())
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn set_size(&mut self, width: f64, height: f64) -> Result<(), ModelError> {
        // Reuse the rect validation for the dimensions.
        RectProperty::new(Coordinate::default(), width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn font(&self) -> &FontProperty {
        &self.font
    }

    pub fn font_mut(&mut self) -> &mut FontProperty {
        &mut self.font
    }

    pub fn shape_style(&self) -> &ShapeStyleProperty {
        &self.shape_style
    }

    pub fn shape_style_mut(&mut self) -> &mut ShapeStyleProperty {
        &mut self.shape_style
    }

    pub fn xref(&self) -> Option<&Xref> {
        self.xref.as_ref()
    }

    pub fn set_xref(&mut self, xref: Option<Xref>) {
        self.xref = xref;
    }
}

/// A biologically meaningful edge, optionally with its own xref.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Interaction {
    pub(crate) element_id: Option<ElementId>,
    info: ElementInfo,
    line: LineData,
    xref: Option<Xref>,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element_id(mut self, id: ElementId) -> Self {
        self.element_id = Some(id);
        self
    }

    pub fn with_xref(mut self, xref: Xref) -> Self {
        self.xref = Some(xref);
        self
    }

    pub fn element_id(&self) -> Option<ElementId> {
        self.element_id
    }

    pub fn xref(&self) -> Option<&Xref> {
        self.xref.as_ref()
    }

    pub fn set_xref(&mut self, xref: Option<Xref>) {
        self.xref = xref;
    }
}

/// A purely graphical line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphicalLine {
    pub(crate) element_id: Option<ElementId>,
    info: ElementInfo,
    line: LineData,
}

impl GraphicalLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element_id(mut self, id: ElementId) -> Self {
        self.element_id = Some(id);
        self
    }

    pub fn element_id(&self) -> Option<ElementId> {
        self.element_id
    }
}

/// Free text placed on the board.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub(crate) element_id: Option<ElementId>,
    info: ElementInfo,
    shaped: ShapedData,
    text_label: String,
    href: Option<String>,
}

impl Label {
    pub fn new(text_label: impl Into<String>) -> Self {
        Self {
            element_id: None,
            info: ElementInfo::default(),
            shaped: ShapedData::with_style(ShapeStyleProperty::borderless()),
            text_label: text_label.into(),
            href: None,
        }
    }

    pub fn with_element_id(mut self, id: ElementId) -> Self {
        self.element_id = Some(id);
        self
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn element_id(&self) -> Option<ElementId> {
        self.element_id
    }

    pub fn text_label(&self) -> &str {
        &self.text_label
    }

    pub fn set_text_label(&mut self, text_label: impl Into<String>) {
        self.text_label = text_label.into();
    }

    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    pub fn set_href(&mut self, href: Option<String>) {
        self.href = href;
    }
}

/// A graphical shape, optionally rotated and labelled.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub(crate) element_id: Option<ElementId>,
    info: ElementInfo,
    shaped: ShapedData,
    text_label: Option<String>,
    rotation: f64,
}

impl Shape {
    pub fn new() -> Self {
        Self {
            element_id: None,
            info: ElementInfo::default(),
            shaped: ShapedData::default(),
            text_label: None,
            rotation: 0.0,
        }
    }

    pub fn with_element_id(mut self, id: ElementId) -> Self {
        self.element_id = Some(id);
        self
    }

    pub fn with_text_label(mut self, text_label: impl Into<String>) -> Self {
        self.text_label = Some(text_label.into());
        self
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn element_id(&self) -> Option<ElementId> {
        self.element_id
    }

    pub fn text_label(&self) -> Option<&str> {
        self.text_label.as_deref()
    }

    pub fn set_text_label(&mut self, text_label: Option<String>) {
        self.text_label = text_label;
    }

    /// Rotation in radians around the center.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self::new()
    }
}

/// A set of elements treated as a unit.
///
/// The member set is authoritative: an element's group ref names a group if
/// and only if that group lists it as a member.
///
/// The stored rectangle only describes an empty group. Once a group has
/// members its geometry is [`PathwayModel::group_bounds`], and that is what
/// writers emit, so reading the output back stores the computed bounds.
///
/// [`PathwayModel::group_bounds`]: crate::model::PathwayModel::group_bounds
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub(crate) element_id: Option<ElementId>,
    info: ElementInfo,
    shaped: ShapedData,
    group_type: GroupType,
    text_label: Option<String>,
    xref: Option<Xref>,
    members: IndexSet<ElementId>,
}

impl Group {
    pub fn new(group_type: GroupType) -> Self {
        Self {
            element_id: None,
            info: ElementInfo::default(),
            shaped: ShapedData::with_style(ShapeStyleProperty::borderless()),
            group_type,
            text_label: None,
            xref: None,
            members: IndexSet::new(),
        }
    }

    pub fn with_element_id(mut self, id: ElementId) -> Self {
        self.element_id = Some(id);
        self
    }

    pub fn with_text_label(mut self, text_label: impl Into<String>) -> Self {
        self.text_label = Some(text_label.into());
        self
    }

    pub fn with_xref(mut self, xref: Xref) -> Self {
        self.xref = Some(xref);
        self
    }

    pub fn element_id(&self) -> Option<ElementId> {
        self.element_id
    }

    pub fn group_type(&self) -> &GroupType {
        &self.group_type
    }

    pub fn set_group_type(&mut self, group_type: GroupType) {
        self.group_type = group_type;
    }

    pub fn text_label(&self) -> Option<&str> {
        self.text_label.as_deref()
    }

    pub fn set_text_label(&mut self, text_label: Option<String>) {
        self.text_label = text_label;
    }

    pub fn xref(&self) -> Option<&Xref> {
        self.xref.as_ref()
    }

    pub fn set_xref(&mut self, xref: Option<Xref>) {
        self.xref = xref;
    }

    /// Direct members in the order they joined.
    pub fn members(&self) -> &IndexSet<ElementId> {
        &self.members
    }

    pub fn has_member(&self, id: ElementId) -> bool {
        self.members.contains(&id)
    }

    pub(crate) fn members_mut(&mut self) -> &mut IndexSet<ElementId> {
        &mut self.members
    }
}

/// A point at a proportional position along a line, which other lines can
/// link to.
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    pub(crate) element_id: Option<ElementId>,
    line: Option<ElementId>,
    position: f64,
    shape_type: AnchorShapeType,
}

impl Anchor {
    /// Creates an anchor at `position`, which must lie in `[0, 1]`.
    pub fn new(position: f64) -> Result<Self, ModelError> {
        check_range("position", position, 0.0, 1.0)?;
        Ok(Self {
            element_id: None,
            line: None,
            position,
            shape_type: AnchorShapeType::default(),
        })
    }

    pub fn with_element_id(mut self, id: ElementId) -> Self {
        self.element_id = Some(id);
        self
    }

    pub fn with_shape_type(mut self, shape_type: AnchorShapeType) -> Self {
        self.shape_type = shape_type;
        self
    }

    pub fn element_id(&self) -> Option<ElementId> {
        self.element_id
    }

    /// The owning line.
    pub fn line(&self) -> Option<ElementId> {
        self.line
    }

    pub(crate) fn set_line(&mut self, line: Option<ElementId>) {
        self.line = line;
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: f64) -> Result<(), ModelError> {
        check_range("position", position, 0.0, 1.0)?;
        self.position = position;
        Ok(())
    }

    pub fn shape_type(&self) -> &AnchorShapeType {
        &self.shape_type
    }

    pub fn set_shape_type(&mut self, shape_type: AnchorShapeType) {
        self.shape_type = shape_type;
    }
}

/// A vertex of a line.
///
/// When linked, the absolute position follows the target: it is recomputed
/// whenever the target moves.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePoint {
    pub(crate) element_id: Option<ElementId>,
    line: Option<ElementId>,
    position: Coordinate,
    arrow_head: ArrowHeadType,
    element_ref: Option<ElementId>,
    rel_x: f64,
    rel_y: f64,
}

impl LinePoint {
    pub fn new(position: Coordinate) -> Self {
        Self {
            element_id: None,
            line: None,
            position,
            arrow_head: ArrowHeadType::default(),
            element_ref: None,
            rel_x: 0.0,
            rel_y: 0.0,
        }
    }

    pub fn with_element_id(mut self, id: ElementId) -> Self {
        self.element_id = Some(id);
        self
    }

    pub fn with_arrow_head(mut self, arrow_head: ArrowHeadType) -> Self {
        self.arrow_head = arrow_head;
        self
    }

    pub fn element_id(&self) -> Option<ElementId> {
        self.element_id
    }

    pub fn line(&self) -> Option<ElementId> {
        self.line
    }

    pub(crate) fn set_line(&mut self, line: Option<ElementId>) {
        self.line = line;
    }

    pub fn position(&self) -> Coordinate {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Coordinate) {
        self.position = position;
    }

    pub fn arrow_head(&self) -> &ArrowHeadType {
        &self.arrow_head
    }

    pub fn set_arrow_head(&mut self, arrow_head: ArrowHeadType) {
        self.arrow_head = arrow_head;
    }

    /// The linked element or anchor.
    pub fn element_ref(&self) -> Option<ElementId> {
        self.element_ref
    }

    pub fn rel_x(&self) -> f64 {
        self.rel_x
    }

    pub fn rel_y(&self) -> f64 {
        self.rel_y
    }

    pub(crate) fn set_link(&mut self, target: ElementId, rel_x: f64, rel_y: f64) {
        self.element_ref = Some(target);
        self.rel_x = rel_x;
        self.rel_y = rel_y;
    }

    pub(crate) fn clear_link(&mut self) {
        self.element_ref = None;
        self.rel_x = 0.0;
        self.rel_y = 0.0;
    }
}

impl_info!(DataNode, State, Interaction, GraphicalLine, Label, Shape, Group);
impl_shaped!(DataNode, Label, Shape, Group);
impl_lined!(Interaction, GraphicalLine);

/// An element stored in the model arena.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    DataNode(DataNode),
    State(State),
    Interaction(Interaction),
    GraphicalLine(GraphicalLine),
    Label(Label),
    Shape(Shape),
    Group(Group),
    Anchor(Anchor),
    Point(LinePoint),
    Annotation(Annotation),
    Citation(Citation),
    Evidence(Evidence),
}

macro_rules! dispatch {
    ($self:expr, $binding:ident => $body:expr) => {
        match $self {
            Element::DataNode($binding) => $body,
            Element::State($binding) => $body,
            Element::Interaction($binding) => $body,
            Element::GraphicalLine($binding) => $body,
            Element::Label($binding) => $body,
            Element::Shape($binding) => $body,
            Element::Group($binding) => $body,
            Element::Anchor($binding) => $body,
            Element::Point($binding) => $body,
            Element::Annotation($binding) => $body,
            Element::Citation($binding) => $body,
            Element::Evidence($binding) => $body,
        }
    };
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::DataNode(_) => ElementKind::DataNode,
            Self::State(_) => ElementKind::State,
            Self::Interaction(_) => ElementKind::Interaction,
            Self::GraphicalLine(_) => ElementKind::GraphicalLine,
            Self::Label(_) => ElementKind::Label,
            Self::Shape(_) => ElementKind::Shape,
            Self::Group(_) => ElementKind::Group,
            Self::Anchor(_) => ElementKind::Anchor,
            Self::Point(_) => ElementKind::Point,
            Self::Annotation(_) => ElementKind::Annotation,
            Self::Citation(_) => ElementKind::Citation,
            Self::Evidence(_) => ElementKind::Evidence,
        }
    }

    /// The id under which the element is registered; `None` once detached.
    pub fn element_id(&self) -> Option<ElementId> {
        dispatch!(self, element => element.element_id)
    }

    pub(crate) fn set_element_id(&mut self, id: Option<ElementId>) {
        dispatch!(self, element => element.element_id = id)
    }

    pub fn info(&self) -> Option<&ElementInfo> {
        match self {
            Self::DataNode(e) => Some(e.info()),
            Self::State(e) => Some(e.info()),
            Self::Interaction(e) => Some(e.info()),
            Self::GraphicalLine(e) => Some(e.info()),
            Self::Label(e) => Some(e.info()),
            Self::Shape(e) => Some(e.info()),
            Self::Group(e) => Some(e.info()),
            _ => None,
        }
    }

    pub fn info_mut(&mut self) -> Option<&mut ElementInfo> {
        match self {
            Self::DataNode(e) => Some(e.info_mut()),
            Self::State(e) => Some(e.info_mut()),
            Self::Interaction(e) => Some(e.info_mut()),
            Self::GraphicalLine(e) => Some(e.info_mut()),
            Self::Label(e) => Some(e.info_mut()),
            Self::Shape(e) => Some(e.info_mut()),
            Self::Group(e) => Some(e.info_mut()),
            _ => None,
        }
    }

    pub fn shaped(&self) -> Option<&ShapedData> {
        match self {
            Self::DataNode(e) => Some(e.shaped()),
            Self::Label(e) => Some(e.shaped()),
            Self::Shape(e) => Some(e.shaped()),
            Self::Group(e) => Some(e.shaped()),
            _ => None,
        }
    }

    pub(crate) fn shaped_mut(&mut self) -> Option<&mut ShapedData> {
        match self {
            Self::DataNode(e) => Some(e.shaped_mut()),
            Self::Label(e) => Some(e.shaped_mut()),
            Self::Shape(e) => Some(e.shaped_mut()),
            Self::Group(e) => Some(e.shaped_mut()),
            _ => None,
        }
    }

    pub fn line(&self) -> Option<&LineData> {
        match self {
            Self::Interaction(e) => Some(e.line()),
            Self::GraphicalLine(e) => Some(e.line()),
            _ => None,
        }
    }

    pub(crate) fn line_mut(&mut self) -> Option<&mut LineData> {
        match self {
            Self::Interaction(e) => Some(e.line_mut()),
            Self::GraphicalLine(e) => Some(e.line_mut()),
            _ => None,
        }
    }

    /// The group this element belongs to, for groupable kinds.
    pub fn group_ref(&self) -> Option<ElementId> {
        self.shaped()
            .and_then(ShapedData::group_ref)
            .or_else(|| self.line().and_then(LineData::group_ref))
    }

    pub(crate) fn set_group_ref(&mut self, group: Option<ElementId>) {
        if let Some(shaped) = self.shaped_mut() {
            shaped.set_group_ref(group);
        } else if let Some(line) = self.line_mut() {
            line.set_group_ref(group);
        }
    }

    /// Clears the id and every relationship field of a removed element.
    pub(crate) fn detach(&mut self) {
        self.set_element_id(None);
        self.set_group_ref(None);
        if let Some(line) = self.line_mut() {
            line.points.clear();
            line.anchors.clear();
        }
        match self {
            Self::DataNode(node) => {
                node.states.clear();
                node.alias_ref = None;
            }
            Self::State(state) => state.data_node = None,
            Self::Group(group) => group.members.clear(),
            Self::Anchor(anchor) => anchor.line = None,
            Self::Point(point) => {
                point.line = None;
                point.clear_link();
            }
            _ => {}
        }
    }

    /// Rewrites every relationship field naming `old` to name `new`.
    pub(crate) fn replace_id(&mut self, old: ElementId, new: ElementId) {
        let swap = |slot: &mut Option<ElementId>| {
            if *slot == Some(old) {
                *slot = Some(new);
            }
        };
        let swap_all = |ids: &mut [ElementId]| {
            for id in ids.iter_mut().filter(|id| **id == old) {
                *id = new;
            }
        };

        if let Some(info) = self.info_mut() {
            info.replace_id(old, new);
        }
        if let Some(shaped) = self.shaped_mut() {
            swap(&mut shaped.group_ref);
        }
        if let Some(line) = self.line_mut() {
            swap(&mut line.group_ref);
            swap_all(&mut line.points);
            swap_all(&mut line.anchors);
        }
        match self {
            Self::DataNode(node) => {
                swap(&mut node.alias_ref);
                swap_all(&mut node.states);
            }
            Self::State(state) => swap(&mut state.data_node),
            Self::Group(group) => {
                if group.members.contains(&old) {
                    group.members = group
                        .members
                        .iter()
                        .map(|&id| if id == old { new } else { id })
                        .collect();
                }
            }
            Self::Anchor(anchor) => swap(&mut anchor.line),
            Self::Point(point) => {
                swap(&mut point.line);
                swap(&mut point.element_ref);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_relative_position_domain() {
        assert!(State::new("P", StateType::default())
            .with_relative_position(1.0, -1.0)
            .is_ok());
        let err = State::new("P", StateType::default())
            .with_relative_position(1.5, 0.0)
            .unwrap_err();
        assert!(matches!(err, ModelError::OutOfRange { field: "relX", .. }));
    }

    #[test]
    fn test_state_rejects_negative_size() {
        let mut state = State::new("P", StateType::default());
        assert!(state.set_size(-1.0, 5.0).is_err());
        assert_eq!(state.width(), State::DEFAULT_SIZE);
    }

    #[test]
    fn test_anchor_position_domain() {
        assert!(Anchor::new(0.0).is_ok());
        assert!(Anchor::new(1.0).is_ok());
        assert!(Anchor::new(-0.01).is_err());
        assert!(Anchor::new(1.01).is_err());
        assert_eq!(
            Anchor::new(0.5).unwrap().shape_type(),
            &AnchorShapeType::Square
        );
    }

    #[test]
    fn test_element_kind_capabilities() {
        assert!(ElementKind::Anchor.is_linkable());
        assert!(!ElementKind::Point.is_linkable());
        assert!(ElementKind::Interaction.is_groupable());
        assert!(!ElementKind::State.is_groupable());
    }

    #[test]
    fn test_replace_id() {
        let old = ElementId::new("old-group");
        let new = ElementId::new("new-group");
        let mut group = Group::new(GroupType::Group);
        group.members_mut().insert(old);
        let mut element = Element::Group(group);
        element.set_group_ref(Some(old));
        element.replace_id(old, new);

        assert_eq!(element.group_ref(), Some(new));
        match element {
            Element::Group(group) => assert!(group.has_member(new)),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_label_defaults_borderless() {
        let label = Label::new("text");
        assert!(label.shaped().shape_style().fill_color().is_transparent());
    }
}
