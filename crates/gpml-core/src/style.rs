//! Font, shape and line style bundles.
//!
//! These are plain value types shared by every shaped or line element. The
//! defaults match the GPML2021 schema defaults so that a freshly constructed
//! element writes out without any style attributes.
//!
//! # Quick Start
//!
//! ```
//! use gpml_core::color::Color;
//! use gpml_core::style::{HAlign, ShapeStyleProperty};
//! use gpml_core::vocabulary::{LineStyleType, ShapeType};
//!
//! let mut style = ShapeStyleProperty::default();
//! style.set_shape_type(ShapeType::Oval);
//! style.set_border_style(LineStyleType::Double);
//! style.set_border_width(3.0).unwrap();
//! assert_eq!(style.border_color(), Color::BLACK);
//! assert!(style.set_border_width(-1.0).is_err());
//! ```

use std::{fmt, str::FromStr};

use crate::{
    color::Color,
    error::ModelError,
    vocabulary::{LineStyleType, ShapeType},
};

/// Horizontal alignment of a text label inside its element.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl HAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Center => "Center",
            Self::Right => "Right",
        }
    }
}

impl FromStr for HAlign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Left" => Ok(Self::Left),
            "Center" => Ok(Self::Center),
            "Right" => Ok(Self::Right),
            _ => Err(format!("invalid horizontal alignment `{s}`")),
        }
    }
}

impl fmt::Display for HAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vertical alignment of a text label inside its element.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

impl VAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "Top",
            Self::Middle => "Middle",
            Self::Bottom => "Bottom",
        }
    }
}

impl FromStr for VAlign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Top" => Ok(Self::Top),
            "Middle" => Ok(Self::Middle),
            "Bottom" => Ok(Self::Bottom),
            _ => Err(format!("invalid vertical alignment `{s}`")),
        }
    }
}

impl fmt::Display for VAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the segments between a line's points are routed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectorType {
    #[default]
    Straight,
    Elbow,
    Curved,
    Segmented,
}

impl ConnectorType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Straight => "Straight",
            Self::Elbow => "Elbow",
            Self::Curved => "Curved",
            Self::Segmented => "Segmented",
        }
    }
}

impl FromStr for ConnectorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Straight" => Ok(Self::Straight),
            "Elbow" => Ok(Self::Elbow),
            "Curved" => Ok(Self::Curved),
            "Segmented" => Ok(Self::Segmented),
            _ => Err(format!("invalid connector type `{s}`")),
        }
    }
}

impl fmt::Display for ConnectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Font settings of a text label.
#[derive(Debug, Clone, PartialEq)]
pub struct FontProperty {
    text_color: Color,
    font_name: String,
    bold: bool,
    italic: bool,
    underline: bool,
    strikethru: bool,
    size: u32,
    h_align: HAlign,
    v_align: VAlign,
}

impl FontProperty {
    pub const DEFAULT_FONT_NAME: &'static str = "Arial";
    pub const DEFAULT_SIZE: u32 = 12;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn text_color(&self) -> Color {
        self.text_color
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    pub fn font_name(&self) -> &str {
        &self.font_name
    }

    pub fn set_font_name(&mut self, name: impl Into<String>) {
        self.font_name = name.into();
    }

    pub fn bold(&self) -> bool {
        self.bold
    }

    pub fn set_bold(&mut self, bold: bool) {
        self.bold = bold;
    }

    pub fn italic(&self) -> bool {
        self.italic
    }

    pub fn set_italic(&mut self, italic: bool) {
        self.italic = italic;
    }

    pub fn underline(&self) -> bool {
        self.underline
    }

    pub fn set_underline(&mut self, underline: bool) {
        self.underline = underline;
    }

    pub fn strikethru(&self) -> bool {
        self.strikethru
    }

    pub fn set_strikethru(&mut self, strikethru: bool) {
        self.strikethru = strikethru;
    }

    /// Font size in points.
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn set_size(&mut self, size: u32) {
        self.size = size;
    }

    pub fn h_align(&self) -> HAlign {
        self.h_align
    }

    pub fn set_h_align(&mut self, align: HAlign) {
        self.h_align = align;
    }

    pub fn v_align(&self) -> VAlign {
        self.v_align
    }

    pub fn set_v_align(&mut self, align: VAlign) {
        self.v_align = align;
    }
}

impl Default for FontProperty {
    fn default() -> Self {
        Self {
            text_color: Color::BLACK,
            font_name: Self::DEFAULT_FONT_NAME.to_string(),
            bold: false,
            italic: false,
            underline: false,
            strikethru: false,
            size: Self::DEFAULT_SIZE,
            h_align: HAlign::default(),
            v_align: VAlign::default(),
        }
    }
}

/// Border, fill and outline of a shaped element.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeStyleProperty {
    border_color: Color,
    border_style: LineStyleType,
    border_width: f64,
    fill_color: Color,
    shape_type: ShapeType,
    z_order: Option<i32>,
}

impl ShapeStyleProperty {
    pub fn new() -> Self {
        Self::default()
    }

    /// Style with a transparent fill and no outline, used by labels and groups.
    pub fn borderless() -> Self {
        Self {
            fill_color: Color::TRANSPARENT,
            shape_type: ShapeType::None,
            ..Self::default()
        }
    }

    pub fn border_color(&self) -> Color {
        self.border_color
    }

    pub fn set_border_color(&mut self, color: Color) {
        self.border_color = color;
    }

    pub fn border_style(&self) -> &LineStyleType {
        &self.border_style
    }

    pub fn set_border_style(&mut self, style: LineStyleType) {
        self.border_style = style;
    }

    pub fn border_width(&self) -> f64 {
        self.border_width
    }

    /// Sets the border width, rejecting negative values.
    pub fn set_border_width(&mut self, width: f64) -> Result<(), ModelError> {
        self.border_width = non_negative("borderWidth", width)?;
        Ok(())
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    pub fn shape_type(&self) -> &ShapeType {
        &self.shape_type
    }

    pub fn set_shape_type(&mut self, shape_type: ShapeType) {
        self.shape_type = shape_type;
    }

    pub fn z_order(&self) -> Option<i32> {
        self.z_order
    }

    pub fn set_z_order(&mut self, z_order: Option<i32>) {
        self.z_order = z_order;
    }
}

impl Default for ShapeStyleProperty {
    fn default() -> Self {
        Self {
            border_color: Color::BLACK,
            border_style: LineStyleType::Solid,
            border_width: 1.0,
            fill_color: Color::WHITE,
            shape_type: ShapeType::Rectangle,
            z_order: None,
        }
    }
}

/// Stroke of a line element.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyleProperty {
    line_color: Color,
    line_style: LineStyleType,
    line_width: f64,
    connector_type: ConnectorType,
    z_order: Option<i32>,
}

impl LineStyleProperty {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line_color(&self) -> Color {
        self.line_color
    }

    pub fn set_line_color(&mut self, color: Color) {
        self.line_color = color;
    }

    pub fn line_style(&self) -> &LineStyleType {
        &self.line_style
    }

    pub fn set_line_style(&mut self, style: LineStyleType) {
        self.line_style = style;
    }

    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    /// Sets the line width, rejecting negative values.
    pub fn set_line_width(&mut self, width: f64) -> Result<(), ModelError> {
        self.line_width = non_negative("lineWidth", width)?;
        Ok(())
    }

    pub fn connector_type(&self) -> ConnectorType {
        self.connector_type
    }

    pub fn set_connector_type(&mut self, connector_type: ConnectorType) {
        self.connector_type = connector_type;
    }

    pub fn z_order(&self) -> Option<i32> {
        self.z_order
    }

    pub fn set_z_order(&mut self, z_order: Option<i32>) {
        self.z_order = z_order;
    }
}

impl Default for LineStyleProperty {
    fn default() -> Self {
        Self {
            line_color: Color::BLACK,
            line_style: LineStyleType::Solid,
            line_width: 1.0,
            connector_type: ConnectorType::Straight,
            z_order: None,
        }
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, ModelError> {
    if value.is_nan() || value < 0.0 {
        return Err(ModelError::NegativeDimension { field, value });
    }
    Ok(value)
}
