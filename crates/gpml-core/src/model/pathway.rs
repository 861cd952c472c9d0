//! Pathway-level metadata and authors.

use crate::{
    color::Color,
    error::ModelError,
    geometry::Coordinate,
    model::info::ElementInfo,
    xref::Xref,
};

/// Metadata of the pathway as a whole.
#[derive(Debug, Clone, PartialEq)]
pub struct Pathway {
    title: String,
    organism: Option<String>,
    source: Option<String>,
    version: Option<String>,
    license: Option<String>,
    description: Option<String>,
    xref: Option<Xref>,
    board_width: f64,
    board_height: f64,
    background_color: Color,
    info_box: Coordinate,
    info: ElementInfo,
}

impl Pathway {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            organism: None,
            source: None,
            version: None,
            license: None,
            description: None,
            xref: None,
            board_width: 0.0,
            board_height: 0.0,
            background_color: Color::WHITE,
            info_box: Coordinate::default(),
            info: ElementInfo::default(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn organism(&self) -> Option<&str> {
        self.organism.as_deref()
    }

    pub fn set_organism(&mut self, organism: Option<String>) {
        self.organism = organism;
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn set_source(&mut self, source: Option<String>) {
        self.source = source;
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn set_version(&mut self, version: Option<String>) {
        self.version = version;
    }

    pub fn license(&self) -> Option<&str> {
        self.license.as_deref()
    }

    pub fn set_license(&mut self, license: Option<String>) {
        self.license = license;
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    pub fn xref(&self) -> Option<&Xref> {
        self.xref.as_ref()
    }

    pub fn set_xref(&mut self, xref: Option<Xref>) {
        self.xref = xref;
    }

    pub fn board_width(&self) -> f64 {
        self.board_width
    }

    pub fn board_height(&self) -> f64 {
        self.board_height
    }

    /// Sets the board size, rejecting negative dimensions.
    pub fn set_board_size(&mut self, width: f64, height: f64) -> Result<(), ModelError> {
        for (field, value) in [("boardWidth", width), ("boardHeight", height)] {
            if value.is_nan() || value < 0.0 {
                return Err(ModelError::NegativeDimension { field, value });
            }
        }
        self.board_width = width;
        self.board_height = height;
        Ok(())
    }

    pub fn background_color(&self) -> Color {
        self.background_color
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.background_color = color;
    }

    /// Position of the title/organism info box on the board.
    pub fn info_box(&self) -> Coordinate {
        self.info_box
    }

    pub fn set_info_box(&mut self, position: Coordinate) {
        self.info_box = position;
    }

    pub fn info(&self) -> &ElementInfo {
        &self.info
    }

    pub fn info_mut(&mut self) -> &mut ElementInfo {
        &mut self.info
    }
}

impl Default for Pathway {
    fn default() -> Self {
        Self::new("")
    }
}

/// An author of the pathway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    name: String,
    full_name: Option<String>,
    email: Option<String>,
}

impl Author {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            full_name: None,
            email: None,
        }
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_size_validation() {
        let mut pathway = Pathway::new("Title");
        pathway.set_board_size(100.0, 100.0).unwrap();
        assert_eq!(pathway.board_width(), 100.0);

        assert!(pathway.set_board_size(-5.0, 100.0).is_err());
        assert_eq!(pathway.board_width(), 100.0);
    }

    #[test]
    fn test_defaults() {
        let pathway = Pathway::default();
        assert_eq!(pathway.title(), "");
        assert_eq!(pathway.background_color(), Color::WHITE);
        assert!(pathway.info().comments().is_empty());
    }
}
