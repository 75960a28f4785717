//! Colors for semantic classification labels.

use landon_anchor_model::{MeshClassification, PlaneClassification};

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SimpleColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl SimpleColor {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Channels scaled to `[0.0, 1.0]`.
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.red as f32 / 255.0,
            self.green as f32 / 255.0,
            self.blue as f32 / 255.0,
        ]
    }
}

/// Maps classification labels to display colors.
pub trait ClassificationColoring: Send + Sync {
    fn color_for_mesh(&self, classification: MeshClassification) -> SimpleColor;

    fn color_for_plane(&self, classification: PlaneClassification) -> SimpleColor {
        self.color_for_mesh(classification.into())
    }
}

/// The built-in palette.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultClassificationColoring;

impl ClassificationColoring for DefaultClassificationColoring {
    fn color_for_mesh(&self, classification: MeshClassification) -> SimpleColor {
        match classification {
            MeshClassification::None => SimpleColor::new(128, 128, 128),
            MeshClassification::Wall => SimpleColor::new(255, 204, 153),
            MeshClassification::Floor => SimpleColor::new(102, 178, 255),
            MeshClassification::Ceiling => SimpleColor::new(255, 255, 153),
            MeshClassification::Table => SimpleColor::new(153, 255, 153),
            MeshClassification::Seat => SimpleColor::new(255, 153, 204),
            MeshClassification::Window => SimpleColor::new(153, 255, 255),
            MeshClassification::Door => SimpleColor::new(204, 153, 255),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_colors_follow_mesh_palette() {
        let coloring = DefaultClassificationColoring;
        assert_eq!(
            coloring.color_for_plane(PlaneClassification::Floor),
            coloring.color_for_mesh(MeshClassification::Floor)
        );
    }

    #[test]
    fn test_unit_conversion() {
        assert_eq!(SimpleColor::new(255, 0, 51).to_unit(), [1.0, 0.0, 0.2]);
    }
}
