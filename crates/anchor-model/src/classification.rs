//! Semantic labels attached to tracked geometry.

use serde::{Deserialize, Serialize};

/// Per-vertex semantic label reported for reconstructed mesh geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MeshClassification {
    #[default]
    None,
    Wall,
    Floor,
    Ceiling,
    Table,
    Seat,
    Window,
    Door,
}

/// Semantic label reported for a detected plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlaneClassification {
    #[default]
    None,
    Wall,
    Floor,
    Ceiling,
    Table,
    Seat,
    Window,
    Door,
}

/// Orientation of a detected plane relative to gravity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlaneAlignment {
    #[default]
    Horizontal,
    Vertical,
}

impl From<PlaneClassification> for MeshClassification {
    fn from(value: PlaneClassification) -> Self {
        match value {
            PlaneClassification::None => MeshClassification::None,
            PlaneClassification::Wall => MeshClassification::Wall,
            PlaneClassification::Floor => MeshClassification::Floor,
            PlaneClassification::Ceiling => MeshClassification::Ceiling,
            PlaneClassification::Table => MeshClassification::Table,
            PlaneClassification::Seat => MeshClassification::Seat,
            PlaneClassification::Window => MeshClassification::Window,
            PlaneClassification::Door => MeshClassification::Door,
        }
    }
}
