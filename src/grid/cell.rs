//! Cell kind tag

use serde::{Deserialize, Serialize};

/// Type tag of a grid cell. Opaque to the engine apart from `Empty`.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    #[default]
    Empty = 0,
    Rigid = 1,
    Soft = 2,
    HorizontalActuator = 3,
    VerticalActuator = 4,
    Fixed = 5,
}

impl CellKind {
    /// All kinds in code order
    pub const ALL: [CellKind; 6] = [
        CellKind::Empty,
        CellKind::Rigid,
        CellKind::Soft,
        CellKind::HorizontalActuator,
        CellKind::VerticalActuator,
        CellKind::Fixed,
    ];

    /// Integer code used by the structure file format
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Decode a file-format code
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn is_empty(self) -> bool {
        self == CellKind::Empty
    }
}
