use serde::{Deserialize, Serialize};

/// Standard reference projectile drag functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DragFunction {
    G1,
    G2,
    G3,
    G4,
    G5,
    G6,
    G7,
    G8,
}

impl DragFunction {
    pub const ALL: [DragFunction; 8] = [
        DragFunction::G1,
        DragFunction::G2,
        DragFunction::G3,
        DragFunction::G4,
        DragFunction::G5,
        DragFunction::G6,
        DragFunction::G7,
        DragFunction::G8,
    ];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "G1" => Some(DragFunction::G1),
            "G2" => Some(DragFunction::G2),
            "G3" => Some(DragFunction::G3),
            "G4" => Some(DragFunction::G4),
            "G5" => Some(DragFunction::G5),
            "G6" => Some(DragFunction::G6),
            "G7" => Some(DragFunction::G7),
            "G8" => Some(DragFunction::G8),
            _ => None,
        }
    }

    /// Map the integer codes used by the C interface (G1 = 1 ... G8 = 8).
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1..=8 => Some(Self::ALL[(code - 1) as usize]),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        self as i32 + 1
    }
}

impl std::fmt::Display for DragFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
