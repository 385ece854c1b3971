use serde::{Deserialize, Serialize};

/// A training group (e.g. "Delfines", level "Intermedio").
/// Read-only reference data; groups are administered outside this app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub nombre: String,
    pub nivel: String,
}

impl Group {
    /// Display label combining name and skill level
    pub fn label(&self) -> String {
        format!("{} ({})", self.nombre, self.nivel)
    }
}
