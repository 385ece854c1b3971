use serde::{Deserialize, Serialize};

/// An instructor profile. `user_id` links the row to a GoTrue account;
/// one teacher per account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
}

impl Teacher {
    pub fn display_name(&self) -> &str {
        &self.nombre
    }
}
