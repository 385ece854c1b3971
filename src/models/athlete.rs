use serde::{Deserialize, Serialize};

/// A club member. Each athlete belongs to exactly one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Athlete {
    pub id: i64,
    pub nombre: String,
    pub apellido: String,
    pub grupo_id: i64,
}

impl Athlete {
    /// Full "first last" display name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.nombre, self.apellido)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let a = Athlete {
            id: 1,
            nombre: "Ana".to_string(),
            apellido: "Gómez".to_string(),
            grupo_id: 3,
        };
        assert_eq!(a.full_name(), "Ana Gómez");
    }
}
