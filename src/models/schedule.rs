use serde::{Deserialize, Serialize};

use super::{Group, Teacher};

/// A recurring weekly class slot with its associated groups and teachers
/// resolved. This is the domain type the rest of the app works with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: i64,
    pub dia_semana: String,
    pub hora_inicio: String,
    pub hora_fin: String,
    pub grupos: Vec<Group>,
    pub profesores: Vec<Teacher>,
}

impl Schedule {
    /// Identifiers of the groups training in this slot
    pub fn group_ids(&self) -> Vec<i64> {
        self.grupos.iter().map(|g| g.id).collect()
    }

    /// Whether the given teacher is assigned to this slot.
    /// Saving attendance requires assignment.
    pub fn has_teacher(&self, teacher_id: i64) -> bool {
        self.profesores.iter().any(|p| p.id == teacher_id)
    }

    /// "08:00 - 10:00" style display of the time range
    pub fn time_range(&self) -> String {
        format!(
            "{} - {}",
            crate::utils::format_time(&self.hora_inicio),
            crate::utils::format_time(&self.hora_fin)
        )
    }

    /// Comma-separated group labels for list display
    pub fn group_summary(&self) -> String {
        self.grupos
            .iter()
            .map(|g| g.nombre.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// Raw response shapes for the nested PostgREST select. The join tables come
// back as arrays of single-key objects whose value is the related row, or
// null when the relation failed to resolve.

/// One `horarios` row as returned by the nested select
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleRow {
    pub id: i64,
    pub dia_semana: String,
    pub hora_inicio: String,
    pub hora_fin: String,
    #[serde(default)]
    pub horarios_grupos: Vec<GroupLink>,
    #[serde(default)]
    pub profesores_horarios: Vec<TeacherLink>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupLink {
    pub grupos: Option<Group>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeacherLink {
    pub profesores: Option<Teacher>,
}

impl ScheduleRow {
    /// Flatten the join-table nesting into a `Schedule`. A null nested group
    /// or teacher is dropped from that list; the schedule itself is kept.
    pub fn into_schedule(self) -> Schedule {
        Schedule {
            id: self.id,
            dia_semana: self.dia_semana,
            hora_inicio: self.hora_inicio,
            hora_fin: self.hora_fin,
            grupos: self.horarios_grupos.into_iter().filter_map(|l| l.grupos).collect(),
            profesores: self
                .profesores_horarios
                .into_iter()
                .filter_map(|l| l.profesores)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row_json() -> &'static str {
        r#"{
            "id": 5,
            "dia_semana": "Lunes",
            "hora_inicio": "08:00:00",
            "hora_fin": "10:00:00",
            "horarios_grupos": [
                {"grupos": {"id": 1, "nombre": "Delfines", "nivel": "Intermedio"}},
                {"grupos": null}
            ],
            "profesores_horarios": [
                {"profesores": {"id": 2, "nombre": "Laura"}},
                {"profesores": null}
            ]
        }"#
    }

    #[test]
    fn test_null_relations_dropped_entry_wise() {
        let row: ScheduleRow = serde_json::from_str(sample_row_json()).unwrap();
        let schedule = row.into_schedule();

        // The null entries disappear but the schedule survives
        assert_eq!(schedule.grupos.len(), 1);
        assert_eq!(schedule.grupos[0].nombre, "Delfines");
        assert_eq!(schedule.profesores.len(), 1);
        assert_eq!(schedule.profesores[0].id, 2);
    }

    #[test]
    fn test_missing_join_arrays_default_empty() {
        let json = r#"{"id": 9, "dia_semana": "Martes", "hora_inicio": "18:00:00", "hora_fin": "19:30:00"}"#;
        let row: ScheduleRow = serde_json::from_str(json).unwrap();
        let schedule = row.into_schedule();
        assert!(schedule.grupos.is_empty());
        assert!(schedule.profesores.is_empty());
    }

    #[test]
    fn test_has_teacher() {
        let row: ScheduleRow = serde_json::from_str(sample_row_json()).unwrap();
        let schedule = row.into_schedule();
        assert!(schedule.has_teacher(2));
        assert!(!schedule.has_teacher(99));
    }

    #[test]
    fn test_time_range_display() {
        let row: ScheduleRow = serde_json::from_str(sample_row_json()).unwrap();
        assert_eq!(row.into_schedule().time_range(), "08:00 - 10:00");
    }
}
