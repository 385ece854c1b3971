use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Upsert conflict target for the `asistencias` table.
/// The store keeps at most one row per (fecha, horario_id, atleta_id);
/// a later write for the same key replaces the earlier one.
pub const ATTENDANCE_CONFLICT_KEY: &str = "fecha,horario_id,atleta_id";

/// A saved presence flag for one athlete, as returned by the
/// attendance-by-date-schedule-teacher query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceFlag {
    pub atleta_id: i64,
    pub presente: bool,
}

/// One row of the attendance upsert batch. Built fresh from the in-memory
/// roster at save time; never constructed from fetched data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub fecha: NaiveDate,
    pub horario_id: i64,
    pub profesor_id: i64,
    pub atleta_id: i64,
    pub presente: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_with_column_names() {
        let record = AttendanceRecord {
            fecha: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            horario_id: 7,
            profesor_id: 2,
            atleta_id: 11,
            presente: true,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["fecha"], "2024-03-04");
        assert_eq!(json["horario_id"], 7);
        assert_eq!(json["profesor_id"], 2);
        assert_eq!(json["atleta_id"], 11);
        assert_eq!(json["presente"], true);
    }
}
