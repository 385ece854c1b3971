//! The attendance roster: reconciliation, editing, and save preparation.
//!
//! A roster is the in-memory list of athletes for one date + schedule
//! selection. It is built by [`reconcile`] from two fetched sets, mutated
//! only by [`toggle`] / [`toggle_all`], and turned into an upsert batch by
//! [`prepare_save`]. None of these functions perform I/O; the remote calls
//! live in `api::Client` and are wired together in `app`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Athlete, AttendanceFlag, AttendanceRecord, Schedule};

/// One athlete with a derived presence flag. Exists only for the duration of
/// a date + schedule selection; rebuilt whenever either changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: i64,
    pub nombre: String,
    pub apellido: String,
    pub grupo_id: i64,
    pub presente: bool,
}

impl RosterEntry {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.nombre, self.apellido)
    }
}

/// Why a save was rejected before any remote call was made
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SaveError {
    #[error("Nothing to save - the roster is empty")]
    EmptyRoster,

    #[error("You are not assigned to this schedule")]
    NotAssigned,
}

/// Merge fetched athletes with previously saved presence flags.
///
/// The merge is keyed solely on exact `atleta_id` equality: an entry is
/// present when any flag row for that athlete has `presente = true`, and
/// absent otherwise (including when no row exists). Pure function of its
/// inputs, so re-running it with unchanged data yields an identical roster.
pub fn reconcile(athletes: Vec<Athlete>, flags: &[AttendanceFlag]) -> Vec<RosterEntry> {
    athletes
        .into_iter()
        .map(|athlete| {
            let presente = flags
                .iter()
                .any(|f| f.atleta_id == athlete.id && f.presente);
            RosterEntry {
                id: athlete.id,
                nombre: athlete.nombre,
                apellido: athlete.apellido,
                grupo_id: athlete.grupo_id,
                presente,
            }
        })
        .collect()
}

/// Flip the presence flag of exactly the entry matching `atleta_id`.
/// No-op when the id is not in the roster.
pub fn toggle(entries: &mut [RosterEntry], atleta_id: i64) {
    if let Some(entry) = entries.iter_mut().find(|e| e.id == atleta_id) {
        entry.presente = !entry.presente;
    }
}

/// Bulk toggle with uniform-target semantics: if every entry is already
/// present, all become absent; otherwise all become present. A mixed roster
/// therefore goes all-present, not per-entry inverted.
pub fn toggle_all(entries: &mut [RosterEntry]) {
    let all_present = entries.iter().all(|e| e.presente);
    for entry in entries.iter_mut() {
        entry.presente = !all_present;
    }
}

/// Number of entries currently marked present
pub fn present_count(entries: &[RosterEntry]) -> usize {
    entries.iter().filter(|e| e.presente).count()
}

/// Validate the save preconditions and build the upsert batch.
///
/// The teacher must be assigned to the schedule; rejections happen here,
/// before any remote call. The batch carries one record per roster entry,
/// keyed by (fecha, horario_id, atleta_id) at the store.
pub fn prepare_save(
    entries: &[RosterEntry],
    schedule: &Schedule,
    fecha: NaiveDate,
    profesor_id: i64,
) -> Result<Vec<AttendanceRecord>, SaveError> {
    if entries.is_empty() {
        return Err(SaveError::EmptyRoster);
    }
    if !schedule.has_teacher(profesor_id) {
        return Err(SaveError::NotAssigned);
    }

    Ok(entries
        .iter()
        .map(|entry| AttendanceRecord {
            fecha,
            horario_id: schedule.id,
            profesor_id,
            atleta_id: entry.id,
            presente: entry.presente,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Group, Teacher};

    fn athlete(id: i64, nombre: &str) -> Athlete {
        Athlete {
            id,
            nombre: nombre.to_string(),
            apellido: "Pérez".to_string(),
            grupo_id: 1,
        }
    }

    fn three_athletes() -> Vec<Athlete> {
        vec![athlete(1, "Ana"), athlete(2, "Beto"), athlete(3, "Carla")]
    }

    fn schedule_with_teacher(teacher_id: i64) -> Schedule {
        Schedule {
            id: 7,
            dia_semana: "Lunes".to_string(),
            hora_inicio: "08:00:00".to_string(),
            hora_fin: "10:00:00".to_string(),
            grupos: vec![Group {
                id: 1,
                nombre: "Delfines".to_string(),
                nivel: "Intermedio".to_string(),
            }],
            profesores: vec![Teacher {
                id: teacher_id,
                nombre: "Laura".to_string(),
                user_id: None,
                email: None,
                telefono: None,
            }],
        }
    }

    #[test]
    fn test_reconcile_no_saved_rows_all_absent() {
        // Scenario A: three athletes, no existing attendance
        let roster = reconcile(three_athletes(), &[]);
        assert_eq!(roster.len(), 3);
        assert!(roster.iter().all(|e| !e.presente));
    }

    #[test]
    fn test_reconcile_applies_saved_flag_by_exact_id() {
        // Scenario B: one saved row for athlete 2
        let flags = vec![AttendanceFlag {
            atleta_id: 2,
            presente: true,
        }];
        let roster = reconcile(three_athletes(), &flags);
        assert!(!roster[0].presente);
        assert!(roster[1].presente);
        assert!(!roster[2].presente);
    }

    #[test]
    fn test_reconcile_false_flag_stays_absent() {
        let flags = vec![AttendanceFlag {
            atleta_id: 1,
            presente: false,
        }];
        let roster = reconcile(three_athletes(), &flags);
        assert!(!roster[0].presente);
    }

    #[test]
    fn test_reconcile_ignores_flags_for_unknown_athletes() {
        let flags = vec![AttendanceFlag {
            atleta_id: 999,
            presente: true,
        }];
        let roster = reconcile(three_athletes(), &flags);
        assert!(roster.iter().all(|e| !e.presente));
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let flags = vec![AttendanceFlag {
            atleta_id: 3,
            presente: true,
        }];
        let first = reconcile(three_athletes(), &flags);
        let second = reconcile(three_athletes(), &flags);
        assert_eq!(first, second);
    }

    #[test]
    fn test_toggle_flips_exactly_one_entry() {
        let mut roster = reconcile(three_athletes(), &[]);
        let before = roster.clone();
        toggle(&mut roster, 2);

        assert!(roster[1].presente);
        // Everything else untouched, identity fields included
        assert_eq!(roster[0], before[0]);
        assert_eq!(roster[2], before[2]);
        assert_eq!(roster[1].nombre, before[1].nombre);
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let mut roster = reconcile(three_athletes(), &[]);
        let before = roster.clone();
        toggle(&mut roster, 42);
        assert_eq!(roster, before);
    }

    #[test]
    fn test_toggle_all_mixed_goes_all_present() {
        // 2 present, 3 absent: the whole roster becomes present
        let mut roster = reconcile(
            vec![
                athlete(1, "a"),
                athlete(2, "b"),
                athlete(3, "c"),
                athlete(4, "d"),
                athlete(5, "e"),
            ],
            &[
                AttendanceFlag { atleta_id: 1, presente: true },
                AttendanceFlag { atleta_id: 2, presente: true },
            ],
        );
        toggle_all(&mut roster);
        assert!(roster.iter().all(|e| e.presente));
    }

    #[test]
    fn test_toggle_all_uniform_states_invert() {
        let mut roster = reconcile(three_athletes(), &[]);

        // all absent -> all present
        toggle_all(&mut roster);
        assert!(roster.iter().all(|e| e.presente));

        // all present -> all absent
        toggle_all(&mut roster);
        assert!(roster.iter().all(|e| !e.presente));
    }

    #[test]
    fn test_present_count() {
        let mut roster = reconcile(three_athletes(), &[]);
        assert_eq!(present_count(&roster), 0);
        toggle(&mut roster, 1);
        toggle(&mut roster, 3);
        assert_eq!(present_count(&roster), 2);
    }

    #[test]
    fn test_prepare_save_builds_one_record_per_entry() {
        // Scenario C: (true, false, false) -> toggle_all -> all true -> batch of 3
        let mut roster = reconcile(
            three_athletes(),
            &[AttendanceFlag { atleta_id: 1, presente: true }],
        );
        toggle_all(&mut roster);

        let schedule = schedule_with_teacher(2);
        let fecha = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let batch = prepare_save(&roster, &schedule, fecha, 2).unwrap();

        assert_eq!(batch.len(), 3);
        assert!(batch.iter().all(|r| r.presente));
        assert!(batch.iter().all(|r| r.fecha == fecha));
        assert!(batch.iter().all(|r| r.horario_id == 7));
        assert!(batch.iter().all(|r| r.profesor_id == 2));
    }

    #[test]
    fn test_prepare_save_rejects_unassigned_teacher() {
        // Scenario D: teacher 9 is not in the schedule's teacher set
        let roster = reconcile(three_athletes(), &[]);
        let schedule = schedule_with_teacher(2);
        let fecha = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();

        let err = prepare_save(&roster, &schedule, fecha, 9).unwrap_err();
        assert_eq!(err, SaveError::NotAssigned);
    }

    #[test]
    fn test_prepare_save_rejects_empty_roster() {
        let schedule = schedule_with_teacher(2);
        let fecha = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let err = prepare_save(&[], &schedule, fecha, 2).unwrap_err();
        assert_eq!(err, SaveError::EmptyRoster);
    }

    #[test]
    fn test_persist_then_reconcile_round_trip() {
        // Persisting a roster and reconciling from the resulting rows
        // reproduces the same presence flags.
        let mut roster = reconcile(three_athletes(), &[]);
        toggle(&mut roster, 2);

        let schedule = schedule_with_teacher(2);
        let fecha = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let batch = prepare_save(&roster, &schedule, fecha, 2).unwrap();

        // What the store would hand back for this (date, schedule, teacher)
        let flags: Vec<AttendanceFlag> = batch
            .iter()
            .map(|r| AttendanceFlag {
                atleta_id: r.atleta_id,
                presente: r.presente,
            })
            .collect();

        let reloaded = reconcile(three_athletes(), &flags);
        let saved_flags: Vec<bool> = roster.iter().map(|e| e.presente).collect();
        let loaded_flags: Vec<bool> = reloaded.iter().map(|e| e.presente).collect();
        assert_eq!(saved_flags, loaded_flags);
    }
}
