//! Per-athlete attendance statistics for the Athletes tab.
//!
//! Computed client-side from the full athlete list and every saved
//! attendance row, mirroring what the store would report.

use crate::models::{Athlete, AttendanceFlag, Group};

/// Attendance percentage at or above this is shown as good
pub const GOOD_ATTENDANCE_PCT: u32 = 90;

/// Attendance percentage at or above this (but below good) is shown as fair
pub const FAIR_ATTENDANCE_PCT: u32 = 80;

/// One athlete with their recorded attendance totals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AthleteStats {
    pub athlete: Athlete,
    pub attended: usize,
    pub total: usize,
}

impl AthleteStats {
    /// Rounded attendance percentage; 0 when no classes are recorded yet
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.attended as f64 / self.total as f64) * 100.0).round() as u32
    }
}

/// Tally every athlete's recorded classes. Rows are matched to athletes by
/// exact id; rows for unknown athletes are ignored.
pub fn compute_stats(athletes: Vec<Athlete>, rows: &[AttendanceFlag]) -> Vec<AthleteStats> {
    athletes
        .into_iter()
        .map(|athlete| {
            let mine = rows.iter().filter(|r| r.atleta_id == athlete.id);
            let total = mine.clone().count();
            let attended = mine.filter(|r| r.presente).count();
            AthleteStats {
                athlete,
                attended,
                total,
            }
        })
        .collect()
}

/// Apply the Athletes tab filters: optional group and case-insensitive
/// substring match on the full name.
pub fn filter_stats<'a>(
    stats: &'a [AthleteStats],
    group: Option<&Group>,
    search: &str,
) -> Vec<&'a AthleteStats> {
    let needle = search.to_lowercase();
    stats
        .iter()
        .filter(|s| group.map(|g| s.athlete.grupo_id == g.id).unwrap_or(true))
        .filter(|s| {
            needle.is_empty() || s.athlete.full_name().to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn athlete(id: i64, nombre: &str, grupo_id: i64) -> Athlete {
        Athlete {
            id,
            nombre: nombre.to_string(),
            apellido: "López".to_string(),
            grupo_id,
        }
    }

    fn flag(atleta_id: i64, presente: bool) -> AttendanceFlag {
        AttendanceFlag { atleta_id, presente }
    }

    #[test]
    fn test_compute_stats_counts_per_athlete() {
        let rows = vec![flag(1, true), flag(1, false), flag(1, true), flag(2, false)];
        let stats = compute_stats(vec![athlete(1, "Ana", 1), athlete(2, "Beto", 1)], &rows);

        assert_eq!(stats[0].attended, 2);
        assert_eq!(stats[0].total, 3);
        assert_eq!(stats[0].percentage(), 67);

        assert_eq!(stats[1].attended, 0);
        assert_eq!(stats[1].total, 1);
        assert_eq!(stats[1].percentage(), 0);
    }

    #[test]
    fn test_percentage_zero_when_no_rows() {
        let stats = compute_stats(vec![athlete(1, "Ana", 1)], &[]);
        assert_eq!(stats[0].total, 0);
        assert_eq!(stats[0].percentage(), 0);
    }

    #[test]
    fn test_filter_by_group_and_search() {
        let stats = compute_stats(
            vec![
                athlete(1, "Ana", 1),
                athlete(2, "Beto", 2),
                athlete(3, "Anabel", 1),
            ],
            &[],
        );
        let delfines = Group {
            id: 1,
            nombre: "Delfines".to_string(),
            nivel: "Intermedio".to_string(),
        };

        let by_group = filter_stats(&stats, Some(&delfines), "");
        assert_eq!(by_group.len(), 2);

        let by_search = filter_stats(&stats, Some(&delfines), "ana");
        assert_eq!(by_search.len(), 2);

        let narrow = filter_stats(&stats, None, "anabel");
        assert_eq!(narrow.len(), 1);
        assert_eq!(narrow[0].athlete.id, 3);
    }
}
