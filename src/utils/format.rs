use chrono::{Datelike, NaiveDate, Weekday};

/// Spanish weekday name for a date, capitalized the way the `horarios`
/// table stores `dia_semana` ("Lunes", "Miércoles", ...).
pub fn weekday_name_es(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Lunes",
        Weekday::Tue => "Martes",
        Weekday::Wed => "Miércoles",
        Weekday::Thu => "Jueves",
        Weekday::Fri => "Viernes",
        Weekday::Sat => "Sábado",
        Weekday::Sun => "Domingo",
    }
}

/// Trim a "HH:MM:SS" time column value down to "HH:MM" for display.
/// Anything that doesn't look like that is returned unchanged.
pub fn format_time(time: &str) -> String {
    if time.len() >= 5 && time.as_bytes().get(2) == Some(&b':') {
        time[..5].to_string()
    } else {
        time.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_name_es() {
        // 2024-03-04 is a Monday
        let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        assert_eq!(weekday_name_es(monday), "Lunes");

        let wednesday = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        assert_eq!(weekday_name_es(wednesday), "Miércoles");

        let saturday = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(weekday_name_es(saturday), "Sábado");

        let sunday = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(weekday_name_es(sunday), "Domingo");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time("08:00:00"), "08:00");
        assert_eq!(format_time("19:30:00"), "19:30");
        assert_eq!(format_time("19:30"), "19:30");
        assert_eq!(format_time("mediodía"), "mediodía");
    }

}
