// Date handling shared by the engine and any front end.

// Brazilian (day-first) date formats used throughout the maintenance reports.
pub mod brazilian_format {
    use chrono::{NaiveDate, NaiveDateTime};

    const DATE_FORMATS: [&str; 5] = ["%d/%m/%y", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y-%m-%d"];
    const DATETIME_FORMATS: [&str; 6] = [
        "%d/%m/%Y %H:%M:%S",
        "%d/%m/%Y %H:%M",
        "%d-%m-%Y %H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
    ];

    // Two-digit years are tried before four-digit ones: `%Y` would happily
    // read "24" as the year 24.
    /// Parses a day-first date, tolerating a trailing time of day.
    /// Returns `None` for anything that is not recognisably a date.
    pub fn parse_date(s: &str) -> Option<NaiveDate> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
            .or_else(|| {
                DATETIME_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                    .map(|dt| dt.date())
            })
    }

    /// Formats as "dd/mm/yyyy", the form written back to reports and logs.
    pub fn format_date(date: NaiveDate) -> String {
        date.format("%d/%m/%Y").to_string()
    }

}
