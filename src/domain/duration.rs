/// Renders a runtime in minutes as `"1h 35min"`, `"2h"` or `"45min"`.
#[must_use]
pub fn format_duration(minutes: i32) -> String {
    let minutes = minutes.max(0);
    let hours = minutes / 60;
    let rest = minutes % 60;

    match (hours, rest) {
        (0, m) => format!("{m}min"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}min"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_hours_and_minutes() {
        assert_eq!(format_duration(95), "1h 35min");
        assert_eq!(format_duration(120), "2h");
        assert_eq!(format_duration(45), "45min");
        assert_eq!(format_duration(0), "0min");
    }
}
