use chrono::{DateTime, Utc};

/// Extract a short type name from the full module path.
///
/// Given `"my_crate::some_module::MyType"`, returns `"MyType"`.
pub fn short_type_name(full: &str) -> &str {
    full.rsplit("::").next().unwrap_or(full)
}

/// The `"YYYY-MM"` bucket a timestamp falls into, UTC.
pub fn month_key(at: DateTime<Utc>) -> String {
    at.format("%Y-%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn short_name_strips_the_path() {
        assert_eq!(short_type_name("a::b::Thing"), "Thing");
        assert_eq!(short_type_name("Bare"), "Bare");
    }

    #[test]
    fn month_key_is_zero_padded() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 10, 0, 0).unwrap();
        assert_eq!(month_key(at), "2024-03");
    }
}
