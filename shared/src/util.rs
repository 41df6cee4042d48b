use chrono::{SecondsFormat, Utc};

/// Generate a new locally-unique identifier (UUID v4 string).
///
/// Used for photo ids and storage object names; place ids are assigned
/// by the document store on create.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Current UTC time as an ISO-8601 string with millisecond precision
/// (e.g. `2025-03-14T09:26:53.589Z`).
///
/// These strings are the display timestamps persisted on every record.
/// They sort lexicographically in chronological order, which is what the
/// store's `updatedAt desc` snapshot ordering relies on.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_id_is_unique() {
        assert_ne!(new_id(), new_id());
    }

    #[test]
    fn now_iso_shape() {
        let ts = now_iso();
        assert!(ts.ends_with('Z'));
        assert_eq!(ts.len(), "2025-03-14T09:26:53.589Z".len());
    }

    #[test]
    fn now_iso_is_monotonic() {
        let a = now_iso();
        let b = now_iso();
        assert!(a <= b);
    }
}
