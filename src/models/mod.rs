// src/models/mod.rs

pub mod admin;
pub mod test_paper;
pub mod test_result;

/// Serializes timestamps the way SQLite's `CURRENT_TIMESTAMP` stores them
/// (`YYYY-MM-DD HH:MM:SS`), so API output matches the stored text.
pub(crate) mod sqlite_datetime {
    use chrono::NaiveDateTime;
    use serde::Serializer;

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.collect_str(&dt.format(FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    #[cfg(test)]
    mod tests {
        use chrono::NaiveDate;
        use serde::Serialize;

        #[derive(Serialize)]
        struct Row {
            #[serde(serialize_with = "super::serialize")]
            at: Option<chrono::NaiveDateTime>,
        }

        #[test]
        fn uses_space_separated_format() {
            let at = NaiveDate::from_ymd_opt(2026, 10, 18)
                .and_then(|d| d.and_hms_opt(22, 32, 15));
            let value = serde_json::to_value(Row { at }).unwrap();
            assert_eq!(value["at"], "2026-10-18 22:32:15");

            let value = serde_json::to_value(Row { at: None }).unwrap();
            assert!(value["at"].is_null());
        }
    }
}

/// Rejects strings that are empty once surrounding whitespace is removed.
pub(crate) fn validate_not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("must_not_be_blank"));
    }
    Ok(())
}
