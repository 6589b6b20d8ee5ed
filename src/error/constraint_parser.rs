use regex::Regex;
use std::sync::OnceLock;

/// Parses PostgreSQL constraint violation messages into structured pieces.
///
/// Postgres reports violations as free text plus a constraint name; this
/// extracts (entity, field, value) so duplicate payments, duplicate emails
/// and broken references can be reported as domain errors instead of raw
/// database noise.
pub struct ConstraintParser;

/// Compiled regex patterns, cached for reuse across conversions
struct RegexPatterns {
    key_value: Regex,
    column_name: Regex,
    table_name: Regex,
}

impl RegexPatterns {
    fn new() -> Self {
        Self {
            // Matches "Key (field)=(value)" in PostgreSQL DETAIL lines
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").unwrap(),
            column_name: Regex::new(r#"column "([^"]+)""#).unwrap(),
            table_name: Regex::new(r#"table "([^"]+)""#).unwrap(),
        }
    }
}

static REGEX_PATTERNS: OnceLock<RegexPatterns> = OnceLock::new();

impl ConstraintParser {
    fn patterns() -> &'static RegexPatterns {
        REGEX_PATTERNS.get_or_init(RegexPatterns::new)
    }

    /// Parses a unique violation into (entity, field, value).
    ///
    /// Prefers the constraint name (e.g. "payments_booking_id_key"), falling
    /// back to the message DETAIL line.
    pub fn parse_unique_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        if let Some(constraint) = constraint_name {
            if let Some((entity, field)) = Self::parse_constraint_name(constraint) {
                if let Some(value) = Self::extract_value_from_message(message) {
                    return Some((entity, field, value));
                }
                return Some((entity, field, "duplicate_value".to_string()));
            }
        }

        if let Some((field, value)) = Self::extract_key_value_from_message(message) {
            let entity =
                Self::extract_table_from_message(message).unwrap_or_else(|| "resource".to_string());
            return Some((entity, field, value));
        }

        None
    }

    /// Parses a not-null violation into (entity, field).
    pub fn parse_not_null_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        if let Some(field) = Self::extract_column_from_message(message) {
            let entity = Self::extract_table_from_message(message)
                .or_else(|| {
                    constraint_name.and_then(|c| Self::parse_constraint_name(c).map(|(e, _)| e))
                })
                .unwrap_or_else(|| "resource".to_string());
            return Some((entity, field));
        }

        None
    }

    /// Parses a foreign key violation into (entity, field, referenced_value).
    pub fn parse_foreign_key_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        if let Some(constraint) = constraint_name {
            if let Some((entity, field)) = Self::parse_foreign_key_constraint_name(constraint) {
                if let Some(value) = Self::extract_value_from_message(message) {
                    return Some((entity, field, value));
                }
                return Some((entity, field, "invalid_reference".to_string()));
            }
        }

        if let Some((field, value)) = Self::extract_key_value_from_message(message) {
            let entity =
                Self::extract_table_from_message(message).unwrap_or_else(|| "resource".to_string());
            return Some((entity, field, value));
        }

        None
    }

    /// Parses a check violation into (entity, field).
    pub fn parse_check_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        if let Some(constraint) = constraint_name {
            if let Some((entity, field)) = Self::parse_constraint_name(constraint) {
                return Some((entity, field));
            }
        }

        if let Some(field) = Self::extract_column_from_message(message) {
            let entity =
                Self::extract_table_from_message(message).unwrap_or_else(|| "resource".to_string());
            return Some((entity, field));
        }

        None
    }

    /// Splits "entity_field_suffix" constraint names:
    /// "users_email_key" -> ("users", "email").
    pub fn parse_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        let parts: Vec<&str> = constraint_name.split('_').collect();
        if parts.len() >= 3 {
            return Some((parts[0].to_string(), parts[1].to_string()));
        }
        None
    }

    /// Splits fkey names with multi-part columns:
    /// "bookings_service_id_fkey" -> ("bookings", "service_id").
    pub fn parse_foreign_key_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        if let Some(without_suffix) = constraint_name.strip_suffix("_fkey") {
            let parts: Vec<&str> = without_suffix.split('_').collect();
            if parts.len() >= 2 {
                return Some((parts[0].to_string(), parts[1..].join("_")));
            }
        }
        None
    }

    pub fn extract_column_from_message(message: &str) -> Option<String> {
        Self::patterns()
            .column_name
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    pub fn extract_table_from_message(message: &str) -> Option<String> {
        Self::patterns()
            .table_name
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    pub fn extract_key_value_from_message(message: &str) -> Option<(String, String)> {
        Self::patterns().key_value.captures(message).and_then(|caps| {
            let field = caps.get(1)?.as_str().to_string();
            let value = caps.get(2)?.as_str().to_string();
            Some((field, value))
        })
    }

    pub fn extract_value_from_message(message: &str) -> Option<String> {
        if let Some((_, value)) = Self::extract_key_value_from_message(message) {
            return Some(value);
        }

        // Fallback for messages without a DETAIL line: first quoted token
        if let Some(start) = message.find('"') {
            if let Some(end) = message[start + 1..].find('"') {
                return Some(message[start + 1..start + 1 + end].to_string());
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_unique_violation_with_constraint_name() {
        let message = "duplicate key value violates unique constraint \"payments_booking_id_key\"\nDETAIL: Key (booking_id)=(3e7c07d2-4f2a-4d05-b9a0-111111111111) already exists.";
        let result =
            ConstraintParser::parse_unique_violation(message, Some("payments_booking_id_key"));
        assert_eq!(
            result,
            Some((
                "payments".to_string(),
                "booking".to_string(),
                "3e7c07d2-4f2a-4d05-b9a0-111111111111".to_string()
            ))
        );
    }

    #[test]
    fn parse_unique_violation_without_constraint_name() {
        let message = "duplicate key value violates unique constraint\nDETAIL: Key (email)=(jane@example.com) already exists.";
        let result = ConstraintParser::parse_unique_violation(message, None);
        assert_eq!(
            result,
            Some((
                "resource".to_string(),
                "email".to_string(),
                "jane@example.com".to_string()
            ))
        );
    }

    #[test]
    fn parse_not_null_violation() {
        let message = "null value in column \"email\" violates not-null constraint";
        let result = ConstraintParser::parse_not_null_violation(message, None);
        assert_eq!(result, Some(("resource".to_string(), "email".to_string())));
    }

    #[test]
    fn parse_foreign_key_violation() {
        let message = "insert or update on table \"bookings\" violates foreign key constraint \"bookings_service_id_fkey\"\nDETAIL: Key (service_id)=(999) is not present in table \"services\".";
        let result =
            ConstraintParser::parse_foreign_key_violation(message, Some("bookings_service_id_fkey"));
        assert_eq!(
            result,
            Some((
                "bookings".to_string(),
                "service_id".to_string(),
                "999".to_string()
            ))
        );
    }

    #[test]
    fn parse_check_violation() {
        let message = "new row for relation \"reviews\" violates check constraint \"reviews_rating_check\"";
        let result = ConstraintParser::parse_check_violation(message, Some("reviews_rating_check"));
        assert_eq!(result, Some(("reviews".to_string(), "rating".to_string())));
    }

    #[test]
    fn parse_constraint_name_variants() {
        assert_eq!(
            ConstraintParser::parse_constraint_name("users_email_key"),
            Some(("users".to_string(), "email".to_string()))
        );
        assert_eq!(
            ConstraintParser::parse_constraint_name("bookings_booking_number_key"),
            Some(("bookings".to_string(), "booking".to_string()))
        );
        assert_eq!(ConstraintParser::parse_constraint_name("invalid"), None);
    }

    #[test]
    fn parse_foreign_key_constraint_name_multi_part_field() {
        assert_eq!(
            ConstraintParser::parse_foreign_key_constraint_name("reviews_booking_id_fkey"),
            Some(("reviews".to_string(), "booking_id".to_string()))
        );
        assert_eq!(
            ConstraintParser::parse_foreign_key_constraint_name("not_a_foreign_key"),
            None
        );
    }

    #[test]
    fn extract_key_value_from_message() {
        let message = "Key (reference)=(PSK_abc123) already exists.";
        assert_eq!(
            ConstraintParser::extract_key_value_from_message(message),
            Some(("reference".to_string(), "PSK_abc123".to_string()))
        );
    }

    #[test]
    fn graceful_parsing_failures() {
        let message = "completely unrelated error message";
        assert_eq!(ConstraintParser::parse_unique_violation(message, None), None);
        assert_eq!(ConstraintParser::parse_not_null_violation(message, None), None);
        assert_eq!(
            ConstraintParser::parse_foreign_key_violation(message, None),
            None
        );
        assert_eq!(ConstraintParser::parse_check_violation(message, None), None);
    }
}
