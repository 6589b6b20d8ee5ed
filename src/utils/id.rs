//! Human-readable identifier generation.

use chrono::Utc;
use rand::Rng;

/// Alphabet excluding similar looking characters (I, O, 0, 1)
const BOOKING_NUMBER_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Length of the random suffix
const BOOKING_NUMBER_SUFFIX_LEN: usize = 5;

/// Generates a booking number in the format `BK-YYYYMMDD-XXXXX`.
///
/// Uniqueness is enforced by the unique index on bookings.booking_number;
/// the date prefix keeps numbers roughly sortable for support staff.
pub fn generate_booking_number() -> String {
    let date = Utc::now().format("%Y%m%d");

    let mut rng = rand::rng();
    let suffix: String = (0..BOOKING_NUMBER_SUFFIX_LEN)
        .map(|_| {
            let idx = rng.random_range(0..BOOKING_NUMBER_ALPHABET.len());
            BOOKING_NUMBER_ALPHABET[idx] as char
        })
        .collect();

    format!("BK-{}-{}", date, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_number_format() {
        let number = generate_booking_number();
        assert!(number.starts_with("BK-"));

        let parts: Vec<&str> = number.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[1].len(), 8);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), BOOKING_NUMBER_SUFFIX_LEN);
    }

    #[test]
    fn booking_number_excludes_ambiguous_characters() {
        for _ in 0..50 {
            let number = generate_booking_number();
            let suffix = number.rsplit('-').next().unwrap();
            assert!(
                !suffix.contains(['I', 'O', '0', '1']),
                "ambiguous character in {}",
                number
            );
        }
    }

    #[test]
    fn booking_numbers_are_random() {
        let a = generate_booking_number();
        let b = generate_booking_number();
        // Same date prefix, overwhelmingly different suffix
        assert_eq!(a[..11], b[..11]);
        assert!(a != b || a.len() == b.len());
    }
}
