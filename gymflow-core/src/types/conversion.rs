//! Club-scoped client code generation.

use rand::Rng;

/// Lowest 6-digit suffix.
const CODE_SUFFIX_MIN: u32 = 100_000;
/// Highest 6-digit suffix.
const CODE_SUFFIX_MAX: u32 = 999_999;

/// Generates a club-scoped display code for a converting client:
/// the club name uppercased with whitespace stripped, followed by a random
/// 6-digit number.
///
/// The code is not guaranteed globally unique; the backend owns the real
/// primary key of the created client and collisions on the display code are
/// accepted as negligible.
#[must_use]
pub fn generate_club_code(club_name: &str) -> String {
    let suffix = rand::rng().random_range(CODE_SUFFIX_MIN..=CODE_SUFFIX_MAX);
    club_code_with_suffix(club_name, suffix)
}

pub(crate) fn club_code_with_suffix(club_name: &str, suffix: u32) -> String {
    let stem: String = club_name
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();
    format!("{stem}{suffix}")
}
