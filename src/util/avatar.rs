//! Avatar helpers: initials and a stable per-name color.

#[cfg(test)]
#[path = "avatar_test.rs"]
mod avatar_test;

/// Up to two uppercase initials for a display name or username.
///
/// `_`, `-` and `.` count as word separators.
pub fn initials(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .map(|c| if matches!(c, '_' | '-' | '.') { ' ' } else { c })
        .collect();
    let parts: Vec<&str> = cleaned.split_whitespace().collect();
    let first_char = |s: &str| s.chars().next().map(String::from).unwrap_or_default();
    match parts.as_slice() {
        [] => String::new(),
        [only] => first_char(only).to_uppercase(),
        [first, .., last] => format!("{}{}", first_char(first), first_char(last)).to_uppercase(),
    }
}

/// Deterministic `hsl(h, 70%, 50%)` color for `name`.
///
/// Matches the browser string hash (`hash = cp + (hash << 5) - hash` over
/// UTF-16 positions, with 32-bit shift semantics) so colors agree with other
/// clients of the same service.
pub fn name_to_color(name: &str) -> String {
    let units: Vec<u16> = name.encode_utf16().collect();
    let mut hash: i64 = 0;
    for i in 0..units.len() {
        let cp = code_point_at(&units, i);
        #[allow(clippy::cast_possible_truncation)]
        let shifted = i64::from((hash as i32).wrapping_shl(5));
        hash = cp + (shifted - hash);
    }
    let hue = hash.unsigned_abs() % 360;
    format!("hsl({hue}, 70%, 50%)")
}

fn code_point_at(units: &[u16], i: usize) -> i64 {
    let unit = units[i];
    if (0xD800..0xDC00).contains(&unit) {
        if let Some(&low) = units.get(i + 1) {
            if (0xDC00..0xE000).contains(&low) {
                return 0x10000 + ((i64::from(unit) - 0xD800) << 10) + (i64::from(low) - 0xDC00);
            }
        }
    }
    i64::from(unit)
}
