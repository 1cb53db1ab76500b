//! Client-side VIN validation per ISO 3779.
//!
//! Checks run in order and stop at the first failure:
//! 1. exactly 17 characters
//! 2. only `A-H J-N P R-Z 0-9` (no I, O, Q, no lowercase)
//! 3. the check digit at position 9 matches the weighted sum mod 11

use crate::error::ValidationError;

/// Length of every VIN.
pub const VIN_LENGTH: usize = 17;

/// Zero-based index of the check digit.
pub const CHECK_DIGIT_INDEX: usize = 8;

/// Positional weights for positions 1..=17. Position 9 weighs 0.
pub const POSITION_WEIGHTS: [u32; VIN_LENGTH] = [8, 7, 6, 5, 4, 3, 2, 10, 0, 9, 8, 7, 6, 5, 4, 3, 2];

/// Letters that never appear in a VIN.
const FORBIDDEN_LETTERS: [char; 3] = ['I', 'O', 'Q'];

/// ISO 3779 transliteration. I, O and Q have no value.
pub fn transliterate(c: char) -> Option<u32> {
    let value = match c {
        '0'..='9' => c as u32 - '0' as u32,
        'A'..='H' => c as u32 - 'A' as u32 + 1,
        'J'..='N' => c as u32 - 'J' as u32 + 1,
        'P' => 7,
        'R' => 9,
        'S'..='Z' => c as u32 - 'S' as u32 + 2,
        _ => return None,
    };
    Some(value)
}

/// Validate a VIN.
///
/// # Errors
///
/// - `ValidationError::InvalidLength`: not 17 characters.
/// - `ValidationError::InvalidCharacters`: a character outside the VIN set.
/// - `ValidationError::InvalidCheckDigit`: position 9 disagrees with the
///   computed check digit.
pub fn validate(vin: &str) -> Result<(), ValidationError> {
    if vin.chars().count() != VIN_LENGTH {
        return Err(ValidationError::InvalidLength);
    }

    if !vin.chars().all(|c| transliterate(c).is_some()) {
        return Err(ValidationError::InvalidCharacters);
    }

    let computed = compute_check_digit(vin)?;
    let actual = vin.chars().nth(CHECK_DIGIT_INDEX);
    if actual != Some(computed) {
        return Err(ValidationError::InvalidCheckDigit);
    }

    Ok(())
}

/// Compute the expected check digit (`'0'..='9'` or `'X'`).
///
/// The character already at position 9 is multiplied by weight 0, so it never
/// influences the result.
pub fn compute_check_digit(vin: &str) -> Result<char, ValidationError> {
    if vin.chars().count() != VIN_LENGTH {
        return Err(ValidationError::InvalidLength);
    }

    let mut sum = 0u32;
    for (c, weight) in vin.chars().zip(POSITION_WEIGHTS) {
        let value = transliterate(c).ok_or(ValidationError::InvalidCharacters)?;
        sum += value * weight;
    }

    Ok(match sum % 11 {
        10 => 'X',
        d => (b'0' + d as u8) as char,
    })
}

/// Letters from {I, O, Q} present in partially typed input.
///
/// Returns a sorted, comma-joined list such as `"I, Q"`, or `None` when there
/// is nothing to report. Over-length input is left to the length check.
pub fn forbidden_letters(input: &str) -> Option<String> {
    if input.chars().count() > VIN_LENGTH {
        return None;
    }

    let found: Vec<String> = FORBIDDEN_LETTERS
        .iter()
        .filter(|letter| input.contains(**letter))
        .map(|letter| letter.to_string())
        .collect();

    if found.is_empty() {
        None
    } else {
        Some(found.join(", "))
    }
}
