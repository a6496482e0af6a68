//! Persisted preference slots and the bounds the input surface enforces.

use crate::error::SettingsError;

pub const FAVORITES_KEY: &str = "reflection-dice-favorites";
pub const ROLL_DURATION_KEY: &str = "reflection-dice-duration";

pub const DEFAULT_ROLL_DURATION_MS: u32 = 1000;
pub const MIN_ROLL_DURATION_MS: u32 = 500;
pub const MAX_ROLL_DURATION_MS: u32 = 2000;
pub const ROLL_DURATION_STEP_MS: u32 = 100;

/// Checks a user-entered roll duration. The session controller accepts any
/// value; only input surfaces call this.
pub fn validate_roll_duration(value: u32) -> Result<u32, SettingsError> {
    if !(MIN_ROLL_DURATION_MS..=MAX_ROLL_DURATION_MS).contains(&value) {
        return Err(SettingsError::OutOfRange {
            value,
            min: MIN_ROLL_DURATION_MS,
            max: MAX_ROLL_DURATION_MS,
        });
    }
    if value % ROLL_DURATION_STEP_MS != 0 {
        return Err(SettingsError::OffStep {
            value,
            step: ROLL_DURATION_STEP_MS,
        });
    }
    Ok(value)
}

/// Every value the input surface can produce, lowest first.
pub fn roll_duration_choices() -> impl Iterator<Item = u32> {
    (MIN_ROLL_DURATION_MS..=MAX_ROLL_DURATION_MS).step_by(ROLL_DURATION_STEP_MS as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds_and_steps() {
        assert_eq!(validate_roll_duration(500), Ok(500));
        assert_eq!(validate_roll_duration(1300), Ok(1300));
        assert_eq!(validate_roll_duration(2000), Ok(2000));
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(matches!(
            validate_roll_duration(400),
            Err(SettingsError::OutOfRange { value: 400, .. })
        ));
        assert!(matches!(
            validate_roll_duration(2100),
            Err(SettingsError::OutOfRange { value: 2100, .. })
        ));
    }

    #[test]
    fn rejects_off_step_values() {
        assert_eq!(
            validate_roll_duration(750),
            Err(SettingsError::OffStep {
                value: 750,
                step: 100
            })
        );
    }

    #[test]
    fn choices_cover_the_slider() {
        let choices: Vec<u32> = roll_duration_choices().collect();
        assert_eq!(choices.len(), 16);
        assert_eq!(choices.first(), Some(&500));
        assert_eq!(choices.last(), Some(&2000));
        assert!(choices.contains(&DEFAULT_ROLL_DURATION_MS));
    }
}
