use crate::session::ValidationError;

/// Who is taking the quiz. Set once on the welcome screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Participant {
    name: String,
    roll: u64,
}

impl Participant {
    /// Validate raw form input. Checks run in display order so the first
    /// problem the user sees is the first field that is wrong.
    pub fn from_input(name: &str, roll: &str) -> Result<Self, ValidationError> {
        let name = validate_name(name)?;
        let roll = validate_roll(roll)?;
        Ok(Self { name, roll })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn roll(&self) -> u64 {
        self.roll
    }
}

fn validate_name(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if !trimmed.chars().all(|c| c.is_alphabetic() || c == ' ') {
        return Err(ValidationError::InvalidName);
    }
    Ok(trimmed.to_string())
}

fn validate_roll(raw: &str) -> Result<u64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyRoll);
    }
    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::NonNumericRoll);
    }
    // All digits but too large for u64 is still "numeric"; report it as such.
    let roll: u64 = trimmed
        .parse()
        .map_err(|_| ValidationError::NonNumericRoll)?;
    if roll == 0 {
        return Err(ValidationError::ZeroRoll);
    }
    Ok(roll)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_participant() {
        let p = Participant::from_input("  Ada Lovelace ", " 42 ").unwrap();
        assert_eq!(p.name(), "Ada Lovelace");
        assert_eq!(p.roll(), 42);
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(
            Participant::from_input("   ", "1"),
            Err(ValidationError::EmptyName)
        );
    }

    #[test]
    fn test_name_with_digits_or_punctuation() {
        assert_eq!(
            Participant::from_input("R2D2", "1"),
            Err(ValidationError::InvalidName)
        );
        assert_eq!(
            Participant::from_input("O'Brien", "1"),
            Err(ValidationError::InvalidName)
        );
    }

    #[test]
    fn test_non_ascii_letters_are_alphabetic() {
        assert!(Participant::from_input("Zoë Ångström", "7").is_ok());
    }

    #[test]
    fn test_roll_errors_in_order() {
        assert_eq!(
            Participant::from_input("Ada", ""),
            Err(ValidationError::EmptyRoll)
        );
        assert_eq!(
            Participant::from_input("Ada", "12a"),
            Err(ValidationError::NonNumericRoll)
        );
        assert_eq!(
            Participant::from_input("Ada", "-3"),
            Err(ValidationError::NonNumericRoll)
        );
        assert_eq!(
            Participant::from_input("Ada", "000"),
            Err(ValidationError::ZeroRoll)
        );
    }

    #[test]
    fn test_name_checked_before_roll() {
        assert_eq!(
            Participant::from_input("", "0"),
            Err(ValidationError::EmptyName)
        );
    }
}
