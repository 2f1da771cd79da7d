//! Input validation shared by the CLI and the HTTP API.

/// Longest player name accepted from user input
pub const MAX_NAME_LENGTH: usize = 100;

/// Validation error types
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Empty player name provided")]
    EmptyName,
    #[error("Player name too long: exceeds {MAX_NAME_LENGTH} characters")]
    NameTooLong,
    #[error("Invalid player name: contains control characters")]
    InvalidCharacters,
}

/// Validate a raw player name before resolution.
///
/// Returns the trimmed input. Resolution itself still decides whether the
/// name maps to a player.
///
/// # Examples
///
/// ```
/// use nba_mantle::utils::validation::validate_name_input;
///
/// assert_eq!(validate_name_input("  Klay Thompson ").unwrap(), "Klay Thompson");
/// assert!(validate_name_input("   ").is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::EmptyName` for blank input,
/// `ValidationError::NameTooLong` past [`MAX_NAME_LENGTH`] characters, or
/// `ValidationError::InvalidCharacters` if it contains control characters.
pub fn validate_name_input(raw: &str) -> Result<&str, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::NameTooLong);
    }

    if trimmed.chars().any(char::is_control) {
        return Err(ValidationError::InvalidCharacters);
    }

    Ok(trimmed)
}

/// Cap a requested result count to `max`, treating 0 as "use the default"
#[must_use]
pub fn clamp_limit(requested: usize, default: usize, max: usize) -> usize {
    if requested == 0 {
        default.min(max)
    } else {
        requested.min(max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_input() {
        assert_eq!(validate_name_input("LeBron James"), Ok("LeBron James"));
        assert_eq!(validate_name_input("\tLuka Dončić\n"), Ok("Luka Dončić"));
        assert_eq!(validate_name_input(""), Err(ValidationError::EmptyName));
        assert_eq!(validate_name_input(" \t "), Err(ValidationError::EmptyName));
        assert_eq!(
            validate_name_input("Le\u{0}Bron"),
            Err(ValidationError::InvalidCharacters)
        );
    }

    #[test]
    fn test_name_length_limit_counts_chars() {
        let at_limit = "é".repeat(MAX_NAME_LENGTH);
        assert!(validate_name_input(&at_limit).is_ok());

        let over = "a".repeat(MAX_NAME_LENGTH + 1);
        assert_eq!(validate_name_input(&over), Err(ValidationError::NameTooLong));
    }

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(0, 5, 50), 5);
        assert_eq!(clamp_limit(3, 5, 50), 3);
        assert_eq!(clamp_limit(500, 5, 50), 50);
    }
}
