//! Validation helpers for DTOs.

use validator::ValidationError;

use crate::board::BOARD_SIZE;

/// Validates that a cell id has the shape `r{row}-c{col}` with both
/// coordinates inside the 5x5 grid.
///
/// # Examples
///
/// ```ignore
/// validate_cell_id("r2-c2") // Ok
/// validate_cell_id("r5-c0") // Err - row out of range
/// validate_cell_id("r2c2")  // Err - missing separator
/// ```
pub fn validate_cell_id(id: &str) -> Result<(), ValidationError> {
    let max_digit = b'0' + (BOARD_SIZE as u8 - 1);
    let valid = matches!(
        id.as_bytes(),
        [b'r', row, b'-', b'c', col]
            if (b'0'..=max_digit).contains(row) && (b'0'..=max_digit).contains(col)
    );

    if !valid {
        let mut err = ValidationError::new("cell_id_format");
        err.message = Some(
            format!("Cell ID must match r{{0-{n}}}-c{{0-{n}}}", n = BOARD_SIZE - 1).into(),
        );
        return Err(err);
    }

    Ok(())
}

/// Validates a client-supplied seed token: non-empty ASCII alphanumeric, at
/// most 64 characters. Generated seeds are [`crate::board::SEED_LENGTH`]
/// characters but longer hand-picked seeds are accepted.
pub fn validate_seed(seed: &str) -> Result<(), ValidationError> {
    if seed.is_empty() || seed.len() > 64 {
        let mut err = ValidationError::new("seed_length");
        err.message = Some(format!("Seed must be 1-64 characters (got {})", seed.len()).into());
        return Err(err);
    }

    if !seed.chars().all(|c| c.is_ascii_alphanumeric()) {
        let mut err = ValidationError::new("seed_format");
        err.message = Some("Seed must contain only ASCII alphanumeric characters".into());
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_cell_id_valid() {
        assert!(validate_cell_id("r0-c0").is_ok());
        assert!(validate_cell_id("r2-c2").is_ok());
        assert!(validate_cell_id("r4-c4").is_ok());
    }

    #[test]
    fn test_validate_cell_id_out_of_range() {
        assert!(validate_cell_id("r5-c0").is_err());
        assert!(validate_cell_id("r0-c5").is_err());
        assert!(validate_cell_id("r9-c9").is_err());
    }

    #[test]
    fn test_validate_cell_id_malformed() {
        assert!(validate_cell_id("").is_err());
        assert!(validate_cell_id("r2c2").is_err());
        assert!(validate_cell_id("r2-c22").is_err());
        assert!(validate_cell_id("c2-r2").is_err());
        assert!(validate_cell_id("r2-c2 ").is_err());
    }

    #[test]
    fn test_validate_seed_valid() {
        assert!(validate_seed("abc").is_ok());
        assert!(validate_seed("Seed1234").is_ok());
        assert!(validate_seed(&"a".repeat(64)).is_ok());
    }

    #[test]
    fn test_validate_seed_invalid() {
        assert!(validate_seed("").is_err());
        assert!(validate_seed(&"a".repeat(65)).is_err());
        assert!(validate_seed("seed one").is_err());
        assert!(validate_seed("seed-1").is_err());
    }
}
