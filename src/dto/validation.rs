//! Validation helpers for DTOs.

use validator::ValidationError;

use crate::dto::game::PlayerCountDto;

/// Rejects strings that are empty once surrounding whitespace is removed.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Checks `max >= min` and that every optimal count lies within `[min, max]`.
///
/// ```ignore
/// validate_player_range(&PlayerCountDto { min: 2, max: 4, optimal: vec![3] }) // Ok
/// validate_player_range(&PlayerCountDto { min: 5, max: 4, optimal: vec![] })  // Err - inverted
/// validate_player_range(&PlayerCountDto { min: 2, max: 4, optimal: vec![6] }) // Err - optimal outside
/// ```
pub fn validate_player_range(range: &PlayerCountDto) -> Result<(), ValidationError> {
    if range.max < range.min {
        let mut err = ValidationError::new("player_range_inverted");
        err.message = Some(
            format!(
                "max players ({}) must not be below min players ({})",
                range.max, range.min
            )
            .into(),
        );
        return Err(err);
    }

    if let Some(outlier) = range
        .optimal
        .iter()
        .find(|count| !(range.min..=range.max).contains(*count))
    {
        let mut err = ValidationError::new("optimal_out_of_range");
        err.message = Some(
            format!(
                "optimal count {outlier} is outside [{}, {}]",
                range.min, range.max
            )
            .into(),
        );
        return Err(err);
    }

    Ok(())
}
