//! Vehicle mix settings
//!
//! The generator takes whatever percentages it is given. Anything that lets
//! an operator edit them goes through here first.

use anyhow::{bail, Context, Result};

use crate::simulation::{CategoryWeights, VehicleCategory};

/// Parse one percentage typed in by an operator
pub fn parse_percentage(input: &str) -> Result<u32> {
    let trimmed = input.trim();
    let value: i64 = trimmed
        .parse()
        .with_context(|| format!("'{}' is not a whole number", trimmed))?;

    if value < 0 {
        bail!("Percentage {} is negative", value);
    }
    if value > 100 {
        bail!("Percentage {} is above 100", value);
    }
    Ok(value as u32)
}

/// Check that all category windows fit inside 100%
pub fn validate_weights(weights: &CategoryWeights) -> Result<()> {
    let total = weights.total();
    if total > 100 {
        let breakdown: Vec<String> = weights
            .iter()
            .map(|(category, percent)| format!("{}={}", category.label(), percent))
            .collect();
        bail!(
            "Vehicle percentages add up to {} ({}), must be at most 100",
            total,
            breakdown.join(", ")
        );
    }
    Ok(())
}

/// Apply new percentages all at once
///
/// If the result would not validate, `weights` is left untouched.
pub fn apply_weights(
    weights: &mut CategoryWeights,
    changes: &[(VehicleCategory, u32)],
) -> Result<()> {
    let mut updated = weights.clone();
    for (category, percent) in changes {
        updated.set(*category, *percent);
    }
    validate_weights(&updated)?;
    *weights = updated;
    Ok(())
}
