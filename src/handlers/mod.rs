//! Route groups, one per resource. Each exposes `routes()` and is merged
//! into the application router by `router::hub_router`.

pub mod charge_current;
pub mod charge_history;
pub mod chargers;
pub mod connector_types;
pub mod favourites;
pub mod users;
pub mod vehicles;

use crate::error::HubError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

/// Trim and lowercase an email; reject values that cannot be one.
pub fn normalize_email(raw: &str) -> Result<String, HubError> {
    let email = raw.trim().to_ascii_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(HubError::bad_request(format!("invalid email '{}'", raw.trim()))),
    }
}

pub fn validate_percentage(field: &str, value: f64) -> Result<(), HubError> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(HubError::bad_request(format!("{field} must be between 0 and 100")))
    }
}

pub fn validate_non_negative(field: &str, value: f64) -> Result<(), HubError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(HubError::bad_request(format!("{field} must be a non-negative number")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_normalized() {
        assert_eq!(normalize_email("  A@B.com ").unwrap(), "a@b.com");
        assert!(normalize_email("no-at-sign").is_err());
        assert!(normalize_email("@b.com").is_err());
        assert!(normalize_email("a@").is_err());
    }

    #[test]
    fn percentage_bounds() {
        assert!(validate_percentage("p", 0.0).is_ok());
        assert!(validate_percentage("p", 100.0).is_ok());
        assert!(validate_percentage("p", 100.5).is_err());
        assert!(validate_percentage("p", f64::NAN).is_err());
    }
}
