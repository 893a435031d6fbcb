//! # Request validation
//!
//! Small explicit checks the handlers run before touching the database.
//! Each returns the first failure as [`ApiError::Validation`], so chaining
//! them with `?` reports one error at a time — the same contract the API
//! has always had ("detail" carries the first failed check).

use crate::error::ApiError;

const MIN_PASSWORD_LEN: usize = 6;

/// Reject empty or whitespace-only values.
pub fn required(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// A plausible email: one `@` with something on both sides and a dot in the
/// domain. Deliverability is the mail server's problem, not ours.
pub fn email(value: &str) -> Result<(), ApiError> {
    required("email", value)?;
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    };
    if !valid {
        return Err(ApiError::Validation("Enter a valid email address".into()));
    }
    Ok(())
}

pub fn password(value: &str) -> Result<(), ApiError> {
    if value.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

/// Funding goals and donation amounts must not be negative.
pub fn non_negative(field: &str, value: i64) -> Result<(), ApiError> {
    if value < 0 {
        return Err(ApiError::Validation(format!("{field} must not be negative")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(err: ApiError) -> String {
        err.to_string()
    }

    #[test]
    fn required_rejects_blank() {
        assert!(required("title", "Save the reef").is_ok());
        assert_eq!(
            detail(required("title", "   ").unwrap_err()),
            "title is required"
        );
    }

    #[test]
    fn email_shapes() {
        assert!(email("ricky@gmail.com").is_ok());
        for bad in ["", "ricky", "@gmail.com", "ricky@", "ricky@gmail", "ricky@.com"] {
            assert!(email(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn password_length() {
        assert!(password("asdasd123").is_ok());
        assert!(password("abc").is_err());
    }

    #[test]
    fn amounts_must_not_be_negative() {
        assert!(non_negative("amount", 0).is_ok());
        assert!(non_negative("amount", 500).is_ok());
        assert_eq!(
            detail(non_negative("amount", -1).unwrap_err()),
            "amount must not be negative"
        );
    }
}
