//! Authentication endpoints: login, OTP, registration.
//!
//! Malformed input is caught here, before any network call, and surfaced
//! as a validation error against the offending field.

use serde::{Deserialize, Serialize};

use kerala_session::{SellerProfile, Session, UserType};

use crate::error::ApiError;

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub api_token: String,
    pub seller: SellerProfile,
}

impl LoginResponse {
    /// Fold the response into a persistable session.
    pub fn into_session(self) -> Session {
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            api_token: self.api_token,
            user_type: UserType::Seller,
            profile: self.seller,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SendOtpRequest {
    pub phone: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub otp: String,
    pub password: String,
    #[serde(skip_serializing)]
    pub confirm_password: String,
}

/// Indian mobile number: exactly 10 digits, optionally prefixed +91/0.
pub fn validate_phone(phone: &str) -> Result<(), ApiError> {
    let digits = phone
        .trim()
        .strip_prefix("+91")
        .or_else(|| phone.trim().strip_prefix('0'))
        .unwrap_or(phone.trim());
    let ok = digits.len() == 10 && digits.chars().all(|c| c.is_ascii_digit());
    if ok {
        Ok(())
    } else {
        Err(ApiError::validation(
            Some("phone"),
            "enter a valid 10-digit mobile number",
        ))
    }
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_phone(&self.phone)?;
        if self.password.is_empty() {
            return Err(ApiError::validation(Some("password"), "password is required"));
        }
        Ok(())
    }
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::validation(Some("name"), "name is required"));
        }
        if !self.email.contains('@') {
            return Err(ApiError::validation(Some("email"), "enter a valid email"));
        }
        validate_phone(&self.phone)?;
        if self.password.len() < 8 {
            return Err(ApiError::validation(
                Some("password"),
                "password must be at least 8 characters",
            ));
        }
        if self.password != self.confirm_password {
            return Err(ApiError::validation(
                Some("confirm_password"),
                "passwords do not match",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_prefixed_mobile_numbers() {
        assert!(validate_phone("9876543210").is_ok());
        assert!(validate_phone("+919876543210").is_ok());
        assert!(validate_phone("09876543210").is_ok());
    }

    #[test]
    fn rejects_malformed_numbers_before_any_network_call() {
        for bad in ["12345", "98765432101", "98765abcde", ""] {
            let err = validate_phone(bad).unwrap_err();
            assert!(matches!(err, ApiError::Validation { .. }), "{bad}");
        }
    }

    #[test]
    fn register_rejects_mismatched_passwords() {
        let req = RegisterRequest {
            name: "Anju".to_string(),
            email: "anju@example.com".to_string(),
            phone: "9876543210".to_string(),
            otp: "123456".to_string(),
            password: "secret-pass".to_string(),
            confirm_password: "secret-typo".to_string(),
        };
        match req.validate().unwrap_err() {
            ApiError::Validation { field, .. } => {
                assert_eq!(field.as_deref(), Some("confirm_password"))
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
