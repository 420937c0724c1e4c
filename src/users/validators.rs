// src/users/validators.rs
//! Input checks for account creation and updates

use regex::Regex;
use std::sync::OnceLock;

use super::models::{CreateUserRequest, UpdateUserRequest};
use crate::common::{ValidationResult, Validator};

pub const MAX_NAME_LENGTH: usize = 255;
pub const MIN_PASSWORD_LENGTH: usize = 8;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles")
    })
}

/// Canonical form used for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn validate_email(result: &mut ValidationResult, email: &str) {
    let email = email.trim();
    if email.is_empty() {
        result.add_error("email", "Email is required");
    } else if email.len() > MAX_NAME_LENGTH || !email_regex().is_match(email) {
        result.add_error("email", "Email address is not valid");
    }
}

pub fn validate_name(result: &mut ValidationResult, name: &str) {
    let name = name.trim();
    if name.is_empty() {
        result.add_error("name", "Name is required");
    } else if name.chars().count() > MAX_NAME_LENGTH {
        result.add_error("name", "Name must be at most 255 characters");
    }
}

/// At least eight characters with both letters and digits
pub fn validate_password(result: &mut ValidationResult, password: &str) {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        result.add_error("password", "Password must be at least 8 characters");
        return;
    }

    let has_letter = password.chars().any(|c| c.is_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !has_letter || !has_digit {
        result.add_error("password", "Password must contain letters and numbers");
    }
}

pub struct CreateUserValidator;

impl Validator<CreateUserRequest> for CreateUserValidator {
    fn validate(&self, data: &CreateUserRequest) -> ValidationResult {
        let mut result = ValidationResult::new();
        validate_email(&mut result, &data.email);
        validate_name(&mut result, &data.name);
        validate_password(&mut result, &data.password);
        result
    }
}

pub struct UpdateUserValidator;

impl Validator<UpdateUserRequest> for UpdateUserValidator {
    fn validate(&self, data: &UpdateUserRequest) -> ValidationResult {
        let mut result = ValidationResult::new();
        if let Some(email) = &data.email {
            validate_email(&mut result, email);
        }
        if let Some(name) = &data.name {
            validate_name(&mut result, name);
        }
        if let Some(password) = &data.password {
            validate_password(&mut result, password);
        }
        result
    }
}
