//! Sign-in and registration forms.

use crate::models::{LoginRequest, RegisterRequest};
use crate::validation::ValidationErrors;

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.email("email", &self.email);
        errors.required("password", &self.password);
        errors.into_result()
    }

    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub project_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub confirm_email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    /// Every field is required; the confirmations must repeat their originals.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.required("project-name", &self.project_name);
        errors.required("first-name", &self.first_name);
        errors.required("last-name", &self.last_name);
        errors.email("email", &self.email);
        errors.email_confirmation("confirm-email", &self.confirm_email, "email", &self.email);
        errors.required("password", &self.password);
        errors.matches(
            "confirm-password",
            &self.confirm_password,
            "password",
            &self.password,
        );
        errors.into_result()
    }

    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            project: self.project_name.trim().to_string(),
        }
    }
}
