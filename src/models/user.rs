use serde::{Deserialize, Serialize};

use crate::validation::{self, Validate, ValidationErrors};

/// An account as returned by `/api/users` and `/api/users/me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    #[serde(rename = "voornaam", default)]
    pub first_name: String,

    #[serde(rename = "achternaam", default)]
    pub last_name: String,

    #[serde(default)]
    pub email: String,

    #[serde(rename = "isDocent", default)]
    pub is_teacher: bool,

    #[serde(rename = "classGroupId", default, skip_serializing_if = "Option::is_none")]
    pub class_group_id: Option<String>,

    #[serde(rename = "telefoonnummer", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Keep only students (non-teachers)
pub fn students(users: Vec<User>) -> Vec<User> {
    users.into_iter().filter(|u| !u.is_teacher).collect()
}

/// Login input as typed
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/users/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// Request body with the email trimmed; the password is sent as typed
    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

impl Validate for LoginForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validation::email(&mut errors, "email", &self.email);
        validation::required(&mut errors, "password", &self.password);
        errors.into_result()
    }
}

/// Registration input, including the confirmation field
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

/// Body of `POST /api/users/register`
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    #[serde(rename = "voornaam")]
    pub first_name: String,
    #[serde(rename = "achternaam")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "telefoonnummer")]
    pub phone: String,
    pub password: String,
}

impl RegisterForm {
    /// Request body; the confirmation field stays client-side
    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

impl Validate for RegisterForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validation::required(&mut errors, "first_name", &self.first_name);
        validation::required(&mut errors, "last_name", &self.last_name);
        validation::email(&mut errors, "email", &self.email);
        validation::required(&mut errors, "password", &self.password);
        if self.password != self.confirm_password {
            errors.add("confirm_password", "Passwords do not match");
        }
        errors.into_result()
    }
}

/// Response of login and registration
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}
