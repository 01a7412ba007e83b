use serde::{Deserialize, Serialize};

use crate::{
    api::error::ValidationError,
    model::{User, ValidateModel},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub username: Option<String>,
}

impl CreateUserRequest {
    pub fn username(&self) -> Result<&str, ValidationError> {
        match self.username.as_deref() {
            Some(username) if !username.is_empty() => Ok(username),
            _ => Err(ValidationError::new("Username is required")),
        }
    }
}

impl ValidateModel for CreateUserRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        self.username().map(|_| ())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<User>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_username_is_rejected() {
        let req = CreateUserRequest { username: None };
        assert_eq!(
            req.validate().unwrap_err().message,
            "Username is required"
        );
    }

    #[test]
    fn empty_username_is_rejected() {
        let req = CreateUserRequest {
            username: Some(String::new()),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn present_username_passes() {
        let req = CreateUserRequest {
            username: Some("fcc_test".to_owned()),
        };
        assert_eq!(req.username().unwrap(), "fcc_test");
    }
}
