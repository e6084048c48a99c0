//! Authentication payloads

use serde::{Deserialize, Serialize};
use validator::Validate;

use portal_core::services::{LoginResult, UserInfo};

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 128, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub role: String,
}

impl From<UserInfo> for UserDto {
    fn from(user: UserInfo) -> Self {
        Self {
            id: user.id.to_string(),
            display_name: user.display_name,
            email: user.email,
            role: user.role.as_str().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserDto,
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
}

impl From<LoginResult> for LoginResponse {
    fn from(result: LoginResult) -> Self {
        Self {
            user: result.user.into(),
            access_token: result.access_token,
            token_type: "Bearer",
            expires_in: result.expires_in,
        }
    }
}
