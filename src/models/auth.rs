use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Employee id resolved from the session cookie for the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentEmployee(pub i64);
