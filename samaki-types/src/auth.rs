use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ============ Authentication ============

/// Registration request. At least one of `email`/`phone` must be present;
/// the gateway rejects the request before dispatch otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RegisterRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
    pub user_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Login request. Same identity constraint as [`RegisterRequest`].
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LoginRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
}

/// Response to both register and login.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AuthResponse {
    pub user_id: String,
    pub user_type: String,
    #[serde(default)]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl RegisterRequest {
    pub fn has_identity(&self) -> bool {
        self.email.is_some() || self.phone.is_some()
    }
}

impl LoginRequest {
    pub fn has_identity(&self) -> bool {
        self.email.is_some() || self.phone.is_some()
    }

    /// Login with an email identity.
    pub fn with_email<S: Into<String>>(email: S, password: S) -> Self {
        Self {
            email: Some(email.into()),
            phone: None,
            password: password.into(),
        }
    }

    /// Login with a phone identity.
    pub fn with_phone<S: Into<String>>(phone: S, password: S) -> Self {
        Self {
            email: None,
            phone: Some(phone.into()),
            password: password.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_identity_requires_email_or_phone() {
        let req = RegisterRequest {
            email: None,
            phone: None,
            password: "secret".into(),
            user_type: "fisher".into(),
            name: None,
            organization: None,
            location: None,
        };
        assert!(!req.has_identity());

        let req = RegisterRequest {
            phone: Some("+255700000001".into()),
            ..req
        };
        assert!(req.has_identity());
    }

    #[test]
    fn login_request_skips_absent_identity_fields() {
        let req = LoginRequest::with_email("fisher@example.com", "secret");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["email"], "fisher@example.com");
        assert!(json.get("phone").is_none());
    }
}
