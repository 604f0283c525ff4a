use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Admin,
    SuperAdmin,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub exp: usize,
    pub iat: usize,
    pub jti: String,

    #[serde(rename = "https://galaxycine.vn/claims/role")]
    pub role: Role,

    #[serde(rename = "https://galaxycine.vn/claims/email")]
    pub email: String,

    #[serde(rename = "https://galaxycine.vn/claims/name")]
    pub name: String,

    #[serde(rename = "https://galaxycine.vn/claims/phone", default)]
    pub phone: Option<String>,

    #[serde(rename = "https://galaxycine.vn/claims/csrf")]
    pub csrf_token: String,
}

/// Caller identity as carried by a verified access token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: String,
    pub role: Role,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            role: claims.role,
            email: claims.email,
            full_name: claims.name,
            phone: claims.phone,
        }
    }
}
