//! Authentication-related handlers

use axum::{Extension, Json};
use serde::Serialize;

use crate::{AuthMethod, AuthUser};

/// Response for the /api/me endpoint
#[derive(Serialize)]
pub struct MeResponse {
    /// The authenticated user's id (email for proxy auth)
    pub user: String,
    /// How the user was authenticated
    pub auth_method: AuthMethod,
}

/// Get the currently authenticated user
pub async fn get_me(Extension(user): Extension<AuthUser>) -> Json<MeResponse> {
    Json(MeResponse {
        user: user.id,
        auth_method: user.method,
    })
}
