use poem_openapi::auth::Bearer;

use crate::errors::ApiError;
use crate::services::TokenService;
use crate::types::internal::auth::{AuthUser, Role};

/// Resolve the acting user from a bearer token.
pub fn authenticate(tokens: &TokenService, bearer: &Bearer) -> Result<AuthUser, ApiError> {
    let claims = tokens.verify(&bearer.token)?;
    AuthUser::from_claims(&claims).ok_or_else(|| ApiError::unauthorized("Invalid token"))
}

/// Enforce a role allow-list for an authenticated user.
pub fn require_role(user: &AuthUser, allowed: &[Role]) -> Result<(), ApiError> {
    if allowed.contains(&user.role) {
        Ok(())
    } else {
        Err(ApiError::forbidden(format!(
            "Forbidden: role \"{}\" is not allowed",
            user.role
        )))
    }
}

/// Resolve the acting user from a raw Authorization header value, if any.
///
/// Guest-permitted endpoints take the header as an optional parameter
/// instead of a security scheme. A missing header means a guest caller;
/// a present but invalid token is still a 401.
pub fn optional_user(
    tokens: &TokenService,
    header: Option<&str>,
) -> Result<Option<AuthUser>, ApiError> {
    let Some(value) = header else {
        return Ok(None);
    };
    let token = value.strip_prefix("Bearer ").unwrap_or(value);
    let claims = tokens.verify(token)?;
    let user =
        AuthUser::from_claims(&claims).ok_or_else(|| ApiError::unauthorized("Invalid token"))?;
    Ok(Some(user))
}
