//! Access-control middleware
//!
//! `protect` gates a request through the full chain: bearer-token
//! extraction, signature/expiry verification, account load, freshness
//! check against the last credential change. Each failed step
//! terminates the request with a 401 in the standard envelope.
//! `restrict_to` is the second-stage role gate layered after it.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::common::domain_error_response;
use crate::domain::{AuthError, DomainError, User, UserRepositoryInterface, UserRole};
use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig};

/// State for the `protect` middleware: the verification key material
/// plus the account store.
#[derive(Clone)]
pub struct AuthState {
    pub jwt: JwtConfig,
    pub users: Arc<dyn UserRepositoryInterface>,
}

/// The fully-loaded account of the authenticated caller, attached to
/// request extensions for downstream handlers.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// Authentication middleware - requires a valid, fresh bearer token
/// belonging to an existing account.
pub async fn protect(
    State(state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    // 1. Bearer token present?
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);
    let Some(auth_header) = auth_header else {
        return reject(AuthError::NotAuthenticated.into());
    };
    let Some(token) = extract_bearer_token(&auth_header) else {
        return reject(AuthError::NotAuthenticated.into());
    };

    // 2. Signature, expiry, issuer
    let claims = match verify_token(token, &state.jwt) {
        Ok(claims) => claims,
        Err(e) => return reject(e.into()),
    };

    // 3. The subject must still exist (covers deleted accounts holding
    //    otherwise-valid tokens)
    let user = match state.users.find_by_id(&claims.sub).await {
        Ok(Some(user)) => user,
        Ok(None) => return reject(AuthError::AccountGone.into()),
        Err(e) => return reject(e),
    };

    // 4. Tokens issued before the last credential change are stale
    if user.changed_password_after(claims.iat) {
        return reject(AuthError::StalePassword.into());
    }

    // 5. Attach the account for downstream handlers
    request.extensions_mut().insert(CurrentUser(user));
    next.run(request).await
}

/// Role gate, layered after [`protect`]:
///
/// ```ignore
/// Router::new()
///     .route("/", delete(remove_tour))
///     .layer(middleware::from_fn(restrict_to(&[UserRole::Admin, UserRole::LeadGuide])))
///     .layer(middleware::from_fn_with_state(auth_state, protect))
/// ```
///
/// Running it without `protect` first is a composition bug in the
/// router, not a runtime condition, so it panics.
pub fn restrict_to(
    allowed: &'static [UserRole],
) -> impl Fn(Request<Body>, Next) -> Pin<Box<dyn Future<Output = Response> + Send>> + Clone {
    move |request: Request<Body>, next: Next| Box::pin(check_role(allowed, request, next))
}

async fn check_role(
    allowed: &'static [UserRole],
    request: Request<Body>,
    next: Next,
) -> Response {
    let current = request
        .extensions()
        .get::<CurrentUser>()
        .expect("restrict_to must be layered after protect");

    if !allowed.contains(&current.0.role) {
        return reject(AuthError::Forbidden.into());
    }

    next.run(request).await
}

fn reject(err: DomainError) -> Response {
    domain_error_response::<()>(err).into_response()
}

// ── Tests ──────────────────────────────────────────────────────
