//! Authentication middleware for resource routes.
//!
//! Every resource route accepts anonymous callers at the transport level; the
//! middleware only resolves a bearer token into an [`Actor`] when one is
//! presented. Routes that require authentication enforce it through the
//! [`CurrentActor`] extractor, so the same router serves both the public read
//! surface and the authenticated write surface.

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::AppState;
use eduvault_shared::{Actor, JwtError};

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

/// Middleware that resolves an optional bearer token.
///
/// - No Authorization header: the request continues anonymously.
/// - A valid token: the resolved [`Actor`] is stored in request extensions.
/// - A present but invalid, expired, or unknown-role token: 401. A bad
///   credential is never silently downgraded to anonymous access.
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(header) = auth_header else {
        return next.run(request).await;
    };

    let Some(token) = extract_bearer_token(header) else {
        return unauthorized("invalid_token", "Authorization header must carry a Bearer token");
    };

    match state.jwt_service.validate_token(token) {
        Ok(claims) => match claims.actor() {
            Some(actor) => {
                request.extensions_mut().insert(actor);
                next.run(request).await
            }
            None => unauthorized("invalid_token", "Token carries an unknown role"),
        },
        Err(JwtError::Expired) => unauthorized("token_expired", "Token has expired"),
        Err(_) => unauthorized("invalid_token", "Invalid or malformed token"),
    }
}

fn unauthorized(error: &str, message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": error, "message": message })),
    )
        .into_response()
}

/// Extractor for the authenticated actor. Rejects anonymous requests.
#[derive(Debug, Clone, Copy)]
pub struct CurrentActor(pub Actor);

impl<S> FromRequestParts<S> for CurrentActor
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Actor>()
            .copied()
            .map(CurrentActor)
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({
                        "error": "unauthorized",
                        "message": "Authentication required"
                    })),
                )
            })
    }
}

/// Extractor for the actor on routes that also serve anonymous callers.
#[derive(Debug, Clone, Copy)]
pub struct OptionalActor(pub Option<Actor>);

impl<S> FromRequestParts<S> for OptionalActor
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<Actor>().copied()))
    }
}
