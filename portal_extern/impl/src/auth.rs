use std::{collections::BTreeMap, sync::Arc};

use anyhow::{anyhow, Context};
use portal_auth_contracts::parse_expiration;
use portal_extern_contracts::auth::{AuthApiError, AuthApiService};
use portal_models::{
    auth::{Login, LoginCredentials, Registration},
    user::{Identity, UserName, UserRole},
};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::http_client;

#[derive(Debug, Clone)]
pub struct AuthApiServiceImpl {
    base_url: Arc<Url>,
    client: reqwest::Client,
}

impl AuthApiServiceImpl {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url: Arc::new(base_url),
            client: http_client(),
        }
    }

    fn endpoint(&self, segments: [&str; 2]) -> anyhow::Result<Url> {
        let mut url = (*self.base_url).clone();
        url.path_segments_mut()
            .map_err(|()| anyhow!("API base URL cannot be used as a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl AuthApiService for AuthApiServiceImpl {
    #[tracing::instrument(skip(self, credentials))]
    async fn login(&self, credentials: &LoginCredentials) -> Result<Login, AuthApiError> {
        let url = self.endpoint(["Usuarios", "login"])?;
        let response = self
            .client
            .post(url)
            .json(&LoginRequest {
                email: &credentials.email,
                senha: &credentials.password,
            })
            .send()
            .await
            .context("Failed to reach the portal API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(rejection(status, &body));
        }

        let payload = response.json::<LoginResponse>().await.map_err(|err| {
            tracing::warn!(%err, "Login response is not a valid payload");
            AuthApiError::InvalidResponse
        })?;
        payload.try_into()
    }

    #[tracing::instrument(skip(self, registration))]
    async fn register(&self, registration: &Registration) -> Result<(), AuthApiError> {
        let url = self.endpoint(["Usuarios", "registrar"])?;
        let response = self
            .client
            .post(url)
            .json(&RegisterRequest {
                nome: &registration.name,
                email: &registration.email,
                senha: &registration.password,
                perfil: wire_role(registration.role),
            })
            .send()
            .await
            .context("Failed to reach the portal API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(rejection(status, &body));
        }
        Ok(())
    }
}

/// The upstream API speaks Portuguese on the wire.
fn wire_role(role: UserRole) -> &'static str {
    match role {
        UserRole::Candidate => "candidato",
        UserRole::Company => "empresa",
        UserRole::Admin => "administrador",
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a email_address::EmailAddress,
    senha: &'a portal_models::auth::UserPassword,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    nome: &'a UserName,
    email: &'a email_address::EmailAddress,
    senha: &'a portal_models::auth::UserPassword,
    perfil: &'static str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    expiration: String,
    usuario: UserPayload,
}

#[derive(Debug, Deserialize)]
struct UserPayload {
    id: uuid::Uuid,
    nome: String,
    email: String,
    perfil: UserRole,
}

impl TryFrom<LoginResponse> for Login {
    type Error = AuthApiError;

    fn try_from(value: LoginResponse) -> Result<Self, Self::Error> {
        if value.token.is_empty() {
            return Err(invalid("token"));
        }
        let expires_at = parse_expiration(&value.expiration).map_err(|_| invalid("expiration"))?;
        let name = UserName::try_new(value.usuario.nome).map_err(|_| invalid("user name"))?;
        let email = value.usuario.email.parse().map_err(|_| invalid("user email"))?;

        Ok(Login {
            identity: Identity {
                id: value.usuario.id.into(),
                name,
                email,
                role: value.usuario.perfil,
            },
            token: value.token.into(),
            expires_at,
        })
    }
}

fn invalid(field: &str) -> AuthApiError {
    tracing::warn!(field, "Login response failed validation");
    AuthApiError::InvalidResponse
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    errors: Option<BTreeMap<String, Vec<String>>>,
}

/// Maps a non-success response to an error, preferring whatever explanation
/// the backend included in the body.
fn rejection(status: StatusCode, body: &str) -> AuthApiError {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(errors) = parsed.errors.filter(|errors| !errors.is_empty()) {
            let details = errors.into_values().flatten().collect::<Vec<_>>().join(" ");
            return AuthApiError::Rejected(format!("Validation failed: {details}"));
        }
        if let Some(message) = parsed.message.filter(|message| !message.is_empty()) {
            return AuthApiError::Rejected(message);
        }
    }

    match status {
        StatusCode::UNAUTHORIZED => AuthApiError::InvalidCredentials,
        StatusCode::BAD_REQUEST
            if !body.trim().is_empty()
                && body.len() < 200
                && !body.trim_start().starts_with(['{', '[']) =>
        {
            AuthApiError::Rejected(body.trim().to_owned())
        }
        _ => AuthApiError::Rejected(format!("The server responded with status {status}.")),
    }
}

#[cfg(test)]
mod tests {
    use portal_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    fn payload() -> LoginResponse {
        LoginResponse {
            token: "issued-token".into(),
            expiration: "2024-05-01T13:00:00Z".into(),
            usuario: UserPayload {
                id: portal_demo::CANDIDATE.id.into_inner(),
                nome: "joana".into(),
                email: "joana@example.com".into(),
                perfil: UserRole::Candidate,
            },
        }
    }

    #[test]
    fn a_valid_login_response_converts_into_closed_types() {
        // Act
        let login = Login::try_from(payload()).unwrap();

        // Assert
        assert_eq!(login.identity, *portal_demo::CANDIDATE);
        assert_eq!(login.token.as_ref(), "issued-token");
        assert_eq!(login.expires_at, portal_demo::future_expiry());
    }

    #[test]
    fn a_login_response_with_a_bad_email_is_rejected() {
        let mut payload = payload();
        payload.usuario.email = "not-an-email".into();

        assert_matches!(Login::try_from(payload), Err(AuthApiError::InvalidResponse));
    }

    #[test]
    fn a_login_response_without_a_token_is_rejected() {
        let mut payload = payload();
        payload.token.clear();

        assert_matches!(Login::try_from(payload), Err(AuthApiError::InvalidResponse));
    }

    #[test]
    fn the_wire_payload_accepts_portuguese_roles() {
        let payload = serde_json::from_str::<UserPayload>(
            r#"{
                "id": "9e3f1ae6-58a0-4ef5-95d7-0fc9cd61d2a4",
                "nome": "joana",
                "email": "joana@example.com",
                "perfil": "candidato"
            }"#,
        )
        .unwrap();

        assert_eq!(payload.perfil, UserRole::Candidate);
    }

    #[test]
    fn model_state_validation_errors_are_joined() {
        let body = r#"{"errors":{"Email":["The Email field is required."],"Senha":["Too short."]}}"#;

        assert_matches!(
            rejection(StatusCode::BAD_REQUEST, body),
            AuthApiError::Rejected(message)
                if message == "Validation failed: The Email field is required. Too short."
        );
    }

    #[test]
    fn a_backend_message_is_passed_through() {
        let body = r#"{"message":"Email is already in use."}"#;

        assert_matches!(
            rejection(StatusCode::BAD_REQUEST, body),
            AuthApiError::Rejected(message) if message == "Email is already in use."
        );
    }

    #[test]
    fn a_bare_unauthorized_means_invalid_credentials() {
        assert_matches!(
            rejection(StatusCode::UNAUTHORIZED, ""),
            AuthApiError::InvalidCredentials
        );
    }

    #[test]
    fn a_short_plain_text_body_is_passed_through() {
        assert_matches!(
            rejection(StatusCode::BAD_REQUEST, "Dados de registo incompletos."),
            AuthApiError::Rejected(message) if message == "Dados de registo incompletos."
        );
    }

    #[test]
    fn anything_else_gets_a_generic_message() {
        assert_matches!(
            rejection(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>"),
            AuthApiError::Rejected(message) if message.contains("500")
        );
    }
}
