//! Password sign-in against the hosted auth service.

use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use shareio_core::{AuthBackend, AuthError, Identity};
use tracing::debug;

use super::Credential;
use crate::config::SIGN_IN_ENDPOINT;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    email: String,
    #[serde(default)]
    display_name: Option<String>,
    id_token: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

pub struct FirebaseAuth {
    api_key: String,
    credential: Credential,
}

impl FirebaseAuth {
    pub fn new(api_key: impl Into<String>, credential: Credential) -> Self {
        Self {
            api_key: api_key.into(),
            credential,
        }
    }
}

impl AuthBackend for FirebaseAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let url = format!("{}?key={}", SIGN_IN_ENDPOINT, self.api_key);
        let body = SignInRequest {
            email,
            password,
            return_secure_token: true,
        };

        let response = Request::post(&url)
            .json(&body)
            .map_err(|e| AuthError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if !response.ok() {
            let code = response
                .json::<ErrorEnvelope>()
                .await
                .map(|envelope| envelope.error.message)
                .unwrap_or_default();
            debug!(status = response.status(), code = %code, "sign-in rejected");
            return Err(AuthError::from_code(&code));
        }

        let payload: SignInResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Generic(e.to_string()))?;

        self.credential.set(Some(payload.id_token.clone()));
        Ok(Identity {
            uid: payload.local_id,
            email: payload.email,
            display_name: payload.display_name.filter(|name| !name.is_empty()),
            id_token: Some(payload.id_token),
        })
    }

    /// The REST API keeps no server-side session; dropping the token is enough.
    async fn sign_out(&self) -> Result<(), AuthError> {
        self.credential.set(None);
        Ok(())
    }

    fn resume(&self, identity: &Identity) {
        self.credential.set(identity.id_token.clone());
    }
}
