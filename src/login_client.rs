use {
    crate::utils::error_chain_fmt,
    secrecy::{ExposeSecret, Secret},
    serde_json::Value,
};

// Sentinel the server puts in `message` on a successful login; anything
// else in a 2xx body means the credentials were rejected.
const LOGIN_EXITOSO: &str = "Login exitoso";

// Stand-in detail when a failing response carries no usable `detail`.
const ERROR_DESCONOCIDO: &str = "Error desconocido";

/// Credential payload for one login attempt. Built fresh per submission,
/// never persisted.
pub struct LoginRequest {
    pub usuario: String,
    pub password: Secret<String>,
    pub rol: i32,
}

impl LoginRequest {
    /// Build the payload from raw form values. The rol control hands over
    /// a string; it is coerced to an integer here, before anything goes on
    /// the wire.
    pub fn from_form(
        rol: &str,
        matricula: &str,
        password: Secret<String>,
    ) -> Result<Self, std::num::ParseIntError> {
        Ok(Self {
            usuario: matricula.to_owned(),
            password,
            rol: rol.trim().parse()?,
        })
    }
}

#[derive(serde::Serialize)]
struct LoginRequestBody<'a> {
    usuario: &'a str,
    password: &'a str,
    rol: i32,
}

/// What one round-trip to the login endpoint concluded. The response body
/// is interpreted exactly once, here; callers never probe raw JSON.
#[derive(Debug, PartialEq)]
pub enum LoginOutcome {
    /// 2xx with `message == "Login exitoso"`. `record` is the full
    /// response body, untouched; `rol` is its `rol` field when present.
    Success { rol: Option<i64>, record: Value },
    /// 2xx with any other `message`.
    InvalidCredentials,
    /// Non-2xx status. `message` is the body's `detail`, when it has one.
    ServerFailure { message: String },
}

#[derive(thiserror::Error)]
pub enum LoginClientError {
    #[error("no response from the login endpoint")]
    Network(#[source] reqwest::Error),
    #[error("the server response is not valid JSON")]
    MalformedResponse(#[source] reqwest::Error),
}

impl std::fmt::Debug for LoginClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Client for the backend's login endpoint.
pub struct LoginClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl LoginClient {
    // No timeout on purpose: a submission is a single fire-and-forget
    // request, and the caller decides what to do about slow servers.
    pub fn new(base_url: String) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Issue the one `POST {base_url}/login/` of a submission and fold the
    /// response into a [`LoginOutcome`].
    #[tracing::instrument(
        name = "Posting a login attempt",
        skip(self, request),
        fields(usuario = %request.usuario, rol = %request.rol)
    )]
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginOutcome, LoginClientError> {
        let url = format!("{}/login/", self.base_url);
        let body = LoginRequestBody {
            usuario: &request.usuario,
            password: request.password.expose_secret(),
            rol: request.rol,
        };
        let response = self
            .http_client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(LoginClientError::Network)?;

        if !response.status().is_success() {
            let message = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.get("detail")
                        .and_then(Value::as_str)
                        .map(str::to_owned)
                })
                .unwrap_or_else(|| ERROR_DESCONOCIDO.to_owned());
            return Ok(LoginOutcome::ServerFailure { message });
        }

        let record = response
            .json::<Value>()
            .await
            .map_err(LoginClientError::MalformedResponse)?;
        tracing::debug!(respuesta = %record, "Respuesta del servidor");

        if record.get("message").and_then(Value::as_str) == Some(LOGIN_EXITOSO) {
            let rol = record.get("rol").and_then(Value::as_i64);
            Ok(LoginOutcome::Success { rol, record })
        } else {
            Ok(LoginOutcome::InvalidCredentials)
        }
    }
}
