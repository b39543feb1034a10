use {
    crate::{
        domain::Rol,
        login_client::{LoginClient, LoginOutcome, LoginRequest},
        session::SessionStore,
    },
    secrecy::Secret,
    std::sync::atomic::{AtomicU64, Ordering},
};

/// Pages a recognized rol is sent to after a successful login.
pub const ALUMNO_PAGE: &str = "/static/alumno.html";
pub const PROFESOR_PAGE: &str = "/static/profesor.html";
pub const ADMIN_PAGE: &str = "/static/admin_panel.html";

// The two fixed strings the inline error sink shows.
const CREDENCIALES_INCORRECTAS: &str = "Credenciales incorrectas.";
const ERROR_PREFIX: &str = "Hubo un error al hacer login: ";

/// The three values a login form submits. `rol` stays a string here; the
/// coercion to an integer is part of the submission, not of the form.
pub struct LoginForm {
    pub rol: String,
    pub matricula: String,
    pub password: Secret<String>,
}

/// What a completed submission decided: where to send the user, or what
/// to put in the inline error sink.
#[derive(Debug, PartialEq)]
pub enum SubmitOutcome {
    /// Successful login with a recognized rol; the session record was
    /// persisted before this decision.
    Redirect(&'static str),
    /// Successful login with an unrecognized rol: the record is persisted
    /// but the user stays put. Nothing is shown; matches the observed
    /// behavior of the form this replaces.
    LoggedIn,
    /// The text for the inline error sink.
    Rejected(String),
    /// A newer submission started while this one was in flight; no store
    /// write, no navigation.
    Superseded,
}

/// Drives one login submission end to end: coerce the form values, post
/// them, persist the session record, decide the navigation.
///
/// Submissions are not locked out against each other; a rapid double
/// submit issues two independent requests. Each submission takes a ticket,
/// and only the holder of the newest ticket is allowed to write the store
/// and navigate once its response lands.
pub struct LoginHandler<S> {
    client: LoginClient,
    store: S,
    submissions: AtomicU64,
}

impl<S: SessionStore> LoginHandler<S> {
    pub fn new(client: LoginClient, store: S) -> Self {
        Self {
            client,
            store,
            submissions: AtomicU64::new(0),
        }
    }

    pub fn session_store(&self) -> &S {
        &self.store
    }

    /// Handle one submission. Every failure along the way is caught here
    /// and folded into [`SubmitOutcome::Rejected`]; nothing escapes.
    pub async fn submit(&self, form: LoginForm) -> SubmitOutcome {
        let ticket = self.submissions.fetch_add(1, Ordering::SeqCst) + 1;
        match self.try_submit(&form, ticket).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error.cause_chain = ?e, "Error al hacer login");
                SubmitOutcome::Rejected(format!("{}{}", ERROR_PREFIX, e))
            }
        }
    }

    async fn try_submit(
        &self,
        form: &LoginForm,
        ticket: u64,
    ) -> Result<SubmitOutcome, anyhow::Error> {
        let request = LoginRequest::from_form(&form.rol, &form.matricula, form.password.clone())?;
        let outcome = self.client.login(&request).await?;

        if self.submissions.load(Ordering::SeqCst) != ticket {
            tracing::debug!("A newer submission took over; dropping this response");
            return Ok(SubmitOutcome::Superseded);
        }

        match outcome {
            LoginOutcome::Success { rol, record } => {
                self.store.set(&record)?;
                Ok(
                    match rol.and_then(|value| Rol::try_from(value).ok()) {
                        Some(Rol::Alumno) => SubmitOutcome::Redirect(ALUMNO_PAGE),
                        Some(Rol::Profesor) => SubmitOutcome::Redirect(PROFESOR_PAGE),
                        Some(Rol::Admin) => SubmitOutcome::Redirect(ADMIN_PAGE),
                        None => {
                            tracing::warn!(rol = ?rol, "Rol not recognized, staying put");
                            SubmitOutcome::LoggedIn
                        }
                    },
                )
            }
            LoginOutcome::InvalidCredentials => {
                Ok(SubmitOutcome::Rejected(CREDENCIALES_INCORRECTAS.to_owned()))
            }
            LoginOutcome::ServerFailure { message } => Ok(SubmitOutcome::Rejected(format!(
                "{}{}",
                ERROR_PREFIX, message
            ))),
        }
    }
}
