//! Kiosk login terminal.
//!
//! Collects the same three fields the web form asks for, submits them to
//! the backend and keeps the session record on disk, then tells the user
//! which page to continue on.

use {
    anyhow::Context,
    asistencia::{
        configuration::get_config,
        login_client::LoginClient,
        login_handler::{LoginForm, LoginHandler, SubmitOutcome},
        session::FileSessionStore,
        telemetry::{get_subscriber, init_subscriber},
    },
    clap::Parser,
    dialoguer::{Input, Password},
    secrecy::Secret,
};

#[derive(Parser)]
#[command(name = "terminal", about = "Terminal de login del sistema de asistencia")]
struct Cli {
    /// URL base del backend; overrides the configured one.
    #[arg(long)]
    base_url: Option<String>,

    /// Rol con el que iniciar sesión: 1 alumno, 2 profesor, 3 admin.
    #[arg(long, default_value = "1")]
    rol: String,

    /// Matrícula (o clave de usuario); prompted for when omitted.
    #[arg(long)]
    matricula: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Diagnostics go to stderr so the prompt stays usable.
    let subscriber = get_subscriber("terminal".into(), "warn".into(), std::io::stderr);
    init_subscriber(subscriber);

    let cli = Cli::parse();
    let app_config = get_config().context("Failed to read configuration")?;

    let base_url = cli
        .base_url
        .unwrap_or(app_config.login_client.base_url);
    let matricula = match cli.matricula {
        Some(matricula) => matricula,
        None => Input::new().with_prompt("Matrícula").interact_text()?,
    };
    let password: String = Password::new().with_prompt("Contraseña").interact()?;

    let handler = LoginHandler::new(
        LoginClient::new(base_url),
        FileSessionStore::new(app_config.login_client.session_dir),
    );
    let form = LoginForm {
        rol: cli.rol,
        matricula,
        password: Secret::new(password),
    };

    match handler.submit(form).await {
        SubmitOutcome::Redirect(destino) => println!("Login exitoso, continúe en {}", destino),
        SubmitOutcome::LoggedIn => println!("Login exitoso."),
        SubmitOutcome::Rejected(texto) => println!("{}", texto),
        SubmitOutcome::Superseded => {}
    }

    Ok(())
}
