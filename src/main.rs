use asistencia::{
    configuration::get_config,
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let subscriber = get_subscriber("asistencia".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let app_config = get_config().expect("Failed to read configuration");
    let application = Application::build(app_config).await?;
    application.run_until_stopped().await?;

    Ok(())
}
