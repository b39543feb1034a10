use {
    crate::{
        configuration::{DatabaseSettings, Settings},
        postgres::PgRepository,
        repository::{AlumnoRepository, UsuarioRepository},
        routes::{create_alumno, delete_alumno, health_check, home, list_alumnos, login},
    },
    actix_web::{dev::Server, web, App, HttpServer},
    sqlx::{postgres::PgPoolOptions, PgPool},
    std::{net::TcpListener, sync::Arc},
    tracing_actix_web::TracingLogger,
};

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(app_config: Settings) -> Result<Self, anyhow::Error> {
        let db_pool = get_db_pool(&app_config.database);
        // The original service creates its schema on boot; migrations play
        // that part here.
        sqlx::migrate!("./migrations").run(&db_pool).await?;
        let repository = Arc::new(PgRepository::new(db_pool));

        let address = format!(
            "{}:{}",
            app_config.application.host, app_config.application.port
        );
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr().unwrap().port();
        let server = run(listener, repository.clone(), repository)?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    alumnos: Arc<dyn AlumnoRepository>,
    usuarios: Arc<dyn UsuarioRepository>,
) -> Result<Server, std::io::Error> {
    // `web::Data` is basically `Arc`, which will safely share the
    // repositories across workers.
    let alumnos = web::Data::from(alumnos);
    let usuarios = web::Data::from(usuarios);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/", web::get().to(home))
            .route("/health_check", web::get().to(health_check))
            .route("/login/", web::post().to(login))
            .route("/api/alumnos", web::get().to(list_alumnos))
            .route("/api/alumnos", web::post().to(create_alumno))
            .route("/api/alumnos/{matricula}", web::delete().to(delete_alumno))
            .app_data(alumnos.clone())
            .app_data(usuarios.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}

pub fn get_db_pool(db_config: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new()
        .connect_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(db_config.with_db())
}
