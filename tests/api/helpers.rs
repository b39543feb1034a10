use {
    asistencia::{
        domain::{Alumno, Usuario},
        repository::{AlumnoRepository, UsuarioRepository},
        telemetry::{get_subscriber, init_subscriber},
    },
    async_trait::async_trait,
    fake::{faker::name::en::FirstName, Fake},
    once_cell::sync::Lazy,
    secrecy::Secret,
    std::{
        net::TcpListener,
        sync::{Arc, Mutex},
    },
};

// Subscriber should be created once (singleton pattern)
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

/// In-memory stand-in for the Postgres repository, so the API tests run
/// against a real HTTP server without a database.
#[derive(Default)]
pub struct InMemoryRepo {
    pub alumnos: Mutex<Vec<Alumno>>,
    pub usuarios: Mutex<Vec<Usuario>>,
}

#[async_trait]
impl AlumnoRepository for InMemoryRepo {
    async fn find_by_matricula(&self, matricula: &str) -> Result<Option<Alumno>, anyhow::Error> {
        Ok(self
            .alumnos
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.matricula == matricula)
            .cloned())
    }

    async fn list_by_grupo(&self, num_grupo: i32) -> Result<Vec<Alumno>, anyhow::Error> {
        Ok(self
            .alumnos
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.num_grupo == num_grupo)
            .cloned()
            .collect())
    }

    async fn insert(&self, alumno: &Alumno) -> Result<(), anyhow::Error> {
        self.alumnos.lock().unwrap().push(alumno.clone());
        Ok(())
    }

    async fn delete(&self, matricula: &str) -> Result<(), anyhow::Error> {
        self.alumnos
            .lock()
            .unwrap()
            .retain(|a| a.matricula != matricula);
        Ok(())
    }
}

#[async_trait]
impl UsuarioRepository for InMemoryRepo {
    async fn find_by_clave(
        &self,
        clave_p: i32,
        id_rol: i32,
    ) -> Result<Option<Usuario>, anyhow::Error> {
        Ok(self
            .usuarios
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.clave_p == clave_p && u.id_rol == id_rol)
            .cloned())
    }
}

pub struct TestApp {
    pub address: String,
    pub repo: Arc<InMemoryRepo>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Return given route prepended with test app's address
    fn app_route(&self, route: &str) -> String {
        format!("{}/{}", self.address, route)
    }

    pub async fn post_login(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(self.app_route("login/"))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_alumnos(&self) -> reqwest::Response {
        self.api_client
            .get(self.app_route("api/alumnos"))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_alumno(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(self.app_route("api/alumnos"))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn delete_alumno(&self, matricula: &str) -> reqwest::Response {
        self.api_client
            .delete(self.app_route(&format!("api/alumnos/{}", matricula)))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Seed an alumno of the pilot group directly into the repository.
    pub fn seed_alumno(&self, matricula: &str, password: &str) -> Alumno {
        let alumno = Alumno {
            matricula: matricula.to_owned(),
            clave_t: Some(format!("T-{}", matricula)),
            nombre: FirstName().fake(),
            ape1: "García".to_owned(),
            ape2: None,
            num_grupo: 3401,
            password: Secret::new(password.to_owned()),
            correo: None,
        };
        self.repo.alumnos.lock().unwrap().push(alumno.clone());
        alumno
    }

    /// Seed a profesor (id_rol 2) or administrador (id_rol 3).
    pub fn seed_usuario(&self, clave_p: i32, id_rol: i32, password: &str) -> Usuario {
        let usuario = Usuario {
            clave_p,
            clave_t: None,
            nombre: FirstName().fake(),
            ape1: Some("Torres".to_owned()),
            ape2: None,
            id_rol,
            password: Secret::new(password.to_owned()),
        };
        self.repo.usuarios.lock().unwrap().push(usuario.clone());
        usuario
    }
}

/// Helper function that sets up a server and binds it to an address that is
/// returned. This way, individual tests know where to send their requests.
pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let repo = Arc::new(InMemoryRepo::default());
    let server = asistencia::startup::run(listener, repo.clone(), repo.clone())
        .expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address,
        repo,
        api_client: reqwest::Client::new(),
    }
}
