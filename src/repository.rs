use {
    crate::domain::{Alumno, Usuario},
    async_trait::async_trait,
};

/// Read/write access to the student roster. Route handlers only see this
/// trait, so the API tests can swap the Postgres backend for an in-memory
/// double.
#[async_trait]
pub trait AlumnoRepository: Send + Sync {
    async fn find_by_matricula(&self, matricula: &str) -> Result<Option<Alumno>, anyhow::Error>;

    async fn list_by_grupo(&self, num_grupo: i32) -> Result<Vec<Alumno>, anyhow::Error>;

    async fn insert(&self, alumno: &Alumno) -> Result<(), anyhow::Error>;

    async fn delete(&self, matricula: &str) -> Result<(), anyhow::Error>;
}

/// Lookup of staff credentials. A usuario only matches when both the
/// numeric clave and the requested rol agree.
#[async_trait]
pub trait UsuarioRepository: Send + Sync {
    async fn find_by_clave(&self, clave_p: i32, id_rol: i32)
        -> Result<Option<Usuario>, anyhow::Error>;
}
