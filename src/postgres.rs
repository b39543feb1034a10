use {
    crate::{
        domain::{Alumno, Usuario},
        repository::{AlumnoRepository, UsuarioRepository},
    },
    async_trait::async_trait,
    secrecy::{ExposeSecret, Secret},
    sqlx::PgPool,
};

pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Rows carry the password as a plain column and are converted to the domain
// types, which wrap it in `Secret`, at the boundary.
#[derive(sqlx::FromRow)]
struct AlumnoRow {
    matricula: String,
    clave_t: Option<String>,
    nombre: String,
    ape1: String,
    ape2: Option<String>,
    num_grupo: i32,
    password: String,
    correo: Option<String>,
}

impl From<AlumnoRow> for Alumno {
    fn from(row: AlumnoRow) -> Self {
        Self {
            matricula: row.matricula,
            clave_t: row.clave_t,
            nombre: row.nombre,
            ape1: row.ape1,
            ape2: row.ape2,
            num_grupo: row.num_grupo,
            password: Secret::new(row.password),
            correo: row.correo,
        }
    }
}

#[derive(sqlx::FromRow)]
struct UsuarioRow {
    clave_p: i32,
    clave_t: Option<String>,
    nombre: String,
    ape1: Option<String>,
    ape2: Option<String>,
    id_rol: i32,
    password: String,
}

impl From<UsuarioRow> for Usuario {
    fn from(row: UsuarioRow) -> Self {
        Self {
            clave_p: row.clave_p,
            clave_t: row.clave_t,
            nombre: row.nombre,
            ape1: row.ape1,
            ape2: row.ape2,
            id_rol: row.id_rol,
            password: Secret::new(row.password),
        }
    }
}

#[async_trait]
impl AlumnoRepository for PgRepository {
    #[tracing::instrument(name = "Fetching an alumno by matricula", skip(self))]
    async fn find_by_matricula(&self, matricula: &str) -> Result<Option<Alumno>, anyhow::Error> {
        let row = sqlx::query_as::<_, AlumnoRow>(
            r#"
            SELECT matricula, clave_t, nombre, ape1, ape2, num_grupo, password, correo
            FROM alumno
            WHERE matricula = $1
            "#,
        )
        .bind(matricula)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            e
        })?;

        Ok(row.map(Into::into))
    }

    #[tracing::instrument(name = "Listing the alumnos of a grupo", skip(self))]
    async fn list_by_grupo(&self, num_grupo: i32) -> Result<Vec<Alumno>, anyhow::Error> {
        let rows = sqlx::query_as::<_, AlumnoRow>(
            r#"
            SELECT matricula, clave_t, nombre, ape1, ape2, num_grupo, password, correo
            FROM alumno
            WHERE num_grupo = $1
            ORDER BY matricula
            "#,
        )
        .bind(num_grupo)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            e
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(name = "Saving a new alumno", skip(self, alumno))]
    async fn insert(&self, alumno: &Alumno) -> Result<(), anyhow::Error> {
        sqlx::query(
            r#"
            INSERT INTO alumno (matricula, clave_t, nombre, ape1, ape2, num_grupo, password, correo)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&alumno.matricula)
        .bind(&alumno.clave_t)
        .bind(&alumno.nombre)
        .bind(&alumno.ape1)
        .bind(&alumno.ape2)
        .bind(alumno.num_grupo)
        .bind(alumno.password.expose_secret())
        .bind(&alumno.correo)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            e
        })?;

        Ok(())
    }

    #[tracing::instrument(name = "Deleting an alumno", skip(self))]
    async fn delete(&self, matricula: &str) -> Result<(), anyhow::Error> {
        sqlx::query("DELETE FROM alumno WHERE matricula = $1")
            .bind(matricula)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to execute query: {:?}", e);
                e
            })?;

        Ok(())
    }
}

#[async_trait]
impl UsuarioRepository for PgRepository {
    #[tracing::instrument(name = "Fetching a usuario by clave and rol", skip(self))]
    async fn find_by_clave(
        &self,
        clave_p: i32,
        id_rol: i32,
    ) -> Result<Option<Usuario>, anyhow::Error> {
        let row = sqlx::query_as::<_, UsuarioRow>(
            r#"
            SELECT clave_p, clave_t, nombre, ape1, ape2, id_rol, password
            FROM usuario
            WHERE clave_p = $1 AND id_rol = $2
            "#,
        )
        .bind(clave_p)
        .bind(id_rol)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            e
        })?;

        Ok(row.map(Into::into))
    }
}
