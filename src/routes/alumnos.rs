use {
    crate::{
        domain::Alumno,
        repository::AlumnoRepository,
        utils::{error_chain_fmt, ErrorDetail},
    },
    actix_web::{http::StatusCode, web, HttpResponse, ResponseError},
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

// Every alumno managed through this API belongs to the one pilot group.
const NUM_GRUPO: i32 = 3401;

/// Wire shape of an alumno on the admin API, both directions. The admin
/// panel edits credentials, so the password travels in the clear here,
/// matching the rest of the (intranet-only) surface.
#[derive(Deserialize, Serialize)]
pub struct AlumnoData {
    matricula: String,
    nombre: String,
    ape1: String,
    ape2: Option<String>,
    password: String,
    #[serde(rename = "claveT")]
    clave_t: Option<String>,
}

impl From<Alumno> for AlumnoData {
    fn from(alumno: Alumno) -> Self {
        Self {
            matricula: alumno.matricula,
            nombre: alumno.nombre,
            ape1: alumno.ape1,
            ape2: alumno.ape2,
            password: alumno.password.expose_secret().clone(),
            clave_t: alumno.clave_t,
        }
    }
}

#[derive(thiserror::Error)]
pub enum AlumnoError {
    #[error("Matrícula ya registrada")]
    DuplicateMatricula,
    #[error("Alumno con matrícula {0} no encontrado")]
    UnknownMatricula(String),
    #[error("Error interno del servidor")]
    Unexpected(#[from] anyhow::Error),
}

impl std::fmt::Debug for AlumnoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for AlumnoError {
    fn status_code(&self) -> StatusCode {
        match self {
            AlumnoError::DuplicateMatricula => StatusCode::BAD_REQUEST,
            AlumnoError::UnknownMatricula(_) => StatusCode::NOT_FOUND,
            AlumnoError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorDetail {
            detail: self.to_string(),
        })
    }
}

#[tracing::instrument(name = "Listing the alumnos of the grupo", skip(alumnos))]
pub async fn list_alumnos(
    alumnos: web::Data<dyn AlumnoRepository>,
) -> Result<HttpResponse, AlumnoError> {
    let listado = alumnos.list_by_grupo(NUM_GRUPO).await?;
    let listado: Vec<AlumnoData> = listado.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(listado))
}

#[tracing::instrument(
    name = "Registering a new alumno",
    skip(data, alumnos),
    fields(matricula = %data.matricula)
)]
pub async fn create_alumno(
    data: web::Json<AlumnoData>,
    alumnos: web::Data<dyn AlumnoRepository>,
) -> Result<HttpResponse, AlumnoError> {
    if alumnos
        .find_by_matricula(&data.matricula)
        .await?
        .is_some()
    {
        return Err(AlumnoError::DuplicateMatricula);
    }

    let data = data.into_inner();
    let alumno = Alumno {
        matricula: data.matricula.clone(),
        clave_t: data.clave_t.clone(),
        nombre: data.nombre.clone(),
        ape1: data.ape1.clone(),
        ape2: data.ape2.clone(),
        num_grupo: NUM_GRUPO,
        password: Secret::new(data.password.clone()),
        correo: None,
    };
    alumnos.insert(&alumno).await?;

    Ok(HttpResponse::Ok().json(data))
}

#[tracing::instrument(name = "Removing an alumno", skip(alumnos))]
pub async fn delete_alumno(
    matricula: web::Path<String>,
    alumnos: web::Data<dyn AlumnoRepository>,
) -> Result<HttpResponse, AlumnoError> {
    let matricula = matricula.into_inner();
    if alumnos.find_by_matricula(&matricula).await?.is_none() {
        return Err(AlumnoError::UnknownMatricula(matricula));
    }

    alumnos.delete(&matricula).await?;
    Ok(HttpResponse::NoContent().finish())
}
