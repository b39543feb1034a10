use {
    crate::{
        domain::{Rol, Usuario},
        repository::{AlumnoRepository, UsuarioRepository},
        utils::{error_chain_fmt, ErrorDetail},
    },
    actix_web::{http::StatusCode, web, HttpResponse, ResponseError},
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

const LOGIN_EXITOSO: &str = "Login exitoso";

#[derive(Deserialize)]
pub struct LoginData {
    usuario: String,
    password: Secret<String>,
    rol: i64,
}

#[derive(thiserror::Error)]
pub enum LoginError {
    #[error("Alumno no encontrado")]
    UnknownAlumno,
    #[error("Usuario no encontrado")]
    UnknownUsuario,
    #[error("Contraseña incorrecta")]
    WrongPassword,
    #[error("Rol inválido")]
    InvalidRol,
    #[error("Error interno del servidor")]
    Unexpected(#[from] anyhow::Error),
}

impl std::fmt::Debug for LoginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for LoginError {
    fn status_code(&self) -> StatusCode {
        match self {
            LoginError::UnknownAlumno | LoginError::UnknownUsuario => StatusCode::NOT_FOUND,
            LoginError::WrongPassword => StatusCode::UNAUTHORIZED,
            LoginError::InvalidRol => StatusCode::BAD_REQUEST,
            LoginError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorDetail {
            detail: self.to_string(),
        })
    }
}

#[derive(Serialize)]
struct AlumnoLoginResponse {
    message: &'static str,
    matricula: String,
    nombre: String,
    ape1: String,
    ape2: Option<String>,
    rol: i64,
}

#[derive(Serialize)]
struct UsuarioLoginResponse {
    message: &'static str,
    #[serde(rename = "claveP")]
    clave_p: String,
    nombre: String,
    rol: i64,
}

/// Validate one credential payload and answer with the profile fields the
/// session record is built from. Alumnos are looked up by matricula,
/// profesores and administradores by their numeric clave together with
/// the requested rol.
#[tracing::instrument(
    name = "Processing a login attempt",
    skip(data, alumnos, usuarios),
    fields(usuario = %data.usuario, rol = %data.rol)
)]
pub async fn login(
    data: web::Json<LoginData>,
    alumnos: web::Data<dyn AlumnoRepository>,
    usuarios: web::Data<dyn UsuarioRepository>,
) -> Result<HttpResponse, LoginError> {
    let rol = Rol::try_from(data.rol).map_err(|_| LoginError::InvalidRol)?;

    match rol {
        Rol::Alumno => {
            let alumno = alumnos
                .find_by_matricula(&data.usuario)
                .await?
                .ok_or(LoginError::UnknownAlumno)?;
            if alumno.password.expose_secret() != data.password.expose_secret() {
                return Err(LoginError::WrongPassword);
            }

            Ok(HttpResponse::Ok().json(AlumnoLoginResponse {
                message: LOGIN_EXITOSO,
                matricula: alumno.matricula,
                nombre: alumno.nombre,
                ape1: alumno.ape1,
                ape2: alumno.ape2,
                rol: data.rol,
            }))
        }
        Rol::Profesor | Rol::Admin => {
            let usuario = find_usuario(&data, rol, usuarios.get_ref()).await?;
            if usuario.password.expose_secret() != data.password.expose_secret() {
                return Err(LoginError::WrongPassword);
            }

            Ok(HttpResponse::Ok().json(UsuarioLoginResponse {
                message: LOGIN_EXITOSO,
                clave_p: data.usuario.clone(),
                nombre: usuario.nombre,
                rol: data.rol,
            }))
        }
    }
}

/// A clave that does not even parse as a number can never match a stored
/// usuario, so it folds into the same "not found" answer.
async fn find_usuario(
    data: &LoginData,
    rol: Rol,
    usuarios: &dyn UsuarioRepository,
) -> Result<Usuario, LoginError> {
    let clave_p = data
        .usuario
        .parse::<i32>()
        .map_err(|_| LoginError::UnknownUsuario)?;
    usuarios
        .find_by_clave(clave_p, rol.as_i32())
        .await?
        .ok_or(LoginError::UnknownUsuario)
}
