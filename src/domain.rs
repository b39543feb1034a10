use secrecy::Secret;

/// The three roles the login endpoint recognizes. The wire format carries
/// them as integers: 1 alumno, 2 profesor, 3 administrador.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rol {
    Alumno,
    Profesor,
    Admin,
}

impl Rol {
    pub fn as_i32(self) -> i32 {
        match self {
            Rol::Alumno => 1,
            Rol::Profesor => 2,
            Rol::Admin => 3,
        }
    }
}

impl TryFrom<i64> for Rol {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Rol::Alumno),
            2 => Ok(Rol::Profesor),
            3 => Ok(Rol::Admin),
            other => Err(format!("{} is not a known rol.", other)),
        }
    }
}

/// A student record. `matricula` is the primary key, `clave_t` the RFID
/// card assigned to the student.
#[derive(Debug, Clone)]
pub struct Alumno {
    pub matricula: String,
    pub clave_t: Option<String>,
    pub nombre: String,
    pub ape1: String,
    pub ape2: Option<String>,
    pub num_grupo: i32,
    pub password: Secret<String>,
    pub correo: Option<String>,
}

/// A staff record, covering both profesores and administradores; `id_rol`
/// tells them apart.
#[derive(Debug, Clone)]
pub struct Usuario {
    pub clave_p: i32,
    pub clave_t: Option<String>,
    pub nombre: String,
    pub ape1: Option<String>,
    pub ape2: Option<String>,
    pub id_rol: i32,
    pub password: Secret<String>,
}
