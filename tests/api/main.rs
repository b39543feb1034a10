mod alumnos;
mod health_check;
mod helpers;
