mod alumnos;
mod health_check;
mod home;
mod login;

pub use alumnos::*;
pub use health_check::*;
pub use home::*;
pub use login::*;
