/// JSON body every failing endpoint responds with, mirroring the
/// `{"detail": ...}` shape the login client expects.
#[derive(serde::Serialize)]
pub struct ErrorDetail {
    pub detail: String,
}

/// Walk the source chain of an error when formatting it for `Debug`, so
/// the logs keep the root cause that `Display` hides from users.
pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
