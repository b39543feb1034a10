use actix_web::HttpResponse;

/// Banner the backend answers with at its root.
pub async fn home() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Sistema de Asistencia RFID"
    }))
}
