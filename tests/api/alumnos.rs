use {
    crate::helpers::spawn_app,
    serde_json::{json, Value},
};

#[tokio::test]
async fn the_listing_starts_empty() {
    // Arrange
    let test_app = spawn_app().await;

    // Act
    let response = test_app.get_alumnos().await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn a_created_alumno_shows_up_in_the_listing() {
    // Arrange
    let test_app = spawn_app().await;
    let nuevo = json!({
        "matricula": "A01234567",
        "nombre": "Ana",
        "ape1": "García",
        "ape2": null,
        "password": "secreta",
        "claveT": "T-0001"
    });

    // Act
    let created = test_app.post_alumno(&nuevo).await;

    // Assert
    assert_eq!(200, created.status().as_u16());
    assert_eq!(created.json::<Value>().await.unwrap(), nuevo);

    let listado: Value = test_app.get_alumnos().await.json().await.unwrap();
    assert_eq!(listado, json!([nuevo]));
}

#[tokio::test]
async fn a_duplicate_matricula_is_rejected() {
    // Arrange
    let test_app = spawn_app().await;
    test_app.seed_alumno("A01234567", "secreta");

    // Act
    let response = test_app
        .post_alumno(&json!({
            "matricula": "A01234567",
            "nombre": "Ana",
            "ape1": "García",
            "ape2": null,
            "password": "secreta",
            "claveT": "T-0001"
        }))
        .await;

    // Assert
    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "Matrícula ya registrada");
}

#[tokio::test]
async fn only_the_pilot_group_is_listed() {
    // Arrange
    let test_app = spawn_app().await;
    test_app.seed_alumno("A01234567", "secreta");
    // An alumno of another group, seeded behind the API's back.
    test_app.seed_alumno("B99999999", "secreta");
    test_app
        .repo
        .alumnos
        .lock()
        .unwrap()
        .last_mut()
        .unwrap()
        .num_grupo = 1102;

    // Act
    let listado: Value = test_app.get_alumnos().await.json().await.unwrap();

    // Assert
    let listado = listado.as_array().unwrap();
    assert_eq!(listado.len(), 1);
    assert_eq!(listado[0]["matricula"], "A01234567");
}

#[tokio::test]
async fn deleting_an_alumno_removes_it() {
    // Arrange
    let test_app = spawn_app().await;
    test_app.seed_alumno("A01234567", "secreta");

    // Act
    let response = test_app.delete_alumno("A01234567").await;

    // Assert
    assert_eq!(204, response.status().as_u16());
    assert_eq!(Some(0), response.content_length());
    let listado: Value = test_app.get_alumnos().await.json().await.unwrap();
    assert_eq!(listado, json!([]));
}

#[tokio::test]
async fn deleting_an_unknown_alumno_is_a_404_naming_the_matricula() {
    // Arrange
    let test_app = spawn_app().await;

    // Act
    let response = test_app.delete_alumno("A00000000").await;

    // Assert
    assert_eq!(404, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "Alumno con matrícula A00000000 no encontrado");
}
