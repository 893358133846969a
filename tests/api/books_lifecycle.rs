use crate::helpers::spawn_app;
use serde_json::{json, Value};

/// Full create / list / update / delete scenario through the HTTP surface
#[tokio::test]
async fn a_book_goes_through_its_whole_lifecycle() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    // Creates
    let response = client
        .post(&format!("{}/books", &app.address))
        .json(&json!({ "isbn": "978-1", "title": "X" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(201, response.status().as_u16());

    // Lists
    let response = client
        .get(&format!("{}/books", &app.address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(200, response.status().as_u16());
    let books: Value = response.json().await.expect("Failed to parse response body");
    assert_eq!(books, json!([{ "isbn": "978-1", "title": "X" }]));

    // Updates
    let response = client
        .put(&format!("{}/books/978-1", &app.address))
        .json(&json!({ "title": "Y" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(200, response.status().as_u16());

    let response = client
        .get(&format!("{}/books", &app.address))
        .send()
        .await
        .expect("Failed to execute request");
    let books: Value = response.json().await.expect("Failed to parse response body");
    assert_eq!(books, json!([{ "isbn": "978-1", "title": "Y" }]));

    // Deletes
    let response = client
        .delete(&format!("{}/books/978-1", &app.address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(200, response.status().as_u16());

    // A second delete finds nothing
    let response = client
        .delete(&format!("{}/books/978-1", &app.address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(404, response.status().as_u16());
}
