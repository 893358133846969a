use crate::helpers::spawn_app;
use mongodb::bson::doc;
use serde_json::{json, Value};

#[tokio::test]
async fn a_partial_update_preserves_absent_fields() {
    // Arranges
    let app = spawn_app().await;
    app.books()
        .insert_one(doc! { "isbn": "1", "title": "A", "year": 2000 }, None)
        .await
        .expect("Failed to insert fixture");

    // Acts
    let response = reqwest::Client::new()
        .put(&format!("{}/books/1", &app.address))
        .json(&json!({ "title": "B" }))
        .send()
        .await
        .expect("Failed to execute request");

    // Asserts
    assert_eq!(200, response.status().as_u16());

    let body: Value = response.json().await.expect("Failed to parse response body");
    assert_eq!(body["message"], "Book updated successfully!");

    let stored_books = app.stored_books().await;
    assert_eq!(stored_books.len(), 1);
    assert_eq!(stored_books[0].get_str("isbn").unwrap(), "1");
    assert_eq!(stored_books[0].get_str("title").unwrap(), "B");
    // `year` was absent from the payload: it must be left untouched
    assert_eq!(stored_books[0].get_i32("year").unwrap(), 2000);
}

#[tokio::test]
async fn an_unknown_isbn_returns_404() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .put(&format!("{}/books/does-not-exist", &app.address))
        .json(&json!({ "title": "B" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(404, response.status().as_u16());

    let body: Value = response.json().await.expect("Failed to parse response body");
    assert_eq!(body["error"], "Book not found");
}

#[tokio::test]
async fn an_empty_payload_is_rejected() {
    let app = spawn_app().await;
    app.books()
        .insert_one(doc! { "isbn": "1", "title": "A" }, None)
        .await
        .expect("Failed to insert fixture");

    let response = reqwest::Client::new()
        .put(&format!("{}/books/1", &app.address))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(400, response.status().as_u16());

    // The stored book is untouched
    let stored_books = app.stored_books().await;
    assert_eq!(stored_books[0].get_str("title").unwrap(), "A");
}

#[tokio::test]
async fn a_missing_body_is_rejected() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .put(&format!("{}/books/1", &app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(400, response.status().as_u16());
}
