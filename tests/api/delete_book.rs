use crate::helpers::spawn_app;
use mongodb::bson::doc;
use serde_json::Value;

#[tokio::test]
async fn a_stored_book_is_deleted() {
    // Arranges
    let app = spawn_app().await;
    app.books()
        .insert_one(doc! { "isbn": "978-1", "title": "X" }, None)
        .await
        .expect("Failed to insert fixture");

    // Acts
    let response = reqwest::Client::new()
        .delete(&format!("{}/books/978-1", &app.address))
        .send()
        .await
        .expect("Failed to execute request");

    // Asserts
    assert_eq!(200, response.status().as_u16());

    let body: Value = response.json().await.expect("Failed to parse response body");
    assert_eq!(body["message"], "Book deleted successfully!");

    assert!(app.stored_books().await.is_empty());
}

#[tokio::test]
async fn an_unknown_isbn_returns_404() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .delete(&format!("{}/books/does-not-exist", &app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(404, response.status().as_u16());

    let body: Value = response.json().await.expect("Failed to parse response body");
    assert_eq!(body["error"], "Book not found");
}

#[tokio::test]
async fn deleting_the_same_book_twice_returns_404() {
    let app = spawn_app().await;
    app.books()
        .insert_one(doc! { "isbn": "978-1", "title": "X" }, None)
        .await
        .expect("Failed to insert fixture");

    let client = reqwest::Client::new();
    let url = format!("{}/books/978-1", &app.address);

    let first = client
        .delete(&url)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(200, first.status().as_u16());

    let second = client
        .delete(&url)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(404, second.status().as_u16());
}
