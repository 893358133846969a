use crate::helpers::spawn_app;
use mongodb::bson::doc;
use serde_json::Value;

#[tokio::test]
async fn an_empty_collection_yields_an_empty_array() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .get(&format!("{}/books", &app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(200, response.status().as_u16());

    let body: Value = response.json().await.expect("Failed to parse response body");
    assert_eq!(body, Value::Array(vec![]));
}

#[tokio::test]
async fn stored_books_are_listed_without_the_internal_id() {
    // Arranges: inserts fixtures directly in the collection
    let app = spawn_app().await;

    let books = vec![
        doc! { "isbn": "978-0201633610", "title": "Design Patterns", "year": 1994 },
        doc! { "isbn": "978-0134494166", "title": "Clean Architecture", "year": 2017 },
    ];
    app.books()
        .insert_many(books.clone(), None)
        .await
        .expect("Failed to insert fixtures");

    // Acts
    let response = reqwest::Client::new()
        .get(&format!("{}/books", &app.address))
        .send()
        .await
        .expect("Failed to execute request");

    // Asserts: every book-domain field comes back verbatim, `_id` is stripped
    assert_eq!(200, response.status().as_u16());

    let body: Value = response.json().await.expect("Failed to parse response body");
    let expected =
        serde_json::to_value(&books).expect("Failed to serialize the fixtures as JSON");
    assert_eq!(body, expected);
}
