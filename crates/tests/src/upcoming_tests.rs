use crate::fixtures::test_app::TestApp;
use serde_json::Value;

async fn create_upcoming(app: &TestApp, token: &str, title: &str) -> String {
    let resp = app
        .auth_post("/upcoming-meals", token)
        .json(&serde_json::json!({
            "title": title,
            "description": "Coming soon",
            "category": "Dinner",
            "price": 60,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 201);
    let json: Value = resp.json().await.unwrap();
    json["insertedId"].as_str().unwrap().to_string()
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn upcoming_meals_are_ordered_by_likes() {
    let app = TestApp::spawn().await;
    let admin = app.register_admin("chef@hostel.test", "Chef").await;
    let student = app.register_user("s@hostel.test", "S").await;

    create_upcoming(&app, &admin.token, "Biryani").await;
    let haleem = create_upcoming(&app, &admin.token, "Haleem").await;

    let resp = app
        .auth_patch(&format!("/upcoming-likes/{haleem}"), &student.token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    let resp = app.client.get(app.url("/upcoming-meals")).send().await.unwrap();
    let json: Value = resp.json().await.unwrap();
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["title"], "Haleem");
    assert_eq!(items[0]["likes"], 1);
    assert_eq!(items[0]["liked_by"][0], "s@hostel.test");
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn publishing_moves_meal_to_menu() {
    let app = TestApp::spawn().await;
    let admin = app.register_admin("chef@hostel.test", "Chef").await;
    let id = create_upcoming(&app, &admin.token, "Biryani").await;

    let resp = app
        .auth_patch(&format!("/upcoming-meals/publish/{id}"), &admin.token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let json: Value = resp.json().await.unwrap();
    let meal_id = json["insertedId"].as_str().unwrap().to_string();
    assert_ne!(meal_id, id);

    let resp = app.client.get(app.url(&format!("/meals/{meal_id}"))).send().await.unwrap();
    let meal: Value = resp.json().await.unwrap();
    assert_eq!(meal["title"], "Biryani");
    assert_eq!(meal["price"], 60.0);

    let resp = app.client.get(app.url("/upcoming-meals")).send().await.unwrap();
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["total"], 0);

    // Publishing twice finds nothing left to publish.
    let resp = app
        .auth_patch(&format!("/upcoming-meals/publish/{id}"), &admin.token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);

    let resp = app.client.get(app.url("/meals")).send().await.unwrap();
    let meals: Vec<Value> = resp.json().await.unwrap();
    assert_eq!(meals.len(), 1);
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn student_cannot_publish() {
    let app = TestApp::spawn().await;
    let admin = app.register_admin("chef@hostel.test", "Chef").await;
    let student = app.register_user("s@hostel.test", "S").await;
    let id = create_upcoming(&app, &admin.token, "Biryani").await;

    let resp = app
        .auth_patch(&format!("/upcoming-meals/publish/{id}"), &student.token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 403);

    let resp = app.client.get(app.url("/upcoming-meals")).send().await.unwrap();
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["total"], 1);
    assert_eq!(json["items"][0]["id"], id.as_str());

    let resp = app.client.get(app.url("/meals")).send().await.unwrap();
    let meals: Vec<Value> = resp.json().await.unwrap();
    assert!(meals.is_empty());
}
