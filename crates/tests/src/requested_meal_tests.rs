use crate::fixtures::test_app::TestApp;
use serde_json::Value;

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn student_requests_and_admin_serves() {
    let app = TestApp::spawn().await;
    let admin = app.register_admin("chef@hostel.test", "Chef").await;
    let student = app.register_user("s@hostel.test", "Sara").await;
    let meal = app.create_meal(&admin, "Rice", "Lunch", 50.0).await;

    let check = format!("/requestedMeals/check?mealId={}", meal.id);
    let resp = app.auth_get(&check, &student.token).send().await.unwrap();
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["requested"], false);

    let resp = app
        .auth_post("/requestedMeals", &student.token)
        .json(&serde_json::json!({ "mealId": meal.id }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 201);
    let json: Value = resp.json().await.unwrap();
    let request_id = json["insertedId"].as_str().unwrap().to_string();

    let resp = app.auth_get(&check, &student.token).send().await.unwrap();
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["requested"], true);

    let resp = app
        .auth_get("/requestedMeals/s@hostel.test", &student.token)
        .send()
        .await
        .unwrap();
    let mine: Vec<Value> = resp.json().await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["meal"]["title"], "Rice");
    assert_eq!(mine[0]["status"], "Requested");

    let resp = app
        .auth_patch(&format!("/requestedMeals/{request_id}"), &student.token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 403);

    let resp = app
        .auth_patch(&format!("/requestedMeals/{request_id}"), &admin.token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    let resp = app
        .auth_get("/requestedMeals?search=sara", &admin.token)
        .send()
        .await
        .unwrap();
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["total"], 1);
    assert_eq!(json["items"][0]["status"], "Delivered");
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn requesting_missing_meal_is_not_found() {
    let app = TestApp::spawn().await;
    let student = app.register_user("s@hostel.test", "Sara").await;

    let resp = app
        .auth_post("/requestedMeals", &student.token)
        .json(&serde_json::json!({ "mealId": "507f1f77bcf86cd799439011" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn requests_are_private_to_requester() {
    let app = TestApp::spawn().await;
    let admin = app.register_admin("chef@hostel.test", "Chef").await;
    let owner = app.register_user("s@hostel.test", "Sara").await;
    let other = app.register_user("o@hostel.test", "Omar").await;
    let meal = app.create_meal(&admin, "Rice", "Lunch", 50.0).await;

    let resp = app
        .auth_post("/requestedMeals", &owner.token)
        .json(&serde_json::json!({ "mealId": meal.id }))
        .send()
        .await
        .unwrap();
    let json: Value = resp.json().await.unwrap();
    let request_id = json["insertedId"].as_str().unwrap().to_string();

    let resp = app
        .auth_get("/requestedMeals/s@hostel.test", &other.token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 403);

    let resp = app
        .auth_delete(&format!("/requestedMeals/{request_id}"), &other.token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 403);

    let resp = app
        .auth_delete(&format!("/requestedMeals/{request_id}"), &owner.token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["deletedCount"], 1);
}
