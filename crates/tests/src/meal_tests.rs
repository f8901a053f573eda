use crate::fixtures::test_app::TestApp;
use serde_json::Value;

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn admin_creates_meal_and_anyone_reads_it() {
    let app = TestApp::spawn().await;
    let admin = app.register_admin("chef@hostel.test", "Chef").await;

    let resp = app
        .auth_post("/meals", &admin.token)
        .json(&serde_json::json!({
            "title": "Rice",
            "description": "Steamed basmati",
            "category": "Lunch",
            "ingredients": ["rice", "salt"],
            "price": 50,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 201);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["acknowledged"], true);
    let id = json["insertedId"].as_str().unwrap().to_string();

    let resp = app.client.get(app.url(&format!("/meals/{id}"))).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let meal: Value = resp.json().await.unwrap();
    assert_eq!(meal["title"], "Rice");
    assert_eq!(meal["price"], 50.0);
    assert_eq!(meal["likes"], 0);
    assert_eq!(meal["review_count"], 0);
    assert_eq!(meal["distributor"]["email"], "chef@hostel.test");
    assert_eq!(meal["distributor"]["name"], "Chef");

    let resp = app.client.get(app.url("/meals")).send().await.unwrap();
    let meals: Vec<Value> = resp.json().await.unwrap();
    assert_eq!(meals.len(), 1);
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn student_cannot_create_meal() {
    let app = TestApp::spawn().await;
    let student = app.register_user("s@hostel.test", "S").await;

    let resp = app
        .auth_post("/meals", &student.token)
        .json(&serde_json::json!({ "title": "Rice", "price": 50 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 403);

    let resp = app.client.get(app.url("/meals")).send().await.unwrap();
    let meals: Vec<Value> = resp.json().await.unwrap();
    assert!(meals.is_empty());
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn missing_meal_is_not_found() {
    let app = TestApp::spawn().await;
    let admin = app.register_admin("chef@hostel.test", "Chef").await;
    let missing = "507f1f77bcf86cd799439011";

    let resp = app.client.get(app.url(&format!("/meals/{missing}"))).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 404);

    let resp = app
        .auth_put(&format!("/meals/{missing}"), &admin.token)
        .json(&serde_json::json!({ "price": 10 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);

    let resp = app
        .auth_delete(&format!("/meals/{missing}"), &admin.token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn update_and_delete_meal() {
    let app = TestApp::spawn().await;
    let admin = app.register_admin("chef@hostel.test", "Chef").await;
    let meal = app.create_meal(&admin, "Dal", "Dinner", 30.0).await;

    let resp = app
        .auth_put(&format!("/meals/{}", meal.id), &admin.token)
        .json(&serde_json::json!({ "price": 35, "title": "Dal Tadka" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["matchedCount"], 1);
    assert_eq!(json["modifiedCount"], 1);

    let resp = app.client.get(app.url(&format!("/meals/{}", meal.id))).send().await.unwrap();
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["title"], "Dal Tadka");
    assert_eq!(json["price"], 35.0);
    assert_eq!(json["category"], "Dinner");

    let resp = app
        .auth_put(&format!("/meals/{}", meal.id), &admin.token)
        .json(&serde_json::json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);

    let resp = app
        .auth_delete(&format!("/meals/{}", meal.id), &admin.token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["deletedCount"], 1);

    let resp = app.client.get(app.url(&format!("/meals/{}", meal.id))).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 404);
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn paging_reports_has_more() {
    let app = TestApp::spawn().await;
    let admin = app.register_admin("chef@hostel.test", "Chef").await;
    for i in 0..5 {
        app.create_meal(&admin, &format!("Meal {i}"), "Lunch", 10.0 + i as f64).await;
    }

    let resp = app.client.get(app.url("/meals?page=1&limit=2")).send().await.unwrap();
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["items"].as_array().unwrap().len(), 2);
    assert_eq!(json["total"], 5);
    assert_eq!(json["totalPages"], 3);
    assert_eq!(json["currentPage"], 1);
    assert_eq!(json["hasMore"], true);

    let resp = app.client.get(app.url("/meals?page=3&limit=2")).send().await.unwrap();
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["items"].as_array().unwrap().len(), 1);
    assert_eq!(json["hasMore"], false);

    let resp = app.client.get(app.url("/meals?page=9&limit=2")).send().await.unwrap();
    let json: Value = resp.json().await.unwrap();
    assert!(json["items"].as_array().unwrap().is_empty());
    assert_eq!(json["hasMore"], false);
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn search_filter_and_sort() {
    let app = TestApp::spawn().await;
    let admin = app.register_admin("chef@hostel.test", "Chef").await;
    let rice = app.create_meal(&admin, "Fried Rice", "Lunch", 40.0).await;
    app.create_meal(&admin, "Chicken Curry", "Dinner", 90.0).await;
    app.create_meal(&admin, "Paratha", "Breakfast", 15.0).await;

    // Regex metacharacters are matched literally.
    let resp = app
        .client
        .post(app.url("/search-meals"))
        .json(&serde_json::json!({ "search": "rice" }))
        .send()
        .await
        .unwrap();
    let found: Vec<Value> = resp.json().await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["id"], rice.id.as_str());

    let resp = app
        .client
        .post(app.url("/search-meals"))
        .json(&serde_json::json!({ "search": ".*" }))
        .send()
        .await
        .unwrap();
    let found: Vec<Value> = resp.json().await.unwrap();
    assert!(found.is_empty());

    let resp = app
        .client
        .post(app.url("/filter-meals"))
        .json(&serde_json::json!({ "minPrice": 15, "maxPrice": 40 }))
        .send()
        .await
        .unwrap();
    let found: Vec<Value> = resp.json().await.unwrap();
    assert_eq!(found.len(), 2);

    let resp = app
        .client
        .post(app.url("/filter-meals"))
        .json(&serde_json::json!({ "category": "Dinner" }))
        .send()
        .await
        .unwrap();
    let found: Vec<Value> = resp.json().await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["title"], "Chicken Curry");

    let student = app.register_user("s@hostel.test", "S").await;
    app.auth_patch(&format!("/meals/like/{}", rice.id), &student.token)
        .send()
        .await
        .unwrap();

    let resp = app
        .client
        .post(app.url("/meals/sort"))
        .json(&serde_json::json!({ "sortBy": "likes", "order": "desc" }))
        .send()
        .await
        .unwrap();
    let sorted: Vec<Value> = resp.json().await.unwrap();
    assert_eq!(sorted.len(), 3);
    assert_eq!(sorted[0]["title"], "Fried Rice");
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn concurrent_likes_are_all_counted() {
    let app = TestApp::spawn().await;
    let admin = app.register_admin("chef@hostel.test", "Chef").await;
    let meal = app.create_meal(&admin, "Khichuri", "Lunch", 25.0).await;

    let mut tokens = Vec::new();
    for i in 0..10 {
        tokens.push(app.issue_token(&format!("fan{i}@hostel.test"), "Fan").await);
    }

    let path = format!("/meals/like/{}", meal.id);
    let likes = tokens
        .iter()
        .map(|token| app.auth_patch(&path, token).send());
    let responses = futures::future::join_all(likes).await;
    for resp in responses {
        assert_eq!(resp.unwrap().status().as_u16(), 200);
    }

    let resp = app.client.get(app.url(&format!("/meals/{}", meal.id))).send().await.unwrap();
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["likes"], 10);
    assert_eq!(json["liked_by"].as_array().unwrap().len(), 10);
}
