use bson::doc;
use hostelmate_db::models::User;
use serde_json::Value;

use super::test_app::TestApp;

pub struct SeededUser {
    pub email: String,
    pub name: String,
    pub token: String,
}

pub struct SeededMeal {
    pub id: String,
    pub title: String,
}

impl TestApp {
    /// Issue a token for `email` via `POST /jwt`.
    pub async fn issue_token(&self, email: &str, name: &str) -> String {
        let resp = self
            .client
            .post(self.url("/jwt"))
            .json(&serde_json::json!({ "email": email, "name": name }))
            .send()
            .await
            .expect("Token request failed");

        assert!(
            resp.status().is_success(),
            "Token request failed: {}",
            resp.text().await.unwrap_or_default()
        );

        let json: Value = resp.json().await.expect("Failed to parse token response");
        json["token"].as_str().unwrap().to_string()
    }

    /// Create a user via `POST /users` and return a token for them.
    pub async fn register_user(&self, email: &str, name: &str) -> SeededUser {
        let resp = self
            .client
            .post(self.url("/users"))
            .json(&serde_json::json!({ "email": email, "name": name }))
            .send()
            .await
            .expect("Create user request failed");

        assert!(
            resp.status().is_success(),
            "Create user failed: {}",
            resp.text().await.unwrap_or_default()
        );

        SeededUser {
            email: email.to_string(),
            name: name.to_string(),
            token: self.issue_token(email, name).await,
        }
    }

    /// Create a user and promote them straight in the database.
    pub async fn register_admin(&self, email: &str, name: &str) -> SeededUser {
        let admin = self.register_user(email, name).await;
        self.db
            .collection::<User>(User::COLLECTION)
            .update_one(doc! { "email": email }, doc! { "$set": { "role": "admin" } })
            .await
            .expect("Failed to promote admin");
        admin
    }

    pub async fn create_meal(&self, admin: &SeededUser, title: &str, category: &str, price: f64) -> SeededMeal {
        let resp = self
            .auth_post("/meals", &admin.token)
            .json(&serde_json::json!({
                "title": title,
                "description": format!("{title} cooked fresh"),
                "category": category,
                "price": price,
            }))
            .send()
            .await
            .expect("Create meal failed");

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        assert_eq!(status.as_u16(), 201, "Create meal '{}' failed: {}", title, body);

        let json: Value = serde_json::from_str(&body).unwrap();
        SeededMeal {
            id: json["insertedId"].as_str().unwrap().to_string(),
            title: title.to_string(),
        }
    }

    /// Create an authenticated request with the given token.
    pub fn auth_get(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.client
            .get(self.url(path))
            .header("Authorization", format!("Bearer {}", token))
    }

    pub fn auth_post(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.client
            .post(self.url(path))
            .header("Authorization", format!("Bearer {}", token))
    }

    pub fn auth_put(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.client
            .put(self.url(path))
            .header("Authorization", format!("Bearer {}", token))
    }

    pub fn auth_patch(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.client
            .patch(self.url(path))
            .header("Authorization", format!("Bearer {}", token))
    }

    pub fn auth_delete(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.client
            .delete(self.url(path))
            .header("Authorization", format!("Bearer {}", token))
    }
}
