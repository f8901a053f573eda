use bson::{doc, oid::ObjectId, DateTime};
use hostelmate_db::models::{Role, User};
use mongodb::Database;

use super::base::{
    text_search, BaseDao, DaoError, DaoResult, PaginatedResult, PaginationParams, UpdateOutcome,
};

pub const USER_SEARCH_FIELDS: [&str; 4] = ["name", "email", "role", "badge"];

pub struct UserDao {
    pub base: BaseDao<User>,
}

impl UserDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, User::COLLECTION),
        }
    }

    /// Inserts a user unless the email is already taken. Returns `None` when
    /// the account already exists.
    pub async fn create_if_absent(
        &self,
        email: String,
        name: String,
        photo: Option<String>,
    ) -> DaoResult<Option<ObjectId>> {
        if self.base.find_one(doc! { "email": &email }).await?.is_some() {
            return Ok(None);
        }

        let user = User {
            id: None,
            email,
            name,
            photo,
            role: Role::User,
            badge: hostelmate_db::models::user::DEFAULT_BADGE.to_string(),
            created_at: DateTime::now(),
        };

        // The unique index catches a concurrent insert that slipped past the check.
        match self.base.insert_one(&user).await {
            Ok(id) => Ok(Some(id)),
            Err(DaoError::DuplicateKey(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> DaoResult<User> {
        self.base
            .find_one(doc! { "email": email })
            .await?
            .ok_or(DaoError::NotFound)
    }

    pub async fn list_page(&self, params: &PaginationParams) -> DaoResult<PaginatedResult<User>> {
        self.base
            .find_paginated(doc! {}, Some(doc! { "created_at": -1, "_id": -1 }), params)
            .await
    }

    pub async fn search(&self, query: &str) -> DaoResult<Vec<User>> {
        self.base
            .find_many(text_search(&USER_SEARCH_FIELDS, query), Some(doc! { "name": 1 }))
            .await
    }

    pub async fn set_role(&self, email: &str, role: Role) -> DaoResult<UpdateOutcome> {
        self.base
            .update_one(doc! { "email": email }, doc! { "$set": { "role": role.as_str() } })
            .await
    }

    pub async fn set_badge(&self, email: &str, badge: &str) -> DaoResult<UpdateOutcome> {
        self.base
            .update_one(doc! { "email": email }, doc! { "$set": { "badge": badge } })
            .await
    }
}
