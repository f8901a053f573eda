use bson::{doc, oid::ObjectId, Bson, Document};
use futures::TryStreamExt;
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DaoError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),
    #[error("BSON serialization error: {0}")]
    BsonSer(#[from] bson::ser::Error),
    #[error("BSON deserialization error: {0}")]
    BsonDe(#[from] bson::de::Error),
    #[error("Entity not found")]
    NotFound,
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),
    #[error("Validation: {0}")]
    Validation(String),
}

pub type DaoResult<T> = Result<T, DaoError>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PaginationParams {
    pub fn validate(&self) -> DaoResult<()> {
        if self.page < 1 {
            return Err(DaoError::Validation("page must be at least 1".to_string()));
        }
        if self.limit < 1 {
            return Err(DaoError::Validation("limit must be at least 1".to_string()));
        }
        if self.limit > MAX_PAGE_LIMIT {
            return Err(DaoError::Validation(format!(
                "limit must be at most {MAX_PAGE_LIMIT}"
            )));
        }
        let skip = (self.page - 1)
            .checked_mul(self.limit)
            .filter(|skip| i64::try_from(*skip).is_ok());
        if skip.is_none() {
            return Err(DaoError::Validation("page is out of range".to_string()));
        }
        Ok(())
    }

    /// Only meaningful after `validate` has passed.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

pub const MAX_PAGE_LIMIT: u64 = 100;

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub current_page: u64,
    pub total_pages: u64,
    pub has_more: bool,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total: u64, params: &PaginationParams) -> Self {
        let total_pages = total.div_ceil(params.limit);
        let has_more = params.offset().saturating_add(items.len() as u64) < total;
        Self {
            items,
            total,
            current_page: params.page,
            total_pages,
            has_more,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResult<U> {
        PaginatedResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            current_page: self.current_page,
            total_pages: self.total_pages,
            has_more: self.has_more,
        }
    }
}

/// Write counts echoed back to clients after an update.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Escape regex metacharacters so user input matches as a literal substring.
pub fn escape_regex(query: &str) -> String {
    query
        .chars()
        .flat_map(|c| {
            if ".*+?^${}()|[]\\".contains(c) {
                vec!['\\', c]
            } else {
                vec![c]
            }
        })
        .collect()
}

/// Case-insensitive substring match OR-ed across `fields`.
pub fn text_search(fields: &[&str], query: &str) -> Document {
    let escaped = escape_regex(query);
    let clauses: Vec<Bson> = fields
        .iter()
        .map(|field| {
            let mut clause = Document::new();
            clause.insert(*field, doc! { "$regex": &escaped, "$options": "i" });
            Bson::Document(clause)
        })
        .collect();
    doc! { "$or": clauses }
}

pub struct BaseDao<T: Send + Sync> {
    collection: Collection<T>,
}

impl<T> BaseDao<T>
where
    T: Serialize + for<'de> Deserialize<'de> + Unpin + Send + Sync,
{
    pub fn new(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<T>(collection_name),
        }
    }

    pub fn collection(&self) -> &Collection<T> {
        &self.collection
    }

    pub async fn find_by_id(&self, id: ObjectId) -> DaoResult<T> {
        self.collection
            .find_one(doc! { "_id": id })
            .await?
            .ok_or(DaoError::NotFound)
    }

    pub async fn find_one(&self, filter: Document) -> DaoResult<Option<T>> {
        Ok(self.collection.find_one(filter).await?)
    }

    pub async fn find_many(
        &self,
        filter: Document,
        sort: Option<Document>,
    ) -> DaoResult<Vec<T>> {
        let cursor = if let Some(sort) = sort {
            self.collection.find(filter).sort(sort).await?
        } else {
            self.collection.find(filter).await?
        };

        Ok(cursor.try_collect().await?)
    }

    pub async fn find_paginated(
        &self,
        filter: Document,
        sort: Option<Document>,
        params: &PaginationParams,
    ) -> DaoResult<PaginatedResult<T>> {
        params.validate()?;

        let total = self.collection.count_documents(filter.clone()).await?;
        let sort = sort.unwrap_or_else(|| doc! { "_id": -1 });

        let cursor = self
            .collection
            .find(filter)
            .sort(sort)
            .skip(params.offset())
            .limit(i64::try_from(params.limit).map_err(|_| {
                DaoError::Validation("limit is out of range".to_string())
            })?)
            .await?;
        let items: Vec<T> = cursor.try_collect().await?;

        Ok(PaginatedResult::new(items, total, params))
    }

    pub async fn insert_one(&self, doc: &T) -> DaoResult<ObjectId> {
        let result = self.collection.insert_one(doc).await.map_err(|e| {
            if let mongodb::error::ErrorKind::Write(mongodb::error::WriteFailure::WriteError(
                ref write_error,
            )) = *e.kind
            {
                if write_error.code == 11000 {
                    return DaoError::DuplicateKey(write_error.message.clone());
                }
            }
            DaoError::Mongo(e)
        })?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| DaoError::Validation("inserted_id is not an ObjectId".to_string()))?;
        debug!(?id, "Inserted document");
        Ok(id)
    }

    pub async fn update_one(&self, filter: Document, update: Document) -> DaoResult<UpdateOutcome> {
        let result = self.collection.update_one(filter, update).await?;
        Ok(UpdateOutcome {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    pub async fn update_by_id(&self, id: ObjectId, update: Document) -> DaoResult<UpdateOutcome> {
        self.update_one(doc! { "_id": id }, update).await
    }

    /// Atomic single-field `$inc` on one document.
    pub async fn increment(&self, id: ObjectId, field: &str, by: i64) -> DaoResult<UpdateOutcome> {
        let mut inc = Document::new();
        inc.insert(field, by);
        self.update_by_id(id, doc! { "$inc": inc }).await
    }

    pub async fn delete_by_id(&self, id: ObjectId) -> DaoResult<u64> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count)
    }

    pub async fn hard_delete(&self, filter: Document) -> DaoResult<u64> {
        let result = self.collection.delete_many(filter).await?;
        Ok(result.deleted_count)
    }

    pub async fn count(&self, filter: Document) -> DaoResult<u64> {
        Ok(self.collection.count_documents(filter).await?)
    }
}
