use mongodb::{Database, IndexModel, options::IndexOptions};
use tracing::info;

use crate::models::{Meal, Payment, RequestedMeal, Review, UpcomingMeal, User};

pub async fn ensure_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    // Users
    create_indexes(
        db,
        User::COLLECTION,
        vec![index_unique(bson::doc! { "email": 1 })],
    )
    .await?;

    // Meals
    create_indexes(
        db,
        Meal::COLLECTION,
        vec![
            index(bson::doc! { "category": 1, "price": 1 }),
            index(bson::doc! { "likes": -1 }),
        ],
    )
    .await?;

    // Upcoming meals
    create_indexes(
        db,
        UpcomingMeal::COLLECTION,
        vec![index(bson::doc! { "likes": -1 })],
    )
    .await?;

    // Reviews
    create_indexes(
        db,
        Review::COLLECTION,
        vec![
            index(bson::doc! { "mealId": 1, "created_at": -1 }),
            index(bson::doc! { "reviewer.email": 1 }),
        ],
    )
    .await?;

    // Requested meals
    create_indexes(
        db,
        RequestedMeal::COLLECTION,
        vec![
            index(bson::doc! { "requester.email": 1, "meal.id": 1 }),
            index(bson::doc! { "status": 1 }),
        ],
    )
    .await?;

    // Payments
    create_indexes(
        db,
        Payment::COLLECTION,
        vec![
            index(bson::doc! { "userEmail": 1, "created_at": -1 }),
            index_unique(bson::doc! { "transactionId": 1 }),
        ],
    )
    .await?;

    info!("All indexes ensured");
    Ok(())
}

fn index(keys: bson::Document) -> IndexModel {
    IndexModel::builder().keys(keys).build()
}

fn index_unique(keys: bson::Document) -> IndexModel {
    IndexModel::builder()
        .keys(keys)
        .options(IndexOptions::builder().unique(true).build())
        .build()
}

async fn create_indexes(
    db: &Database,
    collection: &str,
    indexes: Vec<IndexModel>,
) -> Result<(), mongodb::error::Error> {
    db.collection::<bson::Document>(collection)
        .create_indexes(indexes)
        .await?;
    info!(collection, "Indexes created");
    Ok(())
}
