use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::{
    entities::movie,
    error::ApiResult,
    models::{MoviePatch, MovieRecord},
    store::{InsertOutcome, MovieStore, UpdateOutcome},
};

/// Database backend: one row per record, titles resolved by exact equality
/// on the case-folded `title_lower` column. The duplicate check and the
/// insert are separate round trips; the unique index on `title_lower` backs
/// the residual race, and its violation surfaces as a duplicate rather than
/// a server error.
pub struct DbStore {
    db: DatabaseConnection,
}

impl DbStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_row(&self, title: &str) -> ApiResult<Option<movie::Model>> {
        let row = movie::Entity::find()
            .filter(movie::Column::TitleLower.eq(title.to_lowercase()))
            .order_by_asc(movie::Column::Id)
            .one(&self.db)
            .await?;
        Ok(row)
    }
}

#[async_trait]
impl MovieStore for DbStore {
    async fn list(&self) -> ApiResult<Vec<MovieRecord>> {
        let rows =
            movie::Entity::find().order_by_asc(movie::Column::Id).all(&self.db).await?;
        Ok(rows.into_iter().map(record_from_row).collect())
    }

    async fn find_by_title(&self, title: &str) -> ApiResult<Option<MovieRecord>> {
        Ok(self.find_row(title).await?.map(record_from_row))
    }

    async fn insert(&self, record: MovieRecord) -> ApiResult<InsertOutcome> {
        if self.find_row(&record.title).await?.is_some() {
            return Ok(InsertOutcome::DuplicateTitle);
        }

        let row = movie::ActiveModel {
            id: Default::default(),
            title_lower: Set(record.title.to_lowercase()),
            title: Set(record.title),
            year: Set(record.year),
            director: Set(record.director),
            actors: Set(serde_json::to_string(&record.actors)?),
            rating: Set(record.rating),
            seen: Set(record.seen),
            genre: Set(record.genre),
            poster: Set(record.poster),
        };

        match movie::Entity::insert(row).exec(&self.db).await {
            Ok(_) => Ok(InsertOutcome::Inserted),
            // A concurrent insert of the same title loses to the unique index.
            Err(err) if err.to_string().contains("UNIQUE constraint failed") => {
                Ok(InsertOutcome::DuplicateTitle)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn update_partial(&self, title: &str, patch: &MoviePatch) -> ApiResult<UpdateOutcome> {
        let Some(row) = self.find_row(title).await? else {
            return Ok(UpdateOutcome::NoSuchTitle);
        };

        let mut active: movie::ActiveModel = row.into();
        if let Some(rating) = patch.rating {
            active.rating = Set(rating);
        }
        if let Some(seen) = patch.seen {
            active.seen = Set(seen);
        }
        active.update(&self.db).await?;
        Ok(UpdateOutcome::Updated)
    }
}

fn record_from_row(row: movie::Model) -> MovieRecord {
    // Rows written by this API always hold a JSON array; tolerate anything
    // else an external writer may have left behind.
    let actors = serde_json::from_str(&row.actors).unwrap_or_default();
    MovieRecord {
        title: row.title,
        year: row.year,
        director: row.director,
        actors,
        rating: row.rating,
        seen: row.seen,
        genre: row.genre,
        poster: row.poster,
    }
}
