mod db;
mod file;

pub use db::DbStore;
pub use file::JsonFileStore;

use async_trait::async_trait;

use crate::{
    error::ApiResult,
    models::{MoviePatch, MovieRecord},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InsertOutcome {
    Inserted,
    DuplicateTitle,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UpdateOutcome {
    Updated,
    NoSuchTitle,
}

/// Durable movie collection. Both backends present identical semantics:
/// titles are matched case-insensitively, duplicates are rejected at insert
/// time, and partial updates touch only the fields present in the patch.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// All records in insertion order (file: array order, database:
    /// ascending surrogate id).
    async fn list(&self) -> ApiResult<Vec<MovieRecord>>;

    /// Case-insensitive title lookup. If several records share a title
    /// (possible via writes that bypassed this API), the earliest-inserted
    /// one wins.
    async fn find_by_title(&self, title: &str) -> ApiResult<Option<MovieRecord>>;

    async fn insert(&self, record: MovieRecord) -> ApiResult<InsertOutcome>;

    async fn update_partial(&self, title: &str, patch: &MoviePatch) -> ApiResult<UpdateOutcome>;
}
