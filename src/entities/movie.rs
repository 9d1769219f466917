use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movie")]
pub struct Model {
    /// Surrogate key; the title is a display field, not the identity.
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    /// Case-folded shadow of `title`, unique-indexed. All title lookups go
    /// through exact equality on this column, never pattern matching.
    pub title_lower: String,
    pub year: String,
    pub director: String,
    /// JSON-encoded ordered array of actor names.
    pub actors: String,
    pub rating: f64,
    pub seen: bool,
    pub genre: String,
    pub poster: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
