//! `SeaORM` Entity for the resources table.
//!
//! The kind-specific columns are nullable; a CHECK constraint in the
//! migration keeps them mutually exclusive per kind. The domain layer never
//! sees this flat shape.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{ResourceKind, Visibility};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "resources")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub kind: ResourceKind,
    pub visibility: Visibility,
    pub is_featured: bool,
    pub storage_key: Option<String>,
    pub mime_type: Option<String>,
    pub size_bytes: Option<i64>,
    pub external_url: Option<String>,
    pub markdown_content: Option<String>,
    pub view_count: i64,
    pub download_count: i64,
    pub like_count: i64,
    pub author_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
