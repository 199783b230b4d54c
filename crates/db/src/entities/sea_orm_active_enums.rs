//! Active enums mapped to Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Resource kind discriminator, mapped to the `resource_kind` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "resource_kind")]
pub enum ResourceKind {
    /// Uploaded binary payload.
    #[sea_orm(string_value = "upload")]
    Upload,
    /// External link.
    #[sea_orm(string_value = "url")]
    Url,
    /// Inline markdown note.
    #[sea_orm(string_value = "note")]
    Note,
}

/// Access scope, mapped to the `resource_visibility` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "resource_visibility")]
pub enum Visibility {
    /// Readable by anyone.
    #[sea_orm(string_value = "public")]
    Public,
    /// Readable only by elevated roles and the author.
    #[sea_orm(string_value = "private")]
    Private,
}
