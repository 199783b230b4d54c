//! Initial database migration.
//!
//! Creates the resource enums, the resources table with its kind-consistency
//! CHECK constraints, and the listing indexes.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(RESOURCES_SQL).await?;
        db.execute_unprepared(INDEXES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Resource kinds
CREATE TYPE resource_kind AS ENUM (
    'upload',
    'url',
    'note'
);

-- Resource visibility
CREATE TYPE resource_visibility AS ENUM (
    'public',
    'private'
);
";

const RESOURCES_SQL: &str = r"
CREATE TABLE resources (
    id UUID PRIMARY KEY,
    title TEXT NOT NULL CHECK (length(trim(title)) > 0),
    description TEXT NOT NULL CHECK (length(trim(description)) > 0),
    kind resource_kind NOT NULL,
    visibility resource_visibility NOT NULL DEFAULT 'public',
    is_featured BOOLEAN NOT NULL DEFAULT FALSE,

    -- Kind-specific columns; exactly the set matching the kind is populated.
    storage_key TEXT,
    mime_type TEXT,
    size_bytes BIGINT CHECK (size_bytes IS NULL OR size_bytes >= 0),
    external_url TEXT,
    markdown_content TEXT,

    view_count BIGINT NOT NULL DEFAULT 0 CHECK (view_count >= 0),
    download_count BIGINT NOT NULL DEFAULT 0 CHECK (download_count >= 0),
    like_count BIGINT NOT NULL DEFAULT 0 CHECK (like_count >= 0),

    author_id UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT resources_kind_columns_check CHECK (
        (kind = 'upload'
            AND storage_key IS NOT NULL
            AND mime_type IS NOT NULL
            AND size_bytes IS NOT NULL
            AND external_url IS NULL
            AND markdown_content IS NULL)
        OR (kind = 'url'
            AND external_url IS NOT NULL
            AND storage_key IS NULL
            AND mime_type IS NULL
            AND size_bytes IS NULL
            AND markdown_content IS NULL)
        OR (kind = 'note'
            AND markdown_content IS NOT NULL
            AND storage_key IS NULL
            AND mime_type IS NULL
            AND size_bytes IS NULL
            AND external_url IS NULL)
    )
);
";

const INDEXES_SQL: &str = r"
CREATE INDEX idx_resources_kind ON resources(kind);
CREATE INDEX idx_resources_visibility ON resources(visibility);
CREATE INDEX idx_resources_author_id ON resources(author_id);
CREATE INDEX idx_resources_created_at ON resources(created_at DESC);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS resources;
DROP TYPE IF EXISTS resource_visibility;
DROP TYPE IF EXISTS resource_kind;
";
