// src/db/author_repository.rs
// DOCUMENTATION: Author (user/page) database operations
// PURPOSE: Materialize `from` stubs into facebook_users / facebook_pages rows

use crate::errors::GraphError;
use crate::models::{Author, AuthorKind, AuthorRef, FacebookPage, FacebookUser, SmallResource};
use sqlx::PgPool;

pub struct AuthorRepository;

impl AuthorRepository {
    /// Get or create the author a stub refers to
    /// DOCUMENTATION: Existing rows are left untouched; a stub only ever
    /// creates, it never overwrites a richer record
    pub async fn get_or_create(
        pool: &PgPool,
        stub: &SmallResource,
    ) -> Result<AuthorRef, GraphError> {
        let kind = stub.kind();

        let result = match kind {
            AuthorKind::User => {
                sqlx::query(
                    "INSERT INTO facebook_users (id, name) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING",
                )
                .bind(stub.id)
                .bind(&stub.name)
                .execute(pool)
                .await
            }
            AuthorKind::Page => {
                sqlx::query(
                    "INSERT INTO facebook_pages (id, name, category) VALUES ($1, $2, $3) ON CONFLICT (id) DO NOTHING",
                )
                .bind(stub.id)
                .bind(&stub.name)
                .bind(stub.category.as_deref().unwrap_or_default())
                .execute(pool)
                .await
            }
        };

        let rows = result
            .map_err(|e| {
                log::error!("Failed to store {} {}: {}", kind.as_str(), stub.id, e);
                GraphError::DatabaseError(format!("Store author failed: {}", e))
            })?
            .rows_affected();

        if rows > 0 {
            log::debug!("Created {} {} ({})", kind.as_str(), stub.id, stub.name);
        }

        Ok(AuthorRef { kind, id: stub.id })
    }

    /// Load the user or page an author reference points at
    pub async fn get(pool: &PgPool, author: AuthorRef) -> Result<Option<Author>, GraphError> {
        let found = match author.kind {
            AuthorKind::User => {
                sqlx::query_as::<_, FacebookUser>("SELECT * FROM facebook_users WHERE id = $1")
                    .bind(author.id)
                    .fetch_optional(pool)
                    .await?
                    .map(Author::User)
            }
            AuthorKind::Page => {
                sqlx::query_as::<_, FacebookPage>("SELECT * FROM facebook_pages WHERE id = $1")
                    .bind(author.id)
                    .fetch_optional(pool)
                    .await?
                    .map(Author::Page)
            }
        };
        Ok(found)
    }
}
