use uuid::Uuid;

use crate::{
    api::error,
    modules::comment::{
        model::CommentRow, repository::CommentRepository, schema::CommentEntity,
    },
};

const COMMENT_ROW_SELECT: &str = r#"
    SELECT
        c.id,
        c.post_id,
        c.content,
        c.created_at,
        c.updated_at,
        c.author_id,
        u.first_name,
        u.last_name,
        u.profile_pic,
        (SELECT count(*) FROM likes l WHERE l.comment_id = c.id) AS like_count
    FROM comments c
    JOIN users u ON u.id = c.author_id
"#;

#[derive(Clone)]
pub struct CommentRepositoryPg {
    pool: sqlx::PgPool,
}

impl CommentRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CommentRepository for CommentRepositoryPg {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<CommentEntity>, error::SystemError> {
        let comment = sqlx::query_as::<_, CommentEntity>("SELECT * FROM comments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(comment)
    }

    async fn find_row_by_id(&self, id: &Uuid) -> Result<Option<CommentRow>, error::SystemError> {
        let row = sqlx::query_as::<_, CommentRow>(&format!("{COMMENT_ROW_SELECT} WHERE c.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_page_by_post(
        &self,
        post_id: &Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<CommentRow>, error::SystemError> {
        let rows = sqlx::query_as::<_, CommentRow>(&format!(
            "{COMMENT_ROW_SELECT} WHERE c.post_id = $1 ORDER BY c.created_at DESC, c.id LIMIT $2 OFFSET $3"
        ))
        .bind(post_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_all_by_post(
        &self,
        post_id: &Uuid,
    ) -> Result<Vec<CommentRow>, error::SystemError> {
        let rows = sqlx::query_as::<_, CommentRow>(&format!(
            "{COMMENT_ROW_SELECT} WHERE c.post_id = $1 ORDER BY c.created_at DESC, c.id"
        ))
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn count_by_post(&self, post_id: &Uuid) -> Result<i64, error::SystemError> {
        let (count,): (i64,) = sqlx::query_as("SELECT count(*) FROM comments WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn create(
        &self,
        author_id: &Uuid,
        post_id: &Uuid,
        content: &str,
    ) -> Result<CommentEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let comment = sqlx::query_as::<_, CommentEntity>(
            r#"
            INSERT INTO comments (id, post_id, author_id, content)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(post_id)
        .bind(author_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;
        Ok(comment)
    }

    async fn update(
        &self,
        id: &Uuid,
        content: &str,
    ) -> Result<CommentEntity, error::SystemError> {
        let comment = sqlx::query_as::<_, CommentEntity>(
            "UPDATE comments SET content = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;
        Ok(comment)
    }

    async fn delete(&self, id: &Uuid) -> Result<(), error::SystemError> {
        sqlx::query("DELETE FROM comments WHERE id = $1").bind(id).execute(&self.pool).await?;
        Ok(())
    }
}
