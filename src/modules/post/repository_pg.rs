use uuid::Uuid;

use crate::{
    api::error,
    modules::post::{
        model::{CreatePostBody, PostRow, UpdatePostBody},
        repository::PostRepository,
        schema::PostEntity,
    },
};

const POST_ROW_SELECT: &str = r#"
    SELECT
        p.id,
        p.content,
        p.image_url,
        p.created_at,
        p.updated_at,
        p.author_id,
        u.first_name,
        u.last_name,
        u.profile_pic,
        (SELECT count(*) FROM comments c WHERE c.post_id = p.id) AS comment_count,
        (SELECT count(*) FROM likes l WHERE l.post_id = p.id) AS like_count
    FROM posts p
    JOIN users u ON u.id = p.author_id
"#;

#[derive(Clone)]
pub struct PostRepositoryPg {
    pool: sqlx::PgPool,
}

impl PostRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl PostRepository for PostRepositoryPg {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<PostEntity>, error::SystemError> {
        let post = sqlx::query_as::<_, PostEntity>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }

    async fn find_row_by_id(&self, id: &Uuid) -> Result<Option<PostRow>, error::SystemError> {
        let row = sqlx::query_as::<_, PostRow>(&format!("{POST_ROW_SELECT} WHERE p.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_page(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<PostRow>, error::SystemError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "{POST_ROW_SELECT} ORDER BY p.created_at DESC, p.id LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn count_all(&self) -> Result<i64, error::SystemError> {
        let (count,): (i64,) = sqlx::query_as("SELECT count(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn create(
        &self,
        author_id: &Uuid,
        post: &CreatePostBody,
    ) -> Result<PostEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let post = sqlx::query_as::<_, PostEntity>(
            r#"
            INSERT INTO posts (id, author_id, content, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(author_id)
        .bind(&post.content)
        .bind(&post.image_url)
        .fetch_one(&self.pool)
        .await?;
        Ok(post)
    }

    async fn update(
        &self,
        id: &Uuid,
        update: &UpdatePostBody,
    ) -> Result<PostEntity, error::SystemError> {
        let post = sqlx::query_as::<_, PostEntity>(
            r#"
            UPDATE posts
            SET
                content    = COALESCE($2, content),
                image_url  = COALESCE($3, image_url),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&update.content)
        .bind(&update.image_url)
        .fetch_one(&self.pool)
        .await?;
        Ok(post)
    }

    async fn delete(&self, id: &Uuid) -> Result<(), error::SystemError> {
        sqlx::query("DELETE FROM posts WHERE id = $1").bind(id).execute(&self.pool).await?;
        Ok(())
    }
}
