use async_trait::async_trait;
use common::{AnswerId, ParticipantId, QuestionId, TagId, Tier};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::records::{AnswerDetail, OwnQuestion, TaggedQuestion};
use crate::store::ForumStore;
use crate::Result;

/// PostgreSQL-backed forum store implementation.
#[derive(Clone)]
pub struct PostgresForumStore {
    pool: PgPool,
}

impl PostgresForumStore {
    /// Creates a new PostgreSQL forum store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_tagged_question(row: PgRow) -> Result<TaggedQuestion> {
        Ok(TaggedQuestion {
            author: row.try_get("author")?,
            body: row.try_get("body")?,
            created_at: row.try_get("created_at")?,
            question_id: QuestionId::new(row.try_get("question_id")?),
            like_count: row.try_get("like_count")?,
        })
    }

    fn row_to_own_question(row: PgRow) -> Result<OwnQuestion> {
        Ok(OwnQuestion {
            question_id: QuestionId::new(row.try_get("question_id")?),
            body: row.try_get("body")?,
            created_at: row.try_get("created_at")?,
            like_count: row.try_get("like_count")?,
        })
    }

    fn row_to_answer_detail(row: PgRow) -> Result<AnswerDetail> {
        Ok(AnswerDetail {
            answer_id: AnswerId::new(row.try_get("answer_id")?),
            body: row.try_get("body")?,
            author: row.try_get("author")?,
            tier: Tier::from_i16(row.try_get("tier")?),
            created_at: row.try_get("created_at")?,
            like_count: row.try_get("like_count")?,
        })
    }
}

#[async_trait]
impl ForumStore for PostgresForumStore {
    async fn insert_participant(&self, id: ParticipantId, display_name: &str) -> Result<bool> {
        // RETURNING yields a row only when the insert actually happened;
        // a conflicting concurrent insert resolves to "not created".
        let created: Option<i64> = sqlx::query_scalar(
            r#"
            INSERT INTO participants (id, display_name, registered_at, tier)
            VALUES ($1, $2, NOW(), $3)
            ON CONFLICT (id) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(id.as_i64())
        .bind(display_name)
        .bind(Tier::default().as_i16())
        .fetch_optional(&self.pool)
        .await?;

        Ok(created.is_some())
    }

    async fn participant_exists(&self, id: ParticipantId) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM participants WHERE id = $1)")
                .bind(id.as_i64())
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn insert_question(&self, participant: ParticipantId, body: &str) -> Result<QuestionId> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO questions (participant_id, body, created_at, is_closed)
            VALUES ($1, $2, NOW(), FALSE)
            RETURNING id
            "#,
        )
        .bind(participant.as_i64())
        .bind(body)
        .fetch_one(&self.pool)
        .await?;

        Ok(QuestionId::new(id))
    }

    async fn question_exists(&self, id: QuestionId) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM questions WHERE id = $1)")
                .bind(id.as_i64())
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn answer_exists(&self, id: AnswerId) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM answers WHERE id = $1)")
                .bind(id.as_i64())
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn upsert_tag(&self, name: &str) -> Result<TagId> {
        // The no-op DO UPDATE makes RETURNING yield the existing row's id
        // on conflict, so insert and fetch stay a single statement.
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO tags (name)
            VALUES ($1)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING id
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(TagId::new(id))
    }

    async fn link_question_tag(&self, question: QuestionId, tag: TagId) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO question_tags (question_id, tag_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(question.as_i64())
        .bind(tag.as_i64())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert_answer(
        &self,
        question: QuestionId,
        participant: ParticipantId,
        body: &str,
    ) -> Result<AnswerId> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO answers (question_id, participant_id, body, created_at)
            VALUES ($1, $2, $3, NOW())
            RETURNING id
            "#,
        )
        .bind(question.as_i64())
        .bind(participant.as_i64())
        .bind(body)
        .fetch_one(&self.pool)
        .await?;

        Ok(AnswerId::new(id))
    }

    async fn insert_question_like(
        &self,
        question: QuestionId,
        participant: ParticipantId,
    ) -> Result<bool> {
        let created: Option<i64> = sqlx::query_scalar(
            r#"
            INSERT INTO question_likes (question_id, participant_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            RETURNING question_id
            "#,
        )
        .bind(question.as_i64())
        .bind(participant.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(created.is_some())
    }

    async fn insert_answer_like(
        &self,
        answer: AnswerId,
        participant: ParticipantId,
    ) -> Result<bool> {
        let created: Option<i64> = sqlx::query_scalar(
            r#"
            INSERT INTO answer_likes (answer_id, participant_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            RETURNING answer_id
            "#,
        )
        .bind(answer.as_i64())
        .bind(participant.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(created.is_some())
    }

    async fn increment_question_count(&self, participant: ParticipantId) -> Result<()> {
        sqlx::query("UPDATE participants SET question_count = question_count + 1 WHERE id = $1")
            .bind(participant.as_i64())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn increment_answer_count(&self, participant: ParticipantId) -> Result<()> {
        sqlx::query("UPDATE participants SET answer_count = answer_count + 1 WHERE id = $1")
            .bind(participant.as_i64())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn questions_by_tag(&self, tag: &str, limit: i64) -> Result<Vec<TaggedQuestion>> {
        let rows = sqlx::query(
            r#"
            SELECT p.display_name AS author, q.body, q.created_at,
                   q.id AS question_id, COUNT(ql.participant_id) AS like_count
            FROM questions q
            JOIN question_tags qt ON q.id = qt.question_id
            JOIN tags t ON qt.tag_id = t.id
            JOIN participants p ON q.participant_id = p.id
            LEFT JOIN question_likes ql ON q.id = ql.question_id
            WHERE t.name = $1 AND q.is_closed = FALSE
            GROUP BY p.display_name, q.body, q.created_at, q.id
            ORDER BY like_count DESC, q.id ASC
            LIMIT $2
            "#,
        )
        .bind(tag)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_tagged_question).collect()
    }

    async fn questions_by_author(&self, participant: ParticipantId) -> Result<Vec<OwnQuestion>> {
        let rows = sqlx::query(
            r#"
            SELECT q.id AS question_id, q.body, q.created_at,
                   COUNT(ql.participant_id) AS like_count
            FROM questions q
            LEFT JOIN question_likes ql ON q.id = ql.question_id
            WHERE q.participant_id = $1
            GROUP BY q.id, q.body, q.created_at
            ORDER BY q.id ASC
            "#,
        )
        .bind(participant.as_i64())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_own_question).collect()
    }

    async fn answers_for_question(&self, question: QuestionId) -> Result<Vec<AnswerDetail>> {
        let rows = sqlx::query(
            r#"
            SELECT a.id AS answer_id, a.body, p.display_name AS author, p.tier,
                   a.created_at, COUNT(al.participant_id) AS like_count
            FROM answers a
            JOIN participants p ON a.participant_id = p.id
            LEFT JOIN answer_likes al ON a.id = al.answer_id
            WHERE a.question_id = $1
            GROUP BY a.id, a.body, p.display_name, p.tier, a.created_at
            ORDER BY a.id ASC
            "#,
        )
        .bind(question.as_i64())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_answer_detail).collect()
    }
}
