use async_trait::async_trait;
use common::{AnswerId, ParticipantId, QuestionId, TagId};

use crate::records::{AnswerDetail, OwnQuestion, TaggedQuestion};
use crate::Result;

/// Gateway to the relational store.
///
/// Each method executes exactly one parameterized statement and carries no
/// business logic. Idempotency of the writes comes from the store's unique
/// constraints plus insert-or-ignore/upsert semantics, never from
/// check-then-act in application code. All implementations must be
/// thread-safe (Send + Sync).
#[async_trait]
pub trait ForumStore: Send + Sync {
    /// Inserts a participant row unless one already exists for this
    /// identity. Returns `true` iff a row was created.
    async fn insert_participant(
        &self,
        id: ParticipantId,
        display_name: &str,
    ) -> Result<bool>;

    /// Whether a participant row exists for this identity.
    async fn participant_exists(&self, id: ParticipantId) -> Result<bool>;

    /// Inserts a question (open, store-assigned id) and returns its id.
    async fn insert_question(
        &self,
        participant: ParticipantId,
        body: &str,
    ) -> Result<QuestionId>;

    /// Whether a question row exists.
    async fn question_exists(&self, id: QuestionId) -> Result<bool>;

    /// Whether an answer row exists.
    async fn answer_exists(&self, id: AnswerId) -> Result<bool>;

    /// Inserts a tag or fetches the existing row for the same name.
    ///
    /// The name must already be normalized; the store never holds two rows
    /// differing only in case or surrounding whitespace.
    async fn upsert_tag(&self, name: &str) -> Result<TagId>;

    /// Links a tag to a question; a duplicate pair is ignored.
    async fn link_question_tag(&self, question: QuestionId, tag: TagId) -> Result<()>;

    /// Inserts an answer and returns its id.
    async fn insert_answer(
        &self,
        question: QuestionId,
        participant: ParticipantId,
        body: &str,
    ) -> Result<AnswerId>;

    /// Inserts a like row for (question, participant) unless one exists.
    /// Returns `true` iff the row was created.
    async fn insert_question_like(
        &self,
        question: QuestionId,
        participant: ParticipantId,
    ) -> Result<bool>;

    /// Inserts a like row for (answer, participant) unless one exists.
    /// Returns `true` iff the row was created.
    async fn insert_answer_like(
        &self,
        answer: AnswerId,
        participant: ParticipantId,
    ) -> Result<bool>;

    /// Bumps the participant's asked-question counter.
    async fn increment_question_count(&self, participant: ParticipantId) -> Result<()>;

    /// Bumps the participant's given-answer counter.
    async fn increment_answer_count(&self, participant: ParticipantId) -> Result<()>;

    /// Open questions carrying `tag`, ordered by like count descending,
    /// ties broken by question id ascending, at most `limit` rows.
    async fn questions_by_tag(&self, tag: &str, limit: i64) -> Result<Vec<TaggedQuestion>>;

    /// Every question authored by `participant`, with like counts.
    async fn questions_by_author(&self, participant: ParticipantId)
        -> Result<Vec<OwnQuestion>>;

    /// Every answer to `question`, joined with author name and tier.
    async fn answers_for_question(&self, question: QuestionId) -> Result<Vec<AnswerDetail>>;
}
