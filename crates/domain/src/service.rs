//! Forum service providing the domain operations.

use common::{AnswerId, ParticipantId, QuestionId};
use store::{AnswerDetail, ForumStore, OwnQuestion, TaggedQuestion};

use crate::error::{DomainError, Result};
use crate::tags::normalize_tag;

/// Default row cap for tag listings.
pub const DEFAULT_QUESTION_LIMIT: i64 = 10;

/// Result of a registration attempt.
///
/// `created == false` means the participant already existed; that is a
/// success outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterOutcome {
    pub created: bool,
}

/// Result of a like attempt.
///
/// `applied == false` means this participant had already liked the
/// target; the like row count is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeOutcome {
    pub applied: bool,
}

/// Service for the forum operations.
///
/// Generic over the store so tests can substitute the in-memory
/// implementation. Holds no mutable state of its own; concurrent
/// duplicate writes are resolved by the store's uniqueness constraints.
pub struct ForumService<S: ForumStore> {
    store: S,
}

impl<S: ForumStore> ForumService<S> {
    /// Creates a new forum service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Registers a participant. First-write-wins: re-registration and
    /// concurrent duplicate registration both resolve to `created: false`.
    #[tracing::instrument(skip(self, display_name))]
    pub async fn register(
        &self,
        participant: ParticipantId,
        display_name: &str,
    ) -> Result<RegisterOutcome> {
        let created = self.store.insert_participant(participant, display_name).await?;
        if created {
            tracing::info!(%participant, "participant registered");
        }
        Ok(RegisterOutcome { created })
    }

    /// Stores a new open question and links its tags.
    ///
    /// Tags are normalized before lookup; names that collapse to the same
    /// normalized form link the question to a single tag row. An empty
    /// tag list stores the question untagged.
    #[tracing::instrument(skip(self, body, tags))]
    pub async fn ask_question(
        &self,
        participant: ParticipantId,
        body: &str,
        tags: &[String],
    ) -> Result<QuestionId> {
        if !self.store.participant_exists(participant).await? {
            return Err(DomainError::NotRegistered);
        }

        let question = self.store.insert_question(participant, body).await?;

        for raw in tags {
            let Some(name) = normalize_tag(raw) else {
                continue;
            };
            let tag = self.store.upsert_tag(&name).await?;
            self.store.link_question_tag(question, tag).await?;
        }

        self.store.increment_question_count(participant).await?;
        tracing::info!(%participant, %question, "question stored");
        Ok(question)
    }

    /// Stores an answer to an existing question.
    ///
    /// A repeated identical body from the same participant is accepted as
    /// a distinct new answer; only likes carry pair-uniqueness.
    #[tracing::instrument(skip(self, body))]
    pub async fn add_answer(
        &self,
        participant: ParticipantId,
        question: QuestionId,
        body: &str,
    ) -> Result<AnswerId> {
        if !self.store.question_exists(question).await? {
            return Err(DomainError::QuestionNotFound(question));
        }
        if !self.store.participant_exists(participant).await? {
            return Err(DomainError::NotRegistered);
        }

        let answer = self.store.insert_answer(question, participant, body).await?;
        self.store.increment_answer_count(participant).await?;
        Ok(answer)
    }

    /// Likes a question. At most one like per participant per question;
    /// a repeat resolves to `applied: false`, not an error.
    #[tracing::instrument(skip(self))]
    pub async fn like_question(
        &self,
        participant: ParticipantId,
        question: QuestionId,
    ) -> Result<LikeOutcome> {
        if !self.store.question_exists(question).await? {
            return Err(DomainError::QuestionNotFound(question));
        }
        if !self.store.participant_exists(participant).await? {
            return Err(DomainError::NotRegistered);
        }

        let applied = self.store.insert_question_like(question, participant).await?;
        Ok(LikeOutcome { applied })
    }

    /// Likes an answer. Same pair-uniqueness rule as question likes.
    #[tracing::instrument(skip(self))]
    pub async fn like_answer(
        &self,
        participant: ParticipantId,
        answer: AnswerId,
    ) -> Result<LikeOutcome> {
        if !self.store.answer_exists(answer).await? {
            return Err(DomainError::AnswerNotFound(answer));
        }
        if !self.store.participant_exists(participant).await? {
            return Err(DomainError::NotRegistered);
        }

        let applied = self.store.insert_answer_like(answer, participant).await?;
        Ok(LikeOutcome { applied })
    }

    /// Lists up to `limit` open questions carrying `tag`, most-liked
    /// first, ties broken by insertion order. Empty is a valid result.
    #[tracing::instrument(skip(self))]
    pub async fn questions_by_tag(
        &self,
        tag: &str,
        limit: i64,
    ) -> Result<Vec<TaggedQuestion>> {
        let Some(name) = normalize_tag(tag) else {
            return Ok(Vec::new());
        };
        Ok(self.store.questions_by_tag(&name, limit).await?)
    }

    /// Lists every question authored by the caller.
    #[tracing::instrument(skip(self))]
    pub async fn own_questions(&self, participant: ParticipantId) -> Result<Vec<OwnQuestion>> {
        if !self.store.participant_exists(participant).await? {
            return Err(DomainError::NotRegistered);
        }
        Ok(self.store.questions_by_author(participant).await?)
    }

    /// Lists every answer to a question, joined with author name and
    /// tier. A question with no answers yields an empty list.
    #[tracing::instrument(skip(self))]
    pub async fn answers_for_question(
        &self,
        question: QuestionId,
    ) -> Result<Vec<AnswerDetail>> {
        if !self.store.question_exists(question).await? {
            return Err(DomainError::QuestionNotFound(question));
        }
        Ok(self.store.answers_for_question(question).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::InMemoryForumStore;

    const ALICE: ParticipantId = ParticipantId::new(1);
    const BOB: ParticipantId = ParticipantId::new(2);

    async fn service_with_alice() -> ForumService<InMemoryForumStore> {
        let service = ForumService::new(InMemoryForumStore::new());
        service.register(ALICE, "alice").await.unwrap();
        service
    }

    #[tokio::test]
    async fn register_twice_creates_once() {
        let service = ForumService::new(InMemoryForumStore::new());

        let first = service.register(ALICE, "alice").await.unwrap();
        let second = service.register(ALICE, "alice").await.unwrap();

        assert!(first.created);
        assert!(!second.created);
        assert_eq!(service.store().participant_count().await, 1);
    }

    #[tokio::test]
    async fn ask_requires_registration() {
        let service = ForumService::new(InMemoryForumStore::new());

        let err = service.ask_question(ALICE, "how?", &[]).await.unwrap_err();
        assert!(matches!(err, DomainError::NotRegistered));
    }

    #[tokio::test]
    async fn tag_variants_collapse_to_one_link() {
        let service = service_with_alice().await;

        let tags = vec!["go".to_string(), "GO".to_string(), "go ".to_string()];
        let question = service.ask_question(ALICE, "how?", &tags).await.unwrap();

        assert_eq!(service.store().tag_count().await, 1);
        assert_eq!(service.store().question_tag_count(question).await, 1);
    }

    #[tokio::test]
    async fn blank_tags_are_skipped() {
        let service = service_with_alice().await;

        let tags = vec!["  ".to_string(), "infra".to_string()];
        let question = service.ask_question(ALICE, "how?", &tags).await.unwrap();

        assert_eq!(service.store().tag_count().await, 1);
        assert_eq!(service.store().question_tag_count(question).await, 1);
    }

    #[tokio::test]
    async fn untagged_question_is_stored() {
        let service = service_with_alice().await;

        service.ask_question(ALICE, "how?", &[]).await.unwrap();

        assert_eq!(service.store().tag_count().await, 0);
        assert_eq!(service.own_questions(ALICE).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn answer_to_missing_question_fails_without_row() {
        let service = service_with_alice().await;

        let err = service
            .add_answer(ALICE, QuestionId::new(42), "no")
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::QuestionNotFound(_)));
        assert_eq!(service.store().answer_count().await, 0);
    }

    #[tokio::test]
    async fn answer_requires_registration() {
        let service = service_with_alice().await;
        let question = service.ask_question(ALICE, "how?", &[]).await.unwrap();

        let err = service.add_answer(BOB, question, "hi").await.unwrap_err();
        assert!(matches!(err, DomainError::NotRegistered));
    }

    #[tokio::test]
    async fn repeated_answer_body_is_a_distinct_answer() {
        let service = service_with_alice().await;
        let question = service.ask_question(ALICE, "how?", &[]).await.unwrap();

        let first = service.add_answer(ALICE, question, "same").await.unwrap();
        let second = service.add_answer(ALICE, question, "same").await.unwrap();

        assert_ne!(first, second);
        assert_eq!(service.store().answer_count().await, 2);
    }

    #[tokio::test]
    async fn double_like_applies_once() {
        let service = service_with_alice().await;
        service.register(BOB, "bob").await.unwrap();
        let question = service.ask_question(ALICE, "how?", &[]).await.unwrap();

        let first = service.like_question(BOB, question).await.unwrap();
        let second = service.like_question(BOB, question).await.unwrap();

        assert!(first.applied);
        assert!(!second.applied);
        assert_eq!(service.store().question_like_count(question).await, 1);
    }

    #[tokio::test]
    async fn like_missing_answer_fails() {
        let service = service_with_alice().await;

        let err = service
            .like_answer(ALICE, AnswerId::new(9))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::AnswerNotFound(_)));
    }

    #[tokio::test]
    async fn like_count_reflects_distinct_participants() {
        let service = service_with_alice().await;
        service.register(BOB, "bob").await.unwrap();
        let question = service
            .ask_question(ALICE, "how?", &["infra".to_string()])
            .await
            .unwrap();

        service.like_question(ALICE, question).await.unwrap();
        service.like_question(BOB, question).await.unwrap();
        service.like_question(BOB, question).await.unwrap();

        let listed = service.questions_by_tag("infra", 10).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].like_count, 2);
    }

    #[tokio::test]
    async fn questions_by_tag_orders_and_limits() {
        let service = service_with_alice().await;
        for id in 3..=10 {
            service
                .register(ParticipantId::new(id), &format!("user{id}"))
                .await
                .unwrap();
        }

        for likes in [3i64, 1, 5] {
            let q = service
                .ask_question(ALICE, "q", &["infra".to_string()])
                .await
                .unwrap();
            for liker in 0..likes {
                service
                    .like_question(ParticipantId::new(liker + 3), q)
                    .await
                    .unwrap();
            }
        }

        let listed = service.questions_by_tag("infra", 10).await.unwrap();
        let counts: Vec<i64> = listed.iter().map(|q| q.like_count).collect();
        assert_eq!(counts, vec![5, 3, 1]);

        let limited = service.questions_by_tag("infra", 2).await.unwrap();
        assert_eq!(limited.len(), 2);
    }

    #[tokio::test]
    async fn tag_lookup_is_normalized() {
        let service = service_with_alice().await;
        service
            .ask_question(ALICE, "q", &["Infra".to_string()])
            .await
            .unwrap();

        let listed = service.questions_by_tag(" INFRA ", 10).await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn own_questions_requires_registration() {
        let service = ForumService::new(InMemoryForumStore::new());

        let err = service.own_questions(ALICE).await.unwrap_err();
        assert!(matches!(err, DomainError::NotRegistered));
    }

    #[tokio::test]
    async fn answers_for_question_empty_is_valid() {
        let service = service_with_alice().await;
        let question = service.ask_question(ALICE, "how?", &[]).await.unwrap();

        let listed = service.answers_for_question(question).await.unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn counters_follow_activity() {
        let service = service_with_alice().await;
        let question = service.ask_question(ALICE, "how?", &[]).await.unwrap();
        service.add_answer(ALICE, question, "self-answer").await.unwrap();

        let counters = service.store().participant_counters(ALICE).await;
        assert_eq!(counters, Some((1, 1)));
    }
}
