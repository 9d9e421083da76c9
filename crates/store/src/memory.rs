use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{AnswerId, ParticipantId, QuestionId, TagId, Tier};
use tokio::sync::RwLock;

use crate::records::{AnswerDetail, OwnQuestion, TaggedQuestion};
use crate::store::ForumStore;
use crate::Result;

#[derive(Debug, Clone)]
struct ParticipantRow {
    display_name: String,
    question_count: i64,
    answer_count: i64,
    tier: Tier,
}

#[derive(Debug, Clone)]
struct QuestionRow {
    participant_id: i64,
    body: String,
    created_at: DateTime<Utc>,
    is_closed: bool,
}

#[derive(Debug, Clone)]
struct AnswerRow {
    question_id: i64,
    participant_id: i64,
    body: String,
    created_at: DateTime<Utc>,
}

#[derive(Default)]
struct Tables {
    participants: BTreeMap<i64, ParticipantRow>,
    questions: BTreeMap<i64, QuestionRow>,
    next_question_id: i64,
    tags: BTreeMap<String, i64>,
    next_tag_id: i64,
    question_tags: HashSet<(i64, i64)>,
    answers: BTreeMap<i64, AnswerRow>,
    next_answer_id: i64,
    question_likes: HashSet<(i64, i64)>,
    answer_likes: HashSet<(i64, i64)>,
}

/// In-memory forum store implementation for testing.
///
/// Mirrors the semantics of the PostgreSQL implementation, including the
/// insert-or-ignore behavior of every uniqueness-constrained write.
#[derive(Clone, Default)]
pub struct InMemoryForumStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryForumStore {
    /// Creates a new empty in-memory forum store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of participant rows.
    pub async fn participant_count(&self) -> usize {
        self.tables.read().await.participants.len()
    }

    /// Returns the number of tag rows.
    pub async fn tag_count(&self) -> usize {
        self.tables.read().await.tags.len()
    }

    /// Returns the number of tag links for a question.
    pub async fn question_tag_count(&self, question: QuestionId) -> usize {
        self.tables
            .read()
            .await
            .question_tags
            .iter()
            .filter(|(q, _)| *q == question.as_i64())
            .count()
    }

    /// Returns the number of like rows for a question.
    pub async fn question_like_count(&self, question: QuestionId) -> usize {
        self.tables
            .read()
            .await
            .question_likes
            .iter()
            .filter(|(q, _)| *q == question.as_i64())
            .count()
    }

    /// Returns the number of answer rows.
    pub async fn answer_count(&self) -> usize {
        self.tables.read().await.answers.len()
    }

    /// Returns the activity counters of a participant, if registered.
    pub async fn participant_counters(&self, id: ParticipantId) -> Option<(i64, i64)> {
        self.tables
            .read()
            .await
            .participants
            .get(&id.as_i64())
            .map(|p| (p.question_count, p.answer_count))
    }
}

#[async_trait]
impl ForumStore for InMemoryForumStore {
    async fn insert_participant(&self, id: ParticipantId, display_name: &str) -> Result<bool> {
        let mut tables = self.tables.write().await;
        if tables.participants.contains_key(&id.as_i64()) {
            return Ok(false);
        }
        tables.participants.insert(
            id.as_i64(),
            ParticipantRow {
                display_name: display_name.to_string(),
                question_count: 0,
                answer_count: 0,
                tier: Tier::default(),
            },
        );
        Ok(true)
    }

    async fn participant_exists(&self, id: ParticipantId) -> Result<bool> {
        Ok(self
            .tables
            .read()
            .await
            .participants
            .contains_key(&id.as_i64()))
    }

    async fn insert_question(&self, participant: ParticipantId, body: &str) -> Result<QuestionId> {
        let mut tables = self.tables.write().await;
        tables.next_question_id += 1;
        let id = tables.next_question_id;
        tables.questions.insert(
            id,
            QuestionRow {
                participant_id: participant.as_i64(),
                body: body.to_string(),
                created_at: Utc::now(),
                is_closed: false,
            },
        );
        Ok(QuestionId::new(id))
    }

    async fn question_exists(&self, id: QuestionId) -> Result<bool> {
        Ok(self.tables.read().await.questions.contains_key(&id.as_i64()))
    }

    async fn answer_exists(&self, id: AnswerId) -> Result<bool> {
        Ok(self.tables.read().await.answers.contains_key(&id.as_i64()))
    }

    async fn upsert_tag(&self, name: &str) -> Result<TagId> {
        let mut tables = self.tables.write().await;
        if let Some(&id) = tables.tags.get(name) {
            return Ok(TagId::new(id));
        }
        tables.next_tag_id += 1;
        let id = tables.next_tag_id;
        tables.tags.insert(name.to_string(), id);
        Ok(TagId::new(id))
    }

    async fn link_question_tag(&self, question: QuestionId, tag: TagId) -> Result<()> {
        self.tables
            .write()
            .await
            .question_tags
            .insert((question.as_i64(), tag.as_i64()));
        Ok(())
    }

    async fn insert_answer(
        &self,
        question: QuestionId,
        participant: ParticipantId,
        body: &str,
    ) -> Result<AnswerId> {
        let mut tables = self.tables.write().await;
        tables.next_answer_id += 1;
        let id = tables.next_answer_id;
        tables.answers.insert(
            id,
            AnswerRow {
                question_id: question.as_i64(),
                participant_id: participant.as_i64(),
                body: body.to_string(),
                created_at: Utc::now(),
            },
        );
        Ok(AnswerId::new(id))
    }

    async fn insert_question_like(
        &self,
        question: QuestionId,
        participant: ParticipantId,
    ) -> Result<bool> {
        Ok(self
            .tables
            .write()
            .await
            .question_likes
            .insert((question.as_i64(), participant.as_i64())))
    }

    async fn insert_answer_like(
        &self,
        answer: AnswerId,
        participant: ParticipantId,
    ) -> Result<bool> {
        Ok(self
            .tables
            .write()
            .await
            .answer_likes
            .insert((answer.as_i64(), participant.as_i64())))
    }

    async fn increment_question_count(&self, participant: ParticipantId) -> Result<()> {
        let mut tables = self.tables.write().await;
        if let Some(row) = tables.participants.get_mut(&participant.as_i64()) {
            row.question_count += 1;
        }
        Ok(())
    }

    async fn increment_answer_count(&self, participant: ParticipantId) -> Result<()> {
        let mut tables = self.tables.write().await;
        if let Some(row) = tables.participants.get_mut(&participant.as_i64()) {
            row.answer_count += 1;
        }
        Ok(())
    }

    async fn questions_by_tag(&self, tag: &str, limit: i64) -> Result<Vec<TaggedQuestion>> {
        let tables = self.tables.read().await;

        let Some(&tag_id) = tables.tags.get(tag) else {
            return Ok(Vec::new());
        };

        let mut records: Vec<TaggedQuestion> = tables
            .questions
            .iter()
            .filter(|(id, q)| !q.is_closed && tables.question_tags.contains(&(**id, tag_id)))
            .map(|(id, q)| TaggedQuestion {
                author: tables
                    .participants
                    .get(&q.participant_id)
                    .map(|p| p.display_name.clone())
                    .unwrap_or_default(),
                body: q.body.clone(),
                created_at: q.created_at,
                question_id: QuestionId::new(*id),
                like_count: tables
                    .question_likes
                    .iter()
                    .filter(|(qid, _)| qid == id)
                    .count() as i64,
            })
            .collect();

        records.sort_by(|a, b| {
            b.like_count
                .cmp(&a.like_count)
                .then(a.question_id.cmp(&b.question_id))
        });
        records.truncate(limit.max(0) as usize);
        Ok(records)
    }

    async fn questions_by_author(&self, participant: ParticipantId) -> Result<Vec<OwnQuestion>> {
        let tables = self.tables.read().await;

        Ok(tables
            .questions
            .iter()
            .filter(|(_, q)| q.participant_id == participant.as_i64())
            .map(|(id, q)| OwnQuestion {
                question_id: QuestionId::new(*id),
                body: q.body.clone(),
                created_at: q.created_at,
                like_count: tables
                    .question_likes
                    .iter()
                    .filter(|(qid, _)| qid == id)
                    .count() as i64,
            })
            .collect())
    }

    async fn answers_for_question(&self, question: QuestionId) -> Result<Vec<AnswerDetail>> {
        let tables = self.tables.read().await;

        Ok(tables
            .answers
            .iter()
            .filter(|(_, a)| a.question_id == question.as_i64())
            .map(|(id, a)| {
                let author = tables.participants.get(&a.participant_id);
                AnswerDetail {
                    answer_id: AnswerId::new(*id),
                    body: a.body.clone(),
                    author: author.map(|p| p.display_name.clone()).unwrap_or_default(),
                    tier: author.map(|p| p.tier).unwrap_or_default(),
                    created_at: a.created_at,
                    like_count: tables
                        .answer_likes
                        .iter()
                        .filter(|(aid, _)| aid == id)
                        .count() as i64,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn duplicate_participant_insert_is_ignored() {
        let store = InMemoryForumStore::new();
        let id = ParticipantId::new(1);

        assert!(store.insert_participant(id, "alice").await.unwrap());
        assert!(!store.insert_participant(id, "alice").await.unwrap());
        assert_eq!(store.participant_count().await, 1);
    }

    #[tokio::test]
    async fn upsert_tag_returns_existing_id() {
        let store = InMemoryForumStore::new();

        let first = store.upsert_tag("rust").await.unwrap();
        let second = store.upsert_tag("rust").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(store.tag_count().await, 1);
    }

    #[tokio::test]
    async fn duplicate_like_insert_is_ignored() {
        let store = InMemoryForumStore::new();
        let alice = ParticipantId::new(1);
        store.insert_participant(alice, "alice").await.unwrap();
        let question = store.insert_question(alice, "how?").await.unwrap();

        assert!(store.insert_question_like(question, alice).await.unwrap());
        assert!(!store.insert_question_like(question, alice).await.unwrap());
        assert_eq!(store.question_like_count(question).await, 1);
    }

    #[tokio::test]
    async fn questions_by_tag_orders_by_like_count_and_limits() {
        let store = InMemoryForumStore::new();
        for id in 1..=6 {
            store
                .insert_participant(ParticipantId::new(id), &format!("user{id}"))
                .await
                .unwrap();
        }
        let author = ParticipantId::new(1);
        let tag = store.upsert_tag("infra").await.unwrap();

        // Three questions with 3, 1 and 5 likes respectively.
        let mut questions = Vec::new();
        for likes in [3, 1, 5] {
            let q = store.insert_question(author, "q").await.unwrap();
            store.link_question_tag(q, tag).await.unwrap();
            for liker in 0..likes {
                store
                    .insert_question_like(q, ParticipantId::new(liker + 2))
                    .await
                    .unwrap();
            }
            questions.push(q);
        }

        let listed = store.questions_by_tag("infra", 10).await.unwrap();
        let counts: Vec<i64> = listed.iter().map(|q| q.like_count).collect();
        assert_eq!(counts, vec![5, 3, 1]);

        let limited = store.questions_by_tag("infra", 2).await.unwrap();
        assert_eq!(limited.len(), 2);
    }

    #[tokio::test]
    async fn questions_by_tag_ties_break_by_insertion_order() {
        let store = InMemoryForumStore::new();
        let author = ParticipantId::new(1);
        store.insert_participant(author, "alice").await.unwrap();
        let tag = store.upsert_tag("go").await.unwrap();

        let first = store.insert_question(author, "first").await.unwrap();
        store.link_question_tag(first, tag).await.unwrap();
        let second = store.insert_question(author, "second").await.unwrap();
        store.link_question_tag(second, tag).await.unwrap();

        let listed = store.questions_by_tag("go", 10).await.unwrap();
        assert_eq!(listed[0].question_id, first);
        assert_eq!(listed[1].question_id, second);
    }

    #[tokio::test]
    async fn unknown_tag_lists_nothing() {
        let store = InMemoryForumStore::new();
        assert!(store.questions_by_tag("missing", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn answers_join_author_name_and_tier() {
        let store = InMemoryForumStore::new();
        let asker = ParticipantId::new(1);
        let answerer = ParticipantId::new(2);
        store.insert_participant(asker, "alice").await.unwrap();
        store.insert_participant(answerer, "bob").await.unwrap();

        let question = store.insert_question(asker, "how?").await.unwrap();
        let answer = store
            .insert_answer(question, answerer, "like this")
            .await
            .unwrap();
        store.insert_answer_like(answer, asker).await.unwrap();

        let listed = store.answers_for_question(question).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].author, "bob");
        assert_eq!(listed[0].tier, Tier::Newcomer);
        assert_eq!(listed[0].like_count, 1);
    }
}
