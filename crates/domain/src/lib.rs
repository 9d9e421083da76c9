//! Domain service for the qa-forum system.
//!
//! Owns every consistency rule of the forum: idempotent registration,
//! at-most-one-like-per-participant, referential validity of answers and
//! likes, and tag de-duplication. All shared state lives in the store;
//! the service itself is stateless.

pub mod error;
pub mod service;
pub mod tags;

pub use common::{AnswerId, ParticipantId, QuestionId, TagId, Tier};
pub use error::{DomainError, Result};
pub use service::{DEFAULT_QUESTION_LIMIT, ForumService, LikeOutcome, RegisterOutcome};
pub use store::{AnswerDetail, ForumStore, OwnQuestion, TaggedQuestion};
pub use tags::normalize_tag;
