pub mod types;

pub use types::{AnswerId, ParticipantId, QuestionId, TagId, Tier};
