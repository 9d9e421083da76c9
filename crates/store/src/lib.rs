pub mod error;
pub mod memory;
pub mod postgres;
pub mod records;
pub mod store;

pub use common::{AnswerId, ParticipantId, QuestionId, TagId, Tier};
pub use error::{Result, StoreError};
pub use memory::InMemoryForumStore;
pub use postgres::PostgresForumStore;
pub use records::{AnswerDetail, OwnQuestion, TaggedQuestion};
pub use store::ForumStore;
