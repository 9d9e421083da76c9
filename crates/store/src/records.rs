//! Typed result records, one per query shape.
//!
//! Rows are decoded into these structs rather than untyped maps; field
//! order matters because it is the column order of the tabular export.

use chrono::{DateTime, Utc};
use common::{AnswerId, QuestionId, Tier};
use serde::Serialize;

/// One open question carrying a given tag, with its like count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedQuestion {
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub question_id: QuestionId,
    pub like_count: i64,
}

/// One question authored by the calling participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnQuestion {
    pub question_id: QuestionId,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub like_count: i64,
}

/// One answer to a question, joined with its author's name and tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerDetail {
    pub answer_id: AnswerId,
    pub body: String,
    pub author: String,
    pub tier: Tier,
    pub created_at: DateTime<Utc>,
    pub like_count: i64,
}
