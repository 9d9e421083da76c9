//! The `Tabular` trait and its implementations for the query records.

use chrono::{DateTime, Utc};
use store::{AnswerDetail, OwnQuestion, TaggedQuestion};

fn format_time(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// A record that can be rendered as one CSV row and one summary paragraph.
///
/// `row()` must produce values in `HEADERS` order; the tabular export
/// relies on that pairing.
pub trait Tabular {
    /// Column names, in record field order.
    const HEADERS: &'static [&'static str];

    /// Fixed summary text when a listing comes back empty.
    const EMPTY_TEXT: &'static str;

    /// Suggested attachment file name for this record type.
    const FILE_NAME: &'static str;

    /// Field values, in `HEADERS` order.
    fn row(&self) -> Vec<String>;

    /// One human-readable paragraph for the text summary.
    fn paragraph(&self) -> String;
}

impl Tabular for TaggedQuestion {
    const HEADERS: &'static [&'static str] =
        &["author", "body", "created_at", "question_id", "like_count"];
    const EMPTY_TEXT: &'static str = "No questions found for this tag.";
    const FILE_NAME: &'static str = "questions.csv";

    fn row(&self) -> Vec<String> {
        vec![
            self.author.clone(),
            self.body.clone(),
            format_time(&self.created_at),
            self.question_id.to_string(),
            self.like_count.to_string(),
        ]
    }

    fn paragraph(&self) -> String {
        format!(
            "Question from {}, created {}, question #{}\n{}\nLikes: {}\n\n",
            self.author,
            format_time(&self.created_at),
            self.question_id,
            self.body,
            self.like_count,
        )
    }
}

impl Tabular for OwnQuestion {
    const HEADERS: &'static [&'static str] =
        &["question_id", "body", "created_at", "like_count"];
    const EMPTY_TEXT: &'static str = "You have not asked any questions yet.";
    const FILE_NAME: &'static str = "my_questions.csv";

    fn row(&self) -> Vec<String> {
        vec![
            self.question_id.to_string(),
            self.body.clone(),
            format_time(&self.created_at),
            self.like_count.to_string(),
        ]
    }

    fn paragraph(&self) -> String {
        format!(
            "Your question #{}, created {}\n{}\nLikes: {}\n\n",
            self.question_id,
            format_time(&self.created_at),
            self.body,
            self.like_count,
        )
    }
}

impl Tabular for AnswerDetail {
    const HEADERS: &'static [&'static str] = &[
        "answer_id",
        "body",
        "author",
        "tier",
        "created_at",
        "like_count",
    ];
    const EMPTY_TEXT: &'static str = "No answers yet for this question.";
    const FILE_NAME: &'static str = "answers.csv";

    fn row(&self) -> Vec<String> {
        vec![
            self.answer_id.to_string(),
            self.body.clone(),
            self.author.clone(),
            self.tier.to_string(),
            format_time(&self.created_at),
            self.like_count.to_string(),
        ]
    }

    fn paragraph(&self) -> String {
        format!(
            "Answer from {} ({}), created {}, answer #{}\n{}\nLikes: {}\n\n",
            self.author,
            self.tier,
            format_time(&self.created_at),
            self.answer_id,
            self.body,
            self.like_count,
        )
    }
}
