//! Rendering of query results into a text summary plus a CSV attachment.
//!
//! Every list-producing operation goes through [`render`]: the records
//! become one paragraph each in the summary, and one row each in a CSV
//! table whose header row names the record's fields in order. Empty input
//! is a valid terminal outcome and still yields a header-only table plus
//! a fixed "nothing found" summary.

pub mod error;
pub mod tabular;

pub use error::{ExportError, Result};
pub use tabular::Tabular;

/// A rendered result: human-readable summary plus CSV attachment bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    /// Concatenated paragraphs, or the record type's "nothing found"
    /// text when there were no records.
    pub summary: String,
    /// Suggested attachment file name.
    pub file_name: &'static str,
    /// CSV payload: header row, then one row per record.
    pub table: Vec<u8>,
}

/// Builds the text summary alone: concatenated paragraphs, or the fixed
/// "nothing found" text for an empty listing. Cannot fail, so it doubles
/// as the fallback when the tabular rendering does.
pub fn summary<T: Tabular>(records: &[T]) -> String {
    if records.is_empty() {
        T::EMPTY_TEXT.to_string()
    } else {
        records.iter().map(Tabular::paragraph).collect()
    }
}

/// Renders an ordered sequence of homogeneous records.
pub fn render<T: Tabular>(records: &[T]) -> Result<Export> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(T::HEADERS)?;
    for record in records {
        writer.write_record(record.row())?;
    }
    let table = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;

    Ok(Export {
        summary: summary(records),
        file_name: T::FILE_NAME,
        table,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use common::{AnswerId, QuestionId, Tier};
    use store::{AnswerDetail, OwnQuestion, TaggedQuestion};

    fn sample_question() -> TaggedQuestion {
        TaggedQuestion {
            author: "alice".to_string(),
            body: "How to deploy?".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            question_id: QuestionId::new(7),
            like_count: 3,
        }
    }

    #[test]
    fn empty_input_yields_header_only_table() {
        let export = render::<TaggedQuestion>(&[]).unwrap();

        let table = String::from_utf8(export.table).unwrap();
        assert_eq!(
            table.trim_end(),
            "author,body,created_at,question_id,like_count"
        );
        assert_eq!(export.summary, TaggedQuestion::EMPTY_TEXT);
    }

    #[test]
    fn rows_follow_header_field_order() {
        let export = render(&[sample_question()]).unwrap();

        let table = String::from_utf8(export.table).unwrap();
        let mut lines = table.lines();
        assert_eq!(
            lines.next().unwrap(),
            "author,body,created_at,question_id,like_count"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("alice,How to deploy?,"));
        assert!(row.ends_with(",7,3"));
    }

    #[test]
    fn fields_with_delimiters_are_quoted() {
        let mut question = sample_question();
        question.body = "tabs, commas and \"quotes\"\nand newlines".to_string();

        let export = render(&[question]).unwrap();
        let table = String::from_utf8(export.table).unwrap();
        assert!(table.contains("\"tabs, commas and \"\"quotes\"\"\nand newlines\""));
    }

    #[test]
    fn summary_concatenates_paragraphs() {
        let mut second = sample_question();
        second.question_id = QuestionId::new(8);
        second.like_count = 0;

        let export = render(&[sample_question(), second]).unwrap();
        assert!(export.summary.contains("question #7"));
        assert!(export.summary.contains("question #8"));
        assert!(export.summary.contains("Likes: 3"));
    }

    #[test]
    fn own_question_empty_text_differs_from_tagged() {
        let export = render::<OwnQuestion>(&[]).unwrap();
        assert_eq!(export.summary, OwnQuestion::EMPTY_TEXT);
        assert_ne!(OwnQuestion::EMPTY_TEXT, TaggedQuestion::EMPTY_TEXT);
    }

    #[test]
    fn answer_rows_carry_tier_name() {
        let answer = AnswerDetail {
            answer_id: AnswerId::new(4),
            body: "Use a Deployment.".to_string(),
            author: "bob".to_string(),
            tier: Tier::Expert,
            created_at: Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap(),
            like_count: 1,
        };

        let export = render(&[answer]).unwrap();
        let table = String::from_utf8(export.table).unwrap();
        assert!(table.contains(",Expert,"));
        assert!(export.summary.contains("bob (Expert)"));
        assert_eq!(export.file_name, "answers.csv");
    }
}
