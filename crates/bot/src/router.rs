//! The command router: one inbound message in, exactly one reply out.
//!
//! Stateless between invocations; every message runs the same
//! parse → dispatch → render sequence and terminates. Expected domain
//! outcomes become fixed reply texts; only store failures are logged.

use common::ParticipantId;
use domain::{DomainError, ForumService, DEFAULT_QUESTION_LIMIT};
use export::Tabular;
use store::ForumStore;

use crate::command::{Parsed, Request};
use crate::replies;

/// The identity behind an inbound message.
#[derive(Debug, Clone)]
pub struct Caller {
    pub id: ParticipantId,
    pub display_name: String,
}

/// A tabular attachment accompanying a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: &'static str,
    pub bytes: Vec<u8>,
}

/// The single outbound message produced for an inbound one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub attachment: Option<Attachment>,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attachment: None,
        }
    }
}

/// Dispatches parsed commands to the domain service and renders replies.
pub struct Router<S: ForumStore> {
    service: ForumService<S>,
}

impl<S: ForumStore> Router<S> {
    pub fn new(service: ForumService<S>) -> Self {
        Self { service }
    }

    /// Returns a reference to the underlying service.
    pub fn service(&self) -> &ForumService<S> {
        &self.service
    }

    /// Handles one inbound message and produces its reply.
    #[tracing::instrument(skip(self, text), fields(caller = %caller.id))]
    pub async fn handle(&self, caller: &Caller, text: &str) -> Reply {
        let request = match Request::parse(text) {
            Parsed::Request(request) => request,
            Parsed::UnknownCommand => {
                metrics::counter!("bot_unknown_commands_total").increment(1);
                return Reply::text(replies::UNKNOWN_COMMAND);
            }
            Parsed::BadArguments(kind) => {
                metrics::counter!("bot_bad_arguments_total", "command" => kind.name())
                    .increment(1);
                return Reply::text(replies::BAD_ARGUMENTS);
            }
        };

        metrics::counter!("bot_commands_total", "command" => request.kind().name()).increment(1);
        self.dispatch(caller, request).await
    }

    async fn dispatch(&self, caller: &Caller, request: Request) -> Reply {
        match request {
            Request::Help => Reply::text(replies::HELP),
            Request::Start => {
                match self.service.register(caller.id, &caller.display_name).await {
                    Ok(outcome) if outcome.created => Reply::text(replies::REGISTERED),
                    Ok(_) => Reply::text(replies::ALREADY_REGISTERED),
                    Err(err) => Self::domain_reply(err),
                }
            }
            Request::Ask { body, tags } => {
                match self.service.ask_question(caller.id, &body, &tags).await {
                    Ok(question) => Reply::text(replies::question_stored(question)),
                    Err(err) => Self::domain_reply(err),
                }
            }
            Request::Answer { question, body } => {
                match self.service.add_answer(caller.id, question, &body).await {
                    Ok(_) => Reply::text(replies::ANSWER_STORED),
                    Err(err) => Self::domain_reply(err),
                }
            }
            Request::LikeQuestion { question } => {
                match self.service.like_question(caller.id, question).await {
                    Ok(outcome) if outcome.applied => Reply::text(replies::LIKE_ADDED),
                    Ok(_) => Reply::text(replies::QUESTION_ALREADY_LIKED),
                    Err(err) => Self::domain_reply(err),
                }
            }
            Request::LikeAnswer { answer } => {
                match self.service.like_answer(caller.id, answer).await {
                    Ok(outcome) if outcome.applied => Reply::text(replies::LIKE_ADDED),
                    Ok(_) => Reply::text(replies::ANSWER_ALREADY_LIKED),
                    Err(err) => Self::domain_reply(err),
                }
            }
            Request::Questions { tag } => {
                match self
                    .service
                    .questions_by_tag(&tag, DEFAULT_QUESTION_LIMIT)
                    .await
                {
                    Ok(records) => Self::list_reply(&records),
                    Err(err) => Self::domain_reply(err),
                }
            }
            Request::MyQuestions => match self.service.own_questions(caller.id).await {
                Ok(records) => Self::list_reply(&records),
                Err(err) => Self::domain_reply(err),
            },
            Request::GetAnswers { question } => {
                match self.service.answers_for_question(question).await {
                    Ok(records) => Self::list_reply(&records),
                    Err(err) => Self::domain_reply(err),
                }
            }
        }
    }

    /// Renders a list result: text summary plus CSV attachment. A
    /// rendering failure is a transport concern, not a domain error; the
    /// summary is still returned without the attachment.
    fn list_reply<T: Tabular>(records: &[T]) -> Reply {
        match export::render(records) {
            Ok(rendered) => Reply {
                text: rendered.summary,
                attachment: Some(Attachment {
                    file_name: rendered.file_name,
                    bytes: rendered.table,
                }),
            },
            Err(err) => {
                tracing::warn!(error = %err, "attachment rendering failed");
                metrics::counter!("bot_attachment_failures_total").increment(1);
                Reply::text(export::summary(records))
            }
        }
    }

    /// Maps a domain error to its fixed reply text. Expected outcomes are
    /// never logged; a store failure is recorded for operators and
    /// degraded to a generic retry message.
    fn domain_reply(err: DomainError) -> Reply {
        match err {
            DomainError::NotRegistered => Reply::text(replies::NOT_REGISTERED),
            DomainError::QuestionNotFound(_) => Reply::text(replies::QUESTION_NOT_FOUND),
            DomainError::AnswerNotFound(_) => Reply::text(replies::ANSWER_NOT_FOUND),
            DomainError::Store(err) => {
                tracing::error!(error = %err, "store failure while handling command");
                metrics::counter!("bot_store_failures_total").increment(1);
                Reply::text(replies::TRY_AGAIN)
            }
        }
    }
}
