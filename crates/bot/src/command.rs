//! The fixed command table and inbound message parsing.

use common::{AnswerId, QuestionId};

/// Delimiter between the two halves of a pair-grammar argument string.
const PAIR_DELIMITER: char = '~';

/// Every command the bot understands. Exhaustive: adding a command means
/// extending this enum, its name table, and the router match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Help,
    Start,
    Ask,
    Answer,
    GetAnswers,
    Questions,
    MyQuestions,
    LikeQuestion,
    LikeAnswer,
}

/// Argument grammar of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgGrammar {
    /// No arguments; trailing text is tolerated and ignored.
    None,
    /// A single non-empty token.
    Single,
    /// Two parts split on `~`, exactly.
    Pair,
}

impl CommandKind {
    /// Case-sensitive lookup of a command name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "help" => Some(CommandKind::Help),
            "start" => Some(CommandKind::Start),
            "ask" => Some(CommandKind::Ask),
            "answer" => Some(CommandKind::Answer),
            "get_answers" => Some(CommandKind::GetAnswers),
            "questions" => Some(CommandKind::Questions),
            "my_questions" => Some(CommandKind::MyQuestions),
            "like_question" => Some(CommandKind::LikeQuestion),
            "like_answer" => Some(CommandKind::LikeAnswer),
            _ => None,
        }
    }

    /// Command name as typed by the user.
    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::Help => "help",
            CommandKind::Start => "start",
            CommandKind::Ask => "ask",
            CommandKind::Answer => "answer",
            CommandKind::GetAnswers => "get_answers",
            CommandKind::Questions => "questions",
            CommandKind::MyQuestions => "my_questions",
            CommandKind::LikeQuestion => "like_question",
            CommandKind::LikeAnswer => "like_answer",
        }
    }

    pub fn grammar(&self) -> ArgGrammar {
        match self {
            CommandKind::Help | CommandKind::Start | CommandKind::MyQuestions => ArgGrammar::None,
            CommandKind::GetAnswers
            | CommandKind::Questions
            | CommandKind::LikeQuestion
            | CommandKind::LikeAnswer => ArgGrammar::Single,
            CommandKind::Ask | CommandKind::Answer => ArgGrammar::Pair,
        }
    }
}

/// A fully parsed and validated request, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Help,
    Start,
    Ask { body: String, tags: Vec<String> },
    Answer { question: QuestionId, body: String },
    GetAnswers { question: QuestionId },
    Questions { tag: String },
    MyQuestions,
    LikeQuestion { question: QuestionId },
    LikeAnswer { answer: AnswerId },
}

fn single_token(args: &str) -> Option<&str> {
    args.split_whitespace().next()
}

fn numeric_token(args: &str) -> Option<i64> {
    single_token(args)?.parse().ok()
}

fn pair(args: &str) -> Option<(&str, &str)> {
    let mut parts = args.split(PAIR_DELIMITER);
    let first = parts.next()?;
    let second = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some((first, second))
}

/// Outcome of parsing one inbound message. Unknown commands and grammar
/// mismatches are normal terminal outcomes, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    Request(Request),
    UnknownCommand,
    /// Wrong token count or an unparsable numeric id.
    BadArguments(CommandKind),
}

impl Request {
    /// Parses the raw message text into a request.
    ///
    /// A leading `/` is stripped; the first whitespace separates the
    /// command name from its raw argument string.
    pub fn parse(text: &str) -> Parsed {
        let trimmed = text.trim();
        let without_slash = trimmed.strip_prefix('/').unwrap_or(trimmed);
        let (name, args) = match without_slash.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (without_slash, ""),
        };

        let Some(kind) = CommandKind::from_name(name) else {
            return Parsed::UnknownCommand;
        };

        match kind {
            CommandKind::Help => Parsed::Request(Request::Help),
            CommandKind::Start => Parsed::Request(Request::Start),
            CommandKind::MyQuestions => Parsed::Request(Request::MyQuestions),
            CommandKind::Questions => match single_token(args) {
                Some(tag) => Parsed::Request(Request::Questions {
                    tag: tag.to_string(),
                }),
                None => Parsed::BadArguments(kind),
            },
            CommandKind::GetAnswers => match numeric_token(args) {
                Some(id) => Parsed::Request(Request::GetAnswers {
                    question: QuestionId::new(id),
                }),
                None => Parsed::BadArguments(kind),
            },
            CommandKind::LikeQuestion => match numeric_token(args) {
                Some(id) => Parsed::Request(Request::LikeQuestion {
                    question: QuestionId::new(id),
                }),
                None => Parsed::BadArguments(kind),
            },
            CommandKind::LikeAnswer => match numeric_token(args) {
                Some(id) => Parsed::Request(Request::LikeAnswer {
                    answer: AnswerId::new(id),
                }),
                None => Parsed::BadArguments(kind),
            },
            CommandKind::Ask => match pair(args) {
                Some((body, tags)) => Parsed::Request(Request::Ask {
                    body: body.trim().to_string(),
                    tags: tags.split_whitespace().map(String::from).collect(),
                }),
                None => Parsed::BadArguments(kind),
            },
            CommandKind::Answer => match pair(args) {
                Some((id, body)) => match id.trim().parse::<i64>() {
                    Ok(id) => Parsed::Request(Request::Answer {
                        question: QuestionId::new(id),
                        body: body.trim().to_string(),
                    }),
                    Err(_) => Parsed::BadArguments(kind),
                },
                None => Parsed::BadArguments(kind),
            },
        }
    }

    /// The command this request came from, for metrics labels.
    pub fn kind(&self) -> CommandKind {
        match self {
            Request::Help => CommandKind::Help,
            Request::Start => CommandKind::Start,
            Request::Ask { .. } => CommandKind::Ask,
            Request::Answer { .. } => CommandKind::Answer,
            Request::GetAnswers { .. } => CommandKind::GetAnswers,
            Request::Questions { .. } => CommandKind::Questions,
            Request::MyQuestions => CommandKind::MyQuestions,
            Request::LikeQuestion { .. } => CommandKind::LikeQuestion,
            Request::LikeAnswer { .. } => CommandKind::LikeAnswer,
        }
    }
}
