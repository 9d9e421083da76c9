//! Fixed user-facing reply texts, one per terminal outcome.

pub const HELP: &str = "Commands for working with the bot:
/start - register
/ask <question>~<tags> - ask a question
/answer <question number>~<answer> - answer a question
/get_answers <question number> - get all current answers to a question
/questions <tag> - get the 10 most liked questions for a tag
/my_questions - get every question you have asked
/like_question <question number> - like a question
/like_answer <answer number> - like an answer
/help - show all available commands";

pub const UNKNOWN_COMMAND: &str = "I don't know that command :( Try /help.";
pub const BAD_ARGUMENTS: &str = "Invalid arguments. See /help for the expected format.";

pub const REGISTERED: &str = "Registration successful.";
pub const ALREADY_REGISTERED: &str = "You are already registered.";
pub const NOT_REGISTERED: &str = "Please register first with the /start command.";

pub const ANSWER_STORED: &str = "Answer stored successfully. Wait for likes!";
pub const QUESTION_NOT_FOUND: &str = "No such question exists.";
pub const ANSWER_NOT_FOUND: &str = "No such answer exists.";

pub const LIKE_ADDED: &str = "Like added successfully.";
pub const QUESTION_ALREADY_LIKED: &str = "You have already liked this question.";
pub const ANSWER_ALREADY_LIKED: &str = "You have already liked this answer.";

pub const TRY_AGAIN: &str = "Something went wrong. Please try again.";

pub fn question_stored(id: common::QuestionId) -> String {
    format!("Question #{id} stored successfully. Wait for answers from other participants.")
}
