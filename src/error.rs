use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::ops::RangeInclusive;

use diesel::result::Error as DbError;

use crate::polls::{ChoiceId, Question, QuestionId};

/// Message shown on the voting form when the submission carries no usable choice.
pub const NO_CHOICE_MESSAGE: &str = "You didn't select a choice.";

#[derive(Debug)]
pub struct ValidationError {
    message: String,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Validation error: {}", self.message)
    }
}

impl Error for ValidationError {}

pub fn question_text_invalid_size(limits: RangeInclusive<usize>, len: usize) -> ValidationError {
    ValidationError {
        message: format!("question text must be between {} and {} characters, got {len}",
            limits.start(), limits.end()),
    }
}

pub fn choice_text_invalid_size(limits: RangeInclusive<usize>, len: usize) -> ValidationError {
    ValidationError {
        message: format!("choice text must be between {} and {} characters, got {len}",
            limits.start(), limits.end()),
    }
}

#[derive(Debug)]
pub struct StoreError {
    message: String,
    source: Option<DbError>,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{}: {source}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_ref().map(|err| err as &(dyn Error + 'static))
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        StoreError {
            message: String::from("database operation failed"),
            source: Some(value),
        }
    }
}

pub fn store_missing_row(subject: &str) -> StoreError {
    StoreError {
        message: format!("no {subject} row to update"),
        source: None,
    }
}

/// Failure to fetch a question for the detail or results view.
#[derive(Debug)]
pub enum LookupError {
    NotFound,
    Store(StoreError),
}

impl Display for LookupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::NotFound => write!(f, "question not found or not yet published"),
            LookupError::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LookupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LookupError::NotFound => None,
            LookupError::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for LookupError {
    fn from(value: StoreError) -> Self {
        LookupError::Store(value)
    }
}

/// Failure to record a vote. The two selection variants are recoverable:
/// they carry the question back so the voting form can be shown again.
#[derive(Debug)]
pub enum VoteError {
    QuestionNotFound(QuestionId),
    NoSelection { question: Question },
    InvalidSelection { question: Question, choice: ChoiceId },
    Store(StoreError),
}

impl Display for VoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            VoteError::QuestionNotFound(id) => {
                write!(f, "question {id} does not exist")
            },
            VoteError::NoSelection { question } => {
                write!(f, "no choice selected for question {}", question.id)
            },
            VoteError::InvalidSelection { question, choice } => {
                write!(f, "choice {choice} does not belong to question {}", question.id)
            },
            VoteError::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for VoteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            VoteError::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for VoteError {
    fn from(value: StoreError) -> Self {
        VoteError::Store(value)
    }
}
