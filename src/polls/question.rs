use std::fmt::{self, Display, Formatter};
use std::ops::RangeInclusive;

use chrono::{DateTime, Duration, Utc};

use crate::error::{self, ValidationError};
use super::id::QuestionId;

pub const QUESTION_TEXT_LIMITS: RangeInclusive<usize> = 1..=200;

#[derive(Clone, Debug, PartialEq)]
pub struct Question {
    pub id: QuestionId,
    pub question_text: String,
    pub published_at: DateTime<Utc>,
}

impl Question {
    /// Whether the question went live within the trailing day. A question
    /// scheduled for the future is not recent, not even by one second.
    pub fn was_published_recently(&self, now: DateTime<Utc>) -> bool {
        now - Duration::days(1) <= self.published_at && self.published_at <= now
    }
}

impl Display for Question {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.question_text)
    }
}

pub struct CreateQuestion {
    pub question_text: String,
    pub published_at: DateTime<Utc>,
}

pub struct UnvalidatedCreateQuestion {
    pub question_text: String,
    pub published_at: DateTime<Utc>,
}

impl TryFrom<UnvalidatedCreateQuestion> for CreateQuestion {
    type Error = ValidationError;
    fn try_from(settings: UnvalidatedCreateQuestion) -> Result<CreateQuestion, Self::Error> {
        let UnvalidatedCreateQuestion { question_text, published_at } = settings;

        let len = question_text.chars().count();
        if !QUESTION_TEXT_LIMITS.contains(&len) {
            return Err(error::question_text_invalid_size(QUESTION_TEXT_LIMITS, len));
        }

        Ok(CreateQuestion { question_text, published_at })
    }
}
