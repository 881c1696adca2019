use std::fmt::{self, Display, Formatter};
use std::ops::RangeInclusive;

use crate::error::{self, ValidationError};
use super::id::{ChoiceId, QuestionId};

pub const CHOICE_TEXT_LIMITS: RangeInclusive<usize> = 1..=200;

#[derive(Clone, Debug, PartialEq)]
pub struct Choice {
    pub id: ChoiceId,
    pub question_id: QuestionId,
    pub choice_text: String,
    pub vote_count: i32,
}

impl Display for Choice {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.choice_text)
    }
}

pub struct CreateChoice {
    pub choice_text: String,
}

pub struct UnvalidatedCreateChoice {
    pub choice_text: String,
}

impl TryFrom<UnvalidatedCreateChoice> for CreateChoice {
    type Error = ValidationError;
    fn try_from(settings: UnvalidatedCreateChoice) -> Result<CreateChoice, Self::Error> {
        let UnvalidatedCreateChoice { choice_text } = settings;

        let len = choice_text.chars().count();
        if !CHOICE_TEXT_LIMITS.contains(&len) {
            return Err(error::choice_text_invalid_size(CHOICE_TEXT_LIMITS, len));
        }

        Ok(CreateChoice { choice_text })
    }
}
