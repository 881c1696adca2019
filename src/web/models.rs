use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::polls::{Choice, ChoiceId, Question, QuestionId};

#[derive(Serialize)]
pub struct QuestionContext {
    pub id: QuestionId,
    pub question_text: String,
    pub published_at: DateTime<Utc>,
}

impl From<Question> for QuestionContext {
    fn from(question: Question) -> QuestionContext {
        QuestionContext {
            id: question.id,
            question_text: question.question_text,
            published_at: question.published_at,
        }
    }
}

#[derive(Serialize)]
pub struct ChoiceContext {
    pub id: ChoiceId,
    pub choice_text: String,
    pub vote_count: i32,
}

impl From<Choice> for ChoiceContext {
    fn from(choice: Choice) -> ChoiceContext {
        ChoiceContext {
            id: choice.id,
            choice_text: choice.choice_text,
            vote_count: choice.vote_count,
        }
    }
}

#[derive(Serialize)]
pub struct IndexContext {
    pub latest_questions: Vec<QuestionContext>,
}

impl IndexContext {
    pub fn new(questions: Vec<Question>) -> IndexContext {
        IndexContext {
            latest_questions: questions.into_iter().map(QuestionContext::from).collect(),
        }
    }
}

#[derive(Serialize)]
pub struct DetailContext {
    pub question: QuestionContext,
    pub choices: Vec<ChoiceContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl DetailContext {
    pub fn new(question: Question, choices: Vec<Choice>, error_message: Option<String>) -> DetailContext {
        DetailContext {
            question: QuestionContext::from(question),
            choices: choices.into_iter().map(ChoiceContext::from).collect(),
            error_message,
        }
    }
}

#[derive(Serialize)]
pub struct ResultsContext {
    pub question: QuestionContext,
    pub choices: Vec<ChoiceContext>,
}

impl ResultsContext {
    pub fn new(question: Question, choices: Vec<Choice>) -> ResultsContext {
        ResultsContext {
            question: QuestionContext::from(question),
            choices: choices.into_iter().map(ChoiceContext::from).collect(),
        }
    }
}

#[derive(Serialize)]
pub struct AdminQuestionContext {
    pub id: QuestionId,
    pub question_text: String,
    pub published_at: DateTime<Utc>,
    pub number_of_choices: i64,
    pub published_recently: bool,
}

impl AdminQuestionContext {
    pub fn new(question: Question, number_of_choices: i64, now: DateTime<Utc>) -> AdminQuestionContext {
        AdminQuestionContext {
            published_recently: question.was_published_recently(now),
            id: question.id,
            question_text: question.question_text,
            published_at: question.published_at,
            number_of_choices,
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use crate::polls::QuestionId;
    use super::*;

    fn question() -> Question {
        Question {
            id: QuestionId(Uuid::new_v4()),
            question_text: String::from("What's new?"),
            published_at: Utc::now(),
        }
    }

    #[test]
    fn detail_context_omits_absent_error_message() {
        let context = DetailContext::new(question(), vec![], None);
        let value = serde_json::to_value(&context).unwrap();
        assert!(value.get("error_message").is_none());
    }

    #[test]
    fn detail_context_keeps_error_message_when_present() {
        let context = DetailContext::new(question(), vec![], Some(String::from("nope")));
        let value = serde_json::to_value(&context).unwrap();
        assert_eq!(value["error_message"], "nope");
    }
}
