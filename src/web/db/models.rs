use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

use crate::polls::{Choice, ChoiceId, CreateChoice, CreateQuestion, Question, QuestionId};
use super::schema;

#[derive(Identifiable, Queryable, Selectable)]
#[diesel(table_name = schema::questions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct QuestionRow {
    pub id: Uuid,
    pub question_text: String,
    pub published_at: NaiveDateTime,
}

impl From<QuestionRow> for Question {
    fn from(row: QuestionRow) -> Question {
        Question {
            id: QuestionId(row.id),
            question_text: row.question_text,
            published_at: row.published_at.and_utc(),
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = schema::questions)]
pub struct NewQuestionRow {
    pub question_text: String,
    pub published_at: NaiveDateTime,
}

impl From<CreateQuestion> for NewQuestionRow {
    fn from(settings: CreateQuestion) -> NewQuestionRow {
        NewQuestionRow {
            question_text: settings.question_text,
            published_at: settings.published_at.naive_utc(),
        }
    }
}

#[derive(Associations, Identifiable, Queryable, Selectable)]
#[diesel(table_name = schema::choices)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(belongs_to(QuestionRow, foreign_key = question_id))]
pub struct ChoiceRow {
    pub id: i32,
    pub question_id: Uuid,
    pub choice_text: String,
    pub vote_count: i32,
}

impl From<ChoiceRow> for Choice {
    fn from(row: ChoiceRow) -> Choice {
        Choice {
            id: ChoiceId(row.id),
            question_id: QuestionId(row.question_id),
            choice_text: row.choice_text,
            vote_count: row.vote_count,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = schema::choices)]
pub struct NewChoiceRow {
    pub question_id: Uuid,
    pub choice_text: String,
    pub vote_count: i32,
}

impl NewChoiceRow {
    pub fn from(question: QuestionId, settings: CreateChoice) -> NewChoiceRow {
        NewChoiceRow {
            question_id: question.0,
            choice_text: settings.choice_text,
            vote_count: 0,
        }
    }
}
