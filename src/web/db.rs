pub mod models;
pub mod schema;

use std::env;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::{Connection, PgConnection};
use dotenvy::dotenv;

use crate::error::{self, StoreError};
use crate::polls::{Choice, ChoiceId, CreateChoice, CreateQuestion, PollStore, Question, QuestionId};
use self::schema::{choices, questions};

pub fn establish_connection() -> PgConnection {
    dotenv().ok();

    let db_url = env::var("DATABASE_URL")
        .expect("Environment variable 'DATABASE_URL' must be set");
    PgConnection::establish(&db_url)
        .unwrap_or_else(|err| panic!("Failed to connect to the database: {err}"))
}

impl PollStore for PgConnection {
    fn latest_published(&mut self, now: DateTime<Utc>, limit: i64) -> Result<Vec<Question>, StoreError> {
        let rows = questions::table
            .filter(questions::published_at.le(now.naive_utc()))
            .order(questions::published_at.desc())
            .limit(limit)
            .select(models::QuestionRow::as_select())
            .load(self)?;
        Ok(rows.into_iter().map(Question::from).collect())
    }

    fn published_question(&mut self, id: QuestionId, now: DateTime<Utc>) -> Result<Option<Question>, StoreError> {
        let row = questions::table
            .filter(questions::id.eq(id.0).and(questions::published_at.le(now.naive_utc())))
            .select(models::QuestionRow::as_select())
            .first(self)
            .optional()?;
        Ok(row.map(Question::from))
    }

    fn question(&mut self, id: QuestionId) -> Result<Option<Question>, StoreError> {
        let row = questions::table
            .filter(questions::id.eq(id.0))
            .select(models::QuestionRow::as_select())
            .first(self)
            .optional()?;
        Ok(row.map(Question::from))
    }

    fn questions(&mut self) -> Result<Vec<Question>, StoreError> {
        let rows = questions::table
            .order(questions::published_at.desc())
            .select(models::QuestionRow::as_select())
            .load(self)?;
        Ok(rows.into_iter().map(Question::from).collect())
    }

    fn search_questions(&mut self, needle: &str) -> Result<Vec<Question>, StoreError> {
        let rows = questions::table
            .filter(questions::question_text.ilike(format!("%{needle}%")))
            .order(questions::published_at.desc())
            .select(models::QuestionRow::as_select())
            .load(self)?;
        Ok(rows.into_iter().map(Question::from).collect())
    }

    fn choices_of(&mut self, question: QuestionId) -> Result<Vec<Choice>, StoreError> {
        let rows = choices::table
            .filter(choices::question_id.eq(question.0))
            .order(choices::id.asc())
            .select(models::ChoiceRow::as_select())
            .load(self)?;
        Ok(rows.into_iter().map(Choice::from).collect())
    }

    fn choice_count(&mut self, question: QuestionId) -> Result<i64, StoreError> {
        let count = choices::table
            .filter(choices::question_id.eq(question.0))
            .count()
            .get_result(self)?;
        Ok(count)
    }

    fn add_vote(&mut self, choice: ChoiceId) -> Result<(), StoreError> {
        // single UPDATE, never read-then-write from here
        let updated = diesel::update(choices::table.filter(choices::id.eq(choice.0)))
            .set(choices::vote_count.eq(choices::vote_count + 1))
            .execute(self)?;
        if updated == 0 {
            return Err(error::store_missing_row("choice"));
        }
        Ok(())
    }

    fn insert_question(&mut self, question: CreateQuestion) -> Result<Question, StoreError> {
        let row = diesel::insert_into(questions::table)
            .values(models::NewQuestionRow::from(question))
            .returning(models::QuestionRow::as_returning())
            .get_result(self)?;
        Ok(row.into())
    }

    fn insert_choice(&mut self, question: QuestionId, choice: CreateChoice) -> Result<Choice, StoreError> {
        let row = diesel::insert_into(choices::table)
            .values(models::NewChoiceRow::from(question, choice))
            .returning(models::ChoiceRow::as_returning())
            .get_result(self)?;
        Ok(row.into())
    }

    fn insert_question_with_choices(
        &mut self,
        question: CreateQuestion,
        choices: Vec<CreateChoice>,
    ) -> Result<(Question, Vec<Choice>), StoreError> {
        // one transaction; a failed choice insert rolls the question back
        self.transaction(|conn| {
            let question = conn.insert_question(question)?;
            let mut created = Vec::with_capacity(choices.len());
            for choice in choices {
                created.push(conn.insert_choice(question.id, choice)?);
            }
            Ok((question, created))
        })
    }

    fn delete_question(&mut self, id: QuestionId) -> Result<bool, StoreError> {
        // the choices go with it via the schema's ON DELETE CASCADE
        let deleted = diesel::delete(questions::table.filter(questions::id.eq(id.0)))
            .execute(self)?;
        Ok(deleted > 0)
    }
}
