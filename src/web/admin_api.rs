use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
use warp::http::StatusCode;
use warp::reply::{self, Reply, Response};

use crate::error::{StoreError, ValidationError};
use crate::polls::{
    CreateChoice, CreateQuestion, PollStore, QuestionId,
    UnvalidatedCreateChoice, UnvalidatedCreateQuestion,
};
use super::db::establish_connection;
use super::models::{AdminQuestionContext, ChoiceContext, DetailContext};

#[derive(Deserialize)]
pub struct CreateQuestionBody {
    pub question_text: String,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub choices: Vec<String>,
}

#[derive(Deserialize)]
pub struct CreateChoiceBody {
    pub choice_text: String,
}

#[derive(Deserialize)]
pub struct QuestionListQuery {
    pub search: Option<String>,
    pub published_on: Option<NaiveDate>,
}

/// Creates a question together with its inline choices.
pub fn create_question(body: CreateQuestionBody) -> Response {
    let CreateQuestionBody { question_text, published_at, choices } = body;

    let question = match CreateQuestion::try_from(UnvalidatedCreateQuestion { question_text, published_at }) {
        Ok(question) => question,
        Err(err) => return validation_failure(err),
    };
    // validate every inline choice before touching the database
    let mut validated = Vec::with_capacity(choices.len());
    for choice_text in choices {
        match CreateChoice::try_from(UnvalidatedCreateChoice { choice_text }) {
            Ok(choice) => validated.push(choice),
            Err(err) => return validation_failure(err),
        }
    }

    let conn = &mut establish_connection();
    let (question, created) = match conn.insert_question_with_choices(question, validated) {
        Ok(pair) => pair,
        Err(err) => return store_failure("create question", err),
    };

    tracing::info!("created question {}", question.id);
    let context = DetailContext::new(question, created, None);
    reply::with_status(reply::json(&context), StatusCode::CREATED).into_response()
}

/// Lists questions with their choice counts, optionally narrowed by a text
/// search or a publication date.
pub fn list_questions(query: QuestionListQuery) -> Response {
    let conn = &mut establish_connection();
    let result = match &query.search {
        Some(needle) => conn.search_questions(needle),
        None => conn.questions(),
    };
    let mut questions = match result {
        Ok(questions) => questions,
        Err(err) => return store_failure("list questions", err),
    };
    if let Some(day) = query.published_on {
        questions.retain(|q| q.published_at.date_naive() == day);
    }

    let now = Utc::now();
    let mut rows = Vec::with_capacity(questions.len());
    for question in questions {
        let number_of_choices = match conn.choice_count(question.id) {
            Ok(count) => count,
            Err(err) => return store_failure("count choices", err),
        };
        rows.push(AdminQuestionContext::new(question, number_of_choices, now));
    }
    reply::json(&rows).into_response()
}

pub fn add_choice(question_id: Uuid, body: CreateChoiceBody) -> Response {
    let choice = match CreateChoice::try_from(UnvalidatedCreateChoice { choice_text: body.choice_text }) {
        Ok(choice) => choice,
        Err(err) => return validation_failure(err),
    };

    let conn = &mut establish_connection();
    match conn.question(QuestionId(question_id)) {
        Ok(Some(question)) => match conn.insert_choice(question.id, choice) {
            Ok(created) => {
                reply::with_status(reply::json(&ChoiceContext::from(created)), StatusCode::CREATED)
                    .into_response()
            },
            Err(err) => store_failure("create choice", err),
        },
        Ok(None) => reply::with_status("No question found", StatusCode::NOT_FOUND).into_response(),
        Err(err) => store_failure("load question", err),
    }
}

pub fn delete_question(question_id: Uuid) -> Response {
    let conn = &mut establish_connection();
    match conn.delete_question(QuestionId(question_id)) {
        Ok(true) => {
            tracing::info!("deleted question {question_id}");
            reply::json(&json!({ "status": "deleted" })).into_response()
        },
        Ok(false) => reply::with_status("No question found", StatusCode::NOT_FOUND).into_response(),
        Err(err) => store_failure("delete question", err),
    }
}

fn validation_failure(err: ValidationError) -> Response {
    reply::with_status(
        reply::json(&json!({ "error": err.to_string() })),
        StatusCode::BAD_REQUEST,
    ).into_response()
}

fn store_failure(action: &str, err: StoreError) -> Response {
    tracing::error!("failed to {action}: {err}");
    reply::with_status(
        reply::json(&json!({ "error": format!("Failed to {action}") })),
        StatusCode::INTERNAL_SERVER_ERROR,
    ).into_response()
}
