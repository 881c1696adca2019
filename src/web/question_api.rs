use chrono::Utc;
use uuid::Uuid;
use warp::http::StatusCode;
use warp::reply::{self, Reply, Response};

use crate::error::LookupError;
use crate::polls::{ops, PollStore, QuestionId};
use super::db::establish_connection;
use super::models::{DetailContext, IndexContext, ResultsContext};

pub fn index() -> Response {
    let conn = &mut establish_connection();
    match ops::list_visible_questions(conn, Utc::now()) {
        Ok(questions) => reply::json(&IndexContext::new(questions)).into_response(),
        Err(err) => {
            tracing::error!("failed to load question index: {err}");
            reply::with_status("Failed to load questions", StatusCode::INTERNAL_SERVER_ERROR)
                .into_response()
        },
    }
}

pub fn detail(question_id: Uuid) -> Response {
    let conn = &mut establish_connection();
    let question = match ops::get_visible_question(conn, QuestionId(question_id), Utc::now()) {
        Ok(question) => question,
        Err(err) => return lookup_failure(err, question_id),
    };

    match conn.choices_of(question.id) {
        Ok(choices) => reply::json(&DetailContext::new(question, choices, None)).into_response(),
        Err(err) => {
            tracing::error!("failed to load choices of question {question_id}: {err}");
            reply::with_status("Failed to load question", StatusCode::INTERNAL_SERVER_ERROR)
                .into_response()
        },
    }
}

pub fn results(question_id: Uuid) -> Response {
    let conn = &mut establish_connection();
    let question = match ops::get_question_for_results(conn, QuestionId(question_id), Utc::now()) {
        Ok(question) => question,
        Err(err) => return lookup_failure(err, question_id),
    };

    match conn.choices_of(question.id) {
        Ok(choices) => reply::json(&ResultsContext::new(question, choices)).into_response(),
        Err(err) => {
            tracing::error!("failed to load results of question {question_id}: {err}");
            reply::with_status("Failed to load results", StatusCode::INTERNAL_SERVER_ERROR)
                .into_response()
        },
    }
}

fn lookup_failure(err: LookupError, question_id: Uuid) -> Response {
    match err {
        LookupError::NotFound => {
            reply::with_status("No question found", StatusCode::NOT_FOUND).into_response()
        },
        LookupError::Store(err) => {
            tracing::error!("failed to load question {question_id}: {err}");
            reply::with_status("Failed to load question", StatusCode::INTERNAL_SERVER_ERROR)
                .into_response()
        },
    }
}
