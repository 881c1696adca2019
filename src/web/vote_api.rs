use serde::Deserialize;
use uuid::Uuid;
use warp::http::{StatusCode, Uri};
use warp::reply::{self, Reply, Response};

use crate::error::{VoteError, NO_CHOICE_MESSAGE};
use crate::polls::{ops, ChoiceId, PollStore, QuestionId};
use super::db::establish_connection;
use super::models::DetailContext;

/// The voting form. Browsers omit the field entirely when no radio button
/// is checked, hence the Option; the value is kept as text so a garbled
/// submission still reaches the no-selection handling instead of a bare 400.
#[derive(Deserialize)]
pub struct VoteForm {
    pub choice: Option<String>,
}

impl VoteForm {
    /// A missing field and an unparsable value both count as no selection.
    pub fn selected_choice(&self) -> Option<ChoiceId> {
        self.choice.as_deref()
            .and_then(|raw| raw.trim().parse().ok())
            .map(ChoiceId)
    }
}

pub fn vote(question_id: Uuid, form: VoteForm) -> Response {
    let conn = &mut establish_connection();
    match ops::record_vote(conn, QuestionId(question_id), form.selected_choice()) {
        Ok(receipt) => results_redirect(receipt.question_id),
        Err(VoteError::QuestionNotFound(_)) => {
            reply::with_status("No question found", StatusCode::NOT_FOUND).into_response()
        },
        Err(VoteError::NoSelection { question } | VoteError::InvalidSelection { question, .. }) => {
            // nothing was recorded; show the form again with the message
            match conn.choices_of(question.id) {
                Ok(choices) => {
                    let context = DetailContext::new(question, choices, Some(String::from(NO_CHOICE_MESSAGE)));
                    reply::json(&context).into_response()
                },
                Err(err) => {
                    tracing::error!("failed to reload choices of question {question_id}: {err}");
                    reply::with_status("Failed to load question", StatusCode::INTERNAL_SERVER_ERROR)
                        .into_response()
                },
            }
        },
        Err(VoteError::Store(err)) => {
            tracing::error!("failed to record vote on question {question_id}: {err}");
            reply::with_status("Failed to record vote", StatusCode::INTERNAL_SERVER_ERROR)
                .into_response()
        },
    }
}

fn results_redirect(question_id: QuestionId) -> Response {
    match Uri::try_from(format!("/polls/{question_id}/results")) {
        Ok(uri) => warp::redirect::see_other(uri).into_response(),
        Err(err) => {
            tracing::error!("invalid redirect target for question {question_id}: {err}");
            reply::with_status("Failed to record vote", StatusCode::INTERNAL_SERVER_ERROR)
                .into_response()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(choice: Option<&str>) -> VoteForm {
        VoteForm { choice: choice.map(String::from) }
    }

    #[test]
    fn parses_a_numeric_choice() {
        assert_eq!(form(Some("7")).selected_choice(), Some(ChoiceId(7)));
        assert_eq!(form(Some(" 7 ")).selected_choice(), Some(ChoiceId(7)));
    }

    #[test]
    fn missing_choice_counts_as_no_selection() {
        assert_eq!(form(None).selected_choice(), None);
    }

    #[test]
    fn garbled_choice_counts_as_no_selection() {
        assert_eq!(form(Some("abc")).selected_choice(), None);
        assert_eq!(form(Some("")).selected_choice(), None);
        assert_eq!(form(Some("7.5")).selected_choice(), None);
    }
}
