use chrono::{DateTime, Utc};

use crate::error::{LookupError, StoreError, VoteError};
use super::id::{ChoiceId, QuestionId};
use super::question::Question;
use super::store::PollStore;

/// How many questions the index shows at most.
pub const INDEX_PAGE_SIZE: i64 = 5;

/// Proof that a vote was recorded; tells the caller where to send the voter.
pub struct VoteReceipt {
    pub question_id: QuestionId,
}

/// Questions for the index: the newest five published ones, minus any that
/// have no choices. The page is cut to five before the choice filter runs,
/// so the index can show fewer than five entries even when older questions
/// with choices exist further down the list.
pub fn list_visible_questions<S: PollStore>(
    store: &mut S,
    now: DateTime<Utc>,
) -> Result<Vec<Question>, StoreError> {
    let newest = store.latest_published(now, INDEX_PAGE_SIZE)?;

    let mut visible = Vec::with_capacity(newest.len());
    for question in newest {
        if store.choice_count(question.id)? > 0 {
            visible.push(question);
        }
    }
    Ok(visible)
}

/// A single question for the detail view. Questions whose publication date
/// has not passed look exactly like missing ones.
pub fn get_visible_question<S: PollStore>(
    store: &mut S,
    id: QuestionId,
    now: DateTime<Utc>,
) -> Result<Question, LookupError> {
    match store.published_question(id, now)? {
        Some(question) => Ok(question),
        None => Err(LookupError::NotFound),
    }
}

/// Same visibility contract as the detail view, kept as its own operation.
pub fn get_question_for_results<S: PollStore>(
    store: &mut S,
    id: QuestionId,
    now: DateTime<Utc>,
) -> Result<Question, LookupError> {
    get_visible_question(store, id, now)
}

/// Records one vote for `selected` on the given question. The question must
/// exist but need not be published; the selection must name one of its own
/// choices. The count update itself is a single atomic store operation.
pub fn record_vote<S: PollStore>(
    store: &mut S,
    question_id: QuestionId,
    selected: Option<ChoiceId>,
) -> Result<VoteReceipt, VoteError> {
    let question = store.question(question_id)?
        .ok_or(VoteError::QuestionNotFound(question_id))?;

    let Some(choice_id) = selected else {
        return Err(VoteError::NoSelection { question });
    };

    let choices = store.choices_of(question.id)?;
    if !choices.iter().any(|c| c.id == choice_id) {
        return Err(VoteError::InvalidSelection { question, choice: choice_id });
    }

    store.add_vote(choice_id)?;
    Ok(VoteReceipt { question_id: question.id })
}
