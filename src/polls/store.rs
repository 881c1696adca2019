use chrono::{DateTime, Utc};

use crate::error::StoreError;
use super::choice::{Choice, CreateChoice};
use super::id::{ChoiceId, QuestionId};
use super::question::{CreateQuestion, Question};

/// The persistence collaborator. Every operation takes the store handle
/// explicitly; there is no ambient session anywhere in the crate.
pub trait PollStore {
    /// The newest questions with `published_at <= now`, descending by
    /// publication date, cut to `limit` rows.
    fn latest_published(&mut self, now: DateTime<Utc>, limit: i64) -> Result<Vec<Question>, StoreError>;

    /// A single question by id, constrained to `published_at <= now`.
    fn published_question(&mut self, id: QuestionId, now: DateTime<Utc>) -> Result<Option<Question>, StoreError>;

    /// A single question by id, regardless of publication date.
    fn question(&mut self, id: QuestionId) -> Result<Option<Question>, StoreError>;

    /// All questions, descending by publication date.
    fn questions(&mut self) -> Result<Vec<Question>, StoreError>;

    /// Questions whose text contains `needle`, case-insensitively.
    fn search_questions(&mut self, needle: &str) -> Result<Vec<Question>, StoreError>;

    fn choices_of(&mut self, question: QuestionId) -> Result<Vec<Choice>, StoreError>;

    fn choice_count(&mut self, question: QuestionId) -> Result<i64, StoreError>;

    /// Adds one vote to the choice as a single store-side update, so
    /// simultaneous votes cannot overwrite each other's counts.
    fn add_vote(&mut self, choice: ChoiceId) -> Result<(), StoreError>;

    fn insert_question(&mut self, question: CreateQuestion) -> Result<Question, StoreError>;

    fn insert_choice(&mut self, question: QuestionId, choice: CreateChoice) -> Result<Choice, StoreError>;

    /// Creates a question and its inline choices as one unit; either the
    /// question and every choice land, or nothing does.
    fn insert_question_with_choices(
        &mut self,
        question: CreateQuestion,
        choices: Vec<CreateChoice>,
    ) -> Result<(Question, Vec<Choice>), StoreError>;

    /// Removes the question and every choice attached to it. Returns false
    /// when no such question existed.
    fn delete_question(&mut self, id: QuestionId) -> Result<bool, StoreError>;
}

#[cfg(test)]
pub mod memory {
    use std::sync::{Arc, Mutex};

    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    use crate::error::{self, StoreError};
    use super::PollStore;
    use super::super::choice::{Choice, CreateChoice};
    use super::super::id::{ChoiceId, QuestionId};
    use super::super::question::{CreateQuestion, Question};

    /// In-memory store for tests. Clones share the underlying state, so a
    /// clone per thread models concurrent requests against one database.
    #[derive(Clone, Default)]
    pub struct MemoryStore {
        inner: Arc<Mutex<State>>,
    }

    #[derive(Default)]
    struct State {
        questions: Vec<Question>,
        choices: Vec<Choice>,
        next_choice_id: i32,
    }

    impl PollStore for MemoryStore {
        fn latest_published(&mut self, now: DateTime<Utc>, limit: i64) -> Result<Vec<Question>, StoreError> {
            let state = self.inner.lock().unwrap();
            let mut questions: Vec<Question> = state.questions.iter()
                .filter(|q| q.published_at <= now)
                .cloned()
                .collect();
            questions.sort_by(|a, b| b.published_at.cmp(&a.published_at));
            questions.truncate(limit as usize);
            Ok(questions)
        }

        fn published_question(&mut self, id: QuestionId, now: DateTime<Utc>) -> Result<Option<Question>, StoreError> {
            let state = self.inner.lock().unwrap();
            Ok(state.questions.iter()
                .find(|q| q.id == id && q.published_at <= now)
                .cloned())
        }

        fn question(&mut self, id: QuestionId) -> Result<Option<Question>, StoreError> {
            let state = self.inner.lock().unwrap();
            Ok(state.questions.iter().find(|q| q.id == id).cloned())
        }

        fn questions(&mut self) -> Result<Vec<Question>, StoreError> {
            let state = self.inner.lock().unwrap();
            let mut questions = state.questions.clone();
            questions.sort_by(|a, b| b.published_at.cmp(&a.published_at));
            Ok(questions)
        }

        fn search_questions(&mut self, needle: &str) -> Result<Vec<Question>, StoreError> {
            let needle = needle.to_lowercase();
            let state = self.inner.lock().unwrap();
            let mut questions: Vec<Question> = state.questions.iter()
                .filter(|q| q.question_text.to_lowercase().contains(&needle))
                .cloned()
                .collect();
            questions.sort_by(|a, b| b.published_at.cmp(&a.published_at));
            Ok(questions)
        }

        fn choices_of(&mut self, question: QuestionId) -> Result<Vec<Choice>, StoreError> {
            let state = self.inner.lock().unwrap();
            Ok(state.choices.iter()
                .filter(|c| c.question_id == question)
                .cloned()
                .collect())
        }

        fn choice_count(&mut self, question: QuestionId) -> Result<i64, StoreError> {
            let state = self.inner.lock().unwrap();
            Ok(state.choices.iter().filter(|c| c.question_id == question).count() as i64)
        }

        fn add_vote(&mut self, choice: ChoiceId) -> Result<(), StoreError> {
            // the increment happens under the state lock, mirroring the
            // atomicity of the production UPDATE
            let mut state = self.inner.lock().unwrap();
            match state.choices.iter_mut().find(|c| c.id == choice) {
                Some(choice) => {
                    choice.vote_count += 1;
                    Ok(())
                },
                None => Err(error::store_missing_row("choice")),
            }
        }

        fn insert_question(&mut self, question: CreateQuestion) -> Result<Question, StoreError> {
            let mut state = self.inner.lock().unwrap();
            let question = Question {
                id: QuestionId(Uuid::new_v4()),
                question_text: question.question_text,
                published_at: question.published_at,
            };
            state.questions.push(question.clone());
            Ok(question)
        }

        fn insert_choice(&mut self, question: QuestionId, choice: CreateChoice) -> Result<Choice, StoreError> {
            let mut state = self.inner.lock().unwrap();
            state.next_choice_id += 1;
            let choice = Choice {
                id: ChoiceId(state.next_choice_id),
                question_id: question,
                choice_text: choice.choice_text,
                vote_count: 0,
            };
            state.choices.push(choice.clone());
            Ok(choice)
        }

        fn insert_question_with_choices(
            &mut self,
            question: CreateQuestion,
            choices: Vec<CreateChoice>,
        ) -> Result<(Question, Vec<Choice>), StoreError> {
            // one lock acquisition for the whole batch
            let mut state = self.inner.lock().unwrap();
            let question = Question {
                id: QuestionId(Uuid::new_v4()),
                question_text: question.question_text,
                published_at: question.published_at,
            };
            state.questions.push(question.clone());
            let mut created = Vec::with_capacity(choices.len());
            for choice in choices {
                state.next_choice_id += 1;
                let choice = Choice {
                    id: ChoiceId(state.next_choice_id),
                    question_id: question.id,
                    choice_text: choice.choice_text,
                    vote_count: 0,
                };
                state.choices.push(choice.clone());
                created.push(choice);
            }
            Ok((question, created))
        }

        fn delete_question(&mut self, id: QuestionId) -> Result<bool, StoreError> {
            let mut state = self.inner.lock().unwrap();
            let before = state.questions.len();
            state.questions.retain(|q| q.id != id);
            let deleted = state.questions.len() < before;
            if deleted {
                state.choices.retain(|c| c.question_id != id);
            }
            Ok(deleted)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::memory::MemoryStore;
    use super::*;

    fn create_question(store: &mut MemoryStore, question_text: &str) -> Question {
        store.insert_question(CreateQuestion {
            question_text: String::from(question_text),
            published_at: Utc::now() - Duration::days(1),
        }).unwrap()
    }

    fn add_choice(store: &mut MemoryStore, question: QuestionId, choice_text: &str) -> Choice {
        store.insert_choice(question, CreateChoice {
            choice_text: String::from(choice_text),
        }).unwrap()
    }

    #[test]
    fn deleting_a_question_deletes_its_choices() {
        let mut store = MemoryStore::default();
        let question = create_question(&mut store, "Doomed question.");
        add_choice(&mut store, question.id, "Yes");
        add_choice(&mut store, question.id, "No");
        let survivor = create_question(&mut store, "Unrelated question.");
        add_choice(&mut store, survivor.id, "Maybe");

        assert!(store.delete_question(question.id).unwrap());

        assert!(store.question(question.id).unwrap().is_none());
        assert!(store.choices_of(question.id).unwrap().is_empty());
        // the other question keeps its choice
        assert_eq!(store.choice_count(survivor.id).unwrap(), 1);
    }

    #[test]
    fn deleting_an_unknown_question_reports_false() {
        let mut store = MemoryStore::default();
        let question = create_question(&mut store, "Short-lived question.");
        assert!(store.delete_question(question.id).unwrap());
        assert!(!store.delete_question(question.id).unwrap());
    }

    #[test]
    fn search_matches_question_text_case_insensitively() {
        let mut store = MemoryStore::default();
        let favorite = create_question(&mut store, "Favorite crate?");
        create_question(&mut store, "Lunch plans?");

        let found = store.search_questions("FAVORITE").unwrap();
        assert_eq!(found, vec![favorite]);
        assert!(store.search_questions("compiler").unwrap().is_empty());
    }

    #[test]
    fn question_and_inline_choices_are_created_together() {
        let mut store = MemoryStore::default();
        let (question, choices) = store.insert_question_with_choices(
            CreateQuestion {
                question_text: String::from("Favorite crate?"),
                published_at: Utc::now(),
            },
            vec![
                CreateChoice { choice_text: String::from("serde") },
                CreateChoice { choice_text: String::from("diesel") },
            ],
        ).unwrap();

        assert_eq!(choices.len(), 2);
        assert!(choices.iter().all(|c| c.question_id == question.id));
        assert_eq!(store.choices_of(question.id).unwrap(), choices);
    }
}
