mod choice;
mod id;
pub mod ops;
mod question;
mod store;

pub use choice::{Choice, CreateChoice, UnvalidatedCreateChoice};
pub use id::{ChoiceId, QuestionId};
pub use question::{CreateQuestion, Question, UnvalidatedCreateQuestion};
pub use store::PollStore;
