mod picker;
mod session;

pub use picker::pick_next;
pub use session::{AnswerOutcome, EmptyPoolReason, QuizSession};
