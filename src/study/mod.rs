//! Study material built from ranked keywords and sentences:
//! flashcards, cloze quizzes and the revision plan.

pub mod context;
pub mod flashcards;
pub mod plan;
pub mod quiz;

pub use context::{best_context, contains_ci, find_ci, replace_ci, BLANK};
pub use flashcards::build_flashcards;
pub use plan::{build_plan, DAY_TIPS};
pub use quiz::{build_options, build_quiz_with_rng, QuizBuilder, OPTIONS_PER_QUESTION};
