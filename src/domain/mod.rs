pub mod achievement;
pub mod card;
pub mod progress;
pub mod review;
pub mod vocabulary;

pub use achievement::{Achievement, AchievementStatus, UnlockCondition, UnlockKind};
pub use card::ReviewCard;
pub use progress::{LearningDay, User, UserStats};
pub use review::{GradeError, QuizMode, RecallGrade, ReviewLog};
pub use vocabulary::{NewWord, Word};
