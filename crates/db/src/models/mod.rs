pub mod attempt;
pub mod challenge;
pub mod user;

pub use attempt::{Attempt, ChallengeCompletion};
pub use challenge::{Challenge, Difficulty};
pub use user::User;
