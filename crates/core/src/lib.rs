#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod growth;
pub mod model;
pub mod quiz;
pub mod time;

pub use error::Error;
pub use quiz::{Advance, QuizError, QuizPhase, QuizSession, QuizSnapshot};
pub use time::Clock;
