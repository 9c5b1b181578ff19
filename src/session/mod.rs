pub mod participant;
pub mod quiz;
pub mod result;
pub mod timer;

use thiserror::Error;

/// A rejected user action. The session is left exactly as it was.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name cannot be empty.")]
    EmptyName,
    #[error("Name can only contain alphabetic characters and spaces.")]
    InvalidName,
    #[error("Roll number cannot be empty.")]
    EmptyRoll,
    #[error("Roll number must be numeric.")]
    NonNumericRoll,
    #[error("Roll number cannot be 0.")]
    ZeroRoll,
    #[error("Please select a valid option before submitting.")]
    NoOptionSelected,
    #[error("This question has already been answered.")]
    AlreadyAnswered,
    #[error("Submit an answer before moving on.")]
    NotAnswered,
    #[error("The quiz is already over.")]
    QuizFinished,
}
