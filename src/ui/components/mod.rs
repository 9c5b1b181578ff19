pub mod dashboard;
pub mod progress_bar;
pub mod question_card;
pub mod welcome_form;
