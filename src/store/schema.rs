use serde::{Deserialize, Serialize};

/// One entry of the question bank file, as written on disk.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

/// A validated question. The correct option is stored by position so the
/// session never compares free text after loading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<String>,
    pub answer_index: usize,
}

impl Question {
    pub fn new(prompt: &str, options: &[&str], answer: &str) -> Result<Self, String> {
        Self::try_from(QuestionRecord {
            question: prompt.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            answer: answer.to_string(),
        })
    }

    pub fn answer(&self) -> &str {
        &self.options[self.answer_index]
    }

    pub fn is_correct(&self, option: usize) -> bool {
        option == self.answer_index
    }
}

impl TryFrom<QuestionRecord> for Question {
    type Error = String;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        if record.options.is_empty() {
            return Err("question has no options".to_string());
        }
        let answer_index = record
            .options
            .iter()
            .position(|o| *o == record.answer)
            .ok_or_else(|| format!("answer {:?} is not one of the options", record.answer))?;
        Ok(Self {
            prompt: record.question,
            options: record.options,
            answer_index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(answer: &str, options: &[&str]) -> QuestionRecord {
        QuestionRecord {
            question: "Which keyword defines a function?".to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            answer: answer.to_string(),
        }
    }

    #[test]
    fn test_record_with_member_answer_converts() {
        let q = Question::try_from(record("def", &["func", "def", "fn"])).unwrap();
        assert_eq!(q.answer_index, 1);
        assert_eq!(q.answer(), "def");
        assert!(q.is_correct(1));
        assert!(!q.is_correct(0));
    }

    #[test]
    fn test_record_with_foreign_answer_rejected() {
        let err = Question::try_from(record("lambda", &["func", "def"])).unwrap_err();
        assert!(err.contains("lambda"));
    }

    #[test]
    fn test_record_without_options_rejected() {
        assert!(Question::try_from(record("def", &[])).is_err());
    }

    #[test]
    fn test_record_deserializes_from_bank_json() {
        let json = r#"{"question": "2 + 2?", "options": ["3", "4"], "answer": "4"}"#;
        let rec: QuestionRecord = serde_json::from_str(json).unwrap();
        let q = Question::try_from(rec).unwrap();
        assert_eq!(q.prompt, "2 + 2?");
        assert_eq!(q.answer_index, 1);
    }
}
