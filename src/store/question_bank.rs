use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::store::schema::{Question, QuestionRecord};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read question bank {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("question bank {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("question {index} in {path} is invalid: {reason}")]
    InvalidRecord {
        path: PathBuf,
        index: usize,
        reason: String,
    },
}

/// The full, immutable pool of questions a quiz samples from.
#[derive(Clone, Debug, Default)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Read and validate a JSON array of question records. Any bad record
    /// rejects the whole file.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content, path)
    }

    /// Like [`QuestionBank::load`], but a failure degrades to an empty bank.
    /// The error is handed back so the caller can show it.
    pub fn load_or_empty(path: &Path) -> (Self, Option<LoadError>) {
        match Self::load(path) {
            Ok(bank) => {
                tracing::info!(path = %path.display(), questions = bank.len(), "loaded question bank");
                (bank, None)
            }
            Err(err) => {
                tracing::error!(path = %path.display(), error = %err, "question bank unavailable");
                (Self::default(), Some(err))
            }
        }
    }

    fn from_json(content: &str, path: &Path) -> Result<Self, LoadError> {
        let records: Vec<QuestionRecord> =
            serde_json::from_str(content).map_err(|source| LoadError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let mut questions = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            let question = Question::try_from(record).map_err(|reason| LoadError::InvalidRecord {
                path: path.to_path_buf(),
                index,
                reason,
            })?;
            if question.options.len() < 2 {
                tracing::warn!(index, "question has a single option");
            }
            questions.push(question);
        }
        Ok(Self { questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Draw `min(cap, len)` distinct questions in random order: a partial
    /// Fisher-Yates shuffle truncated to the sample size.
    pub fn sample<R: Rng + ?Sized>(&self, cap: usize, rng: &mut R) -> Vec<Question> {
        let k = cap.min(self.questions.len());
        let mut pool = self.questions.clone();
        let (chosen, _) = pool.partial_shuffle(rng, k);
        chosen.to_vec()
    }
}
