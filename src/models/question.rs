use serde::{Deserialize, Serialize};

/// One answered question of the adaptive tree, echoed back by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionStep {
    pub question: String,
    pub answer: String,
}

/// The whole server-visible state of a quiz in progress. Nothing is stored
/// between calls; the client sends the path every round.
#[derive(Debug, Clone)]
pub struct QuestionTreeState<'a> {
    pub path: &'a [QuestionStep],
    pub max_steps: usize,
}

impl<'a> QuestionTreeState<'a> {
    pub fn new(path: &'a [QuestionStep], max_steps: usize) -> Self {
        Self { path, max_steps }
    }

    pub fn step(&self) -> usize {
        self.path.len() + 1
    }

    pub fn is_terminal(&self) -> bool {
        self.step() > self.max_steps
    }

    pub fn last_answer(&self) -> Option<&str> {
        self.path.last().map(|s| s.answer.as_str())
    }

    pub fn asked_questions(&self) -> impl Iterator<Item = &str> {
        self.path.iter().map(|s| s.question.as_str())
    }
}
