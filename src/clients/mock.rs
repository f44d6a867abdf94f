use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::{core::LowLevelClient, error::ModelCallError};

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(String),
    Failure(String),
}

/// Controls a [`MockClient`]: queue replies, inspect received prompts.
#[derive(Debug, Default)]
pub struct MockHandle {
    responses: Mutex<VecDeque<MockResponse>>,
    prompts: Mutex<Vec<String>>,
}

impl MockHandle {
    pub fn add_response(&self, response: MockResponse) {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(response);
        }
    }

    pub fn add_responses(&self, responses: impl IntoIterator<Item = MockResponse>) {
        for response in responses {
            self.add_response(response);
        }
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    pub fn remaining(&self) -> usize {
        self.responses.lock().map(|q| q.len()).unwrap_or(0)
    }

    fn next(&self, prompt: String) -> Result<String, ModelCallError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt);
        }
        let next = self.responses.lock().ok().and_then(|mut q| q.pop_front());
        match next {
            Some(MockResponse::Success(text)) => Ok(text),
            Some(MockResponse::Failure(message)) => Err(ModelCallError::Mock(message)),
            None => Err(ModelCallError::Mock("no scripted response left".to_string())),
        }
    }
}

/// Mock client for testing that replays scripted responses in order
#[derive(Debug, Clone)]
pub struct MockClient {
    handle: Arc<MockHandle>,
}

impl MockClient {
    pub fn new() -> (Self, Arc<MockHandle>) {
        let handle = Arc::new(MockHandle::default());
        (Self { handle: handle.clone() }, handle)
    }

    pub fn with_responses(responses: Vec<MockResponse>) -> (Self, Arc<MockHandle>) {
        let (client, handle) = Self::new();
        handle.add_responses(responses);
        (client, handle)
    }
}

#[async_trait]
impl LowLevelClient for MockClient {
    async fn ask_raw(&self, prompt: String) -> Result<String, ModelCallError> {
        self.handle.next(prompt)
    }

    fn clone_box(&self) -> Box<dyn LowLevelClient> {
        Box::new(self.clone())
    }
}

const SAMPLE_RESPONSES: [&str; 3] = [
    r#"Here is your question:
```json
{"question": "Which document formally authorizes the existence of a project?",
 "choices": ["A. Project charter", "B. Project management plan", "C. Business case", "D. Stakeholder register"],
 "answer": 0,
 "explanation": "The charter authorizes the project and gives the project manager authority to apply resources."}
```"#,
    r#"{"question": "A team member repeatedly misses stand-ups. What should an agile project leader do first?",
 "choices": {"D": "Escalate to the functional manager", "A": "Remove the member from the team", "B": "Talk with the member privately to understand the cause", "C": "Cancel stand-ups"},
 "correct": "b)",
 "explanation": "Servant leaders first seek to understand and remove impediments.",
 "rationales": {"A": "Punitive and premature.", "B": "Addresses the root cause.", "C": "Harms team transparency.", "D": "Skips direct conversation."}}"#,
    r#"Sure! {'question': 'Which tool compares planned value, earned value and actual cost?', 'options': ['Earned value analysis', 'Monte Carlo simulation', 'Critical path method', 'Pareto chart',], 'answer': 'A', 'explanation': 'EVA integrates scope, schedule and cost measures.'}"#,
];

/// Offline client cycling through built-in sample responses.
#[derive(Debug, Clone, Default)]
pub struct SampleClient {
    cursor: Arc<Mutex<usize>>,
}

#[async_trait]
impl LowLevelClient for SampleClient {
    async fn ask_raw(&self, _prompt: String) -> Result<String, ModelCallError> {
        let mut cursor = self
            .cursor
            .lock()
            .map_err(|_| ModelCallError::Mock("sample cursor poisoned".to_string()))?;
        let text = SAMPLE_RESPONSES[*cursor % SAMPLE_RESPONSES.len()];
        *cursor += 1;
        Ok(text.to_string())
    }

    fn clone_box(&self) -> Box<dyn LowLevelClient> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::question_from_raw;

    #[test]
    fn every_sample_response_yields_a_question() {
        for raw in SAMPLE_RESPONSES {
            let question = question_from_raw(raw).unwrap();
            assert!(!question.prompt_text().is_empty());
        }
    }

    #[tokio::test]
    async fn sample_client_cycles_through_responses() {
        let client = SampleClient::default();
        let mut seen = Vec::new();
        for _ in 0..=SAMPLE_RESPONSES.len() {
            seen.push(client.ask_raw(String::new()).await.unwrap());
        }
        assert_eq!(seen[0], SAMPLE_RESPONSES[0]);
        assert_eq!(seen[SAMPLE_RESPONSES.len()], SAMPLE_RESPONSES[0]);
    }

    #[tokio::test]
    async fn scripted_responses_are_consumed_in_order() {
        let (client, handle) = MockClient::with_responses(vec![
            MockResponse::Success("first".to_string()),
            MockResponse::Failure("boom".to_string()),
        ]);
        assert_eq!(handle.remaining(), 2);
        assert_eq!(client.ask_raw("p1".to_string()).await.unwrap(), "first");
        assert!(matches!(client.ask_raw("p2".to_string()).await, Err(ModelCallError::Mock(m)) if m == "boom"));
        assert_eq!(handle.remaining(), 0);
        assert!(client.ask_raw("p3".to_string()).await.is_err());
        assert_eq!(handle.prompts(), ["p1", "p2", "p3"]);
    }
}
