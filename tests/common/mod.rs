#![allow(dead_code)]

use async_trait::async_trait;
use medisage::{Instructor, LLMClient, MediSageError, parse_structured};
use std::sync::Mutex;

/// What a [`ScriptedClient`] does when asked for a reply.
pub enum Reply {
    /// Return this body, parsed exactly like a real backend reply
    Json(String),
    /// Fail with this error without producing a body
    Fail(MediSageError),
    /// Never answer
    Pending,
}

/// In-memory backend that records every prompt it receives.
pub struct ScriptedClient {
    reply: Reply,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(body: impl Into<String>) -> Self {
        Self::new(Reply::Json(body.into()))
    }

    pub fn replying_causes(text: &str) -> Self {
        Self::replying(serde_json::json!({ "potentialCauses": text }).to_string())
    }

    pub fn failing(error: MediSageError) -> Self {
        Self::new(Reply::Fail(error))
    }

    pub fn pending() -> Self {
        Self::new(Reply::Pending)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn last_prompt(&self) -> String {
        self.prompts().pop().expect("backend was never called")
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl LLMClient for ScriptedClient {
    async fn materialize<T>(&self, prompt: &str) -> medisage::Result<T>
    where
        T: Instructor + Send + 'static,
    {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Reply::Json(body) => parse_structured::<T>(body),
            Reply::Fail(error) => Err(error.clone()),
            Reply::Pending => std::future::pending().await,
        }
    }
}
