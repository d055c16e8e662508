use serde::Serialize;
use serde_json::Value;

use crate::client::ClozeClient;
use crate::endpoint;
use crate::error::Result;
use crate::params::{to_params, ParamsBuilder};

/// Timeline items and message tracking.
#[derive(Debug, Clone, Copy)]
pub struct Timeline<'a> {
    client: &'a ClozeClient,
}

impl<'a> Timeline<'a> {
    pub fn new(client: &'a ClozeClient) -> Self {
        Self { client }
    }

    /// Record an email, call, meeting or other communication.
    pub fn create_communication<T: Serialize + ?Sized>(&self, communication: &T) -> Result<Value> {
        self.client
            .call(&endpoint::TIMELINE_COMMUNICATION_CREATE, Some(to_params(communication)?))
    }

    pub fn create_content<T: Serialize + ?Sized>(&self, content: &T) -> Result<Value> {
        self.client
            .call(&endpoint::TIMELINE_CONTENT_CREATE, Some(to_params(content)?))
    }

    pub fn create_todo<T: Serialize + ?Sized>(&self, todo: &T) -> Result<Value> {
        self.client
            .call(&endpoint::TIMELINE_TODO_CREATE, Some(to_params(todo)?))
    }

    /// Email opens, optionally starting at `from` (UTC milliseconds) and
    /// limited to one user.
    pub fn get_message_opens(&self, from: Option<i64>, user: Option<&str>) -> Result<Value> {
        let params = ParamsBuilder::new()
            .optional("from", from)
            .optional_str("user", user)
            .build();
        self.client.call(&endpoint::MESSAGES_OPENS, Some(params))
    }
}
