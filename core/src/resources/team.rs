use serde::Serialize;
use serde_json::Value;

use crate::client::ClozeClient;
use crate::endpoint;
use crate::error::Result;
use crate::params::{to_value, ParamsBuilder};

#[derive(Debug, Clone, Copy)]
pub struct Team<'a> {
    client: &'a ClozeClient,
}

impl<'a> Team<'a> {
    pub fn new(client: &'a ClozeClient) -> Self {
        Self { client }
    }

    pub fn list_members(&self) -> Result<Value> {
        self.client.call(&endpoint::TEAM_MEMBERS_LIST, None)
    }

    /// Apply a list of member updates, sent under the `members` body field.
    pub fn update_members<M: Serialize + ?Sized>(&self, members: &M) -> Result<Value> {
        let params = ParamsBuilder::new().required("members", to_value(members)?).build();
        self.client.call(&endpoint::TEAM_MEMBERS_UPDATE, Some(params))
    }

    /// Organizational nodes of the team.
    pub fn get_nodes(&self) -> Result<Value> {
        self.client.call(&endpoint::TEAM_NODES, None)
    }

    pub fn get_roles(&self) -> Result<Value> {
        self.client.call(&endpoint::TEAM_ROLES, None)
    }
}
