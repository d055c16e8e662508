use serde_json::Value;

use crate::client::ClozeClient;
use crate::endpoint;
use crate::error::Result;
use crate::params::ParamsBuilder;

/// Settings of the authenticated user: custom fields, segments, stages,
/// steps and views.
#[derive(Debug, Clone, Copy)]
pub struct Account<'a> {
    client: &'a ClozeClient,
}

impl<'a> Account<'a> {
    pub fn new(client: &'a ClozeClient) -> Self {
        Self { client }
    }

    /// Custom fields, optionally limited to `person`, `project` or `company`.
    pub fn get_fields(&self, relationtype: Option<&str>) -> Result<Value> {
        let params = ParamsBuilder::new()
            .optional_str("relationtype", relationtype)
            .build();
        self.client.call(&endpoint::ACCOUNT_FIELDS, Some(params))
    }

    pub fn get_profile(&self) -> Result<Value> {
        self.client.call(&endpoint::ACCOUNT_PROFILE, None)
    }

    pub fn get_segments_people(&self) -> Result<Value> {
        self.client.call(&endpoint::ACCOUNT_SEGMENTS_PEOPLE, None)
    }

    pub fn get_segments_projects(&self) -> Result<Value> {
        self.client.call(&endpoint::ACCOUNT_SEGMENTS_PROJECTS, None)
    }

    pub fn get_stages_people(&self) -> Result<Value> {
        self.client.call(&endpoint::ACCOUNT_STAGES_PEOPLE, None)
    }

    pub fn get_stages_projects(&self) -> Result<Value> {
        self.client.call(&endpoint::ACCOUNT_STAGES_PROJECTS, None)
    }

    pub fn get_steps(&self) -> Result<Value> {
        self.client.call(&endpoint::ACCOUNT_STEPS, None)
    }

    /// Views and audiences.
    pub fn get_views(&self) -> Result<Value> {
        self.client.call(&endpoint::ACCOUNT_VIEWS, None)
    }
}
