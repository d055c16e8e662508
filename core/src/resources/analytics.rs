use serde::Serialize;
use serde_json::Value;

use crate::client::ClozeClient;
use crate::endpoint::{self, Endpoint};
use crate::error::Result;
use crate::params::{to_value, ParamsBuilder};

/// Analytics queries. Each query method takes a map of named query
/// definitions, sent as-is under the `queries` body field.
#[derive(Debug, Clone, Copy)]
pub struct Analytics<'a> {
    client: &'a ClozeClient,
}

impl<'a> Analytics<'a> {
    pub fn new(client: &'a ClozeClient) -> Self {
        Self { client }
    }

    /// User activity for individual reporting periods.
    pub fn query_activity<Q: Serialize + ?Sized>(&self, queries: &Q) -> Result<Value> {
        self.query(&endpoint::ANALYTICS_ACTIVITY, queries)
    }

    /// Funnel information (beta).
    pub fn query_funnel<Q: Serialize + ?Sized>(&self, queries: &Q) -> Result<Value> {
        self.query(&endpoint::ANALYTICS_FUNNEL, queries)
    }

    pub fn query_leads<Q: Serialize + ?Sized>(&self, queries: &Q) -> Result<Value> {
        self.query(&endpoint::ANALYTICS_LEADS, queries)
    }

    pub fn query_projects<Q: Serialize + ?Sized>(&self, queries: &Q) -> Result<Value> {
        self.query(&endpoint::ANALYTICS_PROJECTS, queries)
    }

    pub fn query_team_activity<Q: Serialize + ?Sized>(&self, queries: &Q) -> Result<Value> {
        self.query(&endpoint::ANALYTICS_TEAM_ACTIVITY, queries)
    }

    /// Status of the last team activity refresh.
    pub fn get_team_activity_update(&self) -> Result<Value> {
        self.client.call(&endpoint::ANALYTICS_TEAM_ACTIVITY_UPDATE, None)
    }

    fn query<Q: Serialize + ?Sized>(&self, endpoint: &Endpoint, queries: &Q) -> Result<Value> {
        let params = ParamsBuilder::new().required("queries", to_value(queries)?).build();
        self.client.call(endpoint, Some(params))
    }
}
