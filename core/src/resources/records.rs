//! Companies, projects and people share one record API: create, update,
//! get, delete, find and feed under `/v1/<collection>/...`.

use serde::Serialize;
use serde_json::Value;

use crate::client::ClozeClient;
use crate::endpoint::{self, Endpoint};
use crate::error::Result;
use crate::params::{to_params, Params, ParamsBuilder};
use crate::resources::options::{FeedOptions, FindOptions};

/// The six endpoints of one record collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordEndpoints {
    pub create: Endpoint,
    pub update: Endpoint,
    pub get: Endpoint,
    pub delete: Endpoint,
    pub find: Endpoint,
    pub feed: Endpoint,
}

pub const COMPANIES: RecordEndpoints = RecordEndpoints {
    create: endpoint::COMPANIES_CREATE,
    update: endpoint::COMPANIES_UPDATE,
    get: endpoint::COMPANIES_GET,
    delete: endpoint::COMPANIES_DELETE,
    find: endpoint::COMPANIES_FIND,
    feed: endpoint::COMPANIES_FEED,
};

pub const PROJECTS: RecordEndpoints = RecordEndpoints {
    create: endpoint::PROJECTS_CREATE,
    update: endpoint::PROJECTS_UPDATE,
    get: endpoint::PROJECTS_GET,
    delete: endpoint::PROJECTS_DELETE,
    find: endpoint::PROJECTS_FIND,
    feed: endpoint::PROJECTS_FEED,
};

pub const PEOPLE: RecordEndpoints = RecordEndpoints {
    create: endpoint::PEOPLE_CREATE,
    update: endpoint::PEOPLE_UPDATE,
    get: endpoint::PEOPLE_GET,
    delete: endpoint::PEOPLE_DELETE,
    find: endpoint::PEOPLE_FIND,
    feed: endpoint::PEOPLE_FEED,
};

/// A record collection bound to a client, e.g. `client.companies()`.
#[derive(Debug, Clone, Copy)]
pub struct Records<'a> {
    client: &'a ClozeClient,
    endpoints: &'static RecordEndpoints,
}

impl<'a> Records<'a> {
    pub fn new(client: &'a ClozeClient, endpoints: &'static RecordEndpoints) -> Self {
        Self { client, endpoints }
    }

    /// Create a record, or merge into an existing one with a matching
    /// identifier. The mapping is sent as the request body.
    pub fn create<T: Serialize + ?Sized>(&self, record: &T) -> Result<Value> {
        self.client.call(&self.endpoints.create, Some(to_params(record)?))
    }

    /// Merge updates into an existing record.
    pub fn update<T: Serialize + ?Sized>(&self, record: &T) -> Result<Value> {
        self.client.call(&self.endpoints.update, Some(to_params(record)?))
    }

    /// Fetch one record by identifier (domain, email, direct id, ...).
    pub fn get(&self, identifier: &str, identifier_type: Option<&str>) -> Result<Value> {
        self.client
            .call(&self.endpoints.get, Some(identify(identifier, identifier_type)))
    }

    pub fn delete(&self, identifier: &str, identifier_type: Option<&str>) -> Result<Value> {
        self.client
            .call(&self.endpoints.delete, Some(identify(identifier, identifier_type)))
    }

    /// Search with query, sort and paging options.
    pub fn find(&self, options: FindOptions) -> Result<Value> {
        self.client.call(&self.endpoints.find, Some(options.into_params()))
    }

    /// Fetch one page of the bulk feed.
    pub fn feed(&self, options: FeedOptions) -> Result<Value> {
        self.client.call(&self.endpoints.feed, Some(options.into_params()))
    }
}

fn identify(identifier: &str, identifier_type: Option<&str>) -> Params {
    ParamsBuilder::new()
        .required("identifier", identifier)
        .optional_str("identifier_type", identifier_type)
        .build()
}
