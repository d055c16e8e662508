//! Options for the `find` and `feed` record endpoints.

use serde_json::Value;

use crate::params::{Params, ParamsBuilder};

/// Search options for `find`.
///
/// Merge order, last write wins on colliding keys: `extra`, then `query`,
/// then `pagenumber`, `pagesize` and `countonly`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindOptions {
    pub query: Option<Params>,
    pub pagenumber: Option<u32>,
    pub pagesize: Option<u32>,
    pub countonly: Option<bool>,
    pub extra: Params,
}

impl FindOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: Params) -> Self {
        self.query = Some(query);
        self
    }

    pub fn page(mut self, pagenumber: u32, pagesize: u32) -> Self {
        self.pagenumber = Some(pagenumber);
        self.pagesize = Some(pagesize);
        self
    }

    pub fn count_only(mut self, countonly: bool) -> Self {
        self.countonly = Some(countonly);
        self
    }

    /// Any additional query parameter not covered above.
    pub fn param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }

    pub(crate) fn into_params(self) -> Params {
        ParamsBuilder::from_params(self.extra)
            .merge(self.query.unwrap_or_default())
            .optional("pagenumber", self.pagenumber)
            .optional("pagesize", self.pagesize)
            .optional("countonly", self.countonly)
            .build()
    }
}

/// Cursor-based bulk retrieval options for `feed`. One call fetches one
/// page; pass the returned cursor back to continue.
///
/// Empty strings count as unset. Named options override `extra` on
/// colliding keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedOptions {
    pub cursor: Option<String>,
    pub segment: Option<String>,
    pub stage: Option<String>,
    pub scope: Option<String>,
    pub extra: Params,
}

impl FeedOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segment = Some(segment.into());
        self
    }

    pub fn stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = Some(stage.into());
        self
    }

    /// e.g. `team` or `local`.
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }

    pub(crate) fn into_params(self) -> Params {
        ParamsBuilder::from_params(self.extra)
            .optional_str("cursor", self.cursor.as_deref())
            .optional_str("segment", self.segment.as_deref())
            .optional_str("stage", self.stage.as_deref())
            .optional_str("scope", self.scope.as_deref())
            .build()
    }
}
