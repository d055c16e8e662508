//! Endpoint table for the Cloze REST API.
//!
//! Each [`Endpoint`] fixes the HTTP method, the path and where the request
//! parameters travel. Resource modules only pick an entry and hand over a
//! parameter mapping; `ClozeClient::call` does the rest.

use crate::http::HttpMethod;

/// Where an endpoint's parameter mapping is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// The endpoint takes no parameters.
    None,
    /// Parameters are encoded into the query string.
    Query,
    /// Parameters are serialized as the JSON request body.
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub name: &'static str,
    pub method: HttpMethod,
    pub path: &'static str,
    pub payload: Payload,
}

macro_rules! endpoints {
    ($($ident:ident => $name:literal, $method:ident, $path:literal, $payload:ident;)*) => {
        $(
            pub const $ident: Endpoint = Endpoint {
                name: $name,
                method: HttpMethod::$method,
                path: $path,
                payload: Payload::$payload,
            };
        )*

        /// Every known endpoint, in table order.
        pub const ALL: &[Endpoint] = &[$($ident),*];
    };
}

endpoints! {
    ANALYTICS_ACTIVITY => "analytics.query_activity", Post, "/v1/analytics/activity", Body;
    ANALYTICS_FUNNEL => "analytics.query_funnel", Post, "/v1/analytics/funnel", Body;
    ANALYTICS_LEADS => "analytics.query_leads", Post, "/v1/analytics/leads", Body;
    ANALYTICS_PROJECTS => "analytics.query_projects", Post, "/v1/analytics/projects", Body;
    ANALYTICS_TEAM_ACTIVITY => "analytics.query_team_activity", Post, "/v1/analytics/teamactivity", Body;
    ANALYTICS_TEAM_ACTIVITY_UPDATE => "analytics.get_team_activity_update", Get, "/v1/analytics/teamactivity/update", None;

    COMPANIES_CREATE => "companies.create", Post, "/v1/companies/create", Body;
    COMPANIES_UPDATE => "companies.update", Post, "/v1/companies/update", Body;
    COMPANIES_GET => "companies.get", Get, "/v1/companies/get", Query;
    COMPANIES_DELETE => "companies.delete", Delete, "/v1/companies/delete", Query;
    COMPANIES_FIND => "companies.find", Get, "/v1/companies/find", Query;
    COMPANIES_FEED => "companies.feed", Get, "/v1/companies/feed", Query;

    TEAM_MEMBERS_LIST => "team.list_members", Get, "/v1/team/members/list", None;
    TEAM_MEMBERS_UPDATE => "team.update_members", Post, "/v1/team/members/update", Body;
    TEAM_NODES => "team.get_nodes", Get, "/v1/team/nodes", None;
    TEAM_ROLES => "team.get_roles", Get, "/v1/team/roles", None;

    TIMELINE_COMMUNICATION_CREATE => "timeline.create_communication", Post, "/v1/timeline/communication/create", Body;
    TIMELINE_CONTENT_CREATE => "timeline.create_content", Post, "/v1/timeline/content/create", Body;
    TIMELINE_TODO_CREATE => "timeline.create_todo", Post, "/v1/timeline/todo/create", Body;
    MESSAGES_OPENS => "timeline.get_message_opens", Get, "/v1/messages/opens", Query;

    ACCOUNT_FIELDS => "account.get_fields", Get, "/v1/user/fields", Query;
    ACCOUNT_PROFILE => "account.get_profile", Get, "/v1/user/profile", None;
    ACCOUNT_SEGMENTS_PEOPLE => "account.get_segments_people", Get, "/v1/user/segments/people", None;
    ACCOUNT_SEGMENTS_PROJECTS => "account.get_segments_projects", Get, "/v1/user/segments/projects", None;
    ACCOUNT_STAGES_PEOPLE => "account.get_stages_people", Get, "/v1/user/stages/people", None;
    ACCOUNT_STAGES_PROJECTS => "account.get_stages_projects", Get, "/v1/user/stages/projects", None;
    ACCOUNT_STEPS => "account.get_steps", Get, "/v1/user/steps", None;
    ACCOUNT_VIEWS => "account.get_views", Get, "/v1/user/views", None;

    PROJECTS_CREATE => "projects.create", Post, "/v1/projects/create", Body;
    PROJECTS_UPDATE => "projects.update", Post, "/v1/projects/update", Body;
    PROJECTS_GET => "projects.get", Get, "/v1/projects/get", Query;
    PROJECTS_DELETE => "projects.delete", Delete, "/v1/projects/delete", Query;
    PROJECTS_FIND => "projects.find", Get, "/v1/projects/find", Query;
    PROJECTS_FEED => "projects.feed", Get, "/v1/projects/feed", Query;

    PEOPLE_CREATE => "people.create", Post, "/v1/people/create", Body;
    PEOPLE_UPDATE => "people.update", Post, "/v1/people/update", Body;
    PEOPLE_GET => "people.get", Get, "/v1/people/get", Query;
    PEOPLE_DELETE => "people.delete", Delete, "/v1/people/delete", Query;
    PEOPLE_FIND => "people.find", Get, "/v1/people/find", Query;
    PEOPLE_FEED => "people.feed", Get, "/v1/people/feed", Query;
}

/// Look up an endpoint by its `module.operation` name.
pub fn by_name(name: &str) -> Option<&'static Endpoint> {
    ALL.iter().find(|e| e.name == name)
}
