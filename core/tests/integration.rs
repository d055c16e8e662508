//! End-to-end runs of the client against the mock server.
//!
//! # Design
//! Starts the mock server on a random port in a background runtime, then
//! drives the blocking client over real HTTP through `UreqTransport`. The
//! server's request log shows exactly what went over the wire.

use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use cloze_sdk::{
    ApiErrorKind, ClientConfig, ClozeClient, ClozeError, FeedOptions, FindOptions, HttpMethod,
};
use mock_server::{MockState, RecordedRequest};
use serde_json::{json, Value};

/// Start the mock server on a random port and return its base URL.
fn start_server() -> (String, MockState) {
    let std_listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    let state = MockState::new();
    let server_state = state.clone();
    thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, server_state).await
        })
        .unwrap();
    });

    (format!("http://{addr}"), state)
}

fn client_for(base_url: &str) -> ClozeClient {
    let config = ClientConfig::new("integration-key")
        .with_base_url(base_url)
        .with_timeout(Duration::from_secs(5));
    ClozeClient::with_config(config).unwrap()
}

fn setup() -> (ClozeClient, MockState) {
    let (base_url, state) = start_server();
    (client_for(&base_url), state)
}

type Call<'a> = Box<dyn Fn(&ClozeClient) -> cloze_sdk::Result<Value> + 'a>;

fn call<'a>(f: impl Fn(&ClozeClient) -> cloze_sdk::Result<Value> + 'a) -> Call<'a> {
    Box::new(f)
}

fn last(state: &MockState) -> RecordedRequest {
    state.last_request().expect("no request reached the server")
}

fn has_query_key(req: &RecordedRequest, key: &str) -> bool {
    req.query.iter().any(|(k, _)| k == key)
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn companies_get_without_identifier_type() {
    let (client, state) = setup();

    let result = client.companies().get("acme.com", None).unwrap();

    let req = last(&state);
    assert_eq!(req.method, "GET");
    assert_eq!(req.path, "/v1/companies/get");
    assert_eq!(req.query, vec![("identifier".to_string(), "acme.com".to_string())]);
    assert!(!has_query_key(&req, "identifier_type"));
    assert!(req.body.is_none());
    assert_eq!(req.header("authorization"), Some("Bearer integration-key"));
    assert_eq!(req.header("accept"), Some("application/json"));

    // The decoded response comes back unchanged.
    assert_eq!(result["path"], "/v1/companies/get");
    assert_eq!(result["errorcode"], 0);
}

#[test]
fn companies_get_with_identifier_type() {
    let (client, state) = setup();

    client.companies().get("acme.com", Some("domain")).unwrap();

    let req = last(&state);
    assert_eq!(req.query_value("identifier_type"), Some("domain"));
}

#[test]
fn analytics_query_activity_sends_queries_body() {
    let (client, state) = setup();
    let queries = json!({"q1": {"period": "month", "users": ["me"]}});

    client.analytics().query_activity(&queries).unwrap();

    let req = last(&state);
    assert_eq!(req.method, "POST");
    assert_eq!(req.path, "/v1/analytics/activity");
    assert_eq!(req.body, Some(json!({"queries": {"q1": {"period": "month", "users": ["me"]}}})));
    assert!(req.query.is_empty());
    assert_eq!(req.header("content-type"), Some("application/json"));
}

#[test]
fn companies_feed_with_cursor_only() {
    let (client, state) = setup();

    client.companies().feed(FeedOptions::new().cursor("abc")).unwrap();

    let req = last(&state);
    assert_eq!(req.method, "GET");
    assert_eq!(req.path, "/v1/companies/feed");
    assert_eq!(req.query, vec![("cursor".to_string(), "abc".to_string())]);
    for key in ["segment", "stage", "scope"] {
        assert!(!has_query_key(&req, key), "{key} should be absent");
    }
}

#[test]
fn companies_find_merges_all_sources() {
    let (client, state) = setup();
    let query = json!({"freeformquery": "acme", "sort": "name"})
        .as_object()
        .cloned()
        .unwrap();

    client
        .companies()
        .find(
            FindOptions::new()
                .param("sort", "created")
                .param("pagesize", 1)
                .param("include", "audit")
                .query(query)
                .page(3, 20)
                .count_only(true),
        )
        .unwrap();

    let req = last(&state);
    assert_eq!(req.path, "/v1/companies/find");
    assert_eq!(req.query_value("include"), Some("audit"));
    assert_eq!(req.query_value("sort"), Some("name"));
    assert_eq!(req.query_value("freeformquery"), Some("acme"));
    assert_eq!(req.query_value("pagenumber"), Some("3"));
    assert_eq!(req.query_value("pagesize"), Some("20"));
    assert_eq!(req.query_value("countonly"), Some("true"));
    assert_eq!(req.query.len(), 6);
}

#[test]
fn timeline_message_opens_omits_unset_filters() {
    let (client, state) = setup();

    client.timeline().get_message_opens(None, None).unwrap();
    assert!(last(&state).query.is_empty());

    client
        .timeline()
        .get_message_opens(Some(1_700_000_000_000), Some("me@example.com"))
        .unwrap();
    let req = last(&state);
    assert_eq!(req.path, "/v1/messages/opens");
    assert_eq!(req.query_value("from"), Some("1700000000000"));
    assert_eq!(req.query_value("user"), Some("me@example.com"));
}

#[test]
fn team_update_members_wraps_list() {
    let (client, state) = setup();
    let members = vec![json!({"email": "a@example.com", "role": "admin"})];

    client.team().update_members(&members).unwrap();

    let req = last(&state);
    assert_eq!(req.path, "/v1/team/members/update");
    assert_eq!(req.body, Some(json!({"members": [{"email": "a@example.com", "role": "admin"}]})));
}

#[test]
fn record_create_sends_mapping_as_body() {
    let (client, state) = setup();

    client
        .people()
        .create(&json!({"name": "Ada Lovelace", "emails": [{"value": "ada@example.com"}]}))
        .unwrap();

    let req = last(&state);
    assert_eq!(req.path, "/v1/people/create");
    assert_eq!(req.body.unwrap()["name"], "Ada Lovelace");
}

// ---------------------------------------------------------------------------
// Endpoint routing
// ---------------------------------------------------------------------------

#[test]
fn every_wrapper_hits_its_documented_route() {
    let (client, state) = setup();
    let q = json!({"q": {}});
    let record = json!({"name": "x"});

    let calls: Vec<(&str, &str, Call<'_>)> = vec![
        ("POST", "/v1/analytics/activity", call(|c| c.analytics().query_activity(&q))),
        ("POST", "/v1/analytics/funnel", call(|c| c.analytics().query_funnel(&q))),
        ("POST", "/v1/analytics/leads", call(|c| c.analytics().query_leads(&q))),
        ("POST", "/v1/analytics/projects", call(|c| c.analytics().query_projects(&q))),
        ("POST", "/v1/analytics/teamactivity", call(|c| c.analytics().query_team_activity(&q))),
        ("GET", "/v1/analytics/teamactivity/update", call(|c| c.analytics().get_team_activity_update())),
        ("POST", "/v1/companies/create", call(|c| c.companies().create(&record))),
        ("POST", "/v1/companies/update", call(|c| c.companies().update(&record))),
        ("GET", "/v1/companies/get", call(|c| c.companies().get("acme.com", None))),
        ("DELETE", "/v1/companies/delete", call(|c| c.companies().delete("acme.com", None))),
        ("GET", "/v1/companies/find", call(|c| c.companies().find(FindOptions::new()))),
        ("GET", "/v1/companies/feed", call(|c| c.companies().feed(FeedOptions::new()))),
        ("GET", "/v1/team/members/list", call(|c| c.team().list_members())),
        ("POST", "/v1/team/members/update", call(|c| c.team().update_members(&Vec::<Value>::new()))),
        ("GET", "/v1/team/nodes", call(|c| c.team().get_nodes())),
        ("GET", "/v1/team/roles", call(|c| c.team().get_roles())),
        ("POST", "/v1/timeline/communication/create", call(|c| c.timeline().create_communication(&record))),
        ("POST", "/v1/timeline/content/create", call(|c| c.timeline().create_content(&record))),
        ("POST", "/v1/timeline/todo/create", call(|c| c.timeline().create_todo(&record))),
        ("GET", "/v1/messages/opens", call(|c| c.timeline().get_message_opens(None, None))),
        ("GET", "/v1/user/fields", call(|c| c.account().get_fields(Some("company")))),
        ("GET", "/v1/user/fields", call(|c| c.account().get_fields(None))),
        ("GET", "/v1/user/profile", call(|c| c.account().get_profile())),
        ("GET", "/v1/user/segments/people", call(|c| c.account().get_segments_people())),
        ("GET", "/v1/user/segments/projects", call(|c| c.account().get_segments_projects())),
        ("GET", "/v1/user/stages/people", call(|c| c.account().get_stages_people())),
        ("GET", "/v1/user/stages/projects", call(|c| c.account().get_stages_projects())),
        ("GET", "/v1/user/steps", call(|c| c.account().get_steps())),
        ("GET", "/v1/user/views", call(|c| c.account().get_views())),
        ("POST", "/v1/projects/create", call(|c| c.projects().create(&record))),
        ("DELETE", "/v1/projects/delete", call(|c| c.projects().delete("p1", Some("direct")))),
        ("GET", "/v1/people/feed", call(|c| c.people().feed(FeedOptions::new().scope("team")))),
    ];

    let mut seen = Vec::new();
    for (method, path, run) in &calls {
        run(&client).unwrap_or_else(|e| panic!("{method} {path} failed: {e}"));
        let req = last(&state);
        assert_eq!((req.method.as_str(), req.path.as_str()), (*method, *path));
        if *method != "POST" {
            assert!(req.body.is_none(), "{path} must not send a body");
        }
        seen.push(req);
    }
    assert_eq!(state.requests().len(), calls.len());

    // Unset optional arguments never reach the wire.
    let query_of = |path: &str, pick: usize| {
        seen.iter().filter(|r| r.path == path).nth(pick).unwrap().query.clone()
    };
    assert_eq!(query_of("/v1/user/fields", 0), vec![("relationtype".to_string(), "company".to_string())]);
    assert!(query_of("/v1/user/fields", 1).is_empty());
    assert_eq!(query_of("/v1/companies/delete", 0), vec![("identifier".to_string(), "acme.com".to_string())]);
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn non_success_status_is_api_error() {
    let (client, state) = setup();
    state.respond(
        "/v1/companies/get",
        404,
        json!({"errorcode": 4, "message": "Company not found"}),
    );

    let err = client.companies().get("missing.example", None).unwrap_err();

    let api = err.as_api().expect("expected an API error");
    assert_eq!(api.status, 404);
    assert_eq!(api.errorcode, Some(4));
    assert_eq!(api.message, "Company not found");
    assert_eq!(api.kind(), ApiErrorKind::NotFound);
    assert!(!err.is_transport());
}

#[test]
fn server_error_without_body_keeps_status() {
    let (client, state) = setup();
    state.respond_empty("/v1/team/roles", 503);

    let err = client.team().get_roles().unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert_eq!(err.as_api().unwrap().kind(), ApiErrorKind::Server);
}

#[test]
fn nonzero_errorcode_with_200_is_api_error() {
    let (client, state) = setup();
    state.respond(
        "/v1/people/create",
        200,
        json!({"errorcode": 11, "message": "No identifiers available"}),
    );

    let err = client.people().create(&json!({"name": "Nobody"})).unwrap_err();
    let api = err.as_api().unwrap();
    assert_eq!(api.status, 200);
    assert_eq!(api.errorcode, Some(11));
}

#[test]
fn connection_refused_is_transport_error() {
    // Grab a free port, then release it so nothing is listening.
    let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let client = client_for(&format!("http://{addr}"));

    let err = client.team().list_members().unwrap_err();

    assert!(matches!(err, ClozeError::Transport(_)), "got {err:?}");
    assert!(err.is_transport());
    assert!(err.as_api().is_none());
}

#[test]
fn slow_response_times_out() {
    let (base_url, state) = start_server();
    state.delay("/v1/team/nodes", Duration::from_secs(3));
    let config = ClientConfig::new("integration-key")
        .with_base_url(&base_url)
        .with_timeout(Duration::from_millis(300));
    let client = ClozeClient::with_config(config).unwrap();

    let err = client.team().get_nodes().unwrap_err();

    assert!(matches!(err, ClozeError::Timeout(d) if d == Duration::from_millis(300)), "got {err:?}");
    assert!(err.is_transport());
}

#[test]
fn oversized_response_is_decoding_error() {
    let (base_url, state) = start_server();
    let config = ClientConfig::new("integration-key")
        .with_base_url(&base_url)
        .with_max_response_bytes(4 * 1024);
    let client = ClozeClient::with_config(config).unwrap();

    state.respond("/v1/companies/feed", 200, json!({"errorcode": 0, "list": "x".repeat(16 * 1024)}));
    let err = client.companies().feed(FeedOptions::new()).unwrap_err();
    assert!(matches!(err, ClozeError::Decoding(_)), "got {err:?}");
    assert!(!err.is_transport());

    // Within the limit the same page decodes normally.
    state.respond("/v1/companies/feed", 200, json!({"errorcode": 0, "list": "x".repeat(1024)}));
    let page = client.companies().feed(FeedOptions::new()).unwrap();
    assert_eq!(page["list"].as_str().unwrap().len(), 1024);
}

#[test]
fn unsendable_api_key_is_rejected_before_any_request() {
    let (base_url, state) = start_server();
    let config = ClientConfig::new("key\nwith-newline").with_base_url(&base_url);

    let err = ClozeClient::with_config(config).unwrap_err();

    assert!(matches!(err, ClozeError::Config(_)), "got {err:?}");
    assert!(!err.is_transport());
    assert!(state.requests().is_empty());
}

#[test]
fn encoding_error_sends_nothing() {
    let (client, state) = setup();
    let nested = json!({"filter": {"a": 1}}).as_object().cloned().unwrap();

    let err = client
        .make_request(HttpMethod::Get, "/v1/companies/find", Some(&nested), None)
        .unwrap_err();

    assert!(matches!(err, ClozeError::Encoding(_)));
    assert!(state.requests().is_empty());
}

// ---------------------------------------------------------------------------
// Sharing
// ---------------------------------------------------------------------------

#[test]
fn one_client_serves_concurrent_callers() {
    let (client, state) = setup();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let client = client.clone();
            thread::spawn(move || {
                client
                    .companies()
                    .get(&format!("company-{i}.example"), None)
                    .unwrap()
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let mut identifiers: Vec<_> = state
        .requests()
        .iter()
        .filter_map(|r| r.query_value("identifier").map(str::to_string))
        .collect();
    identifiers.sort();
    assert_eq!(identifiers.len(), 8);
    assert_eq!(identifiers[0], "company-0.example");
}
