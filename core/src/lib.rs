//! Blocking client for the Cloze CRM REST API.
//!
//! # Overview
//! Every API call goes through one dispatcher, [`ClozeClient::make_request`],
//! which encodes query parameters or a JSON body, sends the request once,
//! and returns the decoded JSON value. Resource modules ([`Analytics`],
//! [`Records`] for companies/projects/people, [`Team`], [`Timeline`],
//! [`Account`]) are thin wrappers that pick an entry from the [`endpoint`]
//! table.
//!
//! ```no_run
//! use cloze_sdk::{ClozeClient, FeedOptions};
//!
//! # fn main() -> cloze_sdk::Result<()> {
//! let client = ClozeClient::from_env()?;
//! let company = client.companies().get("acme.com", None)?;
//! let page = client.companies().feed(FeedOptions::new().scope("team"))?;
//! println!("{company}\n{page}");
//! # Ok(())
//! # }
//! ```
//!
//! # Design
//! - The client holds only immutable configuration and a [`Transport`];
//!   clones share both and concurrent calls need no locking.
//! - Optional arguments that are unset never appear in the request.
//! - Failures are one of transport (no response), API (status and payload),
//!   or encoding (nothing was sent). See [`ClozeError`].

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod params;
pub mod resources;
pub mod transport;

pub use client::ClozeClient;
pub use config::ClientConfig;
pub use endpoint::{Endpoint, Payload};
pub use error::{ApiError, ApiErrorKind, ClozeError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use params::{Params, ParamsBuilder};
pub use resources::{Account, Analytics, FeedOptions, FindOptions, Records, Team, Timeline};
pub use transport::{Transport, UreqTransport};
