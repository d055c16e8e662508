//! Resource modules: one thin wrapper per API area.
//!
//! Every method follows the same shape. Required arguments are always
//! inserted, optional ones only when present, and the resulting mapping is
//! handed to `ClozeClient::call` with a fixed entry from the endpoint table.
//! The decoded response is returned unchanged.

mod account;
mod analytics;
mod options;
mod records;
mod team;
mod timeline;

pub use account::Account;
pub use analytics::Analytics;
pub use options::{FeedOptions, FindOptions};
pub use records::{RecordEndpoints, Records, COMPANIES, PEOPLE, PROJECTS};
pub use team::Team;
pub use timeline::Timeline;
