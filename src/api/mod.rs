pub mod calendar;
pub mod dashboard;
pub mod lectures;
pub mod login;
pub mod scan;

use serde::Deserialize;
use utoipa::IntoParams;

/// Query string carried by every read endpoint.
#[derive(Deserialize, IntoParams)]
pub struct UidQuery {
    /// Student uid, as returned by login.
    pub uid: Option<u64>,
}
