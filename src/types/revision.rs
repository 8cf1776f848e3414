use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable record of one publish on a version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision {
    pub id: String,
    pub message: String,
    pub time: DateTime<Utc>,
    pub user: String,
}

/// Order revisions latest first. Stable, so equal timestamps keep the input order.
pub fn sort_latest_first(revisions: &mut [Revision]) {
    revisions.sort_by(|a, b| b.time.cmp(&a.time));
}
