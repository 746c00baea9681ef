//! The logged-in user of the client session

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Current session user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: Snowflake,
}
