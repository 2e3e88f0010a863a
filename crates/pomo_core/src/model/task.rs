use serde::{Deserialize, Serialize};

/// A tracked piece of work. Identity is positional: tasks are addressed by
/// their index in the store's ordered list, there is no stable id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    #[serde(default)]
    pub sessions: u64,
}

impl Task {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            sessions: 0,
        }
    }
}
