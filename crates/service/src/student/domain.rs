use serde::{Deserialize, Serialize};

/// A student record as seen by callers.
///
/// `id` is assigned by the store; it defaults to `0` when a payload omits it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(default)]
    pub id: i32,
    pub username: Option<String>,
    pub mail: Option<String>,
    pub phone_number: Option<String>,
    pub hobby: Option<String>,
    pub skillsets: Option<String>,
}

impl Student {
    pub fn named(username: impl Into<String>) -> Self {
        Self { username: Some(username.into()), ..Self::default() }
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }
}

impl From<models::student::Model> for Student {
    fn from(m: models::student::Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            mail: m.mail,
            phone_number: m.phone_number,
            hobby: m.hobby,
            skillsets: m.skillsets,
        }
    }
}
