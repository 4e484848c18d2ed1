use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Roster entry status. There is no transition graph; any value may move
/// to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Suspended,
    Reactivated,
}

impl UserStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(UserStatus::Active),
            "suspended" => Some(UserStatus::Suspended),
            "reactivated" => Some(UserStatus::Reactivated),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Suspended => "suspended",
            UserStatus::Reactivated => "reactivated",
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Roster entry. Multiple entries may share a studentId; a status update
/// applies to every one of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub student_id: String,
    pub role: String,
    pub status: UserStatus,
}

impl User {
    pub const COLLECTION: &'static str = "users";

    /// New roster entries always start out active.
    pub fn new(student_id: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            role: role.into(),
            status: UserStatus::Active,
        }
    }

    pub fn into_fields(self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("studentId".into(), Value::String(self.student_id));
        fields.insert("role".into(), Value::String(self.role));
        fields.insert("status".into(), Value::String(self.status.as_str().to_string()));
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_known_statuses_only() {
        assert_eq!(UserStatus::parse("active"), Some(UserStatus::Active));
        assert_eq!(UserStatus::parse("suspended"), Some(UserStatus::Suspended));
        assert_eq!(UserStatus::parse("reactivated"), Some(UserStatus::Reactivated));
        assert_eq!(UserStatus::parse("banned"), None);
        assert_eq!(UserStatus::parse(""), None);
        assert_eq!(UserStatus::parse("Active"), None);
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_value(UserStatus::Reactivated).unwrap(), json!("reactivated"));
    }

    #[test]
    fn new_users_start_active() {
        let user = User::new("S1001", "student");
        assert_eq!(user.status, UserStatus::Active);

        let fields = user.into_fields();
        assert_eq!(fields["status"], "active");
        assert_eq!(fields["studentId"], "S1001");
        assert_eq!(fields["role"], "student");
    }
}
