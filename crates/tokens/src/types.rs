use serde::{Deserialize, Serialize};

/// One device's persisted balance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub device_id: String,
    pub hopla_tokens: u64,
    #[serde(default)]
    pub total_wins: u64,
    #[serde(default)]
    pub last_score: u64,
    /// Unix time in milliseconds.
    #[serde(default)]
    pub last_updated: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveUserDataRequest {
    pub device_id: String,
    pub hopla_tokens: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u64>,
}

/// Envelope shared by every API response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_on_the_wire() {
        let json = serde_json::to_value(UserRecord {
            device_id: "device_a".into(),
            hopla_tokens: 3,
            total_wins: 2,
            last_score: 5,
            last_updated: 1_700_000_000_000,
        })
        .unwrap();
        assert_eq!(json["deviceId"], "device_a");
        assert_eq!(json["hoplaTokens"], 3);
        assert_eq!(json["totalWins"], 2);
        assert_eq!(json["lastScore"], 5);
        assert_eq!(json["lastUpdated"], 1_700_000_000_000u64);
    }

    #[test]
    fn failures_omit_data() {
        let json = serde_json::to_value(ApiResponse::<UserRecord>::failure("User not found")).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "error": "User not found"}));
    }

    #[test]
    fn sparse_records_still_parse() {
        let record: UserRecord =
            serde_json::from_str(r#"{"deviceId":"d","hoplaTokens":1}"#).unwrap();
        assert_eq!(record.total_wins, 0);
    }
}
