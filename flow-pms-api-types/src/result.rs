use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JsonError {
    pub error_message: String,
}

/// Success envelope shared by every endpoint. The HTTP layer owns the
/// message text; `query` and `count` are filled where they make sense.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
            query: None,
            count: None,
        }
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn envelope_omits_absent_fields() {
        let response = ApiResponse::ok(vec![1, 2, 3], "done");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert!(json.get("query").is_none());
        assert!(json.get("count").is_none());
    }

    #[test]
    fn envelope_carries_query_and_count() {
        let response = ApiResponse::ok((), "done").query("alpha").count(4);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["query"], "alpha");
        assert_eq!(json["count"], 4);
    }
}
