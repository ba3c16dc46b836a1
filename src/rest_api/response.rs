//! # Response Formatting
//!
//! Success bodies for the data endpoints.

use serde::Serialize;
use uuid::Uuid;

/// Body returned after a record is created
#[derive(Debug, Clone, Serialize)]
pub struct CreateResponse {
    pub success: bool,
    pub id: Uuid,
    pub message: &'static str,
}

impl CreateResponse {
    pub fn new(id: Uuid) -> Self {
        Self {
            success: true,
            id,
            message: "Data saved successfully",
        }
    }
}

/// One page of records with the total match count
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub data: Vec<T>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

impl<T: Serialize> ListResponse<T> {
    pub fn new(data: Vec<T>, total: usize, limit: usize, offset: usize) -> Self {
        Self {
            data,
            total,
            limit,
            offset,
        }
    }
}

/// Delete acknowledgment
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: &'static str,
}

impl DeleteResponse {
    pub fn success() -> Self {
        Self {
            success: true,
            message: "Data deleted successfully",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_response_serialization() {
        let id = Uuid::new_v4();
        let json = serde_json::to_value(CreateResponse::new(id)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["id"], id.to_string());
        assert_eq!(json["message"], "Data saved successfully");
    }

    #[test]
    fn test_list_response_serialization() {
        let response = ListResponse::new(vec![json!({"id": 1}), json!({"id": 2})], 42, 2, 10);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
        assert_eq!(json["total"], 42);
        assert_eq!(json["limit"], 2);
        assert_eq!(json["offset"], 10);
    }

    #[test]
    fn test_delete_response_serialization() {
        let json = serde_json::to_value(DeleteResponse::success()).unwrap();
        assert_eq!(
            json,
            json!({"success": true, "message": "Data deleted successfully"})
        );
    }
}
