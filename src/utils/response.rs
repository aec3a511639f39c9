use serde::Serialize;

use crate::utils::pagination::Pagination;

/// Standard response envelope: `{status, message, data}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: &'static str,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, message: &str) -> Self {
        Self {
            status: "success",
            message: message.to_string(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: &str) -> Self {
        Self {
            status: "success",
            message: message.to_string(),
            data: None,
        }
    }
}

/// Envelope for paginated collections, with the extra `pagination` block.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    pub status: &'static str,
    pub message: String,
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T: Serialize> PaginatedResponse<T> {
    pub fn success(data: Vec<T>, pagination: Pagination, message: &str) -> Self {
        Self {
            status: "success",
            message: message.to_string(),
            data,
            pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let response = ApiResponse::success(42, "Operation Done");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], "success");
        assert_eq!(json["message"], "Operation Done");
        assert_eq!(json["data"], 42);
    }

    #[test]
    fn test_message_only_envelope_has_null_data() {
        let response = ApiResponse::message("Deleted");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], "success");
        assert!(json["data"].is_null());
    }

    #[test]
    fn test_paginated_envelope_shape() {
        let response = PaginatedResponse::success(
            vec![1, 2, 3],
            Pagination::new(3, 3, 15, 1),
            "Operation Success",
        );
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["data"].as_array().unwrap().len(), 3);
        assert_eq!(json["pagination"]["total"], 3);
        assert_eq!(json["pagination"]["per_page"], 15);
        assert_eq!(json["pagination"]["current_page"], 1);
        assert_eq!(json["pagination"]["total_pages"], 1);
    }
}
