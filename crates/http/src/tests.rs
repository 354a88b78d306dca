#[cfg(test)]
mod tests {
    use axum::http::{header, StatusCode};
    use axum::response::IntoResponse;
    use serde_json::json;

    use crate::error::{ErrorResponse, FieldError};
    use crate::schema::safe_parse;

    #[test]
    fn test_field_error_construction() {
        let error = FieldError::new("email", "Email is required");
        assert_eq!(error.field, "email");
        assert_eq!(error.message, "Email is required");
    }

    #[test]
    fn test_new_with_status_only() {
        let err = ErrorResponse::new(StatusCode::BAD_REQUEST);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.errors().is_empty());
        assert!(err.title().is_none());
        assert!(err.message().is_none());
    }

    #[test]
    fn test_builder_with_status_only() {
        let err = ErrorResponse::builder(StatusCode::NOT_FOUND).build();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert!(err.errors().is_empty());
    }

    #[test]
    fn test_builder_with_all_methods() {
        let err = ErrorResponse::builder(StatusCode::NOT_FOUND)
            .errors(vec![FieldError::new("id", "ID not found")])
            .title("Not Found")
            .message("Resource not found")
            .build();

        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.title(), Some("Not Found"));
        assert_eq!(err.message(), Some("Resource not found"));
        assert_eq!(err.errors(), &[FieldError::new("id", "ID not found")]);
    }

    #[test]
    fn test_builder_chain_order_is_irrelevant() {
        let errors = vec![FieldError::new("email", "Invalid format")];

        let forward = ErrorResponse::builder(StatusCode::UNPROCESSABLE_ENTITY)
            .errors(errors.clone())
            .title("Validation Failed")
            .message("Input validation error")
            .build();
        let reverse = ErrorResponse::builder(StatusCode::UNPROCESSABLE_ENTITY)
            .message("Input validation error")
            .title("Validation Failed")
            .errors(errors)
            .build();

        assert_eq!(forward.body(), reverse.body());
    }

    #[test]
    fn test_body_serialization() {
        let err = ErrorResponse::builder(StatusCode::BAD_REQUEST)
            .errors(vec![FieldError::new("name", "Name is required")])
            .title("Bad Request")
            .message("Invalid input")
            .build();

        let body = serde_json::to_value(err.body()).unwrap();
        assert_eq!(
            body,
            json!({
                "status": 400,
                "title": "Bad Request",
                "message": "Invalid input",
                "errors": [{"field": "name", "message": "Name is required"}],
            })
        );
    }

    #[test]
    fn test_body_omits_absent_title_and_message() {
        let body = serde_json::to_value(ErrorResponse::new(StatusCode::BAD_REQUEST).body()).unwrap();
        assert_eq!(body, json!({"status": 400, "errors": []}));
    }

    #[test]
    fn test_into_response_sets_status_and_content_type() {
        let err = ErrorResponse::builder(StatusCode::BAD_REQUEST)
            .title("Bad Request")
            .message("Invalid input")
            .build();

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
    }

    #[test]
    fn test_schema_accepts_valid_body() {
        let value = json!({
            "status": 400,
            "title": "Bad Request",
            "message": "Invalid input",
            "errors": [{"field": "email", "message": "Email is required"}],
        });

        let body = safe_parse(&value).unwrap();
        assert_eq!(body.status, 400);
        assert_eq!(body.title.as_deref(), Some("Bad Request"));
        assert_eq!(body.errors.len(), 1);
    }

    #[test]
    fn test_schema_accepts_empty_errors() {
        let value = json!({
            "status": 500,
            "title": "Internal Error",
            "message": "Something went wrong",
            "errors": [],
        });
        assert!(safe_parse(&value).is_ok());
    }

    #[test]
    fn test_schema_rejects_out_of_range_status() {
        let value = json!({
            "status": 99,
            "title": "Error",
            "message": "Message",
            "errors": [],
        });

        let violations = safe_parse(&value).unwrap_err();
        assert!(violations.iter().any(|v| v.path == "status"));
    }

    #[test]
    fn test_schema_rejects_missing_title_and_message() {
        let value = json!({"status": 400, "errors": []});

        let violations = safe_parse(&value).unwrap_err();
        assert!(violations.iter().any(|v| v.path == "title"));
        assert!(violations.iter().any(|v| v.path == "message"));
    }

    #[test]
    fn test_schema_rejects_malformed_field_errors() {
        let value = json!({
            "status": 400,
            "title": "Bad Request",
            "message": "Invalid input",
            "errors": [{"field": "email"}],
        });

        let violations = safe_parse(&value).unwrap_err();
        assert!(violations.iter().any(|v| v.path == "errors.0.message"));
    }

    #[test]
    fn test_build_then_parse_round_trip() {
        let err = ErrorResponse::builder(StatusCode::UNPROCESSABLE_ENTITY)
            .title("Validation Error")
            .message("Request validation failed")
            .errors(vec![
                FieldError::new("email", "Email is required"),
                FieldError::new("password", "Password too weak"),
            ])
            .build();

        let value = serde_json::to_value(err.body()).unwrap();
        let parsed = safe_parse(&value).unwrap();
        assert_eq!(parsed.status, 422);
        assert_eq!(parsed.errors.len(), 2);
    }
}
