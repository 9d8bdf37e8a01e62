//! API integration tests for file views and error handling.
//!
//! Tests verify:
//! - Full-file and ranged views
//! - Default file at `/`
//! - Validation, range, and not-found error pages
//! - HTTP status codes and headers

use axum::http::StatusCode;

use slice_viewer::slice::SliceService;
use slice_viewer::{create_router, RouterConfig};

use super::test_utils::{
    body_string, error_message, get, pre_content, router_for, FailingFileSource, MockFileSource,
};

fn abcd_router() -> axum::Router {
    let source = MockFileSource::new()
        .with_file("file1.txt", "a\nb\nc\nd")
        .with_file("two.txt", "a\nb");
    router_for(SliceService::new(source))
}

// =============================================================================
// Successful Views
// =============================================================================

#[tokio::test]
async fn test_view_full_file() {
    let response = get(abcd_router(), "/file1.txt").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "text/html; charset=utf-8"
    );
    assert_eq!(response.headers().get("x-slice-encoding").unwrap(), "UTF-8");

    let page = body_string(response).await;
    assert_eq!(pre_content(&page), "a\nb\nc\nd");
    assert!(page.contains("<h1>file1.txt</h1>"));
}

#[tokio::test]
async fn test_view_range() {
    let response = get(abcd_router(), "/file1.txt?start_line=1&end_line=2").await;
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_string(response).await;
    assert_eq!(pre_content(&page), "b\nc");
}

#[tokio::test]
async fn test_view_single_line() {
    let page = body_string(get(abcd_router(), "/file1.txt?start_line=3&end_line=3").await).await;
    assert_eq!(pre_content(&page), "d");
}

#[tokio::test]
async fn test_view_range_clipped_to_file() {
    let response = get(abcd_router(), "/file1.txt?start_line=2&end_line=50").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(pre_content(&body_string(response).await), "c\nd");
}

#[tokio::test]
async fn test_view_end_only() {
    let page = body_string(get(abcd_router(), "/file1.txt?end_line=1").await).await;
    assert_eq!(pre_content(&page), "a\nb");
}

#[tokio::test]
async fn test_view_start_only() {
    let page = body_string(get(abcd_router(), "/file1.txt?start_line=2").await).await;
    assert_eq!(pre_content(&page), "c\nd");
}

#[tokio::test]
async fn test_empty_params_mean_not_given() {
    let response = get(abcd_router(), "/file1.txt?start_line=&end_line=").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(pre_content(&body_string(response).await), "a\nb\nc\nd");
}

#[tokio::test]
async fn test_repeated_params_use_first_value() {
    let response = get(
        abcd_router(),
        "/file1.txt?start_line=1&start_line=3&end_line=2&end_line=0",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(pre_content(&body_string(response).await), "b\nc");
}

#[tokio::test]
async fn test_unknown_params_ignored() {
    let response = get(abcd_router(), "/file1.txt?foo=bar&start_line=3").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(pre_content(&body_string(response).await), "d");
}

#[tokio::test]
async fn test_root_serves_default_file() {
    let response = get(abcd_router(), "/?start_line=0&end_line=1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_string(response).await;
    assert!(page.contains("<h1>file1.txt</h1>"));
    assert_eq!(pre_content(&page), "a\nb");
}

#[tokio::test]
async fn test_custom_default_file() {
    let source = MockFileSource::new().with_file("readme.txt", "hello");
    let router = create_router(
        SliceService::new(source),
        RouterConfig::new()
            .with_default_file("readme.txt")
            .with_tracing(false),
    );

    let page = body_string(get(router, "/").await).await;
    assert_eq!(pre_content(&page), "hello");
}

#[tokio::test]
async fn test_content_is_html_escaped() {
    let source = MockFileSource::new().with_file("page.html", "<script>alert('x')</script>");
    let router = router_for(SliceService::new(source));

    let page = body_string(get(router, "/page.html").await).await;
    assert!(!page.contains("<script>alert"));
    assert_eq!(
        pre_content(&page),
        "&lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt;"
    );
}

#[tokio::test]
async fn test_url_encoded_filename() {
    let source = MockFileSource::new().with_file("my notes.txt", "spaced");
    let router = router_for(SliceService::new(source));

    let response = get(router, "/my%20notes.txt").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(pre_content(&body_string(response).await), "spaced");
}

// =============================================================================
// Error Pages
// =============================================================================

#[tokio::test]
async fn test_missing_file_not_found_page() {
    let response = get(abcd_router(), "/missing.txt").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "text/html; charset=utf-8"
    );

    let page = body_string(response).await;
    assert_eq!(error_message(&page), "File not found.");
}

#[tokio::test]
async fn test_undecodable_filename_not_found_page() {
    let response = get(abcd_router(), "/%FF.txt").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "text/html; charset=utf-8"
    );

    let page = body_string(response).await;
    assert_eq!(error_message(&page), "File not found.");
    assert!(!page.contains("Invalid"));
}

#[tokio::test]
async fn test_undecodable_param_is_validation_error() {
    let response = get(abcd_router(), "/file1.txt?start_line=%FF").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "text/html; charset=utf-8"
    );
    assert_eq!(
        error_message(&body_string(response).await),
        "Start line number must be an integer."
    );
}

#[tokio::test]
async fn test_unmatched_route_not_found_page() {
    let response = get(abcd_router(), "/a/b/c").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        error_message(&body_string(response).await),
        "File not found."
    );
}

#[tokio::test]
async fn test_missing_default_file() {
    let router = router_for(SliceService::new(MockFileSource::new()));
    let response = get(router, "/").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_start_greater_than_end_rejected() {
    let source = MockFileSource::new().with_file("file1.txt", "a\nb\nc\nd");
    let router = router_for(SliceService::new(source.clone()));

    let response = get(router, "/file1.txt?start_line=3&end_line=1").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let page = body_string(response).await;
    assert_eq!(
        error_message(&page),
        "Start line number cannot be greater than End line number."
    );

    // Rejected before the file is touched
    assert_eq!(source.read_count("file1.txt"), 0);
}

#[tokio::test]
async fn test_negative_start_rejected() {
    let response = get(abcd_router(), "/file1.txt?start_line=-1").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(&body_string(response).await),
        "Start line number must be positive."
    );
}

#[tokio::test]
async fn test_negative_end_rejected() {
    let response = get(abcd_router(), "/file1.txt?end_line=-5").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(&body_string(response).await),
        "End line number must be positive."
    );
}

#[tokio::test]
async fn test_non_integer_rejected() {
    let response = get(abcd_router(), "/file1.txt?start_line=abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(&body_string(response).await),
        "Start line number must be an integer."
    );
}

#[tokio::test]
async fn test_start_past_end_of_file() {
    let response = get(abcd_router(), "/two.txt?start_line=5").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(&body_string(response).await),
        "Start line out of range."
    );
}

#[tokio::test]
async fn test_start_equal_to_line_count_is_empty_view() {
    let response = get(abcd_router(), "/two.txt?start_line=2").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(pre_content(&body_string(response).await), "");
}

#[tokio::test]
async fn test_empty_explicit_range() {
    let response = get(abcd_router(), "/two.txt?start_line=7&end_line=9").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(&body_string(response).await),
        "No content found between start line and end line."
    );
}

#[tokio::test]
async fn test_internal_error_is_generic() {
    let router = router_for(SliceService::new(FailingFileSource));

    let response = get(router, "/file1.txt").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let page = body_string(response).await;
    let message = error_message(&page);
    assert!(message.starts_with("An error occurred: "));
    assert!(!page.contains("/srv/private"));
    assert!(!page.contains("os error"));
}

// =============================================================================
// Other Endpoints
// =============================================================================

#[tokio::test]
async fn test_health() {
    let response = get(abcd_router(), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_raw_file() {
    let response = get(abcd_router(), "/static_files/file1.txt").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("content-type").unwrap(), "text/plain");
    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
    assert_eq!(body_string(response).await, "a\nb\nc\nd");
}

#[tokio::test]
async fn test_raw_missing_file() {
    let response = get(abcd_router(), "/static_files/nope.txt").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        error_message(&body_string(response).await),
        "File not found."
    );
}

#[tokio::test]
async fn test_raw_nested_path() {
    let source = MockFileSource::new().with_file("nested/inner.txt", "deep");
    let router = router_for(SliceService::new(source.clone()));

    let response = get(router, "/static_files/nested/inner.txt").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "deep");
    assert_eq!(source.read_count("nested/inner.txt"), 1);
}
