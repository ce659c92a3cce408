use crate::api::health::health_check;

#[tokio::test]
async fn test_health_check_fields() {
    let value = health_check().await.0;

    assert_eq!(
        value.get("status").and_then(|v| v.as_str()),
        Some("healthy")
    );
    assert_eq!(
        value.get("service").and_then(|v| v.as_str()),
        Some("persona")
    );
    assert_eq!(
        value.get("version").and_then(|v| v.as_str()),
        Some(env!("CARGO_PKG_VERSION"))
    );
}

#[tokio::test]
async fn test_health_check_timestamp() {
    let value = health_check().await.0;

    let timestamp = value.get("timestamp").and_then(|v| v.as_u64());

    assert!(timestamp.is_some());
    // Timestamp should be reasonable (after year 2020)
    assert!(timestamp.unwrap() > 1577836800); // Jan 1, 2020
}
