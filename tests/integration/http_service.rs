use anyhow::Result;
use ids_batch_client::config::ServiceConfig;
use ids_batch_client::errors::ServiceError;
use ids_batch_client::service::{HttpPredictionService, PredictionService};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::fixtures::csv_file;

fn service_for(server: &MockServer, timeout_seconds: u64) -> Result<HttpPredictionService> {
    Ok(HttpPredictionService::new(&ServiceConfig {
        base_url: server.uri(),
        timeout_seconds,
    })?)
}

fn batch_body() -> serde_json::Value {
    json!({
        "total_samples": 3,
        "normal_count": 2,
        "attack_count": 1,
        "top_attacks": [{"attack": "DDoS", "count": 1, "percentage": "100.0"}],
        "predictions": [
            {"prediction": "Normal", "confidence": 0.97},
            {"prediction": "DDoS", "confidence": 0.88},
            {"prediction": "Normal", "confidence": 0.91}
        ]
    })
}

#[tokio::test]
async fn test_batch_predict_posts_multipart_file() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/batch-predict/"))
        .and(header_exists("content-type"))
        .respond_with(ResponseTemplate::new(200).set_body_json(batch_body()))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server, 5)?;
    let stats = service.predict_batch(csv_file("traffic.csv")).await?;

    assert_eq!(stats.total_samples, 3);
    assert_eq!(stats.top_attacks[0].percentage, 100.0);
    assert_eq!(stats.predictions[1].prediction, "DDoS");

    let requests = server.received_requests().await.unwrap_or_default();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"file\""));
    assert!(body.contains("filename=\"traffic.csv\""));
    assert!(body.contains("0.1,0.2"));
    Ok(())
}

#[tokio::test]
async fn test_batch_predict_defaults_missing_lists() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/batch-predict/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_samples": 0,
            "normal_count": 0,
            "attack_count": 0
        })))
        .mount(&server)
        .await;

    let stats = service_for(&server, 5)?
        .predict_batch(csv_file("empty.csv"))
        .await?;

    assert!(stats.top_attacks.is_empty());
    assert!(stats.predictions.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_error_body_becomes_remote_error() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/batch-predict/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "Invalid CSV format"})),
        )
        .mount(&server)
        .await;

    let err = service_for(&server, 5)?
        .predict_batch(csv_file("traffic.csv"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ServiceError::Remote {
            status: 400,
            message: "Invalid CSV format".to_string(),
        }
    );
    assert_eq!(err.user_message(), "Invalid CSV format");
    Ok(())
}

#[tokio::test]
async fn test_plain_error_status() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let err = service_for(&server, 5)?
        .predict_batch(csv_file("traffic.csv"))
        .await
        .unwrap_err();

    assert_eq!(err, ServiceError::Status { status: 503 });
    assert_eq!(err.user_message(), "Batch prediction failed");
    Ok(())
}

#[tokio::test]
async fn test_malformed_success_body() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/batch-predict/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": "lots"})))
        .mount(&server)
        .await;

    let err = service_for(&server, 5)?
        .predict_batch(csv_file("traffic.csv"))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::MalformedResponse(_)));
    Ok(())
}

#[tokio::test]
async fn test_slow_service_times_out() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(batch_body())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let err = service_for(&server, 1)?
        .predict_batch(csv_file("traffic.csv"))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Timeout { timeout_seconds: 1, .. }));
    Ok(())
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() -> Result<()> {
    // Bind then release a port so nothing is listening on it
    let port = std::net::TcpListener::bind("127.0.0.1:0")?.local_addr()?.port();
    let service = HttpPredictionService::new(&ServiceConfig {
        base_url: format!("http://127.0.0.1:{}", port),
        timeout_seconds: 5,
    })?;

    let err = service
        .predict_batch(csv_file("traffic.csv"))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Transport(_)));
    Ok(())
}

#[tokio::test]
async fn test_single_predict_sends_feature_vector() -> Result<()> {
    let server = MockServer::start().await;
    let features: Vec<f64> = (0..46).map(|i| i as f64 / 10.0).collect();
    Mock::given(method("POST"))
        .and(path("/api/predict/"))
        .and(body_json(json!({ "features": features })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"prediction": "PortScan", "confidence": 0.87})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = service_for(&server, 5)?.predict_single(&features).await?;

    assert_eq!(result.prediction, "PortScan");
    assert_eq!(result.confidence, 0.87);
    Ok(())
}
