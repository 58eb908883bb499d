//! # Znak Submitter
//!
//! Demo driver: pushes a burst of concurrent document submissions through
//! the rate-limited client and logs each outcome.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use znak_core::DocumentSubmitter;
use znak_core::domain::{Document, Product};
use znak_infra::gateway::HttpDocumentGateway;
use znak_infra::rate_limit::SlidingWindowLimiter;

mod config;

use config::SubmitterConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let config = SubmitterConfig::from_env();
    tracing::info!(
        capacity = config.rate_limit.capacity,
        window_secs = config.rate_limit.window.as_secs(),
        submissions = config.submissions,
        url = %config.gateway.create_url,
        "Starting znak submitter"
    );

    let limiter = Arc::new(SlidingWindowLimiter::new(config.rate_limit.clone())?);
    let gateway = Arc::new(HttpDocumentGateway::new(config.gateway.clone()));
    let submitter = Arc::new(DocumentSubmitter::new(limiter.clone(), gateway));

    let mut tasks = Vec::new();
    for task_id in 0..config.submissions {
        let submitter = Arc::clone(&submitter);
        let signature = config.signature.clone();

        tasks.push(tokio::spawn(async move {
            let document = sample_document();
            match submitter.submit(&document, &signature).await {
                Ok(()) => tracing::info!(task_id, doc_id = %document.doc_id, "Submission accepted"),
                Err(err) => {
                    tracing::warn!(task_id, doc_id = %document.doc_id, error = %err, "Submission failed");
                }
            }
        }));

        tokio::time::sleep(config.stagger).await;
    }

    futures::future::join_all(tasks).await;

    limiter.shutdown();
    tracing::info!("All submissions drained");
    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,submitter=debug,znak_infra=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}

fn sample_document() -> Document {
    let production_date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap_or_default();

    let product = Product {
        certificate_document: "Doc1".to_string(),
        certificate_document_date: production_date,
        certificate_document_number: "ABC123".to_string(),
        owner_inn: "1234567890".to_string(),
        producer_inn: "0987654321".to_string(),
        production_date,
        tnved_code: "123456".to_string(),
        uit_code: "7890".to_string(),
        uitu_code: "9876".to_string(),
    };

    Document {
        doc_id: Uuid::new_v4().to_string(),
        doc_status: "DRAFT".to_string(),
        doc_type: "LP_INTRODUCE_GOODS".to_string(),
        import_request: true,
        owner_inn: "1234567890".to_string(),
        participant_inn: "1234567890".to_string(),
        producer_inn: "0987654321".to_string(),
        production_date,
        production_type: "OWN_PRODUCTION".to_string(),
        products: vec![product],
        reg_date: Utc::now(),
        reg_number: "RN-1".to_string(),
    }
}
