//! Document submission service - the public facade of the client.

use std::sync::Arc;

use crate::domain::Document;
use crate::error::SubmitError;
use crate::ports::{DocumentGateway, RateLimiter};

/// Rate-limited document submission.
///
/// Composes the two ports: every submission first waits for a permit from
/// the [`RateLimiter`], then performs exactly one gateway call. The gateway
/// outcome is irrelevant to the limiter - a failed downstream call still
/// consumed its permit.
pub struct DocumentSubmitter {
    limiter: Arc<dyn RateLimiter>,
    gateway: Arc<dyn DocumentGateway>,
}

impl DocumentSubmitter {
    pub fn new(limiter: Arc<dyn RateLimiter>, gateway: Arc<dyn DocumentGateway>) -> Self {
        Self { limiter, gateway }
    }

    /// Submit one document, blocking until the rate limiter admits the call.
    pub async fn submit(&self, document: &Document, signature: &str) -> Result<(), SubmitError> {
        self.limiter.acquire().await?;

        tracing::debug!(doc_id = %document.doc_id, "Permit granted, submitting document");
        self.gateway.create_document(document, signature).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{NaiveDate, Utc};

    use super::*;
    use crate::ports::{GatewayError, RateLimitError};

    #[derive(Default)]
    struct CallLog {
        calls: Mutex<Vec<&'static str>>,
    }

    impl CallLog {
        fn record(&self, call: &'static str) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    struct StubLimiter {
        log: Arc<CallLog>,
        cancelled: bool,
    }

    #[async_trait]
    impl RateLimiter for StubLimiter {
        async fn acquire(&self) -> Result<(), RateLimitError> {
            self.log.record("acquire");
            if self.cancelled {
                return Err(RateLimitError::Cancelled);
            }
            Ok(())
        }
    }

    struct StubGateway {
        log: Arc<CallLog>,
        fail: bool,
    }

    #[async_trait]
    impl DocumentGateway for StubGateway {
        async fn create_document(
            &self,
            _document: &Document,
            _signature: &str,
        ) -> Result<(), GatewayError> {
            self.log.record("create_document");
            if self.fail {
                return Err(GatewayError::Server);
            }
            Ok(())
        }
    }

    fn sample_document() -> Document {
        Document {
            doc_id: "1".to_string(),
            doc_status: "DRAFT".to_string(),
            doc_type: "LP_INTRODUCE_GOODS".to_string(),
            import_request: true,
            owner_inn: "1234567890".to_string(),
            participant_inn: "1234567890".to_string(),
            producer_inn: "0987654321".to_string(),
            production_date: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            production_type: "OWN_PRODUCTION".to_string(),
            products: vec![],
            reg_date: Utc::now(),
            reg_number: "RN-1".to_string(),
        }
    }

    fn submitter(cancelled: bool, gateway_fails: bool) -> (DocumentSubmitter, Arc<CallLog>) {
        let log = Arc::new(CallLog::default());
        let limiter = Arc::new(StubLimiter {
            log: log.clone(),
            cancelled,
        });
        let gateway = Arc::new(StubGateway {
            log: log.clone(),
            fail: gateway_fails,
        });
        (DocumentSubmitter::new(limiter, gateway), log)
    }

    #[tokio::test]
    async fn acquires_permit_before_calling_gateway() {
        let (submitter, log) = submitter(false, false);

        submitter.submit(&sample_document(), "token").await.unwrap();

        assert_eq!(log.calls(), vec!["acquire", "create_document"]);
    }

    #[tokio::test]
    async fn cancelled_wait_short_circuits_gateway() {
        let (submitter, log) = submitter(true, false);

        let result = submitter.submit(&sample_document(), "token").await;

        assert!(matches!(result, Err(SubmitError::RateLimit(_))));
        assert_eq!(log.calls(), vec!["acquire"]);
    }

    #[tokio::test]
    async fn gateway_failure_propagates() {
        let (submitter, log) = submitter(false, true);

        let result = submitter.submit(&sample_document(), "token").await;

        assert!(matches!(result, Err(SubmitError::Gateway(GatewayError::Server))));
        assert_eq!(log.calls(), vec!["acquire", "create_document"]);
    }
}
