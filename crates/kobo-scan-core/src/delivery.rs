//! Handoff of the delivery payload to the companion form application.

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::error::{CompanionError, DeliveryError};
use crate::models::config::DeliveryConfig;
use crate::models::payload::DeliveryPayload;
use crate::retry::{retry, RetryPolicy};

/// Port to the companion application.
#[async_trait]
pub trait Companion: Send + Sync {
    /// Send one payload. Each call is a single attempt.
    async fn send_data(&self, payload: &DeliveryPayload) -> Result<(), CompanionError>;
}

#[async_trait]
impl<C: Companion + ?Sized> Companion for Box<C> {
    async fn send_data(&self, payload: &DeliveryPayload) -> Result<(), CompanionError> {
        (**self).send_data(payload).await
    }
}

/// Delivers payloads with a fixed-delay retry.
pub struct DeliveryCoordinator<C> {
    companion: C,
    policy: RetryPolicy,
}

impl<C: Companion> DeliveryCoordinator<C> {
    /// Coordinator with the default policy (3 attempts, 500 ms apart).
    pub fn new(companion: C) -> Self {
        Self {
            companion,
            policy: RetryPolicy::default(),
        }
    }

    pub fn from_config(companion: C, config: &DeliveryConfig) -> Self {
        Self {
            companion,
            policy: RetryPolicy::for_delivery(config),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn companion(&self) -> &C {
        &self.companion
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Deliver `payload`, retrying every failure until the budget is spent.
    pub async fn deliver(&self, payload: &DeliveryPayload) -> Result<(), DeliveryError> {
        debug!(
            document_number = %payload.document_number,
            max_attempts = self.policy.max_attempts,
            "delivering payload"
        );

        match retry(&self.policy, "delivery", |_| self.companion.send_data(payload)).await {
            Ok(()) => {
                info!("payload delivered");
                Ok(())
            }
            Err(exhausted) => {
                error!(attempts = exhausted.attempts, error = %exhausted.last, "delivery failed");
                Err(DeliveryError {
                    attempts: exhausted.attempts,
                    source: exhausted.last,
                })
            }
        }
    }
}
