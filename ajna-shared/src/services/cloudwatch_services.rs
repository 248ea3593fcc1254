use aws_sdk_cloudwatch::{Client as CloudWatchClient};
use aws_sdk_cloudwatch::types::{Dimension, MetricDatum, StandardUnit};
use aws_smithy_types::date_time::DateTime;
use aws_config::BehaviorVersion;
use chrono::Utc;
use crate::utilities::config;

pub async fn create_cloudwatch_client() -> CloudWatchClient {
    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    CloudWatchClient::new(&config)
}

/// Emits gateway metrics to CloudWatch. A disabled emitter only logs.
#[derive(Clone)]
pub struct MetricsEmitter {
    client: Option<CloudWatchClient>,
    namespace: String,
}

impl MetricsEmitter {
    pub async fn from_env() -> Self {
        let namespace = format!("{}/AjnaGateway/Metrics", config::get_environment());
        if config::get_metrics_enabled() {
            Self { client: Some(create_cloudwatch_client().await), namespace }
        } else {
            Self { client: None, namespace }
        }
    }

    pub fn disabled() -> Self {
        Self { client: None, namespace: "test/AjnaGateway/Metrics".to_string() }
    }

    /// Emits a metric with a given name, value, and unit.
    pub async fn emit(&self, metric_name: &str, value: f64, unit: StandardUnit) {
        log::info!("Emitting metric {} : {} {}", metric_name, value, unit);

        let Some(client) = &self.client else {
            return;
        };

        let datum = MetricDatum::builder()
            .metric_name(metric_name)
            .timestamp(DateTime::from_secs(Utc::now().timestamp()))
            .value(value)
            .unit(unit)
            .dimensions(
                Dimension::builder()
                    .name("Service")
                    .value("AjnaGateway")
                    .build(),
            )
            .build();

        if let Err(err) = client
            .put_metric_data()
            .namespace(&self.namespace)
            .metric_data(datum)
            .send()
            .await
        {
            log::error!("Failed to emit CloudWatch metric '{}': {:?}", metric_name, err);
        }
    }

    pub async fn count(&self, metric_name: &str) {
        self.emit(metric_name, 1.0, StandardUnit::Count).await;
    }

    pub async fn duration(&self, metric_name: &str, seconds: f64) {
        self.emit(metric_name, seconds, StandardUnit::Seconds).await;
    }
}
