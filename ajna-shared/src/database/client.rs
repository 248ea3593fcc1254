use std::time::Duration;
use aws_config::BehaviorVersion;
use aws_config::timeout::TimeoutConfig;
use aws_sdk_dynamodb::Client as DynamoDbClient;

const OPERATION_TIMEOUT_SECS: u64 = 10;

pub async fn get_dynamodb_client() -> DynamoDbClient {
    let timeouts = TimeoutConfig::builder()
        .operation_timeout(Duration::from_secs(OPERATION_TIMEOUT_SECS))
        .build();

    let config = aws_config::defaults(BehaviorVersion::latest())
        .timeout_config(timeouts)
        .load()
        .await;
    DynamoDbClient::new(&config)
}
