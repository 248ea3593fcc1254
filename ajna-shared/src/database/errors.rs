use std::fmt;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;

#[derive(Debug)]
pub enum StoreError {
    DynamoDbOperation(String),
    Deserialization(String),
    Unavailable(String),
}

impl From<SdkError<GetItemError>> for StoreError {
    fn from(err: SdkError<GetItemError>) -> Self {
        StoreError::DynamoDbOperation(format!("DynamoDB GetItem error: {}", err))
    }
}

impl From<SdkError<PutItemError>> for StoreError {
    fn from(err: SdkError<PutItemError>) -> Self {
        StoreError::DynamoDbOperation(format!("DynamoDB PutItem error: {}", err))
    }
}

impl From<SdkError<UpdateItemError>> for StoreError {
    fn from(err: SdkError<UpdateItemError>) -> Self {
        StoreError::DynamoDbOperation(format!("DynamoDB UpdateItem error: {}", err))
    }
}

impl From<SdkError<QueryError>> for StoreError {
    fn from(err: SdkError<QueryError>) -> Self {
        StoreError::DynamoDbOperation(format!("DynamoDB Query error: {}", err))
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::DynamoDbOperation(e) => write!(f, "Document store operation failed: {}", e),
            StoreError::Deserialization(e) => write!(f, "Document store operation failed: Deserialization error: {}", e),
            StoreError::Unavailable(e) => write!(f, "Document store unavailable: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}
