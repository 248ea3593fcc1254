pub mod client;
pub mod document_store;
pub mod dynamo_document_store;
pub mod errors;
