use std::sync::Arc;
use lambda_http::{service_fn, Error, Request};
use ajna_lambda::router::handle_lambda;
use ajna_lambda::state::AppState;
use ajna_shared::utilities::config;

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    std::panic::set_hook(Box::new(|info| {
        log::error!("Application panicked: {}", info);
    }));

    config::init();
    let state = Arc::new(AppState::from_env().await.map_err(|e| {
        log::error!("Failed to initialise gateway: {:?}", e);
        Error::from(e.to_string())
    })?);

    lambda_http::run(service_fn(move |event: Request| {
        let state = Arc::clone(&state);
        async move { handle_lambda(&state, event).await }
    })).await?;
    Ok(())
}
