use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "8000".to_string());
    let authorization = std::env::var("AUTHORIZATION_HEADER")
        .ok()
        .filter(|value| !value.is_empty());

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, auth = authorization.is_some(), "accounts mock listening");
    accounts_mock_server::serve(
        listener,
        accounts_mock_server::app_with(accounts_mock_server::seeded(), authorization),
    )
    .await
}
