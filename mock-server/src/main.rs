use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mock_server=info")),
        )
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "8000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;

    let app = match (std::env::var("HANDLE_USER"), std::env::var("HANDLE_PASSWORD")) {
        (Ok(user), Ok(password)) => {
            tracing::info!(%user, "write access requires basic auth");
            mock_server::app_with_credentials(&user, &password)
        }
        _ => mock_server::app(),
    };

    tracing::info!("handle server listening on http://{addr}/api/handles");
    mock_server::serve(listener, app).await
}
