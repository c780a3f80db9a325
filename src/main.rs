use wicket::config::Config;
use wicket::handler::handler_fn;
use wicket::http::mime;
use wicket::http::request::Request;
use wicket::http::response::{Response, ResponseBuilder, StatusCode};
use wicket::router::Router;
use wicket::server::Server;

const INDEX_HTML: &str = r#"<html>
  <head><title>Wicket</title></head>
  <body>
    <h1>Welcome!</h1>
    <p>This is the root page.</p>
    <p><a href="/hello">Say Hello</a></p>
    <p><a href="/api/info">View API Info</a></p>
  </body>
</html>
"#;

async fn index(_req: Request) -> anyhow::Result<Response> {
    Ok(ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", mime::HTML)
        .body(INDEX_HTML)
        .build())
}

async fn hello(_req: Request) -> anyhow::Result<Response> {
    Ok(Response::text(StatusCode::Ok, "Hello from the Wicket server!"))
}

async fn api_info(_req: Request) -> anyhow::Result<Response> {
    Ok(ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", mime::JSON)
        .body(r#"{"service": "api", "version": "1.0"}"#)
        .build())
}

fn routes() -> Router {
    let mut api = Router::new();
    api.add_route("/info", handler_fn(api_info));

    let mut root = Router::new();
    root.add_route("/", handler_fn(index))
        .add_route("/hello", handler_fn(hello))
        .mount("/api", api);

    root
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Config::load()?;

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(cfg.log.level())
        .init();

    let mut server = Server::with_config(routes(), cfg.server);
    server.start().await?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");

    server.stop().await;

    Ok(())
}
