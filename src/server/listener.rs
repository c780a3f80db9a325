use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio::task::JoinSet;
use tracing::{info, Instrument};

use crate::handler::Handler;
use crate::http::connection::{Connection, Limits};

/// Pause after a failed accept, e.g. when the process is out of descriptors
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Accepts connections until `shutdown` fires, one task per connection.
///
/// On shutdown the listening socket is dropped first, then in-flight
/// connections get up to `grace` to finish before the rest are aborted.
pub async fn run(
    listener: TcpListener,
    handler: Arc<dyn Handler>,
    limits: Limits,
    grace: Duration,
    mut shutdown: broadcast::Receiver<()>,
) {
    let mut connections = JoinSet::new();

    loop {
        tokio::select! {
            _ = shutdown.recv() => {
                break;
            }

            Some(joined) = connections.join_next(), if !connections.is_empty() => {
                if let Err(e) = joined {
                    tracing::error!("Connection task failed: {}", e);
                }
            }

            accepted = listener.accept() => {
                let (socket, peer) = match accepted {
                    Ok(pair) => pair,
                    Err(e) => {
                        tracing::warn!("Accept failed: {}", e);
                        tokio::time::sleep(ACCEPT_BACKOFF).await;
                        continue;
                    }
                };
                info!("Accepted connection from {}", peer);

                let conn = Connection::new(socket, Arc::clone(&handler), limits.clone());
                connections.spawn(
                    async move {
                        if let Err(e) = conn.run().await {
                            tracing::error!("Connection error from {}: {}", peer, e);
                        }
                    }
                    .in_current_span(),
                );
            }
        }
    }

    drop(listener);

    if connections.is_empty() {
        return;
    }
    info!(in_flight = connections.len(), "Waiting for open connections");

    if tokio::time::timeout(grace, drain(&mut connections)).await.is_err() {
        tracing::warn!(
            remaining = connections.len(),
            "Grace period expired, aborting open connections"
        );
        connections.abort_all();
        drain(&mut connections).await;
    }
}

async fn drain(connections: &mut JoinSet<()>) {
    while let Some(joined) = connections.join_next().await {
        match joined {
            Err(e) if e.is_cancelled() => {}
            Err(e) => tracing::error!("Connection task failed: {}", e),
            Ok(()) => {}
        }
    }
}
