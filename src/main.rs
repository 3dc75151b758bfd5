//! TTL LRU Cache soak runner
//!
//! Hammers a shared cache from several worker threads while the background
//! sweeper runs, then prints a JSON report of what happened.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use rand::Rng;
use tokio::signal;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ttl_lru_cache::models::SoakReport;
use ttl_lru_cache::{spawn_sweeper_task, Cache, CacheConfig};

/// Per-worker operation counts.
#[derive(Debug, Default, Clone, Copy)]
struct WorkerTotals {
    operations: u64,
    swept: u64,
}

/// Main entry point for the soak runner.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load and validate configuration from environment variables
/// 3. Create the shared cache
/// 4. Start background TTL sweep task
/// 5. Run workers until the soak duration elapses or a shutdown signal arrives
/// 6. Print the final report
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ttl_lru_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TTL LRU cache soak run");

    let config = CacheConfig::from_env();
    config
        .validate()
        .context("refusing to start with invalid configuration")?;
    info!(
        "Configuration loaded: capacity={}, ttl={}ms, sweep_interval={}ms, workers={}, key_space={}, duration={}s",
        config.capacity,
        config.ttl_ms,
        config.sweep_interval_ms,
        config.soak_workers,
        config.soak_key_space,
        config.soak_duration_secs
    );

    let cache: Cache<String, String> = Cache::from_config(&config)?;
    let sweeper = spawn_sweeper_task(cache.clone(), config.sweep_interval());
    info!("Background sweep task started");

    let started_at = chrono::Utc::now();
    let stop = Arc::new(AtomicBool::new(false));

    let workers: Vec<_> = (0..config.soak_workers)
        .map(|id| {
            let cache = cache.clone();
            let stop = Arc::clone(&stop);
            let key_space = config.soak_key_space;
            tokio::task::spawn_blocking(move || run_worker(id, &cache, key_space, &stop))
        })
        .collect();

    tokio::select! {
        _ = tokio::time::sleep(config.soak_duration()) => {
            info!("Soak duration elapsed, stopping workers...");
        }
        _ = shutdown_signal() => {
            info!("Received shutdown signal, stopping workers...");
        }
    }
    stop.store(true, Ordering::Relaxed);

    let mut totals = WorkerTotals::default();
    for worker in workers {
        let worker_totals = worker.await.context("soak worker panicked")?;
        totals.operations += worker_totals.operations;
        totals.swept += worker_totals.swept;
    }

    sweeper.abort();
    warn!("Sweep task aborted");

    anyhow::ensure!(
        cache.size() <= cache.capacity(),
        "cache holds {} entries with capacity {}",
        cache.size(),
        cache.capacity()
    );

    let report = SoakReport::finish(
        started_at,
        config.soak_workers,
        totals.operations,
        totals.swept,
        cache.stats(),
    );
    println!("{}", serde_json::to_string_pretty(&report)?);

    info!("Soak run complete");
    Ok(())
}

/// Mixed read/write/sweep loop run on a blocking thread.
fn run_worker(
    id: usize,
    cache: &Cache<String, String>,
    key_space: usize,
    stop: &AtomicBool,
) -> WorkerTotals {
    let mut rng = rand::thread_rng();
    let mut totals = WorkerTotals::default();

    while !stop.load(Ordering::Relaxed) {
        let key = format!("key{}", rng.gen_range(0..key_space));
        match rng.gen_range(0..100) {
            0 => totals.swept += cache.evict_expired() as u64,
            1..=45 => cache.put(key, format!("worker{}-op{}", id, totals.operations)),
            _ => {
                cache.get(&key);
            }
        }
        totals.operations += 1;
    }

    debug!(worker = id, operations = totals.operations, "Worker stopped");
    totals
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
