//! Command-line interface for stream-emitter
//!
//! Appends synthetic events to Redis streams, replacing a small share of them
//! with malformed payloads so stream consumers can be tested against bad input.
//!
//! # Usage Examples
//!
//! ```bash
//! # Defaults: 50 events, 0.2s apart, 5% malformed, to localhost:6379
//! stream-emitter
//!
//! # Reproducible run against another server
//! stream-emitter --redis-host redis --redis-port 6380 --seed 42
//!
//! # Custom streams, capped at ~100k entries each, expiring 5s after the last append
//! stream-emitter --streams orders,payments --max-len 100000 --approx-trim \
//!   --stream-ttl-ms 5000
//!
//! # Settings from a YAML file, events logged instead of sent
//! RUST_LOG=info stream-emitter --config emitter.yaml --dry-run
//! ```

use anyhow::Context;
use clap::Parser;
use emit_redis::{DryRunSink, EmitArgs, EmitterConfig, RedisStreamSink, StreamEmitter};
use stream_event_generator::{random_seed, RngSource};

#[derive(Parser)]
#[command(name = "stream-emitter")]
#[command(about = "Emit synthetic test events, some deliberately malformed, to Redis streams")]
#[command(long_about = None)]
struct Cli {
    #[command(flatten)]
    args: EmitArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing; stdout is kept for the banners
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let Cli { args } = Cli::parse();

    let mut config = match &args.config {
        Some(path) => EmitterConfig::from_file(path)
            .with_context(|| format!("Failed to load emitter config from {path:?}"))?,
        None => EmitterConfig::from(&args.emitter),
    };
    config
        .validate()
        .context("Invalid emitter configuration")?;

    let seed = *config.seed.get_or_insert_with(random_seed);
    tracing::info!("Using seed {} (pass --seed {} to replay this run)", seed, seed);

    let mut stdout = std::io::stdout();

    let appended = if args.dry_run {
        let mut emitter = StreamEmitter::new(config, DryRunSink::new());
        emitter
            .run(RngSource::seeded(seed), &mut stdout)
            .await
            .context("Dry run failed")?
    } else {
        let sink = RedisStreamSink::new(&args.redis, &config)
            .context("Invalid Redis connection settings")?;
        let mut emitter = StreamEmitter::new(config, sink);
        emitter
            .run(RngSource::seeded(seed), &mut stdout)
            .await
            .with_context(|| {
                format!(
                    "Failed to emit events to Redis at {}:{}",
                    args.redis.redis_host, args.redis.redis_port
                )
            })?
    };

    tracing::info!("Appended {} entries", appended);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let Cli { args } = Cli::try_parse_from(["stream-emitter"]).unwrap();
        let config = EmitterConfig::from(&args.emitter);

        assert_eq!(config, EmitterConfig::default());
        assert_eq!(args.redis.redis_host, "localhost");
        assert_eq!(args.redis.redis_port, 6379);
        assert_eq!(args.redis.redis_db, 0);
        assert!(!args.dry_run);
    }

    #[test]
    fn test_cli_overrides() {
        let Cli { args } = Cli::try_parse_from([
            "stream-emitter",
            "--streams",
            "a,b",
            "--iterations",
            "7",
            "--interval-secs",
            "0",
            "--malformed-probability",
            "0.5",
            "--seed",
            "42",
            "--max-len",
            "10",
            "--approx-trim",
            "--dry-run",
        ])
        .unwrap();
        let config = EmitterConfig::from(&args.emitter);

        assert_eq!(config.streams, vec!["a", "b"]);
        assert_eq!(config.iterations, 7);
        assert_eq!(config.interval_secs, 0.0);
        assert_eq!(config.malformed_probability, 0.5);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.max_len, Some(10));
        assert!(config.approx_trim);
        assert!(args.dry_run);
    }
}
