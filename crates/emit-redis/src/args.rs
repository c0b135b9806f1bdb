//! CLI argument definitions for the Redis emitter.

use clap::Args;
use std::path::PathBuf;

/// Connection arguments for the Redis server.
#[derive(Args, Clone, Debug)]
pub struct RedisConnectArgs {
    /// Redis host
    #[arg(long, env = "REDIS_HOST", default_value = "localhost")]
    pub redis_host: String,

    /// Redis port
    #[arg(long, env = "REDIS_PORT", default_value = "6379")]
    pub redis_port: u16,

    /// Redis logical database index
    #[arg(long, env = "REDIS_DB", default_value = "0")]
    pub redis_db: i64,

    /// Redis password (none by default)
    #[arg(long, env = "REDIS_PASSWORD")]
    pub redis_password: Option<String>,
}

/// Arguments controlling what is emitted and how fast.
#[derive(Args, Clone, Debug)]
pub struct EmitterArgs {
    /// Stream names to choose from (comma-separated)
    #[arg(
        long,
        env = "EMIT_STREAMS",
        value_delimiter = ',',
        default_value = "main-stream,other-stream,group-stream"
    )]
    pub streams: Vec<String>,

    /// Number of events to emit
    #[arg(long, env = "EMIT_ITERATIONS", default_value = "50")]
    pub iterations: u64,

    /// Pause between events, in seconds
    #[arg(long, env = "EMIT_INTERVAL_SECS", default_value = "0.2")]
    pub interval_secs: f64,

    /// Probability that an event is replaced by a malformed payload
    #[arg(long, env = "EMIT_MALFORMED_PROBABILITY", default_value = "0.05")]
    pub malformed_probability: f64,

    /// Random seed for deterministic generation (random and logged when omitted)
    #[arg(long, env = "EMIT_SEED")]
    pub seed: Option<u64>,

    /// Cap each stream at this many entries (XADD MAXLEN)
    #[arg(long)]
    pub max_len: Option<u64>,

    /// Use approximate trimming (MAXLEN ~) when --max-len is set
    #[arg(long)]
    pub approx_trim: bool,

    /// Expire each stream this many milliseconds after its last append
    #[arg(long)]
    pub stream_ttl_ms: Option<u64>,
}

/// Full argument set for the `stream-emitter` binary.
#[derive(Args, Clone, Debug)]
pub struct EmitArgs {
    #[command(flatten)]
    pub redis: RedisConnectArgs,

    #[command(flatten)]
    pub emitter: EmitterArgs,

    /// YAML file with emitter settings; replaces the emitter flags above
    #[arg(long, env = "EMIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log the events instead of appending them to Redis
    #[arg(long)]
    pub dry_run: bool,
}
