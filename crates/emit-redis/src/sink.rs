//! Destinations the emitter appends events to.
//!
//! [`StreamSink`] is the seam between the run loop and the broker. The Redis
//! implementation opens its single connection when the run starts, keeps it
//! for every append, and closes it when dropped.

use crate::args::RedisConnectArgs;
use crate::config::{EmitterConfig, StreamTrim};
use crate::encoder::xadd_args;
use crate::error::EmitError;
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::IntoConnectionInfo;
use std::time::Duration;
use stream_event_generator::EventPayload;
use tracing::{debug, info};

/// Append-only destination for stream events.
#[async_trait]
pub trait StreamSink: Send {
    /// Prepare the destination before the first append, e.g. connect.
    ///
    /// Called once per run, after the start banner.
    async fn open(&mut self) -> Result<(), EmitError> {
        Ok(())
    }

    /// Append `payload` as a new entry of `stream` and return the entry id.
    async fn append(&mut self, stream: &str, payload: &EventPayload) -> Result<String, EmitError>;
}

#[async_trait]
impl<K: StreamSink + ?Sized> StreamSink for Box<K> {
    async fn open(&mut self) -> Result<(), EmitError> {
        (**self).open().await
    }

    async fn append(&mut self, stream: &str, payload: &EventPayload) -> Result<String, EmitError> {
        (**self).append(stream, payload).await
    }
}

/// Sink that appends to Redis streams with `XADD`.
///
/// No connection is made until [`StreamSink::open`] or the first append.
pub struct RedisStreamSink {
    client: redis::Client,
    address: String,
    conn: Option<MultiplexedConnection>,
    trim: Option<StreamTrim>,
    ttl: Option<Duration>,
}

impl RedisStreamSink {
    /// Build a sink for the server in `args`. Nothing is sent yet.
    ///
    /// Trimming and stream expiry are taken from `config`.
    pub fn new(args: &RedisConnectArgs, config: &EmitterConfig) -> Result<Self, EmitError> {
        let mut info = (args.redis_host.as_str(), args.redis_port).into_connection_info()?;
        info.redis.db = args.redis_db;
        info.redis.password = args.redis_password.clone();

        Ok(Self {
            client: redis::Client::open(info)?,
            address: format!("{}:{} (db {})", args.redis_host, args.redis_port, args.redis_db),
            conn: None,
            trim: config.trim(),
            ttl: config.stream_ttl(),
        })
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// The open connection, connecting and verifying it with `PING` first if
    /// needed.
    async fn connection(&mut self) -> Result<&mut MultiplexedConnection, EmitError> {
        let conn = match self.conn.take() {
            Some(conn) => conn,
            None => {
                let mut conn = self.client.get_multiplexed_async_connection().await?;

                let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
                debug!("PING -> {}", pong);
                info!("Connected to Redis at {}", self.address);

                conn
            }
        };

        Ok(self.conn.insert(conn))
    }
}

#[async_trait]
impl StreamSink for RedisStreamSink {
    async fn open(&mut self) -> Result<(), EmitError> {
        self.connection().await?;
        Ok(())
    }

    async fn append(&mut self, stream: &str, payload: &EventPayload) -> Result<String, EmitError> {
        let mut xadd = redis::cmd("XADD");
        xadd.arg(xadd_args(stream, payload, self.trim));
        let ttl = self.ttl;
        let conn = self.connection().await?;

        let id: String = match ttl {
            None => xadd.query_async(conn).await?,
            Some(ttl) => {
                let mut pipe = redis::pipe();
                pipe.add_command(xadd)
                    .cmd("PEXPIRE")
                    .arg(stream)
                    .arg(ttl.as_millis() as u64)
                    .ignore();
                let (id,): (String,) = pipe.query_async(conn).await?;
                id
            }
        };

        Ok(id)
    }
}

/// Sink that only logs what would be appended.
#[derive(Debug, Default)]
pub struct DryRunSink {
    appended: u64,
}

impl DryRunSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn appended(&self) -> u64 {
        self.appended
    }
}

#[async_trait]
impl StreamSink for DryRunSink {
    async fn append(&mut self, stream: &str, payload: &EventPayload) -> Result<String, EmitError> {
        let json = serde_json::to_string(&payload.to_json())
            .map_err(|e| EmitError::Encoding(e.to_string()))?;

        self.appended += 1;
        info!("[dry-run] XADD {} * {}", stream, json);

        Ok(format!("{}-0", self.appended))
    }
}
