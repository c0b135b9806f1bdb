//! Ordering tests for a full emitter run.
//!
//! Console writes, sink opens and appends are recorded into one shared
//! transcript so the tests can check that they happen in the right order.

use async_trait::async_trait;
use emit_redis::{
    EmitError, EmitterConfig, StreamEmitter, StreamSink, FINISH_BANNER, START_BANNER,
};
use std::io::Write;
use std::sync::{Arc, Mutex};
use stream_event_generator::testing::ScriptedSource;
use stream_event_generator::{EventPayload, RngSource};

#[derive(Debug, Clone, PartialEq)]
enum Entry {
    Console(String),
    Open,
    Append(String, EventPayload),
}

type Transcript = Arc<Mutex<Vec<Entry>>>;

struct TranscriptConsole {
    transcript: Transcript,
    buffer: String,
}

impl Write for TranscriptConsole {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.push_str(&String::from_utf8_lossy(buf));
        while let Some(pos) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=pos).collect();
            self.transcript
                .lock()
                .unwrap()
                .push(Entry::Console(line.trim_end().to_string()));
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

struct TranscriptSink {
    transcript: Transcript,
    /// Refuse to open, like an unreachable server
    fail_open: bool,
    /// Fail the append with this zero-based position
    fail_at: Option<usize>,
    appends: usize,
}

fn io_error(detail: &'static str) -> EmitError {
    EmitError::Redis(redis::RedisError::from((redis::ErrorKind::IoError, detail)))
}

#[async_trait]
impl StreamSink for TranscriptSink {
    async fn open(&mut self) -> Result<(), EmitError> {
        if self.fail_open {
            return Err(io_error("connection refused"));
        }
        self.transcript.lock().unwrap().push(Entry::Open);
        Ok(())
    }

    async fn append(&mut self, stream: &str, payload: &EventPayload) -> Result<String, EmitError> {
        if self.fail_at == Some(self.appends) {
            return Err(io_error("connection reset"));
        }
        self.appends += 1;
        self.transcript
            .lock()
            .unwrap()
            .push(Entry::Append(stream.to_string(), payload.clone()));
        Ok(format!("{}-0", self.appends))
    }
}

fn setup(fail_at: Option<usize>) -> (Transcript, TranscriptConsole, TranscriptSink) {
    let transcript: Transcript = Arc::new(Mutex::new(Vec::new()));
    let console = TranscriptConsole {
        transcript: transcript.clone(),
        buffer: String::new(),
    };
    let sink = TranscriptSink {
        transcript: transcript.clone(),
        fail_open: false,
        fail_at,
        appends: 0,
    };
    (transcript, console, sink)
}

fn config(iterations: u64) -> EmitterConfig {
    EmitterConfig {
        iterations,
        interval_secs: 0.0,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_banners_wrap_all_appends() {
    let (transcript, mut console, sink) = setup(None);
    let mut emitter = StreamEmitter::new(config(50), sink);

    emitter
        .run(RngSource::seeded(42), &mut console)
        .await
        .unwrap();

    let entries = transcript.lock().unwrap().clone();
    assert_eq!(entries.len(), 53);
    assert_eq!(entries[0], Entry::Console(START_BANNER.to_string()));
    assert_eq!(entries[1], Entry::Open);
    assert_eq!(entries[52], Entry::Console(FINISH_BANNER.to_string()));

    let banners = entries
        .iter()
        .filter(|e| matches!(e, Entry::Console(_)))
        .count();
    assert_eq!(banners, 2);
    assert!(entries[2..52]
        .iter()
        .all(|e| matches!(e, Entry::Append(_, _))));
}

#[tokio::test]
async fn test_failed_append_aborts_without_finish_banner() {
    let (transcript, mut console, sink) = setup(Some(3));
    let mut emitter = StreamEmitter::new(config(10), sink);

    let result = emitter.run(RngSource::seeded(42), &mut console).await;
    assert!(matches!(result, Err(EmitError::Redis(_))));

    let entries = transcript.lock().unwrap().clone();
    // Start banner, open, then the three appends before the failure
    assert_eq!(entries.len(), 5);
    assert_eq!(entries[0], Entry::Console(START_BANNER.to_string()));
    assert!(!entries.contains(&Entry::Console(FINISH_BANNER.to_string())));
}

#[tokio::test]
async fn test_failure_on_first_append() {
    let (transcript, mut console, sink) = setup(Some(0));
    let mut emitter = StreamEmitter::new(config(5), sink);

    assert!(emitter
        .run(ScriptedSource::default(), &mut console)
        .await
        .is_err());

    let entries = transcript.lock().unwrap().clone();
    assert_eq!(
        entries,
        vec![Entry::Console(START_BANNER.to_string()), Entry::Open]
    );
}

#[tokio::test]
async fn test_failed_open_leaves_only_start_banner() {
    let (transcript, mut console, sink) = setup(None);
    let sink = TranscriptSink {
        fail_open: true,
        ..sink
    };
    let mut emitter = StreamEmitter::new(config(5), sink);

    let result = emitter.run(RngSource::seeded(42), &mut console).await;
    assert!(matches!(result, Err(EmitError::Redis(_))));

    let entries = transcript.lock().unwrap().clone();
    assert_eq!(entries, vec![Entry::Console(START_BANNER.to_string())]);
}

#[tokio::test]
async fn test_recorded_sequence_for_scripted_source() {
    let (transcript, mut console, sink) = setup(None);
    let mut emitter = StreamEmitter::new(config(4), sink);
    let source = ScriptedSource::events([(2, false), (2, true), (0, false), (1, false)]);

    emitter.run(source, &mut console).await.unwrap();

    let expected = vec![
        Entry::Console("starting...".to_string()),
        Entry::Open,
        Entry::Append("group-stream".to_string(), EventPayload::regular(0)),
        Entry::Append("group-stream".to_string(), EventPayload::Malformed),
        Entry::Append("main-stream".to_string(), EventPayload::regular(2)),
        Entry::Append("other-stream".to_string(), EventPayload::regular(3)),
        Entry::Console("finished...".to_string()),
    ];
    assert_eq!(*transcript.lock().unwrap(), expected);
}

#[tokio::test]
async fn test_same_seed_same_transcript() {
    let (first, mut console1, sink1) = setup(None);
    let (second, mut console2, sink2) = setup(None);

    StreamEmitter::new(config(50), sink1)
        .run(RngSource::seeded(7), &mut console1)
        .await
        .unwrap();
    StreamEmitter::new(config(50), sink2)
        .run(RngSource::seeded(7), &mut console2)
        .await
        .unwrap();

    assert_eq!(*first.lock().unwrap(), *second.lock().unwrap());
}
