//!
//! Drive one transport and turn its payloads into records.
//!

use std::fmt;

use crate::{
    channels::RecordTx,
    decoder::decode,
    errors::StreamError,
    logging::{debug, error, info, warn},
    proto::Block,
    record::{normalize, Record},
    transport::{Payload, StreamHandle, Transport},
    tx,
};

/// Where a consumer loop is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Connecting,
    Subscribing,
    Streaming,
    Terminated,
}

impl fmt::Display for StreamState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connecting => write!(f, "connecting"),
            Self::Subscribing => write!(f, "subscribing"),
            Self::Streaming => write!(f, "streaming"),
            Self::Terminated => write!(f, "terminated"),
        }
    }
}

/// Why a stream that reached [`StreamState::Streaming`] stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    /// The server closed the stream.
    EndOfStream,
    /// Receiving failed.
    Transport(String),
}

/// Outcome of one consumer run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamReport {
    /// Records handed to the sink.
    pub records: u64,
    /// Payloads dropped because they did not decode or parse.
    pub skipped: u64,
    pub termination: Termination,
}

///
/// Receives every record, in stream order.
///
pub trait RecordSink: Send {
    fn accept(&mut self, record: Record);
}

///
/// Log every record pretty-printed.
///
#[derive(Debug, Clone, Default)]
pub struct LogSink;

impl RecordSink for LogSink {
    fn accept(&mut self, record: Record) {
        info!("{}", record);
    }
}

impl RecordSink for Vec<Record> {
    fn accept(&mut self, record: Record) {
        self.push(record);
    }
}

impl RecordSink for RecordTx {
    fn accept(&mut self, record: Record) {
        if self.send(record).is_err() {
            warn!("Record receiver dropped, discarding record");
        }
    }
}

impl<S: RecordSink + ?Sized> RecordSink for &mut S {
    fn accept(&mut self, record: Record) {
        (**self).accept(record);
    }
}

///
/// Single-consumer loop over one [`Transport`].
///
/// Payloads are processed one at a time, in the order they arrive. A payload that fails to
/// decode or parse is logged and skipped; end of stream or a transport failure ends the run.
/// A run never reconnects.
///
pub struct StreamConsumer<T: Transport, S: RecordSink> {
    transport: T,
    sink: S,
    state: StreamState,
}

impl<T: Transport, S: RecordSink> StreamConsumer<T, S> {
    pub fn new(transport: T, sink: S) -> Self {
        Self {
            transport,
            sink,
            state: StreamState::Connecting,
        }
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn transition(&mut self, next: StreamState) {
        debug!(
            "[{}] {} -> {}",
            self.transport.name(),
            self.state,
            next
        );
        self.state = next;
    }

    ///
    /// Connect, subscribe and consume until the stream ends.
    ///
    /// Connect and subscribe failures are returned as errors; once streaming, the run
    /// always ends with a [`StreamReport`].
    ///
    pub async fn run(&mut self) -> Result<StreamReport, StreamError> {
        let tag = self.transport.name().to_string();

        if self.state != StreamState::Connecting {
            return Err(StreamError::Subscribe(format!(
                "consumer already {}, create a new one to reconnect",
                self.state
            )));
        }

        info!(
            "[{}] Attempting to connect to {}...",
            tag,
            self.transport.endpoint()
        );

        let connection = match self.transport.connect().await {
            Ok(connection) => connection,
            Err(err) => {
                error!("[{}] {}", tag, err);
                self.transition(StreamState::Terminated);
                return Err(err);
            }
        };

        info!("[{}] Successfully connected.", tag);
        self.transition(StreamState::Subscribing);

        let mut handle = match self.transport.subscribe(connection).await {
            Ok(handle) => handle,
            Err(err) => {
                error!("[{}] {}", tag, err);
                self.transition(StreamState::Terminated);
                return Err(err);
            }
        };

        info!("[{}] Subscription successful. Waiting for new data...", tag);
        self.transition(StreamState::Streaming);

        let mut records = 0;
        let mut skipped = 0;

        let termination = loop {
            let result = match handle.next().await {
                Ok(payload) => process(&tag, payload),
                Err(err) => Err(err),
            };

            match result {
                Ok(record) => {
                    self.sink.accept(record);
                    records += 1;
                }
                Err(err) if err.is_skippable() => {
                    warn!("[{}] Skipping message: {}", tag, err);
                    skipped += 1;
                }
                Err(StreamError::EndOfStream) => {
                    info!("[{}] Stream closed by the server (EOF).", tag);
                    break Termination::EndOfStream;
                }
                Err(err) => {
                    error!("[{}] {}", tag, err);
                    break Termination::Transport(err.to_string());
                }
            }
        };

        self.transition(StreamState::Terminated);

        Ok(StreamReport {
            records,
            skipped,
            termination,
        })
    }
}

fn process(tag: &str, payload: Payload) -> Result<Record, StreamError> {
    match payload {
        Payload::Compressed(raw) => normalize(&decode(&raw)?),
        Payload::Block(block) => {
            log_block(tag, &block);
            Ok(Record::from(&block))
        }
    }
}

fn log_block(tag: &str, block: &Block) {
    info!(
        "=> [{}] Received new block: Number={}, Hash={}, TransactionCount={}",
        tag,
        block.block_number,
        block.block_hash,
        block.transactions.len()
    );

    match tx::summarize(&block.transactions) {
        Ok(summaries) => {
            for summary in summaries {
                debug!(
                    "[{}] Transaction {} ({}, {} bytes)",
                    tag, summary.hash, summary.kind, summary.size
                );
            }
        }
        Err(err) => warn!("[{}] Could not summarize transactions: {}", tag, err),
    }
}
