//!
//! The seam between a live connection and the consumer loop.
//!
//! A [`Transport`] knows how to connect and subscribe; the [`StreamHandle`] it hands back
//! yields one [`Payload`] per server message until the stream ends.
//!

use std::{fmt::Display, future::Future, time::Duration};

use async_trait::async_trait;

use crate::{errors::StreamError, proto::Block};

/// Compressed bytes exactly as received from the service.
pub type RawPayload = Vec<u8>;

///
/// One message received from a feed.
///
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Brotli compressed JSON document (flash block feeds).
    Compressed(RawPayload),
    /// Structured block (regular block feed).
    Block(Block),
}

///
/// Connect and subscribe to one feed.
///
/// Implementations attempt each step once. Reconnecting is left to the caller.
///
#[async_trait]
pub trait Transport: Send {
    /// The established, not yet subscribed, connection.
    type Connection: Send;
    /// The live subscription.
    type Handle: StreamHandle;

    /// Tag used in log lines, e.g. `FlashStream`.
    fn name(&self) -> &str;

    /// Where this transport connects to.
    fn endpoint(&self) -> &str;

    /// Establish the connection within a bounded time.
    async fn connect(&mut self) -> Result<Self::Connection, StreamError>;

    /// Open the authenticated subscription on `connection`.
    async fn subscribe(&mut self, connection: Self::Connection)
        -> Result<Self::Handle, StreamError>;
}

///
/// A live, authenticated subscription.
///
#[async_trait]
pub trait StreamHandle: Send {
    /// Wait for the next payload.
    ///
    /// [`StreamError::EndOfStream`] and [`StreamError::Transport`] are terminal, after them
    /// the handle must not be polled again. Skippable errors
    /// (see [`StreamError::is_skippable`]) leave the stream usable.
    async fn next(&mut self) -> Result<Payload, StreamError>;
}

///
/// Run `connect`, turning failure or expiry of `timeout` into [`StreamError::Connect`].
///
pub async fn connect_within<F, C, E>(
    endpoint: &str,
    timeout: Duration,
    connect: F,
) -> Result<C, StreamError>
where
    F: Future<Output = Result<C, E>>,
    E: Display,
{
    match tokio::time::timeout(timeout, connect).await {
        Ok(Ok(connection)) => Ok(connection),
        Ok(Err(err)) => Err(StreamError::connect(endpoint, err)),
        Err(_) => Err(StreamError::connect(
            endpoint,
            format!("timed out after {}s", timeout.as_secs_f64()),
        )),
    }
}
