//! Typed SSE broadcasting built on `tokio::sync::broadcast`.

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::{Stream, StreamExt};
use serde::Serialize;
use std::{borrow::Cow, convert::Infallible, time::Duration};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

/// Fan-out channel for server-sent events.
/// - `T` must be `Clone` so every subscriber receives the same payload.
/// - The channel is bounded; a lagging subscriber loses the oldest messages
///   and then continues from wherever the stream is now.
#[derive(Clone)]
pub struct SseBroadcaster<T> {
    tx: broadcast::Sender<T>,
}

impl<T: Clone + Send + 'static> SseBroadcaster<T> {
    /// Create a broadcaster with bounded buffer capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Broadcast a single message to current subscribers.
    /// Errors are ignored: zero subscribers is the normal idle case.
    pub fn send(&self, value: T) {
        let _ = self.tx.send(value);
    }

    /// Number of live subscribers.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Subscribe to a typed stream of messages; lag errors are filtered out.
    pub fn subscribe_stream(&self) -> impl Stream<Item = T> {
        BroadcastStream::new(self.tx.subscribe()).filter_map(|res| async move { res.ok() })
    }

    /// SSE response carrying JSON payloads under a constant `event:` name,
    /// with periodic keepalive pings to survive idle proxies.
    pub fn sse_response_named(
        &self,
        event_name: impl Into<Cow<'static, str>> + 'static,
    ) -> Sse<impl Stream<Item = Result<Event, Infallible>>>
    where
        T: Serialize,
    {
        let event_name = event_name.into();
        let stream = self.subscribe_stream().map(move |msg| {
            let ev = Event::default()
                .event(&event_name)
                .json_data(&msg)
                .unwrap_or_else(|_| {
                    // Keep the stream alive even if one payload fails to encode.
                    Event::default().event(&event_name).data("serialization_error")
                });
            Ok(ev)
        });
        Sse::new(stream).keep_alive(
            KeepAlive::new()
                .interval(Duration::from_secs(15))
                .text("keepalive"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::pin_mut;

    #[derive(Clone, Debug, PartialEq, Serialize)]
    struct Ping(u32);

    #[tokio::test]
    async fn subscriber_receives_messages_in_order() {
        let sse = SseBroadcaster::<Ping>::new(8);
        let stream = sse.subscribe_stream();
        pin_mut!(stream);

        sse.send(Ping(1));
        sse.send(Ping(2));

        assert_eq!(stream.next().await, Some(Ping(1)));
        assert_eq!(stream.next().await, Some(Ping(2)));
    }

    #[tokio::test]
    async fn send_without_subscribers_is_a_no_op() {
        let sse = SseBroadcaster::<Ping>::new(8);
        assert_eq!(sse.receiver_count(), 0);
        sse.send(Ping(42));

        // A late subscriber sees only what is sent after it joined.
        let stream = sse.subscribe_stream();
        pin_mut!(stream);
        sse.send(Ping(43));
        assert_eq!(stream.next().await, Some(Ping(43)));
    }

    #[tokio::test]
    async fn lagging_subscriber_drops_oldest_and_recovers() {
        let sse = SseBroadcaster::<Ping>::new(2);
        let stream = sse.subscribe_stream();
        pin_mut!(stream);

        for i in 0..5 {
            sse.send(Ping(i));
        }

        // Capacity 2: only the newest two survive, and the lag error itself
        // is swallowed by the stream adapter.
        assert_eq!(stream.next().await, Some(Ping(3)));
        assert_eq!(stream.next().await, Some(Ping(4)));
    }
}
