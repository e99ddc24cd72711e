//! Stream interception: demultiplexing a producer's output.
//!
//! A producer yields a mix of domain values and messages through the
//! [`Emission`] item type. Wrapping it with [`intercept`](InterceptIterator::intercept)
//! turns it into a value-only producer: values pass through to the consumer
//! untouched, messages are broadcast to the bound registry at the point they
//! flow past and consumed. This lets business logic emit progress and status
//! messages without threading a notifier through every call.
//!
//! The same adapter serves both pull disciplines: [`Intercepted`] is an
//! [`Iterator`] when the wrapped producer is an iterator and a [`Stream`]
//! when it is a stream. The final-only variants ([`InterceptIterator::intercept_last`],
//! [`Intercepted::last_value`]) drain the producer and keep only the last
//! forwarded value.

use crate::message::Message;
use crate::registry::Registry;
use pin_project::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio_stream::Stream;

/// One item produced by an intercepted producer.
#[derive(Debug)]
pub enum Emission<T> {
    /// A domain value, forwarded to the consumer.
    Value(T),
    /// A side-channel message, diverted to the bound registry.
    Message(Message),
}

impl<T> From<Message> for Emission<T> {
    fn from(msg: Message) -> Self {
        Emission::Message(msg)
    }
}

/// A producer wrapped with message interception.
#[pin_project]
pub struct Intercepted<P> {
    #[pin]
    inner: P,
    registry: Registry,
}

impl<P> Intercepted<P> {
    fn new(inner: P, registry: Registry) -> Self {
        Self { inner, registry }
    }

    /// Drains a stream producer, returning the last forwarded value.
    ///
    /// Messages are still broadcast as they flow past; `None` when the
    /// producer finished without yielding any value.
    pub async fn last_value<T>(self) -> Option<T>
    where
        P: Stream<Item = Emission<T>>,
    {
        use futures::StreamExt;

        let mut last = None;
        let mut stream = std::pin::pin!(self);
        while let Some(value) = stream.as_mut().next().await {
            last = Some(value);
        }
        last
    }
}

impl<P, T> Iterator for Intercepted<P>
where
    P: Iterator<Item = Emission<T>>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            match self.inner.next()? {
                Emission::Value(value) => return Some(value),
                Emission::Message(msg) => self.registry.to_all(msg).send(),
            }
        }
    }
}

impl<P, T> Stream for Intercepted<P>
where
    P: Stream<Item = Emission<T>>,
{
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        let mut this = self.project();
        loop {
            match this.inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(Emission::Value(value))) => return Poll::Ready(Some(value)),
                Poll::Ready(Some(Emission::Message(msg))) => {
                    this.registry.to_all(msg).send();
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Interception entry points for synchronous producers.
pub trait InterceptIterator<T>: Iterator<Item = Emission<T>> + Sized {
    /// Interleave-through wrapping: every value is re-yielded, messages are
    /// broadcast to `registry` as they flow past.
    fn intercept(self, registry: &Registry) -> Intercepted<Self> {
        Intercepted::new(self, registry.clone())
    }

    /// Final-only wrapping: drains the producer and returns the last value.
    fn intercept_last(self, registry: &Registry) -> Option<T> {
        self.intercept(registry).last()
    }
}

impl<I, T> InterceptIterator<T> for I where I: Iterator<Item = Emission<T>> {}

/// Interception entry points for stream producers.
pub trait InterceptStream<T>: Stream<Item = Emission<T>> + Sized {
    /// Interleave-through wrapping with a suspension point at every produced
    /// item. For the final-only variant, chain [`Intercepted::last_value`].
    fn intercept(self, registry: &Registry) -> Intercepted<Self> {
        Intercepted::new(self, registry.clone())
    }
}

impl<S, T> InterceptStream<T> for S where S: Stream<Item = Emission<T>> {}
