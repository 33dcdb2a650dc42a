use super::Document;

use std::{
    collections::VecDeque,
    fmt,
    pin::Pin,
    task::{Context, Poll},
};
use tokio_stream::{Stream, StreamExt};

/// A stream of result rows.
///
/// Drivers return this from streaming queries; rows are pulled one at a
/// time so a consumer that awaits between rows applies backpressure to the
/// producer.
#[derive(Default)]
pub struct RowStream {
    buffer: VecDeque<Document>,
    stream: Option<DynStream>,
}

#[derive(Debug)]
struct Iter<I> {
    iter: I,
}

type DynStream = Pin<Box<dyn Stream<Item = crate::Result<Document>> + Send + 'static>>;

impl RowStream {
    pub fn from_stream<T>(stream: T) -> Self
    where
        T: Stream<Item = crate::Result<Document>> + Send + 'static,
    {
        Self {
            buffer: VecDeque::new(),
            stream: Some(Box::pin(stream)),
        }
    }

    pub fn from_vec(rows: Vec<Document>) -> Self {
        Self {
            buffer: rows.into(),
            stream: None,
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_iter<I>(iter: I) -> Self
    where
        I: Iterator<Item = crate::Result<Document>> + Send + Unpin + 'static,
    {
        Self::from_stream(Iter { iter })
    }

    /// Returns the next row in the stream
    pub async fn next(&mut self) -> Option<crate::Result<Document>> {
        StreamExt::next(self).await
    }

    pub async fn collect(mut self) -> crate::Result<Vec<Document>> {
        let (min, _) = self.size_hint();
        let mut ret = Vec::with_capacity(min);

        while let Some(res) = self.next().await {
            ret.push(res?);
        }

        Ok(ret)
    }
}

impl Stream for RowStream {
    type Item = crate::Result<Document>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if let Some(next) = self.buffer.pop_front() {
            return Poll::Ready(Some(Ok(next)));
        }

        match &mut self.stream {
            Some(stream) => Pin::new(stream).poll_next(cx),
            None => Poll::Ready(None),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let buffered = self.buffer.len();

        match &self.stream {
            Some(stream) => {
                let (low, high) = stream.size_hint();
                (low + buffered, high.map(|high| high + buffered))
            }
            None => (buffered, Some(buffered)),
        }
    }
}

impl<I> Stream for Iter<I>
where
    I: Iterator<Item = crate::Result<Document>> + Unpin,
{
    type Item = crate::Result<Document>;

    fn poll_next(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Poll::Ready(self.iter.next())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl From<Vec<Document>> for RowStream {
    fn from(rows: Vec<Document>) -> Self {
        Self::from_vec(rows)
    }
}

impl fmt::Debug for RowStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowStream")
            .field("buffered", &self.buffer.len())
            .field("streaming", &self.stream.is_some())
            .finish()
    }
}
