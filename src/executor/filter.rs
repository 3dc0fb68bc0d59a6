use std::borrow::Borrow;

use async_stream::stream;
use futures::stream::BoxStream;
use futures::{Stream, StreamExt};

use crate::predicate::Predicate;

/// Lazily keep the records a predicate holds for, in their original order.
///
/// Nothing is evaluated until the result is pulled, and every pulled record is tested exactly
/// once. Each call starts over on its own input.
pub fn filter<R, I>(predicate: &Predicate<R>, records: I) -> Filter<R, I::IntoIter>
where
    I: IntoIterator,
    I::Item: Borrow<R>,
{
    Filter {
        predicate: predicate.clone(),
        records: records.into_iter(),
    }
}

/// The stream counterpart of [`filter`].
pub fn filter_stream<R, S>(predicate: &Predicate<R>, records: S) -> BoxStream<'static, S::Item>
where
    R: 'static,
    S: Stream + Send + 'static,
    S::Item: Borrow<R> + Send,
{
    let predicate = predicate.clone();
    Box::pin(stream! {
        let mut records = Box::pin(records);
        while let Some(record) = records.next().await {
            if predicate.test(Borrow::<R>::borrow(&record)) {
                yield record;
            }
        }
    })
}

/// Iterator returned by [`filter`].
pub struct Filter<R, I> {
    predicate: Predicate<R>,
    records: I,
}

impl<R, I> Iterator for Filter<R, I>
where
    I: Iterator,
    I::Item: Borrow<R>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let predicate = &self.predicate;
        self.records
            .find(|record| predicate.test(Borrow::<R>::borrow(record)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.records.size_hint().1)
    }
}
