// src/pipeline/batch.rs
// =============================================================================
// Sequential batches, concurrent within a batch.
//
// Items are taken `batch_size` at a time. Every operation in a batch runs
// concurrently and we wait for ALL of them (the barrier) before starting the
// next batch. Results come back in submission order.
//
// If any member fails, try_join_all drops the rest of that batch and the
// error is returned; later batches never start.
// =============================================================================

use futures::future::try_join_all;
use std::future::Future;
use tracing::debug;

use crate::error::Result;

pub async fn in_batches<I, T, F, Fut>(items: Vec<I>, batch_size: usize, mut op: F) -> Result<Vec<T>>
where
    F: FnMut(I) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let batch_size = batch_size.max(1);
    let total = items.len();
    let mut results = Vec::with_capacity(total);
    let mut items = items.into_iter();
    let mut batch_number = 0;

    loop {
        let batch: Vec<_> = items.by_ref().take(batch_size).map(&mut op).collect();
        if batch.is_empty() {
            break;
        }

        batch_number += 1;
        debug!(batch = batch_number, size = batch.len(), "starting batch");
        results.extend(try_join_all(batch).await?);
        debug!(batch = batch_number, done = results.len(), total, "batch complete");
    }

    Ok(results)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is try_join_all?
//    - Takes a list of futures and polls them all at the same time
//    - Resolves to Ok(Vec) in the original order once every future succeeds
//    - Resolves to the first Err as soon as any future fails, dropping the rest
//
// 2. Why by_ref().take(batch_size)?
//    - take() would normally consume the iterator
//    - by_ref() lends it instead, so the next loop iteration continues where
//      this batch stopped
//
// 3. Why is `op` FnMut and passed as &mut op?
//    - The coordinator's closures build a new future per item
//    - map() needs something callable; &mut F is callable when F is FnMut
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrapeError;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Event {
        Start(usize),
        End(usize),
    }

    #[tokio::test]
    async fn test_seven_items_ceiling_three_is_three_batches() {
        let log = Mutex::new(Vec::new());

        let results = in_batches((0..7).collect(), 3, |i: usize| {
            let log = &log;
            async move {
                log.lock().unwrap().push(Event::Start(i));
                // Slowest member is the first of each batch
                let delay = if i % 3 == 0 { 30 } else { 5 };
                tokio::time::sleep(Duration::from_millis(delay)).await;
                log.lock().unwrap().push(Event::End(i));
                Ok(i * 10)
            }
        })
        .await
        .unwrap();

        assert_eq!(results, vec![0, 10, 20, 30, 40, 50, 60]);

        let log = log.into_inner().unwrap();
        let position = |e: Event| log.iter().position(|x| *x == e).unwrap();
        let batches: [&[usize]; 3] = [&[0, 1, 2], &[3, 4, 5], &[6]];

        // Within a batch every member is running before any of them finishes
        for batch in batches {
            let last_start = batch.iter().map(|&i| position(Event::Start(i))).max().unwrap();
            let first_end = batch.iter().map(|&i| position(Event::End(i))).min().unwrap();
            assert!(last_start < first_end, "batch members ran one at a time");
        }

        // Between batches the barrier holds
        for pair in batches.windows(2) {
            let last_end = pair[0].iter().map(|&i| position(Event::End(i))).max().unwrap();
            let first_start = pair[1].iter().map(|&i| position(Event::Start(i))).min().unwrap();
            assert!(last_end < first_start, "batch started before the previous one finished");
        }
    }

    #[tokio::test]
    async fn test_failure_stops_later_batches() {
        let started = Mutex::new(Vec::new());

        let result = in_batches((0..6).collect(), 2, |i: usize| {
            let started = &started;
            async move {
                started.lock().unwrap().push(i);
                if i == 3 {
                    Err(ScrapeError::fetch("https://example.com/3", "HTTP 500"))
                } else {
                    Ok(i)
                }
            }
        })
        .await;

        assert!(result.is_err());
        let started = started.into_inner().unwrap();
        assert!(!started.contains(&4) && !started.contains(&5));
    }

    #[tokio::test]
    async fn test_empty_input() {
        let results: Vec<usize> = in_batches(Vec::<usize>::new(), 4, |i| async move { Ok(i) })
            .await
            .unwrap();
        assert!(results.is_empty());
    }
}
