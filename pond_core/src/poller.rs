//! Background polling of the remote reading source.
//!
//! Spawns a thread that owns the `SensorSource`, publishes the newest
//! reading via a bounded channel, and tracks the last-ok timestamp so the
//! dashboard can show staleness. Fetch failures are skipped; the consumer
//! keeps whatever it saw last. Settings mutation and polling are fully
//! independent; no ordering is guaranteed between an edit and the next poll.
//!
//! Each `ReadingPoller` spawns exactly one thread that is shut down when
//! the poller is dropped, even while a reading sits unconsumed in the
//! channel or the thread is waiting out the poll interval.
use crossbeam_channel as xch;
use pond_traits::Reading;
use pond_traits::SensorSource;
use pond_traits::clock::Clock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

pub struct ReadingPoller {
    rx: xch::Receiver<Reading>,
    last_ok: Arc<AtomicU64>,
    epoch: Instant,
    /// Dropping this disconnects the thread's stop channel, waking it out
    /// of a pending send or an interval wait.
    stop_tx: Option<xch::Sender<()>>,
    join_handle: Option<std::thread::JoinHandle<()>>,
}

impl ReadingPoller {
    pub fn spawn<S, C>(mut source: S, interval: Duration, timeout: Duration, clock: C) -> Self
    where
        S: SensorSource + Send + 'static,
        C: Clock + Send + Sync + 'static,
    {
        let (tx, rx) = xch::bounded(1);
        let (stop_tx, stop_rx) = xch::bounded::<()>(0);
        let last_ok = Arc::new(AtomicU64::new(0));
        let last_ok_clone = last_ok.clone();
        let epoch = clock.now();

        let join_handle = std::thread::spawn(move || {
            loop {
                match stop_rx.try_recv() {
                    Ok(()) | Err(xch::TryRecvError::Disconnected) => {
                        tracing::debug!("poller thread received shutdown signal");
                        break;
                    }
                    Err(xch::TryRecvError::Empty) => {}
                }

                match source.fetch_latest(timeout) {
                    Ok(reading) => {
                        // The channel holds one reading; when the consumer
                        // has not drained it the send parks here, so it must
                        // stay interruptible by shutdown.
                        let delivered = xch::select! {
                            send(tx, reading) -> res => res.is_ok(),
                            recv(stop_rx) -> _ => {
                                tracing::debug!("poller thread received shutdown signal");
                                break;
                            }
                        };
                        if !delivered {
                            tracing::debug!("poller consumer disconnected, exiting thread");
                            break;
                        }
                        let now = clock.ms_since(epoch);
                        last_ok_clone.store(now, Ordering::Relaxed);
                    }
                    Err(e) => {
                        // Transient source failure: keep the previous reading
                        tracing::warn!(error = %e, "reading fetch failed");
                    }
                }

                // Interval wait doubling as a shutdown listener
                match stop_rx.recv_timeout(interval) {
                    Ok(()) | Err(xch::RecvTimeoutError::Disconnected) => break,
                    Err(xch::RecvTimeoutError::Timeout) => {}
                }
            }
            tracing::trace!("poller thread exiting cleanly");
        });

        Self {
            rx,
            last_ok,
            epoch,
            stop_tx: Some(stop_tx),
            join_handle: Some(join_handle),
        }
    }

    /// Newest reading observed since the last call, if any.
    pub fn latest(&self) -> Option<Reading> {
        self.rx.try_iter().last()
    }

    pub fn stalled_for(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.last_ok.load(Ordering::Relaxed))
    }

    /// Convenience helper: compute staleness from this poller's epoch using
    /// a real monotonic clock.
    pub fn stalled_for_now(&self) -> u64 {
        let now_ms = {
            let dur = Instant::now().saturating_duration_since(self.epoch);
            let ms = dur.as_millis();
            (ms.min(u128::from(u64::MAX))) as u64
        };
        now_ms.saturating_sub(self.last_ok.load(Ordering::Relaxed))
    }
}

impl Drop for ReadingPoller {
    fn drop(&mut self) {
        // Disconnecting the stop channel wakes the thread wherever it is
        // parked; only an in-flight fetch (bounded by its timeout) delays
        // the join.
        drop(self.stop_tx.take());

        if let Some(handle) = self.join_handle.take() {
            match handle.join() {
                Ok(()) => {
                    tracing::trace!("poller thread joined");
                }
                Err(e) => {
                    // A panic must not propagate out of Drop
                    tracing::warn!(?e, "poller thread panicked during shutdown");
                }
            }
        }
    }
}
