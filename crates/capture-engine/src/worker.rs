//! Single background worker that runs capture jobs in FIFO order.

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

type Job = Box<dyn FnOnce() + Send + 'static>;

enum Message {
    Run(Job),
    Flush(oneshot::Sender<()>),
}

/// Serial executor for blocking capture work.
///
/// Jobs run one at a time on tokio's blocking pool, in the order they were
/// enqueued. A job that panics is logged and does not stop the worker.
#[derive(Debug)]
pub struct CaptureWorker {
    sender: mpsc::UnboundedSender<Message>,
    handle: JoinHandle<()>,
}

impl CaptureWorker {
    /// Spawn the worker loop. Must be called from within a tokio runtime.
    pub fn spawn() -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Message>();

        let handle = tokio::spawn(async move {
            tracing::debug!("Capture worker started");
            while let Some(message) = receiver.recv().await {
                match message {
                    Message::Run(job) => {
                        if let Err(e) = tokio::task::spawn_blocking(job).await {
                            tracing::error!(error = %e, "Capture job panicked");
                        }
                    }
                    Message::Flush(done) => {
                        let _ = done.send(());
                    }
                }
            }
            tracing::debug!("Capture worker stopped");
        });

        Self { sender, handle }
    }

    /// Queue a job. Returns false if the worker has stopped.
    pub fn enqueue<F>(&self, job: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        self.sender.send(Message::Run(Box::new(job))).is_ok()
    }

    /// Wait until every job queued before this call has finished.
    pub async fn flush(&self) {
        let (done, wait) = oneshot::channel();
        if self.sender.send(Message::Flush(done)).is_ok() {
            let _ = wait.await;
        }
    }

    /// Finish queued jobs, then stop the worker.
    pub async fn shutdown(self) {
        let Self { sender, handle } = self;
        drop(sender);
        if let Err(e) = handle.await {
            tracing::error!(error = %e, "Capture worker task failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[tokio::test]
    async fn test_jobs_run_in_enqueue_order() {
        let worker = CaptureWorker::spawn();
        let order = Arc::new(Mutex::new(Vec::new()));

        for i in 0..5u64 {
            let order = order.clone();
            assert!(worker.enqueue(move || {
                // Earlier jobs sleep longer; order must still hold.
                std::thread::sleep(Duration::from_millis(10 * (5 - i)));
                order.lock().unwrap().push(i);
            }));
        }
        worker.flush().await;

        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_jobs_never_overlap() {
        let worker = CaptureWorker::spawn();
        let running = Arc::new(Mutex::new(0u32));
        let max_seen = Arc::new(Mutex::new(0u32));

        for _ in 0..4 {
            let running = running.clone();
            let max_seen = max_seen.clone();
            worker.enqueue(move || {
                let now = {
                    let mut r = running.lock().unwrap();
                    *r += 1;
                    *r
                };
                {
                    let mut m = max_seen.lock().unwrap();
                    *m = (*m).max(now);
                }
                std::thread::sleep(Duration::from_millis(5));
                *running.lock().unwrap() -= 1;
            });
        }
        worker.shutdown().await;

        assert_eq!(*max_seen.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_panicking_job_does_not_stop_worker() {
        let worker = CaptureWorker::spawn();
        let ran = Arc::new(Mutex::new(false));

        worker.enqueue(|| panic!("boom"));
        let flag = ran.clone();
        worker.enqueue(move || *flag.lock().unwrap() = true);
        worker.flush().await;

        assert!(*ran.lock().unwrap());
    }
}
