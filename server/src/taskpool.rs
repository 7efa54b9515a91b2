use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

/// Bounded spawner for background operations.
///
/// At most `n_tasks` operations run at once; the rest queue on the semaphore.
/// Clones share the same permits and cancellation token, so cancelling one
/// pool handle stops every task spawned through any of them.
#[derive(Clone)]
pub struct TaskPool {
    semaphore: Arc<Semaphore>,
    cancel_token: CancellationToken,
}

impl TaskPool {
    pub fn new(n_tasks: usize) -> TaskPool {
        let semaphore = Arc::new(Semaphore::new(n_tasks.max(1)));
        let cancel_token = CancellationToken::new();

        TaskPool {
            semaphore,
            cancel_token,
        }
    }

    pub fn execute<F, T>(&self, func: F)
    where
        F: Future<Output = T> + Send + 'static,
        T: Send,
    {
        if self.is_shut_down() {
            log::debug!("Task pool is shut down, dropping task");
            return;
        }

        let semaphore = self.semaphore.clone();
        let token = self.cancel_token.clone();
        tokio::spawn(async move {
            let main = async {
                let Ok(_permit) = semaphore.acquire().await else {
                    return;
                };
                func.await;
            };

            tokio::select! {
                () = main => {},
                () = token.cancelled() => {}
            }
        });
    }

    /// Cancels every running and queued task.
    pub fn cancel_all(&self) {
        self.cancel_token.cancel();
    }

    /// Stops accepting new tasks.
    pub fn close(&self) {
        self.semaphore.close();
    }

    pub fn shutdown(&self) {
        self.close();
        self.cancel_all();
    }

    pub fn is_shut_down(&self) -> bool {
        self.cancel_token.is_cancelled() || self.semaphore.is_closed()
    }
}
