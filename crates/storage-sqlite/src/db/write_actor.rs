use std::any::Any;

use diesel::SqliteConnection;
use log::error;
use rentledger_core::errors::{Error, Result};
use tokio::sync::{mpsc, oneshot};

use super::DbPool;
use crate::errors::StorageError;

type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;
type AnyBox = Box<dyn Any + Send + 'static>;
type Envelope = (Job<AnyBox>, oneshot::Sender<Result<AnyBox>>);

/// Handle for sending write jobs to the writer actor.
///
/// SQLite allows one writer at a time; funnelling every write through a single
/// connection keeps writers from contending for the lock.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<Envelope>,
}

impl WriteHandle {
    /// Runs `job` inside an immediate transaction on the writer connection.
    ///
    /// The transaction rolls back when the job returns an error.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as AnyBox)),
                ret_tx,
            ))
            .await
            .map_err(|_| StorageError::WriterUnavailable("writer actor stopped".to_string()))?;

        let boxed = ret_rx.await.map_err(|_| {
            StorageError::WriterUnavailable("writer actor dropped the reply".to_string())
        })??;

        boxed
            .downcast::<T>()
            .map(|v| *v)
            .map_err(|_| Error::Unexpected("writer actor returned a mismatched type".to_string()))
    }
}

/// Spawns the writer actor on the current Tokio runtime.
///
/// The actor holds one pooled connection for its whole life and runs jobs in
/// arrival order. It stops once every [`WriteHandle`] is dropped.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<Envelope>(1024);

    tokio::spawn(async move {
        let mut conn = match pool.get() {
            Ok(conn) => conn,
            Err(e) => {
                error!("Writer actor could not acquire a connection: {}", e);
                let reason = e.to_string();
                while let Some((_, reply_tx)) = rx.recv().await {
                    let _ = reply_tx.send(Err(
                        StorageError::WriterUnavailable(reason.clone()).into()
                    ));
                }
                return;
            }
        };

        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<AnyBox> = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(Error::from);

            // The caller may have gone away; nothing to do then.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
