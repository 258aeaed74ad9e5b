//! One-shot delivery of a submission outcome.
use crate::{BroadcastError, ConnectorError, Transaction};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tokio::sync::oneshot;

/// The outcome of a submission
pub type SubmitResult = Result<Transaction, ConnectorError>;

/// Creates a linked completion / pending submission pair
pub fn completion() -> (Completion, PendingSubmission) {
    let (tx, rx) = oneshot::channel();
    (Completion { tx: Some(tx) }, PendingSubmission { rx })
}

/// The resolving half of a submission.
///
/// Resolving consumes the completion, so it can only happen once. A completion dropped
/// without being resolved delivers [`BroadcastError::Dropped`] instead.
#[derive(Debug)]
pub struct Completion {
    tx: Option<oneshot::Sender<SubmitResult>>,
}

impl Completion {
    pub fn complete(mut self, result: SubmitResult) {
        self.deliver(result)
    }

    fn deliver(&mut self, result: SubmitResult) {
        if let Some(tx) = self.tx.take() {
            // the receiver may have been dropped, nobody is listening then
            let _ = tx.send(result);
        }
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        if self.tx.is_some() {
            tracing::warn!("completion dropped before delivering an outcome");
            self.deliver(Err(ConnectorError::SubmitFailed(BroadcastError::Dropped)));
        }
    }
}

/// A pending submission which resolves exactly once, with the submitted transaction or
/// the reason it was not submitted.
#[must_use = "submissions do nothing unless polled or awaited"]
#[derive(Debug)]
pub struct PendingSubmission {
    rx: oneshot::Receiver<SubmitResult>,
}

impl PendingSubmission {
    /// Takes the outcome if it has already been delivered.
    ///
    /// Precondition failures are delivered before `submit` returns, so they are always
    /// available here.
    pub fn try_result(&mut self) -> Option<SubmitResult> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => {
                Some(Err(ConnectorError::SubmitFailed(BroadcastError::Dropped)))
            }
        }
    }
}

impl Future for PendingSubmission {
    type Output = SubmitResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => {
                Poll::Ready(Err(ConnectorError::SubmitFailed(BroadcastError::Dropped)))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
