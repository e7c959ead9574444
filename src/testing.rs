//! In-memory `AuthApi` fakes for unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use futures::channel::oneshot;

use crate::config::Endpoint;
use crate::net::api::AuthApi;
use crate::net::types::{Credentials, TransportError};

pub(crate) type Reply = Result<u16, TransportError>;

/// Answers requests immediately from a fixed script and records each call.
#[derive(Default)]
pub(crate) struct ScriptedApi {
    replies: RefCell<VecDeque<Reply>>,
    calls: RefCell<Vec<(Endpoint, Option<Credentials>)>>,
}

impl ScriptedApi {
    pub(crate) fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self { replies: RefCell::new(replies.into_iter().collect()), calls: RefCell::default() }
    }

    pub(crate) fn status(status: u16) -> Self {
        Self::new([Ok(status)])
    }

    pub(crate) fn calls(&self) -> Vec<(Endpoint, Option<Credentials>)> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl AuthApi for ScriptedApi {
    async fn send(&self, endpoint: Endpoint, credentials: Option<&Credentials>) -> Reply {
        self.calls.borrow_mut().push((endpoint, credentials.cloned()));
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Request("script exhausted".to_owned())))
    }
}

/// Holds each request open until the test sends its reply, so tests choose
/// the order in which responses arrive.
pub(crate) struct GatedApi {
    pending: RefCell<VecDeque<oneshot::Receiver<Reply>>>,
}

impl GatedApi {
    /// Returns the fake plus one sender per expected request, in issue order.
    pub(crate) fn new(requests: usize) -> (Self, Vec<oneshot::Sender<Reply>>) {
        let (senders, receivers): (Vec<_>, VecDeque<_>) = (0..requests).map(|_| oneshot::channel()).unzip();
        (Self { pending: RefCell::new(receivers) }, senders)
    }
}

#[async_trait(?Send)]
impl AuthApi for GatedApi {
    async fn send(&self, _endpoint: Endpoint, _credentials: Option<&Credentials>) -> Reply {
        let Some(rx) = self.pending.borrow_mut().pop_front() else {
            return Err(TransportError::Request("unexpected request".to_owned()));
        };
        rx.await.unwrap_or_else(|_| Err(TransportError::Request("reply dropped".to_owned())))
    }
}
