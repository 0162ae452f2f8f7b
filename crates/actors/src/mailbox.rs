use tokio::sync::mpsc;

use crate::{actor::ActorError, handler::Envelope, Actor};

/// Messages an actor may queue before senders have to wait.
pub const DEFAULT_MAILBOX_CAPACITY: usize = 32;

pub struct Mailbox<A: Actor>(mpsc::Sender<Box<dyn Envelope<A>>>);

impl<A: Actor> Clone for Mailbox<A> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<A: Actor> Mailbox<A> {
    pub(crate) async fn post<E>(&self, envelope: E) -> Result<(), ActorError>
    where
        E: Envelope<A> + 'static,
    {
        self.0
            .send(Box::new(envelope))
            .await
            .map_err(|_| ActorError::Closed)
    }

    pub fn is_closed(&self) -> bool {
        self.0.is_closed()
    }
}

pub(crate) struct Inbox<A: Actor>(mpsc::Receiver<Box<dyn Envelope<A>>>);

impl<A: Actor> Inbox<A> {
    pub(crate) async fn next(&mut self) -> Option<Box<dyn Envelope<A>>> {
        self.0.recv().await
    }
}

pub(crate) fn mailbox<A: Actor>(capacity: usize) -> (Mailbox<A>, Inbox<A>) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (Mailbox(tx), Inbox(rx))
}
