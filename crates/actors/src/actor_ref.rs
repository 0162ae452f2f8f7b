use tokio::sync::oneshot;

use crate::{
    actor::{Actor, ActorError},
    handler::{Handler, Letter, Message},
    mailbox::Mailbox,
};

/// Handle to a running actor. Cloning it is cheap; the actor stops once the
/// last handle is dropped.
pub struct ActorRef<A: Actor> {
    mailbox: Mailbox<A>,
}

impl<A: Actor> Clone for ActorRef<A> {
    fn clone(&self) -> Self {
        Self {
            mailbox: self.mailbox.clone(),
        }
    }
}

impl<A: Actor> ActorRef<A> {
    pub(crate) fn new(mailbox: Mailbox<A>) -> Self {
        Self { mailbox }
    }

    /// Queues `message` without waiting for it to be handled.
    pub async fn tell<M>(&self, message: M) -> Result<(), ActorError>
    where
        M: Message,
        A: Handler<M>,
    {
        self.mailbox.post(Letter::<M, A>::new(message, None)).await
    }

    /// Queues `message` and waits for the handler's response. Messages are
    /// handled one at a time, in the order they were queued.
    pub async fn ask<M>(&self, message: M) -> Result<M::Response, ActorError>
    where
        M: Message,
        A: Handler<M>,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.mailbox
            .post(Letter::<M, A>::new(message, Some(reply_tx)))
            .await?;
        reply_rx.await.map_err(|_| ActorError::NoAnswer)
    }

    pub fn is_running(&self) -> bool {
        !self.mailbox.is_closed()
    }
}
