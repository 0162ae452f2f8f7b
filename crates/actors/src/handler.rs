use std::marker::PhantomData;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::Actor;

#[async_trait]
pub trait Handler<M>: Actor
where
    M: Message,
{
    async fn handle(&mut self, message: M) -> M::Response;
}

pub trait Message: Send + 'static {
    type Response: Send + 'static;
}

/// A type erased message waiting in an actor's mailbox.
#[async_trait]
pub trait Envelope<A: Actor>: Send {
    async fn deliver(&mut self, actor: &mut A);
}

pub(crate) struct Letter<M, A>
where
    M: Message,
    A: Actor,
{
    message: Option<M>,
    reply_to: Option<oneshot::Sender<M::Response>>,
    _actor: PhantomData<fn(&mut A)>,
}

impl<M, A> Letter<M, A>
where
    M: Message,
    A: Actor,
{
    pub(crate) fn new(message: M, reply_to: Option<oneshot::Sender<M::Response>>) -> Self {
        Self {
            message: Some(message),
            reply_to,
            _actor: PhantomData,
        }
    }
}

#[async_trait]
impl<M, A> Envelope<A> for Letter<M, A>
where
    M: Message,
    A: Handler<M>,
{
    async fn deliver(&mut self, actor: &mut A) {
        // each letter is delivered exactly once
        let Some(message) = self.message.take() else {
            return;
        };
        let response = actor.handle(message).await;

        if let Some(reply_to) = self.reply_to.take() {
            if reply_to.send(response).is_err() {
                log::debug!("{}: requester went away before the answer", actor.name());
            }
        }
    }
}
