use std::panic::AssertUnwindSafe;

use actor::{Actor, SupervisionStrategy};
use actor_ref::ActorRef;
use futures::FutureExt;
use mailbox::{mailbox, DEFAULT_MAILBOX_CAPACITY};

pub mod actor;
pub mod actor_ref;
pub mod handler;
pub mod mailbox;

/// Creates and runs an actor. If the actor panics, it is either restarted,
/// resumed or stopped according to `Actor::on_fail()`.
pub fn run<A, F>(actor_factory: F) -> ActorRef<A>
where
    A: Actor,
    F: 'static + Send + Fn() -> A,
{
    run_with_capacity(DEFAULT_MAILBOX_CAPACITY, actor_factory)
}

pub fn run_with_capacity<A, F>(capacity: usize, actor_factory: F) -> ActorRef<A>
where
    A: Actor,
    F: 'static + Send + Fn() -> A,
{
    let (mailbox, mut inbox) = mailbox(capacity);
    let mut actor = actor_factory();
    let actor_ref = ActorRef::new(mailbox);

    tokio::spawn(async move {
        log::debug!("{}: started", actor.name());
        while let Some(mut envelope) = inbox.next().await {
            let result = AssertUnwindSafe(envelope.deliver(&mut actor))
                .catch_unwind()
                .await;
            let Err(why) = result else {
                continue;
            };

            log::error!("{}: handler panicked", actor.name());
            match actor.on_fail(why) {
                SupervisionStrategy::Restart => {
                    log::warn!("{}: restarting with fresh state", actor.name());
                    actor = actor_factory();
                }
                SupervisionStrategy::Resume => {}
                SupervisionStrategy::Stop => break,
            }
        }
        log::debug!("{}: stopped", actor.name());
    });

    actor_ref
}

#[cfg(test)]
mod tests {
    use std::any::Any;

    use async_trait::async_trait;

    use super::*;
    use crate::{
        actor::ActorError,
        handler::{Handler, Message},
    };

    #[derive(Default)]
    struct Tally {
        entries: Vec<u32>,
    }

    struct Record(u32);

    impl Message for Record {
        type Response = usize;
    }

    struct Explode;

    impl Message for Explode {
        type Response = ();
    }

    impl Actor for Tally {
        fn on_fail(&mut self, _: Box<dyn Any + Send>) -> SupervisionStrategy {
            SupervisionStrategy::Restart
        }
    }

    #[async_trait]
    impl Handler<Record> for Tally {
        async fn handle(&mut self, message: Record) -> usize {
            self.entries.push(message.0);
            self.entries.len()
        }
    }

    #[async_trait]
    impl Handler<Explode> for Tally {
        async fn handle(&mut self, _: Explode) {
            panic!("boom");
        }
    }

    #[tokio::test]
    async fn messages_are_handled_in_order() {
        let tally = run(Tally::default);
        tally.tell(Record(1)).await.unwrap();
        tally.tell(Record(2)).await.unwrap();
        assert_eq!(tally.ask(Record(3)).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn panicking_handler_restarts_the_actor() {
        let tally = run(Tally::default);
        tally.ask(Record(1)).await.unwrap();
        assert_eq!(tally.ask(Explode).await, Err(ActorError::NoAnswer));
        assert_eq!(tally.ask(Record(2)).await.unwrap(), 1);
        assert!(tally.is_running());
    }
}
