use std::{any::Any, error::Error, fmt};

/// What the runtime does with an actor whose handler panicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisionStrategy {
    /// Replace the actor with a fresh instance from its factory.
    Restart,
    /// Keep the current state and continue with the next message.
    Resume,
    /// Stop processing. Pending and future requests fail with
    /// [`ActorError::Closed`].
    Stop,
}

pub trait Actor: Send + Sync + 'static {
    /// Name used in log output.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Called when a handler on the actor panics. The return value decides
    /// how the runtime continues.
    /// NOTE: If this method panics, the actor can not recover from the panic.
    #[allow(unused_variables)]
    fn on_fail(&mut self, error: Box<dyn Any + Send>) -> SupervisionStrategy {
        SupervisionStrategy::Restart
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorError {
    /// The actor is not running anymore.
    Closed,
    /// The actor dropped the request without answering, usually because the
    /// handler panicked.
    NoAnswer,
}

impl fmt::Display for ActorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "actor mailbox is closed"),
            Self::NoAnswer => write!(f, "actor did not answer"),
        }
    }
}

impl Error for ActorError {}
