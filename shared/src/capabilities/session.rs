use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionOperation {
    SignOut,
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum SessionError {
    #[error("sign-out failed: {message}")]
    SignOutFailed { message: String },
}

pub type SessionResult = Result<(), SessionError>;

impl Operation for SessionOperation {
    type Output = SessionResult;
}

pub struct Session<E> {
    context: CapabilityContext<SessionOperation, E>,
}

impl<Ev> Capability<Ev> for Session<Ev> {
    type Operation = SessionOperation;
    type MappedSelf<MappedEv> = Session<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Session::new(self.context.map_event(f))
    }
}

impl<E> Session<E>
where
    E: 'static,
{
    pub fn new(context: CapabilityContext<SessionOperation, E>) -> Self {
        Self { context }
    }

    pub fn sign_out<F>(&self, make_event: F)
    where
        F: FnOnce(SessionResult) -> E + Send + 'static,
    {
        let context = self.context.clone();
        self.context.spawn(async move {
            let result = context.request_from_shell(SessionOperation::SignOut).await;
            context.update_app(make_event(result));
        });
    }
}
