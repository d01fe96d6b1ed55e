use crux_core::capability::{Capability, CapabilityContext, Operation};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::SubscriptionId;

/// Rotation value as reported by the device, before it is collapsed into
/// portrait or landscape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RawOrientation {
    PortraitUp,
    PortraitDown,
    LandscapeLeft,
    LandscapeRight,
    Unknown,
}

impl RawOrientation {
    pub const ALL: [Self; 5] = [
        Self::PortraitUp,
        Self::PortraitDown,
        Self::LandscapeLeft,
        Self::LandscapeRight,
        Self::Unknown,
    ];
}

/// Device-wide rotation lock request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationLock {
    #[default]
    Unlocked,
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "data")]
pub enum OrientationOperation {
    Subscribe { subscription: SubscriptionId },
    Unsubscribe { subscription: SubscriptionId },
    Lock(OrientationLock),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OrientationOutput {
    Changed(RawOrientation),
    LockApplied(OrientationLock),
    Released,
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrientationError {
    #[error("rotation lock {lock:?} rejected: {message}")]
    LockRejected {
        lock: OrientationLock,
        message: String,
    },

    #[error("orientation sensor unavailable: {message}")]
    Unavailable { message: String },
}

pub type OrientationResult = Result<OrientationOutput, OrientationError>;

impl Operation for OrientationOperation {
    type Output = OrientationResult;
}

pub struct Orientation<E> {
    context: CapabilityContext<OrientationOperation, E>,
}

impl<Ev> Capability<Ev> for Orientation<Ev> {
    type Operation = OrientationOperation;
    type MappedSelf<MappedEv> = Orientation<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Orientation::new(self.context.map_event(f))
    }
}

impl<E> Orientation<E>
where
    E: 'static,
{
    pub fn new(context: CapabilityContext<OrientationOperation, E>) -> Self {
        Self { context }
    }

    /// Registers a rotation listener in the shell. Every rotation the shell
    /// reports under `subscription` becomes one event. The listener ends
    /// after the shell answers with `Released`.
    pub fn subscribe<F>(&self, subscription: SubscriptionId, make_event: F)
    where
        F: Fn(OrientationResult) -> E + Send + 'static,
    {
        let context = self.context.clone();
        self.context.spawn(async move {
            let mut changes =
                context.stream_from_shell(OrientationOperation::Subscribe { subscription });
            while let Some(change) = changes.next().await {
                let released = matches!(change, Ok(OrientationOutput::Released));
                context.update_app(make_event(change));
                if released {
                    break;
                }
            }
        });
    }

    pub fn unsubscribe(&self, subscription: SubscriptionId) {
        let context = self.context.clone();
        self.context.spawn(async move {
            context
                .notify_shell(OrientationOperation::Unsubscribe { subscription })
                .await;
        });
    }

    pub fn lock<F>(&self, lock: OrientationLock, make_event: F)
    where
        F: FnOnce(OrientationResult) -> E + Send + 'static,
    {
        let context = self.context.clone();
        self.context.spawn(async move {
            let result = context
                .request_from_shell(OrientationOperation::Lock(lock))
                .await;
            context.update_app(make_event(result));
        });
    }
}
