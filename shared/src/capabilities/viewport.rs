use crux_core::capability::{Capability, CapabilityContext, Operation};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::SubscriptionId;

/// Window size in device-independent pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewportDimensions {
    pub width: f64,
    pub height: f64,
}

impl ViewportDimensions {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "data")]
pub enum ViewportOperation {
    Measure,
    Subscribe { subscription: SubscriptionId },
    Unsubscribe { subscription: SubscriptionId },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ViewportOutput {
    Dimensions(ViewportDimensions),
    Released,
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum ViewportError {
    #[error("window metrics unavailable: {message}")]
    Unavailable { message: String },
}

pub type ViewportResult = Result<ViewportOutput, ViewportError>;

impl Operation for ViewportOperation {
    type Output = ViewportResult;
}

pub struct Viewport<E> {
    context: CapabilityContext<ViewportOperation, E>,
}

impl<Ev> Capability<Ev> for Viewport<Ev> {
    type Operation = ViewportOperation;
    type MappedSelf<MappedEv> = Viewport<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Viewport::new(self.context.map_event(f))
    }
}

impl<E> Viewport<E>
where
    E: 'static,
{
    pub fn new(context: CapabilityContext<ViewportOperation, E>) -> Self {
        Self { context }
    }

    pub fn measure<F>(&self, make_event: F)
    where
        F: FnOnce(ViewportResult) -> E + Send + 'static,
    {
        let context = self.context.clone();
        self.context.spawn(async move {
            let result = context.request_from_shell(ViewportOperation::Measure).await;
            context.update_app(make_event(result));
        });
    }

    pub fn subscribe<F>(&self, subscription: SubscriptionId, make_event: F)
    where
        F: Fn(ViewportResult) -> E + Send + 'static,
    {
        let context = self.context.clone();
        self.context.spawn(async move {
            let mut changes =
                context.stream_from_shell(ViewportOperation::Subscribe { subscription });
            while let Some(change) = changes.next().await {
                let released = matches!(change, Ok(ViewportOutput::Released));
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
                .notify_shell(ViewportOperation::Unsubscribe { subscription })
                .await;
        });
    }
}
