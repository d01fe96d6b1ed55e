use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkOperation {
    GetNetworkState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkState {
    pub is_connected: bool,
    pub is_internet_reachable: bool,
}

impl NetworkState {
    /// Online means both a link and a reachable internet.
    #[must_use]
    pub const fn is_online(self) -> bool {
        self.is_connected && self.is_internet_reachable
    }
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum NetworkError {
    #[error("network state unavailable: {message}")]
    Unavailable { message: String },
}

pub type NetworkResult = Result<NetworkState, NetworkError>;

impl Operation for NetworkOperation {
    type Output = NetworkResult;
}

pub struct Network<E> {
    context: CapabilityContext<NetworkOperation, E>,
}

impl<Ev> Capability<Ev> for Network<Ev> {
    type Operation = NetworkOperation;
    type MappedSelf<MappedEv> = Network<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Network::new(self.context.map_event(f))
    }
}

impl<E> Network<E>
where
    E: 'static,
{
    pub fn new(context: CapabilityContext<NetworkOperation, E>) -> Self {
        Self { context }
    }

    pub fn get_network_state<F>(&self, make_event: F)
    where
        F: FnOnce(NetworkResult) -> E + Send + 'static,
    {
        let context = self.context.clone();
        self.context.spawn(async move {
            let result = context
                .request_from_shell(NetworkOperation::GetNetworkState)
                .await;
            context.update_app(make_event(result));
        });
    }
}
