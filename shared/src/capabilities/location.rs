use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Accuracy hint passed to the platform location provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accuracy {
    Lowest,
    Low,
    Balanced,
    #[default]
    High,
    Highest,
    BestForNavigation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// A single resolved coordinate pair from the device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub accuracy_m: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "data")]
pub enum LocationOperation {
    RequestForegroundPermission,
    GetCurrentFix { accuracy: Accuracy },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum LocationOutput {
    Permission(PermissionStatus),
    Fix(Fix),
}

impl LocationOutput {
    fn into_permission(self) -> Result<PermissionStatus, LocationError> {
        match self {
            Self::Permission(status) => Ok(status),
            Self::Fix(_) => Err(LocationError::UnexpectedOutput),
        }
    }

    fn into_fix(self) -> Result<Fix, LocationError> {
        match self {
            Self::Fix(fix) => Ok(fix),
            Self::Permission(_) => Err(LocationError::UnexpectedOutput),
        }
    }
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum LocationError {
    #[error("location request timed out")]
    Timeout,

    #[error("location services are disabled")]
    ServiceDisabled,

    #[error("location provider error: {message}")]
    Provider { message: String },

    #[error("shell answered with an output that does not match the request")]
    UnexpectedOutput,
}

pub type LocationResult = Result<LocationOutput, LocationError>;

impl Operation for LocationOperation {
    type Output = LocationResult;
}

pub struct Location<E> {
    context: CapabilityContext<LocationOperation, E>,
}

impl<Ev> Capability<Ev> for Location<Ev> {
    type Operation = LocationOperation;
    type MappedSelf<MappedEv> = Location<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Location::new(self.context.map_event(f))
    }
}

impl<E> Location<E>
where
    E: 'static,
{
    pub fn new(context: CapabilityContext<LocationOperation, E>) -> Self {
        Self { context }
    }

    /// Asks the user for foreground location access. Suspends in the shell
    /// until the user answers the system prompt.
    pub fn request_foreground_permission<F>(&self, make_event: F)
    where
        F: FnOnce(Result<PermissionStatus, LocationError>) -> E + Send + 'static,
    {
        let context = self.context.clone();
        self.context.spawn(async move {
            let result = context
                .request_from_shell(LocationOperation::RequestForegroundPermission)
                .await
                .and_then(LocationOutput::into_permission);
            context.update_app(make_event(result));
        });
    }

    pub fn get_current_fix<F>(&self, accuracy: Accuracy, make_event: F)
    where
        F: FnOnce(Result<Fix, LocationError>) -> E + Send + 'static,
    {
        let context = self.context.clone();
        self.context.spawn(async move {
            let result = context
                .request_from_shell(LocationOperation::GetCurrentFix { accuracy })
                .await
                .and_then(LocationOutput::into_fix);
            context.update_app(make_event(result));
        });
    }
}
