use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::capabilities::{HttpError, LocationError, SessionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorSeverity {
    /// Recovered inside the core, never shown to the user.
    Silent,
    /// Shown to the user; a retry may succeed.
    Transient,
    /// Shown to the user; needs action outside the app (e.g. settings).
    Permanent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    LocationPermissionDenied,
    Location,
    Connectivity,
    OrientationLock,
    Network,
    Deserialization,
    Session,
    Configuration,
}

impl ErrorKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::LocationPermissionDenied => "LOCATION_PERMISSION_DENIED",
            Self::Location => "LOCATION_ERROR",
            Self::Connectivity => "CONNECTIVITY_CHECK_FAILED",
            Self::OrientationLock => "ORIENTATION_LOCK_FAILED",
            Self::Network => "NETWORK_ERROR",
            Self::Deserialization => "DESERIALIZATION_ERROR",
            Self::Session => "SESSION_ERROR",
            Self::Configuration => "CONFIGURATION_ERROR",
        }
    }

    #[must_use]
    pub const fn default_severity(self) -> ErrorSeverity {
        match self {
            Self::Connectivity | Self::OrientationLock | Self::Configuration => {
                ErrorSeverity::Silent
            }
            Self::Location | Self::Network | Self::Session => ErrorSeverity::Transient,
            Self::LocationPermissionDenied | Self::Deserialization => ErrorSeverity::Permanent,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppError {
    pub kind: ErrorKind,
    pub severity: ErrorSeverity,
    pub message: String,
    pub context: BTreeMap<String, String>,
}

impl AppError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            message: message.into(),
            context: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }

    #[must_use]
    pub const fn is_surfaced(&self) -> bool {
        !matches!(self.severity, ErrorSeverity::Silent)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message)?;
        for (key, value) in &self.context {
            write!(f, " {key}={value}")?;
        }
        Ok(())
    }
}

impl std::error::Error for AppError {}

/// Why an acquisition cycle ended in `LocationState::Error`.
///
/// The `Display` text is what the map screen shows inline.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum AcquisitionError {
    #[error("permission denied")]
    PermissionDenied,

    #[error("location fetch failed")]
    FetchFailed { reason: String },
}

impl AcquisitionError {
    pub fn fetch_failed(reason: impl Into<String>) -> Self {
        Self::FetchFailed {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn notice(&self) -> Notice {
        match self {
            Self::PermissionDenied => Notice::new(
                "Permission Denied",
                "The app needs access to your location to work",
            ),
            Self::FetchFailed { .. } => Notice::new("Error", "Could not get your location"),
        }
    }
}

impl From<LocationError> for AcquisitionError {
    fn from(e: LocationError) -> Self {
        Self::fetch_failed(e.to_string())
    }
}

impl From<&AcquisitionError> for AppError {
    fn from(e: &AcquisitionError) -> Self {
        match e {
            AcquisitionError::PermissionDenied => {
                AppError::new(ErrorKind::LocationPermissionDenied, e.to_string())
            }
            AcquisitionError::FetchFailed { reason } => {
                AppError::new(ErrorKind::Location, e.to_string()).with_context("reason", reason)
            }
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("catalog payload could not be decoded: {0}")]
    Decode(String),
}

impl From<&CatalogError> for AppError {
    fn from(e: &CatalogError) -> Self {
        let kind = match e {
            CatalogError::Http(_) => ErrorKind::Network,
            CatalogError::Decode(_) => ErrorKind::Deserialization,
        };
        AppError::new(kind, e.to_string())
    }
}

impl From<&SessionError> for AppError {
    fn from(e: &SessionError) -> Self {
        AppError::new(ErrorKind::Session, e.to_string())
    }
}

/// A blocking, user-facing alert the shell shows modally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}
