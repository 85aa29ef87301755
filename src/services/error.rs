// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

/// Failure talking to an external provider over D-Bus.
#[derive(Debug)]
pub enum ProviderError {
    /// The D-Bus call, property read or signal subscription failed.
    Bus(zbus::Error),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Bus(e) => write!(f, "D-Bus error: {e}"),
        }
    }
}

impl std::error::Error for ProviderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProviderError::Bus(e) => Some(e),
        }
    }
}

impl From<zbus::Error> for ProviderError {
    fn from(err: zbus::Error) -> Self {
        ProviderError::Bus(err)
    }
}
