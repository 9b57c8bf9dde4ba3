use std::fmt;

use tracing::info;

use crate::error::{FundtrackError, Result};

/// The two navigable views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`: every tracked fund
    FundCollection,
    /// `/fund/:name`: one fund and its live estimate
    FundDetail { name: String },
}

impl Route {
    pub fn resolve(path: &str) -> Result<Self> {
        let not_found = || FundtrackError::RouteNotFound {
            path: path.to_string(),
        };

        let trimmed = path.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Ok(Self::FundCollection);
        }

        match trimmed.strip_prefix("/fund/") {
            Some(name) if !name.is_empty() && !name.contains('/') => Ok(Self::FundDetail {
                name: name.to_string(),
            }),
            _ => Err(not_found()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::FundCollection => "FundCollection",
            Self::FundDetail { .. } => "FundDetail",
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::FundCollection => "/".to_string(),
            Self::FundDetail { name } => format!("/fund/{}", name),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Resolve `path` and log the transition.
pub fn navigate(path: &str) -> Result<Route> {
    let route = Route::resolve(path)?;
    info!(view = route.name(), "Navigating to: {}", route);
    Ok(route)
}
