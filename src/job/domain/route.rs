//! Routing-key parser recovering the push a task reports against.
//!
//! Routing keys have the layout
//! `<destination>.v2.<project>.<revision>[.<pushLogId>]`. A project written
//! as `owner/repo` identifies a GitHub repository; a bare project name
//! identifies a Mercurial repository.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::RouteError;

const ROUTE_SEPARATOR: char = '.';
const SUPPORTED_VERSION: &str = "v2";

/// Version control host a push originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PushOrigin {
    /// Mercurial push log.
    #[serde(rename = "hg.mozilla.org")]
    Mercurial,
    /// GitHub repository.
    #[serde(rename = "github.com")]
    GitHub,
}

impl PushOrigin {
    /// Returns the canonical origin kind label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mercurial => "hg.mozilla.org",
            Self::GitHub => "github.com",
        }
    }
}

/// Push context recovered from a single routing key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushIdentity {
    destination: String,
    origin: PushOrigin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    owner: Option<String>,
    project: String,
    revision: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    push_id: Option<u64>,
}

impl PushIdentity {
    /// Parses a routing key.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError`] when the key is empty, has the wrong number of
    /// tokens, an unsupported version, an empty or malformed token, or a
    /// non-numeric push id.
    pub fn parse(route: &str) -> Result<Self, RouteError> {
        if route.is_empty() {
            return Err(RouteError::Empty);
        }

        let tokens: Vec<&str> = route.split(ROUTE_SEPARATOR).collect();
        let (destination, version, project_token, revision, push_token) =
            match tokens.as_slice() {
                [destination, version, project, revision] => {
                    (*destination, *version, *project, *revision, None)
                }
                [destination, version, project, revision, push_id] => {
                    (*destination, *version, *project, *revision, Some(*push_id))
                }
                _ => {
                    return Err(RouteError::TokenCount {
                        route: route.to_owned(),
                        found: tokens.len(),
                    });
                }
            };

        require_token(route, "destination", destination)?;
        if version != SUPPORTED_VERSION {
            return Err(RouteError::UnsupportedVersion {
                route: route.to_owned(),
                version: version.to_owned(),
            });
        }
        require_token(route, "project", project_token)?;
        require_token(route, "revision", revision)?;

        let (origin, owner, project) = split_project(route, project_token)?;
        let push_id = push_token
            .map(|token| parse_push_id(route, token))
            .transpose()?;

        Ok(Self {
            destination: destination.to_owned(),
            origin,
            owner,
            project,
            revision: revision.to_owned(),
            push_id,
        })
    }

    /// Returns the destination prefix (first routing-key token).
    #[must_use]
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Returns the push origin.
    #[must_use]
    pub const fn origin(&self) -> PushOrigin {
        self.origin
    }

    /// Returns the repository owner for GitHub pushes.
    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// Returns the project (repository) name.
    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Returns the pushed revision.
    #[must_use]
    pub fn revision(&self) -> &str {
        &self.revision
    }

    /// Returns the push log identifier, when the route carries one.
    #[must_use]
    pub const fn push_id(&self) -> Option<u64> {
        self.push_id
    }

    /// Returns the publish routing key, `<destination>.<project>`.
    #[must_use]
    pub fn routing_key(&self) -> String {
        format!("{}{ROUTE_SEPARATOR}{}", self.destination, self.project)
    }
}

impl fmt::Display for PushIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.owner {
            Some(owner) => write!(f, "{owner}/{}@{}", self.project, self.revision),
            None => write!(f, "{}@{}", self.project, self.revision),
        }
    }
}

fn require_token(route: &str, field: &'static str, token: &str) -> Result<(), RouteError> {
    if token.is_empty() {
        return Err(RouteError::EmptyToken {
            route: route.to_owned(),
            field,
        });
    }
    Ok(())
}

fn split_project(
    route: &str,
    token: &str,
) -> Result<(PushOrigin, Option<String>, String), RouteError> {
    let invalid = || RouteError::InvalidProject {
        route: route.to_owned(),
        project: token.to_owned(),
    };

    match token.split_once('/') {
        None => Ok((PushOrigin::Mercurial, None, token.to_owned())),
        Some((owner, repo)) => {
            if owner.is_empty() || repo.is_empty() || repo.contains('/') {
                return Err(invalid());
            }
            Ok((PushOrigin::GitHub, Some(owner.to_owned()), repo.to_owned()))
        }
    }
}

fn parse_push_id(route: &str, token: &str) -> Result<u64, RouteError> {
    let is_decimal = !token.is_empty() && token.chars().all(|ch| ch.is_ascii_digit());
    if !is_decimal {
        return Err(RouteError::InvalidPushId {
            route: route.to_owned(),
            push_id: token.to_owned(),
        });
    }
    token.parse().map_err(|_| RouteError::InvalidPushId {
        route: route.to_owned(),
        push_id: token.to_owned(),
    })
}
