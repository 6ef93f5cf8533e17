//! The identifiers and lifecycle states of a lead.
use std::{fmt, str::FromStr};

/// The identifier of a lead, as found in the request path.
///
/// It is an opaque token: no format checks happen here, a malformed
/// identifier simply never matches a stored lead.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct LeadId(String);

impl LeadId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for LeadId {
    fn from(id: String) -> Self {
        LeadId(id)
    }
}

impl From<&str> for LeadId {
    fn from(id: &str) -> Self {
        LeadId(id.to_owned())
    }
}

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a lead is in its lifecycle.
///
/// Stored, parsed and displayed as its lowercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeadStatus {
    New,
    Contacted,
    Closed,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 3] = [LeadStatus::New, LeadStatus::Contacted, LeadStatus::Closed];

    pub fn as_str(self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("`{0}` is not a lead status")]
pub struct UnknownStatus(String);

impl FromStr for LeadStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeadStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::LeadStatus;

    #[test]
    fn every_status_parses_from_its_name() {
        for status in LeadStatus::ALL.iter().copied() {
            assert_eq!(status.as_str().parse::<LeadStatus>().ok(), Some(status));
        }
    }

    #[test]
    fn parsing_is_exact() {
        for candidate in ["", "New", "CLOSED", " contacted", "archived"].iter() {
            assert!(candidate.parse::<LeadStatus>().is_err(), "{:?} was accepted", candidate);
        }
    }

    #[test]
    fn unknown_statuses_name_the_offending_value() {
        let err = "archived".parse::<LeadStatus>().unwrap_err();
        assert_eq!(err.to_string(), "`archived` is not a lead status");
    }
}
