//! Stakeholder roles recognized by the platform.

use serde::{Deserialize, Serialize};

/// Closed set of stakeholder types a user can register as.
///
/// The wallet service only consumes the role for access decisions, but
/// the enumeration is kept complete so policy checks stay exhaustive.
/// Serialized labels match the platform's registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    Researcher,
    Innovator,
    Entrepreneur,
    Mentor,
    Investor,
    #[serde(rename = "Funding Agency")]
    FundingAgency,
    #[serde(rename = "Policy Maker")]
    PolicyMaker,
    #[serde(rename = "IPR Professional")]
    IprProfessional,
}

impl UserRole {
    /// Parse the role label forwarded in the `X-User-Role` header.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Researcher" => Some(Self::Researcher),
            "Innovator" => Some(Self::Innovator),
            "Entrepreneur" => Some(Self::Entrepreneur),
            "Mentor" => Some(Self::Mentor),
            "Investor" => Some(Self::Investor),
            "Funding Agency" => Some(Self::FundingAgency),
            "Policy Maker" => Some(Self::PolicyMaker),
            "IPR Professional" => Some(Self::IprProfessional),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Researcher => "Researcher",
            Self::Innovator => "Innovator",
            Self::Entrepreneur => "Entrepreneur",
            Self::Mentor => "Mentor",
            Self::Investor => "Investor",
            Self::FundingAgency => "Funding Agency",
            Self::PolicyMaker => "Policy Maker",
            Self::IprProfessional => "IPR Professional",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
