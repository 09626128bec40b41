//! Wallet access policy.

use std::collections::HashSet;

use super::UserRole;

/// Decides which roles may hold and operate a wallet.
///
/// The routing layer applies a coarser filter in front of the wallet
/// routes; this policy is the final authority and every operation
/// re-checks it.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    eligible: HashSet<UserRole>,
}

impl AccessPolicy {
    pub fn new(eligible: impl IntoIterator<Item = UserRole>) -> Self {
        Self {
            eligible: eligible.into_iter().collect(),
        }
    }

    /// True only for roles with genuine wallet semantics.
    pub fn can_access_wallet(&self, role: UserRole) -> bool {
        self.eligible.contains(&role)
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::new([UserRole::Researcher, UserRole::Innovator])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_admits_only_researchers_and_innovators() {
        let policy = AccessPolicy::default();
        assert!(policy.can_access_wallet(UserRole::Researcher));
        assert!(policy.can_access_wallet(UserRole::Innovator));
        for role in [
            UserRole::Entrepreneur,
            UserRole::Mentor,
            UserRole::Investor,
            UserRole::FundingAgency,
            UserRole::PolicyMaker,
            UserRole::IprProfessional,
        ] {
            assert!(!policy.can_access_wallet(role), "{role} must not have wallet access");
        }
    }

    #[test]
    fn policy_is_configurable() {
        let policy = AccessPolicy::new([UserRole::Mentor]);
        assert!(policy.can_access_wallet(UserRole::Mentor));
        assert!(!policy.can_access_wallet(UserRole::Researcher));
    }
}
