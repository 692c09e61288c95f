//! Applicability of censor rules to a piece of content.
//!
//! Content is associated with a requester, a request and an organization. A rule
//! applies when it is global, or when any one of its bindings equals the matching
//! identifier of the content.

use serde::{Deserialize, Serialize};

use crate::config::CensorScope;

/// The identifiers of the content being redacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TargetIdentity {
    pub requester_id: Option<u64>,
    pub request_id: Option<u64>,
    pub organization_id: Option<u64>,
}

impl TargetIdentity {
    pub fn with_requester(mut self, id: u64) -> Self {
        self.requester_id = Some(id);
        self
    }

    pub fn with_request(mut self, id: u64) -> Self {
        self.request_id = Some(id);
        self
    }

    pub fn with_organization(mut self, id: u64) -> Self {
        self.organization_id = Some(id);
        self
    }
}

/// Returns true if a rule with `scope` may touch content identified by `target`.
///
/// Combined bindings are ANY-match: a rule bound to both a requester and an
/// organization applies to content of either.
pub fn applies_to(scope: &CensorScope, target: &TargetIdentity) -> bool {
    if scope.is_global() {
        return true;
    }
    bound_match(scope.requester_id, target.requester_id)
        || bound_match(scope.request_id, target.request_id)
        || bound_match(scope.organization_id, target.organization_id)
}

fn bound_match(bound: Option<u64>, target: Option<u64>) -> bool {
    matches!((bound, target), (Some(b), Some(t)) if b == t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requester_binding_filters_by_requester() {
        let scope = CensorScope::requester(1);
        assert!(applies_to(&scope, &TargetIdentity::default().with_requester(1)));
        assert!(!applies_to(&scope, &TargetIdentity::default().with_requester(2)));
    }

    #[test]
    fn test_global_scope_applies_everywhere() {
        let scope = CensorScope::global();
        assert!(applies_to(&scope, &TargetIdentity::default()));
        assert!(applies_to(&scope, &TargetIdentity::default().with_requester(9).with_request(4)));
    }

    #[test]
    fn test_unset_target_never_matches_a_binding() {
        let scope = CensorScope::request(5);
        assert!(!applies_to(&scope, &TargetIdentity::default()));
        assert!(!applies_to(&scope, &TargetIdentity::default().with_requester(5)));
    }

    #[test]
    fn test_combined_bindings_match_any() {
        let scope = CensorScope {
            requester_id: Some(1),
            request_id: None,
            organization_id: Some(7),
        };
        assert!(applies_to(&scope, &TargetIdentity::default().with_organization(7)));
        assert!(applies_to(&scope, &TargetIdentity::default().with_requester(1).with_organization(8)));
        assert!(!applies_to(&scope, &TargetIdentity::default().with_requester(2).with_organization(8)));
    }
}
