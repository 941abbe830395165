use crate::access_control::domain::model::{
    entities::policy_document::{PolicyDocument, PolicyRule},
    value_objects::policy_constraints::PolicyConstraints,
};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PolicyEvaluation {
    pub allowed: bool,
    pub constraints: PolicyConstraints,
}

/// Evaluates declarative allow rules against an action/resource/environment triple.
///
/// Only allow rules grant anything; absence of a matching allow rule is a deny.
/// An engine without any rule at all means "no policy configured", which the
/// authorizer treats as open authorization (see [`PolicyEngine::has_rules`]).
#[derive(Clone, Debug, Default)]
pub struct PolicyEngine {
    documents: Vec<PolicyDocument>,
}

impl PolicyEngine {
    pub fn new(documents: Vec<PolicyDocument>) -> Self {
        Self { documents }
    }

    pub fn evaluate(&self, action: &str, resource: &str, environment: &str) -> PolicyEvaluation {
        let mut evaluation = PolicyEvaluation::default();

        for rule in self.documents.iter().flat_map(|document| &document.rules) {
            if !Self::rule_matches(rule, action, resource, environment) {
                continue;
            }

            evaluation.allowed = true;
            evaluation.constraints.merge(&rule.conditions);
        }

        evaluation
    }

    pub fn has_rules(&self) -> bool {
        self.documents.iter().any(|document| !document.rules.is_empty())
    }

    fn rule_matches(rule: &PolicyRule, action: &str, resource: &str, environment: &str) -> bool {
        if !rule.is_allow() {
            return false;
        }

        if !rule.actions.iter().any(|a| a.eq_ignore_ascii_case(action)) {
            return false;
        }

        if !rule
            .resources
            .iter()
            .any(|pattern| resource_pattern_matches(pattern, resource))
        {
            return false;
        }

        let environments = &rule.conditions.environment;
        environments.is_empty() || environments.iter().any(|e| e.eq_ignore_ascii_case(environment))
    }
}

/// Segment-wise glob over `/`-separated resource identifiers.
///
/// `*` inside a segment matches any run of characters within that segment,
/// `**` is treated as `*`, a bare `*` matches everything and a trailing `/*`
/// matches the prefix followed by one or more further segments.
pub fn resource_pattern_matches(pattern: &str, resource: &str) -> bool {
    let mut pattern = pattern.trim().to_string();
    while pattern.contains("**") {
        pattern = pattern.replace("**", "*");
    }

    if pattern == "*" {
        return true;
    }

    let pattern_segments = pattern.split('/').collect::<Vec<_>>();
    let resource_segments = resource.split('/').collect::<Vec<_>>();

    if let Some((&"*", prefix)) = pattern_segments.split_last() {
        return resource_segments.len() > prefix.len()
            && prefix
                .iter()
                .zip(&resource_segments)
                .all(|(p, r)| segment_matches(p, r));
    }

    pattern_segments.len() == resource_segments.len()
        && pattern_segments
            .iter()
            .zip(&resource_segments)
            .all(|(p, r)| segment_matches(p, r))
}

fn segment_matches(pattern: &str, value: &str) -> bool {
    let pattern = pattern.as_bytes();
    let value = value.as_bytes();

    let (mut p, mut v) = (0usize, 0usize);
    let mut backtrack: Option<(usize, usize)> = None;

    while v < value.len() {
        if p < pattern.len() && pattern[p] == b'*' {
            backtrack = Some((p, v));
            p += 1;
        } else if p < pattern.len() && pattern[p] == value[v] {
            p += 1;
            v += 1;
        } else if let Some((star_p, star_v)) = backtrack {
            p = star_p + 1;
            v = star_v + 1;
            backtrack = Some((star_p, star_v + 1));
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|&c| c == b'*')
}
