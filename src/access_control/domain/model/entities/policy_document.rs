use serde::{Deserialize, Serialize};

use crate::access_control::domain::model::enums::{
    access_control_domain_error::AccessControlDomainError, permission_effect::PermissionEffect,
};

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct PolicyDocument {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub rules: Vec<PolicyRule>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct PolicyRule {
    pub effect: String,
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(default)]
    pub conditions: PolicyRuleConditions,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct PolicyRuleConditions {
    #[serde(
        default,
        alias = "requireWhere",
        skip_serializing_if = "Option::is_none"
    )]
    pub require_where: Option<bool>,
    #[serde(default, alias = "maxRows", skip_serializing_if = "Option::is_none")]
    pub max_rows: Option<u32>,
    #[serde(default, alias = "timeoutMs", skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    #[serde(default, alias = "readOnly", skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    #[serde(
        default,
        alias = "environments",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub environment: Vec<String>,
}

impl PolicyDocument {
    pub fn from_json(value: serde_json::Value) -> Result<Self, AccessControlDomainError> {
        let document: Self = serde_json::from_value(value)
            .map_err(|e| AccessControlDomainError::InvalidPolicyDocument(e.to_string()))?;

        for rule in &document.rules {
            rule.effect.parse::<PermissionEffect>()?;
        }

        Ok(document)
    }
}

impl PolicyRule {
    /// Unknown effects are treated like deny rules: they never grant anything.
    pub fn is_allow(&self) -> bool {
        matches!(self.effect.parse(), Ok(PermissionEffect::Allow))
    }
}
