use query_console_api::access_control::{
    domain::model::{
        entities::{
            policy_document::{PolicyDocument, PolicyRule, PolicyRuleConditions},
            role_definition::RoleDefinition,
        },
        queries::authorize_query::{AuthorizeQuery, AuthorizeQueryParts},
    },
    infrastructure::persistence::repositories::policy_document_repository::PolicyDocumentRecord,
};

pub const PRINCIPAL_ID: &str = "fedcba98-7654-7321-fedc-ba9876543210";

pub fn role(name: &str, permissions: &[&str]) -> RoleDefinition {
    RoleDefinition {
        name: name.to_string(),
        permissions: permissions.iter().map(|p| p.to_string()).collect(),
    }
}

pub fn allow_rule(actions: &[&str], resources: &[&str]) -> PolicyRule {
    PolicyRule {
        effect: "allow".to_string(),
        actions: actions.iter().map(|a| a.to_string()).collect(),
        resources: resources.iter().map(|r| r.to_string()).collect(),
        conditions: PolicyRuleConditions::default(),
    }
}

pub fn deny_rule(actions: &[&str], resources: &[&str]) -> PolicyRule {
    PolicyRule {
        effect: "deny".to_string(),
        ..allow_rule(actions, resources)
    }
}

pub fn with_conditions(mut rule: PolicyRule, conditions: PolicyRuleConditions) -> PolicyRule {
    rule.conditions = conditions;
    rule
}

pub fn document(name: &str, rules: Vec<PolicyRule>) -> PolicyDocumentRecord {
    PolicyDocumentRecord {
        name: name.to_string(),
        document: PolicyDocument {
            version: "1".to_string(),
            rules,
        },
    }
}

pub fn authorize_query(action: &str, resource: &str, environment: &str) -> AuthorizeQuery {
    AuthorizeQuery::new(AuthorizeQueryParts {
        principal_id: PRINCIPAL_ID.to_string(),
        is_admin: false,
        action_name: action.to_string(),
        resource_name: resource.to_string(),
        environment: environment.to_string(),
        request_id: Some("req-1".to_string()),
    })
    .expect("valid authorize query")
}

pub fn admin_authorize_query(action: &str, resource: &str) -> AuthorizeQuery {
    AuthorizeQuery::new(AuthorizeQueryParts {
        principal_id: PRINCIPAL_ID.to_string(),
        is_admin: true,
        action_name: action.to_string(),
        resource_name: resource.to_string(),
        environment: String::new(),
        request_id: None,
    })
    .expect("valid admin authorize query")
}
