use crate::access_control::domain::model::{
    entities::policy_document::PolicyDocument,
    enums::access_control_domain_error::AccessControlDomainError,
};

#[derive(Clone, Debug)]
pub struct UpsertPolicyDocumentCommand {
    name: String,
    document: PolicyDocument,
}

impl UpsertPolicyDocumentCommand {
    pub fn new(name: String, document: serde_json::Value) -> Result<Self, AccessControlDomainError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AccessControlDomainError::InvalidPolicyDocument(
                "name is required".to_string(),
            ));
        }

        let document = PolicyDocument::from_json(document)?;
        for rule in &document.rules {
            if rule.actions.iter().any(|a| a.trim().is_empty())
                || rule.resources.iter().any(|r| r.trim().is_empty())
            {
                return Err(AccessControlDomainError::InvalidPolicyDocument(
                    "actions and resources must not be blank".to_string(),
                ));
            }
        }

        Ok(Self { name, document })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn document(&self) -> &PolicyDocument {
        &self.document
    }
}
