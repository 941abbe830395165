#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleDefinition {
    pub name: String,
    pub permissions: Vec<String>,
}
