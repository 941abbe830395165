/// Environment tag of the target connection. Empty means "untagged".
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct EnvironmentName(String);

impl EnvironmentName {
    pub fn new(value: String) -> Self {
        Self(value.trim().to_string())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}
