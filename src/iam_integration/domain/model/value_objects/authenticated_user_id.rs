use uuid::Uuid;

/// Owner of an active console session.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct AuthenticatedUserId(Uuid);

impl AuthenticatedUserId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}
