use pit_core::ID;
use pit_core::Unique;

/// A seated identity: opaque id plus display name.
///
/// Authentication and session issuance live elsewhere; the engine only
/// carries identity through seats, snapshots, and ledger calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: ID<Self>,
    name: String,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ID::default(),
            name: name.into(),
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Unique for User {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
