use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown grammar rule '{name}'")]
pub struct UnknownRule {
    pub name: String,
}

impl UnknownRule {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
