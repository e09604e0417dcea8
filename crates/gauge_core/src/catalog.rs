use thiserror::Error;

/// Shown in place of a context limit when the model id is not in the catalog.
pub const UNKNOWN_LIMIT: &str = "—";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelProfile {
    pub id: String,
    pub label: String,
    pub context_limit: u64,
}

impl ModelProfile {
    pub fn new(id: impl Into<String>, label: impl Into<String>, context_limit: u64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            context_limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("model catalog is empty")]
    Empty,
    #[error("duplicate model id {0:?} in catalog")]
    DuplicateId(String),
}

/// Ordered, immutable set of model profiles with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCatalog {
    profiles: Vec<ModelProfile>,
}

impl ModelCatalog {
    pub fn new(profiles: Vec<ModelProfile>) -> Result<Self, CatalogError> {
        if profiles.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (idx, profile) in profiles.iter().enumerate() {
            if profiles[..idx].iter().any(|p| p.id == profile.id) {
                return Err(CatalogError::DuplicateId(profile.id.clone()));
            }
        }
        Ok(Self { profiles })
    }

    pub fn get(&self, id: &str) -> Option<&ModelProfile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// First entry; the default selection for a new session.
    pub fn first(&self) -> &ModelProfile {
        // `new` guarantees at least one profile.
        &self.profiles[0]
    }

    pub fn profiles(&self) -> &[ModelProfile] {
        &self.profiles
    }

    /// Display string for a model's context limit, e.g. `"128,000"`.
    pub fn limit_of(&self, id: &str) -> String {
        match self.get(id) {
            Some(profile) => format_with_commas(profile.context_limit),
            None => UNKNOWN_LIMIT.to_string(),
        }
    }

    /// Id following `id` in catalog order, wrapping around.
    pub fn next_id(&self, id: &str) -> &str {
        let len = self.profiles.len();
        let next = self.position(id).map_or(0, |idx| (idx + 1) % len);
        &self.profiles[next].id
    }

    /// Id preceding `id` in catalog order, wrapping around.
    pub fn previous_id(&self, id: &str) -> &str {
        let len = self.profiles.len();
        let prev = self
            .position(id)
            .map_or(len - 1, |idx| (idx + len - 1) % len);
        &self.profiles[prev].id
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.profiles.iter().position(|p| p.id == id)
    }
}

pub fn format_with_commas(value: u64) -> String {
    let mut out = String::new();
    for (i, ch) in value.to_string().chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}
