use std::fs;
use std::path::Path;

use anyhow::Context;
use gauge_core::{ModelCatalog, ModelProfile};
use gauge_logging::{gauge_info, gauge_warn};
use serde::Deserialize;

const SEED_CATALOG: &str = include_str!("../../assets/models.ron");

#[derive(Debug, Deserialize)]
struct CatalogFile {
    models: Vec<ProfileEntry>,
}

#[derive(Debug, Deserialize)]
struct ProfileEntry {
    id: String,
    label: String,
    context_limit: u64,
}

pub(crate) fn parse_catalog(content: &str) -> anyhow::Result<ModelCatalog> {
    let file: CatalogFile = ron::from_str(content).context("invalid catalog syntax")?;
    let profiles = file
        .models
        .into_iter()
        .map(|entry| ModelProfile::new(entry.id, entry.label, entry.context_limit))
        .collect();
    Ok(ModelCatalog::new(profiles)?)
}

pub(crate) fn seed_catalog() -> anyhow::Result<ModelCatalog> {
    parse_catalog(SEED_CATALOG).context("bundled model catalog is invalid")
}

/// Loads the catalog from `path`, falling back to the bundled seed when the
/// file is missing or invalid.
pub(crate) fn load_catalog(path: Option<&Path>) -> anyhow::Result<ModelCatalog> {
    let Some(path) = path else {
        return seed_catalog();
    };

    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            gauge_warn!("Failed to read model catalog from {:?}: {}", path, err);
            return seed_catalog();
        }
    };

    match parse_catalog(&content) {
        Ok(catalog) => {
            gauge_info!(
                "Loaded {} model profiles from {:?}",
                catalog.profiles().len(),
                path
            );
            Ok(catalog)
        }
        Err(err) => {
            gauge_warn!("Failed to parse model catalog from {:?}: {:#}", path, err);
            seed_catalog()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn seed_catalog_has_the_four_profiles_in_order() {
        let catalog = seed_catalog().unwrap();
        let ids: Vec<_> = catalog.profiles().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["openai", "claude", "gemini", "llama"]);
        assert_eq!(catalog.limit_of("openai"), "128,000");
        assert_eq!(catalog.limit_of("claude"), "200,000");
        assert_eq!(catalog.limit_of("gemini"), "1,000,000");
        assert_eq!(catalog.limit_of("llama"), "4,096");
        assert_eq!(catalog.get("llama").unwrap().label, "Llama-2");
    }

    #[test]
    fn loads_custom_catalog_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"(models: [(id: "mistral", label: "Mistral", context_limit: 32768)])"#
        )
        .unwrap();

        let catalog = load_catalog(Some(file.path())).unwrap();
        assert_eq!(catalog.first().id, "mistral");
        assert_eq!(catalog.limit_of("mistral"), "32,768");
    }

    #[test]
    fn invalid_or_missing_files_fall_back_to_seed() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("missing.ron");
        assert_eq!(load_catalog(Some(&missing)).unwrap(), seed_catalog().unwrap());

        let duplicate = dir.path().join("dup.ron");
        fs::write(
            &duplicate,
            r#"(models: [(id: "a", label: "A", context_limit: 1), (id: "a", label: "B", context_limit: 2)])"#,
        )
        .unwrap();
        assert_eq!(load_catalog(Some(&duplicate)).unwrap(), seed_catalog().unwrap());
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(parse_catalog("(models: [])").is_err());
    }
}
