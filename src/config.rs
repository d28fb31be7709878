use crate::Category;

// Placeholder substituted with the category dataset name
const MODULE_NAME_PLACEHOLDER: &str = "{module_name}";

// Well-known mirrors serving the same registry dataset
const DEFAULT_MIRRORS: [&str; 3] = [
    "https://v2.nonebot.dev/{module_name}.json",
    "https://raw.fastgit.org/nonebot/nonebot2/master/website/static/{module_name}.json",
    "https://cdn.jsdelivr.net/gh/nonebot/nonebot2/website/static/{module_name}.json",
];

/// Mirror configuration for a [`crate::RegistryStore`].
///
/// Every template is expected to serve the same dataset; the store treats
/// them as interchangeable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub mirrors: Vec<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            mirrors: DEFAULT_MIRRORS.iter().map(|m| (*m).to_string()).collect(),
        }
    }
}

impl StoreConfig {
    // Override the mirror list, keeping the defaults when nothing is given
    #[must_use]
    pub fn with_mirrors(mirrors: Vec<String>) -> Self {
        let mirrors: Vec<String> = mirrors
            .into_iter()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .collect();

        if mirrors.is_empty() {
            Self::default()
        } else {
            Self { mirrors }
        }
    }

    /// Expand the templates for one category, in declared order.
    #[must_use]
    pub fn mirror_urls(&self, category: Category) -> Vec<String> {
        self.mirrors
            .iter()
            .map(|template| template.replace(MODULE_NAME_PLACEHOLDER, category.module_name()))
            .collect()
    }
}
