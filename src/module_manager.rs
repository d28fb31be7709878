use anyhow::Result;
use module_store::{format_package_results, ModuleRecord, RegistryStore, StoreConfig};

// Layout overrides for the listing
#[derive(Debug, Clone, Copy, Default)]
pub struct Layout {
    pub name_column_width: Option<usize>,
    pub terminal_width: Option<usize>,
}

// ModuleManager handles the business logic
pub struct ModuleManager {
    store: RegistryStore,
    layout: Layout,
}

impl ModuleManager {
    pub fn new(config: StoreConfig, layout: Layout) -> Self {
        Self {
            store: RegistryStore::new(config),
            layout,
        }
    }

    // All modules of one kind
    pub async fn list(&self, kind: &str) -> Result<Vec<ModuleRecord>> {
        Ok(self.store.load_module_data(kind).await?)
    }

    // Modules of one kind matching a query
    pub async fn search(&self, kind: &str, query: &str) -> Result<Vec<ModuleRecord>> {
        let records = self.store.load_module_data(kind).await?;
        Ok(records
            .into_iter()
            .filter(|record| record.info().matches(query))
            .collect())
    }

    // Render records as an aligned listing
    pub fn render(&self, records: &[ModuleRecord]) -> String {
        format_package_results(
            records,
            self.layout.name_column_width,
            self.layout.terminal_width,
        )
    }
}
