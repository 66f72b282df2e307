use std::collections::BTreeMap;

use postboard_types::{
    chart::SeriesConfig,
    column::{column, ColumnSpec, POST_COLUMNS},
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use super::{
    error::Error,
    store::{KeyValueStore, StoreError},
};

/// A state mutation: either a full replacement or a function of the old value.
pub enum Updater<T> {
    Replace(T),
    Apply(Box<dyn FnOnce(&T) -> T>),
}

impl<T> Updater<T> {
    pub fn apply(f: impl FnOnce(&T) -> T + 'static) -> Self {
        Updater::Apply(Box::new(f))
    }

    fn resolve(self, old: &T) -> T {
        match self {
            Updater::Replace(value) => value,
            Updater::Apply(f) => f(old),
        }
    }
}

impl<T> From<T> for Updater<T> {
    fn from(value: T) -> Self {
        Updater::Replace(value)
    }
}

/// Reads `name` from the store, falling back to `T::default()` when it is
/// missing or does not decode.
fn load_or_default<T, S>(store: &S, name: &str) -> Result<T, StoreError>
where
    T: DeserializeOwned + Default,
    S: KeyValueStore,
{
    let value = match store.get(name) {
        Ok(Some(value)) => value,
        Ok(None) => {
            debug!("No stored {}, using defaults", name);
            return Ok(T::default());
        }
        Err(StoreError::Json(e)) => {
            warn!("Stored {} is not valid JSON, using defaults: {}", name, e);
            return Ok(T::default());
        }
        Err(e) => return Err(e),
    };
    match serde_json::from_value(value) {
        Ok(decoded) => Ok(decoded),
        Err(e) => {
            warn!("Stored {} has an unexpected shape, using defaults: {}", name, e);
            Ok(T::default())
        }
    }
}

pub type ColumnSizing = BTreeMap<String, u32>;
pub type ColumnVisibility = BTreeMap<String, bool>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableSettings {
    #[serde(default)]
    column_sizing: Option<ColumnSizing>,
    #[serde(default)]
    column_visibility: ColumnVisibility,
}

/// Persisted post table layout: column widths and visibility.
/// Every mutation is written through to the store before it takes effect.
pub struct ColumnLayout<S> {
    store: S,
    sizing: ColumnSizing,
    visibility: ColumnVisibility,
}

impl<S: KeyValueStore> ColumnLayout<S> {
    pub const STORAGE_NAME: &'static str = "table-settings";

    pub fn load(store: S) -> Result<Self, Error> {
        let stored: TableSettings = load_or_default(&store, Self::STORAGE_NAME)?;
        Ok(Self {
            sizing: stored.column_sizing.unwrap_or_else(Self::default_sizing),
            visibility: stored.column_visibility,
            store,
        })
    }

    /// Minimum width of every column in the static column spec.
    pub fn default_sizing() -> ColumnSizing {
        POST_COLUMNS
            .iter()
            .map(|c| (c.id.to_string(), c.min_size))
            .collect()
    }

    pub fn sizing(&self) -> &ColumnSizing {
        &self.sizing
    }

    pub fn visibility(&self) -> &ColumnVisibility {
        &self.visibility
    }

    pub fn width(&self, id: &str) -> Option<u32> {
        self.sizing
            .get(id)
            .copied()
            .or_else(|| column(id).map(|c| c.min_size))
    }

    /// Columns without an entry are visible.
    pub fn is_visible(&self, id: &str) -> bool {
        self.visibility.get(id).copied().unwrap_or(true)
    }

    pub fn visible_columns(&self) -> Vec<&'static ColumnSpec> {
        POST_COLUMNS
            .iter()
            .filter(|c| self.is_visible(c.id))
            .collect()
    }

    pub fn set_sizing(&mut self, update: impl Into<Updater<ColumnSizing>>) -> Result<(), Error> {
        let sizing = update.into().resolve(&self.sizing);
        self.persist(&sizing, &self.visibility)?;
        self.sizing = sizing;
        Ok(())
    }

    pub fn set_visibility(
        &mut self,
        update: impl Into<Updater<ColumnVisibility>>,
    ) -> Result<(), Error> {
        let visibility = update.into().resolve(&self.visibility);
        self.persist(&self.sizing, &visibility)?;
        self.visibility = visibility;
        Ok(())
    }

    pub fn resize(&mut self, id: &str, width: u32) -> Result<(), Error> {
        let id = id.to_string();
        self.set_sizing(Updater::apply(move |old: &ColumnSizing| {
            let mut next = old.clone();
            next.insert(id, width);
            next
        }))
    }

    /// Flips one column and returns its new visibility.
    pub fn toggle_visibility(&mut self, id: &str) -> Result<bool, Error> {
        let visible = !self.is_visible(id);
        let id = id.to_string();
        self.set_visibility(Updater::apply(move |old: &ColumnVisibility| {
            let mut next = old.clone();
            next.insert(id, visible);
            next
        }))?;
        Ok(visible)
    }

    fn persist(&self, sizing: &ColumnSizing, visibility: &ColumnVisibility) -> Result<(), StoreError> {
        let settings = TableSettings {
            column_sizing: Some(sizing.clone()),
            column_visibility: visibility.clone(),
        };
        self.store
            .set(Self::STORAGE_NAME, serde_json::to_value(settings)?)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredChartSettings {
    #[serde(default)]
    settings: BTreeMap<String, Vec<SeriesConfig>>,
}

/// Persisted per-chart series colors and visibility.
pub struct ChartSettings<S> {
    store: S,
    settings: BTreeMap<String, Vec<SeriesConfig>>,
}

impl<S: KeyValueStore> ChartSettings<S> {
    pub const STORAGE_NAME: &'static str = "chart-settings";

    pub fn load(store: S) -> Result<Self, Error> {
        let stored: StoredChartSettings = load_or_default(&store, Self::STORAGE_NAME)?;
        Ok(Self {
            store,
            settings: stored.settings,
        })
    }

    pub fn get(&self, chart_id: &str) -> Option<&[SeriesConfig]> {
        self.settings.get(chart_id).map(Vec::as_slice)
    }

    /// Stored settings for the chart, or `defaults` when none were saved.
    pub fn resolve(&self, chart_id: &str, defaults: Vec<SeriesConfig>) -> Vec<SeriesConfig> {
        self.settings.get(chart_id).cloned().unwrap_or(defaults)
    }

    pub fn set(&mut self, chart_id: &str, items: Vec<SeriesConfig>) -> Result<(), Error> {
        let mut next = self.settings.clone();
        next.insert(chart_id.to_string(), items);
        self.persist(next)?;
        Ok(())
    }

    pub fn reset(&mut self, chart_id: &str) -> Result<(), Error> {
        if !self.settings.contains_key(chart_id) {
            return Ok(());
        }
        let mut next = self.settings.clone();
        next.remove(chart_id);
        self.persist(next)?;
        Ok(())
    }

    fn persist(&mut self, settings: BTreeMap<String, Vec<SeriesConfig>>) -> Result<(), StoreError> {
        let stored = StoredChartSettings { settings };
        self.store
            .set(Self::STORAGE_NAME, serde_json::to_value(&stored)?)?;
        self.settings = stored.settings;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{JsonFileStore, MemoryStore};
    use postboard_types::chart::default_series;
    use serde_json::{json, Value};

    /// Reads like `MemoryStore`, refuses every write.
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, name: &str) -> Result<Option<Value>, StoreError> {
            self.0.get(name)
        }

        fn set(&self, _name: &str, _value: Value) -> Result<(), StoreError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }
    }

    #[test]
    fn test_failed_write_keeps_state() {
        let mut layout = ColumnLayout::load(ReadOnlyStore(MemoryStore::new())).unwrap();
        let err = layout.resize("title", 400).unwrap_err();
        assert!(matches!(err, Error::Store(StoreError::Io(_))));
        assert_eq!(err.user_message(), "Could not save preferences.");
        assert_eq!(layout.width("title"), Some(120));

        let mut charts = ChartSettings::load(ReadOnlyStore(MemoryStore::new())).unwrap();
        let err = charts
            .set("mood", default_series([("happy", "Happy")]))
            .unwrap_err();
        assert!(matches!(err, Error::Store(_)));
        assert!(charts.get("mood").is_none());
    }

    #[test]
    fn test_defaults_from_column_spec() {
        let store = MemoryStore::new();
        let layout = ColumnLayout::load(&store).unwrap();
        assert_eq!(layout.width("category"), Some(80));
        assert_eq!(layout.width("title"), Some(120));
        assert_eq!(layout.width("body"), Some(150));
        assert_eq!(layout.width("tags"), Some(100));
        assert_eq!(layout.width("createdAt"), Some(90));
        assert!(layout.visibility().is_empty());
        assert_eq!(layout.visible_columns().len(), POST_COLUMNS.len());
        // Loading alone does not write.
        assert!(store.get(ColumnLayout::<&MemoryStore>::STORAGE_NAME).unwrap().is_none());
    }

    #[test]
    fn test_visibility_survives_reload() {
        let store = MemoryStore::new();
        let mut layout = ColumnLayout::load(&store).unwrap();
        assert!(!layout.toggle_visibility("body").unwrap());
        assert!(!layout.is_visible("body"));
        let before = layout.visibility().clone();
        drop(layout);

        let reloaded = ColumnLayout::load(&store).unwrap();
        assert_eq!(reloaded.visibility(), &before);
        assert!(!reloaded.is_visible("body"));
        assert!(reloaded.is_visible("title"));
        let ids: Vec<&str> = reloaded.visible_columns().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["category", "title", "tags", "createdAt"]);
    }

    #[test]
    fn test_sizing_replace_and_apply() {
        let store = MemoryStore::new();
        let mut layout = ColumnLayout::load(&store).unwrap();

        let mut replacement = ColumnSizing::new();
        replacement.insert("title".to_string(), 300);
        layout.set_sizing(replacement).unwrap();
        assert_eq!(layout.sizing().len(), 1);
        assert_eq!(layout.width("title"), Some(300));
        // Unknown widths fall back to the column minimum.
        assert_eq!(layout.width("body"), Some(150));
        assert_eq!(layout.width("nope"), None);

        layout.resize("body", 210).unwrap();
        assert_eq!(layout.width("body"), Some(210));
        assert_eq!(layout.width("title"), Some(300));

        let stored = store.get("table-settings").unwrap().unwrap();
        assert_eq!(
            stored,
            json!({
                "columnSizing": {"body": 210, "title": 300},
                "columnVisibility": {},
            })
        );
    }

    #[tracing_test::traced_test]
    #[test]
    fn test_unexpected_shape_falls_back_to_defaults() {
        let store = MemoryStore::new();
        store
            .set("table-settings", json!({"columnSizing": "wide"}))
            .unwrap();
        let layout = ColumnLayout::load(&store).unwrap();
        assert_eq!(layout.sizing(), &ColumnLayout::<&MemoryStore>::default_sizing());
        assert!(logs_contain("unexpected shape"));
    }

    #[test]
    fn test_layout_in_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut layout = ColumnLayout::load(JsonFileStore::new(dir.path())).unwrap();
        layout.resize("tags", 140).unwrap();
        layout.toggle_visibility("createdAt").unwrap();

        let reloaded = ColumnLayout::load(JsonFileStore::new(dir.path())).unwrap();
        assert_eq!(reloaded.width("tags"), Some(140));
        assert!(!reloaded.is_visible("createdAt"));
    }

    #[test]
    fn test_chart_settings_roundtrip_and_reset() {
        let store = MemoryStore::new();
        let defaults = default_series([("happy", "Happy"), ("tired", "Tired")]);
        let mut charts = ChartSettings::load(&store).unwrap();
        assert!(charts.get("mood").is_none());
        assert_eq!(charts.resolve("mood", defaults.clone()), defaults);

        let mut custom = defaults.clone();
        custom[1].visible = false;
        custom[0].color = "#000000".to_string();
        charts.set("mood", custom.clone()).unwrap();

        let reloaded = ChartSettings::load(&store).unwrap();
        assert_eq!(reloaded.get("mood"), Some(custom.as_slice()));

        let mut charts = reloaded;
        charts.reset("mood").unwrap();
        assert_eq!(charts.resolve("mood", defaults.clone()), defaults);
        assert!(ChartSettings::load(&store).unwrap().get("mood").is_none());
    }
}
