//! # Dashboard
//!
//! Client-side state for browsing a document database through the API.
//!
//! The dashboard caches the last-fetched collection and filters it locally.
//! The filtered view is recomputed on every filter change. Mutations never
//! patch the cache; each one is followed by a full refetch, which also
//! resets the filter.

pub mod client;
pub mod errors;
pub mod export;
pub mod filter;

use std::path::{Path, PathBuf};

use serde_json::Value;

pub use client::{ApiClient, ClientError, ClientResult, DEFAULT_API_URL};
pub use errors::{DashboardError, DashboardResult};
pub use export::{ExportError, ExportResult};
pub use filter::{extract_fields, Filter, FilterOperator};

use crate::store::ID_FIELD;

/// Shown when the filter hides every cached document
pub const NO_MATCHES_NOTICE: &str = "No documents match the current filter.";

/// Identifier of a document as text
pub fn document_id(doc: &Value) -> Option<String> {
    match doc.get(ID_FIELD)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Dashboard state
pub struct Dashboard {
    client: ApiClient,
    collections: Vec<String>,
    selected: Option<String>,
    data: Vec<Value>,
    fields: Vec<String>,
    filter: Filter,
    visible: Vec<usize>,
}

impl Dashboard {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            collections: Vec::new(),
            selected: None,
            data: Vec::new(),
            fields: Vec::new(),
            filter: Filter::default(),
            visible: Vec::new(),
        }
    }

    // ==================
    // Accessors
    // ==================

    pub fn collections(&self) -> &[String] {
        &self.collections
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Every cached document of the selected collection
    pub fn documents(&self) -> &[Value] {
        &self.data
    }

    /// Filterable fields of the cached documents
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Cached documents passing the current filter
    pub fn filtered(&self) -> Vec<&Value> {
        self.visible.iter().map(|&i| &self.data[i]).collect()
    }

    /// Document count line, e.g. `3 of 10 documents`
    pub fn summary(&self) -> String {
        if self.visible.len() == self.data.len() {
            format!("{} documents", self.data.len())
        } else {
            format!("{} of {} documents", self.visible.len(), self.data.len())
        }
    }

    /// Notice for a view the filter has emptied
    ///
    /// `None` while something is visible or nothing is loaded.
    pub fn empty_view_notice(&self) -> Option<&'static str> {
        if self.visible.is_empty() && !self.data.is_empty() {
            Some(NO_MATCHES_NOTICE)
        } else {
            None
        }
    }

    // ==================
    // Loading
    // ==================

    /// Fetch the collection list
    pub async fn refresh_collections(&mut self) -> DashboardResult<&[String]> {
        self.collections = self
            .client
            .list_collections()
            .await
            .map_err(DashboardError::FetchCollections)?;
        Ok(&self.collections)
    }

    /// Select a collection without fetching it
    ///
    /// The cache and filter are cleared.
    pub fn select(&mut self, collection: &str) {
        self.selected = Some(collection.to_string());
        self.filter = Filter::default();
        self.data.clear();
        self.fields.clear();
        self.visible.clear();
    }

    /// Select a collection, reset the filter and fetch its documents
    pub async fn load(&mut self, collection: &str) -> DashboardResult<()> {
        self.selected = Some(collection.to_string());
        self.filter = Filter::default();

        let docs = self
            .client
            .fetch_documents(collection)
            .await
            .map_err(DashboardError::LoadData)?;
        tracing::debug!(collection, count = docs.len(), "collection loaded");

        self.fields = extract_fields(&docs);
        self.data = docs;
        self.refilter();
        Ok(())
    }

    /// Fetch the selected collection again
    ///
    /// Same as [`load`](Self::load) on the current selection, so the filter
    /// is reset too.
    pub async fn refetch(&mut self) -> DashboardResult<()> {
        let collection = self.require_selected()?.to_string();
        self.load(&collection).await
    }

    // ==================
    // Filtering
    // ==================

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.refilter();
    }

    pub fn set_filter_field(&mut self, field: impl Into<String>) {
        self.filter.field = field.into();
        self.refilter();
    }

    pub fn set_filter_operator(&mut self, operator: FilterOperator) {
        self.filter.operator = operator;
        self.refilter();
    }

    pub fn set_filter_value(&mut self, value: impl Into<String>) {
        self.filter.value = value.into();
        self.refilter();
    }

    pub fn clear_filter(&mut self) {
        self.set_filter(Filter::default());
    }

    fn refilter(&mut self) {
        self.visible = self.filter.matching_indexes(&self.data);
    }

    // ==================
    // Mutations
    // ==================

    /// Pretty JSON of a cached document, ready for editing
    pub fn begin_edit(&self, id: &str) -> DashboardResult<String> {
        let doc = self
            .data
            .iter()
            .find(|doc| document_id(doc).as_deref() == Some(id))
            .ok_or_else(|| DashboardError::UnknownDocument(id.to_string()))?;
        Ok(serde_json::to_string_pretty(doc)?)
    }

    /// Parse `text` as JSON, insert it, then refetch
    pub async fn add_document(&mut self, text: &str) -> DashboardResult<()> {
        let collection = self.require_selected()?.to_string();
        let doc: Value = serde_json::from_str(text)?;

        self.client
            .insert_document(&collection, &doc)
            .await
            .map_err(DashboardError::AddDocument)?;
        self.refetch().await
    }

    /// Parse `text` as JSON, replace the document with it, then refetch
    pub async fn save_edit(&mut self, id: &str, text: &str) -> DashboardResult<()> {
        let collection = self.require_selected()?.to_string();
        let doc: Value = serde_json::from_str(text)?;

        self.client
            .replace_document(&collection, id, &doc)
            .await
            .map_err(DashboardError::SaveEdit)?;
        self.refetch().await
    }

    /// Delete a document, then refetch
    pub async fn delete_document(&mut self, id: &str) -> DashboardResult<()> {
        let collection = self.require_selected()?.to_string();

        self.client
            .delete_document(&collection, id)
            .await
            .map_err(DashboardError::DeleteDocument)?;
        self.refetch().await
    }

    /// Drop the selected collection, clear the cache and refresh the list
    pub async fn drop_collection(&mut self) -> DashboardResult<()> {
        let collection = self.require_selected()?.to_string();

        self.client
            .drop_collection(&collection)
            .await
            .map_err(DashboardError::DropCollection)?;

        self.selected = None;
        self.data.clear();
        self.fields.clear();
        self.visible.clear();
        self.refresh_collections().await?;
        Ok(())
    }

    // ==================
    // Export
    // ==================

    /// Write the filtered view to a spreadsheet in `dir`
    pub fn export(&self, dir: &Path) -> DashboardResult<PathBuf> {
        let rows = self.filtered();
        Ok(export::write_xlsx(&rows, self.selected(), dir)?)
    }

    fn require_selected(&self) -> DashboardResult<&str> {
        self.selected().ok_or(DashboardError::NoSelection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn offline_dashboard() -> Dashboard {
        Dashboard::new(ApiClient::new(DEFAULT_API_URL).unwrap())
    }

    fn seed(dashboard: &mut Dashboard, docs: Vec<Value>) {
        dashboard.selected = Some("users".to_string());
        dashboard.fields = extract_fields(&docs);
        dashboard.data = docs;
        dashboard.refilter();
    }

    #[test]
    fn test_document_id() {
        assert_eq!(document_id(&json!({"_id": "abc"})), Some("abc".to_string()));
        assert_eq!(document_id(&json!({"_id": 7})), Some("7".to_string()));
        assert_eq!(document_id(&json!({"name": "x"})), None);
    }

    #[test]
    fn test_filter_changes_recompute_view() {
        let mut dashboard = offline_dashboard();
        seed(
            &mut dashboard,
            vec![
                json!({"_id": "1", "name": "Alice"}),
                json!({"_id": "2", "name": "Bob"}),
            ],
        );
        assert_eq!(dashboard.summary(), "2 documents");

        dashboard.set_filter_field("name");
        dashboard.set_filter_operator(FilterOperator::Contains);
        assert_eq!(dashboard.filtered().len(), 2);

        dashboard.set_filter_value("ALI");
        assert_eq!(dashboard.filtered(), vec![&json!({"_id": "1", "name": "Alice"})]);
        assert_eq!(dashboard.summary(), "1 of 2 documents");

        dashboard.clear_filter();
        assert_eq!(dashboard.filtered().len(), 2);
        assert_eq!(dashboard.filter(), &Filter::default());
    }

    #[test]
    fn test_empty_view_notice() {
        let mut dashboard = offline_dashboard();
        seed(&mut dashboard, vec![]);
        assert_eq!(dashboard.empty_view_notice(), None);

        seed(&mut dashboard, vec![json!({"_id": "1", "name": "Alice"})]);
        assert_eq!(dashboard.empty_view_notice(), None);

        dashboard.set_filter(Filter::new("name", FilterOperator::Equals, "bob"));
        assert_eq!(
            dashboard.empty_view_notice(),
            Some("No documents match the current filter.")
        );

        dashboard.clear_filter();
        assert_eq!(dashboard.empty_view_notice(), None);
    }

    #[test]
    fn test_begin_edit() {
        let mut dashboard = offline_dashboard();
        seed(&mut dashboard, vec![json!({"_id": "1", "name": "Alice"})]);

        let text = dashboard.begin_edit("1").unwrap();
        assert_eq!(
            serde_json::from_str::<Value>(&text).unwrap(),
            json!({"_id": "1", "name": "Alice"})
        );
        assert!(text.contains('\n'));

        assert!(matches!(
            dashboard.begin_edit("2"),
            Err(DashboardError::UnknownDocument(_))
        ));
    }

    #[tokio::test]
    async fn test_mutations_require_selection() {
        let mut dashboard = offline_dashboard();
        assert!(matches!(
            dashboard.add_document("{}").await,
            Err(DashboardError::NoSelection)
        ));
        assert!(matches!(
            dashboard.drop_collection().await,
            Err(DashboardError::NoSelection)
        ));
    }

    #[tokio::test]
    async fn test_invalid_json_is_rejected_before_any_request() {
        let mut dashboard = offline_dashboard();
        seed(&mut dashboard, vec![]);

        let result = dashboard.add_document("{not json").await;
        assert!(matches!(result, Err(DashboardError::InvalidJson(_))));
    }

    #[test]
    fn test_export_of_empty_view_is_a_notice() {
        let mut dashboard = offline_dashboard();
        seed(&mut dashboard, vec![json!({"_id": "1", "name": "Alice"})]);
        dashboard.set_filter(Filter::new("name", FilterOperator::Equals, "nobody"));

        let dir = tempfile::TempDir::new().unwrap();
        let err = dashboard.export(dir.path()).unwrap_err();
        assert_eq!(err.to_string(), "No data to export.");
    }
}
