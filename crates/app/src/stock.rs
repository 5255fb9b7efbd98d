//! Stock screen controller: the confirm-before-commit workflow driven
//! against the API.
//!
//! The workflow itself lives in `kerala-catalog`; this controller adds the
//! network half: a confirmed edit sends exactly one partial update, the
//! row stays locked while it is in flight, and the product list is
//! refetched on success, failure, and cancel alike.

use kerala_catalog::{
    FilterCounts, Outcome, PendingEdit, Product, StockField, StockFilter, StockWorkflow, filter,
};
use kerala_core::{DomainError, ProductId};
use kerala_client::ApiError;

use crate::api::StockApi;

/// What the screen shows after a confirmed update resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// Success acknowledgement; the list has been resynced.
    Updated,
    /// The update landed but the resync failed; the displayed list may be
    /// stale, so prompt a pull-to-refresh instead of a plain success.
    UpdatedStale,
    /// 401; the interceptor has already torn the session down.
    SessionExpired,
    /// Any other failure, with the user-facing message.
    Failed(String),
}

pub struct StockController<A: StockApi> {
    api: A,
    workflow: StockWorkflow,
    products: Vec<Product>,
    search: String,
    filter: StockFilter,
}

impl<A: StockApi> StockController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            workflow: StockWorkflow::new(),
            products: Vec::new(),
            search: String::new(),
            filter: StockFilter::All,
        }
    }

    /// Initial load and pull-to-refresh.
    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        self.products = self.api.list_products().await?;
        Ok(())
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn set_filter(&mut self, filter: StockFilter) {
        self.filter = filter;
    }

    /// Rows for the active search term and filter tab.
    pub fn visible_rows(&self) -> Vec<&Product> {
        filter::apply(&self.products, &self.search, self.filter)
    }

    pub fn counts(&self) -> FilterCounts {
        filter::counts(&self.products, &self.search)
    }

    pub fn is_row_locked(&self, product_id: ProductId) -> bool {
        self.workflow.is_locked(product_id)
    }

    /// Stage a direct numeric edit; returns the confirmation dialog data.
    pub fn begin_edit(
        &mut self,
        product_id: ProductId,
        field: StockField,
        requested: i64,
    ) -> Result<PendingEdit, DomainError> {
        let product = self.product(product_id)?;
        self.workflow.begin_edit(&product, field, requested)
    }

    /// Stage a stepper edit (`delta` of ±1 from the UI).
    pub fn step(
        &mut self,
        product_id: ProductId,
        field: StockField,
        delta: i64,
    ) -> Result<PendingEdit, DomainError> {
        let product = self.product(product_id)?;
        self.workflow.step(&product, field, delta)
    }

    /// Cancel the pending edit and resync to server truth.
    pub async fn cancel(&mut self, product_id: ProductId) -> Result<(), ApiError> {
        let Outcome::Refetch = self.workflow.cancel(product_id);
        self.refresh().await
    }

    /// Confirm the pending edit: one request, then resync regardless of
    /// the result.
    pub async fn confirm(
        &mut self,
        product_id: ProductId,
        note: &str,
    ) -> Result<RowOutcome, DomainError> {
        let request = self.workflow.confirm(product_id, note)?;

        let result = self.api.update_stock(&request).await;
        let Outcome::Refetch = self.workflow.resolve(product_id, result.is_ok());

        let resync = self.refresh().await;
        if let Err(err) = &resync {
            tracing::warn!(error = %err, "product resync after stock update failed");
        }

        Ok(match result {
            Ok(()) if resync.is_ok() => RowOutcome::Updated,
            Ok(()) => RowOutcome::UpdatedStale,
            Err(ApiError::Unauthorized) => RowOutcome::SessionExpired,
            Err(err) => RowOutcome::Failed(err.to_string()),
        })
    }

    fn product(&self, product_id: ProductId) -> Result<Product, DomainError> {
        self.products
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
            .ok_or(DomainError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kerala_catalog::StockUpdateRequest;
    use std::sync::Mutex;

    /// Fake backend: authoritative product list plus scripted failures.
    struct FakeStockApi {
        products: Mutex<Vec<Product>>,
        requests: Mutex<Vec<StockUpdateRequest>>,
        fail_next: Mutex<Option<ApiError>>,
        fail_next_list: Mutex<Option<ApiError>>,
    }

    impl FakeStockApi {
        fn with_products(products: Vec<Product>) -> Self {
            Self {
                products: Mutex::new(products),
                requests: Mutex::new(Vec::new()),
                fail_next: Mutex::new(None),
                fail_next_list: Mutex::new(None),
            }
        }
    }

    impl StockApi for FakeStockApi {
        async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
            if let Some(err) = self.fail_next_list.lock().unwrap().take() {
                return Err(err);
            }
            Ok(self.products.lock().unwrap().clone())
        }

        async fn update_stock(&self, req: &StockUpdateRequest) -> Result<(), ApiError> {
            if let Some(err) = self.fail_next.lock().unwrap().take() {
                return Err(err);
            }
            self.requests.lock().unwrap().push(req.clone());
            let mut products = self.products.lock().unwrap();
            let product = products.iter_mut().find(|p| p.id == req.product_id).unwrap();
            match req.field {
                StockField::TotalStock => product.total_stock = req.new_value,
                StockField::OnlineStock => product.online_stock = req.new_value,
            }
            Ok(())
        }
    }

    fn product(name: &str, online: u32, total: u32) -> Product {
        Product {
            id: ProductId::new(),
            name: name.to_string(),
            model_name: None,
            sku: None,
            total_stock: total,
            online_stock: online,
        }
    }

    async fn controller(products: Vec<Product>) -> StockController<FakeStockApi> {
        let mut c = StockController::new(FakeStockApi::with_products(products));
        c.refresh().await.unwrap();
        c
    }

    #[tokio::test]
    async fn confirm_sends_one_request_and_resyncs() {
        let p = product("Galaxy S21", 4, 10);
        let id = p.id;
        let mut c = controller(vec![p]).await;

        c.begin_edit(id, StockField::OnlineStock, 7).unwrap();
        let outcome = c.confirm(id, "recount").await.unwrap();
        assert_eq!(outcome, RowOutcome::Updated);
        assert_eq!(c.api.requests.lock().unwrap().len(), 1);
        // Displayed value is the refetched server truth.
        assert_eq!(c.visible_rows()[0].online_stock, 7);
        assert!(!c.is_row_locked(id));
    }

    #[tokio::test]
    async fn cancel_reverts_to_server_truth() {
        let p = product("Galaxy S21", 4, 10);
        let id = p.id;
        let mut c = controller(vec![p]).await;

        c.begin_edit(id, StockField::OnlineStock, 9).unwrap();
        c.cancel(id).await.unwrap();
        assert_eq!(c.visible_rows()[0].online_stock, 4);
        assert!(c.begin_edit(id, StockField::OnlineStock, 9).is_ok());
    }

    #[tokio::test]
    async fn successful_update_with_failed_resync_prompts_a_refresh() {
        let p = product("Galaxy S21", 4, 10);
        let id = p.id;
        let mut c = controller(vec![p]).await;
        *c.api.fail_next_list.lock().unwrap() = Some(ApiError::Timeout);

        c.begin_edit(id, StockField::OnlineStock, 7).unwrap();
        let outcome = c.confirm(id, "").await.unwrap();
        // No plain success over a possibly-stale list.
        assert_eq!(outcome, RowOutcome::UpdatedStale);
        assert!(!c.is_row_locked(id));

        // Pull-to-refresh recovers the synced value.
        c.refresh().await.unwrap();
        assert_eq!(c.visible_rows()[0].online_stock, 7);
    }

    #[tokio::test]
    async fn failure_still_resyncs_and_unlocks() {
        let p = product("Galaxy S21", 4, 10);
        let id = p.id;
        let mut c = controller(vec![p]).await;
        *c.api.fail_next.lock().unwrap() = Some(ApiError::Server(500));

        c.begin_edit(id, StockField::TotalStock, 12).unwrap();
        let outcome = c.confirm(id, "").await.unwrap();
        assert!(matches!(outcome, RowOutcome::Failed(_)));
        // Server never applied the edit; the resynced value proves it.
        assert_eq!(c.visible_rows()[0].total_stock, 10);
        assert!(!c.is_row_locked(id));
    }

    #[tokio::test]
    async fn session_expiry_is_distinguished_from_generic_failure() {
        let p = product("Galaxy S21", 4, 10);
        let id = p.id;
        let mut c = controller(vec![p]).await;
        *c.api.fail_next.lock().unwrap() = Some(ApiError::Unauthorized);

        c.begin_edit(id, StockField::OnlineStock, 7).unwrap();
        let outcome = c.confirm(id, "").await.unwrap();
        assert_eq!(outcome, RowOutcome::SessionExpired);
    }

    #[tokio::test]
    async fn search_and_filter_shape_visible_rows() {
        let mut c = controller(vec![
            product("Galaxy S21", 3, 10),
            product("Pixel 8", 8, 10),
            product("Galaxy Tab", 0, 5),
        ])
        .await;

        c.set_search("galaxy");
        assert_eq!(c.visible_rows().len(), 2);
        c.set_filter(StockFilter::OutOfStock);
        assert_eq!(c.visible_rows().len(), 1);
        assert_eq!(c.visible_rows()[0].name, "Galaxy Tab");
        assert_eq!(c.counts().out_of_stock, 1);
    }
}
