//! Stock adjustment workflow: confirm-before-commit with per-row locking.
//!
//! A single field edit moves through: `begin_edit` (clamp + raise the
//! confirmation dialog data) → `confirm` (consume into one partial-update
//! request, lock the row) or `cancel` (discard) → `resolve` (unlock). Every
//! exit path reports [`Outcome::Refetch`]: the displayed value is always
//! re-read from the backend, never trusted from local state.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use kerala_core::{DomainError, ProductId, StockQuantity};

use crate::product::Product;

/// Which stock field a single edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockField {
    TotalStock,
    OnlineStock,
}

impl StockField {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockField::TotalStock => "total_stock",
            StockField::OnlineStock => "online_stock",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockField::TotalStock => "Total stock",
            StockField::OnlineStock => "Online stock",
        }
    }

    fn current(&self, product: &Product) -> u32 {
        match self {
            StockField::TotalStock => product.total_stock,
            StockField::OnlineStock => product.online_stock,
        }
    }
}

/// An edit awaiting confirmation. Carries everything the dialog shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingEdit {
    pub product_id: ProductId,
    pub product_name: String,
    pub field: StockField,
    pub old_value: u32,
    pub new_value: u32,
    /// Signed change, `new_value - old_value`.
    pub delta: i64,
}

/// The single partial-update request produced by a confirmed edit.
///
/// Ephemeral: discarded once the request resolves, after which the product
/// list is refetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockUpdateRequest {
    pub product_id: ProductId,
    pub field: StockField,
    pub new_value: u32,
    pub note: String,
}

/// What the caller must do after a terminal workflow step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Re-fetch the product list to restore server truth.
    Refetch,
}

/// Per-session workflow state: pending edits and in-flight rows.
///
/// Locking is per product row. A second edit on a locked row is rejected;
/// edits on other rows proceed unaffected.
#[derive(Debug, Default)]
pub struct StockWorkflow {
    pending: HashMap<ProductId, PendingEdit>,
    in_flight: HashSet<ProductId>,
}

impl StockWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the row's controls should be disabled.
    pub fn is_locked(&self, product_id: ProductId) -> bool {
        self.in_flight.contains(&product_id)
    }

    pub fn pending_edit(&self, product_id: ProductId) -> Option<&PendingEdit> {
        self.pending.get(&product_id)
    }

    /// Start an edit from direct numeric entry.
    ///
    /// The value is clamped to `>= 0` only; free entry may overshoot the
    /// total (flagged as Overstocked, not blocked). Nothing is committed.
    pub fn begin_edit(
        &mut self,
        product: &Product,
        field: StockField,
        requested: i64,
    ) -> Result<PendingEdit, DomainError> {
        let new_value = StockQuantity::clamped(requested).get();
        self.stage(product, field, new_value)
    }

    /// Start an edit from the increment/decrement stepper.
    ///
    /// In addition to the `>= 0` floor, an online-stock increment is clamped
    /// to the current total stock. Advisory only; the backend stays
    /// authoritative.
    pub fn step(
        &mut self,
        product: &Product,
        field: StockField,
        delta: i64,
    ) -> Result<PendingEdit, DomainError> {
        let old = i64::from(field.current(product));
        let mut new_value = StockQuantity::clamped(old + delta).get();
        if field == StockField::OnlineStock && delta > 0 {
            new_value = new_value.min(product.total_stock.max(product.online_stock));
        }
        self.stage(product, field, new_value)
    }

    fn stage(
        &mut self,
        product: &Product,
        field: StockField,
        new_value: u32,
    ) -> Result<PendingEdit, DomainError> {
        if self.is_locked(product.id) {
            return Err(DomainError::conflict("stock update already in flight"));
        }

        let old_value = field.current(product);
        let delta = i64::from(new_value) - i64::from(old_value);
        if delta == 0 {
            return Err(DomainError::validation("stock value is unchanged"));
        }

        let edit = PendingEdit {
            product_id: product.id,
            product_name: product.name.clone(),
            field,
            old_value,
            new_value,
            delta,
        };
        self.pending.insert(product.id, edit.clone());
        Ok(edit)
    }

    /// Discard the pending edit for a row.
    ///
    /// The caller must refetch so the displayed value reverts to the
    /// last-known server truth, not the unconfirmed input.
    pub fn cancel(&mut self, product_id: ProductId) -> Outcome {
        if self.pending.remove(&product_id).is_none() {
            tracing::debug!(%product_id, "cancel with no pending edit");
        }
        Outcome::Refetch
    }

    /// Consume the pending edit into a single partial-update request and
    /// lock the row until [`Self::resolve`] is called.
    ///
    /// A blank note falls back to an auto-generated one naming the field
    /// and the change.
    pub fn confirm(
        &mut self,
        product_id: ProductId,
        note: &str,
    ) -> Result<StockUpdateRequest, DomainError> {
        if self.is_locked(product_id) {
            return Err(DomainError::conflict("stock update already in flight"));
        }
        let edit = self.pending.remove(&product_id).ok_or(DomainError::NotFound)?;

        let note = if note.trim().is_empty() {
            format!(
                "{} changed from {} to {}",
                edit.field.label(),
                edit.old_value,
                edit.new_value
            )
        } else {
            note.trim().to_string()
        };

        self.in_flight.insert(product_id);
        Ok(StockUpdateRequest {
            product_id,
            field: edit.field,
            new_value: edit.new_value,
            note,
        })
    }

    /// Unlock the row once its request has resolved, successfully or not.
    pub fn resolve(&mut self, product_id: ProductId, success: bool) -> Outcome {
        if !self.in_flight.remove(&product_id) {
            tracing::warn!(%product_id, "resolve for a row that was not in flight");
        }
        if !success {
            tracing::warn!(%product_id, "stock update failed; refetching server truth");
        }
        Outcome::Refetch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn galaxy() -> Product {
        Product {
            id: ProductId::new(),
            name: "Galaxy S21".to_string(),
            model_name: Some("SM-G991".to_string()),
            sku: Some("GLX-21".to_string()),
            total_stock: 10,
            online_stock: 4,
        }
    }

    #[test]
    fn begin_edit_stages_dialog_data() {
        let mut wf = StockWorkflow::new();
        let p = galaxy();
        let edit = wf.begin_edit(&p, StockField::OnlineStock, 7).unwrap();
        assert_eq!(edit.old_value, 4);
        assert_eq!(edit.new_value, 7);
        assert_eq!(edit.delta, 3);
        assert_eq!(edit.product_name, "Galaxy S21");
    }

    #[test]
    fn begin_edit_clamps_negative_entry_to_zero() {
        let mut wf = StockWorkflow::new();
        let p = galaxy();
        let edit = wf.begin_edit(&p, StockField::TotalStock, -3).unwrap();
        assert_eq!(edit.new_value, 0);
        assert_eq!(edit.delta, -10);
    }

    #[test]
    fn unchanged_value_is_rejected() {
        let mut wf = StockWorkflow::new();
        let p = galaxy();
        let err = wf.begin_edit(&p, StockField::OnlineStock, 4).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn online_step_up_is_capped_at_total_stock() {
        let mut wf = StockWorkflow::new();
        let mut p = galaxy();
        p.online_stock = 10;
        let err = wf.step(&p, StockField::OnlineStock, 1).unwrap_err();
        // Already at the cap, so the step is a no-op edit.
        assert!(matches!(err, DomainError::Validation(_)));

        p.online_stock = 9;
        let edit = wf.step(&p, StockField::OnlineStock, 5).unwrap();
        assert_eq!(edit.new_value, 10);
    }

    #[test]
    fn online_step_down_floors_at_zero() {
        let mut wf = StockWorkflow::new();
        let mut p = galaxy();
        p.online_stock = 1;
        let edit = wf.step(&p, StockField::OnlineStock, -3).unwrap();
        assert_eq!(edit.new_value, 0);
    }

    #[test]
    fn cancel_discards_pending_and_requires_refetch() {
        let mut wf = StockWorkflow::new();
        let p = galaxy();
        wf.begin_edit(&p, StockField::OnlineStock, 7).unwrap();
        assert_eq!(wf.cancel(p.id), Outcome::Refetch);
        assert!(wf.pending_edit(p.id).is_none());
        assert!(!wf.is_locked(p.id));
    }

    #[test]
    fn confirm_produces_one_request_and_locks_the_row() {
        let mut wf = StockWorkflow::new();
        let p = galaxy();
        wf.begin_edit(&p, StockField::OnlineStock, 7).unwrap();
        let req = wf.confirm(p.id, "weekly recount").unwrap();
        assert_eq!(req.field, StockField::OnlineStock);
        assert_eq!(req.new_value, 7);
        assert_eq!(req.note, "weekly recount");
        assert!(wf.is_locked(p.id));
    }

    #[test]
    fn blank_note_falls_back_to_generated_note() {
        let mut wf = StockWorkflow::new();
        let p = galaxy();
        wf.begin_edit(&p, StockField::TotalStock, 12).unwrap();
        let req = wf.confirm(p.id, "   ").unwrap();
        assert_eq!(req.note, "Total stock changed from 10 to 12");
    }

    #[test]
    fn second_edit_on_in_flight_row_is_rejected_but_other_rows_proceed() {
        let mut wf = StockWorkflow::new();
        let p = galaxy();
        let mut q = galaxy();
        q.id = ProductId::new();
        q.name = "Pixel 8".to_string();

        wf.begin_edit(&p, StockField::OnlineStock, 7).unwrap();
        wf.confirm(p.id, "").unwrap();

        let err = wf.begin_edit(&p, StockField::OnlineStock, 8).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // A different product is unaffected by P's lock.
        wf.begin_edit(&q, StockField::TotalStock, 3).unwrap();
        wf.confirm(q.id, "").unwrap();
        assert!(wf.is_locked(q.id));
    }

    #[test]
    fn resolve_unlocks_success_and_failure_alike() {
        let mut wf = StockWorkflow::new();
        let p = galaxy();
        wf.begin_edit(&p, StockField::OnlineStock, 7).unwrap();
        wf.confirm(p.id, "").unwrap();

        assert_eq!(wf.resolve(p.id, false), Outcome::Refetch);
        assert!(!wf.is_locked(p.id));

        wf.begin_edit(&p, StockField::OnlineStock, 7).unwrap();
        wf.confirm(p.id, "").unwrap();
        assert_eq!(wf.resolve(p.id, true), Outcome::Refetch);
        assert!(!wf.is_locked(p.id));
    }

    #[test]
    fn confirm_without_pending_edit_is_not_found() {
        let mut wf = StockWorkflow::new();
        let err = wf.confirm(ProductId::new(), "note").unwrap_err();
        assert!(matches!(err, DomainError::NotFound));
    }
}
