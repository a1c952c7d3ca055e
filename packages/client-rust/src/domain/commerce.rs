//! Application store items and purchase receipts.

use nimbus_core::{decode, PreconditionError, Receipt, StoreItem, Tolerance};

use crate::call::Call;
use crate::gate::{require_positive, AuthRequirement, Capability, Gate};

pub mod method {
    pub const STORE_ITEMS: &str = "Commerce_Store_GetAllItems";
    pub const RECEIPTS: &str = "Commerce_Receipt_GetForUser";
    pub const SAVE_RECEIPT: &str = "Commerce_Receipt_Save";
}

#[derive(Debug, Clone)]
pub struct Commerce {
    gate: Gate,
}

impl Commerce {
    /// # Errors
    ///
    /// Returns [`PreconditionError::MissingSession`] without a session.
    pub fn new(capability: Capability) -> Result<Self, PreconditionError> {
        Gate::new(capability, AuthRequirement::Session).map(|gate| Self { gate })
    }

    pub(crate) fn from_gate(gate: Gate) -> Self {
        Self { gate }
    }

    pub fn store_items(&self) -> Call<Vec<StoreItem>> {
        let call = self.gate.user_request(method::STORE_ITEMS);
        self.gate
            .dispatch(call, Tolerance::Strict, decode::records::<StoreItem>)
    }

    /// Receipts of the signed-in user.
    pub fn receipts(&self) -> Call<Vec<Receipt>> {
        let call = self.gate.user_request(method::RECEIPTS);
        self.gate
            .dispatch(call, Tolerance::Strict, decode::records::<Receipt>)
    }

    /// Record a purchase. `total_cost` is passed through as the service
    /// formats it.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::Zero`] for a zero quantity.
    pub fn save_receipt(
        &self,
        store_item_id: u64,
        total_cost: &str,
        quantity: u32,
        receipt_data: &str,
    ) -> Result<Call<bool>, PreconditionError> {
        require_positive("quantity", quantity)?;
        let call = self
            .gate
            .user_request(method::SAVE_RECEIPT)
            .param("StoreItemID", store_item_id.to_string())
            .param("TotalCost", total_cost)
            .param("ItemQuantity", quantity.to_string())
            .param("ReceiptData", receipt_data);
        Ok(self.gate.dispatch(call, Tolerance::Strict, decode::flag))
    }
}
