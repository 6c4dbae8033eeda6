use reqwest::Url;
use serde::{Serialize, Serializer};

use crate::cqrs::CartRef;

pub const CART_CURRENCY: &str = "AUD";
pub const LINE_ITEM_QUANTITY: u64 = 1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItemDraft {
    pub sku: String,
    pub quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartDraft {
    pub currency: String,
    pub line_items: Vec<LineItemDraft>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum CartUpdateAction {
    AddLineItem { sku: String, quantity: u64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartUpdate {
    pub version: u64,
    pub actions: Vec<CartUpdateAction>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CartMutationRequest {
    CreateCart(CartDraft),
    AddLineItem { cart_id: String, update: CartUpdate },
}

/// Builds the single cart mutation for one purchase: a new cart when no cart
/// exists yet, otherwise an `addLineItem` guarded by the caller's cart version.
pub fn build_cart_mutation(purchase_item: &str, cart: Option<&CartRef>) -> CartMutationRequest {
    match cart {
        None => CartMutationRequest::CreateCart(CartDraft {
            currency: String::from(CART_CURRENCY),
            line_items: vec![LineItemDraft {
                sku: purchase_item.to_string(),
                quantity: LINE_ITEM_QUANTITY,
            }],
        }),
        Some(cart) => CartMutationRequest::AddLineItem {
            cart_id: cart.id.clone(),
            update: CartUpdate {
                version: cart.version,
                actions: vec![CartUpdateAction::AddLineItem {
                    sku: purchase_item.to_string(),
                    quantity: LINE_ITEM_QUANTITY,
                }],
            },
        },
    }
}

impl CartMutationRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            CartMutationRequest::CreateCart(_) => "createCart",
            CartMutationRequest::AddLineItem { .. } => "addLineItem",
        }
    }

    /// `{apiUrl}/{projectKey}/carts` or `{apiUrl}/{projectKey}/carts/{cartId}`.
    pub fn endpoint(&self, api_url: &Url, project_key: &str) -> Url {
        let mut url = api_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(project_key).push("carts");
            if let CartMutationRequest::AddLineItem { cart_id, .. } = self {
                segments.push(cart_id);
            }
        }
        url
    }
}

// The wire body is the draft or the update; the cart id only addresses the endpoint.
impl Serialize for CartMutationRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CartMutationRequest::CreateCart(draft) => draft.serialize(serializer),
            CartMutationRequest::AddLineItem { update, .. } => update.serialize(serializer),
        }
    }
}
