use tracing::{event, Level};

use crate::{
    domain::{Cart, Money},
    dtos::{CartSessionParameters, FulfillmentResponse, SessionInfoResponse, WebhookResponse},
    errors::CartWebhookError,
};

/// Price of the first line item whose sku matches `purchase_item`, in the order
/// the platform returned them.
pub fn find_purchase_item_price<'a>(cart: &'a Cart, purchase_item: &str) -> Result<&'a Money, CartWebhookError> {
    match cart.line_items.iter().find(|line_item| line_item.sku() == Some(purchase_item)) {
        Some(line_item) => Ok(&line_item.price.value),
        None => {
            let line_items: Vec<(Option<&str>, u64)> = cart.line_items.iter().map(|l| (l.sku(), l.quantity)).collect();
            event!(
                Level::ERROR,
                cart_id = %cart.id,
                cart_version = cart.version,
                purchase_item = %purchase_item,
                line_items = ?line_items,
                "Cart returned by the commerce platform is missing the purchased item"
            );

            Err(CartWebhookError::DataIntegrity {
                cart_id: cart.id.clone(),
                cart_version: cart.version,
                sku: purchase_item.to_string(),
            })
        }
    }
}

pub fn build_webhook_response(
    cart_id: &str,
    cart_version: u64,
    cart_total_price: &Money,
    purchase_item: &str,
    purchase_item_price: &Money,
) -> WebhookResponse {
    WebhookResponse {
        fulfillment_response: FulfillmentResponse { messages: Vec::new() },
        session_info: SessionInfoResponse {
            parameters: CartSessionParameters {
                cart_id: cart_id.to_string(),
                cart_version: cart_version,
                confirmed_item: purchase_item.to_string(),
                cart_total_price: cart_total_price.to_string(),
                purchase_item_price: purchase_item_price.to_string(),
            },
        },
    }
}

pub fn translate_cart(cart: &Cart, purchase_item: &str) -> Result<WebhookResponse, CartWebhookError> {
    let purchase_item_price = find_purchase_item_price(cart, purchase_item)?;

    Ok(build_webhook_response(
        &cart.id,
        cart.version,
        &cart.total_price,
        purchase_item,
        purchase_item_price,
    ))
}
