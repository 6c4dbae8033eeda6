use std::sync::Arc;

use tracing::{event, Level};

use crate::{
    commerce::CartApi,
    dtos::{Response, SessionParameters, WebhookResponse},
    errors::CartWebhookError,
    mutations::build_cart_mutation,
    translator::translate_cart,
};

// traits
pub trait Command{}

pub trait CommandHandler<C: Command, R: Response>{
    async fn handle(&self, input: &C) -> Result<R, CartWebhookError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRef {
    pub id: String,
    pub version: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddToCartCommand {
    pub purchase_item: String,
    pub cart: Option<CartRef>,
}
impl Command for AddToCartCommand{}

impl TryFrom<SessionParameters> for AddToCartCommand {
    type Error = CartWebhookError;

    fn try_from(parameters: SessionParameters) -> Result<Self, Self::Error> {
        let purchase_item = match parameters.purchase_item {
            Some(item) if !item.trim().is_empty() => item,
            _ => return Err(CartWebhookError::Validation(String::from("purchase_item cannot be null or empty"))),
        };

        let cart = match (parameters.cart_id, parameters.cart_version) {
            (None, None) => None,
            (None, Some(version)) => {
                event!(Level::INFO, cart_version = version, "cartVersion supplied without cartId, creating a new cart");
                None
            }
            (Some(id), _) if id.trim().is_empty() => {
                return Err(CartWebhookError::Validation(String::from("cartId cannot be empty")));
            }
            (Some(id), None) => {
                return Err(CartWebhookError::Validation(format!(
                    "cartVersion is required when cartId is supplied (cartId {})",
                    id
                )));
            }
            (Some(id), Some(version)) => Some(CartRef {
                id: id,
                version: version,
            }),
        };

        Ok(AddToCartCommand {
            purchase_item: purchase_item,
            cart: cart,
        })
    }
}

pub struct AddToCartCommandHandler {
    cart_api: Arc<dyn CartApi + Send + Sync>,
}

impl AddToCartCommandHandler {
    pub fn new(cart_api: Arc<dyn CartApi + Send + Sync>) -> Self {
        AddToCartCommandHandler {
            cart_api: cart_api
        }
    }
}

impl CommandHandler<AddToCartCommand, WebhookResponse> for AddToCartCommandHandler {
    async fn handle(&self, input: &AddToCartCommand) -> Result<WebhookResponse, CartWebhookError> {
        let mutation = build_cart_mutation(&input.purchase_item, input.cart.as_ref());
        event!(
            Level::INFO,
            kind = mutation.kind(),
            purchase_item = %input.purchase_item,
            cart_id = ?input.cart.as_ref().map(|c| c.id.as_str()),
            "Applying cart mutation"
        );

        let cart = match self.cart_api.execute(&mutation).await {
            Ok(cart) => cart,
            Err(e) => {
                event!(Level::WARN, kind = mutation.kind(), status = e.status_code().as_u16(), "Cart mutation failed: {}", e);
                return Err(CartWebhookError::Upstream(e));
            }
        };

        let response = translate_cart(&cart, &input.purchase_item)?;
        event!(Level::DEBUG, response = ?response, "Webhook response built");

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        commerce::fakes::InMemoryCartApi,
        domain::{Cart, LineItem, Money, Price, ProductVariant},
        mutations::CartMutationRequest,
    };

    fn parameters(purchase_item: Option<&str>, cart_id: Option<&str>, cart_version: Option<u64>) -> SessionParameters {
        SessionParameters {
            purchase_item: purchase_item.map(String::from),
            cart_id: cart_id.map(String::from),
            cart_version: cart_version,
        }
    }

    fn aud(cent_amount: i64) -> Money {
        Money {
            cent_amount: cent_amount,
            fraction_digits: 2,
            currency_code: String::from("AUD"),
        }
    }

    #[test]
    fn command_without_cart_creates_one() {
        let command = AddToCartCommand::try_from(parameters(Some("SKU1"), None, None)).unwrap();

        assert_eq!(command.purchase_item, "SKU1");
        assert_eq!(command.cart, None);
    }

    #[test]
    fn command_with_cart_keeps_identity() {
        let command = AddToCartCommand::try_from(parameters(Some("SKU2"), Some("c1"), Some(1))).unwrap();

        assert_eq!(
            command.cart,
            Some(CartRef {
                id: String::from("c1"),
                version: 1
            })
        );
    }

    #[test]
    fn cart_id_without_version_is_rejected() {
        let result = AddToCartCommand::try_from(parameters(Some("SKU2"), Some("c1"), None));

        assert!(matches!(result, Err(CartWebhookError::Validation(message)) if message.contains("cartVersion")));
    }

    #[test]
    fn missing_or_blank_purchase_item_is_rejected() {
        for item in [None, Some(""), Some("  ")] {
            let result = AddToCartCommand::try_from(parameters(item, None, None));
            assert!(matches!(result, Err(CartWebhookError::Validation(_))));
        }
    }

    #[test]
    fn blank_cart_id_is_rejected() {
        let result = AddToCartCommand::try_from(parameters(Some("SKU1"), Some(""), Some(1)));

        assert!(matches!(result, Err(CartWebhookError::Validation(_))));
    }

    #[test]
    fn version_without_cart_id_is_ignored() {
        let command = AddToCartCommand::try_from(parameters(Some("SKU1"), None, Some(3))).unwrap();

        assert_eq!(command.cart, None);
    }

    #[tokio::test]
    async fn creates_cart_and_reports_prices() {
        let api = InMemoryCartApi::new(&[("SKU1", 1000)]);
        let handler = AddToCartCommandHandler::new(Arc::new(api.clone()));

        let response = handler
            .handle(&AddToCartCommand {
                purchase_item: String::from("SKU1"),
                cart: None,
            })
            .await
            .unwrap();

        let parameters = response.session_info.parameters;
        assert_eq!(parameters.cart_version, 1);
        assert_eq!(parameters.confirmed_item, "SKU1");
        assert_eq!(parameters.cart_total_price, "AUD 10");
        assert_eq!(parameters.purchase_item_price, "AUD 10");
        assert!(matches!(api.requests.lock().await.as_slice(), [CartMutationRequest::CreateCart(_)]));
    }

    #[tokio::test]
    async fn appends_to_existing_cart_and_bumps_version() {
        let api = InMemoryCartApi::new(&[("SKU1", 1000), ("SKU2", 1999)]);
        api.insert(Cart {
            id: String::from("c1"),
            version: 1,
            total_price: aud(1000),
            line_items: vec![LineItem {
                variant: ProductVariant { sku: Some(String::from("SKU1")) },
                price: Price { value: aud(1000) },
                quantity: 1,
            }],
        })
        .await;
        let handler = AddToCartCommandHandler::new(Arc::new(api.clone()));

        let response = handler
            .handle(&AddToCartCommand {
                purchase_item: String::from("SKU2"),
                cart: Some(CartRef {
                    id: String::from("c1"),
                    version: 1,
                }),
            })
            .await
            .unwrap();

        let parameters = response.session_info.parameters;
        assert_eq!(parameters.cart_id, "c1");
        assert_eq!(parameters.cart_version, 2);
        assert_eq!(parameters.cart_total_price, "AUD 29.99");
        assert_eq!(parameters.purchase_item_price, "AUD 19.99");
    }

    #[tokio::test]
    async fn stale_version_surfaces_as_upstream_conflict() {
        let api = InMemoryCartApi::new(&[("SKU1", 1000)]);
        api.insert(Cart {
            id: String::from("c1"),
            version: 4,
            total_price: aud(0),
            line_items: Vec::new(),
        })
        .await;
        let handler = AddToCartCommandHandler::new(Arc::new(api));

        let result = handler
            .handle(&AddToCartCommand {
                purchase_item: String::from("SKU1"),
                cart: Some(CartRef {
                    id: String::from("c1"),
                    version: 3,
                }),
            })
            .await;

        match result {
            Err(e @ CartWebhookError::Upstream(_)) => assert_eq!(e.status_code().as_u16(), 409),
            other => panic!("expected an upstream conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn upstream_failure_is_returned_not_raised() {
        let handler = AddToCartCommandHandler::new(Arc::new(InMemoryCartApi::unavailable()));

        let result = handler
            .handle(&AddToCartCommand {
                purchase_item: String::from("SKU1"),
                cart: None,
            })
            .await;

        assert!(matches!(result, Err(CartWebhookError::Upstream(_))));
    }
}
