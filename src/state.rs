use std::sync::Arc;

use crate::cqrs::AddToCartCommandHandler;

#[derive(Clone)]
pub struct AppState {
    pub add_to_cart_command_handler: Arc<AddToCartCommandHandler>,
}
