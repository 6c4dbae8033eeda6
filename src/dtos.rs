use serde::{de, Deserialize, Deserializer, Serialize};

pub trait Response{}

// Inbound webhook body. Only the session parameters are read; the rest of the
// conversational platform's payload is ignored.
#[derive(Debug, Deserialize)]
pub struct WebhookRequest {
    #[serde(rename = "sessionInfo", default)]
    pub session_info: Option<SessionInfo>,
}

#[derive(Debug, Deserialize)]
pub struct SessionInfo {
    #[serde(default)]
    pub parameters: Option<SessionParameters>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SessionParameters {
    #[serde(default)]
    pub purchase_item: Option<String>,
    #[serde(rename = "cartId", default)]
    pub cart_id: Option<String>,
    #[serde(rename = "cartVersion", default, deserialize_with = "deserialize_cart_version")]
    pub cart_version: Option<u64>,
}

// The platform stores numeric parameters as JSON numbers and may echo an integer back as `1.0`.
fn deserialize_cart_version<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = match Option::<serde_json::Number>::deserialize(deserializer)? {
        Some(n) => n,
        None => return Ok(None),
    };

    if let Some(version) = number.as_u64() {
        return Ok(Some(version));
    }

    match number.as_f64() {
        Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => Ok(Some(f as u64)),
        _ => Err(de::Error::custom(format!(
            "cartVersion must be a non-negative integer, got {}",
            number
        ))),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookResponse {
    pub fulfillment_response: FulfillmentResponse,
    pub session_info: SessionInfoResponse,
}
impl Response for WebhookResponse{}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FulfillmentResponse {
    pub messages: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionInfoResponse {
    pub parameters: CartSessionParameters,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartSessionParameters {
    #[serde(rename = "cartId")]
    pub cart_id: String,
    #[serde(rename = "cartVersion")]
    pub cart_version: u64,
    pub confirmed_item: String,
    #[serde(rename = "cartTotalPrice")]
    pub cart_total_price: String,
    #[serde(rename = "purchaseItemPrice")]
    pub purchase_item_price: String,
}

#[derive(Serialize, Deserialize)]
pub struct ApiError {
    pub error: String
}
impl Response for ApiError{}
