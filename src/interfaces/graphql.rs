use crate::domain::ports::OrderRepositoryBox;
use crate::error::Result;
use serde_json::{Map, Value};

pub const INCREMENT_ID_ARG: &str = "incrementId";

/// Resolver for the `checkOrder(incrementId: String): Boolean` query field.
pub struct CheckOrderResolver {
    orders: OrderRepositoryBox,
}

impl CheckOrderResolver {
    pub fn new(orders: OrderRepositoryBox) -> Self {
        Self { orders }
    }

    /// Whether an order with the given increment id exists.
    ///
    /// A missing, null, non-string, empty or `"0"` `incrementId` answers
    /// `false` without touching storage.
    pub async fn resolve(&self, args: Option<&Map<String, Value>>) -> Result<bool> {
        let Some(increment_id) = args
            .and_then(|args| args.get(INCREMENT_ID_ARG))
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty() && *id != "0")
        else {
            return Ok(false);
        };

        Ok(self
            .orders
            .load_by_increment_id(increment_id)
            .await?
            .is_some())
    }
}
