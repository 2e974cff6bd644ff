/*
[INPUT]:  Typed order parameters and path segments
[OUTPUT]: Order book data and order acknowledgements
[POS]:    HTTP layer - order endpoints (require auth)
[UPDATE]: When adding order endpoints or changing order flow
*/

use reqwest::Method;

use crate::http::client::NO_PARAMS;
use crate::http::endpoints;
use crate::http::{KiteClient, Result};
use crate::types::{Order, OrderParams, OrderResponse, Trade, Variety};

impl KiteClient {
    /// List all orders for the day
    ///
    /// GET /orders
    pub async fn orders(&self) -> Result<Vec<Order>> {
        self.request_envelope(Method::GET, endpoints::ORDERS, NO_PARAMS)
            .await
    }

    /// List all trades for the day
    ///
    /// GET /trades
    pub async fn trades(&self) -> Result<Vec<Trade>> {
        self.request_envelope(Method::GET, endpoints::TRADES, NO_PARAMS)
            .await
    }

    /// State transitions of a single order
    ///
    /// GET /orders/{order_id}
    pub async fn order_history(&self, order_id: &str) -> Result<Vec<Order>> {
        self.request_envelope(Method::GET, &endpoints::order_history(order_id), NO_PARAMS)
            .await
    }

    /// Trades generated by a single order
    ///
    /// GET /orders/{order_id}/trades
    pub async fn order_trades(&self, order_id: &str) -> Result<Vec<Trade>> {
        self.request_envelope(Method::GET, &endpoints::order_trades(order_id), NO_PARAMS)
            .await
    }

    /// Place an order
    ///
    /// POST /orders/{variety}
    pub async fn place_order(
        &self,
        variety: Variety,
        params: &OrderParams,
    ) -> Result<OrderResponse> {
        self.request_envelope(Method::POST, &endpoints::place_order(variety), Some(params))
            .await
    }

    /// Modify a pending order
    ///
    /// PUT /orders/{variety}/{order_id}
    pub async fn modify_order(
        &self,
        variety: Variety,
        order_id: &str,
        params: &OrderParams,
    ) -> Result<OrderResponse> {
        self.request_envelope(
            Method::PUT,
            &endpoints::modify_order(variety, order_id),
            Some(params),
        )
        .await
    }

    /// Cancel a pending order. For bracket/cover legs the parent order id
    /// is attached to the same parameter set sent with the request.
    ///
    /// DELETE /orders/{variety}/{order_id}
    pub async fn cancel_order(
        &self,
        variety: Variety,
        order_id: &str,
        parent_order_id: Option<&str>,
    ) -> Result<OrderResponse> {
        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(parent_order_id) = parent_order_id {
            params.push(("parent_order_id", parent_order_id));
        }

        self.request_envelope(
            Method::DELETE,
            &endpoints::cancel_order(variety, order_id),
            Some(params.as_slice()),
        )
        .await
    }

    /// Exit a bracket or cover order; same wire call as cancel.
    pub async fn exit_order(
        &self,
        variety: Variety,
        order_id: &str,
        parent_order_id: Option<&str>,
    ) -> Result<OrderResponse> {
        self.cancel_order(variety, order_id, parent_order_id).await
    }
}
