use serde::{Deserialize, Serialize};

use crate::config::PricingConfig;
use crate::models::{CartLine, CartState, PaymentMethod, ShippingAddress};

/// Redondeo a céntimos
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Resumen de precios de la página "Place Order"
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub items_price: f64,
    pub shipping_price: f64,
    pub tax_price: f64,
    pub total_price: f64,
}

impl OrderSummary {
    pub fn compute(cart: &CartState, pricing: &PricingConfig) -> Self {
        let items_price = round2(cart.items_price());
        let shipping_price = if cart.is_empty() || items_price > pricing.free_shipping_threshold {
            0.0
        } else {
            pricing.shipping_price
        };
        let tax_price = round2(items_price * pricing.tax_rate);
        let total_price = round2(items_price + shipping_price + tax_price);

        Self {
            items_price,
            shipping_price,
            tax_price,
            total_price,
        }
    }
}

/// Cuerpo de `POST /api/orders`: snapshot completo del carrito
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub order_items: Vec<CartLine>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    #[serde(flatten)]
    pub summary: OrderSummary,
}

/// Respuesta de `POST /api/orders` (solo interesa el identificador)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedOrder {
    #[serde(rename = "_id")]
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart_with(price: f64, quantity: u32) -> CartState {
        CartState {
            cart_items: vec![CartLine {
                product_id: "p1".to_string(),
                name: "Pants".to_string(),
                slug: "pants".to_string(),
                price,
                count_in_stock: 20,
                quantity,
                image: String::new(),
            }],
            ..CartState::default()
        }
    }

    #[test]
    fn small_orders_pay_shipping() {
        let summary = OrderSummary::compute(&cart_with(45.99, 2), &PricingConfig::default());
        assert_eq!(summary.items_price, 91.98);
        assert_eq!(summary.shipping_price, 15.0);
        assert_eq!(summary.tax_price, 13.8);
        assert_eq!(summary.total_price, 120.78);
    }

    #[test]
    fn large_orders_ship_free() {
        let summary = OrderSummary::compute(&cart_with(120.0, 2), &PricingConfig::default());
        assert_eq!(summary.shipping_price, 0.0);
        assert_eq!(summary.total_price, 276.0);
    }

    #[test]
    fn order_request_flattens_prices() {
        let request = OrderRequest {
            order_items: cart_with(10.0, 1).cart_items,
            shipping_address: ShippingAddress::default(),
            payment_method: PaymentMethod::Cash,
            summary: OrderSummary::compute(&cart_with(10.0, 1), &PricingConfig::default()),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["paymentMethod"], "Cash");
        assert_eq!(json["itemsPrice"], 10.0);
        assert!(json["orderItems"].is_array());
    }
}
