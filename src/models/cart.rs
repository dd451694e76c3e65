use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::Product;

// ============================================================================
// LÍNEA DE CARRITO
// ============================================================================

/// Un producto en el carrito con su cantidad.
/// Identidad = `product_id`: nunca hay dos líneas con el mismo producto.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(rename = "_id")]
    pub product_id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    pub price: f64,
    /// Stock conocido en el momento de añadir (informativo, no se revalida)
    pub count_in_stock: u32,
    pub quantity: u32,
    #[serde(default)]
    pub image: String,
}

impl CartLine {
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            slug: product.slug.clone(),
            price: product.price,
            count_in_stock: product.count_in_stock,
            quantity,
            image: product.image.clone(),
        }
    }

    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

// ============================================================================
// DIRECCIÓN DE ENVÍO
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub full_name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

impl ShippingAddress {
    /// Hay dirección guardada (mismo criterio que la página de pago: campo `address`)
    pub fn is_present(&self) -> bool {
        !self.address.trim().is_empty()
    }

    /// Primer campo vacío del formulario, con la etiqueta que ve el usuario
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("Full Name", &self.full_name),
            ("Address", &self.address),
            ("City", &self.city),
            ("Postal Code", &self.postal_code),
            ("Country", &self.country),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| label)
    }
}

// ============================================================================
// MÉTODO DE PAGO (conjunto cerrado)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    PayPal,
    Stripe,
    Cash,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::PayPal,
        PaymentMethod::Stripe,
        PaymentMethod::Cash,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::PayPal => "PayPal",
            PaymentMethod::Stripe => "Stripe",
            PaymentMethod::Cash => "Cash",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPaymentMethod(pub String);

impl fmt::Display for UnknownPaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown payment method '{}'", self.0)
    }
}

impl std::error::Error for UnknownPaymentMethod {}

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownPaymentMethod(s.to_string()))
    }
}

// ============================================================================
// ESTADO DEL CARRITO
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CartState {
    /// Orden de llegada preservado
    pub cart_items: Vec<CartLine>,
    pub shipping_address: Option<ShippingAddress>,
    pub payment_method: Option<PaymentMethod>,
}

impl CartState {
    pub fn find(&self, product_id: &str) -> Option<&CartLine> {
        self.cart_items.iter().find(|line| line.product_id == product_id)
    }

    /// Cantidad actual de un producto (0 si no está)
    pub fn quantity_of(&self, product_id: &str) -> u32 {
        self.find(product_id).map(|line| line.quantity).unwrap_or(0)
    }

    /// Número de líneas (badge del carrito)
    pub fn item_count(&self) -> usize {
        self.cart_items.len()
    }

    pub fn total_quantity(&self) -> u32 {
        self.cart_items
            .iter()
            .fold(0u32, |total, line| total.saturating_add(line.quantity))
    }

    pub fn items_price(&self) -> f64 {
        self.cart_items.iter().map(CartLine::subtotal).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cart_items.is_empty()
    }

    pub fn has_shipping_address(&self) -> bool {
        self.shipping_address.as_ref().is_some_and(ShippingAddress::is_present)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, price: f64, quantity: u32) -> CartLine {
        CartLine {
            product_id: id.to_string(),
            name: format!("Product {id}"),
            slug: id.to_string(),
            price,
            count_in_stock: 10,
            quantity,
            image: String::new(),
        }
    }

    #[test]
    fn cart_line_uses_storefront_json_names() {
        let json = serde_json::to_value(line("p1", 9.5, 2)).unwrap();
        assert_eq!(json["_id"], "p1");
        assert_eq!(json["countInStock"], 10);
        assert!(json.get("product_id").is_none());
    }

    #[test]
    fn payment_method_parses_only_closed_set() {
        assert_eq!("Stripe".parse::<PaymentMethod>(), Ok(PaymentMethod::Stripe));
        assert!("Bitcoin".parse::<PaymentMethod>().is_err());
        assert!("paypal".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn totals_follow_lines() {
        let cart = CartState {
            cart_items: vec![line("a", 10.0, 2), line("b", 2.5, 4)],
            ..CartState::default()
        };
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total_quantity(), 6);
        assert_eq!(cart.items_price(), 30.0);
        assert_eq!(cart.quantity_of("b"), 4);
        assert_eq!(cart.quantity_of("zzz"), 0);
    }

    #[test]
    fn total_quantity_saturates() {
        let cart = CartState {
            cart_items: vec![line("a", 1.0, u32::MAX), line("b", 1.0, 3)],
            ..CartState::default()
        };
        assert_eq!(cart.total_quantity(), u32::MAX);
    }

    #[test]
    fn address_presence_checks_address_field() {
        let mut address = ShippingAddress::default();
        assert!(!address.is_present());
        address.address = "Thamel 12".to_string();
        assert!(address.is_present());
        assert_eq!(address.missing_field(), Some("Full Name"));
    }
}
