use serde::{Deserialize, Serialize};

/// Producto tal como lo devuelve `GET /api/products/{id}`.
/// Solo `count_in_stock` interesa a la reconciliación de stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
    pub count_in_stock: u32,
}
