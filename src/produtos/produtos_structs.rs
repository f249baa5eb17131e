// src/produtos/produtos_structs.rs

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Estrutura que representa um produto do catálogo no banco de dados.
/// Deriva FromRow para mapeamento direto de resultados de query SQL; no JSON
/// os campos saem em camelCase (productCode, imagePath), como o cliente da
/// loja espera.
#[derive(Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Produto {
    pub id: i32,
    pub product_code: String,
    pub title: String,
    pub image_path: String,
    pub description: String,
    pub price: BigDecimal,
    pub discountprice: BigDecimal,
    pub category: Option<i32>,
    pub manufacturer: Option<String>,
    /// Quantidade em estoque, não confundir com quantidade no carrinho
    pub quantity: i32,
}

/// Estrutura para receber os dados de um produto novo (POST) ou atualizado
/// (PUT). O id fica de fora: é o banco que o gera.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovoProduto {
    pub product_code: String,
    pub title: String,
    pub image_path: String,
    pub description: String,
    pub price: BigDecimal,
    pub discountprice: BigDecimal,
    pub category: Option<i32>,
    pub manufacturer: Option<String>,
    pub quantity: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produto_serializa_campos_em_camel_case() {
        let produto = Produto {
            id: 7,
            product_code: "SKU-7".to_string(),
            title: "Produto 7".to_string(),
            image_path: "/images/7.jpg".to_string(),
            description: "Descrição".to_string(),
            price: BigDecimal::from(100),
            discountprice: BigDecimal::from(90),
            category: Some(2),
            manufacturer: Some("Fabricante".to_string()),
            quantity: 3,
        };

        let json = serde_json::to_value(&produto).unwrap();

        assert_eq!(json["productCode"], "SKU-7");
        assert_eq!(json["imagePath"], "/images/7.jpg");
        assert_eq!(json["quantity"], 3);
        assert!(json.get("discountprice").is_some());
    }
}
