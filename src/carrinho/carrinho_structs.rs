// src/carrinho/carrinho_structs.rs

use std::collections::HashMap;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Resumo do produto embutido em cada item do carrinho.
/// É uma cópia tirada do catálogo no momento do "add"; o carrinho nunca
/// consulta o catálogo de novo para exibir um item.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProdutoResumo {
    pub id: i32,
    pub title: String,
    pub price: BigDecimal,
    pub image_path: String,
}

/// Um item "cru" do carrinho, exatamente como guardado: o mesmo produto pode
/// aparecer em mais de um item (cada "add" acrescenta um item novo).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ItemCarrinho {
    #[serde(rename = "product")]
    pub produto: ProdutoResumo,
    #[serde(rename = "quantity")]
    pub quantidade: i32,
}

/// Um item da visão consolidada: um por produto, com a quantidade somada.
/// Derivado a partir dos itens crus; nunca é persistido.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ItemConsolidado {
    #[serde(rename = "product")]
    pub produto: ProdutoResumo,
    #[serde(rename = "quantity")]
    pub quantidade: i32,
}

// Um item consolidado é um item de carrinho válido (consolidar duas vezes
// devolve o mesmo resultado), então a conversão de volta é direta.
impl From<ItemConsolidado> for ItemCarrinho {
    fn from(item: ItemConsolidado) -> Self {
        ItemCarrinho {
            produto: item.produto,
            quantidade: item.quantidade,
        }
    }
}

/// Corpo das requisições de mutação do carrinho (add/inc/dec).
#[derive(Deserialize, Serialize)]
pub struct CarrinhoRequest {
    #[serde(rename = "productId")]
    pub produto_id: i32,
    #[serde(rename = "quantity")]
    pub quantidade: i32,
}

/// Resposta do GET /cart: a lista consolidada mais o total, calculados a
/// cada leitura a partir dos itens crus.
#[derive(Serialize, Deserialize)]
pub struct CarrinhoResponse {
    pub items: Vec<ItemConsolidado>,
    pub total: BigDecimal,
}

/// Estado dos carrinhos em memória, um por usuário autenticado.
#[derive(Default)]
pub struct CarrinhoState {
    pub carrinhos: HashMap<i32, Vec<ItemCarrinho>>,
}

/// Erros do núcleo do carrinho. Um item malformado é violação de contrato
/// do chamador e derruba a operação inteira, nunca é consertado por baixo
/// dos panos.
#[derive(Error, Debug, PartialEq)]
pub enum CarrinhoError {
    #[error("item de carrinho inválido: {0}")]
    EntradaInvalida(String),
}
