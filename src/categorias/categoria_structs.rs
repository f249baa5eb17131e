// src/categorias/categoria_structs.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Estrutura para receber dados de uma nova categoria na requisição POST
#[derive(Deserialize)]
pub struct NovaCategoria {
    pub name: String,
}

/// Estrutura que representa uma categoria no banco de dados
#[derive(Serialize, FromRow)]
pub struct Categoria {
    pub id: i32,
    pub name: String,
}
