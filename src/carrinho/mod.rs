// src/carrinho/mod.rs

// Declara o submódulo com as structs do carrinho (itens, estado, erros)
pub mod carrinho_structs;
// Declara o submódulo com o núcleo puro de consolidação e total
pub mod carrinho_core;
// Declara o submódulo com as rotas HTTP do carrinho
pub mod carrinho_router;
