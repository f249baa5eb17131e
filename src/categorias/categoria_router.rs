// src/categorias/categoria_router.rs

use actix_web::{get, post, web, HttpResponse, Responder};
use sqlx::{query_as, Row};

// Importa as structs de categoria
use super::categoria_structs::{Categoria, NovaCategoria};

// Importa GenericResponse do módulo shared_structs
use crate::shared::shared_structs::GenericResponse;
// Importa a struct de produto para a listagem por categoria
use crate::produtos::produtos_structs::Produto;
// Cadastro de categoria exige usuário autenticado
use crate::usuarios::auth_middleware::AuthenticatedUser;
// Importa o AppState do módulo raiz (main.rs)
use crate::AppState;

/// Rota para listar todas as categorias.
#[get("/categories")]
pub async fn buscar_categorias(data: web::Data<AppState>) -> impl Responder {
    let categorias_result = query_as::<_, Categoria>("SELECT id, name FROM categories")
        .fetch_all(&data.db_pool)
        .await;

    match categorias_result {
        Ok(categorias) => HttpResponse::Ok().json(categorias),
        Err(e) => {
            eprintln!("Erro ao buscar categorias: {:?}", e);
            HttpResponse::InternalServerError()
                .json(GenericResponse::<()>::erro("Erro ao buscar categorias"))
        }
    }
}

/// Rota para buscar uma categoria pelo id.
#[get("/categories/{id}")]
pub async fn buscar_categoria_por_id(
    data: web::Data<AppState>,
    caminho: web::Path<i32>,
) -> HttpResponse {
    let id = caminho.into_inner();

    let categoria_result = query_as::<_, Categoria>("SELECT id, name FROM categories WHERE id = $1")
        .bind(id)
        .fetch_optional(&data.db_pool)
        .await;

    match categoria_result {
        Ok(Some(categoria)) => HttpResponse::Ok().json(categoria),
        Ok(None) => HttpResponse::NotFound().json(GenericResponse::<()>::erro(&format!(
            "Categoria com ID {} não encontrada.",
            id
        ))),
        Err(e) => {
            eprintln!("Erro ao buscar categoria {}: {:?}", id, e);
            HttpResponse::InternalServerError()
                .json(GenericResponse::<()>::erro("Erro ao buscar categoria"))
        }
    }
}

/// Rota para listar os produtos de uma categoria (a página de navegação
/// por categoria da vitrine consome este array cru).
#[get("/categories/{id}/products")]
pub async fn buscar_produtos_da_categoria(
    data: web::Data<AppState>,
    caminho: web::Path<i32>,
) -> HttpResponse {
    let id = caminho.into_inner();

    let produtos_result = query_as::<_, Produto>(
        "SELECT id, product_code, title, image_path, description, price, discountprice, category, manufacturer, quantity \
         FROM products WHERE category = $1",
    )
    .bind(id)
    .fetch_all(&data.db_pool)
    .await;

    match produtos_result {
        Ok(produtos) => HttpResponse::Ok().json(produtos),
        Err(e) => {
            eprintln!("Erro ao buscar produtos da categoria {}: {:?}", id, e);
            HttpResponse::InternalServerError().json(GenericResponse::<()>::erro(
                "Erro ao buscar produtos da categoria",
            ))
        }
    }
}

/// Rota para cadastrar uma nova categoria.
#[post("/categories")]
pub async fn cadastrar_categoria(
    _usuario: AuthenticatedUser,
    data: web::Data<AppState>,
    item: web::Json<NovaCategoria>,
) -> HttpResponse {
    let result = sqlx::query("INSERT INTO categories (name) VALUES ($1) RETURNING id")
        .bind(&item.name)
        .fetch_one(&data.db_pool)
        .await;

    match result {
        Ok(row) => match row.try_get::<i32, &str>("id") {
            Ok(id) => HttpResponse::Ok().json(GenericResponse::sucesso(
                &format!("Categoria cadastrada com sucesso! ID: {}", id),
                Some(serde_json::json!({ "id": id })),
            )),
            Err(e) => {
                eprintln!("Erro ao obter id da nova categoria: {:?}", e);
                HttpResponse::InternalServerError().json(GenericResponse::<()>::erro(
                    "Erro ao processar resposta do cadastro da categoria",
                ))
            }
        },
        Err(e) => {
            eprintln!("Erro ao inserir categoria: {:?}", e);
            HttpResponse::InternalServerError()
                .json(GenericResponse::<()>::erro("Erro ao inserir categoria"))
        }
    }
}
