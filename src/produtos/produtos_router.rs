// src/produtos/produtos_router.rs

use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use sqlx::{query_as, Row};
use serde_json;

// Importa as structs definidas no módulo `produtos_structs` dentro da mesma pasta `produtos`
use super::produtos_structs::{NovoProduto, Produto};

// Importa GenericResponse do módulo shared_structs
use crate::shared::shared_structs::GenericResponse;
// Rotas de manutenção do catálogo exigem usuário autenticado
use crate::usuarios::auth_middleware::AuthenticatedUser;
// Importa o AppState do módulo raiz (main.rs)
use crate::AppState;

const COLUNAS_PRODUTO: &str =
    "id, product_code, title, image_path, description, price, discountprice, category, manufacturer, quantity";

/// Rota para listar todos os produtos do catálogo.
///
/// A resposta é o array de produtos cru, sem envelope: é o formato que a
/// vitrine consome direto.
#[get("/products")]
pub async fn buscar_produtos(data: web::Data<AppState>) -> impl Responder {
    let produtos_result =
        query_as::<_, Produto>(&format!("SELECT {} FROM products", COLUNAS_PRODUTO))
            .fetch_all(&data.db_pool)
            .await;

    match produtos_result {
        Ok(produtos) => HttpResponse::Ok().json(produtos),
        Err(e) => {
            // Em caso de erro, imprime o erro no console e retorna um erro 500
            eprintln!("Erro ao buscar produtos: {:?}", e);
            HttpResponse::InternalServerError().body("Erro ao buscar produtos")
        }
    }
}

/// Rota para buscar um produto pelo id.
///
/// Devolve o registro cru (a página de produto lê os campos direto do
/// corpo); produto inexistente responde 404.
#[get("/products/{id}")]
pub async fn buscar_produto_por_id(
    data: web::Data<AppState>,
    caminho: web::Path<i32>,
) -> HttpResponse {
    let id = caminho.into_inner();

    let produto_result =
        query_as::<_, Produto>(&format!("SELECT {} FROM products WHERE id = $1", COLUNAS_PRODUTO))
            .bind(id)
            .fetch_optional(&data.db_pool)
            .await;

    match produto_result {
        Ok(Some(produto)) => HttpResponse::Ok().json(produto),
        Ok(None) => HttpResponse::NotFound().json(GenericResponse::<()>::erro(&format!(
            "Produto com ID {} não encontrado.",
            id
        ))),
        Err(e) => {
            eprintln!("Erro ao buscar produto {}: {:?}", id, e);
            HttpResponse::InternalServerError()
                .json(GenericResponse::<()>::erro("Erro ao buscar produto"))
        }
    }
}

/// Rota para inserir um novo produto no catálogo.
///
/// Recebe os dados do novo produto via JSON no corpo da requisição,
/// insere na tabela 'products' e retorna o ID gerado.
#[post("/products")]
pub async fn cadastrar_produto(
    _usuario: AuthenticatedUser,
    data: web::Data<AppState>,
    item: web::Json<NovoProduto>,
) -> HttpResponse {
    let result = sqlx::query(
        "INSERT INTO products (product_code, title, image_path, description, price, discountprice, category, manufacturer, quantity) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING id",
    )
    .bind(&item.product_code)
    .bind(&item.title)
    .bind(&item.image_path)
    .bind(&item.description)
    .bind(&item.price)
    .bind(&item.discountprice)
    .bind(item.category)
    .bind(&item.manufacturer)
    .bind(item.quantity)
    .fetch_one(&data.db_pool)
    .await;

    match result {
        Ok(row) => {
            // Tenta obter o ID gerado automaticamente pelo banco de dados
            match row.try_get::<i32, &str>("id") {
                Ok(id) => HttpResponse::Ok().json(serde_json::json!({ "id": id })),
                Err(e) => {
                    eprintln!("Erro ao obter id do novo produto: {:?}", e);
                    HttpResponse::InternalServerError()
                        .json(GenericResponse::<()>::erro("Erro ao processar resposta"))
                }
            }
        }
        Err(e) => {
            eprintln!("Erro ao inserir produto: {:?}", e);
            let mensagem = if e.to_string().contains("products_product_code_key") {
                "Já existe um produto com esse productCode."
            } else {
                "Erro ao inserir produto"
            };
            HttpResponse::InternalServerError().json(GenericResponse::<()>::erro(mensagem))
        }
    }
}

/// Rota para atualizar um produto existente.
#[put("/products/{id}")]
pub async fn atualizar_produto(
    _usuario: AuthenticatedUser,
    data: web::Data<AppState>,
    caminho: web::Path<i32>,
    item: web::Json<NovoProduto>,
) -> HttpResponse {
    let id = caminho.into_inner();

    let result = sqlx::query(
        "UPDATE products SET product_code = $1, title = $2, image_path = $3, description = $4, \
         price = $5, discountprice = $6, category = $7, manufacturer = $8, quantity = $9 WHERE id = $10",
    )
    .bind(&item.product_code)
    .bind(&item.title)
    .bind(&item.image_path)
    .bind(&item.description)
    .bind(&item.price)
    .bind(&item.discountprice)
    .bind(item.category)
    .bind(&item.manufacturer)
    .bind(item.quantity)
    .bind(id)
    .execute(&data.db_pool)
    .await;

    match result {
        Ok(r) if r.rows_affected() == 0 => HttpResponse::NotFound().json(
            GenericResponse::<()>::erro(&format!("Produto com ID {} não encontrado.", id)),
        ),
        Ok(_) => HttpResponse::Ok().json(GenericResponse::<()>::sucesso(
            "Produto atualizado com sucesso!",
            None,
        )),
        Err(e) => {
            eprintln!("Erro ao atualizar produto {}: {:?}", id, e);
            HttpResponse::InternalServerError()
                .json(GenericResponse::<()>::erro("Erro ao atualizar produto"))
        }
    }
}

/// Rota para remover um produto do catálogo.
#[delete("/products/{id}")]
pub async fn deletar_produto(
    _usuario: AuthenticatedUser,
    data: web::Data<AppState>,
    caminho: web::Path<i32>,
) -> HttpResponse {
    let id = caminho.into_inner();

    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(&data.db_pool)
        .await;

    match result {
        Ok(r) if r.rows_affected() == 0 => HttpResponse::NotFound().json(
            GenericResponse::<()>::erro(&format!("Produto com ID {} não encontrado.", id)),
        ),
        Ok(_) => HttpResponse::Ok().json(GenericResponse::<()>::sucesso(
            "Produto removido com sucesso!",
            None,
        )),
        Err(e) => {
            eprintln!("Erro ao deletar produto {}: {:?}", id, e);
            HttpResponse::InternalServerError()
                .json(GenericResponse::<()>::erro("Erro ao deletar produto"))
        }
    }
}
