// src/carrinho/carrinho_router.rs

use actix_web::{delete, get, post, web, HttpResponse};
use std::sync::RwLock;

// Funções puras do núcleo do carrinho
use super::carrinho_core::{
    aplicar_delta_quantidade, consolidar, limpar, remover_item, total_carrinho,
};
use super::carrinho_structs::{
    CarrinhoRequest, CarrinhoResponse, CarrinhoState, ItemCarrinho, ProdutoResumo,
};
// Importa a struct de produto para a verificação no catálogo
use crate::produtos::produtos_structs::Produto;
// Importa GenericResponse do módulo shared_structs
use crate::shared::shared_structs::GenericResponse;
// Extrator de usuário autenticado: toda rota de carrinho exige login
use crate::usuarios::auth_middleware::AuthenticatedUser;
// Importa o AppState do módulo raiz (main.rs)
use crate::AppState;

/// Rota para visualizar o carrinho do usuário autenticado.
///
/// Devolve a visão consolidada (uma entrada por produto, quantidades
/// somadas) e o total, ambos recalculados a cada leitura a partir dos
/// itens crus guardados em memória.
#[get("/cart")]
pub async fn ver_carrinho(
    usuario: AuthenticatedUser,
    carrinho_data: web::Data<RwLock<CarrinhoState>>,
) -> HttpResponse {
    // Copia os itens e solta o lock de leitura antes de consolidar
    let itens = {
        let estado = carrinho_data.read().unwrap();
        estado
            .carrinhos
            .get(&usuario.user_id)
            .cloned()
            .unwrap_or_default()
    };

    let items = match consolidar(&itens) {
        Ok(consolidados) => consolidados,
        Err(e) => {
            eprintln!(
                "Erro ao consolidar o carrinho do usuário {}: {:?}",
                usuario.user_id, e
            );
            return HttpResponse::BadRequest()
                .json(GenericResponse::<()>::erro(&e.to_string()));
        }
    };
    let total = total_carrinho(&items);

    HttpResponse::Ok().json(CarrinhoResponse { items, total })
}

/// Rota para adicionar um produto ao carrinho.
///
/// Confirma o produto no catálogo ANTES de tocar no estado do carrinho:
/// se a verificação falhar, o carrinho fica exatamente como estava. Só
/// depois do sucesso é que o item entra, com o resumo do produto embutido.
#[post("/cart/add")]
pub async fn adicionar_ao_carrinho(
    usuario: AuthenticatedUser,
    req: web::Json<CarrinhoRequest>,
    data: web::Data<AppState>,
    carrinho_data: web::Data<RwLock<CarrinhoState>>,
) -> HttpResponse {
    if req.quantidade <= 0 {
        return HttpResponse::BadRequest().json(GenericResponse::<()>::erro(
            "A quantidade deve ser maior que zero.",
        ));
    }

    let produto_result = sqlx::query_as::<_, Produto>(
        "SELECT id, product_code, title, image_path, description, price, discountprice, category, manufacturer, quantity FROM products WHERE id = $1",
    )
    .bind(req.produto_id)
    .fetch_optional(&data.db_pool)
    .await;

    let produto = match produto_result {
        Ok(Some(p)) => p,
        Ok(None) => {
            return HttpResponse::BadRequest().json(GenericResponse::<()>::erro(&format!(
                "Produto com ID {} não encontrado para adicionar ao carrinho.",
                req.produto_id
            )));
        }
        Err(e) => {
            eprintln!("Erro ao buscar produto para o carrinho: {:?}", e);
            return HttpResponse::InternalServerError().json(GenericResponse::<()>::erro(
                "Erro interno ao verificar produto",
            ));
        }
    };

    // Acrescenta um item cru; duplicados do mesmo produto são juntados na leitura
    let mut estado = carrinho_data.write().unwrap();
    let itens = estado.carrinhos.entry(usuario.user_id).or_default();
    itens.push(ItemCarrinho {
        produto: ProdutoResumo {
            id: produto.id,
            title: produto.title,
            price: produto.price,
            image_path: produto.image_path,
        },
        quantidade: req.quantidade,
    });

    HttpResponse::Ok().json(GenericResponse::<()>::sucesso(
        "Item adicionado ao carrinho!",
        None,
    ))
}

/// Rota para aumentar a quantidade de um produto já presente no carrinho.
#[post("/cart/inc")]
pub async fn aumentar_quantidade(
    usuario: AuthenticatedUser,
    req: web::Json<CarrinhoRequest>,
    carrinho_data: web::Data<RwLock<CarrinhoState>>,
) -> HttpResponse {
    atualizar_quantidade(usuario.user_id, &carrinho_data, req.produto_id, req.quantidade.abs())
}

/// Rota para diminuir a quantidade de um produto do carrinho.
/// O cliente pode mandar o delta já negativo (`quantity: -1`); o sinal é
/// normalizado aqui. Quantidade que chega a zero tira o item do carrinho.
#[post("/cart/dec")]
pub async fn diminuir_quantidade(
    usuario: AuthenticatedUser,
    req: web::Json<CarrinhoRequest>,
    carrinho_data: web::Data<RwLock<CarrinhoState>>,
) -> HttpResponse {
    atualizar_quantidade(usuario.user_id, &carrinho_data, req.produto_id, -req.quantidade.abs())
}

/// Aplica um delta de quantidade ao carrinho do usuário.
///
/// Consolida os itens crus, aplica o delta na entrada do produto e guarda o
/// resultado de volta. Produto ausente é no-op deliberado: a resposta é de
/// sucesso e o carrinho não muda.
fn atualizar_quantidade(
    usuario_id: i32,
    carrinho_data: &web::Data<RwLock<CarrinhoState>>,
    produto_id: i32,
    delta: i32,
) -> HttpResponse {
    let mut estado = carrinho_data.write().unwrap();
    let itens = estado
        .carrinhos
        .get(&usuario_id)
        .cloned()
        .unwrap_or_default();

    let consolidados = match consolidar(&itens) {
        Ok(consolidados) => consolidados,
        Err(e) => {
            eprintln!(
                "Erro ao consolidar o carrinho do usuário {}: {:?}",
                usuario_id, e
            );
            return HttpResponse::BadRequest()
                .json(GenericResponse::<()>::erro(&e.to_string()));
        }
    };

    let atualizados = aplicar_delta_quantidade(consolidados, produto_id, delta);
    estado.carrinhos.insert(
        usuario_id,
        atualizados.into_iter().map(ItemCarrinho::from).collect(),
    );

    HttpResponse::Ok().json(GenericResponse::<()>::sucesso(
        "Quantidade atualizada.",
        None,
    ))
}

/// Rota para remover um produto inteiro do carrinho, qualquer que seja a
/// quantidade. Produto ausente devolve o carrinho como estava.
#[delete("/cart/remove/{product_id}")]
pub async fn remover_do_carrinho(
    usuario: AuthenticatedUser,
    caminho: web::Path<i32>,
    carrinho_data: web::Data<RwLock<CarrinhoState>>,
) -> HttpResponse {
    let produto_id = caminho.into_inner();

    let mut estado = carrinho_data.write().unwrap();
    let itens = estado
        .carrinhos
        .get(&usuario.user_id)
        .cloned()
        .unwrap_or_default();

    let consolidados = match consolidar(&itens) {
        Ok(consolidados) => consolidados,
        Err(e) => {
            eprintln!(
                "Erro ao consolidar o carrinho do usuário {}: {:?}",
                usuario.user_id, e
            );
            return HttpResponse::BadRequest()
                .json(GenericResponse::<()>::erro(&e.to_string()));
        }
    };

    let atualizados = remover_item(consolidados, produto_id);
    estado.carrinhos.insert(
        usuario.user_id,
        atualizados.into_iter().map(ItemCarrinho::from).collect(),
    );

    HttpResponse::Ok().json(GenericResponse::<()>::sucesso(
        "Item removido do carrinho.",
        None,
    ))
}

/// Rota para esvaziar o carrinho do usuário de uma vez.
#[delete("/cart/remove-all")]
pub async fn limpar_carrinho(
    usuario: AuthenticatedUser,
    carrinho_data: web::Data<RwLock<CarrinhoState>>,
) -> HttpResponse {
    let mut estado = carrinho_data.write().unwrap();
    estado.carrinhos.insert(
        usuario.user_id,
        limpar().into_iter().map(ItemCarrinho::from).collect(),
    );

    HttpResponse::Ok().json(GenericResponse::<()>::sucesso(
        "Carrinho esvaziado.",
        None,
    ))
}
