// src/usuarios/usuario_router.rs

use actix_web::{get, post, web, HttpResponse};
use sqlx::{query, query_as, Row};
use bcrypt::{hash, verify, DEFAULT_COST}; // Para hashing de senhas
use serde_json;

// Importa as structs do módulo de usuários
use super::usuario_structs::{AuthResponse, LoginRequest, NovoUsuario, Usuario};
// Extrator de usuário autenticado e geração do token de sessão
use super::auth_middleware::{gerar_token, AuthenticatedUser};
// Importa GenericResponse do módulo shared_structs
use crate::shared::shared_structs::GenericResponse;
// Importa o AppState do módulo raiz (main.rs)
use crate::AppState;

/// Rota para cadastrar um novo usuário.
#[post("/register")]
pub async fn cadastrar_usuario(
    data: web::Data<AppState>,
    novo_usuario: web::Json<NovoUsuario>,
) -> HttpResponse {
    // 1. Verificar se o nome de usuário ou o e-mail já estão em uso
    let existing_user = query_as::<_, Usuario>(
        "SELECT id, username, email, password_hash FROM users WHERE username = $1 OR email = $2",
    )
    .bind(&novo_usuario.username)
    .bind(&novo_usuario.email)
    .fetch_optional(&data.db_pool)
    .await;

    match existing_user {
        Ok(Some(_)) => {
            return HttpResponse::BadRequest().json(GenericResponse::<()>::erro(
                "Nome de usuário ou e-mail já cadastrado.",
            ));
        }
        Err(e) => {
            eprintln!("Erro ao verificar usuário existente: {:?}", e);
            return HttpResponse::InternalServerError().json(GenericResponse::<()>::erro(
                "Erro interno ao verificar cadastro.",
            ));
        }
        _ => {} // Usuário não encontrado, pode prosseguir
    }

    // 2. Hash da senha
    let hashed_password = match hash(&novo_usuario.password, DEFAULT_COST) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("Erro ao fazer hash da senha: {:?}", e);
            return HttpResponse::InternalServerError().json(GenericResponse::<()>::erro(
                "Erro interno ao processar senha.",
            ));
        }
    };

    // 3. Inserir o novo usuário no banco de dados
    let result = query(
        "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(&novo_usuario.username)
    .bind(&novo_usuario.email)
    .bind(&hashed_password)
    .fetch_one(&data.db_pool)
    .await;

    match result {
        Ok(row) => match row.try_get::<i32, &str>("id") {
            Ok(id) => HttpResponse::Ok().json(GenericResponse::sucesso(
                &format!("Usuário cadastrado com sucesso! ID: {}", id),
                Some(serde_json::json!({ "id": id })),
            )),
            Err(e) => {
                eprintln!("Erro ao obter id do novo usuário: {:?}", e);
                HttpResponse::InternalServerError().json(GenericResponse::<()>::erro(
                    "Erro ao processar resposta do cadastro do usuário",
                ))
            }
        },
        Err(e) => {
            eprintln!("Erro ao inserir usuário: {:?}", e);
            HttpResponse::InternalServerError()
                .json(GenericResponse::<()>::erro("Erro ao inserir usuário"))
        }
    }
}

/// Rota para login de usuário. No sucesso emite o token de sessão (JWT)
/// que as rotas protegidas exigem no cabeçalho Authorization.
#[post("/login")]
pub async fn login_usuario(
    data: web::Data<AppState>,
    login_request: web::Json<LoginRequest>,
) -> HttpResponse {
    // 1. Buscar o usuário pelo nome de usuário
    let user_result = query_as::<_, Usuario>(
        "SELECT id, username, email, password_hash FROM users WHERE username = $1",
    )
    .bind(&login_request.username)
    .fetch_optional(&data.db_pool)
    .await;

    let user = match user_result {
        Ok(Some(u)) => u,
        Ok(None) => {
            return HttpResponse::Unauthorized()
                .json(GenericResponse::<()>::erro("Credenciais inválidas."));
        }
        Err(e) => {
            eprintln!("Erro ao buscar usuário para login: {:?}", e);
            return HttpResponse::InternalServerError().json(GenericResponse::<()>::erro(
                "Erro interno ao processar login.",
            ));
        }
    };

    // 2. Verificar a senha
    let password_matches = match verify(&login_request.password, &user.password_hash) {
        Ok(matches) => matches,
        Err(e) => {
            eprintln!("Erro ao verificar senha: {:?}", e);
            return HttpResponse::InternalServerError().json(GenericResponse::<()>::erro(
                "Erro interno ao verificar senha.",
            ));
        }
    };

    if !password_matches {
        return HttpResponse::Unauthorized()
            .json(GenericResponse::<()>::erro("Credenciais inválidas."));
    }

    // 3. Gerar o token de sessão
    let auth_token = match gerar_token(user.id, &user.username, &user.email, &data.jwt_secret) {
        Ok(token) => token,
        Err(e) => {
            eprintln!("Erro ao gerar token JWT: {:?}", e);
            return HttpResponse::InternalServerError().json(GenericResponse::<()>::erro(
                "Erro interno ao criar sessão.",
            ));
        }
    };

    // 4. Retornar resposta de sucesso
    HttpResponse::Ok().json(AuthResponse {
        status: "success".to_string(),
        message: "Login bem-sucedido!".to_string(),
        user_id: user.id,
        user_name: user.username,
        user_email: user.email,
        token: auth_token,
    })
}

/// Rota para consultar a identidade da sessão atual.
/// Com token válido responde 200 com os dados das claims; sem token (ou com
/// token vencido) o extrator responde 401 antes de chegar aqui. É esta rota
/// que a vitrine usa para liberar o "adicionar ao carrinho".
#[get("/user")]
pub async fn dados_usuario(usuario: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "id": usuario.user_id,
        "username": usuario.user_name,
        "email": usuario.user_email,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use sqlx::postgres::PgPoolOptions;

    const SEGREDO: &str = "segredo_de_teste";

    fn estado_app() -> web::Data<AppState> {
        // connect_lazy não abre conexão; /user não toca o banco
        let db_pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost:5432/lojavirtual_teste")
            .unwrap();
        web::Data::new(AppState {
            db_pool,
            jwt_secret: SEGREDO.to_string(),
        })
    }

    #[actix_web::test]
    async fn user_sem_token_retorna_401() {
        let app =
            test::init_service(App::new().app_data(estado_app()).service(dados_usuario)).await;

        let req = test::TestRequest::get().uri("/user").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn user_com_token_devolve_a_identidade() {
        let app =
            test::init_service(App::new().app_data(estado_app()).service(dados_usuario)).await;

        let token = gerar_token(3, "joao", "joao@exemplo.com", SEGREDO).unwrap();
        let req = test::TestRequest::get()
            .uri("/user")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let corpo: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(corpo["id"], 3);
        assert_eq!(corpo["username"], "joao");
        assert_eq!(corpo["email"], "joao@exemplo.com");
    }
}
