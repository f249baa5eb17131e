// src/usuarios/auth_middleware.rs

use actix_web::{dev::Payload, error::ErrorUnauthorized, web, FromRequest, HttpRequest};
use chrono::{Duration, Utc};
use futures::future::{ready, Ready};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

// Importa as Claims do módulo de structs de usuário
use super::usuario_structs::Claims;
// Importa o AppState do módulo raiz (main.rs)
use crate::AppState;

/// Struct que representa o usuário autenticado, extraída das claims do JWT
/// nas requisições protegidas.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub user_name: String,
    pub user_email: String,
}

/// Gera o token de sessão emitido no login: HS256, validade de 24 horas.
pub fn gerar_token(
    usuario_id: i32,
    nome: &str,
    email: &str,
    jwt_secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let expiracao = Utc::now() + Duration::hours(24);
    let claims = Claims {
        sub: usuario_id,
        name: nome.to_string(),
        email: email.to_string(),
        exp: expiracao.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_ref()),
    )
}

/// Decodifica e valida um token, devolvendo as claims.
pub fn validar_token(token: &str, jwt_secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_ref()),
        &validation,
    )
    .map(|dados| dados.claims)
}

/// Tira o token do cabeçalho "Authorization: Bearer <token>".
fn extrair_token(req: &HttpRequest) -> Result<String, &'static str> {
    let header = req
        .headers()
        .get("Authorization")
        .ok_or("Token de autenticação ausente.")?;
    let header_str = header
        .to_str()
        .map_err(|_| "Token de autenticação inválido.")?;
    let token = header_str
        .strip_prefix("Bearer ")
        .ok_or("Formato de token inválido. Esperado 'Bearer <token>'.")?;
    Ok(token.to_string())
}

/// Extrator de autenticação para Actix Web.
/// Qualquer falha (token ausente, malformado, vencido, assinatura errada)
/// responde 401 e a sessão deixa de valer; o cliente precisa logar de novo.
impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // Acessa o AppState para obter a chave secreta JWT
        let jwt_secret = match req.app_data::<web::Data<AppState>>() {
            Some(state) => state.jwt_secret.clone(),
            None => {
                eprintln!("Erro: AppState não disponível no extrator de autenticação.");
                return ready(Err(ErrorUnauthorized("Erro de configuração do servidor.")));
            }
        };

        let token = match extrair_token(req) {
            Ok(token) => token,
            Err(mensagem) => return ready(Err(ErrorUnauthorized(mensagem))),
        };

        let claims = match validar_token(&token, &jwt_secret) {
            Ok(claims) => claims,
            Err(e) => {
                let mensagem = match e.kind() {
                    ErrorKind::ExpiredSignature => "Token expirado.",
                    ErrorKind::InvalidSignature => "Assinatura do token inválida.",
                    _ => "Token de autenticação inválido.",
                };
                return ready(Err(ErrorUnauthorized(mensagem)));
            }
        };

        ready(Ok(AuthenticatedUser {
            user_id: claims.sub,
            user_name: claims.name,
            user_email: claims.email,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEGREDO: &str = "segredo_de_teste";

    #[test]
    fn token_gerado_valida_e_devolve_as_claims() {
        let token = gerar_token(42, "Maria", "maria@exemplo.com", SEGREDO).unwrap();

        let claims = validar_token(&token, SEGREDO).unwrap();

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.name, "Maria");
        assert_eq!(claims.email, "maria@exemplo.com");
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn token_com_chave_errada_e_rejeitado() {
        let token = gerar_token(42, "Maria", "maria@exemplo.com", SEGREDO).unwrap();

        let resultado = validar_token(&token, "outra_chave");

        assert!(matches!(
            resultado.unwrap_err().kind(),
            ErrorKind::InvalidSignature
        ));
    }

    #[test]
    fn token_vencido_e_rejeitado() {
        // Expirado há duas horas, bem além da tolerância padrão de validação
        let claims = Claims {
            sub: 42,
            name: "Maria".to_string(),
            email: "maria@exemplo.com".to_string(),
            exp: (Utc::now() - Duration::hours(2)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SEGREDO.as_ref()),
        )
        .unwrap();

        let resultado = validar_token(&token, SEGREDO);

        assert!(matches!(
            resultado.unwrap_err().kind(),
            ErrorKind::ExpiredSignature
        ));
    }

    #[test]
    fn token_malformado_e_rejeitado() {
        assert!(validar_token("nem-de-longe-um-jwt", SEGREDO).is_err());
    }
}
