// src/carrinho/carrinho_core.rs

use bigdecimal::BigDecimal;

use super::carrinho_structs::{CarrinhoError, ItemCarrinho, ItemConsolidado};

/// Consolida os itens crus do carrinho em uma entrada por produto.
///
/// Percorre a sequência uma única vez, da esquerda para a direita: se o
/// produto já apareceu, soma a quantidade na entrada existente; senão abre
/// uma entrada nova. A ordem de primeira aparição é preservada.
///
/// Itens malformados (quantidade não positiva, preço negativo) são violação
/// de contrato e devolvem `EntradaInvalida` sem resultado parcial.
pub fn consolidar(itens: &[ItemCarrinho]) -> Result<Vec<ItemConsolidado>, CarrinhoError> {
    let zero = BigDecimal::from(0);
    let mut consolidados: Vec<ItemConsolidado> = Vec::new();

    for item in itens {
        if item.quantidade <= 0 {
            return Err(CarrinhoError::EntradaInvalida(format!(
                "quantidade {} para o produto {}",
                item.quantidade, item.produto.id
            )));
        }
        if item.produto.price < zero {
            return Err(CarrinhoError::EntradaInvalida(format!(
                "preço negativo para o produto {}",
                item.produto.id
            )));
        }

        // Procura uma entrada já aberta para o mesmo produto
        let mut encontrado = false;
        for consolidado in consolidados.iter_mut() {
            if consolidado.produto.id == item.produto.id {
                consolidado.quantidade += item.quantidade;
                encontrado = true;
                break;
            }
        }

        if !encontrado {
            consolidados.push(ItemConsolidado {
                produto: item.produto.clone(),
                quantidade: item.quantidade,
            });
        }
    }

    Ok(consolidados)
}

/// Soma preço × quantidade sobre a lista consolidada. Lista vazia soma zero.
/// O total nunca é guardado: é função pura do conjunto atual de itens e é
/// recalculado a cada leitura.
pub fn total_carrinho(itens: &[ItemConsolidado]) -> BigDecimal {
    let mut total = BigDecimal::from(0);
    for item in itens {
        let quantidade_bigdecimal = BigDecimal::from(item.quantidade);
        total += &item.produto.price * &quantidade_bigdecimal;
    }
    total
}

/// Aplica um delta (positivo ou negativo) à quantidade do produto indicado.
///
/// Se a quantidade resultante ficar em zero ou abaixo, a entrada sai da
/// lista. Se o produto não estiver na lista, a entrada não é criada e a
/// lista volta como estava.
pub fn aplicar_delta_quantidade(
    itens: Vec<ItemConsolidado>,
    produto_id: i32,
    delta: i32,
) -> Vec<ItemConsolidado> {
    let mut atualizados = Vec::with_capacity(itens.len());
    for mut item in itens {
        if item.produto.id == produto_id {
            item.quantidade += delta;
            if item.quantidade <= 0 {
                continue; // zerou: a entrada sai inteira
            }
        }
        atualizados.push(item);
    }
    atualizados
}

/// Remove todas as entradas do produto indicado. Produto ausente devolve a
/// lista como estava.
pub fn remover_item(itens: Vec<ItemConsolidado>, produto_id: i32) -> Vec<ItemConsolidado> {
    itens
        .into_iter()
        .filter(|item| item.produto.id != produto_id)
        .collect()
}

/// Esvazia o carrinho, sem condição.
pub fn limpar() -> Vec<ItemConsolidado> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carrinho::carrinho_structs::ProdutoResumo;

    fn item(id: i32, preco: i64, quantidade: i32) -> ItemCarrinho {
        ItemCarrinho {
            produto: ProdutoResumo {
                id,
                title: format!("Produto {}", id),
                price: BigDecimal::from(preco),
                image_path: format!("/images/{}.jpg", id),
            },
            quantidade,
        }
    }

    #[test]
    fn consolidar_soma_duplicados_preservando_ordem() {
        // [A:1, B:2, A:3] -> [A:4, B:2], A antes de B
        let itens = vec![item(1, 10, 1), item(2, 20, 2), item(1, 10, 3)];

        let consolidados = consolidar(&itens).unwrap();

        assert_eq!(consolidados.len(), 2);
        assert_eq!(consolidados[0].produto.id, 1);
        assert_eq!(consolidados[0].quantidade, 4);
        assert_eq!(consolidados[1].produto.id, 2);
        assert_eq!(consolidados[1].quantidade, 2);
    }

    #[test]
    fn consolidar_preserva_quantidade_total_por_produto() {
        let itens = vec![
            item(5, 10, 2),
            item(7, 30, 1),
            item(5, 10, 5),
            item(7, 30, 4),
            item(5, 10, 1),
        ];

        let consolidados = consolidar(&itens).unwrap();

        let soma = |id: i32| -> i32 {
            consolidados
                .iter()
                .filter(|c| c.produto.id == id)
                .map(|c| c.quantidade)
                .sum()
        };
        assert_eq!(soma(5), 8);
        assert_eq!(soma(7), 5);
        // nenhum produto aparece duas vezes na saída
        assert_eq!(consolidados.len(), 2);
    }

    #[test]
    fn consolidar_e_idempotente() {
        let itens = vec![item(1, 10, 1), item(2, 20, 2), item(1, 10, 3)];

        let uma_vez = consolidar(&itens).unwrap();
        let crus: Vec<ItemCarrinho> = uma_vez.iter().cloned().map(ItemCarrinho::from).collect();
        let duas_vezes = consolidar(&crus).unwrap();

        assert_eq!(uma_vez, duas_vezes);
    }

    #[test]
    fn consolidar_lista_vazia() {
        let consolidados = consolidar(&[]).unwrap();
        assert!(consolidados.is_empty());
    }

    #[test]
    fn consolidar_rejeita_quantidade_nao_positiva() {
        let itens = vec![item(1, 10, 0)];
        assert!(matches!(
            consolidar(&itens),
            Err(CarrinhoError::EntradaInvalida(_))
        ));

        let itens = vec![item(1, 10, -2)];
        assert!(matches!(
            consolidar(&itens),
            Err(CarrinhoError::EntradaInvalida(_))
        ));
    }

    #[test]
    fn total_de_carrinho_vazio_e_zero() {
        assert_eq!(total_carrinho(&[]), BigDecimal::from(0));
    }

    #[test]
    fn total_soma_preco_vezes_quantidade() {
        // 100 × 2 + 50 × 1 = 250
        let itens = vec![item(1, 100, 2), item(2, 50, 1)];
        let consolidados = consolidar(&itens).unwrap();

        assert_eq!(total_carrinho(&consolidados), BigDecimal::from(250));
    }

    #[test]
    fn delta_negativo_que_zera_remove_a_entrada() {
        let consolidados = consolidar(&[item(1, 10, 1)]).unwrap();

        let atualizados = aplicar_delta_quantidade(consolidados, 1, -1);

        assert!(atualizados.is_empty());
    }

    #[test]
    fn delta_abaixo_de_zero_tambem_remove() {
        let consolidados = consolidar(&[item(1, 10, 2)]).unwrap();

        let atualizados = aplicar_delta_quantidade(consolidados, 1, -5);

        assert!(atualizados.is_empty());
    }

    #[test]
    fn delta_em_produto_ausente_nao_muda_nada() {
        let consolidados = consolidar(&[item(1, 10, 2)]).unwrap();

        let atualizados = aplicar_delta_quantidade(consolidados.clone(), 99, 1);

        assert_eq!(atualizados, consolidados);
    }

    #[test]
    fn delta_positivo_soma_na_entrada_existente() {
        let consolidados = consolidar(&[item(1, 10, 2), item(2, 20, 1)]).unwrap();

        let atualizados = aplicar_delta_quantidade(consolidados, 1, 3);

        assert_eq!(atualizados[0].quantidade, 5);
        assert_eq!(atualizados[1].quantidade, 1);
    }

    #[test]
    fn remover_produto_ausente_devolve_lista_igual() {
        let consolidados = consolidar(&[item(1, 10, 2)]).unwrap();

        let atualizados = remover_item(consolidados.clone(), 42);

        assert_eq!(atualizados, consolidados);
    }

    #[test]
    fn remover_tira_todas_as_entradas_do_produto() {
        let consolidados = consolidar(&[item(1, 10, 2), item(2, 20, 1)]).unwrap();

        let atualizados = remover_item(consolidados, 1);

        assert_eq!(atualizados.len(), 1);
        assert_eq!(atualizados[0].produto.id, 2);
    }

    #[test]
    fn limpar_devolve_carrinho_vazio() {
        assert!(limpar().is_empty());
    }
}
