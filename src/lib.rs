//! Utilitários de linha de comandos para o pipeline de imports da loja.

pub mod facets;
pub mod headers;
pub mod vendure;

mod paths;
mod xl;
