//! Built-in starter catalog, used when storage holds nothing yet.

use crate::domain::{CatalogSnapshot, Category, ContentId, ContentItem, MediaType};

const CATEGORIES: &[&str] = &[
    "MEUS PRODUTOS",
    "MAIS VENDIDOS",
    "CRIADORAS DE CONTEÚDO",
    "CHAMADA DE VÍDEO",
    "PARA HOMENS",
    "HISTÓRIAS",
];

/// (id, title, description, thumbnail, category)
const ITEMS: &[(&str, &str, &str, &str, &str)] = &[
    (
        "1",
        "Conteúdo Premium 1",
        "Descrição detalhada do conteúdo premium exclusivo para membros VIP.",
        "https://images.unsplash.com/photo-1611162617474-5b21e879e113?w=400&h=600&fit=crop",
        "MEUS PRODUTOS",
    ),
    (
        "2",
        "Mais Vendido 1",
        "O conteúdo mais popular entre nossos membros VIP.",
        "https://images.unsplash.com/photo-1494790108755-2616c9c0b8d4?w=400&h=600&fit=crop",
        "MAIS VENDIDOS",
    ),
    (
        "3",
        "Criadora Destaque",
        "Conteúdo exclusivo da nossa criadora mais popular.",
        "https://images.unsplash.com/photo-1534528741775-53994a69daeb?w=400&h=600&fit=crop",
        "CRIADORAS DE CONTEÚDO",
    ),
    (
        "4",
        "Chamada Especial",
        "Experiência única de chamada de vídeo personalizada.",
        "https://images.unsplash.com/photo-1573496359142-b8d87734a5a2?w=400&h=600&fit=crop",
        "CHAMADA DE VÍDEO",
    ),
    (
        "5",
        "Conteúdo Masculino",
        "Conteúdo especialmente selecionado para o público masculino.",
        "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=400&h=600&fit=crop",
        "PARA HOMENS",
    ),
    (
        "6",
        "História Exclusiva",
        "Histórias íntimas e exclusivas dos nossos criadores.",
        "https://images.unsplash.com/photo-1529626455594-4ff0802cfb7e?w=400&h=600&fit=crop",
        "HISTÓRIAS",
    ),
];

pub fn default_catalog() -> CatalogSnapshot {
    CatalogSnapshot {
        revision: 0,
        categories: CATEGORIES.iter().map(|name| Category::new(*name)).collect(),
        items: ITEMS
            .iter()
            .map(|(id, title, description, thumb, category)| ContentItem {
                id: ContentId::from(*id),
                title: title.to_string(),
                description: description.to_string(),
                thumbnail_ref: thumb.to_string(),
                media_type: MediaType::Image,
                category_name: category.to_string(),
            })
            .collect(),
    }
}
