//! Built-in catalog used when the backend is unreachable or empty

use shared::models::{Category, Product, Promotion};

const IMG_KEBAB: &str = "https://images.unsplash.com/photo-1529006557810-274b9b2fc783?q=80&w=800";
const IMG_EMPANADA: &str =
    "https://images.unsplash.com/photo-1628548484584-93018eec0d3d?q=80&w=800";
const IMG_COMBO: &str = "https://images.unsplash.com/photo-1547573854-74d2a71d0826?q=80&w=800";
const IMG_POSTRE: &str = "https://images.unsplash.com/photo-1563805042-7684c019e1cb?q=80&w=800";
const IMG_CAFE: &str = "https://images.unsplash.com/photo-1541167760496-162955ed8a9f?q=80&w=800";
const IMG_GELATI: &str = "https://images.unsplash.com/photo-1565958011703-44f9829ba187?q=80&w=800";
const IMG_JUGO: &str = "https://images.unsplash.com/photo-1490474418585-ba9bad8fd0ea?q=80&w=800";

/// Menu categories, in display order
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("cat-2", "Rikiskebab"),
        Category::new("cat-6", "Empanadas"),
        Category::new("cat-1", "Combos"),
        Category::new("cat-3", "Postres en Vasitos"),
        Category::new("cat-4", "Café Comestible"),
        Category::new("cat-5", "Panini Gelati"),
        Category::new("cat-7", "Jugos"),
    ]
}

fn item(id: &str, name: &str, description: &str, price: f64, image: &str, category: &str) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price,
        image_url: image.to_string(),
        category_id: category.to_string(),
        is_combo: false,
        is_eligible_for_reward: true,
    }
}

fn combo(id: &str, name: &str, description: &str, price: f64) -> Product {
    Product {
        is_combo: true,
        is_eligible_for_reward: false,
        ..item(id, name, description, price, IMG_COMBO, "cat-1")
    }
}

pub fn default_products() -> Vec<Product> {
    vec![
        item("prod-5", "Rikiskebab", "Nuestro kebab especial de la casa, una explosión de sabor.", 100.0, IMG_KEBAB, "cat-2"),
        item("prod-13", "Empanada de Jamón y Queso", "Rellena del clásico jamón y queso derretido.", 60.0, IMG_EMPANADA, "cat-6"),
        item("prod-14", "Empanada de Pollo", "Jugoso relleno de pollo guisado tradicional.", 60.0, IMG_EMPANADA, "cat-6"),
        item("prod-15", "Empanada de Pollo con Queso", "La combinación perfecta de pollo y queso cremoso.", 60.0, IMG_EMPANADA, "cat-6"),
        item("prod-16", "Empanada de Vegetales con Queso", "Una mezcla de vegetales frescos con queso.", 60.0, IMG_EMPANADA, "cat-6"),
        item("prod-17", "Empanada de Camarones", "Exquisito relleno de camarones salteados.", 90.0, IMG_EMPANADA, "cat-6"),
        combo("prod-1", "Combo Familiar", "4 Empanadas, 4 Jugos, 4 Postres, 2 Rikiskebabs, y 2 Cafés Comestibles.", 790.0),
        combo("prod-2", "Combo Dúo", "2 Empanadas, 2 Jugos, 2 Postres, y 2 Cafés Comestibles.", 375.0),
        combo("prod-3", "Combo Saludable", "1 Rikiskebab, 1 Jugo, 1 Postre, y 1 Café Comestible.", 180.0),
        combo("prod-4", "Combo Merienda", "3 Empanadas, 1 Jugo, 1 Postre, y 1 Café Comestible.", 295.0),
        item("prod-6", "Tres Leches", "Clásico postre de tres leches, suave y dulce.", 75.0, IMG_POSTRE, "cat-3"),
        item("prod-7", "Cheesecake Oreo", "Cremoso cheesecake con trozos de galleta Oreo.", 75.0, IMG_POSTRE, "cat-3"),
        item("prod-8", "Cheesecake Dulce de Leche", "Delicioso cheesecake con un toque de dulce de leche.", 75.0, IMG_POSTRE, "cat-3"),
        item("prod-9", "Cheesecake de Mango", "Cheesecake refrescante con sabor a mango tropical.", 75.0, IMG_POSTRE, "cat-3"),
        item("prod-10", "Cheesecake de Fresa", "El tradicional cheesecake con una capa de fresa.", 75.0, IMG_POSTRE, "cat-3"),
        item("prod-11", "Café Comestible", "Disfruta tu café y luego cómete la taza. ¡Cero desperdicio!", 35.0, IMG_CAFE, "cat-4"),
        item("prod-12", "Panini Gelati", "Un panini caliente sellado con tu helado favorito dentro.", 75.0, IMG_GELATI, "cat-5"),
        item("prod-18", "Jugo de Sandía", "Refrescante y natural jugo de sandía.", 50.0, IMG_JUGO, "cat-7"),
        item("prod-19", "MorirSoñando", "Bebida tradicional de naranja y leche.", 50.0, IMG_JUGO, "cat-7"),
        item("prod-20", "Jugo de Mango", "Dulce y tropical jugo de mango.", 50.0, IMG_JUGO, "cat-7"),
        item("prod-21", "Fruit Punch", "Una mezcla de frutas tropicales.", 50.0, IMG_JUGO, "cat-7"),
        item("prod-22", "Jugo de Pera y Piña", "Combinación perfecta de pera y piña.", 50.0, IMG_JUGO, "cat-7"),
    ]
}

/// Informational banners; neither carries a discount
pub fn default_promotions() -> Vec<Promotion> {
    vec![
        Promotion {
            id: "promo-1".to_string(),
            title: "Happy Hour 2x1".to_string(),
            description: "Disfruta de 2x1 en todas las bebidas frías de 4 PM a 6 PM.".to_string(),
            image_url: "https://images.unsplash.com/photo-1470337458703-46ad1756a187?q=80&w=800"
                .to_string(),
            discount_percentage: None,
            min_amount: None,
        },
        Promotion {
            id: "promo-2".to_string(),
            title: "Miércoles de Postres".to_string(),
            description:
                "Todos los miércoles, obtén un 20% de descuento en nuestros deliciosos postres."
                    .to_string(),
            image_url: "https://images.unsplash.com/photo-1551024601-bec78aea704b?q=80&w=800"
                .to_string(),
            discount_percentage: None,
            min_amount: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_products_reference_known_categories() {
        let categories: HashSet<String> =
            default_categories().into_iter().map(|c| c.id).collect();
        let products = default_products();
        assert_eq!(products.len(), 22);
        assert!(products.iter().all(|p| categories.contains(&p.category_id)));

        let ids: HashSet<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), products.len());
    }

    #[test]
    fn test_combos_not_reward_eligible() {
        for p in default_products().iter().filter(|p| p.is_combo) {
            assert_eq!(p.category_id, "cat-1");
            assert!(!p.is_eligible_for_reward);
        }
    }

    #[test]
    fn test_default_promotions_are_informational() {
        assert!(default_promotions().iter().all(|p| !p.is_discount()));
    }
}
