use serde_json::Map;

use crate::database::models::{Caja, Usuario};

pub fn cajas() -> Vec<Caja> {
    vec![
        Caja {
            id: "1".to_string(),
            nombre: "Traditional Japanese Sweets".to_string(),
            pais: "Japan".to_string(),
            descripcion: "A carefully curated selection of Japanese candies, desserts, and teas from local makers"
                .to_string(),
            imagen: "/placeholder.svg?height=400&width=600".to_string(),
            precio: 25.0,
            productos: strings(&["Pocky Sticks", "KitKat Matcha", "Mochi", "Dorayaki"]),
            extra: Map::new(),
        },
        Caja {
            id: "2".to_string(),
            nombre: "Italian Dessert Box".to_string(),
            pais: "Italy".to_string(),
            descripcion: "Multiple traditional snacks from Italy including chocolates and biscotti".to_string(),
            imagen: "/placeholder.svg?height=400&width=600".to_string(),
            precio: 30.0,
            productos: strings(&["Biscotti", "Amaretti", "Cannoli Chips", "Espresso Chocolate"]),
            extra: Map::new(),
        },
    ]
}

pub fn usuarios() -> Vec<Usuario> {
    [
        ("user1", "Carlos López", "carlos@example.com", "2024-01-15T00:00:00.000Z", true),
        ("user2", "María García", "maria@example.com", "2024-02-20T00:00:00.000Z", true),
        ("user3", "Juan Pérez", "juan@example.com", "2024-03-10T00:00:00.000Z", false),
        ("user4", "Ana Martínez", "ana@example.com", "2024-03-25T00:00:00.000Z", true),
        ("user5", "Luis Rodriguez", "luis@example.com", "2024-04-05T00:00:00.000Z", false),
    ]
    .into_iter()
    .map(|(id, nombre, correo, fecha, activa)| Usuario {
        id: id.to_string(),
        nombre: nombre.to_string(),
        correo: correo.to_string(),
        fecha_registro: fecha.to_string(),
        created_at: None,
        suscripcion_activa: activa,
        suscripcion: None,
    })
    .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
