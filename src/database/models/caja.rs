use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const ID: &str = "_id";
const NOMBRE: &str = "nombre";
const PAIS: &str = "pais";
const DESCRIPCION: &str = "descripcion";
const IMAGEN: &str = "imagen";
const PRECIO: &str = "precio";
const PRODUCTOS: &str = "productos";

/// A sellable snack box in the catalog.
///
/// `extra` carries every key the typed fields could not take: unknown keys,
/// and known keys whose value had another type. On the wire an `extra` entry
/// wins over the typed field of the same name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Caja {
    pub id: String,
    pub nombre: String,
    pub pais: String,
    pub descripcion: String,
    pub imagen: String,
    pub precio: f64,
    pub productos: Vec<String>,
    pub extra: Map<String, Value>,
}

/// Any subset of the editable catalog fields.
///
/// Used both as a create payload (missing fields become empty) and as a
/// shallow-merge patch. Any JSON object decodes; `_id` is dropped and values
/// of the wrong type land in `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct CajaFields {
    pub nombre: Option<String>,
    pub pais: Option<String>,
    pub descripcion: Option<String>,
    pub imagen: Option<String>,
    pub precio: Option<f64>,
    pub productos: Option<Vec<String>>,
    pub extra: Map<String, Value>,
}

impl Caja {
    /// Build a new entry under `id`, filling absent fields with empty values.
    pub fn from_fields(id: String, fields: CajaFields) -> Self {
        Self {
            id,
            nombre: fields.nombre.unwrap_or_default(),
            pais: fields.pais.unwrap_or_default(),
            descripcion: fields.descripcion.unwrap_or_default(),
            imagen: fields.imagen.unwrap_or_default(),
            precio: fields.precio.unwrap_or_default(),
            productos: fields.productos.unwrap_or_default(),
            extra: fields.extra,
        }
    }

    /// Overwrite every field present in `fields`; the id never changes.
    pub fn merge(&mut self, fields: CajaFields) {
        if let Some(nombre) = fields.nombre {
            self.nombre = nombre;
            self.extra.remove(NOMBRE);
        }
        if let Some(pais) = fields.pais {
            self.pais = pais;
            self.extra.remove(PAIS);
        }
        if let Some(descripcion) = fields.descripcion {
            self.descripcion = descripcion;
            self.extra.remove(DESCRIPCION);
        }
        if let Some(imagen) = fields.imagen {
            self.imagen = imagen;
            self.extra.remove(IMAGEN);
        }
        if let Some(precio) = fields.precio {
            self.precio = precio;
            self.extra.remove(PRECIO);
        }
        if let Some(productos) = fields.productos {
            self.productos = productos;
            self.extra.remove(PRODUCTOS);
        }
        for (key, value) in fields.extra {
            self.reset_typed(&key);
            self.extra.insert(key, value);
        }
    }

    // A raw value now shadows this key, so the typed copy must not linger
    fn reset_typed(&mut self, key: &str) {
        match key {
            NOMBRE => self.nombre.clear(),
            PAIS => self.pais.clear(),
            DESCRIPCION => self.descripcion.clear(),
            IMAGEN => self.imagen.clear(),
            PRECIO => self.precio = 0.0,
            PRODUCTOS => self.productos.clear(),
            _ => {}
        }
    }
}

impl From<Map<String, Value>> for CajaFields {
    fn from(map: Map<String, Value>) -> Self {
        let mut fields = CajaFields::default();
        for (key, value) in map {
            let raw = match (key.as_str(), value) {
                (ID, _) => None,
                (NOMBRE, Value::String(s)) => {
                    fields.nombre = Some(s);
                    None
                }
                (PAIS, Value::String(s)) => {
                    fields.pais = Some(s);
                    None
                }
                (DESCRIPCION, Value::String(s)) => {
                    fields.descripcion = Some(s);
                    None
                }
                (IMAGEN, Value::String(s)) => {
                    fields.imagen = Some(s);
                    None
                }
                (PRECIO, Value::Number(n)) if n.as_f64().is_some() => {
                    fields.precio = n.as_f64();
                    None
                }
                (PRODUCTOS, Value::Array(items)) if items.iter().all(Value::is_string) => {
                    fields.productos = Some(items.into_iter().filter_map(string_value).collect());
                    None
                }
                (_, value) => Some(value),
            };
            if let Some(value) = raw {
                fields.extra.insert(key, value);
            }
        }
        fields
    }
}

impl From<CajaFields> for Map<String, Value> {
    fn from(fields: CajaFields) -> Self {
        let mut map = Map::new();
        let strings = [
            (NOMBRE, fields.nombre),
            (PAIS, fields.pais),
            (DESCRIPCION, fields.descripcion),
            (IMAGEN, fields.imagen),
        ];
        for (key, value) in strings {
            if let Some(value) = value {
                map.insert(key.to_string(), Value::String(value));
            }
        }
        if let Some(precio) = fields.precio {
            map.insert(PRECIO.to_string(), price_value(precio));
        }
        if let Some(productos) = fields.productos {
            map.insert(PRODUCTOS.to_string(), Value::from(productos));
        }
        map.extend(fields.extra);
        map
    }
}

impl TryFrom<Map<String, Value>> for Caja {
    type Error = String;

    fn try_from(mut map: Map<String, Value>) -> Result<Self, Self::Error> {
        let id = match map.remove(ID) {
            Some(Value::String(id)) => id,
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => return Err(format!("invalid {ID}: {other}")),
            None => return Err(format!("missing {ID}")),
        };
        Ok(Caja::from_fields(id, CajaFields::from(map)))
    }
}

impl From<Caja> for Map<String, Value> {
    fn from(caja: Caja) -> Self {
        let mut map = Map::new();
        map.insert(ID.to_string(), Value::String(caja.id));
        map.insert(NOMBRE.to_string(), Value::String(caja.nombre));
        map.insert(PAIS.to_string(), Value::String(caja.pais));
        map.insert(DESCRIPCION.to_string(), Value::String(caja.descripcion));
        map.insert(IMAGEN.to_string(), Value::String(caja.imagen));
        map.insert(PRECIO.to_string(), price_value(caja.precio));
        map.insert(PRODUCTOS.to_string(), Value::from(caja.productos));
        map.extend(caja.extra);
        map
    }
}

fn string_value(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        _ => None,
    }
}

/// Whole prices go out as integers so `20` is echoed as `20`, not `20.0`.
fn price_value(precio: f64) -> Value {
    if precio.fract() == 0.0 && precio.abs() < i64::MAX as f64 {
        Value::from(precio as i64)
    } else {
        serde_json::Number::from_f64(precio)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}
