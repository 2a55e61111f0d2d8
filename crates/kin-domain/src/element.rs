use serde::{Deserialize, Serialize};
use std::fmt;

/// Elementos soportados por la clasificación de átomos y enlaces.
///
/// Para añadir un elemento: nueva variante aquí, su símbolo en `symbol` y
/// `from_symbol`, y las entradas de enlace correspondientes en la tabla del
/// clasificador.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Element {
    C,
    H,
    O,
    N,
    S,
}

impl Element {
    pub const ALL: [Element; 5] = [Element::C, Element::H, Element::O, Element::N, Element::S];

    pub fn symbol(self) -> &'static str {
        match self {
            Element::C => "C",
            Element::H => "H",
            Element::O => "O",
            Element::N => "N",
            Element::S => "S",
        }
    }

    /// `None` para elementos fuera del conjunto soportado.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "C" => Some(Element::C),
            "H" => Some(Element::H),
            "O" => Some(Element::O),
            "N" => Some(Element::N),
            "S" => Some(Element::S),
            _ => None,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
