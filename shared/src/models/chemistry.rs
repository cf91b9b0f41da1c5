//! Chemical composition models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Tracked chemical elements
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Iron,
    Calcium,
    Silicon,
    Aluminum,
    Magnesium,
}

impl Element {
    pub const ALL: [Element; 5] = [
        Element::Iron,
        Element::Calcium,
        Element::Silicon,
        Element::Aluminum,
        Element::Magnesium,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Element::Iron => "iron",
            Element::Calcium => "calcium",
            Element::Silicon => "silicon",
            Element::Aluminum => "aluminum",
            Element::Magnesium => "magnesium",
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Element {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "iron" => Ok(Element::Iron),
            "calcium" => Ok(Element::Calcium),
            "silicon" => Ok(Element::Silicon),
            "aluminum" => Ok(Element::Aluminum),
            "magnesium" => Ok(Element::Magnesium),
            _ => Err(ValidationError::Unknown {
                kind: "element",
                value: s.to_string(),
            }),
        }
    }
}

/// Percentage composition of a load.
///
/// Iron and calcium drive pricing and yield, so they are required. The
/// impurity and trace elements may be absent from a lab sheet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chemistry {
    pub iron: Decimal,
    pub calcium: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub silicon: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aluminum: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnesium: Option<Decimal>,
}

impl Chemistry {
    /// Composition with only the required elements measured
    pub fn new(iron: Decimal, calcium: Decimal) -> Self {
        Self {
            iron,
            calcium,
            silicon: None,
            aluminum: None,
            magnesium: None,
        }
    }

    pub fn get(&self, element: Element) -> Option<Decimal> {
        match element {
            Element::Iron => Some(self.iron),
            Element::Calcium => Some(self.calcium),
            Element::Silicon => self.silicon,
            Element::Aluminum => self.aluminum,
            Element::Magnesium => self.magnesium,
        }
    }

    /// Measured elements in a fixed order
    pub fn elements(&self) -> impl Iterator<Item = (Element, Decimal)> + '_ {
        Element::ALL
            .into_iter()
            .filter_map(move |element| self.get(element).map(|value| (element, value)))
    }
}
