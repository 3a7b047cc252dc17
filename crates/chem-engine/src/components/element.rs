//! Element catalog, synthesized molecules and the static bond table.
//!
//! No engine or rendering dependencies.

use crate::components::color::Rgb;
use crate::core::rng::Rng;

/// The six elements that float around the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Carbon,
    Hydrogen,
    Oxygen,
    Nitrogen,
    Nickel,
    Copper,
}

impl ElementKind {
    pub const ALL: [ElementKind; 6] = [
        Self::Carbon,
        Self::Hydrogen,
        Self::Oxygen,
        Self::Nitrogen,
        Self::Nickel,
        Self::Copper,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Carbon => "C",
            Self::Hydrogen => "H",
            Self::Oxygen => "O",
            Self::Nitrogen => "N",
            Self::Nickel => "Ni",
            Self::Copper => "Cu",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Carbon => "Carbon",
            Self::Hydrogen => "Hydrogen",
            Self::Oxygen => "Oxygen",
            Self::Nitrogen => "Nitrogen",
            Self::Nickel => "Nickel",
            Self::Copper => "Copper",
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            Self::Carbon => Rgb::hex(0x00ff88),
            Self::Hydrogen => Rgb::hex(0xffffff),
            Self::Oxygen => Rgb::hex(0xff4444),
            Self::Nitrogen => Rgb::hex(0x4488ff),
            Self::Nickel => Rgb::hex(0x00d4ff),
            Self::Copper => Rgb::hex(0xff8844),
        }
    }

    /// Number of bonds the element usually forms.
    pub fn valence(self) -> u8 {
        match self {
            Self::Carbon => 4,
            Self::Hydrogen => 1,
            Self::Oxygen => 2,
            Self::Nitrogen => 3,
            Self::Nickel => 2,
            Self::Copper => 2,
        }
    }

    /// Look up an element by its symbol (`"Ni"`, `"O"`, ...).
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.symbol() == symbol)
    }

    /// Uniformly random element.
    pub fn random(rng: &mut Rng) -> Self {
        Self::ALL[rng.next_int(Self::ALL.len() as u32) as usize]
    }
}

/// Pairs that highlight each other and draw connecting bonds.
/// Order within a pair does not matter.
const BONDABLE: [(ElementKind, ElementKind); 9] = [
    (ElementKind::Carbon, ElementKind::Oxygen),
    (ElementKind::Carbon, ElementKind::Hydrogen),
    (ElementKind::Nitrogen, ElementKind::Hydrogen),
    (ElementKind::Oxygen, ElementKind::Hydrogen),
    (ElementKind::Carbon, ElementKind::Nitrogen),
    (ElementKind::Nickel, ElementKind::Oxygen),
    (ElementKind::Copper, ElementKind::Oxygen),
    (ElementKind::Carbon, ElementKind::Carbon),
    (ElementKind::Nitrogen, ElementKind::Oxygen),
];

/// Whether two elements may bond. Symmetric.
pub fn bondable(a: ElementKind, b: ElementKind) -> bool {
    BONDABLE
        .iter()
        .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
}

/// How a bond is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondOrder {
    Single,
    Double,
}

impl BondOrder {
    /// C=O is the only double bond the background draws.
    pub fn between(a: ElementKind, b: ElementKind) -> Self {
        match (a, b) {
            (ElementKind::Carbon, ElementKind::Oxygen)
            | (ElementKind::Oxygen, ElementKind::Carbon) => Self::Double,
            _ => Self::Single,
        }
    }
}

/// A reaction product. Renders with its own label and color and never bonds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Molecule {
    pub label: &'static str,
    pub color: Rgb,
}

impl Molecule {
    pub const CARBON_DIOXIDE: Molecule = Molecule {
        label: "CO₂",
        color: Rgb::MINT,
    };
    pub const WATER: Molecule = Molecule {
        label: "H₂O",
        color: Rgb::AZURE,
    };
}

/// What a particle is: a plain element or a synthesized molecule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Species {
    Element(ElementKind),
    Synthesized(Molecule),
}

impl Species {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Element(kind) => kind.symbol(),
            Self::Synthesized(molecule) => molecule.label,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Element(kind) => kind.name(),
            Self::Synthesized(molecule) => molecule.label,
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            Self::Element(kind) => kind.color(),
            Self::Synthesized(molecule) => molecule.color,
        }
    }

    pub fn valence(&self) -> u8 {
        match self {
            Self::Element(kind) => kind.valence(),
            Self::Synthesized(_) => 0,
        }
    }

    pub fn element(&self) -> Option<ElementKind> {
        match self {
            Self::Element(kind) => Some(*kind),
            Self::Synthesized(_) => None,
        }
    }

    pub fn can_bond_with(&self, other: &Species) -> bool {
        match (self, other) {
            (Self::Element(a), Self::Element(b)) => bondable(*a, *b),
            _ => false,
        }
    }
}

impl From<ElementKind> for Species {
    fn from(kind: ElementKind) -> Self {
        Self::Element(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bond_table_is_symmetric() {
        for a in ElementKind::ALL {
            for b in ElementKind::ALL {
                assert_eq!(bondable(a, b), bondable(b, a), "{:?}-{:?}", a, b);
            }
        }
    }

    #[test]
    fn listed_pairs_bond() {
        use ElementKind::*;
        assert!(bondable(Carbon, Oxygen));
        assert!(bondable(Hydrogen, Nitrogen));
        assert!(bondable(Oxygen, Copper));
        assert!(bondable(Carbon, Carbon));
    }

    #[test]
    fn unlisted_pairs_do_not_bond() {
        use ElementKind::*;
        assert!(!bondable(Oxygen, Oxygen));
        assert!(!bondable(Hydrogen, Hydrogen));
        assert!(!bondable(Nickel, Copper));
        assert!(!bondable(Nitrogen, Nitrogen));
    }

    #[test]
    fn molecules_never_bond() {
        let water = Species::Synthesized(Molecule::WATER);
        let oxygen = Species::Element(ElementKind::Oxygen);
        assert!(!water.can_bond_with(&oxygen));
        assert!(!oxygen.can_bond_with(&water));
        assert_eq!(water.valence(), 0);
    }

    #[test]
    fn carbon_oxygen_is_double() {
        use ElementKind::*;
        assert_eq!(BondOrder::between(Oxygen, Carbon), BondOrder::Double);
        assert_eq!(BondOrder::between(Carbon, Hydrogen), BondOrder::Single);
    }

    #[test]
    fn symbol_lookup() {
        assert_eq!(ElementKind::from_symbol("Ni"), Some(ElementKind::Nickel));
        assert_eq!(ElementKind::from_symbol("Xe"), None);
    }
}
