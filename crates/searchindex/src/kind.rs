use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A kind code that does not name any known item category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown item kind code {0}")]
pub struct UnknownKind(pub u8);

/// Category of a documented symbol, stored in the index as a small integer.
///
/// The numbering follows rustdoc's `itemTypes` table, so the codes are part
/// of the artifact format and must never be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum ItemKind {
    Module = 0,
    ExternCrate = 1,
    Import = 2,
    Struct = 3,
    Enum = 4,
    Function = 5,
    Typedef = 6,
    Static = 7,
    Trait = 8,
    Impl = 9,
    TyMethod = 10,
    Method = 11,
    StructField = 12,
    Variant = 13,
    Macro = 14,
    Primitive = 15,
    AssociatedType = 16,
    Constant = 17,
    AssociatedConstant = 18,
    Union = 19,
}

impl ItemKind {
    pub const ALL: [ItemKind; 20] = [
        ItemKind::Module,
        ItemKind::ExternCrate,
        ItemKind::Import,
        ItemKind::Struct,
        ItemKind::Enum,
        ItemKind::Function,
        ItemKind::Typedef,
        ItemKind::Static,
        ItemKind::Trait,
        ItemKind::Impl,
        ItemKind::TyMethod,
        ItemKind::Method,
        ItemKind::StructField,
        ItemKind::Variant,
        ItemKind::Macro,
        ItemKind::Primitive,
        ItemKind::AssociatedType,
        ItemKind::Constant,
        ItemKind::AssociatedConstant,
        ItemKind::Union,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    /// The name rustdoc uses for this kind in URLs and search filters.
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Module => "mod",
            ItemKind::ExternCrate => "externcrate",
            ItemKind::Import => "import",
            ItemKind::Struct => "struct",
            ItemKind::Enum => "enum",
            ItemKind::Function => "fn",
            ItemKind::Typedef => "type",
            ItemKind::Static => "static",
            ItemKind::Trait => "trait",
            ItemKind::Impl => "impl",
            ItemKind::TyMethod => "tymethod",
            ItemKind::Method => "method",
            ItemKind::StructField => "structfield",
            ItemKind::Variant => "variant",
            ItemKind::Macro => "macro",
            ItemKind::Primitive => "primitive",
            ItemKind::AssociatedType => "associatedtype",
            ItemKind::Constant => "constant",
            ItemKind::AssociatedConstant => "associatedconstant",
            ItemKind::Union => "union",
        }
    }

    /// Kinds that can appear in `paths` as the owner of other items.
    pub fn is_type_like(self) -> bool {
        matches!(
            self,
            ItemKind::Struct
                | ItemKind::Enum
                | ItemKind::Union
                | ItemKind::Trait
                | ItemKind::Primitive
                | ItemKind::Typedef
        )
    }

    /// Kinds that only make sense inside an owning type or trait.
    pub fn is_member(self) -> bool {
        matches!(
            self,
            ItemKind::TyMethod
                | ItemKind::Method
                | ItemKind::StructField
                | ItemKind::Variant
                | ItemKind::AssociatedType
                | ItemKind::AssociatedConstant
        )
    }
}

impl TryFrom<u8> for ItemKind {
    type Error = UnknownKind;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        ItemKind::ALL
            .get(code as usize)
            .copied()
            .ok_or(UnknownKind(code))
    }
}

impl From<ItemKind> for u8 {
    fn from(kind: ItemKind) -> u8 {
        kind.code()
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        let kind = match lower.as_str() {
            "module" => ItemKind::Module,
            "function" => ItemKind::Function,
            "field" => ItemKind::StructField,
            "typedef" => ItemKind::Typedef,
            "const" => ItemKind::Constant,
            "assoctype" => ItemKind::AssociatedType,
            "assocconst" => ItemKind::AssociatedConstant,
            name => ItemKind::ALL
                .into_iter()
                .find(|kind| kind.as_str() == name)
                .ok_or_else(|| format!("Invalid item kind: {}", s))?,
        };
        Ok(kind)
    }
}
