pub mod document;
pub mod element;
pub mod placement;
pub mod wall;

pub use document::{Document, FamilySymbol, Session, View, ViewKind};
pub use element::{Centerline, ElementKind, LinearElement, MepCurve};
pub use placement::{OpeningPlacement, RayHit};
pub use wall::{Level, Wall, WallGeometry, WallRef};
