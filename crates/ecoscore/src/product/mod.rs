//! Garment product tree: leaf components carrying raw impact data and
//! composite assemblies that aggregate them on demand.

mod builder;
mod impact;
pub mod materials;
mod node;

pub use builder::{build_tree, ComponentRecord, ProductBuilder, ProductRecord};
pub use impact::{ImpactDataError, ImpactRecord, NormalizedImpact};
pub use node::{aggregate, ComponentNode, ComponentRole, CompositeNode, ProductNode};
