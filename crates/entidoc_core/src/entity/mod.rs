//! Entity model.

mod descriptor;
mod id;
mod traits;
mod value;

pub use descriptor::{Attribute, EntityType};
pub use id::{Identity, RawId};
pub use traits::Entity;
pub use value::{AttributeValue, Lazy, LazyCollection};
