pub mod condition;
pub mod document;
pub mod kind;
pub mod node;
pub mod palette;

pub use condition::*;
pub use document::*;
pub use kind::*;
pub use node::*;
pub use palette::create_component;
