pub mod distribution;
pub mod errors;
pub mod study;
pub mod trial;
pub mod value;

pub use distribution::*;
pub use errors::*;
pub use study::*;
pub use trial::*;
pub use value::*;
