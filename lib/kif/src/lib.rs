#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]

pub mod error;
pub mod options;
pub mod store;
pub mod transport;

pub mod model {
    pub use kif_model::*;
}

pub mod filter {
    pub use kif_filter::*;
}

pub mod sparql {
    pub use kif_sparql::*;
}

pub mod compiler {
    pub use kif_compiler::*;
}

pub mod results {
    pub use kif_results::*;
}
