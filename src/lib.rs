pub use parselab_core::*;

pub mod traits {
    pub use parselab_core::lr::traits::LrTable;
    pub use parselab_core::report::TraceSink;
}
