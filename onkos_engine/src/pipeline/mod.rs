/// Pipeline module - explicit binding state and the per-draw bind sequence

pub mod pipeline_state;
pub mod pipeline_binder;

pub use pipeline_state::*;
pub use pipeline_binder::*;
