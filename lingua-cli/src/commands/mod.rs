pub mod diff;
pub mod status;
pub mod sync;
