pub use memory::*;

#[cfg(not(target_arch = "wasm32"))]
pub use file::*;
#[cfg(target_arch = "wasm32")]
pub use web::*;

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod web;
