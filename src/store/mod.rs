mod client;
mod memory;
mod server;

pub use client::{LayoutClient, PersistenceError};
pub use memory::{CURRENT_LAYOUT_KEY, LayoutStore, MemoryStore};
pub use server::{SaveAck, layout_router};
