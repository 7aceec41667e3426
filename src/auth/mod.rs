// Bearer credential persistence

mod token;

pub use token::{ConfigTokenStore, MemoryTokenStore, TokenStore};
