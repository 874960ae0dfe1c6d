//! Local master-password gate. The crate is deliberately small and
//! transparent so the full path from prompt to stored digest stays auditable
//! in-repo: plaintext exists only inside the verification call, and only the
//! SHA-256 digest ever reaches disk.

pub mod config;
pub mod gate;
pub mod logging;
pub mod store;
