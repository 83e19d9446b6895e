// Adapters layer: concrete implementations for external systems (storage, http, mail).

pub mod http;
#[cfg(feature = "lambda")]
pub mod mail;
pub mod storage;
