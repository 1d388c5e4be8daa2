pub mod category;
pub mod client;
pub mod config;
pub mod error;
pub mod quote;
pub mod render;
pub mod scheduler;
pub mod state;

// Re-export main types for convenience
pub use category::Category;
pub use client::{QuoteClient, QuoteSource};
pub use config::Config;
pub use error::{FetchError, FetchErrorKind};
pub use quote::Quote;
pub use render::{render, Background, WidgetView};
pub use scheduler::{FetchOutcome, Phase, QuoteEntry, RefreshScheduler, Timeline};
pub use state::QuoteState;
