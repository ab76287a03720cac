//! # Adapters Layer (Hexagonal Architecture)

mod store;
mod subscriber;

pub use store::StoreProjectStatus;
pub use subscriber::FinalizationSubscriber;
