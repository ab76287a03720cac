//! # Shared Bus - Event Bus for Inter-Subsystem Communication
//!
//! Implements the choreography between the docflow subsystems.
//!
//! ## Architecture Rules
//!
//! - Follow-up work across subsystems is triggered by events only
//! - A subsystem never calls another subsystem's service for a reaction
//!   (e.g. lifecycle does not call project status after finalizing)
//!
//! ## Choreography Pattern
//!
//! ```text
//! ┌──────────────┐                    ┌────────────────┐
//! │  Lifecycle   │                    │ Project Status │
//! │              │    publish()       │                │
//! │              │ ──────┐            │                │
//! └──────────────┘       │            └────────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{DocumentEvent, EventFilter, EventTopic};
pub use publisher::{EventPublisher, InMemoryEventBus, NoOpPublisher, RecordingPublisher};
pub use subscriber::{EventSubscriber, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
