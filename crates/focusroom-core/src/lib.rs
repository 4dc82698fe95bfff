//! # Focusroom Core Library
//!
//! This library provides the core business logic for the Focusroom study
//! timer. Everything the app can do is available through [`FocusApp`]; the
//! `focusroom-cli` binary is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A synchronous state machine advanced one second per
//!   `tick()`. Supports the fixed pomodoro cycle and flexible focus lengths
//! - **Subjects**: The registry of things being studied, with cached focus totals
//! - **Sessions**: The append-only log of completed focus intervals
//! - **Stats**: Read-only aggregation over subjects and sessions
//! - **Storage**: SQLite key-value persistence and TOML configuration
//!
//! ## Key Components
//!
//! - [`FocusApp`]: Composition root that owns all state and drives the timer
//! - [`TimerEngine`]: Core timer state machine
//! - [`Database`]: Key-value persistence
//! - [`Config`]: Application configuration management

pub mod app;
pub mod error;
pub mod events;
pub mod session;
pub mod stats;
pub mod storage;
pub mod subject;
pub mod timer;

pub use app::{AppOptions, FocusApp};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use session::{Session, SessionLog};
pub use stats::{OverallStats, RankedSubject, StatsAggregator, SubjectStats};
pub use storage::{Config, Database, KvStore, MemoryStore};
pub use subject::{Color, Subject, SubjectId, SubjectRegistry};
pub use timer::{DurationRef, Phase, SchedulingMode, TimerEngine, TimerSnapshot, TimerState};
