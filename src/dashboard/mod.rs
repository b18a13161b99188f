//! Interactive dashboard.
//!
//! The pure parts ([`machine`], [`render`], [`theme`], [`event`]) are usable
//! without a terminal; [`runtime`] wires them to crossterm and worker threads.

pub mod assembler;
pub mod event;
pub mod input;
pub mod machine;
pub mod render;
pub mod runtime;
pub mod theme;

pub use assembler::SnapshotAssembler;
pub use event::{Command, Event, KeyAction, Operation, RefreshMode, RefreshTicket};
pub use machine::{transition, DashboardState, Focus};
pub use render::{compose, Screen};
pub use theme::Theme;
