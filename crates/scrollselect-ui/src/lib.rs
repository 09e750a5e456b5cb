//! # Drag-to-select
//!
//! `ScrollSelect` lets a user select or deselect runs of rows by dragging a
//! finger down a narrow strip along the trailing edge of a list. When the
//! finger reaches the top or bottom of the container the list auto-scrolls,
//! and every row it passes joins the run.
//!
//! The controller never owns the list. Each call borrows a
//! [`ListAdapter`](scrollselect_core::ListAdapter), so any widget can be
//! driven through a small shim.
//!
//! ```rust
//! use scrollselect_core::*;
//! use scrollselect_ui::*;
//!
//! let mut list = MemoryList::new(vec![3, 3], 44.0);
//! let mut ctl = ScrollSelect::new(ScrollSelectConfig::default()).unwrap();
//! ctl.set_container_rect(list.frame());
//! ctl.set_enabled(true);
//!
//! let from = list.point_for_row(RowAddress::new(0, 0));
//! let to = list.point_for_row(RowAddress::new(1, 2));
//! ctl.pan_began(&mut list, from);
//! ctl.pan_moved(&mut list, to);
//! ctl.pan_ended(&list);
//!
//! assert_eq!(list.selected_count(), 6);
//! ```
//!
//! ## Timers
//!
//! Auto-scroll needs a repeating timer, which the host owns. After feeding
//! input, check `timer_request()`; when it returns a token you are not
//! already ticking, schedule `on_timer(list, token)` at the requested
//! interval and keep it while `on_timer` returns `true`. Stale tokens are
//! ignored, so a late tick after a cancel is harmless.

pub mod auto_scroll;
pub mod config;
pub mod controller;
pub mod delegate;
pub mod edge;
pub mod gestures;
pub mod interpreter;
pub mod selection;

pub use auto_scroll::{AutoScrollEngine, ScrollAnimation, TickOutcome, TimerRequest, TimerToken};
pub use config::{ConfigError, ScrollSelectConfig, ScrollingSpeed};
pub use controller::ScrollSelect;
pub use delegate::ScrollSelectDelegate;
pub use gestures::{Gesture, GestureDetector};
pub use interpreter::{DragState, GestureInterpreter};
pub use selection::Selector;
