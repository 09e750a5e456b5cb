//! # Rows, adapters and time
//!
//! `scrollselect-core` holds the pieces the drag-to-select controller is built
//! on, none of which know about gestures:
//!
//! - `RowAddress`, `Direction`, `SelectionMode` — the row model.
//! - `ListAdapter` — the abstract list the controller drives.
//! - `rows` — walking a sectioned list row by row, skipping empty sections.
//! - `Clock` — where "now" comes from, so animations can be driven by tests.
//!
//! ```rust
//! use scrollselect_core::*;
//!
//! let list = MemoryList::new(vec![3, 0, 3], 44.0);
//! let first = rows::first_row_address(&list).unwrap();
//! let last = rows::last_row_address(&list).unwrap();
//!
//! assert_eq!(last, RowAddress::new(2, 2));
//! assert_eq!(rows::row_count_between(&list, first, last), Some(5));
//! assert_eq!(
//!     rows::offset_row(&list, first, 3, Direction::Forward),
//!     Some(RowAddress::new(2, 0)),
//! );
//! ```
//!
//! ## Time
//!
//! Nothing here sleeps. Animations read time through an injected
//! `Rc<dyn Clock>`: hosts use `SystemClock`, tests use `ManualClock` and call
//! `advance` between ticks.

pub mod adapter;
pub mod animation;
pub mod geometry;
pub mod input;
pub mod memory;
pub mod row;
pub mod rows;

pub use adapter::*;
pub use animation::*;
pub use geometry::*;
pub use input::*;
pub use memory::*;
pub use row::*;
