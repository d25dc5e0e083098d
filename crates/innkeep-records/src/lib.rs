//! Record registry for Innkeep.
//!
//! Everything that edits the hotel document outside the room lifecycle
//! lives here: staff, room records, linens and their laundry batches,
//! assets, and user accounts.
//!
//! 1. **Validation**: required fields are trimmed and checked, numbers
//!    range-checked, room numbers and usernames kept unique.
//! 2. **Cascades**: deleting a room or a staff member cleans up every
//!    record that points at it, in one place.
//! 3. **Permissions**: destructive actions take the acting [`User`] and
//!    are refused unless they are an admin.
//!
//! Like the lifecycle engine, every operation borrows the current
//! [`HotelData`] and returns a new one, so a refused operation changes
//! nothing.
//!
//! # How it fits in the stack
//!
//! ```text
//! Hotel service (above)  ← runs RecordOps inside the actor, persists results
//!     ↕
//! Records (this crate)   ← CRUD, cascades, admin checks
//!     ↕
//! Model (below)          ← HotelData and the record types
//! ```
//!
//! [`User`]: innkeep_model::User
//! [`HotelData`]: innkeep_model::HotelData

mod assets;
mod error;
mod guard;
mod linens;
mod ops;
mod rooms;
mod staff;
mod users;

pub use assets::{AssetDraft, add_asset, delete_asset, update_asset};
pub use error::RecordError;
pub use linens::{
    ImportReport, LinenCounts, LinenDraft, add_linen, delete_linen, import_linens,
    return_linens_from_wash, send_linens_to_wash, update_linen,
};
pub use ops::{RecordOp, RecordOutcome, apply, clear_business_data};
pub use rooms::{RoomDraft, add_room, delete_room, update_room};
pub use staff::{StaffDraft, add_staff, delete_staff, update_staff};
pub use users::{add_user, change_user_role, delete_user, login, rename_user};
