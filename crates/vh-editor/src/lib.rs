pub mod drag;
pub mod geometry;
pub mod input;
pub mod planner;
pub mod session;
pub mod view;

pub use drag::{DragController, DragState};
pub use geometry::{DropIntent, RowBounds, resolve_drop_intent};
pub use input::DragEvent;
pub use planner::{MovePlan, Rejection, apply_move, move_node, plan_move};
pub use session::TreeSession;
pub use view::{ViewState, Viewport};
