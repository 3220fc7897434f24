//! Coordinate-space math for items, handles and crop overlays.
//!
//! Everything here works in an item's local frame unless a name says
//! otherwise; callers convert scene positions through the item transform.

pub mod crop;
pub mod hit_testing;
pub mod resize;
pub mod transform;

pub use crop::{resize_overlay, HandleDirection};
pub use hit_testing::HIT_TOLERANCE;
pub use resize::{resize_rect, uniform_axis, uniform_scale_ratio, ResizeDrag};
pub use transform::{local_delta, map_corners, map_point, map_rect_bounds, ItemTransform};

/// Side length of resize and crop handles.
pub const DEFAULT_HANDLE_SIZE: f32 = 10.0;

/// Smallest width or height a drawn or resized item may have.
pub const DEFAULT_MIN_SHAPE_SIZE: f32 = 5.0;
