use crate::utils::math::Rect;
use std::fmt::Debug;

/// Partition a live object belongs to. The order is the tick order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObjectKind {
    Player,
    Mob,
    Wall,
    Object,
}

/// Capabilities every live object of a chunk exposes to the update loop.
pub trait GameObject: Debug {
    fn kind(&self) -> ObjectKind;

    /// Pixel bounds inside the owning chunk.
    fn bounds(&self) -> Rect;

    fn is_mobile(&self) -> bool;

    fn is_collidable(&self) -> bool;

    fn update(&mut self);

    fn collides_with(&self, other: &dyn GameObject) -> bool {
        self.bounds().intersects(&other.bounds())
    }

    fn on_collision(&mut self, other: &dyn GameObject);
}
