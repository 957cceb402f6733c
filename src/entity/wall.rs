use crate::entity::object::{GameObject, ObjectKind};
use crate::utils::math::Rect;
use crate::world::block::{Block, Rgb};

/// Stationary obstacle covering one collidable block.
#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    rect: Rect,
    color: Rgb,
}

impl Wall {
    pub fn new(rect: Rect, color: Rgb) -> Self {
        Self { rect, color }
    }

    pub fn from_block(block: &Block) -> Self {
        Self::new(block.pixel_rect(), block.color)
    }

    pub fn color(&self) -> Rgb {
        self.color
    }
}

impl GameObject for Wall {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Wall
    }

    fn bounds(&self) -> Rect {
        self.rect
    }

    fn is_mobile(&self) -> bool {
        false
    }

    fn is_collidable(&self) -> bool {
        true
    }

    fn update(&mut self) {}

    fn on_collision(&mut self, _other: &dyn GameObject) {}
}
