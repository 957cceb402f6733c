use crate::entity::object::{GameObject, ObjectKind};
use crate::render::RenderHandle;
use crate::utils::math::Rect;
use glam::Vec2;
use rand::Rng;

const MAX_SPEED: f32 = 2.0;

/// A wandering creature confined to its chunk.
#[derive(Debug, Clone)]
pub struct Mob {
    rect: Rect,
    velocity: Vec2,
    area: Rect,
    render: RenderHandle,
    collisions: usize,
    // Set by the first hit of a tick, cleared by `update`.
    turned: bool,
}

impl Mob {
    pub fn new(origin: Vec2, size: f32, velocity: Vec2, area: Rect, render: RenderHandle) -> Self {
        Self {
            rect: Rect::from_origin_size(origin, Vec2::splat(size)),
            velocity,
            area,
            render,
            collisions: 0,
            turned: false,
        }
    }

    /// Places a mob anywhere in `area`, edges included, heading a random way.
    pub fn spawn_random<R: Rng>(rng: &mut R, area: Rect, size: u32, render: RenderHandle) -> Self {
        let origin = Vec2::new(
            rng.gen_range(area.min.x..=area.max.x),
            rng.gen_range(area.min.y..=area.max.y),
        );
        let velocity = Vec2::new(
            rng.gen_range(-MAX_SPEED..=MAX_SPEED),
            rng.gen_range(-MAX_SPEED..=MAX_SPEED),
        );
        Self::new(origin, size as f32, velocity, area, render)
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn render_handle(&self) -> RenderHandle {
        self.render
    }

    pub fn collisions(&self) -> usize {
        self.collisions
    }
}

impl GameObject for Mob {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Mob
    }

    fn bounds(&self) -> Rect {
        self.rect
    }

    fn is_mobile(&self) -> bool {
        true
    }

    fn is_collidable(&self) -> bool {
        true
    }

    fn update(&mut self) {
        self.turned = false;
        self.rect = self.rect.translate(self.velocity);

        // Only turn around when heading further out, so a mob spawned on the
        // edge walks back in instead of jittering.
        if (self.rect.min.x < self.area.min.x && self.velocity.x < 0.0)
            || (self.rect.max.x > self.area.max.x && self.velocity.x > 0.0)
        {
            self.velocity.x = -self.velocity.x;
        }
        if (self.rect.min.y < self.area.min.y && self.velocity.y < 0.0)
            || (self.rect.max.y > self.area.max.y && self.velocity.y > 0.0)
        {
            self.velocity.y = -self.velocity.y;
        }
    }

    /// Turns around on the first hit of a tick. Later hits in the same tick
    /// are only counted, so meeting another mob from both sides does not
    /// cancel the turn.
    fn on_collision(&mut self, _other: &dyn GameObject) {
        if !self.turned {
            self.velocity = -self.velocity;
            self.turned = true;
        }
        self.collisions += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    fn area() -> Rect {
        Rect::new(Vec2::ZERO, Vec2::new(100.0, 100.0))
    }

    #[test]
    fn moves_by_velocity() {
        let mut mob = Mob::new(Vec2::new(10.0, 10.0), 5.0, Vec2::new(1.0, -1.0), area(), RenderHandle(0));
        mob.update();
        assert_eq!(mob.bounds().min, Vec2::new(11.0, 9.0));
    }

    #[test]
    fn bounces_off_area_edge() {
        let mut mob = Mob::new(Vec2::new(94.0, 10.0), 5.0, Vec2::new(2.0, 0.0), area(), RenderHandle(0));
        mob.update();
        assert_eq!(mob.velocity(), Vec2::new(-2.0, 0.0));
        mob.update();
        assert_eq!(mob.bounds().min.x, 94.0);
    }

    #[test]
    fn reverses_on_collision() {
        let mut mob = Mob::new(Vec2::ZERO, 5.0, Vec2::new(1.0, 2.0), area(), RenderHandle(0));
        let other = mob.clone();
        mob.on_collision(&other);
        assert_eq!(mob.velocity(), Vec2::new(-1.0, -2.0));
        assert_eq!(mob.collisions(), 1);
    }

    #[test]
    fn turns_once_per_tick() {
        let mut mob = Mob::new(Vec2::ZERO, 5.0, Vec2::new(1.0, 0.0), area(), RenderHandle(0));
        let other = mob.clone();
        mob.on_collision(&other);
        mob.on_collision(&other);
        assert_eq!(mob.velocity(), Vec2::new(-1.0, 0.0));
        assert_eq!(mob.collisions(), 2);

        mob.update();
        mob.on_collision(&other);
        assert_eq!(mob.velocity(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn overlapping_mobs_both_turn_around() {
        let left: Box<dyn GameObject> =
            Box::new(Mob::new(Vec2::new(10.0, 10.0), 5.0, Vec2::new(1.0, 0.0), area(), RenderHandle(0)));
        let right: Box<dyn GameObject> =
            Box::new(Mob::new(Vec2::new(13.0, 10.0), 5.0, Vec2::new(-1.0, 0.0), area(), RenderHandle(0)));
        let mut objects = vec![left, right];
        let report = crate::entity::tick(&mut objects);
        assert_eq!(report.collisions, 2);

        // Both reversed once; next step moves them apart.
        let before = objects[1].bounds().min.x - objects[0].bounds().min.x;
        crate::entity::tick(&mut objects);
        let after = objects[1].bounds().min.x - objects[0].bounds().min.x;
        assert!(after > before);
    }

    #[test]
    fn random_spawn_stays_in_area() {
        let mut rng = ChaCha12Rng::seed_from_u64(7);
        for _ in 0..50 {
            let mob = Mob::spawn_random(&mut rng, area(), 10, RenderHandle(3));
            assert!(area().contains(mob.bounds().min));
            assert_eq!(mob.bounds().size(), Vec2::splat(10.0));
            assert_eq!(mob.render_handle(), RenderHandle(3));
        }
    }
}
