use crate::entity::object::GameObject;

/// What a single pass over a chunk's objects did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub updated: usize,
    pub collisions: usize,
}

/// Updates every object, then notifies colliding pairs.
///
/// Each mobile object is tested against every other collidable object and
/// both sides of a hit get `on_collision`. Two overlapping objects that are
/// both mobile and collidable meet from either side, so each is notified
/// twice.
pub fn tick(objects: &mut [Box<dyn GameObject>]) -> TickReport {
    let mut report = TickReport::default();

    for object in objects.iter_mut() {
        object.update();
        report.updated += 1;
    }

    for i in 0..objects.len() {
        if !objects[i].is_mobile() {
            continue;
        }
        for j in 0..objects.len() {
            if i == j || !objects[j].is_collidable() {
                continue;
            }
            if !objects[i].collides_with(&*objects[j]) {
                continue;
            }

            let (mover, other) = pair_mut(objects, i, j);
            mover.on_collision(&**other);
            other.on_collision(&**mover);
            report.collisions += 1;
        }
    }

    report
}

fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = items.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::object::ObjectKind;
    use crate::utils::math::Rect;
    use glam::Vec2;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Debug)]
    struct Dummy {
        rect: Rect,
        mobile: bool,
        collidable: bool,
        hits: Rc<Cell<usize>>,
    }

    fn dummy(x: f32, mobile: bool, collidable: bool) -> (Box<dyn GameObject>, Rc<Cell<usize>>) {
        let hits = Rc::new(Cell::new(0));
        let object: Box<dyn GameObject> = Box::new(Dummy {
            rect: Rect::from_origin_size(Vec2::new(x, 0.0), Vec2::splat(10.0)),
            mobile,
            collidable,
            hits: Rc::clone(&hits),
        });
        (object, hits)
    }

    impl GameObject for Dummy {
        fn kind(&self) -> ObjectKind {
            ObjectKind::Object
        }

        fn bounds(&self) -> Rect {
            self.rect
        }

        fn is_mobile(&self) -> bool {
            self.mobile
        }

        fn is_collidable(&self) -> bool {
            self.collidable
        }

        fn update(&mut self) {}

        fn on_collision(&mut self, _other: &dyn GameObject) {
            self.hits.set(self.hits.get() + 1);
        }
    }

    #[test]
    fn mobile_and_wall_collide_once() {
        let (mob, mob_hits) = dummy(0.0, true, true);
        let (wall, wall_hits) = dummy(5.0, false, true);
        let mut objects = vec![mob, wall];

        let report = tick(&mut objects);
        assert_eq!(report, TickReport { updated: 2, collisions: 1 });
        assert_eq!(mob_hits.get(), 1);
        assert_eq!(wall_hits.get(), 1);
    }

    #[test]
    fn apart_objects_do_not_collide() {
        let (mob, mob_hits) = dummy(0.0, true, true);
        let (wall, wall_hits) = dummy(50.0, false, true);
        let mut objects = vec![mob, wall];

        assert_eq!(tick(&mut objects).collisions, 0);
        assert_eq!(mob_hits.get(), 0);
        assert_eq!(wall_hits.get(), 0);
    }

    #[test]
    fn touching_edges_do_not_collide() {
        let (mob, _) = dummy(0.0, true, true);
        let (wall, _) = dummy(10.0, false, true);
        assert_eq!(tick(&mut vec![mob, wall]).collisions, 0);
    }

    #[test]
    fn two_mobiles_meet_from_both_sides() {
        let (a, a_hits) = dummy(0.0, true, true);
        let (b, b_hits) = dummy(5.0, true, true);
        let mut objects = vec![a, b];

        assert_eq!(tick(&mut objects).collisions, 2);
        assert_eq!(a_hits.get(), 2);
        assert_eq!(b_hits.get(), 2);
    }

    #[test]
    fn mobile_between_wall_and_mobile() {
        let (wall, wall_hits) = dummy(0.0, false, true);
        let (a, a_hits) = dummy(5.0, true, true);
        let (b, b_hits) = dummy(12.0, true, true);
        let mut objects = vec![a, b, wall];

        // a-b from both sides, a-wall once.
        assert_eq!(tick(&mut objects).collisions, 3);
        assert_eq!(a_hits.get(), 3);
        assert_eq!(b_hits.get(), 2);
        assert_eq!(wall_hits.get(), 1);
    }

    #[test]
    fn non_collidable_targets_are_skipped() {
        let (mob, _) = dummy(0.0, true, true);
        let (ghost, ghost_hits) = dummy(5.0, false, false);
        assert_eq!(tick(&mut vec![mob, ghost]).collisions, 0);
        assert_eq!(ghost_hits.get(), 0);
    }

    #[test]
    fn ghost_mobile_still_hits_solid_mobile() {
        // Non-collidable movers test against others but are never targets.
        let (ghost, ghost_hits) = dummy(0.0, true, false);
        let (mob, mob_hits) = dummy(5.0, true, true);
        let mut objects = vec![ghost, mob];

        assert_eq!(tick(&mut objects).collisions, 1);
        assert_eq!(ghost_hits.get(), 1);
        assert_eq!(mob_hits.get(), 1);
    }

    #[test]
    fn stationary_objects_never_test() {
        let (a, _) = dummy(0.0, false, true);
        let (b, _) = dummy(5.0, false, true);
        assert_eq!(tick(&mut vec![a, b]), TickReport { updated: 2, collisions: 0 });
    }

    #[test]
    fn pair_mut_returns_requested_order() {
        let mut items = [1, 2, 3];
        let (a, b) = pair_mut(&mut items, 2, 0);
        assert_eq!((*a, *b), (3, 1));
    }
}
