pub mod mob;
pub mod object;
pub mod update;
pub mod wall;

pub use mob::Mob;
pub use object::{GameObject, ObjectKind};
pub use update::{tick, TickReport};
pub use wall::Wall;

use log::debug;

/// Live objects of a chunk, kept sorted by kind so each kind is one slice.
#[derive(Debug)]
pub struct Entities {
    objects: Vec<Box<dyn GameObject>>,
    budget: usize,
}

impl Entities {
    pub fn new(budget: usize) -> Self {
        Self {
            objects: Vec::new(),
            budget,
        }
    }

    /// Adds an object behind the others of its kind. Returns false once the
    /// budget is used up.
    pub fn spawn(&mut self, object: Box<dyn GameObject>) -> bool {
        if self.objects.len() >= self.budget {
            debug!("Object budget of {} reached, dropping {:?}", self.budget, object.kind());
            return false;
        }
        let kind = object.kind();
        let at = self.objects.partition_point(|o| o.kind() <= kind);
        self.objects.insert(at, object);
        true
    }

    pub fn of_kind(&self, kind: ObjectKind) -> &[Box<dyn GameObject>] {
        let start = self.objects.partition_point(|o| o.kind() < kind);
        let end = self.objects.partition_point(|o| o.kind() <= kind);
        &self.objects[start..end]
    }

    pub fn players(&self) -> &[Box<dyn GameObject>] {
        self.of_kind(ObjectKind::Player)
    }

    pub fn mobs(&self) -> &[Box<dyn GameObject>] {
        self.of_kind(ObjectKind::Mob)
    }

    pub fn walls(&self) -> &[Box<dyn GameObject>] {
        self.of_kind(ObjectKind::Wall)
    }

    pub fn objects(&self) -> &[Box<dyn GameObject>] {
        self.of_kind(ObjectKind::Object)
    }

    /// Every object in tick order: players, mobs, walls, then the rest.
    pub fn iter(&self) -> std::slice::Iter<'_, Box<dyn GameObject>> {
        self.objects.iter()
    }

    /// Removes every object of `kind`, returning how many went.
    pub fn clear_kind(&mut self, kind: ObjectKind) -> usize {
        let before = self.objects.len();
        self.objects.retain(|o| o.kind() != kind);
        before - self.objects.len()
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    pub fn remaining(&self) -> usize {
        self.budget.saturating_sub(self.objects.len())
    }

    pub fn tick(&mut self) -> TickReport {
        tick(&mut self.objects)
    }
}
