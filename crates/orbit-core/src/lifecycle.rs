use std::cell::Cell;
use std::rc::Rc;

/// Shared "still mounted" flag.
///
/// The frame loop stops rescheduling once torn down, and async completions
/// (project fetches, icon loads) check it before touching DOM or scene state.
#[derive(Clone, Debug)]
pub struct Lifecycle {
    alive: Rc<Cell<bool>>,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            alive: Rc::new(Cell::new(true)),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }

    pub fn teardown(&self) {
        self.alive.set(false);
    }

    /// Page is being hidden. A page kept in the back/forward cache
    /// (`persisted`) can be shown again and keeps its scene; any other unload
    /// tears down. Returns whether this call tore down.
    pub fn page_hidden(&self, persisted: bool) -> bool {
        if persisted || !self.is_alive() {
            return false;
        }
        self.teardown();
        true
    }
}
