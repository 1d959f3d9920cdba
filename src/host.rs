//! Platform-independent bookkeeping for the game host
//!
//! The browser loop registers its callbacks one at a time and any of those
//! calls can fail. [`Registrations`] records exactly what was registered so
//! teardown can remove all of it, and [`HostState`] decides whether the loop
//! may touch the session.

/// Whether the host loop is allowed to drive the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostState {
    #[default]
    Running,
    /// Page hidden (e.g. kept in the back/forward cache); may resume
    Suspended,
    /// Stopped for good after an error or teardown
    Halted,
}

impl HostState {
    pub fn is_running(self) -> bool {
        self == HostState::Running
    }

    /// Running -> Suspended. Returns true if the state changed.
    pub fn suspend(&mut self) -> bool {
        if *self == HostState::Running {
            *self = HostState::Suspended;
            true
        } else {
            false
        }
    }

    /// Suspended -> Running. A halted host never resumes.
    pub fn resume(&mut self) -> bool {
        if *self == HostState::Suspended {
            *self = HostState::Running;
            true
        } else {
            false
        }
    }

    pub fn halt(&mut self) {
        *self = HostState::Halted;
    }
}

/// Event callbacks that were successfully handed to the platform
#[derive(Debug)]
pub struct Registrations<T> {
    entries: Vec<(&'static str, T)>,
}

impl<T> Default for Registrations<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Registrations<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register `handle` for `event` through `add`. The handle is kept only
    /// if `add` succeeds; on failure it is dropped unregistered.
    pub fn register<E>(
        &mut self,
        event: &'static str,
        handle: T,
        add: impl FnOnce(&'static str, &T) -> Result<(), E>,
    ) -> Result<(), E> {
        add(event, &handle)?;
        self.entries.push((event, handle));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Take every registration, most recent first, for removal
    pub fn drain(&mut self) -> impl Iterator<Item = (&'static str, T)> + '_ {
        self.entries.drain(..).rev()
    }
}
