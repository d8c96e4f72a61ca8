use crate::containers::StorageKey;

/// A handle to a finite set variable.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SetVar {
    pub(crate) id: u32,
}

impl StorageKey for SetVar {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        SetVar { id: index as u32 }
    }
}

impl std::fmt::Debug for SetVar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s{}", self.id)
    }
}
