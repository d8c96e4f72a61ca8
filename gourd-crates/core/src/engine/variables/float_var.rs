use crate::containers::StorageKey;

/// A handle to a float variable.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FloatVar {
    pub(crate) id: u32,
}

impl StorageKey for FloatVar {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        FloatVar { id: index as u32 }
    }
}

impl std::fmt::Debug for FloatVar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "f{}", self.id)
    }
}
