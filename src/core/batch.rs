/// A pending batch upload.
///
/// Generic over the file handle so the page can store `web_sys::File` while
/// tests use plain strings. Each entry gets an id that stays stable while
/// other entries are removed.
#[derive(Debug, Clone)]
pub struct BatchQueue<F> {
    entries: Vec<BatchEntry<F>>,
    next_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct BatchEntry<F> {
    id: u64,
    file: F,
}

impl<F> Default for BatchQueue<F> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<F> BatchQueue<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the pending list with a fresh selection and returns the new ids.
    pub fn replace(&mut self, files: impl IntoIterator<Item = F>) -> Vec<u64> {
        self.entries.clear();
        files.into_iter().map(|file| self.push(file)).collect()
    }

    fn push(&mut self, file: F) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(BatchEntry { id, file });
        id
    }

    pub fn remove(&mut self, id: u64) -> Option<F> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(pos).file)
    }

    /// An empty queue hides the preview grid and the "process batch" button.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn files(&self) -> impl Iterator<Item = &F> {
        self.entries.iter().map(|e| &e.file)
    }
}
