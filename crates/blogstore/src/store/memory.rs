use super::blog_store::BlogStore;
use super::mem_backend::MemBackend;

/// Blog store that keeps everything in process memory.
pub type VolatileBlogStore = BlogStore<MemBackend>;

impl BlogStore<MemBackend> {
    pub fn new() -> Self {
        Self::with_backend(MemBackend::new())
    }
}

impl Default for BlogStore<MemBackend> {
    fn default() -> Self {
        Self::new()
    }
}
