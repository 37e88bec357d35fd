//! Output regions a rendering is written into.

use std::sync::RwLock;

/// Identifier of the region that echoes the requested URL.
pub const ECHO_REGION_ID: &str = "requestUrl";

/// Identifier of the region that shows the highlighted response.
pub const RESULT_REGION_ID: &str = "jsonDump";

/// A display target whose content is replaced on every write.
pub trait OutputRegion: Send + Sync {
    /// Identifier of the region.
    fn id(&self) -> &str;

    /// Replace the region's content.
    fn write(&self, content: &str);
}

/// In-memory region, shareable between concurrent dispatches.
#[derive(Debug)]
pub struct MemoryRegion {
    id: String,
    content: RwLock<String>,
}

impl MemoryRegion {
    /// Create an empty region.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: RwLock::new(String::new()),
        }
    }

    /// Empty echo region.
    #[must_use]
    pub fn echo() -> Self {
        Self::new(ECHO_REGION_ID)
    }

    /// Empty result region.
    #[must_use]
    pub fn result() -> Self {
        Self::new(RESULT_REGION_ID)
    }

    /// Current content.
    #[must_use]
    pub fn contents(&self) -> String {
        self.content
            .read()
            .map(|content| content.clone())
            .unwrap_or_default()
    }
}

impl OutputRegion for MemoryRegion {
    fn id(&self) -> &str {
        &self.id
    }

    fn write(&self, content: &str) {
        if let Ok(mut slot) = self.content.write() {
            *slot = content.to_owned();
        }
    }
}
