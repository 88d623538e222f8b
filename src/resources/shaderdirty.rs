//! "Something changed" flag for the shader manager.
//!
//! Each animation system marks [`ShaderDirty`] once, after its traversal,
//! when it wrote any uniform that tick. The renderer calls [`ShaderDirty::take`] before uploading
//! uniforms. The resource is optional: when it is not inserted, marking is
//! skipped.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ShaderDirty {
    dirty: bool,
    /// Total number of marks since creation.
    marks: u64,
}

impl ShaderDirty {
    pub fn mark(&mut self) {
        self.dirty = true;
        self.marks += 1;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Read and clear the flag.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn marks(&self) -> u64 {
        self.marks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_clears_flag() {
        let mut dirty = ShaderDirty::default();
        assert!(!dirty.take());
        dirty.mark();
        assert!(dirty.is_dirty());
        assert!(dirty.take());
        assert!(!dirty.is_dirty());
        assert_eq!(dirty.marks(), 1);
    }
}
