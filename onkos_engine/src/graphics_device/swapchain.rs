/// SwapChain trait - back buffer ownership and presentation

use std::sync::Arc;
use crate::error::NativeResult;
use crate::graphics_device::NativeTexture;

pub trait SwapChain: Send {
    /// Texture backing the current back buffer
    fn back_buffer(&self) -> NativeResult<Arc<dyn NativeTexture>>;

    /// Resize the back buffers; views created over the old back buffer become stale
    fn resize_buffers(&mut self, width: u32, height: u32) -> NativeResult<()>;

    /// Present the back buffer
    ///
    /// # Arguments
    ///
    /// * `sync_interval` - 0 presents immediately, N waits for N vertical blanks
    fn present(&mut self, sync_interval: u32) -> NativeResult<()>;
}
