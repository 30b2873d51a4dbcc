/// Vulkan synchronization primitives: semaphore-backed render signals and
/// fence-backed completion gates

use ash::vk;
use aurora_present::aurora::present::{CompletionGate, RenderSignal};
use aurora_present::aurora::Result;
use aurora_present::engine_err;
use std::sync::Arc;

// ============================================================================
// Render signal (semaphore)
// ============================================================================

/// Binary semaphore ordering acquire, submit and present on the device
/// timeline
pub struct VulkanRenderSignal {
    device: Arc<ash::Device>,
    semaphore: vk::Semaphore,
}

impl VulkanRenderSignal {
    pub(crate) fn new(device: Arc<ash::Device>) -> Result<Self> {
        let create_info = vk::SemaphoreCreateInfo::default();
        let semaphore = unsafe { device.create_semaphore(&create_info, None) }
            .map_err(|e| engine_err!("aurora::vulkan", "Failed to create semaphore: {:?}", e))?;
        Ok(Self { device, semaphore })
    }

    pub(crate) fn semaphore(&self) -> vk::Semaphore {
        self.semaphore
    }
}

impl RenderSignal for VulkanRenderSignal {}

impl Drop for VulkanRenderSignal {
    fn drop(&mut self) {
        unsafe {
            self.device.destroy_semaphore(self.semaphore, None);
        }
    }
}

// ============================================================================
// Completion gate (fence)
// ============================================================================

/// Host-waitable fence signaled when a frame slot's submitted work completes
pub struct VulkanCompletionGate {
    device: Arc<ash::Device>,
    fence: vk::Fence,
}

impl VulkanCompletionGate {
    pub(crate) fn new(device: Arc<ash::Device>, signaled: bool) -> Result<Self> {
        let flags = if signaled {
            vk::FenceCreateFlags::SIGNALED
        } else {
            vk::FenceCreateFlags::empty()
        };
        let create_info = vk::FenceCreateInfo::default().flags(flags);
        let fence = unsafe { device.create_fence(&create_info, None) }
            .map_err(|e| engine_err!("aurora::vulkan", "Failed to create fence: {:?}", e))?;
        Ok(Self { device, fence })
    }

    pub(crate) fn fence(&self) -> vk::Fence {
        self.fence
    }
}

impl CompletionGate for VulkanCompletionGate {
    fn wait(&self, timeout_ns: u64) -> Result<()> {
        unsafe {
            self.device
                .wait_for_fences(&[self.fence], true, timeout_ns)
                .map_err(|e| engine_err!("aurora::vulkan", "Fence wait failed: {:?}", e))
        }
    }

    fn reset(&self) -> Result<()> {
        unsafe {
            self.device
                .reset_fences(&[self.fence])
                .map_err(|e| engine_err!("aurora::vulkan", "Fence reset failed: {:?}", e))
        }
    }
}

impl Drop for VulkanCompletionGate {
    fn drop(&mut self) {
        unsafe {
            self.device.destroy_fence(self.fence, None);
        }
    }
}
