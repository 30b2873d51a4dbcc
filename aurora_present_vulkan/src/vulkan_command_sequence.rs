/// Vulkan command sequence backed by a dedicated command pool

use ash::vk;
use aurora_present::aurora::present::CommandSequence;
use aurora_present::aurora::Result;
use aurora_present::{engine_bail, engine_err};
use std::sync::Arc;

/// One recordable command sequence: its own pool plus one primary buffer
///
/// The pool is created with RESET_COMMAND_BUFFER so each `begin` can reset
/// the buffer individually. Recording uses ONE_TIME_SUBMIT because every
/// frame cycle re-records from scratch.
pub struct VulkanCommandSequence {
    device: Arc<ash::Device>,
    command_pool: vk::CommandPool,
    command_buffer: vk::CommandBuffer,
    is_recording: bool,
}

impl VulkanCommandSequence {
    pub(crate) fn new(device: Arc<ash::Device>, queue_family_index: u32) -> Result<Self> {
        let pool_info = vk::CommandPoolCreateInfo::default()
            .flags(vk::CommandPoolCreateFlags::RESET_COMMAND_BUFFER)
            .queue_family_index(queue_family_index);
        let command_pool = unsafe { device.create_command_pool(&pool_info, None) }
            .map_err(|e| engine_err!("aurora::vulkan", "Failed to create command pool: {:?}", e))?;

        let allocate_info = vk::CommandBufferAllocateInfo::default()
            .command_pool(command_pool)
            .level(vk::CommandBufferLevel::PRIMARY)
            .command_buffer_count(1);
        let command_buffers = unsafe { device.allocate_command_buffers(&allocate_info) }
            .map_err(|e| engine_err!("aurora::vulkan", "Failed to allocate command buffer: {:?}", e))?;

        Ok(Self {
            device,
            command_pool,
            command_buffer: command_buffers[0],
            is_recording: false,
        })
    }

    pub(crate) fn command_buffer(&self) -> vk::CommandBuffer {
        self.command_buffer
    }

    pub(crate) fn device(&self) -> &ash::Device {
        &self.device
    }

    pub(crate) fn is_recording(&self) -> bool {
        self.is_recording
    }
}

impl CommandSequence for VulkanCommandSequence {
    fn begin(&mut self) -> Result<()> {
        if self.is_recording {
            engine_bail!("aurora::vulkan", "Command sequence is already recording");
        }

        unsafe {
            self.device
                .reset_command_buffer(self.command_buffer, vk::CommandBufferResetFlags::empty())
                .map_err(|e| engine_err!("aurora::vulkan", "Failed to reset command buffer: {:?}", e))?;

            let begin_info = vk::CommandBufferBeginInfo::default()
                .flags(vk::CommandBufferUsageFlags::ONE_TIME_SUBMIT);
            self.device
                .begin_command_buffer(self.command_buffer, &begin_info)
                .map_err(|e| engine_err!("aurora::vulkan", "Failed to begin command buffer: {:?}", e))?;
        }

        self.is_recording = true;
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        if !self.is_recording {
            engine_bail!("aurora::vulkan", "Command sequence is not recording");
        }

        unsafe {
            self.device
                .end_command_buffer(self.command_buffer)
                .map_err(|e| engine_err!("aurora::vulkan", "Failed to end command buffer: {:?}", e))?;
        }

        self.is_recording = false;
        Ok(())
    }
}

impl Drop for VulkanCommandSequence {
    fn drop(&mut self) {
        // Destroying the pool frees its buffer
        unsafe {
            self.device.destroy_command_pool(self.command_pool, None);
        }
    }
}
