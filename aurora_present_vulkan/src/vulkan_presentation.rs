/// Vulkan presentation chain: swapchain, image views and layout transitions

use ash::vk;
use aurora_present::aurora::present::{
    AcquireOutcome, CommandSequence, Extent2d, PixelFormat, PresentImage, PresentOutcome,
    PresentationChain, PresentationConfig, RenderSignal,
};
use aurora_present::aurora::Result;
use aurora_present::{engine_bail, engine_debug, engine_err};
use std::sync::Arc;

use crate::vulkan_command_sequence::VulkanCommandSequence;
use crate::vulkan_format::{color_space_to_vk, pixel_format_to_vk};
use crate::vulkan_sync::VulkanRenderSignal;

fn color_subresource_range() -> vk::ImageSubresourceRange {
    vk::ImageSubresourceRange {
        aspect_mask: vk::ImageAspectFlags::COLOR,
        base_mip_level: 0,
        level_count: 1,
        base_array_layer: 0,
        layer_count: 1,
    }
}

// ============================================================================
// Present image
// ============================================================================

/// One swapchain image with its view
///
/// The image handle is owned by the swapchain; the view is destroyed by the
/// chain when the generation is dropped.
pub struct VulkanPresentImage {
    image: vk::Image,
    view: vk::ImageView,
    extent: Extent2d,
}

impl VulkanPresentImage {
    /// Raw Vulkan image handle
    pub fn image(&self) -> vk::Image {
        self.image
    }

    /// Color view over the whole image
    pub fn view(&self) -> vk::ImageView {
        self.view
    }
}

impl PresentImage for VulkanPresentImage {
    fn extent(&self) -> Extent2d {
        self.extent
    }
}

// ============================================================================
// Presentation chain
// ============================================================================

/// One swapchain generation
///
/// Built from a negotiated [`PresentationConfig`] and destroyed wholesale on
/// rebuild. The surface itself is owned by the device context and outlives
/// every generation, so it is only borrowed here for creation.
pub struct VulkanPresentationChain {
    device: Arc<ash::Device>,
    swapchain_loader: ash::khr::swapchain::Device,
    swapchain: vk::SwapchainKHR,
    present_queue: vk::Queue,
    images: Vec<VulkanPresentImage>,
    extent: Extent2d,
    format: PixelFormat,
}

impl VulkanPresentationChain {
    pub(crate) fn new(
        device: Arc<ash::Device>,
        swapchain_loader: ash::khr::swapchain::Device,
        surface: vk::SurfaceKHR,
        present_queue: vk::Queue,
        config: &PresentationConfig,
        pre_transform: vk::SurfaceTransformFlagsKHR,
        present_mode: vk::PresentModeKHR,
    ) -> Result<Self> {
        let vk_format = pixel_format_to_vk(config.format.format);
        let vk_extent = vk::Extent2D {
            width: config.extent.width,
            height: config.extent.height,
        };

        // TRANSFER_DST in addition to COLOR_ATTACHMENT so renderers may
        // clear or blit into the image without a render pass
        let create_info = vk::SwapchainCreateInfoKHR::default()
            .surface(surface)
            .min_image_count(config.min_image_count)
            .image_format(vk_format)
            .image_color_space(color_space_to_vk(config.format.color_space))
            .image_extent(vk_extent)
            .image_array_layers(1)
            .image_usage(vk::ImageUsageFlags::COLOR_ATTACHMENT | vk::ImageUsageFlags::TRANSFER_DST)
            .image_sharing_mode(vk::SharingMode::EXCLUSIVE)
            .pre_transform(pre_transform)
            .composite_alpha(vk::CompositeAlphaFlagsKHR::OPAQUE)
            .present_mode(present_mode)
            .clipped(true);

        let swapchain = unsafe { swapchain_loader.create_swapchain(&create_info, None) }
            .map_err(|e| engine_err!("aurora::vulkan", "Failed to create swapchain: {:?}", e))?;

        let raw_images = unsafe { swapchain_loader.get_swapchain_images(swapchain) }
            .map_err(|e| engine_err!("aurora::vulkan", "Failed to get swapchain images: {:?}", e))?;

        let mut images = Vec::with_capacity(raw_images.len());
        for image in raw_images {
            let view_info = vk::ImageViewCreateInfo::default()
                .image(image)
                .view_type(vk::ImageViewType::TYPE_2D)
                .format(vk_format)
                .components(vk::ComponentMapping::default())
                .subresource_range(color_subresource_range());
            let view = unsafe { device.create_image_view(&view_info, None) }
                .map_err(|e| engine_err!("aurora::vulkan", "Failed to create image view: {:?}", e))?;
            images.push(VulkanPresentImage {
                image,
                view,
                extent: config.extent,
            });
        }

        engine_debug!(
            "aurora::vulkan",
            "Swapchain created: {}x{}, {} images",
            config.extent.width,
            config.extent.height,
            images.len()
        );

        Ok(Self {
            device,
            swapchain_loader,
            swapchain,
            present_queue,
            images,
            extent: config.extent,
            format: config.format.format,
        })
    }

    fn target(&self, image_index: u32) -> Result<&VulkanPresentImage> {
        match self.images.get(image_index as usize) {
            Some(image) => Ok(image),
            None => engine_bail!(
                "aurora::vulkan",
                "Image index {} out of range ({} images)",
                image_index,
                self.images.len()
            ),
        }
    }
}

impl PresentationChain for VulkanPresentationChain {
    fn acquire_image(
        &mut self,
        signal_image_available: &dyn RenderSignal,
    ) -> Result<AcquireOutcome> {
        // Downcast to the Vulkan signal to access the semaphore
        let signal = unsafe {
            let ptr = signal_image_available as *const dyn RenderSignal as *const VulkanRenderSignal;
            &*ptr
        };

        let result = unsafe {
            self.swapchain_loader.acquire_next_image(
                self.swapchain,
                u64::MAX,
                signal.semaphore(),
                vk::Fence::null(),
            )
        };

        match result {
            Ok((image_index, suboptimal)) => Ok(AcquireOutcome::Acquired {
                image_index,
                suboptimal,
            }),
            Err(vk::Result::ERROR_OUT_OF_DATE_KHR) => Ok(AcquireOutcome::OutOfDate),
            Err(e) => Err(engine_err!(
                "aurora::vulkan",
                "Failed to acquire swapchain image: {:?}",
                e
            )),
        }
    }

    fn image(&self, image_index: u32) -> Result<&dyn PresentImage> {
        Ok(self.target(image_index)?)
    }

    fn record_render_transition(
        &self,
        commands: &mut dyn CommandSequence,
        image_index: u32,
    ) -> Result<()> {
        let target = self.target(image_index)?;

        // Downcast to the Vulkan sequence to access the command buffer
        let sequence = unsafe {
            let ptr = commands as *const dyn CommandSequence as *const VulkanCommandSequence;
            &*ptr
        };
        if !sequence.is_recording() {
            engine_bail!(
                "aurora::vulkan",
                "Layout transition requires a recording command sequence"
            );
        }

        let barrier = vk::ImageMemoryBarrier::default()
            .old_layout(vk::ImageLayout::UNDEFINED)
            .new_layout(vk::ImageLayout::TRANSFER_DST_OPTIMAL)
            .src_queue_family_index(vk::QUEUE_FAMILY_IGNORED)
            .dst_queue_family_index(vk::QUEUE_FAMILY_IGNORED)
            .image(target.image())
            .subresource_range(color_subresource_range())
            .src_access_mask(vk::AccessFlags::empty())
            .dst_access_mask(vk::AccessFlags::TRANSFER_WRITE);

        unsafe {
            self.device.cmd_pipeline_barrier(
                sequence.command_buffer(),
                vk::PipelineStageFlags::TOP_OF_PIPE,
                vk::PipelineStageFlags::TRANSFER,
                vk::DependencyFlags::empty(),
                &[],
                &[],
                &[barrier],
            );
        }
        Ok(())
    }

    fn record_present_transition(
        &self,
        commands: &mut dyn CommandSequence,
        image_index: u32,
    ) -> Result<()> {
        let target = self.target(image_index)?;

        let sequence = unsafe {
            let ptr = commands as *const dyn CommandSequence as *const VulkanCommandSequence;
            &*ptr
        };
        if !sequence.is_recording() {
            engine_bail!(
                "aurora::vulkan",
                "Layout transition requires a recording command sequence"
            );
        }

        let barrier = vk::ImageMemoryBarrier::default()
            .old_layout(vk::ImageLayout::TRANSFER_DST_OPTIMAL)
            .new_layout(vk::ImageLayout::PRESENT_SRC_KHR)
            .src_queue_family_index(vk::QUEUE_FAMILY_IGNORED)
            .dst_queue_family_index(vk::QUEUE_FAMILY_IGNORED)
            .image(target.image())
            .subresource_range(color_subresource_range())
            .src_access_mask(vk::AccessFlags::TRANSFER_WRITE)
            .dst_access_mask(vk::AccessFlags::empty());

        unsafe {
            self.device.cmd_pipeline_barrier(
                sequence.command_buffer(),
                vk::PipelineStageFlags::TRANSFER,
                vk::PipelineStageFlags::BOTTOM_OF_PIPE,
                vk::DependencyFlags::empty(),
                &[],
                &[],
                &[barrier],
            );
        }
        Ok(())
    }

    fn present(
        &mut self,
        image_index: u32,
        wait_render_finished: &dyn RenderSignal,
    ) -> Result<PresentOutcome> {
        let signal = unsafe {
            let ptr = wait_render_finished as *const dyn RenderSignal as *const VulkanRenderSignal;
            &*ptr
        };

        let wait_semaphores = [signal.semaphore()];
        let swapchains = [self.swapchain];
        let image_indices = [image_index];
        let present_info = vk::PresentInfoKHR::default()
            .wait_semaphores(&wait_semaphores)
            .swapchains(&swapchains)
            .image_indices(&image_indices);

        let result = unsafe {
            self.swapchain_loader
                .queue_present(self.present_queue, &present_info)
        };

        match result {
            Ok(false) => Ok(PresentOutcome::Presented),
            Ok(true) => Ok(PresentOutcome::Suboptimal),
            Err(vk::Result::ERROR_OUT_OF_DATE_KHR) => Ok(PresentOutcome::OutOfDate),
            Err(e) => Err(engine_err!(
                "aurora::vulkan",
                "Failed to present image: {:?}",
                e
            )),
        }
    }

    fn image_count(&self) -> usize {
        self.images.len()
    }

    fn extent(&self) -> Extent2d {
        self.extent
    }

    fn format(&self) -> PixelFormat {
        self.format
    }
}

impl Drop for VulkanPresentationChain {
    fn drop(&mut self) {
        // The device is quiesced by whoever drops a generation; no wait here
        unsafe {
            for image in &self.images {
                self.device.destroy_image_view(image.view, None);
            }
            self.swapchain_loader.destroy_swapchain(self.swapchain, None);
        }
    }
}

// ============================================================================
// Draw helpers
// ============================================================================

/// Record a full-image clear of `target` to `color`
///
/// The image must already be in the transfer-destination layout, which is
/// where the render transition leaves it. Suitable as the whole body of a
/// minimal [`FrameRenderer`].
///
/// [`FrameRenderer`]: aurora_present::aurora::present::FrameRenderer
pub fn record_clear_color(
    commands: &mut dyn CommandSequence,
    target: &dyn PresentImage,
    color: [f32; 4],
) -> Result<()> {
    let sequence = unsafe {
        let ptr = commands as *const dyn CommandSequence as *const VulkanCommandSequence;
        &*ptr
    };
    // Downcast to the Vulkan image to access the raw handle
    let image = unsafe {
        let ptr = target as *const dyn PresentImage as *const VulkanPresentImage;
        &*ptr
    };
    if !sequence.is_recording() {
        engine_bail!("aurora::vulkan", "Clear requires a recording command sequence");
    }

    let clear_value = vk::ClearColorValue { float32: color };
    let range = color_subresource_range();
    unsafe {
        sequence.device().cmd_clear_color_image(
            sequence.command_buffer(),
            image.image(),
            vk::ImageLayout::TRANSFER_DST_OPTIMAL,
            &clear_value,
            &[range],
        );
    }
    Ok(())
}
