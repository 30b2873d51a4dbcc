/// Vulkan device context: instance, surface, device and queue ownership

use ash::vk;
use aurora_present::aurora::present::{
    CommandSequence, CompletionGate, DeviceConfig, DeviceContext, Extent2d, PresentationChain,
    PresentationConfig, RenderSignal, SurfaceCaps, SurfaceFormat,
};
use aurora_present::aurora::{Error, Result};
use aurora_present::{engine_debug, engine_err, engine_error, engine_info};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use std::ffi::{c_char, CStr, CString};
use std::sync::Arc;

use crate::vulkan_command_sequence::VulkanCommandSequence;
use crate::vulkan_format::{choose_present_mode, vk_to_color_space, vk_to_pixel_format};
use crate::vulkan_presentation::VulkanPresentationChain;
use crate::vulkan_sync::{VulkanCompletionGate, VulkanRenderSignal};

/// Owner of every long-lived Vulkan object: entry, instance, window surface,
/// physical and logical device, and the combined graphics + present queue
///
/// The surface is created once here and survives every presentation chain
/// generation; chains borrow it for creation and never destroy it. Resources
/// created through the [`DeviceContext`] methods share the logical device by
/// `Arc` and must be dropped before the context itself.
pub struct VulkanDeviceContext {
    _entry: ash::Entry,
    instance: ash::Instance,
    surface_loader: ash::khr::surface::Instance,
    surface: vk::SurfaceKHR,
    physical_device: vk::PhysicalDevice,
    device: Arc<ash::Device>,
    swapchain_loader: ash::khr::swapchain::Device,
    queue: vk::Queue,
    queue_family_index: u32,
    debug_utils_loader: Option<ash::ext::debug_utils::Instance>,
    debug_messenger: Option<vk::DebugUtilsMessengerEXT>,
}

impl VulkanDeviceContext {
    /// Create the Vulkan context for `window`
    ///
    /// Picks the first physical device exposing a queue family with both
    /// graphics and present support for the window surface. Validation
    /// layers are enabled when the `vulkan-validation` feature is compiled
    /// in and `config.enable_validation` is set.
    ///
    /// # Arguments
    ///
    /// * `window` - Window providing display and window handles
    /// * `config` - Bootstrap options (validation, application identity)
    ///
    /// # Errors
    ///
    /// Returns `InitializationFailed` when no Vulkan driver, no physical
    /// device or no combined graphics + present queue family is available.
    pub fn new<W>(window: &W, config: DeviceConfig) -> Result<Self>
    where
        W: HasDisplayHandle + HasWindowHandle,
    {
        unsafe {
            let entry = ash::Entry::load().map_err(|e| {
                engine_error!("aurora::vulkan", "Failed to load Vulkan library: {}", e);
                Error::InitializationFailed(format!("Vulkan library not available: {}", e))
            })?;

            let display_handle = window.display_handle().map_err(|e| {
                engine_error!("aurora::vulkan", "Failed to get display handle: {}", e);
                Error::InitializationFailed(format!("No display handle: {}", e))
            })?;
            let window_handle = window.window_handle().map_err(|e| {
                engine_error!("aurora::vulkan", "Failed to get window handle: {}", e);
                Error::InitializationFailed(format!("No window handle: {}", e))
            })?;

            let validation = cfg!(feature = "vulkan-validation") && config.enable_validation;

            // ----- Instance -----

            let app_name = CString::new(config.app_name.as_str()).map_err(|_| {
                engine_error!("aurora::vulkan", "Application name contains a NUL byte");
                Error::InitializationFailed("Application name contains a NUL byte".to_string())
            })?;
            let (major, minor, patch) = config.app_version;
            let app_info = vk::ApplicationInfo::default()
                .application_name(app_name.as_c_str())
                .application_version(vk::make_api_version(0, major, minor, patch))
                .engine_name(c"Aurora")
                .engine_version(vk::make_api_version(0, 1, 0, 0))
                .api_version(vk::API_VERSION_1_1);

            let mut extension_names =
                ash_window::enumerate_required_extensions(display_handle.as_raw())
                    .map_err(|e| {
                        engine_error!(
                            "aurora::vulkan",
                            "Failed to enumerate surface extensions: {:?}",
                            e
                        );
                        Error::InitializationFailed(format!(
                            "Surface extensions unavailable: {:?}",
                            e
                        ))
                    })?
                    .to_vec();
            if validation {
                extension_names.push(ash::ext::debug_utils::NAME.as_ptr());
            }

            let layer_names: Vec<*const c_char> = if validation {
                vec![c"VK_LAYER_KHRONOS_validation".as_ptr()]
            } else {
                Vec::new()
            };

            let instance_info = vk::InstanceCreateInfo::default()
                .application_info(&app_info)
                .enabled_extension_names(&extension_names)
                .enabled_layer_names(&layer_names);

            let instance = entry.create_instance(&instance_info, None).map_err(|e| {
                engine_error!("aurora::vulkan", "Failed to create Vulkan instance: {:?}", e);
                Error::InitializationFailed(format!("Instance creation failed: {:?}", e))
            })?;
            engine_debug!("aurora::vulkan", "Vulkan instance created (API 1.1)");

            // ----- Debug messenger -----

            #[cfg(feature = "vulkan-validation")]
            let (debug_utils_loader, debug_messenger) = if validation {
                let messenger_info = vk::DebugUtilsMessengerCreateInfoEXT::default()
                    .message_severity(
                        vk::DebugUtilsMessageSeverityFlagsEXT::ERROR
                            | vk::DebugUtilsMessageSeverityFlagsEXT::WARNING
                            | vk::DebugUtilsMessageSeverityFlagsEXT::INFO,
                    )
                    .message_type(
                        vk::DebugUtilsMessageTypeFlagsEXT::GENERAL
                            | vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION
                            | vk::DebugUtilsMessageTypeFlagsEXT::PERFORMANCE,
                    )
                    .pfn_user_callback(Some(crate::debug::vulkan_debug_callback));
                let loader = ash::ext::debug_utils::Instance::new(&entry, &instance);
                let messenger = loader
                    .create_debug_utils_messenger(&messenger_info, None)
                    .map_err(|e| {
                        engine_error!(
                            "aurora::vulkan",
                            "Failed to create debug messenger: {:?}",
                            e
                        );
                        Error::InitializationFailed(format!(
                            "Debug messenger creation failed: {:?}",
                            e
                        ))
                    })?;
                engine_info!("aurora::vulkan", "Validation layers enabled");
                (Some(loader), Some(messenger))
            } else {
                (None, None)
            };
            #[cfg(not(feature = "vulkan-validation"))]
            let (debug_utils_loader, debug_messenger) = (None, None);

            // ----- Surface -----

            let surface = ash_window::create_surface(
                &entry,
                &instance,
                display_handle.as_raw(),
                window_handle.as_raw(),
                None,
            )
            .map_err(|e| {
                engine_error!("aurora::vulkan", "Failed to create window surface: {:?}", e);
                Error::InitializationFailed(format!("Surface creation failed: {:?}", e))
            })?;
            let surface_loader = ash::khr::surface::Instance::new(&entry, &instance);

            // ----- Physical device and queue family -----

            let physical_devices = instance.enumerate_physical_devices().map_err(|e| {
                engine_error!(
                    "aurora::vulkan",
                    "Failed to enumerate physical devices: {:?}",
                    e
                );
                Error::InitializationFailed(format!(
                    "Physical device enumeration failed: {:?}",
                    e
                ))
            })?;
            let physical_device = physical_devices.first().copied().ok_or_else(|| {
                engine_error!("aurora::vulkan", "No Vulkan physical device found");
                Error::InitializationFailed("No Vulkan physical device found".to_string())
            })?;

            let properties = instance.get_physical_device_properties(physical_device);
            let device_name = CStr::from_ptr(properties.device_name.as_ptr()).to_string_lossy();
            engine_info!("aurora::vulkan", "Using physical device: {}", device_name);

            let queue_families =
                instance.get_physical_device_queue_family_properties(physical_device);
            let mut combined_family = None;
            for (index, family) in queue_families.iter().enumerate() {
                let graphics = family.queue_flags.contains(vk::QueueFlags::GRAPHICS);
                let present = surface_loader
                    .get_physical_device_surface_support(physical_device, index as u32, surface)
                    .unwrap_or(false);
                if graphics && present {
                    combined_family = Some(index as u32);
                    break;
                }
            }
            let queue_family_index = combined_family.ok_or_else(|| {
                engine_error!(
                    "aurora::vulkan",
                    "No queue family supports both graphics and present"
                );
                Error::InitializationFailed(
                    "No combined graphics + present queue family".to_string(),
                )
            })?;

            // ----- Logical device and queue -----

            let queue_priorities = [1.0];
            let queue_infos = [vk::DeviceQueueCreateInfo::default()
                .queue_family_index(queue_family_index)
                .queue_priorities(&queue_priorities)];
            let device_extensions = [ash::khr::swapchain::NAME.as_ptr()];
            let features = vk::PhysicalDeviceFeatures::default();
            let device_info = vk::DeviceCreateInfo::default()
                .queue_create_infos(&queue_infos)
                .enabled_extension_names(&device_extensions)
                .enabled_features(&features);

            let device = instance
                .create_device(physical_device, &device_info, None)
                .map_err(|e| {
                    engine_error!("aurora::vulkan", "Failed to create logical device: {:?}", e);
                    Error::InitializationFailed(format!("Device creation failed: {:?}", e))
                })?;
            let device = Arc::new(device);
            let queue = device.get_device_queue(queue_family_index, 0);
            let swapchain_loader = ash::khr::swapchain::Device::new(&instance, &device);

            engine_info!(
                "aurora::vulkan",
                "Vulkan device ready (queue family {})",
                queue_family_index
            );

            Ok(Self {
                _entry: entry,
                instance,
                surface_loader,
                surface,
                physical_device,
                device,
                swapchain_loader,
                queue,
                queue_family_index,
                debug_utils_loader,
                debug_messenger,
            })
        }
    }
}

impl DeviceContext for VulkanDeviceContext {
    fn queue_family_index(&self) -> u32 {
        self.queue_family_index
    }

    fn surface_capabilities(&self) -> Result<SurfaceCaps> {
        let caps = unsafe {
            self.surface_loader
                .get_physical_device_surface_capabilities(self.physical_device, self.surface)
                .map_err(|e| {
                    engine_err!("aurora::vulkan", "Failed to query surface capabilities: {:?}", e)
                })?
        };
        Ok(SurfaceCaps {
            min_image_count: caps.min_image_count,
            max_image_count: caps.max_image_count,
            current_extent: Extent2d::new(caps.current_extent.width, caps.current_extent.height),
            min_image_extent: Extent2d::new(
                caps.min_image_extent.width,
                caps.min_image_extent.height,
            ),
            max_image_extent: Extent2d::new(
                caps.max_image_extent.width,
                caps.max_image_extent.height,
            ),
        })
    }

    fn surface_formats(&self) -> Result<Vec<SurfaceFormat>> {
        let formats = unsafe {
            self.surface_loader
                .get_physical_device_surface_formats(self.physical_device, self.surface)
                .map_err(|e| {
                    engine_err!("aurora::vulkan", "Failed to query surface formats: {:?}", e)
                })?
        };

        // Pairs the core types cannot express are dropped here
        Ok(formats
            .iter()
            .filter_map(|pair| {
                let format = vk_to_pixel_format(pair.format)?;
                let color_space = vk_to_color_space(pair.color_space)?;
                Some(SurfaceFormat { format, color_space })
            })
            .collect())
    }

    fn allocate_command_sequences(&self, count: usize) -> Result<Vec<Box<dyn CommandSequence>>> {
        let mut sequences: Vec<Box<dyn CommandSequence>> = Vec::with_capacity(count);
        for _ in 0..count {
            sequences.push(Box::new(VulkanCommandSequence::new(
                self.device.clone(),
                self.queue_family_index,
            )?));
        }
        Ok(sequences)
    }

    fn create_render_signal(&self) -> Result<Box<dyn RenderSignal>> {
        Ok(Box::new(VulkanRenderSignal::new(self.device.clone())?))
    }

    fn create_completion_gate(&self, signaled: bool) -> Result<Box<dyn CompletionGate>> {
        Ok(Box::new(VulkanCompletionGate::new(
            self.device.clone(),
            signaled,
        )?))
    }

    fn create_presentation(
        &self,
        config: &PresentationConfig,
    ) -> Result<Box<dyn PresentationChain>> {
        // Raw capabilities are re-queried for the pre-transform, which the
        // negotiated config does not carry
        let raw_caps = unsafe {
            self.surface_loader
                .get_physical_device_surface_capabilities(self.physical_device, self.surface)
                .map_err(|e| {
                    engine_err!("aurora::vulkan", "Failed to query surface capabilities: {:?}", e)
                })?
        };
        let supported_modes = unsafe {
            self.surface_loader
                .get_physical_device_surface_present_modes(self.physical_device, self.surface)
                .map_err(|e| {
                    engine_err!("aurora::vulkan", "Failed to query present modes: {:?}", e)
                })?
        };
        let present_mode = choose_present_mode(&supported_modes, config.present_mode);

        let chain = VulkanPresentationChain::new(
            self.device.clone(),
            self.swapchain_loader.clone(),
            self.surface,
            self.queue,
            config,
            raw_caps.current_transform,
            present_mode,
        )?;
        Ok(Box::new(chain))
    }

    fn submit(
        &self,
        commands: &dyn CommandSequence,
        wait_image_available: &dyn RenderSignal,
        signal_render_finished: &dyn RenderSignal,
        completion_gate: &dyn CompletionGate,
    ) -> Result<()> {
        // Downcast to the Vulkan types to access the raw handles
        let sequence = unsafe {
            let ptr = commands as *const dyn CommandSequence as *const VulkanCommandSequence;
            &*ptr
        };
        let image_available = unsafe {
            let ptr = wait_image_available as *const dyn RenderSignal as *const VulkanRenderSignal;
            &*ptr
        };
        let render_finished = unsafe {
            let ptr =
                signal_render_finished as *const dyn RenderSignal as *const VulkanRenderSignal;
            &*ptr
        };
        let gate = unsafe {
            let ptr = completion_gate as *const dyn CompletionGate as *const VulkanCompletionGate;
            &*ptr
        };

        // The first use of the acquired image is the transfer-stage layout
        // transition, so that is where the acquire semaphore must gate
        let wait_semaphores = [image_available.semaphore()];
        let wait_stages = [vk::PipelineStageFlags::TRANSFER];
        let command_buffers = [sequence.command_buffer()];
        let signal_semaphores = [render_finished.semaphore()];
        let submit_info = vk::SubmitInfo::default()
            .wait_semaphores(&wait_semaphores)
            .wait_dst_stage_mask(&wait_stages)
            .command_buffers(&command_buffers)
            .signal_semaphores(&signal_semaphores);

        unsafe {
            self.device
                .queue_submit(self.queue, &[submit_info], gate.fence())
                .map_err(|e| engine_err!("aurora::vulkan", "Queue submit failed: {:?}", e))
        }
    }

    fn wait_idle(&self) -> Result<()> {
        unsafe {
            self.device
                .device_wait_idle()
                .map_err(|e| engine_err!("aurora::vulkan", "Device wait idle failed: {:?}", e))
        }
    }
}

impl Drop for VulkanDeviceContext {
    fn drop(&mut self) {
        // Flush outstanding work before teardown
        self.wait_idle().ok();

        unsafe {
            // 1. Debug messenger (created from the instance, dies first)
            if let (Some(loader), Some(messenger)) =
                (&self.debug_utils_loader, self.debug_messenger)
            {
                loader.destroy_debug_utils_messenger(messenger, None);
            }

            // 2. Logical device
            self.device.destroy_device(None);

            // 3. Window surface
            self.surface_loader.destroy_surface(self.surface, None);

            // 4. Instance
            self.instance.destroy_instance(None);
        }
    }
}
