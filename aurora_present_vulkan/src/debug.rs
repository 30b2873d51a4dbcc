/// Vulkan validation layer message routing
///
/// Routes debug messenger callbacks from VK_LAYER_KHRONOS_validation into
/// the engine logging facade, mapped by severity.

use ash::vk;
use aurora_present::{engine_debug, engine_error, engine_info, engine_warn};
use std::ffi::CStr;

/// Debug messenger callback registered by the device context
///
/// Forwards every message and never aborts the Vulkan call that raised it.
pub unsafe extern "system" fn vulkan_debug_callback(
    message_severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    message_type: vk::DebugUtilsMessageTypeFlagsEXT,
    p_callback_data: *const vk::DebugUtilsMessengerCallbackDataEXT,
    _user_data: *mut std::os::raw::c_void,
) -> vk::Bool32 {
    let callback_data = *p_callback_data;
    let message_id_name = if callback_data.p_message_id_name.is_null() {
        "Unknown"
    } else {
        CStr::from_ptr(callback_data.p_message_id_name)
            .to_str()
            .unwrap_or("Invalid UTF-8")
    };
    let message = if callback_data.p_message.is_null() {
        "No message"
    } else {
        CStr::from_ptr(callback_data.p_message)
            .to_str()
            .unwrap_or("Invalid UTF-8")
    };

    let type_str = if message_type.contains(vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION) {
        "Validation"
    } else if message_type.contains(vk::DebugUtilsMessageTypeFlagsEXT::PERFORMANCE) {
        "Performance"
    } else {
        "General"
    };

    if message_severity.contains(vk::DebugUtilsMessageSeverityFlagsEXT::ERROR) {
        engine_error!(
            "aurora::vulkan::validation",
            "[{}] {}: {}",
            type_str,
            message_id_name,
            message
        );
    } else if message_severity.contains(vk::DebugUtilsMessageSeverityFlagsEXT::WARNING) {
        engine_warn!(
            "aurora::vulkan::validation",
            "[{}] {}: {}",
            type_str,
            message_id_name,
            message
        );
    } else if message_severity.contains(vk::DebugUtilsMessageSeverityFlagsEXT::INFO) {
        engine_info!(
            "aurora::vulkan::validation",
            "[{}] {}: {}",
            type_str,
            message_id_name,
            message
        );
    } else {
        engine_debug!(
            "aurora::vulkan::validation",
            "[{}] {}: {}",
            type_str,
            message_id_name,
            message
        );
    }

    vk::FALSE
}
