use thiserror::Error;

/// Failure of a best-effort host side effect.
///
/// Never fatal: the monitor logs these and continues, so a failing hook
/// cannot prevent sibling handlers from running.
#[derive(Debug, Error)]
pub enum HookError {
    #[error("capability unavailable: {0}")]
    CapabilityUnavailable(&'static str),

    #[error("host hook failed: {0}")]
    Failed(String),
}

/// Outbound side effects the monitor asks of the host page.
///
/// Every method is best-effort. An implementation may fail freely (no
/// clipboard permission, style element already removed) without affecting
/// protection behavior; the monitor swallows errors after logging them.
pub trait HostHooks: Send + Sync {
    /// Overwrite the clipboard after a screenshot attempt.
    fn clear_clipboard(&self) -> Result<(), HookError>;

    /// Install the selection/drag/print protection styles.
    fn inject_protection_styles(&self) -> Result<(), HookError>;

    /// Remove previously injected styles.
    fn remove_protection_styles(&self) -> Result<(), HookError>;
}

/// Hooks for hosts with no side-effect surface (tests, headless runs).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHooks;

impl HostHooks for NoopHooks {
    fn clear_clipboard(&self) -> Result<(), HookError> {
        Ok(())
    }

    fn inject_protection_styles(&self) -> Result<(), HookError> {
        Ok(())
    }

    fn remove_protection_styles(&self) -> Result<(), HookError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_hooks_always_succeed() {
        let hooks = NoopHooks;
        assert!(hooks.clear_clipboard().is_ok());
        assert!(hooks.inject_protection_styles().is_ok());
        assert!(hooks.remove_protection_styles().is_ok());
    }

    #[test]
    fn test_hook_error_display() {
        let err = HookError::CapabilityUnavailable("clipboard");
        assert_eq!(err.to_string(), "capability unavailable: clipboard");
    }
}
