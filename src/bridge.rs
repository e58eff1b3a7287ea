//! Boundary to the native splash screen module.
//!
//! The runtime side of the splash screen is a thin pass-through: each call
//! checks that the native capability is linked and forwards to it.

use std::fmt;
use std::future::Future;
use thiserror::Error;

const MODULE_NAME: &str = "expo-splash-screen";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeMethod {
    PreventAutoHide,
    Hide,
}

impl NativeMethod {
    pub fn name(self) -> &'static str {
        match self {
            NativeMethod::PreventAutoHide => "preventAutoHideAsync",
            NativeMethod::Hide => "hideAsync",
        }
    }
}

impl fmt::Display for NativeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error("The method or property {module}.{method} is not available on this platform, are you sure you've linked all the native dependencies properly?")]
    Unavailable {
        module: &'static str,
        method: NativeMethod,
    },

    #[error("Native splash screen call failed: {0}")]
    Native(String),
}

/// Platform implementation of the splash screen controls.
///
/// Both operations resolve to whether the call had an effect.
pub trait SplashScreenModule {
    /// Whether `method` is linked on this platform.
    fn provides(&self, method: NativeMethod) -> bool;

    fn prevent_auto_hide(&self) -> impl Future<Output = Result<bool, BridgeError>> + Send;

    fn hide(&self) -> impl Future<Output = Result<bool, BridgeError>> + Send;
}

/// Keep the native splash screen visible until [`hide_async`] is called.
///
/// Must run before any view is created.
pub async fn prevent_auto_hide_async<M: SplashScreenModule>(
    module: &M,
) -> Result<bool, BridgeError> {
    ensure_linked(module, NativeMethod::PreventAutoHide)?;
    module.prevent_auto_hide().await
}

/// Hide the native splash screen.
pub async fn hide_async<M: SplashScreenModule>(module: &M) -> Result<bool, BridgeError> {
    ensure_linked(module, NativeMethod::Hide)?;
    module.hide().await
}

fn ensure_linked<M: SplashScreenModule>(
    module: &M,
    method: NativeMethod,
) -> Result<(), BridgeError> {
    if module.provides(method) {
        Ok(())
    } else {
        Err(BridgeError::Unavailable {
            module: MODULE_NAME,
            method,
        })
    }
}
