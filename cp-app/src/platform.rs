//! Host platform detection.

use wasm_bindgen::JsValue;

use crate::dom;

/// Global injected by the WeChat in-app browser.
const WECHAT_BRIDGE: &str = "WeixinJSBridge";

/// User agent marker of the WeChat in-app browser.
const WECHAT_USER_AGENT: &str = "MicroMessenger";

/// How a finished poster reaches the player's photo album.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    /// Trigger a file download through an anchor element.
    Download,
    /// Show the poster as an image; the player long-presses to save it.
    LongPress,
}

/// Capabilities of the host the page runs in. Resolved once at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Platform {
    wechat: bool,
}

impl Platform {
    /// Plain browser.
    #[must_use]
    pub const fn browser() -> Self {
        Self { wechat: false }
    }

    /// WeChat in-app browser.
    #[must_use]
    pub const fn wechat() -> Self {
        Self { wechat: true }
    }

    /// Inspect the running page.
    #[must_use]
    pub fn detect() -> Self {
        let Ok(window) = dom::window() else {
            return Self::browser();
        };
        let bridge = js_sys::Reflect::has(&window, &JsValue::from_str(WECHAT_BRIDGE))
            .unwrap_or(false);
        let user_agent = window.navigator().user_agent().unwrap_or_default();

        let platform = Self {
            wechat: bridge || is_wechat_user_agent(&user_agent),
        };
        tracing::info!("Host platform: {platform:?}");
        platform
    }

    /// Whether the page runs inside WeChat.
    #[must_use]
    pub fn is_wechat(self) -> bool {
        self.wechat
    }

    /// How the poster should be saved here.
    #[must_use]
    pub fn save_mode(self) -> SaveMode {
        if self.wechat {
            SaveMode::LongPress
        } else {
            SaveMode::Download
        }
    }
}

/// Whether `user_agent` belongs to the WeChat in-app browser.
#[must_use]
pub fn is_wechat_user_agent(user_agent: &str) -> bool {
    user_agent.contains(WECHAT_USER_AGENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wechat_user_agent_is_recognised() {
        let ua = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) \
                  AppleWebKit/605.1.15 (KHTML, like Gecko) Mobile/15E148 MicroMessenger/8.0.42";
        assert!(is_wechat_user_agent(ua));
        assert!(!is_wechat_user_agent("Mozilla/5.0 (X11; Linux x86_64) Firefox/130.0"));
    }

    #[test]
    fn save_mode_follows_platform() {
        assert_eq!(Platform::browser().save_mode(), SaveMode::Download);
        assert_eq!(Platform::wechat().save_mode(), SaveMode::LongPress);
        assert_eq!(Platform::default(), Platform::browser());
    }
}
