//! User-facing strings.
//!
//! Locale resolution is a pure function of the browser's preference tag, so
//! nothing here reads global state.

use serde::{Deserialize, Serialize};

/// Supported UI locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

/// Lookup record of every string the controller shows.
#[derive(Debug)]
pub struct Messages {
    pub error: &'static str,
    pub enter_password: &'static str,
    pub password_empty: &'static str,
    pub enter_new_password: &'static str,
    pub password_set: &'static str,
    pub password_removed: &'static str,
    pub copied: &'static str,
    pub generic_error: &'static str,
}

static EN: Messages = Messages {
    error: "Error",
    enter_password: "Please enter password.",
    password_empty: "Password is empty!",
    enter_new_password: "Enter a new password(Keeping it empty will remove the current password)",
    password_set: "Password set successfully.",
    password_removed: "Password removed successfully.",
    copied: "Copied!",
    generic_error: "Something went wrong.",
};

static ZH: Messages = Messages {
    error: "出错了",
    enter_password: "请输入密码",
    password_empty: "密码不能为空！",
    enter_new_password: "输入新密码（留空可清除当前密码）",
    password_set: "密码设置成功！",
    password_removed: "密码清除成功！",
    copied: "已复制",
    generic_error: "出错了，请重试",
};

impl Locale {
    pub const SUPPORTED: [Locale; 2] = [Locale::En, Locale::Zh];

    /// Primary language subtag, e.g. `"zh"`.
    pub fn tag(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh",
        }
    }

    /// Resolve a browser language preference like `"zh-CN"`.
    ///
    /// Only the primary subtag is considered. Unsupported or missing
    /// preferences resolve to `fallback`.
    pub fn resolve(preference: Option<&str>, fallback: Locale) -> Locale {
        let Some(preference) = preference else {
            return fallback;
        };
        let primary = preference.split('-').next().unwrap_or_default();
        Self::SUPPORTED
            .into_iter()
            .find(|l| l.tag().eq_ignore_ascii_case(primary))
            .unwrap_or(fallback)
    }

    pub fn messages(self) -> &'static Messages {
        match self {
            Locale::En => &EN,
            Locale::Zh => &ZH,
        }
    }
}
