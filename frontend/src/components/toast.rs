//! 短暂提示
//!
//! 每条提示 3 秒后自动消失；新提示会替换旧提示，旧提示的定时器不会
//! 清掉新提示。

use std::time::Duration;

use leptos::prelude::*;

const TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq)]
struct Notice {
    seq: u64,
    text: String,
    is_error: bool,
}

#[derive(Clone, Copy)]
pub struct Toasts {
    current: RwSignal<Option<Notice>>,
    seq: StoredValue<u64>,
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            current: RwSignal::new(None),
            seq: StoredValue::new(0),
        }
    }

    pub fn success(&self, text: impl Into<String>) {
        self.show(text.into(), false);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.show(text.into(), true);
    }

    fn show(&self, text: String, is_error: bool) {
        // 页面已卸载时什么也不做
        let Some(seq) = self.push(text, is_error) else {
            return;
        };
        let toasts = *self;
        set_timeout(move || toasts.expire(seq), TOAST_DURATION);
    }

    /// 替换当前提示，返回它的序号；所属页面已销毁时返回 `None`
    fn push(&self, text: String, is_error: bool) -> Option<u64> {
        let seq = self.seq.try_update_value(|seq| {
            *seq += 1;
            *seq
        })?;
        let _ = self.current.try_set(Some(Notice {
            seq,
            text,
            is_error,
        }));
        Some(seq)
    }

    /// 定时器到期：只清除仍是同一序号的提示
    fn expire(&self, seq: u64) {
        let still_showing = self
            .current
            .try_with_untracked(|n| n.as_ref().is_some_and(|n| n.seq == seq))
            .unwrap_or(false);
        if still_showing {
            let _ = self.current.try_set(None);
        }
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

/// 提示框渲染位置
#[component]
pub fn ToastHost(toasts: Toasts) -> impl IntoView {
    let current = toasts.current;
    move || {
        current.get().map(|notice| {
            let class = if notice.is_error {
                "alert alert-error shadow-lg"
            } else {
                "alert alert-success shadow-lg"
            };
            view! {
                <div class="toast toast-top toast-end z-50">
                    <div class=class>
                        <span>{notice.text}</span>
                    </div>
                </div>
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current_text(toasts: &Toasts) -> Option<String> {
        toasts
            .current
            .with_untracked(|n| n.as_ref().map(|n| n.text.clone()))
    }

    #[test]
    fn stale_timer_does_not_clear_newer_notice() {
        let owner = Owner::new();
        owner.with(|| {
            let toasts = Toasts::new();
            let first = toasts.push("Device status updated!".into(), false).unwrap();
            let second = toasts.push("Failed to toggle device".into(), true).unwrap();
            assert!(second > first);

            toasts.expire(first);
            assert_eq!(current_text(&toasts).as_deref(), Some("Failed to toggle device"));

            toasts.expire(second);
            assert_eq!(current_text(&toasts), None);
        });
    }

    #[test]
    fn unmounted_page_ignores_late_notices_and_timers() {
        let owner = Owner::new();
        let toasts = owner.with(|| {
            let toasts = Toasts::new();
            toasts.push("Device added successfully!".into(), false);
            toasts
        });
        drop(owner);

        // 请求在离开页面后才返回
        assert_eq!(toasts.push("Device deleted successfully".into(), false), None);
        // 离开页面前启动的定时器随后到期
        toasts.expire(1);
    }
}
