//! 资源视图的加载状态
//!
//! 每次加载：`idle → loading → {success, error}`。首次加载之后的重新加载
//! 只设置 `refreshing`，已有列表保持可见；失败时列表保持上一次成功的结果。

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceView<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub refreshing: bool,
    pub error: Option<String>,
    loaded: bool,
}

impl<T> Default for ResourceView<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            refreshing: false,
            error: None,
            loaded: false,
        }
    }
}

impl<T> ResourceView<T> {
    /// 开始一次加载
    pub fn start(&mut self) {
        if self.loaded {
            self.refreshing = true;
        } else {
            self.loading = true;
        }
        self.error = None;
    }

    /// 整体替换集合
    pub fn finish_ok(&mut self, items: Vec<T>) {
        self.items = items;
        self.loaded = true;
        self.loading = false;
        self.refreshing = false;
    }

    /// 记录错误，集合保持不变
    pub fn finish_err(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.loading = false;
        self.refreshing = false;
    }

    pub fn is_busy(&self) -> bool {
        self.loading || self.refreshing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_load_then_refresh() {
        let mut view = ResourceView::default();
        assert!(!view.is_busy());

        view.start();
        assert!(view.loading);
        assert!(!view.refreshing);

        view.finish_ok(vec![1, 2]);
        assert!(!view.is_busy());

        view.start();
        assert!(view.refreshing);
        assert!(!view.loading);
        assert_eq!(view.items, vec![1, 2]);
    }

    #[test]
    fn failure_keeps_stale_items() {
        let mut view = ResourceView::default();
        view.start();
        view.finish_ok(vec!["a"]);

        view.start();
        view.finish_err("Failed to load devices. Please try again.");

        assert!(view.error.is_some());
        assert_eq!(view.items, vec!["a"]);
        assert!(!view.is_busy());

        view.start();
        assert_eq!(view.error, None);
    }
}
